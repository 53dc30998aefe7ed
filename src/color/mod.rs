mod blend;
mod pixel;
mod primitives;

pub use blend::{blend_hsv, blend_many};
pub use pixel::{HsvPixel, wrap_hue};
pub use primitives::{ColorPrimitives, ScreenBlend};
use smart_leds::{RGB8, hsv::Hsv as HSV};

pub type Rgb = RGB8;
pub type Hsv = HSV;
