mod tests {
    use myrtio_beat_composer::{
        ColorPrimitives, Frame, FrameCompositor, HsvPixel, PixelCoord, Rgb, ScreenBlend,
        StripLayout, merge_layers,
    };

    const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };

    /// Encodes the fold order into the red channel
    struct DigitFold;

    impl ColorPrimitives for DigitFold {
        fn hsv_to_rgb(&self, hsv: HsvPixel) -> Rgb {
            Rgb {
                r: hsv.hue,
                g: 0,
                b: 0,
            }
        }

        fn blend_rgb(&self, a: Rgb, b: Rgb) -> Rgb {
            Rgb {
                r: a.r * 10 + b.r,
                g: 0,
                b: 0,
            }
        }
    }

    fn layout() -> StripLayout {
        StripLayout::new(2, 8).unwrap()
    }

    #[test]
    fn test_unlit_pixels_are_black() {
        let a = Frame::new(layout(), HsvPixel::new(100, 200, 0));
        let b = Frame::new(layout(), HsvPixel::new(30, 10, 0));
        let mut output = Frame::new(layout(), Rgb { r: 9, g: 9, b: 9 });

        merge_layers(&ScreenBlend, &[&a, &b], &mut output);
        assert!(output.as_slice().iter().all(|&rgb| rgb == BLACK));
    }

    #[test]
    fn test_single_lit_layer_passes_through() {
        let lit = HsvPixel::new(42, 255, 200);
        let coord = PixelCoord::new(1, 3);
        let mut a = Frame::new(layout(), HsvPixel::BLANK);
        a.set(coord, lit);
        let b = Frame::new(layout(), HsvPixel::new(7, 7, 0));

        let mut compositor = FrameCompositor::new(layout(), ScreenBlend);
        let output = compositor.merge_layers(&[&a, &b]);

        assert_eq!(output.get(coord), Some(ScreenBlend.hsv_to_rgb(lit)));
        assert_eq!(output.get(PixelCoord::new(0, 3)), Some(BLACK));
    }

    #[test]
    fn test_layers_blend_in_rgb() {
        let red = HsvPixel::new(0, 255, 255);
        let blue = HsvPixel::new(170, 255, 255);
        let a = Frame::new(layout(), red);
        let b = Frame::new(layout(), blue);

        let mut compositor = FrameCompositor::new(layout(), ScreenBlend);
        let output = compositor.merge_layers(&[&a, &b]);

        let expected = ScreenBlend.blend_rgb(
            ScreenBlend.hsv_to_rgb(red),
            ScreenBlend.hsv_to_rgb(blue),
        );
        assert!(output.as_slice().iter().all(|&rgb| rgb == expected));
    }

    #[test]
    fn test_fold_order_is_layer_order() {
        let layers = [1, 2, 3].map(|hue| Frame::new(layout(), HsvPixel::new(hue, 0, 1)));
        let refs: Vec<&Frame<HsvPixel>> = layers.iter().collect();

        let mut compositor = FrameCompositor::new(layout(), DigitFold);
        let output = compositor.merge_layers(&refs);
        assert_eq!(output.get(PixelCoord::new(0, 0)).map(|rgb| rgb.r), Some(123));
    }

    #[test]
    fn test_overbright_value_saturates() {
        let bright = ScreenBlend.hsv_to_rgb(HsvPixel::new(60, 200, 600));
        let full = ScreenBlend.hsv_to_rgb(HsvPixel::new(60, 200, 255));
        assert_eq!(bright, full);
    }

    #[test]
    fn test_clear_blanks_output() {
        let a = Frame::new(layout(), HsvPixel::new(0, 255, 255));
        let mut compositor = FrameCompositor::new(layout(), ScreenBlend);
        compositor.merge_layers(&[&a]);
        let output = compositor.clear();
        assert!(output.as_slice().iter().all(|&rgb| rgb == BLACK));
    }
}
