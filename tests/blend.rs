mod tests {
    use myrtio_beat_composer::{HsvPixel, blend_hsv, blend_many};

    #[test]
    fn test_unlit_is_identity() {
        let lit = [
            HsvPixel::new(0, 0, 1),
            HsvPixel::new(200, 30, 255),
            HsvPixel::new(254, 255, 600),
        ];
        for noise in [HsvPixel::new(17, 99, 0), HsvPixel::new(250, 255, 0)] {
            for &pixel in &lit {
                assert_eq!(blend_hsv(noise, pixel), pixel);
                assert_eq!(blend_hsv(pixel, noise), pixel);
            }
        }
    }

    #[test]
    fn test_hue_takes_short_arc_backwards() {
        let blended = blend_hsv(HsvPixel::new(0, 255, 128), HsvPixel::new(200, 255, 128));
        // 0 -> 255 -> 200 is 55 steps, half way is 27 steps back from 0
        assert_eq!(blended.hue, 228);
        assert_eq!(blended.sat, 255);
    }

    #[test]
    fn test_hue_takes_short_arc_forwards() {
        let blended = blend_hsv(HsvPixel::new(10, 255, 100), HsvPixel::new(60, 255, 100));
        assert_eq!(blended.hue, 35);
    }

    #[test]
    fn test_weighted_by_brightness() {
        let blended = blend_hsv(HsvPixel::new(0, 255, 192), HsvPixel::new(100, 0, 64));
        assert_eq!(blended, HsvPixel::new(25, 191, 256));
    }

    #[test]
    fn test_value_is_additive() {
        let blended = blend_hsv(HsvPixel::new(40, 255, 200), HsvPixel::new(40, 255, 200));
        assert_eq!(blended, HsvPixel::new(40, 255, 400));
        assert_eq!(blended.to_hsv().val, 255);
    }

    #[test]
    fn test_blend_many_folds_left() {
        assert_eq!(blend_many(Vec::<HsvPixel>::new()), None);

        let a = HsvPixel::new(0, 255, 100);
        let b = HsvPixel::new(50, 255, 100);
        let c = HsvPixel::new(100, 128, 0);
        assert_eq!(blend_many([a]), Some(a));
        assert_eq!(blend_many([a, b, c]), Some(blend_hsv(blend_hsv(a, b), c)));
        assert_eq!(blend_many([c, a, b]), Some(blend_hsv(a, b)));
    }
}
