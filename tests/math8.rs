mod tests {
    use myrtio_beat_composer::math8::{frac8, scale8, screen8};

    #[test]
    fn test_scale8() {
        assert_eq!(scale8(255, 128), 128);
        assert_eq!(scale8(0, 128), 0);
        assert_eq!(scale8(128, 128), 64);
        assert_eq!(scale8(128, 255), 128);
        assert_eq!(scale8(255, 127), 127);
        assert_eq!(scale8(128, 0), 0);
    }

    #[test]
    fn test_screen8() {
        assert_eq!(screen8(0, 0), 0);
        assert_eq!(screen8(0, 77), 77);
        assert_eq!(screen8(77, 0), 77);
        assert_eq!(screen8(255, 10), 255);
        assert_eq!(screen8(128, 128), 192);
    }

    #[test]
    fn test_frac8() {
        assert_eq!(frac8(0.0), 0);
        assert_eq!(frac8(0.5), 127);
        assert_eq!(frac8(1.0), 255);
        assert_eq!(frac8(-0.5), 0);
        assert_eq!(frac8(3.0), 255);
    }
}
