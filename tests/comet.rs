mod tests {
    use myrtio_beat_composer::layer::{EmberComet, EmberCometConfig};
    use myrtio_beat_composer::{
        BeatClock, ConfigError, Frame, HsvPixel, Instant, Layer, LayerSlot, PixelCoord,
        StripLayout,
    };
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn comet(strips: u8, leds: u16, config: EmberCometConfig) -> EmberComet {
        EmberComet::new(StripLayout::new(strips, leds).unwrap(), config).unwrap()
    }

    fn pixel(frame: &Frame<HsvPixel>, led: u16) -> HsvPixel {
        frame.get(PixelCoord::new(0, led)).unwrap()
    }

    #[test]
    fn test_rejects_invalid_fade() {
        let layout = StripLayout::new(1, 10).unwrap();
        for (fade_low, fade_high) in [(0.0, 1.5), (1.2, 1.2), (0.9, 0.5)] {
            let config = EmberCometConfig {
                fade_low,
                fade_high,
                ..EmberCometConfig::DEFAULT
            };
            assert_eq!(
                EmberComet::new(layout, config).unwrap_err(),
                ConfigError::InvalidEmberDecay
            );
        }
    }

    #[test]
    fn test_head_moves_seven_of_eight_frames() {
        let mut comet = comet(1, 20, EmberCometConfig::DEFAULT);
        let mut rng = SmallRng::seed_from_u64(11);

        let heads: Vec<usize> = (0..9)
            .map(|_| {
                comet.step(&mut rng);
                comet.head()
            })
            .collect();
        assert_eq!(heads, [0, 0, 1, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn test_leader_fades_toward_white() {
        let mut comet = comet(1, 20, EmberCometConfig::DEFAULT);
        let mut rng = SmallRng::seed_from_u64(11);
        let frame = comet.step(&mut rng).clone();

        let head = pixel(&frame, 0);
        assert_eq!((head.hue, head.sat), (0, 255));
        assert!((114..=255).contains(&head.val));

        assert_eq!(pixel(&frame, 1).sat, 243);
        assert_eq!(pixel(&frame, 4).sat, 204);
        assert_eq!(pixel(&frame, 8).sat, 153);
        for led in 1..=8 {
            let leader = pixel(&frame, led);
            assert_eq!(leader.hue, 0);
            assert!((114..=255).contains(&leader.val));
        }
        for led in 9..20 {
            assert_eq!(pixel(&frame, led), HsvPixel::BLANK);
        }
    }

    #[test]
    fn test_trail_burns_out() {
        let config = EmberCometConfig {
            fade_low: 0.5,
            fade_high: 0.9,
            ..EmberCometConfig::DEFAULT
        };
        let mut comet = comet(1, 200, config);
        let mut rng = SmallRng::seed_from_u64(5);

        for _ in 0..100 {
            comet.step(&mut rng);
        }
        assert_eq!(comet.head(), 86);

        let frame = comet.step(&mut rng).clone();
        assert_eq!(comet.head(), 87);
        assert_eq!(pixel(&frame, 0).val, 0);
        assert!(pixel(&frame, 87).val >= 127);
        assert!(pixel(&frame, 95).val >= 127);
        assert_eq!(pixel(&frame, 96), HsvPixel::BLANK);
    }

    #[test]
    fn test_seeded_runs_repeat() {
        let mut first = comet(2, 30, EmberCometConfig::DEFAULT);
        let mut second = comet(2, 30, EmberCometConfig::DEFAULT);
        let mut first_rng = SmallRng::seed_from_u64(77);
        let mut second_rng = SmallRng::seed_from_u64(77);

        for _ in 0..50 {
            let a = first.step(&mut first_rng).clone();
            let b = second.step(&mut second_rng);
            assert_eq!(&a, b);
            assert!(a.as_slice().iter().all(|pixel| pixel.val <= 255));
        }
    }

    #[test]
    fn test_slot_hue_and_reset() {
        let clock = BeatClock::new(120, 1, Instant::from_micros(0)).unwrap();
        let now = Instant::from_micros(0);
        let mut rng = SmallRng::seed_from_u64(1);

        let mut slot = LayerSlot::from(comet(1, 20, EmberCometConfig::DEFAULT));
        assert_eq!(slot.name(), "ember_comet");

        slot.set_hue(100);
        let frame = slot.step(&clock, now, &mut rng).unwrap();
        assert_eq!(pixel(frame, 0).hue, 100);

        for _ in 0..10 {
            slot.step(&clock, now, &mut rng);
        }
        slot.reset();
        let frame = slot.step(&clock, now, &mut rng).unwrap();
        assert_eq!(pixel(frame, 0).hue, 100);
        assert_eq!(pixel(frame, 19), HsvPixel::BLANK);
    }
}
