mod tests {
    use myrtio_beat_composer::{
        BeatClock, ConfigError, HsvPixel, Instant, LauncherConfig, ParticleLauncher, PixelCoord,
        StripLayout, TailConfig, TrailConfig, blend_hsv,
    };
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    const TICK_US: u64 = 50_000;

    fn layout() -> StripLayout {
        StripLayout::new(1, 10).unwrap()
    }

    /// Spawns on every beat; particles leave no embers
    fn config(lifetime_intervals: u32) -> LauncherConfig {
        LauncherConfig {
            spawn_chance: 1.0,
            lifetime_intervals: lifetime_intervals..=lifetime_intervals,
            tail_lengths: 4..=4,
            trail: TrailConfig {
                tail: TailConfig {
                    min_brightness: 0,
                    hue_shift: 0,
                },
                ..TrailConfig::default()
            },
            ..LauncherConfig::default()
        }
    }

    struct Rig {
        clock: BeatClock,
        launcher: ParticleLauncher,
        rng: SmallRng,
    }

    impl Rig {
        fn new(config: LauncherConfig) -> Self {
            Self {
                clock: BeatClock::new(120, 1, Instant::from_micros(0)).unwrap(),
                launcher: ParticleLauncher::new(layout(), config).unwrap(),
                rng: SmallRng::seed_from_u64(42),
            }
        }

        fn step(&mut self, us: u64) -> Option<Vec<HsvPixel>> {
            let now = Instant::from_micros(us);
            self.clock.update(now);
            self.launcher
                .step(&self.clock, now, &mut self.rng)
                .map(|frame| frame.as_slice().to_vec())
        }
    }

    #[test]
    fn test_rejects_invalid_config() {
        let mut config = LauncherConfig::default();
        config.spawn_chance = 0.0;
        assert_eq!(
            ParticleLauncher::new(layout(), config).unwrap_err(),
            ConfigError::InvalidProbability
        );

        let mut config = LauncherConfig::default();
        config.lifetime_intervals = 0..=3;
        assert_eq!(
            ParticleLauncher::new(layout(), config).unwrap_err(),
            ConfigError::InvalidRange
        );

        let mut config = LauncherConfig::default();
        config.tail_lengths = 0..=5;
        assert_eq!(
            ParticleLauncher::new(layout(), config).unwrap_err(),
            ConfigError::ZeroTailLength
        );
    }

    #[test]
    fn test_spawns_only_on_beat() {
        let mut rig = Rig::new(config(1));

        let mut us = 0;
        while us < 500_000 {
            assert!(rig.step(us).is_none());
            us += TICK_US;
        }
        assert!(rig.launcher.particles().is_empty());

        let frame = rig.step(500_000).unwrap();
        assert_eq!(rig.launcher.particles().len(), 1);
        assert_eq!(frame.as_slice(), rig.launcher.particles()[0].frame().as_slice());
        assert_eq!(frame[0].val, 255);
    }

    #[test]
    fn test_overlapping_particles_blend() {
        let mut rig = Rig::new(config(10));

        let mut us = 0;
        while us <= 1_000_000 {
            rig.step(us);
            us += TICK_US;
        }

        let particles = rig.launcher.particles();
        assert_eq!(particles.len(), 2);
        let merged = rig
            .launcher
            .step(&rig.clock, Instant::from_micros(1_000_000), &mut rig.rng)
            .cloned()
            .unwrap();

        let particles = rig.launcher.particles();
        for led in 0..10 {
            let coord = PixelCoord::new(0, led);
            let expected = blend_hsv(
                particles[0].frame().get(coord).unwrap(),
                particles[1].frame().get(coord).unwrap(),
            );
            assert_eq!(merged.get(coord), Some(expected));
        }
        // Both heads overlap the first pixel
        let first = merged.get(PixelCoord::new(0, 0)).unwrap();
        assert!(first.val > 255);
    }

    #[test]
    fn test_dead_particles_are_pruned() {
        let mut rig = Rig::new(config(1));

        let mut us = 0;
        while us < 10_000_000 {
            rig.step(us);
            assert!(rig.launcher.particles().len() <= 2);
            let dead = rig
                .launcher
                .particles()
                .iter()
                .filter(|particle| particle.is_dead())
                .count();
            assert!(dead <= 1);
            us += TICK_US;
        }
    }

    #[test]
    fn test_particle_cap() {
        let mut config = config(10);
        config.max_particles = 3;
        let mut rig = Rig::new(config);

        let mut us = 0;
        let mut peak = 0;
        while us < 4_000_000 {
            rig.step(us);
            peak = peak.max(rig.launcher.particles().len());
            us += TICK_US;
        }
        assert_eq!(peak, 3);
    }

    #[test]
    fn test_clear_drops_particles() {
        let mut rig = Rig::new(config(10));
        rig.step(0);
        rig.step(450_000);
        rig.step(500_000);
        assert!(!rig.launcher.particles().is_empty());

        rig.launcher.clear();
        assert!(rig.launcher.particles().is_empty());
        assert!(rig.step(550_000).is_none());
    }
}
