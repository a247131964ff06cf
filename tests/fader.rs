mod common;

mod tests {
    use embassy_time::{Duration, Instant};
    use pca9685_rgb::{
        DriverConfig, Error, Fader, GroupLayout, Pca9685Rgb, PwmPair, Rgb, TransportError, correct,
    };

    use crate::common::RecordingTransport;

    const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };
    const WHITE: Rgb = Rgb {
        r: 255,
        g: 255,
        b: 255,
    };

    fn driver() -> Pca9685Rgb<RecordingTransport, 5> {
        Pca9685Rgb::new(RecordingTransport::default(), DriverConfig::default()).unwrap()
    }

    #[test]
    fn test_first_tick_writes_every_group() {
        let mut driver = driver();
        let mut fader = Fader::<5>::new(GroupLayout::Rgb);

        assert_eq!(fader.tick(Instant::from_millis(0), &mut driver), Ok(5));
        assert_eq!(fader.tick(Instant::from_millis(10), &mut driver), Ok(0));
        assert_eq!(driver.release().transactions.len(), 5);
    }

    #[test]
    fn test_fade_group_writes_only_that_group() {
        let mut driver = driver();
        let mut fader = Fader::<5>::new(GroupLayout::Rgb);
        fader.tick(Instant::from_millis(0), &mut driver).unwrap();

        fader
            .fade_group(2, WHITE, Duration::from_millis(100), Instant::from_millis(0))
            .unwrap();
        assert!(fader.is_transitioning());

        assert_eq!(fader.tick(Instant::from_millis(50), &mut driver), Ok(1));
        assert_eq!(fader.color(2), Some(Rgb::new(127, 127, 127)));

        assert_eq!(fader.tick(Instant::from_millis(100), &mut driver), Ok(1));
        assert!(!fader.is_transitioning());
        assert_eq!(fader.color(2), Some(WHITE));

        let bus = driver.release();
        assert_eq!(bus.transactions.len(), 7);
        let last = &bus.transactions[6];
        assert_eq!(usize::from(last.register()), 0x06 + 12 * 2);
        assert_eq!(last.pairs(), [(1638, 1637); 3]);
        assert_eq!(
            bus.transactions[5].pairs()[0],
            (1638, 1638 + correct(127))
        );
    }

    #[test]
    fn test_zero_duration_fade_is_instant() {
        let mut driver = driver();
        let mut fader = Fader::<5>::new(GroupLayout::Rgb);
        fader
            .fade_all(
                Rgb::new(255, 0, 0),
                Duration::from_millis(0),
                Instant::from_millis(0),
            )
            .unwrap();
        assert!(!fader.is_transitioning());
        assert_eq!(fader.tick(Instant::from_millis(0), &mut driver), Ok(5));

        let bus = driver.release();
        assert_eq!(bus.transactions[0].pairs(), [(0, 4095), (0, 0), (0, 0)]);
    }

    #[test]
    fn test_invalidate_rewrites_everything() {
        let mut driver = driver();
        let mut fader = Fader::<5>::new(GroupLayout::Rgb);
        fader.tick(Instant::from_millis(0), &mut driver).unwrap();
        fader.invalidate();
        assert_eq!(fader.tick(Instant::from_millis(1), &mut driver), Ok(5));
    }

    #[test]
    fn test_fade_group_out_of_range() {
        let mut fader = Fader::<5>::new(GroupLayout::Rgb);
        assert_eq!(
            fader.fade_group(5, 10, Duration::from_millis(10), Instant::from_millis(0)),
            Err(Error::GroupOutOfRange(5))
        );
        assert_eq!(fader.color(5), None);
    }

    #[test]
    fn test_grey_fades_on_single_channel_groups() {
        let config = DriverConfig::<8>::default().with_layout(GroupLayout::Single);
        let mut driver = Pca9685Rgb::new(RecordingTransport::default(), config).unwrap();
        let mut fader = Fader::<8>::new(GroupLayout::Single);
        fader
            .fade_all(200, Duration::from_millis(100), Instant::from_millis(0))
            .unwrap();

        assert_eq!(fader.tick(Instant::from_millis(100), &mut driver), Ok(8));
        let bus = driver.release();
        assert!(bus.transactions.iter().all(|t| t.payload().len() == 4));
        assert_eq!(bus.transactions[0].pairs(), [(0, correct(200))]);
    }

    fn single_groups() -> Pca9685Rgb<RecordingTransport, 4> {
        let config = DriverConfig::<4>::default().with_layout(GroupLayout::Single);
        Pca9685Rgb::new(RecordingTransport::default(), config).unwrap()
    }

    #[test]
    fn test_colors_rejected_for_single_channel_groups() {
        let mut driver = single_groups();
        let mut fader = Fader::<4>::new(GroupLayout::Single);
        let start = Instant::from_millis(0);
        assert_eq!(fader.tick(start, &mut driver), Ok(4));

        assert_eq!(
            fader.fade_group(0, (1, 2, 3), Duration::from_millis(0), start),
            Err(Error::ShapeMismatch)
        );
        assert_eq!(
            fader.fade_all((1, 2, 3), Duration::from_millis(0), start),
            Err(Error::ShapeMismatch)
        );
        assert_eq!(
            fader.blink_group(1, (1, 2, 3), Duration::from_millis(10), 1, start),
            Err(Error::ShapeMismatch)
        );
        assert_eq!(fader.color(0), Some(BLACK));
        assert!(!fader.is_transitioning());

        fader
            .fade_group(3, 200, Duration::from_millis(0), start)
            .unwrap();
        fader
            .fade_group(2, (90, 90, 90), Duration::from_millis(0), start)
            .unwrap();
        assert_eq!(fader.tick(Instant::from_millis(1), &mut driver), Ok(2));

        let bus = driver.release();
        assert_eq!(bus.transactions.len(), 6);
        let last = &bus.transactions[5];
        assert_eq!(last.register(), 0x06 + 4 * 3);
        let expected = PwmPair::staggered(3072, correct(200));
        assert_eq!(last.pairs(), [(expected.on, expected.off)]);
    }

    #[test]
    fn test_rejected_group_does_not_block_the_others() {
        // Fader and driver disagree on the layout, so only the driver can refuse
        let mut driver = single_groups();
        let mut fader = Fader::<4>::new(GroupLayout::Rgb);
        let start = Instant::from_millis(0);
        assert_eq!(fader.tick(start, &mut driver), Ok(4));

        fader
            .fade_group(0, (1, 2, 3), Duration::from_millis(0), start)
            .unwrap();
        fader
            .fade_group(3, 200, Duration::from_millis(0), start)
            .unwrap();
        assert_eq!(
            fader.tick(Instant::from_millis(1), &mut driver),
            Err(Error::ShapeMismatch)
        );
        assert_eq!(
            fader.tick(Instant::from_millis(2), &mut driver),
            Err(Error::ShapeMismatch)
        );

        let bus = driver.release();
        assert_eq!(bus.transactions.len(), 5);
        assert_eq!(bus.transactions[4].register(), 0x06 + 4 * 3);
    }

    #[test]
    fn test_failed_write_is_retried_on_next_tick() {
        let mut driver =
            Pca9685Rgb::new(RecordingTransport::failing_at(1), DriverConfig::<5>::default())
                .unwrap();
        let mut fader = Fader::<5>::new(GroupLayout::Rgb);

        assert_eq!(
            fader.tick(Instant::from_millis(0), &mut driver),
            Err(Error::Transport(TransportError::NoAcknowledge))
        );
        assert_eq!(driver.transport().transactions.len(), 4);

        assert_eq!(fader.tick(Instant::from_millis(1), &mut driver), Ok(1));
        assert_eq!(fader.tick(Instant::from_millis(2), &mut driver), Ok(0));

        let bus = driver.release();
        assert_eq!(bus.transactions.len(), 5);
        let registers: Vec<u8> = bus.transactions.iter().map(|t| t.register()).collect();
        assert_eq!(registers, [0x06, 0x06 + 24, 0x06 + 36, 0x06 + 48, 0x06 + 12]);
    }

    #[test]
    fn test_blink_goes_out_and_back() {
        let mut driver = driver();
        let mut fader = Fader::<5>::new(GroupLayout::Rgb);
        fader.tick(Instant::from_millis(0), &mut driver).unwrap();

        fader
            .blink_group(1, WHITE, Duration::from_millis(100), 2, Instant::from_millis(0))
            .unwrap();

        fader.tick(Instant::from_millis(100), &mut driver).unwrap();
        assert_eq!(fader.color(1), Some(WHITE));

        fader.tick(Instant::from_millis(150), &mut driver).unwrap();
        assert_eq!(fader.color(1), Some(Rgb::new(128, 128, 128)));

        fader.tick(Instant::from_millis(200), &mut driver).unwrap();
        assert_eq!(fader.color(1), Some(BLACK));
        assert!(fader.is_transitioning());

        fader.tick(Instant::from_millis(300), &mut driver).unwrap();
        assert_eq!(fader.color(1), Some(WHITE));

        assert_eq!(fader.tick(Instant::from_millis(400), &mut driver), Ok(1));
        assert_eq!(fader.color(1), Some(BLACK));
        assert!(!fader.is_transitioning());

        let bus = driver.release();
        assert!(
            bus.transactions[5..]
                .iter()
                .all(|t| t.register() == 0x06 + 12)
        );
    }

    #[test]
    fn test_blink_group_out_of_range() {
        let mut fader = Fader::<5>::new(GroupLayout::Rgb);
        assert_eq!(
            fader.blink_group(7, WHITE, Duration::from_millis(10), 1, Instant::from_millis(0)),
            Err(Error::GroupOutOfRange(7))
        );
    }
}
