mod tests {
    use pca9685_rgb::lightness::{LIGHTNESS_TABLE, correct, correct_rgb, derive_entry};
    use pca9685_rgb::{PWM_MAX, Rgb};

    #[test]
    fn test_boundaries() {
        assert_eq!(correct(0), 0);
        assert_eq!(correct(255), PWM_MAX);
        assert_eq!(correct(255), 4095);
    }

    #[test]
    fn test_monotonic() {
        for window in LIGHTNESS_TABLE.windows(2) {
            assert!(window[0] <= window[1], "{} > {}", window[0], window[1]);
        }
        for i in 0..=255u8 {
            for j in i..=255u8 {
                assert!(correct(i) <= correct(j));
            }
        }
    }

    #[test]
    fn test_table_matches_formula() {
        for index in 0..=255u8 {
            assert_eq!(
                LIGHTNESS_TABLE[usize::from(index)],
                derive_entry(index),
                "entry {index}"
            );
        }
    }

    #[test]
    fn test_known_values() {
        assert_eq!(correct(1), 2);
        assert_eq!(correct(20), 36);
        assert_eq!(correct(64), 182);
        assert_eq!(correct(128), 761);
        assert_eq!(correct(192), 1996);
        assert_eq!(correct(254), 4054);
    }

    #[test]
    fn test_low_end_is_compressed() {
        // Half of the input range lands well below half of the PWM range
        assert!(correct(128) < PWM_MAX / 4);
    }

    #[test]
    fn test_rgb_is_elementwise() {
        for r in (0..=255u8).step_by(17) {
            for g in (0..=255u8).step_by(51) {
                for b in [0u8, 1, 127, 128, 254, 255] {
                    assert_eq!(
                        correct_rgb(Rgb { r, g, b }),
                        [correct(r), correct(g), correct(b)]
                    );
                }
            }
        }
    }
}
