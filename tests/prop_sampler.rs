//! Property-based tests for the chart samplers.

use electroviz_core::core::sampler::{ac_wave, ohm_law, rc_charging, round2, DC_REFERENCE};
use proptest::prelude::*;

proptest! {
    /// Current is V/R to two decimals at the eleven voltages 0, 2, ..., 20.
    #[test]
    fn ohm_law_matches_division(resistance in 1u32..=50) {
        let r = resistance as f64;
        let samples = ohm_law(r);

        prop_assert_eq!(samples.len(), 11);
        for (i, s) in samples.iter().enumerate() {
            let v = (i * 2) as f64;
            prop_assert_eq!(s.x, v);
            prop_assert_eq!(s.y, round2(v / r));
            prop_assert!(s.reference.is_none());
        }
    }

    /// 37 samples, bounded amplitude and a flat DC line.
    #[test]
    fn ac_wave_shape(frequency in 0.0f64..=10.0) {
        let samples = ac_wave(frequency);

        prop_assert_eq!(samples.len(), 37);
        for (i, s) in samples.iter().enumerate() {
            prop_assert_eq!(s.x, (i * 10) as f64);
            prop_assert!((-10.0..=10.0).contains(&s.y));
            prop_assert_eq!(s.reference, Some(DC_REFERENCE));
        }
    }

    /// The charging curve starts at zero, rises monotonically and stays below the source.
    #[test]
    fn rc_charging_is_monotone(capacitance in 10u32..=200) {
        let samples = rc_charging(capacitance as f64);

        prop_assert_eq!(samples.len(), 21);
        prop_assert_eq!(samples[0].y, 0.0);
        for pair in samples.windows(2) {
            prop_assert!(pair[1].y >= pair[0].y);
            prop_assert!(pair[1].x > pair[0].x);
        }
        let last = samples[samples.len() - 1];
        prop_assert!(last.y <= 10.0);
        prop_assert!(last.y > 9.9);

        let tau = 1000.0 * capacitance as f64 * 1e-6;
        prop_assert!((last.x - 5.0 * tau).abs() < 1e-9);
    }
}
