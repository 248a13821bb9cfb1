// File: src/core/sampler.rs
use crate::core::types::VisualizationKind;
use std::f64::consts::PI;

/// Fixed series resistance of the RC charging demo, in ohms.
pub const RC_RESISTANCE_OHMS: f64 = 1000.0;
/// Source voltage for the RC demo and amplitude of the AC wave.
pub const SOURCE_VOLTAGE: f64 = 10.0;
/// Constant DC reference plotted next to the AC wave.
pub const DC_REFERENCE: f64 = 5.0;
const RC_STEPS: usize = 20;

/// One charted point. `reference` is only set for series that carry a second line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub x: f64,
    pub y: f64,
    pub reference: Option<f64>,
}

/// A slider-backed parameter with the inclusive range and step the UI offers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlRange {
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub default: f64,
}

impl ControlRange {
    /// Clamps into range and snaps to the nearest step above `min`.
    pub fn snap(&self, value: f64) -> f64 {
        if !value.is_finite() {
            return self.default;
        }
        let clamped = value.clamp(self.min, self.max);
        let steps = ((clamped - self.min) / self.step).round();
        (self.min + steps * self.step).min(self.max)
    }
}

pub const RESISTANCE_RANGE: ControlRange = ControlRange { min: 1.0, max: 50.0, step: 1.0, default: 10.0 };
pub const FREQUENCY_RANGE: ControlRange = ControlRange { min: 1.0, max: 5.0, step: 0.5, default: 1.0 };
pub const CAPACITANCE_RANGE: ControlRange = ControlRange { min: 10.0, max: 200.0, step: 10.0, default: 50.0 };

/// Current control values. Setters keep every value inside its range, so
/// resistance is never zero by the time it reaches the sampler.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlParams {
    resistance_ohms: f64,
    frequency_multiplier: f64,
    capacitance_uf: f64,
}

impl Default for ControlParams {
    fn default() -> Self {
        Self {
            resistance_ohms: RESISTANCE_RANGE.default,
            frequency_multiplier: FREQUENCY_RANGE.default,
            capacitance_uf: CAPACITANCE_RANGE.default,
        }
    }
}

impl ControlParams {
    pub fn resistance(&self) -> f64 { self.resistance_ohms }
    pub fn frequency(&self) -> f64 { self.frequency_multiplier }
    pub fn capacitance(&self) -> f64 { self.capacitance_uf }

    pub fn set_resistance(&mut self, ohms: f64) {
        self.resistance_ohms = RESISTANCE_RANGE.snap(ohms);
    }

    pub fn set_frequency(&mut self, multiplier: f64) {
        self.frequency_multiplier = FREQUENCY_RANGE.snap(multiplier);
    }

    pub fn set_capacitance(&mut self, microfarads: f64) {
        self.capacitance_uf = CAPACITANCE_RANGE.snap(microfarads);
    }
}

/// Rounds to two decimal places, as the charts display.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Produces the chart series for `kind`. `None` means the topic has no chart.
pub fn sample(kind: VisualizationKind, params: &ControlParams) -> Option<Vec<Sample>> {
    match kind {
        VisualizationKind::OhmLaw => Some(ohm_law(params.resistance())),
        VisualizationKind::AcWave => Some(ac_wave(params.frequency())),
        VisualizationKind::RcCircuit => Some(rc_charging(params.capacitance())),
        VisualizationKind::Generic => None,
    }
}

/// Current through `resistance` for voltages 0, 2, ..., 20.
pub fn ohm_law(resistance: f64) -> Vec<Sample> {
    (0..=20)
        .step_by(2)
        .map(|v| {
            let voltage = v as f64;
            Sample { x: voltage, y: round2(voltage / resistance), reference: None }
        })
        .collect()
}

/// A 10 V sine over 0..=360 degrees in 10 degree steps, with the DC line alongside.
pub fn ac_wave(frequency_multiplier: f64) -> Vec<Sample> {
    (0..=360)
        .step_by(10)
        .map(|t| {
            let angle = t as f64;
            let radians = angle * PI / 180.0;
            Sample {
                x: angle,
                y: SOURCE_VOLTAGE * (frequency_multiplier * radians).sin(),
                reference: Some(DC_REFERENCE),
            }
        })
        .collect()
}

/// Capacitor voltage while charging through the fixed 1 kΩ resistor,
/// sampled at 21 equally spaced times across five time constants.
pub fn rc_charging(capacitance_uf: f64) -> Vec<Sample> {
    let tau = RC_RESISTANCE_OHMS * (capacitance_uf * 1e-6);
    let dt = 5.0 * tau / RC_STEPS as f64;

    (0..=RC_STEPS)
        .map(|i| {
            let t = i as f64 * dt;
            let v = SOURCE_VOLTAGE * (1.0 - (-t / tau).exp());
            Sample { x: t, y: round2(v), reference: None }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ohm_law_default_resistance() {
        let samples = ohm_law(10.0);
        assert_eq!(samples.len(), 11);
        assert_eq!(samples[0].y, 0.0);
        assert_eq!(samples[5].y, 1.0);
        assert_eq!(samples[10].y, 2.0);
    }

    #[test]
    fn ohm_law_rounds_to_cents() {
        let samples = ohm_law(3.0);
        assert_eq!(samples[1].y, 0.67);
        assert_eq!(samples[2].y, 1.33);
    }

    #[test]
    fn rc_endpoints() {
        let samples = rc_charging(50.0);
        assert_eq!(samples.len(), 21);
        assert_eq!(samples[0].y, 0.0);
        // 10 * (1 - e^-5) = 9.9326...
        assert_eq!(samples[20].y, 9.93);
        assert!((samples[20].x - 0.25).abs() < 1e-12);
    }

    #[test]
    fn generic_has_no_series() {
        assert!(sample(VisualizationKind::Generic, &ControlParams::default()).is_none());
        assert!(sample(VisualizationKind::AcWave, &ControlParams::default()).is_some());
    }

    #[test]
    fn controls_clamp_and_snap() {
        let mut params = ControlParams::default();
        params.set_resistance(0.0);
        assert_eq!(params.resistance(), 1.0);
        params.set_resistance(73.0);
        assert_eq!(params.resistance(), 50.0);
        params.set_frequency(2.3);
        assert_eq!(params.frequency(), 2.5);
        params.set_capacitance(114.0);
        assert_eq!(params.capacitance(), 110.0);
        params.set_capacitance(f64::NAN);
        assert_eq!(params.capacitance(), 50.0);
    }
}
