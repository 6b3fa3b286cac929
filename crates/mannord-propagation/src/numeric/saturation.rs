use std::f64::consts::PI;

use mannord_core::config::KargerConfig;

/// Odd, strictly monotonic response bounded by `±asymptote`.
///
/// `f(x) = A * (2/π) * atan(x * gain / A)`, so `f(0) = 0` and `f'(0) = gain`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Saturation {
    asymptote: f64,
    gain: f64,
    enabled: bool,
}

impl Saturation {
    pub fn new(asymptote: f64, gain: f64) -> Self {
        Self {
            asymptote,
            gain,
            enabled: true,
        }
    }

    /// Pass-through response, used when saturation is switched off.
    pub fn identity() -> Self {
        Self {
            asymptote: f64::INFINITY,
            gain: 1.0,
            enabled: false,
        }
    }

    pub fn from_config(config: &KargerConfig) -> Self {
        if config.use_saturation {
            Self::new(config.asymptote, config.gain)
        } else {
            Self::identity()
        }
    }

    pub fn asymptote(&self) -> f64 {
        self.asymptote
    }

    pub fn apply(&self, x: f64) -> f64 {
        if !self.enabled {
            return x;
        }
        self.asymptote * (2.0 / PI) * (x * self.gain / self.asymptote).atan()
    }
}

impl Default for Saturation {
    fn default() -> Self {
        Self::from_config(&KargerConfig::default())
    }
}
