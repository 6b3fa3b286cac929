use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

use serde::{Deserialize, Serialize};

/// Signed evidence pair used by the Dirichlet-posterior engine.
///
/// `negative <= 0 <= positive` holds for every pair produced by the engine;
/// the magnitudes are the Beta pseudo-counts `(beta, alpha)`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EvidencePair {
    pub negative: f64,
    pub positive: f64,
}

impl EvidencePair {
    pub const ZERO: Self = Self {
        negative: 0.0,
        positive: 0.0,
    };

    pub fn new(negative: f64, positive: f64) -> Self {
        Self { negative, positive }
    }

    /// Put a single signed value on the side matching its sign.
    pub fn from_signed(value: f64) -> Self {
        if value < 0.0 {
            Self::new(value, 0.0)
        } else {
            Self::new(0.0, value)
        }
    }

    /// Beta `alpha` pseudo-count.
    pub fn alpha(&self) -> f64 {
        self.positive
    }

    /// Beta `beta` pseudo-count.
    pub fn beta(&self) -> f64 {
        self.negative.abs()
    }

    /// Both sides lie on their own side of zero.
    pub fn is_sign_split(&self) -> bool {
        self.negative <= 0.0 && self.positive >= 0.0
    }

    /// Clamp each side back onto its own half-line.
    pub fn clamped(self) -> Self {
        Self::new(self.negative.min(0.0), self.positive.max(0.0))
    }

    pub fn is_finite(&self) -> bool {
        self.negative.is_finite() && self.positive.is_finite()
    }
}

impl Add for EvidencePair {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.negative + rhs.negative, self.positive + rhs.positive)
    }
}

impl AddAssign for EvidencePair {
    fn add_assign(&mut self, rhs: Self) {
        self.negative += rhs.negative;
        self.positive += rhs.positive;
    }
}

impl Sub for EvidencePair {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.negative - rhs.negative, self.positive - rhs.positive)
    }
}

impl SubAssign for EvidencePair {
    fn sub_assign(&mut self, rhs: Self) {
        self.negative -= rhs.negative;
        self.positive -= rhs.positive;
    }
}

impl Neg for EvidencePair {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.negative, -self.positive)
    }
}
