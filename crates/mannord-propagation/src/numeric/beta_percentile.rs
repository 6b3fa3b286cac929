//! Percentile statistic of a Beta posterior, computed numerically.
//!
//! The density `x^α (1-x)^β` is sampled on a fixed grid over (0, 1),
//! integrated with the trapezoidal rule, and the first grid interval whose
//! cumulative mass reaches `(1 - percentile)` of the total gives `x*`, so
//! that `P(X >= x*) = percentile`.

use mannord_core::config::DirichletConfig;
use mannord_core::errors::PropagationError;
use mannord_core::models::EvidencePair;

/// Percentile lookup plus the reliability and weight statistics built on it.
#[derive(Debug, Clone)]
pub struct BetaPercentile {
    percentile: f64,
    step: f64,
    evidence_bound: f64,
    /// `(ln x, ln(1 - x))` for every grid point.
    log_grid: Vec<(f64, f64)>,
    /// `x*` at zero evidence.
    midpoint: f64,
}

impl BetaPercentile {
    pub fn new(percentile: f64, grid_step: f64, evidence_bound: f64) -> Self {
        let points = ((1.0 / grid_step).round() as usize).saturating_sub(1);
        let log_grid = (0..points)
            .map(|i| {
                let x = (i + 1) as f64 * grid_step;
                (x.ln(), (1.0 - x).ln())
            })
            .collect();
        let mut stat = Self {
            percentile,
            step: grid_step,
            evidence_bound,
            log_grid,
            midpoint: 0.0,
        };
        stat.midpoint = stat.locate(0.0, 0.0);
        stat
    }

    pub fn from_config(config: &DirichletConfig) -> Self {
        Self::new(config.percentile, config.grid_step, config.evidence_bound)
    }

    /// `x*` for zero evidence; the point reliability and weight are centred on.
    pub fn midpoint(&self) -> f64 {
        self.midpoint
    }

    /// `x*` such that `P(X >= x*) = percentile` under `Beta(alpha = pos, beta = |neg|)`.
    pub fn percentile_point(&self, neg: f64, pos: f64) -> Result<f64, PropagationError> {
        for (entity, value) in [("negative evidence", neg), ("positive evidence", pos)] {
            if !value.is_finite() {
                return Err(PropagationError::NonFiniteValue {
                    entity: entity.to_string(),
                    value,
                });
            }
        }
        let alpha = pos;
        let beta = neg.abs();
        if alpha > self.evidence_bound || beta > self.evidence_bound {
            return Err(PropagationError::EvidenceOverflow {
                alpha,
                beta,
                bound: self.evidence_bound,
            });
        }
        Ok(self.locate(alpha, beta))
    }

    /// `(max(0, x* - mid) / (1 - mid))^2`; zero at zero evidence.
    pub fn reliability(&self, evidence: EvidencePair) -> Result<f64, PropagationError> {
        let x = self.percentile_point(evidence.negative, evidence.positive)?;
        let above = (x - self.midpoint).max(0.0) / (1.0 - self.midpoint);
        Ok(above * above)
    }

    /// `x* - mid`; negative leans spam.
    pub fn item_weight(&self, evidence: EvidencePair) -> Result<f64, PropagationError> {
        Ok(self.percentile_point(evidence.negative, evidence.positive)? - self.midpoint)
    }

    fn locate(&self, alpha: f64, beta: f64) -> f64 {
        // Log space, rescaled by the peak, so large counts do not underflow.
        let mut density: Vec<f64> = self
            .log_grid
            .iter()
            .map(|&(ln_x, ln_1mx)| alpha * ln_x + beta * ln_1mx)
            .collect();
        let peak = density.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        for v in &mut density {
            *v = (*v - peak).exp();
        }

        let step = self.step;
        let trapezoid = |w: &[f64]| (w[0] + w[1]) / 2.0 * step;
        let total: f64 = density.windows(2).map(trapezoid).sum();
        let threshold = (1.0 - self.percentile) * total;

        let mut cumulative = 0.0;
        let idx = density
            .windows(2)
            .map(trapezoid)
            .position(|mass| {
                cumulative += mass;
                cumulative >= threshold
            })
            .unwrap_or(density.len().saturating_sub(1));
        idx as f64 * step
    }
}

impl Default for BetaPercentile {
    fn default() -> Self {
        Self::from_config(&DirichletConfig::default())
    }
}
