use mannord_core::constants::NEUTRAL_NORMALIZATION;
use tracing::debug;

/// Root mean square of `values`, or the neutral coefficient when there is
/// nothing to normalize or every value is zero.
pub fn rms_or_neutral(values: &[f64]) -> f64 {
    if values.is_empty() {
        return NEUTRAL_NORMALIZATION;
    }
    let mean_sq = values.iter().map(|v| v * v).sum::<f64>() / values.len() as f64;
    let rms = mean_sq.sqrt();
    if rms == 0.0 {
        debug!(samples = values.len(), "zero-variance normalization, using neutral coefficient");
        NEUTRAL_NORMALIZATION
    } else {
        rms
    }
}
