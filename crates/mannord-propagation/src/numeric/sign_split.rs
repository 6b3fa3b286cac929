use mannord_core::errors::PropagationError;
use mannord_core::models::EvidencePair;

/// Sign of `x` as -1, 0 or +1.
pub fn sign(x: f64) -> f64 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Order two values of opposite sign (or with a zero) as `(negative, positive)`.
///
/// Two values sharing a strict sign mean evidence was accumulated on the
/// wrong side; that is an invariant violation and no pair is returned.
pub fn split_by_sign(a: f64, b: f64) -> Result<EvidencePair, PropagationError> {
    if a.is_nan() || b.is_nan() {
        return Err(PropagationError::NonFiniteValue {
            entity: "split_by_sign input".to_string(),
            value: f64::NAN,
        });
    }
    if a * b > 0.0 {
        return Err(PropagationError::InvariantViolation {
            details: format!("split_by_sign({a}, {b}): inputs share a strict sign"),
        });
    }
    if a < 0.0 || (a == 0.0 && b >= 0.0) {
        Ok(EvidencePair::new(a, b))
    } else {
        Ok(EvidencePair::new(b, a))
    }
}
