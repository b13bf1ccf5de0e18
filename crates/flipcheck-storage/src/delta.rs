//! Signed differences between paired values.

/// `minuend - subtrahend`, missing if either operand is missing.
///
/// The combined table always calls this as `(WC, HG)`; the classifier calls it
/// as `(reference, alternative)` after resolving the modeled conformation.
pub fn signed_delta(minuend: Option<f64>, subtrahend: Option<f64>) -> Option<f64> {
    Some(minuend? - subtrahend?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn propagates_missing() {
        assert_eq!(signed_delta(Some(1.0), None), None);
        assert_eq!(signed_delta(None, Some(1.0)), None);
        assert_eq!(signed_delta(None, None), None);
    }

    #[test]
    fn zero_is_not_missing() {
        assert_eq!(signed_delta(Some(0.0), Some(0.0)), Some(0.0));
        assert_eq!(signed_delta(Some(5.0), Some(10.0)), Some(-5.0));
    }
}
