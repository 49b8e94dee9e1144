//! Accuracy semantics: positional accuracy, decimal places, and significant
//! figures, with checked conversions between them.

use crate::defs::Error;

// Offset applied to a requested accuracy so that intermediate round-off cannot
// reach the retained digits.
const ACCURACY_ADJUSTMENT: i32 = 1;

/// Interpretation of an accuracy parameter.
#[derive(PartialEq, Eq, Copy, Clone, Debug)]
pub enum AccuracyStrategy {
    /// Accuracy is the position of the least significant retained digit.
    Positional,

    /// Accuracy is the number of digits after the decimal point.
    DecimalPlaces,

    /// Accuracy is the number of significant figures.
    SignificantFigures,
}

impl AccuracyStrategy {
    /// Tightens the accuracy by the safety margin. Positional accuracy grows
    /// downward, the counting strategies grow upward.
    pub fn adjust(&self, accuracy: i32) -> Result<i32, Error> {
        let adjusted = match self {
            AccuracyStrategy::Positional => accuracy.checked_sub(ACCURACY_ADJUSTMENT),
            _ => accuracy.checked_add(ACCURACY_ADJUSTMENT),
        };
        adjusted.ok_or(Error::Overflow("accuracy adjustment"))
    }

    /// Returns the accuracy value that retains only the leading digit of a
    /// result with the given order.
    pub fn leading_digit_position(&self, order: i32) -> Result<i32, Error> {
        match self {
            AccuracyStrategy::Positional => Ok(order),
            AccuracyStrategy::SignificantFigures => Ok(1),
            AccuracyStrategy::DecimalPlaces => {
                order.checked_neg().ok_or(Error::Overflow("leading digit position"))
            }
        }
    }
}

/// Converts a scale to the position of the least significant digit.
pub fn least_digit_position_by_scale(scale: i32) -> i32 {
    -scale
}

/// Converts the position of the least significant digit to a scale.
pub fn scale_from_least_digit_position(position: i32) -> i32 {
    -position
}

/// Converts a precision (significant digits) and a result order to the
/// position of the least significant digit.
pub fn least_digit_position_by_precision(precision: i32, order: i32) -> Result<i32, Error> {
    if precision < 1 {
        return Err(Error::PrecisionUnderflow(precision));
    }
    order
        .checked_add(1)
        .and_then(|v| v.checked_sub(precision))
        .ok_or(Error::Overflow("position from precision"))
}

/// Converts the position of the least significant digit and a result order to
/// a precision (significant digits).
pub fn precision_from_least_digit_position(position: i32, order: i32) -> Result<i32, Error> {
    let precision = order
        .checked_add(1)
        .and_then(|v| v.checked_sub(position))
        .ok_or(Error::Overflow("precision from position"))?;
    if precision < 1 {
        return Err(Error::PrecisionUnderflow(precision));
    }
    Ok(precision)
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn test_adjust() {
        assert_eq!(AccuracyStrategy::Positional.adjust(-10), Ok(-11));
        assert_eq!(AccuracyStrategy::DecimalPlaces.adjust(10), Ok(11));
        assert_eq!(AccuracyStrategy::SignificantFigures.adjust(10), Ok(11));

        assert!(AccuracyStrategy::Positional.adjust(i32::MIN).is_err());
        assert!(AccuracyStrategy::SignificantFigures.adjust(i32::MAX).is_err());
    }

    #[test]
    fn test_leading_digit_position() {
        assert_eq!(AccuracyStrategy::Positional.leading_digit_position(-3), Ok(-3));
        assert_eq!(AccuracyStrategy::SignificantFigures.leading_digit_position(-3), Ok(1));
        assert_eq!(AccuracyStrategy::DecimalPlaces.leading_digit_position(-3), Ok(3));
    }

    #[test]
    fn test_position_precision_conversions() {
        assert_eq!(least_digit_position_by_precision(10, 0), Ok(-9));
        assert_eq!(least_digit_position_by_precision(10, -1), Ok(-10));
        assert_eq!(least_digit_position_by_precision(1, 4), Ok(4));
        assert_eq!(
            least_digit_position_by_precision(0, 0),
            Err(Error::PrecisionUnderflow(0))
        );

        assert_eq!(precision_from_least_digit_position(-9, 0), Ok(10));
        assert_eq!(precision_from_least_digit_position(4, 4), Ok(1));
        assert_eq!(
            precision_from_least_digit_position(2, 0),
            Err(Error::PrecisionUnderflow(-1))
        );
    }

    #[test]
    fn test_scale_conversions() {
        assert_eq!(least_digit_position_by_scale(5), -5);
        assert_eq!(scale_from_least_digit_position(-5), 5);
    }
}
