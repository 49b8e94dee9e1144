//! The series engine: solves for the number of terms and the per-term
//! accuracy a requested positional accuracy demands, then accumulates.

use tracing::trace;

use crate::accuracy::AccuracyStrategy;
use crate::defs::Error;
use crate::defs::RoundingMode;
use crate::num::BigDecimal;
use crate::ops::accum::SeriesSum;
use crate::ops::terms::SeriesTerm;
use crate::ops::Approximator;
use crate::order::overestimate_order_of_int;
use crate::search::AdaptiveIntegerFinder;

/// A convergent series summed to a requested positional accuracy.
///
/// With `optimized` set, the required-term-count solver relies on the caller's
/// guarantee that each remainder shrinks by at least a factor of ten, i.e. the
/// argument has been reduced into the fast-converging window of the series.
pub struct Series<T> {
    optimized: bool,
    min_index: i32,
    term: T,
    accumulation: SeriesSum,
}

impl<T: SeriesTerm> Series<T> {
    pub fn new(optimized: bool, min_index: i32, term: T, accumulation: SeriesSum) -> Self {
        Series {
            optimized,
            min_index,
            term,
            accumulation,
        }
    }

    pub fn is_optimized(&self) -> bool {
        self.optimized
    }

    /// The first term rounded to one significant digit.
    fn first_term_minimal(&self) -> Result<BigDecimal, Error> {
        self.term.approximate_minimal(self.min_index)
    }

    fn accumulate(&self, adjusted_accuracy: i32) -> Result<BigDecimal, Error> {
        let terms_count = self.required_terms_count(adjusted_accuracy)?;
        let term_accuracy = compute_term_accuracy(adjusted_accuracy, terms_count)?;

        trace!(terms_count, term_accuracy, adjusted_accuracy, "series solved");

        self.accumulation
            .accumulate(self.min_index, terms_count, term_accuracy, &self.term)
    }

    // Smallest count of leading terms whose remainder cannot disturb the
    // requested accuracy.
    fn required_terms_count(&self, adjusted_accuracy: i32) -> Result<i32, Error> {
        let predicate = |index: i32| self.negligible(index, adjusted_accuracy);
        let finder = AdaptiveIntegerFinder::new(predicate, true);
        let min_matching_index = finder.find(self.min_index)?.unwrap_or(self.min_index);

        min_matching_index
            .checked_sub(self.min_index)
            .ok_or(Error::Overflow("required series term count"))
    }

    fn negligible(&self, index: i32, adjusted_accuracy: i32) -> Result<bool, Error> {
        let threshold = if self.optimized {
            adjusted_accuracy
                .checked_sub(1)
                .ok_or(Error::Overflow("negligibility threshold"))?
        } else {
            let terms_count = index
                .checked_sub(self.min_index)
                .ok_or(Error::Overflow("negligibility threshold"))?;
            compute_term_accuracy(adjusted_accuracy, terms_count)?
        };

        Ok(match self.term.overestimate_order(index)? {
            None => true,
            Some(order) => order < threshold,
        })
    }
}

impl<T: SeriesTerm> Approximator for Series<T> {
    fn approximate(&self, accuracy: i32, rounding: RoundingMode) -> Result<BigDecimal, Error> {
        let adjusted_accuracy = AccuracyStrategy::Positional.adjust(accuracy)?;
        let sum = self.accumulate(adjusted_accuracy)?;

        let scale = accuracy
            .checked_neg()
            .ok_or(Error::Overflow("scale of a series sum"))?;
        sum.with_scale(scale, rounding)
    }

    /// The order of the sum, computed from a coarse approximation at the
    /// position suggested by the first term.
    fn order(&self) -> Result<Option<i32>, Error> {
        let first_term = self.first_term_minimal()?;
        let Some(first_term_order) = first_term.order() else {
            return Ok(None);
        };

        let lower_estimation = first_term_order
            .checked_sub(1)
            .ok_or(Error::Overflow("series order lower estimation"))?;
        let accuracy = AccuracyStrategy::Positional.leading_digit_position(lower_estimation)?;
        let coarse = self.approximate(accuracy, RoundingMode::Down)?;

        Ok(coarse.order())
    }
}

// Accuracy each term must carry so that the round-off of `terms_count`
// truncated terms stays below the adjusted accuracy.
pub(crate) fn compute_term_accuracy(
    adjusted_accuracy: i32,
    terms_count: i32,
) -> Result<i32, Error> {
    if terms_count == 0 {
        return Ok(adjusted_accuracy);
    }

    let count_order = overestimate_order_of_int(terms_count)
        .ok_or(Error::Internal("order of a zero term count"))?;
    adjusted_accuracy
        .checked_sub(count_order)
        .ok_or(Error::Overflow("series term accuracy"))
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::ops::terms::EulerTerm;
    use crate::ops::terms::GregoryLnTerm;

    fn dec(s: &str) -> BigDecimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_term_accuracy() {
        assert_eq!(compute_term_accuracy(-10, 0), Ok(-10));
        // nine terms shift the accuracy by one decimal digit
        assert_eq!(compute_term_accuracy(-10, 9), Ok(-11));
        // ten terms are a power of ten and keep the overestimate tight
        assert_eq!(compute_term_accuracy(-10, 10), Ok(-11));
        assert_eq!(compute_term_accuracy(-10, 11), Ok(-12));
    }

    #[test]
    fn test_euler_series() {
        let series = Series::new(false, 0, EulerTerm::new(), SeriesSum::Sequential);

        let sum = series.approximate(-10, RoundingMode::HalfUp).unwrap();
        assert_eq!(sum.to_string(), "2.7182818285");

        let sum = series.approximate(-4, RoundingMode::Down).unwrap();
        assert_eq!(sum.to_string(), "2.7182");

        assert_eq!(series.order().unwrap(), Some(0));
    }

    #[test]
    fn test_gregory_series_inside_window() {
        // ln(1.5)/2 = 0.2027325541...
        let series = Series::new(true, 0, GregoryLnTerm::new(dec("1.5")), SeriesSum::Sequential);

        let sum = series.approximate(-10, RoundingMode::Down).unwrap();
        assert_eq!(sum.to_string(), "0.2027325540");

        let sum = series.approximate(-9, RoundingMode::HalfUp).unwrap();
        assert_eq!(sum.to_string(), "0.202732554");

        assert_eq!(series.order().unwrap(), Some(-1));
    }

    #[test]
    fn test_zero_series() {
        // every term of the Gregory series vanishes at the argument one
        let series = Series::new(true, 0, GregoryLnTerm::new(dec("1")), SeriesSum::Sequential);

        assert_eq!(series.order().unwrap(), None);
        let sum = series.approximate(-10, RoundingMode::HalfUp).unwrap();
        assert!(sum.is_zero());
        assert_eq!(sum.to_string(), "0.0000000000");
    }

    #[test]
    fn test_narrowing_consistency() {
        // a finer sum re-rounded must match the coarser sum
        let series = Series::new(false, 0, EulerTerm::new(), SeriesSum::Sequential);

        let fine = series.approximate(-25, RoundingMode::HalfUp).unwrap();
        let coarse = series.approximate(-10, RoundingMode::HalfUp).unwrap();
        assert_eq!(fine.with_scale(10, RoundingMode::HalfUp).unwrap(), coarse);
    }
}
