//! Euler's number.

use crate::defs::Error;
use crate::defs::RoundingMode;
use crate::num::BigDecimal;
use crate::ops::accum::SeriesSum;
use crate::ops::series::Series;
use crate::ops::terms::EulerTerm;
use crate::ops::Approximator;

const MIN_SERIES_INDEX: i32 = 0;

/// The Euler number e, summed as `1/0! + 1/1! + 1/2! + ...`.
pub struct EulerNumber {
    series: Series<EulerTerm>,
}

impl EulerNumber {
    pub fn new(accumulation: SeriesSum) -> Self {
        EulerNumber {
            series: Series::new(false, MIN_SERIES_INDEX, EulerTerm::new(), accumulation),
        }
    }
}

impl Approximator for EulerNumber {
    fn approximate(&self, accuracy: i32, rounding: RoundingMode) -> Result<BigDecimal, Error> {
        self.series.approximate(accuracy, rounding)
    }

    /// e lies in [2, 3); its order is the constant 0.
    fn order(&self) -> Result<Option<i32>, Error> {
        Ok(Some(0))
    }
}
