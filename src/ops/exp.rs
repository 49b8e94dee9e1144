//! Exponential function.

use crate::accuracy::AccuracyStrategy;
use crate::common::consts::ONE;
use crate::common::consts::THREE;
use crate::common::consts::TWO;
use crate::defs::Error;
use crate::defs::RoundingMode;
use crate::defs::Sign;
use crate::interval::require_inside;
use crate::interval::Interval;
use crate::num::BigDecimal;
use crate::ops::accum::SeriesSum;
use crate::ops::e::EulerNumber;
use crate::ops::series::Series;
use crate::ops::terms::ExpTerm;
use crate::ops::Approximator;
use crate::order::overestimate_order_of_int;

const MIN_SERIES_INDEX: i32 = 0;

/// e^x for an arbitrary decimal argument.
///
/// The argument is split as `x = k + f` with `k = floor(x)` and `f in [0, 1)`,
/// and recomposed as `e^x = e^k * exp(f)`. The integer power is bounded by
/// powers of three when allocating precision to the Euler number, and the
/// fractional exponential is a direct Maclaurin series.
pub struct Exponential {
    arg: BigDecimal,
    arg_int_part: i32,
    frac_series: Series<ExpTerm>,
    accumulation: SeriesSum,
}

impl Exponential {
    pub fn new(accumulation: SeriesSum, arg: BigDecimal) -> Result<Self, Error> {
        require_inside(&Interval::unbounded(), &arg, "exponential argument")?;

        let arg_int_part = arg.floor_i32()?;
        let frac_part = arg.sub(&BigDecimal::from(arg_int_part))?;
        let frac_series = Series::new(
            false,
            MIN_SERIES_INDEX,
            ExpTerm::new(frac_part),
            accumulation,
        );

        Ok(Exponential {
            arg,
            arg_int_part,
            frac_series,
            accumulation,
        })
    }

    /// e^k for a machine-integer exponent.
    pub fn from_int(accumulation: SeriesSum, exponent: i32) -> Result<Self, Error> {
        Self::new(accumulation, BigDecimal::from(exponent))
    }

    // 1 / e^(-x), with the reciprocal rounded by the caller's mode.
    fn approximate_negative(
        &self,
        accuracy: i32,
        rounding: RoundingMode,
    ) -> Result<BigDecimal, Error> {
        let positive = Exponential::new(self.accumulation, self.arg.neg())?;
        let value = positive.approximate(accuracy, RoundingMode::Down)?;

        let scale = accuracy
            .checked_neg()
            .ok_or(Error::Overflow("scale of a reciprocal exponential"))?;
        ONE.div_to_scale(&value, scale, rounding)
    }

    // e^k by an integer power of a sufficiently accurate Euler number.
    // e^k < 3^k, so 3^(k-1) overestimates the growth left after one factor.
    fn approximate_int_part(&self, accuracy: i32) -> Result<BigDecimal, Error> {
        let k = self.arg_int_part;
        let int_order = overestimate_order_of_int(k)
            .ok_or(Error::Internal("integer exponential of a zero exponent"))?;

        let growth = THREE.pow(
            u32::try_from(k - 1).map_err(|_| Error::Internal("negative integer exponent"))?,
        )?;
        let growth_order = growth
            .overestimate_order()
            .ok_or(Error::Internal("order of a power of three"))?;

        let e_accuracy = accuracy
            .checked_sub(1)
            .and_then(|a| a.checked_sub(int_order))
            .and_then(|a| a.checked_sub(growth_order))
            .ok_or(Error::Overflow("accuracy of the Euler number"))?;
        let e = EulerNumber::new(self.accumulation).approximate(e_accuracy, RoundingMode::Down)?;

        let power = e.pow(k as u32)?;
        let scale = accuracy
            .checked_neg()
            .ok_or(Error::Overflow("scale of an integer exponential"))?;
        power.with_scale(scale, RoundingMode::Down)
    }

    // e^k * exp(f) at the already adjusted accuracy.
    fn approximate_split(&self, accuracy: i32, rounding: RoundingMode) -> Result<BigDecimal, Error> {
        let int_exp = self.approximate_int_part(accuracy)?;

        let growth = THREE.pow(
            self.arg_int_part
                .checked_add(1)
                .and_then(|k| u32::try_from(k).ok())
                .ok_or(Error::Overflow("exponent of the growth bound"))?,
        )?;
        let growth_order = growth
            .overestimate_order()
            .ok_or(Error::Internal("order of a power of three"))?;

        let frac_accuracy = accuracy
            .checked_sub(growth_order)
            .ok_or(Error::Overflow("accuracy of the fractional exponential"))?;
        let frac_exp = self.frac_series.approximate(frac_accuracy, RoundingMode::Down)?;

        let scale = accuracy
            .checked_neg()
            .ok_or(Error::Overflow("scale of an exponential"))?;
        int_exp.mul(&frac_exp)?.with_scale(scale, rounding)
    }

    // Cheap power-of-two lower bounds of e^k: 2^k from below for positive k,
    // and 4^k for negative k (e/4 < 1, so reciprocation flips the bound).
    fn order_lower_estimation(&self) -> Result<i32, Error> {
        let k = self.arg_int_part;

        let estimate = if k >= 0 {
            TWO.pow(k.unsigned_abs())?
        } else {
            let doubled = k
                .unsigned_abs()
                .checked_mul(2)
                .ok_or(Error::Overflow("exponent of the order estimate"))?;
            ONE.div_minimal(&TWO.pow(doubled)?)?
        };
        estimate
            .order()
            .ok_or(Error::Internal("order of an exponential estimate"))
    }
}

impl Approximator for Exponential {
    fn approximate(&self, accuracy: i32, rounding: RoundingMode) -> Result<BigDecimal, Error> {
        if self.arg.is_zero() {
            return Ok(ONE.clone());
        }

        if self.arg.sign() == Sign::Neg {
            return self.approximate_negative(accuracy, rounding);
        }

        if self.arg == *ONE {
            return EulerNumber::new(self.accumulation).approximate(accuracy, rounding);
        }

        if self.arg < *ONE {
            return self.frac_series.approximate(accuracy, rounding);
        }

        let adjusted_accuracy = AccuracyStrategy::Positional.adjust(accuracy)?;
        let approximation = self.approximate_split(adjusted_accuracy, RoundingMode::Down)?;

        let scale = accuracy
            .checked_neg()
            .ok_or(Error::Overflow("scale of an exponential"))?;
        approximation.with_scale(scale, rounding)
    }

    fn order(&self) -> Result<Option<i32>, Error> {
        if self.arg_int_part == 0 {
            return self.frac_series.order();
        }

        let lower_estimation = self.order_lower_estimation()?;
        let accuracy = AccuracyStrategy::Positional.leading_digit_position(lower_estimation)?;
        let coarse = self.approximate(accuracy, RoundingMode::Down)?;

        Ok(coarse.order())
    }
}
