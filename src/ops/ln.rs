//! Natural logarithm.
//!
//! The inner tier sums the Gregory series
//! `ln(x) = 2 * ((x-1)/(x+1) + ((x-1)/(x+1))^3/3 + ...)` and assumes the
//! argument already lies inside the window where each term loses a decimal
//! digit. The outer tier scales an arbitrary positive argument into that
//! window with a power of e found by the adaptive search, and undoes the
//! scaling by an exact integer subtraction.

use once_cell::sync::OnceCell;
use tracing::debug;

use crate::accuracy::least_digit_position_by_scale;
use crate::accuracy::AccuracyStrategy;
use crate::common::consts::GREGORY_WINDOW_HIGH;
use crate::common::consts::GREGORY_WINDOW_LOW;
use crate::common::consts::TWO;
use crate::defs::Error;
use crate::defs::RoundingMode;
use crate::interval::require_inside;
use crate::interval::Interval;
use crate::num::BigDecimal;
use crate::ops::accum::SeriesSum;
use crate::ops::exp::Exponential;
use crate::ops::series::Series;
use crate::ops::terms::GregoryLnTerm;
use crate::ops::Approximator;
use crate::order::order_of_int;
use crate::search::AdaptiveIntegerFinder;

const MIN_SERIES_INDEX: i32 = 0;

fn gregory_window() -> Result<Interval, Error> {
    Interval::closed(GREGORY_WINDOW_LOW.clone(), GREGORY_WINDOW_HIGH.clone())
}

/// ln(x) by the Gregory series, for arguments near one.
///
/// With `optimized` set the argument must lie inside the fast-converging
/// window and the series solver may assume decimal-linear convergence.
pub struct GregoryLn {
    series: Series<GregoryLnTerm>,
}

impl GregoryLn {
    pub fn new(accumulation: SeriesSum, optimized: bool, arg: BigDecimal) -> Result<Self, Error> {
        let domain = if optimized {
            gregory_window()?
        } else {
            Interval::positive()
        };
        require_inside(&domain, &arg, "logarithm argument")?;

        Ok(GregoryLn {
            series: Series::new(
                optimized,
                MIN_SERIES_INDEX,
                GregoryLnTerm::new(arg),
                accumulation,
            ),
        })
    }
}

impl Approximator for GregoryLn {
    fn approximate(&self, accuracy: i32, rounding: RoundingMode) -> Result<BigDecimal, Error> {
        let adjusted_accuracy = AccuracyStrategy::Positional.adjust(accuracy)?;

        // the doubling costs one digit of the sum
        let series_accuracy = adjusted_accuracy
            .checked_sub(1)
            .ok_or(Error::Overflow("accuracy of the Gregory series"))?;
        let sum = self.series.approximate(series_accuracy, RoundingMode::Down)?;

        let scale = accuracy
            .checked_neg()
            .ok_or(Error::Overflow("scale of a logarithm"))?;
        sum.mul(&TWO)?.with_scale(scale, rounding)
    }

    fn order(&self) -> Result<Option<i32>, Error> {
        self.series.order()
    }
}

/// ln(x) for an arbitrary positive argument.
pub struct Ln {
    arg: BigDecimal,
    window: Interval,
    accumulation: SeriesSum,
    scaling_exponent: OnceCell<i32>,
}

impl Ln {
    pub fn new(accumulation: SeriesSum, arg: BigDecimal) -> Result<Self, Error> {
        require_inside(&Interval::positive(), &arg, "logarithm argument")?;

        Ok(Ln {
            arg,
            window: gregory_window()?,
            accumulation,
            scaling_exponent: OnceCell::new(),
        })
    }

    // Signed exponent s such that arg * e^s lies inside the window; negative
    // for arguments above it. Memoized for the lifetime of the approximator.
    fn scaling_exponent(&self) -> Result<i32, Error> {
        self.scaling_exponent
            .get_or_try_init(|| self.compute_scaling_exponent())
            .copied()
    }

    fn compute_scaling_exponent(&self) -> Result<i32, Error> {
        if self.window.contains(&self.arg) {
            return Ok(0);
        }

        let probe_accuracy = least_digit_position_by_scale(self.arg.scale())
            .checked_sub(1)
            .ok_or(Error::Overflow("accuracy of a scaling probe"))?;

        let found = if self.window.is_right_of(&self.arg) {
            // smallest i with arg < e^(i+1)
            let predicate = |exponent: i32| -> Result<bool, Error> {
                let above = exponent
                    .checked_add(1)
                    .ok_or(Error::Overflow("scaling exponent probe"))?;
                let value = Exponential::from_int(self.accumulation, above)?
                    .approximate(probe_accuracy, RoundingMode::Down)?;
                Ok(self.arg < value)
            };
            AdaptiveIntegerFinder::new(predicate, true).find(0)?
        } else {
            // largest i with e^i < arg
            let predicate = |exponent: i32| -> Result<bool, Error> {
                let value = Exponential::from_int(self.accumulation, exponent)?
                    .approximate(probe_accuracy, RoundingMode::Up)?;
                Ok(self.arg > value)
            };
            AdaptiveIntegerFinder::new(predicate, false).find(0)?
        }
        .ok_or(Error::Internal("scaling exponent search found no match"))?;

        let exponent = found
            .checked_neg()
            .ok_or(Error::Overflow("scaling exponent"))?;

        // the probe rounding may leave the scaled argument just above the
        // window; settle the border with one accurate multiplication
        let arg_order = self
            .arg
            .overestimate_order()
            .ok_or(Error::Internal("order of a validated argument"))?;
        let border_accuracy = least_digit_position_by_scale(
            self.window
                .upper_value()
                .ok_or(Error::Internal("unbounded scaling window"))?
                .scale(),
        )
        .checked_sub(arg_order)
        .ok_or(Error::Overflow("accuracy of the border probe"))?;

        let value = Exponential::from_int(self.accumulation, exponent)?
            .approximate(border_accuracy, RoundingMode::Up)?;
        let scaled_arg = self.arg.mul(&value)?;

        let exponent = if self.window.is_right_of(&scaled_arg) {
            exponent
                .checked_sub(1)
                .ok_or(Error::Overflow("scaling exponent"))?
        } else {
            exponent
        };

        debug!(exponent, "logarithm scaling exponent");
        Ok(exponent)
    }

    // arg * e^s truncated to the working accuracy. The scale never drops
    // below the two fractional digits of the window bounds, so a truncated
    // in-window value stays in the window.
    fn normalize(&self, accuracy: i32) -> Result<BigDecimal, Error> {
        let scale = 1i64
            .checked_sub(accuracy as i64)
            .and_then(|s| i32::try_from(s).ok())
            .ok_or(Error::Overflow("scale of a normalized argument"))?
            .max(2);

        let scaling = self.scaling_exponent()?;
        if scaling == 0 {
            return self.arg.with_scale(scale, RoundingMode::Down);
        }

        let doubled_order = self
            .arg
            .mul(&TWO)?
            .overestimate_order()
            .ok_or(Error::Internal("order of a validated argument"))?;
        let exp_accuracy = accuracy
            .checked_sub(doubled_order)
            .ok_or(Error::Overflow("accuracy of the scaling exponential"))?;

        let value = Exponential::from_int(self.accumulation, scaling)?
            .approximate(exp_accuracy, RoundingMode::Down)?;
        self.arg.mul(&value)?.with_scale(scale, RoundingMode::Down)
    }
}

impl Approximator for Ln {
    fn approximate(&self, accuracy: i32, rounding: RoundingMode) -> Result<BigDecimal, Error> {
        let adjusted_accuracy = AccuracyStrategy::Positional.adjust(accuracy)?;
        let scaled_arg = self.normalize(adjusted_accuracy)?;

        let inner = GregoryLn::new(self.accumulation, true, scaled_arg)?;
        let scaled_ln = inner.approximate(accuracy, rounding)?;

        let scaling = BigDecimal::from(self.scaling_exponent()?);
        let scale = accuracy
            .checked_neg()
            .ok_or(Error::Overflow("scale of a logarithm"))?;
        scaled_ln.sub(&scaling)?.with_scale(scale, rounding)
    }

    fn order(&self) -> Result<Option<i32>, Error> {
        let scaling = self.scaling_exponent()?;

        let lower_estimation = if scaling == 0 {
            // an unscaled argument is already the series argument; its first
            // term vanishes exactly when the logarithm is zero
            match GregoryLn::new(self.accumulation, false, self.arg.clone())?.order()? {
                None => return Ok(None),
                Some(order) => order,
            }
        } else {
            order_of_int(scaling)
                .ok_or(Error::Internal("order of a nonzero scaling exponent"))?
                .checked_sub(1)
                .ok_or(Error::Overflow("logarithm order lower estimation"))?
        };

        let accuracy = AccuracyStrategy::Positional.leading_digit_position(lower_estimation)?;
        let coarse = self.approximate(accuracy, RoundingMode::Down)?;

        Ok(coarse.order())
    }
}
