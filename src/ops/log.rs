//! Logarithms of arbitrary base: `log_b(x) = ln(x) / ln(b)`.
//!
//! The accuracies of the two operand logarithms are driven by their orders,
//! which are computed once and cached. The common logarithm specializes the
//! base to ten, whose logarithm has a known order.

use once_cell::sync::OnceCell;

use crate::accuracy::AccuracyStrategy;
use crate::common::consts::ONE;
use crate::common::consts::TEN;
use crate::defs::Error;
use crate::defs::RoundingMode;
use crate::interval::require_inside;
use crate::interval::Interval;
use crate::num::BigDecimal;
use crate::ops::accum::SeriesSum;
use crate::ops::ln::Ln;
use crate::ops::Approximator;

/// log_b(x) for a positive base other than one and a positive argument.
pub struct Log {
    arg: BigDecimal,
    base_ln: Ln,
    arg_ln: Ln,
    base_ln_order: OnceCell<i32>,
    arg_ln_order: OnceCell<i32>,
}

impl Log {
    pub fn new(accumulation: SeriesSum, base: BigDecimal, arg: BigDecimal) -> Result<Self, Error> {
        require_inside(&Interval::positive(), &base, "logarithm base")?;
        if base == *ONE {
            return Err(Error::Domain(
                "logarithm base cannot equal one".to_owned(),
            ));
        }

        let base_ln = Ln::new(accumulation, base)?;
        let arg_ln = Ln::new(accumulation, arg.clone())?;

        Ok(Log {
            arg,
            base_ln,
            arg_ln,
            base_ln_order: OnceCell::new(),
            arg_ln_order: OnceCell::new(),
        })
    }

    fn base_ln_order(&self) -> Result<i32, Error> {
        self.base_ln_order
            .get_or_try_init(|| {
                self.base_ln
                    .order()?
                    .ok_or(Error::Internal("ln of a base other than one is nonzero"))
            })
            .copied()
    }

    fn arg_ln_order(&self) -> Result<i32, Error> {
        self.arg_ln_order
            .get_or_try_init(|| {
                self.arg_ln
                    .order()?
                    .ok_or(Error::Internal("ln of an argument other than one is nonzero"))
            })
            .copied()
    }

    // Numerator accurate enough to survive the division by the base logarithm.
    fn numerator(&self, adjusted_accuracy: i32) -> Result<BigDecimal, Error> {
        let accuracy = adjusted_accuracy
            .checked_sub(self.base_ln_order()?)
            .and_then(|a| a.checked_sub(2))
            .ok_or(Error::Overflow("accuracy of the argument logarithm"))?;
        self.arg_ln.approximate(accuracy, RoundingMode::Down)
    }

    // Denominator accuracy compensates both operand orders.
    fn denominator(&self, adjusted_accuracy: i32) -> Result<BigDecimal, Error> {
        let base_order = self.base_ln_order()?;
        let arg_ln_order = self.arg_ln_order()?;
        let accuracy = adjusted_accuracy
            .checked_add(base_order)
            .and_then(|a| a.checked_add(base_order))
            .and_then(|a| a.checked_sub(arg_ln_order))
            .and_then(|a| a.checked_sub(2))
            .ok_or(Error::Overflow("accuracy of the base logarithm"))?;
        self.base_ln.approximate(accuracy, RoundingMode::Down)
    }
}

impl Approximator for Log {
    fn approximate(&self, accuracy: i32, rounding: RoundingMode) -> Result<BigDecimal, Error> {
        let scale = accuracy
            .checked_neg()
            .ok_or(Error::Overflow("scale of a logarithm"))?;

        if self.arg == *ONE {
            return BigDecimal::zero().with_scale(scale, rounding);
        }

        let adjusted_accuracy = AccuracyStrategy::Positional.adjust(accuracy)?;
        let numerator = self.numerator(adjusted_accuracy)?;
        let denominator = self.denominator(adjusted_accuracy)?;

        numerator.div_to_scale(&denominator, scale, rounding)
    }

    fn order(&self) -> Result<Option<i32>, Error> {
        if self.arg == *ONE {
            return Ok(None);
        }

        let lower_estimation = self
            .arg_ln_order()?
            .checked_sub(self.base_ln_order()?)
            .and_then(|o| o.checked_sub(1))
            .ok_or(Error::Overflow("logarithm order lower estimation"))?;

        let accuracy = AccuracyStrategy::Positional.leading_digit_position(lower_estimation)?;
        let coarse = self.approximate(accuracy, RoundingMode::Down)?;

        Ok(coarse.order())
    }
}

/// log10(x): the base-ten specialization.
///
/// ln(10) has order zero, which collapses the accuracy formulas.
pub struct Log10 {
    log: Log,
}

impl Log10 {
    pub fn new(accumulation: SeriesSum, arg: BigDecimal) -> Result<Self, Error> {
        Ok(Log10 {
            log: Log::new(accumulation, TEN.clone(), arg)?,
        })
    }
}

impl Approximator for Log10 {
    fn approximate(&self, accuracy: i32, rounding: RoundingMode) -> Result<BigDecimal, Error> {
        let scale = accuracy
            .checked_neg()
            .ok_or(Error::Overflow("scale of a logarithm"))?;

        if self.log.arg == *ONE {
            return BigDecimal::zero().with_scale(scale, rounding);
        }

        let adjusted_accuracy = AccuracyStrategy::Positional.adjust(accuracy)?;

        let numerator_accuracy = adjusted_accuracy
            .checked_sub(2)
            .ok_or(Error::Overflow("accuracy of the argument logarithm"))?;
        let numerator = self
            .log
            .arg_ln
            .approximate(numerator_accuracy, RoundingMode::Down)?;

        let denominator_accuracy = adjusted_accuracy
            .checked_sub(self.log.arg_ln_order()?)
            .and_then(|a| a.checked_sub(1))
            .ok_or(Error::Overflow("accuracy of the base logarithm"))?;
        let denominator = self
            .log
            .base_ln
            .approximate(denominator_accuracy, RoundingMode::Down)?;

        numerator.div_to_scale(&denominator, scale, rounding)
    }

    fn order(&self) -> Result<Option<i32>, Error> {
        if self.log.arg == *ONE {
            return Ok(None);
        }

        let lower_estimation = self
            .log
            .arg_ln_order()?
            .checked_sub(1)
            .ok_or(Error::Overflow("logarithm order lower estimation"))?;

        let accuracy = AccuracyStrategy::Positional.leading_digit_position(lower_estimation)?;
        let coarse = self.approximate(accuracy, RoundingMode::Down)?;

        Ok(coarse.order())
    }
}
