//! The public facade: maps a precision in significant digits and a rounding
//! mode to a positional accuracy, then invokes the approximator.

use tracing::debug;

use crate::accuracy::least_digit_position_by_precision;
use crate::defs::Error;
use crate::defs::RoundingMode;
use crate::num::BigDecimal;
use crate::ops::accum::SeriesSum;
use crate::ops::e::EulerNumber;
use crate::ops::exp::Exponential;
use crate::ops::ln::Ln;
use crate::ops::log::Log;
use crate::ops::log::Log10;
use crate::ops::Approximator;

/// A precision in significant digits together with a rounding mode.
#[derive(PartialEq, Eq, Copy, Clone, Debug)]
pub struct MathContext {
    precision: u32,
    rounding: RoundingMode,
}

impl MathContext {
    pub fn new(precision: u32, rounding: RoundingMode) -> Result<Self, Error> {
        if precision == 0 {
            return Err(Error::PrecisionUnderflow(0));
        }
        Ok(MathContext { precision, rounding })
    }

    pub fn precision(&self) -> u32 {
        self.precision
    }

    pub fn rounding(&self) -> RoundingMode {
        self.rounding
    }
}

/// Evaluates an approximator under a context: asks it for the order of its
/// value, converts the precision to a positional accuracy, and lets the
/// approximator round.
pub fn with_context(
    approximator: &impl Approximator,
    context: &MathContext,
) -> Result<BigDecimal, Error> {
    // a `None` order means the value is exactly zero; any leading digit
    // position serves, so the conversion proceeds with order zero
    let order = approximator.order()?.unwrap_or(0);

    let precision = i32::try_from(context.precision)
        .map_err(|_| Error::Overflow("precision does not fit the 32-bit range"))?;
    let accuracy = least_digit_position_by_precision(precision, order)?;

    debug!(order, accuracy, "resolved positional accuracy");

    approximator.approximate(accuracy, context.rounding)
}

/// ln(x) to `precision` significant digits.
pub fn ln(arg: &BigDecimal, precision: u32, rounding: RoundingMode) -> Result<BigDecimal, Error> {
    let context = MathContext::new(precision, rounding)?;
    with_context(&Ln::new(SeriesSum::Parallel, arg.clone())?, &context)
}

/// log10(x) to `precision` significant digits.
pub fn log10(
    arg: &BigDecimal,
    precision: u32,
    rounding: RoundingMode,
) -> Result<BigDecimal, Error> {
    let context = MathContext::new(precision, rounding)?;
    with_context(&Log10::new(SeriesSum::Parallel, arg.clone())?, &context)
}

/// log_b(x) to `precision` significant digits.
pub fn log(
    base: &BigDecimal,
    arg: &BigDecimal,
    precision: u32,
    rounding: RoundingMode,
) -> Result<BigDecimal, Error> {
    let context = MathContext::new(precision, rounding)?;
    with_context(
        &Log::new(SeriesSum::Parallel, base.clone(), arg.clone())?,
        &context,
    )
}

/// e^x to `precision` significant digits.
pub fn exp(arg: &BigDecimal, precision: u32, rounding: RoundingMode) -> Result<BigDecimal, Error> {
    let context = MathContext::new(precision, rounding)?;
    with_context(&Exponential::new(SeriesSum::Parallel, arg.clone())?, &context)
}

/// The Euler number e to `precision` significant digits.
pub fn e(precision: u32, rounding: RoundingMode) -> Result<BigDecimal, Error> {
    let context = MathContext::new(precision, rounding)?;
    with_context(&EulerNumber::new(SeriesSum::Parallel), &context)
}
