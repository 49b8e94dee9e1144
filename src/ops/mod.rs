//! Function approximators.

use crate::defs::Error;
use crate::defs::RoundingMode;
use crate::num::BigDecimal;

pub mod accum;
pub mod e;
pub mod exp;
pub mod ln;
pub mod log;
pub mod series;
pub mod terms;

/// A reusable approximation bound to its arguments.
pub trait Approximator {
    /// Returns the value computed to the given positional accuracy and rounded
    /// with the given mode.
    fn approximate(&self, accuracy: i32, rounding: RoundingMode) -> Result<BigDecimal, Error>;

    /// Returns the order of the value, `None` when the value is zero.
    ///
    /// The order is obtained from a coarse self-approximation and may be
    /// memoized by the implementation; it is stable for the lifetime of the
    /// approximator.
    fn order(&self) -> Result<Option<i32>, Error>;
}
