//! Intervals over the decimal numbers, used for domain validation.
//!
//! An interval is a tagged pair of bounds; the tag dictates which bounds are
//! finite and whether the endpoints belong to the interval. No interval
//! arithmetic is performed.

use crate::defs::Error;
use crate::num::BigDecimal;

/// A bound of an interval.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Bound {
    /// A finite bound with the given value.
    Finite(BigDecimal),
    /// The bound at negative infinity.
    NegInfinity,
    /// The bound at positive infinity.
    PosInfinity,
}

impl Bound {
    fn is_finite(&self) -> bool {
        matches!(self, Bound::Finite(_))
    }

    /// Returns the value of a finite bound.
    pub fn value(&self) -> Option<&BigDecimal> {
        match self {
            Bound::Finite(value) => Some(value),
            _ => None,
        }
    }
}

/// The variant of an interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntervalKind {
    /// `[a, b]`
    Closed,
    /// `(a, b)`
    Open,
    /// `(a, b]`
    LeftOpen,
    /// `[a, b)`
    RightOpen,
    /// `(-inf, b)`
    LeftUnboundedOpen,
    /// `(a, +inf)`
    RightUnboundedOpen,
    /// `(-inf, b]`
    LeftUnboundedClosed,
    /// `[a, +inf)`
    RightUnboundedClosed,
    /// `(-inf, +inf)`
    Unbounded,
}

impl IntervalKind {
    // The lower endpoint does not belong to the interval.
    fn lower_exclusive(&self) -> bool {
        matches!(
            self,
            IntervalKind::Open | IntervalKind::LeftOpen | IntervalKind::RightUnboundedOpen
        )
    }

    // The upper endpoint does not belong to the interval.
    fn upper_exclusive(&self) -> bool {
        matches!(
            self,
            IntervalKind::Open | IntervalKind::RightOpen | IntervalKind::LeftUnboundedOpen
        )
    }
}

/// An interval of decimal numbers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interval {
    kind: IntervalKind,
    lower: Bound,
    upper: Bound,
}

impl Interval {
    /// Creates an interval, checking that the bound configuration is valid for
    /// the kind.
    pub fn new(kind: IntervalKind, lower: Bound, upper: Bound) -> Result<Self, Error> {
        let shape_ok = match kind {
            IntervalKind::Closed | IntervalKind::Open | IntervalKind::LeftOpen | IntervalKind::RightOpen => {
                lower.is_finite() && upper.is_finite()
            }
            IntervalKind::LeftUnboundedOpen | IntervalKind::LeftUnboundedClosed => {
                lower == Bound::NegInfinity && upper.is_finite()
            }
            IntervalKind::RightUnboundedOpen | IntervalKind::RightUnboundedClosed => {
                lower.is_finite() && upper == Bound::PosInfinity
            }
            IntervalKind::Unbounded => lower == Bound::NegInfinity && upper == Bound::PosInfinity,
        };
        if !shape_ok {
            return Err(Error::Internal("interval bounds do not match the interval kind"));
        }

        if let (Some(lo), Some(hi)) = (lower.value(), upper.value()) {
            let degenerate_ok = kind == IntervalKind::Closed;
            if lo > hi || (!degenerate_ok && lo == hi) {
                return Err(Error::Internal("interval bounds are out of order"));
            }
        }

        Ok(Interval { kind, lower, upper })
    }

    /// `[lower, upper]`
    pub fn closed(lower: BigDecimal, upper: BigDecimal) -> Result<Self, Error> {
        Self::new(IntervalKind::Closed, Bound::Finite(lower), Bound::Finite(upper))
    }

    /// The positive reals `(0, +inf)`.
    pub fn positive() -> Self {
        Interval {
            kind: IntervalKind::RightUnboundedOpen,
            lower: Bound::Finite(BigDecimal::zero()),
            upper: Bound::PosInfinity,
        }
    }

    /// The whole real line.
    pub fn unbounded() -> Self {
        Interval {
            kind: IntervalKind::Unbounded,
            lower: Bound::NegInfinity,
            upper: Bound::PosInfinity,
        }
    }

    /// Returns the value of the upper bound if it is finite.
    pub fn upper_value(&self) -> Option<&BigDecimal> {
        self.upper.value()
    }

    /// Returns true if the number lies strictly below the interval.
    pub fn is_left_of(&self, number: &BigDecimal) -> bool {
        match self.lower.value() {
            None => false,
            Some(bound) => {
                if self.kind.lower_exclusive() {
                    number <= bound
                } else {
                    number < bound
                }
            }
        }
    }

    /// Returns true if the number lies strictly above the interval.
    pub fn is_right_of(&self, number: &BigDecimal) -> bool {
        match self.upper.value() {
            None => false,
            Some(bound) => {
                if self.kind.upper_exclusive() {
                    number >= bound
                } else {
                    number > bound
                }
            }
        }
    }

    /// Returns true if the number belongs to the interval.
    pub fn contains(&self, number: &BigDecimal) -> bool {
        !self.is_left_of(number) && !self.is_right_of(number)
    }
}

/// Checks that a value belongs to its allowed interval, reporting a domain
/// error naming the operand otherwise.
pub fn require_inside(interval: &Interval, value: &BigDecimal, what: &str) -> Result<(), Error> {
    if interval.contains(value) {
        Ok(())
    } else {
        Err(Error::Domain(format!("{what} {value} is outside the allowed range")))
    }
}
