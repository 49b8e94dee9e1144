//! Series terms: the term contract, sign and index mappers, and the concrete
//! terms of the supported series.

use crate::common::consts::ONE;
use crate::common::util::factorial;
use crate::defs::Error;
use crate::defs::RoundingMode;
use crate::defs::Sign;
use crate::num::BigDecimal;

/// Maps a term index to the sign of the term.
#[derive(PartialEq, Eq, Copy, Clone, Debug)]
pub enum SignMapper {
    /// Even indices are positive, odd indices are negative.
    Alternating,
    /// Every term is positive.
    Positive,
    /// Every term is negative.
    Negative,
}

impl SignMapper {
    /// Returns the sign of the term at the given index.
    pub fn sign(&self, index: i32) -> Sign {
        match self {
            SignMapper::Alternating => {
                if index % 2 == 0 {
                    Sign::Pos
                } else {
                    Sign::Neg
                }
            }
            SignMapper::Positive => Sign::Pos,
            SignMapper::Negative => Sign::Neg,
        }
    }

    fn apply(&self, index: i32, value: BigDecimal) -> BigDecimal {
        match self.sign(index) {
            Sign::Pos => value,
            Sign::Neg => value.neg(),
        }
    }
}

/// Maps a term index to the index used inside the term formula.
#[derive(PartialEq, Eq, Copy, Clone, Debug)]
pub enum IndexMapper {
    /// n
    Identity,
    /// 2n
    Double,
    /// 2n + 1
    ShiftedOdd,
}

impl IndexMapper {
    /// Maps the index, failing on 32-bit overflow.
    pub fn map(&self, index: i32) -> Result<i32, Error> {
        match self {
            IndexMapper::Identity => Ok(index),
            IndexMapper::Double => index
                .checked_mul(2)
                .ok_or(Error::Overflow("mapped series index")),
            IndexMapper::ShiftedOdd => index
                .checked_mul(2)
                .and_then(|doubled| doubled.checked_add(1))
                .ok_or(Error::Overflow("mapped series index")),
        }
    }
}

/// A term of a series: a pure function of the term index.
pub trait SeriesTerm: Sync {
    /// Returns the term computed to the given positional accuracy, truncating
    /// toward zero; the error does not exceed `10^accuracy`.
    fn approximate(&self, index: i32, accuracy: i32) -> Result<BigDecimal, Error>;

    /// Returns the term rounded to one significant digit, truncating.
    fn approximate_minimal(&self, index: i32) -> Result<BigDecimal, Error>;

    /// Returns an upper bound of the order of the term, `None` for a zero term.
    fn overestimate_order(&self, index: i32) -> Result<Option<i32>, Error>;
}

/// A term given by a numerator and a denominator with a mapped sign.
pub trait FractionalTerm: Sync {
    fn numerator(&self, index: i32) -> Result<BigDecimal, Error>;

    fn denominator(&self, index: i32) -> Result<BigDecimal, Error>;

    fn sign_mapper(&self) -> SignMapper;
}

impl<T: FractionalTerm> SeriesTerm for T {
    fn approximate(&self, index: i32, accuracy: i32) -> Result<BigDecimal, Error> {
        let numerator = self.numerator(index)?;
        let denominator = self.denominator(index)?;

        let scale = accuracy
            .checked_neg()
            .ok_or(Error::Overflow("scale of a series term"))?;
        let value = numerator.div_to_scale(&denominator, scale, RoundingMode::Down)?;

        Ok(self.sign_mapper().apply(index, value))
    }

    fn approximate_minimal(&self, index: i32) -> Result<BigDecimal, Error> {
        let numerator = self.numerator(index)?;
        let denominator = self.denominator(index)?;
        let value = numerator.div_minimal(&denominator)?;

        Ok(self.sign_mapper().apply(index, value))
    }

    fn overestimate_order(&self, index: i32) -> Result<Option<i32>, Error> {
        let numerator = self.numerator(index)?;
        let Some(numerator_order) = numerator.overestimate_order() else {
            return Ok(None);
        };

        let denominator_order = self
            .denominator(index)?
            .order()
            .ok_or(Error::Internal("zero denominator in a series term"))?;

        numerator_order
            .checked_sub(denominator_order)
            .map(Some)
            .ok_or(Error::Overflow("order of a series term"))
    }
}

/// Term of the Euler number series: `1 / n!`.
pub struct EulerTerm {
    sign_mapper: SignMapper,
    index_mapper: IndexMapper,
}

impl EulerTerm {
    pub fn new() -> Self {
        EulerTerm {
            sign_mapper: SignMapper::Positive,
            index_mapper: IndexMapper::Identity,
        }
    }
}

impl Default for EulerTerm {
    fn default() -> Self {
        Self::new()
    }
}

impl FractionalTerm for EulerTerm {
    fn numerator(&self, _index: i32) -> Result<BigDecimal, Error> {
        Ok(ONE.clone())
    }

    fn denominator(&self, index: i32) -> Result<BigDecimal, Error> {
        let mapped = self.index_mapper.map(index)?;
        Ok(BigDecimal::from(factorial(mapped)?))
    }

    fn sign_mapper(&self) -> SignMapper {
        self.sign_mapper
    }
}

/// Term of the exponential series: `x^n / n!`.
pub struct ExpTerm {
    arg: BigDecimal,
    sign_mapper: SignMapper,
    index_mapper: IndexMapper,
}

impl ExpTerm {
    pub fn new(arg: BigDecimal) -> Self {
        ExpTerm {
            arg,
            sign_mapper: SignMapper::Positive,
            index_mapper: IndexMapper::Identity,
        }
    }
}

impl FractionalTerm for ExpTerm {
    fn numerator(&self, index: i32) -> Result<BigDecimal, Error> {
        let mapped = self.index_mapper.map(index)?;
        let exponent =
            u32::try_from(mapped).map_err(|_| Error::Internal("negative series index"))?;
        self.arg.pow(exponent)
    }

    fn denominator(&self, index: i32) -> Result<BigDecimal, Error> {
        let mapped = self.index_mapper.map(index)?;
        Ok(BigDecimal::from(factorial(mapped)?))
    }

    fn sign_mapper(&self) -> SignMapper {
        self.sign_mapper
    }
}

/// Term of the Gregory logarithm series:
/// `(x - 1)^(2n+1) / ((2n+1) * (x + 1)^(2n+1))`.
pub struct GregoryLnTerm {
    arg: BigDecimal,
    sign_mapper: SignMapper,
    index_mapper: IndexMapper,
}

impl GregoryLnTerm {
    pub fn new(arg: BigDecimal) -> Self {
        GregoryLnTerm {
            arg,
            sign_mapper: SignMapper::Positive,
            index_mapper: IndexMapper::ShiftedOdd,
        }
    }
}

impl FractionalTerm for GregoryLnTerm {
    fn numerator(&self, index: i32) -> Result<BigDecimal, Error> {
        let mapped = self.index_mapper.map(index)?;
        let exponent =
            u32::try_from(mapped).map_err(|_| Error::Internal("negative series index"))?;
        self.arg.sub(&ONE)?.pow(exponent)
    }

    fn denominator(&self, index: i32) -> Result<BigDecimal, Error> {
        let mapped = self.index_mapper.map(index)?;
        let exponent =
            u32::try_from(mapped).map_err(|_| Error::Internal("negative series index"))?;
        let power = self.arg.add(&ONE)?.pow(exponent)?;
        power.mul(&BigDecimal::from(mapped))
    }

    fn sign_mapper(&self) -> SignMapper {
        self.sign_mapper
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    fn dec(s: &str) -> BigDecimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_sign_mapper() {
        assert_eq!(SignMapper::Alternating.sign(0), Sign::Pos);
        assert_eq!(SignMapper::Alternating.sign(1), Sign::Neg);
        assert_eq!(SignMapper::Positive.sign(7), Sign::Pos);
        assert_eq!(SignMapper::Negative.sign(0), Sign::Neg);
    }

    #[test]
    fn test_index_mapper() {
        assert_eq!(IndexMapper::Identity.map(5), Ok(5));
        assert_eq!(IndexMapper::Double.map(5), Ok(10));
        assert_eq!(IndexMapper::ShiftedOdd.map(0), Ok(1));
        assert_eq!(IndexMapper::ShiftedOdd.map(5), Ok(11));
        assert!(IndexMapper::ShiftedOdd.map(i32::MAX).is_err());
    }

    #[test]
    fn test_euler_term() {
        let term = EulerTerm::new();
        assert_eq!(term.approximate(0, -10).unwrap(), dec("1"));
        assert_eq!(term.approximate(3, -10).unwrap().to_string(), "0.1666666666");
        assert_eq!(term.approximate_minimal(3).unwrap().to_string(), "0.1");
        // 1/6 has order -1; the overestimate stays above it
        assert_eq!(term.overestimate_order(3).unwrap(), Some(0));
    }

    #[test]
    fn test_exp_term() {
        let term = ExpTerm::new(dec("0.5"));
        // 0.5^2 / 2! = 0.125
        assert_eq!(term.approximate(2, -10).unwrap(), dec("0.125"));
        assert_eq!(term.approximate(0, -10).unwrap(), dec("1"));

        // a zero argument produces zero terms past the first one
        let term = ExpTerm::new(BigDecimal::zero());
        assert_eq!(term.approximate(0, -10).unwrap(), dec("1"));
        assert_eq!(term.overestimate_order(1).unwrap(), None);
    }

    #[test]
    fn test_gregory_term() {
        let term = GregoryLnTerm::new(dec("0.6"));
        // (x-1)/(1*(x+1)) = -0.4/1.6 = -0.25
        assert_eq!(term.approximate(0, -10).unwrap(), dec("-0.25"));
        // (x-1)^3/(3*(x+1)^3) = -0.064/12.288
        assert_eq!(term.approximate(1, -10).unwrap().to_string(), "-0.0052083333");

        // the argument one yields the all-zero series
        let term = GregoryLnTerm::new(dec("1"));
        assert_eq!(term.approximate(0, -10).unwrap(), BigDecimal::zero());
        assert_eq!(term.overestimate_order(0).unwrap(), None);
    }

    #[test]
    fn test_overestimate_order_bounds_terms() {
        let term = GregoryLnTerm::new(dec("1.5"));
        for index in 0..6 {
            let value = term.approximate(index, -40).unwrap();
            let over = term.overestimate_order(index).unwrap().unwrap();
            let order = value.order().unwrap();
            assert!(over >= order, "index {index}: {over} < {order}");
        }
    }
}
