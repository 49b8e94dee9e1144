//! BigDecimal definition and basic arithmetic, comparison, and number manipulation operations.

use std::cmp::Ordering;

use num_bigint::BigInt;
use num_bigint::BigUint;
use num_traits::Pow;
use num_traits::Signed;
use num_traits::ToPrimitive;
use num_traits::Zero;

use crate::common::util::pow10;
use crate::defs::Error;
use crate::defs::RoundingMode;
use crate::defs::Sign;

/// BigDecimal represents a signed arbitrary precision decimal number as an unscaled
/// integer together with a scale: the value is `unscaled * 10^(-scale)`.
#[derive(Debug, Clone)]
pub struct BigDecimal {
    unscaled: BigInt,
    scale: i32,
}

/// Low-level operations on a number.
impl BigDecimal {
    /// Returns a number with the given unscaled value and scale.
    pub fn new(unscaled: BigInt, scale: i32) -> Self {
        BigDecimal { unscaled, scale }
    }

    /// Returns a number with value of 0 and scale of 0.
    pub fn zero() -> Self {
        BigDecimal {
            unscaled: BigInt::zero(),
            scale: 0,
        }
    }

    /// Returns true if the number is zero.
    pub fn is_zero(&self) -> bool {
        self.unscaled.is_zero()
    }

    /// Returns the sign of the number; zero is reported as positive.
    pub fn sign(&self) -> Sign {
        if self.unscaled.is_negative() {
            Sign::Neg
        } else {
            Sign::Pos
        }
    }

    /// Returns the unscaled integer.
    pub fn unscaled(&self) -> &BigInt {
        &self.unscaled
    }

    /// Returns the scale.
    pub fn scale(&self) -> i32 {
        self.scale
    }

    /// Returns the number of decimal digits of the unscaled integer.
    pub fn digits(&self) -> i32 {
        let len = self.unscaled.magnitude().to_str_radix(10).len();
        len.min(i32::MAX as usize) as i32
    }

    // The unscaled magnitude is a one followed by zeros, i.e. the significand
    // of the number is exactly one.
    pub(crate) fn has_unit_significand(&self) -> bool {
        let mag = self.unscaled.magnitude().to_str_radix(10);
        let mut bytes = mag.bytes();
        bytes.next() == Some(b'1') && bytes.all(|b| b == b'0')
    }

    /// Negation operation.
    pub fn neg(&self) -> Self {
        BigDecimal {
            unscaled: -&self.unscaled,
            scale: self.scale,
        }
    }

    /// Returns the absolute value.
    pub fn abs(&self) -> Self {
        BigDecimal {
            unscaled: self.unscaled.abs(),
            scale: self.scale,
        }
    }

    /// Summation operation. The result carries the larger of the two scales; no digit is lost.
    pub fn add(&self, d2: &Self) -> Result<Self, Error> {
        let (u1, u2, scale) = Self::align(self, d2)?;
        Ok(BigDecimal {
            unscaled: u1 + u2,
            scale,
        })
    }

    /// Subtraction operation. The result carries the larger of the two scales; no digit is lost.
    pub fn sub(&self, d2: &Self) -> Result<Self, Error> {
        let (u1, u2, scale) = Self::align(self, d2)?;
        Ok(BigDecimal {
            unscaled: u1 - u2,
            scale,
        })
    }

    /// Multiplication operation; exact.
    pub fn mul(&self, d2: &Self) -> Result<Self, Error> {
        let scale = self
            .scale
            .checked_add(d2.scale)
            .ok_or(Error::Overflow("scale of a product"))?;
        Ok(BigDecimal {
            unscaled: &self.unscaled * &d2.unscaled,
            scale,
        })
    }

    /// Integer power operation; exact.
    pub fn pow(&self, exponent: u32) -> Result<Self, Error> {
        let scale = (self.scale as i64)
            .checked_mul(exponent as i64)
            .and_then(|s| i32::try_from(s).ok())
            .ok_or(Error::Overflow("scale of an integer power"))?;
        Ok(BigDecimal {
            unscaled: Pow::pow(&self.unscaled, exponent),
            scale,
        })
    }

    /// Rescales the number to the given scale, rounding a discarded fraction
    /// according to the rounding mode.
    pub fn with_scale(&self, scale: i32, rm: RoundingMode) -> Result<Self, Error> {
        let shift = (scale as i64) - (self.scale as i64);
        if shift >= 0 {
            let shift =
                u32::try_from(shift).map_err(|_| Error::Overflow("scale change too large"))?;
            Ok(BigDecimal {
                unscaled: &self.unscaled * BigInt::from(pow10(shift)),
                scale,
            })
        } else {
            let shift =
                u32::try_from(-shift).map_err(|_| Error::Overflow("scale change too large"))?;
            let divisor = pow10(shift);
            let unscaled = Self::divide_rounded(self.unscaled.magnitude(), &divisor, self.sign(), rm);
            Ok(BigDecimal { unscaled, scale })
        }
    }

    /// Division returning a result with the given scale, rounded according to the rounding mode.
    pub fn div_to_scale(&self, d2: &Self, scale: i32, rm: RoundingMode) -> Result<Self, Error> {
        if d2.is_zero() {
            return Err(Error::DivisionByZero);
        }
        if self.is_zero() {
            return Ok(BigDecimal {
                unscaled: BigInt::zero(),
                scale,
            });
        }

        let sign = if self.sign() == d2.sign() { Sign::Pos } else { Sign::Neg };

        // self / d2 * 10^scale = u1 * 10^(scale + s2 - s1) / u2
        let shift = (scale as i64) + (d2.scale as i64) - (self.scale as i64);
        let (num, den) = if shift >= 0 {
            let shift =
                u32::try_from(shift).map_err(|_| Error::Overflow("scale change too large"))?;
            (self.unscaled.magnitude() * pow10(shift), d2.unscaled.magnitude().clone())
        } else {
            let shift =
                u32::try_from(-shift).map_err(|_| Error::Overflow("scale change too large"))?;
            (self.unscaled.magnitude().clone(), d2.unscaled.magnitude() * pow10(shift))
        };

        let unscaled = Self::divide_rounded(&num, &den, sign, rm);
        Ok(BigDecimal { unscaled, scale })
    }

    /// Division rounded to a single significant digit, truncating toward zero.
    pub fn div_minimal(&self, d2: &Self) -> Result<Self, Error> {
        if d2.is_zero() {
            return Err(Error::DivisionByZero);
        }
        if self.is_zero() {
            return Ok(Self::zero());
        }

        let o1 = self.order().ok_or(Error::Internal("order of a nonzero number"))?;
        let o2 = d2.order().ok_or(Error::Internal("order of a nonzero number"))?;

        // order of the quotient is o1 - o2 or o1 - o2 - 1; two guard digits
        let scale = (o2 as i64 - o1 as i64 + 3)
            .try_into()
            .map_err(|_| Error::Overflow("scale of a quotient"))?;
        let quotient = self.div_to_scale(d2, scale, RoundingMode::Down)?;
        quotient.round_to_single_digit()
    }

    /// Rounds the number to a single significant digit, truncating toward zero.
    pub fn round_to_single_digit(&self) -> Result<Self, Error> {
        if self.is_zero() {
            return Ok(Self::zero());
        }
        let drop = self.digits() - 1;
        if drop == 0 {
            return Ok(self.clone());
        }
        let scale = self
            .scale
            .checked_sub(drop)
            .ok_or(Error::Overflow("scale of a rounded number"))?;
        self.with_scale(scale, RoundingMode::Down)
    }

    /// Returns the largest 32-bit integer less than or equal to the number.
    pub fn floor_i32(&self) -> Result<i32, Error> {
        let floored = self.with_scale(0, RoundingMode::Floor)?;
        floored
            .unscaled
            .to_i32()
            .ok_or(Error::Overflow("integer part does not fit the 32-bit range"))
    }

    /// Returns the significand: the number with its point moved so the value lies in [1, 10).
    pub fn significand(&self) -> Self {
        if self.is_zero() {
            return Self::zero();
        }
        BigDecimal {
            unscaled: self.unscaled.clone(),
            scale: self.digits() - 1,
        }
    }

    // Brings both numbers to the larger of the two scales.
    fn align(d1: &Self, d2: &Self) -> Result<(BigInt, BigInt, i32), Error> {
        let scale = d1.scale.max(d2.scale);
        Ok((Self::upscale(d1, scale)?, Self::upscale(d2, scale)?, scale))
    }

    fn upscale(d: &Self, scale: i32) -> Result<BigInt, Error> {
        let shift = u32::try_from((scale as i64) - (d.scale as i64))
            .map_err(|_| Error::Overflow("scale change too large"))?;
        if shift == 0 {
            Ok(d.unscaled.clone())
        } else {
            Ok(&d.unscaled * BigInt::from(pow10(shift)))
        }
    }

    // Rounded integer division on magnitudes; the sign of the value decides the
    // direction of the directed modes.
    fn divide_rounded(num: &BigUint, den: &BigUint, sign: Sign, rm: RoundingMode) -> BigInt {
        let quotient = num / den;
        let remainder = num % den;

        let quotient = if remainder.is_zero() {
            quotient
        } else {
            let round_away = match rm {
                RoundingMode::Up => true,
                RoundingMode::Down => false,
                RoundingMode::Ceiling => sign == Sign::Pos,
                RoundingMode::Floor => sign == Sign::Neg,
                RoundingMode::HalfUp | RoundingMode::HalfDown | RoundingMode::HalfEven => {
                    let doubled = &remainder << 1usize;
                    match doubled.cmp(den) {
                        Ordering::Greater => true,
                        Ordering::Less => false,
                        Ordering::Equal => match rm {
                            RoundingMode::HalfUp => true,
                            RoundingMode::HalfDown => false,
                            _ => {
                                let one = BigUint::from(1u32);
                                (&quotient & &one) == one
                            }
                        },
                    }
                }
            };
            if round_away {
                quotient + 1u32
            } else {
                quotient
            }
        };

        let signed = BigInt::from(quotient);
        if sign == Sign::Neg {
            -signed
        } else {
            signed
        }
    }
}

impl PartialEq for BigDecimal {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for BigDecimal {}

impl PartialOrd for BigDecimal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for BigDecimal {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.is_zero(), other.is_zero()) {
            (true, true) => return Ordering::Equal,
            (true, false) => {
                return if other.unscaled.is_negative() {
                    Ordering::Greater
                } else {
                    Ordering::Less
                }
            }
            (false, true) => {
                return if self.unscaled.is_negative() {
                    Ordering::Less
                } else {
                    Ordering::Greater
                }
            }
            (false, false) => {}
        }

        let neg1 = self.unscaled.is_negative();
        let neg2 = other.unscaled.is_negative();
        if neg1 != neg2 {
            return if neg1 { Ordering::Less } else { Ordering::Greater };
        }

        // both nonzero with the same sign; larger order means larger magnitude
        let o1 = (self.digits() as i64) - (self.scale as i64) - 1;
        let o2 = (other.digits() as i64) - (other.scale as i64) - 1;
        if o1 != o2 {
            let by_magnitude = o1.cmp(&o2);
            return if neg1 { by_magnitude.reverse() } else { by_magnitude };
        }

        // equal orders bound the scale difference by the digit counts
        let scale = self.scale.max(other.scale);
        let u1 = &self.unscaled * BigInt::from(pow10((scale - self.scale) as u32));
        let u2 = &other.unscaled * BigInt::from(pow10((scale - other.scale) as u32));
        u1.cmp(&u2)
    }
}

impl From<i32> for BigDecimal {
    fn from(value: i32) -> Self {
        BigDecimal {
            unscaled: BigInt::from(value),
            scale: 0,
        }
    }
}

impl From<i64> for BigDecimal {
    fn from(value: i64) -> Self {
        BigDecimal {
            unscaled: BigInt::from(value),
            scale: 0,
        }
    }
}

impl From<u32> for BigDecimal {
    fn from(value: u32) -> Self {
        BigDecimal {
            unscaled: BigInt::from(value),
            scale: 0,
        }
    }
}

impl From<BigInt> for BigDecimal {
    fn from(value: BigInt) -> Self {
        BigDecimal {
            unscaled: value,
            scale: 0,
        }
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    fn dec(s: &str) -> BigDecimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_ring_ops() {
        let a = dec("1.25");
        let b = dec("0.375");

        assert_eq!(a.add(&b).unwrap(), dec("1.625"));
        assert_eq!(a.sub(&b).unwrap(), dec("0.875"));
        assert_eq!(a.mul(&b).unwrap(), dec("0.46875"));
        assert_eq!(a.neg(), dec("-1.25"));
        assert_eq!(dec("-1.25").abs(), a);
        assert_eq!(dec("1.5").pow(2).unwrap(), dec("2.25"));
        assert_eq!(dec("10").pow(0).unwrap(), dec("1"));
    }

    #[test]
    fn test_with_scale_rounding() {
        for (value, rm, expected) in [
            ("2.5", RoundingMode::HalfUp, "3"),
            ("2.5", RoundingMode::HalfDown, "2"),
            ("2.5", RoundingMode::HalfEven, "2"),
            ("3.5", RoundingMode::HalfEven, "4"),
            ("2.4", RoundingMode::Up, "3"),
            ("2.6", RoundingMode::Down, "2"),
            ("2.1", RoundingMode::Ceiling, "3"),
            ("2.9", RoundingMode::Floor, "2"),
            ("-2.5", RoundingMode::HalfUp, "-3"),
            ("-2.5", RoundingMode::HalfEven, "-2"),
            ("-2.1", RoundingMode::Up, "-3"),
            ("-2.9", RoundingMode::Down, "-2"),
            ("-2.1", RoundingMode::Ceiling, "-2"),
            ("-2.1", RoundingMode::Floor, "-3"),
        ] {
            let rounded = dec(value).with_scale(0, rm).unwrap();
            assert_eq!(rounded, dec(expected), "{value} {rm:?}");
        }

        // rescaling to a finer scale is exact
        let widened = dec("2.5").with_scale(3, RoundingMode::HalfUp).unwrap();
        assert_eq!(widened.scale(), 3);
        assert_eq!(widened.to_string(), "2.500");
    }

    #[test]
    fn test_div_to_scale() {
        let one = dec("1");
        let three = dec("3");
        assert_eq!(
            one.div_to_scale(&three, 5, RoundingMode::Down).unwrap().to_string(),
            "0.33333"
        );
        assert_eq!(
            dec("2").div_to_scale(&three, 2, RoundingMode::HalfUp).unwrap().to_string(),
            "0.67"
        );
        assert_eq!(
            dec("-1").div_to_scale(&dec("8"), 3, RoundingMode::HalfEven).unwrap().to_string(),
            "-0.125"
        );
        assert_eq!(one.div_to_scale(&dec("0"), 0, RoundingMode::Down), Err(Error::DivisionByZero));
    }

    #[test]
    fn test_div_minimal() {
        assert_eq!(dec("1").div_minimal(&dec("6")).unwrap().to_string(), "0.1");
        assert_eq!(dec("1").div_minimal(&dec("3")).unwrap().to_string(), "0.3");
        assert_eq!(dec("100").div_minimal(&dec("7")).unwrap().to_string(), "10");
        assert_eq!(dec("-1").div_minimal(&dec("4")).unwrap().to_string(), "-0.2");
    }

    #[test]
    fn test_round_to_single_digit() {
        assert_eq!(dec("1994").round_to_single_digit().unwrap().to_string(), "1000");
        assert_eq!(dec("0.00786").round_to_single_digit().unwrap().to_string(), "0.007");
        assert_eq!(dec("-45.1").round_to_single_digit().unwrap().to_string(), "-40");
        assert_eq!(dec("0").round_to_single_digit().unwrap(), BigDecimal::zero());
    }

    #[test]
    fn test_floor_i32() {
        assert_eq!(dec("2.7").floor_i32().unwrap(), 2);
        assert_eq!(dec("-2.7").floor_i32().unwrap(), -3);
        assert_eq!(dec("5").floor_i32().unwrap(), 5);
        assert_eq!(dec("-0.2").floor_i32().unwrap(), -1);
        assert!(dec("3000000000").floor_i32().is_err());
    }

    #[test]
    fn test_cmp() {
        assert!(dec("1.2") < dec("1.25"));
        assert!(dec("-1.2") > dec("-1.25"));
        assert!(dec("0.001") > dec("-1000"));
        assert_eq!(dec("1.200"), dec("1.2"));
        assert_eq!(dec("0.0"), dec("0"));
        assert!(dec("10") < dec("100"));
    }

    #[test]
    fn test_digits_and_significand() {
        assert_eq!(dec("123.45").digits(), 5);
        assert_eq!(dec("0.0012").digits(), 2);
        assert_eq!(dec("123.45").significand().to_string(), "1.2345");
        assert_eq!(dec("0.0012").significand().to_string(), "1.2");
        assert!(dec("100").has_unit_significand());
        assert!(dec("0.001").has_unit_significand());
        assert!(!dec("101").has_unit_significand());
    }
}
