//! String conversions for BigDecimal in plain decimal notation.

use std::fmt;
use std::str::FromStr;

use num_bigint::BigInt;
use num_traits::Signed;

use crate::defs::Error;
use crate::num::BigDecimal;

impl fmt::Display for BigDecimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mag = self.unscaled().magnitude().to_str_radix(10);

        if self.unscaled().is_negative() {
            write!(f, "-")?;
        }

        if self.scale() <= 0 {
            if self.is_zero() {
                return write!(f, "0");
            }
            let zeros = usize::try_from(-(self.scale() as i64)).unwrap_or(0);
            write!(f, "{}{}", mag, "0".repeat(zeros))
        } else {
            let scale = self.scale() as usize;
            if mag.len() > scale {
                let point = mag.len() - scale;
                write!(f, "{}.{}", &mag[..point], &mag[point..])
            } else {
                write!(f, "0.{}{}", "0".repeat(scale - mag.len()), mag)
            }
        }
    }
}

impl FromStr for BigDecimal {
    type Err = Error;

    /// Parses a decimal number with an optional sign, fraction, and exponent,
    /// e.g. `-12.34`, `0.52`, `1e-12`.
    fn from_str(s: &str) -> Result<Self, Error> {
        let parse_err = || Error::Parse(s.to_owned());

        let trimmed = s.trim();
        let (negative, rest) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
        };

        let (mantissa, exponent) = match rest.split_once(|c| c == 'e' || c == 'E') {
            Some((mantissa, exponent)) => {
                (mantissa, exponent.parse::<i32>().map_err(|_| parse_err())?)
            }
            None => (rest, 0),
        };

        let (int_part, frac_part) = match mantissa.split_once('.') {
            Some((int_part, frac_part)) => (int_part, frac_part),
            None => (mantissa, ""),
        };

        if int_part.is_empty() && frac_part.is_empty() {
            return Err(parse_err());
        }
        if !int_part.bytes().all(|b| b.is_ascii_digit())
            || !frac_part.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(parse_err());
        }

        let digits = format!("{int_part}{frac_part}");
        let mut unscaled = BigInt::parse_bytes(digits.as_bytes(), 10).ok_or_else(parse_err)?;
        if negative {
            unscaled = -unscaled;
        }

        let scale = (frac_part.len() as i64)
            .checked_sub(exponent as i64)
            .and_then(|v| i32::try_from(v).ok())
            .ok_or(Error::Overflow("scale of a parsed number"))?;

        Ok(BigDecimal::new(unscaled, scale))
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(BigDecimal::new(BigInt::from(12345), 2).to_string(), "123.45");
        assert_eq!(BigDecimal::new(BigInt::from(5), 1).to_string(), "0.5");
        assert_eq!(BigDecimal::new(BigInt::from(-5), 3).to_string(), "-0.005");
        assert_eq!(BigDecimal::new(BigInt::from(7), -2).to_string(), "700");
        assert_eq!(BigDecimal::new(BigInt::from(0), 3).to_string(), "0.000");
        assert_eq!(BigDecimal::new(BigInt::from(0), -3).to_string(), "0");
    }

    #[test]
    fn test_parse() {
        let parsed: BigDecimal = "123.45".parse().unwrap();
        assert_eq!(parsed.scale(), 2);
        assert_eq!(parsed.to_string(), "123.45");

        let parsed: BigDecimal = "-0.052".parse().unwrap();
        assert_eq!(parsed.to_string(), "-0.052");

        let parsed: BigDecimal = "1e-12".parse().unwrap();
        assert_eq!(parsed.scale(), 12);

        let parsed: BigDecimal = "2.5E3".parse().unwrap();
        assert_eq!(parsed, "2500".parse().unwrap());

        assert!("".parse::<BigDecimal>().is_err());
        assert!("1.2.3".parse::<BigDecimal>().is_err());
        assert!("abc".parse::<BigDecimal>().is_err());
    }

    #[test]
    fn test_roundtrip() {
        for s in ["0", "1", "-1", "0.52", "1.92", "123456789.000000001", "-0.0000001"] {
            let parsed: BigDecimal = s.parse().unwrap();
            assert_eq!(parsed.to_string(), s);
        }
    }
}
