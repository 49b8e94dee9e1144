//! Auxiliary big-integer helpers.

use num_bigint::BigInt;
use num_bigint::BigUint;
use num_traits::Pow;

use crate::defs::Error;

/// 10^power.
pub fn pow10(power: u32) -> BigUint {
    let ten = BigUint::from(10u32);
    Pow::pow(&ten, power)
}

/// n! for non-negative n.
pub fn factorial(n: i32) -> Result<BigInt, Error> {
    if n < 0 {
        return Err(Error::Internal("factorial of a negative number"));
    }

    let mut product = BigUint::from(1u32);
    for factor in 2..=(n as u32) {
        product *= factor;
    }

    Ok(BigInt::from(product))
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn test_pow10() {
        assert_eq!(pow10(0), BigUint::from(1u32));
        assert_eq!(pow10(3), BigUint::from(1000u32));
    }

    #[test]
    fn test_factorial() {
        assert_eq!(factorial(0).unwrap(), BigInt::from(1));
        assert_eq!(factorial(1).unwrap(), BigInt::from(1));
        assert_eq!(factorial(5).unwrap(), BigInt::from(120));
        assert_eq!(factorial(10).unwrap(), BigInt::from(3628800));
        assert!(factorial(-1).is_err());
    }
}
