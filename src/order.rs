//! Exact and overestimated base-10 order of a number.
//!
//! The order of a nonzero x is the unique integer k with 10^k <= |x| < 10^(k+1).
//! Zero has no order; it is represented as `None` and callers branch on it
//! explicitly.

use crate::num::BigDecimal;

impl BigDecimal {
    /// Returns the order of the number, or `None` for zero.
    pub fn order(&self) -> Option<i32> {
        if self.is_zero() {
            return None;
        }
        let order = (self.digits() as i64) - (self.scale() as i64) - 1;
        i32::try_from(order).ok()
    }

    /// Returns a safe upper bound of the order: the order itself when the
    /// significand is exactly one, the order plus one otherwise.
    pub fn overestimate_order(&self) -> Option<i32> {
        let order = self.order()?;
        if self.has_unit_significand() {
            Some(order)
        } else {
            order.checked_add(1)
        }
    }
}

/// Returns the order of a machine integer, or `None` for zero.
pub fn order_of_int(number: i32) -> Option<i32> {
    if number == 0 {
        return None;
    }
    Some(number.unsigned_abs().ilog10() as i32)
}

/// Returns a safe upper bound of the order of a machine integer, or `None` for zero.
pub fn overestimate_order_of_int(number: i32) -> Option<i32> {
    let order = order_of_int(number)?;
    if number.unsigned_abs() == 10u32.pow(order as u32) {
        Some(order)
    } else {
        order.checked_add(1)
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    fn dec(s: &str) -> BigDecimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_order() {
        assert_eq!(dec("123.45").order(), Some(2));
        assert_eq!(dec("1").order(), Some(0));
        assert_eq!(dec("9.99").order(), Some(0));
        assert_eq!(dec("0.001").order(), Some(-3));
        assert_eq!(dec("-123.45").order(), Some(2));
        assert_eq!(dec("0").order(), None);
        assert_eq!(dec("0.000").order(), None);
    }

    #[test]
    fn test_overestimate_order() {
        // equality holds exactly for powers of ten
        assert_eq!(dec("1").overestimate_order(), Some(0));
        assert_eq!(dec("10").overestimate_order(), Some(1));
        assert_eq!(dec("0.1").overestimate_order(), Some(-1));
        assert_eq!(dec("-100").overestimate_order(), Some(2));

        assert_eq!(dec("2").overestimate_order(), Some(1));
        assert_eq!(dec("99").overestimate_order(), Some(2));
        assert_eq!(dec("0.052").overestimate_order(), Some(-1));
        assert_eq!(dec("1.01").overestimate_order(), Some(1));
        assert_eq!(dec("0").overestimate_order(), None);
    }

    #[test]
    fn test_overestimate_never_below_order() {
        for s in ["1", "2", "9.99", "10", "10.01", "0.00123", "-57", "-0.1"] {
            let d = dec(s);
            let order = d.order().unwrap();
            let over = d.overestimate_order().unwrap();
            assert!(over >= order);
            assert_eq!(over == order, d.has_unit_significand());
        }
    }

    #[test]
    fn test_int_orders() {
        assert_eq!(order_of_int(12345), Some(4));
        assert_eq!(order_of_int(-7), Some(0));
        assert_eq!(order_of_int(0), None);
        assert_eq!(overestimate_order_of_int(10), Some(1));
        assert_eq!(overestimate_order_of_int(100), Some(2));
        assert_eq!(overestimate_order_of_int(101), Some(3));
        assert_eq!(overestimate_order_of_int(-3), Some(1));
        assert_eq!(overestimate_order_of_int(0), None);
    }
}
