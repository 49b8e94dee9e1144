//! Static constants.

use lazy_static::lazy_static;

use crate::num::BigDecimal;

lazy_static! {

    /// 1
    pub static ref ONE: BigDecimal = BigDecimal::from(1);

    /// 2
    pub static ref TWO: BigDecimal = BigDecimal::from(2);

    /// 3
    pub static ref THREE: BigDecimal = BigDecimal::from(3);

    /// 10
    pub static ref TEN: BigDecimal = BigDecimal::from(10);

    /// Lower bound of the window where the Gregory series loses at least one
    /// decimal digit per term.
    pub static ref GREGORY_WINDOW_LOW: BigDecimal = "0.52".parse().unwrap();

    /// Upper bound of the Gregory series window.
    pub static ref GREGORY_WINDOW_HIGH: BigDecimal = "1.92".parse().unwrap();
}
