//! Logexp computes logarithms and exponentials over arbitrary precision decimal
//! numbers purely in Rust.
//!
//! ## Introduction
//!
//! **Numbers**
//!
//! The number is defined by the data type `BigDecimal`. Each number consists of an
//! arbitrary precision unscaled integer and a decimal scale; the value is
//! `unscaled * 10^(-scale)`. No machine floats take part in any computation.
//!
//! **Functions**
//!
//! The crate computes `ln(x)`, `log10(x)`, `log_b(x)`, `e^x`, and the Euler number
//! to any number of significant digits, rounded with a caller-chosen mode. The
//! result is correct in every digit: internal precision is allocated so that
//! accumulated error cannot reach the retained digits.
//!
//! Each function is available in two forms. The facade functions take a precision
//! in significant digits and derive the internal positional accuracy from the
//! order of the result. The approximator types (`Ln`, `Exponential`, `Log`,
//! `Log10`, `EulerNumber`) are reusable values bound to their arguments which
//! accept a positional accuracy directly.
//!
//! **Concurrency**
//!
//! Series terms are independent, and every term is truncated to a fixed
//! positional accuracy before summation, so terms may be summed in any order.
//! The accumulation strategy (sequential or a per-call worker pool) is selected
//! at construction and never changes the result.
//!
//! ## Examples
//!
//! ```rust
//! use logexp::{exp, ln, BigDecimal, RoundingMode};
//!
//! let two: BigDecimal = "2".parse().unwrap();
//! let value = ln(&two, 10, RoundingMode::HalfUp).unwrap();
//! assert_eq!(value.to_string(), "0.6931471806");
//!
//! let half: BigDecimal = "0.5".parse().unwrap();
//! let value = exp(&half, 10, RoundingMode::HalfUp).unwrap();
//! assert_eq!(value.to_string(), "1.648721271");
//! ```

#![deny(clippy::suspicious)]

mod accuracy;
mod common;
mod ctx;
mod defs;
mod interval;
mod num;
mod ops;
mod order;
mod search;
mod strop;

#[cfg(feature = "serde")]
mod for_3rd;

pub use crate::accuracy::least_digit_position_by_precision;
pub use crate::accuracy::least_digit_position_by_scale;
pub use crate::accuracy::precision_from_least_digit_position;
pub use crate::accuracy::scale_from_least_digit_position;
pub use crate::accuracy::AccuracyStrategy;
pub use crate::ctx::e;
pub use crate::ctx::exp;
pub use crate::ctx::ln;
pub use crate::ctx::log;
pub use crate::ctx::log10;
pub use crate::ctx::with_context;
pub use crate::ctx::MathContext;
pub use crate::defs::Error;
pub use crate::defs::RoundingMode;
pub use crate::defs::Sign;
pub use crate::interval::Bound;
pub use crate::interval::Interval;
pub use crate::interval::IntervalKind;
pub use crate::num::BigDecimal;
pub use crate::ops::accum::SeriesSum;
pub use crate::ops::e::EulerNumber;
pub use crate::ops::exp::Exponential;
pub use crate::ops::ln::GregoryLn;
pub use crate::ops::ln::Ln;
pub use crate::ops::log::Log;
pub use crate::ops::log::Log10;
pub use crate::ops::series::Series;
pub use crate::ops::terms::EulerTerm;
pub use crate::ops::terms::ExpTerm;
pub use crate::ops::terms::FractionalTerm;
pub use crate::ops::terms::GregoryLnTerm;
pub use crate::ops::terms::IndexMapper;
pub use crate::ops::terms::SeriesTerm;
pub use crate::ops::terms::SignMapper;
pub use crate::ops::Approximator;
pub use crate::order::order_of_int;
pub use crate::order::overestimate_order_of_int;
pub use crate::search::AdaptiveIntegerFinder;
