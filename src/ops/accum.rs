//! Accumulation of series terms.
//!
//! The strategy is chosen at construction. Both strategies produce the same
//! value: every term is truncated to the same positional accuracy, and a sum
//! of exact scaled decimals does not depend on the order of addition.

use std::thread;

use crossbeam::channel;

use crate::defs::Error;
use crate::num::BigDecimal;
use crate::ops::terms::SeriesTerm;

/// Strategy for summing the terms of a series.
#[derive(PartialEq, Eq, Copy, Clone, Debug)]
pub enum SeriesSum {
    /// Fold the terms in index order on the calling thread.
    Sequential,

    /// Compute terms on a pool sized to the hardware parallelism, summing in
    /// completion order. The pool lives only for the duration of the call.
    Parallel,
}

impl SeriesSum {
    /// Sums `terms_count` terms starting at `min_index`, each computed to the
    /// positional accuracy `term_accuracy`.
    pub fn accumulate<T: SeriesTerm>(
        &self,
        min_index: i32,
        terms_count: i32,
        term_accuracy: i32,
        term: &T,
    ) -> Result<BigDecimal, Error> {
        if terms_count == 0 {
            return Ok(BigDecimal::zero());
        }
        if terms_count < 0 {
            return Err(Error::Internal("series term count is negative"));
        }

        let greatest_index = terms_count
            .checked_sub(1)
            .and_then(|count| count.checked_add(min_index))
            .ok_or(Error::Overflow("greatest series index"))?;

        match self {
            SeriesSum::Sequential => {
                accumulate_sequential(min_index, greatest_index, term_accuracy, term)
            }
            SeriesSum::Parallel => {
                accumulate_parallel(min_index, greatest_index, term_accuracy, term)
            }
        }
    }
}

fn accumulate_sequential<T: SeriesTerm>(
    min_index: i32,
    greatest_index: i32,
    term_accuracy: i32,
    term: &T,
) -> Result<BigDecimal, Error> {
    let mut sum = BigDecimal::zero();
    for index in min_index..=greatest_index {
        sum = sum.add(&term.approximate(index, term_accuracy)?)?;
    }
    Ok(sum)
}

fn accumulate_parallel<T: SeriesTerm>(
    min_index: i32,
    greatest_index: i32,
    term_accuracy: i32,
    term: &T,
) -> Result<BigDecimal, Error> {
    let workers = thread::available_parallelism().map(|n| n.get()).unwrap_or(1);

    let (index_tx, index_rx) = channel::unbounded();
    for index in min_index..=greatest_index {
        index_tx
            .send(index)
            .map_err(|_| Error::Internal("task channel disconnected"))?;
    }
    drop(index_tx);

    let (result_tx, result_rx) = channel::unbounded();

    thread::scope(|scope| {
        for _ in 0..workers {
            let index_rx = index_rx.clone();
            let result_tx = result_tx.clone();
            scope.spawn(move || {
                for index in index_rx.iter() {
                    if result_tx.send(term.approximate(index, term_accuracy)).is_err() {
                        // the receiver is gone after a failure; drop the rest
                        break;
                    }
                }
            });
        }
        drop(result_tx);
        drop(index_rx);

        let mut sum = BigDecimal::zero();
        for computed in result_rx.iter() {
            sum = sum.add(&computed?)?;
        }
        Ok(sum)
    })
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::ops::terms::EulerTerm;
    use crate::ops::terms::FractionalTerm;
    use crate::ops::terms::SignMapper;

    #[test]
    fn test_empty_sum() {
        let term = EulerTerm::new();
        let sum = SeriesSum::Sequential.accumulate(0, 0, -10, &term).unwrap();
        assert!(sum.is_zero());
    }

    #[test]
    fn test_negative_count() {
        let term = EulerTerm::new();
        assert!(SeriesSum::Sequential.accumulate(0, -1, -10, &term).is_err());
    }

    #[test]
    fn test_strategies_agree() {
        let term = EulerTerm::new();
        let sequential = SeriesSum::Sequential.accumulate(0, 25, -40, &term).unwrap();
        let parallel = SeriesSum::Parallel.accumulate(0, 25, -40, &term).unwrap();

        assert_eq!(sequential, parallel);
        assert_eq!(sequential.to_string(), parallel.to_string());

        // 1/0! + 1/1! + 1/2! + 1/3! truncated at the fourth place
        let short = SeriesSum::Parallel.accumulate(0, 4, -4, &term).unwrap();
        assert_eq!(short.to_string(), "2.6666");
    }

    #[test]
    fn test_first_failure_surfaces() {
        struct FailingTerm;

        impl FractionalTerm for FailingTerm {
            fn numerator(&self, index: i32) -> Result<BigDecimal, Error> {
                if index >= 3 {
                    Err(Error::Internal("term blew up"))
                } else {
                    Ok(BigDecimal::from(1))
                }
            }

            fn denominator(&self, _index: i32) -> Result<BigDecimal, Error> {
                Ok(BigDecimal::from(1))
            }

            fn sign_mapper(&self) -> SignMapper {
                SignMapper::Positive
            }
        }

        for strategy in [SeriesSum::Sequential, SeriesSum::Parallel] {
            let result = strategy.accumulate(0, 10, -5, &FailingTerm);
            assert_eq!(result, Err(Error::Internal("term blew up")));
        }
    }
}
