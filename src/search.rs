//! Adaptive search for the integer threshold of a monotonic predicate.
//!
//! The search runs in two phases: an exponential scan brackets the threshold
//! starting from a single point, then a binary search locates it inside the
//! bracket. Overflow of the scan is a hard error, never a clamp.

use crate::defs::Error;

/// Finds the extreme integer satisfying a strictly monotonic predicate.
///
/// For an increasing predicate (false below the threshold, true above) the
/// smallest satisfying integer is returned; for a decreasing predicate the
/// largest. The predicate may fail, and its failure aborts the search.
pub struct AdaptiveIntegerFinder<P> {
    predicate: P,
    increasing: bool,
}

impl<P> AdaptiveIntegerFinder<P>
where
    P: FnMut(i32) -> Result<bool, Error>,
{
    pub fn new(predicate: P, increasing: bool) -> Self {
        AdaptiveIntegerFinder { predicate, increasing }
    }

    /// Runs the search starting from the given point. Returns `None` when no
    /// integer inside the discovered bracket satisfies the predicate.
    pub fn find(mut self, starting_point: i32) -> Result<Option<i32>, Error> {
        let mut start = starting_point;
        let mut end = self.next_point(start)?;

        while !(self.predicate)(end)? {
            start = end;
            end = self.next_point(end)?;
        }

        if self.increasing {
            self.threshold(start, end)
        } else {
            self.threshold(end, start)
        }
    }

    // Next boundary of the exponential scan: double away from zero, halve
    // toward zero, step one across it.
    fn next_point(&self, previous: i32) -> Result<i32, Error> {
        if previous == 0 {
            return Ok(if self.increasing { 1 } else { -1 });
        }

        let next = match (previous < 0, self.increasing) {
            (true, true) => Some(previous / 2),
            (true, false) => previous.checked_mul(2),
            (false, true) => previous.checked_mul(2),
            (false, false) => Some(previous / 2),
        };
        next.ok_or(Error::Overflow("boundary scan left the 32-bit range"))
    }

    // Classical threshold search over an inclusive bracket.
    fn threshold(&mut self, lower: i32, upper: i32) -> Result<Option<i32>, Error> {
        let mut lower = lower as i64;
        let mut upper = upper as i64;
        let mut result = None;

        while lower <= upper {
            let mid = lower + (upper - lower) / 2;
            let matched = (self.predicate)(mid as i32)?;
            if matched {
                result = Some(mid as i32);
            }
            if matched == self.increasing {
                upper = mid - 1;
            } else {
                lower = mid + 1;
            }
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn test_increasing_threshold() {
        for threshold in [1, 2, 3, 5, 37, 1000, 65537] {
            let finder = AdaptiveIntegerFinder::new(|i| Ok(i >= threshold), true);
            assert_eq!(finder.find(0).unwrap(), Some(threshold));
        }
    }

    #[test]
    fn test_negative_threshold() {
        // the starting point belongs to the bracket, so an already satisfied
        // start is returned as is
        let finder = AdaptiveIntegerFinder::new(|i| Ok(i >= -12), true);
        assert_eq!(finder.find(0).unwrap(), Some(0));

        let finder = AdaptiveIntegerFinder::new(|i| Ok(i >= -12), true);
        assert_eq!(finder.find(-100).unwrap(), Some(-12));
    }

    #[test]
    fn test_decreasing_threshold() {
        // predicate true for small values, false for large ones; the finder
        // returns the largest satisfying integer inside the bracket
        for threshold in [-40, -3, -1] {
            let finder = AdaptiveIntegerFinder::new(|i| Ok(i <= threshold), false);
            assert_eq!(finder.find(0).unwrap(), Some(threshold));
        }

        let finder = AdaptiveIntegerFinder::new(|i| Ok(i <= 7), false);
        assert_eq!(finder.find(0).unwrap(), Some(0));
    }

    #[test]
    fn test_overflow_is_an_error() {
        let finder = AdaptiveIntegerFinder::new(|_| Ok(false), true);
        assert_eq!(
            finder.find(0),
            Err(Error::Overflow("boundary scan left the 32-bit range"))
        );
    }

    #[test]
    fn test_predicate_failure_propagates() {
        let finder = AdaptiveIntegerFinder::new(
            |i| {
                if i > 8 {
                    Err(Error::Internal("probe failed"))
                } else {
                    Ok(false)
                }
            },
            true,
        );
        assert_eq!(finder.find(0), Err(Error::Internal("probe failed")));
    }
}
