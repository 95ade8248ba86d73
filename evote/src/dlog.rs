use crate::*;
use std::collections::HashMap;

/// Baby-step/giant-step table for discrete logs of `x·g` with `0 <= x <= bound`.
///
/// Building the table costs about `sqrt(bound)` group operations and memory;
/// each `solve` costs at most as many again. A table can be reused for any
/// number of targets under the same bound.
pub struct DiscreteLogTable {
    bound: u64,
    step: u64,
    baby_steps: HashMap<[u8; GroupElement::NUM_BYTES], u64>,
    giant_step: GroupElement,
}

impl DiscreteLogTable {
    /// Largest supported bound, giving at most 2^20 baby steps
    pub const MAX_BOUND: u64 = (1 << 40) - 1;

    /// Precompute the baby steps for `bound`.
    ///
    /// Fails with `BoundTooLarge` above `MAX_BOUND` or when the table cannot be allocated.
    pub fn new(bound: u64) -> Result<Self, Error> {
        let too_large = Error::BoundTooLarge {
            bound,
            max: DiscreteLogTable::MAX_BOUND,
        };
        if bound > DiscreteLogTable::MAX_BOUND {
            debug!("refusing discrete log table for bound {}", bound);
            return Err(too_large);
        }

        let step = ceil_sqrt(bound + 1);
        trace!("building discrete log table: bound {}, step {}", bound, step);

        let g = GroupElement::generator();
        let mut baby_steps: HashMap<[u8; GroupElement::NUM_BYTES], u64> = HashMap::new();
        if baby_steps.try_reserve(step as usize).is_err() {
            return Err(too_large);
        }
        let mut current = GroupElement::identity();
        for j in 0..step {
            baby_steps.insert(current.to_bytes(), j);
            current = current + g;
        }

        Ok(DiscreteLogTable {
            bound,
            step,
            baby_steps,
            giant_step: GroupElement::base_mul(&Scalar::from(step)),
        })
    }

    pub fn bound(&self) -> u64 {
        self.bound
    }

    /// Recover `x` from `target = x·g`.
    ///
    /// Fails with `DecodeFailed` when no `x` in `[0, bound]` matches.
    pub fn solve(&self, target: &GroupElement) -> Result<u64, Error> {
        let mut gamma = *target;
        for i in 0..self.step {
            if let Some(j) = self.baby_steps.get(&gamma.to_bytes()) {
                let x = i * self.step + j;
                if x > self.bound {
                    break;
                }
                trace!("discrete log found after {} giant steps", i);
                return Ok(x);
            }
            gamma = gamma - self.giant_step;
        }

        debug!("discrete log search exhausted for bound {}", self.bound);
        Err(Error::DecodeFailed { bound: self.bound })
    }
}

/// Recover `x` from `target = x·g`, given `0 <= x <= bound`
pub fn solve_discrete_log(target: &GroupElement, bound: u64) -> Result<u64, Error> {
    DiscreteLogTable::new(bound)?.solve(target)
}

/// Smallest `m` with `m * m >= n`
fn ceil_sqrt(n: u64) -> u64 {
    if n == 0 {
        return 0;
    }
    let mut m = (n as f64).sqrt() as u64;
    while m.saturating_mul(m) < n {
        m += 1;
    }
    while m > 0 && (m - 1).saturating_mul(m - 1) >= n {
        m -= 1;
    }
    m
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(x: u64) -> GroupElement {
        GroupElement::base_mul(&Scalar::from(x))
    }

    #[test]
    fn test_ceil_sqrt() {
        let cases = [
            (0u64, 0u64),
            (1, 1),
            (2, 2),
            (4, 2),
            (5, 3),
            (9, 3),
            (10, 4),
            (1_000_001, 1001),
            (u64::MAX, 1 << 32),
        ];
        for (n, expected) in cases.iter() {
            assert_eq!(ceil_sqrt(*n), *expected, "ceil_sqrt({})", n);
        }
    }

    #[test]
    fn test_solve_every_value_below_bound() {
        let table = DiscreteLogTable::new(30).unwrap();
        for x in 0..=30 {
            assert_eq!(table.solve(&point(x)).unwrap(), x);
        }
    }

    #[test]
    fn test_bound_is_exact() {
        for x in &[0u64, 1, 5, 24, 25, 99, 1000] {
            assert_eq!(solve_discrete_log(&point(*x), *x).unwrap(), *x);
            if *x > 0 {
                assert!(matches!(
                    solve_discrete_log(&point(*x), *x - 1),
                    Err(Error::DecodeFailed { bound }) if bound == *x - 1
                ));
            }
        }
    }

    #[test]
    fn test_reject_unrelated_point() {
        let table = DiscreteLogTable::new(100).unwrap();
        assert!(table.solve(&point(1_000_000)).is_err());
        assert!(table.solve(&-point(1)).is_err());
    }

    #[test]
    fn test_reject_oversized_bound() {
        let max = DiscreteLogTable::MAX_BOUND;
        for bound in &[max + 1, u64::MAX] {
            assert!(matches!(
                DiscreteLogTable::new(*bound),
                Err(Error::BoundTooLarge { bound: b, max: m }) if b == *bound && m == max
            ));
            assert!(matches!(
                solve_discrete_log(&point(1), *bound),
                Err(Error::BoundTooLarge { .. })
            ));
        }
        assert_eq!(DiscreteLogTable::new(1000).unwrap().bound(), 1000);
    }
}
