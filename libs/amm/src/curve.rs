//! StableSwap invariant math with exact integer iteration
//!
//! Newton's-method solvers for the two-coin StableSwap curve. Every division
//! truncates toward zero and both loops stop after [`MAX_ITERATIONS`] even
//! when not converged, reproducing the on-chain program bit for bit.

use crate::errors::{CalculatorError, Result};
use num::{BigInt, One, Signed, Zero};
use stableswap_types::N_COINS;
use tracing::trace;

/// Hard iteration cap shared by both solvers
pub const MAX_ITERATIONS: usize = 20;

/// Solver output with the number of Newton steps taken
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    pub value: BigInt,
    pub iterations: usize,
}

fn checked_div(numerator: &BigInt, denominator: &BigInt, context: &'static str) -> Result<BigInt> {
    if denominator.is_zero() {
        return Err(CalculatorError::degenerate(context));
    }
    Ok(numerator / denominator)
}

/// Invariant D for reserves `amount_a` and `amount_b`
///
/// # Examples
/// ```
/// use stableswap_amm::compute_d;
/// use stableswap_types::BigInt;
///
/// let balance = BigInt::from(1_000_000_000u64);
/// let d = compute_d(100, &balance, &balance).unwrap();
/// assert_eq!(d, BigInt::from(2_000_000_000u64));
/// ```
pub fn compute_d(amp_factor: u64, amount_a: &BigInt, amount_b: &BigInt) -> Result<BigInt> {
    solve_d(amp_factor, amount_a, amount_b).map(|solution| solution.value)
}

/// [`compute_d`] with the iteration count exposed
pub fn solve_d(amp_factor: u64, amount_a: &BigInt, amount_b: &BigInt) -> Result<Solution> {
    let n_coins = BigInt::from(N_COINS);
    let one = BigInt::one();
    let ann = BigInt::from(amp_factor) * &n_coins;
    let sum = amount_a + amount_b;

    if sum.is_zero() {
        return Ok(Solution {
            value: BigInt::zero(),
            iterations: 0,
        });
    }

    let mut d_prev = BigInt::zero();
    let mut d = sum.clone();
    let mut iterations = 0;

    // Guard is evaluated before every step
    while (&d - &d_prev).abs() > one && iterations < MAX_ITERATIONS {
        d_prev = d.clone();

        // D_P = D^3 / (n^n * a * b), stepwise
        let mut d_p = d.clone();
        d_p = checked_div(&(&d_p * &d), &(amount_a * &n_coins), "compute_d")?;
        d_p = checked_div(&(&d_p * &d), &(amount_b * &n_coins), "compute_d")?;

        let numerator = &d * (&ann * &sum + &d_p * &n_coins);
        let denominator = &d * (&ann - &one) + &d_p * (&n_coins + &one);
        d = checked_div(&numerator, &denominator, "compute_d")?;
        iterations += 1;
    }

    trace!(amp_factor, iterations, d = %d, "Invariant solved");
    Ok(Solution {
        value: d,
        iterations,
    })
}

/// Balance of the other reserve keeping invariant `d` once this side holds `x`
pub fn compute_y(amp_factor: u64, x: &BigInt, d: &BigInt) -> Result<BigInt> {
    solve_y(amp_factor, x, d).map(|solution| solution.value)
}

/// [`compute_y`] with the iteration count exposed
pub fn solve_y(amp_factor: u64, x: &BigInt, d: &BigInt) -> Result<Solution> {
    let n_coins = BigInt::from(N_COINS);
    let one = BigInt::one();
    let ann = BigInt::from(amp_factor) * &n_coins;

    // b = x + D/Ann - D
    let b = x + checked_div(d, &ann, "compute_y")? - d;
    // c = D^3 / (n^n * x * Ann)
    let c = checked_div(
        &(d * d * d),
        &(&n_coins * (&n_coins * (x * &ann))),
        "compute_y",
    )?;

    let mut y_prev = BigInt::zero();
    let mut y = d.clone();
    let mut iterations = 0;

    while iterations < MAX_ITERATIONS && (&y - &y_prev).abs() > one {
        y_prev = y.clone();
        y = checked_div(&(&y * &y + &c), &(&n_coins * &y + &b), "compute_y")?;
        iterations += 1;
    }

    trace!(amp_factor, iterations, y = %y, "Balance solved");
    Ok(Solution {
        value: y,
        iterations,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn big(value: u64) -> BigInt {
        BigInt::from(value)
    }

    #[test]
    fn test_compute_d_known_vectors() {
        assert_eq!(compute_d(100, &big(0), &big(0)).unwrap(), big(0));
        assert_eq!(
            compute_d(100, &big(1_000_000_000), &big(1_000_000_000)).unwrap(),
            big(2_000_000_000)
        );
        assert_eq!(compute_d(73, &big(92), &big(81)).unwrap(), big(173));
        assert_eq!(compute_d(11503, &big(28338), &big(78889)).unwrap(), big(107225));
        assert_eq!(
            compute_d(
                17653203515214796177,
                &big(13789683482691983066),
                &big(3964443602730479576)
            )
            .unwrap(),
            big(17754127085422462641)
        );
    }

    #[test]
    fn test_compute_y_known_vectors() {
        assert_eq!(compute_y(100, &big(100), &big(0)).unwrap(), big(0));
        assert_eq!(compute_y(8, &big(94), &big(163)).unwrap(), big(69));
        assert_eq!(
            compute_y(2137, &big(905777403660), &big(830914146046)).unwrap(),
            big(490376033)
        );
    }

    #[test]
    fn test_zero_sum_skips_iteration() {
        let solution = solve_d(5_000, &big(0), &big(0)).unwrap();
        assert_eq!(solution.iterations, 0);
        assert!(solution.value.is_zero());
    }

    #[test]
    fn test_iteration_counts() {
        assert_eq!(solve_d(73, &big(92), &big(81)).unwrap().iterations, 1);
        assert_eq!(solve_d(11503, &big(28338), &big(78889)).unwrap().iterations, 2);
        assert_eq!(solve_y(8, &big(94), &big(163)).unwrap().iterations, 4);
        assert_eq!(
            solve_y(2137, &big(905777403660), &big(830914146046))
                .unwrap()
                .iterations,
            10
        );
    }

    #[test]
    fn test_iteration_cap_on_extreme_imbalance() {
        // Does not converge within the cap; the 20th estimate is returned as-is
        let solution = solve_d(1, &big(1), &big(1_000_000_000_000_000_000)).unwrap();
        assert_eq!(solution.iterations, MAX_ITERATIONS);
        assert_eq!(solution.value, big(300728678441044));

        let solution = solve_y(1, &big(1), &big(1_000_000_000_000_000_000)).unwrap();
        assert_eq!(solution.iterations, MAX_ITERATIONS);
        assert_eq!(
            solution.value,
            "158945981545205197329658080775".parse::<BigInt>().unwrap()
        );
    }

    #[test]
    fn test_degenerate_inputs_error() {
        assert_eq!(
            compute_d(100, &big(0), &big(1_000)),
            Err(CalculatorError::ArithmeticDegenerate { context: "compute_d" })
        );
        assert_eq!(
            compute_y(100, &big(0), &big(1_000)),
            Err(CalculatorError::ArithmeticDegenerate { context: "compute_y" })
        );
        assert_eq!(
            compute_y(0, &big(10), &big(1_000)),
            Err(CalculatorError::ArithmeticDegenerate { context: "compute_y" })
        );
    }
}
