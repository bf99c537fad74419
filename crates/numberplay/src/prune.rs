use crate::digits::lowest_n_digit_number;
use num_bigint::BigUint;

/// Decides whether a digit-length tier can hold any solution at all.
///
/// The bound must be monotonic: once a tier fails, every longer tier fails as
/// well, so an ascending sweep stops at the first failing tier.
pub trait TierPruner {
    fn may_contain_solution(&self, digit_count: u32) -> bool;
}

/// Tier bound for narcissistic numbers.
///
/// An `n`-digit number has a digit-power sum of at most `n * 9^n`. Once that
/// falls below the smallest `n`-digit number, no `n`-digit number (nor any
/// longer one) can equal its own sum.
#[derive(Clone, Copy, Debug, Default)]
pub struct NarcissisticBound;

impl TierPruner for NarcissisticBound {
    fn may_contain_solution(&self, digit_count: u32) -> bool {
        may_contain_narcissistic(digit_count)
    }
}

/// Returns `false` if no narcissistic number of `digit_count` digits can
/// exist.
pub fn may_contain_narcissistic(digit_count: u32) -> bool {
    lowest_n_digit_number::<BigUint>(digit_count).is_ok_and(|lowest| {
        BigUint::from(digit_count) * BigUint::from(9_u8).pow(digit_count) >= lowest
    })
}
