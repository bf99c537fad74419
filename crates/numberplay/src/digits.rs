//! Decimal digit helpers and digit-length tier bounds.

use crate::{Error, Result, SearchNumber};
use num_bigint::BigUint;
use num_traits::{Zero, checked_pow};

/// Returns `true` if `number` has exactly one decimal digit.
pub fn is_single_digit<T: SearchNumber>(number: &T) -> bool {
    *number < T::from(10_u8)
}

/// Splits `number` into its decimal digits, most significant first.
///
/// Zero splits into a single `0` digit.
pub fn digit_split(number: &BigUint) -> Vec<u8> {
    if number.is_zero() {
        return vec![0];
    }
    number.to_radix_be(10)
}

/// Returns the number of decimal digits of `number` (`1` for zero).
pub fn digit_count(number: &BigUint) -> u32 {
    // A `BigUint` would need gigabytes of limbs to exceed `u32::MAX` digits.
    digit_split(number).len() as u32
}

/// Returns the lowest number with `digit_count` digits: `0` for one digit,
/// `10^(digit_count - 1)` otherwise.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] if `digit_count` is zero or the bound
/// does not fit in `T`.
pub fn lowest_n_digit_number<T: SearchNumber>(digit_count: u32) -> Result<T> {
    match digit_count {
        0 => Err(zero_digits()),
        1 => Ok(T::zero()),
        n => pow10(n - 1).ok_or_else(|| too_wide::<T>(digit_count)),
    }
}

/// Returns the highest number with `digit_count` digits: `10^digit_count - 1`.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] if `digit_count` is zero or the bound
/// does not fit in `T`.
pub fn highest_n_digit_number<T: SearchNumber>(digit_count: u32) -> Result<T> {
    if digit_count == 0 {
        return Err(zero_digits());
    }
    pow10::<T>(digit_count)
        .map(|bound| bound - T::one())
        .ok_or_else(|| too_wide::<T>(digit_count))
}

fn pow10<T: SearchNumber>(exponent: u32) -> Option<T> {
    checked_pow(T::from(10_u8), exponent as usize)
}

fn zero_digits() -> Error {
    Error::invalid_argument("digit count must be greater than 0")
}

fn too_wide<T>(digit_count: u32) -> Error {
    Error::invalid_argument(format!(
        "{digit_count}-digit numbers do not fit in {}",
        core::any::type_name::<T>()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::One;

    #[test]
    fn single_digits() {
        for n in 0_u64..10 {
            assert!(is_single_digit(&n));
        }
        assert!(!is_single_digit(&10_u64));
        assert!(!is_single_digit(&BigUint::from(153_u32)));
    }

    #[test]
    fn splits_most_significant_first() {
        assert_eq!(digit_split(&BigUint::from(0_u8)), vec![0]);
        assert_eq!(digit_split(&BigUint::from(7_u8)), vec![7]);
        assert_eq!(digit_split(&BigUint::from(1634_u32)), vec![1, 6, 3, 4]);
        assert_eq!(digit_split(&BigUint::from(1000_u32)), vec![1, 0, 0, 0]);
    }

    #[test]
    fn counts_digits() {
        assert_eq!(digit_count(&BigUint::from(0_u8)), 1);
        assert_eq!(digit_count(&BigUint::from(9_u8)), 1);
        assert_eq!(digit_count(&BigUint::from(10_u8)), 2);
        assert_eq!(digit_count(&BigUint::from(10_u8).pow(38)), 39);
    }

    #[test]
    fn tier_bounds() {
        assert_eq!(lowest_n_digit_number::<u64>(1), Ok(0));
        assert_eq!(highest_n_digit_number::<u64>(1), Ok(9));
        assert_eq!(lowest_n_digit_number::<u64>(3), Ok(100));
        assert_eq!(highest_n_digit_number::<u64>(3), Ok(999));
        assert_eq!(lowest_n_digit_number::<u64>(19), Ok(1_000_000_000_000_000_000));
        assert_eq!(highest_n_digit_number::<u64>(19), Ok(9_999_999_999_999_999_999));
    }

    #[test]
    fn big_tier_bounds() {
        let lowest: BigUint = lowest_n_digit_number(39).unwrap();
        let highest: BigUint = highest_n_digit_number(39).unwrap();

        assert_eq!(digit_count(&lowest), 39);
        assert_eq!(digit_count(&highest), 39);
        assert_eq!(digit_count(&(highest + BigUint::one())), 40);
    }

    #[test]
    fn rejects_zero_digits() {
        assert!(matches!(
            lowest_n_digit_number::<u64>(0),
            Err(Error::InvalidArgument { .. })
        ));
        assert!(matches!(
            highest_n_digit_number::<BigUint>(0),
            Err(Error::InvalidArgument { .. })
        ));
    }

    #[test]
    fn rejects_tiers_wider_than_the_type() {
        assert!(matches!(
            highest_n_digit_number::<u64>(20),
            Err(Error::InvalidArgument { .. })
        ));
        assert!(lowest_n_digit_number::<u64>(20).is_ok());
        assert!(matches!(
            lowest_n_digit_number::<u64>(21),
            Err(Error::InvalidArgument { .. })
        ));
    }
}
