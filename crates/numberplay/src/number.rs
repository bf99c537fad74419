use core::fmt;
use num_integer::Integer;
use num_traits::{CheckedMul, FromPrimitive};

/// Integer types a search can enumerate.
///
/// Machine integers (`u64`) are used for divisor and amicable searches, while
/// [`num_bigint::BigUint`] backs narcissistic searches whose digit-power sums
/// outgrow any fixed width. The trait is blanket-implemented for every type
/// that satisfies its bounds.
pub trait SearchNumber:
    Integer
    + Clone
    + From<u8>
    + FromPrimitive
    + CheckedMul
    + fmt::Display
    + fmt::Debug
    + Send
    + Sync
    + 'static
{
}

impl<T> SearchNumber for T where
    T: Integer
        + Clone
        + From<u8>
        + FromPrimitive
        + CheckedMul
        + fmt::Display
        + fmt::Debug
        + Send
        + Sync
        + 'static
{
}
