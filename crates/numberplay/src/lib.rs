#![doc = include_str!("../README.md")]

mod aggregate;
mod digits;
mod error;
mod number;
mod partition;
mod pool;
mod prune;
mod search;

pub use crate::aggregate::*;
pub use crate::digits::*;
pub use crate::error::*;
pub use crate::number::*;
pub use crate::partition::*;
pub use crate::pool::*;
pub use crate::prune::*;
pub use crate::search::amicable::*;
pub use crate::search::division::*;
pub use crate::search::narcissistic::*;
pub use crate::search::{map_chunks, search_tier, search_tier_sequential, sweep_tiers};
