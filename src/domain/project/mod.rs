//! Project module - The immutable input of an evaluation run.
//!
//! - `ProjectAttributes` - Description, budget, genre, platform, audience, comparables
//! - `Platform` - Distribution platform with lenient parsing
//! - `BudgetTier` - Industry budget tiers plus currency helpers

mod attributes;
mod budget;
mod platform;

pub use attributes::{ProjectAttributes, DEFAULT_GENRE, DEFAULT_TARGET_AUDIENCE};
pub use budget::{format_currency, group_thousands, roi_percentage, BudgetTier};
pub(crate) use budget::{round_half_even, round_to};
pub use platform::Platform;
