//! MPC purchase brackets.
//!
//! MPC prices orders in fixed tiers. An order declares the smallest tier that
//! covers its total card count; ordering 40 cards means buying the 55 bracket.

use thiserror::Error;

/// Every bracket MPC sells. Selection does not rely on this ordering.
pub const BRACKETS: &[u32] = &[
    18, 36, 55, 72, 80, 90, 108, 126, 144, 162, 198, 216, 234, 396, 504, 612,
];

#[derive(Error, Debug, PartialEq, Eq)]
pub enum BracketError {
    #[error("Unable to create order: {total} cards exceeds the largest bracket ({max})")]
    TooManyCards { total: u32, max: u32 },
    #[error("Unable to create order: no cards found")]
    EmptyOrder,
}

/// Pick the smallest bracket that holds `total` cards.
pub fn select_bracket(total: u32) -> Result<u32, BracketError> {
    if total == 0 {
        return Err(BracketError::EmptyOrder);
    }
    BRACKETS
        .iter()
        .copied()
        .filter(|&b| b >= total)
        .min()
        .ok_or(BracketError::TooManyCards {
            total,
            max: largest_bracket(),
        })
}

pub fn largest_bracket() -> u32 {
    BRACKETS.iter().copied().max().unwrap_or(0)
}
