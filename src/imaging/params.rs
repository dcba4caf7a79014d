//! Parameter types for the border operation.
//!
//! [`BorderSpec`] says *when* to pad and by how much; [`PadParams`] is the
//! fully computed instruction handed to the backend. The split keeps the
//! decision logic in [`operations`](super::operations) testable with a mock
//! backend.

use super::backend::Dimensions;
use std::path::PathBuf;

/// Export size of Card Conjurer renders, the only size that gets a border.
pub const CARD_EXPORT_SIZE: Dimensions = Dimensions {
    width: 1500,
    height: 2100,
};

/// Border added on every side, in pixels.
pub const BORDER_WIDTH: u32 = 72;

/// When and how much to pad.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BorderSpec {
    /// Only images of exactly this size are padded.
    pub trigger: Dimensions,
    pub border: u32,
}

impl Default for BorderSpec {
    fn default() -> Self {
        Self {
            trigger: CARD_EXPORT_SIZE,
            border: BORDER_WIDTH,
        }
    }
}

/// A planned in-place pad: black canvas of `canvas` size, original drawn at `offset`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PadParams {
    pub path: PathBuf,
    pub canvas: Dimensions,
    pub offset_x: u32,
    pub offset_y: u32,
}
