//! High-level image operations.
//!
//! These functions combine calculations with backend execution: identify the
//! card, decide whether it needs a border, and have the backend draw it.

use super::backend::{BackendError, Dimensions, ImageBackend};
use super::calculations::{composite_offset, needs_border, padded_dimensions};
use super::params::{BorderSpec, PadParams};
use std::path::Path;

/// Result type for image operations.
pub type Result<T> = std::result::Result<T, BackendError>;

/// What happened to a card image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PadOutcome {
    /// Rewritten with a border.
    Padded { from: Dimensions, to: Dimensions },
    /// Not the trigger size; file untouched.
    Untouched(Dimensions),
}

/// Plan the pad for an image of `dims`, or `None` when it needs no border.
pub fn plan_border(path: &Path, dims: Dimensions, spec: &BorderSpec) -> Option<PadParams> {
    if !needs_border(dims, spec) {
        return None;
    }
    let (offset_x, offset_y) = composite_offset(spec.border);
    Some(PadParams {
        path: path.to_path_buf(),
        canvas: padded_dimensions(dims, spec.border),
        offset_x,
        offset_y,
    })
}

/// Pad a card image in place if it is exactly the trigger size.
pub fn pad_card(backend: &impl ImageBackend, path: &Path, spec: &BorderSpec) -> Result<PadOutcome> {
    let dims = backend.identify(path)?;
    match plan_border(path, dims, spec) {
        Some(params) => {
            backend.pad(&params)?;
            Ok(PadOutcome::Padded {
                from: dims,
                to: params.canvas,
            })
        }
        None => Ok(PadOutcome::Untouched(dims)),
    }
}
