//! Pure calculation functions for the border geometry.
//!
//! All functions here are pure and testable without any I/O or images.

use super::backend::Dimensions;
use super::params::BorderSpec;

/// Whether an image of `dims` should receive a border under `spec`.
pub fn needs_border(dims: Dimensions, spec: &BorderSpec) -> bool {
    dims == spec.trigger
}

/// Canvas size after adding `border` pixels on every side.
///
/// # Examples
/// ```
/// # use mpcfill_gen::imaging::{Dimensions, padded_dimensions};
/// let padded = padded_dimensions(Dimensions { width: 1500, height: 2100 }, 72);
/// assert_eq!(padded, Dimensions { width: 1644, height: 2244 });
/// ```
pub fn padded_dimensions(dims: Dimensions, border: u32) -> Dimensions {
    Dimensions {
        width: dims.width + border * 2,
        height: dims.height + border * 2,
    }
}

/// Where the original lands on the padded canvas.
///
/// One pixel short of the border on the top and left edges, which leaves the
/// right and bottom edges one pixel wider. Existing MPC uploads depend on
/// this exact placement.
pub fn composite_offset(border: u32) -> (u32, u32) {
    let inset = border.saturating_sub(1);
    (inset, inset)
}
