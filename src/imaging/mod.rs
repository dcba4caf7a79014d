//! Image processing: the card border.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Identify** | `image::image_dimensions` |
//! | **Pad** | black canvas + `imageops::overlay`, re-encoded in place |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for border geometry (unit testable)
//! - **Parameters**: When to pad ([`BorderSpec`]) and the computed [`PadParams`]
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Operations**: [`pad_card`], which combines calculations + backend

pub mod backend;
mod calculations;
pub mod operations;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, Dimensions, ImageBackend};
pub use calculations::padded_dimensions;
pub use operations::{PadOutcome, pad_card, plan_border};
pub use params::{BORDER_WIDTH, BorderSpec, CARD_EXPORT_SIZE, PadParams};
pub use rust_backend::RustBackend;
