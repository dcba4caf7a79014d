//! Shared types passed between pipeline stages.

use crate::quantity::QuantitySource;
use crate::scan::CardFile;
use serde::Serialize;
use std::path::PathBuf;

/// A front card with its resolved print quantity.
///
/// Built from a scanned [`CardFile`] once its quantity is known. The card back
/// never becomes a candidate; it is carried separately on the order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardCandidate {
    /// Absolute path to the image.
    pub path: PathBuf,
    pub file_name: String,
    pub extension: String,
    /// Always at least 1.
    pub quantity: u32,
    pub quantity_source: QuantitySource,
}

impl CardCandidate {
    pub fn new(card: CardFile, quantity: u32, quantity_source: QuantitySource) -> Self {
        Self {
            path: card.path,
            file_name: card.file_name,
            extension: card.extension,
            quantity,
            quantity_source,
        }
    }
}
