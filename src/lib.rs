//! # mpcfill-gen
//!
//! Turns a folder of card images into a `cards.xml` order that MPC Fill can
//! upload to MakePlayingCards. The folder is the data source: every picture
//! file becomes a front, a config file sets quantities and the card back, and
//! the order is written next to wherever you point it.
//!
//! # Pipeline
//!
//! ```text
//! 1. Scan      cards/     →  CardFile stream   (one level, sorted by name)
//! 2. Resolve   cards.cfg  →  quantity per card (stem, then file name)
//! 3. Pad       1500x2100  →  1644x2244          (black border, in place)
//! 4. Bracket   total      →  smallest MPC tier
//! 5. Write     Order      →  cards.xml
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | Flat `KEY=VALUE` card config, case-insensitive lookup |
//! | [`scan`] | One-level card directory walk, extension and card back filtering |
//! | [`quantity`] | Per-card print quantity from the config |
//! | [`imaging`] | Border padding for Card Conjurer exports |
//! | [`bracket`] | MPC purchase bracket selection |
//! | [`manifest`] | Slot assignment and `cards.xml` rendering |
//! | [`generate`] | The full pipeline and its failure policy |
//! | [`types`] | Shared types passed between stages |
//! | [`output`] | CLI output formatting of a run |
//!
//! # Design Decisions
//!
//! ## Deterministic Slots
//!
//! Slots are assigned by folding over the scan result in file-name order.
//! Running twice over the same folder produces the same `cards.xml`.
//!
//! ## Why the Border
//!
//! MPC trims a bleed margin off every card. Card Conjurer exports at exactly
//! 1500x2100 with no bleed, so those files get a 72px black border before
//! upload. Any other size is assumed to be print-ready and left alone.

pub mod bracket;
pub mod config;
pub mod generate;
pub mod imaging;
pub mod manifest;
pub mod output;
pub mod quantity;
pub mod scan;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
