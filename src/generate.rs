//! Order generation: the full scan → resolve → pad → bracket → write pipeline.
//!
//! ```text
//! cards/ + cards.cfg
//!   │ scan          one level, sorted, card back excluded
//!   │ resolve       quantity per card from the config
//!   │ pad           1500x2100 exports get a 72px black border, in place
//!   │ bracket       smallest tier covering the total
//!   ▼ write         out/cards.xml
//! ```
//!
//! ## Failure Policy
//!
//! Only four conditions stop a run: a missing card or output directory, an
//! uncreatable `cards.xml`, and an order that no bracket can hold (or that
//! holds no cards at all). Everything else is logged, recorded on the
//! [`GenerateReport`], and the run carries on.

use crate::bracket::BracketError;
use crate::config::{ConfigWarning, OrderConfig};
use crate::imaging::{BorderSpec, Dimensions, ImageBackend, PadOutcome, pad_card};
use crate::manifest::{MANIFEST_FILE_NAME, ManifestWriter, Order, manifest_lines};
use crate::quantity::resolve_quantity;
use crate::scan::{self, ScanEntry, ScanError, SkipReason};
use crate::types::CardCandidate;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("Card directory does not exist: {0}")]
    CardsDirMissing(PathBuf),
    #[error("Output directory does not exist: {0}")]
    OutputDirMissing(PathBuf),
    #[error("Failed to create {path}: {source}")]
    CreateManifest {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Bracket(#[from] BracketError),
}

/// Inputs for a run.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub cards_dir: PathBuf,
    pub output_dir: PathBuf,
    pub config_path: Option<PathBuf>,
    pub border: BorderSpec,
    /// Build the order without padding images or writing `cards.xml`.
    pub check_only: bool,
}

impl GenerateOptions {
    pub fn new(cards_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            cards_dir: cards_dir.into(),
            output_dir: output_dir.into(),
            config_path: None,
            border: BorderSpec::default(),
            check_only: false,
        }
    }
}

/// What happened to a card's image during the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BorderStatus {
    Padded { from: Dimensions, to: Dimensions },
    Untouched,
    Failed(String),
    /// Check mode; the image was not inspected.
    Skipped,
}

#[derive(Debug, Clone)]
pub struct ProcessedCard {
    pub candidate: CardCandidate,
    pub border: BorderStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: SkipReason,
}

/// Everything a run did, for display and tests.
#[derive(Debug)]
pub struct GenerateReport {
    pub order: Order,
    pub cards: Vec<ProcessedCard>,
    pub skipped: Vec<SkippedFile>,
    pub config_warnings: Vec<ConfigWarning>,
    /// Directory entries that could not be read.
    pub unreadable_entries: usize,
    /// `None` in check mode.
    pub manifest_path: Option<PathBuf>,
    pub write_failures: usize,
}

/// Run the pipeline.
pub fn generate(
    options: &GenerateOptions,
    backend: &impl ImageBackend,
) -> Result<GenerateReport, GenerateError> {
    let cards_dir = existing_dir(&options.cards_dir).ok_or_else(|| {
        GenerateError::CardsDirMissing(options.cards_dir.clone())
    })?;
    let output_dir = existing_dir(&options.output_dir).ok_or_else(|| {
        GenerateError::OutputDirMissing(options.output_dir.clone())
    })?;

    let config = options.config_path.as_deref().and_then(load_config);
    let card_back = config
        .as_ref()
        .and_then(|c| c.card_back())
        .map(str::to_string);

    let manifest_path = output_dir.join(MANIFEST_FILE_NAME);
    let mut writer = if options.check_only {
        None
    } else {
        let writer = ManifestWriter::create(&manifest_path).map_err(|source| {
            GenerateError::CreateManifest {
                path: manifest_path.clone(),
                source,
            }
        })?;
        Some(writer)
    };

    let collected = collect_cards(
        scan::scan(&cards_dir, card_back.as_deref()),
        config.as_ref(),
        options,
        backend,
    );

    let card_back_path = match &card_back {
        Some(name) => {
            let path = cards_dir.join(name);
            if !path.is_file() {
                tracing::warn!("Card back {} does not exist", path.display());
            }
            path
        }
        None => cards_dir.clone(),
    };

    let candidates: Vec<CardCandidate> =
        collected.cards.iter().map(|c| c.candidate.clone()).collect();
    let order = Order::build(&candidates, card_back_path)?;
    tracing::debug!(
        "Order: {} cards in {} entries, bracket {}",
        order.total,
        order.entries.len(),
        order.bracket
    );

    let write_failures = match writer.as_mut() {
        Some(w) => w.write_lines(manifest_lines(&order)),
        None => 0,
    };

    Ok(GenerateReport {
        order,
        cards: collected.cards,
        skipped: collected.skipped,
        config_warnings: config.map(|c| c.warnings().to_vec()).unwrap_or_default(),
        unreadable_entries: collected.unreadable_entries,
        manifest_path: writer.map(|w| w.path().to_path_buf()),
        write_failures,
    })
}

#[derive(Debug, Default)]
struct CollectedCards {
    cards: Vec<ProcessedCard>,
    skipped: Vec<SkippedFile>,
    unreadable_entries: usize,
}

/// Resolve and pad every scanned card; unreadable entries are counted, not fatal.
fn collect_cards(
    entries: impl Iterator<Item = Result<ScanEntry, ScanError>>,
    config: Option<&OrderConfig>,
    options: &GenerateOptions,
    backend: &impl ImageBackend,
) -> CollectedCards {
    let mut collected = CollectedCards::default();

    for entry in entries {
        match entry {
            Ok(ScanEntry::Card(card)) => {
                let resolution = resolve_quantity(&card.file_name, &card.stem, config);
                let border = if options.check_only {
                    BorderStatus::Skipped
                } else {
                    apply_border(backend, &card.path, &options.border)
                };
                collected.cards.push(ProcessedCard {
                    candidate: CardCandidate::new(card, resolution.quantity, resolution.source),
                    border,
                });
            }
            Ok(ScanEntry::Skipped { path, reason }) => {
                if let SkipReason::UnsupportedExtension(_) = reason {
                    tracing::info!("Ignoring {}, not a picture file", path.display());
                }
                collected.skipped.push(SkippedFile { path, reason });
            }
            Err(e) => {
                tracing::error!("{e}");
                collected.unreadable_entries += 1;
            }
        }
    }

    collected
}

/// Absolute form of `path` if it is an existing directory.
fn existing_dir(path: &Path) -> Option<PathBuf> {
    let abs = std::path::absolute(path).ok()?;
    abs.is_dir().then_some(abs)
}

fn load_config(path: &Path) -> Option<OrderConfig> {
    match OrderConfig::load(path) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{e}; continuing without a config");
            None
        }
    }
}

fn apply_border(backend: &impl ImageBackend, path: &Path, spec: &BorderSpec) -> BorderStatus {
    match pad_card(backend, path, spec) {
        Ok(PadOutcome::Padded { from, to }) => {
            tracing::debug!("Padded {} from {from} to {to}", path.display());
            BorderStatus::Padded { from, to }
        }
        Ok(PadOutcome::Untouched(_)) => BorderStatus::Untouched,
        Err(e) => {
            tracing::error!("Failed to add border to {}: {e}", path.display());
            BorderStatus::Failed(e.to_string())
        }
    }
}
