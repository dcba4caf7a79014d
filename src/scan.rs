//! Card directory scanning.
//!
//! Walks exactly one level of the card directory and classifies every regular
//! file it finds. Subdirectories are ignored.
//!
//! ```text
//! cards/
//! ├── back.png          # CARD_BACK → skipped, referenced separately
//! ├── hero.png          # card
//! ├── villain.jpg       # card
//! ├── notes.txt         # unsupported extension → skipped (reported)
//! ├── README            # no extension → skipped (silent)
//! └── extras/           # subdirectory → ignored
//! ```
//!
//! Entries come back in file-name order so that slot numbering is the same
//! on every run over the same directory.

use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

/// File extensions MPC accepts. Matched case-sensitively.
pub const CARD_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "gif", "tif", "tiff"];

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Failed to read directory entry: {0}")]
    Walk(#[from] walkdir::Error),
}

/// An image file eligible to become a front.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardFile {
    pub path: PathBuf,
    pub file_name: String,
    /// File name without the final extension.
    pub stem: String,
    pub extension: String,
}

/// Why a directory entry did not become a card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    NoExtension,
    UnsupportedExtension(String),
    CardBack,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanEntry {
    Card(CardFile),
    Skipped { path: PathBuf, reason: SkipReason },
}

/// Lazy one-level iterator over a card directory.
pub struct CardScanner {
    entries: walkdir::IntoIter,
    card_back: Option<String>,
}

impl CardScanner {
    pub fn new(dir: &Path, card_back: Option<&str>) -> Self {
        let entries = WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
            .into_iter();
        Self {
            entries,
            card_back: card_back.map(str::to_string),
        }
    }
}

impl Iterator for CardScanner {
    type Item = Result<ScanEntry, ScanError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let entry = match self.entries.next()? {
                Ok(entry) => entry,
                Err(e) => return Some(Err(e.into())),
            };
            if !entry.path().is_file() {
                continue;
            }
            let file_name = entry.file_name().to_string_lossy().to_string();
            return Some(Ok(classify(
                entry.into_path(),
                file_name,
                self.card_back.as_deref(),
            )));
        }
    }
}

/// Scan `dir` for cards, excluding the named card back.
pub fn scan(dir: &Path, card_back: Option<&str>) -> CardScanner {
    CardScanner::new(dir, card_back)
}

fn classify(path: PathBuf, file_name: String, card_back: Option<&str>) -> ScanEntry {
    let Some((stem, extension)) = file_name.rsplit_once('.') else {
        return ScanEntry::Skipped {
            path,
            reason: SkipReason::NoExtension,
        };
    };

    if !CARD_EXTENSIONS.contains(&extension) {
        return ScanEntry::Skipped {
            path,
            reason: SkipReason::UnsupportedExtension(extension.to_string()),
        };
    }

    if card_back == Some(file_name.as_str()) {
        return ScanEntry::Skipped {
            path,
            reason: SkipReason::CardBack,
        };
    }

    ScanEntry::Card(CardFile {
        stem: stem.to_string(),
        extension: extension.to_string(),
        file_name,
        path,
    })
}
