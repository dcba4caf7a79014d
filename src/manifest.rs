//! Order assembly and `cards.xml` rendering.
//!
//! An [`Order`] gives every physical copy of every card its own slot. Slots
//! are handed out by folding over the candidates in scan order, so the
//! entries always cover `0..total` exactly once, in the order they are
//! written:
//!
//! ```text
//! hero.png    ×3  →  0,1,2
//! villain.png ×1  →  3
//! total 4         →  bracket 18
//! ```
//!
//! ## Output Format
//!
//! MPC Fill reads the file literally, so the layout (tabs included) is fixed:
//!
//! ```text
//! <order>
//! 	<details>
//! 		<quantity>4</quantity>
//! 		<bracket>18</bracket>
//! 		<stock>(S30) Standard Smooth</stock>
//! 		<foil>false</foil>
//! 	</details>
//! 	<fronts>
//! 		<card>
//! 			<id>/cards/hero.png</id>
//! 			<slots>0,1,2</slots>
//! 		</card>
//! 	</fronts>
//! 	<backs>
//! 	<!-- … -->
//! 	</backs>
//! 	<cardback>/cards/back.png</cardback>
//! </order>
//! ```
//!
//! Rendering ([`manifest_lines`]) is pure; [`ManifestWriter`] does the I/O.

use crate::bracket::{BracketError, select_bracket};
use crate::types::CardCandidate;
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::ops::Range;
use std::path::{Path, PathBuf};

/// File name MPC Fill expects.
pub const MANIFEST_FILE_NAME: &str = "cards.xml";

const STOCK: &str = "(S30) Standard Smooth";

const BACKS_COMMENT: &[&str] = &[
    "\t<!--",
    "\t\tMove any double sided card backs here.",
    "\t\tChange the slot value to the front card slot value",
    "\t\tChange the slot in the last card in <fronts> to the removed card's slot",
    "\t\tThen change the total quantity at the top to match the actual number of cards",
    "\t-->",
];

/// One front with its slot range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderEntry {
    pub path: PathBuf,
    pub quantity: u32,
    pub slots: Range<u32>,
}

impl OrderEntry {
    /// Slots as MPC writes them: `0,1,2`.
    pub fn slot_list(&self) -> String {
        self.slots
            .clone()
            .map(|s| s.to_string())
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// A complete order, ready to render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Order {
    pub entries: Vec<OrderEntry>,
    pub total: u32,
    pub bracket: u32,
    pub card_back: PathBuf,
}

impl Order {
    /// Total the candidates, pick the bracket, and assign slots.
    ///
    /// Entries keep the order of `cards`.
    pub fn build(cards: &[CardCandidate], card_back: PathBuf) -> Result<Self, BracketError> {
        let total: u64 = cards.iter().map(|c| u64::from(c.quantity)).sum();
        let bracket = select_bracket(u32::try_from(total).unwrap_or(u32::MAX))?;
        // Bracket selection bounds the total, so slot arithmetic cannot overflow.
        let total = total as u32;

        let (entries, next_slot) = cards.iter().fold(
            (Vec::with_capacity(cards.len()), 0u32),
            |(mut entries, next), card| {
                let end = next + card.quantity;
                entries.push(OrderEntry {
                    path: card.path.clone(),
                    quantity: card.quantity,
                    slots: next..end,
                });
                (entries, end)
            },
        );
        debug_assert_eq!(next_slot, total);

        Ok(Self {
            entries,
            total,
            bracket,
            card_back,
        })
    }
}

/// Render the order as `cards.xml` lines, without trailing newlines.
pub fn manifest_lines(order: &Order) -> Vec<String> {
    let mut lines = vec![
        "<order>".to_string(),
        "\t<details>".to_string(),
        format!("\t\t<quantity>{}</quantity>", order.total),
        format!("\t\t<bracket>{}</bracket>", order.bracket),
        format!("\t\t<stock>{STOCK}</stock>"),
        "\t\t<foil>false</foil>".to_string(),
        "\t</details>".to_string(),
        "\t<fronts>".to_string(),
    ];

    for entry in &order.entries {
        lines.push("\t\t<card>".to_string());
        lines.push(format!("\t\t\t<id>{}</id>", escape_path(&entry.path)));
        lines.push(format!("\t\t\t<slots>{}</slots>", entry.slot_list()));
        lines.push("\t\t</card>".to_string());
    }

    lines.push("\t</fronts>".to_string());
    lines.push("\t<backs>".to_string());
    lines.extend(BACKS_COMMENT.iter().map(|l| l.to_string()));
    lines.push("\t</backs>".to_string());
    lines.push(format!(
        "\t<cardback>{}</cardback>",
        escape_path(&order.card_back)
    ));
    lines.push("</order>".to_string());
    lines
}

/// Render the whole manifest as one string, one `\n` per line.
pub fn render_manifest(order: &Order) -> String {
    manifest_lines(order)
        .into_iter()
        .map(|l| l + "\n")
        .collect()
}

fn escape_path(path: &Path) -> String {
    path.display()
        .to_string()
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Line-oriented writer for `cards.xml`.
///
/// Creating the writer truncates the file. Individual line failures are
/// logged and skipped, never fatal.
pub struct ManifestWriter {
    file: File,
    path: PathBuf,
}

impl ManifestWriter {
    pub fn create(path: &Path) -> std::io::Result<Self> {
        let file = File::create(path)?;
        Ok(Self {
            file,
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append each line plus `\n`. Returns how many lines failed to write.
    pub fn write_lines<I, S>(&mut self, lines: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut failures = 0;
        for line in lines {
            if let Err(e) = writeln!(self.file, "{}", line.as_ref()) {
                tracing::error!("Failed to write to {}: {e}", self.path.display());
                failures += 1;
            }
        }
        failures
    }
}
