//! CLI output formatting for a generation run.
//!
//! # Output Format
//!
//! ```text
//! Cards
//! 001 hero.png ×3 → slots 0-2
//!     Quantity: config (hero)
//!     Border: 1500x2100 → 1644x2244
//! 002 villain.png ×1 → slot 3
//!
//! Skipped
//!     notes.txt (not a picture file)
//!
//! Card back
//!     /cards/back.png
//!
//! Order: 4 cards, bracket 18 → /out/cards.xml
//! ```
//!
//! # Architecture
//!
//! Each `format_*` function returns `Vec<String>` for testability and has a
//! `print_*` wrapper that writes to stdout. Format functions are pure.

use crate::config::ConfigWarning;
use crate::generate::{BorderStatus, GenerateReport, ProcessedCard, SkippedFile};
use crate::manifest::OrderEntry;
use crate::quantity::QuantitySource;
use crate::scan::SkipReason;
use std::path::Path;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

/// `slot 3` or `slots 0-2`.
fn slot_range(entry: &OrderEntry) -> String {
    match entry.slots.len() {
        1 => format!("slot {}", entry.slots.start),
        _ => format!("slots {}-{}", entry.slots.start, entry.slots.end - 1),
    }
}

fn card_lines(index: usize, card: &ProcessedCard, entry: &OrderEntry) -> Vec<String> {
    let c = &card.candidate;
    let mut lines = vec![format!(
        "{} {} ×{} → {}",
        format_index(index),
        c.file_name,
        c.quantity,
        slot_range(entry)
    )];

    let stem = c
        .file_name
        .strip_suffix(&format!(".{}", c.extension))
        .unwrap_or(&c.file_name);
    match &c.quantity_source {
        QuantitySource::Default => {}
        QuantitySource::Stem => lines.push(format!("{}Quantity: config ({stem})", indent(1))),
        QuantitySource::FileName => {
            lines.push(format!("{}Quantity: config ({})", indent(1), c.file_name))
        }
        QuantitySource::Invalid(raw) => lines.push(format!(
            "{}Quantity: invalid value {raw:?}, using 1",
            indent(1)
        )),
    }

    match &card.border {
        BorderStatus::Padded { from, to } => {
            lines.push(format!("{}Border: {from} → {to}", indent(1)))
        }
        BorderStatus::Failed(err) => lines.push(format!("{}Border failed: {err}", indent(1))),
        BorderStatus::Untouched | BorderStatus::Skipped => {}
    }
    lines
}

fn skipped_line(skipped: &SkippedFile) -> Option<String> {
    let reason = match &skipped.reason {
        SkipReason::UnsupportedExtension(_) => "not a picture file",
        // The card back has its own section; extensionless files are noise.
        SkipReason::CardBack | SkipReason::NoExtension => return None,
    };
    Some(format!("{}{} ({reason})", indent(1), file_name(&skipped.path)))
}

fn warning_line(warning: &ConfigWarning) -> String {
    format!("{}line {}: {}", indent(1), warning.line_number, warning.line)
}

/// Format the result of a run.
pub fn format_generate_output(report: &GenerateReport) -> Vec<String> {
    let mut lines = vec!["Cards".to_string()];
    for (i, (card, entry)) in report.cards.iter().zip(&report.order.entries).enumerate() {
        lines.extend(card_lines(i + 1, card, entry));
    }

    let skipped: Vec<String> = report.skipped.iter().filter_map(skipped_line).collect();
    if !skipped.is_empty() {
        lines.push(String::new());
        lines.push("Skipped".to_string());
        lines.extend(skipped);
    }

    if !report.config_warnings.is_empty() {
        lines.push(String::new());
        lines.push("Config warnings".to_string());
        lines.extend(report.config_warnings.iter().map(warning_line));
    }

    lines.push(String::new());
    lines.push("Card back".to_string());
    lines.push(format!("{}{}", indent(1), report.order.card_back.display()));

    lines.push(String::new());
    let destination = match &report.manifest_path {
        Some(path) => format!(" → {}", path.display()),
        None => " (check only, nothing written)".to_string(),
    };
    lines.push(format!(
        "Order: {} cards, bracket {}{destination}",
        report.order.total, report.order.bracket
    ));
    if report.write_failures > 0 {
        lines.push(format!(
            "Warning: {} manifest lines failed to write",
            report.write_failures
        ));
    }
    if report.unreadable_entries > 0 {
        lines.push(format!(
            "Warning: {} directory entries could not be read",
            report.unreadable_entries
        ));
    }
    lines
}

pub fn print_generate_output(report: &GenerateReport) {
    for line in format_generate_output(report) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::Dimensions;
    use crate::manifest::Order;
    use crate::test_helpers::candidate;
    use std::path::PathBuf;

    fn report(cards: Vec<ProcessedCard>, skipped: Vec<SkippedFile>) -> GenerateReport {
        let candidates: Vec<_> = cards.iter().map(|c| c.candidate.clone()).collect();
        GenerateReport {
            order: Order::build(&candidates, PathBuf::from("/cards/back.png")).unwrap(),
            cards,
            skipped,
            config_warnings: vec![],
            unreadable_entries: 0,
            manifest_path: Some(PathBuf::from("/out/cards.xml")),
            write_failures: 0,
        }
    }

    fn processed(path: &str, quantity: u32, border: BorderStatus) -> ProcessedCard {
        ProcessedCard {
            candidate: candidate(path, quantity),
            border,
        }
    }

    #[test]
    fn format_index_pads_to_three() {
        assert_eq!(format_index(1), "001");
        assert_eq!(format_index(42), "042");
        assert_eq!(format_index(1000), "1000");
    }

    #[test]
    fn full_run_output() {
        let mut hero = processed(
            "/cards/hero.png",
            3,
            BorderStatus::Padded {
                from: Dimensions {
                    width: 1500,
                    height: 2100,
                },
                to: Dimensions {
                    width: 1644,
                    height: 2244,
                },
            },
        );
        hero.candidate.quantity_source = QuantitySource::Stem;
        let villain = processed("/cards/villain.png", 1, BorderStatus::Untouched);
        let skipped = vec![
            SkippedFile {
                path: PathBuf::from("/cards/notes.txt"),
                reason: SkipReason::UnsupportedExtension("txt".into()),
            },
            SkippedFile {
                path: PathBuf::from("/cards/back.png"),
                reason: SkipReason::CardBack,
            },
        ];

        let lines = format_generate_output(&report(vec![hero, villain], skipped));
        assert_eq!(
            lines,
            vec![
                "Cards",
                "001 hero.png ×3 → slots 0-2",
                "    Quantity: config (hero)",
                "    Border: 1500x2100 → 1644x2244",
                "002 villain.png ×1 → slot 3",
                "",
                "Skipped",
                "    notes.txt (not a picture file)",
                "",
                "Card back",
                "    /cards/back.png",
                "",
                "Order: 4 cards, bracket 18 → /out/cards.xml",
            ]
        );
    }

    #[test]
    fn invalid_quantity_and_failed_border_are_shown() {
        let mut card = processed(
            "/cards/hero.png",
            1,
            BorderStatus::Failed("Failed to decode".into()),
        );
        card.candidate.quantity_source = QuantitySource::Invalid("lots".into());

        let lines = format_generate_output(&report(vec![card], vec![]));
        assert!(lines.contains(&"    Quantity: invalid value \"lots\", using 1".to_string()));
        assert!(lines.contains(&"    Border failed: Failed to decode".to_string()));
    }

    #[test]
    fn check_mode_says_nothing_written() {
        let mut r = report(vec![processed("/cards/a.png", 2, BorderStatus::Skipped)], vec![]);
        r.manifest_path = None;

        let lines = format_generate_output(&r);
        assert_eq!(
            lines.last().unwrap(),
            "Order: 2 cards, bracket 18 (check only, nothing written)"
        );
    }

    #[test]
    fn config_warnings_are_listed() {
        let mut r = report(vec![processed("/cards/a.png", 1, BorderStatus::Untouched)], vec![]);
        r.config_warnings = vec![ConfigWarning {
            line_number: 4,
            line: "oops".into(),
        }];

        let lines = format_generate_output(&r);
        let at = lines.iter().position(|l| l == "Config warnings").unwrap();
        assert_eq!(lines[at + 1], "    line 4: oops");
    }
}
