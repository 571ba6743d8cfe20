//! Line-oriented codec for the dated block logs.
//!
//! ```text
//! log     := (blank | block | stray)*
//! block   := header body* footer?
//! header  := "--- " label " ---"
//! footer  := "-"{3,}
//! ```
//!
//! Lines are compared after trimming. A block that is still open when the next header or the end of
//! input shows up is closed there, which covers writes cut off by a crash.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::utils::time::{format_date, parse_date};

const HEADER_MARK: &str = "---";

/// Footer written after every block.
pub const FOOTER: &str = "----------------------";

/// One dated group of lines in a goal or completion log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub label: String,
    pub lines: Vec<String>,
}

impl Block {
    pub fn new(date: NaiveDate, lines: Vec<String>) -> Self {
        Self {
            label: format_date(date),
            lines,
        }
    }

    /// Date of the block, if the label is one.
    pub fn date(&self) -> Option<NaiveDate> {
        parse_date(&self.label).ok()
    }

    pub fn is_dated(&self, date: NaiveDate) -> bool {
        self.label == format_date(date)
    }

    /// Serializes the block in the on-disk format. Every block starts with an empty line so
    /// appending never glues a header to a previous unterminated line.
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push('\n');
        out.push_str(&header_line(&self.label));
        out.push('\n');
        for line in &self.lines {
            out.push_str(line);
            out.push('\n');
        }
        out.push_str(FOOTER);
        out.push('\n');
        out
    }
}

pub fn header_line(label: &str) -> String {
    format!("{HEADER_MARK} {label} {HEADER_MARK}")
}

#[derive(Debug, PartialEq, Eq)]
enum Line<'a> {
    Blank,
    Header(&'a str),
    Footer,
    Body(&'a str),
}

fn classify(line: &str) -> Line<'_> {
    let line = line.trim();
    if line.is_empty() {
        return Line::Blank;
    }
    if let Some(label) = line
        .strip_prefix(HEADER_MARK)
        .and_then(|rest| rest.strip_prefix(' '))
        .and_then(|rest| rest.strip_suffix(HEADER_MARK))
        .and_then(|rest| rest.strip_suffix(' '))
    {
        return Line::Header(label.trim());
    }
    if line.len() >= HEADER_MARK.len() && line.chars().all(|c| c == '-') {
        return Line::Footer;
    }
    Line::Body(line)
}

/// Parses a whole log into blocks, in file order. Lines that belong to no block are skipped.
pub fn parse_blocks(text: &str) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut current: Option<Block> = None;

    for (index, raw) in text.lines().enumerate() {
        match classify(raw) {
            Line::Blank => {}
            Line::Header(label) => {
                if let Some(open) = current.take() {
                    warn!(
                        "Block {:?} has no footer before line {}, closing it",
                        open.label,
                        index + 1
                    );
                    blocks.push(open);
                }
                current = Some(Block {
                    label: label.to_owned(),
                    lines: Vec::new(),
                });
            }
            Line::Footer => match current.take() {
                Some(block) => blocks.push(block),
                None => debug!("Footer without a header at line {}", index + 1),
            },
            Line::Body(line) => match current.as_mut() {
                Some(block) => block.lines.push(line.to_owned()),
                None => warn!("Skipping line {} outside any block: {line:?}", index + 1),
            },
        }
    }

    if let Some(open) = current {
        warn!("Block {:?} is unterminated at end of log", open.label);
        blocks.push(open);
    }

    blocks
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::{classify, parse_blocks, Block, Line, FOOTER};
    use crate::utils::logging::TEST_LOGGING;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, d).unwrap()
    }

    #[test]
    fn test_classify() {
        assert_eq!(classify("--- 2024-05-01 ---"), Line::Header("2024-05-01"));
        assert_eq!(classify("  --- 2024-05-01 ---\n"), Line::Header("2024-05-01"));
        assert_eq!(classify(FOOTER), Line::Footer);
        assert_eq!(classify("---"), Line::Footer);
        assert_eq!(classify("--"), Line::Body("--"));
        assert_eq!(classify("   "), Line::Blank);
        assert_eq!(classify("Goal 1: Read"), Line::Body("Goal 1: Read"));
    }

    #[test]
    fn test_render_layout() {
        let block = Block::new(day(1), vec!["Goal 1: Read".into(), "Goal 2: Run".into()]);
        assert_eq!(
            block.render(),
            "\n--- 2024-05-01 ---\nGoal 1: Read\nGoal 2: Run\n----------------------\n"
        );
    }

    #[test]
    fn test_parse_appended_log() {
        let first = Block::new(day(1), vec!["Goal 1: Read".into()]);
        let second = Block::new(day(2), vec!["Goal 1: Run".into(), "Goal 2: Cook".into()]);
        let log = first.render() + &second.render();

        assert_eq!(parse_blocks(&log), vec![first, second]);
    }

    #[test]
    fn test_parse_single_goal_block_keeps_label() {
        let log = "\n--- 2024-05-03 ---\nGoal 1: Only one\n----------------------\n";
        let blocks = parse_blocks(log);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].label, "2024-05-03");
        assert_eq!(blocks[0].date(), Some(day(3)));
        assert_eq!(blocks[0].lines, vec!["Goal 1: Only one"]);
    }

    #[test]
    fn test_parse_recovers_from_truncation_and_strays() {
        *TEST_LOGGING;
        let log = "stray line\n\
                   ----------\n\
                   --- 2024-05-01 ---\n\
                   Goal 1: Cut off\n\
                   --- 2024-05-02 ---\n\
                   Goal 1: Fine\n\
                   ----------------------\n\
                   after footer\n\
                   --- 2024-05-03 ---\n\
                   Goal 1: Unterminated";
        let blocks = parse_blocks(log);

        assert_eq!(blocks.len(), 3);
        assert_eq!(blocks[0].lines, vec!["Goal 1: Cut off"]);
        assert_eq!(blocks[1].lines, vec!["Goal 1: Fine"]);
        assert_eq!(blocks[2].label, "2024-05-03");
        assert_eq!(blocks[2].lines, vec!["Goal 1: Unterminated"]);
    }

    #[test]
    fn test_parse_empty() {
        assert!(parse_blocks("").is_empty());
        assert!(parse_blocks("\n\n").is_empty());
    }

    #[test]
    fn test_undated_label() {
        let blocks = parse_blocks("--- someday ---\nGoal 1: x\n---\n");
        assert_eq!(blocks[0].label, "someday");
        assert_eq!(blocks[0].date(), None);
        assert!(!blocks[0].is_dated(day(1)));
    }
}
