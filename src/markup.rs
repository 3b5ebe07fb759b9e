//! Line-oriented markup interpretation for LLM answers.
//!
//! Pure presentation logic: classifies each line of free text into a tagged
//! block (heading, list item, paragraph) for a renderer to style. Has no
//! dependency on the aggregation core.

/// One displayable block derived from a line of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// Heading with level 1-3.
    Heading { level: u8, text: String },
    /// Bullet list item (marker stripped).
    ListItem(String),
    /// Plain paragraph line.
    Paragraph(String),
}

/// Classify text into display blocks, line by line.
///
/// `#`, `##`, and `###` prefixes become headings, `- ` and `* ` prefixes
/// become list items, any other non-blank line is a paragraph, and blank
/// lines are skipped.
pub fn parse_blocks(text: &str) -> Vec<Block> {
    text.lines().filter_map(parse_line).collect()
}

fn parse_line(line: &str) -> Option<Block> {
    if let Some(rest) = line.strip_prefix("### ") {
        return Some(Block::Heading {
            level: 3,
            text: rest.to_string(),
        });
    }
    if let Some(rest) = line.strip_prefix("## ") {
        return Some(Block::Heading {
            level: 2,
            text: rest.to_string(),
        });
    }
    if let Some(rest) = line.strip_prefix("# ") {
        return Some(Block::Heading {
            level: 1,
            text: rest.to_string(),
        });
    }
    if let Some(rest) = line.strip_prefix("- ").or_else(|| line.strip_prefix("* ")) {
        return Some(Block::ListItem(rest.to_string()));
    }
    if line.trim().is_empty() {
        return None;
    }
    Some(Block::Paragraph(line.to_string()))
}
