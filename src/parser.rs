use std::sync::LazyLock;

use regex::Regex;

use crate::block::{Block, BlockKind};

/// Two or more consecutive line breaks, `\n` and `\r\n` alike.
static BLANK_LINES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:\r?\n){2,}").unwrap());

const FENCE: &str = "```";

/// Parse markdown text into a list of classified blocks
pub fn parse(markdown: &str) -> Vec<Block> {
    markdown_to_blocks(markdown)
        .into_iter()
        .map(|text| {
            let kind = block_to_block_kind(&text);
            Block { text, kind }
        })
        .collect()
}

/// Split a document into trimmed, non-empty blocks on blank-line boundaries.
pub fn markdown_to_blocks(markdown: &str) -> Vec<String> {
    BLANK_LINES
        .split(markdown)
        .map(str::trim)
        .filter(|block| !block.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Classify a single trimmed block by its leading (and for fences, trailing) characters.
///
/// Only the start of the block is inspected for lists and quotes, so a block
/// such as `"* item\nrandom text"` is still an unordered list.
pub fn block_to_block_kind(block: &str) -> BlockKind {
    if block.starts_with('#') {
        BlockKind::Heading
    } else if block.starts_with(FENCE) && block.ends_with(FENCE) {
        BlockKind::CodeFence
    } else if block.starts_with('>') {
        BlockKind::Quote
    } else if block.starts_with("* ") || block.starts_with("- ") {
        BlockKind::UnorderedList
    } else if block.starts_with("1.") {
        BlockKind::OrderedList
    } else {
        BlockKind::Paragraph
    }
}
