use std::sync::LazyLock;

use regex::Regex;

use crate::block::{Block, BlockKind, TextSpan};
use crate::error::ConvertError;
use crate::inline::text_to_spans;
use crate::node::HtmlNode;

/// Leading list marker: `-`, `*`, `+` or `N.` followed by whitespace.
static LIST_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+\.|-|\*|\+)\s+").unwrap());

/// Tag of the node wrapping the whole document.
const ROOT_TAG: &str = "div";

/// Convert blocks to a single `div` wrapping one node per block
pub fn blocks_to_html_node(blocks: &[Block]) -> Result<HtmlNode, ConvertError> {
    let children = blocks
        .iter()
        .map(block_to_html_node)
        .collect::<Result<Vec<_>, _>>()?;
    HtmlNode::container(ROOT_TAG, children)
}

fn block_to_html_node(block: &Block) -> Result<HtmlNode, ConvertError> {
    let text = block.text.as_str();
    match block.kind {
        BlockKind::Paragraph => HtmlNode::container("p", text_to_children(text)?),
        BlockKind::Heading => {
            let level = heading_level(text);
            let content = text.trim_start_matches('#').trim();
            HtmlNode::container(&format!("h{level}"), text_to_children(content)?)
        }
        BlockKind::CodeFence => {
            // Fenced content is emitted as-is: no inline formatting inside code.
            let content = text.trim_matches('`').trim_matches('\n');
            let code = HtmlNode::container("code", vec![HtmlNode::text(content)])?;
            HtmlNode::container("pre", vec![code])
        }
        BlockKind::Quote => {
            let content = text.trim_start_matches(['>', ' ']).trim();
            HtmlNode::container("blockquote", text_to_children(content)?)
        }
        BlockKind::UnorderedList => list_to_html_node("ul", text),
        BlockKind::OrderedList => list_to_html_node("ol", text),
    }
}

fn list_to_html_node(tag: &str, text: &str) -> Result<HtmlNode, ConvertError> {
    let items = text
        .lines()
        .map(|line| {
            let item = LIST_MARKER.replace(line, "");
            HtmlNode::container("li", text_to_children(item.trim())?)
        })
        .collect::<Result<Vec<_>, _>>()?;
    HtmlNode::container(tag, items)
}

/// Number of consecutive leading `#` characters.
pub fn heading_level(text: &str) -> usize {
    text.chars().take_while(|&c| c == '#').count()
}

fn text_to_children(text: &str) -> Result<Vec<HtmlNode>, ConvertError> {
    text_to_spans(text)?
        .into_iter()
        .map(text_span_to_html_node)
        .collect()
}

/// Map one inline span to its HTML node.
pub fn text_span_to_html_node(span: TextSpan) -> Result<HtmlNode, ConvertError> {
    match span {
        TextSpan::Plain(text) => Ok(HtmlNode::text(text)),
        TextSpan::Bold(text) => HtmlNode::leaf("b", text),
        TextSpan::Italic(text) => HtmlNode::leaf("i", text),
        TextSpan::Code(text) => HtmlNode::leaf("code", text),
        TextSpan::Link { text, url } => Ok(HtmlNode::leaf("a", text)?.with_attribute("href", url)),
        TextSpan::Image { alt, url } => Ok(HtmlNode::leaf("img", "")?
            .with_attribute("src", url)
            .with_attribute("alt", alt)),
    }
}
