mod block;
mod config;
mod error;
mod html;
mod inline;
mod node;
mod parser;
pub mod site;

pub use block::{Block, BlockKind, TextSpan};
pub use config::{BuildConfig, Config, PathsConfig};
pub use error::ConvertError;
pub use html::{heading_level, text_span_to_html_node};
pub use inline::{
    extract_markdown_images, extract_markdown_links, split_spans_delimiter, split_spans_image,
    split_spans_link, text_to_spans,
};
pub use node::{Attributes, HtmlNode, escape_attribute, escape_text};
pub use parser::{block_to_block_kind, markdown_to_blocks};

/// Parse markdown text into a vector of classified blocks.
pub fn parse(markdown: &str) -> Vec<Block> {
    parser::parse(markdown)
}

/// Convert markdown to a tree rooted at a `div` container.
pub fn markdown_to_html_node(markdown: &str) -> Result<HtmlNode, ConvertError> {
    let blocks = parse(markdown);
    tracing::debug!(blocks = blocks.len(), "Parsed markdown blocks");
    html::blocks_to_html_node(&blocks)
}

/// Convert markdown to an HTML fragment.
pub fn markdown_to_html(markdown: &str) -> Result<String, ConvertError> {
    markdown_to_html_node(markdown).map(|root| root.to_html())
}

/// Text of the first line starting with `#`, without the hashes.
pub fn extract_title(markdown: &str) -> Result<String, ConvertError> {
    markdown
        .lines()
        .find(|line| line.starts_with('#'))
        .map(|line| line.trim_start_matches('#').trim().to_owned())
        .ok_or(ConvertError::MissingTitle)
}
