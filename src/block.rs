/// Inline text spans produced by the tokenizer.
///
/// Link and image spans are the only ones that carry a destination URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextSpan {
    Plain(String),
    Bold(String),
    Italic(String),
    Code(String),
    Link { text: String, url: String },
    Image { alt: String, url: String },
}

impl TextSpan {
    /// Display text of the span (alt text for images).
    pub fn content(&self) -> &str {
        match self {
            TextSpan::Plain(text)
            | TextSpan::Bold(text)
            | TextSpan::Italic(text)
            | TextSpan::Code(text) => text,
            TextSpan::Link { text, .. } => text,
            TextSpan::Image { alt, .. } => alt,
        }
    }

    /// URL of a link or image span.
    pub fn destination(&self) -> Option<&str> {
        match self {
            TextSpan::Link { url, .. } | TextSpan::Image { url, .. } => Some(url.as_str()),
            TextSpan::Plain(_) | TextSpan::Bold(_) | TextSpan::Italic(_) | TextSpan::Code(_) => {
                None
            }
        }
    }

    pub fn is_plain(&self) -> bool {
        matches!(self, TextSpan::Plain(_))
    }
}

/// Block-level kinds recognised by the classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Heading,
    CodeFence,
    Quote,
    UnorderedList,
    OrderedList,
    Paragraph,
}

/// A trimmed run of document text between blank lines, with its kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub text: String,
    pub kind: BlockKind,
}
