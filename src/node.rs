//! Generic HTML render tree.
//!
//! A node is either a leaf holding scalar text or a container holding an
//! ordered, non-empty list of children. Both carry attributes that render in
//! insertion order.

use std::borrow::Cow;

use crate::error::ConvertError;

/// Ordered `name="value"` pairs.
pub type Attributes = Vec<(String, String)>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HtmlNode {
    /// Scalar text, optionally wrapped in a tag. Untagged leaves render bare.
    Leaf {
        tag: Option<String>,
        value: String,
        attributes: Attributes,
    },
    /// A tag wrapping one or more child nodes.
    Container {
        tag: String,
        children: Vec<HtmlNode>,
        attributes: Attributes,
    },
}

impl HtmlNode {
    /// Untagged text leaf.
    pub fn text(value: impl Into<String>) -> Self {
        HtmlNode::Leaf {
            tag: None,
            value: value.into(),
            attributes: Vec::new(),
        }
    }

    /// Tagged leaf such as `<b>value</b>`.
    pub fn leaf(tag: &str, value: impl Into<String>) -> Result<Self, ConvertError> {
        if !is_valid_tag(tag) {
            return Err(ConvertError::InvalidLeaf {
                tag: tag.to_owned(),
            });
        }
        Ok(HtmlNode::Leaf {
            tag: Some(tag.to_owned()),
            value: value.into(),
            attributes: Vec::new(),
        })
    }

    /// Container wrapping `children`, which must not be empty.
    pub fn container(tag: &str, children: Vec<HtmlNode>) -> Result<Self, ConvertError> {
        if !is_valid_tag(tag) {
            return Err(ConvertError::InvalidContainer {
                tag: tag.to_owned(),
                reason: "tag is not a valid element name",
            });
        }
        if children.is_empty() {
            return Err(ConvertError::InvalidContainer {
                tag: tag.to_owned(),
                reason: "container has no children",
            });
        }
        Ok(HtmlNode::Container {
            tag: tag.to_owned(),
            children,
            attributes: Vec::new(),
        })
    }

    /// Append an attribute after any existing ones.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        match &mut self {
            HtmlNode::Leaf { attributes, .. } | HtmlNode::Container { attributes, .. } => {
                attributes.push((name.into(), value.into()));
            }
        }
        self
    }

    pub fn tag(&self) -> Option<&str> {
        match self {
            HtmlNode::Leaf { tag, .. } => tag.as_deref(),
            HtmlNode::Container { tag, .. } => Some(tag.as_str()),
        }
    }

    pub fn value(&self) -> Option<&str> {
        match self {
            HtmlNode::Leaf { value, .. } => Some(value.as_str()),
            HtmlNode::Container { .. } => None,
        }
    }

    pub fn children(&self) -> &[HtmlNode] {
        match self {
            HtmlNode::Leaf { .. } => &[],
            HtmlNode::Container { children, .. } => children,
        }
    }

    pub fn attributes(&self) -> &[(String, String)] {
        match self {
            HtmlNode::Leaf { attributes, .. } | HtmlNode::Container { attributes, .. } => {
                attributes
            }
        }
    }

    /// Serialize the tree to markup.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.render(&mut out);
        out
    }

    fn render(&self, out: &mut String) {
        match self {
            HtmlNode::Leaf {
                tag: None, value, ..
            } => out.push_str(&escape_text(value)),
            HtmlNode::Leaf {
                tag: Some(tag),
                value,
                attributes,
            } => {
                open_tag(tag, attributes, out);
                out.push_str(&escape_text(value));
                close_tag(tag, out);
            }
            HtmlNode::Container {
                tag,
                children,
                attributes,
            } => {
                open_tag(tag, attributes, out);
                for child in children {
                    child.render(out);
                }
                close_tag(tag, out);
            }
        }
    }
}

fn open_tag(tag: &str, attributes: &[(String, String)], out: &mut String) {
    out.push('<');
    out.push_str(tag);
    for (name, value) in attributes {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        out.push_str(&escape_attribute(value));
        out.push('"');
    }
    out.push('>');
}

fn close_tag(tag: &str, out: &mut String) {
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}

fn is_valid_tag(tag: &str) -> bool {
    let mut chars = tag.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '-')
}

/// Escape `& < > "` for text content.
pub fn escape_text(text: &str) -> Cow<'_, str> {
    escape(text, |c| matches!(c, '&' | '<' | '>' | '"'))
}

/// Escape `&` and `"` for a double-quoted attribute value.
pub fn escape_attribute(value: &str) -> Cow<'_, str> {
    escape(value, |c| matches!(c, '&' | '"'))
}

fn escape(text: &str, reserved: impl Fn(char) -> bool) -> Cow<'_, str> {
    if !text.chars().any(&reserved) {
        return Cow::Borrowed(text);
    }

    let mut result = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        match c {
            '&' if reserved(c) => result.push_str("&amp;"),
            '<' if reserved(c) => result.push_str("&lt;"),
            '>' if reserved(c) => result.push_str("&gt;"),
            '"' if reserved(c) => result.push_str("&quot;"),
            _ => result.push(c),
        }
    }
    Cow::Owned(result)
}
