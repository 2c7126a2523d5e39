//! Inline tokenizer: splits a run of text into typed spans.
//!
//! A run starts as one plain span and goes through five passes in a fixed
//! order: images, links, `**`, `*`, then `` ` ``. Each pass only touches spans
//! that are still plain.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::block::TextSpan;
use crate::error::ConvertError;

static IMAGE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[(.*?)\]\((.*?)\)").unwrap());

static LINK_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[(.*?)\]\((.*?)\)").unwrap());

/// Inline delimiters and the span each one produces, in pass order.
///
/// `**` must run before `*`, or the single-asterisk pass would eat half of
/// every bold marker.
const DELIMITERS: [(&str, fn(String) -> TextSpan); 3] = [
    ("**", TextSpan::Bold),
    ("*", TextSpan::Italic),
    ("`", TextSpan::Code),
];

/// Tokenize a run of text into spans.
///
/// An empty run yields no spans.
pub fn text_to_spans(text: &str) -> Result<Vec<TextSpan>, ConvertError> {
    if text.is_empty() {
        return Ok(Vec::new());
    }

    let mut spans = vec![TextSpan::Plain(text.to_owned())];
    spans = split_spans_image(spans);
    spans = split_spans_link(spans);
    for (delimiter, kind) in DELIMITERS {
        spans = split_spans_delimiter(spans, delimiter, kind)?;
    }
    Ok(spans)
}

/// All `![alt](url)` occurrences, left to right.
pub fn extract_markdown_images(text: &str) -> Vec<(String, String)> {
    extract_pairs(&IMAGE_PATTERN, text)
}

/// All `[text](url)` occurrences, left to right.
///
/// This also matches the bracketed part of an image; callers that need to
/// tell them apart should extract images first.
pub fn extract_markdown_links(text: &str) -> Vec<(String, String)> {
    extract_pairs(&LINK_PATTERN, text)
}

fn extract_pairs(pattern: &Regex, text: &str) -> Vec<(String, String)> {
    pattern
        .captures_iter(text)
        .map(|caps| (caps[1].to_owned(), caps[2].to_owned()))
        .collect()
}

/// Pull images out of plain spans.
pub fn split_spans_image(spans: Vec<TextSpan>) -> Vec<TextSpan> {
    split_spans_pattern(spans, &IMAGE_PATTERN, |caps| TextSpan::Image {
        alt: caps[1].to_owned(),
        url: caps[2].to_owned(),
    })
}

/// Pull links out of plain spans.
pub fn split_spans_link(spans: Vec<TextSpan>) -> Vec<TextSpan> {
    split_spans_pattern(spans, &LINK_PATTERN, |caps| TextSpan::Link {
        text: caps[1].to_owned(),
        url: caps[2].to_owned(),
    })
}

fn split_spans_pattern(
    spans: Vec<TextSpan>,
    pattern: &Regex,
    make_span: impl Fn(&Captures<'_>) -> TextSpan,
) -> Vec<TextSpan> {
    let mut out = Vec::with_capacity(spans.len());

    for span in spans {
        let TextSpan::Plain(text) = span else {
            out.push(span);
            continue;
        };

        let mut rest = 0;
        for caps in pattern.captures_iter(&text) {
            let Some(whole) = caps.get(0) else {
                continue;
            };
            push_plain(&mut out, &text[rest..whole.start()]);
            out.push(make_span(&caps));
            rest = whole.end();
        }

        if rest == 0 {
            out.push(TextSpan::Plain(text));
        } else {
            push_plain(&mut out, &text[rest..]);
        }
    }

    out
}

/// Split plain spans on a literal delimiter.
///
/// Pieces at odd positions become `kind` spans; empty pieces are dropped. An
/// odd number of delimiters in any plain span is an error.
pub fn split_spans_delimiter(
    spans: Vec<TextSpan>,
    delimiter: &'static str,
    kind: fn(String) -> TextSpan,
) -> Result<Vec<TextSpan>, ConvertError> {
    let mut out = Vec::with_capacity(spans.len());

    for span in spans {
        let TextSpan::Plain(text) = span else {
            out.push(span);
            continue;
        };

        let pieces: Vec<&str> = text.split(delimiter).collect();
        if pieces.len() % 2 == 0 {
            return Err(ConvertError::UnbalancedDelimiter {
                delimiter,
                text,
            });
        }

        for (idx, piece) in pieces.into_iter().enumerate() {
            if piece.is_empty() {
                continue;
            }
            if idx % 2 == 0 {
                out.push(TextSpan::Plain(piece.to_owned()));
            } else {
                out.push(kind(piece.to_owned()));
            }
        }
    }

    Ok(out)
}

fn push_plain(out: &mut Vec<TextSpan>, text: &str) {
    if !text.is_empty() {
        out.push(TextSpan::Plain(text.to_owned()));
    }
}
