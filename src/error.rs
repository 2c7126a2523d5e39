//! Error types for Markdown conversion.

/// Error raised while converting a Markdown document to HTML.
///
/// Every variant is fatal: conversion aborts and no partial tree is returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConvertError {
    /// A bold, italic or code delimiter appears an odd number of times in one text run.
    #[error("unbalanced `{delimiter}` delimiter in text: {text:?}")]
    UnbalancedDelimiter {
        /// The delimiter being split on (`**`, `*` or `` ` ``).
        delimiter: &'static str,
        /// The text run that failed to split.
        text: String,
    },

    /// Title extraction found no heading line.
    #[error("document has no heading to use as a title")]
    MissingTitle,

    /// A tagged leaf was built with an unusable tag name.
    #[error("invalid leaf node tag {tag:?}")]
    InvalidLeaf {
        /// The rejected tag.
        tag: String,
    },

    /// A container was built without a usable tag or without children.
    #[error("invalid container node <{tag}>: {reason}")]
    InvalidContainer {
        /// The container's tag.
        tag: String,
        /// What was wrong with it.
        reason: &'static str,
    },
}
