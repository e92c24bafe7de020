//! Output format implementations for token rendering
//!
//! This module contains the formatter abstraction and the built-in formats:
//! - plain: the source reproduced as-is
//! - tag: `[kind]text` tags, useful for inspecting the token stream
//! - latex: typeset body text
//!
//! Formats are looked up by name through the [FormatRegistry].

pub mod encoding;
pub mod formatter;
pub mod latex;
pub mod registry;
pub mod tag;

pub use encoding::EncodingTable;
pub use formatter::{CustomFormatter, Formatter, Handler, Handlers, PlainFormatter};
pub use latex::LatexFormatter;
pub use registry::{FormatError, FormatRegistry};
pub use tag::{render_tag, TagFormatter};
