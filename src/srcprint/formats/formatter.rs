//! The token formatter abstraction
//!
//! A formatter turns one token into output text in three steps:
//!
//! 1. the token text is run through the formatter's [EncodingTable], giving an encoded copy
//!    of the token (the original is left alone)
//! 2. the handler registered for the token's kind, if any, renders the encoded copy
//! 3. otherwise [Formatter::default_render] renders it
//!
//! Handlers are keyed by [TokenKind] and stored in a [Handlers] map. A kind with no handler is
//! not an error; it silently falls through to the default renderer. New formatters get their
//! own behaviour by composing a handler map (optionally merged over another formatter's map)
//! rather than by editing a shared dispatch table.

use super::encoding::EncodingTable;
use crate::srcprint::token::{Token, TokenKind};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// A rendering function for one token kind
pub type Handler = Arc<dyn Fn(&Token) -> String + Send + Sync>;

/// Per-kind handler registry
#[derive(Clone, Default)]
pub struct Handlers {
    by_kind: HashMap<TokenKind, Handler>,
}

impl Handlers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style registration
    pub fn with<F>(mut self, kind: TokenKind, handler: F) -> Self
    where
        F: Fn(&Token) -> String + Send + Sync + 'static,
    {
        self.register(kind, handler);
        self
    }

    /// Register a handler, replacing any existing one for `kind`
    pub fn register<F>(&mut self, kind: TokenKind, handler: F)
    where
        F: Fn(&Token) -> String + Send + Sync + 'static,
    {
        self.by_kind.insert(kind, Arc::new(handler));
    }

    pub fn get(&self, kind: TokenKind) -> Option<&Handler> {
        self.by_kind.get(&kind)
    }

    pub fn has(&self, kind: TokenKind) -> bool {
        self.by_kind.contains_key(&kind)
    }

    /// Layer `other` on top of this map; its entries win
    pub fn merge(mut self, other: &Handlers) -> Self {
        for (kind, handler) in &other.by_kind {
            self.by_kind.insert(*kind, Arc::clone(handler));
        }
        self
    }

    pub fn len(&self) -> usize {
        self.by_kind.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_kind.is_empty()
    }
}

impl fmt::Debug for Handlers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut kinds: Vec<_> = self.by_kind.keys().map(TokenKind::name).collect();
        kinds.sort_unstable();
        f.debug_struct("Handlers").field("kinds", &kinds).finish()
    }
}

/// Trait for token formatters
///
/// Implementors supply an encoding table and a handler map; encoding, dispatch and the
/// fallback come for free. Override [Formatter::default_render] to change how tokens without
/// a handler look.
pub trait Formatter: Send + Sync {
    /// The name of this format (e.g., "tag", "latex")
    fn name(&self) -> &str;

    /// Optional description of this format
    fn description(&self) -> &str {
        ""
    }

    fn encodings(&self) -> &EncodingTable;

    fn handlers(&self) -> &Handlers;

    /// Apply the encoding table to `text`
    fn encode(&self, text: &str) -> String {
        self.encodings().encode(text)
    }

    /// Render a token that has no registered handler
    fn default_render(&self, token: &Token) -> String {
        token.text().to_string()
    }

    /// Render a token: encode its text, then dispatch on its kind
    fn format(&self, token: &Token) -> String {
        let encoded = token.with_text(self.encode(token.text()));
        match self.handlers().get(encoded.kind()) {
            Some(handler) => handler(&encoded),
            None => self.default_render(&encoded),
        }
    }
}

/// The base strategy: no encoding, no handlers, identity rendering
#[derive(Debug, Clone, Default)]
pub struct PlainFormatter {
    encodings: EncodingTable,
    handlers: Handlers,
}

impl PlainFormatter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Formatter for PlainFormatter {
    fn name(&self) -> &str {
        "plain"
    }

    fn description(&self) -> &str {
        "Source text reproduced unchanged"
    }

    fn encodings(&self) -> &EncodingTable {
        &self.encodings
    }

    fn handlers(&self) -> &Handlers {
        &self.handlers
    }
}

/// A formatter assembled at runtime from parts
///
/// Useful for one-off output styles that don't warrant a type of their own: start from another
/// formatter's table and handlers, then register more on top.
#[derive(Clone)]
pub struct CustomFormatter {
    name: String,
    description: String,
    encodings: EncodingTable,
    handlers: Handlers,
    fallback: Option<Handler>,
}

impl CustomFormatter {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            encodings: EncodingTable::new(),
            handlers: Handlers::new(),
            fallback: None,
        }
    }

    /// Start from the encoding table and handlers of an existing formatter
    pub fn extending(name: impl Into<String>, base: &dyn Formatter) -> Self {
        Self {
            encodings: base.encodings().clone(),
            handlers: base.handlers().clone(),
            ..Self::new(name)
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_encodings(mut self, encodings: EncodingTable) -> Self {
        self.encodings = encodings;
        self
    }

    /// Merge `handlers` over the current ones
    pub fn with_handlers(mut self, handlers: &Handlers) -> Self {
        self.handlers = self.handlers.merge(handlers);
        self
    }

    pub fn with_handler<F>(mut self, kind: TokenKind, handler: F) -> Self
    where
        F: Fn(&Token) -> String + Send + Sync + 'static,
    {
        self.handlers.register(kind, handler);
        self
    }

    /// Replace the identity default renderer
    pub fn with_default<F>(mut self, render: F) -> Self
    where
        F: Fn(&Token) -> String + Send + Sync + 'static,
    {
        self.fallback = Some(Arc::new(render));
        self
    }
}

impl fmt::Debug for CustomFormatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomFormatter")
            .field("name", &self.name)
            .field("encodings", &self.encodings.len())
            .field("handlers", &self.handlers)
            .field("custom_default", &self.fallback.is_some())
            .finish()
    }
}

impl Formatter for CustomFormatter {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn encodings(&self) -> &EncodingTable {
        &self.encodings
    }

    fn handlers(&self) -> &Handlers {
        &self.handlers
    }

    fn default_render(&self, token: &Token) -> String {
        match &self.fallback {
            Some(render) => render(token),
            None => token.text().to_string(),
        }
    }
}
