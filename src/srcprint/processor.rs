//! Processing API: pick an output by name and run it
//!
//! A format string names either a formatter in the [FormatRegistry] (the output is the
//! pretty-printed source) or one of the token dumps, which serialize the raw token stream:
//!
//! - `token-json`: pretty-printed JSON array of tokens
//! - `token-yaml`: YAML sequence of tokens
//!
//! ```text
//! let out = process_str("x = 1\n", "tag", &ScannerOptions::default(), &FormatRegistry::default())?;
//! ```

use crate::srcprint::formats::{FormatError, FormatRegistry};
use crate::srcprint::lexer::{ScannerOptions, TokenizeError, Tokenizer};
use crate::srcprint::printer::{PrintError, Printer};
use crate::srcprint::token::Token;
use std::io::{BufRead, Write};
use thiserror::Error;

/// Represents the output format
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputFormat {
    /// Pretty-print through the named formatter
    Pretty(String),
    TokenJson,
    TokenYaml,
}

impl OutputFormat {
    /// Names of the token dump formats
    pub const TOKEN_FORMATS: [&'static str; 2] = ["token-json", "token-yaml"];

    /// Parse a format string like "tag" or "token-json"
    pub fn from_string(format_str: &str, registry: &FormatRegistry) -> Result<Self, ProcessingError> {
        let format = match format_str {
            "token-json" => OutputFormat::TokenJson,
            "token-yaml" => OutputFormat::TokenYaml,
            name if registry.has(name) => OutputFormat::Pretty(name.to_string()),
            other => return Err(ProcessingError::UnknownFormat(other.to_string())),
        };
        tracing::debug!(format = format_str, "resolved output format");
        Ok(format)
    }
}

/// Get all available format strings (sorted)
pub fn available_formats(registry: &FormatRegistry) -> Vec<String> {
    let mut formats = registry.list_formats();
    formats.extend(OutputFormat::TOKEN_FORMATS.iter().map(|s| s.to_string()));
    formats.sort();
    formats
}

/// Errors that can occur during processing
#[derive(Error, Debug)]
pub enum ProcessingError {
    #[error("Unknown format: {0}")]
    UnknownFormat(String),

    #[error(transparent)]
    Format(#[from] FormatError),

    #[error(transparent)]
    Print(#[from] PrintError),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<TokenizeError> for ProcessingError {
    fn from(err: TokenizeError) -> Self {
        ProcessingError::Print(PrintError::Tokenize(err))
    }
}

/// Process `source` into `output` according to `format`, flushing `output` at the end
pub fn process<R, W>(
    source: R,
    output: &mut W,
    format: &OutputFormat,
    options: &ScannerOptions,
    registry: &FormatRegistry,
) -> Result<(), ProcessingError>
where
    R: BufRead,
    W: Write + ?Sized,
{
    match format {
        OutputFormat::Pretty(name) => {
            let formatter = registry.require(name)?;
            Printer::with_options(*options).print(source, output, Some(formatter))?;
        }
        OutputFormat::TokenJson | OutputFormat::TokenYaml => {
            let tokens = Tokenizer::with_options(source, *options).collect::<Result<Vec<Token>, _>>()?;
            let dump = format_tokens(&tokens, format)?;
            output
                .write_all(dump.as_bytes())
                .map_err(PrintError::Write)?;
        }
    }
    output.flush().map_err(PrintError::Write)?;
    Ok(())
}

/// Process a string, collecting the output
pub fn process_str(
    source: &str,
    format_str: &str,
    options: &ScannerOptions,
    registry: &FormatRegistry,
) -> Result<String, ProcessingError> {
    let format = OutputFormat::from_string(format_str, registry)?;
    let mut output = Vec::new();
    process(source.as_bytes(), &mut output, &format, options, registry)?;
    Ok(String::from_utf8_lossy(&output).into_owned())
}

/// Serialize tokens according to the specified dump format
fn format_tokens(tokens: &[Token], format: &OutputFormat) -> Result<String, ProcessingError> {
    match format {
        OutputFormat::TokenJson => serde_json::to_string_pretty(tokens)
            .map(|mut json| {
                json.push('\n');
                json
            })
            .map_err(|e| ProcessingError::Serialization(e.to_string())),
        OutputFormat::TokenYaml => {
            serde_yaml::to_string(tokens).map_err(|e| ProcessingError::Serialization(e.to_string()))
        }
        OutputFormat::Pretty(name) => Err(ProcessingError::Serialization(format!(
            "'{name}' is not a token dump format"
        ))),
    }
}
