//! File processing API for kiwi sources
//!
//! A processing spec names a stage (what to extract) and a format (how to
//! print it), written as `<stage>-<format>`: `token-simple`, `token-json`,
//! `token-yaml`, `ast-treeviz`, `ast-json`, `ast-yaml`.
//!
//! ```rust,ignore
//! use kiwi::kiwi::config::load_defaults;
//! use kiwi::kiwi::processor::{process_source, ProcessingSpec};
//!
//! let spec = ProcessingSpec::from_string("ast-treeviz")?;
//! let output = process_source("package a.b\n", &spec, &load_defaults()?)?;
//! ```

use crate::kiwi::config::KiwiConfig;
use crate::kiwi::formats::to_treeviz_str;
use crate::kiwi::lexing::{lex, Token};
use crate::kiwi::parsing::{parse_source, ParseError};
use serde::Serialize;
use std::fmt;
use std::fs;
use std::path::Path;

/// Represents the processing stage (what data to extract)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessingStage {
    Token,
    Ast,
}

/// Represents the output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Simple,
    Json,
    Yaml,
    Treeviz,
}

/// Represents a complete processing specification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessingSpec {
    pub stage: ProcessingStage,
    pub format: OutputFormat,
}

impl ProcessingSpec {
    /// Parse a format string like "token-simple" or "ast-treeviz"
    pub fn from_string(format_str: &str) -> Result<Self, ProcessingError> {
        let (stage, format) = format_str
            .split_once('-')
            .ok_or_else(|| ProcessingError::InvalidFormat(format_str.to_string()))?;

        let stage = match stage {
            "token" => ProcessingStage::Token,
            "ast" => ProcessingStage::Ast,
            _ => return Err(ProcessingError::InvalidStage(stage.to_string())),
        };

        let format = match format {
            "simple" => OutputFormat::Simple,
            "json" => OutputFormat::Json,
            "yaml" => OutputFormat::Yaml,
            "treeviz" => OutputFormat::Treeviz,
            _ => return Err(ProcessingError::InvalidFormatType(format.to_string())),
        };

        // Validate stage/format compatibility
        match (stage, format) {
            (ProcessingStage::Token, OutputFormat::Treeviz) => {
                return Err(ProcessingError::InvalidFormatType(
                    "Format 'treeviz' only works with AST stage".to_string(),
                ))
            }
            (ProcessingStage::Ast, OutputFormat::Simple) => {
                return Err(ProcessingError::InvalidFormatType(
                    "Format 'simple' only works with token stage".to_string(),
                ))
            }
            _ => {}
        }

        Ok(ProcessingSpec { stage, format })
    }

    /// Get all available processing specifications
    pub fn available_specs() -> Vec<ProcessingSpec> {
        let spec = |stage, format| ProcessingSpec { stage, format };
        vec![
            spec(ProcessingStage::Token, OutputFormat::Simple),
            spec(ProcessingStage::Token, OutputFormat::Json),
            spec(ProcessingStage::Token, OutputFormat::Yaml),
            spec(ProcessingStage::Ast, OutputFormat::Treeviz),
            spec(ProcessingStage::Ast, OutputFormat::Json),
            spec(ProcessingStage::Ast, OutputFormat::Yaml),
        ]
    }
}

impl fmt::Display for ProcessingSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stage = match self.stage {
            ProcessingStage::Token => "token",
            ProcessingStage::Ast => "ast",
        };
        let format = match self.format {
            OutputFormat::Simple => "simple",
            OutputFormat::Json => "json",
            OutputFormat::Yaml => "yaml",
            OutputFormat::Treeviz => "treeviz",
        };
        write!(f, "{}-{}", stage, format)
    }
}

/// Errors that can occur during processing
#[derive(Debug, Clone, PartialEq)]
pub enum ProcessingError {
    FileNotFound(String),
    InvalidFormat(String),
    InvalidStage(String),
    InvalidFormatType(String),
    IoError(String),
    Parse(ParseError),
    Serialization(String),
}

impl std::error::Error for ProcessingError {}

impl fmt::Display for ProcessingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessingError::FileNotFound(path) => write!(f, "File not found: {}", path),
            ProcessingError::InvalidFormat(format) => write!(f, "Invalid format: {}", format),
            ProcessingError::InvalidStage(stage) => write!(f, "Invalid stage: {}", stage),
            ProcessingError::InvalidFormatType(format_type) => {
                write!(f, "Invalid format type: {}", format_type)
            }
            ProcessingError::IoError(msg) => write!(f, "IO error: {}", msg),
            ProcessingError::Parse(err) => write!(f, "Parse error: {}", err),
            ProcessingError::Serialization(msg) => write!(f, "Serialization error: {}", msg),
        }
    }
}

impl From<ParseError> for ProcessingError {
    fn from(err: ParseError) -> Self {
        ProcessingError::Parse(err)
    }
}

/// Names of every supported `<stage>-<format>` string
pub fn available_formats() -> Vec<String> {
    ProcessingSpec::available_specs()
        .iter()
        .map(ToString::to_string)
        .collect()
}

/// Process a kiwi file according to the given specification
pub fn process_file<P: AsRef<Path>>(
    file_path: P,
    spec: &ProcessingSpec,
    config: &KiwiConfig,
) -> Result<String, ProcessingError> {
    let file_path = file_path.as_ref();
    if !file_path.exists() {
        return Err(ProcessingError::FileNotFound(
            file_path.display().to_string(),
        ));
    }
    let content =
        fs::read_to_string(file_path).map_err(|e| ProcessingError::IoError(e.to_string()))?;
    log::info!("processing {} as {}", file_path.display(), spec);
    process_source(&content, spec, config)
}

/// Process kiwi source text according to the given specification
pub fn process_source(
    source: &str,
    spec: &ProcessingSpec,
    config: &KiwiConfig,
) -> Result<String, ProcessingError> {
    match spec.stage {
        ProcessingStage::Token => {
            let tokens = lex(source, &config.lexer);
            format_tokens(&tokens, spec.format)
        }
        ProcessingStage::Ast => {
            let file = parse_source(source, config)?;
            match spec.format {
                OutputFormat::Treeviz => to_treeviz_str(&file, config.inspect.show_spans)
                    .map_err(|e| ProcessingError::Parse(e.into())),
                format => serialize(&file, format),
            }
        }
    }
}

/// Format tokens according to the specified output format
pub fn format_tokens(tokens: &[Token], format: OutputFormat) -> Result<String, ProcessingError> {
    match format {
        OutputFormat::Simple => {
            let mut result = String::new();
            for token in tokens {
                result.push_str(&token.to_string());
                result.push('\n');
            }
            Ok(result)
        }
        format => serialize(tokens, format),
    }
}

fn serialize<T: Serialize + ?Sized>(value: &T, format: OutputFormat) -> Result<String, ProcessingError> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(value)
            .map_err(|e| ProcessingError::Serialization(e.to_string())),
        OutputFormat::Yaml => {
            serde_yaml::to_string(value).map_err(|e| ProcessingError::Serialization(e.to_string()))
        }
        other => Err(ProcessingError::InvalidFormatType(format!(
            "{:?} is not a serialization format",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("token-simple", ProcessingStage::Token, OutputFormat::Simple)]
    #[case("token-json", ProcessingStage::Token, OutputFormat::Json)]
    #[case("token-yaml", ProcessingStage::Token, OutputFormat::Yaml)]
    #[case("ast-treeviz", ProcessingStage::Ast, OutputFormat::Treeviz)]
    #[case("ast-json", ProcessingStage::Ast, OutputFormat::Json)]
    #[case("ast-yaml", ProcessingStage::Ast, OutputFormat::Yaml)]
    fn test_parse_format_strings(
        #[case] input: &str,
        #[case] stage: ProcessingStage,
        #[case] format: OutputFormat,
    ) {
        let spec = ProcessingSpec::from_string(input).unwrap();
        assert_eq!(spec, ProcessingSpec { stage, format });
        assert_eq!(spec.to_string(), input);
    }

    #[rstest]
    #[case("tokens", ProcessingError::InvalidFormat("tokens".to_string()))]
    #[case("cst-json", ProcessingError::InvalidStage("cst".to_string()))]
    #[case("ast-xml", ProcessingError::InvalidFormatType("xml".to_string()))]
    fn test_invalid_format_strings(#[case] input: &str, #[case] expected: ProcessingError) {
        assert_eq!(ProcessingSpec::from_string(input), Err(expected));
    }

    #[test]
    fn test_incompatible_stage_and_format() {
        assert!(ProcessingSpec::from_string("token-treeviz").is_err());
        assert!(ProcessingSpec::from_string("ast-simple").is_err());
    }

    #[test]
    fn test_available_formats_all_parse() {
        let formats = available_formats();
        assert_eq!(formats.len(), 6);
        for format in formats {
            assert!(ProcessingSpec::from_string(&format).is_ok(), "{}", format);
        }
    }

    #[test]
    fn test_missing_file() {
        let spec = ProcessingSpec::from_string("token-simple").unwrap();
        let result = process_file("no/such/file.kiwi", &spec, &KiwiConfig::default());
        assert!(matches!(result, Err(ProcessingError::FileNotFound(_))));
    }
}
