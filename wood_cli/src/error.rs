//! CLI error type.

use std::path::PathBuf;

use thiserror::Error;
use wood_core::CalcError;

/// Errors surfaced to the command-line user.
#[derive(Debug, Error)]
pub enum CliError {
    /// Input rejected by the calculation engine
    #[error(transparent)]
    Calc(#[from] CalcError),

    /// Input or settings file could not be read
    #[error("could not read '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Sweep output file could not be written
    #[error("could not write '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Calculation document is not valid JSON
    #[error("'{path}' is not valid JSON: {source}")]
    InputJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Settings file is not valid TOML for `CalcSettings`
    #[error("'{path}' is not a valid settings file: {source}")]
    Settings {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Result could not be serialized to JSON
    #[error("could not render output: {0}")]
    OutputJson(#[from] serde_json::Error),

    /// Settings could not be serialized to TOML
    #[error("could not render settings: {0}")]
    OutputToml(#[from] toml::ser::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calc_error_message_passes_through() {
        let calc = CalcError::invalid_argument("moisture_content", "-3", "Moisture content must be non-negative");
        let expected = calc.to_string();
        let err: CliError = calc.into();
        assert_eq!(err.to_string(), expected);
    }

    #[test]
    fn test_read_error_names_path() {
        let err = CliError::Read {
            path: PathBuf::from("missing.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert!(err.to_string().starts_with("could not read 'missing.json'"));
    }
}
