//! Error types for Flint

use thiserror::Error;

/// The main error type for Flint operations
#[derive(Debug, Error)]
pub enum FlintError {
    #[error("Entity not found: {0}")]
    EntityNotFound(String),

    #[error("Buff not found: {0}")]
    BuffNotFound(String),

    #[error("Unknown effect: {0}")]
    UnknownEffect(String),

    #[error("Buff config error: {0}")]
    BuffConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(String),

    #[error("Value out of range: {field} must be between {min} and {max}, got {value}")]
    ValueOutOfRange {
        field: String,
        min: f64,
        max: f64,
        value: f64,
    },
}

/// Result type alias for Flint operations
pub type Result<T> = std::result::Result<T, FlintError>;

impl From<toml::de::Error> for FlintError {
    fn from(err: toml::de::Error) -> Self {
        FlintError::TomlParseError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toml_errors_convert() {
        let err: FlintError = toml::from_str::<toml::Value>("= nope").unwrap_err().into();
        assert!(matches!(err, FlintError::TomlParseError(_)));
    }

    #[test]
    fn io_errors_convert() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: FlintError = io.into();
        assert!(matches!(err, FlintError::IoError(_)));
    }

    #[test]
    fn out_of_range_message() {
        let err = FlintError::ValueOutOfRange {
            field: "time_scale".into(),
            min: 0.0,
            max: f64::MAX,
            value: -1.0,
        };
        assert!(err.to_string().contains("time_scale"));
    }
}
