// ⚠️ Errors - only the boundaries can fail
// Roster operations and group generation are total; parsing user input,
// reading config and importing CSV are not.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ShuffleError {
    #[error("Unknown roster '{value}' (expected A or B){}", line_suffix(.line))]
    InvalidRoster { value: String, line: Option<usize> },

    #[error("Failed to read config file {path:?}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path:?}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config file already exists: {0:?} (use --force to overwrite)")]
    ConfigExists(PathBuf),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

fn line_suffix(line: &Option<usize>) -> String {
    match line {
        Some(n) => format!(" on line {}", n),
        None => String::new(),
    }
}

pub type Result<T> = std::result::Result<T, ShuffleError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_roster_message_includes_line() {
        let err = ShuffleError::InvalidRoster {
            value: "C".to_string(),
            line: Some(3),
        };
        assert_eq!(err.to_string(), "Unknown roster 'C' (expected A or B) on line 3");
    }

    #[test]
    fn test_invalid_roster_message_without_line() {
        let err = ShuffleError::InvalidRoster {
            value: "x".to_string(),
            line: None,
        };
        assert_eq!(err.to_string(), "Unknown roster 'x' (expected A or B)");
    }
}
