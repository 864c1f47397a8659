//! Shared helpers for command handlers.

use std::io::{self, IsTerminal};
use std::path::Path;

use serde::de::DeserializeOwned;

use crate::error::CliError;

/// Prompt for confirmation, auto-approving if `--yes` was passed.
///
/// Without a terminal there is nobody to ask, so the action is refused.
pub fn confirm(message: &str, action: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    if !io::stdin().is_terminal() {
        return Err(CliError::NonInteractiveRequiresYes {
            action: action.into(),
        });
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(io::Error::other(e)))?;
    Ok(confirmed)
}

/// Read a JSON object from `path`, or from stdin when `None`.
pub fn read_record<T: DeserializeOwned>(path: Option<&Path>) -> Result<T, CliError> {
    let contents = match path {
        Some(path) => std::fs::read_to_string(path)?,
        None => io::read_to_string(io::stdin())?,
    };
    Ok(serde_json::from_str(&contents)?)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::io::Write;

    use tikly_core::IpAddress;

    use super::*;

    #[test]
    fn record_reads_from_file_with_missing_fields_defaulted() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"address": "10.0.0.1/24", "interface": "ether1"}}"#).unwrap();

        let record: IpAddress = read_record(Some(file.path())).unwrap();
        assert_eq!(record.address, "10.0.0.1/24");
        assert_eq!(record.interface, "ether1");
        assert!(record.id.is_empty());
        assert!(!record.disabled);
    }

    #[test]
    fn malformed_json_is_a_json_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{not json").unwrap();

        let err = read_record::<IpAddress>(Some(file.path())).unwrap_err();
        assert!(matches!(err, CliError::Json(_)), "got {err:?}");
    }

    #[test]
    fn yes_flag_skips_the_prompt() {
        assert!(confirm("Delete?", "bridge delete", true).unwrap());
    }
}
