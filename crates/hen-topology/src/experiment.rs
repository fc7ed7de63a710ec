use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Experiment details saved alongside the topology.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExperimentMeta {
    pub experiment_id: String,
    /// `dd/mm/yyyy`
    pub start_date: String,
    /// `dd/mm/yyyy`
    pub end_date: String,
    pub description: String,
    pub credentials: UserCredentials,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserCredentials {
    pub username: String,
    pub password: String,
    pub email: String,
}

impl ExperimentMeta {
    /// Checks the start and end dates before a save.
    pub fn validate(&self) -> Result<()> {
        parse_date(&self.start_date)?;
        parse_date(&self.end_date)?;
        Ok(())
    }
}

pub fn parse_date(text: &str) -> Result<chrono::NaiveDate> {
    let invalid = || Error::InvalidDate {
        date: text.to_string(),
    };
    // chrono accepts single-digit fields; the form requires the fixed-width layout.
    let bytes = text.as_bytes();
    if bytes.len() != 10 || bytes[2] != b'/' || bytes[5] != b'/' {
        return Err(invalid());
    }
    chrono::NaiveDate::parse_from_str(text, "%d/%m/%Y").map_err(|_| invalid())
}
