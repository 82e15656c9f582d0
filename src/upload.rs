//! Import request/response model for spreadsheet uploads.
//!
//! Uploads arrive as JSON `{"fileName": "...", "data": "<base64>"}` and are
//! answered with `{"rows": [...]}` or `{"error": true, "message": "..."}`.

use base64::Engine;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::Error;
use crate::records::Record;
use crate::spreadsheet::parse_spreadsheet;

const MIN_FILE_NAME_LEN: usize = 3;
const MIN_DATA_LEN: usize = 10;

/// Standard alphabet, padding optional.
const PAYLOAD_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Errors that can occur while handling an import request.
#[derive(Error, Debug)]
pub enum ImportError {
    /// A request field failed validation.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The payload is not valid base64.
    #[error("Invalid file data: {0}")]
    InvalidPayload(#[from] base64::DecodeError),

    #[error(transparent)]
    Parse(#[from] Error),
}

/// An uploaded spreadsheet.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportRequest {
    pub file_name: String,
    /// File contents, base64 encoded.
    pub data: String,
}

impl ImportRequest {
    pub fn new(file_name: impl Into<String>, bytes: &[u8]) -> Self {
        Self {
            file_name: file_name.into(),
            data: PAYLOAD_ENGINE.encode(bytes),
        }
    }

    pub fn validate(&self) -> Result<(), ImportError> {
        if self.file_name.chars().count() < MIN_FILE_NAME_LEN {
            return Err(ImportError::InvalidRequest(format!(
                "fileName must be at least {MIN_FILE_NAME_LEN} characters"
            )));
        }
        if self.data.chars().count() < MIN_DATA_LEN {
            return Err(ImportError::InvalidRequest(format!(
                "data must be at least {MIN_DATA_LEN} characters"
            )));
        }
        Ok(())
    }

    /// Decoded file contents.
    pub fn decode(&self) -> Result<Vec<u8>, ImportError> {
        Ok(PAYLOAD_ENGINE.decode(self.data.trim())?)
    }

    /// Validate, decode and parse the upload.
    ///
    /// A file without data rows is reported as [`Error::EmptyInput`].
    pub fn process(&self) -> Result<Vec<Record>, ImportError> {
        self.validate()?;
        let bytes = self.decode()?;
        debug!("import {}: {} bytes", self.file_name, bytes.len());

        let records = parse_spreadsheet(&bytes, &self.file_name)?;
        if records.is_empty() {
            return Err(Error::EmptyInput.into());
        }
        Ok(records)
    }
}

/// Reply to an import request.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ImportResponse {
    Rows { rows: Vec<Record> },
    Failure { error: bool, message: String },
}

impl ImportResponse {
    pub fn is_error(&self) -> bool {
        matches!(self, ImportResponse::Failure { .. })
    }
}

impl From<Result<Vec<Record>, ImportError>> for ImportResponse {
    fn from(result: Result<Vec<Record>, ImportError>) -> Self {
        match result {
            Ok(rows) => ImportResponse::Rows { rows },
            Err(err) => ImportResponse::Failure {
                error: true,
                message: err.to_string(),
            },
        }
    }
}
