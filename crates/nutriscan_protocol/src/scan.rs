//! Scan request types for `POST /scan`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Kind of code captured by the scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CodeKind {
    Barcode,
    Qr,
}

impl fmt::Display for CodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodeKind::Barcode => write!(f, "barcode"),
            CodeKind::Qr => write!(f, "qr"),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid code kind: {0} (expected 'barcode' or 'qr')")]
pub struct CodeKindParseError(String);

impl FromStr for CodeKind {
    type Err = CodeKindParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "barcode" => Ok(CodeKind::Barcode),
            "qr" => Ok(CodeKind::Qr),
            other => Err(CodeKindParseError(other.to_string())),
        }
    }
}

/// Request body for `POST /scan`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanRequest {
    pub code: String,
    #[serde(rename = "type")]
    pub kind: CodeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

impl ScanRequest {
    pub fn barcode(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            kind: CodeKind::Barcode,
            country: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scan_request_serializes_type_field() {
        let request = ScanRequest::barcode("4006381333931");
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["code"], "4006381333931");
        assert_eq!(json["type"], "barcode");
        assert!(json.get("country").is_none());
    }

    #[test]
    fn code_kind_parses_case_insensitively() {
        assert_eq!("QR".parse::<CodeKind>().unwrap(), CodeKind::Qr);
        assert!("ean13".parse::<CodeKind>().is_err());
    }
}
