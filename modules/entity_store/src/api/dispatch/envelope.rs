//! Uniform response envelope

use crate::contract::{ErrorKind, StoreError};
use serde::{Deserialize, Serialize};

/// `{"ok":true,"data":...}` or `{"ok":false,"error":{"kind":...,"message":...}}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorBody>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Stable error kind, e.g. `NotFound`
    pub kind: String,
    pub message: String,
}

impl Envelope {
    pub fn success(data: serde_json::Value) -> Self {
        Self {
            ok: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn failure(error: &StoreError) -> Self {
        Self {
            ok: false,
            data: None,
            error: Some(ErrorBody {
                kind: error.kind().to_string(),
                message: error.to_string(),
            }),
        }
    }

    /// Error kind string of a failed envelope
    pub fn error_kind(&self) -> Option<&str> {
        self.error.as_ref().map(|e| e.kind.as_str())
    }

    /// True when the envelope failed with `kind`
    pub fn is_error(&self, kind: ErrorKind) -> bool {
        self.error_kind() == Some(kind.as_str())
    }
}

impl From<Result<serde_json::Value, StoreError>> for Envelope {
    fn from(result: Result<serde_json::Value, StoreError>) -> Self {
        match result {
            Ok(data) => Self::success(data),
            Err(e) => Self::failure(&e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn envelope_wire_shape() {
        let ok = serde_json::to_value(Envelope::success(json!({"id": "a1"}))).unwrap();
        assert_eq!(ok, json!({"ok": true, "data": {"id": "a1"}}));

        let failed = Envelope::failure(&StoreError::not_found("app", "a9"));
        assert!(failed.is_error(ErrorKind::NotFound));
        assert_eq!(
            serde_json::to_value(failed).unwrap(),
            json!({"ok": false, "error": {"kind": "NotFound", "message": "app not found: a9"}})
        );
    }
}
