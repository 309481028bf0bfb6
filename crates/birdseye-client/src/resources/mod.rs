//! Resource operation wrappers.
//!
//! One module per resource family; every operation builds a
//! [`RequestSpec`](crate::request::RequestSpec), dispatches it, and
//! unwraps the result envelope where the backend uses one.

pub mod charts;
pub mod dashboards;
pub mod databases;
pub mod datasets;
pub mod misc;
pub mod security;
pub mod sql;

use birdseye_core::error::ValidationError;
use birdseye_core::Result;

/// Reject a create payload missing (or holding an empty/null value for)
/// any of the named fields, before any network call is made.
pub(crate) fn require_fields(payload: &serde_json::Value, fields: &[&str]) -> Result<()> {
    for field in fields {
        let present = match payload.get(*field) {
            None | Some(serde_json::Value::Null) => false,
            Some(serde_json::Value::String(s)) => !s.is_empty(),
            Some(_) => true,
        };
        if !present {
            return Err(ValidationError::MissingField {
                field: field.to_string(),
            }
            .into());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use birdseye_core::Error;
    use serde_json::json;

    #[test]
    fn accepts_payload_with_all_fields() {
        let payload = json!({"database": 1, "table_name": "orders"});
        assert!(require_fields(&payload, &["database", "table_name"]).is_ok());
    }

    #[test]
    fn rejects_missing_field() {
        let payload = json!({"database": 1});
        let err = require_fields(&payload, &["database", "table_name"]).unwrap_err();
        match err {
            Error::InvalidInput(ValidationError::MissingField { field }) => {
                assert_eq!(field, "table_name");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn rejects_null_and_empty_string_values() {
        assert!(require_fields(&json!({"a": null}), &["a"]).is_err());
        assert!(require_fields(&json!({"a": ""}), &["a"]).is_err());
        assert!(require_fields(&json!({"a": 0}), &["a"]).is_ok());
    }
}
