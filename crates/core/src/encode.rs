//! Byte encoding of wire documents.

use serde::Serialize;

use crate::error::{CoreError, CoreResult, PayloadOperation};

/// Serialize a payload to JSON bytes, labelling failures with the resource
/// and operation they belong to.
pub fn encode_payload<T: Serialize>(
    payload: &T,
    resource: &'static str,
    operation: PayloadOperation,
) -> CoreResult<Vec<u8>> {
    serde_json::to_vec(payload).map_err(|source| CoreError::Serialization {
        resource,
        operation,
        source,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn encodes_compact_json() {
        let mut doc = BTreeMap::new();
        doc.insert("name", "checkout");
        let bytes = encode_payload(&doc, "dashboard", PayloadOperation::Create).unwrap();
        assert_eq!(bytes, br#"{"name":"checkout"}"#);
    }

    #[test]
    fn failure_names_resource_and_operation() {
        // Non-string map keys cannot be encoded as JSON object keys.
        let mut doc = BTreeMap::new();
        doc.insert(vec![1u8], 1);
        let err = encode_payload(&doc, "integration", PayloadOperation::Update).unwrap_err();
        assert!(err.to_string().starts_with("Failed to encode integration update payload"));
        assert_matches!(
            err,
            CoreError::Serialization {
                resource: "integration",
                operation: PayloadOperation::Update,
                ..
            }
        );
    }
}
