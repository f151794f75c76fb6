//! CLI command implementations

use std::path::Path;
use std::time::Duration;

use crate::codec::Deadline;
use crate::serializer::AbiSerializer;
use crate::variant::Value;

use super::errors::CliResult;

fn deadline(ms: Option<u64>) -> Deadline {
    match ms {
        Some(ms) => Deadline::after(Duration::from_millis(ms)),
        None => Deadline::unlimited(),
    }
}

/// Builds a registry from the document and returns a one-line summary.
pub fn validate(abi: &Path) -> CliResult<String> {
    let serializer = AbiSerializer::from_file(abi)?;
    let registry = serializer.registry();
    Ok(format!(
        "ok: version {}, {} kv tables",
        registry.version(),
        registry.kv_tables().len()
    ))
}

/// Encodes a JSON value as the named type; returns lowercase hex.
pub fn encode(abi: &Path, type_name: &str, value: &str, deadline_ms: Option<u64>) -> CliResult<String> {
    let serializer = AbiSerializer::from_file(abi)?;
    let json: serde_json::Value =
        serde_json::from_str(value).map_err(super::CliError::InvalidValue)?;
    let bytes = serializer.variant_to_binary(
        type_name,
        &Value::from_json(&json),
        deadline(deadline_ms),
    )?;
    Ok(hex::encode(bytes))
}

/// Decodes hex wire bytes as the named type; returns JSON text with field
/// order preserved.
pub fn decode(abi: &Path, type_name: &str, hex_text: &str, deadline_ms: Option<u64>) -> CliResult<String> {
    let serializer = AbiSerializer::from_file(abi)?;
    let bytes = hex::decode(hex_text.trim()).map_err(super::CliError::InvalidHex)?;
    let value = serializer.binary_to_variant(type_name, &bytes, deadline(deadline_ms))?;
    Ok(value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn abi_file(dir: &tempfile::TempDir) -> std::path::PathBuf {
        let path = dir.path().join("abi.json");
        std::fs::write(
            &path,
            r#"{
                "version": "eosio::abi/1.1",
                "structs": [{
                    "name": "pair",
                    "base": "",
                    "fields": [
                        {"name": "key", "type": "name"},
                        {"name": "count", "type": "uint32"}
                    ]
                }]
            }"#,
        )
        .unwrap();
        path
    }

    #[test]
    fn test_validate_summary() {
        let dir = tempfile::tempdir().unwrap();
        let summary = validate(&abi_file(&dir)).unwrap();
        assert!(summary.starts_with("ok: version eosio::abi/1.1"));
    }

    #[test]
    fn test_encode_decode_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let abi = abi_file(&dir);

        let json = r#"{"key": "alice", "count": 7}"#;
        let hex_text = encode(&abi, "pair", json, None).unwrap();
        assert_eq!(hex_text.len(), (8 + 4) * 2);

        let rendered = decode(&abi, "pair", &hex_text, None).unwrap();
        assert_eq!(rendered, r#"{"key":"alice","count":7}"#);
    }

    #[test]
    fn test_bad_hex_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let err = decode(&abi_file(&dir), "pair", "zz", None).unwrap_err();
        assert!(err.to_string().contains("invalid hex"));
    }
}
