//! Key-Value Table Tests
//!
//! The two-table fixture: `kvtable1` (primary `pida:name`, secondaries
//! `sid1:string, sid2:uint32, sid3:name`) and `kvtable2` (primary
//! `pidb:name`, secondaries `sida:int32, sidb:uint64, sidc:sha256`) must
//! validate, report two registered tables, and row values must pass a
//! structured -> wire -> structured cycle with identical textual output.

use abicodec::registry::Primitive;
use abicodec::{AbiSerializer, Deadline, Name, Value};

// =============================================================================
// Fixture
// =============================================================================

const KV_ABI: &str = r#"{
    "version": "eosio::abi/1.1",
    "structs": [
        {
            "name": "kvaccount1",
            "base": "",
            "fields": [
                {"name": "pida", "type": "name"},
                {"name": "sid1", "type": "string"},
                {"name": "sid2", "type": "uint32"},
                {"name": "sid3", "type": "name"}
            ]
        },
        {
            "name": "kvaccount2",
            "base": "",
            "fields": [
                {"name": "pidb", "type": "name"},
                {"name": "sida", "type": "int32"},
                {"name": "sidb", "type": "uint64"},
                {"name": "sidc", "type": "sha256"}
            ]
        }
    ],
    "kv_tables": {
        "kvtable1": {
            "type": "kvaccount1",
            "primary_index": {"name": "pida", "type": "name"},
            "secondary_indices": {
                "sid1": {"type": "string"},
                "sid2": {"type": "uint32"},
                "sid3": {"type": "name"}
            }
        },
        "kvtable2": {
            "type": "kvaccount2",
            "primary_index": {"name": "pidb", "type": "name"},
            "secondary_indices": {
                "sida": {"type": "int32"},
                "sidb": {"type": "uint64"},
                "sidc": {"type": "sha256"}
            }
        }
    }
}"#;

fn fixture() -> AbiSerializer {
    AbiSerializer::from_json(KV_ABI).unwrap()
}

fn table(serializer: &AbiSerializer, name: &str) -> abicodec::kv::KvTableShape {
    let name: Name = name.parse().unwrap();
    serializer.registry().kv_table(name).unwrap().clone()
}

// =============================================================================
// Registration Tests
// =============================================================================

#[test]
fn test_fixture_registers_two_tables() {
    let serializer = fixture();
    assert_eq!(serializer.registry().kv_tables().len(), 2);
}

#[test]
fn test_index_shapes_resolve() {
    let serializer = fixture();

    let t1 = table(&serializer, "kvtable1");
    assert_eq!(t1.row_type, "kvaccount1");
    assert_eq!(t1.primary.name, "pida");
    assert_eq!(t1.primary.key_type, Primitive::Name);
    assert_eq!(t1.secondaries.len(), 3);
    assert_eq!(t1.secondaries["sid1"].key_type, Primitive::String);
    assert_eq!(t1.secondaries["sid2"].key_type, Primitive::Uint32);
    assert_eq!(t1.secondaries["sid3"].key_type, Primitive::Name);

    let t2 = table(&serializer, "kvtable2");
    assert_eq!(t2.primary.name, "pidb");
    assert_eq!(t2.secondaries["sida"].key_type, Primitive::Int32);
    assert_eq!(t2.secondaries["sidb"].key_type, Primitive::Uint64);
    // sha256 is an accepted spelling of checksum256
    assert_eq!(t2.secondaries["sidc"].key_type, Primitive::Checksum256);
    assert_eq!(t2.secondaries["sidc"].type_name, "sha256");
}

#[test]
fn test_row_struct_is_registered() {
    let serializer = fixture();
    let registry = serializer.registry();

    let t1 = table(&serializer, "kvtable1");
    let row = registry.struct_shape(t1.row_struct);
    assert_eq!(row.name, "kvaccount1");
    assert_eq!(row.fields.len(), 4);
}

// =============================================================================
// Structured Round-Trip Tests
// =============================================================================

/// Textual output is identical before and after a structured -> wire ->
/// structured pass.
#[test]
fn test_row_round_trip_is_textually_stable() {
    let serializer = fixture();

    let row = Value::object(vec![
        ("pida", Value::String("alice".into())),
        ("sid1", Value::String("hello".into())),
        ("sid2", Value::Uint(42)),
        ("sid3", Value::String("bob".into())),
    ]);

    let bytes = serializer
        .variant_to_binary("kvaccount1", &row, Deadline::unlimited())
        .unwrap();
    let decoded = serializer
        .binary_to_variant("kvaccount1", &bytes, Deadline::unlimited())
        .unwrap();
    let str1 = decoded.to_string();

    let bytes2 = serializer
        .variant_to_binary("kvaccount1", &decoded, Deadline::unlimited())
        .unwrap();
    let str2 = serializer
        .binary_to_variant("kvaccount1", &bytes2, Deadline::unlimited())
        .unwrap()
        .to_string();

    assert_eq!(str1, str2);
    assert_eq!(bytes, bytes2);
    assert_eq!(
        str1,
        r#"{"pida":"alice","sid1":"hello","sid2":42,"sid3":"bob"}"#
    );
}

#[test]
fn test_digest_keyed_row_round_trip() {
    let serializer = fixture();

    let digest = "9f86d081884c7d659a2feaa0c55ad015a3bf4f1b2b0b822cd15d6c15b0f00a08";
    let row = Value::object(vec![
        ("pidb", Value::String("carol".into())),
        ("sida", Value::Int(-7)),
        ("sidb", Value::Uint(u64::MAX)),
        ("sidc", Value::String(digest.into())),
    ]);

    let bytes = serializer
        .variant_to_binary("kvaccount2", &row, Deadline::unlimited())
        .unwrap();
    assert_eq!(bytes.len(), 8 + 4 + 8 + 32);

    let decoded = serializer
        .binary_to_variant("kvaccount2", &bytes, Deadline::unlimited())
        .unwrap();
    assert_eq!(decoded.get("sidc"), Some(&Value::String(digest.into())));
    assert_eq!(decoded, row);
}

// =============================================================================
// Rejection Tests
// =============================================================================

fn build_err(json: &str) -> abicodec::SerializerError {
    AbiSerializer::from_json(json).unwrap_err()
}

#[test]
fn test_float_secondary_index_rejected() {
    let err = build_err(
        r#"{
            "version": "eosio::abi/1.1",
            "structs": [{"name": "row", "base": "", "fields": [{"name": "k", "type": "name"}]}],
            "kv_tables": {
                "t": {
                    "type": "row",
                    "primary_index": {"name": "pid", "type": "name"},
                    "secondary_indices": {"sidf": {"type": "float64"}}
                }
            }
        }"#,
    );
    assert!(err.to_string().contains("illegal key type"));
}

#[test]
fn test_index_name_collision_rejected() {
    let err = build_err(
        r#"{
            "version": "eosio::abi/1.1",
            "structs": [{"name": "row", "base": "", "fields": [{"name": "k", "type": "name"}]}],
            "kv_tables": {
                "t": {
                    "type": "row",
                    "primary_index": {"name": "pid", "type": "name"},
                    "secondary_indices": {"pid": {"type": "uint64"}}
                }
            }
        }"#,
    );
    assert!(err.to_string().contains("duplicate"));
}

/// A repeated table or index name is a conflicting definition and must fail
/// at parse time rather than collapse last-wins.
#[test]
fn test_duplicate_table_and_index_names_rejected() {
    let err = build_err(
        r#"{
            "version": "eosio::abi/1.1",
            "structs": [{"name": "row", "base": "", "fields": [{"name": "k", "type": "name"}]}],
            "kv_tables": {
                "t": {
                    "type": "row",
                    "primary_index": {"name": "pid", "type": "name"},
                    "secondary_indices": {}
                },
                "t": {
                    "type": "row",
                    "primary_index": {"name": "pid", "type": "name"},
                    "secondary_indices": {}
                }
            }
        }"#,
    );
    assert!(err.to_string().contains("duplicate key 't'"));

    let err = build_err(
        r#"{
            "version": "eosio::abi/1.1",
            "structs": [{"name": "row", "base": "", "fields": [{"name": "k", "type": "name"}]}],
            "kv_tables": {
                "t": {
                    "type": "row",
                    "primary_index": {"name": "pid", "type": "name"},
                    "secondary_indices": {
                        "sida": {"type": "uint64"},
                        "sida": {"type": "uint32"}
                    }
                }
            }
        }"#,
    );
    assert!(err.to_string().contains("duplicate key 'sida'"));
}

#[test]
fn test_non_struct_row_type_rejected() {
    let err = build_err(
        r#"{
            "version": "eosio::abi/1.1",
            "kv_tables": {
                "t": {
                    "type": "uint64",
                    "primary_index": {"name": "pid", "type": "name"},
                    "secondary_indices": {}
                }
            }
        }"#,
    );
    assert!(err.to_string().contains("must resolve to a struct"));
}

#[test]
fn test_container_index_type_rejected() {
    let err = build_err(
        r#"{
            "version": "eosio::abi/1.1",
            "structs": [{"name": "row", "base": "", "fields": [{"name": "k", "type": "name"}]}],
            "kv_tables": {
                "t": {
                    "type": "row",
                    "primary_index": {"name": "pid", "type": "name"},
                    "secondary_indices": {"sida": {"type": "uint64[]"}}
                }
            }
        }"#,
    );
    assert!(err.to_string().contains("illegal key type"));
}
