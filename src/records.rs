//! Native record types
//!
//! Authorization records that commonly travel through the codec, with an
//! ABI fragment describing them so they can be driven through the binary
//! codec as ordinary structs.

use crate::abi::{AbiDef, FieldDef, StructDef};
use crate::codec::{CodecError, Deadline};
use crate::name::Name;
use crate::serializer::{SerializerResult, ShapeResolver, StructuredRecord};
use crate::variant::Value;

/// An actor acting under one of its named permissions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PermissionLevel {
    pub actor: Name,
    pub permission: Name,
}

/// One authorized call: target account, action name, authorizations and
/// the argument payload in wire form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    pub account: Name,
    pub name: Name,
    pub authorization: Vec<PermissionLevel>,
    pub data: Vec<u8>,
}

/// ABI fragment declaring the record structs in this module.
pub fn records_abi() -> AbiDef {
    AbiDef {
        version: "eosio::abi/1.1".to_string(),
        structs: vec![
            StructDef::new(
                "permission_level",
                vec![
                    FieldDef::new("actor", "name"),
                    FieldDef::new("permission", "name"),
                ],
            ),
            StructDef::new(
                "action",
                vec![
                    FieldDef::new("account", "name"),
                    FieldDef::new("name", "name"),
                    FieldDef::new("authorization", "permission_level[]"),
                    FieldDef::new("data", "bytes"),
                ],
            ),
        ],
        ..Default::default()
    }
}

fn want_field<'a>(value: &'a Value, field: &str) -> Result<&'a Value, CodecError> {
    value
        .get(field)
        .ok_or_else(|| CodecError::mismatch(field, format!("field '{}'", field), "missing"))
}

fn want_name(value: &Value, field: &str) -> Result<Name, CodecError> {
    let field_value = want_field(value, field)?;
    let text = field_value
        .as_str()
        .ok_or_else(|| CodecError::mismatch(field, "name string", field_value.kind()))?;
    text.parse()
        .map_err(|_| CodecError::mismatch(field, "name", format!("'{}'", text)))
}

impl StructuredRecord for PermissionLevel {
    fn to_structured(
        &self,
        _resolver: &dyn ShapeResolver,
        _deadline: Deadline,
    ) -> SerializerResult<Value> {
        Ok(Value::object(vec![
            ("actor", Value::String(self.actor.to_string())),
            ("permission", Value::String(self.permission.to_string())),
        ]))
    }

    fn from_structured(
        value: &Value,
        _resolver: &dyn ShapeResolver,
        _deadline: Deadline,
    ) -> SerializerResult<Self> {
        Ok(PermissionLevel {
            actor: want_name(value, "actor")?,
            permission: want_name(value, "permission")?,
        })
    }
}

impl StructuredRecord for Action {
    fn to_structured(
        &self,
        resolver: &dyn ShapeResolver,
        deadline: Deadline,
    ) -> SerializerResult<Value> {
        let mut authorization = Vec::with_capacity(self.authorization.len());
        for level in &self.authorization {
            authorization.push(level.to_structured(resolver, deadline)?);
        }
        Ok(Value::object(vec![
            ("account", Value::String(self.account.to_string())),
            ("name", Value::String(self.name.to_string())),
            ("authorization", Value::Array(authorization)),
            ("data", Value::Bytes(self.data.clone())),
        ]))
    }

    fn from_structured(
        value: &Value,
        resolver: &dyn ShapeResolver,
        deadline: Deadline,
    ) -> SerializerResult<Self> {
        let levels_value = want_field(value, "authorization")?;
        let levels = levels_value
            .as_array()
            .ok_or_else(|| CodecError::mismatch("authorization", "array", levels_value.kind()))?;
        let mut authorization = Vec::with_capacity(levels.len());
        for level in levels {
            authorization.push(PermissionLevel::from_structured(level, resolver, deadline)?);
        }

        let data = match want_field(value, "data")? {
            Value::Bytes(bytes) => bytes.clone(),
            Value::String(s) => hex::decode(s)
                .map_err(|_| CodecError::mismatch("data", "hex string", "malformed hex"))?,
            other => return Err(CodecError::mismatch("data", "bytes", other.kind()).into()),
        };

        Ok(Action {
            account: want_name(value, "account")?,
            name: want_name(value, "name")?,
            authorization,
            data,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::serializer::AbiSerializer;

    fn sample_action() -> Action {
        Action {
            account: "token".parse().unwrap(),
            name: "transfer".parse().unwrap(),
            authorization: vec![PermissionLevel {
                actor: "alice".parse().unwrap(),
                permission: "active".parse().unwrap(),
            }],
            data: vec![0xaa, 0xbb],
        }
    }

    #[test]
    fn test_structured_form_keeps_field_order() {
        let serializer = AbiSerializer::from_abi(&records_abi()).unwrap();
        let structured = sample_action()
            .to_structured(&serializer, Deadline::unlimited())
            .unwrap();
        assert_eq!(
            structured.to_string(),
            r#"{"account":"token","name":"transfer","authorization":[{"actor":"alice","permission":"active"}],"data":"aabb"}"#
        );
    }

    #[test]
    fn test_record_round_trip() {
        let serializer = AbiSerializer::from_abi(&records_abi()).unwrap();
        let action = sample_action();

        let structured = action.to_structured(&serializer, Deadline::unlimited()).unwrap();
        let rebuilt = Action::from_structured(&structured, &serializer, Deadline::unlimited()).unwrap();
        assert_eq!(rebuilt, action);
    }

    #[test]
    fn test_record_drives_the_codec() {
        let serializer = AbiSerializer::from_abi(&records_abi()).unwrap();
        let action = sample_action();

        let structured = action.to_structured(&serializer, Deadline::unlimited()).unwrap();
        let bytes = serializer
            .variant_to_binary("action", &structured, Deadline::unlimited())
            .unwrap();
        // account + name + count + one level + data length + data
        assert_eq!(bytes.len(), 8 + 8 + 1 + 16 + 1 + 2);

        let decoded = serializer
            .binary_to_variant("action", &bytes, Deadline::unlimited())
            .unwrap();
        let rebuilt = Action::from_structured(&decoded, &serializer, Deadline::unlimited()).unwrap();
        assert_eq!(rebuilt, action);
    }

    #[test]
    fn test_missing_field_rejected() {
        let serializer = AbiSerializer::from_abi(&records_abi()).unwrap();
        let value = Value::object(vec![("actor", Value::String("alice".into()))]);
        let err =
            PermissionLevel::from_structured(&value, &serializer, Deadline::unlimited()).unwrap_err();
        assert!(err.to_string().contains("permission"));
    }

    #[test]
    fn test_bad_name_rejected() {
        let serializer = AbiSerializer::from_abi(&records_abi()).unwrap();
        let value = Value::object(vec![
            ("actor", Value::String("NOTVALID".into())),
            ("permission", Value::String("active".into())),
        ]);
        assert!(PermissionLevel::from_structured(&value, &serializer, Deadline::unlimited()).is_err());
    }
}
