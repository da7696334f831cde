use std::fs;
use std::path::Path;

use brine_struct_schema::{ArrayLength, DefaultValue, DefineTable, Member, Schema};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::{error::StructGenError, utils::quote};

#[derive(Debug, Deserialize)]
struct RawDocument {
    #[serde(rename = "struct")]
    header:  Option<RawHeader>,
    define:  Option<toml::Table>,
    member:  Option<Vec<RawMember>>,
}

#[derive(Debug, Deserialize)]
struct RawHeader {
    name:      Option<String>,
    namespace: Option<String>,
    include:   Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct RawMember {
    name:    Option<String>,
    #[serde(rename = "type")]
    type_:   Option<String>,
    bits:    Option<i64>,
    array:   Option<toml::Value>,
    default: Option<toml::Value>,
}

/// Parses a TOML schema document.
/// Returns `Err(StructGenError)` if the text is not valid TOML, a required
/// key is missing, or a value has the wrong shape.
pub fn parse_schema(text: &str) -> Result<Schema, StructGenError> {
    let doc: RawDocument = toml::from_str(text).map_err(|e| toml_error(text, e))?;

    let header = doc
        .header
        .ok_or_else(|| StructGenError::MissingField("struct.name".to_string()))?;
    let name = header
        .name
        .ok_or_else(|| StructGenError::MissingField("struct.name".to_string()))?;

    let defines = doc.define.map(parse_defines);

    let raw_members = doc
        .member
        .ok_or_else(|| StructGenError::MissingField("member".to_string()))?;
    let members = raw_members
        .into_iter()
        .enumerate()
        .map(|(index, raw)| parse_member(index, raw))
        .collect::<Result<Vec<_>, _>>()?;

    debug!(struct_name = %name, members = members.len(), "parsed schema");

    Ok(Schema {
        name,
        namespace: header.namespace,
        includes: header.include,
        defines,
        members,
    })
}

/// Reads and parses the schema at `path`.
pub fn load_schema_file(path: &Path) -> Result<Schema, StructGenError> {
    if !path.is_file() {
        return Err(StructGenError::FileNotFound(path.display().to_string()));
    }
    let text = fs::read_to_string(path)?;
    parse_schema(&text)
}

/// Maps a TOML error's byte span back to a 1-based line and column.
fn toml_error(text: &str, err: toml::de::Error) -> StructGenError {
    let (line, column) = match err.span() {
        Some(span) => {
            let before = text.get(..span.start).unwrap_or(text);
            let line = before.matches('\n').count() + 1;
            let column = before.rsplit('\n').next().map_or(0, |l| l.chars().count()) + 1;
            (line, column)
        }
        None => (0, 0),
    };
    StructGenError::ParseError {
        msg: err.message().trim().to_string(),
        line,
        column,
    }
}

fn parse_defines(table: toml::Table) -> DefineTable {
    let mut defines = DefineTable::new();
    for (key, value) in table {
        match value {
            toml::Value::Integer(n) => {
                defines.insert(key, n);
            }
            other => {
                warn!(define = %key, kind = other.type_str(), "define is not an integer, ignoring");
            }
        }
    }
    defines
}

fn parse_member(index: usize, raw: RawMember) -> Result<Member, StructGenError> {
    let key = |field: &str| format!("member[{}].{}", index, field);

    let name = raw.name.ok_or_else(|| StructGenError::MissingField(key("name")))?;
    let type_name = raw.type_.ok_or_else(|| StructGenError::MissingField(key("type")))?;

    let bits = match raw.bits {
        None => None,
        Some(n) if n > 0 && n <= u32::MAX as i64 => Some(n as u32),
        Some(n) => {
            return Err(StructGenError::InvalidValue {
                key: key("bits"),
                msg: format!("expected a positive bit width but found {}", n),
            })
        }
    };

    let array = match raw.array {
        None => None,
        Some(toml::Value::Integer(n)) => Some(ArrayLength::Count(n)),
        Some(toml::Value::String(symbol)) => Some(ArrayLength::Symbol(symbol)),
        Some(other) => {
            return Err(StructGenError::InvalidValue {
                key: key("array"),
                msg: format!("expected an integer or a symbol but found {}", other),
            })
        }
    };

    let default = match raw.default {
        None => None,
        Some(toml::Value::String(s)) => Some(DefaultValue::Str(s)),
        Some(toml::Value::Integer(n)) => Some(DefaultValue::Int(n)),
        Some(toml::Value::Float(f)) => Some(DefaultValue::Float(f)),
        Some(toml::Value::Boolean(b)) => Some(DefaultValue::Bool(b)),
        Some(other) => {
            return Err(StructGenError::InvalidValue {
                key: key("default"),
                msg: format!("unsupported {} literal", other.type_str()),
            })
        }
    };

    let mut member = Member::new(name, type_name);
    member.default = default;
    if let Some(bits) = bits {
        if array.is_some() {
            debug!(member = %quote(&member.name), "bit-field member ignores its array length");
        }
        member = member.with_bits(bits);
    } else {
        member.array = array;
    }
    Ok(member)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_document() {
        let schema = parse_schema(
            r#"
            [struct]
            name = "Packet"
            namespace = "net"
            include = ["cstdint", "string"]

            [define]
            PAYLOAD = 16
            LABEL = "not a number"

            [[member]]
            name = "flags"
            type = "uint32_t"
            bits = 3

            [[member]]
            name = "payload"
            type = "uint8_t"
            array = "PAYLOAD"

            [[member]]
            name = "scale"
            type = "float"
            default = 1.5

            [[member]]
            name = "tag"
            type = "char"
            array = 4
            default = "abc"
            "#,
        )
        .expect("parse_schema failed");

        assert_eq!(schema.name, "Packet");
        assert_eq!(schema.namespace.as_deref(), Some("net"));
        assert_eq!(schema.includes, Some(vec!["cstdint".to_owned(), "string".to_owned()]));

        let defines = schema.defines.as_ref().unwrap();
        assert_eq!(defines.get("PAYLOAD"), Some(&16));
        assert_eq!(defines.get("LABEL"), None);

        assert_eq!(schema.members.len(), 4);
        assert_eq!(schema.members[0].bits, Some(3));
        assert_eq!(schema.members[1].array, Some(ArrayLength::Symbol("PAYLOAD".to_owned())));
        assert_eq!(schema.members[2].default, Some(DefaultValue::Float(1.5)));
        assert_eq!(schema.members[3].array, Some(ArrayLength::Count(4)));
        assert_eq!(schema.members[3].default, Some(DefaultValue::Str("abc".to_owned())));
    }

    #[test]
    fn optional_sections_may_be_absent() {
        let schema = parse_schema(
            r#"
            [struct]
            name = "Bare"

            [[member]]
            name = "x"
            type = "int"
            "#,
        )
        .unwrap();
        assert_eq!(schema.namespace, None);
        assert_eq!(schema.includes, None);
        assert_eq!(schema.defines, None);
    }

    #[test]
    fn missing_struct_name() {
        let err = parse_schema("[struct]\nnamespace = \"a\"\n[[member]]\nname = \"x\"\ntype = \"int\"\n").unwrap_err();
        assert!(matches!(err, StructGenError::MissingField(ref k) if k == "struct.name"));
        assert_eq!(err.to_string(), "not found {struct.name}");

        let err = parse_schema("[[member]]\nname = \"x\"\ntype = \"int\"\n").unwrap_err();
        assert!(matches!(err, StructGenError::MissingField(ref k) if k == "struct.name"));
    }

    #[test]
    fn missing_member_list() {
        let err = parse_schema("[struct]\nname = \"S\"\n").unwrap_err();
        assert!(matches!(err, StructGenError::MissingField(ref k) if k == "member"));
    }

    #[test]
    fn member_requires_name_and_type() {
        let err = parse_schema("[struct]\nname = \"S\"\n[[member]]\nname = \"x\"\n").unwrap_err();
        assert!(matches!(err, StructGenError::MissingField(ref k) if k == "member[0].type"));
    }

    #[test]
    fn rejects_malformed_values() {
        let err = parse_schema("[struct]\nname = \"S\"\n[[member]]\nname = \"x\"\ntype = \"int\"\nbits = 0\n").unwrap_err();
        assert!(matches!(err, StructGenError::InvalidValue { ref key, .. } if key == "member[0].bits"));

        let err = parse_schema("[struct]\nname = \"S\"\n[[member]]\nname = \"x\"\ntype = \"int\"\narray = 1.5\n").unwrap_err();
        assert!(matches!(err, StructGenError::InvalidValue { ref key, .. } if key == "member[0].array"));

        let err = parse_schema("[struct]\nname = \"S\"\n[[member]]\nname = \"x\"\ntype = \"int\"\ndefault = [1]\n").unwrap_err();
        assert!(matches!(err, StructGenError::InvalidValue { ref key, .. } if key == "member[0].default"));

        let err = parse_schema("[struct\nname = ").unwrap_err();
        assert!(matches!(err, StructGenError::ParseError { .. }));
    }

    #[test]
    fn parse_error_carries_location() {
        let err = parse_schema("[struct]\nname = \"S\"\nbroken = \n").unwrap_err();
        match err {
            StructGenError::ParseError { line, column, .. } => {
                assert_eq!(line, 3);
                assert!(column >= 1);
            }
            other => panic!("unexpected error {:?}", other),
        }
        assert!(parse_schema("[struct]\nname = \"S\"\nbroken = \n")
            .unwrap_err()
            .to_string()
            .starts_with("Parse error at line 3, column "));
    }

    #[test]
    fn negative_array_literal_is_accepted() {
        let schema = parse_schema("[struct]\nname = \"S\"\n[[member]]\nname = \"x\"\ntype = \"char\"\narray = -3\n").unwrap();
        assert_eq!(schema.members[0].array, Some(ArrayLength::Count(-3)));
    }

    #[test]
    fn bit_field_wins_over_array() {
        let schema = parse_schema("[struct]\nname = \"S\"\n[[member]]\nname = \"x\"\ntype = \"unsigned\"\nbits = 4\narray = 2\n").unwrap();
        assert!(schema.members[0].is_bit_field());
        assert_eq!(schema.members[0].array, None);
    }

    #[test]
    fn missing_file() {
        let err = load_schema_file(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert_eq!(err.to_string(), "file not found: /definitely/not/here.toml");
    }

    #[test]
    fn loads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("s.toml");
        fs::write(&path, "[struct]\nname = \"S\"\n[[member]]\nname = \"x\"\ntype = \"int\"\n").unwrap();
        let schema = load_schema_file(&path).unwrap();
        assert_eq!(schema.name, "S");
    }
}
