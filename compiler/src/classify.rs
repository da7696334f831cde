use brine_struct_schema::DefaultValue;
use tracing::warn;

use crate::{
    types::{DefaultKind, TypeSize},
    utils::escape_literal,
};

/// Byte size of a pointer on the canonical target.
pub const POINTER_SIZE: usize = 8;

/// Canonical LP64 sizes for the primitive types the generator knows about.
pub const SIZE_TABLE: [(&str, usize); 22] = [
    ("std::string",        24),
    ("char",               1),
    ("unsigned char",      1),
    ("short",              2),
    ("unsigned short",     2),
    ("int",                4),
    ("unsigned int",       4),
    ("long",               8),
    ("unsigned long",      8),
    ("long long",          8),
    ("unsigned long long", 8),
    ("size_t",             8),
    ("int8_t",             1),
    ("uint8_t",            1),
    ("int16_t",            2),
    ("uint16_t",           2),
    ("int32_t",            4),
    ("uint32_t",           4),
    ("int64_t",            8),
    ("uint64_t",           8),
    ("float",              4),
    ("double",             8),
];

impl TypeSize {
    pub fn bytes(self) -> usize {
        match self {
            TypeSize::Known(n) => n,
            TypeSize::Pointer => POINTER_SIZE,
            TypeSize::Fallback => 1,
        }
    }
}

/// Picks the literal syntax for a default value of `type_name`. Substring
/// checks run in a fixed order and the first hit wins; a sized `char` array
/// is a string buffer.
pub fn classify_default_kind(type_name: &str, array_size: usize) -> DefaultKind {
    if type_name.contains("string") {
        DefaultKind::String
    } else if type_name.contains("char") {
        if array_size > 0 {
            DefaultKind::String
        } else {
            DefaultKind::Char
        }
    } else if type_name.contains("float") {
        DefaultKind::Float
    } else if type_name.contains("double") {
        DefaultKind::Double
    } else {
        DefaultKind::Int
    }
}

/// Looks `type_name` up verbatim in [`SIZE_TABLE`].
pub fn lookup_size(type_name: &str) -> TypeSize {
    match SIZE_TABLE.iter().find(|(name, _)| *name == type_name) {
        Some(&(_, size)) => TypeSize::Known(size),
        None if type_name.contains('*') => TypeSize::Pointer,
        None => TypeSize::Fallback,
    }
}

pub fn size_of(type_name: &str) -> usize {
    lookup_size(type_name).bytes()
}

/// Renders `value` as a literal of the given kind, or `None` when the schema
/// value has a shape the kind cannot take.
pub fn render_default(kind: DefaultKind, value: &DefaultValue) -> Option<String> {
    let rendered = match (kind, value) {
        (DefaultKind::String, DefaultValue::Str(s)) => format!("\"{}\"", escape_literal(s, '"')),
        (DefaultKind::Char, DefaultValue::Str(s)) => format!("'{}'", escape_literal(s, '\'')),
        (DefaultKind::Float, v) => format!("{}f", float_literal(v)?),
        (DefaultKind::Double, v) => float_literal(v)?,
        (DefaultKind::Int, DefaultValue::Int(n)) => n.to_string(),
        (kind, value) => {
            warn!(?kind, ?value, "default value does not fit the member type, skipping");
            return None;
        }
    };
    Some(rendered)
}

// `{:?}` keeps the decimal point on whole numbers, so 2.0 stays "2.0".
fn float_literal(value: &DefaultValue) -> Option<String> {
    let f = match value {
        DefaultValue::Float(f) => *f,
        DefaultValue::Int(n) => *n as f64,
        other => {
            warn!(value = ?other, "expected a numeric default for a floating point member, skipping");
            return None;
        }
    };
    if !f.is_finite() {
        warn!(value = f, "non-finite default cannot be written as a literal, skipping");
        return None;
    }
    Some(format!("{:?}", f))
}
