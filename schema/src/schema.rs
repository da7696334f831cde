use std::collections::HashMap;
use std::fmt;

/// Symbol table used to resolve named array lengths.
pub type DefineTable = HashMap<String, i64>;

/// A whole record definition, as read from one schema document.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    pub name:      String,
    pub namespace: Option<String>,
    pub includes:  Option<Vec<String>>,
    pub defines:   Option<DefineTable>,
    pub members:   Vec<Member>,
}

impl Schema {
    pub fn new(name: impl Into<String>, members: Vec<Member>) -> Schema {
        Schema {
            name: name.into(),
            namespace: None,
            includes: None,
            defines: None,
            members,
        }
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Schema {
        self.namespace = Some(namespace.into());
        self
    }

    pub fn with_includes<I, S>(mut self, includes: I) -> Schema
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.includes = Some(includes.into_iter().map(Into::into).collect());
        self
    }

    /// Adds one named constant, creating the define table on first use.
    pub fn with_define(mut self, name: impl Into<String>, value: i64) -> Schema {
        self.defines
            .get_or_insert_with(DefineTable::new)
            .insert(name.into(), value);
        self
    }
}

/// One record member. A member with `bits` set is a bit-field and never
/// carries an array length.
#[derive(Debug, Clone, PartialEq)]
pub struct Member {
    pub name:      String,
    pub type_name: String,
    pub bits:      Option<u32>,
    pub array:     Option<ArrayLength>,
    pub default:   Option<DefaultValue>,
}

impl Member {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Member {
        Member {
            name: name.into(),
            type_name: type_name.into(),
            bits: None,
            array: None,
            default: None,
        }
    }

    pub fn with_bits(mut self, bits: u32) -> Member {
        self.bits = Some(bits);
        self.array = None;
        self
    }

    pub fn with_array(mut self, array: ArrayLength) -> Member {
        if self.bits.is_none() {
            self.array = Some(array);
        }
        self
    }

    pub fn with_default(mut self, default: DefaultValue) -> Member {
        self.default = Some(default);
        self
    }

    pub fn is_bit_field(&self) -> bool {
        self.bits.is_some()
    }
}

/// Declared array length: either a literal count or a symbol expected to be
/// found in the define table. Literals are kept as written, negative included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArrayLength {
    Count(i64),
    Symbol(String),
}

impl fmt::Display for ArrayLength {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ArrayLength::Count(n) => write!(f, "{}", n),
            ArrayLength::Symbol(s) => f.write_str(s),
        }
    }
}

/// Default value literal as it appeared in the schema. How it gets quoted
/// depends on the member's type, not on this variant alone.
#[derive(Debug, Clone, PartialEq)]
pub enum DefaultValue {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}
