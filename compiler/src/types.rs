use serde::Serialize;

/// Literal syntax used when emitting a member's default value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultKind {
    String,
    Char,
    Float,
    Double,
    Int,
}

/// Byte size of a type name, and how it was determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeSize {
    /// Found in the canonical primitive table.
    Known(usize),
    /// Not in the table, but the name contains `*`.
    Pointer,
    /// Unrecognized type; counted as a single byte.
    Fallback,
}

/// Element count of a member, and how it was determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrayCount {
    /// No `array` key.
    Scalar,
    Literal(usize),
    /// Symbol found in the define table.
    Defined(usize),
    /// Symbol with no matching define; counted as one element.
    Unresolved,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedArray {
    pub suffix: String,
    pub count:  ArrayCount,
}

/// Result of the layout pass, without the generated text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LayoutReport {
    pub name:       String,
    pub total_size: usize,
    pub members:    Vec<MemberLayout>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemberLayout {
    pub name:       String,
    #[serde(rename = "type")]
    pub type_name:  String,
    /// Running byte count at which the member was placed.
    pub offset:     usize,
    /// Bytes committed to the running total by this member.
    pub size:       usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bits:       Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bit_offset: Option<usize>,
}
