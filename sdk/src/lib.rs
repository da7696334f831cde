//! brine-struct
//!
//! Turns a TOML field schema into a C++ struct header whose closing line
//! carries the struct's computed size.
//!
//! ```
//! use brine_struct::*;
//!
//! let schema = parse_schema(r#"
//!     [struct]
//!     name = "Point"
//!
//!     [[member]]
//!     name = "x"
//!     type = "float"
//!     default = 0.5
//!
//!     [[member]]
//!     name = "visible"
//!     type = "unsigned"
//!     bits = 1
//! "#).unwrap();
//!
//! let options = GenOptions::new("point.toml").with_guard_token("1");
//! let header = compile_schema_to_cpp(&schema, &options).unwrap();
//! assert!(header.contains("\tfloat x{ 0.5f };\n"));
//! assert!(header.contains("}; // struct size = 8 bytes.\n"));
//! ```

use std::path::Path;

pub use brine_struct_compiler::error::StructGenError;
pub use brine_struct_compiler::types::LayoutReport;
pub use brine_struct_compiler::{
    compile_schema_to_cpp, compute_layout, load_schema_file, parse_schema, write_header, GenOptions,
};
pub use brine_struct_schema::{ArrayLength, DefaultValue, DefineTable, Member, Schema};

/// Loads the schema at `path` and generates its header, naming `path` in the
/// leading comment.
pub fn header_from_file(path: &Path) -> Result<String, StructGenError> {
    let schema = load_schema_file(path)?;
    compile_schema_to_cpp(&schema, &GenOptions::new(path.display().to_string()))
}

/// Computes the layout of `schema` as a pretty-printed JSON string.
pub fn layout_to_json(schema: &Schema) -> Result<String, StructGenError> {
    Ok(serde_json::to_string_pretty(&compute_layout(schema)?)?)
}

pub mod error {
    pub use brine_struct_compiler::error::StructGenError;
}

pub mod schema {
    pub use brine_struct_schema::{ArrayLength, DefaultValue, DefineTable, Member, Schema};
}
