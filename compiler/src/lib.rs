//! brine-struct-compiler
//!
//! This crate implements:
//!  1) A TOML loader for struct schemas (`parse_schema`, `load_schema_file`),
//!  2) Default-literal classification and the canonical type size table,
//!  3) Array length resolution against the `[define]` table,
//!  4) Bit-field packing and alignment (`LayoutState`),
//!  5) C++ header emission (`write_header` / `compile_schema_to_cpp`),
//!  6) The error type (`StructGenError`).

pub mod error;
pub mod types;
pub mod utils;
pub mod parser;
pub mod classify;
pub mod array;
pub mod layout;
pub mod gen_cpp;

pub use parser::{load_schema_file, parse_schema};
pub use gen_cpp::{compile_schema_to_cpp, compute_layout, write_header, GenOptions};
