//! Data model for Brine Struct field schemas.
//!
//! A [`Schema`] describes one record: its name, an optional namespace, the
//! headers it needs, a table of named integer constants used to size arrays,
//! and the ordered list of [`Member`]s. The compiler crate loads it from TOML
//! and turns it into a C++ struct declaration.
//!
//! ```
//! use brine_struct_schema::*;
//!
//! let schema = Schema::new("Point", vec![
//!     Member::new("x", "float").with_default(DefaultValue::Float(0.5)),
//!     Member::new("y", "float"),
//!     Member::new("flags", "uint32_t").with_bits(3),
//! ]);
//!
//! assert_eq!(schema.members.len(), 3);
//! assert!(schema.members[2].is_bit_field());
//! ```

pub mod schema;

pub use schema::*;
