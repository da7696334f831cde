use std::io::Write;

use brine_struct_schema::{DefineTable, Member, Schema};
use tracing::debug;

use crate::{
    array::resolve_array,
    classify::{classify_default_kind, lookup_size, render_default},
    error::StructGenError,
    layout::{LayoutState, Placement},
    types::{LayoutReport, MemberLayout, TypeSize},
    utils::{sanitize_identifier, unique_token},
};

/// Settings for one generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenOptions {
    /// Named in the leading `// input config file:` comment.
    pub source_name: String,
    /// Appended to the struct name to form the include guard label.
    pub guard_token: String,
}

impl GenOptions {
    /// Options with a freshly generated guard token.
    pub fn new(source_name: impl Into<String>) -> GenOptions {
        GenOptions {
            source_name: source_name.into(),
            guard_token: unique_token(),
        }
    }

    pub fn with_guard_token(mut self, token: impl Into<String>) -> GenOptions {
        self.guard_token = token.into();
        self
    }
}

/// One member's declaration text and where it landed.
struct PlannedMember {
    declaration: String,
    placement:   Placement,
}

fn overflow(key: String) -> StructGenError {
    StructGenError::InvalidValue {
        key,
        msg: "struct size does not fit in usize".to_string(),
    }
}

fn plan_member(
    state: &mut LayoutState,
    index: usize,
    member: &Member,
    defines: Option<&DefineTable>,
) -> Result<PlannedMember, StructGenError> {
    if let Some(bits) = member.bits {
        let placement = state
            .place_bit_field(bits)
            .ok_or_else(|| overflow(format!("member[{}].bits", index)))?;
        return Ok(PlannedMember {
            declaration: format!("{} {} : {}", member.type_name, member.name, bits),
            placement,
        });
    }

    let mut declaration = format!("{} {}", member.type_name, member.name);

    let array = resolve_array(member, defines);
    declaration.push_str(&array.suffix);

    if let Some(value) = &member.default {
        let kind = classify_default_kind(&member.type_name, array.count.element_count());
        if let Some(literal) = render_default(kind, value) {
            declaration.push_str(&format!("{{ {} }}", literal));
        }
    }

    let size = lookup_size(&member.type_name);
    if size == TypeSize::Fallback {
        debug!(member = %member.name, type_name = %member.type_name, "unknown type, counting one byte");
    }
    let placement = state
        .place_member(size.bytes(), array.count.multiplier())
        .ok_or_else(|| {
            let field = if member.array.is_some() { "array" } else { "type" };
            overflow(format!("member[{}].{}", index, field))
        })?;

    Ok(PlannedMember {
        declaration,
        placement,
    })
}

fn finish(state: LayoutState) -> Result<usize, StructGenError> {
    state.finish().ok_or_else(|| overflow("member".to_string()))
}

/// Runs the layout pass over `schema` and reports each member's placement
/// and the struct's total size.
pub fn compute_layout(schema: &Schema) -> Result<LayoutReport, StructGenError> {
    let mut state = LayoutState::new();
    let defines = schema.defines.as_ref();

    let mut members = Vec::with_capacity(schema.members.len());
    for (index, member) in schema.members.iter().enumerate() {
        let planned = plan_member(&mut state, index, member, defines)?;
        members.push(MemberLayout {
            name:       member.name.clone(),
            type_name:  member.type_name.clone(),
            offset:     planned.placement.offset,
            size:       planned.placement.size,
            bits:       member.bits,
            bit_offset: planned.placement.bit_offset,
        });
    }

    Ok(LayoutReport {
        name: schema.name.clone(),
        total_size: finish(state)?,
        members,
    })
}

/// Writes the header for `schema` to `out` in a single pass over the
/// members. Returns the computed struct size in bytes.
pub fn write_header<W: Write>(
    schema: &Schema,
    options: &GenOptions,
    mut out: W,
) -> Result<usize, StructGenError> {
    let guard = format!("{}_{}", sanitize_identifier(&schema.name), options.guard_token);

    writeln!(out, "// input config file: {}", options.source_name)?;
    writeln!(out, "#ifndef {}", guard)?;
    writeln!(out, "#define {}", guard)?;

    if let Some(includes) = &schema.includes {
        for include in includes {
            writeln!(out, "#include <{}>", include)?;
        }
    }

    if let Some(namespace) = &schema.namespace {
        writeln!(out, "namespace {} {{", namespace)?;
    }

    writeln!(out, "struct {} {{", schema.name)?;

    let mut state = LayoutState::new();
    let defines = schema.defines.as_ref();
    for (index, member) in schema.members.iter().enumerate() {
        let planned = plan_member(&mut state, index, member, defines)?;
        debug!(
            member = %member.name,
            offset = planned.placement.offset,
            size = planned.placement.size,
            "placed member"
        );
        writeln!(out, "\t{};", planned.declaration)?;
    }

    let total_size = finish(state)?;
    writeln!(out, "}}; // struct size = {} bytes.", total_size)?;

    if let Some(namespace) = &schema.namespace {
        writeln!(out, "}} // namespace {}", namespace)?;
    }

    writeln!(out, "#endif // {}", guard)?;
    out.flush()?;

    Ok(total_size)
}

/// Generates the header for `schema` into a `String`.
pub fn compile_schema_to_cpp(schema: &Schema, options: &GenOptions) -> Result<String, StructGenError> {
    let mut buffer = Vec::new();
    write_header(schema, options, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| StructGenError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}
