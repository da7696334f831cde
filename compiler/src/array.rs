use brine_struct_schema::{ArrayLength, DefineTable, Member};
use tracing::debug;

use crate::types::{ArrayCount, ResolvedArray};

impl ArrayCount {
    /// Element count as seen by the default-value classifier; 0 for scalars.
    pub fn element_count(self) -> usize {
        match self {
            ArrayCount::Scalar => 0,
            ArrayCount::Literal(n) | ArrayCount::Defined(n) => n,
            ArrayCount::Unresolved => 1,
        }
    }

    /// Factor applied to the element size. A scalar and a one-element array
    /// occupy the same space.
    pub fn multiplier(self) -> usize {
        self.element_count().max(1)
    }
}

// Non-positive lengths count as zero elements; sizes too large for `usize`
// saturate and surface as an overflow in the layout pass.
fn count_from(value: i64) -> usize {
    if value <= 0 {
        0
    } else {
        usize::try_from(value).unwrap_or(usize::MAX)
    }
}

/// Produces the `[..]` declarator suffix for `member` and its element count.
/// Lengths are emitted as written; symbols are counted through `defines`.
pub fn resolve_array(member: &Member, defines: Option<&DefineTable>) -> ResolvedArray {
    let Some(length) = &member.array else {
        return ResolvedArray {
            suffix: String::new(),
            count:  ArrayCount::Scalar,
        };
    };

    let count = match length {
        ArrayLength::Count(n) => ArrayCount::Literal(count_from(*n)),
        ArrayLength::Symbol(symbol) => match defines.and_then(|table| table.get(symbol)) {
            Some(&value) => ArrayCount::Defined(count_from(value)),
            None => {
                debug!(member = %member.name, %symbol, "array length symbol is not defined, counting one element");
                ArrayCount::Unresolved
            }
        },
    };

    ResolvedArray {
        suffix: format!("[{}]", length),
        count,
    }
}
