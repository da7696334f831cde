//! Running size state for one generation pass: bit-field packing into
//! `unsigned` storage units and alignment padding for regular members.

/// Byte size of the storage unit adjacent bit-fields are packed into.
pub const UNIT_BYTES: usize = 4;
pub const UNIT_BITS: usize = UNIT_BYTES * 8;

/// Bits accumulated into the storage unit that has not been committed yet.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BitPacker {
    bit_count: usize,
}

impl BitPacker {
    pub fn new() -> BitPacker {
        BitPacker::default()
    }

    pub fn bit_count(&self) -> usize {
        self.bit_count
    }

    /// Adds a bit-field of `width` bits. Returns the bytes of a storage unit
    /// completed by this addition, or 0.
    pub fn accumulate(&mut self, width: usize) -> usize {
        self.bit_count += width;
        self.take_unit()
    }

    /// Treats a partially filled unit as full and commits it. No-op when
    /// nothing is pending.
    pub fn flush(&mut self) -> usize {
        if self.bit_count > 0 && self.bit_count < UNIT_BITS {
            self.bit_count = UNIT_BITS;
        }
        self.take_unit()
    }

    // At most one unit per call.
    fn take_unit(&mut self) -> usize {
        if self.bit_count >= UNIT_BITS {
            self.bit_count -= UNIT_BITS;
            UNIT_BYTES
        } else {
            0
        }
    }
}

fn padding(byte_count: usize, member_size: usize) -> usize {
    if member_size == 0 {
        return 0;
    }
    let remainder = byte_count % member_size;
    let padding = member_size - remainder;
    // only a remainder larger than the gap it leaves gets padded
    if remainder > padding {
        padding
    } else {
        0
    }
}

/// Pads `byte_count` ahead of a member of `member_size` bytes. Saturates at
/// `usize::MAX`; [`LayoutState`] reports overflow instead.
pub fn pad_for(byte_count: usize, member_size: usize) -> usize {
    byte_count.saturating_add(padding(byte_count, member_size))
}

/// Layout state threaded through the member list, in order. Every step
/// returns `None` once the running size no longer fits in `usize`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LayoutState {
    byte_count: usize,
    bits:       BitPacker,
}

/// Where a member landed in the running layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub offset:     usize,
    pub size:       usize,
    pub bit_offset: Option<usize>,
}

impl LayoutState {
    pub fn new() -> LayoutState {
        LayoutState::default()
    }

    pub fn byte_count(&self) -> usize {
        self.byte_count
    }

    pub fn bit_count(&self) -> usize {
        self.bits.bit_count()
    }

    pub fn place_bit_field(&mut self, width: u32) -> Option<Placement> {
        let offset = self.byte_count;
        let bit_offset = self.bits.bit_count();
        let committed = self.bits.accumulate(width as usize);
        self.byte_count = self.byte_count.checked_add(committed)?;
        Some(Placement {
            offset,
            size: committed,
            bit_offset: Some(bit_offset),
        })
    }

    /// Closes any pending bit-field run, aligns to `single_size`, then adds
    /// `single_size * multiplier` bytes.
    pub fn place_member(&mut self, single_size: usize, multiplier: usize) -> Option<Placement> {
        self.byte_count = self.byte_count.checked_add(self.bits.flush())?;
        self.align(single_size)?;
        let offset = self.byte_count;
        let size = single_size.checked_mul(multiplier)?;
        self.byte_count = self.byte_count.checked_add(size)?;
        Some(Placement {
            offset,
            size,
            bit_offset: None,
        })
    }

    /// Flushes pending bits and aligns the total against the storage unit.
    pub fn finish(mut self) -> Option<usize> {
        self.byte_count = self.byte_count.checked_add(self.bits.flush())?;
        self.align(UNIT_BYTES)?;
        Some(self.byte_count)
    }

    fn align(&mut self, member_size: usize) -> Option<()> {
        self.byte_count = self.byte_count.checked_add(padding(self.byte_count, member_size))?;
        Some(())
    }
}
