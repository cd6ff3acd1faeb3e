/// ## Packed entity mark
///
/// One word per entity shared by the garbage collector and save/restore.
/// Bit 0 is the collector's mark bit, bits 1..8 a reference count, then two
/// 12 bit save levels: the level the entity was created at ("local level")
/// and the level it was last stashed or stamped at ("top level").

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Mark(u32);

const MARK_OFFSET: u32 = 0;
const RFCT_OFFSET: u32 = 1;
const RFCT_MASK: u32 = 0x7F;
const LLEV_OFFSET: u32 = 8;
const TLEV_OFFSET: u32 = 20;
const LEVEL_MASK: u32 = 0xFFF;

/// Deepest save level representable in a mark.
pub const MAX_SAVE_LEVEL: u32 = LEVEL_MASK;

impl Mark {
    /// A fresh mark with both save levels stamped to `level`.
    pub fn new(level: u32) -> Mark {
        debug_assert!(level <= MAX_SAVE_LEVEL);
        Mark(((level & LEVEL_MASK) << LLEV_OFFSET) | ((level & LEVEL_MASK) << TLEV_OFFSET))
    }

    pub fn is_marked(self) -> bool {
        (self.0 >> MARK_OFFSET) & 1 == 1
    }

    pub fn with_marked(self, marked: bool) -> Mark {
        if marked {
            Mark(self.0 | (1 << MARK_OFFSET))
        } else {
            Mark(self.0 & !(1 << MARK_OFFSET))
        }
    }

    pub fn refcount(self) -> u32 {
        (self.0 >> RFCT_OFFSET) & RFCT_MASK
    }

    pub fn local_level(self) -> u32 {
        (self.0 >> LLEV_OFFSET) & LEVEL_MASK
    }

    pub fn top_level(self) -> u32 {
        (self.0 >> TLEV_OFFSET) & LEVEL_MASK
    }

    pub fn with_top_level(self, level: u32) -> Mark {
        debug_assert!(level <= MAX_SAVE_LEVEL);
        let cleared = self.0 & !(LEVEL_MASK << TLEV_OFFSET);
        Mark(cleared | ((level & LEVEL_MASK) << TLEV_OFFSET))
    }
}
