use super::object::{read_word, OBJECT_SIZE};
use super::Object;
use crate::error;
use crate::mem::{Arena, Error, Kind};
use tracing::trace;

type Result<T> = std::result::Result<T, Error>;

/// Value slots per segment.
pub const SEGMENT_SIZE: usize = 20;

/// Slot 0 of every segment holds the header; values follow.
const SEGMENT_BYTES: usize = (SEGMENT_SIZE + 1) * OBJECT_SIZE;

/// ## Segmented stack
///
/// A chain of fixed size segments living in an arena, named by the handle
/// of its first segment. Pushing onto a full segment moves on to the next
/// one, linking a fresh segment when the chain runs out. Segments are only
/// returned to the arena by `free`.
///
/// Every segment before the first non-full one is full and every segment
/// after it is empty, so counting and indexing can skip whole segments.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stack(u32);

#[derive(Debug, Clone, Copy)]
struct Header {
    nextseg: u32,
    top: usize,
}

fn header(arena: &Arena, seg: u32) -> Result<Header> {
    let bytes = arena.get(seg, 0, OBJECT_SIZE)?;
    Ok(Header {
        nextseg: read_word(bytes, 0)?,
        top: read_word(bytes, 1)? as usize,
    })
}

fn set_header(arena: &mut Arena, seg: u32, h: Header) -> Result<()> {
    let mut bytes = [0u8; OBJECT_SIZE];
    bytes[0..4].copy_from_slice(&h.nextseg.to_le_bytes());
    bytes[4..8].copy_from_slice(&(h.top as u32).to_le_bytes());
    arena.put(seg, 0, OBJECT_SIZE, &bytes)
}

fn new_segment(arena: &mut Arena) -> Result<u32> {
    let seg = arena.allocate(SEGMENT_BYTES, Kind::Stack)?;
    set_header(arena, seg, Header { nextseg: 0, top: 0 })?;
    Ok(seg)
}

fn next(h: Header) -> Result<u32> {
    if h.nextseg == 0 {
        Err(error!(Unregistered, "stack"; "broken segment chain"))
    } else {
        Ok(h.nextseg)
    }
}

impl Stack {
    pub fn init(arena: &mut Arena) -> Result<Stack> {
        Ok(Stack(new_segment(arena)?))
    }

    pub fn from_handle(ent: u32) -> Stack {
        Stack(ent)
    }

    pub fn handle(self) -> u32 {
        self.0
    }

    /// The first segment that is not full, with its header.
    fn current(self, arena: &Arena) -> Result<(u32, Header)> {
        let mut seg = self.0;
        let mut h = header(arena, seg)?;
        while h.top == SEGMENT_SIZE {
            seg = next(h)?;
            h = header(arena, seg)?;
        }
        Ok((seg, h))
    }

    pub fn count(self, arena: &Arena) -> Result<usize> {
        let mut seg = self.0;
        let mut h = header(arena, seg)?;
        let mut ct = 0;
        while h.top == SEGMENT_SIZE {
            ct += SEGMENT_SIZE;
            seg = next(h)?;
            h = header(arena, seg)?;
        }
        Ok(ct + h.top)
    }

    pub fn is_empty(self, arena: &Arena) -> Result<bool> {
        Ok(self.count(arena)? == 0)
    }

    pub fn push(self, arena: &mut Arena, o: Object) -> Result<()> {
        let (seg, mut h) = self.current(arena)?;
        if h.top + 1 == SEGMENT_SIZE {
            // This push fills the segment; the next push lands one link on.
            if h.nextseg == 0 {
                h.nextseg = new_segment(arena)?;
                trace!(seg, nextseg = h.nextseg, "stack segment linked");
            } else {
                let mut n = header(arena, h.nextseg)?;
                n.top = 0;
                set_header(arena, h.nextseg, n)?;
            }
        }
        arena.put_object(seg, 1 + h.top, &o)?;
        h.top += 1;
        set_header(arena, seg, h)
    }

    pub fn pop(self, arena: &mut Arena) -> Result<Object> {
        let mut prev = None;
        let mut seg = self.0;
        let mut h = header(arena, seg)?;
        while h.top == SEGMENT_SIZE {
            prev = Some(seg);
            seg = next(h)?;
            h = header(arena, seg)?;
        }
        if h.top == 0 {
            match prev {
                Some(p) => {
                    seg = p;
                    h = header(arena, p)?;
                }
                None => return Err(error!(StackUnderflow, "pop")),
            }
        }
        h.top -= 1;
        set_header(arena, seg, h)?;
        arena.get_object(seg, 1 + h.top)
    }

    /// The segment and slot holding the `i`th value from the bottom.
    fn locate(self, arena: &Arena, mut i: usize, op: &'static str) -> Result<(u32, usize)> {
        if i >= self.count(arena)? {
            return Err(error!(StackUnderflow, op));
        }
        let mut seg = self.0;
        while i >= SEGMENT_SIZE {
            i -= SEGMENT_SIZE;
            let h = header(arena, seg)?;
            if h.nextseg == 0 {
                return Err(error!(StackUnderflow, op));
            }
            seg = h.nextseg;
        }
        Ok((seg, 1 + i))
    }

    /// Index from the bottom; 0 is the first value pushed.
    pub fn bot(self, arena: &Arena, i: usize) -> Result<Object> {
        let (seg, slot) = self.locate(arena, i, "bot")?;
        arena.get_object(seg, slot)
    }

    /// Replace the `i`th value from the bottom.
    pub fn tob(self, arena: &mut Arena, i: usize, o: Object) -> Result<()> {
        let (seg, slot) = self.locate(arena, i, "tob")?;
        arena.put_object(seg, slot, &o)
    }

    /// Index from the top; 0 is the most recent push.
    pub fn top(self, arena: &Arena, i: usize) -> Result<Object> {
        let cnt = self.count(arena)?;
        if i >= cnt {
            return Err(error!(StackUnderflow, "top"));
        }
        self.bot(arena, cnt - 1 - i)
    }

    /// Replace the `i`th value from the top.
    pub fn pot(self, arena: &mut Arena, i: usize, o: Object) -> Result<()> {
        let cnt = self.count(arena)?;
        if i >= cnt {
            return Err(error!(StackUnderflow, "pot"));
        }
        self.tob(arena, cnt - 1 - i, o)
    }

    /// Return every segment of the chain to the arena, last link first.
    pub fn free(self, arena: &mut Arena) -> Result<()> {
        let mut chain = vec![self.0];
        let mut h = header(arena, self.0)?;
        while h.nextseg != 0 {
            chain.push(h.nextseg);
            h = header(arena, h.nextseg)?;
        }
        for seg in chain.into_iter().rev() {
            arena.free(seg)?;
        }
        Ok(())
    }

    /// One line per value, bottom first, numbered from 0.
    pub fn dump(self, arena: &Arena) -> Result<String> {
        let mut s = String::new();
        let mut seg = self.0;
        let mut a = 0;
        loop {
            let h = header(arena, seg)?;
            for slot in 0..h.top {
                s.push_str(&format!("{}:{}\n", a, arena.get_object(seg, 1 + slot)?));
                a += 1;
            }
            if h.top != SEGMENT_SIZE {
                break;
            }
            seg = next(h)?;
        }
        Ok(s)
    }
}
