use super::{Error, Mark};
use crate::error;
use tracing::trace;

type Result<T> = std::result::Result<T, Error>;

/// What an entity's storage holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Reserved,
    Free,
    Array,
    String,
    Dict,
    Stack,
}

/// One row of the entity table. `sz` is the capacity of the storage,
/// which for a reused entry may exceed the size last requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entry {
    pub adr: usize,
    pub sz: usize,
    pub mark: Mark,
    pub kind: Kind,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    pub entities: usize,
    pub free_entities: usize,
    pub bytes_in_use: usize,
    pub collectable: usize,
}

/// ## Handle addressed memory
///
/// A growable byte region and the table that names regions of it.
/// Entity 0 is reserved and owns no storage. Consumers never see an
/// address; every access goes through a handle and is checked against
/// the entity's size.

#[derive(Debug)]
pub struct Arena {
    mem: Vec<u8>,
    tab: Vec<Entry>,
    free: Vec<u32>,
    limit: usize,
    collectable: usize,
    pub(crate) vs: u32,
}

impl Arena {
    pub fn new(limit: usize) -> Arena {
        Arena {
            mem: vec![],
            tab: vec![Entry {
                adr: 0,
                sz: 0,
                mark: Mark::default(),
                kind: Kind::Reserved,
            }],
            free: vec![],
            limit,
            collectable: 0,
            vs: 0,
        }
    }

    pub fn stats(&self) -> Stats {
        let free_entities = self.free.len();
        Stats {
            entities: self.tab.len() - 1 - free_entities,
            free_entities,
            bytes_in_use: self
                .tab
                .iter()
                .filter(|e| e.kind != Kind::Free)
                .map(|e| e.sz)
                .sum(),
            collectable: self.collectable,
        }
    }

    /// Find storage for `sz` bytes. A freed entry large enough is reused
    /// first, keeping its capacity, otherwise the region grows.
    pub fn allocate(&mut self, sz: usize, kind: Kind) -> Result<u32> {
        debug_assert!(kind != Kind::Free && kind != Kind::Reserved);
        if let Some(pos) = self
            .free
            .iter()
            .position(|&ent| self.tab[ent as usize].sz >= sz)
        {
            let ent = self.free.remove(pos);
            let entry = &mut self.tab[ent as usize];
            entry.mark = Mark::default();
            entry.kind = kind;
            let range = entry.adr..entry.adr + entry.sz;
            for b in &mut self.mem[range] {
                *b = 0;
            }
            trace!(ent, sz, ?kind, "entity reused");
            return Ok(ent);
        }
        let adr = self.mem.len();
        if adr + sz > self.limit {
            return Err(error!(VmError, "allocate"; "arena limit reached"));
        }
        if self.tab.len() > u32::max_value() as usize {
            return Err(error!(VmError, "allocate"; "entity table full"));
        }
        self.mem.resize(adr + sz, 0);
        let ent = self.tab.len() as u32;
        self.tab.push(Entry {
            adr,
            sz,
            mark: Mark::default(),
            kind,
        });
        trace!(ent, adr, sz, ?kind, "entity allocated");
        Ok(ent)
    }

    /// Allocation visible to the collector.
    pub fn gballoc(&mut self, sz: usize, kind: Kind) -> Result<u32> {
        let ent = self.allocate(sz, kind)?;
        self.collectable += 1;
        Ok(ent)
    }

    pub fn locate(&self, ent: u32) -> Result<Entry> {
        match self.tab.get(ent as usize) {
            Some(entry) if entry.kind != Kind::Free => Ok(*entry),
            _ => Err(error!(Unregistered, "locate"; "no such entity")),
        }
    }

    pub fn free(&mut self, ent: u32) -> Result<()> {
        let entry = self.locate(ent)?;
        if entry.kind == Kind::Reserved {
            return Err(error!(Unregistered, "free"; "reserved entity"));
        }
        self.tab[ent as usize].kind = Kind::Free;
        self.free.push(ent);
        trace!(ent, sz = entry.sz, "entity freed");
        Ok(())
    }

    pub fn set_mark(&mut self, ent: u32, mark: Mark) -> Result<()> {
        self.locate(ent)?;
        self.tab[ent as usize].mark = mark;
        Ok(())
    }

    /// Lower every live entity's top level to at most `level`. Entities
    /// stamped in a level that no longer exists must not look stashed in
    /// a later level of the same depth.
    pub fn clamp_top_levels(&mut self, level: u32) -> usize {
        let mut clamped = 0;
        for entry in self.tab.iter_mut().filter(|e| e.kind != Kind::Free) {
            if entry.mark.top_level() > level {
                entry.mark = entry.mark.with_top_level(level);
                clamped += 1;
            }
        }
        clamped
    }

    /// Bytes of element `offset`, each element `sz` bytes wide.
    pub fn get(&self, ent: u32, offset: usize, sz: usize) -> Result<&[u8]> {
        let range = self.element_range(ent, offset, sz)?;
        Ok(&self.mem[range])
    }

    pub fn put(&mut self, ent: u32, offset: usize, sz: usize, src: &[u8]) -> Result<()> {
        debug_assert_eq!(src.len(), sz);
        let range = self.element_range(ent, offset, sz)?;
        self.mem[range].copy_from_slice(src);
        Ok(())
    }

    fn element_range(&self, ent: u32, offset: usize, sz: usize) -> Result<std::ops::Range<usize>> {
        let entry = self.locate(ent)?;
        let start = offset
            .checked_mul(sz)
            .filter(|start| start + sz <= entry.sz)
            .ok_or_else(|| error!(Unregistered, "get"; "outside entity storage"))?;
        Ok(entry.adr + start..entry.adr + start + sz)
    }

    /// Overwrite `dst`'s storage with `src`'s. `dst` must be at least as large.
    pub fn copy_storage(&mut self, src: u32, dst: u32) -> Result<()> {
        let from = self.locate(src)?;
        let to = self.locate(dst)?;
        if to.sz < from.sz {
            return Err(error!(Unregistered, "copy_storage"; "destination too small"));
        }
        self.mem.copy_within(from.adr..from.adr + from.sz, to.adr);
        Ok(())
    }

    /// Exchange the storage and marks of two entities. Handles held by
    /// values stay valid and now see the other entity's contents.
    pub fn swap_entries(&mut self, a: u32, b: u32) -> Result<()> {
        let ea = self.locate(a)?;
        let eb = self.locate(b)?;
        let (a, b) = (a as usize, b as usize);
        self.tab[a].adr = eb.adr;
        self.tab[a].sz = eb.sz;
        self.tab[a].mark = eb.mark;
        self.tab[b].adr = ea.adr;
        self.tab[b].sz = ea.sz;
        self.tab[b].mark = ea.mark;
        Ok(())
    }
}
