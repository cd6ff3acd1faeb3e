use super::{Object, Save, Saverec, Stack};
use crate::error;
use crate::mem::{Arena, Error, Kind, MAX_SAVE_LEVEL};
use tracing::debug;

type Result<T> = std::result::Result<T, Error>;

/// ## Save and restore
///
/// Each arena keeps a stack of save levels, created on the first `save`.
/// A save level owns a stack of stash records. Before an entity is first
/// changed inside a level it is copied aside; `restore` puts the copies
/// back by exchanging table entries, so outstanding handles see the old
/// contents without any value being rewritten.

impl Arena {
    /// Current save depth: the number of levels on the save stack.
    pub fn save_level(&self) -> Result<u32> {
        if self.vs == 0 {
            Ok(0)
        } else {
            Ok(Stack::from_handle(self.vs).count(self)? as u32)
        }
    }

    pub fn save(&mut self) -> Result<Object> {
        if self.vs == 0 {
            self.vs = Stack::init(self)?.handle();
        }
        let lev = self.save_level()? + 1;
        if lev > MAX_SAVE_LEVEL {
            return Err(error!(LimitCheck, "save"));
        }
        let stk = Stack::init(self)?;
        let save = Object::Save(Save {
            lev,
            stk: stk.handle(),
        });
        if let Err(e) = Stack::from_handle(self.vs).push(self, save) {
            stk.free(self)?;
            return Err(e);
        }
        debug!(lev, "save");
        Ok(save)
    }

    pub fn restore(&mut self) -> Result<()> {
        if self.save_level()? == 0 {
            return Err(error!(InvalidRestore, "restore"));
        }
        let save = match Stack::from_handle(self.vs).pop(self)? {
            Object::Save(save) => save,
            _ => return Err(error!(Unregistered, "restore"; "corrupt save stack")),
        };
        let stk = Stack::from_handle(save.stk);
        let mut restored = 0;
        while !stk.is_empty(self)? {
            match stk.pop(self)? {
                Object::Saverec(rec) => {
                    self.swap_entries(rec.src, rec.cpy)?;
                    self.free(rec.cpy)?;
                    restored += 1;
                }
                _ => return Err(error!(Unregistered, "restore"; "corrupt save record")),
            }
        }
        stk.free(self)?;
        let clamped = self.clamp_top_levels(save.lev - 1);
        debug!(lev = save.lev, restored, clamped, "restore");
        Ok(())
    }

    /// Whether `ent` already has a copy recorded for the current level.
    pub fn stashed(&self, ent: u32) -> Result<bool> {
        Ok(self.locate(ent)?.mark.top_level() == self.save_level()?)
    }

    /// Record the contents of `ent` in the current save level. Outside
    /// any save there is nothing to restore to, and the entity is only
    /// stamped.
    pub fn stash(&mut self, kind: Kind, ent: u32) -> Result<()> {
        let lev = self.save_level()?;
        let entry = self.locate(ent)?;
        if lev > 0 {
            let cpy = self.gballoc(entry.sz, kind)?;
            self.copy_storage(ent, cpy)?;
            self.set_mark(cpy, entry.mark)?;
            if let Err(e) = self.record_stash(ent, cpy) {
                self.free(cpy)?;
                return Err(e);
            }
            debug!(ent, cpy, lev, "stash");
        }
        self.set_mark(ent, entry.mark.with_top_level(lev))
    }

    fn record_stash(&mut self, src: u32, cpy: u32) -> Result<()> {
        let save = match Stack::from_handle(self.vs).top(self, 0)? {
            Object::Save(save) => save,
            _ => return Err(error!(Unregistered, "stash"; "corrupt save stack")),
        };
        Stack::from_handle(save.stk).push(self, Object::Saverec(Saverec { src, cpy }))
    }
}
