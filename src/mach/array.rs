use super::context::check_bank_write;
use super::object::OBJECT_SIZE;
use super::{Composite, Context, Object};
use crate::error;
use crate::mem::{Arena, Error, Kind, Mark};

type Result<T> = std::result::Result<T, Error>;

/// ## Arrays
///
/// An array value is a window `[off, off+sz)` onto an entity of value
/// slots. Empty arrays own no entity and use handle 0.

fn array(a: &Object, op: &'static str) -> Result<Composite> {
    match a {
        Object::Array(c) => Ok(*c),
        _ => Err(error!(TypeCheck, op)),
    }
}

fn index(c: &Composite, i: i32, op: &'static str) -> Result<usize> {
    if i < 0 || i as u32 >= c.sz {
        return Err(error!(RangeCheck, op));
    }
    Ok(c.off as usize + i as usize)
}

impl Arena {
    /// A new array of `sz` nulls with unlimited access, stamped with the
    /// current save level.
    pub fn cons_array(&mut self, sz: usize) -> Result<Object> {
        if sz == 0 {
            return Ok(Object::Array(Composite::new(0, 0)));
        }
        let bytes = sz
            .checked_mul(OBJECT_SIZE)
            .filter(|_| sz <= u32::max_value() as usize)
            .ok_or_else(|| error!(LimitCheck, "cons_array"))?;
        let ent = self.gballoc(bytes, Kind::Array)?;
        if let Err(e) = self.fill_new_array(ent, sz) {
            self.free(ent)?;
            return Err(e);
        }
        Ok(Object::Array(Composite::new(sz as u32, ent)))
    }

    fn fill_new_array(&mut self, ent: u32, sz: usize) -> Result<()> {
        let lev = self.save_level()?;
        self.set_mark(ent, Mark::new(lev))?;
        for i in 0..sz {
            self.put_object(ent, i, &Object::Null)?;
        }
        Ok(())
    }

    /// Store `o` at element `i`, first stashing the array's contents if
    /// this save level has not seen them yet.
    pub fn array_put(&mut self, a: Object, i: i32, o: Object) -> Result<()> {
        let c = array(&a, "array_put")?;
        let slot = index(&c, i, "array_put")?;
        if !self.stashed(c.ent)? {
            self.stash(Kind::Array, c.ent)?;
        }
        self.put_object(c.ent, slot, &o)
    }

    pub fn array_get(&self, a: Object, i: i32) -> Result<Object> {
        let c = array(&a, "array_get")?;
        let slot = index(&c, i, "array_get")?;
        self.get_object(c.ent, slot)
    }
}

impl Context {
    /// A new array in the bank selected by the allocation mode.
    pub fn cons_bank_array(&mut self, sz: usize) -> Result<Object> {
        let bank = self.vmmode;
        Ok(self.alloc_arena().cons_array(sz)?.in_bank(bank))
    }

    pub fn bank_array_put(&mut self, a: Object, i: i32, o: Object) -> Result<()> {
        let c = array(&a, "bank_array_put")?;
        if !c.access.writeable() {
            return Err(error!(InvalidAccess, "bank_array_put"));
        }
        check_bank_write(c.bank, &o, self.ignore_invalid_access, "bank_array_put")?;
        self.arena_mut(c.bank).array_put(a, i, o)
    }

    pub fn bank_array_get(&self, a: Object, i: i32) -> Result<Object> {
        let c = array(&a, "bank_array_get")?;
        if !c.access.readable() {
            return Err(error!(InvalidAccess, "bank_array_get"));
        }
        self.bank(&a).array_get(a, i)
    }
}
