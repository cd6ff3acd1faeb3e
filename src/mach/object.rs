use crate::error;
use crate::mem::{Arena, Error};
use std::convert::TryInto;

type Result<T> = std::result::Result<T, Error>;

/// Bytes occupied by one value in arena storage.
pub const OBJECT_SIZE: usize = 16;

const TYPE_MASK: u32 = 0x1F;
const ACCESS_OFFSET: u32 = 5;
const ACCESS_MASK: u32 = 0x3 << ACCESS_OFFSET;
const BANK_FLAG: u32 = 1 << 7;

/// Which of a context's two arenas owns a value or receives an allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bank {
    Local,
    Global,
}

impl Default for Bank {
    fn default() -> Bank {
        Bank::Local
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    None = 0,
    WriteOnly = 1,
    ReadOnly = 2,
    Unlimited = 3,
}

impl Access {
    pub fn readable(self) -> bool {
        matches!(self, Access::ReadOnly | Access::Unlimited)
    }

    pub fn writeable(self) -> bool {
        matches!(self, Access::WriteOnly | Access::Unlimited)
    }

    fn from_bits(bits: u32) -> Access {
        match bits & 0x3 {
            0 => Access::None,
            1 => Access::WriteOnly,
            2 => Access::ReadOnly,
            _ => Access::Unlimited,
        }
    }
}

/// A view of `sz` elements starting `off` elements into entity `ent`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Composite {
    pub access: Access,
    pub bank: Bank,
    pub sz: u32,
    pub ent: u32,
    pub off: u32,
}

impl Composite {
    pub fn new(sz: u32, ent: u32) -> Composite {
        Composite {
            access: Access::Unlimited,
            bank: Bank::Local,
            sz,
            ent,
            off: 0,
        }
    }
}

/// One save level: its depth and the stack of stash records made in it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Save {
    pub lev: u32,
    pub stk: u32,
}

/// Entity `src` was copied to `cpy` before its first change in a save level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Saverec {
    pub src: u32,
    pub cpy: u32,
}

/// ## Tagged value
///
/// Immediates carry their payload; composites carry a handle into an arena.

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Object {
    Invalid,
    Null,
    Mark,
    Boolean(bool),
    Integer(i32),
    Real(f32),
    Array(Composite),
    String(Composite),
    Dict(Composite),
    Save(Save),
    Saverec(Saverec),
}

impl Object {
    fn type_code(&self) -> u32 {
        use Object::*;
        match self {
            Invalid => 0,
            Null => 1,
            Mark => 2,
            Boolean(_) => 3,
            Integer(_) => 4,
            Real(_) => 5,
            Array(_) => 6,
            String(_) => 7,
            Dict(_) => 8,
            Save(_) => 9,
            Saverec(_) => 10,
        }
    }

    pub fn type_name(&self) -> &'static str {
        use Object::*;
        match self {
            Invalid => "invalidtype",
            Null => "nulltype",
            Mark => "marktype",
            Boolean(_) => "booleantype",
            Integer(_) => "integertype",
            Real(_) => "realtype",
            Array(_) => "arraytype",
            String(_) => "stringtype",
            Dict(_) => "dicttype",
            Save(_) => "savetype",
            Saverec(_) => "saverectype",
        }
    }

    pub fn composite(&self) -> Option<Composite> {
        match self {
            Object::Array(c) | Object::String(c) | Object::Dict(c) => Some(*c),
            _ => None,
        }
    }

    pub fn is_composite(&self) -> bool {
        self.composite().is_some()
    }

    /// The owning bank. Immediates belong to no arena and report local.
    pub fn bank(&self) -> Bank {
        self.composite().map_or(Bank::Local, |c| c.bank)
    }

    fn with_composite(self, c: Composite) -> Object {
        match self {
            Object::Array(_) => Object::Array(c),
            Object::String(_) => Object::String(c),
            Object::Dict(_) => Object::Dict(c),
            other => other,
        }
    }

    pub fn in_bank(self, bank: Bank) -> Object {
        match self.composite() {
            Some(c) => self.with_composite(Composite { bank, ..c }),
            None => self,
        }
    }

    /// Narrow the access rights of a composite. Rights never widen.
    pub fn with_access(self, access: Access) -> Result<Object> {
        let c = self
            .composite()
            .ok_or_else(|| error!(TypeCheck, "with_access"))?;
        if (access.readable() && !c.access.readable())
            || (access.writeable() && !c.access.writeable())
        {
            return Err(error!(InvalidAccess, "with_access"));
        }
        Ok(self.with_composite(Composite { access, ..c }))
    }

    /// Same storage, fewer elements: `off` more elements in, `sz` long.
    /// Shared by every composite kind; the arena is never touched.
    pub fn interval(self, off: i32, sz: i32) -> Result<Object> {
        let c = self
            .composite()
            .ok_or_else(|| error!(TypeCheck, "interval"))?;
        if off < 0 || sz < 0 || off as u64 + sz as u64 > c.sz as u64 {
            return Err(error!(RangeCheck, "interval"; "interval can only shrink"));
        }
        Ok(self.with_composite(Composite {
            off: c.off + off as u32,
            sz: sz as u32,
            ..c
        }))
    }

    pub fn to_bytes(&self) -> [u8; OBJECT_SIZE] {
        let mut tag = self.type_code();
        let mut words = [0u32; 3];
        match *self {
            Object::Invalid | Object::Null | Object::Mark => {}
            Object::Boolean(b) => words[0] = b as u32,
            Object::Integer(i) => words[0] = i as u32,
            Object::Real(r) => words[0] = r.to_bits(),
            Object::Array(c) | Object::String(c) | Object::Dict(c) => {
                tag |= (c.access as u32) << ACCESS_OFFSET;
                if c.bank == Bank::Global {
                    tag |= BANK_FLAG;
                }
                words = [c.sz, c.ent, c.off];
            }
            Object::Save(s) => words = [s.lev, s.stk, 0],
            Object::Saverec(r) => words = [r.src, r.cpy, 0],
        }
        let mut bytes = [0u8; OBJECT_SIZE];
        bytes[0..4].copy_from_slice(&tag.to_le_bytes());
        for (i, w) in words.iter().enumerate() {
            bytes[4 + i * 4..8 + i * 4].copy_from_slice(&w.to_le_bytes());
        }
        bytes
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Object> {
        if bytes.len() != OBJECT_SIZE {
            return Err(error!(Unregistered, "from_bytes"; "bad object width"));
        }
        let word = |i: usize| -> u32 { read_word(bytes, i).unwrap_or(0) };
        let tag = word(0);
        let c = || Composite {
            access: Access::from_bits((tag & ACCESS_MASK) >> ACCESS_OFFSET),
            bank: if tag & BANK_FLAG != 0 {
                Bank::Global
            } else {
                Bank::Local
            },
            sz: word(1),
            ent: word(2),
            off: word(3),
        };
        Ok(match tag & TYPE_MASK {
            0 => Object::Invalid,
            1 => Object::Null,
            2 => Object::Mark,
            3 => Object::Boolean(word(1) != 0),
            4 => Object::Integer(word(1) as i32),
            5 => Object::Real(f32::from_bits(word(1))),
            6 => Object::Array(c()),
            7 => Object::String(c()),
            8 => Object::Dict(c()),
            9 => Object::Save(Save {
                lev: word(1),
                stk: word(2),
            }),
            10 => Object::Saverec(Saverec {
                src: word(1),
                cpy: word(2),
            }),
            _ => return Err(error!(Unregistered, "from_bytes"; "unknown type tag")),
        })
    }
}

impl Default for Object {
    fn default() -> Object {
        Object::Null
    }
}

impl std::fmt::Display for Object {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Object::*;
        match self {
            Invalid => write!(f, "-invalid-"),
            Null => write!(f, "null"),
            Mark => write!(f, "-mark-"),
            Boolean(b) => write!(f, "{}", b),
            Integer(i) => write!(f, "{}", i),
            Real(r) => write!(f, "{:?}", r),
            Array(c) => write!(f, "-array {}:{}+{}-", c.ent, c.off, c.sz),
            String(c) => write!(f, "-string {}:{}+{}-", c.ent, c.off, c.sz),
            Dict(c) => write!(f, "-dict {}:{}+{}-", c.ent, c.off, c.sz),
            Save(s) => write!(f, "-save {}-", s.lev),
            Saverec(r) => write!(f, "-saverec {}>{}-", r.src, r.cpy),
        }
    }
}

impl Arena {
    /// Read the `index`th value slot of an entity.
    pub fn get_object(&self, ent: u32, index: usize) -> Result<Object> {
        let bytes = self.get(ent, index, OBJECT_SIZE)?;
        Object::from_bytes(bytes)
    }

    pub fn put_object(&mut self, ent: u32, index: usize, o: &Object) -> Result<()> {
        self.put(ent, index, OBJECT_SIZE, &o.to_bytes())
    }
}

/// Read a little endian word out of raw slot bytes.
pub(crate) fn read_word(bytes: &[u8], i: usize) -> Result<u32> {
    bytes
        .get(i * 4..i * 4 + 4)
        .and_then(|w| w.try_into().ok())
        .map(u32::from_le_bytes)
        .ok_or_else(|| error!(Unregistered, "read_word"))
}
