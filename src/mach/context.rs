use super::{Bank, Object};
use crate::error;
use crate::mem::{Arena, Error};
use tracing::warn;

type Result<T> = std::result::Result<T, Error>;

/// ## Context configuration

#[derive(Debug, Clone)]
pub struct Config {
    /// Byte limit of the local arena.
    pub local_limit: usize,
    /// Byte limit of the global arena.
    pub global_limit: usize,
    /// Let local composites be stored into global ones.
    pub ignore_invalid_access: bool,
    /// Bank that receives new allocations.
    pub vmmode: Bank,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            local_limit: 16 << 20,
            global_limit: 16 << 20,
            ignore_invalid_access: false,
            vmmode: Bank::Local,
        }
    }
}

/// ## Execution context
///
/// Owns the local and global arenas and decides which one a value or an
/// allocation belongs to.

#[derive(Debug)]
pub struct Context {
    pub lo: Arena,
    pub gl: Arena,
    pub vmmode: Bank,
    pub ignore_invalid_access: bool,
}

impl Default for Context {
    fn default() -> Context {
        Context::with_config(Config::default())
    }
}

impl Context {
    pub fn new() -> Context {
        Context::default()
    }

    pub fn with_config(config: Config) -> Context {
        Context {
            lo: Arena::new(config.local_limit),
            gl: Arena::new(config.global_limit),
            vmmode: config.vmmode,
            ignore_invalid_access: config.ignore_invalid_access,
        }
    }

    pub fn arena(&self, bank: Bank) -> &Arena {
        match bank {
            Bank::Local => &self.lo,
            Bank::Global => &self.gl,
        }
    }

    pub fn arena_mut(&mut self, bank: Bank) -> &mut Arena {
        match bank {
            Bank::Local => &mut self.lo,
            Bank::Global => &mut self.gl,
        }
    }

    /// The arena owning `o`.
    pub fn bank(&self, o: &Object) -> &Arena {
        self.arena(o.bank())
    }

    /// The arena new allocations land in.
    pub fn alloc_arena(&mut self) -> &mut Arena {
        let bank = self.vmmode;
        self.arena_mut(bank)
    }
}

/// Refuse to store a local composite into a global one, unless `ignore`
/// is set. Anything else may be stored anywhere.
pub fn check_bank_write(dest: Bank, item: &Object, ignore: bool, op: &'static str) -> Result<()> {
    if dest == Bank::Global && item.is_composite() && item.bank() == Bank::Local {
        if ignore {
            warn!(op, item = %item, "local value stored into global composite");
        } else {
            return Err(error!(InvalidAccess, op; "local value into global composite"));
        }
    }
    Ok(())
}
