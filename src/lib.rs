//! # postvm
//!
//! Virtual memory for a PostScript-style interpreter.
//!
//! Values are fixed size tagged objects. Composite values (arrays, strings,
//! dictionaries) name their storage by an integer handle into an arena's
//! entity table, never by address, so storage can move without rewriting
//! the values that refer to it.
//!
//! Every execution context owns two arenas. The local one is checkpointed
//! by `save` and rolled back by `restore`; the global one outlives both.
//! A global composite may never hold a local one.
//!
//! ```
//! use postvm::mach::{Context, Object, Stack};
//!
//! let mut ctx = Context::new();
//! let arr = ctx.cons_bank_array(10).unwrap();
//! for i in 0..10 {
//!     ctx.bank_array_put(arr, i, Object::Integer(i + 1)).unwrap();
//! }
//! let sub = arr.interval(2, 5).unwrap();
//! assert_eq!(ctx.bank_array_get(sub, 0).unwrap(), Object::Integer(3));
//!
//! let os = Stack::init(&mut ctx.lo).unwrap();
//! os.push(&mut ctx.lo, sub).unwrap();
//! assert_eq!(os.pop(&mut ctx.lo).unwrap(), sub);
//! ```

pub mod mach;
pub mod mem;
