/*!
# Rust Memory Module

This Rust module provides the raw storage layer: arenas of bytes named by
integer handles through an entity table, and the error type shared by the
whole crate.

*/

#[macro_use]
mod error;
mod arena;
mod mark;

pub use arena::Arena;
pub use arena::Entry;
pub use arena::Kind;
pub use arena::Stats;
pub use error::Error;
pub use error::ErrorCode;
pub use mark::Mark;
pub use mark::MAX_SAVE_LEVEL;

#[cfg(test)]
mod tests;
