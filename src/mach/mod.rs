/*!
## Rust Machine Module

This Rust module builds the interpreter's value model on top of the memory
module: tagged values, the local/global bank selector, arrays and the
segmented stacks used for the operand, execution and dictionary stacks.

*/

mod array;
mod context;
mod object;
mod save;
mod stack;

pub use context::check_bank_write;
pub use context::Config;
pub use context::Context;
pub use object::Access;
pub use object::Bank;
pub use object::Composite;
pub use object::Object;
pub use object::Save;
pub use object::Saverec;
pub use object::OBJECT_SIZE;
pub use stack::Stack;
pub use stack::SEGMENT_SIZE;

#[cfg(test)]
mod tests;
