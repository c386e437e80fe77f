//! Repository Layer
//!
//! Data access abstractions and the in-memory implementation.

mod traits;
mod memory;


pub use traits::Repository;
pub use memory::MemoryRepository;
