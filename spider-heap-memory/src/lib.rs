#![deny(missing_docs)]
//! In-memory implementation of spider-protocol's PropertyModel trait.
//!
//! Objects live in a `Vec` arena behind a `RwLock`; an object's id is its
//! index, which doubles as its container identity. Plain objects, arrays
//! and functions are all containers. Properties are either data slots or
//! getters, and getters may fail (preemption included), which makes this
//! heap a faithful stand-in for an interpreter's object model in tests.

mod heap;
mod json;
pub mod keys;
mod value;

pub use heap::{Getter, Heap, HeapError, ObjectKind};
pub use value::{HeapValue, ObjectId};
