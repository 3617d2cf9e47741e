//! A `no_std` and `no_alloc` intrusive red-black tree whose nodes live in a slice of records owned by the
//! caller. The tree never allocates, frees, or moves a record; it only rewrites the [Links] embedded in each
//! record and its own bookkeeping (root, cached minimum and maximum, element count and a change generation).
//!
//! A record joins a tree through a [Links] field. An [Adapter] tells the tree how to find that field, and a
//! [KeyAdapter] additionally tells it which field to order by. The [intrusive_adapter] macro writes both for
//! the common case of "one links field, one `Ord` key field". Because the links use interior mutability, any
//! number of trees can borrow the same slice at once: a record popped from one tree can be added to another,
//! and a record with two [Links] fields can be a member of two trees at the same time.
//!
//! The tree has two layers:
//!
//! - The engine (`*_by` and `*_idx` methods on [Rbt]) works on slot indices and caller supplied comparators.
//! - The typed layer (`add`, `get`, `remove`, `pop_min`, ...) is available when the adapter is a [KeyAdapter]
//!   and works on record references.
//!
//! Every mutation bumps [Rbt::generation]. A detached [Cursor] captures the generation when it is created
//! and refuses to move once the tree has changed underneath it.
//!
//! ## Features
//!
//! - `alloc` (default): enables [Rbt::dfs], which collects the records in order into a `Vec`.
//! - `validate-on-mutate`: re-checks the structural red-black invariants after every mutation with a
//!   `debug_assert!`. This is O(n) per operation and is meant for tests.
//!
//! ## Benchmarks
//!
//! There are currently some benchmarks available in the `benches` directory. These benchmarks test the
//! performance of the tree with 4096 records keyed by 32bit and 384bit integers respectively:
//!
//! - Insertion: Time to add every record to an empty tree.
//! - Search: Time it takes to search for every key in the tree once.
//! - Delete: Time it takes to remove every record by key, and to drain the tree with `pop_min`/`pop_max`.
//!
//! ## Examples
//!
//! ```rust
//! use patina_intrusive_rbt::{intrusive_adapter, Links, Rbt};
//!
//! struct Entry {
//!     key: u32,
//!     links: Links,
//! }
//!
//! intrusive_adapter!(struct EntryAdapter for Entry { links: links, key: key: u32 });
//!
//! let entries: Vec<Entry> = [5, 1, 9, 3].into_iter().map(|key| Entry { key, links: Links::new() }).collect();
//!
//! let mut rbt: Rbt<EntryAdapter> = Rbt::new(&entries);
//! for entry in &entries {
//!     rbt.add(entry).unwrap();
//! }
//!
//! assert_eq!(rbt.min().map(|e| e.key), Some(1));
//! assert_eq!(rbt.lt(&5).map(|e| e.key), Some(3));
//! assert_eq!(rbt.iter().map(|e| e.key).collect::<Vec<_>>(), [1, 3, 5, 9]);
//!
//! let popped = rbt.pop_max().unwrap();
//! assert_eq!(popped.key, 9);
//! assert!(!popped.links.is_linked());
//! ```
//!
//! ## License
//!
//! Copyright (C) Microsoft Corporation. All rights reserved.
//!
//! SPDX-License-Identifier: BSD-2-Clause-Patent
//!
#![no_std]
mod adapter;
mod cursor;
mod node;
mod rbt;

pub use adapter::{Adapter, KeyAdapter};
pub use cursor::{Cursor, Iter};
pub use node::Links;
pub use rbt::Rbt;

/// Public result type for the crate.
pub type Result<T> = core::result::Result<T, Error>;

/// Public error types for the crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The record is not a member of the tree.
    NotFound,
    /// A record with an equal key is already a member of the tree.
    AlreadyExists,
    /// The record is already linked into a tree and must be removed from it first.
    AlreadyLinked,
    /// The index does not name a slot of the tree's backing slice.
    OutOfBounds,
    /// The reference does not point at a record of the tree's backing slice.
    NotInSlice,
    /// The tree was modified after the cursor was created.
    Invalidated,
    /// A red-black tree invariant does not hold.
    InvariantViolated(Invariant),
}

/// The red-black tree invariants checked by [Rbt::validate_by].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Invariant {
    /// The root of a non-empty tree is red.
    RootColor,
    /// The sentinel is red.
    SentinelColor,
    /// A red node has a red child.
    RedRed,
    /// Two paths from the same node hold a different number of black nodes.
    BlackHeight,
    /// The in-order sequence is not strictly increasing under the comparator.
    Order,
    /// A child does not point back at its parent, or the root has a parent.
    Linkage,
    /// The cached minimum is not the leftmost node.
    MinCache,
    /// The cached maximum is not the rightmost node.
    MaxCache,
    /// The element count does not match the number of reachable nodes.
    Count,
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::NotFound => write!(f, "record is not a member of the tree"),
            Error::AlreadyExists => write!(f, "a record with an equal key already exists"),
            Error::AlreadyLinked => write!(f, "record is already linked into a tree"),
            Error::OutOfBounds => write!(f, "index is outside the backing slice"),
            Error::NotInSlice => write!(f, "record is not part of the backing slice"),
            Error::Invalidated => write!(f, "tree was modified after the cursor was created"),
            Error::InvariantViolated(invariant) => write!(f, "red-black invariant violated: {:?}", invariant),
        }
    }
}
