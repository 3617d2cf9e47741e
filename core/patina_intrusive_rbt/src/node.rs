//! Intrusive Collections - Links for a Red-Black Tree
//!
//! ## License
//!
//! Copyright (C) Microsoft Corporation. All rights reserved.
//!
//! SPDX-License-Identifier: BSD-2-Clause-Patent
//!
use core::{cell::Cell, fmt};

/// The color RED of a node in a red-black tree.
pub const RED: bool = false;
/// The color BLACK of a node in a red-black tree.
pub const BLACK: bool = true;

/// Slot index of a tree's sentinel. Never a valid index into the backing slice.
pub(crate) const NIL: usize = usize::MAX;
/// Stored in every field of links that are not part of any tree.
pub(crate) const UNLINKED: usize = usize::MAX - 1;

/// The tree linkage embedded in a caller's record.
///
/// Links hold slot indices into the slice the tree was created with, never addresses, so the records may be
/// read freely while they are in a tree. A freshly created (or removed) `Links` is unlinked.
///
/// Cloning produces new, unlinked links. A copy of a record is never a member of the tree the original
/// belongs to.
pub struct Links {
    parent: Cell<usize>,
    left: Cell<usize>,
    right: Cell<usize>,
    color: Cell<bool>,
}

impl Links {
    /// Creates unlinked links.
    pub const fn new() -> Self {
        Links {
            parent: Cell::new(UNLINKED),
            left: Cell::new(UNLINKED),
            right: Cell::new(UNLINKED),
            color: Cell::new(BLACK),
        }
    }

    /// Creates the links of a tree's sentinel: black, with every edge pointing at the sentinel itself.
    pub(crate) const fn sentinel() -> Self {
        Links { parent: Cell::new(NIL), left: Cell::new(NIL), right: Cell::new(NIL), color: Cell::new(BLACK) }
    }

    /// Returns true if the record owning these links is currently a member of a tree.
    pub fn is_linked(&self) -> bool {
        self.parent.get() != UNLINKED
    }

    /// Returns true if the node is red. Unlinked links are always black.
    pub fn is_red(&self) -> bool {
        self.color.get() == RED
    }

    /// Returns true if the node is black.
    pub fn is_black(&self) -> bool {
        self.color.get() == BLACK
    }

    pub(crate) fn color(&self) -> bool {
        self.color.get()
    }

    pub(crate) fn set_color(&self, color: bool) {
        self.color.set(color);
    }

    pub(crate) fn set_red(&self) {
        self.set_color(RED);
    }

    pub(crate) fn set_black(&self) {
        self.set_color(BLACK);
    }

    pub(crate) fn parent(&self) -> usize {
        self.parent.get()
    }

    pub(crate) fn set_parent(&self, idx: usize) {
        self.parent.set(idx);
    }

    pub(crate) fn left(&self) -> usize {
        self.left.get()
    }

    pub(crate) fn set_left(&self, idx: usize) {
        self.left.set(idx);
    }

    pub(crate) fn right(&self) -> usize {
        self.right.get()
    }

    pub(crate) fn set_right(&self, idx: usize) {
        self.right.set(idx);
    }

    /// Prepares the links of a node that is about to become a red leaf under `parent`.
    pub(crate) fn link_leaf(&self, parent: usize) {
        self.parent.set(parent);
        self.left.set(NIL);
        self.right.set(NIL);
        self.color.set(RED);
    }

    /// Returns the links to the unlinked state.
    pub(crate) fn unlink(&self) {
        self.parent.set(UNLINKED);
        self.left.set(UNLINKED);
        self.right.set(UNLINKED);
        self.color.set(BLACK);
    }
}

impl Default for Links {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for Links {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl fmt::Debug for Links {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_linked() {
            return f.write_str("Links(unlinked)");
        }

        let show = |idx: usize| if idx == NIL { None } else { Some(idx) };
        f.debug_struct("Links")
            .field("parent", &show(self.parent()))
            .field("left", &show(self.left()))
            .field("right", &show(self.right()))
            .field("color", &if self.is_red() { "red" } else { "black" })
            .finish()
    }
}
