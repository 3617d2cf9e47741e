//! Intrusive Collections - Red-Black Tree
//!
//! ## License
//!
//! Copyright (C) Microsoft Corporation. All rights reserved.
//!
//! SPDX-License-Identifier: BSD-2-Clause-Patent
//!
#[cfg(feature = "alloc")]
extern crate alloc;

use crate::{
    Adapter, Error, Invariant, Result,
    node::{BLACK, Links, NIL},
};

use core::{cmp::Ordering, fmt, marker::PhantomData, mem};

/// Converts a raw slot index into an option, mapping the sentinel to `None`.
#[inline]
fn to_option(idx: usize) -> Option<usize> {
    (idx != NIL).then_some(idx)
}

/// An intrusive red-black tree over a slice of records owned by the caller.
///
/// The tree borrows the slice shared and only ever writes to the [Links] of the records it is given, so the
/// same slice may back several trees at once. Records are referred to by their index in the slice.
pub struct Rbt<'a, A>
where
    A: Adapter,
{
    slots: &'a [A::Record],
    nil: Links,
    top: usize,
    min: usize,
    max: usize,
    length: usize,
    generation: u64,
    _adapter: PhantomData<fn() -> A>,
}

impl<'a, A> Rbt<'a, A>
where
    A: Adapter,
{
    /// Creates an empty tree over the given records.
    ///
    /// The records do not become members of the tree until they are inserted.
    pub const fn new(slots: &'a [A::Record]) -> Self {
        Rbt {
            slots,
            nil: Links::sentinel(),
            top: NIL,
            min: NIL,
            max: NIL,
            length: 0,
            generation: 0,
            _adapter: PhantomData,
        }
    }

    /// Returns the number of records in the tree.
    pub fn len(&self) -> usize {
        self.length
    }

    /// Indicates whether the tree is empty.
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Returns the number of records in the backing slice.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns the backing slice.
    pub fn slots(&self) -> &'a [A::Record] {
        self.slots
    }

    /// Returns the change generation of the tree.
    ///
    /// The generation increases (wrapping) on every insertion and removal, and never on a rejected
    /// duplicate or a lookup.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Returns the height of the tree.
    pub fn height(&self) -> usize {
        self.depth(self.top)
    }

    fn depth(&self, idx: usize) -> usize {
        if idx == NIL {
            return 0;
        }
        1 + core::cmp::max(self.depth(self.left(idx)), self.depth(self.right(idx)))
    }

    /// Directly accesses a record of the backing slice.
    ///
    /// The record is not guaranteed to be a member of the tree.
    ///
    /// # Time Complexity
    ///
    /// O(1)
    ///
    pub fn get_with_idx(&self, idx: usize) -> Option<&'a A::Record> {
        self.slots.get(idx)
    }

    /// Returns the slot index of a record of the backing slice.
    ///
    /// # Errors
    ///
    /// Returns [NotInSlice](Error::NotInSlice) if `record` does not point at an element of the backing slice.
    ///
    pub fn idx_of(&self, record: &A::Record) -> Result<usize> {
        let size = mem::size_of::<A::Record>();
        let base = self.slots.as_ptr() as usize;
        let addr = record as *const A::Record as usize;

        if size == 0 || addr < base {
            return Err(Error::NotInSlice);
        }

        let offset = addr - base;
        if offset % size != 0 || offset / size >= self.slots.len() {
            return Err(Error::NotInSlice);
        }
        Ok(offset / size)
    }

    #[inline]
    pub(crate) fn record(&self, idx: usize) -> &'a A::Record {
        &self.slots[idx]
    }

    /// Links of the record at `idx`. The sentinel and indices past the end of the slice map to `nil`.
    #[inline]
    fn links(&self, idx: usize) -> &Links {
        match self.slots.get(idx) {
            Some(record) => A::links(record),
            None => &self.nil,
        }
    }

    #[inline]
    fn parent(&self, idx: usize) -> usize {
        self.links(idx).parent()
    }

    #[inline]
    fn left(&self, idx: usize) -> usize {
        self.links(idx).left()
    }

    #[inline]
    fn right(&self, idx: usize) -> usize {
        self.links(idx).right()
    }

    #[inline]
    fn is_red(&self, idx: usize) -> bool {
        self.links(idx).is_red()
    }

    /// Raw slot index of the minimum, or the sentinel.
    pub(crate) fn first_raw(&self) -> usize {
        self.min
    }

    /// Raw slot index of the maximum, or the sentinel.
    pub(crate) fn last_raw(&self) -> usize {
        self.max
    }

    /// Adds the record at `idx` to the tree, ordered by `cmp`.
    ///
    /// `cmp(new, existing)` must describe one strict total order for the whole life of the tree.
    ///
    /// Returns `Ok(idx)` if the record was inserted, or the index of the member whose key compares equal, in
    /// which case the tree is not modified.
    ///
    /// # Time Complexity
    ///
    /// O(log n)
    ///
    /// # Errors
    ///
    /// Returns [OutOfBounds](Error::OutOfBounds) if `idx` is not an index of the backing slice.
    ///
    /// Returns [AlreadyLinked](Error::AlreadyLinked) if the record is a member of another tree.
    ///
    pub fn insert_by<F>(&mut self, idx: usize, mut cmp: F) -> Result<usize>
    where
        F: FnMut(&A::Record, &A::Record) -> Ordering,
    {
        let record = self.slots.get(idx).ok_or(Error::OutOfBounds)?;

        let mut parent = NIL;
        let mut current = self.top;
        let mut went_left = false;
        let mut is_min = true;
        let mut is_max = true;
        while current != NIL {
            parent = current;
            match cmp(record, &self.slots[current]) {
                Ordering::Less => {
                    went_left = true;
                    is_max = false;
                    current = self.left(current);
                }
                Ordering::Greater => {
                    went_left = false;
                    is_min = false;
                    current = self.right(current);
                }
                Ordering::Equal => {
                    log::trace!("Rbt: slot {} rejected, slot {} holds an equal key.", idx, current);
                    return Ok(current);
                }
            }
        }

        let links = A::links(record);
        if links.is_linked() {
            return Err(Error::AlreadyLinked);
        }
        links.link_leaf(parent);

        if parent == NIL {
            self.top = idx;
        } else if went_left {
            self.links(parent).set_left(idx);
        } else {
            self.links(parent).set_right(idx);
        }

        if is_min {
            self.min = idx;
        }
        if is_max {
            self.max = idx;
        }

        self.fixup_insert(idx);

        self.length += 1;
        self.generation = self.generation.wrapping_add(1);
        self.debug_validate();
        Ok(idx)
    }

    /// Searches for the member whose key compares equal to `key`.
    ///
    /// `cmp(key, record)` must order keys the same way the tree's insertion comparator orders records.
    ///
    /// # Time Complexity
    ///
    /// O(log n)
    ///
    pub fn find_by<Q, F>(&self, key: &Q, mut cmp: F) -> Option<usize>
    where
        Q: ?Sized,
        F: FnMut(&Q, &A::Record) -> Ordering,
    {
        let mut current = self.top;
        while current != NIL {
            match cmp(key, &self.slots[current]) {
                Ordering::Equal => return Some(current),
                Ordering::Less => current = self.left(current),
                Ordering::Greater => current = self.right(current),
            }
        }
        None
    }

    /// Returns the member with the greatest key strictly less than `key`.
    ///
    /// A member with a key equal to `key` is never returned.
    ///
    /// # Time Complexity
    ///
    /// O(1) if `key` is outside of the range of the tree, otherwise O(log n).
    ///
    pub fn lt_by<Q, F>(&self, key: &Q, mut cmp: F) -> Option<usize>
    where
        Q: ?Sized,
        F: FnMut(&Q, &A::Record) -> Ordering,
    {
        if self.min == NIL || cmp(key, &self.slots[self.min]) != Ordering::Greater {
            return None;
        }
        if cmp(key, &self.slots[self.max]) == Ordering::Greater {
            return Some(self.max);
        }

        let mut current = self.top;
        let mut closest = NIL;
        while current != NIL {
            if cmp(key, &self.slots[current]) == Ordering::Greater {
                closest = current;
                current = self.right(current);
            } else {
                current = self.left(current);
            }
        }
        to_option(closest)
    }

    /// Returns the member with the least key strictly greater than `key`.
    ///
    /// A member with a key equal to `key` is never returned.
    ///
    /// # Time Complexity
    ///
    /// O(1) if `key` is outside of the range of the tree, otherwise O(log n).
    ///
    pub fn gt_by<Q, F>(&self, key: &Q, mut cmp: F) -> Option<usize>
    where
        Q: ?Sized,
        F: FnMut(&Q, &A::Record) -> Ordering,
    {
        if self.max == NIL || cmp(key, &self.slots[self.max]) != Ordering::Less {
            return None;
        }
        if cmp(key, &self.slots[self.min]) == Ordering::Less {
            return Some(self.min);
        }

        let mut current = self.top;
        let mut closest = NIL;
        while current != NIL {
            if cmp(key, &self.slots[current]) == Ordering::Less {
                closest = current;
                current = self.left(current);
            } else {
                current = self.right(current);
            }
        }
        to_option(closest)
    }

    /// Returns the index of the first ordered member of the tree.
    ///
    /// # Time Complexity
    ///
    /// O(1)
    ///
    pub fn min_idx(&self) -> Option<usize> {
        to_option(self.min)
    }

    /// Returns the index of the last ordered member of the tree.
    ///
    /// # Time Complexity
    ///
    /// O(1)
    ///
    pub fn max_idx(&self) -> Option<usize> {
        to_option(self.max)
    }

    /// Returns the index of the member that follows `idx` in order.
    ///
    /// Returns `None` if `idx` is the maximum or the record at `idx` is not a member of this tree.
    ///
    /// # Time Complexity
    ///
    /// O(log n)
    ///
    pub fn next_idx(&self, idx: usize) -> Option<usize> {
        if !self.contains_idx(idx) {
            return None;
        }
        to_option(self.successor(idx))
    }

    /// Returns the index of the member that precedes `idx` in order.
    ///
    /// Returns `None` if `idx` is the minimum or the record at `idx` is not a member of this tree.
    ///
    /// # Time Complexity
    ///
    /// O(log n)
    ///
    pub fn prev_idx(&self, idx: usize) -> Option<usize> {
        if !self.contains_idx(idx) {
            return None;
        }
        to_option(self.predecessor(idx))
    }

    /// Structural in-order successor of a live node, or the sentinel.
    pub(crate) fn successor(&self, idx: usize) -> usize {
        let right = self.right(idx);
        if right != NIL {
            return self.minimum(right);
        }

        let mut current = idx;
        let mut parent = self.parent(current);
        while parent != NIL && current == self.right(parent) {
            current = parent;
            parent = self.parent(parent);
        }
        parent
    }

    /// Structural in-order predecessor of a live node, or the sentinel.
    pub(crate) fn predecessor(&self, idx: usize) -> usize {
        let left = self.left(idx);
        if left != NIL {
            return self.maximum(left);
        }

        let mut current = idx;
        let mut parent = self.parent(current);
        while parent != NIL && current == self.left(parent) {
            current = parent;
            parent = self.parent(parent);
        }
        parent
    }

    fn minimum(&self, mut idx: usize) -> usize {
        while self.left(idx) != NIL {
            idx = self.left(idx);
        }
        idx
    }

    fn maximum(&self, mut idx: usize) -> usize {
        while self.right(idx) != NIL {
            idx = self.right(idx);
        }
        idx
    }

    /// Returns true if the record at `idx` is a member of this tree.
    ///
    /// # Time Complexity
    ///
    /// O(log n)
    ///
    pub fn contains_idx(&self, idx: usize) -> bool {
        let Some(record) = self.slots.get(idx) else {
            return false;
        };
        if !A::links(record).is_linked() {
            return false;
        }

        let mut current = idx;
        for _ in 0..self.length {
            let parent = self.parent(current);
            if parent == NIL {
                return current == self.top;
            }
            if parent >= self.slots.len() {
                return false;
            }
            // Links written by a tree over another slice may point at unrelated slots here.
            if self.left(parent) != current && self.right(parent) != current {
                return false;
            }
            current = parent;
        }
        false
    }

    /// Removes the member whose key compares equal to `key`.
    ///
    /// Returns the index of the removed record, whose links are unlinked again.
    ///
    /// # Time Complexity
    ///
    /// O(log n)
    ///
    pub fn remove_by<Q, F>(&mut self, key: &Q, cmp: F) -> Option<usize>
    where
        Q: ?Sized,
        F: FnMut(&Q, &A::Record) -> Ordering,
    {
        let idx = self.find_by(key, cmp)?;
        self.delete(idx);
        Some(idx)
    }

    /// Removes the member located at the given index.
    ///
    /// # Time Complexity
    ///
    /// O(log n)
    ///
    /// # Errors
    ///
    /// Returns [OutOfBounds](Error::OutOfBounds) if `idx` is not an index of the backing slice.
    ///
    /// Returns [NotFound](Error::NotFound) if the record is not a member of this tree.
    ///
    pub fn remove_idx(&mut self, idx: usize) -> Result<usize> {
        if idx >= self.slots.len() {
            return Err(Error::OutOfBounds);
        }
        if !self.contains_idx(idx) {
            return Err(Error::NotFound);
        }
        self.delete(idx);
        Ok(idx)
    }

    /// Removes the first ordered member of the tree.
    ///
    /// # Time Complexity
    ///
    /// O(log n)
    ///
    pub fn pop_min_idx(&mut self) -> Option<usize> {
        let idx = to_option(self.min)?;
        self.delete(idx);
        Some(idx)
    }

    /// Removes the last ordered member of the tree.
    ///
    /// # Time Complexity
    ///
    /// O(log n)
    ///
    pub fn pop_max_idx(&mut self) -> Option<usize> {
        let idx = to_option(self.max)?;
        self.delete(idx);
        Some(idx)
    }

    /// Removes every member of the tree, unlinking each of them.
    ///
    /// # Time Complexity
    ///
    /// O(n)
    ///
    pub fn clear(&mut self) {
        let mut current = self.top;
        while current != NIL {
            let left = self.left(current);
            if left != NIL {
                current = left;
                continue;
            }
            let right = self.right(current);
            if right != NIL {
                current = right;
                continue;
            }

            let parent = self.parent(current);
            if parent != NIL {
                if self.left(parent) == current {
                    self.links(parent).set_left(NIL);
                } else {
                    self.links(parent).set_right(NIL);
                }
            }
            self.links(current).unlink();
            current = parent;
        }

        self.nil = Links::sentinel();
        self.top = NIL;
        self.min = NIL;
        self.max = NIL;
        self.length = 0;
        self.generation = self.generation.wrapping_add(1);
    }

    /// Replaces `u` with the subtree rooted at `v` in the eyes of `u`'s parent.
    fn transplant(&mut self, u: usize, v: usize) {
        let parent = self.parent(u);
        if parent == NIL {
            self.top = v;
        } else if u == self.left(parent) {
            self.links(parent).set_left(v);
        } else {
            self.links(parent).set_right(v);
        }
        // v may be the sentinel; delete fixup climbs from its parent.
        self.links(v).set_parent(parent);
    }

    /// Unlinks a member of the tree.
    fn delete(&mut self, z: usize) {
        // The caches move before the node loses its edges.
        if z == self.min {
            self.min = self.successor(z);
        }
        if z == self.max {
            self.max = self.predecessor(z);
        }

        let mut y = z;
        let mut y_color = self.links(y).color();
        let x;
        if self.left(z) == NIL {
            x = self.right(z);
            self.transplant(z, x);
        } else if self.right(z) == NIL {
            x = self.left(z);
            self.transplant(z, x);
        } else {
            y = self.minimum(self.right(z));
            y_color = self.links(y).color();
            x = self.right(y);
            if self.parent(y) == z {
                self.links(x).set_parent(y);
            } else {
                self.transplant(y, x);
                let right = self.right(z);
                self.links(y).set_right(right);
                self.links(right).set_parent(y);
            }
            self.transplant(z, y);
            let left = self.left(z);
            self.links(y).set_left(left);
            self.links(left).set_parent(y);
            let color = self.links(z).color();
            self.links(y).set_color(color);
        }

        if y_color == BLACK {
            self.fixup_delete(x);
        }

        self.nil.set_parent(NIL);
        A::links(&self.slots[z]).unlink();

        self.length -= 1;
        self.generation = self.generation.wrapping_add(1);
        self.debug_validate();
    }

    /// Rotate the subtree to the left, the right child of `x` takes its place.
    fn rotate_left(&mut self, x: usize) {
        let y = self.right(x);
        let y_left = self.left(y);

        self.links(x).set_right(y_left);
        if y_left != NIL {
            self.links(y_left).set_parent(x);
        }

        let parent = self.parent(x);
        self.links(y).set_parent(parent);
        if parent == NIL {
            self.top = y;
        } else if x == self.left(parent) {
            self.links(parent).set_left(y);
        } else {
            self.links(parent).set_right(y);
        }

        self.links(y).set_left(x);
        self.links(x).set_parent(y);
    }

    /// Rotate the subtree to the right, the left child of `x` takes its place.
    fn rotate_right(&mut self, x: usize) {
        let y = self.left(x);
        let y_right = self.right(y);

        self.links(x).set_left(y_right);
        if y_right != NIL {
            self.links(y_right).set_parent(x);
        }

        let parent = self.parent(x);
        self.links(y).set_parent(parent);
        if parent == NIL {
            self.top = y;
        } else if x == self.left(parent) {
            self.links(parent).set_left(y);
        } else {
            self.links(parent).set_right(y);
        }

        self.links(y).set_right(x);
        self.links(x).set_parent(y);
    }

    /// Updates the tree after a node has been added, to meet the red-black tree properties.
    fn fixup_insert(&mut self, mut node: usize) {
        while self.is_red(self.parent(node)) {
            let parent = self.parent(node);
            let grandparent = self.parent(parent);

            // Parent is left child of grandparent
            if parent == self.left(grandparent) {
                let uncle = self.right(grandparent);
                // Uncle is red, recolor parent, grandparent, uncle and continue from the grandparent
                if self.is_red(uncle) {
                    self.links(parent).set_black();
                    self.links(uncle).set_black();
                    self.links(grandparent).set_red();
                    node = grandparent;
                    continue;
                }
                // Uncle is black and node is the left->right "inner child" of its grandparent
                if node == self.right(parent) {
                    node = parent;
                    self.rotate_left(node);
                }
                // Uncle is black and node is the left->left "outer child" of its grandparent
                let parent = self.parent(node);
                let grandparent = self.parent(parent);
                self.links(parent).set_black();
                self.links(grandparent).set_red();
                self.rotate_right(grandparent);
            }
            // Parent is right child of grandparent
            else {
                let uncle = self.left(grandparent);
                if self.is_red(uncle) {
                    self.links(parent).set_black();
                    self.links(uncle).set_black();
                    self.links(grandparent).set_red();
                    node = grandparent;
                    continue;
                }
                // Uncle is black and node is the right->left "inner child" of its grandparent
                if node == self.left(parent) {
                    node = parent;
                    self.rotate_right(node);
                }
                let parent = self.parent(node);
                let grandparent = self.parent(parent);
                self.links(parent).set_black();
                self.links(grandparent).set_red();
                self.rotate_left(grandparent);
            }
        }
        let top = self.top;
        self.links(top).set_black();
    }

    /// Updates the tree after a black node has been removed, to meet the red-black tree properties.
    ///
    /// `node` carries the extra black and may be the sentinel, whose parent was set by the removal.
    fn fixup_delete(&mut self, mut node: usize) {
        while node != self.top && self.links(node).is_black() {
            let parent = self.parent(node);
            if node == self.left(parent) {
                let mut sibling = self.right(parent);

                // Red sibling, rotate so the sibling is black
                if self.is_red(sibling) {
                    self.links(sibling).set_black();
                    self.links(parent).set_red();
                    self.rotate_left(parent);
                    sibling = self.right(parent);
                }

                // Black sibling with two black children, push the extra black up
                if !self.is_red(self.left(sibling)) && !self.is_red(self.right(sibling)) {
                    self.links(sibling).set_red();
                    node = parent;
                    continue;
                }

                // Black sibling with a black "outer nephew", rotate around the sibling
                if !self.is_red(self.right(sibling)) {
                    let nephew = self.left(sibling);
                    self.links(nephew).set_black();
                    self.links(sibling).set_red();
                    self.rotate_right(sibling);
                    sibling = self.right(parent);
                }

                // Black sibling with a red "outer nephew", rotate around the parent
                let color = self.links(parent).color();
                self.links(sibling).set_color(color);
                self.links(parent).set_black();
                let nephew = self.right(sibling);
                self.links(nephew).set_black();
                self.rotate_left(parent);
                node = self.top;
            } else {
                let mut sibling = self.left(parent);

                if self.is_red(sibling) {
                    self.links(sibling).set_black();
                    self.links(parent).set_red();
                    self.rotate_right(parent);
                    sibling = self.left(parent);
                }

                if !self.is_red(self.right(sibling)) && !self.is_red(self.left(sibling)) {
                    self.links(sibling).set_red();
                    node = parent;
                    continue;
                }

                if !self.is_red(self.left(sibling)) {
                    let nephew = self.right(sibling);
                    self.links(nephew).set_black();
                    self.links(sibling).set_red();
                    self.rotate_left(sibling);
                    sibling = self.left(parent);
                }

                let color = self.links(parent).color();
                self.links(sibling).set_color(color);
                self.links(parent).set_black();
                let nephew = self.left(sibling);
                self.links(nephew).set_black();
                self.rotate_right(parent);
                node = self.top;
            }
        }
        self.links(node).set_black();
    }

    #[inline]
    fn debug_validate(&self) {
        #[cfg(feature = "validate-on-mutate")]
        debug_assert_eq!(self.validate_structure(), Ok(()), "red-black invariants violated by a mutation");
    }

    /// Walks the whole tree and checks every red-black invariant, including the order of the members under
    /// `cmp`.
    ///
    /// # Time Complexity
    ///
    /// O(n)
    ///
    /// # Errors
    ///
    /// Returns [InvariantViolated](Error::InvariantViolated) naming the first broken invariant.
    ///
    pub fn validate_by<F>(&self, cmp: F) -> Result<()>
    where
        F: FnMut(&A::Record, &A::Record) -> Ordering,
    {
        let result = self.validate_structure().and_then(|_| self.validate_order(cmp));
        if let Err(err) = result {
            log::error!("Rbt: {}", err);
        }
        result
    }

    /// Checks every invariant that does not depend on the comparator.
    pub(crate) fn validate_structure(&self) -> Result<()> {
        let violated = |invariant| Err(Error::InvariantViolated(invariant));

        if !self.nil.is_black() {
            return violated(Invariant::SentinelColor);
        }

        if self.top == NIL {
            if self.length != 0 {
                return violated(Invariant::Count);
            }
            if self.min != NIL {
                return violated(Invariant::MinCache);
            }
            if self.max != NIL {
                return violated(Invariant::MaxCache);
            }
            return Ok(());
        }

        if self.top >= self.slots.len() || self.parent(self.top) != NIL {
            return violated(Invariant::Linkage);
        }
        if !self.links(self.top).is_black() {
            return violated(Invariant::RootColor);
        }

        let (_, count) = self.check_subtree(self.top, 0)?;
        if count != self.length {
            return violated(Invariant::Count);
        }
        if self.min != self.minimum(self.top) {
            return violated(Invariant::MinCache);
        }
        if self.max != self.maximum(self.top) {
            return violated(Invariant::MaxCache);
        }
        Ok(())
    }

    /// Returns the black height and the node count of the subtree rooted at `idx`.
    fn check_subtree(&self, idx: usize, depth: usize) -> Result<(usize, usize)> {
        if idx == NIL {
            return Ok((1, 0));
        }
        if depth > self.length {
            return Err(Error::InvariantViolated(Invariant::Linkage));
        }

        let links = self.links(idx);
        let (left, right) = (links.left(), links.right());
        for child in [left, right] {
            if child == NIL {
                continue;
            }
            if child >= self.slots.len() || self.parent(child) != idx {
                return Err(Error::InvariantViolated(Invariant::Linkage));
            }
            if links.is_red() && self.is_red(child) {
                return Err(Error::InvariantViolated(Invariant::RedRed));
            }
        }

        let (left_height, left_count) = self.check_subtree(left, depth + 1)?;
        let (right_height, right_count) = self.check_subtree(right, depth + 1)?;
        if left_height != right_height {
            return Err(Error::InvariantViolated(Invariant::BlackHeight));
        }

        Ok((left_height + links.is_black() as usize, left_count + right_count + 1))
    }

    fn validate_order<F>(&self, mut cmp: F) -> Result<()>
    where
        F: FnMut(&A::Record, &A::Record) -> Ordering,
    {
        if self.min == NIL {
            return Ok(());
        }

        let mut previous = self.min;
        let mut current = self.successor(previous);
        while current != NIL {
            if cmp(&self.slots[previous], &self.slots[current]) != Ordering::Less {
                return Err(Error::InvariantViolated(Invariant::Order));
            }
            previous = current;
            current = self.successor(current);
        }
        Ok(())
    }

    #[cfg(feature = "alloc")]
    /// Performs a depth-first search on the tree, returning the ordered records.
    pub fn dfs(&self) -> alloc::vec::Vec<&'a A::Record> {
        let mut values = alloc::vec::Vec::with_capacity(self.length);
        self._dfs(self.top, &mut values);
        values
    }

    #[cfg(feature = "alloc")]
    fn _dfs(&self, idx: usize, values: &mut alloc::vec::Vec<&'a A::Record>) {
        if idx != NIL {
            self._dfs(self.left(idx), values);
            values.push(&self.slots[idx]);
            self._dfs(self.right(idx), values);
        }
    }
}

impl<A> fmt::Debug for Rbt<'_, A>
where
    A: Adapter,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rbt")
            .field("capacity", &self.capacity())
            .field("len", &self.len())
            .field("height", &self.height())
            .field("generation", &self.generation())
            .finish()
    }
}
