//! Intrusive Collections - Red-Black Tree Iteration
//!
//! ## License
//!
//! Copyright (C) Microsoft Corporation. All rights reserved.
//!
//! SPDX-License-Identifier: BSD-2-Clause-Patent
//!
use core::iter::FusedIterator;

use crate::{Adapter, Error, Rbt, Result, node::NIL};

/// An in-order iterator over the members of a [Rbt].
pub struct Iter<'t, 'a, A>
where
    A: Adapter,
{
    tree: &'t Rbt<'a, A>,
    front: usize,
    back: usize,
    remaining: usize,
}

impl<'t, 'a, A> Iterator for Iter<'t, 'a, A>
where
    A: Adapter,
{
    type Item = &'a A::Record;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let idx = self.front;
        self.remaining -= 1;
        if self.remaining > 0 {
            self.front = self.tree.successor(idx);
        }
        Some(self.tree.record(idx))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<A> DoubleEndedIterator for Iter<'_, '_, A>
where
    A: Adapter,
{
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let idx = self.back;
        self.remaining -= 1;
        if self.remaining > 0 {
            self.back = self.tree.predecessor(idx);
        }
        Some(self.tree.record(idx))
    }
}

impl<A> ExactSizeIterator for Iter<'_, '_, A> where A: Adapter {}

impl<A> FusedIterator for Iter<'_, '_, A> where A: Adapter {}

impl<'t, 'a, A> IntoIterator for &'t Rbt<'a, A>
where
    A: Adapter,
{
    type Item = &'a A::Record;
    type IntoIter = Iter<'t, 'a, A>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, A> Rbt<'a, A>
where
    A: Adapter,
{
    /// Returns an iterator over the members of the tree, in order.
    pub fn iter(&self) -> Iter<'_, 'a, A> {
        Iter { tree: self, front: self.first_raw(), back: self.last_raw(), remaining: self.len() }
    }

    /// Returns a cursor at the first member of the tree.
    pub fn cursor_front(&self) -> Cursor {
        Cursor::front(self)
    }

    /// Returns a cursor at the last member of the tree.
    pub fn cursor_back(&self) -> Cursor {
        Cursor::back(self)
    }
}

/// A position in a [Rbt] that does not borrow the tree.
///
/// The cursor remembers the [generation](Rbt::generation) of the tree it was created from. Once the tree has
/// been modified, every operation on the cursor fails with [Invalidated](Error::Invalidated), since the member
/// it points at may have been removed.
///
/// Besides the members of the tree, the cursor can point at the "end" position, which sits both after the last
/// member and before the first one. Moving forward from the end goes to the first member and moving backward
/// goes to the last one.
///
/// A cursor must only be used with the tree it was created from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    current: usize,
    generation: u64,
}

impl Cursor {
    /// Creates a cursor at the first member of the tree, or at the end if the tree is empty.
    pub fn front<A: Adapter>(rbt: &Rbt<'_, A>) -> Self {
        Cursor { current: rbt.first_raw(), generation: rbt.generation() }
    }

    /// Creates a cursor at the last member of the tree, or at the end if the tree is empty.
    pub fn back<A: Adapter>(rbt: &Rbt<'_, A>) -> Self {
        Cursor { current: rbt.last_raw(), generation: rbt.generation() }
    }

    /// Creates a cursor at the end position of the tree.
    pub fn end<A: Adapter>(rbt: &Rbt<'_, A>) -> Self {
        Cursor { current: NIL, generation: rbt.generation() }
    }

    /// Returns the slot index of the member under the cursor, or `None` at the end position.
    pub fn index(&self) -> Option<usize> {
        (self.current != NIL).then_some(self.current)
    }

    /// Returns true if the cursor is at the end position.
    pub fn is_end(&self) -> bool {
        self.current == NIL
    }

    /// Returns the member under the cursor, or `None` at the end position.
    ///
    /// # Errors
    ///
    /// Returns [Invalidated](Error::Invalidated) if the tree was modified after the cursor was created.
    ///
    pub fn get<'a, A: Adapter>(&self, rbt: &Rbt<'a, A>) -> Result<Option<&'a A::Record>> {
        self.check(rbt)?;
        Ok(self.index().and_then(|idx| rbt.get_with_idx(idx)))
    }

    /// Moves the cursor to the next member, or to the end after the last member.
    ///
    /// # Errors
    ///
    /// Returns [Invalidated](Error::Invalidated) if the tree was modified after the cursor was created.
    ///
    pub fn move_next<A: Adapter>(&mut self, rbt: &Rbt<'_, A>) -> Result<()> {
        self.check(rbt)?;
        self.current = if self.is_end() { rbt.first_raw() } else { rbt.successor(self.current) };
        Ok(())
    }

    /// Moves the cursor to the previous member, or to the end before the first member.
    ///
    /// # Errors
    ///
    /// Returns [Invalidated](Error::Invalidated) if the tree was modified after the cursor was created.
    ///
    pub fn move_prev<A: Adapter>(&mut self, rbt: &Rbt<'_, A>) -> Result<()> {
        self.check(rbt)?;
        self.current = if self.is_end() { rbt.last_raw() } else { rbt.predecessor(self.current) };
        Ok(())
    }

    fn check<A: Adapter>(&self, rbt: &Rbt<'_, A>) -> Result<()> {
        if self.generation != rbt.generation() {
            log::debug!("Cursor: created at generation {}, tree is at {}.", self.generation, rbt.generation());
            return Err(Error::Invalidated);
        }
        Ok(())
    }
}
