//! Intrusive Collections - Record Adapters
//!
//! An adapter binds a caller's record type to a tree: it projects the record onto its embedded [Links] and,
//! for a [KeyAdapter], onto the key the tree is ordered by.
//!
//! ## License
//!
//! Copyright (C) Microsoft Corporation. All rights reserved.
//!
//! SPDX-License-Identifier: BSD-2-Clause-Patent
//!
use core::{borrow::Borrow, cmp::Ordering};

use crate::{Error, Links, Rbt, Result};

/// Projects a record onto the [Links] a tree uses.
///
/// A record with several [Links] fields may be a member of one tree per field, with one adapter per field.
pub trait Adapter {
    /// The record type stored in the backing slice.
    type Record;

    /// Returns the links embedded in `record`.
    fn links(record: &Self::Record) -> &Links;
}

/// An [Adapter] that also knows the key a record is ordered by.
///
/// The key must not change while the record is a member of a tree.
pub trait KeyAdapter: Adapter {
    /// The key type.
    type Key: Ord + ?Sized;

    /// Returns the key of `record`.
    fn key(record: &Self::Record) -> &Self::Key;
}

/// Declares a zero-sized adapter type for a record with an embedded [Links] field.
///
/// ```rust
/// use patina_intrusive_rbt::{intrusive_adapter, Links};
///
/// pub struct Timer {
///     deadline: u64,
///     by_deadline: Links,
///     by_id: Links,
///     id: u32,
/// }
///
/// intrusive_adapter!(pub struct DeadlineAdapter for Timer { links: by_deadline, key: deadline: u64 });
/// intrusive_adapter!(
///     /// Orders timers by id.
///     struct IdAdapter for Timer { links: by_id, key: id: u32 }
/// );
/// ```
///
/// Leaving out the `key` produces an [Adapter] only, for use with the `*_by` methods of [Rbt].
#[macro_export]
macro_rules! intrusive_adapter {
    (
        $(#[$attr:meta])*
        $vis:vis struct $name:ident for $record:ty { links: $links:ident, key: $key:ident: $key_ty:ty $(,)? }
    ) => {
        $crate::intrusive_adapter!($(#[$attr])* $vis struct $name for $record { links: $links });

        impl $crate::KeyAdapter for $name {
            type Key = $key_ty;

            #[inline]
            fn key(record: &Self::Record) -> &Self::Key {
                &record.$key
            }
        }
    };
    (
        $(#[$attr:meta])*
        $vis:vis struct $name:ident for $record:ty { links: $links:ident $(,)? }
    ) => {
        $(#[$attr])*
        #[derive(Debug, Clone, Copy, Default)]
        $vis struct $name;

        impl $crate::Adapter for $name {
            type Record = $record;

            #[inline]
            fn links(record: &Self::Record) -> &$crate::Links {
                &record.$links
            }
        }
    };
}

impl<'a, A> Rbt<'a, A>
where
    A: KeyAdapter,
{
    #[inline]
    fn order(l: &A::Record, r: &A::Record) -> Ordering {
        A::key(l).cmp(A::key(r))
    }

    #[inline]
    fn probe<Q>(key: &Q, record: &A::Record) -> Ordering
    where
        Q: Ord + ?Sized,
        A::Key: Borrow<Q>,
    {
        key.cmp(A::key(record).borrow())
    }

    /// Adds a record of the backing slice to the tree.
    ///
    /// Returns the record, or the member with an equal key if there already is one. In that case the tree is
    /// not modified and `record` stays unlinked.
    ///
    /// # Time Complexity
    ///
    /// O(log n)
    ///
    /// # Errors
    ///
    /// Returns [NotInSlice](Error::NotInSlice) if `record` is not part of the backing slice.
    ///
    /// Returns [AlreadyLinked](Error::AlreadyLinked) if `record` is a member of another tree.
    ///
    pub fn add(&mut self, record: &'a A::Record) -> Result<&'a A::Record> {
        let idx = self.idx_of(record)?;
        let idx = self.insert_by(idx, Self::order)?;
        Ok(self.record(idx))
    }

    /// Adds a record of the backing slice to the tree, failing on a duplicate key.
    ///
    /// # Errors
    ///
    /// Returns [AlreadyExists](Error::AlreadyExists) if a different record with an equal key is a member of the
    /// tree, along with the errors of [add](Rbt::add).
    ///
    pub fn try_add(&mut self, record: &'a A::Record) -> Result<&'a A::Record> {
        let existing = self.add(record)?;
        if core::ptr::eq(existing, record) { Ok(record) } else { Err(Error::AlreadyExists) }
    }

    /// Returns the member with the given key.
    ///
    /// # Time Complexity
    ///
    /// O(log n)
    ///
    pub fn get<Q>(&self, key: &Q) -> Option<&'a A::Record>
    where
        Q: Ord + ?Sized,
        A::Key: Borrow<Q>,
    {
        self.find_by(key, Self::probe).map(|idx| self.record(idx))
    }

    /// Returns true if a member has the given key.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        Q: Ord + ?Sized,
        A::Key: Borrow<Q>,
    {
        self.find_by(key, Self::probe).is_some()
    }

    /// Removes the member with the given key and returns it.
    ///
    /// # Time Complexity
    ///
    /// O(log n)
    ///
    pub fn remove<Q>(&mut self, key: &Q) -> Option<&'a A::Record>
    where
        Q: Ord + ?Sized,
        A::Key: Borrow<Q>,
    {
        self.remove_by(key, Self::probe).map(|idx| self.record(idx))
    }

    /// Removes a specific member of the tree.
    ///
    /// # Errors
    ///
    /// Returns [NotInSlice](Error::NotInSlice) if `record` is not part of the backing slice.
    ///
    /// Returns [NotFound](Error::NotFound) if `record` is not a member of this tree.
    ///
    pub fn remove_record(&mut self, record: &'a A::Record) -> Result<&'a A::Record> {
        let idx = self.idx_of(record)?;
        self.remove_idx(idx)?;
        Ok(record)
    }

    /// Removes the member with the smallest key and returns it.
    pub fn pop_min(&mut self) -> Option<&'a A::Record> {
        self.pop_min_idx().map(|idx| self.record(idx))
    }

    /// Removes the member with the greatest key and returns it.
    pub fn pop_max(&mut self) -> Option<&'a A::Record> {
        self.pop_max_idx().map(|idx| self.record(idx))
    }

    /// Returns the member with the smallest key.
    ///
    /// # Time Complexity
    ///
    /// O(1)
    ///
    pub fn min(&self) -> Option<&'a A::Record> {
        self.min_idx().map(|idx| self.record(idx))
    }

    /// Returns the member with the greatest key.
    ///
    /// # Time Complexity
    ///
    /// O(1)
    ///
    pub fn max(&self) -> Option<&'a A::Record> {
        self.max_idx().map(|idx| self.record(idx))
    }

    /// Returns the member with the greatest key strictly less than `key`.
    pub fn lt<Q>(&self, key: &Q) -> Option<&'a A::Record>
    where
        Q: Ord + ?Sized,
        A::Key: Borrow<Q>,
    {
        self.lt_by(key, Self::probe).map(|idx| self.record(idx))
    }

    /// Returns the member with the least key strictly greater than `key`.
    pub fn gt<Q>(&self, key: &Q) -> Option<&'a A::Record>
    where
        Q: Ord + ?Sized,
        A::Key: Borrow<Q>,
    {
        self.gt_by(key, Self::probe).map(|idx| self.record(idx))
    }

    /// Returns the member that follows `record` in order.
    ///
    /// `record` must be a member of this tree. Returns `None` when it is the last member or is not a member.
    pub fn next(&self, record: &A::Record) -> Option<&'a A::Record> {
        let idx = self.idx_of(record).ok()?;
        self.next_idx(idx).map(|idx| self.record(idx))
    }

    /// Returns the member that precedes `record` in order.
    ///
    /// `record` must be a member of this tree. Returns `None` when it is the first member or is not a member.
    pub fn prev(&self, record: &A::Record) -> Option<&'a A::Record> {
        let idx = self.idx_of(record).ok()?;
        self.prev_idx(idx).map(|idx| self.record(idx))
    }

    /// Checks every red-black invariant, ordering the members by their keys.
    ///
    /// # Errors
    ///
    /// Returns [InvariantViolated](Error::InvariantViolated) naming the first broken invariant.
    ///
    pub fn validate(&self) -> Result<()> {
        self.validate_by(Self::order)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use crate::{Adapter, Error, KeyAdapter, Links, Rbt};
    use core::cmp::Ordering;
    use std::{string::String, vec::Vec};

    struct Node {
        key: u32,
        links: Links,
    }

    crate::intrusive_adapter!(struct NodeAdapter for Node { links: links, key: key: u32 });

    fn nodes(keys: impl IntoIterator<Item = u32>) -> Vec<Node> {
        keys.into_iter().map(|key| Node { key, links: Links::new() }).collect()
    }

    fn keys(rbt: &Rbt<'_, NodeAdapter>) -> Vec<u32> {
        rbt.iter().map(|node| node.key).collect()
    }

    #[test]
    fn test_ordered_traversal() {
        let nodes = nodes([5, 3, 8, 1, 4, 7, 9, 2, 6]);
        let mut rbt: Rbt<NodeAdapter> = Rbt::new(&nodes);
        for node in &nodes {
            assert!(core::ptr::eq(rbt.add(node).unwrap(), node));
        }

        assert_eq!(keys(&rbt), [1, 2, 3, 4, 5, 6, 7, 8, 9]);
        assert_eq!(rbt.min().map(|n| n.key), Some(1));
        assert_eq!(rbt.max().map(|n| n.key), Some(9));
        assert_eq!(rbt.len(), 9);
        assert_eq!(rbt.validate(), Ok(()));
    }

    #[test]
    fn test_lt_gt_boundaries() {
        let nodes = nodes((0..10).map(|i| i * 3));
        let mut rbt: Rbt<NodeAdapter> = Rbt::new(&nodes);
        for node in &nodes {
            rbt.add(node).unwrap();
        }

        assert_eq!(rbt.lt(&2).map(|n| n.key), Some(0));
        assert_eq!(rbt.lt(&4).map(|n| n.key), Some(3));
        assert_eq!(rbt.lt(&5).map(|n| n.key), Some(3));
        assert_eq!(rbt.gt(&5).map(|n| n.key), Some(6));
        assert_eq!(rbt.lt(&3).map(|n| n.key), Some(0));
        assert_eq!(rbt.gt(&27).map(|n| n.key), None);
        assert_eq!(rbt.lt(&0).map(|n| n.key), None);
        assert_eq!(rbt.gt(&26).map(|n| n.key), Some(27));
    }

    #[test]
    fn test_duplicates() {
        let nodes = nodes([7, 7, 3]);
        let mut rbt: Rbt<NodeAdapter> = Rbt::new(&nodes);

        assert!(core::ptr::eq(rbt.add(&nodes[0]).unwrap(), &nodes[0]));
        assert!(core::ptr::eq(rbt.add(&nodes[1]).unwrap(), &nodes[0]));
        assert_eq!(rbt.try_add(&nodes[1]).map(|n| n.key), Err(Error::AlreadyExists));
        assert!(!nodes[1].links.is_linked());
        assert_eq!(rbt.len(), 1);

        assert!(rbt.try_add(&nodes[2]).is_ok());
        assert_eq!(rbt.len(), 2);
    }

    #[test]
    fn test_foreign_record_is_rejected() {
        let nodes = nodes([1, 2]);
        let stranger = Node { key: 3, links: Links::new() };
        let mut rbt: Rbt<NodeAdapter> = Rbt::new(&nodes);

        assert_eq!(rbt.add(&stranger).map(|n| n.key), Err(Error::NotInSlice));
        assert_eq!(rbt.remove_record(&stranger).map(|n| n.key), Err(Error::NotInSlice));
        assert!(rbt.next(&stranger).is_none());
        assert!(rbt.is_empty());
    }

    #[test]
    fn test_remove_and_reinsert() {
        let nodes = nodes(1..=32);
        let mut rbt: Rbt<NodeAdapter> = Rbt::new(&nodes);
        for node in &nodes {
            rbt.add(node).unwrap();
        }

        for key in (2..=32).step_by(2) {
            let removed = rbt.remove(&key).unwrap();
            assert_eq!(removed.key, key);
            assert!(!removed.links.is_linked());
            assert!(!rbt.contains_key(&key));
        }
        assert_eq!(rbt.len(), 16);
        assert!(rbt.remove(&2).is_none());
        assert_eq!(rbt.validate(), Ok(()));

        for node in nodes.iter().filter(|n| n.key % 2 == 0) {
            rbt.try_add(node).unwrap();
        }
        assert_eq!(keys(&rbt), (1..=32).collect::<Vec<_>>());
        assert_eq!(rbt.validate(), Ok(()));
    }

    #[test]
    fn test_remove_record() {
        let nodes = nodes([10, 20, 30]);
        let mut rbt: Rbt<NodeAdapter> = Rbt::new(&nodes);
        for node in &nodes {
            rbt.add(node).unwrap();
        }

        assert_eq!(rbt.remove_record(&nodes[1]).map(|n| n.key), Ok(20));
        assert_eq!(rbt.remove_record(&nodes[1]).map(|n| n.key), Err(Error::NotFound));
        assert_eq!(keys(&rbt), [10, 30]);
    }

    #[test]
    fn test_remove_record_of_overlapping_tree() {
        let nodes = nodes([10, 20, 30, 40]);
        let mut outer: Rbt<NodeAdapter> = Rbt::new(&nodes);
        let mut inner: Rbt<NodeAdapter> = Rbt::new(&nodes[1..]);
        outer.add(&nodes[0]).unwrap();
        outer.add(&nodes[3]).unwrap();
        inner.add(&nodes[1]).unwrap();
        inner.add(&nodes[2]).unwrap();

        assert_eq!(outer.remove_record(&nodes[2]).map(|n| n.key), Err(Error::NotFound));
        assert!(outer.next(&nodes[1]).is_none());
        assert!(outer.prev(&nodes[2]).is_none());
        assert_eq!(outer.validate(), Ok(()));
        assert_eq!(inner.validate(), Ok(()));
        assert_eq!(keys(&outer), [10, 40]);
        assert_eq!(keys(&inner), [20, 30]);

        assert_eq!(inner.remove_record(&nodes[2]).map(|n| n.key), Ok(30));
        assert_eq!(outer.validate(), Ok(()));
    }

    #[test]
    fn test_next_prev() {
        let nodes = nodes([40, 10, 30, 20]);
        let mut rbt: Rbt<NodeAdapter> = Rbt::new(&nodes);
        for node in &nodes {
            rbt.add(node).unwrap();
        }

        let mut forward = Vec::new();
        let mut current = rbt.min();
        while let Some(node) = current {
            forward.push(node.key);
            current = rbt.next(node);
        }
        assert_eq!(forward, [10, 20, 30, 40]);

        let mut backward = Vec::new();
        let mut current = rbt.max();
        while let Some(node) = current {
            backward.push(node.key);
            current = rbt.prev(node);
        }
        assert_eq!(backward, [40, 30, 20, 10]);
    }

    #[test]
    fn test_pop_draining() {
        let nodes = nodes([9, 2, 7, 4, 5]);
        let mut rbt: Rbt<NodeAdapter> = Rbt::new(&nodes);
        for node in &nodes {
            rbt.add(node).unwrap();
        }

        assert_eq!(rbt.pop_min().map(|n| n.key), Some(2));
        assert_eq!(rbt.pop_max().map(|n| n.key), Some(9));
        assert_eq!(rbt.pop_min().map(|n| n.key), Some(4));
        assert_eq!(rbt.pop_max().map(|n| n.key), Some(7));
        assert_eq!(rbt.pop_max().map(|n| n.key), Some(5));
        assert!(rbt.pop_min().is_none());
        assert!(rbt.pop_max().is_none());
        assert!(nodes.iter().all(|n| !n.links.is_linked()));
    }

    #[test]
    fn test_borrowed_key_lookup() {
        struct Named {
            name: String,
            links: Links,
        }
        crate::intrusive_adapter!(struct NamedAdapter for Named { links: links, key: name: String });

        let named: Vec<Named> =
            ["boot", "dxe", "pei", "sec"].iter().map(|n| Named { name: (*n).into(), links: Links::new() }).collect();
        let mut rbt: Rbt<NamedAdapter> = Rbt::new(&named);
        for record in &named {
            rbt.add(record).unwrap();
        }

        assert!(rbt.contains_key("dxe"));
        assert_eq!(rbt.gt("dxe").map(|n| n.name.as_str()), Some("pei"));
        assert_eq!(rbt.lt("a").map(|n| n.name.as_str()), None);
        assert_eq!(rbt.remove("pei").map(|n| n.name.as_str()), Some("pei"));
        assert!(rbt.get("pei").is_none());
    }

    #[test]
    fn test_two_trees_one_record() {
        struct Timer {
            deadline: u64,
            id: u32,
            by_deadline: Links,
            by_id: Links,
        }
        crate::intrusive_adapter!(struct DeadlineAdapter for Timer { links: by_deadline, key: deadline: u64 });
        crate::intrusive_adapter!(struct IdAdapter for Timer { links: by_id, key: id: u32 });

        let timers: Vec<Timer> = [(300, 1), (100, 2), (200, 3)]
            .into_iter()
            .map(|(deadline, id)| Timer { deadline, id, by_deadline: Links::new(), by_id: Links::new() })
            .collect();

        let mut by_deadline: Rbt<DeadlineAdapter> = Rbt::new(&timers);
        let mut by_id: Rbt<IdAdapter> = Rbt::new(&timers);
        for timer in &timers {
            by_deadline.add(timer).unwrap();
            by_id.add(timer).unwrap();
        }

        assert_eq!(by_deadline.min().map(|t| t.id), Some(2));
        assert_eq!(by_id.min().map(|t| t.deadline), Some(300));

        // Removing from one tree leaves the other membership intact.
        let first = by_deadline.pop_min().unwrap();
        assert!(!first.by_deadline.is_linked());
        assert!(first.by_id.is_linked());
        assert_eq!(by_id.get(&first.id).map(|t| t.deadline), Some(100));
        assert_eq!(by_deadline.validate(), Ok(()));
        assert_eq!(by_id.validate(), Ok(()));
    }

    #[test]
    fn test_links_only_adapter() {
        struct Span {
            start: u64,
            end: u64,
            links: Links,
        }
        crate::intrusive_adapter!(
            /// Orders spans by their start address.
            struct SpanAdapter for Span { links: links }
        );

        let spans: Vec<Span> = [(0x3000, 0x4000), (0x1000, 0x2000), (0x5000, 0x8000)]
            .into_iter()
            .map(|(start, end)| Span { start, end, links: Links::new() })
            .collect();
        let by_start = |l: &Span, r: &Span| l.start.cmp(&r.start);
        let containing = |addr: &u64, span: &Span| -> Ordering {
            if *addr < span.start {
                Ordering::Less
            } else if *addr >= span.end {
                Ordering::Greater
            } else {
                Ordering::Equal
            }
        };

        let mut rbt: Rbt<SpanAdapter> = Rbt::new(&spans);
        for idx in 0..spans.len() {
            rbt.insert_by(idx, by_start).unwrap();
        }
        assert_eq!(rbt.find_by(&0x5800, containing), Some(2));
        assert_eq!(rbt.find_by(&0x2800, containing), None);
        assert_eq!(rbt.validate_by(by_start), Ok(()));
        assert!(core::ptr::eq(SpanAdapter::links(&spans[0]), &spans[0].links));
    }

    #[test]
    fn test_adapter_projection() {
        let node = Node { key: 11, links: Links::new() };
        assert_eq!(*NodeAdapter::key(&node), 11);
        assert!(core::ptr::eq(NodeAdapter::links(&node), &node.links));
    }
}
