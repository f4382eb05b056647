//! Sentinel-bounded doubly linked list backed by `SlotArena`.
//!
//! Nodes live in a `SlotArena` and link to each other by `SlotId`. Two
//! sentinel nodes are allocated when the list is created and are never freed,
//! so every real entry always has a predecessor and a successor. Splicing an
//! entry in or out never has to special-case the ends of the list.
//!
//! ## Architecture
//!
//! ```text
//!   arena (SlotArena<Node<T>>)
//!   ┌────────┬────────────────────────────────────────────────┐
//!   │ SlotId │ Node { kind, links }                           │
//!   ├────────┼────────────────────────────────────────────────┤
//!   │ 0      │ { Sentinel, prev: 0,  next: id_a }   (head)    │
//!   │ 1      │ { Sentinel, prev: id_b, next: 1 }    (tail)    │
//!   │ id_a   │ { Entry(A), prev: 0,  next: id_b }             │
//!   │ id_b   │ { Entry(B), prev: id_a, next: 1 }              │
//!   └────────┴────────────────────────────────────────────────┘
//!
//!   head ─► [A] ◄──► [B] ◄── tail
//!           MRU      LRU
//! ```
//!
//! ## Operations
//! - `detach(id)`: unlink an entry wherever it sits; it stays allocated
//! - `insert_most_recent(id)`: splice a detached entry right after `head`
//! - `move_to_most_recent(id)`: detach + insert as one step
//! - `evict_least_recent()`: detach and free the entry right before `tail`
//!
//! All of the above are O(1). Iteration is O(n).
//!
//! A detached entry has no links at all, which is what stops it from being
//! spliced in twice.

use std::fmt;
use std::iter::FusedIterator;

use crate::ds::slot_arena::{SlotArena, SlotId};
use crate::error::InvariantError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Links {
    prev: SlotId,
    next: SlotId,
}

#[derive(Debug)]
enum NodeKind<T> {
    Sentinel,
    Entry(T),
}

#[derive(Debug)]
struct Node<T> {
    kind: NodeKind<T>,
    links: Option<Links>,
}

impl<T> Node<T> {
    fn entry(&self) -> Option<&T> {
        match &self.kind {
            NodeKind::Entry(value) => Some(value),
            NodeKind::Sentinel => None,
        }
    }

    fn entry_mut(&mut self) -> Option<&mut T> {
        match &mut self.kind {
            NodeKind::Entry(value) => Some(value),
            NodeKind::Sentinel => None,
        }
    }
}

/// Recency-ordered list of `T`, most recent first.
pub struct RecencyList<T> {
    arena: SlotArena<Node<T>>,
    head: SlotId,
    tail: SlotId,
    len: usize,
}

impl<T> RecencyList<T> {
    /// Creates an empty list holding only its two sentinels.
    pub fn new() -> Self {
        Self::with_arena(SlotArena::new())
    }

    /// Creates an empty list with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_arena(SlotArena::with_capacity(capacity.saturating_add(2)))
    }

    fn with_arena(mut arena: SlotArena<Node<T>>) -> Self {
        let head = arena.insert(Node {
            kind: NodeKind::Sentinel,
            links: None,
        });
        let tail = arena.insert(Node {
            kind: NodeKind::Sentinel,
            links: None,
        });
        // The outer link of each sentinel points at itself and is never followed.
        if let Some(node) = arena.get_mut(head) {
            node.links = Some(Links { prev: head, next: tail });
        }
        if let Some(node) = arena.get_mut(tail) {
            node.links = Some(Links { prev: head, next: tail });
        }
        Self {
            arena,
            head,
            tail,
            len: 0,
        }
    }

    /// Number of entries currently linked into the list.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of entries allocated, linked or detached.
    pub fn allocated(&self) -> usize {
        self.arena.len() - 2
    }

    /// Returns `true` if `id` is an entry currently linked into the list.
    pub fn contains(&self, id: SlotId) -> bool {
        self.arena
            .get(id)
            .is_some_and(|node| node.links.is_some() && matches!(node.kind, NodeKind::Entry(_)))
    }

    /// Returns the entry value for `id`, linked or detached.
    pub fn get(&self, id: SlotId) -> Option<&T> {
        self.arena.get(id).and_then(Node::entry)
    }

    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut T> {
        self.arena.get_mut(id).and_then(Node::entry_mut)
    }

    /// Returns the most recent entry.
    pub fn most_recent(&self) -> Option<(SlotId, &T)> {
        let id = self.links(self.head)?.next;
        self.get(id).map(|value| (id, value))
    }

    /// Returns the least recent entry.
    pub fn least_recent(&self) -> Option<(SlotId, &T)> {
        let id = self.links(self.tail)?.prev;
        self.get(id).map(|value| (id, value))
    }

    /// Allocates a new entry and links it at the most recent position.
    pub fn push_most_recent(&mut self, value: T) -> SlotId {
        let id = self.arena.insert(Node {
            kind: NodeKind::Entry(value),
            links: None,
        });
        let linked = self.insert_most_recent(id);
        debug_assert!(linked, "freshly allocated entry failed to link");
        id
    }

    /// Unlinks the entry `id` from its neighbours. The entry stays allocated.
    ///
    /// Returns `false` for sentinels, unknown ids and entries that are already
    /// detached.
    pub fn detach(&mut self, id: SlotId) -> bool {
        let Some(node) = self.arena.get_mut(id) else {
            return false;
        };
        if matches!(node.kind, NodeKind::Sentinel) {
            return false;
        }
        let Some(Links { prev, next }) = node.links.take() else {
            return false;
        };

        let relinked = self.set_next(prev, next) && self.set_prev(next, prev);
        debug_assert!(relinked, "neighbour of {id:?} is not linked");
        self.len -= 1;
        true
    }

    /// Splices the detached entry `id` directly after `head`.
    ///
    /// Returns `false` for sentinels, unknown ids and entries that are already
    /// linked.
    pub fn insert_most_recent(&mut self, id: SlotId) -> bool {
        match self.arena.get(id) {
            Some(Node {
                kind: NodeKind::Entry(_),
                links: None,
            }) => {},
            _ => return false,
        }
        let Some(first) = self.links(self.head).map(|links| links.next) else {
            return false;
        };

        if let Some(node) = self.arena.get_mut(id) {
            node.links = Some(Links {
                prev: self.head,
                next: first,
            });
        }
        let relinked = self.set_next(self.head, id) && self.set_prev(first, id);
        debug_assert!(relinked, "head sentinel or its successor is not linked");
        self.len += 1;
        true
    }

    /// Moves a linked entry to the most recent position.
    ///
    /// Returns `false` if `id` is not a linked entry.
    pub fn move_to_most_recent(&mut self, id: SlotId) -> bool {
        if !self.contains(id) {
            return false;
        }
        if self.links(self.head).map(|links| links.next) == Some(id) {
            return true;
        }
        self.detach(id) && self.insert_most_recent(id)
    }

    /// Detaches and frees the least recent entry, returning its value.
    ///
    /// Returns `None` when the list holds no entries.
    pub fn evict_least_recent(&mut self) -> Option<T> {
        let last = self.links(self.tail)?.prev;
        if last == self.head {
            return None;
        }
        self.remove(last)
    }

    /// Detaches (if linked) and frees the entry `id`, returning its value.
    pub fn remove(&mut self, id: SlotId) -> Option<T> {
        if self.get(id).is_none() {
            return None;
        }
        self.detach(id);
        match self.arena.remove(id)?.kind {
            NodeKind::Entry(value) => Some(value),
            NodeKind::Sentinel => None,
        }
    }

    /// Iterates entries from most recent to least recent.
    ///
    /// The iterator is double-ended; `.rev()` walks least recent first.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            front: self.links(self.head).map_or(self.tail, |links| links.next),
            back: self.links(self.tail).map_or(self.head, |links| links.prev),
            remaining: self.len,
        }
    }

    /// Iterates entry handles from most recent to least recent.
    pub fn iter_ids(&self) -> impl DoubleEndedIterator<Item = SlotId> + '_ {
        self.iter().map(|(id, _)| id)
    }

    /// Walks the list and checks that links, sentinels and length agree.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        for (name, id) in [("head", self.head), ("tail", self.tail)] {
            let node = self
                .arena
                .get(id)
                .ok_or_else(|| InvariantError::new(format!("{name} sentinel missing")))?;
            if !matches!(node.kind, NodeKind::Sentinel) {
                return Err(InvariantError::new(format!(
                    "{name} slot {id:?} is not a sentinel"
                )));
            }
        }

        let mut prev = self.head;
        let mut current = self
            .links(self.head)
            .ok_or_else(|| InvariantError::new("head sentinel is unlinked"))?
            .next;
        let mut count = 0usize;

        while current != self.tail {
            let node = self
                .arena
                .get(current)
                .ok_or_else(|| InvariantError::new(format!("stale SlotId {current:?} in chain")))?;
            if matches!(node.kind, NodeKind::Sentinel) {
                return Err(InvariantError::new(format!(
                    "sentinel {current:?} found inside the chain"
                )));
            }
            let links = node.links.ok_or_else(|| {
                InvariantError::new(format!("detached entry {current:?} reachable from head"))
            })?;
            if links.prev != prev {
                return Err(InvariantError::new(format!(
                    "entry {current:?} prev is {:?}, expected {prev:?}",
                    links.prev
                )));
            }
            count += 1;
            if count > self.len {
                return Err(InvariantError::new(format!(
                    "chain longer than recorded len {} (cycle?)",
                    self.len
                )));
            }
            prev = current;
            current = links.next;
        }

        let tail_prev = self
            .links(self.tail)
            .ok_or_else(|| InvariantError::new("tail sentinel is unlinked"))?
            .prev;
        if tail_prev != prev {
            return Err(InvariantError::new(format!(
                "tail prev is {tail_prev:?}, expected {prev:?}"
            )));
        }
        if count != self.len {
            return Err(InvariantError::new(format!(
                "chain has {count} entries, recorded len is {}",
                self.len
            )));
        }
        if self.allocated() < self.len {
            return Err(InvariantError::new(format!(
                "{} entries linked but only {} allocated",
                self.len,
                self.allocated()
            )));
        }
        Ok(())
    }

    fn links(&self, id: SlotId) -> Option<Links> {
        self.arena.get(id).and_then(|node| node.links)
    }

    fn set_next(&mut self, id: SlotId, next: SlotId) -> bool {
        match self.arena.get_mut(id).and_then(|node| node.links.as_mut()) {
            Some(links) => {
                links.next = next;
                true
            },
            None => false,
        }
    }

    fn set_prev(&mut self, id: SlotId, prev: SlotId) -> bool {
        match self.arena.get_mut(id).and_then(|node| node.links.as_mut()) {
            Some(links) => {
                links.prev = prev;
                true
            },
            None => false,
        }
    }
}

impl<T> Default for RecencyList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for RecencyList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter().map(|(_, value)| value)).finish()
    }
}

/// Iterator over `(SlotId, &T)` from most recent to least recent.
pub struct Iter<'a, T> {
    list: &'a RecencyList<T>,
    front: SlotId,
    back: SlotId,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = (SlotId, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let id = self.front;
        let node = self.list.arena.get(id)?;
        self.front = node.links?.next;
        self.remaining -= 1;
        node.entry().map(|value| (id, value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let id = self.back;
        let node = self.list.arena.get(id)?;
        self.back = node.links?.prev;
        self.remaining -= 1;
        node.entry().map(|value| (id, value))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}
