//! Identity-addressed, ordered memo storage.

use crate::memo::{Memo, MemoId};

use std::collections::{BTreeSet, HashMap, VecDeque};

/// Ordered memo list, newest first.
///
/// Memos live in an arena keyed by [`MemoId`]; display order is a separate
/// list of ids. Updates address memos by id so they never go stale when the
/// order changes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoCollection {
    memos: HashMap<MemoId, Memo>,
    order: VecDeque<MemoId>,
}

impl MemoCollection {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of memos.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Insert a memo at display position 0.
    ///
    /// A memo with an id already present replaces the old entry and moves to
    /// the front.
    pub fn insert_front(&mut self, memo: Memo) {
        let id = memo.id;
        if self.memos.insert(id, memo).is_some() {
            self.order.retain(|existing| *existing != id);
        }
        self.order.push_front(id);
    }

    /// Look up a memo by id.
    pub fn get(&self, id: MemoId) -> Option<&Memo> {
        self.memos.get(&id)
    }

    /// Look up a memo by id for mutation.
    pub fn get_mut(&mut self, id: MemoId) -> Option<&mut Memo> {
        self.memos.get_mut(&id)
    }

    /// Memo at a display offset.
    pub fn at(&self, offset: usize) -> Option<&Memo> {
        self.order.get(offset).and_then(|id| self.memos.get(id))
    }

    /// Ids in display order.
    pub fn ids(&self) -> impl Iterator<Item = MemoId> + '_ {
        self.order.iter().copied()
    }

    /// Memos in display order.
    pub fn iter(&self) -> impl Iterator<Item = &Memo> + '_ {
        self.order.iter().filter_map(|id| self.memos.get(id))
    }

    /// All memos for mutation, in no particular order.
    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut Memo> + '_ {
        self.memos.values_mut()
    }

    /// Remove the memos at the given display offsets.
    ///
    /// Duplicate and out-of-range offsets are ignored. Remaining memos keep
    /// their relative order. Returns the removed memos in display order.
    pub fn remove_offsets(&mut self, offsets: &[usize]) -> Vec<Memo> {
        let doomed: BTreeSet<usize> = offsets
            .iter()
            .copied()
            .filter(|offset| *offset < self.order.len())
            .collect();

        if doomed.is_empty() {
            return Vec::new();
        }

        let mut removed = Vec::with_capacity(doomed.len());
        let mut kept = VecDeque::with_capacity(self.order.len() - doomed.len());

        for (offset, id) in self.order.drain(..).enumerate() {
            if doomed.contains(&offset) {
                if let Some(memo) = self.memos.remove(&id) {
                    removed.push(memo);
                }
            } else {
                kept.push_back(id);
            }
        }

        self.order = kept;
        removed
    }

    /// Move the memos at `offsets` so they sit before `destination`.
    ///
    /// `destination` is expressed in offsets of the list before the move, as
    /// with list-view drag-and-drop: moving offset 0 to destination 2 places
    /// that memo after the one originally at offset 1. The moved memos keep
    /// their relative order. Out-of-range offsets are ignored and a
    /// destination past the end appends.
    pub fn move_offsets(&mut self, offsets: &[usize], destination: usize) {
        let len = self.order.len();
        let moving: BTreeSet<usize> = offsets.iter().copied().filter(|o| *o < len).collect();

        if moving.is_empty() {
            return;
        }

        let destination = destination.min(len);
        let shift = moving.iter().filter(|o| **o < destination).count();

        let mut moved = Vec::with_capacity(moving.len());
        let mut rest = Vec::with_capacity(len - moving.len());
        for (offset, id) in self.order.drain(..).enumerate() {
            if moving.contains(&offset) {
                moved.push(id);
            } else {
                rest.push(id);
            }
        }

        let insert_at = destination - shift;
        let tail = rest.split_off(insert_at);
        self.order = rest.into_iter().chain(moved).chain(tail).collect();
    }
}
