//! Cursor: bidirectional traversal that may remove or insert through the
//! list while keeping the duplicate policy in step.
//!
//! The cursor sits between two elements, like a `ListIterator`. `next` and
//! `previous` step over one element and remember it as the current one;
//! `remove` deletes that element from the sequence and the policy as one
//! step and then forgets it, so a second `remove` fails instead of taking a
//! neighbour. Positional `set` is rejected: replace-with-merge may delete a
//! second element, which the cursor cannot track. Use
//! `UniqueList::replace` instead.

use super::UniqueList;
use crate::error::{CollectionError, Result};
use crate::policy::DuplicatePolicy;

pub struct Cursor<'a, E, P> {
    list: &'a mut UniqueList<E, P>,
    // Index of the element `next` would return.
    next: usize,
    last: Option<usize>,
}

impl<'a, E, P> Cursor<'a, E, P>
where
    P: DuplicatePolicy<E>,
{
    pub(super) fn new(list: &'a mut UniqueList<E, P>, index: usize) -> Self {
        Self {
            list,
            next: index,
            last: None,
        }
    }

    pub fn has_next(&self) -> bool {
        self.next < self.list.items.len()
    }

    pub fn has_previous(&self) -> bool {
        self.next > 0
    }

    /// Index of the element `next` would return (`len` at the end).
    pub fn next_index(&self) -> usize {
        self.next
    }

    pub fn previous_index(&self) -> Option<usize> {
        self.next.checked_sub(1)
    }

    /// The element most recently returned by `next`/`previous`, if it has
    /// not since been removed and no insert happened in between.
    pub fn current(&self) -> Option<&E> {
        self.last.map(|i| &self.list.items[i])
    }

    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<&E> {
        if self.next >= self.list.items.len() {
            return None;
        }
        let i = self.next;
        self.next += 1;
        self.last = Some(i);
        Some(&self.list.items[i])
    }

    pub fn previous(&mut self) -> Option<&E> {
        let i = self.next.checked_sub(1)?;
        self.next = i;
        self.last = Some(i);
        Some(&self.list.items[i])
    }

    /// Remove the current element from both the sequence and the policy.
    pub fn remove(&mut self) -> Result<E> {
        let i = self.last.take().ok_or(CollectionError::NoCurrentElement)?;
        let removed = self.list.items.remove(i);
        self.list.policy.forget(&removed);
        if i < self.next {
            self.next -= 1;
        }
        Ok(removed)
    }

    /// Insert `value` at the cursor position, before the element `next`
    /// would return. A present value is silently dropped and leaves the
    /// cursor untouched; returns whether the insert happened.
    pub fn insert(&mut self, value: E) -> bool {
        if self.list.contains(&value) {
            return false;
        }
        self.list.insert_new(self.next, value);
        self.next += 1;
        self.last = None;
        true
    }

    /// Always fails with `Unsupported`; see the module docs.
    pub fn set(&mut self, _value: E) -> Result<E> {
        Err(CollectionError::Unsupported(
            "set through a cursor; use UniqueList::replace",
        ))
    }
}
