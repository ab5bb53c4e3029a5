//! Singly linked `i32` list with O(1) append and forward-only cursors.
//!
//! The container exclusively owns its node chain. Cursors never own nodes:
//! `Iter` and `IterMut` are borrowing forward iterators that share one
//! traversal primitive, compare across mutability variants, and downgrade
//! one way (mutable to read-only). `CursorMut` owns the list borrow so the
//! chain can keep growing mid-traversal; since only append exists, no
//! operation ever invalidates a held cursor position.

use std::fmt;
use std::iter::FusedIterator;
use std::marker::PhantomData;
use std::ptr::NonNull;

// =============================================================================
// Milestone 1: Node chain and the IntList container
// =============================================================================

struct Node {
    value: i32,
    next: Option<NonNull<Node>>,
}

fn alloc_node(value: i32) -> NonNull<Node> {
    #[cfg(test)]
    test_alloc::record_alloc();
    NonNull::from(Box::leak(Box::new(Node { value, next: None })))
}

/// Reclaims the node's box. Caller must own the node and must not touch the
/// pointer again.
unsafe fn take_node(node: NonNull<Node>) -> Box<Node> {
    #[cfg(test)]
    test_alloc::record_free();
    Box::from_raw(node.as_ptr())
}

/// Append-only singly linked list of `i32`.
///
/// Invariants: `len == 0` iff both ends are empty; otherwise `head` is the
/// first node, `tail` is the chain terminator (its link is empty), and
/// following links from `head` exactly `len` times lands past `tail`.
pub struct IntList {
    head: Option<NonNull<Node>>,
    tail: Option<NonNull<Node>>,
    len: usize,
}

impl IntList {
    pub fn new() -> Self {
        IntList { head: None, tail: None, len: 0 }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Appends `value` as the new chain terminator. O(1).
    ///
    /// A cursor standing on the old terminator sees the new node as its
    /// successor; no held position is invalidated.
    pub fn push_back(&mut self, value: i32) {
        let new_tail = alloc_node(value);
        match self.tail {
            Some(old_tail) => unsafe { (*old_tail.as_ptr()).next = Some(new_tail) },
            None => self.head = Some(new_tail),
        }
        self.tail = Some(new_tail);
        self.len += 1;
    }

    /// Read-only cursor at the first node (already exhausted if empty).
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            raw: RawCursor { node: self.head },
            remaining: self.len,
            marker: PhantomData,
        }
    }

    /// Mutable cursor at the first node.
    pub fn iter_mut(&mut self) -> IterMut<'_> {
        IterMut {
            raw: RawCursor { node: self.head },
            remaining: self.len,
            marker: PhantomData,
        }
    }

    /// Cursor that keeps hold of the list itself, so the chain can be
    /// extended during traversal.
    pub fn cursor_front_mut(&mut self) -> CursorMut<'_> {
        let node = self.head;
        CursorMut { node, list: self }
    }

    // Removal stays private: the public container is append-only. Drop and
    // the owning iterator drain through here.
    fn pop_front(&mut self) -> Option<i32> {
        let head = self.head?;
        let node = unsafe { take_node(head) };
        self.head = node.next;
        if self.head.is_none() {
            self.tail = None;
        }
        self.len -= 1;
        Some(node.value)
    }
}

impl Drop for IntList {
    fn drop(&mut self) {
        // Iterative teardown: each node is freed exactly once, in chain
        // order, and a long chain cannot overflow the stack.
        while self.pop_front().is_some() {}
    }
}

impl Default for IntList {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for IntList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl FromIterator<i32> for IntList {
    fn from_iter<I: IntoIterator<Item = i32>>(iter: I) -> Self {
        let mut list = IntList::new();
        list.extend(iter);
        list
    }
}

impl Extend<i32> for IntList {
    fn extend<I: IntoIterator<Item = i32>>(&mut self, iter: I) {
        for value in iter {
            self.push_back(value);
        }
    }
}

// =============================================================================
// Milestone 2: One raw cursor, two public views
// =============================================================================

/// Shared position primitive for both cursor variants: the single advance
/// and node-reference implementation, compared by node identity. The end
/// state is the empty node reference.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct RawCursor {
    node: Option<NonNull<Node>>,
}

impl RawCursor {
    /// Steps over the current node and returns it, or `None` at the end
    /// state. Caller must guarantee the node is still alive.
    unsafe fn advance(&mut self) -> Option<NonNull<Node>> {
        let node = self.node?;
        self.node = (*node.as_ptr()).next;
        Some(node)
    }
}

/// Read-only forward cursor over an [`IntList`].
///
/// Exhaustion is the list's end position: once `next` returns `None` it
/// keeps returning `None`, and an exhausted cursor compares equal to any
/// other cursor at the end state.
#[derive(Clone)]
pub struct Iter<'a> {
    raw: RawCursor,
    remaining: usize,
    marker: PhantomData<&'a Node>,
}

/// Mutable forward cursor over an [`IntList`]; yields `&mut i32`.
pub struct IterMut<'a> {
    raw: RawCursor,
    remaining: usize,
    marker: PhantomData<&'a mut Node>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a i32;

    fn next(&mut self) -> Option<&'a i32> {
        // The 'a borrow of the list keeps every node alive.
        let node = unsafe { self.raw.advance() }?;
        self.remaining -= 1;
        Some(unsafe { &(*node.as_ptr()).value })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a> Iterator for IterMut<'a> {
    type Item = &'a mut i32;

    fn next(&mut self) -> Option<&'a mut i32> {
        // Each node is stepped over once, so the &mut handed out never
        // aliases a later one.
        let node = unsafe { self.raw.advance() }?;
        self.remaining -= 1;
        Some(unsafe { &mut (*node.as_ptr()).value })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}
impl FusedIterator for Iter<'_> {}
impl ExactSizeIterator for IterMut<'_> {}
impl FusedIterator for IterMut<'_> {}

// Cursors of either variant are equal iff they reference the same node or
// are both at the end state.
impl PartialEq for Iter<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl Eq for Iter<'_> {}

impl PartialEq for IterMut<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl Eq for IterMut<'_> {}

impl PartialEq<IterMut<'_>> for Iter<'_> {
    fn eq(&self, other: &IterMut<'_>) -> bool {
        self.raw == other.raw
    }
}

impl PartialEq<Iter<'_>> for IterMut<'_> {
    fn eq(&self, other: &Iter<'_>) -> bool {
        self.raw == other.raw
    }
}

impl<'a> From<IterMut<'a>> for Iter<'a> {
    /// Lossless downgrade to a read-only cursor at the same position. There
    /// is no conversion back.
    fn from(it: IterMut<'a>) -> Iter<'a> {
        Iter {
            raw: it.raw,
            remaining: it.remaining,
            marker: PhantomData,
        }
    }
}

impl IterMut<'_> {
    /// Read-only view of this cursor at its current position. The mutable
    /// cursor is frozen while the view is alive, so the two can be compared
    /// but not raced against each other.
    pub fn reborrow(&self) -> Iter<'_> {
        Iter {
            raw: self.raw,
            remaining: self.remaining,
            marker: PhantomData,
        }
    }
}

// =============================================================================
// Milestone 3: Append during traversal
// =============================================================================

/// Cursor that owns the list borrow, so the list can keep growing while it
/// walks. A cursor standing on the old terminator advances into a freshly
/// appended node; a cursor already at the end state stays exhausted.
pub struct CursorMut<'a> {
    node: Option<NonNull<Node>>,
    list: &'a mut IntList,
}

impl CursorMut<'_> {
    pub fn current(&self) -> Option<&i32> {
        self.node.map(|n| unsafe { &(*n.as_ptr()).value })
    }

    pub fn current_mut(&mut self) -> Option<&mut i32> {
        self.node.map(|n| unsafe { &mut (*n.as_ptr()).value })
    }

    pub fn at_end(&self) -> bool {
        self.node.is_none()
    }

    /// Moves to the next node, or to the end state past the terminator.
    /// A no-op at the end state.
    pub fn move_next(&mut self) {
        if let Some(node) = self.node {
            self.node = unsafe { (*node.as_ptr()).next };
        }
    }

    /// Appends to the list's tail without disturbing this cursor's position.
    pub fn push_back(&mut self, value: i32) {
        self.list.push_back(value);
    }

    pub fn list_len(&self) -> usize {
        self.list.len()
    }
}

// =============================================================================
// Milestone 4: Consuming iteration
// =============================================================================

/// Owning iterator: drains the list front to back and frees each node as it
/// goes; dropping it mid-way frees the rest.
pub struct IntoIter {
    list: IntList,
}

impl Iterator for IntoIter {
    type Item = i32;

    fn next(&mut self) -> Option<i32> {
        self.list.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.list.len, Some(self.list.len))
    }
}

impl ExactSizeIterator for IntoIter {}
impl FusedIterator for IntoIter {}

impl IntoIterator for IntList {
    type Item = i32;
    type IntoIter = IntoIter;

    fn into_iter(self) -> IntoIter {
        IntoIter { list: self }
    }
}

impl<'a> IntoIterator for &'a IntList {
    type Item = &'a i32;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

impl<'a> IntoIterator for &'a mut IntList {
    type Item = &'a mut i32;
    type IntoIter = IterMut<'a>;

    fn into_iter(self) -> IterMut<'a> {
        self.iter_mut()
    }
}

// =============================================================================
// Test-only allocation bookkeeping
// =============================================================================
