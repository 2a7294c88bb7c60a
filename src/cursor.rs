//! Detached bidirectional cursor over the tree.
//!
//! A [`Cursor`] records a root-to-leaf descent as one child-slot index
//! per branch level plus the leaf slot. It owns no borrow of the tree;
//! every operation takes the tree by reference and re-validates the
//! version snapshot first, so a cursor held across a mutation reports
//! [`Error::IteratorInvalid`] instead of observing a torn tree.
//!
//! Position state machine: `valid` means the cursor sits on an entry;
//! `!valid && !ended` is before-first; `!valid && ended` is after-last.
//! Stepping is O(1) inside a leaf and O(depth) when crossing a leaf
//! boundary.

use crate::error::{Error, Result};
use crate::tree::{lower_bound, upper_bound, BPlusTree, Branch, KeyOrder, Node, MAX_DEPTH};
use crate::vecs::PairVec;
use arrayvec::ArrayVec;
use std::{borrow::Borrow, fmt, marker::PhantomData};

/// Bidirectional cursor returned by [`BPlusTree::iter_begin`],
/// [`BPlusTree::iter_end`] and [`BPlusTree::find_bound`].
///
/// Dropping the cursor releases it; it holds nothing beyond its own
/// path storage.
pub struct Cursor<K, V, C> {
    path: ArrayVec<usize, MAX_DEPTH>,
    slot: usize,
    leaf_len: usize,
    valid: bool,
    ended: bool,
    version: u64,
    _pd: PhantomData<fn() -> (K, V, C)>,
}

impl<K, V, C> Clone for Cursor<K, V, C> {
    fn clone(&self) -> Self {
        Self {
            path: self.path.clone(),
            slot: self.slot,
            leaf_len: self.leaf_len,
            valid: self.valid,
            ended: self.ended,
            version: self.version,
            _pd: PhantomData,
        }
    }
}

impl<K, V, C> fmt::Debug for Cursor<K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("path", &self.path)
            .field("slot", &self.slot)
            .field("valid", &self.valid)
            .field("ended", &self.ended)
            .field("version", &self.version)
            .finish()
    }
}

impl<K, V, C> Cursor<K, V, C> {
    /// Is the cursor positioned on an entry?
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Has a forward step run past the last entry?
    #[must_use]
    pub fn is_ended(&self) -> bool {
        self.ended
    }

    fn guard(&self, tree: &BPlusTree<K, V, C>) -> Result<()> {
        if tree.version != self.version || tree.depth != self.path.len() {
            return Err(Error::IteratorInvalid);
        }
        Ok(())
    }

    /// Re-walk the recorded path against the live tree, returning the
    /// branch visited at each level and the destination leaf.
    #[allow(clippy::type_complexity)]
    fn navigate<'t>(
        &self,
        tree: &'t BPlusTree<K, V, C>,
    ) -> Result<(ArrayVec<&'t Branch<K, V>, MAX_DEPTH>, &'t PairVec<K, V>)> {
        let mut branches = ArrayVec::new();
        let mut node = &tree.root;
        for &ix in &self.path {
            match node {
                Node::Branch(b) => {
                    branches.push(&**b);
                    node = b.children.get(ix).ok_or(Error::IteratorInvalid)?;
                }
                Node::Leaf(_) => return Err(Error::IteratorInvalid),
            }
        }
        match node {
            Node::Leaf(leaf) => Ok((branches, leaf)),
            Node::Branch(_) => Err(Error::IteratorInvalid),
        }
    }

    /// Advance to the next entry. Returns `false` when the cursor ran
    /// past the last entry (and `ended` becomes set).
    pub fn move_next(&mut self, tree: &BPlusTree<K, V, C>) -> Result<bool> {
        self.guard(tree)?;
        if self.ended {
            return Ok(false);
        }
        self.step_next(tree)
    }

    /// Step back to the previous entry. A before-first cursor refuses to
    /// move and returns `false`; an after-last cursor recovers the last
    /// entry.
    pub fn move_prev(&mut self, tree: &BPlusTree<K, V, C>) -> Result<bool> {
        self.guard(tree)?;
        if !self.valid && !self.ended {
            return Ok(false);
        }
        self.step_prev(tree)
    }

    /// The entry the cursor is positioned on.
    ///
    /// `Err(IteratorInvalid)` when the cursor is not on an entry or the
    /// tree has changed since the cursor was taken.
    pub fn current<'t>(&self, tree: &'t BPlusTree<K, V, C>) -> Result<(&'t K, &'t V)> {
        self.guard(tree)?;
        if !self.valid {
            return Err(Error::IteratorInvalid);
        }
        let (_, leaf) = self.navigate(tree)?;
        if self.slot >= leaf.len() {
            return Err(Error::IteratorInvalid);
        }
        Ok(leaf.entry(self.slot))
    }

    /// Reposition at before-first (`to_beginning`) or after-last and
    /// take a fresh version snapshot.
    pub fn reset(&mut self, tree: &BPlusTree<K, V, C>, to_beginning: bool) {
        *self = tree.edge_cursor(to_beginning);
    }

    pub(crate) fn step_next(&mut self, tree: &BPlusTree<K, V, C>) -> Result<bool> {
        let next = if self.valid { self.slot + 1 } else { self.slot };
        if next < self.leaf_len {
            self.slot = next;
            self.valid = true;
            return Ok(true);
        }
        let (branches, _) = self.navigate(tree)?;
        for level in (0..self.path.len()).rev() {
            if self.path[level] + 1 < branches[level].children.len() {
                self.path[level] += 1;
                self.path.truncate(level + 1);
                let mut node = &branches[level].children[self.path[level]];
                loop {
                    match node {
                        Node::Branch(b) => {
                            self.path.push(0);
                            node = &b.children[0];
                        }
                        Node::Leaf(leaf) => {
                            self.leaf_len = leaf.len();
                            self.slot = 0;
                            self.valid = true;
                            self.ended = false;
                            return Ok(true);
                        }
                    }
                }
            }
        }
        self.slot = self.leaf_len;
        self.valid = false;
        self.ended = true;
        Ok(false)
    }

    fn step_prev(&mut self, tree: &BPlusTree<K, V, C>) -> Result<bool> {
        if self.valid {
            if self.slot > 0 {
                self.slot -= 1;
                return Ok(true);
            }
        } else if self.ended && self.leaf_len > 0 {
            self.slot = self.leaf_len - 1;
            self.valid = true;
            self.ended = false;
            return Ok(true);
        }
        let (branches, _) = self.navigate(tree)?;
        for level in (0..self.path.len()).rev() {
            if self.path[level] > 0 {
                self.path[level] -= 1;
                self.path.truncate(level + 1);
                let mut node = &branches[level].children[self.path[level]];
                loop {
                    match node {
                        Node::Branch(b) => {
                            let ix = b.children.len() - 1;
                            self.path.push(ix);
                            node = &b.children[ix];
                        }
                        Node::Leaf(leaf) => {
                            // Sibling leaves hold at least their minimum.
                            self.leaf_len = leaf.len();
                            self.slot = self.leaf_len - 1;
                            self.valid = true;
                            self.ended = false;
                            return Ok(true);
                        }
                    }
                }
            }
        }
        self.slot = 0;
        self.valid = false;
        self.ended = false;
        Ok(false)
    }
}

impl<K, V, C> BPlusTree<K, V, C> {
    /// Cursor positioned before the first entry; the first `move_next`
    /// yields the first entry.
    #[must_use]
    pub fn iter_begin(&self) -> Cursor<K, V, C> {
        self.edge_cursor(true)
    }

    /// Cursor positioned after the last entry; the first `move_prev`
    /// yields the last entry.
    #[must_use]
    pub fn iter_end(&self) -> Cursor<K, V, C> {
        self.edge_cursor(false)
    }

    pub(crate) fn edge_cursor(&self, front: bool) -> Cursor<K, V, C> {
        let mut path = ArrayVec::new();
        let mut node = &self.root;
        loop {
            match node {
                Node::Branch(b) => {
                    let ix = if front { 0 } else { b.children.len() - 1 };
                    path.push(ix);
                    node = &b.children[ix];
                }
                Node::Leaf(leaf) => {
                    let leaf_len = leaf.len();
                    return Cursor {
                        path,
                        slot: if front { 0 } else { leaf_len },
                        leaf_len,
                        valid: false,
                        ended: !front,
                        version: self.version,
                        _pd: PhantomData,
                    };
                }
            }
        }
    }

    /// Cursor positioned at the first entry whose key is `>=` the probe
    /// (`upper = false`) or `>` the probe (`upper = true`); after-last
    /// when no such entry exists.
    pub fn find_bound<Q>(&self, key: &Q, upper: bool) -> Cursor<K, V, C>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: KeyOrder<Q>,
    {
        let mut path = ArrayVec::new();
        let mut node = &self.root;
        loop {
            match node {
                Node::Branch(b) => {
                    let j = if upper {
                        upper_bound(&b.pivots, &self.cmp, key)
                    } else {
                        lower_bound(&b.pivots, &self.cmp, key)
                    };
                    path.push(j);
                    node = &b.children[j];
                }
                Node::Leaf(leaf) => {
                    let i = if upper {
                        upper_bound(leaf.keys(), &self.cmp, key)
                    } else {
                        lower_bound(leaf.keys(), &self.cmp, key)
                    };
                    let mut c = Cursor {
                        path,
                        slot: i,
                        leaf_len: leaf.len(),
                        valid: false,
                        ended: false,
                        version: self.version,
                        _pd: PhantomData,
                    };
                    if i < c.leaf_len {
                        c.valid = true;
                    } else {
                        // One past this leaf: settle on the next leaf,
                        // or become after-last.
                        let _ = c.step_next(self);
                    }
                    return c;
                }
            }
        }
    }
}
