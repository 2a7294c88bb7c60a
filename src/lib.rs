//! In-memory ordered map and set built on a B+Tree with a configurable
//! branching factor.
//!
//! The [`BPlusTree`] engine keeps entries sorted by a caller-supplied
//! total ordering ([`KeyOrder`]); all entries live in the leaves and
//! branch nodes carry separator keys only. [`OrderedMap`] and
//! [`OrderedSet`] are thin wrappers enforcing unique keys above the
//! engine.
//!
//! Point operations are O(log n); iteration is amortized O(1) per step,
//! either through the borrowing [`Iter`] family or through a detached
//! [`Cursor`], which owns no borrow of the tree and instead snapshots
//! its version, refusing with [`Error::IteratorInvalid`] once the tree
//! has been mutated underneath it.
//!
//! ```
//! use bptree::OrderedMap;
//!
//! let mut map = OrderedMap::new(64)?;
//! map.insert("b", 2);
//! map.insert("a", 1);
//! assert_eq!(map.iter().collect::<Vec<_>>(), [(&"a", &1), (&"b", &2)]);
//!
//! let cur = map.find_bound(&"a", true);
//! assert_eq!(cur.current(map.as_tree())?, (&"b", &2));
//! # Ok::<(), bptree::Error>(())
//! ```
//!
//! The crate is not thread-safe in the sense of interior mutability:
//! the types are `Send`/`Sync` when their parameters are, but the
//! caller serializes access.

#![deny(missing_docs)]

mod vecs;

mod cursor;
mod error;
mod iter;
mod map;
mod set;
mod tree;

pub use cursor::Cursor;
pub use error::{Error, Result};
pub use iter::{IntoIter, IntoKeys, IntoValues, Iter, Keys, Values};
pub use map::{OrderedMap, DEFAULT_ORDER};
pub use set::{
    Difference, Intersection, OrderedSet, SetIntoIter, SetIter, SymmetricDifference, Union,
};
pub use tree::{BPlusTree, KeyOrder, Natural, OrderBy, MAX_ORDER, MIN_ORDER};
