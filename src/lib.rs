//! Singly linked integer list with dual read-only/mutable cursors, plus an
//! observer-pattern price watcher built on top of it.
//!
//! Two halves:
//! - [`list`]: the [`IntList`] container — O(1) append, forward-only cursors
//!   that compare across mutability variants and downgrade one way.
//! - [`observer`]: a [`Product`] whose price changes notify subscribed
//!   buyers and land, truncated to whole units, in an `IntList` history.
//!
//! The `price_watch` binary runs the fixed demonstration sequence.

pub mod list;
pub mod observer;

pub use list::{CursorMut, IntList, IntoIter, Iter, IterMut};
pub use observer::{
    Buyer, ObserverId, PriceObserver, Product, Reaction, WatchError, Wholesaler,
};
