//! Variable bookkeeping for the two de Bruijn representations.
//!
//! Core terms name their variables with [`Index`]es, values with [`Level`]s.
//! The [`Size`] of the enclosing environment converts between the two.

use std::fmt;
use std::ops;

/// De Bruijn index.
///
/// This counts the number of binders we pass on the way up the syntax tree to
/// the binder that bound this variable. Indices make environment lookup a
/// simple positional access, and give alpha equality for free.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Index(pub u32);

impl From<u32> for Index {
    fn from(src: u32) -> Index {
        Index(src)
    }
}

impl fmt::Display for Index {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.0)
    }
}

/// De Bruijn level.
///
/// This counts the total number of binders between the root of the term and
/// the binder that bound this variable. Unlike indices, levels stay stable
/// when we move under further binders, which makes them the right choice for
/// the free variables of semantic values. They are converted back into
/// indices during read-back.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Level(pub u32);

impl From<u32> for Level {
    fn from(src: u32) -> Level {
        Level(src)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "%{}", self.0)
    }
}

/// The number of binders currently in scope.
///
/// This always matches the length of the environment in play, so the next
/// fresh variable is minted at level `size` and the environment is extended
/// in the same motion.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Size(pub u32);

impl Size {
    /// The level of the next variable to be bound.
    pub fn next_level(self) -> Level {
        Level(self.0)
    }

    /// Convert a level into an index, relative to this binder depth.
    ///
    /// Panics in debug builds if `level` has not yet been bound at this
    /// depth; read-back only ever sees levels below the current size.
    pub fn index(self, level: Level) -> Index {
        Index(self.0 - (level.0 + 1))
    }
}

impl From<u32> for Size {
    fn from(src: u32) -> Size {
        Size(src)
    }
}

impl ops::Add<u32> for Size {
    type Output = Size;

    fn add(self, other: u32) -> Size {
        Size(self.0 + other)
    }
}

/// An environment of entries, looked up by de Bruijn index.
///
/// Entry 0 is the most recently bound. The environment is backed by an
/// `im::Vector` so that the many closures created during evaluation can share
/// structure instead of copying their captured scope.
#[derive(Debug, Clone, PartialEq)]
pub struct Env<Entry: Clone> {
    entries: im::Vector<Entry>,
}

impl<Entry: Clone> Env<Entry> {
    /// Create a new, empty environment.
    pub fn new() -> Env<Entry> {
        Env {
            entries: im::Vector::new(),
        }
    }

    /// The number of entries bound in the environment.
    pub fn size(&self) -> Size {
        Size(self.entries.len() as u32)
    }

    /// Lookup an entry by index.
    pub fn lookup_entry(&self, index: Index) -> Option<&Entry> {
        self.entries.get(index.0 as usize)
    }

    /// Bind a new entry at index 0.
    pub fn add_entry(&mut self, entry: Entry) {
        self.entries.push_front(entry);
    }

    /// Iterate over the entries, most recently bound first.
    pub fn iter(&self) -> im::vector::Iter<'_, Entry> {
        self.entries.iter()
    }
}

impl<Entry: Clone> Default for Env<Entry> {
    fn default() -> Env<Entry> {
        Env::new()
    }
}
