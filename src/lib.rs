//! The core type theory of the Peano language.
//!
//! This is a small dependently typed calculus with dependent functions,
//! dependent pairs, natural numbers with their induction principle, and a
//! cumulative hierarchy of universes. Type checking is bidirectional, and
//! definitional equality is decided with normalization by evaluation: terms
//! are evaluated into a semantic domain and read back into a canonical form,
//! so equality never has to rewrite syntax under binders directly.
//!
//! Concrete syntax, elaboration, and the top-level driver live elsewhere.
//! This crate only ever consumes the core [`syntax::Term`] representation and
//! produces [`domain::Value`]s and [`validate::TypeError`]s.

#![warn(rust_2018_idioms)]

use std::fmt;
use std::ops;

pub mod var;

pub mod domain;
pub mod pretty;
pub mod syntax;

pub mod nbe;
pub mod validate;

/// The level of a universe.
///
/// Universes are cumulative: anything in `Type^i` is also in `Type^j` for
/// every `j` where `i <= j`. Levels are plain non-negative integers with no
/// upper bound enforced here.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct UniverseLevel(pub u32);

impl From<u32> for UniverseLevel {
    fn from(src: u32) -> UniverseLevel {
        UniverseLevel(src)
    }
}

impl ops::Add<u32> for UniverseLevel {
    type Output = UniverseLevel;

    fn add(self, other: u32) -> UniverseLevel {
        UniverseLevel(self.0 + other)
    }
}

impl fmt::Display for UniverseLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
