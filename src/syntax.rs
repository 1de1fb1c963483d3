//! The core syntax of the language.
//!
//! Terms come out of the elaborator fully explicit, with variables as de
//! Bruijn indices. Every `BINDS` comment marks a subterm that lives under one
//! extra binder; the successor case of `NatRec` lives under two (the
//! predecessor, then the induction hypothesis).

use std::fmt;
use std::ops;
use std::rc::Rc;

use crate::{var, UniverseLevel};

/// Reference counted term.
#[derive(Clone, PartialEq, Eq)]
pub struct RcTerm {
    pub inner: Rc<Term>,
}

impl RcTerm {
    /// Construct a variable.
    pub fn var(index: impl Into<var::Index>) -> RcTerm {
        RcTerm::from(Term::Var(index.into()))
    }

    /// Construct an annotated term.
    pub fn ann(term: impl Into<RcTerm>, term_ty: impl Into<RcTerm>) -> RcTerm {
        RcTerm::from(Term::Ann(term.into(), term_ty.into()))
    }

    /// Construct a universe.
    pub fn universe(level: impl Into<UniverseLevel>) -> RcTerm {
        RcTerm::from(Term::Universe(level.into()))
    }

    /// Construct a natural number literal as iterated successors of zero.
    pub fn from_nat(value: u32) -> RcTerm {
        (0..value).fold(RcTerm::from(Term::Zero), |acc, _| {
            RcTerm::from(Term::Suc(acc))
        })
    }
}

impl From<Term> for RcTerm {
    fn from(src: Term) -> RcTerm {
        RcTerm {
            inner: Rc::new(src),
        }
    }
}

impl AsRef<Term> for RcTerm {
    fn as_ref(&self) -> &Term {
        self.inner.as_ref()
    }
}

impl ops::Deref for RcTerm {
    type Target = Term;

    fn deref(&self) -> &Term {
        self.as_ref()
    }
}

impl fmt::Debug for RcTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.inner, f)
    }
}

impl fmt::Display for RcTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.as_ref(), f)
    }
}

/// Core terms.
///
/// Two terms are alpha equivalent exactly when they are structurally equal,
/// because binding structure is carried entirely by de Bruijn indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Term {
    /// Variables
    Var(var::Index),
    /// Let bindings, with the definition in scope for the body only
    Let(RcTerm, /* BINDS */ RcTerm),
    /// A term that is explicitly annotated with a type
    ///
    /// This is the sole bridge from checking mode back into synthesis.
    Ann(RcTerm, RcTerm),

    /// Dependent function types
    FunType(RcTerm, /* BINDS */ RcTerm),
    /// Introduce a function
    FunIntro(/* BINDS */ RcTerm),
    /// Eliminate a function (application)
    FunApp(RcTerm, RcTerm),

    /// Dependent pair types
    PairType(RcTerm, /* BINDS */ RcTerm),
    /// Introduce a pair
    PairIntro(RcTerm, RcTerm),
    /// Project the first element of a pair
    PairFst(RcTerm),
    /// Project the second element of a pair
    PairSnd(RcTerm),

    /// The type of natural numbers
    Nat,
    /// The natural number zero
    Zero,
    /// The successor of a natural number
    Suc(RcTerm),
    /// Eliminate a natural number by primitive recursion
    ///
    /// The motive gives the result type as a function of the number being
    /// eliminated. The successor case binds the predecessor and then the
    /// result of the recursive call.
    NatRec(
        /* BINDS */ RcTerm,
        RcTerm,
        /* BINDS 2 */ RcTerm,
        RcTerm,
    ),

    /// Universe of types
    Universe(UniverseLevel),
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let doc = self.to_doc().group();
        fmt::Display::fmt(&doc.pretty(1_000_000_000), f)
    }
}
