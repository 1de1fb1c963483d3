//! The semantic domain.
//!
//! Values are terms that have been evaluated to weak head normal form: just
//! far enough to expose their outermost constructor. Anything under a binder
//! is suspended in a closure and only evaluated on application.

use std::rc::Rc;

use crate::syntax::RcTerm;
use crate::{var, UniverseLevel};

/// An environment of values, one per de Bruijn index in scope.
pub type Env = var::Env<RcValue>;

/// A closure that binds a single variable.
///
/// These are a limited form of explicit substitution: rather than eagerly
/// substituting under a binder, we capture the environment the body was
/// defined in and extend it when an argument finally arrives.
#[derive(Debug, Clone, PartialEq)]
pub struct Closure {
    /// The body, one binder deep, still unevaluated.
    pub term: RcTerm,
    /// The environment the body will be evaluated in.
    pub env: Env,
}

impl Closure {
    pub fn new(term: RcTerm, env: Env) -> Closure {
        Closure { term, env }
    }
}

/// A closure that binds two variables.
///
/// Only the successor case of `NatRec` needs this: its body sees the
/// predecessor and then the induction hypothesis.
#[derive(Debug, Clone, PartialEq)]
pub struct Closure2 {
    /// The body, two binders deep, still unevaluated.
    pub term: RcTerm,
    /// The environment the body will be evaluated in.
    pub env: Env,
}

impl Closure2 {
    pub fn new(term: RcTerm, env: Env) -> Closure2 {
        Closure2 { term, env }
    }
}

/// Reference counted value.
#[derive(Debug, Clone, PartialEq)]
pub struct RcValue {
    pub inner: Rc<Value>,
}

impl RcValue {
    /// Construct a variable, stuck at the given level.
    pub fn var(level: impl Into<var::Level>) -> RcValue {
        RcValue::from(Value::var(level))
    }

    /// Construct a universe.
    pub fn universe(level: impl Into<UniverseLevel>) -> RcValue {
        RcValue::from(Value::Universe(level.into()))
    }

    /// Construct the type of natural numbers.
    pub fn nat_ty() -> RcValue {
        RcValue::from(Value::Nat)
    }

    /// Construct a natural number literal as iterated successors of zero.
    pub fn from_nat(value: u32) -> RcValue {
        (0..value).fold(RcValue::from(Value::Zero), |acc, _| {
            RcValue::from(Value::Suc(acc))
        })
    }
}

impl From<Value> for RcValue {
    fn from(src: Value) -> RcValue {
        RcValue {
            inner: Rc::new(src),
        }
    }
}

impl AsRef<Value> for RcValue {
    fn as_ref(&self) -> &Value {
        self.inner.as_ref()
    }
}

/// Terms in weak head normal form.
///
/// These are either _canonical values_, or _neutral values_ whose computation
/// is blocked on a free variable.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Neutral values
    Neutral(RcNeutral),

    /// Dependent function types
    FunType(RcType, Closure),
    /// Introduce a function
    FunIntro(Closure),

    /// Dependent pair types
    PairType(RcType, Closure),
    /// Introduce a pair
    PairIntro(RcValue, RcValue),

    /// The type of natural numbers
    Nat,
    /// The natural number zero
    Zero,
    /// The successor of a natural number
    Suc(RcValue),

    /// Universe of types
    Universe(UniverseLevel),
}

impl Value {
    /// Construct a variable, stuck at the given level.
    pub fn var(level: impl Into<var::Level>) -> Value {
        Value::Neutral(RcNeutral::from(Neutral::Var(level.into())))
    }
}

/// Alias for values that are used as types.
pub type Type = Value;

/// Alias for reference counted values that are used as types.
pub type RcType = RcValue;

/// Reference counted neutral value.
#[derive(Debug, Clone, PartialEq)]
pub struct RcNeutral {
    pub inner: Rc<Neutral>,
}

impl From<Neutral> for RcNeutral {
    fn from(src: Neutral) -> RcNeutral {
        RcNeutral {
            inner: Rc::new(src),
        }
    }
}

impl AsRef<Neutral> for RcNeutral {
    fn as_ref(&self) -> &Neutral {
        self.inner.as_ref()
    }
}

/// Values that want to reduce further, but are blocked on a variable.
///
/// The blocking variable sits at the bottom of a spine of eliminations, each
/// of which will resume once the variable is substituted for something
/// canonical.
#[derive(Debug, Clone, PartialEq)]
pub enum Neutral {
    /// Variables
    Var(var::Level),

    /// Apply a function to an argument
    FunApp(RcNeutral, RcValue),

    /// Project the first element of a pair
    PairFst(RcNeutral),
    /// Project the second element of a pair
    PairSnd(RcNeutral),

    /// Recurse over a natural number
    ///
    /// Carries the motive, the evaluated zero case, and the suspended
    /// successor case, blocked on the number being eliminated.
    NatRec(Closure, RcValue, Closure2, RcNeutral),
}
