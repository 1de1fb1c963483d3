//! Bidirectional type checking.
//!
//! Three mutually recursive judgments, all pure functions of the context and
//! the current binder depth:
//!
//! - [`check`]: does this term have this type?
//! - [`synth`]: what type does this term have?
//! - [`check_ty`]: does this term denote a type?
//!
//! Types are compared semantically by [`nbe::check_tp`], so checking calls
//! into the evaluator whenever a type has to be computed from a term. The
//! first failure aborts the whole call tree with a [`TypeError`].

use std::error::Error;
use std::fmt;

use crate::domain::{self, Closure, RcType, RcValue, Value};
use crate::nbe::{self, NbeError};
use crate::syntax::{RcTerm, Term};
use crate::{var, UniverseLevel};

/// The local typing context.
///
/// Each binder in scope contributes a value and a type, index 0 being the
/// most recently bound. A local with no computational definition stores its
/// own stuck variable as the value, so it is inert but still usable inside
/// dependent types. Both environments are persistent, so entering a binder
/// extends a clone and the original survives untouched for the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct Context {
    values: domain::Env,
    tys: domain::Env,
}

impl Context {
    /// Create a new, empty context.
    pub fn new() -> Context {
        Context {
            values: domain::Env::new(),
            tys: domain::Env::new(),
        }
    }

    /// The number of binders in scope.
    ///
    /// This is always in lockstep with the `size` parameter threaded through
    /// the judgments below.
    pub fn size(&self) -> var::Size {
        self.values.size()
    }

    /// The value environment expected by the evaluator.
    pub fn values(&self) -> &domain::Env {
        &self.values
    }

    /// Bind a local with a known value, e.g. a let definition.
    pub fn insert_local(&mut self, value: RcValue, ty: RcType) {
        self.values.add_entry(value);
        self.tys.add_entry(ty);
    }

    /// Bind a local with no definition, as a fresh stuck variable.
    pub fn insert_fresh(&mut self, size: var::Size, ty: RcType) {
        self.insert_local(RcValue::var(size.next_level()), ty);
    }

    /// Lookup the value and type of a local by index.
    pub fn lookup_local(&self, index: var::Index) -> Option<(&RcValue, &RcType)> {
        let value = self.values.lookup_entry(index)?;
        let ty = self.tys.lookup_entry(index)?;
        Some((value, ty))
    }

    /// Evaluate a term in the values of this context.
    pub fn eval(&self, term: &RcTerm) -> Result<RcValue, NbeError> {
        nbe::eval(term, &self.values)
    }
}

impl Default for Context {
    fn default() -> Context {
        Context::new()
    }
}

/// An error produced during type checking.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeError {
    /// No rule synthesizes a type for this term; it needs an annotation.
    AmbiguousTerm(RcTerm),
    /// The synthesized type is not a subtype of the expected type.
    ExpectedSubtype(RcType, RcType),
    /// A position requiring a universe received something else.
    ExpectedUniverse {
        over: Option<UniverseLevel>,
        found: RcType,
    },
    ExpectedFunType { found: RcType },
    ExpectedPairType { found: RcType },
    UnboundVariable(var::Index),
    Nbe(NbeError),
}

impl From<NbeError> for TypeError {
    fn from(src: NbeError) -> TypeError {
        TypeError::Nbe(src)
    }
}

impl Error for TypeError {}

impl fmt::Display for TypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeError::AmbiguousTerm(term) => {
                write!(f, "unable to synthesize the type of `{}`", term)
            },
            TypeError::ExpectedSubtype(found, expected) => write!(
                f,
                "type mismatch: found `{:?}` but expected a subtype of `{:?}`",
                found.inner, expected.inner,
            ),
            TypeError::ExpectedUniverse { over, found } => match over {
                None => write!(f, "expected a universe, found `{:?}`", found.inner),
                Some(level) => write!(
                    f,
                    "expected a universe over level {}, found `{:?}`",
                    level, found.inner,
                ),
            },
            TypeError::ExpectedFunType { found } => {
                write!(f, "expected a function type, found `{:?}`", found.inner)
            },
            TypeError::ExpectedPairType { found } => {
                write!(f, "expected a pair type, found `{:?}`", found.inner)
            },
            TypeError::UnboundVariable(index) => write!(f, "unbound variable `{}`", index),
            TypeError::Nbe(error) => error.fmt(f),
        }
    }
}

/// Require that one type is a subtype of another.
fn expect_subtype(size: var::Size, ty1: &RcType, ty2: &RcType) -> Result<(), TypeError> {
    if nbe::check_tp(size, ty1, ty2, true)? {
        Ok(())
    } else {
        Err(TypeError::ExpectedSubtype(ty1.clone(), ty2.clone()))
    }
}

/// Check that a term conforms to a given type.
pub fn check(
    context: &Context,
    size: var::Size,
    term: &RcTerm,
    expected_ty: &RcType,
) -> Result<(), TypeError> {
    log::trace!("checking term:\t\t{}", term);

    match term.as_ref() {
        Term::Let(def, body) => {
            let def_ty = synth(context, size, def)?;
            let def_value = context.eval(def)?;
            let mut body_context = context.clone();
            body_context.insert_local(def_value, def_ty);

            check(&body_context, size + 1, body, expected_ty)
        },

        Term::FunType(param_ty, body_ty) | Term::PairType(param_ty, body_ty) => {
            match expected_ty.as_ref() {
                Value::Universe(_) => {},
                _ => {
                    return Err(TypeError::ExpectedUniverse {
                        over: None,
                        found: expected_ty.clone(),
                    });
                },
            }

            check(context, size, param_ty, expected_ty)?;
            let param_ty_value = context.eval(param_ty)?;
            let mut body_context = context.clone();
            body_context.insert_fresh(size, param_ty_value);

            check(&body_context, size + 1, body_ty, expected_ty)
        },

        Term::FunIntro(body) => match expected_ty.as_ref() {
            Value::FunType(param_ty, body_ty) => {
                let param = RcValue::var(size.next_level());
                let body_ty = nbe::do_closure_app(body_ty, param.clone())?;
                let mut body_context = context.clone();
                body_context.insert_local(param, param_ty.clone());

                check(&body_context, size + 1, body, &body_ty)
            },
            _ => Err(TypeError::ExpectedFunType {
                found: expected_ty.clone(),
            }),
        },

        Term::PairIntro(fst, snd) => match expected_ty.as_ref() {
            Value::PairType(fst_ty, snd_ty) => {
                check(context, size, fst, fst_ty)?;
                let fst_value = context.eval(fst)?;

                check(context, size, snd, &nbe::do_closure_app(snd_ty, fst_value)?)
            },
            _ => Err(TypeError::ExpectedPairType {
                found: expected_ty.clone(),
            }),
        },

        Term::Nat => match expected_ty.as_ref() {
            Value::Universe(_) => Ok(()),
            _ => Err(TypeError::ExpectedUniverse {
                over: None,
                found: expected_ty.clone(),
            }),
        },

        // No universe is a member of itself, so the expected level must be
        // strictly greater
        Term::Universe(term_level) => match expected_ty.as_ref() {
            Value::Universe(ann_level) if term_level < ann_level => Ok(()),
            _ => Err(TypeError::ExpectedUniverse {
                over: Some(*term_level),
                found: expected_ty.clone(),
            }),
        },

        _ => expect_subtype(size, &synth(context, size, term)?, expected_ty),
    }
}

/// Synthesize the type of a term.
pub fn synth(context: &Context, size: var::Size, term: &RcTerm) -> Result<RcType, TypeError> {
    log::trace!("synthesizing term:\t{}", term);

    match term.as_ref() {
        Term::Var(index) => match context.lookup_local(*index) {
            None => Err(TypeError::UnboundVariable(*index)),
            Some((_, ty)) => Ok(ty.clone()),
        },
        Term::Let(def, body) => {
            let def_ty = synth(context, size, def)?;
            let def_value = context.eval(def)?;
            let mut body_context = context.clone();
            body_context.insert_local(def_value, def_ty);

            synth(&body_context, size + 1, body)
        },
        Term::Ann(term, ann_ty) => {
            check_ty(context, size, ann_ty)?;
            let ann_ty_value = context.eval(ann_ty)?;
            check(context, size, term, &ann_ty_value)?;

            Ok(ann_ty_value)
        },

        Term::FunApp(fun, arg) => {
            let fun_ty = synth(context, size, fun)?;
            match fun_ty.as_ref() {
                Value::FunType(param_ty, body_ty) => {
                    check(context, size, arg, param_ty)?;
                    let arg_value = context.eval(arg)?;

                    Ok(nbe::do_closure_app(body_ty, arg_value)?)
                },
                _ => Err(TypeError::ExpectedFunType { found: fun_ty }),
            }
        },

        Term::PairFst(pair) => {
            let pair_ty = synth(context, size, pair)?;
            match pair_ty.as_ref() {
                Value::PairType(fst_ty, _) => Ok(fst_ty.clone()),
                _ => Err(TypeError::ExpectedPairType { found: pair_ty }),
            }
        },
        Term::PairSnd(pair) => {
            let pair_ty = synth(context, size, pair)?;
            match pair_ty.as_ref() {
                Value::PairType(_, snd_ty) => {
                    // The type of the second projection depends on the value
                    // of the first
                    let fst_value = context.eval(&RcTerm::from(Term::PairFst(pair.clone())))?;

                    Ok(nbe::do_closure_app(snd_ty, fst_value)?)
                },
                _ => Err(TypeError::ExpectedPairType { found: pair_ty }),
            }
        },

        Term::Zero => Ok(RcValue::nat_ty()),
        Term::Suc(nat) => {
            check(context, size, nat, &RcValue::nat_ty())?;

            Ok(RcValue::nat_ty())
        },
        Term::NatRec(motive, zero, suc, nat) => {
            check(context, size, nat, &RcValue::nat_ty())?;

            let mut motive_context = context.clone();
            motive_context.insert_fresh(size, RcValue::nat_ty());
            check_ty(&motive_context, size + 1, motive)?;
            let motive_closure = Closure::new(motive.clone(), context.values().clone());

            let zero_ty = nbe::do_closure_app(&motive_closure, RcValue::from(Value::Zero))?;
            check(context, size, zero, &zero_ty)?;

            // The successor case sees the predecessor and the induction
            // hypothesis at the motive applied to that predecessor
            let pred = RcValue::var(size.next_level());
            let ih_ty = nbe::do_closure_app(&motive_closure, pred.clone())?;
            let suc_ty =
                nbe::do_closure_app(&motive_closure, RcValue::from(Value::Suc(pred.clone())))?;
            let mut suc_context = context.clone();
            suc_context.insert_local(pred, RcValue::nat_ty());
            suc_context.insert_fresh(size + 1, ih_ty);
            check(&suc_context, size + 2, suc, &suc_ty)?;

            let nat_value = context.eval(nat)?;

            Ok(nbe::do_closure_app(&motive_closure, nat_value)?)
        },

        _ => Err(TypeError::AmbiguousTerm(term.clone())),
    }
}

/// Check that a term denotes a type.
///
/// The type formers are recognized structurally, so a nested `FunType` does
/// not need a universe annotation on every component. Anything else must
/// synthesize some universe.
pub fn check_ty(context: &Context, size: var::Size, term: &RcTerm) -> Result<(), TypeError> {
    log::trace!("checking type:\t\t{}", term);

    match term.as_ref() {
        Term::Let(def, body) => {
            let def_ty = synth(context, size, def)?;
            let def_value = context.eval(def)?;
            let mut body_context = context.clone();
            body_context.insert_local(def_value, def_ty);

            check_ty(&body_context, size + 1, body)
        },

        Term::FunType(param_ty, body_ty) | Term::PairType(param_ty, body_ty) => {
            check_ty(context, size, param_ty)?;
            let param_ty_value = context.eval(param_ty)?;
            let mut body_context = context.clone();
            body_context.insert_fresh(size, param_ty_value);

            check_ty(&body_context, size + 1, body_ty)
        },

        Term::Nat => Ok(()),
        Term::Universe(_) => Ok(()),

        _ => {
            let synth_ty = synth(context, size, term)?;
            match synth_ty.as_ref() {
                Value::Universe(_) => Ok(()),
                _ => Err(TypeError::ExpectedUniverse {
                    over: None,
                    found: synth_ty,
                }),
            }
        },
    }
}
