//! Normalization by evaluation.
//!
//! Evaluation takes core terms to weak-head-normal [`Value`]s, suspending
//! anything under a binder in a closure. Read-back quotes a value into a
//! canonical core term, minting fresh variables to go under binders. Putting
//! the two together decides definitional equality without ever substituting
//! through syntax.

use std::error::Error;
use std::fmt;

use crate::domain::{self, Closure, Closure2, Neutral, RcNeutral, RcType, RcValue, Value};
use crate::syntax::{RcTerm, Term};
use crate::var;

/// An error produced during normalization.
///
/// If a term has been type checked before evaluation, this error should never
/// be produced.
#[derive(Debug, Clone, PartialEq)]
pub struct NbeError {
    pub message: String,
}

impl NbeError {
    pub fn new(message: impl Into<String>) -> NbeError {
        NbeError {
            message: message.into(),
        }
    }
}

impl Error for NbeError {}

impl fmt::Display for NbeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to normalize: {}", self.message)
    }
}

/// Apply a closure to an argument.
pub fn do_closure_app(closure: &Closure, arg: RcValue) -> Result<RcValue, NbeError> {
    let mut env = closure.env.clone();
    env.add_entry(arg);
    eval(&closure.term, &env)
}

/// Apply a two-variable closure to the predecessor and induction hypothesis.
pub fn do_closure2_app(
    closure: &Closure2,
    pred: RcValue,
    ih: RcValue,
) -> Result<RcValue, NbeError> {
    let mut env = closure.env.clone();
    env.add_entry(pred);
    env.add_entry(ih);
    eval(&closure.term, &env)
}

/// Apply a function to an argument.
pub fn do_fun_app(fun: &RcValue, arg: RcValue) -> Result<RcValue, NbeError> {
    match fun.as_ref() {
        Value::FunIntro(body) => do_closure_app(body, arg),
        Value::Neutral(fun) => {
            let app = RcNeutral::from(Neutral::FunApp(fun.clone(), arg));
            Ok(RcValue::from(Value::Neutral(app)))
        },
        _ => Err(NbeError::new("do_fun_app: not a function")),
    }
}

/// Return the first element of a pair.
pub fn do_pair_fst(pair: &RcValue) -> Result<RcValue, NbeError> {
    match pair.as_ref() {
        Value::PairIntro(fst, _) => Ok(fst.clone()),
        Value::Neutral(pair) => {
            let fst = RcNeutral::from(Neutral::PairFst(pair.clone()));
            Ok(RcValue::from(Value::Neutral(fst)))
        },
        _ => Err(NbeError::new("do_pair_fst: not a pair")),
    }
}

/// Return the second element of a pair.
pub fn do_pair_snd(pair: &RcValue) -> Result<RcValue, NbeError> {
    match pair.as_ref() {
        Value::PairIntro(_, snd) => Ok(snd.clone()),
        Value::Neutral(pair) => {
            let snd = RcNeutral::from(Neutral::PairSnd(pair.clone()));
            Ok(RcValue::from(Value::Neutral(snd)))
        },
        _ => Err(NbeError::new("do_pair_snd: not a pair")),
    }
}

/// Recurse over a natural number.
///
/// Each unfolding of the successor case peels one `Suc` off the scrutinee, so
/// the recursion is structural and terminates on any canonical number.
pub fn do_nat_rec(
    motive: &Closure,
    zero: &RcValue,
    suc: &Closure2,
    nat: &RcValue,
) -> Result<RcValue, NbeError> {
    match nat.as_ref() {
        Value::Zero => Ok(zero.clone()),
        Value::Suc(pred) => {
            let ih = do_nat_rec(motive, zero, suc, pred)?;
            do_closure2_app(suc, pred.clone(), ih)
        },
        Value::Neutral(nat) => {
            let rec = RcNeutral::from(Neutral::NatRec(
                motive.clone(),
                zero.clone(),
                suc.clone(),
                nat.clone(),
            ));
            Ok(RcValue::from(Value::Neutral(rec)))
        },
        _ => Err(NbeError::new("do_nat_rec: not a natural number")),
    }
}

/// Evaluate a core term into a semantic value.
pub fn eval(term: &RcTerm, env: &domain::Env) -> Result<RcValue, NbeError> {
    match term.as_ref() {
        Term::Var(index) => match env.lookup_entry(*index) {
            Some(value) => Ok(value.clone()),
            None => Err(NbeError::new("eval: variable not found")),
        },
        Term::Let(def, body) => {
            let def = eval(def, env)?;
            let mut env = env.clone();
            env.add_entry(def);
            eval(body, &env)
        },
        Term::Ann(term, _) => eval(term, env),

        // Functions
        Term::FunType(param_ty, body_ty) => {
            let param_ty = eval(param_ty, env)?;
            let body_ty = Closure::new(body_ty.clone(), env.clone());

            Ok(RcValue::from(Value::FunType(param_ty, body_ty)))
        },
        Term::FunIntro(body) => {
            let body = Closure::new(body.clone(), env.clone());

            Ok(RcValue::from(Value::FunIntro(body)))
        },
        Term::FunApp(fun, arg) => do_fun_app(&eval(fun, env)?, eval(arg, env)?),

        // Pairs
        Term::PairType(fst_ty, snd_ty) => {
            let fst_ty = eval(fst_ty, env)?;
            let snd_ty = Closure::new(snd_ty.clone(), env.clone());

            Ok(RcValue::from(Value::PairType(fst_ty, snd_ty)))
        },
        Term::PairIntro(fst, snd) => {
            let fst = eval(fst, env)?;
            let snd = eval(snd, env)?;

            Ok(RcValue::from(Value::PairIntro(fst, snd)))
        },
        Term::PairFst(pair) => do_pair_fst(&eval(pair, env)?),
        Term::PairSnd(pair) => do_pair_snd(&eval(pair, env)?),

        // Natural numbers
        Term::Nat => Ok(RcValue::from(Value::Nat)),
        Term::Zero => Ok(RcValue::from(Value::Zero)),
        Term::Suc(nat) => Ok(RcValue::from(Value::Suc(eval(nat, env)?))),
        Term::NatRec(motive, zero, suc, nat) => {
            let motive = Closure::new(motive.clone(), env.clone());
            let zero = eval(zero, env)?;
            let suc = Closure2::new(suc.clone(), env.clone());

            do_nat_rec(&motive, &zero, &suc, &eval(nat, env)?)
        },

        // Universes
        Term::Universe(level) => Ok(RcValue::from(Value::Universe(*level))),
    }
}

/// Quote a value back into a canonical core term.
///
/// Going under a binder mints a fresh variable at the next level and
/// increments `size` for the body, so quoted terms always number their
/// variables by binder depth. Two values are definitionally equal exactly
/// when their quoted forms are structurally equal.
pub fn read_back(size: var::Size, value: &RcValue) -> Result<RcTerm, NbeError> {
    match value.as_ref() {
        Value::Neutral(neutral) => read_back_neutral(size, neutral),

        // Functions
        Value::FunType(param_ty, body_ty) => {
            let param = RcValue::var(size.next_level());
            let param_ty = read_back(size, param_ty)?;
            let body_ty = read_back(size + 1, &do_closure_app(body_ty, param)?)?;

            Ok(RcTerm::from(Term::FunType(param_ty, body_ty)))
        },
        Value::FunIntro(body) => {
            let param = RcValue::var(size.next_level());
            let body = read_back(size + 1, &do_closure_app(body, param)?)?;

            Ok(RcTerm::from(Term::FunIntro(body)))
        },

        // Pairs
        Value::PairType(fst_ty, snd_ty) => {
            let fst = RcValue::var(size.next_level());
            let fst_ty = read_back(size, fst_ty)?;
            let snd_ty = read_back(size + 1, &do_closure_app(snd_ty, fst)?)?;

            Ok(RcTerm::from(Term::PairType(fst_ty, snd_ty)))
        },
        Value::PairIntro(fst, snd) => {
            let fst = read_back(size, fst)?;
            let snd = read_back(size, snd)?;

            Ok(RcTerm::from(Term::PairIntro(fst, snd)))
        },

        // Natural numbers
        Value::Nat => Ok(RcTerm::from(Term::Nat)),
        Value::Zero => Ok(RcTerm::from(Term::Zero)),
        Value::Suc(nat) => Ok(RcTerm::from(Term::Suc(read_back(size, nat)?))),

        // Universes
        Value::Universe(level) => Ok(RcTerm::from(Term::Universe(*level))),
    }
}

/// Quote a neutral value back into a core term.
pub fn read_back_neutral(size: var::Size, neutral: &RcNeutral) -> Result<RcTerm, NbeError> {
    match neutral.as_ref() {
        Neutral::Var(level) => Ok(RcTerm::from(Term::Var(size.index(*level)))),
        Neutral::FunApp(fun, arg) => {
            let fun = read_back_neutral(size, fun)?;
            let arg = read_back(size, arg)?;

            Ok(RcTerm::from(Term::FunApp(fun, arg)))
        },
        Neutral::PairFst(pair) => {
            let pair = read_back_neutral(size, pair)?;

            Ok(RcTerm::from(Term::PairFst(pair)))
        },
        Neutral::PairSnd(pair) => {
            let pair = read_back_neutral(size, pair)?;

            Ok(RcTerm::from(Term::PairSnd(pair)))
        },
        Neutral::NatRec(motive, zero, suc, nat) => {
            let nat_var = RcValue::var(size.next_level());
            let motive = read_back(size + 1, &do_closure_app(motive, nat_var)?)?;

            let zero = read_back(size, zero)?;

            let pred_var = RcValue::var(size.next_level());
            let ih_var = RcValue::var((size + 1).next_level());
            let suc = read_back(size + 2, &do_closure2_app(suc, pred_var, ih_var)?)?;

            let nat = read_back_neutral(size, nat)?;

            Ok(RcTerm::from(Term::NatRec(motive, zero, suc, nat)))
        },
    }
}

/// Evaluate a term and quote the result.
pub fn normalize(size: var::Size, term: &RcTerm, env: &domain::Env) -> Result<RcTerm, NbeError> {
    read_back(size, &eval(term, env)?)
}

/// Check whether a semantic type is equal to, or a subtype of, another.
///
/// With `subtype` set, universes are compared cumulatively and the flag is
/// propagated covariantly through function codomains and both components of
/// pair types. Function domains are always compared for equality. A `false`
/// result carries no diagnostic; the checker reports the offending values.
pub fn check_tp(
    size: var::Size,
    ty1: &RcType,
    ty2: &RcType,
    subtype: bool,
) -> Result<bool, NbeError> {
    match (ty1.as_ref(), ty2.as_ref()) {
        (Value::Neutral(neutral1), Value::Neutral(neutral2)) => {
            let term1 = read_back_neutral(size, neutral1)?;
            let term2 = read_back_neutral(size, neutral2)?;

            Ok(term1 == term2)
        },
        (Value::Nat, Value::Nat) => Ok(true),
        (Value::Zero, Value::Zero) => Ok(true),
        (Value::Suc(nat1), Value::Suc(nat2)) => check_tp(size, nat1, nat2, subtype),
        (Value::FunType(param_ty1, body_ty1), Value::FunType(param_ty2, body_ty2)) => {
            let param = RcValue::var(size.next_level());

            // Domains must match exactly, even when subtyping
            Ok(check_tp(size, param_ty1, param_ty2, false)? && {
                let body_ty1 = do_closure_app(body_ty1, param.clone())?;
                let body_ty2 = do_closure_app(body_ty2, param)?;
                check_tp(size + 1, &body_ty1, &body_ty2, subtype)?
            })
        },
        (Value::PairType(fst_ty1, snd_ty1), Value::PairType(fst_ty2, snd_ty2)) => {
            let fst = RcValue::var(size.next_level());

            Ok(check_tp(size, fst_ty1, fst_ty2, subtype)? && {
                let snd_ty1 = do_closure_app(snd_ty1, fst.clone())?;
                let snd_ty2 = do_closure_app(snd_ty2, fst)?;
                check_tp(size + 1, &snd_ty1, &snd_ty2, subtype)?
            })
        },
        (Value::Universe(level1), Value::Universe(level2)) => {
            if subtype {
                Ok(level1 <= level2)
            } else {
                Ok(level1 == level2)
            }
        },
        (_, _) => Ok(false),
    }
}
