//! Pretty printing conversions.
//!
//! These documents back the `Display` impls used when rendering type errors.
//! Terms are printed nameless, the way the core carries them: `@n` for a
//! variable at de Bruijn index `n`. Chains of successors over zero are
//! collapsed into numerals.

use pretty::{BoxDoc, Doc};

use crate::syntax::Term;
use crate::UniverseLevel;

fn parens<'doc>(inner: Doc<'doc, BoxDoc<'doc, ()>>) -> Doc<'doc, BoxDoc<'doc, ()>> {
    Doc::nil().append("(").append(inner).append(")")
}

fn universe<'doc>(level: UniverseLevel) -> Doc<'doc, BoxDoc<'doc, ()>> {
    match level {
        UniverseLevel(0) => Doc::text("Type"),
        UniverseLevel(level) => Doc::text("Type^").append(Doc::as_string(level)),
    }
}

impl Term {
    /// Render a term as a numeral, if it is a chain of successors over zero.
    fn as_numeral(&self) -> Option<u32> {
        let mut nat = self;
        let mut numeral = 0;
        loop {
            match nat {
                Term::Zero => return Some(numeral),
                Term::Suc(pred) => {
                    numeral += 1;
                    nat = pred.as_ref();
                },
                _ => return None,
            }
        }
    }

    /// Terms that never need surrounding parentheses.
    fn is_atomic(&self) -> bool {
        match self {
            Term::Var(_) | Term::Nat | Term::Zero | Term::Universe(_) => true,
            Term::Suc(_) => self.as_numeral().is_some(),
            _ => false,
        }
    }

    fn to_atomic_doc(&self) -> Doc<'_, BoxDoc<'_, ()>> {
        if self.is_atomic() {
            self.to_doc()
        } else {
            parens(self.to_doc())
        }
    }

    pub fn to_doc(&self) -> Doc<'_, BoxDoc<'_, ()>> {
        match self {
            Term::Var(index) => Doc::as_string(index),
            Term::Let(def, body) => Doc::nil()
                .append("let _ =")
                .append(Doc::space())
                .append(def.to_doc())
                .append(";")
                .group()
                .append(Doc::space())
                .append(body.to_doc()),
            Term::Ann(term, term_ty) => Doc::nil()
                .append(term.to_atomic_doc())
                .append(Doc::space())
                .append(":")
                .append(Doc::space())
                .append(term_ty.to_atomic_doc())
                .group(),

            Term::FunType(param_ty, body_ty) => Doc::nil()
                .append("Fun")
                .append(Doc::space())
                .append(parens(param_ty.to_doc()))
                .append(Doc::space())
                .append("->")
                .group()
                .append(Doc::space())
                .append(body_ty.to_doc()),
            Term::FunIntro(body) => Doc::nil()
                .append("fun =>")
                .group()
                .append(Doc::space())
                .append(body.to_doc()),
            Term::FunApp(fun, arg) => Doc::nil()
                .append(fun.to_atomic_doc())
                .append(Doc::space())
                .append(arg.to_atomic_doc())
                .group(),

            Term::PairType(fst_ty, snd_ty) => Doc::nil()
                .append("Pair")
                .append(Doc::space())
                .append(parens(fst_ty.to_doc()))
                .append(Doc::space())
                .append(parens(snd_ty.to_doc()))
                .group(),
            Term::PairIntro(fst, snd) => Doc::nil()
                .append("<")
                .append(fst.to_doc())
                .append(",")
                .append(Doc::space())
                .append(snd.to_doc())
                .append(">")
                .group(),
            Term::PairFst(pair) => pair.to_atomic_doc().append(".1"),
            Term::PairSnd(pair) => pair.to_atomic_doc().append(".2"),

            Term::Nat => Doc::text("Nat"),
            Term::Zero => Doc::text("0"),
            Term::Suc(nat) => match self.as_numeral() {
                Some(numeral) => Doc::as_string(numeral),
                None => Doc::nil()
                    .append("suc")
                    .append(Doc::space())
                    .append(nat.to_atomic_doc())
                    .group(),
            },
            Term::NatRec(motive, zero, suc, nat) => Doc::nil()
                .append("rec")
                .append(Doc::space())
                .append(motive.to_atomic_doc())
                .append(Doc::space())
                .append(zero.to_atomic_doc())
                .append(Doc::space())
                .append(suc.to_atomic_doc())
                .append(Doc::space())
                .append(nat.to_atomic_doc())
                .group(),

            Term::Universe(level) => universe(*level),
        }
    }
}
