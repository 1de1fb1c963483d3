use peano_core::domain::{RcValue, Value};
use peano_core::syntax::{RcTerm, Term};
use peano_core::validate::{self, Context, TypeError};
use peano_core::{nbe, var};

fn term(term: Term) -> RcTerm {
    RcTerm::from(term)
}

/// `Fun (Nat) -> Nat`
fn nat_to_nat() -> RcTerm {
    term(Term::FunType(term(Term::Nat), term(Term::Nat)))
}

fn eval_closed(src: &RcTerm) -> RcValue {
    nbe::eval(src, &peano_core::domain::Env::new()).unwrap()
}

fn normalize_closed(src: &RcTerm) -> RcTerm {
    nbe::normalize(var::Size(0), src, &peano_core::domain::Env::new()).unwrap()
}

#[test]
fn fun_type_of_nats_is_a_small_type() {
    let context = Context::new();
    let expected_ty = RcValue::universe(0);

    validate::check(&context, var::Size(0), &nat_to_nat(), &expected_ty).unwrap();
}

#[test]
fn identity_fun_checks_against_fun_type() {
    let context = Context::new();
    let id = term(Term::FunIntro(term(Term::Var(var::Index(0)))));
    let expected_ty = eval_closed(&nat_to_nat());

    validate::check(&context, var::Size(0), &id, &expected_ty).unwrap();
}

#[test]
fn zero_does_not_check_against_fun_type() {
    let context = Context::new();
    let expected_ty = eval_closed(&nat_to_nat());

    let error = validate::check(&context, var::Size(0), &term(Term::Zero), &expected_ty)
        .unwrap_err();

    match error {
        TypeError::ExpectedSubtype(_, _) => {},
        error => panic!("unexpected error: {}", error),
    }
}

#[test]
fn no_universe_contains_itself() {
    let context = Context::new();
    let universe0 = RcTerm::universe(0);
    let expected_ty = RcValue::universe(0);

    assert!(validate::check(&context, var::Size(0), &universe0, &expected_ty).is_err());
}

#[test]
fn universes_are_strictly_stratified() {
    let context = Context::new();

    validate::check(
        &context,
        var::Size(0),
        &RcTerm::universe(0),
        &RcValue::universe(1),
    )
    .unwrap();
    assert!(validate::check(
        &context,
        var::Size(0),
        &RcTerm::universe(1),
        &RcValue::universe(1),
    )
    .is_err());
    assert!(validate::check(
        &context,
        var::Size(0),
        &RcTerm::universe(2),
        &RcValue::universe(1),
    )
    .is_err());
}

#[test]
fn universes_are_cumulative() {
    let context = Context::new();

    // `Nat` inhabits every universe, not just the smallest one
    validate::check(&context, var::Size(0), &term(Term::Nat), &RcValue::universe(5)).unwrap();
    // ... and so do compound types built from small pieces
    validate::check(&context, var::Size(0), &nat_to_nat(), &RcValue::universe(3)).unwrap();
}

#[test]
fn bare_lambda_cannot_be_synthesized() {
    let context = Context::new();
    let id = term(Term::FunIntro(term(Term::Var(var::Index(0)))));

    match validate::synth(&context, var::Size(0), &id).unwrap_err() {
        TypeError::AmbiguousTerm(_) => {},
        error => panic!("unexpected error: {}", error),
    }
}

#[test]
fn synth_of_annotated_application() {
    let context = Context::new();
    let suc_fun = RcTerm::ann(
        Term::FunIntro(term(Term::Suc(term(Term::Var(var::Index(0)))))),
        nat_to_nat(),
    );
    let app = term(Term::FunApp(suc_fun, RcTerm::from_nat(1)));

    let app_ty = validate::synth(&context, var::Size(0), &app).unwrap();
    assert_eq!(
        nbe::read_back(var::Size(0), &app_ty).unwrap(),
        term(Term::Nat),
    );

    // beta: the checked application computes to `2`
    assert_eq!(normalize_closed(&app), RcTerm::from_nat(2));
}

#[test]
fn pair_projections_compute() {
    let pair = term(Term::PairIntro(term(Term::Zero), RcTerm::from_nat(1)));

    let fst = term(Term::PairFst(pair.clone()));
    let snd = term(Term::PairSnd(pair));

    assert_eq!(normalize_closed(&fst), RcTerm::from_nat(0));
    assert_eq!(normalize_closed(&snd), RcTerm::from_nat(1));
}

#[test]
fn snd_projection_type_depends_on_fst() {
    // `<Nat, 0> : Pair (Type) (@0)`, so the second projection is a `Nat`
    let context = Context::new();
    let pair_ty = term(Term::PairType(
        RcTerm::universe(0),
        term(Term::Var(var::Index(0))),
    ));
    let pair = RcTerm::ann(Term::PairIntro(term(Term::Nat), term(Term::Zero)), pair_ty);

    let snd_ty = validate::synth(&context, var::Size(0), &term(Term::PairSnd(pair))).unwrap();
    assert_eq!(
        nbe::read_back(var::Size(0), &snd_ty).unwrap(),
        term(Term::Nat),
    );
}

/// `fun m n => rec (_ => Nat) n (fun _ ih => suc ih) m`, annotated at
/// `Fun (Nat) -> Fun (Nat) -> Nat`
fn add_fun() -> RcTerm {
    let add = term(Term::FunIntro(term(Term::FunIntro(term(Term::NatRec(
        term(Term::Nat),
        term(Term::Var(var::Index(0))),
        term(Term::Suc(term(Term::Var(var::Index(0))))),
        term(Term::Var(var::Index(1))),
    ))))));
    let add_ty = term(Term::FunType(term(Term::Nat), nat_to_nat()));

    RcTerm::ann(add, add_ty)
}

#[test]
fn nat_rec_on_zero_returns_the_zero_case() {
    let app = term(Term::FunApp(
        term(Term::FunApp(add_fun(), RcTerm::from_nat(0))),
        RcTerm::from_nat(3),
    ));

    assert_eq!(normalize_closed(&app), RcTerm::from_nat(3));
}

#[test]
fn nat_rec_unfolds_through_successors() {
    let context = Context::new();
    let app = term(Term::FunApp(
        term(Term::FunApp(add_fun(), RcTerm::from_nat(2))),
        RcTerm::from_nat(3),
    ));

    let app_ty = validate::synth(&context, var::Size(0), &app).unwrap();
    assert_eq!(
        nbe::read_back(var::Size(0), &app_ty).unwrap(),
        term(Term::Nat),
    );
    assert_eq!(normalize_closed(&app), RcTerm::from_nat(5));
}

#[test]
fn nat_rec_is_stuck_on_a_variable() {
    // In a context with `x : Nat`, `rec (_ => Nat) 0 (fun _ ih => ih) x`
    // synthesizes but does not compute
    let mut context = Context::new();
    context.insert_fresh(var::Size(0), RcValue::nat_ty());

    let rec = term(Term::NatRec(
        term(Term::Nat),
        term(Term::Zero),
        term(Term::Var(var::Index(0))),
        term(Term::Var(var::Index(0))),
    ));

    let rec_ty = validate::synth(&context, var::Size(1), &rec).unwrap();
    assert_eq!(
        nbe::read_back(var::Size(1), &rec_ty).unwrap(),
        term(Term::Nat),
    );

    let rec_value = nbe::eval(&rec, context.values()).unwrap();
    match rec_value.as_ref() {
        Value::Neutral(_) => {},
        value => panic!("expected a stuck elimination, found {:?}", value),
    }
}

#[test]
fn let_definitions_are_in_scope_for_the_body() {
    let context = Context::new();
    let one = term(Term::Let(
        RcTerm::ann(Term::Zero, term(Term::Nat)),
        term(Term::Suc(term(Term::Var(var::Index(0))))),
    ));

    let one_ty = validate::synth(&context, var::Size(0), &one).unwrap();
    assert_eq!(
        nbe::read_back(var::Size(0), &one_ty).unwrap(),
        term(Term::Nat),
    );
    assert_eq!(normalize_closed(&one), RcTerm::from_nat(1));
}

#[test]
fn synth_soundness_for_checking() {
    // Whatever synthesizes also checks against its synthesized type
    let context = Context::new();
    let terms = vec![
        RcTerm::from_nat(4),
        add_fun(),
        term(Term::FunApp(add_fun(), RcTerm::from_nat(1))),
        RcTerm::ann(Term::Nat, RcTerm::universe(0)),
    ];

    for src in terms {
        let ty = validate::synth(&context, var::Size(0), &src).unwrap();
        validate::check(&context, var::Size(0), &src, &ty).unwrap();
    }
}

#[test]
fn check_ty_accepts_structural_type_formers() {
    let context = Context::new();
    // A nested `Fun` type needs no universe annotations on its components
    let dependent_ty = term(Term::FunType(
        RcTerm::universe(0),
        term(Term::FunType(
            term(Term::Var(var::Index(0))),
            term(Term::Var(var::Index(1))),
        )),
    ));

    validate::check_ty(&context, var::Size(0), &dependent_ty).unwrap();
    validate::check_ty(&context, var::Size(0), &term(Term::Nat)).unwrap();
    validate::check_ty(&context, var::Size(0), &RcTerm::universe(8)).unwrap();
    assert!(validate::check_ty(&context, var::Size(0), &term(Term::Zero)).is_err());
}

#[test]
fn equal_types_compare_in_either_direction() {
    let ty1 = eval_closed(&nat_to_nat());
    let ty2 = eval_closed(&nat_to_nat());

    assert!(nbe::check_tp(var::Size(0), &ty1, &ty1, false).unwrap());
    assert!(nbe::check_tp(var::Size(0), &ty1, &ty2, false).unwrap());
    assert!(nbe::check_tp(var::Size(0), &ty2, &ty1, false).unwrap());
}

#[test]
fn subtyping_is_not_symmetric_between_universes() {
    let small = RcValue::universe(0);
    let large = RcValue::universe(1);

    assert!(nbe::check_tp(var::Size(0), &small, &large, true).unwrap());
    assert!(!nbe::check_tp(var::Size(0), &large, &small, true).unwrap());
    assert!(!nbe::check_tp(var::Size(0), &small, &large, false).unwrap());
}

#[test]
fn subtyping_propagates_into_fun_codomains() {
    let context = Context::new();
    let small_fun_ty = eval_closed(&term(Term::FunType(term(Term::Nat), RcTerm::universe(0))));
    let large_fun_ty = eval_closed(&term(Term::FunType(term(Term::Nat), RcTerm::universe(2))));

    assert!(nbe::check_tp(var::Size(0), &small_fun_ty, &large_fun_ty, true).unwrap());
    assert!(!nbe::check_tp(var::Size(0), &large_fun_ty, &small_fun_ty, true).unwrap());

    // A function producing small types checks against the larger type
    let const_nat = term(Term::FunIntro(term(Term::Nat)));
    validate::check(&context, var::Size(0), &const_nat, &large_fun_ty).unwrap();
}

#[test]
fn quoting_is_idempotent() {
    let sources = vec![
        RcTerm::from_nat(3),
        nat_to_nat(),
        term(Term::FunApp(add_fun(), RcTerm::from_nat(2))),
        term(Term::PairType(RcTerm::universe(0), term(Term::Var(var::Index(0))))),
    ];

    for src in sources {
        let value = eval_closed(&src);
        let quoted = nbe::read_back(var::Size(0), &value).unwrap();
        let requoted = normalize_closed(&quoted);

        assert_eq!(quoted, requoted);
    }
}
