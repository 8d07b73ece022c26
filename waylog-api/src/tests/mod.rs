use crate::{freshen, prove, typecheck, unify, Options};
use std::rc::Rc;
use waylog_engine::{RtClause, RtProgram};
use waylog_ir::{Clause, ConstRef, Expr, Group, Program, SHead, Symbol, Term};

fn cref(name: &str, arity: usize) -> ConstRef {
    ConstRef {
        name: Symbol::new(name),
        given_arity: Some(arity),
        inferred_arity: arity,
    }
}

/// S4: `id(X, X).` type-checks to a single polymorphic scheme.
#[test]
fn typecheck_generalizes_a_polymorphic_predicate() {
    let id = Symbol::new("id");
    let x = Symbol::new("X");
    let head = SHead {
        name: id,
        args: vec![vec![Expr::Var(x, ()), Expr::Var(x, ())]],
        inferred_arity: 2,
    };
    let program = Program {
        groups: vec![Group {
            predicates: vec![waylog_ir::PredicateDef {
                name: id,
                arity: 2,
                clauses: vec![Clause { head, body: None }],
            }],
        }],
    };

    let (_, env) = typecheck(program).unwrap();
    let poly = env.lookup(id, 2).unwrap();
    assert!(!poly.quantified.is_empty());
}

/// S5: equating an individual with a nullary predicate is a sort clash,
/// since `p/0` is declared `o` and `a` is an individual constant.
#[test]
fn typecheck_rejects_a_sort_mismatch() {
    let p = Symbol::new("p");
    let q = Symbol::new("q");
    let head = SHead {
        name: q,
        args: vec![vec![Expr::Eq(
            Box::new(Expr::Const(cref("a", 0), false, ())),
            Box::new(Expr::PredConst(cref("p", 0), ())),
            (),
        )]],
        inferred_arity: 1,
    };
    let program = Program {
        groups: vec![
            Group {
                predicates: vec![waylog_ir::PredicateDef {
                    name: p,
                    arity: 0,
                    clauses: vec![Clause {
                        head: SHead {
                            name: p,
                            args: vec![],
                            inferred_arity: 0,
                        },
                        body: None,
                    }],
                }],
            },
            Group {
                predicates: vec![waylog_ir::PredicateDef {
                    name: q,
                    arity: 1,
                    clauses: vec![Clause { head, body: None }],
                }],
            },
        ],
    };

    assert!(typecheck(program).is_err());
}

fn list(elems: Vec<Term>, tail: Term) -> Term {
    elems
        .into_iter()
        .rev()
        .fold(tail, |acc, e| Term::app(Term::Rigid(Symbol::new(".")), vec![e, acc]))
}

fn nil() -> Term {
    Term::Rigid(Symbol::new("[]"))
}

/// S2, driven through the public `prove` entry point with `Options`
/// controlling how many answers are pulled.
#[test]
fn prove_respects_max_answers() {
    let member = Symbol::new("member");
    let mut rt = RtProgram::new();

    let x1 = Symbol::new("X");
    let t1 = Symbol::new("T");
    rt.insert(
        member,
        2,
        RtClause::fact(Term::app(
            Term::Rigid(member),
            vec![Term::Flex(x1), list(vec![Term::Flex(x1)], Term::Flex(t1))],
        )),
    );
    let x2 = Symbol::new("X");
    let h2 = Symbol::new("H");
    let t2 = Symbol::new("T");
    let head = Term::app(
        Term::Rigid(member),
        vec![Term::Flex(x2), list(vec![Term::Flex(h2)], Term::Flex(t2))],
    );
    let body = vec![Term::app(Term::Rigid(member), vec![Term::Flex(x2), Term::Flex(t2)])];
    rt.insert(member, 2, RtClause { head, body });

    let x = Symbol::new("X");
    let goal = vec![Term::app(
        Term::Rigid(member),
        vec![
            Term::Flex(x),
            list(
                vec![
                    Term::Rigid(Symbol::new("1")),
                    Term::Rigid(Symbol::new("2")),
                    Term::Rigid(Symbol::new("3")),
                ],
                nil(),
            ),
        ],
    )];

    let options = Options {
        max_steps: None,
        max_answers: Some(2),
    };
    let answers: Vec<_> = prove(Rc::new(rt), goal, &options).collect();
    assert_eq!(answers.len(), 2);
}

#[test]
fn unify_entry_point_composes_bindings() {
    let x = Symbol::new("X");
    let y = Symbol::new("Y");
    let a = Term::Rigid(Symbol::new("a"));
    let lhs = Term::app(Term::Rigid(Symbol::new("pair")), vec![Term::Flex(x), a.clone()]);
    let rhs = Term::app(Term::Rigid(Symbol::new("pair")), vec![Term::Flex(y), Term::Flex(x)]);
    let s = unify(&lhs, &rhs).unwrap();
    assert_eq!(s.apply(&Term::Flex(y)), a);
}

#[test]
fn freshen_entry_point_renames_apart() {
    let x = Symbol::new("X");
    let t = Term::app(Term::Rigid(Symbol::new("f")), vec![Term::Flex(x), Term::Flex(x)]);
    let renamed = freshen(&t);
    match renamed {
        Term::App(_, args) => {
            assert_eq!(args[0], args[1]);
            assert_ne!(args[0], Term::Flex(x));
        }
        _ => panic!("expected an application"),
    }
}

/// The type-only part of §6's `=/2` contract: `X = X` checks against the
/// built-in environment without needing a clause to be in scope.
#[test]
fn builtin_environment_types_equality_polymorphically() {
    let env = crate::builtins::initial_env();
    let x = Symbol::new("X");
    let expr: Expr<()> = Expr::Eq(
        Box::new(Expr::Var(x, ())),
        Box::new(Expr::Var(x, ())),
        (),
    );
    crate::typecheck_goal(&env, std::slice::from_ref(&expr)).unwrap();
}
