//! A small fixed library of example programs (S1-S3 from the concrete
//! scenarios), selectable by name. Surface-syntax parsing lives outside this
//! workspace, so the shell ships pre-built trees instead of reading `.way`
//! files the way `chalk-repl` reads `.chalk` files.

use std::rc::Rc;
use waylog_engine::{Goal, RtClause, RtProgram};
use waylog_ir::{
    Clause, ConstRef, Expr, Gets, Group, PredicateDef, Program, SHead, Symbol, Term,
};

fn cref(name: &str, arity: usize) -> ConstRef {
    ConstRef {
        name: Symbol::new(name),
        given_arity: Some(arity),
        inferred_arity: arity,
    }
}

fn rt_list(elems: Vec<Term>, tail: Term) -> Term {
    elems
        .into_iter()
        .rev()
        .fold(tail, |acc, e| Term::app(Term::Rigid(Symbol::new(".")), vec![e, acc]))
}

fn rt_nil() -> Term {
    Term::Rigid(Symbol::new("[]"))
}

fn ir_list<Info: Clone>(elems: Vec<Expr<Info>>, tail: Option<Box<Expr<Info>>>, info: Info) -> Expr<Info> {
    Expr::List(elems, tail, info)
}

/// A runnable, type-checkable example bundled with the shell.
pub struct Example {
    pub name: &'static str,
    pub description: &'static str,
    pub ir_program: Program<()>,
    pub rt_program: Rc<RtProgram>,
    pub goal: Goal,
    /// Variables in `goal` worth printing once an answer is found.
    pub goal_vars: Vec<(&'static str, Symbol)>,
}

pub fn names() -> &'static [&'static str] {
    &["append", "member", "call"]
}

pub fn lookup(name: &str) -> Option<Example> {
    match name {
        "append" => Some(append_example()),
        "member" => Some(member_example()),
        "call" => Some(call_example()),
        _ => None,
    }
}

/// S1: `append([], Ys, Ys). append([X|Xs], Ys, [X|Zs]) :- append(Xs, Ys, Zs).`
/// Goal `append([1,2], [3], R)`.
fn append_example() -> Example {
    let append = Symbol::new("append");

    let ys = Symbol::new("Ys");
    let fact_head = SHead {
        name: append,
        args: vec![vec![
            ir_list(vec![], None, ()),
            Expr::Var(ys, ()),
            Expr::Var(ys, ()),
        ]],
        inferred_arity: 3,
    };

    let x = Symbol::new("X");
    let xs = Symbol::new("Xs");
    let ys2 = Symbol::new("Ys");
    let zs = Symbol::new("Zs");
    let rec_head = SHead {
        name: append,
        args: vec![vec![
            ir_list(vec![Expr::Var(x, ())], Some(Box::new(Expr::Var(xs, ()))), ()),
            Expr::Var(ys2, ()),
            ir_list(vec![Expr::Var(x, ())], Some(Box::new(Expr::Var(zs, ()))), ()),
        ]],
        inferred_arity: 3,
    };
    let rec_body = Expr::App(
        Box::new(Expr::Const(cref("append", 3), true, ())),
        vec![Expr::Var(xs, ()), Expr::Var(ys2, ()), Expr::Var(zs, ())],
        (),
    );

    let ir_program = Program {
        groups: vec![Group {
            predicates: vec![PredicateDef {
                name: append,
                arity: 3,
                clauses: vec![
                    Clause { head: fact_head, body: None },
                    Clause { head: rec_head, body: Some((Gets::Mono, rec_body)) },
                ],
            }],
        }],
    };

    let mut rt_program = RtProgram::new();
    let rt_ys = Symbol::new("Ys");
    rt_program.insert(
        append,
        3,
        RtClause::fact(Term::app(
            Term::Rigid(append),
            vec![rt_nil(), Term::Flex(rt_ys), Term::Flex(rt_ys)],
        )),
    );
    let rt_x = Symbol::new("X");
    let rt_xs = Symbol::new("Xs");
    let rt_ys2 = Symbol::new("Ys");
    let rt_zs = Symbol::new("Zs");
    let head = Term::app(
        Term::Rigid(append),
        vec![
            rt_list(vec![Term::Flex(rt_x)], Term::Flex(rt_xs)),
            Term::Flex(rt_ys2),
            rt_list(vec![Term::Flex(rt_x)], Term::Flex(rt_zs)),
        ],
    );
    let body = vec![Term::app(
        Term::Rigid(append),
        vec![Term::Flex(rt_xs), Term::Flex(rt_ys2), Term::Flex(rt_zs)],
    )];
    rt_program.insert(append, 3, RtClause { head, body });

    let r = Symbol::new("R");
    let one = Term::Rigid(Symbol::new("1"));
    let two = Term::Rigid(Symbol::new("2"));
    let three = Term::Rigid(Symbol::new("3"));
    let goal = vec![Term::app(
        Term::Rigid(append),
        vec![
            rt_list(vec![one, two], rt_nil()),
            rt_list(vec![three], rt_nil()),
            Term::Flex(r),
        ],
    )];

    Example {
        name: "append",
        description: "append([1,2], [3], R) -- exactly one answer, R = [1,2,3]",
        ir_program,
        rt_program: Rc::new(rt_program),
        goal,
        goal_vars: vec![("R", r)],
    }
}

/// S2: `member(X, [X|_T]). member(X, [_H|T]) :- member(X, T).`
/// Goal `member(X, [1,2,3])`.
fn member_example() -> Example {
    let member = Symbol::new("member");

    let x1 = Symbol::new("X");
    let t1 = Symbol::new("_T");
    let fact_head = SHead {
        name: member,
        args: vec![vec![
            Expr::Var(x1, ()),
            ir_list(vec![Expr::Var(x1, ())], Some(Box::new(Expr::Var(t1, ()))), ()),
        ]],
        inferred_arity: 2,
    };

    let x2 = Symbol::new("X");
    let h2 = Symbol::new("_H");
    let t2 = Symbol::new("T");
    let rec_head = SHead {
        name: member,
        args: vec![vec![
            Expr::Var(x2, ()),
            ir_list(vec![Expr::Var(h2, ())], Some(Box::new(Expr::Var(t2, ()))), ()),
        ]],
        inferred_arity: 2,
    };
    let rec_body = Expr::App(
        Box::new(Expr::Const(cref("member", 2), true, ())),
        vec![Expr::Var(x2, ()), Expr::Var(t2, ())],
        (),
    );

    let ir_program = Program {
        groups: vec![Group {
            predicates: vec![PredicateDef {
                name: member,
                arity: 2,
                clauses: vec![
                    Clause { head: fact_head, body: None },
                    Clause { head: rec_head, body: Some((Gets::Mono, rec_body)) },
                ],
            }],
        }],
    };

    let mut rt_program = RtProgram::new();
    let rt_x1 = Symbol::new("X");
    let rt_t1 = Symbol::new("T");
    rt_program.insert(
        member,
        2,
        RtClause::fact(Term::app(
            Term::Rigid(member),
            vec![Term::Flex(rt_x1), rt_list(vec![Term::Flex(rt_x1)], Term::Flex(rt_t1))],
        )),
    );
    let rt_x2 = Symbol::new("X");
    let rt_h2 = Symbol::new("H");
    let rt_t2 = Symbol::new("T");
    let head = Term::app(
        Term::Rigid(member),
        vec![Term::Flex(rt_x2), rt_list(vec![Term::Flex(rt_h2)], Term::Flex(rt_t2))],
    );
    let body = vec![Term::app(Term::Rigid(member), vec![Term::Flex(rt_x2), Term::Flex(rt_t2)])];
    rt_program.insert(member, 2, RtClause { head, body });

    let x = Symbol::new("X");
    let one = Term::Rigid(Symbol::new("1"));
    let two = Term::Rigid(Symbol::new("2"));
    let three = Term::Rigid(Symbol::new("3"));
    let goal = vec![Term::app(
        Term::Rigid(member),
        vec![Term::Flex(x), rt_list(vec![one, two, three], rt_nil())],
    )];

    Example {
        name: "member",
        description: "member(X, [1,2,3]) -- backtracks through X=1, X=2, X=3",
        ir_program,
        rt_program: Rc::new(rt_program),
        goal,
        goal_vars: vec![("X", x)],
    }
}

/// S3: `call(P, X) :- P(X). p(1). p(2).` Goal `call(p, Y)`.
fn call_example() -> Example {
    let call = Symbol::new("call");
    let p = Symbol::new("p");

    let pvar = Symbol::new("P");
    let xvar = Symbol::new("X");
    let call_head = SHead {
        name: call,
        args: vec![vec![Expr::Var(pvar, ()), Expr::Var(xvar, ())]],
        inferred_arity: 2,
    };
    let call_body = Expr::App(Box::new(Expr::Var(pvar, ())), vec![Expr::Var(xvar, ())], ());

    let one_head = SHead {
        name: p,
        args: vec![vec![Expr::Number(waylog_ir::Number::Int(1), ())]],
        inferred_arity: 1,
    };
    let two_head = SHead {
        name: p,
        args: vec![vec![Expr::Number(waylog_ir::Number::Int(2), ())]],
        inferred_arity: 1,
    };

    let ir_program = Program {
        groups: vec![
            Group {
                predicates: vec![PredicateDef {
                    name: p,
                    arity: 1,
                    clauses: vec![
                        Clause { head: one_head, body: None },
                        Clause { head: two_head, body: None },
                    ],
                }],
            },
            Group {
                predicates: vec![PredicateDef {
                    name: call,
                    arity: 2,
                    clauses: vec![Clause {
                        head: call_head,
                        body: Some((Gets::Mono, call_body)),
                    }],
                }],
            },
        ],
    };

    let mut rt_program = RtProgram::new();
    rt_program.insert(p, 1, RtClause::fact(Term::app(Term::Rigid(p), vec![Term::Rigid(Symbol::new("1"))])));
    rt_program.insert(p, 1, RtClause::fact(Term::app(Term::Rigid(p), vec![Term::Rigid(Symbol::new("2"))])));
    let rt_p = Symbol::new("P");
    let rt_x = Symbol::new("X");
    let head = Term::app(Term::Rigid(call), vec![Term::Flex(rt_p), Term::Flex(rt_x)]);
    let body = vec![Term::app(Term::Flex(rt_p), vec![Term::Flex(rt_x)])];
    rt_program.insert(call, 2, RtClause { head, body });

    let y = Symbol::new("Y");
    let goal = vec![Term::app(Term::Rigid(call), vec![Term::Rigid(p), Term::Flex(y)])];

    Example {
        name: "call",
        description: "call(p, Y) with p(1). p(2). -- higher-order call through a predicate-valued argument",
        ir_program,
        rt_program: Rc::new(rt_program),
        goal,
        goal_vars: vec![("Y", y)],
    }
}
