use crate::surface::{Clause, Expr, Group, PredicateDef, Program, SHead};
use crate::symbol::Symbol;
use crate::types::RhoType;
use rustc_hash::FxHashSet;

/// Total structural recursion over the info payload of every node (§9
/// "Info-payload polymorphism"): a single pass that lets type inference
/// replace every location with a `(type, location)` pair without the tree
/// shape ever needing to change.
pub fn map_info<A, B>(expr: Expr<A>, f: &mut impl FnMut(&Expr<A>, A) -> B) -> Expr<B>
where
    A: Clone,
{
    // `f` is given the pre-image node so that it may consult structure
    // (e.g. to look up a type for a `Var`) before producing the new payload.
    match expr {
        Expr::Number(n, i) => {
            let new_i = f(&Expr::Number(n, i.clone()), i);
            Expr::Number(n, new_i)
        }
        Expr::Const(c, p, i) => {
            let new_i = f(&Expr::Const(c.clone(), p, i.clone()), i);
            Expr::Const(c, p, new_i)
        }
        Expr::PredConst(c, i) => {
            let new_i = f(&Expr::PredConst(c.clone(), i.clone()), i);
            Expr::PredConst(c, new_i)
        }
        Expr::Var(s, i) => {
            let new_i = f(&Expr::Var(s, i.clone()), i);
            Expr::Var(s, new_i)
        }
        Expr::AnonVar(s, i) => {
            let new_i = f(&Expr::AnonVar(s, i.clone()), i);
            Expr::AnonVar(s, new_i)
        }
        Expr::App(head, args, i) => {
            let new_i = f(&Expr::App(head.clone(), args.clone(), i.clone()), i);
            let head = Box::new(map_info(*head, f));
            let args = args.into_iter().map(|a| map_info(a, f)).collect();
            Expr::App(head, args, new_i)
        }
        Expr::Op(name, is_pred, args, i) => {
            let new_i = f(&Expr::Op(name, is_pred, args.clone(), i.clone()), i);
            let args = args.into_iter().map(|a| map_info(a, f)).collect();
            Expr::Op(name, is_pred, args, new_i)
        }
        Expr::Lam(params, body, i) => {
            let new_i = f(&Expr::Lam(params.clone(), body.clone(), i.clone()), i);
            let body = Box::new(map_info(*body, f));
            Expr::Lam(params, body, new_i)
        }
        Expr::List(elems, tail, i) => {
            let new_i = f(&Expr::List(elems.clone(), tail.clone(), i.clone()), i);
            let elems = elems.into_iter().map(|e| map_info(e, f)).collect();
            let tail = tail.map(|t| Box::new(map_info(*t, f)));
            Expr::List(elems, tail, new_i)
        }
        Expr::Eq(a, b, i) => {
            let new_i = f(&Expr::Eq(a.clone(), b.clone(), i.clone()), i);
            let a = Box::new(map_info(*a, f));
            let b = Box::new(map_info(*b, f));
            Expr::Eq(a, b, new_i)
        }
        Expr::Paren(e, i) => {
            let new_i = f(&Expr::Paren(e.clone(), i.clone()), i);
            let e = Box::new(map_info(*e, f));
            Expr::Paren(e, new_i)
        }
        Expr::Ann(e, ty, i) => {
            let new_i = f(&Expr::Ann(e.clone(), ty.clone(), i.clone()), i);
            let e = Box::new(map_info(*e, f));
            Expr::Ann(e, ty, new_i)
        }
    }
}

pub fn map_clause_info<A, B: Clone>(
    clause: Clause<A>,
    f: &mut impl FnMut(&Expr<A>, A) -> B,
) -> Clause<B>
where
    A: Clone,
{
    let args = clause
        .head
        .args
        .into_iter()
        .map(|group| group.into_iter().map(|a| map_info(a, f)).collect())
        .collect();
    let head = SHead {
        name: clause.head.name,
        args,
        inferred_arity: clause.head.inferred_arity,
    };
    let body = clause.body.map(|(gets, b)| (gets, map_info(b, f)));
    Clause { head, body }
}

pub fn map_program_info<A, B: Clone>(
    program: Program<A>,
    mut f: impl FnMut(&Expr<A>, A) -> B,
) -> Program<B>
where
    A: Clone,
{
    Program {
        groups: program
            .groups
            .into_iter()
            .map(|g| Group {
                predicates: g
                    .predicates
                    .into_iter()
                    .map(|p| PredicateDef {
                        name: p.name,
                        arity: p.arity,
                        clauses: p
                            .clauses
                            .into_iter()
                            .map(|c| map_clause_info(c, &mut f))
                            .collect(),
                    })
                    .collect(),
            })
            .collect(),
    }
}

/// Free variables in order of first occurrence, no duplicates (§4.A
/// `varsOf`), over a surface-tree node. `AnonVar` contributes its own
/// (already-fresh) symbol, matching the runtime `Term::vars_of` behavior.
pub fn vars_of<Info>(expr: &Expr<Info>) -> Vec<Symbol> {
    let mut seen = FxHashSet::default();
    let mut out = Vec::new();
    vars_of_into(expr, &mut seen, &mut out);
    out
}

fn vars_of_into<Info>(expr: &Expr<Info>, seen: &mut FxHashSet<Symbol>, out: &mut Vec<Symbol>) {
    let mut push = |s: Symbol, seen: &mut FxHashSet<Symbol>, out: &mut Vec<Symbol>| {
        if seen.insert(s) {
            out.push(s);
        }
    };
    match expr {
        Expr::Number(..) | Expr::Const(..) | Expr::PredConst(..) => {}
        Expr::Var(s, _) | Expr::AnonVar(s, _) => push(*s, seen, out),
        Expr::App(head, args, _) => {
            vars_of_into(head, seen, out);
            for a in args {
                vars_of_into(a, seen, out);
            }
        }
        Expr::Op(_, _, args, _) => {
            for a in args {
                vars_of_into(a, seen, out);
            }
        }
        Expr::Lam(params, body, _) => {
            for p in params {
                push(*p, seen, out);
            }
            vars_of_into(body, seen, out);
        }
        Expr::List(elems, tail, _) => {
            for e in elems {
                vars_of_into(e, seen, out);
            }
            if let Some(t) = tail {
                vars_of_into(t, seen, out);
            }
        }
        Expr::Eq(a, b, _) => {
            vars_of_into(a, seen, out);
            vars_of_into(b, seen, out);
        }
        Expr::Paren(e, _) => vars_of_into(e, seen, out),
        Expr::Ann(e, _, _) => vars_of_into(e, seen, out),
    }
}

/// The type attached to a node once it has been annotated by type inference
/// (§4.E: every info payload becomes `(RhoType, L)`). `typeOf` in the spec
/// is this projection.
pub trait HasType {
    fn ty(&self) -> &RhoType;
}

impl<L: Clone> HasType for (RhoType, L) {
    fn ty(&self) -> &RhoType {
        &self.0
    }
}

pub fn type_of<L: Clone>(expr: &Expr<(RhoType, L)>) -> RhoType {
    expr.info().ty().clone()
}
