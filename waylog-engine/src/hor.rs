use crate::error::EngineError;
use crate::program::RtProgram;
use itertools::Itertools;
use rustc_hash::FxHashMap;
use waylog_infer::{unify, Subst};
use waylog_ir::{rename_vars, Symbol, Term};

pub type Goal = Vec<Term>;

/// A `(subgoal, substitution)` choice produced by `resolve` (§4.G `derive`):
/// one entry per way the leftmost atom can be resolved.
pub type Branch = (Goal, Subst);

/// Split an atom into its head and argument list, treating a bare
/// `Rigid`/`Flex` node (the zero-argument case `Term::app` collapses to)
/// the same as `App(head, [])`.
fn as_call(t: &Term) -> (&Term, &[Term]) {
    match t {
        Term::App(head, args) => (head, args),
        other => (other, &[]),
    }
}

/// `resolve` (§4.G): dispatch on the atom's head shape.
pub fn resolve(program: &RtProgram, atom: &Term) -> Result<Vec<Branch>, EngineError> {
    let (head, args) = as_call(atom);
    match head {
        Term::Rigid(_) => Ok(rigid_resolution(program, head, args)),
        Term::Flex(v) => {
            // Lift the flex head into a singleton set abstraction and
            // retry as set resolution (§4.G `resolve`).
            let lifted = Term::lift_set(*v);
            set_resolution(program, &lifted, args)
        }
        Term::Set { .. } => {
            let (snapshot, witnesses) = match head {
                Term::Set {
                    snapshot,
                    witnesses,
                } => (snapshot, witnesses),
                _ => unreachable!(),
            };
            set_resolution(
                program,
                &Term::Set {
                    snapshot: snapshot.clone(),
                    witnesses: witnesses.clone(),
                },
                args,
            )
        }
        _ => Err(EngineError::NoRule),
    }
}

/// §H.1 Rigid resolution: every matching clause contributes one branch,
/// renamed apart and unified against the call.
fn rigid_resolution(program: &RtProgram, head: &Term, args: &[Term]) -> Vec<Branch> {
    let name = match head {
        Term::Rigid(s) => *s,
        _ => return Vec::new(),
    };
    let atom = Term::app(head.clone(), args.to_vec());
    let mut branches = Vec::new();
    for clause in program.clauses_of(name, args.len()) {
        let mut map = FxHashMap::default();
        let renamed_head = rename_vars(&clause.head, &mut map);
        let renamed_body: Vec<Term> = clause
            .body
            .iter()
            .map(|b| rename_vars(b, &mut map))
            .collect();
        if let Ok(s) = unify(&atom, &renamed_head) {
            branches.push((renamed_body, s));
        }
    }
    branches
}

/// §H.2 Set resolution: `atom` is `App(Set(snapshot, witnesses), args)`
/// (already separated into head/args by `resolve`). Always contributes
/// exactly one branch with an empty subgoal, growing the carrier by one
/// demanded element.
fn set_resolution(
    program: &RtProgram,
    set_head: &Term,
    args: &[Term],
) -> Result<Vec<Branch>, EngineError> {
    let witnesses = match set_head {
        Term::Set { witnesses, .. } => witnesses,
        _ => return Err(EngineError::NoRule),
    };
    let v = *witnesses.last().ok_or(EngineError::NoRule)?;

    // The witness's declared argument type would tell us the structural
    // shape to allocate for `x` (§4.H: "its type is Fun(a, r)"); the
    // runtime term representation is untyped post-compilation, and every
    // scenario this revision exercises (S3) calls through a single
    // individual-sorted argument, so `x` is allocated as a plain fresh
    // flex rather than consulting a predicate-type environment here.
    let x = Symbol::fresh("x");
    let v2 = v.variant();

    let demanded = if args.len() == 1 {
        args[0].clone()
    } else {
        Term::Tup(args.to_vec())
    };
    let sigma = waybelow(program, &Term::Flex(x), &demanded)?;

    let grown = Term::Set {
        snapshot: vec![Term::Flex(x)],
        witnesses: vec![v2],
    };
    let bind_v = Subst::bind(v, grown);
    Ok(vec![(Vec::new(), bind_v.combine(&sigma))])
}

/// `waybelow(x, t)` (§4.H): the domain-theoretic approximation relation
/// used to finitize higher-order search.
pub fn waybelow(program: &RtProgram, x: &Term, t: &Term) -> Result<Subst, EngineError> {
    match (x, t) {
        (Term::Flex(_), Term::Rigid(p)) => {
            let arity = program.arity_of(*p).unwrap_or(0);
            if arity == 0 {
                Ok(unify(x, t)?)
            } else {
                // Enumerating proofs of `p(X1..Xn)` with fresh `X`s is the
                // genuinely higher-order case and is not implemented in
                // this revision (§4.H, §7).
                Err(EngineError::NotImpl)
            }
        }

        (Term::Flex(_), Term::App(..)) => Ok(unify(x, t)?),

        (Term::Flex(xvar), Term::Set { witnesses, .. }) => {
            let v = *witnesses.last().ok_or(EngineError::NoRule)?;
            let v2 = v.variant();
            Ok(Subst::bind(
                v,
                Term::Set {
                    snapshot: Vec::new(),
                    witnesses: vec![*xvar, v2],
                },
            ))
        }

        (Term::Flex(_), Term::Flex(w)) => {
            // `order(w)` would require a static type for `w`; the untyped
            // runtime representation this engine operates over has none,
            // and every case this revision reaches is first-order, so the
            // order-0 branch (direct unification) is taken unconditionally.
            // The `liftSet` branch is implemented for fidelity but
            // unreachable in this revision.
            let order_w = 0;
            if order_w == 0 {
                Ok(unify(x, t)?)
            } else {
                waybelow(program, x, &Term::lift_set(*w))
            }
        }

        (Term::Flex(xvar), Term::Tup(es)) => {
            let mut fresh_terms = Vec::with_capacity(es.len());
            let mut acc = Subst::success();
            for e in es {
                let fx = Symbol::fresh("x");
                let s = waybelow(program, &Term::Flex(fx), e)?;
                acc = s.combine(&acc);
                fresh_terms.push(Term::Flex(fx));
            }
            let bind_x = Subst::bind(*xvar, Term::Tup(fresh_terms));
            Ok(bind_x.combine(&acc))
        }

        (Term::Tup(xs), Term::Tup(ts)) => {
            if xs.len() != ts.len() {
                return Err(EngineError::Unify(waylog_infer::UnifyError::Arity));
            }
            let mut acc = Subst::success();
            for (x, t) in xs.iter().zip_eq(ts.iter()) {
                let s = waybelow(program, x, t)?;
                acc = s.combine(&acc);
            }
            Ok(acc)
        }

        (Term::Rigid(p), Term::Rigid(q)) => {
            if p == q {
                Ok(Subst::success())
            } else {
                Err(EngineError::IncomparableRigid)
            }
        }

        _ => Err(EngineError::NoRule),
    }
}
