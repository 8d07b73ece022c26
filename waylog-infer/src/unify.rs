use crate::error::UnifyError;
use crate::subst::Subst;
use itertools::Itertools;
use waylog_ir::{Symbol, Term};

/// First-order syntactic unification of runtime terms (§4.C). Flex variables
/// unify with anything that passes the occurs check; rigid constants only
/// unify with themselves; applications and tuples unify structurally.
pub fn unify(a: &Term, b: &Term) -> Result<Subst, UnifyError> {
    match (a, b) {
        (Term::Flex(v1), Term::Flex(v2)) if v1 == v2 => Ok(Subst::success()),

        (Term::Flex(v), t) | (t, Term::Flex(v)) => {
            if occurs(*v, t) {
                Err(UnifyError::OccurCheck)
            } else {
                Ok(Subst::bind(*v, t.clone()))
            }
        }

        (Term::Rigid(p), Term::Rigid(q)) => {
            if p == q {
                Ok(Subst::success())
            } else {
                Err(UnifyError::Clash)
            }
        }

        (Term::App(h1, a1), Term::App(h2, a2)) => {
            let s1 = unify(h1, h2)?;
            let a1: Vec<Term> = a1.iter().map(|t| s1.apply(t)).collect();
            let a2: Vec<Term> = a2.iter().map(|t| s1.apply(t)).collect();
            let s2 = unify_list(&a1, &a2)?;
            Ok(s2.combine(&s1))
        }

        (Term::Tup(es1), Term::Tup(es2)) => unify_list(es1, es2),

        _ => Err(UnifyError::Clash),
    }
}

/// Pairwise unification of equal-length term lists, threading the
/// accumulated substitution through each subsequent pair (§4.C).
fn unify_list(xs: &[Term], ys: &[Term]) -> Result<Subst, UnifyError> {
    if xs.len() != ys.len() {
        return Err(UnifyError::Arity);
    }
    let mut acc = Subst::success();
    for (x, y) in xs.iter().zip_eq(ys.iter()) {
        let s = unify(&acc.apply(x), &acc.apply(y))?;
        acc = s.combine(&acc);
    }
    Ok(acc)
}

/// Does `v` occur free in `t`? Walks into `Set` snapshots and witnesses too,
/// since a witness standing for a growing set can itself mention `v` (§4.H).
fn occurs(v: Symbol, t: &Term) -> bool {
    match t {
        Term::Flex(w) => *w == v,
        Term::Rigid(_) => false,
        Term::App(head, args) => occurs(v, head) || args.iter().any(|a| occurs(v, a)),
        Term::Tup(es) => es.iter().any(|e| occurs(v, e)),
        Term::Set {
            snapshot,
            witnesses,
        } => snapshot.iter().any(|e| occurs(v, e)) || witnesses.iter().any(|w| *w == v),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unifying_identical_rigids_succeeds_with_empty_subst() {
        let a = Term::Rigid(Symbol::new("a"));
        let s = unify(&a, &a).unwrap();
        assert!(s.is_identity());
    }

    #[test]
    fn unifying_distinct_rigids_clashes() {
        let a = Term::Rigid(Symbol::new("a"));
        let b = Term::Rigid(Symbol::new("b"));
        assert_eq!(unify(&a, &b), Err(UnifyError::Clash));
    }

    #[test]
    fn flex_binds_to_rigid() {
        let x = Symbol::new("X");
        let a = Term::Rigid(Symbol::new("a"));
        let s = unify(&Term::Flex(x), &a).unwrap();
        assert_eq!(s.apply(&Term::Flex(x)), a);
    }

    #[test]
    fn occurs_check_rejects_self_referential_binding() {
        let x = Symbol::new("X");
        let t = Term::app(Term::Rigid(Symbol::new("f")), vec![Term::Flex(x)]);
        assert_eq!(unify(&Term::Flex(x), &t), Err(UnifyError::OccurCheck));
    }

    #[test]
    fn unifying_applications_unifies_heads_then_args() {
        let x = Symbol::new("X");
        let y = Symbol::new("Y");
        let f = Term::Rigid(Symbol::new("f"));
        let a = Term::Rigid(Symbol::new("a"));
        let b = Term::Rigid(Symbol::new("b"));
        let lhs = Term::app(f.clone(), vec![Term::Flex(x), b.clone()]);
        let rhs = Term::app(f, vec![a.clone(), Term::Flex(y)]);
        let s = unify(&lhs, &rhs).unwrap();
        assert_eq!(s.apply(&Term::Flex(x)), a);
        assert_eq!(s.apply(&Term::Flex(y)), b);
    }

    #[test]
    fn mismatched_application_arity_is_an_arity_error() {
        let f = Term::Rigid(Symbol::new("f"));
        let lhs = Term::app(f.clone(), vec![Term::Rigid(Symbol::new("a"))]);
        let rhs = Term::app(
            f,
            vec![Term::Rigid(Symbol::new("a")), Term::Rigid(Symbol::new("b"))],
        );
        assert_eq!(unify(&lhs, &rhs), Err(UnifyError::Arity));
    }

    #[test]
    fn tuples_unify_pointwise() {
        let x = Symbol::new("X");
        let a = Term::Rigid(Symbol::new("a"));
        let lhs = Term::Tup(vec![Term::Flex(x), a.clone()]);
        let rhs = Term::Tup(vec![a.clone(), a.clone()]);
        let s = unify(&lhs, &rhs).unwrap();
        assert_eq!(s.apply(&Term::Flex(x)), a);
    }
}
