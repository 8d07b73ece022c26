use waylog_engine::{RtClause, RtProgram};
use waylog_ir::{PiType, PolyType, RhoType, Symbol, Term};
use waylog_ti::PredEnv;

/// The built-in predicates named in the collaborator contract (§6): `=/2`,
/// `true/0`, `fail/0`, and nothing else — the wider standard-predicate
/// library a real logic language ships is out of scope.
///
/// Every one of these is an ordinary clause; no special-casing lives in the
/// proof engine. `=(X, X).` resolves against a call `=(a, b)` by the same
/// first-order unification any user predicate uses, exactly when `a` and
/// `b` are unifiable. `true.` is a fact with no arguments. `fail/0` is
/// simply a predicate with no defining clauses at all, so resolution always
/// finds zero branches.
pub fn initial_program() -> RtProgram {
    let mut program = RtProgram::new();

    let eq = Symbol::new("=");
    let x = Symbol::new("X");
    program.insert(
        eq,
        2,
        RtClause::fact(Term::app(Term::Rigid(eq), vec![Term::Flex(x), Term::Flex(x)])),
    );

    let t = Symbol::new("true");
    program.insert(t, 0, RtClause::fact(Term::Rigid(t)));

    program
}

/// The predicate-type environment matching `initial_program` (§6): `=/2` is
/// polymorphic in the individual sort, `true/0` and `fail/0` are simply `o`.
/// `fail/0` is declared here even though it has no clauses, so a program
/// that calls it type-checks.
pub fn initial_env() -> PredEnv {
    let mut env = PredEnv::new();

    let alpha = Symbol::new("alpha");
    env.insert(
        Symbol::new("="),
        2,
        PolyType {
            quantified: vec![alpha],
            ty: PiType::fun(vec![RhoType::Var(alpha), RhoType::Var(alpha)], PiType::O),
        },
    );
    env.insert(Symbol::new("true"), 0, PolyType::monomorphic(PiType::O));
    env.insert(Symbol::new("fail"), 0, PolyType::monomorphic(PiType::O));

    env
}

#[cfg(test)]
mod tests {
    use super::*;
    use waylog_engine::resolve;

    #[test]
    fn eq_unifies_its_two_arguments() {
        let program = initial_program();
        let x = Symbol::new("X");
        let goal = Term::app(
            Term::Rigid(Symbol::new("=")),
            vec![Term::Flex(x), Term::Rigid(Symbol::new("a"))],
        );
        let branches = resolve(&program, &goal).unwrap();
        assert_eq!(branches.len(), 1);
        let (subgoal, s) = &branches[0];
        assert!(subgoal.is_empty());
        assert_eq!(s.apply(&Term::Flex(x)), Term::Rigid(Symbol::new("a")));
    }

    #[test]
    fn eq_fails_on_distinct_rigid_symbols() {
        let program = initial_program();
        let goal = Term::app(
            Term::Rigid(Symbol::new("=")),
            vec![Term::Rigid(Symbol::new("a")), Term::Rigid(Symbol::new("b"))],
        );
        let branches = resolve(&program, &goal).unwrap();
        assert!(branches.is_empty());
    }

    #[test]
    fn fail_has_no_resolution_branches() {
        let program = initial_program();
        let goal = Term::Rigid(Symbol::new("fail"));
        let branches = resolve(&program, &goal).unwrap();
        assert!(branches.is_empty());
    }

    #[test]
    fn true_succeeds_immediately() {
        let program = initial_program();
        let goal = Term::Rigid(Symbol::new("true"));
        let branches = resolve(&program, &goal).unwrap();
        assert_eq!(branches.len(), 1);
        assert!(branches[0].0.is_empty());
    }
}
