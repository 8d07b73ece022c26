//! Term and type model (§3, §4.A): the surface expression tree that type
//! inference consumes, the σ/ρ/π type grammar, the runtime term
//! representation used by proof search, and the structural-recursion
//! helpers (`map_info`, `vars_of`) that both subsystems share.

pub mod fold;
pub mod fresh;
pub mod surface;
pub mod symbol;
pub mod term;
pub mod types;

pub use fold::{map_clause_info, map_info, map_program_info, type_of, vars_of, HasType};
pub use fresh::rename_vars;
pub use surface::{Clause, ConstRef, Expr, Gets, Group, Number, PredicateDef, Program, SHead};
pub use symbol::Symbol;
pub use term::Term;
pub use types::{order_of_pi, order_of_rho, PiType, PolyType, RhoType};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbols_compare_by_name_and_generation() {
        let a = Symbol::new("x");
        let b = Symbol::new("x");
        assert_eq!(a, b);
        let c = a.variant();
        assert_ne!(a, c);
    }

    #[test]
    fn anonymous_symbols_never_collide_with_user_names() {
        let wild1 = Symbol::anonymous();
        let wild2 = Symbol::anonymous();
        assert!(wild1.is_anonymous());
        assert!(wild2.is_anonymous());
        assert_ne!(wild1, wild2);
        let user = Symbol::new(&wild1.display_name());
        assert!(!user.is_anonymous() || user.display_name() != "X");
    }

    #[test]
    fn vars_of_preserves_order_and_dedups() {
        let x = Symbol::new("X");
        let y = Symbol::new("Y");
        let expr: Expr<()> = Expr::App(
            Box::new(Expr::Const(
                ConstRef {
                    name: Symbol::new("append"),
                    given_arity: Some(3),
                    inferred_arity: 3,
                },
                true,
                (),
            )),
            vec![
                Expr::Var(x, ()),
                Expr::Var(y, ()),
                Expr::Var(x, ()),
            ],
            (),
        );
        assert_eq!(vars_of(&expr), vec![x, y]);
    }

    #[test]
    fn pi_arity_matches_fun_args() {
        let ty = PiType::fun(vec![RhoType::I, RhoType::I], PiType::O);
        assert_eq!(ty.arity(), Some(2));
        assert_eq!(PiType::O.arity(), Some(0));
    }

    #[test]
    fn order_of_higher_order_predicate_is_positive() {
        // call/2 : (pred(i), i) -> o  is order 1: it takes a predicate arg.
        let call_ty = PiType::fun(
            vec![RhoType::Pi(Box::new(PiType::fun(vec![RhoType::I], PiType::O))), RhoType::I],
            PiType::O,
        );
        assert_eq!(order_of_pi(&call_ty), 1);
        assert_eq!(order_of_pi(&PiType::fun(vec![RhoType::I], PiType::O)), 0);
    }
}
