use rustc_hash::{FxHashMap, FxHashSet};
use waylog_ir::{PiType, PolyType, RhoType, Symbol};

/// The predicate-type environment (§4.E): `(name, arity) → ∀ᾱ.π`. Shared,
/// read-only during a group's inference, extended only by `generalize` at
/// the end of the group (§5 "stacked, scoped binding").
#[derive(Clone, Default)]
pub struct PredEnv {
    types: FxHashMap<(Symbol, usize), PolyType>,
}

impl PredEnv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: Symbol, arity: usize, poly: PolyType) {
        self.types.insert((name, arity), poly);
    }

    pub fn lookup(&self, name: Symbol, arity: usize) -> Option<&PolyType> {
        self.types.get(&(name, arity))
    }

    /// `findPoly` (§4.E "Instantiating a polytype"): freshen the stored
    /// scheme, or fabricate the most-general type for an unknown predicate.
    pub fn find_poly(&self, name: Symbol, arity: usize) -> PiType {
        match self.lookup(name, arity) {
            Some(poly) => freshen(poly),
            None => most_general_pi(arity),
        }
    }
}

/// The most general predicate type for an `arity`-ary predicate:
/// `Fun([α₁, …, α_arity], Var(φ))` with fresh α's and φ (§4.E step 1).
pub fn most_general_pi(arity: usize) -> PiType {
    let args = (0..arity)
        .map(|_| RhoType::Var(Symbol::fresh("alpha")))
        .collect();
    PiType::fun(args, PiType::Var(Symbol::fresh("phi")))
}

/// α-rename every quantified variable of `poly` to a fresh one (§4.E
/// `findPoly`, §6 `freshen`). The same renaming pattern as
/// `waylog_ir::rename_vars`, applied to the type grammar instead of terms.
pub fn freshen(poly: &PolyType) -> PiType {
    let mut map: FxHashMap<Symbol, Symbol> = FxHashMap::default();
    for q in &poly.quantified {
        map.insert(*q, q.variant());
    }
    rename_pi(&poly.ty, &mut map)
}

fn rename_pi(ty: &PiType, map: &mut FxHashMap<Symbol, Symbol>) -> PiType {
    match ty {
        PiType::O => PiType::O,
        PiType::Var(s) => PiType::Var(*map.get(s).unwrap_or(s)),
        PiType::Fun(args, ret) => {
            PiType::fun(args.iter().map(|a| rename_rho(a, map)).collect(), rename_pi(ret, map))
        }
    }
}

fn rename_rho(ty: &RhoType, map: &mut FxHashMap<Symbol, Symbol>) -> RhoType {
    match ty {
        RhoType::I => RhoType::I,
        RhoType::Var(s) => RhoType::Var(*map.get(s).unwrap_or(s)),
        RhoType::Pi(pi) => RhoType::pi(rename_pi(pi, map)),
    }
}

/// Promote every free type variable remaining in `pi` to a universally
/// quantified parameter (§4.E step 5 "Generalize"). The ambient environment
/// only ever holds already-generalized (closed) schemes by construction —
/// groups are processed in dependency order — so "free in the ambient
/// environment at group entry" reduces to "free in `pi`" with no further
/// filtering needed.
pub fn generalize(pi: &PiType) -> PolyType {
    let mut seen = FxHashSet::default();
    let mut quantified = Vec::new();
    free_vars_pi(pi, &mut seen, &mut quantified);
    PolyType {
        quantified,
        ty: pi.clone(),
    }
}

fn free_vars_pi(ty: &PiType, seen: &mut FxHashSet<Symbol>, out: &mut Vec<Symbol>) {
    match ty {
        PiType::O => {}
        PiType::Var(s) => {
            if seen.insert(*s) {
                out.push(*s);
            }
        }
        PiType::Fun(args, ret) => {
            for a in args {
                free_vars_rho(a, seen, out);
            }
            free_vars_pi(ret, seen, out);
        }
    }
}

fn free_vars_rho(ty: &RhoType, seen: &mut FxHashSet<Symbol>, out: &mut Vec<Symbol>) {
    match ty {
        RhoType::I => {}
        RhoType::Var(s) => {
            if seen.insert(*s) {
                out.push(*s);
            }
        }
        RhoType::Pi(pi) => free_vars_pi(pi, seen, out),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn freshen_renames_quantified_variables_apart() {
        let a = Symbol::new("alpha");
        let poly = PolyType {
            quantified: vec![a],
            ty: PiType::fun(vec![RhoType::Var(a)], PiType::O),
        };
        let t1 = freshen(&poly);
        let t2 = freshen(&poly);
        assert_ne!(t1, t2);
    }

    #[test]
    fn generalize_collects_free_variables_in_order() {
        let a = Symbol::new("alpha");
        let b = Symbol::new("beta");
        let pi = PiType::fun(vec![RhoType::Var(a), RhoType::Var(b), RhoType::Var(a)], PiType::O);
        let poly = generalize(&pi);
        assert_eq!(poly.quantified, vec![a, b]);
    }

    #[test]
    fn find_poly_fabricates_most_general_type_for_unknown_predicate() {
        let env = PredEnv::new();
        let pi = env.find_poly(Symbol::new("mystery"), 2);
        assert_eq!(pi.arity(), Some(2));
    }
}
