use crate::error::UnifyError;
use ena::unify::{EqUnifyValue, InPlaceUnificationTable, UnifyKey};
use itertools::Itertools;
use rustc_hash::FxHashMap;
use waylog_ir::{PiType, RhoType, Symbol};

/// An ena union-find key standing for a ρ-type variable (§3.3 `α`).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct RhoVar(u32);

impl UnifyKey for RhoVar {
    type Value = Option<RhoType>;

    fn index(&self) -> u32 {
        self.0
    }

    fn from_index(u: u32) -> Self {
        RhoVar(u)
    }

    fn tag() -> &'static str {
        "RhoVar"
    }
}

impl EqUnifyValue for RhoType {}

/// An ena union-find key standing for a π-type variable (§3.3 `φ`).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct PiVar(u32);

impl UnifyKey for PiVar {
    type Value = Option<PiType>;

    fn index(&self) -> u32 {
        self.0
    }

    fn from_index(u: u32) -> Self {
        PiVar(u)
    }

    fn tag() -> &'static str {
        "PiVar"
    }
}

impl EqUnifyValue for PiType {}

/// A single type-equality obligation produced by constraint generation
/// (§3.5, §4.E), tagged with an `origin` used only for error reporting.
#[derive(Clone, Debug)]
pub struct Constraint<Origin> {
    pub lhs: RhoType,
    pub rhs: RhoType,
    pub origin: Origin,
}

impl<Origin> Constraint<Origin> {
    pub fn new(lhs: RhoType, rhs: RhoType, origin: Origin) -> Self {
        Constraint { lhs, rhs, origin }
    }
}

/// The type constraint solver (§4.F): two parallel union-find tables, one
/// per sort, since ρ-variables and π-variables bind to different value
/// types and sharing one table would require tagging every entry by sort
/// anyway. `Symbol`-keyed side maps translate the surface syntax's type
/// variables into ena keys on first sight.
#[derive(Default)]
pub struct TyInferenceTable {
    rho_table: InPlaceUnificationTable<RhoVar>,
    pi_table: InPlaceUnificationTable<PiVar>,
    rho_index: FxHashMap<Symbol, RhoVar>,
    pi_index: FxHashMap<Symbol, PiVar>,
    // Tracks, per union-find root, the symbol under which that class should
    // be displayed once solving is done. Without this, two variables that
    // get unified while both still unbound would `apply` back to their own
    // original (distinct) symbols, and `generalize` would then quantify
    // over both as if they were unrelated.
    rho_names: FxHashMap<RhoVar, Symbol>,
    pi_names: FxHashMap<PiVar, Symbol>,
}

impl TyInferenceTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fresh, unnamed ρ-variable (not reachable by any `Symbol`).
    pub fn fresh_rho(&mut self) -> RhoVar {
        self.rho_table.new_key(None)
    }

    /// Fresh, unnamed π-variable.
    pub fn fresh_pi(&mut self) -> PiVar {
        self.pi_table.new_key(None)
    }

    /// The ena key for a named ρ-variable, allocating one on first sight.
    pub fn rho_var(&mut self, s: Symbol) -> RhoVar {
        if let Some(v) = self.rho_index.get(&s) {
            return *v;
        }
        let v = self.rho_table.new_key(None);
        self.rho_index.insert(s, v);
        self.rho_names.insert(v, s);
        v
    }

    /// The ena key for a named π-variable, allocating one on first sight.
    pub fn pi_var(&mut self, s: Symbol) -> PiVar {
        if let Some(v) = self.pi_index.get(&s) {
            return *v;
        }
        let v = self.pi_table.new_key(None);
        self.pi_index.insert(s, v);
        self.pi_names.insert(v, s);
        v
    }

    /// The symbol a still-unbound ρ-variable should render as: the name
    /// belonging to its union-find root, falling back to `s` itself for a
    /// root with no recorded name (only possible for `fresh_rho` keys).
    fn canonical_rho_name(&mut self, s: Symbol) -> Symbol {
        let v = self.rho_var(s);
        let root = self.rho_table.find(v);
        *self.rho_names.get(&root).unwrap_or(&s)
    }

    /// As `canonical_rho_name`, for π-variables.
    fn canonical_pi_name(&mut self, s: Symbol) -> Symbol {
        let v = self.pi_var(s);
        let root = self.pi_table.find(v);
        *self.pi_names.get(&root).unwrap_or(&s)
    }

    /// Resolve a ρ-type against the current bindings, recursively, until it
    /// reaches a concrete shape or an unbound variable.
    pub fn apply_rho(&mut self, ty: &RhoType) -> RhoType {
        match ty {
            RhoType::I => RhoType::I,
            RhoType::Var(s) => {
                let v = self.rho_var(*s);
                match self.rho_table.probe_value(v) {
                    Some(bound) => self.apply_rho(&bound),
                    None => RhoType::Var(self.canonical_rho_name(*s)),
                }
            }
            RhoType::Pi(pi) => RhoType::pi(self.apply_pi(pi)),
        }
    }

    /// Resolve a π-type against the current bindings, recursively.
    pub fn apply_pi(&mut self, ty: &PiType) -> PiType {
        match ty {
            PiType::O => PiType::O,
            PiType::Var(s) => {
                let v = self.pi_var(*s);
                match self.pi_table.probe_value(v) {
                    Some(bound) => self.apply_pi(&bound),
                    None => PiType::Var(self.canonical_pi_name(*s)),
                }
            }
            PiType::Fun(args, ret) => {
                let args = args.iter().map(|a| self.apply_rho(a)).collect();
                PiType::fun(args, self.apply_pi(ret))
            }
        }
    }

    /// Unify two ρ-types (§4.F). Fails with `TypeClash` (no `origin` set
    /// here; callers attach one via `solve`) on an incompatible shape, or
    /// `OccurCheck` if binding a variable would create a cyclic type.
    pub fn unify_rho(&mut self, a: &RhoType, b: &RhoType) -> Result<(), UnifyError> {
        let a = self.apply_rho(a);
        let b = self.apply_rho(b);
        match (&a, &b) {
            (RhoType::I, RhoType::I) => Ok(()),

            (RhoType::Var(s1), RhoType::Var(s2)) => {
                let v1 = self.rho_var(*s1);
                let v2 = self.rho_var(*s2);
                self.rho_table
                    .unify_var_var(v1, v2)
                    .map_err(|_| UnifyError::TypeClash { origin: None })
            }

            (RhoType::Var(s), other) | (other, RhoType::Var(s)) => {
                if occurs_rho(self, *s, other) {
                    return Err(UnifyError::OccurCheck);
                }
                let v = self.rho_var(*s);
                self.rho_table
                    .unify_var_value(v, Some(other.clone()))
                    .map_err(|_| UnifyError::TypeClash { origin: None })
            }

            (RhoType::Pi(p1), RhoType::Pi(p2)) => self.unify_pi(p1, p2),

            _ => Err(UnifyError::TypeClash { origin: None }),
        }
    }

    /// Unify two π-types (§4.F).
    pub fn unify_pi(&mut self, a: &PiType, b: &PiType) -> Result<(), UnifyError> {
        let a = self.apply_pi(a);
        let b = self.apply_pi(b);
        match (&a, &b) {
            (PiType::O, PiType::O) => Ok(()),

            (PiType::Var(s1), PiType::Var(s2)) => {
                let v1 = self.pi_var(*s1);
                let v2 = self.pi_var(*s2);
                self.pi_table
                    .unify_var_var(v1, v2)
                    .map_err(|_| UnifyError::TypeClash { origin: None })
            }

            (PiType::Var(s), other) | (other, PiType::Var(s)) => {
                if occurs_pi(self, *s, other) {
                    return Err(UnifyError::OccurCheck);
                }
                let v = self.pi_var(*s);
                self.pi_table
                    .unify_var_value(v, Some(other.clone()))
                    .map_err(|_| UnifyError::TypeClash { origin: None })
            }

            (PiType::Fun(args1, ret1), PiType::Fun(args2, ret2)) => {
                if args1.len() != args2.len() {
                    return Err(UnifyError::Arity);
                }
                for (x, y) in args1.iter().zip_eq(args2.iter()) {
                    self.unify_rho(x, y)?;
                }
                self.unify_pi(ret1, ret2)
            }

            _ => Err(UnifyError::TypeClash { origin: None }),
        }
    }

    /// Run every constraint in order, failing fast at the first clash so
    /// the caller (the per-group type inference loop, §4.E) can surface a
    /// single, precisely-located error rather than a cascade.
    pub fn solve<Origin: std::fmt::Display + Clone>(
        &mut self,
        constraints: &[Constraint<Origin>],
    ) -> Result<(), UnifyError> {
        for c in constraints {
            self.unify_rho(&c.lhs, &c.rhs).map_err(|e| match e {
                UnifyError::TypeClash { .. } => UnifyError::TypeClash {
                    origin: Some(c.origin.to_string()),
                },
                other => other,
            })?;
        }
        Ok(())
    }
}

fn occurs_rho(table: &mut TyInferenceTable, s: Symbol, ty: &RhoType) -> bool {
    match ty {
        RhoType::I => false,
        RhoType::Var(s2) => *s2 == s,
        RhoType::Pi(pi) => occurs_pi(table, s, pi),
    }
}

fn occurs_pi(table: &mut TyInferenceTable, s: Symbol, ty: &PiType) -> bool {
    match ty {
        PiType::O => false,
        PiType::Var(s2) => *s2 == s,
        PiType::Fun(args, ret) => {
            args.iter().any(|a| occurs_rho(table, s, a)) || occurs_pi(table, s, ret)
        }
    }
}
