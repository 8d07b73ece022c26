use rustc_hash::{FxHashMap, FxHashSet};
use waylog_ir::{Symbol, Term};

/// A substitution over runtime terms (§3.4, §4.B): a finite mapping from
/// variables to terms. `success` (the empty map) is the two-sided identity
/// for `combine`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Subst {
    bindings: FxHashMap<Symbol, Term>,
}

impl Subst {
    pub fn success() -> Self {
        Subst::default()
    }

    pub fn is_identity(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Singleton substitution `{v := t}`. Trusts its input: the occurs-check
    /// is the unifier's responsibility, not `bind`'s (§4.B).
    pub fn bind(v: Symbol, t: Term) -> Self {
        let mut bindings = FxHashMap::default();
        bindings.insert(v, t);
        Subst { bindings }
    }

    pub fn lookup(&self, v: Symbol) -> Option<&Term> {
        self.bindings.get(&v)
    }

    /// Recursive rewrite; idempotent after one pass provided `self` is in
    /// triangular form, which every substitution produced by `unify` and
    /// `combine` below maintains (§4.B).
    pub fn apply(&self, t: &Term) -> Term {
        match t {
            Term::Flex(v) => match self.bindings.get(v) {
                Some(bound) => self.apply(bound),
                None => t.clone(),
            },
            Term::Rigid(_) => t.clone(),
            Term::App(head, args) => Term::App(
                Box::new(self.apply(head)),
                args.iter().map(|a| self.apply(a)).collect(),
            ),
            Term::Tup(es) => Term::Tup(es.iter().map(|e| self.apply(e)).collect()),
            Term::Set {
                snapshot,
                witnesses,
            } => {
                // Witnesses are flex variables themselves; if one has been
                // bound (e.g. to a grown `Set`, per §4.H) the binding is
                // threaded through rather than silently dropped.
                let mut new_snapshot: Vec<Term> = snapshot.iter().map(|e| self.apply(e)).collect();
                let mut new_witnesses = Vec::new();
                for w in witnesses {
                    match self.bindings.get(w) {
                        Some(Term::Set {
                            snapshot: s2,
                            witnesses: w2,
                        }) => {
                            new_snapshot.extend(s2.iter().map(|e| self.apply(e)));
                            new_witnesses.extend(w2.iter().copied());
                        }
                        Some(other) => new_snapshot.push(self.apply(other)),
                        None => new_witnesses.push(*w),
                    }
                }
                Term::Set {
                    snapshot: new_snapshot,
                    witnesses: new_witnesses,
                }
            }
        }
    }

    /// Compose so that `apply(s1.combine(&s2), t) == apply(s1, apply(s2, t))`
    /// (§4.B). Call as `s_new.combine(&s_old)` when threading a freshly
    /// produced substitution on top of an accumulated one.
    pub fn combine(&self, other: &Subst) -> Subst {
        let mut bindings: FxHashMap<Symbol, Term> = other
            .bindings
            .iter()
            .map(|(k, v)| (*k, self.apply(v)))
            .collect();
        for (k, v) in &self.bindings {
            bindings.entry(*k).or_insert_with(|| v.clone());
        }
        Subst { bindings }
    }

    /// Keep only bindings for `vars`, after fully resolving right-hand
    /// sides (§4.B). Used to restrict an answer substitution to a goal's
    /// free variables (§4.G `prove`, §8 invariant 8).
    pub fn restrict(&self, vars: &FxHashSet<Symbol>) -> Subst {
        let bindings = self
            .bindings
            .iter()
            .filter(|(k, _)| vars.contains(k))
            .map(|(k, v)| (*k, self.apply(v)))
            .collect();
        Subst { bindings }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Symbol, &Term)> {
        self.bindings.iter().map(|(k, v)| (*k, v))
    }
}
