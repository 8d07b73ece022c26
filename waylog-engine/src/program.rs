use rustc_hash::FxHashMap;
use waylog_ir::{Symbol, Term};

/// A compiled clause `H :- B₁, …, Bₙ` over runtime terms. A fact has an
/// empty body. This is the form proof search resolves against; it is
/// produced from a typed, preprocessed program the way `chalk_ir`'s
/// `ProgramClause`s are produced from lowered trait items.
#[derive(Clone, Debug)]
pub struct RtClause {
    pub head: Term,
    pub body: Vec<Term>,
}

impl RtClause {
    pub fn fact(head: Term) -> Self {
        RtClause {
            head,
            body: Vec::new(),
        }
    }
}

/// The read-only, shared clause database proof search resolves against
/// (§5 "the program (clauses) is read-only and shared by all branches"),
/// indexed by `(name, arity)` the way `clausesOf` needs (§4.H §H.1).
#[derive(Clone, Debug, Default)]
pub struct RtProgram {
    clauses: FxHashMap<(Symbol, usize), Vec<RtClause>>,
}

impl RtProgram {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: Symbol, arity: usize, clause: RtClause) {
        self.clauses.entry((name, arity)).or_default().push(clause);
    }

    /// `clausesOf` (§4.H §H.1): every clause whose head symbol is `name` and
    /// whose arity matches, in program order.
    pub fn clauses_of(&self, name: Symbol, arity: usize) -> &[RtClause] {
        self.clauses
            .get(&(name, arity))
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// The declared arity of `name`, if any clause in the program defines
    /// it. Used by `waybelow`'s `Flex ≡ Rigid` case (§4.H §H.1) to decide
    /// whether a rigid symbol names a nullary constant or a predicate that
    /// would need the (unimplemented) higher-order enumeration case.
    pub fn arity_of(&self, name: Symbol) -> Option<usize> {
        self.clauses.keys().find(|(n, _)| *n == name).map(|(_, a)| *a)
    }
}
