use crate::symbol::Symbol;
use std::fmt;

/// Runtime terms used by proof search (§3.6). Expressions here are
/// immutable values; substitutions are built and then applied to produce
/// new values (§3.6 "Lifetimes").
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum Term {
    /// A named predicate or function symbol with known arity.
    Rigid(Symbol),
    /// A logic variable.
    Flex(Symbol),
    App(Box<Term>, Vec<Term>),
    /// A tuple of terms, used to encode multi-argument clause heads/bodies.
    Tup(Vec<Term>),
    /// A finitary subset of a predicate's extension: `snapshot` holds the
    /// elements enumerated so far; `witnesses` are auxiliary flex variables
    /// used to grow the set lazily (§3.6, §4.H).
    Set {
        snapshot: Vec<Term>,
        witnesses: Vec<Symbol>,
    },
}

impl Term {
    pub fn app(head: Term, args: Vec<Term>) -> Term {
        if args.is_empty() {
            head
        } else {
            Term::App(Box::new(head), args)
        }
    }

    pub fn rigid(sym: Symbol) -> Term {
        Term::Rigid(sym)
    }

    pub fn flex(sym: Symbol) -> Term {
        Term::Flex(sym)
    }

    /// Wraps a flex variable as a singleton set (§4.H `liftSet`).
    pub fn lift_set(var: Symbol) -> Term {
        Term::Set {
            snapshot: Vec::new(),
            witnesses: vec![var],
        }
    }

    /// `nameOf` restricted to runtime terms (§4.A): the head symbol of a
    /// rigid atom or application of a rigid head, else `None`.
    pub fn name_of(&self) -> Option<Symbol> {
        match self {
            Term::Rigid(s) | Term::Flex(s) => Some(*s),
            Term::App(head, _) => head.name_of(),
            Term::Tup(_) | Term::Set { .. } => None,
        }
    }

    /// `arityOf` restricted to runtime terms (§4.A).
    pub fn arity_of(&self) -> Option<usize> {
        match self {
            Term::Rigid(_) | Term::Flex(_) => Some(0),
            Term::App(_, args) => Some(args.len()),
            Term::Tup(es) => Some(es.len()),
            Term::Set { .. } => None,
        }
    }

    pub fn is_flex(&self) -> bool {
        matches!(self, Term::Flex(_))
    }

    pub fn is_rigid(&self) -> bool {
        matches!(self, Term::Rigid(_))
    }

    /// Free variables in order of first occurrence, no duplicates (§4.A
    /// `varsOf`).
    pub fn vars_of(&self) -> Vec<Symbol> {
        let mut seen = rustc_hash::FxHashSet::default();
        let mut out = Vec::new();
        self.vars_of_into(&mut seen, &mut out);
        out
    }

    fn vars_of_into(&self, seen: &mut rustc_hash::FxHashSet<Symbol>, out: &mut Vec<Symbol>) {
        match self {
            Term::Flex(v) => {
                if seen.insert(*v) {
                    out.push(*v);
                }
            }
            Term::Rigid(_) => {}
            Term::App(head, args) => {
                head.vars_of_into(seen, out);
                for a in args {
                    a.vars_of_into(seen, out);
                }
            }
            Term::Tup(es) => {
                for e in es {
                    e.vars_of_into(seen, out);
                }
            }
            Term::Set { snapshot, witnesses } => {
                for e in snapshot {
                    e.vars_of_into(seen, out);
                }
                for w in witnesses {
                    if seen.insert(*w) {
                        out.push(*w);
                    }
                }
            }
        }
    }
}

impl fmt::Debug for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Rigid(s) => write!(f, "{:?}", s),
            Term::Flex(v) => write!(f, "?{:?}", v),
            Term::App(head, args) => {
                write!(f, "{:?}(", head)?;
                for (i, a) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{:?}", a)?;
                }
                write!(f, ")")
            }
            Term::Tup(es) => {
                write!(f, "<")?;
                for (i, e) in es.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{:?}", e)?;
                }
                write!(f, ">")
            }
            Term::Set { snapshot, witnesses } => {
                write!(f, "{{")?;
                for (i, e) in snapshot.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{:?}", e)?;
                }
                write!(f, "}} with witnesses {:?}", witnesses)
            }
        }
    }
}
