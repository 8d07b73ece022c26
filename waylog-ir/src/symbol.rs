use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};

/// The reserved name used for wildcard (`_`) variables. No surface-syntax
/// identifier may lex to this string, so it can never collide with a name a
/// user actually wrote (§3.1).
pub const ANONYMOUS_NAME: &str = "$anon";

static FRESH_COUNTER: AtomicU32 = AtomicU32::new(0);

/// A name plus a generation counter (§3.1). Two symbols are equal iff both
/// fields match; `variant` produces a new symbol with the same name but a
/// fresh generation, which is how the unifier, the type solver and the
/// higher-order resolver all mint fresh variables without colliding.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol {
    name: lalrpop_intern::InternedString,
    generation: u32,
}

impl Symbol {
    pub fn new(name: &str) -> Self {
        Symbol {
            name: lalrpop_intern::intern(name),
            generation: 0,
        }
    }

    pub fn anonymous() -> Self {
        Symbol::fresh(ANONYMOUS_NAME)
    }

    pub fn is_anonymous(&self) -> bool {
        self.name.to_string() == ANONYMOUS_NAME
    }

    /// Mint a symbol guaranteed not to collide with any symbol previously
    /// produced by `fresh` or `variant` in this process (§4.A `freshVar`).
    /// The counter only ever grows, which is what makes freshness sound
    /// across backtracking (§5): a branch can discard its local state, but
    /// it can never roll the counter backwards.
    pub fn fresh(base: &str) -> Self {
        let generation = FRESH_COUNTER.fetch_add(1, Ordering::Relaxed) + 1;
        Symbol {
            name: lalrpop_intern::intern(base),
            generation,
        }
    }

    pub fn variant(&self) -> Self {
        Symbol::fresh(&self.name.to_string())
    }

    pub fn display_name(&self) -> String {
        self.name.to_string()
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.generation == 0 {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{}#{}", self.name, self.generation)
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
