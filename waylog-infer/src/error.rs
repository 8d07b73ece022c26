use thiserror::Error;

/// Error kinds raised by unification and type solving (§7). Proof search
/// recovers from these as branch failure; the type inference engine
/// surfaces them to its caller, aborting the enclosing dependency group.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UnifyError {
    #[error("cannot unify: incompatible term shapes")]
    Clash,

    #[error("occurs check failed")]
    OccurCheck,

    #[error("arity mismatch in tuple/list unification")]
    Arity,

    #[error("type unification failed: incompatible types{}", origin.as_ref().map(|o| format!(" (at {o})")).unwrap_or_default())]
    TypeClash { origin: Option<String> },
}
