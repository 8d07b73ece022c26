use thiserror::Error;
use waylog_infer::UnifyError;
use waylog_ir::Symbol;

/// Type-inference errors (§7). Every variant is *surfaced*: the enclosing
/// dependency group aborts and the caller receives the first such error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypeError {
    #[error(transparent)]
    Unify(#[from] UnifyError),

    /// `Ann` expressions are reserved but unsupported in this revision
    /// (§4.E constraint-generation table).
    #[error("type annotations (`Ann`) are not implemented in this revision")]
    NotImpl,

    /// §3.3: a name-occurrence's declared arity must match the structural
    /// arity it was flattened to.
    #[error("`{name}` is used at arity {given} but its structural arity is {inferred}")]
    ArityMismatch {
        name: Symbol,
        given: usize,
        inferred: usize,
    },
}
