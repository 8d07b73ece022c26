use thiserror::Error;
use waylog_infer::UnifyError;

/// Errors the proof engine and higher-order resolver can raise (§7), layered
/// over `waylog_infer::UnifyError` the way `chalk_engine::fallible` wraps
/// its solver's own error into a richer outer one at the next crate up.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error(transparent)]
    Unify(#[from] UnifyError),

    /// `Ann` expressions and higher-order `waybelow(Flex, Rigid)` with
    /// `order(p) > 0` are reserved but unimplemented (§4.H, §7).
    #[error("feature not implemented in this revision")]
    NotImpl,

    /// Proof search has no applicable resolution rule for an atom's head
    /// shape (§4.G `resolve`).
    #[error("no resolution rule applies to this atom")]
    NoRule,

    /// `waybelow` applied to two unequal rigid symbols (§4.H).
    #[error("waybelow applied to incomparable rigid symbols")]
    IncomparableRigid,

    /// The external step bound on the search was exhausted before the
    /// driver produced another answer (§5 "timeouts are modeled as an
    /// external bound on steps taken").
    #[error("search exceeded its step bound")]
    Overflow,
}
