use thiserror::Error;
use waylog_engine::EngineError;
use waylog_infer::UnifyError;
use waylog_ti::TypeError;

/// The union of everything the four entry points can report (§6, §7),
/// layered over the per-subsystem error enums the way `chalk_solve`'s
/// public errors wrap `chalk_ir`'s.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error(transparent)]
    Type(#[from] TypeError),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    Unify(#[from] UnifyError),
}
