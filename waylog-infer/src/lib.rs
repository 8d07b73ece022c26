//! Substitutions and unification (§4.B, §4.C) over runtime terms, plus the
//! type constraint solver (§4.F) used by type inference.

pub mod error;
pub mod subst;
pub mod tysolve;
pub mod unify;

pub use error::UnifyError;
pub use subst::Subst;
pub use tysolve::{Constraint, PiVar, RhoVar, TyInferenceTable};
pub use unify::unify;
