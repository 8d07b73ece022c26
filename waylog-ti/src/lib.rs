//! Per-group Hindley-Milner-style type inference (§4.E, §4.F): constraint
//! generation over the surface expression tree, a single solve per
//! dependency-ordered group, then generalization into the predicate
//! environment carried forward to later groups.

pub mod env;
pub mod error;
pub mod infer;

pub use env::{freshen, generalize, most_general_pi, PredEnv};
pub use error::TypeError;
pub use infer::{infer_clause, infer_expr, infer_group, Exists, VarEnv};
