//! The logic monad (§4.D), the SLD proof engine (§4.G) and the higher-order
//! resolver (§4.H), operating over the runtime term model from `waylog-ir`
//! and the substitution/unifier from `waylog-infer`.

pub mod error;
pub mod hor;
pub mod monad;
pub mod program;
pub mod proof;

pub use error::EngineError;
pub use hor::{resolve, waybelow, Branch, Goal};
pub use monad::{bind, map_stream, mplus, AnswerStream, Stream};
pub use program::{RtClause, RtProgram};
pub use proof::{prove, refute};
