//! The four external entry points (§6): `typecheck`, `prove`, `unify`,
//! `freshen`, plus the built-in predicate environment (§6 collaborator
//! contracts) and the `Options` knobs that govern a `prove` call (§5).
//! Surface parsing is an external collaborator (§1); this crate accepts
//! already-parsed `waylog_ir` trees and never touches source text.

pub mod builtins;
pub mod error;
pub mod options;

pub use error::ApiError;
pub use options::Options;

use std::rc::Rc;
use tracing::instrument;
use waylog_engine::{EngineError, Goal, RtProgram};
use waylog_infer::Subst;
use waylog_ir::{PiType, Program, RhoType, Term};
use waylog_ti::{infer_group, PredEnv};

/// Type-check an entire program (§4.E, §6): run the per-group algorithm
/// over each dependency-ordered group in turn, threading the predicate
/// environment forward. Returns the fully annotated program plus the final
/// environment, which callers may keep around to type-check further goals
/// against the same program (e.g. a REPL's `<goal>` command).
#[instrument(skip_all)]
pub fn typecheck<L: Clone>(
    program: Program<L>,
) -> Result<(Program<(RhoType, L)>, PredEnv), ApiError> {
    let mut env = PredEnv::new();
    let mut groups = Vec::with_capacity(program.groups.len());
    for group in program.groups {
        groups.push(infer_group(&mut env, &group)?);
    }
    Ok((waylog_ir::Program { groups }, env))
}

/// Type-check a single ad-hoc goal against an already-established
/// environment, as `Fun([typeof(atom) for atom in goal], o)` (the same
/// well-formedness every clause body is checked against). Does not mutate
/// `env`.
#[instrument(skip_all)]
pub fn typecheck_goal<L: Clone>(env: &PredEnv, goal: &[waylog_ir::Expr<L>]) -> Result<(), ApiError> {
    let var_env = Default::default();
    let mut exists = Default::default();
    let mut constraints = Vec::new();
    for atom in goal {
        let (ty, _) = waylog_ti::infer_expr(env, &var_env, &mut exists, &mut constraints, atom)?;
        constraints.push(waylog_infer::Constraint::new(
            ty,
            RhoType::pi(PiType::O),
            "goal atom".to_string(),
        ));
    }
    let mut table = waylog_infer::TyInferenceTable::new();
    table.solve(&constraints).map_err(ApiError::Unify)?;
    Ok(())
}

/// Search for answers to `goal` against `program` (§4.G, §5, §6). Applies
/// `options.max_steps` as an external bound on suspensions forced, and
/// `options.max_answers` as the "first N answers" / "one answer"
/// cancellation mode — `None` yields every answer until the search itself
/// is exhausted.
#[instrument(skip(program, options))]
pub fn prove(program: Rc<RtProgram>, goal: Goal, options: &Options) -> Box<dyn Iterator<Item = Result<Subst, EngineError>>> {
    let stream = waylog_engine::prove(program, goal).limit_steps(options.max_steps);
    match options.max_answers {
        Some(n) => Box::new(stream.take(n)),
        None => Box::new(stream),
    }
}

/// First-order unification of two runtime terms (§4.C, §6).
pub fn unify(a: &Term, b: &Term) -> Result<Subst, ApiError> {
    Ok(waylog_infer::unify(a, b)?)
}

/// Replace every free variable of a runtime term with a fresh one (§4.G
/// `freshen`, §6), e.g. to instantiate a stored answer before reusing it in
/// a later query.
pub fn freshen(t: &Term) -> Term {
    let mut map = rustc_hash::FxHashMap::default();
    waylog_ir::rename_vars(t, &mut map)
}

#[cfg(test)]
mod tests;
