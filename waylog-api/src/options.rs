/// Knobs governing one `prove` call (§5, §6). Mirrors the teacher's
/// `--overflow-depth`: a step bound external to the search itself, plus how
/// many answers the caller wants before it stops asking.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Options {
    /// Upper bound on suspensions forced while searching for answers
    /// (§5 "timeouts are modeled as an external bound on steps taken").
    /// `None` means unbounded.
    pub max_steps: Option<usize>,
    /// "First N answers" cancellation (§5); `None` means "one answer",
    /// matching `.next()` rather than `.take(n)`.
    pub max_answers: Option<usize>,
}

impl Options {
    pub fn one_answer() -> Self {
        Options {
            max_steps: None,
            max_answers: Some(1),
        }
    }

    pub fn all_answers() -> Self {
        Options {
            max_steps: None,
            max_answers: None,
        }
    }
}

impl Default for Options {
    /// 10_000 steps, first answer only — the same order of magnitude as the
    /// teacher's `--overflow-depth=10` default, scaled up from "ply of trait
    /// search" to "suspensions forced", which is a much finer-grained unit.
    fn default() -> Self {
        Options {
            max_steps: Some(10_000),
            max_answers: Some(1),
        }
    }
}
