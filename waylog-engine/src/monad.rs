use crate::error::EngineError;
use waylog_infer::Subst;

/// The logic monad's carrier (§4.D, §9 "Nondeterministic control"): a lazy
/// stream of answers, realized as an explicit tree of thunks rather than a
/// CPS transform or coroutines — the first of the three realizations §9
/// names. `Suspend` marks a choice point the scheduler may interleave past
/// before forcing it, which is what makes an infinite branch unable to
/// starve a finite sibling (§5, §8 invariant 7).
///
/// `Error` carries a *surfaced* failure (§7: `NotImpl` only) rather than an
/// ordinary branch failure — ordinary unification/resolution failures
/// never reach this variant, they just contribute `Nil`.
pub enum Stream {
    /// `mzero`: no answers.
    Nil,
    /// One answer, with the rest of the stream not yet forced.
    Answer(Subst, Box<Stream>),
    /// A suspended computation: forcing it is the scheduler's job, not the
    /// producer's.
    Suspend(Box<dyn FnOnce() -> Stream>),
    /// A surfaced error. Takes priority over any sibling branch and is not
    /// merged away by `mplus`/`bind`, matching §7's "`NotImpl` is always
    /// surfaced" (as opposed to ordinary proof-search errors, which are
    /// recovered as branch failure before ever reaching `Stream`).
    Error(EngineError),
}

impl Stream {
    pub fn mzero() -> Self {
        Stream::Nil
    }

    pub fn suspend(f: impl FnOnce() -> Stream + 'static) -> Self {
        Stream::Suspend(Box::new(f))
    }

    pub fn one(s: Subst) -> Self {
        Stream::Answer(s, Box::new(Stream::Nil))
    }
}

/// `mplus` (§4.D): fair choice. Forcing one step of `s1` before recursing
/// with the operands swapped is what gives round-robin fairness — a chain
/// of suspensions on the left cannot be forced indefinitely without ever
/// visiting `s2`.
pub fn mplus(s1: Stream, s2: Stream) -> Stream {
    match s1 {
        Stream::Nil => s2,
        Stream::Error(e) => Stream::Error(e),
        Stream::Answer(a, rest) => Stream::Answer(a, Box::new(mplus(s2, *rest))),
        Stream::Suspend(f) => Stream::suspend(move || mplus(s2, f())),
    }
}

/// Fair bind (`>>-`, §4.D): apply `goal` to every answer in `s1`, merging
/// the resulting streams fairly rather than depth-first, so that a goal
/// with infinitely many answers to its first conjunct does not starve the
/// rest of the conjunction.
pub fn bind(s1: Stream, goal: impl Fn(Subst) -> Stream + Clone + 'static) -> Stream {
    match s1 {
        Stream::Nil => Stream::Nil,
        Stream::Error(e) => Stream::Error(e),
        Stream::Answer(a, rest) => {
            let g = goal.clone();
            mplus(goal(a), Stream::suspend(move || bind(*rest, g)))
        }
        Stream::Suspend(f) => Stream::suspend(move || bind(f(), goal)),
    }
}

/// Functor map over answers: used to compose a branch's local substitution
/// with each answer produced deeper in the derivation (§4.G `refute`:
/// `combine(s, ans)`), without collapsing the stream's laziness.
pub fn map_stream(s: Stream, f: impl Fn(Subst) -> Subst + Clone + 'static) -> Stream {
    match s {
        Stream::Nil => Stream::Nil,
        Stream::Error(e) => Stream::Error(e),
        Stream::Answer(a, rest) => {
            let f2 = f.clone();
            Stream::Answer(f(a), Box::new(map_stream(*rest, f2)))
        }
        Stream::Suspend(g) => Stream::suspend(move || map_stream(g(), f)),
    }
}

/// An `Iterator` adapter over a `Stream`, forcing suspensions one at a time
/// (§5 "the driver requests answers one at a time; dropping the answer
/// stream aborts the search"). `.next()` gives "one answer"; `.take(n)`
/// gives "first N answers"; dropping the iterator mid-stream simply drops
/// the remaining unforced thunks, performing no further work. A surfaced
/// error is yielded exactly once and ends the iteration.
///
/// `max_steps`, when set, bounds the number of suspensions this iterator
/// will force across its whole lifetime (§5 "timeouts are modeled as an
/// external bound on steps taken") — once exhausted, the remaining search
/// is abandoned and a single `Overflow` is yielded.
pub struct AnswerStream {
    current: Stream,
    steps_left: Option<usize>,
}

impl AnswerStream {
    pub fn new(s: Stream) -> Self {
        AnswerStream {
            current: s,
            steps_left: None,
        }
    }

    pub fn bounded(s: Stream, max_steps: usize) -> Self {
        AnswerStream {
            current: s,
            steps_left: Some(max_steps),
        }
    }

    /// Impose (or lift) a step bound on an already-constructed stream, so a
    /// caller that only has an `AnswerStream` in hand (e.g. the one returned
    /// by `prove`) can still apply an external timeout.
    pub fn limit_steps(mut self, max_steps: Option<usize>) -> Self {
        self.steps_left = max_steps;
        self
    }
}

impl Iterator for AnswerStream {
    type Item = Result<Subst, EngineError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match std::mem::replace(&mut self.current, Stream::Nil) {
                Stream::Nil => return None,
                Stream::Error(e) => return Some(Err(e)),
                Stream::Answer(a, rest) => {
                    self.current = *rest;
                    return Some(Ok(a));
                }
                Stream::Suspend(f) => {
                    if let Some(steps) = &mut self.steps_left {
                        if *steps == 0 {
                            return Some(Err(EngineError::Overflow));
                        }
                        *steps -= 1;
                    }
                    self.current = f();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use waylog_ir::{Symbol, Term};

    fn bound(name: &str, to: &str) -> Subst {
        Subst::bind(Symbol::new(name), Term::Rigid(Symbol::new(to)))
    }

    #[test]
    fn mzero_is_identity_for_mplus() {
        let s = Stream::one(bound("X", "a"));
        let answers: Vec<_> = AnswerStream::new(mplus(Stream::mzero(), s)).collect();
        assert_eq!(answers.len(), 1);
    }

    #[test]
    fn mplus_interleaves_instead_of_exhausting_left_first() {
        let left = Stream::Answer(bound("X", "a1"), Box::new(Stream::one(bound("X", "a2"))));
        let right = Stream::one(bound("X", "b1"));
        let answers: Vec<_> = AnswerStream::new(mplus(left, right))
            .map(|r| r.unwrap())
            .collect();
        // fair interleaving visits one answer from each side before
        // returning to the first side for its second answer.
        assert_eq!(answers.len(), 3);
        assert_eq!(answers[0], bound("X", "a1"));
        assert_eq!(answers[1], bound("X", "b1"));
        assert_eq!(answers[2], bound("X", "a2"));
    }

    #[test]
    fn take_n_cancels_without_forcing_the_rest() {
        fn countdown(n: u32) -> Stream {
            if n == 0 {
                Stream::Nil
            } else {
                Stream::suspend(move || Stream::Answer(bound("X", "a"), Box::new(countdown(n - 1))))
            }
        }
        let answers: Vec<_> = AnswerStream::new(countdown(1_000_000)).take(3).collect();
        assert_eq!(answers.len(), 3);
    }

    #[test]
    fn bounded_stream_overflows_before_an_infinite_search_completes() {
        fn spin() -> Stream {
            Stream::suspend(spin)
        }
        let answers: Vec<_> = AnswerStream::bounded(spin(), 5).collect();
        assert_eq!(answers, vec![Err(EngineError::Overflow)]);
    }

    #[test]
    fn a_surfaced_error_ends_the_stream() {
        let s = Stream::Error(EngineError::NotImpl);
        let answers: Vec<_> = AnswerStream::new(s).collect();
        assert_eq!(answers.len(), 1);
        assert!(answers[0].is_err());
    }
}
