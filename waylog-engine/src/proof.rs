use crate::error::EngineError;
use crate::hor::{self, Goal};
use crate::monad::{mplus, map_stream, AnswerStream, Stream};
use crate::program::RtProgram;
use rustc_hash::FxHashSet;
use std::rc::Rc;
use waylog_infer::Subst;
use waylog_ir::Term;

/// `split` (§4.G): deterministic leftmost-atom selection.
fn split(goal: &[Term]) -> (&Term, &[Term]) {
    goal.split_first().expect("split called on an empty goal")
}

/// `derive` (§4.G): resolve the leftmost atom, producing one
/// `(subgoal ++ rest, substitution)` branch per resolution choice.
fn derive(program: &RtProgram, goal: &[Term]) -> Result<Vec<(Goal, Subst)>, EngineError> {
    let (atom, rest) = split(goal);
    let branches = hor::resolve(program, atom)?;
    Ok(branches
        .into_iter()
        .map(|(subgoal, s)| {
            let new_goal: Goal = subgoal.into_iter().chain(rest.iter().cloned()).collect();
            (new_goal, s)
        })
        .collect())
}

/// `refute` (§4.G): refutation of `goal`, as a lazy, fairly-interleaved
/// stream of answer substitutions. An empty goal is `success`; otherwise
/// `derive` yields a choice of `(g', s)` pairs. Each branch recurses on
/// `apply(s, g')`, not the raw `g'` — the pseudocode's `refute(apply(s, g'))`
/// — so that bindings the head unification just made (e.g. a higher-order
/// argument going from flex to rigid) are visible to the body's own
/// resolution, not just folded in afterwards via `combine`.
pub fn refute(program: Rc<RtProgram>, goal: Goal) -> Stream {
    if goal.is_empty() {
        return Stream::one(Subst::success());
    }
    Stream::suspend(move || match derive(&program, &goal) {
        Ok(branches) => {
            let mut result = Stream::Nil;
            for (g_prime, s) in branches.into_iter().rev() {
                let program2 = Rc::clone(&program);
                let g_prime: Goal = g_prime.iter().map(|a| s.apply(a)).collect();
                let deeper = Stream::suspend(move || refute(program2, g_prime));
                let composed = map_stream(deeper, move |ans| s.combine(&ans));
                result = mplus(composed, result);
            }
            result
        }
        Err(EngineError::NotImpl) => Stream::Error(EngineError::NotImpl),
        Err(_) => Stream::Nil,
    })
}

/// `prove` (§4.G, §6): refute `goal`, restricting each answer to `goal`'s
/// free variables before yielding it.
pub fn prove(program: Rc<RtProgram>, goal: Goal) -> AnswerStream {
    let mut free = FxHashSet::default();
    for atom in &goal {
        for v in atom.vars_of() {
            free.insert(v);
        }
    }
    let stream = refute(program, goal);
    AnswerStream::new(map_stream(stream, move |ans| ans.restrict(&free)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::program::RtClause;
    use waylog_ir::Symbol;

    fn list(elems: Vec<Term>, tail: Term) -> Term {
        elems
            .into_iter()
            .rev()
            .fold(tail, |acc, e| Term::app(Term::Rigid(Symbol::new(".")), vec![e, acc]))
    }

    fn nil() -> Term {
        Term::Rigid(Symbol::new("[]"))
    }

    /// S1: `append([], Ys, Ys). append([X|Xs], Ys, [X|Zs]) :- append(Xs, Ys, Zs).`
    /// Goal `append([1,2], [3], R)` has exactly one answer `R = [1,2,3]`.
    #[test]
    fn append_yields_exactly_one_answer() {
        let append = Symbol::new("append");
        let mut program = RtProgram::new();

        let ys = Symbol::new("Ys");
        program.insert(
            append,
            3,
            RtClause::fact(Term::app(
                Term::Rigid(append),
                vec![nil(), Term::Flex(ys), Term::Flex(ys)],
            )),
        );

        let x = Symbol::new("X");
        let xs = Symbol::new("Xs");
        let ys2 = Symbol::new("Ys");
        let zs = Symbol::new("Zs");
        let head = Term::app(
            Term::Rigid(append),
            vec![
                list(vec![Term::Flex(x)], Term::Flex(xs)),
                Term::Flex(ys2),
                list(vec![Term::Flex(x)], Term::Flex(zs)),
            ],
        );
        let body = vec![Term::app(
            Term::Rigid(append),
            vec![Term::Flex(xs), Term::Flex(ys2), Term::Flex(zs)],
        )];
        program.insert(append, 3, RtClause { head, body });

        let r = Symbol::new("R");
        let one = Term::Rigid(Symbol::new("1"));
        let two = Term::Rigid(Symbol::new("2"));
        let three = Term::Rigid(Symbol::new("3"));
        let goal = vec![Term::app(
            Term::Rigid(append),
            vec![
                list(vec![one.clone(), two.clone()], nil()),
                list(vec![three.clone()], nil()),
                Term::Flex(r),
            ],
        )];

        let answers: Vec<_> = prove(Rc::new(program), goal)
            .map(|r| r.unwrap())
            .collect();
        assert_eq!(answers.len(), 1);
        assert_eq!(
            answers[0].apply(&Term::Flex(r)),
            list(vec![one, two, three], nil())
        );
    }

    /// S2: `member(X, [1,2,3])` yields `X=1, X=2, X=3` in that order.
    #[test]
    fn member_yields_answers_in_order() {
        let member = Symbol::new("member");
        let mut program = RtProgram::new();

        let x1 = Symbol::new("X");
        let t1 = Symbol::new("T");
        program.insert(
            member,
            2,
            RtClause::fact(Term::app(
                Term::Rigid(member),
                vec![Term::Flex(x1), list(vec![Term::Flex(x1)], Term::Flex(t1))],
            )),
        );

        let x2 = Symbol::new("X");
        let h2 = Symbol::new("H");
        let t2 = Symbol::new("T");
        let head = Term::app(
            Term::Rigid(member),
            vec![Term::Flex(x2), list(vec![Term::Flex(h2)], Term::Flex(t2))],
        );
        let body = vec![Term::app(
            Term::Rigid(member),
            vec![Term::Flex(x2), Term::Flex(t2)],
        )];
        program.insert(member, 2, RtClause { head, body });

        let x = Symbol::new("X");
        let one = Term::Rigid(Symbol::new("1"));
        let two = Term::Rigid(Symbol::new("2"));
        let three = Term::Rigid(Symbol::new("3"));
        let goal = vec![Term::app(
            Term::Rigid(member),
            vec![
                Term::Flex(x),
                list(vec![one.clone(), two.clone(), three.clone()], nil()),
            ],
        )];

        let answers: Vec<_> = prove(Rc::new(program), goal)
            .map(|r| r.unwrap())
            .map(|s| s.apply(&Term::Flex(x)))
            .collect();
        assert_eq!(answers, vec![one, two, three]);
    }
}
