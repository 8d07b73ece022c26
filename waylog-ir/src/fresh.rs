use crate::symbol::Symbol;
use crate::term::Term;
use rustc_hash::FxHashMap;

/// Renames every `Flex` (and `Set` witness) in `t` to a fresh variant,
/// consulting `map` both to decide what a variable renames to and to make
/// sure the same variable renames consistently everywhere it occurs in a
/// term (or across several terms renamed with the same `map`, e.g. a
/// clause's head and body) (§4.G `variant`, §6 `freshen`).
pub fn rename_vars(t: &Term, map: &mut FxHashMap<Symbol, Symbol>) -> Term {
    match t {
        Term::Flex(v) => Term::Flex(*map.entry(*v).or_insert_with(|| v.variant())),
        Term::Rigid(_) => t.clone(),
        Term::App(head, args) => Term::App(
            Box::new(rename_vars(head, map)),
            args.iter().map(|a| rename_vars(a, map)).collect(),
        ),
        Term::Tup(es) => Term::Tup(es.iter().map(|e| rename_vars(e, map)).collect()),
        Term::Set {
            snapshot,
            witnesses,
        } => Term::Set {
            snapshot: snapshot.iter().map(|e| rename_vars(e, map)).collect(),
            witnesses: witnesses
                .iter()
                .map(|w| *map.entry(*w).or_insert_with(|| w.variant()))
                .collect(),
        },
    }
}
