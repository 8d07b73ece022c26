use crate::env::{generalize, PredEnv};
use crate::error::TypeError;
use rustc_hash::FxHashMap;
use waylog_infer::{Constraint, TyInferenceTable};
use waylog_ir::{Clause, ConstRef, Expr, Gets, Group, PiType, PolyType, RhoType, SHead, Symbol};

pub type VarEnv = FxHashMap<Symbol, RhoType>;
pub type Exists = FxHashMap<Symbol, RhoType>;

/// §3.3: a name-occurrence's `given_arity` (whatever the surface syntax
/// declared, if anything) must agree with `inferred_arity` (the structural
/// arity it was flattened to). Checked wherever a `ConstRef` names a
/// predicate, since that's the one place a stale or mistyped arity
/// annotation would otherwise pass through unchecked.
fn check_ref_arity(c: &ConstRef) -> Result<(), TypeError> {
    match c.given_arity {
        Some(given) if given != c.inferred_arity => Err(TypeError::ArityMismatch {
            name: c.name,
            given,
            inferred: c.inferred_arity,
        }),
        _ => Ok(()),
    }
}

/// Bottom-up constraint generation for one expression (§4.E constraint
/// generation table). Unlike `map_info`, which visits a node before its
/// children, a node's type here depends on its children's already-computed
/// types, so this walker recurses first and builds the annotated tree on
/// the way back up.
pub fn infer_expr<L: Clone>(
    pred_env: &PredEnv,
    var_env: &VarEnv,
    exists: &mut Exists,
    constraints: &mut Vec<Constraint<String>>,
    expr: &Expr<L>,
) -> Result<(RhoType, Expr<(RhoType, L)>), TypeError> {
    match expr {
        Expr::Number(n, l) => Ok((RhoType::I, Expr::Number(*n, (RhoType::I, l.clone())))),

        Expr::Const(c, false, l) => {
            check_ref_arity(c)?;
            Ok((
                RhoType::I,
                Expr::Const(c.clone(), false, (RhoType::I, l.clone())),
            ))
        }

        Expr::Const(c, true, l) => {
            check_ref_arity(c)?;
            let pi = pred_env.find_poly(c.name, c.inferred_arity);
            let ty = RhoType::pi(pi);
            Ok((ty.clone(), Expr::Const(c.clone(), true, (ty, l.clone()))))
        }

        Expr::PredConst(c, l) => {
            check_ref_arity(c)?;
            let pi = pred_env.find_poly(c.name, c.inferred_arity);
            let ty = RhoType::pi(pi);
            Ok((ty.clone(), Expr::PredConst(c.clone(), (ty, l.clone()))))
        }

        Expr::Var(v, l) => {
            let ty = var_env
                .get(v)
                .cloned()
                .or_else(|| exists.get(v).cloned())
                .unwrap_or_else(|| {
                    let fresh = RhoType::Var(Symbol::fresh("alpha"));
                    exists.insert(*v, fresh.clone());
                    fresh
                });
            Ok((ty.clone(), Expr::Var(*v, (ty, l.clone()))))
        }

        Expr::AnonVar(v, l) => {
            let ty = RhoType::Var(Symbol::fresh("alpha"));
            Ok((ty.clone(), Expr::AnonVar(*v, (ty, l.clone()))))
        }

        Expr::App(f, args, l) => {
            let typed_args = args
                .iter()
                .map(|a| infer_expr(pred_env, var_env, exists, constraints, a))
                .collect::<Result<Vec<_>, _>>()?;

            if let Expr::Const(c, false, _) = f.as_ref() {
                for (arg_ty, _) in &typed_args {
                    constraints.push(Constraint::new(
                        arg_ty.clone(),
                        RhoType::I,
                        format!("argument of `{}`", c.name),
                    ));
                }
                let (_, typed_f) = infer_expr(pred_env, var_env, exists, constraints, f)?;
                let arg_exprs = typed_args.into_iter().map(|(_, e)| e).collect();
                return Ok((
                    RhoType::I,
                    Expr::App(Box::new(typed_f), arg_exprs, (RhoType::I, l.clone())),
                ));
            }

            let (f_ty, typed_f) = infer_expr(pred_env, var_env, exists, constraints, f)?;
            let phi = Symbol::fresh("phi");
            let arg_tys: Vec<RhoType> = typed_args.iter().map(|(t, _)| t.clone()).collect();
            constraints.push(Constraint::new(
                f_ty,
                RhoType::pi(PiType::fun(arg_tys, PiType::Var(phi))),
                "predicate application".to_string(),
            ));
            // `phi` is shared between the Fun's codomain above (a π-var)
            // and the type emitted here (a ρ-type wrapping that same
            // π-var), so solving the constraint above also resolves `ty`.
            let ty = RhoType::pi(PiType::Var(phi));
            let arg_exprs = typed_args.into_iter().map(|(_, e)| e).collect();
            Ok((
                ty.clone(),
                Expr::App(Box::new(typed_f), arg_exprs, (ty, l.clone())),
            ))
        }

        Expr::Op(name, false, args, l) => {
            let typed_args = args
                .iter()
                .map(|a| infer_expr(pred_env, var_env, exists, constraints, a))
                .collect::<Result<Vec<_>, _>>()?;
            for (arg_ty, _) in &typed_args {
                constraints.push(Constraint::new(
                    arg_ty.clone(),
                    RhoType::I,
                    format!("argument of `{}`", name),
                ));
            }
            let arg_exprs = typed_args.into_iter().map(|(_, e)| e).collect();
            Ok((
                RhoType::I,
                Expr::Op(*name, false, arg_exprs, (RhoType::I, l.clone())),
            ))
        }

        Expr::Op(name, true, args, l) => {
            let typed_args = args
                .iter()
                .map(|a| infer_expr(pred_env, var_env, exists, constraints, a))
                .collect::<Result<Vec<_>, _>>()?;
            let arg_tys: Vec<RhoType> = typed_args.iter().map(|(t, _)| t.clone()).collect();
            let phi = Symbol::fresh("phi");
            let pi = pred_env.find_poly(*name, args.len());
            constraints.push(Constraint::new(
                RhoType::pi(pi),
                RhoType::pi(PiType::fun(arg_tys, PiType::Var(phi))),
                format!("operator `{}`", name),
            ));
            let ty = RhoType::pi(PiType::Var(phi));
            let arg_exprs = typed_args.into_iter().map(|(_, e)| e).collect();
            Ok((
                ty.clone(),
                Expr::Op(*name, true, arg_exprs, (ty, l.clone())),
            ))
        }

        Expr::List(elems, tail, l) => {
            let typed_elems = elems
                .iter()
                .map(|e| infer_expr(pred_env, var_env, exists, constraints, e))
                .collect::<Result<Vec<_>, _>>()?;
            for (ty, _) in &typed_elems {
                constraints.push(Constraint::new(ty.clone(), RhoType::I, "list element".to_string()));
            }
            let typed_tail = match tail {
                Some(t) => {
                    let (ty, typed) = infer_expr(pred_env, var_env, exists, constraints, t)?;
                    constraints.push(Constraint::new(ty, RhoType::I, "list tail".to_string()));
                    Some(Box::new(typed))
                }
                None => None,
            };
            let elem_exprs = typed_elems.into_iter().map(|(_, e)| e).collect();
            Ok((
                RhoType::I,
                Expr::List(elem_exprs, typed_tail, (RhoType::I, l.clone())),
            ))
        }

        Expr::Eq(a, b, l) => {
            let (a_ty, typed_a) = infer_expr(pred_env, var_env, exists, constraints, a)?;
            let (b_ty, typed_b) = infer_expr(pred_env, var_env, exists, constraints, b)?;
            constraints.push(Constraint::new(a_ty, b_ty, "equality".to_string()));
            let ty = RhoType::pi(PiType::O);
            Ok((
                ty.clone(),
                Expr::Eq(Box::new(typed_a), Box::new(typed_b), (ty, l.clone())),
            ))
        }

        Expr::Lam(params, body, l) => {
            let mut inner_env = var_env.clone();
            let param_tys: Vec<RhoType> = params
                .iter()
                .map(|p| {
                    let ty = RhoType::Var(Symbol::fresh("alpha"));
                    inner_env.insert(*p, ty.clone());
                    ty
                })
                .collect();
            let (body_ty, typed_body) = infer_expr(pred_env, &inner_env, exists, constraints, body)?;
            let phi = Symbol::fresh("phi");
            constraints.push(Constraint::new(
                body_ty,
                RhoType::pi(PiType::Var(phi)),
                "lambda body".to_string(),
            ));
            let ty = RhoType::pi(PiType::fun(param_tys, PiType::Var(phi)));
            Ok((
                ty.clone(),
                Expr::Lam(params.clone(), Box::new(typed_body), (ty, l.clone())),
            ))
        }

        Expr::Paren(e, l) => {
            let (ty, typed) = infer_expr(pred_env, var_env, exists, constraints, e)?;
            Ok((ty.clone(), Expr::Paren(Box::new(typed), (ty, l.clone()))))
        }

        Expr::Ann(_, _, _) => Err(TypeError::NotImpl),
    }
}

fn regroup<L: Clone>(shape: &[Vec<Expr<L>>], flat: Vec<Expr<(RhoType, L)>>) -> Vec<Vec<Expr<(RhoType, L)>>> {
    let mut iter = flat.into_iter();
    shape
        .iter()
        .map(|group| group.iter().map(|_| iter.next().expect("flattened args shorter than head shape")).collect())
        .collect()
}

/// Clause typing (§4.E "Clause typing"). The head is treated exactly like a
/// predicate application: `typeOf(head) = Fun(argTys, phi)` is asserted
/// against the predicate's tentative type, and the body is typed sharing the
/// same `exists` map so that variables occurring in both head and body are
/// assigned one consistent type.
pub fn infer_clause<L: Clone>(
    pred_env: &PredEnv,
    constraints: &mut Vec<Constraint<String>>,
    clause: &Clause<L>,
) -> Result<Clause<(RhoType, L)>, TypeError> {
    let var_env = VarEnv::default();
    let mut exists = Exists::default();

    let arg_shape = &clause.head.args;
    let flat_args: Vec<&Expr<L>> = clause.head.flattened_args().collect();
    let mut typed_flat = Vec::with_capacity(flat_args.len());
    let mut arg_tys = Vec::with_capacity(flat_args.len());
    for a in flat_args {
        let (ty, typed) = infer_expr(pred_env, &var_env, &mut exists, constraints, a)?;
        arg_tys.push(ty);
        typed_flat.push(typed);
    }
    let typed_args = regroup(arg_shape, typed_flat);

    let phi = Symbol::fresh("phi");
    let f_ty = RhoType::pi(pred_env.find_poly(clause.head.name, clause.head.inferred_arity));
    constraints.push(Constraint::new(
        f_ty,
        RhoType::pi(PiType::fun(arg_tys, PiType::Var(phi))),
        format!("head of `{}`", clause.head.name),
    ));
    let head_ty = RhoType::pi(PiType::Var(phi));

    let typed_head = SHead {
        name: clause.head.name,
        args: typed_args,
        inferred_arity: clause.head.inferred_arity,
    };

    let typed_body = match &clause.body {
        None => {
            constraints.push(Constraint::new(
                head_ty,
                RhoType::pi(PiType::O),
                format!("fact `{}`", clause.head.name),
            ));
            None
        }
        Some((Gets::Mono, body)) => {
            let (body_ty, typed_body) = infer_expr(pred_env, &var_env, &mut exists, constraints, body)?;
            constraints.push(Constraint::new(
                head_ty,
                RhoType::pi(PiType::O),
                format!("head of `{}`", clause.head.name),
            ));
            constraints.push(Constraint::new(
                body_ty,
                RhoType::pi(PiType::O),
                format!("body of `{}`", clause.head.name),
            ));
            Some((Gets::Mono, typed_body))
        }
        Some((Gets::Poly, body)) => {
            let (body_ty, typed_body) = infer_expr(pred_env, &var_env, &mut exists, constraints, body)?;
            constraints.push(Constraint::new(
                body_ty,
                head_ty,
                format!("body of `{}`", clause.head.name),
            ));
            Some((Gets::Poly, typed_body))
        }
    };

    Ok(Clause {
        head: typed_head,
        body: typed_body,
    })
}

/// Per-group type inference (§4.E, the five-step algorithm): fabricate
/// tentative types, infer every clause against them, solve the accumulated
/// constraints once, apply the solution, then generalize into the outer
/// environment.
pub fn infer_group<L: Clone>(
    env: &mut PredEnv,
    group: &Group<L>,
) -> Result<Group<(RhoType, L)>, TypeError> {
    use crate::env::most_general_pi;

    let mut group_env = env.clone();
    let mut tentative: FxHashMap<(Symbol, usize), PiType> = FxHashMap::default();
    for pred in &group.predicates {
        let pi = most_general_pi(pred.arity);
        tentative.insert((pred.name, pred.arity), pi.clone());
        group_env.insert(pred.name, pred.arity, PolyType::monomorphic(pi));
    }

    let mut constraints: Vec<Constraint<String>> = Vec::new();
    let mut typed_predicates = Vec::with_capacity(group.predicates.len());
    for pred in &group.predicates {
        let mut typed_clauses = Vec::with_capacity(pred.clauses.len());
        for clause in &pred.clauses {
            if clause.head.inferred_arity != pred.arity {
                return Err(TypeError::ArityMismatch {
                    name: pred.name,
                    given: pred.arity,
                    inferred: clause.head.inferred_arity,
                });
            }
            typed_clauses.push(infer_clause(&group_env, &mut constraints, clause)?);
        }
        typed_predicates.push((pred.name, pred.arity, typed_clauses));
    }

    let mut table = TyInferenceTable::new();
    table.solve(&constraints)?;

    let mut solved_predicates = Vec::with_capacity(typed_predicates.len());
    for (name, arity, clauses) in typed_predicates {
        let solved_clauses = clauses
            .into_iter()
            .map(|c| waylog_ir::map_clause_info(c, &mut |_, (ty, l)| (table.apply_rho(&ty), l)))
            .collect();
        solved_predicates.push(waylog_ir::PredicateDef {
            name,
            arity,
            clauses: solved_clauses,
        });

        let solved_pi = table.apply_pi(&tentative[&(name, arity)]);
        env.insert(name, arity, generalize(&solved_pi));
    }

    Ok(Group {
        predicates: solved_predicates,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use waylog_ir::ConstRef;

    fn cref(name: &str, arity: usize) -> ConstRef {
        ConstRef {
            name: Symbol::new(name),
            given_arity: Some(arity),
            inferred_arity: arity,
        }
    }

    /// S4: `id(X, X).` typed against two calls with different individual
    /// arguments should generalize and admit both without clashing.
    #[test]
    fn polymorphic_identity_generalizes_over_one_type_variable() {
        let mut env = PredEnv::new();
        let id = Symbol::new("id");
        let x = Symbol::new("X");

        let head = SHead {
            name: id,
            args: vec![vec![Expr::Var(x, ()), Expr::Var(x, ())]],
            inferred_arity: 2,
        };
        let group = Group {
            predicates: vec![waylog_ir::PredicateDef {
                name: id,
                arity: 2,
                clauses: vec![Clause { head, body: None }],
            }],
        };

        let result = infer_group(&mut env, &group);
        assert!(result.is_ok());
        let poly = env.lookup(id, 2).unwrap();
        assert_eq!(poly.quantified.len(), 1);
    }

    /// S5: equating an individual with a nullary predicate's own type
    /// should fail type checking rather than silently succeed.
    #[test]
    fn mismatched_argument_sorts_raise_a_type_error() {
        let p = Symbol::new("p");
        let mut env = PredEnv::new();
        env.insert(p, 0, PolyType::monomorphic(PiType::O));

        let var_env = VarEnv::default();
        let mut exists = Exists::default();
        let mut constraints = Vec::new();

        // `a = p` — the left side is an individual, the right side names a
        // nullary predicate of type `o`; these sorts can never unify.
        let expr: Expr<()> = Expr::Eq(
            Box::new(Expr::Const(cref("a", 0), false, ())),
            Box::new(Expr::PredConst(cref("p", 0), ())),
            (),
        );
        let (_, _typed) =
            infer_expr(&env, &var_env, &mut exists, &mut constraints, &expr).unwrap();

        let mut table = TyInferenceTable::new();
        assert!(table.solve(&constraints).is_err());
    }

    #[test]
    fn ann_expressions_are_rejected() {
        let env = PredEnv::new();
        let mut exists = Exists::default();
        let mut constraints = Vec::new();
        let expr: Expr<()> = Expr::Ann(Box::new(Expr::Number(waylog_ir::Number::Int(1), ())), RhoType::I, ());
        let result = infer_expr(&env, &VarEnv::default(), &mut exists, &mut constraints, &expr);
        assert!(matches!(result, Err(TypeError::NotImpl)));
    }

    /// §8 "Arity consistency": a name-occurrence whose declared arity
    /// disagrees with its structural arity is rejected, not silently
    /// looked up under the wrong key.
    #[test]
    fn mismatched_given_arity_is_rejected() {
        let env = PredEnv::new();
        let var_env = VarEnv::default();
        let mut exists = Exists::default();
        let mut constraints = Vec::new();

        let mut bad = cref("p", 2);
        bad.given_arity = Some(1);
        let expr: Expr<()> = Expr::PredConst(bad, ());

        let result = infer_expr(&env, &var_env, &mut exists, &mut constraints, &expr);
        assert!(matches!(
            result,
            Err(TypeError::ArityMismatch { given: 1, inferred: 2, .. })
        ));
    }

    /// A clause head whose structural arity disagrees with the arity its
    /// enclosing predicate definition is grouped under is rejected.
    #[test]
    fn clause_head_arity_must_match_its_predicate_definition() {
        let mut env = PredEnv::new();
        let p = Symbol::new("p");
        let x = Symbol::new("X");

        let head = SHead {
            name: p,
            args: vec![vec![Expr::Var(x, ())]],
            inferred_arity: 1,
        };
        let group = Group {
            predicates: vec![waylog_ir::PredicateDef {
                name: p,
                arity: 2,
                clauses: vec![Clause { head, body: None }],
            }],
        };

        let result = infer_group(&mut env, &group);
        assert!(matches!(
            result,
            Err(TypeError::ArityMismatch { given: 2, inferred: 1, .. })
        ));
    }
}
