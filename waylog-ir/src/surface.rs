use crate::symbol::Symbol;
use crate::types::RhoType;
use std::fmt;

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Number {
    Int(i64),
    Float(f64),
}

/// A name-occurrence of a constant or predicate symbol (§3.2 `Const` /
/// `PredConst`). `given_arity` is whatever the surface syntax declared (if
/// anything); `inferred_arity` is filled in by the preprocessor once
/// currying has been flattened (§3.2).
#[derive(Clone, Debug, PartialEq)]
pub struct ConstRef {
    pub name: Symbol,
    pub given_arity: Option<usize>,
    pub inferred_arity: usize,
}

/// The surface expression tree (§3.2), polymorphic in the `Info` payload
/// attached to every node. Before type inference `Info` is a source
/// location; after inference it is `(RhoType, L)` for whatever `L` the
/// location type was (§9 "Info-payload polymorphism").
#[derive(Clone, Debug)]
pub enum Expr<Info> {
    Number(Number, Info),
    Const(ConstRef, bool /* is_predicate */, Info),
    PredConst(ConstRef, Info),
    Var(Symbol, Info),
    AnonVar(Symbol, Info),
    App(Box<Expr<Info>>, Vec<Expr<Info>>, Info),
    Op(Symbol, bool /* is_predicate */, Vec<Expr<Info>>, Info),
    Lam(Vec<Symbol>, Box<Expr<Info>>, Info),
    List(Vec<Expr<Info>>, Option<Box<Expr<Info>>>, Info),
    Eq(Box<Expr<Info>>, Box<Expr<Info>>, Info),
    Paren(Box<Expr<Info>>, Info),
    Ann(Box<Expr<Info>>, RhoType, Info),
}

impl<Info: Clone> Expr<Info> {
    /// The info payload carried at the root of this node (§3.2).
    pub fn info(&self) -> Info {
        match self {
            Expr::Number(_, i)
            | Expr::Const(_, _, i)
            | Expr::PredConst(_, i)
            | Expr::Var(_, i)
            | Expr::AnonVar(_, i)
            | Expr::App(_, _, i)
            | Expr::Op(_, _, _, i)
            | Expr::Lam(_, _, i)
            | Expr::List(_, _, i)
            | Expr::Eq(_, _, i)
            | Expr::Paren(_, i)
            | Expr::Ann(_, _, i) => i.clone(),
        }
    }
}

/// `Mono` clauses (`:-`) commit their body to `o`; `Poly` clauses merely
/// equate the body's type with the head's (§4.E "Clause typing").
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Gets {
    Mono,
    Poly,
}

/// A clause head (§3.2). `args` is a list of argument lists because heads
/// may be curried across several applications at parse time; the flattened
/// argument list has length `inferred_arity`.
#[derive(Clone, Debug)]
pub struct SHead<Info> {
    pub name: Symbol,
    pub args: Vec<Vec<Expr<Info>>>,
    pub inferred_arity: usize,
}

impl<Info> SHead<Info> {
    pub fn flattened_args(&self) -> impl Iterator<Item = &Expr<Info>> {
        self.args.iter().flatten()
    }
}

#[derive(Clone, Debug)]
pub struct Clause<Info> {
    pub head: SHead<Info>,
    pub body: Option<(Gets, Expr<Info>)>,
}

impl<Info> Clause<Info> {
    pub fn is_fact(&self) -> bool {
        self.body.is_none()
    }
}

/// All clauses of one `(name, arity)` (§3.2).
#[derive(Clone, Debug)]
pub struct PredicateDef<Info> {
    pub name: Symbol,
    pub arity: usize,
    pub clauses: Vec<Clause<Info>>,
}

/// A mutually recursive clique of predicate definitions (§3.2).
#[derive(Clone, Debug, Default)]
pub struct Group<Info> {
    pub predicates: Vec<PredicateDef<Info>>,
}

/// A DAG of groups in reverse topological order: by the time a group is
/// processed, every group it depends on has already been generalized
/// (§3.2, §4.E).
#[derive(Clone, Debug, Default)]
pub struct Program<Info> {
    pub groups: Vec<Group<Info>>,
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(n) => write!(f, "{}", n),
            Number::Float(n) => write!(f, "{}", n),
        }
    }
}
