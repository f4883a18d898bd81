//! Abstract Syntax Tree for mathematical expressions
//!
//! `Expr` is a closed sum type: every node kind the engine understands is one
//! variant, and every transformation dispatches with an exhaustive `match`.
//! Nodes own their children, so an expression is always a strict tree.

use std::collections::HashSet;
use std::convert::Infallible;

use crate::functions::Func;
use crate::number::Number;
use crate::poly::Polynomial;
use crate::rational::RationalFunction;
use crate::symbol::Symbol;

/// Constant value plus the text it was written as
///
/// Equality and hashing look at the value only.
#[derive(Debug, Clone)]
pub struct Literal {
    pub value: Number,
    pub text: Option<String>,
}

impl PartialEq for Literal {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for Literal {}

impl std::hash::Hash for Literal {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

/// Prefix and postfix operators that do not have a dedicated node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    /// Prefix `+`
    Plus,
    /// Prefix `√`
    Sqrt,
    /// Postfix `!`
    Factorial,
    /// Postfix `%`
    Percent,
}

impl UnaryOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            UnaryOp::Plus => "+",
            UnaryOp::Sqrt => "√",
            UnaryOp::Factorial => "!",
            UnaryOp::Percent => "%",
        }
    }

    pub fn is_postfix(&self) -> bool {
        matches!(self, UnaryOp::Factorial | UnaryOp::Percent)
    }
}

/// Subscript of an index expression: `a[i]` or the half-open slice `a[start:end]`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IndexKind {
    Single(Box<Expr>),
    Range {
        start: Option<Box<Expr>>,
        end: Option<Box<Expr>>,
    },
}

/// Named function definition: `f(x, y) = body`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FunctionExpr {
    pub name: String,
    pub params: Vec<Symbol>,
    pub body: Box<Expr>,
}

impl FunctionExpr {
    pub fn binds(&self, name: &str) -> bool {
        self.params.iter().any(|p| p.name() == name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Expr {
    /// Constant number (e.g., 3, 2.5, 1+2i)
    Literal(Literal),

    /// Named unknown (e.g., "x")
    Variable(Symbol),

    // Binary operations
    Add(Box<Expr>, Box<Expr>),
    Sub(Box<Expr>, Box<Expr>),
    Mul(Box<Expr>, Box<Expr>),
    Div(Box<Expr>, Box<Expr>),
    Pow(Box<Expr>, Box<Expr>),

    /// Negation `-u`
    Neg(Box<Expr>),

    /// Absolute value `|u|`
    Abs(Box<Expr>),

    /// Generic prefix/postfix operator
    Unary { op: UnaryOp, operand: Box<Expr> },

    /// One-operand transcendental function
    Function { func: Func, arg: Box<Expr> },

    /// Logarithm with an arbitrary base
    Log { arg: Box<Expr>, base: Box<Expr> },

    /// Application of an evaluated callee to evaluated arguments
    Call { callee: Box<Expr>, args: Vec<Expr> },

    /// Subscript or slice access
    Index { object: Box<Expr>, index: IndexKind },

    /// Parenthesized expression
    Group(Box<Expr>),

    FunctionDef(FunctionExpr),

    /// Dense single-variable polynomial
    Poly(Polynomial),

    Rational(RationalFunction),
}

impl Expr {
    // Convenience constructors

    /// Create a numeric literal
    pub fn number(value: impl Into<Number>) -> Self {
        Expr::Literal(Literal {
            value: value.into(),
            text: None,
        })
    }

    pub fn int(n: i64) -> Self {
        Expr::number(n)
    }

    pub fn real(r: f64) -> Self {
        Expr::number(r)
    }

    /// Create a literal that prints as the text it was written as
    pub fn literal_text(value: impl Into<Number>, text: impl Into<String>) -> Self {
        Expr::Literal(Literal {
            value: value.into(),
            text: Some(text.into()),
        })
    }

    /// Create a variable expression
    pub fn symbol(name: impl AsRef<str>) -> Self {
        Expr::Variable(Symbol::new(name.as_ref()))
    }

    pub fn add(left: Expr, right: Expr) -> Self {
        Expr::Add(Box::new(left), Box::new(right))
    }

    pub fn sub(left: Expr, right: Expr) -> Self {
        Expr::Sub(Box::new(left), Box::new(right))
    }

    pub fn mul(left: Expr, right: Expr) -> Self {
        Expr::Mul(Box::new(left), Box::new(right))
    }

    pub fn div(left: Expr, right: Expr) -> Self {
        Expr::Div(Box::new(left), Box::new(right))
    }

    pub fn pow(base: Expr, exponent: Expr) -> Self {
        Expr::Pow(Box::new(base), Box::new(exponent))
    }

    pub fn neg(self) -> Self {
        Expr::Neg(Box::new(self))
    }

    pub fn abs(self) -> Self {
        Expr::Abs(Box::new(self))
    }

    pub fn unary(op: UnaryOp, operand: Expr) -> Self {
        Expr::Unary {
            op,
            operand: Box::new(operand),
        }
    }

    pub fn sqrt(self) -> Self {
        Expr::unary(UnaryOp::Sqrt, self)
    }

    pub fn factorial(self) -> Self {
        Expr::unary(UnaryOp::Factorial, self)
    }

    pub fn percent(self) -> Self {
        Expr::unary(UnaryOp::Percent, self)
    }

    /// Create a one-operand function node
    pub fn func(func: Func, arg: Expr) -> Self {
        Expr::Function {
            func,
            arg: Box::new(arg),
        }
    }

    /// Logarithm of `arg` in base `base`
    pub fn log(arg: Expr, base: Expr) -> Self {
        Expr::Log {
            arg: Box::new(arg),
            base: Box::new(base),
        }
    }

    pub fn call(callee: Expr, args: Vec<Expr>) -> Self {
        Expr::Call {
            callee: Box::new(callee),
            args,
        }
    }

    pub fn index(object: Expr, index: Expr) -> Self {
        Expr::Index {
            object: Box::new(object),
            index: IndexKind::Single(Box::new(index)),
        }
    }

    pub fn slice(object: Expr, start: Option<Expr>, end: Option<Expr>) -> Self {
        Expr::Index {
            object: Box::new(object),
            index: IndexKind::Range {
                start: start.map(Box::new),
                end: end.map(Box::new),
            },
        }
    }

    pub fn group(inner: Expr) -> Self {
        Expr::Group(Box::new(inner))
    }

    pub fn function_def(name: impl Into<String>, params: Vec<Symbol>, body: Expr) -> Self {
        Expr::FunctionDef(FunctionExpr {
            name: name.into(),
            params,
            body: Box::new(body),
        })
    }

    pub fn rational(numerator: Expr, denominator: Expr) -> Self {
        Expr::Rational(RationalFunction::new(numerator, denominator))
    }

    // Accessor methods

    /// Value of a literal node
    ///
    /// # Example
    /// ```ignore
    /// let expr = Expr::int(3);
    /// assert_eq!(expr.as_number(), Some(Number::Integer(3)));
    /// assert_eq!(Expr::symbol("x").as_number(), None);
    /// ```
    pub fn as_number(&self) -> Option<Number> {
        match self {
            Expr::Literal(lit) => Some(lit.value),
            _ => None,
        }
    }

    /// Check if this expression is the number zero (with tolerance)
    #[inline]
    pub fn is_zero_num(&self) -> bool {
        self.as_number().is_some_and(|n| n.approx_zero())
    }

    /// Check if this expression is the number one (with tolerance)
    #[inline]
    pub fn is_one_num(&self) -> bool {
        self.as_number().is_some_and(|n| n.approx_one())
    }

    #[inline]
    pub fn is_neg_one_num(&self) -> bool {
        self.as_number().is_some_and(|n| n.approx_neg_one())
    }

    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            Expr::Variable(s) => Some(s.name()),
            _ => None,
        }
    }

    /// Direct children in evaluation order
    pub fn children(&self) -> Vec<&Expr> {
        match self {
            Expr::Literal(_) | Expr::Variable(_) | Expr::Poly(_) => Vec::new(),
            Expr::Add(l, r)
            | Expr::Sub(l, r)
            | Expr::Mul(l, r)
            | Expr::Div(l, r)
            | Expr::Pow(l, r) => vec![&**l, &**r],
            Expr::Neg(u) | Expr::Abs(u) | Expr::Group(u) => vec![&**u],
            Expr::Unary { operand, .. } => vec![&**operand],
            Expr::Function { arg, .. } => vec![&**arg],
            Expr::Log { arg, base } => vec![&**arg, &**base],
            Expr::Call { callee, args } => std::iter::once(&**callee).chain(args.iter()).collect(),
            Expr::Index { object, index } => {
                let mut out = vec![&**object];
                match index {
                    IndexKind::Single(i) => out.push(&**i),
                    IndexKind::Range { start, end } => {
                        out.extend(start.as_deref());
                        out.extend(end.as_deref());
                    }
                }
                out
            }
            Expr::FunctionDef(def) => vec![&*def.body],
            Expr::Rational(r) => vec![r.numerator(), r.denominator()],
        }
    }

    /// Rebuild this node with every direct child passed through `f`
    ///
    /// Leaves (literals, variables, polynomials) are returned as-is.
    pub fn try_map_children<E>(
        &self,
        mut f: impl FnMut(&Expr) -> Result<Expr, E>,
    ) -> Result<Expr, E> {
        let mut bx = |e: &Expr| f(e).map(Box::new);
        Ok(match self {
            Expr::Literal(_) | Expr::Variable(_) | Expr::Poly(_) => self.clone(),
            Expr::Add(l, r) => Expr::Add(bx(l)?, bx(r)?),
            Expr::Sub(l, r) => Expr::Sub(bx(l)?, bx(r)?),
            Expr::Mul(l, r) => Expr::Mul(bx(l)?, bx(r)?),
            Expr::Div(l, r) => Expr::Div(bx(l)?, bx(r)?),
            Expr::Pow(l, r) => Expr::Pow(bx(l)?, bx(r)?),
            Expr::Neg(u) => Expr::Neg(bx(u)?),
            Expr::Abs(u) => Expr::Abs(bx(u)?),
            Expr::Group(u) => Expr::Group(bx(u)?),
            Expr::Unary { op, operand } => Expr::Unary {
                op: *op,
                operand: bx(operand)?,
            },
            Expr::Function { func, arg } => Expr::Function {
                func: *func,
                arg: bx(arg)?,
            },
            Expr::Log { arg, base } => Expr::Log {
                arg: bx(arg)?,
                base: bx(base)?,
            },
            Expr::Call { callee, args } => {
                let callee = bx(callee)?;
                let args = args
                    .iter()
                    .map(|a| bx(a).map(|b| *b))
                    .collect::<Result<Vec<_>, E>>()?;
                Expr::Call { callee, args }
            }
            Expr::Index { object, index } => {
                let object = bx(object)?;
                let index = match index {
                    IndexKind::Single(i) => IndexKind::Single(bx(i)?),
                    IndexKind::Range { start, end } => IndexKind::Range {
                        start: start.as_deref().map(&mut bx).transpose()?,
                        end: end.as_deref().map(&mut bx).transpose()?,
                    },
                };
                Expr::Index { object, index }
            }
            Expr::FunctionDef(def) => Expr::FunctionDef(FunctionExpr {
                name: def.name.clone(),
                params: def.params.clone(),
                body: bx(&def.body)?,
            }),
            Expr::Rational(r) => {
                let num = bx(r.numerator())?;
                let den = bx(r.denominator())?;
                Expr::Rational(RationalFunction::new(*num, *den))
            }
        })
    }

    pub fn map_children(&self, mut f: impl FnMut(&Expr) -> Expr) -> Expr {
        match self.try_map_children(|e| Ok::<Expr, Infallible>(f(e))) {
            Ok(expr) => expr,
            Err(never) => match never {},
        }
    }

    // Analysis methods

    /// Count the total number of nodes in the AST
    pub fn size(&self) -> usize {
        1 + self.children().iter().map(|c| c.size()).sum::<usize>()
    }

    /// Get the maximum nesting depth of the AST (a leaf has depth 1)
    pub fn depth(&self) -> usize {
        1 + self
            .children()
            .iter()
            .map(|c| c.depth())
            .max()
            .unwrap_or(0)
    }

    /// Check if the expression contains a specific free variable
    pub fn contains_var(&self, var: &str) -> bool {
        match self {
            Expr::Variable(s) => s.name() == var,
            Expr::Poly(p) => p.var().name() == var && p.degree() > 0,
            Expr::FunctionDef(def) if def.binds(var) => false,
            _ => self.children().iter().any(|c| c.contains_var(var)),
        }
    }

    /// Collect all free variables in the expression
    pub fn variables(&self) -> HashSet<String> {
        let mut vars = HashSet::new();
        self.collect_variables(&mut vars);
        vars
    }

    fn collect_variables(&self, vars: &mut HashSet<String>) {
        match self {
            Expr::Variable(s) => {
                vars.insert(s.name().to_string());
            }
            Expr::Poly(p) => {
                if p.degree() > 0 {
                    vars.insert(p.var().name().to_string());
                }
            }
            Expr::FunctionDef(def) => {
                let mut inner = HashSet::new();
                def.body.collect_variables(&mut inner);
                vars.extend(inner.into_iter().filter(|v| !def.binds(v)));
            }
            _ => {
                for child in self.children() {
                    child.collect_variables(vars);
                }
            }
        }
    }

    /// Variable assumed when a transformation is not told which one to use:
    /// the alphabetically first free variable, or `x` when there is none
    pub fn default_var(&self) -> String {
        self.variables()
            .into_iter()
            .min()
            .unwrap_or_else(|| "x".to_string())
    }

    /// Replace every subtree equal to `target` with `replacement`
    ///
    /// Parameters of a function definition shadow a variable target inside its body.
    ///
    /// # Example
    /// ```ignore
    /// let expr = parse("x * y")?;
    /// let result = expr.substitute(&Expr::symbol("x"), &Expr::int(3));
    /// // result is 3 * y
    /// ```
    pub fn substitute(&self, target: &Expr, replacement: &Expr) -> Expr {
        if self == target {
            return replacement.clone();
        }
        match self {
            Expr::Poly(p) => match target {
                Expr::Variable(v) if v == p.var() => {
                    p.to_expr().substitute(target, replacement)
                }
                _ => self.clone(),
            },
            Expr::FunctionDef(def) => match target {
                Expr::Variable(v) if def.binds(v.name()) => self.clone(),
                _ => self.map_children(|c| c.substitute(target, replacement)),
            },
            _ => self.map_children(|c| c.substitute(target, replacement)),
        }
    }

    /// Substitute a variable by name
    pub fn substitute_var(&self, var: &str, replacement: &Expr) -> Expr {
        self.substitute(&Expr::symbol(var), replacement)
    }
}

impl From<Number> for Expr {
    fn from(n: Number) -> Self {
        Expr::number(n)
    }
}

impl From<i64> for Expr {
    fn from(n: i64) -> Self {
        Expr::int(n)
    }
}

impl From<i32> for Expr {
    fn from(n: i32) -> Self {
        Expr::int(n as i64)
    }
}

impl From<f64> for Expr {
    fn from(r: f64) -> Self {
        Expr::real(r)
    }
}

impl From<Polynomial> for Expr {
    fn from(p: Polynomial) -> Self {
        Expr::Poly(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn x() -> Expr {
        Expr::symbol("x")
    }

    #[test]
    fn test_depth_and_size() {
        assert_eq!(x().depth(), 1);
        assert_eq!(x().size(), 1);

        // (x + 1) * x
        let expr = Expr::mul(Expr::add(x(), Expr::int(1)), x());
        assert_eq!(expr.depth(), 3);
        assert_eq!(expr.size(), 5);
    }

    #[test]
    fn test_literal_equality_ignores_text() {
        assert_eq!(Expr::literal_text(3, "3"), Expr::int(3));
        assert_ne!(Expr::int(3), Expr::real(3.0));
    }

    #[test]
    fn test_variables() {
        let expr = Expr::add(Expr::mul(Expr::symbol("a"), x()), Expr::symbol("b").sin());
        let vars = expr.variables();
        assert_eq!(vars.len(), 3);
        assert!(vars.contains("a") && vars.contains("b") && vars.contains("x"));
        assert_eq!(expr.default_var(), "a");
        assert_eq!(Expr::int(4).default_var(), "x");
    }

    #[test]
    fn test_function_def_params_are_bound() {
        let def = Expr::function_def(
            "f",
            vec![Symbol::new("x")],
            Expr::mul(x(), Expr::symbol("k")),
        );
        let vars = def.variables();
        assert!(vars.contains("k"));
        assert!(!vars.contains("x"));

        let replaced = def.substitute_var("x", &Expr::int(2));
        assert_eq!(replaced, def);
    }

    #[test]
    fn test_substitute_whole_subtree() {
        let sin_x = x().sin();
        let expr = Expr::add(sin_x.clone(), Expr::int(1));
        let out = expr.substitute(&sin_x, &Expr::symbol("u"));
        assert_eq!(out, Expr::add(Expr::symbol("u"), Expr::int(1)));
        assert_eq!(sin_x.substitute(&sin_x, &x()), x());
    }

    #[test]
    fn test_call_counts_callee() {
        let expr = Expr::call(Expr::symbol("f"), vec![x(), Expr::int(2)]);
        assert!(expr.variables().contains("f"));
        assert_eq!(expr.size(), 4);
    }
}
