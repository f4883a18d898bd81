//! Tree-walking evaluation
//!
//! Expressions evaluate against [`Bindings`], a map from identifier to [`Value`].
//! A value is a number, a sequence of numbers (for indexing and aggregate
//! builtins) or a callable. Numeric arithmetic follows [`Number`] promotion.

use std::fmt;
use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::ast::{FunctionExpr, IndexKind, UnaryOp};
use crate::error::MathError;
use crate::functions::builtins;
use crate::number::{Number, NumericKind};
use crate::Expr;
use num_traits::Zero;

/// Signature of host-provided functions
pub type NativeFnPtr = Arc<dyn Fn(&[Value]) -> Result<Value, MathError> + Send + Sync>;

/// Function implemented in Rust
#[derive(Clone)]
pub struct NativeFn {
    name: String,
    arity: usize,
    func: NativeFnPtr,
}

impl NativeFn {
    pub fn new<F>(name: impl Into<String>, arity: usize, func: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Value, MathError> + Send + Sync + 'static,
    {
        NativeFn {
            name: name.into(),
            arity,
            func: Arc::new(func),
        }
    }
}

impl fmt::Debug for NativeFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeFn")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .finish_non_exhaustive()
    }
}

/// Anything a `Call` node can apply
#[derive(Debug, Clone)]
pub enum Callable {
    Native(NativeFn),
    Defined(Arc<FunctionExpr>),
}

impl Callable {
    pub fn name(&self) -> &str {
        match self {
            Callable::Native(f) => &f.name,
            Callable::Defined(def) => &def.name,
        }
    }

    pub fn arity(&self) -> usize {
        match self {
            Callable::Native(f) => f.arity,
            Callable::Defined(def) => def.params.len(),
        }
    }

    /// Apply to already evaluated arguments; defined functions see the caller's
    /// bindings with their parameters layered on top
    pub fn apply(&self, args: &[Value], bindings: &Bindings) -> Result<Value, MathError> {
        if args.len() != self.arity() {
            return Err(MathError::ArityMismatch {
                name: self.name().to_string(),
                expected: self.arity(),
                got: args.len(),
            });
        }
        match self {
            Callable::Native(f) => (f.func)(args),
            Callable::Defined(def) => {
                let mut scope = bindings.clone();
                for (param, value) in def.params.iter().zip(args) {
                    scope.set(param.name(), value.clone());
                }
                def.body.eval(&scope)
            }
        }
    }
}

impl PartialEq for Callable {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Callable::Native(a), Callable::Native(b)) => {
                a.name == b.name && Arc::ptr_eq(&a.func, &b.func)
            }
            (Callable::Defined(a), Callable::Defined(b)) => a == b,
            _ => false,
        }
    }
}

impl From<&builtins::Builtin> for Callable {
    fn from(builtin: &builtins::Builtin) -> Self {
        Callable::Native(NativeFn::new(builtin.name, builtin.arity, builtin.apply))
    }
}

/// Result of general evaluation
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Number(Number),
    Sequence(Vec<Number>),
    Function(Callable),
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Number(_) => "number",
            Value::Sequence(_) => "sequence",
            Value::Function(_) => "function",
        }
    }

    pub fn as_number(&self) -> Result<Number, MathError> {
        match self {
            Value::Number(n) => Ok(*n),
            other => Err(MathError::TypeMismatch {
                expected: "number",
                found: other.type_name().to_string(),
            }),
        }
    }

    /// Sequence view; a lone number is a one-element sequence
    pub fn to_sequence(&self) -> Result<Vec<Number>, MathError> {
        match self {
            Value::Number(n) => Ok(vec![*n]),
            Value::Sequence(items) => Ok(items.clone()),
            Value::Function(_) => Err(MathError::TypeMismatch {
                expected: "sequence",
                found: "function".to_string(),
            }),
        }
    }
}

impl From<Number> for Value {
    fn from(n: Number) -> Self {
        Value::Number(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(Number::Integer(n))
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(Number::Integer(n as i64))
    }
}

impl From<f64> for Value {
    fn from(r: f64) -> Self {
        Value::Number(Number::Real(r))
    }
}

impl From<Vec<Number>> for Value {
    fn from(items: Vec<Number>) -> Self {
        Value::Sequence(items)
    }
}

/// Identifier → value map used by evaluation
///
/// # Example
/// ```ignore
/// let b = Bindings::new().with("x", 2).with("y", 0.5);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Bindings {
    values: FxHashMap<String, Value>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style binding
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Bind a host function under `name`
    pub fn define_fn<F>(&mut self, name: impl Into<String>, arity: usize, func: F)
    where
        F: Fn(&[Value]) -> Result<Value, MathError> + Send + Sync + 'static,
    {
        let name = name.into();
        let native = NativeFn::new(name.clone(), arity, func);
        self.values.insert(name, Value::Function(Callable::Native(native)));
    }

    /// Bind a function definition under its own name
    pub fn define(&mut self, def: FunctionExpr) {
        let name = def.name.clone();
        self.values
            .insert(name, Value::Function(Callable::Defined(Arc::new(def))));
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Bindings {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut b = Bindings::new();
        for (k, v) in iter {
            b.set(k, v);
        }
        b
    }
}

/// Outcome of partial evaluation
#[derive(Debug, Clone, PartialEq)]
pub enum Evaluation {
    /// Every free variable was bound
    Numeric(Number),
    /// Bound variables replaced, result simplified
    Symbolic(Expr),
}

/// `a * b` with the zero and one short-circuits; the result still carries the
/// wider of the two tags
fn multiply(a: Number, b: Number) -> Number {
    let kind = a.kind().max(b.kind());
    if a.is_zero() || b.is_zero() {
        Number::zero().promote(kind)
    } else if a == Number::Integer(1) {
        b.promote(kind)
    } else if b == Number::Integer(1) {
        a.promote(kind)
    } else {
        a * b
    }
}

fn divide(a: Number, d: Number) -> Result<Number, MathError> {
    if d.is_zero() {
        return Err(MathError::DivisionByZero);
    }
    if d == Number::Integer(1) {
        return Ok(a);
    }
    Ok(a / d)
}

fn factorial(n: Number) -> Result<Number, MathError> {
    let k = match n.as_i64() {
        Some(k) if k >= 0 => k,
        _ => return Err(MathError::domain("factorial", n)),
    };
    // 171! overflows f64
    if k > 170 {
        return Ok(Number::Real(f64::INFINITY));
    }
    let result = (2..=k).fold(Number::Integer(1), |acc, i| acc * Number::Integer(i));
    Ok(match n.kind() {
        NumericKind::Integer => result,
        kind => result.promote(kind),
    })
}

fn log_base(x: Number, base: Number) -> Result<Number, MathError> {
    let base_ok = match base {
        Number::Complex(z) => !crate::traits::is_zero_complex(z),
        other => other.to_f64().is_some_and(|b| b > 0.0),
    };
    if !base_ok || base.approx_one() {
        return Err(MathError::domain("log base", base));
    }
    if x.approx_zero() {
        return Err(MathError::domain("log", x));
    }
    Ok(x.ln() / base.ln())
}

fn index_of(value: Value) -> Result<i64, MathError> {
    let n = value.as_number()?;
    n.as_i64().ok_or(MathError::TypeMismatch {
        expected: "integer index",
        found: n.to_string(),
    })
}

/// Position for a slice bound: negative counts from the end, then clamp to `[0, len]`
fn slice_bound(index: i64, len: usize) -> usize {
    let len_i = len as i64;
    let pos = if index < 0 { index + len_i } else { index };
    pos.clamp(0, len_i) as usize
}

impl Expr {
    /// Evaluate to a number; every free variable must be bound
    ///
    /// # Example
    /// ```ignore
    /// let expr = parse("x^2 + 1")?;
    /// assert_eq!(expr.evaluate(&Bindings::new().with("x", 3))?, Number::Integer(10));
    /// ```
    pub fn evaluate(&self, bindings: &Bindings) -> Result<Number, MathError> {
        self.eval(bindings)?.as_number()
    }

    /// Evaluate as far as the bindings allow
    ///
    /// Returns `Numeric` when nothing is left unbound; otherwise the bound
    /// variables are replaced by literals and the remaining tree is simplified.
    pub fn evaluate_partial(&self, bindings: &Bindings) -> Result<Evaluation, MathError> {
        match self.eval(bindings) {
            Ok(value) => value.as_number().map(Evaluation::Numeric),
            Err(MathError::UnboundVariable(_)) => {
                let mut out = self.clone();
                for (name, value) in bindings.iter() {
                    if let Value::Number(n) = value {
                        out = out.substitute_var(name, &Expr::number(*n));
                    }
                }
                Ok(Evaluation::Symbolic(out.simplify()))
            }
            Err(e) => Err(e),
        }
    }

    /// General evaluation producing any [`Value`]
    pub fn eval(&self, bindings: &Bindings) -> Result<Value, MathError> {
        let num = |e: &Expr| -> Result<Number, MathError> { e.eval(bindings)?.as_number() };
        let n = match self {
            Expr::Literal(lit) => lit.value,
            Expr::Variable(s) => {
                return bindings
                    .get(s.name())
                    .cloned()
                    .ok_or_else(|| MathError::UnboundVariable(s.name().to_string()));
            }
            Expr::Add(l, r) => num(l)? + num(r)?,
            Expr::Sub(l, r) => num(l)? - num(r)?,
            Expr::Mul(l, r) => multiply(num(l)?, num(r)?),
            Expr::Div(l, r) => divide(num(l)?, num(r)?)?,
            Expr::Pow(l, r) => num(l)?.pow(num(r)?),
            Expr::Neg(u) => -num(u)?,
            Expr::Abs(u) => num(u)?.abs(),
            Expr::Unary { op, operand } => {
                let v = num(operand)?;
                match op {
                    UnaryOp::Plus => v,
                    UnaryOp::Sqrt => v.sqrt(),
                    UnaryOp::Factorial => factorial(v)?,
                    UnaryOp::Percent => v / Number::Integer(100),
                }
            }
            Expr::Function { func, arg } => func.eval(num(arg)?)?,
            Expr::Log { arg, base } => log_base(num(arg)?, num(base)?)?,
            Expr::Call { callee, args } => return eval_call(callee, args, bindings),
            Expr::Index { object, index } => return eval_index(object, index, bindings),
            Expr::Group(inner) => return inner.eval(bindings),
            Expr::FunctionDef(def) => {
                return Ok(Value::Function(Callable::Defined(Arc::new(def.clone()))));
            }
            Expr::Poly(p) => {
                if p.degree() == 0 {
                    p.leading()
                } else {
                    let x = bindings
                        .get(p.var().name())
                        .ok_or_else(|| MathError::UnboundVariable(p.var().name().to_string()))?
                        .as_number()?;
                    p.eval(x)
                }
            }
            Expr::Rational(r) => divide(num(r.numerator())?, num(r.denominator())?)?,
        };
        Ok(Value::Number(n))
    }
}

fn eval_call(callee: &Expr, args: &[Expr], bindings: &Bindings) -> Result<Value, MathError> {
    let function = match callee {
        Expr::Variable(s) => match bindings.get(s.name()) {
            Some(Value::Function(c)) => c.clone(),
            Some(_) => return Err(MathError::NotCallable(s.name().to_string())),
            None => match builtins::lookup(s.name()) {
                Some(builtin) => Callable::from(builtin),
                None => return Err(MathError::UnboundVariable(s.name().to_string())),
            },
        },
        other => match other.eval(bindings)? {
            Value::Function(c) => c,
            _ => return Err(MathError::NotCallable(other.to_string())),
        },
    };

    let values = args
        .iter()
        .map(|a| a.eval(bindings))
        .collect::<Result<Vec<_>, _>>()?;

    match function.apply(&values, bindings) {
        Err(err @ MathError::ArityMismatch { .. }) => {
            // Variable-arity callees take every argument as one sequence
            let mut packed = Vec::with_capacity(values.len());
            for v in &values {
                match v {
                    Value::Number(n) => packed.push(*n),
                    Value::Sequence(items) => packed.extend_from_slice(items),
                    Value::Function(_) => return Err(err),
                }
            }
            log::trace!(
                "retrying {} with {} arguments packed into one sequence",
                function.name(),
                values.len()
            );
            function
                .apply(&[Value::Sequence(packed)], bindings)
                .map_err(|_| err)
        }
        other => other,
    }
}

fn eval_index(object: &Expr, index: &IndexKind, bindings: &Bindings) -> Result<Value, MathError> {
    let items = match object.eval(bindings)? {
        Value::Sequence(items) => items,
        other => {
            return Err(MathError::TypeMismatch {
                expected: "sequence",
                found: other.type_name().to_string(),
            });
        }
    };
    let len = items.len();

    match index {
        IndexKind::Single(i) => {
            let idx = index_of(i.eval(bindings)?)?;
            let pos = if idx < 0 { idx + len as i64 } else { idx };
            if pos < 0 || pos >= len as i64 {
                return Err(MathError::IndexOutOfBounds { index: idx, len });
            }
            Ok(Value::Number(items[pos as usize]))
        }
        IndexKind::Range { start, end } => {
            let start = match start {
                Some(e) => slice_bound(index_of(e.eval(bindings)?)?, len),
                None => 0,
            };
            let end = match end {
                Some(e) => slice_bound(index_of(e.eval(bindings)?)?, len),
                None => len,
            };
            if start >= end {
                return Ok(Value::Sequence(Vec::new()));
            }
            Ok(Value::Sequence(items[start..end].to_vec()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbol::Symbol;

    fn x() -> Expr {
        Expr::symbol("x")
    }

    #[test]
    fn test_unbound_variable() {
        let err = x().evaluate(&Bindings::new()).unwrap_err();
        assert_eq!(err, MathError::UnboundVariable("x".to_string()));
    }

    #[test]
    fn test_division_by_zero() {
        let expr = Expr::div(x(), Expr::int(0));
        let b = Bindings::new().with("x", 5);
        assert_eq!(expr.evaluate(&b), Err(MathError::DivisionByZero));
    }

    #[test]
    fn test_short_circuits_keep_promotion() {
        let b = Bindings::new();
        let zero = Expr::mul(Expr::int(0), Expr::real(2.5));
        assert_eq!(zero.evaluate(&b).unwrap(), Number::Real(0.0));
        let one = Expr::mul(Expr::int(1), Expr::int(7));
        assert_eq!(one.evaluate(&b).unwrap(), Number::Integer(7));
    }

    #[test]
    fn test_unary_operators() {
        let b = Bindings::new();
        assert_eq!(Expr::int(5).factorial().evaluate(&b).unwrap(), Number::Integer(120));
        assert_eq!(Expr::int(50).percent().evaluate(&b).unwrap(), Number::Real(0.5));
        assert_eq!(Expr::int(16).sqrt().evaluate(&b).unwrap(), Number::Integer(4));
        assert!(matches!(
            Expr::int(-1).factorial().evaluate(&b),
            Err(MathError::DomainError { .. })
        ));
    }

    #[test]
    fn test_log_base() {
        let b = Bindings::new();
        let log = Expr::log(Expr::int(8), Expr::int(2));
        assert!(log.evaluate(&b).unwrap().approx_eq(&Number::from(3.0)));
        let bad = Expr::log(Expr::int(8), Expr::int(1));
        assert!(matches!(bad.evaluate(&b), Err(MathError::DomainError { .. })));
    }

    #[test]
    fn test_index_and_slice() {
        let seq: Vec<Number> = (1..=5).map(Number::Integer).collect();
        let b = Bindings::new().with("a", seq);
        let a = Expr::symbol("a");

        let last = Expr::index(a.clone(), Expr::int(-1));
        assert_eq!(last.evaluate(&b).unwrap(), Number::Integer(5));

        let out = Expr::index(a.clone(), Expr::int(5)).evaluate(&b);
        assert_eq!(out, Err(MathError::IndexOutOfBounds { index: 5, len: 5 }));

        let mid = Expr::slice(a.clone(), Some(Expr::int(1)), Some(Expr::int(3)));
        assert_eq!(
            mid.eval(&b).unwrap(),
            Value::Sequence(vec![Number::Integer(2), Number::Integer(3)])
        );

        let tail = Expr::slice(a, Some(Expr::int(-2)), None);
        assert_eq!(
            tail.eval(&b).unwrap(),
            Value::Sequence(vec![Number::Integer(4), Number::Integer(5)])
        );
    }

    #[test]
    fn test_call_defined_function() {
        let def = FunctionExpr {
            name: "f".to_string(),
            params: vec![Symbol::new("t")],
            body: Box::new(Expr::mul(Expr::symbol("t"), Expr::int(3))),
        };
        let mut b = Bindings::new();
        b.define(def);
        let call = Expr::call(Expr::symbol("f"), vec![Expr::int(4)]);
        assert_eq!(call.evaluate(&b).unwrap(), Number::Integer(12));

        let wrong = Expr::call(Expr::symbol("f"), vec![Expr::int(4), Expr::int(5)]);
        assert!(matches!(wrong.evaluate(&b), Err(MathError::ArityMismatch { .. })));
    }

    #[test]
    fn test_call_arity_retry_packs_sequence() {
        let b = Bindings::new();
        let call = Expr::call(
            Expr::symbol("max"),
            vec![Expr::int(3), Expr::int(11), Expr::int(7)],
        );
        assert_eq!(call.evaluate(&b).unwrap(), Number::Integer(11));
    }

    #[test]
    fn test_native_function() {
        let mut b = Bindings::new();
        b.define_fn("twice", 1, |args| Ok(Value::Number(args[0].as_number()? * Number::Integer(2))));
        let call = Expr::call(Expr::symbol("twice"), vec![Expr::real(1.5)]);
        assert_eq!(call.evaluate(&b).unwrap(), Number::Real(3.0));

        b.set("k", 2);
        let not_fn = Expr::call(Expr::symbol("k"), vec![]);
        assert_eq!(not_fn.evaluate(&b), Err(MathError::NotCallable("k".to_string())));
    }

    #[test]
    fn test_partial_evaluation() {
        let expr = Expr::add(Expr::mul(Expr::int(2), x()), Expr::symbol("y"));
        let b = Bindings::new().with("x", 3);
        match expr.evaluate_partial(&b).unwrap() {
            Evaluation::Symbolic(out) => {
                assert!(!out.contains_var("x"));
                assert!(out.contains_var("y"));
            }
            other => panic!("expected symbolic result, got {:?}", other),
        }

        let full = Bindings::new().with("x", 3).with("y", 1);
        assert_eq!(
            expr.evaluate_partial(&full).unwrap(),
            Evaluation::Numeric(Number::Integer(7))
        );
    }
}
