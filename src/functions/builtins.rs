//! Builtin callables resolved when a `Call` names an unbound function
//!
//! Aggregates take a single sequence argument; calling them with several scalars
//! goes through the evaluator's arity retry, which packs the scalars into one
//! sequence.

use crate::error::MathError;
use crate::evaluator::Value;
use crate::number::Number;
use num_traits::Zero;
use rustc_hash::FxHashMap;
use std::sync::OnceLock;

#[derive(Clone)]
pub(crate) struct Builtin {
    pub name: &'static str,
    pub arity: usize,
    pub apply: fn(&[Value]) -> Result<Value, MathError>,
}

static BUILTINS: OnceLock<FxHashMap<&'static str, Builtin>> = OnceLock::new();

fn real_arg(name: &'static str, value: &Value) -> Result<f64, MathError> {
    let n = value.as_number()?;
    match n {
        Number::Complex(_) => Err(MathError::TypeMismatch {
            expected: "real number",
            found: format!("{} in {}", n, name),
        }),
        other => other.to_f64().ok_or(MathError::TypeMismatch {
            expected: "real number",
            found: other.to_string(),
        }),
    }
}

/// Round with `op`, keeping integers exact
fn rounding(name: &'static str, args: &[Value], op: fn(f64) -> f64) -> Result<Value, MathError> {
    if let Number::Integer(n) = args[0].as_number()? {
        return Ok(Value::Number(Number::Integer(n)));
    }
    let r = op(real_arg(name, &args[0])?);
    if r.is_finite() && r.abs() < i64::MAX as f64 {
        Ok(Value::Number(Number::Integer(r as i64)))
    } else {
        Ok(Value::Number(Number::Real(r)))
    }
}

fn extremum(name: &'static str, args: &[Value], pick_first: fn(f64, f64) -> bool) -> Result<Value, MathError> {
    let items = args[0].to_sequence()?;
    let mut best: Option<(Number, f64)> = None;
    for item in items {
        let r = real_arg(name, &Value::Number(item))?;
        match best {
            Some((_, current)) if !pick_first(r, current) => {}
            _ => best = Some((item, r)),
        }
    }
    best.map(|(n, _)| Value::Number(n))
        .ok_or_else(|| MathError::UnsupportedOperation(format!("{} of an empty sequence", name)))
}

fn sum_of(items: &[Number]) -> Number {
    items.iter().fold(Number::zero(), |acc, &n| acc + n)
}

fn init_builtins() -> FxHashMap<&'static str, Builtin> {
    let defs = [
        Builtin {
            name: "sqrt",
            arity: 1,
            apply: |args| Ok(Value::Number(args[0].as_number()?.sqrt())),
        },
        Builtin {
            name: "floor",
            arity: 1,
            apply: |args| rounding("floor", args, f64::floor),
        },
        Builtin {
            name: "ceil",
            arity: 1,
            apply: |args| rounding("ceil", args, f64::ceil),
        },
        Builtin {
            name: "round",
            arity: 1,
            apply: |args| rounding("round", args, f64::round),
        },
        Builtin {
            name: "max",
            arity: 1,
            apply: |args| extremum("max", args, |a, b| a > b),
        },
        Builtin {
            name: "min",
            arity: 1,
            apply: |args| extremum("min", args, |a, b| a < b),
        },
        Builtin {
            name: "sum",
            arity: 1,
            apply: |args| Ok(Value::Number(sum_of(&args[0].to_sequence()?))),
        },
        Builtin {
            name: "mean",
            arity: 1,
            apply: |args| {
                let items = args[0].to_sequence()?;
                if items.is_empty() {
                    return Err(MathError::DivisionByZero);
                }
                Ok(Value::Number(
                    sum_of(&items) / Number::Integer(items.len() as i64),
                ))
            },
        },
        Builtin {
            name: "len",
            arity: 1,
            apply: |args| {
                Ok(Value::Number(Number::Integer(
                    args[0].to_sequence()?.len() as i64,
                )))
            },
        },
    ];
    defs.into_iter().map(|b| (b.name, b)).collect()
}

pub(crate) fn lookup(name: &str) -> Option<&'static Builtin> {
    BUILTINS.get_or_init(init_builtins).get(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seq(items: &[i64]) -> Value {
        Value::Sequence(items.iter().map(|&n| Number::Integer(n)).collect())
    }

    fn apply(name: &str, args: &[Value]) -> Result<Value, MathError> {
        let builtin = lookup(name).unwrap();
        (builtin.apply)(args)
    }

    #[test]
    fn test_aggregates() {
        let values = [seq(&[3, 9, 4])];
        assert_eq!(apply("max", &values).unwrap(), Value::Number(Number::Integer(9)));
        assert_eq!(apply("min", &values).unwrap(), Value::Number(Number::Integer(3)));
        assert_eq!(apply("sum", &values).unwrap(), Value::Number(Number::Integer(16)));
        assert_eq!(apply("len", &values).unwrap(), Value::Number(Number::Integer(3)));
        let mean = apply("mean", &[seq(&[1, 2])]).unwrap();
        assert_eq!(mean, Value::Number(Number::Real(1.5)));
    }

    #[test]
    fn test_rounding() {
        let half = [Value::Number(Number::Real(2.5))];
        assert_eq!(apply("floor", &half).unwrap(), Value::Number(Number::Integer(2)));
        assert_eq!(apply("ceil", &half).unwrap(), Value::Number(Number::Integer(3)));
        assert!(lookup("gamma").is_none());
    }

    #[test]
    fn test_empty_sequence() {
        assert!(apply("max", &[seq(&[])]).is_err());
        assert_eq!(apply("mean", &[seq(&[])]), Err(MathError::DivisionByZero));
    }
}
