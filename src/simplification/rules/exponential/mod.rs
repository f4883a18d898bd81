use crate::Expr;
use crate::functions::Func;
use crate::simplification::helpers::{func_arg, is_euler};
use crate::simplification::rules::{ExprKind, SharedRule};
use std::sync::Arc;

rule!(
    /// ln(exp(x)) = x
    LnExpRule,
    "ln_exp",
    90,
    Exponential,
    &[ExprKind::Function],
    |expr: &Expr| {
        let inner = func_arg(expr, Func::Ln)?;
        func_arg(inner, Func::Exp).cloned()
    }
);

rule!(
    /// ln(1) = 0, ln(e) = 1, exp(0) = 1
    ExpLnSpecialValueRule,
    "exp_ln_special_value",
    95,
    Exponential,
    &[ExprKind::Function],
    |expr: &Expr| {
        if let Some(arg) = func_arg(expr, Func::Ln) {
            if arg.is_one_num() {
                return Some(Expr::int(0));
            }
            if is_euler(arg) {
                return Some(Expr::int(1));
            }
        }
        if let Some(arg) = func_arg(expr, Func::Exp)
            && arg.is_zero_num()
        {
            return Some(Expr::int(1));
        }
        None
    }
);

rule!(
    /// log(x, e) = ln(x)
    LogNaturalBaseRule,
    "log_natural_base",
    90,
    Exponential,
    &[ExprKind::Log],
    |expr: &Expr| {
        if let Expr::Log { arg, base } = expr
            && is_euler(base)
        {
            return Some((**arg).clone().ln());
        }
        None
    }
);

rule!(
    /// log(1, b) = 0, log(b, b) = 1
    LogSpecialValueRule,
    "log_special_value",
    95,
    Exponential,
    &[ExprKind::Log],
    |expr: &Expr| {
        let Expr::Log { arg, base } = expr else {
            return None;
        };
        if arg.is_one_num() {
            Some(Expr::int(0))
        } else if arg == base {
            Some(Expr::int(1))
        } else {
            None
        }
    }
);

pub(crate) fn get_exponential_rules() -> Vec<SharedRule> {
    vec![
        Arc::new(LnExpRule),
        Arc::new(ExpLnSpecialValueRule),
        Arc::new(LogNaturalBaseRule),
        Arc::new(LogSpecialValueRule),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simplification::rules::Rule;

    #[test]
    fn test_inverse_pairs() {
        let x = Expr::symbol("x");
        assert_eq!(LnExpRule.apply(&x.clone().exp().ln()), Some(x.clone()));
        assert_eq!(LnExpRule.apply(&x.clone().ln()), None);
    }

    #[test]
    fn test_natural_base() {
        let x = Expr::symbol("x");
        let e = Expr::literal_text(std::f64::consts::E, "e");
        assert_eq!(
            LogNaturalBaseRule.apply(&Expr::log(x.clone(), e.clone())),
            Some(x.clone().ln())
        );
        assert_eq!(LogNaturalBaseRule.apply(&Expr::log(x, Expr::int(10))), None);
        assert_eq!(ExpLnSpecialValueRule.apply(&e.ln()), Some(Expr::int(1)));
    }
}
