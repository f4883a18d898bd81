use crate::Expr;
use crate::functions::Func;
use crate::simplification::helpers::plain_number;
use crate::simplification::rules::ExprKind;

rule!(
    /// sin(0) = tan(0) = asin(0) = atan(0) = 0, cos(0) = 1, acos(1) = 0
    TrigSpecialValueRule,
    "trig_special_value",
    95,
    Trigonometric,
    &[ExprKind::Function],
    |expr: &Expr| {
        let Expr::Function { func, arg } = expr else {
            return None;
        };
        let value = plain_number(arg)?;
        match func {
            Func::Sin | Func::Tan | Func::Asin | Func::Atan if value.approx_zero() => {
                Some(Expr::int(0))
            }
            Func::Cos if value.approx_zero() => Some(Expr::int(1)),
            Func::Acos if value.approx_one() => Some(Expr::int(0)),
            _ => None,
        }
    }
);

rule!(
    /// Odd functions pull the sign out, even functions drop it:
    /// sin(-x) = -sin(x), cos(-x) = cos(x)
    TrigParityRule,
    "trig_parity",
    85,
    Trigonometric,
    &[ExprKind::Function],
    |expr: &Expr| {
        let Expr::Function { func, arg } = expr else {
            return None;
        };
        let Expr::Neg(inner) = &**arg else {
            return None;
        };
        let unsigned = Expr::func(*func, (**inner).clone());
        match func {
            Func::Sin | Func::Tan | Func::Csc | Func::Cot | Func::Asin | Func::Atan => {
                Some(unsigned.neg())
            }
            Func::Cos | Func::Sec => Some(unsigned),
            _ => None,
        }
    }
);
