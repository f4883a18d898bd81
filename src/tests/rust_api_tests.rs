use crate::{
    Bindings, Diff, Evaluation, Expr, Func, Integrate, MathError, Number, Simplify, Span, Symbol,
    evaluate_str, gradient, hessian, jacobian, parse, sym,
};

#[test]
fn test_builder_configuration() {
    let x = sym("x");
    let diff = Diff::new();
    let res = diff.differentiate(x.clone().pow(2), &x).unwrap();
    assert_eq!(format!("{}", res), "2x");

    // Other symbols are constants
    let res = diff.diff_str("a*x", "x").unwrap();
    assert_eq!(res, "a");

    // Raw derivative keeps the sum rule shape until simplified
    let raw = Diff::new()
        .simplify(false)
        .differentiate(Expr::add(x.to_expr(), x.to_expr()), &x)
        .unwrap();
    assert_eq!(raw, Expr::add(Expr::int(1), Expr::int(1)));
    assert_eq!(raw.simplify(), Expr::int(2));
}

#[test]
fn test_recursion_limits() {
    let x = sym("x");
    let mut deeply_nested: Expr = x.to_expr();
    for _ in 0..20 {
        deeply_nested = deeply_nested.sin();
    }

    // Should pass with default/high limits
    let diff = Diff::new();
    assert!(diff.differentiate(deeply_nested.clone(), &x).is_ok());

    // Should fail with strict limits
    let strict = Diff::new().max_depth(10);
    assert_eq!(
        strict.differentiate(deeply_nested.clone(), &x),
        Err(MathError::MaxDepthExceeded)
    );

    let small = Integrate::new().max_nodes(5);
    assert_eq!(
        small.integrate(deeply_nested, &x),
        Err(MathError::MaxNodesExceeded)
    );
}

#[test]
fn test_symbol_api() {
    let x = sym("x");
    assert_eq!(x.name(), "x");
    assert_eq!(Symbol::new("x"), x);

    let expr = Expr::add(x.clone().pow(3), x.clone().exp());
    let value = expr.evaluate(&Bindings::new().with("x", 0)).unwrap();
    assert!(value.approx_eq(&Number::Real(1.0)));

    assert_eq!(x.clone().ln(), Expr::func(Func::Ln, x.to_expr()));
}

#[test]
fn test_expression_queries() {
    let expr = parse("x^2 + sin(y) * z").unwrap();
    let mut vars: Vec<String> = expr.variables().into_iter().collect();
    vars.sort();
    assert_eq!(vars, vec!["x", "y", "z"]);
    assert!(expr.contains_var("y"));
    assert!(!expr.contains_var("w"));
    assert_eq!(expr.default_var(), "x");
    assert_eq!(parse("3").unwrap().default_var(), "x");
}

#[test]
fn test_substitution() {
    let expr = parse("x^2 + x").unwrap();
    let shifted = expr.substitute_var("x", &parse("y + 1").unwrap());
    let b = Bindings::new().with("y", 2);
    assert_eq!(shifted.evaluate(&b), Ok(Number::Integer(12)));

    // Whole subtree replacement
    let target = parse("sin(x)").unwrap();
    let replaced = parse("sin(x) + cos(x)")
        .unwrap()
        .substitute(&target, &Expr::int(0));
    assert_eq!(replaced, Expr::add(Expr::int(0), Expr::symbol("x").cos()));
}

#[test]
fn test_substitute_then_evaluate_matches_binding() {
    let expr = parse("x^3 - 2x / (x + 1)").unwrap();
    for value in [0.5, 2.0, 7.25] {
        let direct = expr.evaluate(&Bindings::new().with("x", value)).unwrap();
        let substituted = expr
            .substitute_var("x", &Expr::real(value))
            .evaluate(&Bindings::new())
            .unwrap();
        assert!(direct.approx_eq(&substituted));
    }
}

#[test]
fn test_expand() {
    let expr = parse("(x + 1)(x - 2)").unwrap();
    let expanded = expr.expand();
    let b = Bindings::new().with("x", 3.5);
    assert!(expanded
        .evaluate(&b)
        .unwrap()
        .approx_eq(&expr.evaluate(&b).unwrap()));
    assert!(!matches!(expanded, Expr::Mul(..)));
}

#[test]
fn test_partial_evaluation() {
    let expr = parse("x * y + 1").unwrap();
    match expr.evaluate_partial(&Bindings::new().with("x", 2)).unwrap() {
        Evaluation::Symbolic(rest) => assert_eq!(rest.to_string(), "2y + 1"),
        other => panic!("expected a symbolic result, got {:?}", other),
    }
    assert_eq!(
        expr.evaluate_partial(&Bindings::new().with("x", 2).with("y", 3)),
        Ok(Evaluation::Numeric(Number::Integer(7)))
    );
    assert_eq!(evaluate_str("x * y + 1", &[("x", 3.0)]).unwrap(), "3y + 1");
}

#[test]
fn test_multivariable_helpers() {
    let x = sym("x");
    let y = sym("y");
    let f = parse("x^2 * y + y^3").unwrap();

    let grad = gradient(&f, &[&x, &y]).unwrap();
    assert_eq!(grad.len(), 2);
    let b = Bindings::new().with("x", 2).with("y", 3);
    assert_eq!(grad[0].evaluate(&b), Ok(Number::Integer(12)));
    assert_eq!(grad[1].evaluate(&b), Ok(Number::Integer(31)));

    let hess = hessian(&f, &[&x, &y]).unwrap();
    assert_eq!(hess[0][1].evaluate(&b), hess[1][0].evaluate(&b));
    assert_eq!(hess[1][1].evaluate(&b), Ok(Number::Integer(18)));

    let system = [parse("x * y").unwrap(), parse("x + y").unwrap()];
    let jac = jacobian(&system, &[&x, &y]).unwrap();
    assert_eq!(jac[0][0], Expr::symbol("y"));
    assert_eq!(jac[1][1], Expr::int(1));
}

#[test]
fn test_simplify_builder() {
    let simplifier = Simplify::new().max_depth(50).max_nodes(200);
    assert_eq!(simplifier.simplify_str("x + 0").unwrap(), "x");
    assert_eq!(
        Simplify::new().max_nodes(2).simplify_str("x + y + z"),
        Err(MathError::MaxNodesExceeded)
    );
}

#[test]
fn test_parse_errors_carry_spans() {
    assert_eq!(parse(""), Err(MathError::EmptyFormula));
    assert!(matches!(
        parse("2 # 3"),
        Err(MathError::InvalidToken { span: Some(s), .. }) if s == Span::new(2, 3)
    ));
    assert!(matches!(parse("(x + 1"), Err(ref e) if e.is_parse_error()));
    assert!(matches!(parse("1..2"), Err(MathError::InvalidNumber { .. })));
    assert!(matches!(parse("sin(x, y)"), Err(MathError::InvalidSyntax { .. })));
}

#[test]
fn test_errors_display() {
    let err = parse("2 # 3").unwrap_err();
    assert!(err.to_string().contains("position 3"));
    let err = MathError::DivisionByZero;
    assert!(!err.to_string().is_empty());
}
