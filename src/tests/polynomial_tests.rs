// Root finding across every degree class, rational functions and polynomial nodes
use crate::{
    Bindings, DK_MAX_ITERATIONS, DK_TOLERANCE, Degree, Expr, MathError, Number, Polynomial,
    RationalFunction, durand_kerner, parse,
};
use num_complex::Complex64;

fn real(re: f64) -> Complex64 {
    Complex64::new(re, 0.0)
}

fn assert_roots(p: &Polynomial, expected: &[Complex64]) {
    let found = p.roots().unwrap();
    assert_eq!(found.len(), expected.len(), "roots of {}: {:?}", p, found);
    for (got, want) in found.iter().zip(expected) {
        assert!(
            (got - want).norm() < 1e-6,
            "roots of {}: got {}, want {}",
            p,
            got,
            want
        );
    }
}

#[test]
fn test_degree_classes() {
    assert_eq!(Polynomial::constant(4).degree_class(), Degree::Constant);
    assert_eq!(Polynomial::linear(2, 1).degree_class(), Degree::Linear);
    assert_eq!(Polynomial::quadratic(1, 0, 1).degree_class(), Degree::Quadratic);
    assert_eq!(Polynomial::cubic(1, 0, 0, 1).degree_class(), Degree::Cubic);
    assert_eq!(
        Polynomial::quartic(1, 0, 0, 0, 1).degree_class(),
        Degree::Quartic
    );
    assert_eq!(
        Polynomial::new([1, 0, 0, 0, 0, 1]).degree_class(),
        Degree::Higher(5)
    );
}

#[test]
fn test_constant_has_no_roots() {
    assert!(Polynomial::constant(7).roots().unwrap().is_empty());
}

#[test]
fn test_linear_root() {
    assert_roots(&Polynomial::linear(2, -4), &[real(2.0)]);
}

#[test]
fn test_quadratic_roots() {
    assert_roots(&Polynomial::quadratic(1, -5, 6), &[real(2.0), real(3.0)]);
    assert_roots(
        &Polynomial::quadratic(1, 0, 1),
        &[Complex64::new(0.0, -1.0), Complex64::new(0.0, 1.0)],
    );
    // Double root keeps its multiplicity
    assert_roots(&Polynomial::quadratic(1, -2, 1), &[real(1.0), real(1.0)]);
}

#[test]
fn test_cubic_roots() {
    assert_roots(
        &Polynomial::new([1, -6, 11, -6]),
        &[real(1.0), real(2.0), real(3.0)],
    );
    // x³ - 1: one real root and a conjugate pair
    let half_root3 = 3f64.sqrt() / 2.0;
    assert_roots(
        &Polynomial::cubic(1, 0, 0, -1),
        &[
            Complex64::new(-0.5, -half_root3),
            Complex64::new(-0.5, half_root3),
            real(1.0),
        ],
    );
    // Triple root
    assert_roots(
        &Polynomial::cubic(1, -3, 3, -1),
        &[real(1.0), real(1.0), real(1.0)],
    );
}

#[test]
fn test_quartic_roots() {
    assert_roots(
        &Polynomial::quartic(1, 0, 0, 0, -1),
        &[
            real(-1.0),
            Complex64::new(0.0, -1.0),
            Complex64::new(0.0, 1.0),
            real(1.0),
        ],
    );
    // (x - 1)(x - 2)(x - 3)(x - 4)
    assert_roots(
        &Polynomial::quartic(1, -10, 35, -50, 24),
        &[real(1.0), real(2.0), real(3.0), real(4.0)],
    );
}

#[test]
fn test_higher_degree_uses_durand_kerner() {
    // (x - 1)(x - 2)(x - 3)(x - 4)(x - 5)
    let p = Polynomial::new([1, -15, 85, -225, 274, -120]);
    assert_roots(&p, &[real(1.0), real(2.0), real(3.0), real(4.0), real(5.0)]);
}

#[test]
fn test_repeated_roots_are_exact() {
    assert_eq!(
        Polynomial::new([1, 0, 0, 0, 0, 0]).find_factors().unwrap(),
        vec!["x"; 5]
    );
    // (x - 1)⁵
    assert_eq!(
        Polynomial::new([1, -5, 10, -10, 5, -1]).find_factors().unwrap(),
        vec!["(x - 1)"; 5]
    );
}

#[test]
fn test_large_roots_converge() {
    let p = Polynomial::new([
        1i64,
        -15_000,
        85_000_000,
        -225_000_000_000,
        274_000_000_000_000,
        -120_000_000_000_000_000,
    ]);
    let found = p.roots().unwrap();
    for (got, want) in found.iter().zip([1e3, 2e3, 3e3, 4e3, 5e3]) {
        assert!((got - real(want)).norm() < 1e-6 * want, "got {}, want {}", got, want);
    }
}

#[test]
fn test_durand_kerner_directly() {
    let coeffs = [real(1.0), real(0.0), real(-2.0)];
    let mut roots = durand_kerner(&coeffs, DK_TOLERANCE, DK_MAX_ITERATIONS).unwrap();
    roots.sort_by(|a, b| a.re.total_cmp(&b.re));
    assert!((roots[0] - real(-(2f64.sqrt()))).norm() < 1e-9);
    assert!((roots[1] - real(2f64.sqrt())).norm() < 1e-9);
}

#[test]
fn test_durand_kerner_reports_non_convergence() {
    let coeffs = [real(1.0), real(0.0), real(0.0), real(0.0), real(0.0), real(-1.0)];
    assert_eq!(
        durand_kerner(&coeffs, DK_TOLERANCE, 0),
        Err(MathError::NonConvergence { iterations: 0 })
    );
}

#[test]
fn test_find_factors() {
    let p = Polynomial::new([1, -6, 11, -6]);
    assert_eq!(
        p.find_factors().unwrap(),
        vec!["(x - 1)", "(x - 2)", "(x - 3)"]
    );
}

#[test]
fn test_polynomial_from_parsed_formula() {
    let expr = parse("(x - 1)(x + 2)").unwrap();
    let p = Polynomial::from_expr(&expr, Some("x")).unwrap();
    assert_eq!(p, Polynomial::new([1, 1, -2]));
    assert_roots(&p, &[real(-2.0), real(1.0)]);
}

#[test]
fn test_polynomial_node_evaluates_in_its_variable() {
    let p = Expr::Poly(Polynomial::with_var([2, 0, -1], "t"));
    let b = Bindings::new().with("t", 3);
    assert_eq!(p.evaluate(&b), Ok(Number::Integer(17)));
    assert_eq!(
        p.evaluate(&Bindings::new()),
        Err(MathError::UnboundVariable("t".to_string()))
    );
}

// ===== Rational functions =====

fn poly(coeffs: &[i64]) -> Expr {
    Expr::Poly(Polynomial::new(coeffs.iter().copied()))
}

#[test]
fn test_rational_exact_division_simplifies_to_quotient() {
    let r = Expr::rational(poly(&[1, -1]), poly(&[1, -1]));
    assert_eq!(r.simplify(), Expr::Poly(Polynomial::new([1])));

    // (x² - 1) / (x - 1) = x + 1
    let r = Expr::rational(poly(&[1, 0, -1]), poly(&[1, -1]));
    assert_eq!(r.simplify(), Expr::Poly(Polynomial::new([1, 1])));
}

#[test]
fn test_rational_cancels_common_factor() {
    let r = Expr::rational(poly(&[1, 0, -1]), poly(&[1, 2, 1]));
    let reduced = r.simplify();
    let Expr::Rational(rf) = &reduced else {
        panic!("expected a rational function, got {}", reduced);
    };
    assert_eq!(rf.numerator(), &poly(&[1, -1]));
    assert_eq!(rf.denominator(), &poly(&[1, 1]));
}

#[test]
fn test_rational_evaluation() {
    let r = Expr::rational(poly(&[1, 0, -1]), poly(&[1, -1]));
    assert_eq!(
        r.evaluate(&Bindings::new().with("x", 3)),
        Ok(Number::Integer(4))
    );
    assert_eq!(
        r.evaluate(&Bindings::new().with("x", 1)),
        Err(MathError::DivisionByZero)
    );
}

#[test]
fn test_rational_division_is_cached() {
    let rf = RationalFunction::new(poly(&[1, 0, -1]), poly(&[1, 1]));
    assert!(!rf.is_divided());
    let (quotient, remainder) = rf.divide().unwrap().clone();
    assert!(rf.is_divided());
    assert_eq!(quotient, Polynomial::new([1, -1]));
    assert!(remainder.is_zero());

    // Clones start over
    assert!(!rf.clone().is_divided());
}

#[test]
fn test_rational_of_non_polynomials_does_not_divide() {
    let x = Expr::symbol("x");
    let rf = RationalFunction::new(x.clone().sin(), x);
    assert!(matches!(
        rf.divide(),
        Err(MathError::UnsupportedOperation(_))
    ));
}
