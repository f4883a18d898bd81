//! Root finding by degree: closed forms up to the quartic, Durand–Kerner above
//!
//! Every solver works in `Complex64` so real and complex coefficients share one
//! code path. Coefficients arrive highest degree first with a non-zero leader.

use num_complex::Complex64;
use num_traits::Zero;

use crate::error::MathError;
use crate::traits::{FLOAT_TOLERANCE, is_zero_complex};

/// Convergence threshold on each correction, relative to the guess it moves
pub const DK_TOLERANCE: f64 = 1e-12;

/// Iteration budget before reporting non-convergence
pub const DK_MAX_ITERATIONS: usize = 500;

/// Remainder coefficients this far below the dividend count as cancelled
const GCD_TOLERANCE: f64 = 1e-9;

/// All roots with multiplicity; roots at zero come straight off the trailing zeros
pub(crate) fn solve(coeffs: &[Complex64]) -> Result<Vec<Complex64>, MathError> {
    if coeffs.len() < 2 {
        return Ok(Vec::new());
    }
    let kept = coeffs.iter().rposition(|c| !c.is_zero()).map_or(0, |i| i + 1);
    let (head, zeros) = coeffs.split_at(kept);
    let mut roots = vec![Complex64::zero(); zeros.len()];
    roots.extend(solve_by_degree(head)?);
    Ok(roots)
}

/// Dispatch on coefficient count
fn solve_by_degree(coeffs: &[Complex64]) -> Result<Vec<Complex64>, MathError> {
    Ok(match coeffs {
        [] | [_] => Vec::new(),
        [a, b] => vec![-*b / *a],
        [a, b, c] => quadratic(*a, *b, *c).to_vec(),
        [a, b, c, d] => cubic(*a, *b, *c, *d).to_vec(),
        [a, b, c, d, e] => quartic(*a, *b, *c, *d, *e).to_vec(),
        _ => match durand_kerner(coeffs, DK_TOLERANCE, DK_MAX_ITERATIONS) {
            Ok(roots) => roots,
            Err(err) => split_repeated(coeffs).ok_or(err)??,
        },
    })
}

/// Roots of `p` through `g = gcd(p, p')`, which holds every root of multiplicity
/// `m` exactly `m - 1` times: the roots of `p / g` (all simple) plus those of `g`.
/// `None` when `p` has no repeated root.
fn split_repeated(coeffs: &[Complex64]) -> Option<Result<Vec<Complex64>, MathError>> {
    let common = poly_gcd(coeffs, &derivative(coeffs));
    if common.len() < 2 {
        return None;
    }
    log::debug!(
        "splitting a degree {} polynomial on a repeated factor of degree {}",
        coeffs.len() - 1,
        common.len() - 1
    );
    let (simple, _) = div_rem(&monic(coeffs), &common);
    Some(solve(&simple).and_then(|mut roots| {
        roots.extend(solve(&common)?);
        Ok(roots)
    }))
}

fn derivative(p: &[Complex64]) -> Vec<Complex64> {
    let n = p.len() - 1;
    p[..n]
        .iter()
        .enumerate()
        .map(|(i, &c)| c * (n - i) as f64)
        .collect()
}

fn monic(p: &[Complex64]) -> Vec<Complex64> {
    let lead = p[0];
    p.iter().map(|c| c / lead).collect()
}

/// Long division; the remainder loses leading coefficients at rounding level
fn div_rem(a: &[Complex64], b: &[Complex64]) -> (Vec<Complex64>, Vec<Complex64>) {
    if a.len() < b.len() {
        return (Vec::new(), a.to_vec());
    }
    let scale = a.iter().map(|c| c.norm()).fold(0.0, f64::max);
    let steps = a.len() - b.len() + 1;
    let mut rem = a.to_vec();
    let mut quot = Vec::with_capacity(steps);
    for i in 0..steps {
        let factor = rem[i] / b[0];
        for (j, d) in b.iter().enumerate() {
            rem[i + j] -= factor * d;
        }
        quot.push(factor);
    }
    let mut remainder = rem.split_off(steps);
    let first = remainder
        .iter()
        .position(|c| c.norm() > GCD_TOLERANCE * scale)
        .unwrap_or(remainder.len());
    remainder.drain(..first);
    (quot, remainder)
}

/// Monic greatest common divisor by Euclid's algorithm
fn poly_gcd(a: &[Complex64], b: &[Complex64]) -> Vec<Complex64> {
    let (mut a, mut b) = (monic(a), monic(b));
    loop {
        let (_, r) = div_rem(&a, &b);
        if r.is_empty() {
            return b;
        }
        a = b;
        b = monic(&r);
    }
}

/// Snap negligible parts to zero and drop negative zeros
pub(crate) fn clean(z: Complex64) -> Complex64 {
    let snap = |v: f64| {
        if v.abs() < FLOAT_TOLERANCE {
            0.0
        } else {
            v + 0.0
        }
    };
    Complex64::new(snap(z.re), snap(z.im))
}

fn quadratic(a: Complex64, b: Complex64, c: Complex64) -> [Complex64; 2] {
    let disc = (b * b - a * c * 4.0).sqrt();
    let two_a = a * 2.0;
    [(-b - disc) / two_a, (-b + disc) / two_a]
}

/// Cardano's formula on the depressed cubic `t³ + pt + q`, `x = t - b/3a`
fn cubic(a: Complex64, b: Complex64, c: Complex64, d: Complex64) -> [Complex64; 3] {
    let (b, c, d) = (b / a, c / a, d / a);
    let shift = b / 3.0;
    let p = c - b * b / 3.0;
    let q = b * b * b * (2.0 / 27.0) - b * c / 3.0 + d;

    if is_zero_complex(p) && is_zero_complex(q) {
        return [-shift; 3];
    }

    // Pick the branch of the square root that keeps the cube-root argument large
    let s = (q * q / 4.0 + p * p * p / 27.0).sqrt();
    let plus = -q / 2.0 + s;
    let minus = -q / 2.0 - s;
    let u = if plus.norm() >= minus.norm() { plus } else { minus };
    let big_c = u.powf(1.0 / 3.0);

    // primitive cube root of unity
    let omega = Complex64::new(-0.5, 3f64.sqrt() / 2.0);
    let mut roots = [Complex64::new(0.0, 0.0); 3];
    let mut branch = Complex64::new(1.0, 0.0);
    for root in &mut roots {
        let ck = branch * big_c;
        let t = if is_zero_complex(ck) { ck } else { ck - p / (ck * 3.0) };
        *root = t - shift;
        branch *= omega;
    }
    roots
}

/// Ferrari's method through the resolvent cubic
fn quartic(a: Complex64, b: Complex64, c: Complex64, d: Complex64, e: Complex64) -> [Complex64; 4] {
    let (b, c, d, e) = (b / a, c / a, d / a, e / a);
    let shift = b / 4.0;
    let b2 = b * b;
    let p = c - b2 * (3.0 / 8.0);
    let q = d - b * c / 2.0 + b2 * b / 8.0;
    let r = e - b * d / 4.0 + b2 * c / 16.0 - b2 * b2 * (3.0 / 256.0);

    let one = Complex64::new(1.0, 0.0);
    let ys: [Complex64; 4] = if is_zero_complex(q) {
        // Biquadratic: y⁴ + p y² + r = 0
        let [z1, z2] = quadratic(one, p, r);
        let (s1, s2) = (z1.sqrt(), z2.sqrt());
        [s1, -s1, s2, -s2]
    } else {
        // m³ + p m² + (p²/4 - r) m - q²/8 = 0 has a non-zero root because q ≠ 0
        let resolvent = cubic(one, p, p * p / 4.0 - r, -(q * q) / 8.0);
        let m = resolvent
            .into_iter()
            .max_by(|x, y| x.norm().total_cmp(&y.norm()))
            .unwrap_or(one);
        let s = (m * 2.0).sqrt();
        let half = p / 2.0 + m;
        let correction = q / (s * 2.0);
        let [y1, y2] = quadratic(one, s, half - correction);
        let [y3, y4] = quadratic(one, -s, half + correction);
        [y1, y2, y3, y4]
    };
    ys.map(|y| y - shift)
}

/// Power of two at or above the largest `|cₖ/c₀|^(1/k)`; every root lies within
/// twice this radius and dividing by it is exact
fn root_radius(coeffs: &[Complex64]) -> f64 {
    let lead = coeffs[0].norm();
    let bound = coeffs
        .iter()
        .enumerate()
        .skip(1)
        .map(|(k, c)| (c.norm() / lead).powf(1.0 / k as f64))
        .fold(0.0, f64::max);
    if bound > 0.0 && bound.is_finite() {
        2f64.powi(bound.log2().ceil() as i32)
    } else {
        1.0
    }
}

/// Durand–Kerner simultaneous iteration for all roots at once
///
/// Works on `y = x / r` for a power-of-two root radius `r` and starts from the
/// guesses `(0.4 + 0.9i)^k`. A sweep converges when every guess moved by less
/// than `tolerance` relative to its size. A guess that could not be updated
/// never counts as converged.
pub fn durand_kerner(
    coeffs: &[Complex64],
    tolerance: f64,
    max_iterations: usize,
) -> Result<Vec<Complex64>, MathError> {
    let Some(&lead) = coeffs.first() else {
        return Ok(Vec::new());
    };
    if is_zero_complex(lead) {
        return Err(MathError::UnsupportedOperation(
            "leading coefficient must be non-zero".to_string(),
        ));
    }
    let degree = coeffs.len() - 1;
    let radius = root_radius(coeffs);
    let scaled: Vec<Complex64> = coeffs
        .iter()
        .enumerate()
        .map(|(k, c)| c / lead / radius.powi(k as i32))
        .collect();
    let eval = |z: Complex64| scaled.iter().fold(Complex64::zero(), |acc, &c| acc * z + c);

    let seed = Complex64::new(0.4, 0.9);
    let mut guesses: Vec<Complex64> = (0..degree).map(|k| seed.powu(k as u32)).collect();

    for iteration in 1..=max_iterations {
        let mut converged = true;
        for i in 0..degree {
            let zi = guesses[i];
            let denom = guesses
                .iter()
                .enumerate()
                .filter(|&(j, _)| j != i)
                .fold(Complex64::new(1.0, 0.0), |acc, (_, &zj)| acc * (zi - zj));
            if denom.is_zero() {
                // Coincident guesses: push this one off and sweep again
                guesses[i] = zi + seed * tolerance.sqrt() * zi.norm().max(1.0);
                converged = false;
                continue;
            }
            let delta = eval(zi) / denom;
            let next = zi - delta;
            if !next.is_finite() {
                log::warn!("durand-kerner diverged after {} iterations", iteration);
                return Err(MathError::NonConvergence {
                    iterations: iteration,
                });
            }
            if delta.norm() > tolerance * zi.norm().max(1.0) {
                converged = false;
            }
            guesses[i] = next;
        }
        if converged {
            log::debug!("durand-kerner converged after {} iterations", iteration);
            return Ok(guesses.into_iter().map(|y| y * radius).collect());
        }
    }

    log::warn!(
        "durand-kerner gave up on a degree {} polynomial after {} iterations",
        degree,
        max_iterations
    );
    Err(MathError::NonConvergence {
        iterations: max_iterations,
    })
}
