//! Core simplification engine with rule-based architecture
//!
//! Implements bottom-up tree traversal, rule application by expression kind,
//! cycle detection, and configurable limits (iterations, depth).

use super::rules::{ExprKind, RuleRegistry};
use crate::Expr;
use rustc_hash::{FxHashSet, FxHasher};
use std::hash::{Hash, Hasher};
use std::sync::OnceLock;

/// Global rule registry singleton - built once, reused across all simplifications
fn global_registry() -> &'static RuleRegistry {
    static REGISTRY: OnceLock<RuleRegistry> = OnceLock::new();
    REGISTRY.get_or_init(|| {
        let mut registry = RuleRegistry::new();
        registry.load_all_rules();
        log::debug!("loaded {} simplification rules", registry.rules.len());
        registry
    })
}

/// Structural hash used for cycle detection
fn fingerprint(expr: &Expr) -> u64 {
    let mut hasher = FxHasher::default();
    expr.hash(&mut hasher);
    hasher.finish()
}

/// Main simplification engine with rule-based architecture
pub(crate) struct Simplifier {
    max_iterations: usize,
    max_depth: usize,
}

impl Default for Simplifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Simplifier {
    pub(crate) fn new() -> Self {
        Self {
            max_iterations: 1000,
            max_depth: usize::MAX,
        }
    }

    pub(crate) fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub(crate) fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Rewrite until a full pass changes nothing
    pub(crate) fn simplify(&self, expr: &Expr) -> Expr {
        let mut current = expr.clone();
        let mut seen: FxHashSet<u64> = FxHashSet::default();
        let mut iterations = 0;

        loop {
            if iterations >= self.max_iterations {
                log::warn!(
                    "simplification exceeded maximum iterations ({})",
                    self.max_iterations
                );
                break;
            }

            let next = self.apply_rules_bottom_up(&current, 0);
            if next == current {
                log::debug!("simplification settled after {} passes", iterations + 1);
                break;
            }

            // Inserted after the comparison so the first rewrite never looks like a cycle
            if !seen.insert(fingerprint(&next)) {
                log::warn!("simplification cycle detected at {}", next);
                current = next;
                break;
            }

            current = next;
            iterations += 1;
        }

        current
    }

    /// Children first, then the node itself
    fn apply_rules_bottom_up(&self, expr: &Expr, depth: usize) -> Expr {
        if depth > self.max_depth {
            return expr.clone();
        }
        let rebuilt = expr.map_children(|child| self.apply_rules_bottom_up(child, depth + 1));
        self.apply_rules_to_node(rebuilt)
    }

    /// Apply every rule registered for the node's kind, in priority order
    fn apply_rules_to_node(&self, mut current: Expr) -> Expr {
        for rule in global_registry().get_rules_for_kind(ExprKind::of(&current)) {
            // A rewrite may change the kind; later rules must still match it
            if !rule.applies_to().contains(&ExprKind::of(&current)) {
                continue;
            }
            if let Some(next) = rule.apply(&current) {
                log::trace!("{}: {} => {}", rule.name(), current, next);
                current = next;
            }
        }
        current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reaches_fixpoint() {
        let x = Expr::symbol("x");
        // ((x + 0) * 1) ^ 1
        let expr = Expr::pow(
            Expr::mul(Expr::add(x.clone(), Expr::int(0)), Expr::int(1)),
            Expr::int(1),
        );
        assert_eq!(Simplifier::new().simplify(&expr), x);
    }

    #[test]
    fn test_iteration_cap() {
        let x = Expr::symbol("x");
        let expr = Expr::add(Expr::mul(x.clone(), Expr::int(1)), Expr::int(0));
        // A zero cap returns the input untouched
        assert_eq!(
            Simplifier::new().with_max_iterations(0).simplify(&expr),
            expr
        );
    }

    #[test]
    fn test_depth_limit_stops_descent() {
        let x = Expr::symbol("x");
        let expr = Expr::add(x.clone(), Expr::int(0)).neg();
        // Depth 0 only visits the root, which has no rule to fire
        assert_eq!(Simplifier::new().with_max_depth(0).simplify(&expr), expr);
        assert_eq!(Simplifier::new().simplify(&expr), x.neg());
    }
}
