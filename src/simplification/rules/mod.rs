use crate::Expr;
use rustc_hash::FxHashMap;
use std::sync::Arc;

/// Declare a unit-struct rule and its `Rule` impl in one go
///
/// ```ignore
/// rule!(LnOneRule, "ln_one", 95, Exponential, &[ExprKind::Function], |expr: &Expr| {
///     ...
/// });
/// ```
macro_rules! rule {
    ($(#[$meta:meta])* $name:ident, $label:literal, $priority:expr, $category:ident, $kinds:expr,
     |$expr:ident: &Expr| $body:block) => {
        $(#[$meta])*
        pub(crate) struct $name;

        impl $crate::simplification::rules::Rule for $name {
            fn name(&self) -> &'static str {
                $label
            }

            fn priority(&self) -> i32 {
                $priority
            }

            fn category(&self) -> $crate::simplification::rules::RuleCategory {
                $crate::simplification::rules::RuleCategory::$category
            }

            fn applies_to(&self) -> &'static [$crate::simplification::rules::ExprKind] {
                $kinds
            }

            fn apply(&self, $expr: &$crate::Expr) -> Option<$crate::Expr> $body
        }
    };
}

/// Expression kind for fast rule filtering
/// Rules declare which expression kinds they can apply to
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub(crate) enum ExprKind {
    Literal,
    Variable,
    Add,
    Sub,
    Mul,
    Div,
    Pow,
    Neg,
    Abs,
    Unary,
    Function,
    Log,
    Call,
    Index,
    Group,
    FunctionDef,
    Poly,
    Rational,
}

impl ExprKind {
    const ALL: [ExprKind; 18] = [
        ExprKind::Literal,
        ExprKind::Variable,
        ExprKind::Add,
        ExprKind::Sub,
        ExprKind::Mul,
        ExprKind::Div,
        ExprKind::Pow,
        ExprKind::Neg,
        ExprKind::Abs,
        ExprKind::Unary,
        ExprKind::Function,
        ExprKind::Log,
        ExprKind::Call,
        ExprKind::Index,
        ExprKind::Group,
        ExprKind::FunctionDef,
        ExprKind::Poly,
        ExprKind::Rational,
    ];

    /// Get the kind of an expression (cheap O(1) operation)
    #[inline]
    pub(crate) fn of(expr: &Expr) -> Self {
        match expr {
            Expr::Literal(_) => ExprKind::Literal,
            Expr::Variable(_) => ExprKind::Variable,
            Expr::Add(..) => ExprKind::Add,
            Expr::Sub(..) => ExprKind::Sub,
            Expr::Mul(..) => ExprKind::Mul,
            Expr::Div(..) => ExprKind::Div,
            Expr::Pow(..) => ExprKind::Pow,
            Expr::Neg(_) => ExprKind::Neg,
            Expr::Abs(_) => ExprKind::Abs,
            Expr::Unary { .. } => ExprKind::Unary,
            Expr::Function { .. } => ExprKind::Function,
            Expr::Log { .. } => ExprKind::Log,
            Expr::Call { .. } => ExprKind::Call,
            Expr::Index { .. } => ExprKind::Index,
            Expr::Group(_) => ExprKind::Group,
            Expr::FunctionDef(_) => ExprKind::FunctionDef,
            Expr::Poly(_) => ExprKind::Poly,
            Expr::Rational(_) => ExprKind::Rational,
        }
    }
}

/// Core trait for all simplification rules
pub(crate) trait Rule {
    fn name(&self) -> &'static str;
    fn priority(&self) -> i32;
    fn category(&self) -> RuleCategory;

    /// Which expression kinds this rule can apply to.
    /// Rules will ONLY be checked against expressions matching these kinds.
    fn applies_to(&self) -> &'static [ExprKind];

    fn apply(&self, expr: &Expr) -> Option<Expr>;
}

/// Categories of simplification rules
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum RuleCategory {
    Numeric, // Constant folding, identities
    Algebraic,
    Trigonometric,
    Exponential,
}

// Priority ranges:
// - 90-100: folding and identity laws (x + 0, x * 1, 0 / x, ...)
// - 60-89: sign normalization, like terms, exponent merging, coefficient association
// - 1-59: named identities and function-specific rewrites

pub(crate) type SharedRule = Arc<dyn Rule + Send + Sync>;

/// Numeric simplification rules
pub(crate) mod numeric;

/// Algebraic simplification rules
pub(crate) mod algebraic;

/// Trigonometric simplification rules
pub(crate) mod trigonometric;

/// Exponential and logarithmic simplification rules
pub(crate) mod exponential;

/// Rule Registry indexed by expression kind
pub(crate) struct RuleRegistry {
    pub(crate) rules: Vec<SharedRule>,
    rules_by_kind: FxHashMap<ExprKind, Vec<SharedRule>>,
}

impl RuleRegistry {
    pub(crate) fn new() -> Self {
        Self {
            rules: Vec::new(),
            rules_by_kind: FxHashMap::default(),
        }
    }

    pub(crate) fn load_all_rules(&mut self) {
        self.rules.extend(numeric::get_numeric_rules());
        self.rules.extend(algebraic::get_algebraic_rules());
        self.rules.extend(trigonometric::get_trigonometric_rules());
        self.rules.extend(exponential::get_exponential_rules());

        // Higher priority first; the stable sort keeps category order within a priority
        self.rules.sort_by_key(|r| {
            (
                std::cmp::Reverse(r.priority()),
                match r.category() {
                    RuleCategory::Numeric => 0,
                    RuleCategory::Algebraic => 1,
                    RuleCategory::Trigonometric => 2,
                    RuleCategory::Exponential => 3,
                },
            )
        });
        self.build_kind_index();
    }

    /// Build the index of rules by expression kind
    fn build_kind_index(&mut self) {
        self.rules_by_kind.clear();
        for kind in ExprKind::ALL {
            self.rules_by_kind.insert(kind, Vec::new());
        }

        for rule in &self.rules {
            for &kind in rule.applies_to() {
                if let Some(rules) = self.rules_by_kind.get_mut(&kind) {
                    rules.push(Arc::clone(rule));
                }
            }
        }
    }

    /// Get only rules that apply to a specific expression kind
    #[inline]
    pub(crate) fn get_rules_for_kind(&self, kind: ExprKind) -> &[SharedRule] {
        self.rules_by_kind
            .get(&kind)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_is_sorted_and_indexed() {
        let mut registry = RuleRegistry::new();
        registry.load_all_rules();
        assert!(!registry.rules.is_empty());
        assert!(
            registry
                .rules
                .windows(2)
                .all(|w| w[0].priority() >= w[1].priority())
        );

        let mul_rules = registry.get_rules_for_kind(ExprKind::Mul);
        assert!(mul_rules.iter().any(|r| r.name() == "mul_zero"));
        assert!(mul_rules.iter().all(|r| r.applies_to().contains(&ExprKind::Mul)));
        assert!(registry.get_rules_for_kind(ExprKind::Variable).is_empty());
    }

    #[test]
    fn test_rule_names_are_unique() {
        let mut registry = RuleRegistry::new();
        registry.load_all_rules();
        let mut names: Vec<&str> = registry.rules.iter().map(|r| r.name()).collect();
        names.sort_unstable();
        let before = names.len();
        names.dedup();
        assert_eq!(before, names.len());
    }
}
