use crate::simplification::rules::SharedRule;
use std::sync::Arc;

pub(crate) mod abs_sign;
pub(crate) mod canonicalization;
pub(crate) mod combination;
pub(crate) mod fractions;
/// Algebraic simplification rules
pub(crate) mod identities;
pub(crate) mod powers;

/// Get all algebraic rules in priority order
pub(crate) fn get_algebraic_rules() -> Vec<SharedRule> {
    vec![
        // Structure
        Arc::new(canonicalization::GroupUnwrapRule),
        Arc::new(canonicalization::UnaryPlusRule),
        // Fraction rules
        Arc::new(fractions::RationalReduceRule),
        // Absolute value and sign rules
        Arc::new(abs_sign::AbsNumericRule),
        Arc::new(abs_sign::AbsAbsRule),
        Arc::new(abs_sign::DoubleNegRule),
        Arc::new(abs_sign::NegMulRule),
        Arc::new(abs_sign::NegDivRule),
        Arc::new(abs_sign::NegativeCoefficientRule),
        // Canonicalization rules
        Arc::new(canonicalization::NormalizeAddNegationRule),
        Arc::new(canonicalization::CanonicalizeMultiplicationRule),
        Arc::new(canonicalization::CoefficientAssociationRule),
        Arc::new(canonicalization::CoefficientCancellationRule),
        // Combination rules
        Arc::new(combination::CombineLikeTermsRule),
        // Power rules
        Arc::new(powers::PowerCollectionRule),
        // Named identities
        Arc::new(identities::PerfectSquareRule),
        Arc::new(identities::DifferenceOfSquaresRule),
    ]
}
