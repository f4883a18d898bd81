use crate::simplification::rules::SharedRule;
use std::sync::Arc;

pub(crate) mod basic;
pub(crate) mod identities;

pub(crate) fn get_trigonometric_rules() -> Vec<SharedRule> {
    vec![
        Arc::new(basic::TrigSpecialValueRule),
        Arc::new(basic::TrigParityRule),
        Arc::new(identities::InverseTrigCompositionRule),
        Arc::new(identities::PythagoreanIdentityRule),
    ]
}
