//! Simplification framework - reduces expressions
pub(crate) mod engine;
pub(crate) mod helpers;
mod rules;

use crate::Expr;

impl Expr {
    /// Rewrite to a fixpoint with the default limits
    ///
    /// Folding, identity laws, exponent merging and the named identities run
    /// bottom-up until a full pass changes nothing. Simplifying the result
    /// again returns it unchanged.
    pub fn simplify(&self) -> Expr {
        engine::Simplifier::new().simplify(self)
    }
}
