//! The context attribute callbacks run in.

use lyra_ir::{ConstEvaluator, Environment, GlobalResolver};

/// Everything an attribute's validate/apply logic may touch: the mutable
/// environment plus the session's resolver and evaluator, behind their
/// narrow traits.
///
/// Callbacks run sequentially and non-reentrantly; a failure aborts the
/// current attribute application and is not retried.
pub struct AttrContext<'a> {
    /// The session environment, mutable while the open module elaborates.
    pub env: &'a mut Environment,
    /// Resolves identifier arguments to global constants.
    pub resolver: &'a dyn GlobalResolver,
    /// Evaluates closed constants, for attributes with import-time effects.
    pub evaluator: &'a dyn ConstEvaluator,
}

impl<'a> AttrContext<'a> {
    /// Bundle the session's collaborators.
    pub fn new(
        env: &'a mut Environment,
        resolver: &'a dyn GlobalResolver,
        evaluator: &'a dyn ConstEvaluator,
    ) -> Self {
        AttrContext {
            env,
            resolver,
            evaluator,
        }
    }
}
