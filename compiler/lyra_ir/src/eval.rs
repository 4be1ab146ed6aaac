//! The constant evaluator, consumed through a narrow trait.
//!
//! The attribute subsystem never interprets terms itself. It asks the
//! runtime to evaluate a closed constant of type `IO _` and gets back an
//! [`IoAction`] it can run exactly once.

use std::fmt;

use crate::{Environment, Name};

/// Opaque failure raised by the runtime while evaluating or running an
/// effectful action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvalFailure {
    message: Box<str>,
}

impl EvalFailure {
    /// A failure with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        EvalFailure {
            message: message.into().into_boxed_str(),
        }
    }

    /// The runtime's message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for EvalFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for EvalFailure {}

/// A runnable effectful action, the runtime value of a closed `IO _`
/// constant. Running consumes the action; effects are not undone on
/// failure.
pub struct IoAction(Box<dyn FnOnce() -> Result<(), EvalFailure> + Send>);

impl IoAction {
    /// Wrap a closure as an action.
    pub fn new(action: impl FnOnce() -> Result<(), EvalFailure> + Send + 'static) -> Self {
        IoAction(Box::new(action))
    }

    /// An action that does nothing.
    pub fn noop() -> Self {
        IoAction::new(|| Ok(()))
    }

    /// Execute the action's effects.
    pub fn run(self) -> Result<(), EvalFailure> {
        (self.0)()
    }
}

impl fmt::Debug for IoAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("IoAction")
    }
}

/// Evaluates closed constants to runnable actions.
pub trait ConstEvaluator {
    /// Evaluate the global constant `name` (closed, of type `IO _`) to a
    /// runnable action. Evaluation itself performs no effects.
    fn eval_closed_const(
        &self,
        env: &Environment,
        name: &Name,
    ) -> Result<IoAction, EvalFailure>;
}
