//! Shared harness for this crate's unit tests: a tiny compiler session
//! with a recording evaluator.

#![expect(clippy::unwrap_used, reason = "tests use unwrap for brevity")]

use std::sync::Arc;

use parking_lot::Mutex;

use lyra_attr::{AttrContext, AttrError, AttributeRegistry};
use lyra_ir::{
    AttrArg, ConstEvaluator, Environment, EvalFailure, IoAction, ModuleId, Name, PathResolver, Ty,
};

use crate::attr::{register_init_attrs, InitAttrs};

/// Evaluator that logs every executed initializer and fails on request.
pub(crate) struct RecordingEvaluator {
    log: Arc<Mutex<Vec<Name>>>,
    fail_on: Vec<Name>,
}

impl RecordingEvaluator {
    pub(crate) fn new() -> Self {
        RecordingEvaluator {
            log: Arc::new(Mutex::new(Vec::new())),
            fail_on: Vec::new(),
        }
    }

    pub(crate) fn failing_on(decl: &str) -> Self {
        let mut eval = RecordingEvaluator::new();
        eval.fail_on.push(Name::from_dotted(decl));
        eval
    }

    /// The initializers executed so far, in order, as display strings.
    pub(crate) fn executed(&self) -> Vec<String> {
        self.log.lock().iter().map(ToString::to_string).collect()
    }
}

impl ConstEvaluator for RecordingEvaluator {
    fn eval_closed_const(
        &self,
        _env: &Environment,
        name: &Name,
    ) -> Result<IoAction, EvalFailure> {
        let log = Arc::clone(&self.log);
        let fail = self.fail_on.contains(name);
        let name = name.clone();
        Ok(IoAction::new(move || {
            log.lock().push(name);
            if fail {
                Err(EvalFailure::new("initializer exploded"))
            } else {
                Ok(())
            }
        }))
    }
}

/// A one-environment compiler session with both init attributes
/// registered.
pub(crate) struct Session {
    pub(crate) env: Environment,
    pub(crate) registry: AttributeRegistry,
    pub(crate) attrs: InitAttrs,
    pub(crate) eval: RecordingEvaluator,
}

impl Session {
    pub(crate) fn new() -> Self {
        let mut registry = AttributeRegistry::new();
        let attrs = register_init_attrs(&mut registry).unwrap();
        Session {
            env: Environment::new(),
            registry,
            attrs,
            eval: RecordingEvaluator::new(),
        }
    }

    pub(crate) fn begin(&mut self, module: &str) {
        self.env.begin_module(Name::root(module)).unwrap();
    }

    pub(crate) fn decl(&mut self, name: &str, ty: Ty) {
        self.env.add_const(Name::from_dotted(name), ty).unwrap();
    }

    /// Apply `attr` to `decl`, as the elaborator would.
    pub(crate) fn apply(
        &mut self,
        attr: &str,
        decl: &str,
        arg: Option<AttrArg>,
    ) -> Result<(), AttrError> {
        let mut ctx = AttrContext::new(&mut self.env, &PathResolver, &self.eval);
        self.registry
            .apply(&mut ctx, attr, &Name::from_dotted(decl), arg.as_ref(), true)
    }

    /// Close the open module and commit every attribute's pending table.
    pub(crate) fn end_commit(&mut self) -> ModuleId {
        let id = self.env.end_module().unwrap();
        self.registry.commit_module(id).unwrap();
        id
    }

    /// Run the post-import hooks for `module`.
    pub(crate) fn after_import(&mut self, module: ModuleId) -> Result<(), AttrError> {
        let mut ctx = AttrContext::new(&mut self.env, &PathResolver, &self.eval);
        self.registry.after_import(&mut ctx, module)
    }
}

/// `arg` wrapped as an identifier attribute argument.
pub(crate) fn ident_arg(name: &str) -> Option<AttrArg> {
    Some(AttrArg::Ident(Name::from_dotted(name)))
}
