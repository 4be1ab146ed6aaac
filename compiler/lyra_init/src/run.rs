//! Startup execution of a module's registered initializers.

use lyra_ir::{ConstEvaluator, Environment, ModuleId, Name};

use crate::attr::InitAttrs;
use crate::errors::InitRunError;

/// Run every initializer registered for `module`'s declarations, in the
/// module's declared source order.
///
/// For each tagged declaration the resolved initializer (the declaration
/// itself, or its explicit target) is evaluated to an action and
/// executed. The first failing initializer aborts the remainder of the
/// module and is returned; effects of initializers that already ran are
/// not undone.
#[tracing::instrument(level = "debug", skip_all, fields(module = %env.module(module).name))]
pub fn run_module_inits(
    env: &Environment,
    evaluator: &dyn ConstEvaluator,
    attrs: &InitAttrs,
    module: ModuleId,
) -> Result<(), InitRunError> {
    for decl in &env.module(module).decls {
        let Some(init_fn) = attrs.init_fn_name_for(env, decl) else {
            continue;
        };
        tracing::trace!(decl = %decl, init_fn = %init_fn, "running initializer");
        let action = evaluator
            .eval_closed_const(env, &init_fn)
            .map_err(|source| failure(decl, source))?;
        action.run().map_err(|source| failure(decl, source))?;
    }
    Ok(())
}

fn failure(decl: &Name, source: lyra_ir::EvalFailure) -> InitRunError {
    InitRunError::InitializationFailure {
        decl: decl.clone(),
        source,
    }
}
