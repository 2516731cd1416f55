// storefront/src/pipeline/execution.rs

//! Contains the `Pipeline::run()` method, responsible for executing the
//! pipeline's steps and handlers against a mutable context.

use crate::error::PipelineError;
use crate::pipeline::control::{PipelineControl, PipelineResult};
use crate::pipeline::definition::{Handler, Pipeline};
use tracing::{event, instrument, span, Level};

/// Result of one phase (`before`, `on` or `after`) of a step.
enum PhaseOutcome {
  Continue,
  Stopped,
}

impl<T, Err> Pipeline<T, Err>
where
  Err: From<PipelineError> + std::fmt::Display,
{
  /// Executes the pipeline against `ctx`.
  ///
  /// Steps run in declaration order. A step whose `skip_if` condition holds is
  /// skipped. A non-optional step without any handler fails the run with
  /// `PipelineError::HandlerMissing`. The first handler error aborts the run
  /// and is returned as-is; a handler returning `Stop` ends the run with
  /// `PipelineResult::Stopped`.
  #[instrument(
    name = "Pipeline::run",
    skip_all,
    fields(
      pipeline_context_type = %std::any::type_name::<T>(),
      num_steps = self.steps.len(),
    ),
    err(Display)
  )]
  pub fn run(&self, ctx: &mut T) -> Result<PipelineResult, Err> {
    event!(Level::DEBUG, "Pipeline execution starting.");

    for (step_idx, step_def) in self.steps.iter().enumerate() {
      let step_name = step_def.name.as_str();

      let step_span = span!(
        Level::INFO,
        "pipeline_step_execution",
        step_name = step_name,
        step_index = step_idx,
        optional = step_def.optional
      );
      let _step_span_guard = step_span.enter();

      if let Some(skip_cond_fn) = &step_def.skip_if {
        if skip_cond_fn(&*ctx) {
          event!(Level::DEBUG, "Step skipped due to 'skip_if' condition.");
          continue;
        }
      }

      let before = self.before.get(step_name).filter(|v| !v.is_empty());
      let on = self.on.get(step_name).filter(|v| !v.is_empty());
      let after = self.after.get(step_name).filter(|v| !v.is_empty());

      if before.is_none() && on.is_none() && after.is_none() {
        if step_def.optional {
          event!(Level::DEBUG, "Optional step has no handlers, skipping.");
          continue;
        }
        event!(Level::ERROR, "Non-optional step has no handlers.");
        return Err(Err::from(PipelineError::HandlerMissing {
          step_name: step_def.name.clone(),
        }));
      }

      for (phase, handlers) in [("before", before), ("on", on), ("after", after)] {
        let Some(handlers) = handlers else { continue };
        if let PhaseOutcome::Stopped = run_phase(phase, handlers, ctx)? {
          event!(Level::INFO, phase, "Pipeline stopped by a handler.");
          return Ok(PipelineResult::Stopped);
        }
      }
      event!(Level::DEBUG, "Step processing finished successfully.");
    }

    event!(Level::DEBUG, "Pipeline execution completed successfully.");
    Ok(PipelineResult::Completed)
  }
}

fn run_phase<T, Err: std::fmt::Display>(
  phase: &'static str,
  handlers: &[Handler<T, Err>],
  ctx: &mut T,
) -> Result<PhaseOutcome, Err> {
  for (handler_idx, handler_fn) in handlers.iter().enumerate() {
    let handler_span = span!(Level::DEBUG, "handler", phase, handler_index = handler_idx);
    let _handler_span_guard = handler_span.enter();
    match handler_fn(ctx) {
      Ok(PipelineControl::Continue) => {}
      Ok(PipelineControl::Stop) => return Ok(PhaseOutcome::Stopped),
      Err(e) => {
        event!(Level::WARN, error = %e, phase, "handler failed.");
        return Err(e);
      }
    }
  }
  Ok(PhaseOutcome::Continue)
}
