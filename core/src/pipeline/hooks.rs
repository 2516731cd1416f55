// storefront/src/pipeline/hooks.rs

//! Registration of `before`, `on` and `after` handlers for pipeline steps.

use crate::error::PipelineError;
use crate::pipeline::control::PipelineControl;
use crate::pipeline::definition::{Handler, Pipeline};

impl<T, Err> Pipeline<T, Err>
where
  T: 'static,
  Err: From<PipelineError> + 'static,
{
  /// Registers a `before` hook for a given step.
  ///
  /// The handler may return any error type convertible into the pipeline's `Err`.
  pub fn before_root<UserErr>(
    &mut self,
    step_name: &str,
    handler_fn: impl Fn(&mut T) -> Result<PipelineControl, UserErr> + 'static,
  ) -> Result<(), PipelineError>
  where
    UserErr: Into<Err>,
  {
    self.position_of(step_name)?;
    let handler = wrap_handler(handler_fn);
    self.before.entry(step_name.to_string()).or_default().push(handler);
    Ok(())
  }

  /// Registers an `on` hook for a given step.
  pub fn on_root<UserErr>(
    &mut self,
    step_name: &str,
    handler_fn: impl Fn(&mut T) -> Result<PipelineControl, UserErr> + 'static,
  ) -> Result<(), PipelineError>
  where
    UserErr: Into<Err>,
  {
    self.position_of(step_name)?;
    let handler = wrap_handler(handler_fn);
    self.on.entry(step_name.to_string()).or_default().push(handler);
    Ok(())
  }

  /// Registers an `after` hook for a given step.
  pub fn after_root<UserErr>(
    &mut self,
    step_name: &str,
    handler_fn: impl Fn(&mut T) -> Result<PipelineControl, UserErr> + 'static,
  ) -> Result<(), PipelineError>
  where
    UserErr: Into<Err>,
  {
    self.position_of(step_name)?;
    let handler = wrap_handler(handler_fn);
    self.after.entry(step_name.to_string()).or_default().push(handler);
    Ok(())
  }
}

fn wrap_handler<T: 'static, Err: 'static, UserErr: Into<Err>>(
  handler_fn: impl Fn(&mut T) -> Result<PipelineControl, UserErr> + 'static,
) -> Handler<T, Err> {
  Box::new(move |ctx: &mut T| handler_fn(ctx).map_err(Into::into))
}
