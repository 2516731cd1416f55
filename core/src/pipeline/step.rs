// storefront/src/pipeline/step.rs

//! Defines the structure for a single step within a pipeline.

use std::rc::Rc;

/// Evaluated against the context before a step runs. Returning `true` skips the step.
pub type SkipCondition<T> = Rc<dyn Fn(&T) -> bool>;

/// Definition of a pipeline step: its name, optionality and skip condition.
#[derive(Clone)]
pub struct StepDef<T> {
  pub name: String,
  pub optional: bool,
  pub skip_if: Option<SkipCondition<T>>,
}

impl<T> std::fmt::Debug for StepDef<T> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("StepDef")
      .field("name", &self.name)
      .field("optional", &self.optional)
      .field("skip_if_present", &self.skip_if.is_some())
      .finish()
  }
}
