// storefront/src/operations/auth.rs

use crate::error::{PipelineError, StoreError, StoreResult};
use crate::models::User;
use crate::operations::contexts::{RegisterCtxData, SignInCtxData};
use crate::persistence::KeyValueStore;
use crate::pipeline::{Pipeline, PipelineControl};
use crate::repository::Repository;
use crate::storefront::Storefront;
use tracing::{debug, info, instrument, warn};

pub(crate) fn sign_in_pipeline() -> Result<Pipeline<SignInCtxData, StoreError>, PipelineError> {
  let mut p = Pipeline::<SignInCtxData, StoreError>::new(&[
    ("validate_signin_input", false, None),
    ("find_user", false, None),
  ]);

  p.on_root("validate_signin_input", |ctx: &mut SignInCtxData| -> Result<PipelineControl, StoreError> {
    ctx.username = ctx.username.trim().to_string();
    if ctx.username.is_empty() {
      return Err(StoreError::Validation("Enter a username.".to_string()));
    }
    Ok(PipelineControl::Continue)
  })?;

  p.on_root("find_user", |ctx: &mut SignInCtxData| -> Result<PipelineControl, StoreError> {
    let user = ctx
      .users
      .iter()
      .find(|u| u.username == ctx.username)
      .cloned()
      .ok_or_else(|| StoreError::NotFound(format!("user '{}'. Try 'admin' or 'alice'.", ctx.username)))?;
    debug!(username = %user.username, role = ?user.role, "User found.");
    ctx.signed_in_user = Some(user);
    Ok(PipelineControl::Continue)
  })?;

  Ok(p)
}

pub(crate) fn register_pipeline() -> Result<Pipeline<RegisterCtxData, StoreError>, PipelineError> {
  let mut p = Pipeline::<RegisterCtxData, StoreError>::new(&[
    ("validate_register_input", false, None),
    ("check_existing_user", false, None),
    ("create_user", false, None),
  ]);

  p.on_root("validate_register_input", |ctx: &mut RegisterCtxData| -> Result<PipelineControl, StoreError> {
    ctx.username = ctx.username.trim().to_string();
    ctx.name = ctx.name.trim().to_string();
    if ctx.username.is_empty() || ctx.name.is_empty() {
      warn!("Registration rejected: missing username or name.");
      return Err(StoreError::Validation("Fill both username and name.".to_string()));
    }
    Ok(PipelineControl::Continue)
  })?;

  p.on_root("check_existing_user", |ctx: &mut RegisterCtxData| -> Result<PipelineControl, StoreError> {
    if ctx.users.iter().any(|u| u.username == ctx.username) {
      warn!(username = %ctx.username, "Registration rejected: username taken.");
      return Err(StoreError::Validation("Username exists. Choose another.".to_string()));
    }
    debug!(username = %ctx.username, "Username is available.");
    Ok(PipelineControl::Continue)
  })?;

  p.on_root("create_user", |ctx: &mut RegisterCtxData| -> Result<PipelineControl, StoreError> {
    let user = User::customer(ctx.username.clone(), ctx.name.clone());
    ctx.users.push(user.clone());
    ctx.created_user = Some(user);
    Ok(PipelineControl::Continue)
  })?;

  Ok(p)
}

impl<S: KeyValueStore> Storefront<S> {
  /// Signs in as an existing user and switches to their cart.
  #[instrument(name = "Storefront::login", skip(self))]
  pub fn login(&mut self, username: &str) -> StoreResult<User> {
    self.state.users = self.repos.users.load(&mut self.store);
    let mut ctx = SignInCtxData {
      username: username.to_string(),
      users: self.state.users.clone(),
      signed_in_user: None,
    };
    self.pipelines.sign_in.run(&mut ctx)?;

    let user = ctx
      .signed_in_user
      .ok_or_else(|| StoreError::Validation("Sign-in did not complete.".to_string()))?;
    self.open_session(user.clone());
    Ok(user)
  }

  /// Creates a customer account and signs in as it.
  #[instrument(name = "Storefront::register", skip(self))]
  pub fn register(&mut self, username: &str, name: &str) -> StoreResult<User> {
    self.state.users = self.repos.users.load(&mut self.store);
    let mut ctx = RegisterCtxData {
      username: username.to_string(),
      name: name.to_string(),
      users: self.state.users.clone(),
      created_user: None,
    };
    self.pipelines.register.run(&mut ctx)?;

    let user = ctx
      .created_user
      .ok_or_else(|| StoreError::Validation("Registration did not complete.".to_string()))?;
    self.save_users(ctx.users)?;
    info!(username = %user.username, "Registered new customer.");
    self.open_session(user.clone());
    Ok(user)
  }

  /// Ends the session. The in-memory cart is dropped; stored carts stay as they are.
  pub fn logout(&mut self) {
    if let Some(user) = self.session.current_user() {
      info!(username = %user.username, "Logged out.");
    }
    self.session.close();
    self.state.cart.clear();
  }

  fn open_session(&mut self, user: User) {
    self.state.cart = Repository::cart(&user.username).load(&mut self.store);
    info!(username = %user.username, role = ?user.role, cart_lines = self.state.cart.len(), "Session opened.");
    self.session.open(user);
  }
}
