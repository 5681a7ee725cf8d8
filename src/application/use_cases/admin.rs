use std::sync::Arc;

use tracing::{instrument, warn};

use crate::{
    app_error::{AppError, AppResult},
    application::ports::admin_auth::AdminAuth,
};

#[derive(Clone)]
pub struct AdminUseCases {
    auth: Arc<dyn AdminAuth>,
}

impl AdminUseCases {
    pub fn new(auth: Arc<dyn AdminAuth>) -> Self {
        Self { auth }
    }

    /// Check a password typed into the admin login form. The password is
    /// compared exactly as typed, surrounding whitespace included.
    #[instrument(skip_all)]
    pub fn login(&self, password: Option<&str>) -> AppResult<()> {
        let Some(password) = password.filter(|p| !p.is_empty()) else {
            return Err(AppError::InvalidInput("Password required".into()));
        };

        if !self.auth.verify(password) {
            warn!("Rejected admin login attempt");
            return Err(AppError::InvalidCredentials);
        }
        Ok(())
    }

    /// Gate for admin-only operations. Missing and wrong secrets are treated alike.
    pub fn authorize(&self, secret: Option<&str>) -> AppResult<()> {
        match secret {
            Some(secret) if self.auth.verify(secret) => Ok(()),
            _ => Err(AppError::InvalidCredentials),
        }
    }
}
