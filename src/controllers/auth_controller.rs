//! Controller de autenticación
//!
//! Login y logout. El login es el único camino que crea sesiones; el error
//! de credenciales vuelve a la vista como mensaje inline, nunca como redirect.

use std::sync::Arc;

use crate::models::session::Session;
use crate::services::session_service::SessionService;
use crate::state::AppState;
use crate::utils::errors::{AppError, AppResult};

/// Resultado del envío del formulario de login
pub enum LoginResult {
    LoggedIn(Session),
    Rejected { message: String },
}

pub struct AuthController {
    sessions: Arc<SessionService>,
}

impl AuthController {
    pub fn new(state: &AppState) -> Self {
        Self {
            sessions: Arc::clone(&state.sessions),
        }
    }

    pub async fn login(&self, username: &str, password: &str) -> AppResult<LoginResult> {
        match self.sessions.authenticate(username, password).await {
            Ok(session) => Ok(LoginResult::LoggedIn(session)),
            Err(AppError::InvalidCredentials) => Ok(LoginResult::Rejected {
                message: "Неверное имя пользователя или пароль.".to_string(),
            }),
            Err(e) => Err(e),
        }
    }

    pub async fn logout(&self, token: &str) {
        self.sessions.destroy(token).await;
    }
}
