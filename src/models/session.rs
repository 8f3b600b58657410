//! Modelos de autenticación
//!
//! Sesiones opacas mantenidas en el servidor y la cuenta contra la que se
//! verifican credenciales. El token viaja en una cookie; el estado vive aquí.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Sesión activa emitida por un login exitoso
#[derive(Debug, Clone)]
pub struct Session {
    pub token: Uuid,
    pub username: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub last_activity: DateTime<Utc>,
}

impl Session {
    pub fn new(username: String, ttl: chrono::Duration) -> Self {
        let now = Utc::now();
        Self {
            token: Uuid::new_v4(),
            username,
            created_at: now,
            expires_at: now + ttl,
            last_activity: now,
        }
    }

    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }
}

/// Cuenta registrada contra la que se valida el par usuario/contraseña
#[derive(Debug, Clone)]
pub struct Account {
    pub username: String,
    pub password_hash: String,
}

/// Principal autenticado que se inyecta en las requests protegidas
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub username: String,
    pub session_token: Uuid,
}
