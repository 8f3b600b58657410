//! Servicio de sesiones
//!
//! Valida credenciales contra el registro de cuentas sembrado, emite sesiones
//! opacas y las destruye en el logout. Toda ruta protegida pasa por
//! `authorize`; sin sesión viva no se sirve ningún dato de vehículos.

use std::collections::HashMap;

use bcrypt::{hash, verify, DEFAULT_COST};
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::EnvironmentConfig;
use crate::models::session::{Account, AuthenticatedUser, Session};
use crate::utils::errors::{AppError, AppResult};

pub struct SessionService {
    // Registro de cuentas (en producción sería el proveedor de identidad)
    accounts: HashMap<String, Account>,
    // Sesiones activas indexadas por token
    sessions: RwLock<HashMap<Uuid, Session>>,
    ttl: chrono::Duration,
}

impl SessionService {
    pub fn new(config: &EnvironmentConfig) -> Self {
        let mut service = Self {
            accounts: HashMap::new(),
            sessions: RwLock::new(HashMap::new()),
            ttl: chrono::Duration::hours(config.session_ttl_hours),
        };
        service.register_account(&config.admin_username, &config.admin_password);
        service
    }

    /// Siembra una cuenta con la contraseña hasheada
    fn register_account(&mut self, username: &str, password: &str) {
        let password_hash = hash(password, DEFAULT_COST)
            .expect("bcrypt hash of seeded password cannot fail");
        self.accounts.insert(
            username.to_string(),
            Account {
                username: username.to_string(),
                password_hash,
            },
        );
    }

    /// Autentica un par usuario/contraseña. El único camino que crea sesiones.
    pub async fn authenticate(&self, username: &str, password: &str) -> AppResult<Session> {
        let account = match self.accounts.get(username) {
            Some(account) => account,
            None => {
                warn!("Login fallido: usuario desconocido {}", username);
                return Err(AppError::InvalidCredentials);
            }
        };

        let matches = verify(password, &account.password_hash)
            .map_err(|e| AppError::Internal(format!("bcrypt verify failed: {}", e)))?;
        if !matches {
            warn!("Login fallido: contraseña incorrecta para {}", username);
            return Err(AppError::InvalidCredentials);
        }

        let session = Session::new(account.username.clone(), self.ttl);
        self.sessions
            .write()
            .await
            .insert(session.token, session.clone());
        info!("Sesión creada para {}", username);
        Ok(session)
    }

    /// Autoriza el token presentado. Tokens desconocidos o vencidos fallan
    /// con Unauthenticated; los vencidos se desalojan en el mismo chequeo.
    pub async fn authorize(&self, token: &str) -> AppResult<AuthenticatedUser> {
        let token = Uuid::parse_str(token).map_err(|_| AppError::Unauthenticated)?;

        let mut sessions = self.sessions.write().await;
        let session = sessions.get_mut(&token).ok_or(AppError::Unauthenticated)?;
        if session.is_expired() {
            sessions.remove(&token);
            return Err(AppError::Unauthenticated);
        }

        session.last_activity = Utc::now();
        Ok(AuthenticatedUser {
            username: session.username.clone(),
            session_token: token,
        })
    }

    /// Invalida la sesión; `authorize` posteriores con ese token fallan
    pub async fn destroy(&self, token: &str) {
        if let Ok(token) = Uuid::parse_str(token) {
            if self.sessions.write().await.remove(&token).is_some() {
                info!("Sesión destruida");
            }
        }
    }

    /// Desaloja sesiones vencidas
    pub async fn cleanup_expired(&self) {
        let mut sessions = self.sessions.write().await;
        sessions.retain(|_, session| !session.is_expired());
    }

    pub async fn active_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> EnvironmentConfig {
        EnvironmentConfig {
            environment: "test".to_string(),
            port: 0,
            host: "127.0.0.1".to_string(),
            session_ttl_hours: 24,
            page_size: 100,
            admin_username: "Manager_Alex".to_string(),
            admin_password: "qwer1234qwer".to_string(),
        }
    }

    #[tokio::test]
    async fn test_authenticate_known_account() {
        let service = SessionService::new(&test_config());
        let session = service
            .authenticate("Manager_Alex", "qwer1234qwer")
            .await
            .unwrap();
        assert_eq!(session.username, "Manager_Alex");
        assert!(!session.is_expired());
        assert_eq!(service.active_count().await, 1);
    }

    #[tokio::test]
    async fn test_authenticate_rejects_wrong_pair() {
        let service = SessionService::new(&test_config());

        let err = service
            .authenticate("Manager_Alex", "wrong_password")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidCredentials));

        let err = service
            .authenticate("wrong_user", "qwer1234qwer")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidCredentials));
        assert_eq!(service.active_count().await, 0);
    }

    #[tokio::test]
    async fn test_authorize_round_trip() {
        let service = SessionService::new(&test_config());
        let session = service
            .authenticate("Manager_Alex", "qwer1234qwer")
            .await
            .unwrap();

        let principal = service.authorize(&session.token.to_string()).await.unwrap();
        assert_eq!(principal.username, "Manager_Alex");
        assert_eq!(principal.session_token, session.token);
    }

    #[tokio::test]
    async fn test_authorize_rejects_garbage_and_unknown_tokens() {
        let service = SessionService::new(&test_config());

        assert!(matches!(
            service.authorize("not-a-token").await,
            Err(AppError::Unauthenticated)
        ));
        assert!(matches!(
            service.authorize(&Uuid::new_v4().to_string()).await,
            Err(AppError::Unauthenticated)
        ));
    }

    #[tokio::test]
    async fn test_destroyed_session_no_longer_authorizes() {
        let service = SessionService::new(&test_config());
        let session = service
            .authenticate("Manager_Alex", "qwer1234qwer")
            .await
            .unwrap();
        let token = session.token.to_string();

        service.destroy(&token).await;
        assert!(matches!(
            service.authorize(&token).await,
            Err(AppError::Unauthenticated)
        ));
    }

    #[tokio::test]
    async fn test_expired_session_is_evicted_on_check() {
        let mut config = test_config();
        config.session_ttl_hours = -1;
        let service = SessionService::new(&config);
        let session = service
            .authenticate("Manager_Alex", "qwer1234qwer")
            .await
            .unwrap();

        assert!(matches!(
            service.authorize(&session.token.to_string()).await,
            Err(AppError::Unauthenticated)
        ));
        assert_eq!(service.active_count().await, 0);
    }
}
