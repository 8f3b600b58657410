//! Middleware de autenticación por sesión
//!
//! Extrae la cookie de sesión, la autoriza contra el servicio de sesiones e
//! inyecta el principal en la request. Sin sesión válida la respuesta es un
//! redirect al login con `next` apuntando a la ruta pedida; ningún dato de
//! vehículos se sirve a un cliente sin autenticar, en ningún formato.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use tracing::debug;

use crate::state::AppState;

/// Nombre de la cookie que transporta el token de sesión
pub const SESSION_COOKIE: &str = "sessionid";

/// Middleware que exige una sesión viva en toda ruta protegida
pub async fn require_session(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    let token = jar.get(SESSION_COOKIE).map(|cookie| cookie.value().to_string());

    let principal = match token {
        Some(token) => state.sessions.authorize(&token).await.ok(),
        None => None,
    };

    match principal {
        Some(principal) => {
            request.extensions_mut().insert(principal);
            next.run(request).await
        }
        None => {
            let next_path = request.uri().path().to_string();
            debug!("Request sin sesión a {}, redirigiendo al login", next_path);
            Redirect::to(&format!("/login/?next={}", urlencoding::encode(&next_path)))
                .into_response()
        }
    }
}
