//! Rutas de autenticación
//!
//! `/accounts/login/` con alias `/login/`, y `/accounts/logout/`. El login
//! exitoso instala la cookie de sesión y redirige fuera de `/login/`; el
//! fallido re-renderiza el formulario con el error inline.

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
    Form, Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use serde::Deserialize;

use crate::controllers::auth_controller::{AuthController, LoginResult};
use crate::middleware::auth::SESSION_COOKIE;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::views::LoginPage;

pub fn auth_router() -> Router<AppState> {
    Router::new()
        .route("/accounts/login/", get(login_page).post(login_submit))
        .route("/login/", get(login_page).post(login_submit))
        .route("/accounts/logout/", post(logout))
}

#[derive(Debug, Deserialize)]
struct LoginQuery {
    #[serde(default)]
    next: String,
}

#[derive(Debug, Deserialize)]
struct LoginForm {
    #[serde(default)]
    username: String,
    #[serde(default)]
    password: String,
    #[serde(default)]
    next: String,
}

/// Destino tras un login exitoso. Solo se aceptan rutas internas.
fn safe_next(next: &str) -> &str {
    if next.starts_with('/') && !next.starts_with("//") {
        next
    } else {
        "/vehicles/"
    }
}

async fn login_page(Query(query): Query<LoginQuery>) -> LoginPage {
    LoginPage::new("", query.next, None)
}

async fn login_submit(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    let controller = AuthController::new(&state);
    match controller.login(&form.username, &form.password).await? {
        LoginResult::LoggedIn(session) => {
            let cookie = Cookie::build((SESSION_COOKIE, session.token.to_string()))
                .path("/")
                .http_only(true)
                .build();
            let jar = jar.add(cookie);
            Ok((jar, Redirect::to(safe_next(&form.next))).into_response())
        }
        LoginResult::Rejected { message } => {
            // Se queda en /login/ con el error visible
            let page = LoginPage::new(form.username, form.next, Some(message));
            Ok(page.into_response())
        }
    }
}

async fn logout(State(state): State<AppState>, jar: CookieJar) -> Response {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        AuthController::new(&state).logout(cookie.value()).await;
    }
    let jar = jar.remove(Cookie::build((SESSION_COOKIE, "")).path("/").build());
    (jar, Redirect::to("/login/")).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_next_only_accepts_internal_paths() {
        assert_eq!(safe_next("/vehicles/"), "/vehicles/");
        assert_eq!(safe_next("/vehicles/A123BC/"), "/vehicles/A123BC/");
        assert_eq!(safe_next(""), "/vehicles/");
        assert_eq!(safe_next("https://evil.example"), "/vehicles/");
        assert_eq!(safe_next("//evil.example"), "/vehicles/");
    }
}
