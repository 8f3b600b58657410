//! Rutas de la consola
//!
//! Arma el router: las rutas de login son públicas, todo `/vehicles/...`
//! queda detrás del middleware de sesión.

pub mod auth_routes;
pub mod vehicle_routes;

use axum::{middleware as axum_middleware, response::Redirect, routing::get, Router};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

use crate::middleware::auth::require_session;
use crate::state::AppState;

/// Cookie de un solo uso con el aviso de éxito de la última mutación
pub const FLASH_COOKIE: &str = "console_flash";

pub fn build_router(state: AppState) -> Router {
    let protected = vehicle_routes::vehicle_router().route_layer(
        axum_middleware::from_fn_with_state(state.clone(), require_session),
    );

    Router::new()
        .route("/", get(|| async { Redirect::to("/vehicles/") }))
        .merge(auth_routes::auth_router())
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .with_state(state)
}

/// Deja un aviso para el próximo render del listado
pub(crate) fn set_flash(jar: CookieJar, level: &str, message: &str) -> CookieJar {
    let value = urlencoding::encode(&format!("{}|{}", level, message)).into_owned();
    jar.add(Cookie::build((FLASH_COOKIE, value)).path("/").build())
}

/// Consume el aviso pendiente, si lo hay. Devuelve (nivel, mensaje).
pub(crate) fn take_flash(jar: CookieJar) -> (Option<(String, String)>, CookieJar) {
    let raw = jar.get(FLASH_COOKIE).map(|cookie| cookie.value().to_string());
    match raw {
        Some(raw) => {
            let decoded = urlencoding::decode(&raw)
                .map(|value| value.into_owned())
                .unwrap_or_default();
            let flash = decoded
                .split_once('|')
                .map(|(level, message)| (level.to_string(), message.to_string()));
            let jar = jar.remove(Cookie::build((FLASH_COOKIE, "")).path("/").build());
            (flash, jar)
        }
        None => (None, jar),
    }
}
