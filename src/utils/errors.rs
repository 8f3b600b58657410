//! Sistema de manejo de errores
//!
//! Este módulo define los tipos de errores de la aplicación y su conversión
//! a respuestas HTTP. La consola es renderizada en servidor, así que las
//! fallas se convierten en redirects o páginas HTML, no en JSON.

use askama::Template;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use thiserror::Error;
use tracing::error;

use crate::views::NotFoundPage;

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    /// Sin sesión válida. Se responde con redirect al login, nunca con contenido.
    #[error("Unauthenticated")]
    Unauthenticated,

    /// Par usuario/contraseña incorrecto. Solo lo emite el login.
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Template error: {0}")]
    Template(#[from] askama::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Unauthenticated => Redirect::to("/login/").into_response(),

            AppError::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, Html("<h1>Вход не выполнен</h1>".to_string()))
                    .into_response()
            }

            AppError::NotFound(msg) => {
                let page = NotFoundPage::new(msg);
                let body = page
                    .render()
                    .unwrap_or_else(|_| "<h1>Страница не найдена</h1>".to_string());
                (StatusCode::NOT_FOUND, Html(body)).into_response()
            }

            AppError::Conflict(msg) => {
                (StatusCode::CONFLICT, Html(format!("<h1>Конфликт</h1><p>{}</p>", msg)))
                    .into_response()
            }

            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, Html(format!("<h1>Некорректный запрос</h1><p>{}</p>", msg)))
                    .into_response()
            }

            AppError::Template(e) => {
                error!("Template error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Html("<h1>Внутренняя ошибка сервера</h1>".to_string()),
                )
                    .into_response()
            }

            AppError::Internal(msg) => {
                error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Html("<h1>Внутренняя ошибка сервера</h1>".to_string()),
                )
                    .into_response()
            }
        }
    }
}

/// Resultado tipado para operaciones que pueden fallar
pub type AppResult<T> = Result<T, AppError>;
