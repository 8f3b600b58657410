//! Rutas de vehículos
//!
//! Los seis flujos de la consola: listado, alta, detalle, edición, borrado
//! con confirmación y export. Los handlers extraen la request, delegan en el
//! controller y renderizan; las mutaciones exitosas redirigen al listado con
//! un aviso flash.

use axum::{
    extract::{Path, Query, State},
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Form, Router,
};
use http::header;
use askama::Template;
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use crate::controllers::vehicle_controller::{FormResult, VehicleController};
use crate::dto::vehicle_dto::{FormErrors, VehicleFormData};
use crate::models::vehicle::VehicleFilters;
use crate::routes::{set_flash, take_flash};
use crate::services::export_service::ExportFormat;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::views::{
    form_data_from_vehicle, VehicleDeletePage, VehicleDetailPage, VehicleFormPage,
    VehicleListPage,
};

pub fn vehicle_router() -> Router<AppState> {
    Router::new()
        .route("/vehicles/", get(list_vehicles))
        .route("/vehicles/create/", get(create_page).post(create_submit))
        .route("/vehicles/export/", get(export_vehicles))
        .route("/vehicles/:car_number/", get(detail_page))
        .route("/vehicles/:car_number/edit/", get(edit_page).post(edit_submit))
        .route(
            "/vehicles/:car_number/delete/",
            get(delete_page).post(delete_submit),
        )
}

#[derive(Debug, Deserialize)]
struct ListQuery {
    page: Option<usize>,
    enterprise_id: Option<i64>,
    brand_id: Option<i64>,
}

impl ListQuery {
    fn filters(&self) -> VehicleFilters {
        VehicleFilters {
            enterprise_id: self.enterprise_id,
            brand_id: self.brand_id,
        }
    }

    /// URL del listado para otra página, conservando los filtros
    fn page_url(&self, page: usize) -> String {
        let mut url = format!("/vehicles/?page={}", page);
        if let Some(enterprise_id) = self.enterprise_id {
            url.push_str(&format!("&enterprise_id={}", enterprise_id));
        }
        if let Some(brand_id) = self.brand_id {
            url.push_str(&format!("&brand_id={}", brand_id));
        }
        url
    }
}

async fn list_vehicles(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(query): Query<ListQuery>,
) -> Result<Response, AppError> {
    let controller = VehicleController::new(&state);
    let (vehicles, page_info) = controller
        .list(
            query.page.unwrap_or(1),
            state.config.page_size,
            &query.filters(),
        )
        .await;

    let (flash, jar) = take_flash(jar);
    let page = VehicleListPage::new(&vehicles, &page_info, &state.catalog, flash, |p| {
        query.page_url(p)
    });
    Ok((jar, Html(page.render()?)).into_response())
}

async fn create_page(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let page = VehicleFormPage::create(
        &VehicleFormData::default(),
        &FormErrors::new(),
        &state.catalog,
    );
    Ok(Html(page.render()?))
}

async fn create_submit(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<VehicleFormData>,
) -> Result<Response, AppError> {
    let controller = VehicleController::new(&state);
    match controller.create(&form).await? {
        FormResult::Saved(_) => {
            let jar = set_flash(jar, "success", "Машина успешно создана");
            Ok((jar, Redirect::to("/vehicles/")).into_response())
        }
        FormResult::Invalid(errors) => {
            // Sin redirect: el formulario vuelve con lo ingresado y los errores
            let page = VehicleFormPage::create(&form, &errors, &state.catalog);
            Ok(Html(page.render()?).into_response())
        }
    }
}

async fn detail_page(
    State(state): State<AppState>,
    Path(car_number): Path<String>,
) -> Result<VehicleDetailPage, AppError> {
    let vehicle = VehicleController::new(&state).detail(&car_number).await?;
    Ok(VehicleDetailPage::new(&vehicle, &state.catalog))
}

async fn edit_page(
    State(state): State<AppState>,
    Path(car_number): Path<String>,
) -> Result<Html<String>, AppError> {
    let vehicle = VehicleController::new(&state).detail(&car_number).await?;
    let page = VehicleFormPage::edit(
        &vehicle.car_number,
        &form_data_from_vehicle(&vehicle),
        &FormErrors::new(),
        &state.catalog,
    );
    Ok(Html(page.render()?))
}

async fn edit_submit(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(car_number): Path<String>,
    Form(form): Form<VehicleFormData>,
) -> Result<Response, AppError> {
    let controller = VehicleController::new(&state);
    match controller.update(&car_number, &form).await? {
        FormResult::Saved(_) => {
            let jar = set_flash(jar, "success", "Машина успешно изменена");
            Ok((jar, Redirect::to("/vehicles/")).into_response())
        }
        FormResult::Invalid(errors) => {
            let page = VehicleFormPage::edit(&car_number, &form, &errors, &state.catalog);
            Ok(Html(page.render()?).into_response())
        }
    }
}

async fn delete_page(
    State(state): State<AppState>,
    Path(car_number): Path<String>,
) -> Result<VehicleDeletePage, AppError> {
    // Entrada al flujo de confirmación: solo lectura
    let vehicle = VehicleController::new(&state)
        .delete_confirmation(&car_number)
        .await?;
    Ok(VehicleDeletePage::new(&vehicle))
}

async fn delete_submit(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(car_number): Path<String>,
) -> Result<Response, AppError> {
    VehicleController::new(&state)
        .delete_confirmed(&car_number)
        .await?;
    let jar = set_flash(jar, "success", "Машина успешно удалена");
    Ok((jar, Redirect::to("/vehicles/")).into_response())
}

#[derive(Debug, Deserialize)]
struct ExportQuery {
    export_format: Option<String>,
    enterprise_id: Option<i64>,
    brand_id: Option<i64>,
}

async fn export_vehicles(
    State(state): State<AppState>,
    Query(query): Query<ExportQuery>,
) -> Result<Response, AppError> {
    let format = ExportFormat::from_query(query.export_format.as_deref());
    let filters = VehicleFilters {
        enterprise_id: query.enterprise_id,
        brand_id: query.brand_id,
    };
    let artifact = VehicleController::new(&state).export(format, &filters).await?;

    let headers = [
        (header::CONTENT_TYPE, artifact.content_type.clone()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename={}", artifact.file_name),
        ),
    ];
    Ok((headers, artifact.body).into_response())
}
