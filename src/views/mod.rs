//! Vistas de la consola
//!
//! Structs de página para las plantillas askama. Cada struct lleva los
//! campos ya formateados para mostrar; la lógica de dominio se queda en los
//! controllers y acá solo se arma el modelo de vista.

use askama::Template;

use crate::dto::vehicle_dto::{FormErrors, VehicleFormData};
use crate::models::vehicle::{PageInfo, Vehicle};
use crate::repositories::catalog_repository::CatalogRepository;

/// Campo de formulario con su valor ingresado y su error, si lo hay
pub struct FieldView {
    pub value: String,
    pub error: String,
    pub has_error: bool,
}

impl FieldView {
    pub fn new(value: impl Into<String>, error: Option<&str>) -> Self {
        let error = error.unwrap_or_default().to_string();
        Self {
            has_error: !error.is_empty(),
            value: value.into(),
            error,
        }
    }
}

/// Opción de un selector de catálogo
pub struct SelectOptionView {
    pub id: String,
    pub name: String,
    pub selected: bool,
}

/// Selector completo con su error de campo
pub struct SelectView {
    pub options: Vec<SelectOptionView>,
    pub error: String,
    pub has_error: bool,
}

impl SelectView {
    fn new(options: Vec<SelectOptionView>, error: Option<&str>) -> Self {
        let error = error.unwrap_or_default().to_string();
        Self {
            has_error: !error.is_empty(),
            options,
            error,
        }
    }
}

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginPage {
    pub title: String,
    pub username: String,
    pub next: String,
    pub error: String,
    pub has_error: bool,
}

impl LoginPage {
    pub fn new(username: impl Into<String>, next: impl Into<String>, error: Option<String>) -> Self {
        let error = error.unwrap_or_default();
        Self {
            title: "Вход".to_string(),
            username: username.into(),
            next: next.into(),
            has_error: !error.is_empty(),
            error,
        }
    }
}

/// Fila del listado con las columnas derivadas ya resueltas
pub struct VehicleRowView {
    pub car_number: String,
    pub car_number_url: String,
    pub brand: String,
    pub enterprise: String,
    pub price: String,
    pub year_of_manufacture: String,
    pub mileage: String,
}

impl VehicleRowView {
    fn from_vehicle(vehicle: &Vehicle, catalog: &CatalogRepository) -> Self {
        Self {
            car_number: vehicle.car_number.clone(),
            car_number_url: urlencoding::encode(&vehicle.car_number).into_owned(),
            brand: catalog.brand_name(vehicle.brand_id),
            enterprise: catalog.enterprise_name(vehicle.enterprise_id),
            price: vehicle.price.to_string(),
            year_of_manufacture: vehicle.year_of_manufacture.to_string(),
            mileage: vehicle.mileage.to_string(),
        }
    }
}

#[derive(Template)]
#[template(path = "vehicle_list.html")]
pub struct VehicleListPage {
    pub title: String,
    pub flash_message: String,
    pub flash_level: String,
    pub has_flash: bool,
    pub rows: Vec<VehicleRowView>,
    pub total_count: usize,
    pub page: usize,
    pub total_pages: usize,
    pub show_pagination: bool,
    pub has_previous: bool,
    pub has_next: bool,
    pub previous_url: String,
    pub next_url: String,
}

impl VehicleListPage {
    pub fn new(
        vehicles: &[Vehicle],
        page_info: &PageInfo,
        catalog: &CatalogRepository,
        flash: Option<(String, String)>,
        page_url: impl Fn(usize) -> String,
    ) -> Self {
        let rows: Vec<VehicleRowView> = vehicles
            .iter()
            .map(|v| VehicleRowView::from_vehicle(v, catalog))
            .collect();
        let (flash_level, flash_message) = flash.unwrap_or_default();
        Self {
            title: "Автомобили".to_string(),
            has_flash: !flash_message.is_empty(),
            flash_message,
            flash_level,
            rows,
            total_count: page_info.total_count,
            page: page_info.page,
            total_pages: page_info.total_pages,
            show_pagination: page_info.total_pages > 1,
            has_previous: page_info.has_previous,
            has_next: page_info.has_next,
            previous_url: page_url(page_info.page.saturating_sub(1).max(1)),
            next_url: page_url((page_info.page + 1).min(page_info.total_pages)),
        }
    }
}

#[derive(Template)]
#[template(path = "vehicle_form.html")]
pub struct VehicleFormPage {
    pub title: String,
    pub submit_label: String,
    pub action: String,
    pub is_edit: bool,
    pub car_number: FieldView,
    pub price: FieldView,
    pub year_of_manufacture: FieldView,
    pub mileage: FieldView,
    pub description: FieldView,
    pub purchase_datetime: FieldView,
    pub brands: SelectView,
    pub enterprises: SelectView,
}

impl VehicleFormPage {
    /// Formulario de alta
    pub fn create(form: &VehicleFormData, errors: &FormErrors, catalog: &CatalogRepository) -> Self {
        Self::build(
            "Создать машину",
            "Создать",
            "/vehicles/create/",
            false,
            form,
            errors,
            catalog,
        )
    }

    /// Formulario de edición; la identidad se muestra pero no se edita
    pub fn edit(
        car_number: &str,
        form: &VehicleFormData,
        errors: &FormErrors,
        catalog: &CatalogRepository,
    ) -> Self {
        let action = format!("/vehicles/{}/edit/", urlencoding::encode(car_number));
        Self::build(
            "Изменение машины",
            "Изменить",
            &action,
            true,
            form,
            errors,
            catalog,
        )
    }

    fn build(
        title: &str,
        submit_label: &str,
        action: &str,
        is_edit: bool,
        form: &VehicleFormData,
        errors: &FormErrors,
        catalog: &CatalogRepository,
    ) -> Self {
        let brands = catalog
            .brands()
            .iter()
            .map(|b| SelectOptionView {
                id: b.id.to_string(),
                name: b.name.clone(),
                selected: form.brand.trim() == b.id.to_string(),
            })
            .collect();
        let enterprises = catalog
            .enterprises()
            .iter()
            .map(|e| SelectOptionView {
                id: e.id.to_string(),
                name: e.name.clone(),
                selected: form.enterprise.trim() == e.id.to_string(),
            })
            .collect();

        Self {
            title: title.to_string(),
            submit_label: submit_label.to_string(),
            action: action.to_string(),
            is_edit,
            car_number: FieldView::new(form.car_number.clone(), errors.field("car_number")),
            price: FieldView::new(form.price.clone(), errors.field("price")),
            year_of_manufacture: FieldView::new(
                form.year_of_manufacture.clone(),
                errors.field("year_of_manufacture"),
            ),
            mileage: FieldView::new(form.mileage.clone(), errors.field("mileage")),
            description: FieldView::new(form.description.clone(), errors.field("description")),
            purchase_datetime: FieldView::new(
                form.purchase_datetime.clone(),
                errors.field("purchase_datetime"),
            ),
            brands: SelectView::new(brands, errors.field("brand")),
            enterprises: SelectView::new(enterprises, errors.field("enterprise")),
        }
    }
}

#[derive(Template)]
#[template(path = "vehicle_detail.html")]
pub struct VehicleDetailPage {
    pub title: String,
    pub car_number: String,
    pub car_number_url: String,
    pub brand: String,
    pub enterprise: String,
    pub price: String,
    pub year_of_manufacture: String,
    pub mileage: String,
    pub description: String,
    pub has_description: bool,
    pub purchase_datetime: String,
    pub has_purchase_datetime: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl VehicleDetailPage {
    pub fn new(vehicle: &Vehicle, catalog: &CatalogRepository) -> Self {
        let purchase_datetime = vehicle
            .purchase_datetime
            .map(|dt| dt.format("%d.%m.%Y %H:%M").to_string())
            .unwrap_or_default();
        Self {
            title: "Информация о машине".to_string(),
            car_number: vehicle.car_number.clone(),
            car_number_url: urlencoding::encode(&vehicle.car_number).into_owned(),
            brand: catalog.brand_name(vehicle.brand_id),
            enterprise: catalog.enterprise_name(vehicle.enterprise_id),
            price: vehicle.price.to_string(),
            year_of_manufacture: vehicle.year_of_manufacture.to_string(),
            mileage: vehicle.mileage.to_string(),
            has_description: !vehicle.description.is_empty(),
            description: vehicle.description.clone(),
            has_purchase_datetime: !purchase_datetime.is_empty(),
            purchase_datetime,
            created_at: vehicle.created_at.format("%d.%m.%Y %H:%M").to_string(),
            updated_at: vehicle.updated_at.format("%d.%m.%Y %H:%M").to_string(),
        }
    }
}

#[derive(Template)]
#[template(path = "vehicle_delete.html")]
pub struct VehicleDeletePage {
    pub title: String,
    pub car_number: String,
    pub car_number_url: String,
}

impl VehicleDeletePage {
    pub fn new(vehicle: &Vehicle) -> Self {
        Self {
            title: "Удаление машины".to_string(),
            car_number: vehicle.car_number.clone(),
            car_number_url: urlencoding::encode(&vehicle.car_number).into_owned(),
        }
    }
}

#[derive(Template)]
#[template(path = "not_found.html")]
pub struct NotFoundPage {
    pub title: String,
    pub message: String,
}

impl NotFoundPage {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            title: "Страница не найдена".to_string(),
            message: message.into(),
        }
    }
}

/// Valor del formulario prellenado desde un registro existente
pub fn form_data_from_vehicle(vehicle: &Vehicle) -> VehicleFormData {
    VehicleFormData {
        car_number: vehicle.car_number.clone(),
        price: vehicle.price.to_string(),
        year_of_manufacture: vehicle.year_of_manufacture.to_string(),
        mileage: vehicle.mileage.to_string(),
        description: vehicle.description.clone(),
        brand: vehicle.brand_id.to_string(),
        enterprise: vehicle.enterprise_id.to_string(),
        purchase_datetime: vehicle
            .purchase_datetime
            .map(|dt| dt.format("%Y-%m-%dT%H:%M").to_string())
            .unwrap_or_default(),
    }
}
