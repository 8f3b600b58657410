//! Pipeline de export
//!
//! Serializa la vista filtrada completa de vehículos (sin paginar) a CSV o
//! JSON. No muta nada y es repetible: cada export produce un artefacto
//! efímero que el navegador descarga una sola vez.

use num_traits::ToPrimitive;
use serde::Serialize;

use crate::models::vehicle::Vehicle;
use crate::repositories::catalog_repository::CatalogRepository;
use crate::utils::errors::{AppError, AppResult};

/// Formato pedido por `?export_format=`. Valores desconocidos caen a CSV.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn from_query(value: Option<&str>) -> Self {
        match value {
            Some("json") => ExportFormat::Json,
            _ => ExportFormat::Csv,
        }
    }
}

/// Artefacto listo para descargar
#[derive(Debug, Clone)]
pub struct ExportArtifact {
    pub file_name: String,
    pub content_type: String,
    pub body: String,
}

/// Orden estable de columnas del CSV
const CSV_HEADER: [&str; 8] = [
    "car_number",
    "brand",
    "enterprise",
    "price",
    "year_of_manufacture",
    "mileage",
    "description",
    "purchase_datetime",
];

/// Fila del export JSON, con los nombres del modelo de dominio
#[derive(Debug, Serialize)]
struct ExportRow {
    car_number: String,
    brand: String,
    enterprise: String,
    price: f64,
    year_of_manufacture: i32,
    mileage: i64,
    description: String,
    purchase_datetime: Option<String>,
}

impl ExportRow {
    fn from_vehicle(vehicle: &Vehicle, catalog: &CatalogRepository) -> Self {
        Self {
            car_number: vehicle.car_number.clone(),
            brand: catalog.brand_name(vehicle.brand_id),
            enterprise: catalog.enterprise_name(vehicle.enterprise_id),
            price: vehicle.price.to_f64().unwrap_or(0.0),
            year_of_manufacture: vehicle.year_of_manufacture,
            mileage: vehicle.mileage,
            description: vehicle.description.clone(),
            purchase_datetime: vehicle.purchase_datetime.map(|dt| dt.to_rfc3339()),
        }
    }
}

pub struct ExportService;

impl ExportService {
    /// Serializa la colección al formato pedido
    pub fn export(
        format: ExportFormat,
        vehicles: &[Vehicle],
        catalog: &CatalogRepository,
    ) -> AppResult<ExportArtifact> {
        match format {
            ExportFormat::Csv => Ok(ExportArtifact {
                file_name: "vehicles.csv".to_string(),
                content_type: "text/csv; charset=utf-8".to_string(),
                body: Self::to_csv(vehicles, catalog),
            }),
            ExportFormat::Json => Ok(ExportArtifact {
                file_name: "vehicles.json".to_string(),
                content_type: "application/json".to_string(),
                body: Self::to_json(vehicles, catalog)?,
            }),
        }
    }

    fn to_csv(vehicles: &[Vehicle], catalog: &CatalogRepository) -> String {
        let mut out = String::new();
        out.push_str(&CSV_HEADER.join(","));
        out.push('\n');
        for vehicle in vehicles {
            let purchase = vehicle
                .purchase_datetime
                .map(|dt| dt.to_rfc3339())
                .unwrap_or_default();
            let fields = [
                vehicle.car_number.clone(),
                catalog.brand_name(vehicle.brand_id),
                catalog.enterprise_name(vehicle.enterprise_id),
                vehicle.price.to_string(),
                vehicle.year_of_manufacture.to_string(),
                vehicle.mileage.to_string(),
                vehicle.description.clone(),
                purchase,
            ];
            let row: Vec<String> = fields.iter().map(|f| escape_csv_field(f)).collect();
            out.push_str(&row.join(","));
            out.push('\n');
        }
        out
    }

    fn to_json(vehicles: &[Vehicle], catalog: &CatalogRepository) -> AppResult<String> {
        let rows: Vec<ExportRow> = vehicles
            .iter()
            .map(|v| ExportRow::from_vehicle(v, catalog))
            .collect();
        serde_json::to_string_pretty(&rows)
            .map_err(|e| AppError::Internal(format!("JSON export failed: {}", e)))
    }
}

/// Escapado CSV: los campos con separadores, comillas o saltos de línea se
/// encierran en comillas y las comillas internas se duplican
fn escape_csv_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use rust_decimal::Decimal;

    fn vehicle(car_number: &str, description: &str) -> Vehicle {
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        Vehicle {
            car_number: car_number.to_string(),
            price: Decimal::from(1_500_000),
            year_of_manufacture: 2020,
            mileage: 50_000,
            description: description.to_string(),
            purchase_datetime: Some(Utc.with_ymd_and_hms(2023, 1, 15, 10, 30, 0).unwrap()),
            brand_id: 1,
            enterprise_id: 1,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_format_from_query_defaults_to_csv() {
        assert_eq!(ExportFormat::from_query(None), ExportFormat::Csv);
        assert_eq!(ExportFormat::from_query(Some("csv")), ExportFormat::Csv);
        assert_eq!(ExportFormat::from_query(Some("json")), ExportFormat::Json);
        assert_eq!(ExportFormat::from_query(Some("xml")), ExportFormat::Csv);
    }

    #[test]
    fn test_csv_has_header_plus_row_per_vehicle() {
        let catalog = CatalogRepository::with_defaults();
        let vehicles = vec![vehicle("A001AA", "без пробега"), vehicle("B002BB", "")];
        let artifact = ExportService::export(ExportFormat::Csv, &vehicles, &catalog).unwrap();

        let lines: Vec<&str> = artifact.body.trim_end().lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            "car_number,brand,enterprise,price,year_of_manufacture,mileage,description,purchase_datetime"
        );
        assert!(lines[1].starts_with("A001AA,ГАЗ,Автопарк Центральный,1500000,2020,50000"));
        assert_eq!(artifact.file_name, "vehicles.csv");
    }

    #[test]
    fn test_csv_quotes_fields_with_separators_and_quotes() {
        let catalog = CatalogRepository::with_defaults();
        let vehicles = vec![vehicle("C003CC", "седан, \"люкс\"\nдва владельца")];
        let artifact = ExportService::export(ExportFormat::Csv, &vehicles, &catalog).unwrap();

        assert!(artifact
            .body
            .contains("\"седан, \"\"люкс\"\"\nдва владельца\""));
    }

    #[test]
    fn test_json_is_an_array_with_typed_fields() {
        let catalog = CatalogRepository::with_defaults();
        let vehicles = vec![vehicle("A001AA", "описание"), vehicle("B002BB", "")];
        let artifact = ExportService::export(ExportFormat::Json, &vehicles, &catalog).unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&artifact.body).unwrap();
        let rows = parsed.as_array().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["car_number"], "A001AA");
        assert_eq!(rows[0]["brand"], "ГАЗ");
        assert!(rows[0]["price"].is_number());
        assert!(rows[0]["mileage"].is_number());
        assert_eq!(rows[0]["purchase_datetime"], "2023-01-15T10:30:00+00:00");
        assert_eq!(artifact.content_type, "application/json");
    }

    #[test]
    fn test_export_of_empty_collection() {
        let catalog = CatalogRepository::with_defaults();
        let csv = ExportService::export(ExportFormat::Csv, &[], &catalog).unwrap();
        assert_eq!(csv.body.trim_end().lines().count(), 1);

        let json = ExportService::export(ExportFormat::Json, &[], &catalog).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json.body).unwrap();
        assert_eq!(parsed.as_array().unwrap().len(), 0);
    }

    #[test]
    fn test_escape_csv_field() {
        assert_eq!(escape_csv_field("plain"), "plain");
        assert_eq!(escape_csv_field("a,b"), "\"a,b\"");
        assert_eq!(escape_csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(escape_csv_field("line\nbreak"), "\"line\nbreak\"");
    }
}
