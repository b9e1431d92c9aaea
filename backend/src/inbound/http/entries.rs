//! Entry HTTP handlers.
//!
//! ```text
//! GET  /api/entry
//! GET  /api/entry/{id}
//! GET  /api/entry/vehicle/{vehicleId}
//! POST /api/entry
//! ```

use std::str::FromStr;

use actix_web::http::header;
use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::ports::{EntryPayload, RegisterEntryRequest};
use crate::domain::{Error, VehicleType};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Request payload for registering an arrival.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterEntryRequestBody {
    #[schema(example = "SFL555")]
    pub vehicle_id: String,
    /// `car` or `motorcycle`.
    #[schema(example = "car")]
    pub vehicle_type: String,
    /// Engine displacement in cc; required for motorcycles.
    #[schema(example = 150)]
    pub displacement: Option<u32>,
}

/// Entry as returned by the API.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EntryResponseBody {
    #[schema(format = "uuid")]
    pub id: String,
    pub vehicle_id: String,
    pub vehicle_type: String,
    #[schema(format = "date-time")]
    pub entered_at: String,
    pub displacement: Option<u32>,
}

impl From<EntryPayload> for EntryResponseBody {
    fn from(value: EntryPayload) -> Self {
        Self {
            id: value.id.to_string(),
            vehicle_id: value.vehicle_id,
            vehicle_type: value.vehicle_type.to_string(),
            entered_at: value.entered_at.to_rfc3339(),
            displacement: value.displacement,
        }
    }
}

fn parse_register_entry(payload: RegisterEntryRequestBody) -> Result<RegisterEntryRequest, Error> {
    let vehicle_type = VehicleType::from_str(&payload.vehicle_type).map_err(|_| {
        Error::invalid_request("vehicleType must be car or motorcycle").with_details(json!({
            "field": "vehicleType",
            "value": payload.vehicle_type,
            "code": "invalid_vehicle_type",
        }))
    })?;

    Ok(RegisterEntryRequest {
        vehicle_id: payload.vehicle_id,
        vehicle_type,
        displacement: payload.displacement,
    })
}

fn entry_not_found(what: &str) -> Error {
    Error::not_found(format!("entry {what} not found"))
}

/// List every entry ordered by entry time.
#[utoipa::path(
    get,
    path = "/api/entry",
    responses(
        (status = 200, description = "Entries", body = [EntryResponseBody]),
        (status = 400, description = "Request failed", body = ErrorSchema)
    ),
    tags = ["entries"],
    operation_id = "listEntries"
)]
#[get("/entry")]
pub async fn list_entries(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<EntryResponseBody>>> {
    let entries = state.entries_query.list_entries().await?;
    Ok(web::Json(
        entries.into_iter().map(EntryResponseBody::from).collect(),
    ))
}

/// Fetch one entry by identifier.
#[utoipa::path(
    get,
    path = "/api/entry/{id}",
    params(("id" = String, Path, description = "Entry identifier")),
    responses(
        (status = 200, description = "Entry", body = EntryResponseBody),
        (status = 404, description = "Unknown entry", body = ErrorSchema)
    ),
    tags = ["entries"],
    operation_id = "getEntry"
)]
#[get("/entry/{id}")]
pub async fn get_entry(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<EntryResponseBody>> {
    let id = path.into_inner();
    let entry = state
        .entries_query
        .get_entry_by_id(&id)
        .await?
        .ok_or_else(|| entry_not_found(&id))?;
    Ok(web::Json(EntryResponseBody::from(entry)))
}

/// Fetch the most recent entry of a vehicle.
#[utoipa::path(
    get,
    path = "/api/entry/vehicle/{vehicleId}",
    params(("vehicleId" = String, Path, description = "Vehicle identifier")),
    responses(
        (status = 200, description = "Latest entry", body = EntryResponseBody),
        (status = 404, description = "Vehicle has no entries", body = ErrorSchema)
    ),
    tags = ["entries"],
    operation_id = "getLastEntryByVehicle"
)]
#[get("/entry/vehicle/{vehicle_id}")]
pub async fn get_last_entry_by_vehicle(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<EntryResponseBody>> {
    let vehicle_id = path.into_inner();
    let entry = state
        .entries_query
        .get_last_entry_by_vehicle_id(&vehicle_id)
        .await?
        .ok_or_else(|| entry_not_found(&format!("for vehicle {vehicle_id}")))?;
    Ok(web::Json(EntryResponseBody::from(entry)))
}

/// Register a vehicle arrival.
///
/// Registration rule violations answer 422 with the Spanish message of the
/// rule in `message`.
#[utoipa::path(
    post,
    path = "/api/entry",
    request_body = RegisterEntryRequestBody,
    responses(
        (status = 201, description = "Entry registered", body = EntryResponseBody,
            headers(("Location" = String, description = "URI of the new entry"))),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 422, description = "Registration rule violated", body = ErrorSchema)
    ),
    tags = ["entries"],
    operation_id = "registerEntry"
)]
#[post("/entry")]
pub async fn register_entry(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterEntryRequestBody>,
) -> ApiResult<HttpResponse> {
    let request = parse_register_entry(payload.into_inner())?;
    let entry = state.entries.register_entry(request).await?;

    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, format!("/api/entry/{}", entry.id)))
        .json(EntryResponseBody::from(entry)))
}

#[cfg(test)]
#[path = "entries_tests.rs"]
mod tests;
