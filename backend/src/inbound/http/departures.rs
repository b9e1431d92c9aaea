//! Departure HTTP handlers.
//!
//! ```text
//! GET  /api/departure
//! GET  /api/departure/{id}
//! POST /api/departure
//! ```

use actix_web::http::header;
use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Error;
use crate::domain::ports::{DeparturePayload, RegisterDepartureRequest};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Request payload for registering an exit.
///
/// Either field identifies the stay; `entryId` wins when both are sent.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterDepartureRequestBody {
    #[schema(format = "uuid")]
    pub entry_id: Option<String>,
    #[schema(example = "SFL555")]
    pub vehicle_id: Option<String>,
}

impl From<RegisterDepartureRequestBody> for RegisterDepartureRequest {
    fn from(value: RegisterDepartureRequestBody) -> Self {
        Self {
            entry_id: value.entry_id,
            vehicle_id: value.vehicle_id,
        }
    }
}

/// Departure as returned by the API.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DepartureResponseBody {
    #[schema(format = "uuid")]
    pub id: String,
    #[schema(format = "uuid")]
    pub entry_id: String,
    #[schema(format = "date-time")]
    pub departed_at: String,
    /// Amount charged in whole pesos.
    #[schema(example = 3000)]
    pub fee: u64,
}

impl From<DeparturePayload> for DepartureResponseBody {
    fn from(value: DeparturePayload) -> Self {
        Self {
            id: value.id.to_string(),
            entry_id: value.entry_id.to_string(),
            departed_at: value.departed_at.to_rfc3339(),
            fee: value.fee,
        }
    }
}

/// List every departure ordered by departure time.
#[utoipa::path(
    get,
    path = "/api/departure",
    responses(
        (status = 200, description = "Departures", body = [DepartureResponseBody]),
        (status = 400, description = "Request failed", body = ErrorSchema)
    ),
    tags = ["departures"],
    operation_id = "listDepartures"
)]
#[get("/departure")]
pub async fn list_departures(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<DepartureResponseBody>>> {
    let departures = state.departures_query.list_departures().await?;
    Ok(web::Json(
        departures
            .into_iter()
            .map(DepartureResponseBody::from)
            .collect(),
    ))
}

/// Fetch one departure by identifier.
#[utoipa::path(
    get,
    path = "/api/departure/{id}",
    params(("id" = String, Path, description = "Departure identifier")),
    responses(
        (status = 200, description = "Departure", body = DepartureResponseBody),
        (status = 404, description = "Unknown departure", body = ErrorSchema)
    ),
    tags = ["departures"],
    operation_id = "getDeparture"
)]
#[get("/departure/{id}")]
pub async fn get_departure(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<DepartureResponseBody>> {
    let id = path.into_inner();
    let departure = state
        .departures_query
        .get_departure_by_id(&id)
        .await?
        .ok_or_else(|| Error::not_found(format!("departure {id} not found")))?;
    Ok(web::Json(DepartureResponseBody::from(departure)))
}

/// Register a vehicle exit and charge its stay.
#[utoipa::path(
    post,
    path = "/api/departure",
    request_body = RegisterDepartureRequestBody,
    responses(
        (status = 201, description = "Departure registered", body = DepartureResponseBody,
            headers(("Location" = String, description = "URI of the new departure"))),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 422, description = "Departure rule violated", body = ErrorSchema)
    ),
    tags = ["departures"],
    operation_id = "registerDeparture"
)]
#[post("/departure")]
pub async fn register_departure(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterDepartureRequestBody>,
) -> ApiResult<HttpResponse> {
    let departure = state
        .departures
        .register_departure(payload.into_inner().into())
        .await?;

    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, format!("/api/departure/{}", departure.id)))
        .json(DepartureResponseBody::from(departure)))
}

#[cfg(test)]
#[path = "departures_tests.rs"]
mod tests;
