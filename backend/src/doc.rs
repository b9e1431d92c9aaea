//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the entry, departure and health endpoints together
//! with the request, response and error schemas they reference. The
//! document feeds Swagger UI in debug builds and `cargo run --bin
//! openapi-dump` for external tooling.

use utoipa::OpenApi;

use crate::inbound::http::departures::{DepartureResponseBody, RegisterDepartureRequestBody};
use crate::inbound::http::entries::{EntryResponseBody, RegisterEntryRequestBody};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Parking registry API",
        description = "Register vehicle entries and departures, and read them back.",
        license(
            name = "Apache-2.0",
            url = "https://www.apache.org/licenses/LICENSE-2.0.html"
        )
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::entries::list_entries,
        crate::inbound::http::entries::get_entry,
        crate::inbound::http::entries::get_last_entry_by_vehicle,
        crate::inbound::http::entries::register_entry,
        crate::inbound::http::departures::list_departures,
        crate::inbound::http::departures::get_departure,
        crate::inbound::http::departures::register_departure,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        RegisterEntryRequestBody,
        EntryResponseBody,
        RegisterDepartureRequestBody,
        DepartureResponseBody,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "entries", description = "Vehicle arrivals"),
        (name = "departures", description = "Vehicle exits and fees"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
