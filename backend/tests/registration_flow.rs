//! End-to-end registration flow over the public API with in-memory storage.

use std::sync::Arc;

use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use mockable::DefaultClock;
use rstest::rstest;
use serde_json::{Value, json};

use parking::Trace;
use parking::domain::{
    CellCapacity, CellQuotaService, Departure, DepartureCommandService, DepartureQueryService,
    Entry, EntryCommandService, EntryQueryService, FeeSchedule, LastIssuedNumbers, PlateValidator,
    RegistrationGate, TRACE_ID_HEADER,
};
use parking::inbound::http::error::json_error_handler;
use parking::inbound::http::state::HttpState;
use parking::inbound::http::{departures, entries};
use parking::outbound::memory::InMemoryRepository;

fn state(capacity: CellCapacity) -> HttpState {
    let entries_repo = Arc::new(InMemoryRepository::<Entry>::new());
    let departures_repo = Arc::new(InMemoryRepository::<Departure>::new());
    let gate = RegistrationGate::new();
    let clock = Arc::new(DefaultClock);

    HttpState::new(
        Arc::new(
            EntryCommandService::new(
                Arc::clone(&entries_repo),
                Arc::clone(&departures_repo),
                Arc::new(CellQuotaService::new(
                    Arc::clone(&entries_repo),
                    Arc::clone(&departures_repo),
                    capacity,
                )),
                Arc::new(PlateValidator::new(LastIssuedNumbers::default())),
                clock.clone(),
            )
            .with_gate(gate.clone()),
        ),
        Arc::new(EntryQueryService::new(Arc::clone(&entries_repo))),
        Arc::new(
            DepartureCommandService::new(
                Arc::clone(&entries_repo),
                Arc::clone(&departures_repo),
                FeeSchedule::default(),
                clock,
            )
            .with_gate(gate),
        ),
        Arc::new(DepartureQueryService::new(departures_repo)),
    )
}

fn test_app(
    capacity: CellCapacity,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Response = ServiceResponse<impl MessageBody>,
        Config = (),
        InitError = (),
        Error = actix_web::Error,
    >,
> {
    App::new()
        .app_data(web::Data::new(state(capacity)))
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .wrap(Trace)
        .service(
            web::scope("/api")
                .service(entries::list_entries)
                .service(entries::get_entry)
                .service(entries::register_entry)
                .service(departures::list_departures)
                .service(departures::register_departure),
        )
}

fn post(uri: &str, body: Value) -> actix_http::Request {
    test::TestRequest::post().uri(uri).set_json(body).to_request()
}

#[rstest]
#[actix_web::test]
async fn vehicle_can_return_after_leaving() {
    let app = test::init_service(test_app(CellCapacity::default())).await;
    let car = json!({"vehicleId": "SFL555", "vehicleType": "car"});

    let entry: Value = test::call_and_read_body_json(&app, post("/api/entry", car.clone())).await;
    let departure: Value = test::call_and_read_body_json(
        &app,
        post("/api/departure", json!({"entryId": entry["id"]})),
    )
    .await;
    assert_eq!(departure["fee"], 1_000);

    let again = test::call_service(&app, post("/api/entry", car)).await;
    assert_eq!(again.status(), StatusCode::CREATED);

    let listed: Vec<Value> =
        test::call_and_read_body_json(&app, test::TestRequest::get().uri("/api/entry").to_request())
            .await;
    assert_eq!(listed.len(), 2);
}

#[rstest]
#[actix_web::test]
async fn departure_frees_the_cell() {
    let app = test::init_service(test_app(CellCapacity {
        car: 1,
        motorcycle: 1,
    }))
    .await;

    let first = test::call_service(
        &app,
        post("/api/entry", json!({"vehicleId": "SFL555", "vehicleType": "car"})),
    )
    .await;
    assert_eq!(first.status(), StatusCode::CREATED);

    let blocked = test::call_service(
        &app,
        post("/api/entry", json!({"vehicleId": "ABC123", "vehicleType": "car"})),
    )
    .await;
    assert_eq!(blocked.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(blocked.headers().contains_key(TRACE_ID_HEADER));

    let left = test::call_service(&app, post("/api/departure", json!({"vehicleId": "SFL555"})))
        .await;
    assert_eq!(left.status(), StatusCode::CREATED);

    let admitted = test::call_service(
        &app,
        post("/api/entry", json!({"vehicleId": "ABC123", "vehicleType": "car"})),
    )
    .await;
    assert_eq!(admitted.status(), StatusCode::CREATED);
}

#[rstest]
#[actix_web::test]
async fn motorcycle_above_500cc_pays_surcharge() {
    let app = test::init_service(test_app(CellCapacity::default())).await;

    let entry: Value = test::call_and_read_body_json(
        &app,
        post(
            "/api/entry",
            json!({"vehicleId": "SFL55D", "vehicleType": "motorcycle", "displacement": 650}),
        ),
    )
    .await;
    let departure: Value = test::call_and_read_body_json(
        &app,
        post("/api/departure", json!({"entryId": entry["id"]})),
    )
    .await;

    assert_eq!(departure["fee"], 2_500);
}
