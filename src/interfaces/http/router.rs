//! API Router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::FromRef,
    routing::{get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::application::{
    BookingService, CatalogueService, FleetService, SharedVehicleGuards, UserService,
};
use crate::domain::RepositoryProvider;

use super::common::ApiResponse;
use super::modules::health::{self, HealthState};
use super::modules::reservations::{self, ReservationState};
use super::modules::users::{self, UserState};
use super::modules::vehicles::{self, VehicleState};

/// Unified state for every route. Axum extracts the specific handler state
/// via `FromRef`.
#[derive(Clone)]
pub struct ApiState {
    pub repos: Arc<dyn RepositoryProvider>,
    pub fleet: Arc<FleetService>,
    pub booking: Arc<BookingService>,
    pub catalogue: Arc<CatalogueService>,
    pub users: Arc<UserService>,
    pub started_at: Arc<Instant>,
}

impl ApiState {
    /// Build all services over one repository provider and guard registry.
    pub fn new(repos: Arc<dyn RepositoryProvider>, guards: SharedVehicleGuards) -> Self {
        Self {
            fleet: Arc::new(FleetService::new(repos.clone(), guards.clone())),
            booking: Arc::new(BookingService::new(repos.clone(), guards)),
            catalogue: Arc::new(CatalogueService::new(repos.clone())),
            users: Arc::new(UserService::new(repos.clone())),
            started_at: Arc::new(Instant::now()),
            repos,
        }
    }
}

// -- FromRef implementations so each handler keeps its own State<T> extractor --

impl FromRef<ApiState> for HealthState {
    fn from_ref(s: &ApiState) -> Self {
        HealthState {
            repos: Arc::clone(&s.repos),
            started_at: Arc::clone(&s.started_at),
        }
    }
}

impl FromRef<ApiState> for VehicleState {
    fn from_ref(s: &ApiState) -> Self {
        VehicleState {
            fleet: Arc::clone(&s.fleet),
            catalogue: Arc::clone(&s.catalogue),
        }
    }
}

impl FromRef<ApiState> for ReservationState {
    fn from_ref(s: &ApiState) -> Self {
        ReservationState {
            booking: Arc::clone(&s.booking),
        }
    }
}

impl FromRef<ApiState> for UserState {
    fn from_ref(s: &ApiState) -> Self {
        UserState {
            users: Arc::clone(&s.users),
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::health_check,
        // Vehicles
        vehicles::list_vehicles,
        vehicles::register_vehicle,
        vehicles::available_vehicles,
        vehicles::get_vehicle,
        vehicles::change_lock,
        vehicles::report_position,
        // Vehicle models
        vehicles::list_vehicle_models,
        vehicles::create_vehicle_model,
        // Reservations
        reservations::create_reservation,
        reservations::list_reservations,
        reservations::get_reservation,
        reservations::update_reservation_status,
        reservations::set_reservation_event,
        // Users
        users::register_user,
        users::list_users,
        users::get_user,
        users::authenticate,
    ),
    components(
        schemas(
            ApiResponse<String>,
            health::HealthResponse,
            health::ComponentHealth,
            vehicles::VehicleDto,
            vehicles::VehicleModelDto,
            vehicles::RegisterVehicleRequest,
            vehicles::CreateVehicleModelRequest,
            vehicles::LockRequest,
            vehicles::LockReceiptDto,
            vehicles::PositionRequest,
            reservations::ReservationDto,
            reservations::CreateReservationRequest,
            reservations::UpdateStatusRequest,
            reservations::SetEventIdRequest,
            users::UserDto,
            users::RegisterUserRequest,
            users::AuthenticateRequest,
        )
    ),
    tags(
        (name = "Health", description = "Server health check endpoints"),
        (name = "Vehicles", description = "Fleet, availability and lock/position commands"),
        (name = "Vehicle Models", description = "Make/model catalogue"),
        (name = "Reservations", description = "Bookings of a vehicle for a time window"),
        (name = "Users", description = "User registration and credential checks"),
    ),
    info(
        title = "Car-share Booking API",
        version = "1.0.0",
        description = "REST API for booking cars and coordinating their door locks",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes
pub fn create_api_router(state: ApiState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    let api_routes = Router::new()
        // Health
        .route("/health", get(health::health_check))
        // Vehicles
        .route(
            "/api/v1/vehicles",
            get(vehicles::list_vehicles).post(vehicles::register_vehicle),
        )
        .route("/api/v1/vehicles/available", get(vehicles::available_vehicles))
        .route("/api/v1/vehicles/{id}", get(vehicles::get_vehicle))
        .route("/api/v1/vehicles/{id}/lock", put(vehicles::change_lock))
        .route("/api/v1/vehicles/{id}/position", put(vehicles::report_position))
        // Vehicle models
        .route(
            "/api/v1/vehicle-models",
            get(vehicles::list_vehicle_models).post(vehicles::create_vehicle_model),
        )
        // Reservations
        .route(
            "/api/v1/reservations",
            get(reservations::list_reservations).post(reservations::create_reservation),
        )
        .route("/api/v1/reservations/{id}", get(reservations::get_reservation))
        .route(
            "/api/v1/reservations/{id}/status",
            put(reservations::update_reservation_status),
        )
        .route(
            "/api/v1/reservations/{id}/event",
            put(reservations::set_reservation_event),
        )
        // Users
        .route(
            "/api/v1/users",
            get(users::list_users).post(users::register_user),
        )
        .route("/api/v1/users/authenticate", post(users::authenticate))
        .route("/api/v1/users/{email}", get(users::get_user))
        .with_state(state);

    // Build router
    Router::new()
        .merge(swagger_routes)
        .merge(api_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration as StdDuration;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use chrono::{Duration, Utc};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::application::VehicleGuards;
    use crate::infrastructure::storage::InMemoryStorage;

    fn app() -> Router {
        let repos = Arc::new(InMemoryStorage::new());
        let guards = Arc::new(VehicleGuards::new(StdDuration::from_secs(1)));
        create_api_router(ApiState::new(repos, guards))
    }

    async fn call(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let req = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_vec(&body).unwrap()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let resp = app.clone().oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    /// One model, one locked car `CAR001`, one user, and a booking that
    /// started an hour ago.
    async fn seeded() -> (Router, i64) {
        let app = app();
        let (status, model) = call(
            &app,
            "POST",
            "/api/v1/vehicle-models",
            Some(json!({"make": "Toyota", "model": "Corolla", "year": 2019, "capacity": 5, "colour": "White"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let model_id = model["data"]["id"].as_i64().unwrap();

        let (status, _) = call(
            &app,
            "POST",
            "/api/v1/vehicles",
            Some(json!({"id": "CAR001", "name": "Corolla", "model_id": model_id, "cost_per_hour": 10.0})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, _) = call(
            &app,
            "POST",
            "/api/v1/users",
            Some(json!({"email": "donald@gmail.com", "first_name": "Donald", "last_name": "Duck", "password": "quack-quack"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let now = Utc::now();
        let (status, booking) = call(
            &app,
            "POST",
            "/api/v1/reservations",
            Some(json!({
                "user_id": "donald@gmail.com",
                "vehicle_id": "CAR001",
                "start": (now - Duration::hours(1)).to_rfc3339(),
                "end": (now + Duration::hours(1)).to_rfc3339(),
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let booking_id = booking["data"]["id"].as_i64().unwrap();

        (app, booking_id)
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let (status, body) = call(&app(), "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn unlock_then_lock_completes_booking() {
        let (app, booking_id) = seeded().await;
        let lock = |locked: bool| json!({"user_id": "donald@gmail.com", "locked": locked});

        let (status, body) = call(&app, "PUT", "/api/v1/vehicles/CAR001/lock", Some(lock(false))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["message"], "Successful: car is unlocked");

        let (status, body) = call(&app, "PUT", "/api/v1/vehicles/CAR001/lock", Some(lock(true))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["data"]["message"],
            "Successful: car is locked, booking has been completed"
        );
        assert_eq!(body["data"]["completed_reservation"], booking_id);

        let uri = format!("/api/v1/reservations/{}", booking_id);
        let (_, body) = call(&app, "GET", &uri, None).await;
        assert_eq!(body["data"]["status"], "completed");

        // The booking is used up.
        let (status, body) = call(&app, "PUT", "/api/v1/vehicles/CAR001/lock", Some(lock(false))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "No valid bookings were found");
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn two_started_bookings_for_one_car_is_500_and_changes_nothing() {
        let (app, current) = seeded().await;

        // Earlier window, no overlap with the seeded one, never returned.
        let now = Utc::now();
        let (status, body) = call(
            &app,
            "POST",
            "/api/v1/reservations",
            Some(json!({
                "user_id": "donald@gmail.com",
                "vehicle_id": "CAR001",
                "start": (now - Duration::hours(5)).to_rfc3339(),
                "end": (now - Duration::hours(3)).to_rfc3339(),
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let overdue = body["data"]["id"].as_i64().unwrap();

        let (status, body) = call(
            &app,
            "PUT",
            "/api/v1/vehicles/CAR001/lock",
            Some(json!({"user_id": "donald@gmail.com", "locked": false})),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["success"], false);
        let message = body["error"].as_str().unwrap();
        assert!(message.contains("Multiple valid bookings"), "{}", message);
        assert!(message.contains("CAR001"), "{}", message);
        assert!(message.contains(&current.to_string()), "{}", message);
        assert!(message.contains(&overdue.to_string()), "{}", message);

        let (_, body) = call(&app, "GET", "/api/v1/vehicles/CAR001", None).await;
        assert_eq!(body["data"]["locked"], true);
        for id in [current, overdue] {
            let (_, body) = call(&app, "GET", &format!("/api/v1/reservations/{}", id), None).await;
            assert_eq!(body["data"]["status"], "active");
        }
    }

    #[tokio::test]
    async fn lock_for_unknown_vehicle_is_404() {
        let (app, _) = seeded().await;
        let (status, _) = call(
            &app,
            "PUT",
            "/api/v1/vehicles/CAR999/lock",
            Some(json!({"user_id": "donald@gmail.com", "locked": false})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn out_of_range_position_is_rejected_and_not_stored() {
        let (app, _) = seeded().await;
        let (status, body) = call(
            &app,
            "PUT",
            "/api/v1/vehicles/CAR001/position",
            Some(json!({"latitude": 95.0, "longitude": 10.0})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("lat"));

        let (_, body) = call(&app, "GET", "/api/v1/vehicles/CAR001", None).await;
        assert!(body["data"]["latitude"].is_null());

        let (status, body) = call(
            &app,
            "PUT",
            "/api/v1/vehicles/CAR001/position",
            Some(json!({"latitude": -37.81, "longitude": 144.96})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["latitude"], -37.81);
    }

    #[tokio::test]
    async fn availability_excludes_booked_vehicles() {
        let (app, _) = seeded().await;
        let now = Utc::now();
        let uri = |start: chrono::DateTime<Utc>, end: chrono::DateTime<Utc>| {
            format!(
                "/api/v1/vehicles/available?start={}&end={}",
                start.format("%Y-%m-%dT%H:%M:%S"),
                end.format("%Y-%m-%dT%H:%M:%S")
            )
        };

        let (status, body) = call(&app, "GET", &uri(now, now + Duration::minutes(30)), None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["data"].as_array().unwrap().is_empty());

        let later = now + Duration::hours(3);
        let (_, body) = call(&app, "GET", &uri(later, later + Duration::hours(1)), None).await;
        assert_eq!(body["data"][0]["id"], "CAR001");
        assert_eq!(body["data"][0]["model"]["make"], "Toyota");

        let (status, _) = call(&app, "GET", &uri(later, now), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn overlapping_booking_is_409() {
        let (app, _) = seeded().await;
        let now = Utc::now();
        let (status, _) = call(
            &app,
            "POST",
            "/api/v1/reservations",
            Some(json!({
                "user_id": "donald@gmail.com",
                "vehicle_id": "CAR001",
                "start": now.to_rfc3339(),
                "end": (now + Duration::hours(2)).to_rfc3339(),
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn status_must_be_a_known_name() {
        let (app, booking_id) = seeded().await;
        let uri = format!("/api/v1/reservations/{}/status", booking_id);

        let (status, _) = call(&app, "PUT", &uri, Some(json!({"status": "bogus"}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let (status, _) = call(&app, "PUT", &uri, Some(json!({"status": 1}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = call(&app, "PUT", &uri, Some(json!({"status": "cancelled"}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["status"], "cancelled");

        let (_, body) = call(&app, "GET", "/api/v1/reservations?status=cancelled", None).await;
        assert_eq!(body["data"].as_array().unwrap().len(), 1);
        let (status, _) = call(&app, "GET", "/api/v1/reservations?status=expired", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn authenticate_distinguishes_outcomes() {
        let (app, _) = seeded().await;
        let auth = |password: &str| json!({"email": "donald@gmail.com", "password": password});

        let (status, body) = call(&app, "POST", "/api/v1/users/authenticate", Some(auth("quack-quack"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["email"], "donald@gmail.com");
        assert!(body["data"].get("password_hash").is_none());

        let (status, _) = call(&app, "POST", "/api/v1/users/authenticate", Some(auth("wrong"))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _) = call(&app, "GET", "/api/v1/users/nobody@gmail.com", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn user_list_omits_password_hashes() {
        let (app, _) = seeded().await;
        let (status, body) = call(&app, "GET", "/api/v1/users", None).await;
        assert_eq!(status, StatusCode::OK);

        let users = body["data"].as_array().unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0]["email"], "donald@gmail.com");
        assert!(users[0].get("password_hash").is_none());
        assert!(users[0].get("password").is_none());
    }

    #[tokio::test]
    async fn invalid_registration_is_422() {
        let (status, _) = call(
            &app(),
            "POST",
            "/api/v1/users",
            Some(json!({"email": "not-an-email", "first_name": "A", "last_name": "B", "password": "secret1"})),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }
}
