use crate::core::{distance, DistanceUnit, PageState, SchoolCard, SearchError, SortOrder, Transition};
use crate::models::{
    DistanceQuery, DistanceResponse, ErrorResponse, GeoPoint, GeolocationResult, HealthResponse,
    HoverRequest, HoverResponse, PositionResponse, QueryResponse, QueryUpdateRequest,
    RefreshResponse, SchoolListResponse, SchoolsQuery, SearchRequest, SearchResponse, UserPosition,
};
use crate::services::{Geolocation, Geolocator, SchoolApiClient, SchoolApiError};
use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;
use tokio::sync::RwLock;
use validator::Validate;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub page: Arc<RwLock<PageState>>,
    pub school_api: Arc<SchoolApiClient>,
}

impl AppState {
    pub fn new(page: PageState, school_api: SchoolApiClient) -> Self {
        Self {
            page: Arc::new(RwLock::new(page)),
            school_api: Arc::new(school_api),
        }
    }

    /// Move the page to its next state
    pub async fn apply(&self, transition: Transition) {
        let mut page = self.page.write().await;
        *page = std::mem::take(&mut *page).apply(transition);
    }

    /// Fetch the list and swap it in; on failure the current list stays
    pub async fn refresh_schools(&self) -> Result<usize, SchoolApiError> {
        let schools = self.school_api.fetch_schools().await?;
        let count = schools.len();
        self.apply(Transition::SchoolsLoaded(schools)).await;
        tracing::info!("Loaded {} schools", count);
        Ok(count)
    }

    /// Run one geolocation request and record its outcome
    pub async fn settle_position<G: Geolocator>(&self, geolocation: &Geolocation<G>) -> GeolocationResult {
        let result = geolocation.current_position().await;
        match result {
            GeolocationResult::Resolved(point) => {
                tracing::info!("Position resolved: {}, {}", point.latitude, point.longitude);
            }
            other => tracing::warn!("No position available: {:?}", other),
        }
        self.apply(Transition::PositionSettled(result)).await;
        result
    }
}

/// Configure all directory routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/schools", web::get().to(list_schools))
        .route("/schools/refresh", web::post().to(refresh))
        .route("/schools/{id}", web::get().to(get_school))
        .route("/query", web::put().to(update_query))
        .route("/search", web::post().to(search))
        .route("/position", web::post().to(report_position))
        .route("/hover", web::put().to(hover))
        .route("/distance", web::get().to(compute_distance));
}

fn bad_request(error: &str, message: impl Into<String>) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse::new(error, message, 400))
}

fn not_found(error: &str, message: impl Into<String>) -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(error, message, 404))
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let page = state.page.read().await;
    let schools = page.directory().len();

    let status = if schools > 0 { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        schools,
        position_resolved: page.position().is_valid(),
        timestamp: chrono::Utc::now(),
    })
}

/// Sorted school listing
///
/// GET /api/v1/schools?lat={lat}&lng={lng}
///
/// Without coordinates the stored position decides the order.
async fn list_schools(
    state: web::Data<AppState>,
    query: web::Query<SchoolsQuery>,
) -> impl Responder {
    if let Err(errors) = query.validate() {
        return bad_request("Validation failed", errors.to_string());
    }

    let page = state.page.read().await;
    let position = query
        .point()
        .map_or(*page.position(), UserPosition::Resolved);

    let schools: Vec<SchoolCard> = page
        .directory()
        .sorted_view(&position)
        .into_iter()
        .map(|school| SchoolCard::describe(school, &position))
        .collect();

    tracing::debug!("Listing {} schools", schools.len());

    HttpResponse::Ok().json(SchoolListResponse {
        total: schools.len(),
        schools,
        sorted_by: SortOrder::for_position(&position),
    })
}

/// Single school card
///
/// GET /api/v1/schools/{id}
async fn get_school(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let id = path.into_inner();
    let page = state.page.read().await;

    match page.directory().get(&id) {
        Some(school) => HttpResponse::Ok().json(SchoolCard::describe(school, page.position())),
        None => not_found("School not found", format!("No school with id {}", id)),
    }
}

/// Re-fetch the school list
///
/// POST /api/v1/schools/refresh
async fn refresh(state: web::Data<AppState>) -> impl Responder {
    match state.refresh_schools().await {
        Ok(schools) => HttpResponse::Ok().json(RefreshResponse { schools }),
        Err(e) => {
            tracing::error!("Failed to refresh schools: {}", e);
            HttpResponse::BadGateway().json(ErrorResponse::new(
                "Failed to fetch schools",
                e.to_string(),
                502,
            ))
        }
    }
}

/// Store the search box text
///
/// PUT /api/v1/query
async fn update_query(
    state: web::Data<AppState>,
    req: web::Json<QueryUpdateRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return bad_request("Validation failed", errors.to_string());
    }

    let query = req.into_inner().query;
    state.apply(Transition::QueryEdited(query.clone())).await;

    HttpResponse::Ok().json(QueryResponse { query })
}

/// Submit a search
///
/// POST /api/v1/search
///
/// Request body (optional):
/// ```json
/// { "query": "string" }
/// ```
///
/// An empty body searches the stored query. A malformed body is rejected
/// and leaves the stored query alone; otherwise the stored query is cleared
/// whatever the outcome.
async fn search(state: web::Data<AppState>, body: web::Bytes) -> impl Responder {
    let req = if body.iter().all(u8::is_ascii_whitespace) {
        SearchRequest::default()
    } else {
        match serde_json::from_slice::<SearchRequest>(&body) {
            Ok(req) => req,
            Err(e) => {
                tracing::info!("Rejected search body: {}", e);
                return bad_request("invalid_json", format!("Invalid JSON: {}", e));
            }
        }
    };
    if let Err(errors) = req.validate() {
        return bad_request("Validation failed", errors.to_string());
    }

    let mut page = state.page.write().await;
    let (next, outcome) = std::mem::take(&mut *page).submit_search(req.query);
    *page = next;

    match outcome {
        Ok(school) => {
            tracing::info!("Search resolved to {} ({})", school.name, school.id);
            HttpResponse::Ok().json(SearchResponse {
                scroll_target: school.id.clone(),
                school: SchoolCard::describe(&school, page.position()),
            })
        }
        Err(e @ SearchError::QueryTooShort { .. }) => bad_request("query_too_short", e.to_string()),
        Err(e @ SearchError::NotFound(_)) => {
            tracing::info!("{}", e);
            not_found("not_found", e.to_string())
        }
    }
}

/// Report a geolocation outcome
///
/// POST /api/v1/position
///
/// Request body:
/// ```json
/// { "status": "resolved", "latitude": 0.0, "longitude": 0.0 }
/// { "status": "denied" | "unavailable" | "timed_out" }
/// ```
async fn report_position(
    state: web::Data<AppState>,
    req: web::Json<GeolocationResult>,
) -> impl Responder {
    let outcome = req.into_inner();

    if let GeolocationResult::Resolved(point) = outcome {
        if let Err(e) = point.validate() {
            return bad_request("Invalid position", e.to_string());
        }
    }

    state.apply(Transition::PositionSettled(outcome)).await;
    tracing::debug!("Position settled: {:?}", outcome);

    HttpResponse::Ok().json(PositionResponse {
        position_valid: UserPosition::from(outcome).is_valid(),
        outcome,
    })
}

/// Set or clear the hovered school
///
/// PUT /api/v1/hover
async fn hover(state: web::Data<AppState>, req: web::Json<HoverRequest>) -> impl Responder {
    let school_id = req.into_inner().school_id;

    let mut page = state.page.write().await;
    if let Some(id) = &school_id {
        if page.directory().get(id).is_none() {
            return not_found("School not found", format!("No school with id {}", id));
        }
    }

    *page = std::mem::take(&mut *page).apply(Transition::HoverChanged(school_id));

    HttpResponse::Ok().json(HoverResponse {
        hovered: page
            .hovered()
            .map(|school| SchoolCard::describe(school, page.position())),
    })
}

/// Distance between two arbitrary points
///
/// GET /api/v1/distance?fromLat=..&fromLng=..&toLat=..&toLng=..&unit=K
async fn compute_distance(query: web::Query<DistanceQuery>) -> impl Responder {
    let unit = query
        .unit
        .as_deref()
        .map(DistanceUnit::from_code)
        .unwrap_or_default();

    let from = GeoPoint { latitude: query.from_lat, longitude: query.from_lng };
    let to = GeoPoint { latitude: query.to_lat, longitude: query.to_lng };

    HttpResponse::Ok().json(DistanceResponse {
        distance: distance(from, to, unit),
        unit,
    })
}
