//! HTTP handlers

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use campus_nav_core::routing::RequestGraph;
use campus_nav_core::{Coordinate, Network, Node, RoutableLocation, Route, list_routable_locations};
use geojson::Feature;
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::state::AppState;

/// Either end of a route request: a known location or a free position
/// that is snapped to the nearest node.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Endpoint {
    Location { id: String },
    Position { lat: f64, lng: f64 },
}

#[derive(Debug, Deserialize)]
pub struct RouteRequest {
    pub start: Endpoint,
    pub end: Endpoint,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RouteResponse {
    pub start: String,
    pub end: String,
    pub distance_m: f64,
    /// `[lat, lng]` pairs from start to end
    pub coordinates: Vec<[f64; 2]>,
}

impl From<Route> for RouteResponse {
    fn from(route: Route) -> Self {
        let coordinates = route
            .coordinates()
            .into_iter()
            .map(|c| [c.lat, c.lng])
            .collect();
        Self {
            distance_m: route.distance(),
            start: route.start,
            end: route.end,
            coordinates,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct NewLocation {
    pub id: Option<String>,
    pub name: String,
    pub lat: f64,
    pub lng: f64,
}

pub async fn health() -> &'static str {
    "ok"
}

pub async fn list_locations(
    State(state): State<AppState>,
) -> Result<Json<Vec<RoutableLocation>>, AppError> {
    let custom = state.store.list()?;
    Ok(Json(list_routable_locations(&state.network, &custom)))
}

pub async fn create_location(
    State(state): State<AppState>,
    body: Result<Json<NewLocation>, JsonRejection>,
) -> Result<(StatusCode, Json<Node>), AppError> {
    let Json(request) = body?;
    let name = request.name.trim();
    if name.is_empty() {
        return Err(AppError::Validation("location name is empty".to_string()));
    }

    let custom = state.store.list()?;
    let id = match request.id {
        Some(id) if state.network.contains(&id) => {
            return Err(AppError::Conflict(format!(
                "{id} is a location of the campus network"
            )));
        }
        Some(id) => id,
        None => generate_id(name, &state.network, &custom),
    };

    let stored = state
        .store
        .add(Node::custom(id, request.lat, request.lng, name))?;
    tracing::info!(id = %stored.id, "custom location added");
    Ok((StatusCode::CREATED, Json(stored)))
}

pub async fn delete_location(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    if state.store.remove(&id)? {
        tracing::info!(%id, "custom location removed");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("no custom location {id}")))
    }
}

pub async fn route(
    State(state): State<AppState>,
    body: Result<Json<RouteRequest>, JsonRejection>,
) -> Result<Json<RouteResponse>, AppError> {
    let Json(request) = body?;
    let route = compute(&state, request).await?;
    Ok(Json(route.into()))
}

pub async fn route_geojson(
    State(state): State<AppState>,
    body: Result<Json<RouteRequest>, JsonRejection>,
) -> Result<Json<Feature>, AppError> {
    let Json(request) = body?;
    let route = compute(&state, request).await?;
    Ok(Json(route.to_geojson()?))
}

/// Runs the search on the blocking pool with a snapshot of the custom
/// locations taken when the request arrived.
async fn compute(state: &AppState, request: RouteRequest) -> Result<Route, AppError> {
    let network = state.network.clone();
    let custom = state.store.list()?;

    tokio::task::spawn_blocking(move || route_between(&network, &custom, &request))
        .await
        .map_err(|e| AppError::Internal(format!("route task failed: {e}")))?
}

fn route_between(network: &Network, custom: &[Node], request: &RouteRequest) -> Result<Route, AppError> {
    let graph = RequestGraph::build(network, custom)?;
    let start = endpoint_id(&graph, &request.start)?;
    let end = endpoint_id(&graph, &request.end)?;
    Ok(graph.route(&start, &end)?)
}

fn endpoint_id(graph: &RequestGraph<'_>, endpoint: &Endpoint) -> Result<String, AppError> {
    match endpoint {
        Endpoint::Location { id } => Ok(id.clone()),
        Endpoint::Position { lat, lng } => {
            let coordinate = Coordinate::new(*lat, *lng).validate()?;
            Ok(graph.resolve(coordinate)?.id.clone())
        }
    }
}

/// `custom-<slug>` from the location name, suffixed until unique
fn generate_id(name: &str, network: &Network, custom: &[Node]) -> String {
    let mut slug = String::new();
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    let slug = slug.trim_end_matches('-');
    let base = if slug.is_empty() {
        "custom".to_string()
    } else {
        format!("custom-{slug}")
    };

    let taken = |id: &str| network.contains(id) || custom.iter().any(|node| node.id == id);
    if !taken(&base) {
        return base;
    }
    let mut n = 2;
    loop {
        let candidate = format!("{base}-{n}");
        if !taken(&candidate) {
            return candidate;
        }
        n += 1;
    }
}
