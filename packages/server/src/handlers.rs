//! HTTP handler functions for the tree census API.

use actix_web::{HttpResponse, web};
use tree_census_analytics::{main_map, project_columns, status_map};
use tree_census_server_models::{
    ApiHealth, DashboardEvent, HealthQueryParams, LayoutQueryParams, Page, StatusQueryParams,
};

use crate::AppState;
use crate::dispatch::{dispatch, layout_for};

/// `GET /api/health`
pub async fn health(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
        records: state.dataset.len(),
    })
}

/// `GET /api/layout`
///
/// Resolves a URL path to its page layout.
pub async fn layout(
    state: web::Data<AppState>,
    params: web::Query<LayoutQueryParams>,
) -> HttpResponse {
    let page = Page::from_pathname(params.pathname.as_deref().unwrap_or("/"));
    HttpResponse::Ok().json(layout_for(&state, page))
}

/// `GET /api/analytics`
///
/// Returns the precomputed summary charts.
pub async fn analytics(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(&*state.analytics)
}

/// `GET /api/map`
///
/// District map for a health checklist selection.
pub async fn map(
    state: web::Data<AppState>,
    params: web::Query<HealthQueryParams>,
) -> HttpResponse {
    let filter = params.filter(&state.analytics.health_values);
    HttpResponse::Ok().json(main_map(&state.dataset, &filter))
}

/// `GET /api/table`
///
/// Data table rows for a health checklist selection.
pub async fn table(
    state: web::Data<AppState>,
    params: web::Query<HealthQueryParams>,
) -> HttpResponse {
    let filter = params.filter(&state.analytics.health_values);
    HttpResponse::Ok().json(project_columns(&state.dataset, &filter))
}

/// `GET /api/analytics/map`
///
/// District map for one status tab. Without a `status` parameter the
/// first tab is used.
pub async fn analytics_map(
    state: web::Data<AppState>,
    params: web::Query<StatusQueryParams>,
) -> HttpResponse {
    let status = params
        .status
        .as_deref()
        .or_else(|| state.analytics.default_status())
        .unwrap_or_default();
    HttpResponse::Ok().json(status_map(&state.dataset, status))
}

/// `POST /api/events`
///
/// Dispatches a client interaction and returns the resulting component
/// updates.
pub async fn events(
    state: web::Data<AppState>,
    event: web::Json<DashboardEvent>,
) -> HttpResponse {
    HttpResponse::Ok().json(dispatch(&state, event.into_inner()))
}
