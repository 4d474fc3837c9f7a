//! Demand list, detail view and assignment routes.

use axum::extract::{Path, Query};
use axum::{Extension, Json};
use serde::{Deserialize, Serialize};

use crate::catalog::AreaFilter;
use crate::http::guard::ConsoleSession;
use crate::http::response::{ok, ApiResponse};
use crate::models::demand::Demand;
use crate::Result;

/// Demand as rendered by the console, with its status label resolved.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DemandView {
    /// The demand record.
    #[serde(flatten)]
    pub demand: Demand,
    /// Console label for the status.
    pub status_label: &'static str,
}

impl From<Demand> for DemandView {
    fn from(demand: Demand) -> Self {
        Self {
            status_label: demand.status.label(),
            demand,
        }
    }
}

/// `GET /demands` query string.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    /// Area label, or `all`.
    #[serde(default)]
    pub area: Option<String>,
    /// Free-text search term.
    #[serde(default)]
    pub q: Option<String>,
    /// Reload from the store before filtering.
    #[serde(default)]
    pub refresh: bool,
}

/// `POST /demands/{id}/involved` body.
#[derive(Debug, Deserialize)]
pub struct AddPersonRequest {
    /// Professional to assign.
    pub candidate_id: String,
}

/// List demands matching the area filter and search term.
///
/// # Errors
///
/// Returns the store error if demands cannot be loaded.
pub async fn list(
    Extension(session): Extension<ConsoleSession>,
    Query(query): Query<ListQuery>,
) -> Result<ApiResponse<Vec<DemandView>>> {
    if query.refresh {
        session.console.refresh_demands().await?;
    }
    let area = AreaFilter::parse(query.area.as_deref().unwrap_or_default());
    let demands = session
        .console
        .visible_demands(&area, query.q.as_deref().unwrap_or_default())
        .await?;
    Ok(ok(demands.into_iter().map(DemandView::from).collect()))
}

/// Area labels present on the loaded demands.
///
/// # Errors
///
/// Returns the store error if demands cannot be loaded.
pub async fn area_options(
    Extension(session): Extension<ConsoleSession>,
) -> Result<ApiResponse<Vec<String>>> {
    Ok(ok(session.console.area_options().await?))
}

/// Open a demand in the detail view.
///
/// # Errors
///
/// Returns `AppError::NotFound` for an unknown id.
pub async fn open(
    Extension(session): Extension<ConsoleSession>,
    Path(id): Path<String>,
) -> Result<ApiResponse<DemandView>> {
    Ok(ok(session.console.open_demand(&id).await?.into()))
}

/// The demand currently open in the detail view.
pub async fn selected(
    Extension(session): Extension<ConsoleSession>,
) -> ApiResponse<Option<DemandView>> {
    ok(session.console.selected_demand().await.map(DemandView::from))
}

/// Close the detail view.
pub async fn close(Extension(session): Extension<ConsoleSession>) -> ApiResponse<Option<DemandView>> {
    session.console.close_demand().await;
    ok(None)
}

/// Assign a professional to a demand.
///
/// # Errors
///
/// Returns the assignment rejection or write failure.
pub async fn add_person(
    Extension(session): Extension<ConsoleSession>,
    Path(id): Path<String>,
    Json(body): Json<AddPersonRequest>,
) -> Result<ApiResponse<DemandView>> {
    let demand = session
        .console
        .add_person(&id, body.candidate_id.trim())
        .await?;
    Ok(ok(demand.into()))
}

/// Unassign a person from a demand.
///
/// # Errors
///
/// Returns the assignment rejection or write failure.
pub async fn remove_person(
    Extension(session): Extension<ConsoleSession>,
    Path((id, uid)): Path<(String, String)>,
) -> Result<ApiResponse<DemandView>> {
    Ok(ok(session.console.remove_person(&id, &uid).await?.into()))
}
