use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use serde::Serialize;

use super::error::AppResult;
use super::form::{AddFieldRequest, FormAction};
use super::render::ADD_FIELD_ROUTE;
use super::state::AppState;
use super::translator::AlterationOutcome;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

pub async fn healthcheck() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

#[derive(Debug, Serialize)]
pub struct AddFieldResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statement: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_context: Option<String>,
}

/// One handler, two paths: a persistence submission runs the translator and
/// answers with the alteration outcome; anything else re-renders the
/// editable form with the resolved field-group count.
pub async fn add_field(
    State(state): State<AppState>,
    Json(payload): Json<AddFieldRequest>,
) -> AppResult<Response> {
    let (db, table) = payload.target()?;

    match payload.into_action() {
        FormAction::Save(save) => {
            let outcome = state.translator.apply(&db, &table, save).await;
            Ok(match outcome {
                AlterationOutcome::Applied { statement, message } => Json(AddFieldResponse {
                    success: true,
                    message: Some(message),
                    statement: Some(statement),
                    error: None,
                    error_context: None,
                })
                .into_response(),
                AlterationOutcome::Rejected {
                    diagnostic,
                    error_context,
                } => (
                    StatusCode::BAD_REQUEST,
                    Json(AddFieldResponse {
                        success: false,
                        message: None,
                        statement: None,
                        error: Some(diagnostic),
                        error_context: Some(error_context),
                    }),
                )
                    .into_response(),
            })
        }
        FormAction::Render(view) => {
            let schema = state.table_info.table_info(&db, &table).await?;
            let html = state.renderer.render(
                ADD_FIELD_ROUTE,
                &db,
                &schema,
                &view.resolution,
                &view.placement,
            );
            Ok(Html(html).into_response())
        }
    }
}
