use super::page::{render, PageOutput};
use super::ServerState;
use crate::build::BuildRequest;
use crate::package::ARCHIVE_NAME;
use axum::{
    extract::{Form, Path, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info};
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct CompileForm {
    #[serde(default)]
    pub repo_url: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

pub async fn index_handler() -> Html<String> {
    Html(render("", PageOutput::Empty))
}

pub async fn compile_handler(
    State(state): State<Arc<ServerState>>,
    Form(form): Form<CompileForm>,
) -> Html<String> {
    let repo_url = form.repo_url.trim().to_string();
    info!(url = %repo_url, "Compile requested");

    let pipeline = state.pipeline.clone();
    let request = BuildRequest::new(repo_url.clone());
    let result = tokio::task::spawn_blocking(move || pipeline.run(&request)).await;

    let outcome = match result {
        Ok(Ok(outcome)) => outcome,
        Ok(Err(e)) => {
            return Html(render(&repo_url, PageOutput::Message(&e.user_message())));
        }
        Err(e) => {
            error!(error = %e, "Build task did not complete");
            let message = format!("Error: {}", e);
            return Html(render(&repo_url, PageOutput::Message(&message)));
        }
    };

    state
        .archives
        .write()
        .await
        .insert(outcome.id, outcome.archive.clone());

    let href = format!("/download/{}", outcome.id);
    Html(render(
        &repo_url,
        PageOutput::Download {
            href: &href,
            file_name: ARCHIVE_NAME,
        },
    ))
}

pub async fn download_handler(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<Uuid>,
) -> Response {
    let archive = match state.archives.read().await.get(&id) {
        Some(path) => path.to_path_buf(),
        None => return (StatusCode::NOT_FOUND, "Unknown build").into_response(),
    };

    match tokio::fs::read(&archive).await {
        Ok(bytes) => (
            [
                (header::CONTENT_TYPE, "application/zip".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", ARCHIVE_NAME),
                ),
            ],
            bytes,
        )
            .into_response(),
        Err(e) => {
            error!(archive = %archive.display(), error = %e, "Failed to read archive");
            (StatusCode::NOT_FOUND, "Archive no longer available").into_response()
        }
    }
}

pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: crate::VERSION,
    })
}
