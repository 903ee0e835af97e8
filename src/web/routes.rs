use axum::extract::multipart::{Field, MultipartError};
use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::Json;
use axum::Router;
use tracing::{debug, warn};

use super::pages::{render_board_page, BoardPageParams};
use super::AppState;
use crate::draft::{Draft, SubmitError};
use crate::media::SelectedFile;

const UPLOAD_TOO_LARGE_MESSAGE: &str = "Attached file is too large.";
const MALFORMED_FORM_MESSAGE: &str = "Could not read the submitted form. Please try again.";

/// Create the router with all routes.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(home))
        .route("/posts", post(create_post))
        .route("/posts/:id/like", post(like_post))
        .route("/api/posts", get(api_posts))
        .route("/healthz", get(health))
}

// ========== HTML Routes ==========

async fn home(State(state): State<AppState>) -> Response {
    render_board(&state, &Draft::new(), StatusCode::OK).await
}

/// Handler for the compose form (POST /posts).
///
/// Success redirects back to the board. Any failure re-renders the board with
/// the submitted fields so nothing the user typed is lost.
async fn create_post(State(state): State<AppState>, multipart: Multipart) -> Response {
    let mut draft = match read_draft(multipart, state.config.max_upload_bytes).await {
        Ok(draft) => draft,
        Err(DraftReadError::TooLarge(mut draft)) => {
            warn!("Rejected oversized attachment");
            draft.fail(UPLOAD_TOO_LARGE_MESSAGE);
            return render_board(&state, &draft, StatusCode::PAYLOAD_TOO_LARGE).await;
        }
        Err(DraftReadError::Malformed(e)) => {
            warn!(error = %e, "Failed to read compose form");
            let mut draft = Draft::new();
            draft.fail(MALFORMED_FORM_MESSAGE);
            return render_board(&state, &draft, StatusCode::BAD_REQUEST).await;
        }
    };

    match draft.submit(&state.board).await {
        Ok(_) => Redirect::to("/").into_response(),
        Err(e) => {
            let status = match e {
                SubmitError::MissingFields => StatusCode::UNPROCESSABLE_ENTITY,
                SubmitError::Media(_) | SubmitError::Persist(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            };
            debug!(error = %e, "Submit failed");
            render_board(&state, &draft, status).await
        }
    }
}

/// Handler for the like button (POST /posts/:id/like).
///
/// Always redirects back; a failed save shows up as the board's banner.
async fn like_post(State(state): State<AppState>, Path(id): Path<i64>) -> Response {
    if let Err(e) = state.board.like(id).await {
        debug!(post_id = id, error = %e, "Like not saved; banner set");
    }
    Redirect::to("/").into_response()
}

async fn render_board(state: &AppState, draft: &Draft, status: StatusCode) -> Response {
    let posts = state.board.posts().await;
    let board_banner = state.board.banner().await;
    let banner = draft.error.as_deref().or(board_banner.as_deref());

    let params = BoardPageParams::new(&posts, draft).banner(banner);
    (status, Html(render_board_page(&params).into_string())).into_response()
}

// ========== Multipart ==========

#[derive(Debug)]
enum DraftReadError {
    TooLarge(Draft),
    Malformed(MultipartError),
}

/// Collect the compose form fields into a draft.
///
/// Both file inputs feed the same selection; a later non-empty file replaces
/// an earlier one.
async fn read_draft(
    mut multipart: Multipart,
    max_upload_bytes: usize,
) -> Result<Draft, DraftReadError> {
    let mut draft = Draft::new();

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => return Err(classify(e, draft)),
        };

        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "title" => match field.text().await {
                Ok(text) => draft.title = text,
                Err(e) => return Err(classify(e, draft)),
            },
            "content" => match field.text().await {
                Ok(text) => draft.content = text,
                Err(e) => return Err(classify(e, draft)),
            },
            "media" | "document" => match read_file(field, max_upload_bytes).await {
                Ok(Some(file)) => draft.select_file(file),
                Ok(None) => {}
                Err(FileReadError::TooLarge) => return Err(DraftReadError::TooLarge(draft)),
                Err(FileReadError::Multipart(e)) => return Err(classify(e, draft)),
            },
            other => debug!(field = other, "Ignoring unknown form field"),
        }
    }

    Ok(draft)
}

fn classify(e: MultipartError, draft: Draft) -> DraftReadError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        DraftReadError::TooLarge(draft)
    } else {
        DraftReadError::Malformed(e)
    }
}

enum FileReadError {
    TooLarge,
    Multipart(MultipartError),
}

/// Read one file part. A part without bytes means no file was chosen.
async fn read_file(
    mut field: Field<'_>,
    max_upload_bytes: usize,
) -> Result<Option<SelectedFile>, FileReadError> {
    let file_name = field.file_name().unwrap_or_default().to_string();
    let content_type = field.content_type().map(ToString::to_string);

    let mut bytes = Vec::new();
    while let Some(chunk) = field.chunk().await.map_err(FileReadError::Multipart)? {
        if bytes.len() + chunk.len() > max_upload_bytes {
            return Err(FileReadError::TooLarge);
        }
        bytes.extend_from_slice(&chunk);
    }

    if bytes.is_empty() {
        if !file_name.is_empty() {
            debug!(file_name = %file_name, "Ignoring empty file");
        }
        return Ok(None);
    }

    Ok(Some(SelectedFile::new(file_name, content_type, bytes)))
}

// ========== JSON API ==========

async fn api_posts(State(state): State<AppState>) -> Response {
    Json(state.board.posts().await).into_response()
}

async fn health() -> &'static str {
    "OK"
}
