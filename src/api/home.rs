//! Catalog home page

use axum::{extract::State, response::Html};
use minijinja::context;

use super::render;
use crate::{error::AppResult, AppState};

pub async fn index(State(state): State<AppState>) -> AppResult<Html<String>> {
    let summary = state.services.catalog.summary().await?;
    render(
        &state,
        "index.html",
        context! {
            title => "Local Library Home",
            book_count => summary.book_count,
            book_instance_count => summary.book_instance_count,
            book_instance_available_count => summary.book_instance_available_count,
            author_count => summary.author_count,
            genre_count => summary.genre_count,
        },
    )
}
