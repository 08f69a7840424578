//! Genre pages

use axum::{
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use minijinja::context;

use super::{form_response, render, EntityId};
use crate::{
    error::AppResult,
    forms::FormFields,
    services::{genres::GenreForm, DeleteOutcome},
    AppState,
};

const LIST_URL: &str = "/catalog/genres";
const NOT_FOUND: &str = "Genre not found";

fn form_page(state: &AppState, title: &str, form: GenreForm) -> AppResult<Html<String>> {
    render(
        state,
        "genre_form.html",
        context! { title, genre => form.genre, errors => form.errors },
    )
}

pub async fn list(State(state): State<AppState>) -> AppResult<Html<String>> {
    let genre_list = state.services.genres.list().await?;
    render(&state, "genre_list.html", context! { title => "Genre List", genre_list })
}

pub async fn detail(State(state): State<AppState>, id: EntityId) -> AppResult<Html<String>> {
    let detail = state.services.genres.detail(id.require(NOT_FOUND)?).await?;
    render(
        &state,
        "genre_detail.html",
        context! { title => "Genre Detail", genre => detail.genre, genre_books => detail.genre_books },
    )
}

pub async fn create_form(State(state): State<AppState>) -> AppResult<Html<String>> {
    form_page(&state, "Create Genre", state.services.genres.create_form())
}

pub async fn create(
    State(state): State<AppState>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> AppResult<Response> {
    let outcome = state.services.genres.create(&FormFields::from(pairs)).await?;
    form_response(outcome, |form| form_page(&state, "Create Genre", form))
}

pub async fn delete_form(State(state): State<AppState>, id: EntityId) -> AppResult<Response> {
    let Some(id) = id.0 else {
        return Ok(Redirect::to(LIST_URL).into_response());
    };
    match state.services.genres.delete_page(id).await? {
        Some(detail) => Ok(render(
            &state,
            "genre_delete.html",
            context! { title => "Delete Genre", genre => detail.genre, genre_books => detail.genre_books },
        )?
        .into_response()),
        None => Ok(Redirect::to(LIST_URL).into_response()),
    }
}

pub async fn delete(State(state): State<AppState>, id: EntityId) -> AppResult<Response> {
    let Some(id) = id.0 else {
        return Ok(Redirect::to(LIST_URL).into_response());
    };
    match state.services.genres.delete(id).await? {
        DeleteOutcome::Blocked(detail) => Ok(render(
            &state,
            "genre_delete.html",
            context! { title => "Delete Genre", genre => detail.genre, genre_books => detail.genre_books },
        )?
        .into_response()),
        DeleteOutcome::Deleted | DeleteOutcome::Missing => Ok(Redirect::to(LIST_URL).into_response()),
    }
}

pub async fn update_form(State(state): State<AppState>, id: EntityId) -> AppResult<Html<String>> {
    let form = state.services.genres.update_form(id.require(NOT_FOUND)?).await?;
    form_page(&state, "Update Genre", form)
}

pub async fn update(
    State(state): State<AppState>,
    id: EntityId,
    Form(pairs): Form<Vec<(String, String)>>,
) -> AppResult<Response> {
    let id = id.require(NOT_FOUND)?;
    let outcome = state.services.genres.update(id, &FormFields::from(pairs)).await?;
    form_response(outcome, |form| form_page(&state, "Update Genre", form))
}
