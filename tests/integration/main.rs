//! HTTP-level tests driving the full router over the in-memory store

mod authors;
mod book_instances;
mod books;
mod common;
mod genres;
mod pages;
