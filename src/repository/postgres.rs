//! PostgreSQL catalog store.
//!
//! Each collection is a table. References between documents are plain UUID
//! columns (`books.genre_ids` is a `UUID[]`), resolved by explicit lookups.

use async_trait::async_trait;
use sqlx::{postgres::PgRow, Pool, Postgres, Row};
use uuid::Uuid;

use super::Repository;
use crate::{
    error::AppResult,
    models::{
        Author, AuthorData, Book, BookData, BookInstance, BookInstanceData, BookStatus, Genre,
        GenreData,
    },
};

const GENRE_COLUMNS: &str = "id, name";
const AUTHOR_COLUMNS: &str = "id, first_name, family_name, date_of_birth, date_of_death";
const BOOK_COLUMNS: &str = "id, title, author_id, summary, isbn, genre_ids";
const BOOK_INSTANCE_COLUMNS: &str = "id, book_id, imprint, status, due_back";

fn genre_from_row(row: &PgRow) -> Result<Genre, sqlx::Error> {
    Ok(Genre {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
    })
}

fn author_from_row(row: &PgRow) -> Result<Author, sqlx::Error> {
    Ok(Author {
        id: row.try_get("id")?,
        first_name: row.try_get("first_name")?,
        family_name: row.try_get("family_name")?,
        date_of_birth: row.try_get("date_of_birth")?,
        date_of_death: row.try_get("date_of_death")?,
    })
}

fn book_from_row(row: &PgRow) -> Result<Book, sqlx::Error> {
    Ok(Book {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        author: row.try_get("author_id")?,
        summary: row.try_get("summary")?,
        isbn: row.try_get("isbn")?,
        genre: row.try_get("genre_ids")?,
    })
}

fn book_instance_from_row(row: &PgRow) -> Result<BookInstance, sqlx::Error> {
    let status: String = row.try_get("status")?;
    Ok(BookInstance {
        id: row.try_get("id")?,
        book: row.try_get("book_id")?,
        imprint: row.try_get("imprint")?,
        status: status.parse().map_err(|e: String| sqlx::Error::Decode(e.into()))?,
        due_back: row.try_get("due_back")?,
    })
}

fn collect<T>(
    rows: Vec<PgRow>,
    map: fn(&PgRow) -> Result<T, sqlx::Error>,
) -> AppResult<Vec<T>> {
    Ok(rows.iter().map(map).collect::<Result<Vec<_>, _>>()?)
}

fn optional<T>(
    row: Option<PgRow>,
    map: fn(&PgRow) -> Result<T, sqlx::Error>,
) -> AppResult<Option<T>> {
    Ok(row.as_ref().map(map).transpose()?)
}

#[derive(Clone)]
pub struct PgRepository {
    pool: Pool<Postgres>,
}

impl PgRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    async fn count(&self, query: &str) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(query).fetch_one(&self.pool).await?;
        Ok(count)
    }

    async fn delete(&self, query: &str, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query(query).bind(id).execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl Repository for PgRepository {
    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn close(&self) {
        self.pool.close().await;
    }

    // =========================================================================
    // GENRES
    // =========================================================================

    async fn genres_list(&self) -> AppResult<Vec<Genre>> {
        let rows = sqlx::query(&format!("SELECT {} FROM genres ORDER BY lower(name)", GENRE_COLUMNS))
            .fetch_all(&self.pool)
            .await?;
        collect(rows, genre_from_row)
    }

    async fn genres_get(&self, id: Uuid) -> AppResult<Option<Genre>> {
        let row = sqlx::query(&format!("SELECT {} FROM genres WHERE id = $1", GENRE_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        optional(row, genre_from_row)
    }

    async fn genres_get_many(&self, ids: &[Uuid]) -> AppResult<Vec<Genre>> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM genres WHERE id = ANY($1) ORDER BY lower(name)",
            GENRE_COLUMNS
        ))
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;
        collect(rows, genre_from_row)
    }

    async fn genres_create(&self, data: &GenreData) -> AppResult<Genre> {
        let row = sqlx::query(&format!(
            "INSERT INTO genres (id, name) VALUES ($1, $2) RETURNING {}",
            GENRE_COLUMNS
        ))
        .bind(Uuid::new_v4())
        .bind(&data.name)
        .fetch_one(&self.pool)
        .await?;
        Ok(genre_from_row(&row)?)
    }

    async fn genres_find_or_create(&self, data: &GenreData) -> AppResult<(Genre, bool)> {
        let mut tx = self.pool.begin().await?;

        // Concurrent creates of the same name queue here until commit
        sqlx::query("SELECT pg_advisory_xact_lock(hashtext(lower($1)))")
            .bind(&data.name)
            .execute(&mut *tx)
            .await?;

        let existing = sqlx::query(&format!(
            "SELECT {} FROM genres WHERE lower(name) = lower($1) LIMIT 1",
            GENRE_COLUMNS
        ))
        .bind(&data.name)
        .fetch_optional(&mut *tx)
        .await?;
        if let Some(row) = existing {
            tx.commit().await?;
            return Ok((genre_from_row(&row)?, false));
        }

        let row = sqlx::query(&format!(
            "INSERT INTO genres (id, name) VALUES ($1, $2) RETURNING {}",
            GENRE_COLUMNS
        ))
        .bind(Uuid::new_v4())
        .bind(&data.name)
        .fetch_one(&mut *tx)
        .await?;
        tx.commit().await?;
        Ok((genre_from_row(&row)?, true))
    }

    async fn genres_update(&self, id: Uuid, data: &GenreData) -> AppResult<Option<Genre>> {
        let row = sqlx::query(&format!(
            "UPDATE genres SET name = $2 WHERE id = $1 RETURNING {}",
            GENRE_COLUMNS
        ))
        .bind(id)
        .bind(&data.name)
        .fetch_optional(&self.pool)
        .await?;
        optional(row, genre_from_row)
    }

    async fn genres_delete(&self, id: Uuid) -> AppResult<bool> {
        self.delete("DELETE FROM genres WHERE id = $1", id).await
    }

    async fn genres_count(&self) -> AppResult<i64> {
        self.count("SELECT COUNT(*) FROM genres").await
    }

    // =========================================================================
    // AUTHORS
    // =========================================================================

    async fn authors_list(&self) -> AppResult<Vec<Author>> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM authors ORDER BY lower(family_name)",
            AUTHOR_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;
        collect(rows, author_from_row)
    }

    async fn authors_get(&self, id: Uuid) -> AppResult<Option<Author>> {
        let row = sqlx::query(&format!("SELECT {} FROM authors WHERE id = $1", AUTHOR_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        optional(row, author_from_row)
    }

    async fn authors_get_many(&self, ids: &[Uuid]) -> AppResult<Vec<Author>> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM authors WHERE id = ANY($1)",
            AUTHOR_COLUMNS
        ))
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;
        collect(rows, author_from_row)
    }

    async fn authors_create(&self, data: &AuthorData) -> AppResult<Author> {
        let row = sqlx::query(&format!(
            r#"
            INSERT INTO authors (id, first_name, family_name, date_of_birth, date_of_death)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {}
            "#,
            AUTHOR_COLUMNS
        ))
        .bind(Uuid::new_v4())
        .bind(&data.first_name)
        .bind(&data.family_name)
        .bind(data.date_of_birth)
        .bind(data.date_of_death)
        .fetch_one(&self.pool)
        .await?;
        Ok(author_from_row(&row)?)
    }

    async fn authors_update(&self, id: Uuid, data: &AuthorData) -> AppResult<Option<Author>> {
        let row = sqlx::query(&format!(
            r#"
            UPDATE authors
            SET first_name = $2, family_name = $3, date_of_birth = $4, date_of_death = $5
            WHERE id = $1
            RETURNING {}
            "#,
            AUTHOR_COLUMNS
        ))
        .bind(id)
        .bind(&data.first_name)
        .bind(&data.family_name)
        .bind(data.date_of_birth)
        .bind(data.date_of_death)
        .fetch_optional(&self.pool)
        .await?;
        optional(row, author_from_row)
    }

    async fn authors_delete(&self, id: Uuid) -> AppResult<bool> {
        self.delete("DELETE FROM authors WHERE id = $1", id).await
    }

    async fn authors_count(&self) -> AppResult<i64> {
        self.count("SELECT COUNT(*) FROM authors").await
    }

    // =========================================================================
    // BOOKS
    // =========================================================================

    async fn books_list(&self) -> AppResult<Vec<Book>> {
        let rows = sqlx::query(&format!("SELECT {} FROM books ORDER BY lower(title)", BOOK_COLUMNS))
            .fetch_all(&self.pool)
            .await?;
        collect(rows, book_from_row)
    }

    async fn books_get(&self, id: Uuid) -> AppResult<Option<Book>> {
        let row = sqlx::query(&format!("SELECT {} FROM books WHERE id = $1", BOOK_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        optional(row, book_from_row)
    }

    async fn books_get_many(&self, ids: &[Uuid]) -> AppResult<Vec<Book>> {
        let rows = sqlx::query(&format!("SELECT {} FROM books WHERE id = ANY($1)", BOOK_COLUMNS))
            .bind(ids)
            .fetch_all(&self.pool)
            .await?;
        collect(rows, book_from_row)
    }

    async fn books_by_author(&self, author_id: Uuid) -> AppResult<Vec<Book>> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM books WHERE author_id = $1 ORDER BY lower(title)",
            BOOK_COLUMNS
        ))
        .bind(author_id)
        .fetch_all(&self.pool)
        .await?;
        collect(rows, book_from_row)
    }

    async fn books_by_genre(&self, genre_id: Uuid) -> AppResult<Vec<Book>> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM books WHERE $1 = ANY(genre_ids) ORDER BY lower(title)",
            BOOK_COLUMNS
        ))
        .bind(genre_id)
        .fetch_all(&self.pool)
        .await?;
        collect(rows, book_from_row)
    }

    async fn books_create(&self, data: &BookData) -> AppResult<Book> {
        let row = sqlx::query(&format!(
            r#"
            INSERT INTO books (id, title, author_id, summary, isbn, genre_ids)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {}
            "#,
            BOOK_COLUMNS
        ))
        .bind(Uuid::new_v4())
        .bind(&data.title)
        .bind(data.author)
        .bind(&data.summary)
        .bind(&data.isbn)
        .bind(&data.genre)
        .fetch_one(&self.pool)
        .await?;
        Ok(book_from_row(&row)?)
    }

    async fn books_update(&self, id: Uuid, data: &BookData) -> AppResult<Option<Book>> {
        let row = sqlx::query(&format!(
            r#"
            UPDATE books
            SET title = $2, author_id = $3, summary = $4, isbn = $5, genre_ids = $6
            WHERE id = $1
            RETURNING {}
            "#,
            BOOK_COLUMNS
        ))
        .bind(id)
        .bind(&data.title)
        .bind(data.author)
        .bind(&data.summary)
        .bind(&data.isbn)
        .bind(&data.genre)
        .fetch_optional(&self.pool)
        .await?;
        optional(row, book_from_row)
    }

    async fn books_delete(&self, id: Uuid) -> AppResult<bool> {
        self.delete("DELETE FROM books WHERE id = $1", id).await
    }

    async fn books_count(&self) -> AppResult<i64> {
        self.count("SELECT COUNT(*) FROM books").await
    }

    // =========================================================================
    // BOOK INSTANCES
    // =========================================================================

    async fn book_instances_list(&self) -> AppResult<Vec<BookInstance>> {
        let rows = sqlx::query(&format!("SELECT {} FROM book_instances", BOOK_INSTANCE_COLUMNS))
            .fetch_all(&self.pool)
            .await?;
        collect(rows, book_instance_from_row)
    }

    async fn book_instances_get(&self, id: Uuid) -> AppResult<Option<BookInstance>> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM book_instances WHERE id = $1",
            BOOK_INSTANCE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        optional(row, book_instance_from_row)
    }

    async fn book_instances_by_book(&self, book_id: Uuid) -> AppResult<Vec<BookInstance>> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM book_instances WHERE book_id = $1",
            BOOK_INSTANCE_COLUMNS
        ))
        .bind(book_id)
        .fetch_all(&self.pool)
        .await?;
        collect(rows, book_instance_from_row)
    }

    async fn book_instances_create(&self, data: &BookInstanceData) -> AppResult<BookInstance> {
        let row = sqlx::query(&format!(
            r#"
            INSERT INTO book_instances (id, book_id, imprint, status, due_back)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {}
            "#,
            BOOK_INSTANCE_COLUMNS
        ))
        .bind(Uuid::new_v4())
        .bind(data.book)
        .bind(&data.imprint)
        .bind(data.status.as_str())
        .bind(data.due_back)
        .fetch_one(&self.pool)
        .await?;
        Ok(book_instance_from_row(&row)?)
    }

    async fn book_instances_update(
        &self,
        id: Uuid,
        data: &BookInstanceData,
    ) -> AppResult<Option<BookInstance>> {
        let row = sqlx::query(&format!(
            r#"
            UPDATE book_instances
            SET book_id = $2, imprint = $3, status = $4, due_back = $5
            WHERE id = $1
            RETURNING {}
            "#,
            BOOK_INSTANCE_COLUMNS
        ))
        .bind(id)
        .bind(data.book)
        .bind(&data.imprint)
        .bind(data.status.as_str())
        .bind(data.due_back)
        .fetch_optional(&self.pool)
        .await?;
        optional(row, book_instance_from_row)
    }

    async fn book_instances_delete(&self, id: Uuid) -> AppResult<bool> {
        self.delete("DELETE FROM book_instances WHERE id = $1", id).await
    }

    async fn book_instances_count(&self) -> AppResult<i64> {
        self.count("SELECT COUNT(*) FROM book_instances").await
    }

    async fn book_instances_count_by_status(&self, status: BookStatus) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM book_instances WHERE status = $1")
            .bind(status.as_str())
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
