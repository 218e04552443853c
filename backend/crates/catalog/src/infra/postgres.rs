//! PostgreSQL Repository Implementations
//!
//! One pool-backed type implements every catalog repository trait,
//! mirroring how the auth store is structured. Average ratings and
//! genre lists are computed per row with correlated subqueries so the
//! aggregates never multiply each other.

use chrono::{DateTime, Utc};
use kernel::id::{CommentId, ReviewId, TitleId, UserId};
use kernel::page::{Page, PageParams};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::{Category, Comment, Genre, RatedTitle, Review, Title};
use crate::domain::repository::{
    CategoryRepository, CommentRepository, GenreRepository, ReviewRepository, TitleFilter,
    TitleRepository,
};
use crate::domain::value_object::{Score, Slug, TitleYear};
use crate::error::{CatalogError, CatalogResult};

/// PostgreSQL-backed catalog repository
#[derive(Clone)]
pub struct PgCatalogRepository {
    pool: PgPool,
}

impl PgCatalogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// ============================================================================
// Category Repository Implementation
// ============================================================================

impl CategoryRepository for PgCatalogRepository {
    async fn create(&self, category: &Category) -> CatalogResult<()> {
        sqlx::query(
            r#"
            INSERT INTO categories (category_id, name, slug, created_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(category.category_id.as_uuid())
        .bind(&category.name)
        .bind(category.slug.as_str())
        .bind(category.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_slug(&self, slug: &Slug) -> CatalogResult<Option<Category>> {
        let row = sqlx::query_as::<_, CategoryRow>(
            "SELECT category_id, name, slug, created_at FROM categories WHERE slug = $1",
        )
        .bind(slug.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(CategoryRow::into_category))
    }

    async fn delete_by_slug(&self, slug: &Slug) -> CatalogResult<bool> {
        let deleted = sqlx::query("DELETE FROM categories WHERE slug = $1")
            .bind(slug.as_str())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }

    async fn list(
        &self,
        search: Option<&str>,
        page: &PageParams,
    ) -> CatalogResult<Page<Category>> {
        let pattern = search.map(|s| format!("%{s}%"));

        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM categories WHERE ($1::text IS NULL OR name ILIKE $1)",
        )
        .bind(&pattern)
        .fetch_one(&self.pool)
        .await?;

        let rows = sqlx::query_as::<_, CategoryRow>(
            r#"
            SELECT category_id, name, slug, created_at FROM categories
            WHERE ($1::text IS NULL OR name ILIKE $1)
            ORDER BY name
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(&pattern)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await?;

        Ok(Page {
            count: count as u64,
            results: rows.into_iter().map(CategoryRow::into_category).collect(),
        })
    }
}

// ============================================================================
// Genre Repository Implementation
// ============================================================================

impl GenreRepository for PgCatalogRepository {
    async fn create(&self, genre: &Genre) -> CatalogResult<()> {
        sqlx::query(
            r#"
            INSERT INTO genres (genre_id, name, slug, created_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(genre.genre_id.as_uuid())
        .bind(&genre.name)
        .bind(genre.slug.as_str())
        .bind(genre.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_slug(&self, slug: &Slug) -> CatalogResult<Option<Genre>> {
        let row = sqlx::query_as::<_, GenreRow>(
            "SELECT genre_id, name, slug, created_at FROM genres WHERE slug = $1",
        )
        .bind(slug.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(GenreRow::into_genre))
    }

    async fn delete_by_slug(&self, slug: &Slug) -> CatalogResult<bool> {
        let deleted = sqlx::query("DELETE FROM genres WHERE slug = $1")
            .bind(slug.as_str())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }

    async fn list(&self, search: Option<&str>, page: &PageParams) -> CatalogResult<Page<Genre>> {
        let pattern = search.map(|s| format!("%{s}%"));

        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM genres WHERE ($1::text IS NULL OR name ILIKE $1)",
        )
        .bind(&pattern)
        .fetch_one(&self.pool)
        .await?;

        let rows = sqlx::query_as::<_, GenreRow>(
            r#"
            SELECT genre_id, name, slug, created_at FROM genres
            WHERE ($1::text IS NULL OR name ILIKE $1)
            ORDER BY name
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(&pattern)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await?;

        Ok(Page {
            count: count as u64,
            results: rows.into_iter().map(GenreRow::into_genre).collect(),
        })
    }
}

// ============================================================================
// Title Repository Implementation
// ============================================================================

const TITLE_SELECT: &str = r#"
    SELECT
        t.title_id,
        t.name,
        t.year,
        t.description,
        t.category_slug,
        COALESCE(
            (SELECT array_agg(tg.genre_slug ORDER BY tg.genre_slug)
             FROM title_genres tg WHERE tg.title_id = t.title_id),
            '{}'
        ) AS genres,
        (SELECT AVG(r.score)::float8 FROM reviews r WHERE r.title_id = t.title_id) AS rating,
        t.created_at,
        t.updated_at
    FROM titles t
"#;

impl TitleRepository for PgCatalogRepository {
    async fn create(&self, title: &Title) -> CatalogResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO titles (
                title_id, name, year, description, category_slug, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(title.title_id.as_uuid())
        .bind(&title.name)
        .bind(title.year.value())
        .bind(&title.description)
        .bind(title.category.as_ref().map(Slug::as_str))
        .bind(title.created_at)
        .bind(title.updated_at)
        .execute(&mut *tx)
        .await?;

        for genre in &title.genres {
            sqlx::query("INSERT INTO title_genres (title_id, genre_slug) VALUES ($1, $2)")
                .bind(title.title_id.as_uuid())
                .bind(genre.as_str())
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    async fn find_by_id(&self, title_id: &TitleId) -> CatalogResult<Option<RatedTitle>> {
        let row =
            sqlx::query_as::<_, TitleRow>(&format!("{TITLE_SELECT} WHERE t.title_id = $1"))
                .bind(title_id.as_uuid())
                .fetch_optional(&self.pool)
                .await?;

        Ok(row.map(TitleRow::into_rated_title))
    }

    async fn update(&self, title: &Title) -> CatalogResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            UPDATE titles SET
                name = $2,
                year = $3,
                description = $4,
                category_slug = $5,
                updated_at = $6
            WHERE title_id = $1
            "#,
        )
        .bind(title.title_id.as_uuid())
        .bind(&title.name)
        .bind(title.year.value())
        .bind(&title.description)
        .bind(title.category.as_ref().map(Slug::as_str))
        .bind(title.updated_at)
        .execute(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM title_genres WHERE title_id = $1")
            .bind(title.title_id.as_uuid())
            .execute(&mut *tx)
            .await?;

        for genre in &title.genres {
            sqlx::query("INSERT INTO title_genres (title_id, genre_slug) VALUES ($1, $2)")
                .bind(title.title_id.as_uuid())
                .bind(genre.as_str())
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    async fn delete(&self, title_id: &TitleId) -> CatalogResult<bool> {
        let deleted = sqlx::query("DELETE FROM titles WHERE title_id = $1")
            .bind(title_id.as_uuid())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }

    async fn list(
        &self,
        filter: &TitleFilter,
        page: &PageParams,
    ) -> CatalogResult<Page<RatedTitle>> {
        let name_pattern = filter.name.as_ref().map(|s| format!("%{s}%"));
        let category = filter.category.as_ref().map(Slug::as_str);
        let genre = filter.genre.as_ref().map(Slug::as_str);

        const FILTERS: &str = r#"
            WHERE ($1::text IS NULL OR t.name ILIKE $1)
              AND ($2::text IS NULL OR t.category_slug = $2)
              AND ($3::text IS NULL OR EXISTS(
                    SELECT 1 FROM title_genres tg
                    WHERE tg.title_id = t.title_id AND tg.genre_slug = $3))
              AND ($4::int IS NULL OR t.year = $4)
        "#;

        let count = sqlx::query_scalar::<_, i64>(&format!(
            "SELECT COUNT(*) FROM titles t {FILTERS}"
        ))
        .bind(&name_pattern)
        .bind(category)
        .bind(genre)
        .bind(filter.year)
        .fetch_one(&self.pool)
        .await?;

        let rows = sqlx::query_as::<_, TitleRow>(&format!(
            "{TITLE_SELECT} {FILTERS} ORDER BY t.name LIMIT $5 OFFSET $6"
        ))
        .bind(&name_pattern)
        .bind(category)
        .bind(genre)
        .bind(filter.year)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await?;

        Ok(Page {
            count: count as u64,
            results: rows.into_iter().map(TitleRow::into_rated_title).collect(),
        })
    }
}

// ============================================================================
// Review Repository Implementation
// ============================================================================

const REVIEW_COLUMNS: &str =
    "review_id, title_id, author_id, author_username, text, score, pub_date";

impl ReviewRepository for PgCatalogRepository {
    async fn create(&self, review: &Review) -> CatalogResult<()> {
        sqlx::query(
            r#"
            INSERT INTO reviews (
                review_id, title_id, author_id, author_username, text, score, pub_date
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(review.review_id.as_uuid())
        .bind(review.title_id.as_uuid())
        .bind(review.author_id.as_uuid())
        .bind(&review.author_username)
        .bind(&review.text)
        .bind(review.score.value())
        .bind(review.pub_date)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, review_id: &ReviewId) -> CatalogResult<Option<Review>> {
        let row = sqlx::query_as::<_, ReviewRow>(&format!(
            "SELECT {REVIEW_COLUMNS} FROM reviews WHERE review_id = $1"
        ))
        .bind(review_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(ReviewRow::into_review).transpose()
    }

    async fn find_by_author_and_title(
        &self,
        author_id: &UserId,
        title_id: &TitleId,
    ) -> CatalogResult<Option<Review>> {
        let row = sqlx::query_as::<_, ReviewRow>(&format!(
            "SELECT {REVIEW_COLUMNS} FROM reviews WHERE author_id = $1 AND title_id = $2"
        ))
        .bind(author_id.as_uuid())
        .bind(title_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(ReviewRow::into_review).transpose()
    }

    async fn update(&self, review: &Review) -> CatalogResult<()> {
        sqlx::query("UPDATE reviews SET text = $2, score = $3 WHERE review_id = $1")
            .bind(review.review_id.as_uuid())
            .bind(&review.text)
            .bind(review.score.value())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn delete(&self, review_id: &ReviewId) -> CatalogResult<bool> {
        let deleted = sqlx::query("DELETE FROM reviews WHERE review_id = $1")
            .bind(review_id.as_uuid())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }

    async fn list_for_title(
        &self,
        title_id: &TitleId,
        page: &PageParams,
    ) -> CatalogResult<Page<Review>> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM reviews WHERE title_id = $1")
            .bind(title_id.as_uuid())
            .fetch_one(&self.pool)
            .await?;

        let rows = sqlx::query_as::<_, ReviewRow>(&format!(
            r#"
            SELECT {REVIEW_COLUMNS} FROM reviews
            WHERE title_id = $1
            ORDER BY pub_date DESC
            LIMIT $2 OFFSET $3
            "#
        ))
        .bind(title_id.as_uuid())
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await?;

        let results = rows
            .into_iter()
            .map(ReviewRow::into_review)
            .collect::<CatalogResult<Vec<_>>>()?;

        Ok(Page {
            count: count as u64,
            results,
        })
    }
}

// ============================================================================
// Comment Repository Implementation
// ============================================================================

const COMMENT_COLUMNS: &str = "comment_id, review_id, author_id, author_username, text, pub_date";

impl CommentRepository for PgCatalogRepository {
    async fn create(&self, comment: &Comment) -> CatalogResult<()> {
        sqlx::query(
            r#"
            INSERT INTO comments (
                comment_id, review_id, author_id, author_username, text, pub_date
            ) VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(comment.comment_id.as_uuid())
        .bind(comment.review_id.as_uuid())
        .bind(comment.author_id.as_uuid())
        .bind(&comment.author_username)
        .bind(&comment.text)
        .bind(comment.pub_date)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, comment_id: &CommentId) -> CatalogResult<Option<Comment>> {
        let row = sqlx::query_as::<_, CommentRow>(&format!(
            "SELECT {COMMENT_COLUMNS} FROM comments WHERE comment_id = $1"
        ))
        .bind(comment_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(CommentRow::into_comment))
    }

    async fn update(&self, comment: &Comment) -> CatalogResult<()> {
        sqlx::query("UPDATE comments SET text = $2 WHERE comment_id = $1")
            .bind(comment.comment_id.as_uuid())
            .bind(&comment.text)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn delete(&self, comment_id: &CommentId) -> CatalogResult<bool> {
        let deleted = sqlx::query("DELETE FROM comments WHERE comment_id = $1")
            .bind(comment_id.as_uuid())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }

    async fn list_for_review(
        &self,
        review_id: &ReviewId,
        page: &PageParams,
    ) -> CatalogResult<Page<Comment>> {
        let count =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM comments WHERE review_id = $1")
                .bind(review_id.as_uuid())
                .fetch_one(&self.pool)
                .await?;

        let rows = sqlx::query_as::<_, CommentRow>(&format!(
            r#"
            SELECT {COMMENT_COLUMNS} FROM comments
            WHERE review_id = $1
            ORDER BY pub_date DESC
            LIMIT $2 OFFSET $3
            "#
        ))
        .bind(review_id.as_uuid())
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await?;

        Ok(Page {
            count: count as u64,
            results: rows.into_iter().map(CommentRow::into_comment).collect(),
        })
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct CategoryRow {
    category_id: Uuid,
    name: String,
    slug: String,
    created_at: DateTime<Utc>,
}

impl CategoryRow {
    fn into_category(self) -> Category {
        Category {
            category_id: self.category_id.into(),
            name: self.name,
            slug: Slug::from_db(self.slug),
            created_at: self.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct GenreRow {
    genre_id: Uuid,
    name: String,
    slug: String,
    created_at: DateTime<Utc>,
}

impl GenreRow {
    fn into_genre(self) -> Genre {
        Genre {
            genre_id: self.genre_id.into(),
            name: self.name,
            slug: Slug::from_db(self.slug),
            created_at: self.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct TitleRow {
    title_id: Uuid,
    name: String,
    year: i32,
    description: Option<String>,
    category_slug: Option<String>,
    genres: Vec<String>,
    rating: Option<f64>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TitleRow {
    fn into_rated_title(self) -> RatedTitle {
        RatedTitle {
            title: Title {
                title_id: self.title_id.into(),
                name: self.name,
                year: TitleYear::from_db(self.year),
                description: self.description,
                category: self.category_slug.map(Slug::from_db),
                genres: self.genres.into_iter().map(Slug::from_db).collect(),
                created_at: self.created_at,
                updated_at: self.updated_at,
            },
            rating: self.rating,
        }
    }
}

#[derive(sqlx::FromRow)]
struct ReviewRow {
    review_id: Uuid,
    title_id: Uuid,
    author_id: Uuid,
    author_username: String,
    text: String,
    score: i16,
    pub_date: DateTime<Utc>,
}

impl ReviewRow {
    fn into_review(self) -> CatalogResult<Review> {
        let score = Score::new(self.score)
            .map_err(|_| CatalogError::Internal(format!("Invalid stored score {}", self.score)))?;

        Ok(Review {
            review_id: self.review_id.into(),
            title_id: self.title_id.into(),
            author_id: self.author_id.into(),
            author_username: self.author_username,
            text: self.text,
            score,
            pub_date: self.pub_date,
        })
    }
}

#[derive(sqlx::FromRow)]
struct CommentRow {
    comment_id: Uuid,
    review_id: Uuid,
    author_id: Uuid,
    author_username: String,
    text: String,
    pub_date: DateTime<Utc>,
}

impl CommentRow {
    fn into_comment(self) -> Comment {
        Comment {
            comment_id: self.comment_id.into(),
            review_id: self.review_id.into(),
            author_id: self.author_id.into(),
            author_username: self.author_username,
            text: self.text,
            pub_date: self.pub_date,
        }
    }
}
