//! HTTP Handlers
//!
//! Pass-through CRUD over the repository traits. Each handler runs the
//! authorization evaluator first; reads admit anonymous callers, so the
//! identity arrives as an optional extension.
//!
//! Category and genre repositories share method names, so calls are
//! fully qualified throughout.

use axum::Json;
use axum::extract::{Extension, Path, Query, State};
use axum::http::StatusCode;
use std::sync::Arc;
use uuid::Uuid;

use auth::middleware::{CurrentUser, caller_of};
use auth::{Action, Verb, authorize};
use kernel::id::{CommentId, ReviewId, TitleId};
use kernel::page::Page;

use crate::domain::entity::{Category, Comment, Genre, Review, Title};
use crate::domain::repository::{
    CategoryRepository, CommentRepository, GenreRepository, ReviewRepository, TitleFilter,
    TitleRepository,
};
use crate::domain::value_object::{Score, Slug, TitleYear};
use crate::error::{CatalogError, CatalogResult};
use crate::presentation::dto::{
    CommentCreateBody, CommentResponse, CommentUpdateBody, ReviewCreateBody, ReviewResponse,
    ReviewUpdateBody, SlugResourceBody, SlugResourceListQuery, SlugResourceResponse,
    TitleCreateBody, TitleListQuery, TitleResponse, TitleUpdateBody,
};

/// Everything a catalog handler needs from storage.
pub trait CatalogStore:
    CategoryRepository
    + GenreRepository
    + TitleRepository
    + ReviewRepository
    + CommentRepository
    + Send
    + Sync
    + 'static
{
}

impl<T> CatalogStore for T where
    T: CategoryRepository
        + GenreRepository
        + TitleRepository
        + ReviewRepository
        + CommentRepository
        + Send
        + Sync
        + 'static
{
}

/// Shared state for catalog handlers
pub struct CatalogAppState<C: CatalogStore> {
    pub repo: Arc<C>,
}

impl<C: CatalogStore> Clone for CatalogAppState<C> {
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
        }
    }
}

fn identity(current: &Option<Extension<CurrentUser>>) -> Option<&CurrentUser> {
    current.as_ref().map(|Extension(c)| c)
}

fn parse_slugs(raw: &[String]) -> CatalogResult<Vec<Slug>> {
    raw.iter().map(Slug::new).collect()
}

// ============================================================================
// Categories
// ============================================================================

/// GET /categories
pub async fn categories_list<C: CatalogStore>(
    State(state): State<CatalogAppState<C>>,
    Query(query): Query<SlugResourceListQuery>,
) -> CatalogResult<Json<Page<SlugResourceResponse>>> {
    let page =
        CategoryRepository::list(&*state.repo, query.search.as_deref(), &query.page_params())
            .await?;
    Ok(Json(page.map(SlugResourceResponse::from)))
}

/// POST /categories
pub async fn categories_create<C: CatalogStore>(
    State(state): State<CatalogAppState<C>>,
    current: Option<Extension<CurrentUser>>,
    Json(body): Json<SlugResourceBody>,
) -> CatalogResult<(StatusCode, Json<SlugResourceResponse>)> {
    authorize(
        &caller_of(identity(&current)),
        Action::Catalog(Verb::Create),
        None,
    )?;

    let slug = Slug::new(body.slug)?;
    if CategoryRepository::find_by_slug(&*state.repo, &slug)
        .await?
        .is_some()
    {
        return Err(CatalogError::SlugTaken);
    }

    let category = Category::new(body.name, slug)?;
    CategoryRepository::create(&*state.repo, &category).await?;

    Ok((StatusCode::CREATED, Json(category.into())))
}

/// DELETE /categories/{slug}
pub async fn category_delete<C: CatalogStore>(
    State(state): State<CatalogAppState<C>>,
    current: Option<Extension<CurrentUser>>,
    Path(slug): Path<String>,
) -> CatalogResult<StatusCode> {
    authorize(
        &caller_of(identity(&current)),
        Action::Catalog(Verb::Destroy),
        None,
    )?;

    // A path segment outside the slug grammar cannot name a category.
    let slug = Slug::new(slug).map_err(|_| CatalogError::CategoryNotFound)?;
    if CategoryRepository::delete_by_slug(&*state.repo, &slug).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(CatalogError::CategoryNotFound)
    }
}

// ============================================================================
// Genres
// ============================================================================

/// GET /genres
pub async fn genres_list<C: CatalogStore>(
    State(state): State<CatalogAppState<C>>,
    Query(query): Query<SlugResourceListQuery>,
) -> CatalogResult<Json<Page<SlugResourceResponse>>> {
    let page =
        GenreRepository::list(&*state.repo, query.search.as_deref(), &query.page_params()).await?;
    Ok(Json(page.map(SlugResourceResponse::from)))
}

/// POST /genres
pub async fn genres_create<C: CatalogStore>(
    State(state): State<CatalogAppState<C>>,
    current: Option<Extension<CurrentUser>>,
    Json(body): Json<SlugResourceBody>,
) -> CatalogResult<(StatusCode, Json<SlugResourceResponse>)> {
    authorize(
        &caller_of(identity(&current)),
        Action::Catalog(Verb::Create),
        None,
    )?;

    let slug = Slug::new(body.slug)?;
    if GenreRepository::find_by_slug(&*state.repo, &slug)
        .await?
        .is_some()
    {
        return Err(CatalogError::SlugTaken);
    }

    let genre = Genre::new(body.name, slug)?;
    GenreRepository::create(&*state.repo, &genre).await?;

    Ok((StatusCode::CREATED, Json(genre.into())))
}

/// DELETE /genres/{slug}
pub async fn genre_delete<C: CatalogStore>(
    State(state): State<CatalogAppState<C>>,
    current: Option<Extension<CurrentUser>>,
    Path(slug): Path<String>,
) -> CatalogResult<StatusCode> {
    authorize(
        &caller_of(identity(&current)),
        Action::Catalog(Verb::Destroy),
        None,
    )?;

    let slug = Slug::new(slug).map_err(|_| CatalogError::GenreNotFound)?;
    if GenreRepository::delete_by_slug(&*state.repo, &slug).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(CatalogError::GenreNotFound)
    }
}

// ============================================================================
// Titles
// ============================================================================

async fn check_title_refs<C: CatalogStore>(
    repo: &C,
    category: Option<&Slug>,
    genres: &[Slug],
) -> CatalogResult<()> {
    if let Some(slug) = category {
        if CategoryRepository::find_by_slug(repo, slug).await?.is_none() {
            return Err(CatalogError::Validation(format!(
                "Unknown category slug '{slug}'"
            )));
        }
    }
    for slug in genres {
        if GenreRepository::find_by_slug(repo, slug).await?.is_none() {
            return Err(CatalogError::Validation(format!(
                "Unknown genre slug '{slug}'"
            )));
        }
    }
    Ok(())
}

/// GET /titles
pub async fn titles_list<C: CatalogStore>(
    State(state): State<CatalogAppState<C>>,
    Query(query): Query<TitleListQuery>,
) -> CatalogResult<Json<Page<TitleResponse>>> {
    let page_params = query.page_params();
    let filter = TitleFilter {
        name: query.name,
        category: query.category.as_deref().map(Slug::new).transpose()?,
        genre: query.genre.as_deref().map(Slug::new).transpose()?,
        year: query.year,
    };

    let page = TitleRepository::list(&*state.repo, &filter, &page_params).await?;
    Ok(Json(page.map(TitleResponse::from)))
}

/// POST /titles
pub async fn titles_create<C: CatalogStore>(
    State(state): State<CatalogAppState<C>>,
    current: Option<Extension<CurrentUser>>,
    Json(body): Json<TitleCreateBody>,
) -> CatalogResult<(StatusCode, Json<TitleResponse>)> {
    authorize(
        &caller_of(identity(&current)),
        Action::Catalog(Verb::Create),
        None,
    )?;

    let year = TitleYear::new(body.year)?;
    let category = body.category.map(Slug::new).transpose()?;
    let genres = parse_slugs(&body.genre)?;

    check_title_refs(&*state.repo, category.as_ref(), &genres).await?;

    let title = Title::new(body.name, year, body.description, category, genres)?;
    TitleRepository::create(&*state.repo, &title).await?;

    let rated = TitleRepository::find_by_id(&*state.repo, &title.title_id)
        .await?
        .ok_or(CatalogError::TitleNotFound)?;

    Ok((StatusCode::CREATED, Json(rated.into())))
}

/// GET /titles/{title_id}
pub async fn title_get<C: CatalogStore>(
    State(state): State<CatalogAppState<C>>,
    Path(title_id): Path<Uuid>,
) -> CatalogResult<Json<TitleResponse>> {
    let rated = TitleRepository::find_by_id(&*state.repo, &TitleId::from_uuid(title_id))
        .await?
        .ok_or(CatalogError::TitleNotFound)?;

    Ok(Json(rated.into()))
}

/// PATCH /titles/{title_id}
pub async fn title_update<C: CatalogStore>(
    State(state): State<CatalogAppState<C>>,
    current: Option<Extension<CurrentUser>>,
    Path(title_id): Path<Uuid>,
    Json(body): Json<TitleUpdateBody>,
) -> CatalogResult<Json<TitleResponse>> {
    authorize(
        &caller_of(identity(&current)),
        Action::Catalog(Verb::Update),
        None,
    )?;

    let title_id = TitleId::from_uuid(title_id);
    let mut title = TitleRepository::find_by_id(&*state.repo, &title_id)
        .await?
        .ok_or(CatalogError::TitleNotFound)?
        .title;

    let year = body.year.map(TitleYear::new).transpose()?;
    let category = body.category.map(Slug::new).transpose()?;
    let genres = body.genre.as_deref().map(parse_slugs).transpose()?;

    check_title_refs(
        &*state.repo,
        category.as_ref(),
        genres.as_deref().unwrap_or(&[]),
    )
    .await?;

    if let Some(name) = body.name {
        title.set_name(name)?;
    }
    if let Some(year) = year {
        title.set_year(year);
    }
    if let Some(description) = body.description {
        title.set_description(Some(description));
    }
    if let Some(category) = category {
        title.set_category(Some(category));
    }
    if let Some(genres) = genres {
        title.set_genres(genres);
    }

    TitleRepository::update(&*state.repo, &title).await?;

    let rated = TitleRepository::find_by_id(&*state.repo, &title_id)
        .await?
        .ok_or(CatalogError::TitleNotFound)?;

    Ok(Json(rated.into()))
}

/// DELETE /titles/{title_id}
pub async fn title_delete<C: CatalogStore>(
    State(state): State<CatalogAppState<C>>,
    current: Option<Extension<CurrentUser>>,
    Path(title_id): Path<Uuid>,
) -> CatalogResult<StatusCode> {
    authorize(
        &caller_of(identity(&current)),
        Action::Catalog(Verb::Destroy),
        None,
    )?;

    if TitleRepository::delete(&*state.repo, &TitleId::from_uuid(title_id)).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(CatalogError::TitleNotFound)
    }
}

// ============================================================================
// Reviews
// ============================================================================

async fn require_title<C: CatalogStore>(repo: &C, title_id: &TitleId) -> CatalogResult<()> {
    TitleRepository::find_by_id(repo, title_id)
        .await?
        .map(|_| ())
        .ok_or(CatalogError::TitleNotFound)
}

async fn review_in_title<C: CatalogStore>(
    repo: &C,
    title_id: &TitleId,
    review_id: &ReviewId,
) -> CatalogResult<Review> {
    let review = ReviewRepository::find_by_id(repo, review_id)
        .await?
        .ok_or(CatalogError::ReviewNotFound)?;
    if &review.title_id != title_id {
        return Err(CatalogError::ReviewNotFound);
    }
    Ok(review)
}

/// GET /titles/{title_id}/reviews
pub async fn reviews_list<C: CatalogStore>(
    State(state): State<CatalogAppState<C>>,
    Path(title_id): Path<Uuid>,
    Query(query): Query<kernel::page::PageParams>,
) -> CatalogResult<Json<Page<ReviewResponse>>> {
    let title_id = TitleId::from_uuid(title_id);
    require_title(&*state.repo, &title_id).await?;

    let page = ReviewRepository::list_for_title(&*state.repo, &title_id, &query).await?;
    Ok(Json(page.map(ReviewResponse::from)))
}

/// POST /titles/{title_id}/reviews
pub async fn reviews_create<C: CatalogStore>(
    State(state): State<CatalogAppState<C>>,
    current: Option<Extension<CurrentUser>>,
    Path(title_id): Path<Uuid>,
    Json(body): Json<ReviewCreateBody>,
) -> CatalogResult<(StatusCode, Json<ReviewResponse>)> {
    authorize(
        &caller_of(identity(&current)),
        Action::Review(Verb::Create),
        None,
    )?;
    // authorize admits authenticated callers only for Create
    let current = identity(&current).ok_or(CatalogError::Unauthorized)?;

    let title_id = TitleId::from_uuid(title_id);
    require_title(&*state.repo, &title_id).await?;

    if ReviewRepository::find_by_author_and_title(&*state.repo, &current.user_id, &title_id)
        .await?
        .is_some()
    {
        return Err(CatalogError::DuplicateReview);
    }

    let score = Score::new(body.score)?;
    let review = Review::new(
        title_id,
        current.user_id,
        current.username.clone(),
        body.text,
        score,
    )?;
    ReviewRepository::create(&*state.repo, &review).await?;

    Ok((StatusCode::CREATED, Json(review.into())))
}

/// GET /titles/{title_id}/reviews/{review_id}
pub async fn review_get<C: CatalogStore>(
    State(state): State<CatalogAppState<C>>,
    Path((title_id, review_id)): Path<(Uuid, Uuid)>,
) -> CatalogResult<Json<ReviewResponse>> {
    let review = review_in_title(
        &*state.repo,
        &TitleId::from_uuid(title_id),
        &ReviewId::from_uuid(review_id),
    )
    .await?;

    Ok(Json(review.into()))
}

/// PATCH /titles/{title_id}/reviews/{review_id}
pub async fn review_update<C: CatalogStore>(
    State(state): State<CatalogAppState<C>>,
    current: Option<Extension<CurrentUser>>,
    Path((title_id, review_id)): Path<(Uuid, Uuid)>,
    Json(body): Json<ReviewUpdateBody>,
) -> CatalogResult<Json<ReviewResponse>> {
    let mut review = review_in_title(
        &*state.repo,
        &TitleId::from_uuid(title_id),
        &ReviewId::from_uuid(review_id),
    )
    .await?;

    authorize(
        &caller_of(identity(&current)),
        Action::Review(Verb::Update),
        Some(&review.author_id),
    )?;

    if let Some(text) = body.text {
        review.set_text(text)?;
    }
    if let Some(score) = body.score {
        review.set_score(Score::new(score)?);
    }

    ReviewRepository::update(&*state.repo, &review).await?;

    Ok(Json(review.into()))
}

/// DELETE /titles/{title_id}/reviews/{review_id}
pub async fn review_delete<C: CatalogStore>(
    State(state): State<CatalogAppState<C>>,
    current: Option<Extension<CurrentUser>>,
    Path((title_id, review_id)): Path<(Uuid, Uuid)>,
) -> CatalogResult<StatusCode> {
    let review = review_in_title(
        &*state.repo,
        &TitleId::from_uuid(title_id),
        &ReviewId::from_uuid(review_id),
    )
    .await?;

    authorize(
        &caller_of(identity(&current)),
        Action::Review(Verb::Destroy),
        Some(&review.author_id),
    )?;

    ReviewRepository::delete(&*state.repo, &review.review_id).await?;

    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Comments
// ============================================================================

async fn require_review<C: CatalogStore>(repo: &C, review_id: &ReviewId) -> CatalogResult<()> {
    ReviewRepository::find_by_id(repo, review_id)
        .await?
        .map(|_| ())
        .ok_or(CatalogError::ReviewNotFound)
}

async fn comment_in_review<C: CatalogStore>(
    repo: &C,
    review_id: &ReviewId,
    comment_id: &CommentId,
) -> CatalogResult<Comment> {
    let comment = CommentRepository::find_by_id(repo, comment_id)
        .await?
        .ok_or(CatalogError::CommentNotFound)?;
    if &comment.review_id != review_id {
        return Err(CatalogError::CommentNotFound);
    }
    Ok(comment)
}

/// GET /reviews/{review_id}/comments
pub async fn comments_list<C: CatalogStore>(
    State(state): State<CatalogAppState<C>>,
    Path(review_id): Path<Uuid>,
    Query(query): Query<kernel::page::PageParams>,
) -> CatalogResult<Json<Page<CommentResponse>>> {
    let review_id = ReviewId::from_uuid(review_id);
    require_review(&*state.repo, &review_id).await?;

    let page = CommentRepository::list_for_review(&*state.repo, &review_id, &query).await?;
    Ok(Json(page.map(CommentResponse::from)))
}

/// POST /reviews/{review_id}/comments
pub async fn comments_create<C: CatalogStore>(
    State(state): State<CatalogAppState<C>>,
    current: Option<Extension<CurrentUser>>,
    Path(review_id): Path<Uuid>,
    Json(body): Json<CommentCreateBody>,
) -> CatalogResult<(StatusCode, Json<CommentResponse>)> {
    authorize(
        &caller_of(identity(&current)),
        Action::Comment(Verb::Create),
        None,
    )?;
    let current = identity(&current).ok_or(CatalogError::Unauthorized)?;

    let review_id = ReviewId::from_uuid(review_id);
    require_review(&*state.repo, &review_id).await?;

    let comment = Comment::new(
        review_id,
        current.user_id,
        current.username.clone(),
        body.text,
    )?;
    CommentRepository::create(&*state.repo, &comment).await?;

    Ok((StatusCode::CREATED, Json(comment.into())))
}

/// GET /reviews/{review_id}/comments/{comment_id}
pub async fn comment_get<C: CatalogStore>(
    State(state): State<CatalogAppState<C>>,
    Path((review_id, comment_id)): Path<(Uuid, Uuid)>,
) -> CatalogResult<Json<CommentResponse>> {
    let comment = comment_in_review(
        &*state.repo,
        &ReviewId::from_uuid(review_id),
        &CommentId::from_uuid(comment_id),
    )
    .await?;

    Ok(Json(comment.into()))
}

/// PATCH /reviews/{review_id}/comments/{comment_id}
pub async fn comment_update<C: CatalogStore>(
    State(state): State<CatalogAppState<C>>,
    current: Option<Extension<CurrentUser>>,
    Path((review_id, comment_id)): Path<(Uuid, Uuid)>,
    Json(body): Json<CommentUpdateBody>,
) -> CatalogResult<Json<CommentResponse>> {
    let mut comment = comment_in_review(
        &*state.repo,
        &ReviewId::from_uuid(review_id),
        &CommentId::from_uuid(comment_id),
    )
    .await?;

    authorize(
        &caller_of(identity(&current)),
        Action::Comment(Verb::Update),
        Some(&comment.author_id),
    )?;

    if let Some(text) = body.text {
        comment.set_text(text)?;
    }

    CommentRepository::update(&*state.repo, &comment).await?;

    Ok(Json(comment.into()))
}

/// DELETE /reviews/{review_id}/comments/{comment_id}
pub async fn comment_delete<C: CatalogStore>(
    State(state): State<CatalogAppState<C>>,
    current: Option<Extension<CurrentUser>>,
    Path((review_id, comment_id)): Path<(Uuid, Uuid)>,
) -> CatalogResult<StatusCode> {
    let comment = comment_in_review(
        &*state.repo,
        &ReviewId::from_uuid(review_id),
        &CommentId::from_uuid(comment_id),
    )
    .await?;

    authorize(
        &caller_of(identity(&current)),
        Action::Comment(Verb::Destroy),
        Some(&comment.author_id),
    )?;

    CommentRepository::delete(&*state.repo, &comment.comment_id).await?;

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use auth::models::UserRole;
    use chrono::{Datelike, Utc};
    use kernel::error::kind::ErrorKind;
    use kernel::id::UserId;

    use crate::infra::memory::InMemoryCatalogRepository;

    fn state() -> CatalogAppState<InMemoryCatalogRepository> {
        CatalogAppState {
            repo: Arc::new(InMemoryCatalogRepository::new()),
        }
    }

    fn admin() -> Option<Extension<CurrentUser>> {
        Some(Extension(CurrentUser {
            user_id: UserId::new(),
            username: "admin".to_string(),
            role: UserRole::Admin,
        }))
    }

    fn reader() -> Option<Extension<CurrentUser>> {
        Some(Extension(CurrentUser {
            user_id: UserId::new(),
            username: "alice".to_string(),
            role: UserRole::User,
        }))
    }

    fn title_body(year: i32) -> TitleCreateBody {
        TitleCreateBody {
            name: "The Test".to_string(),
            year,
            description: None,
            category: None,
            genre: Vec::new(),
        }
    }

    async fn seeded_title(state: &CatalogAppState<InMemoryCatalogRepository>) -> Uuid {
        let (_, Json(title)) =
            titles_create(State(state.clone()), admin(), Json(title_body(1999)))
                .await
                .unwrap();
        title.id
    }

    #[tokio::test]
    async fn test_review_out_of_range_score_is_bad_request() {
        let state = state();
        let title_id = seeded_title(&state).await;

        let body = ReviewCreateBody {
            text: "great".to_string(),
            score: 11,
        };
        let err = reviews_create(State(state), reader(), Path(title_id), Json(body))
            .await
            .unwrap_err();

        assert!(matches!(err, CatalogError::Validation(_)));
        assert_eq!(err.kind(), ErrorKind::BadRequest);
    }

    #[tokio::test]
    async fn test_review_update_out_of_range_score_is_bad_request() {
        let state = state();
        let title_id = seeded_title(&state).await;

        let body = ReviewCreateBody {
            text: "great".to_string(),
            score: 8,
        };
        let (_, Json(review)) =
            reviews_create(State(state.clone()), reader(), Path(title_id), Json(body))
                .await
                .unwrap();

        let update = ReviewUpdateBody {
            text: None,
            score: Some(0),
        };
        let err = review_update(
            State(state),
            admin(),
            Path((title_id, review.id)),
            Json(update),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, CatalogError::Validation(_)));
        assert_eq!(err.kind(), ErrorKind::BadRequest);
    }

    #[tokio::test]
    async fn test_title_future_year_is_bad_request() {
        let state = state();
        let future = Utc::now().year() + 1;

        let err = titles_create(State(state), admin(), Json(title_body(future)))
            .await
            .unwrap_err();

        assert!(matches!(err, CatalogError::Validation(_)));
        assert_eq!(err.kind(), ErrorKind::BadRequest);
    }

    #[tokio::test]
    async fn test_category_bad_slug_is_bad_request() {
        let state = state();
        let body = SlugResourceBody {
            name: "Movies".to_string(),
            slug: "has space".to_string(),
        };

        let err = categories_create(State(state), admin(), Json(body))
            .await
            .unwrap_err();

        assert!(matches!(err, CatalogError::Validation(_)));
        assert_eq!(err.kind(), ErrorKind::BadRequest);
    }

    #[tokio::test]
    async fn test_category_delete_malformed_slug_is_not_found() {
        let state = state();

        let err = category_delete(State(state), admin(), Path("no such/slug".to_string()))
            .await
            .unwrap_err();

        assert!(matches!(err, CatalogError::CategoryNotFound));
    }
}
