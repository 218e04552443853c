//! In-Memory Repository
//!
//! A single mutex-guarded store implementing every catalog trait, for
//! tests and local development.

use std::sync::Mutex;

use kernel::id::{CommentId, ReviewId, TitleId, UserId};
use kernel::page::{Page, PageParams};

use crate::domain::entity::{Category, Comment, Genre, RatedTitle, Review, Title};
use crate::domain::repository::{
    CategoryRepository, CommentRepository, GenreRepository, ReviewRepository, TitleFilter,
    TitleRepository,
};
use crate::domain::value_object::Slug;
use crate::error::{CatalogError, CatalogResult};

#[derive(Default)]
struct Store {
    categories: Vec<Category>,
    genres: Vec<Genre>,
    titles: Vec<Title>,
    reviews: Vec<Review>,
    comments: Vec<Comment>,
}

/// In-memory catalog store
#[derive(Default)]
pub struct InMemoryCatalogRepository {
    store: Mutex<Store>,
}

impl InMemoryCatalogRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> CatalogResult<std::sync::MutexGuard<'_, Store>> {
        self.store
            .lock()
            .map_err(|_| CatalogError::Internal("catalog store lock poisoned".to_string()))
    }
}

fn paginate<T: Clone>(items: Vec<T>, page: &PageParams) -> Page<T> {
    let count = items.len() as u64;
    let results = items
        .into_iter()
        .skip(page.offset() as usize)
        .take(page.limit() as usize)
        .collect();
    Page { count, results }
}

fn name_matches(name: &str, search: Option<&str>) -> bool {
    match search {
        Some(needle) => name.to_lowercase().contains(&needle.to_lowercase()),
        None => true,
    }
}

impl CategoryRepository for InMemoryCatalogRepository {
    async fn create(&self, category: &Category) -> CatalogResult<()> {
        let mut store = self.lock()?;
        if store.categories.iter().any(|c| c.slug == category.slug) {
            return Err(CatalogError::SlugTaken);
        }
        store.categories.push(category.clone());
        Ok(())
    }

    async fn find_by_slug(&self, slug: &Slug) -> CatalogResult<Option<Category>> {
        let store = self.lock()?;
        Ok(store.categories.iter().find(|c| &c.slug == slug).cloned())
    }

    async fn delete_by_slug(&self, slug: &Slug) -> CatalogResult<bool> {
        let mut store = self.lock()?;
        let before = store.categories.len();
        store.categories.retain(|c| &c.slug != slug);
        Ok(store.categories.len() < before)
    }

    async fn list(
        &self,
        search: Option<&str>,
        page: &PageParams,
    ) -> CatalogResult<Page<Category>> {
        let store = self.lock()?;
        let mut matched: Vec<Category> = store
            .categories
            .iter()
            .filter(|c| name_matches(&c.name, search))
            .cloned()
            .collect();
        matched.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(paginate(matched, page))
    }
}

impl GenreRepository for InMemoryCatalogRepository {
    async fn create(&self, genre: &Genre) -> CatalogResult<()> {
        let mut store = self.lock()?;
        if store.genres.iter().any(|g| g.slug == genre.slug) {
            return Err(CatalogError::SlugTaken);
        }
        store.genres.push(genre.clone());
        Ok(())
    }

    async fn find_by_slug(&self, slug: &Slug) -> CatalogResult<Option<Genre>> {
        let store = self.lock()?;
        Ok(store.genres.iter().find(|g| &g.slug == slug).cloned())
    }

    async fn delete_by_slug(&self, slug: &Slug) -> CatalogResult<bool> {
        let mut store = self.lock()?;
        let before = store.genres.len();
        store.genres.retain(|g| &g.slug != slug);
        Ok(store.genres.len() < before)
    }

    async fn list(&self, search: Option<&str>, page: &PageParams) -> CatalogResult<Page<Genre>> {
        let store = self.lock()?;
        let mut matched: Vec<Genre> = store
            .genres
            .iter()
            .filter(|g| name_matches(&g.name, search))
            .cloned()
            .collect();
        matched.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(paginate(matched, page))
    }
}

impl TitleRepository for InMemoryCatalogRepository {
    async fn create(&self, title: &Title) -> CatalogResult<()> {
        let mut store = self.lock()?;
        store.titles.push(title.clone());
        Ok(())
    }

    async fn find_by_id(&self, title_id: &TitleId) -> CatalogResult<Option<RatedTitle>> {
        let store = self.lock()?;
        Ok(store
            .titles
            .iter()
            .find(|t| &t.title_id == title_id)
            .cloned()
            .map(|title| rate(&store, title)))
    }

    async fn update(&self, title: &Title) -> CatalogResult<()> {
        let mut store = self.lock()?;
        match store
            .titles
            .iter_mut()
            .find(|t| t.title_id == title.title_id)
        {
            Some(existing) => {
                *existing = title.clone();
                Ok(())
            }
            None => Err(CatalogError::TitleNotFound),
        }
    }

    async fn delete(&self, title_id: &TitleId) -> CatalogResult<bool> {
        let mut store = self.lock()?;
        let before = store.titles.len();
        store.titles.retain(|t| &t.title_id != title_id);
        Ok(store.titles.len() < before)
    }

    async fn list(
        &self,
        filter: &TitleFilter,
        page: &PageParams,
    ) -> CatalogResult<Page<RatedTitle>> {
        let store = self.lock()?;
        let mut matched: Vec<Title> = store
            .titles
            .iter()
            .filter(|t| {
                name_matches(&t.name, filter.name.as_deref())
                    && filter
                        .category
                        .as_ref()
                        .is_none_or(|c| t.category.as_ref() == Some(c))
                    && filter.genre.as_ref().is_none_or(|g| t.genres.contains(g))
                    && filter.year.is_none_or(|y| t.year.value() == y)
            })
            .cloned()
            .collect();
        matched.sort_by(|a, b| a.name.cmp(&b.name));

        let rated = matched.into_iter().map(|t| rate(&store, t)).collect();
        Ok(paginate(rated, page))
    }
}

fn rate(store: &Store, title: Title) -> RatedTitle {
    let scores: Vec<i16> = store
        .reviews
        .iter()
        .filter(|r| r.title_id == title.title_id)
        .map(|r| r.score.value())
        .collect();

    let rating = if scores.is_empty() {
        None
    } else {
        Some(scores.iter().map(|&s| f64::from(s)).sum::<f64>() / scores.len() as f64)
    };

    RatedTitle { title, rating }
}

impl ReviewRepository for InMemoryCatalogRepository {
    async fn create(&self, review: &Review) -> CatalogResult<()> {
        let mut store = self.lock()?;
        if store
            .reviews
            .iter()
            .any(|r| r.title_id == review.title_id && r.author_id == review.author_id)
        {
            return Err(CatalogError::DuplicateReview);
        }
        store.reviews.push(review.clone());
        Ok(())
    }

    async fn find_by_id(&self, review_id: &ReviewId) -> CatalogResult<Option<Review>> {
        let store = self.lock()?;
        Ok(store
            .reviews
            .iter()
            .find(|r| &r.review_id == review_id)
            .cloned())
    }

    async fn find_by_author_and_title(
        &self,
        author_id: &UserId,
        title_id: &TitleId,
    ) -> CatalogResult<Option<Review>> {
        let store = self.lock()?;
        Ok(store
            .reviews
            .iter()
            .find(|r| &r.author_id == author_id && &r.title_id == title_id)
            .cloned())
    }

    async fn update(&self, review: &Review) -> CatalogResult<()> {
        let mut store = self.lock()?;
        match store
            .reviews
            .iter_mut()
            .find(|r| r.review_id == review.review_id)
        {
            Some(existing) => {
                *existing = review.clone();
                Ok(())
            }
            None => Err(CatalogError::ReviewNotFound),
        }
    }

    async fn delete(&self, review_id: &ReviewId) -> CatalogResult<bool> {
        let mut store = self.lock()?;
        let before = store.reviews.len();
        store.reviews.retain(|r| &r.review_id != review_id);
        Ok(store.reviews.len() < before)
    }

    async fn list_for_title(
        &self,
        title_id: &TitleId,
        page: &PageParams,
    ) -> CatalogResult<Page<Review>> {
        let store = self.lock()?;
        let mut matched: Vec<Review> = store
            .reviews
            .iter()
            .filter(|r| &r.title_id == title_id)
            .cloned()
            .collect();
        matched.sort_by(|a, b| b.pub_date.cmp(&a.pub_date));
        Ok(paginate(matched, page))
    }
}

impl CommentRepository for InMemoryCatalogRepository {
    async fn create(&self, comment: &Comment) -> CatalogResult<()> {
        let mut store = self.lock()?;
        store.comments.push(comment.clone());
        Ok(())
    }

    async fn find_by_id(&self, comment_id: &CommentId) -> CatalogResult<Option<Comment>> {
        let store = self.lock()?;
        Ok(store
            .comments
            .iter()
            .find(|c| &c.comment_id == comment_id)
            .cloned())
    }

    async fn update(&self, comment: &Comment) -> CatalogResult<()> {
        let mut store = self.lock()?;
        match store
            .comments
            .iter_mut()
            .find(|c| c.comment_id == comment.comment_id)
        {
            Some(existing) => {
                *existing = comment.clone();
                Ok(())
            }
            None => Err(CatalogError::CommentNotFound),
        }
    }

    async fn delete(&self, comment_id: &CommentId) -> CatalogResult<bool> {
        let mut store = self.lock()?;
        let before = store.comments.len();
        store.comments.retain(|c| &c.comment_id != comment_id);
        Ok(store.comments.len() < before)
    }

    async fn list_for_review(
        &self,
        review_id: &ReviewId,
        page: &PageParams,
    ) -> CatalogResult<Page<Comment>> {
        let store = self.lock()?;
        let mut matched: Vec<Comment> = store
            .comments
            .iter()
            .filter(|c| &c.review_id == review_id)
            .cloned()
            .collect();
        matched.sort_by(|a, b| b.pub_date.cmp(&a.pub_date));
        Ok(paginate(matched, page))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::{Score, TitleYear};

    fn title(name: &str) -> Title {
        Title::new(name, TitleYear::new(2000).unwrap(), None, None, vec![]).unwrap()
    }

    #[tokio::test]
    async fn test_duplicate_slug_conflicts() {
        let repo = InMemoryCatalogRepository::new();
        let slug = Slug::new("movies").unwrap();
        CategoryRepository::create(&repo, &Category::new("Movies", slug.clone()).unwrap())
            .await
            .unwrap();

        let duplicate = Category::new("Films", slug).unwrap();
        assert!(matches!(
            CategoryRepository::create(&repo, &duplicate).await,
            Err(CatalogError::SlugTaken)
        ));
    }

    #[tokio::test]
    async fn test_rating_averages_scores() {
        let repo = InMemoryCatalogRepository::new();
        let t = title("Movie");
        TitleRepository::create(&repo, &t).await.unwrap();

        for score in [4, 8] {
            let review = Review::new(
                t.title_id,
                UserId::new(),
                "user",
                "text",
                Score::new(score).unwrap(),
            )
            .unwrap();
            ReviewRepository::create(&repo, &review).await.unwrap();
        }

        let rated = TitleRepository::find_by_id(&repo, &t.title_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(rated.rating, Some(6.0));
    }

    #[tokio::test]
    async fn test_one_review_per_author_and_title() {
        let repo = InMemoryCatalogRepository::new();
        let t = title("Movie");
        TitleRepository::create(&repo, &t).await.unwrap();

        let author = UserId::new();
        let first =
            Review::new(t.title_id, author, "alice", "first", Score::new(5).unwrap()).unwrap();
        ReviewRepository::create(&repo, &first).await.unwrap();

        let second =
            Review::new(t.title_id, author, "alice", "second", Score::new(7).unwrap()).unwrap();
        assert!(matches!(
            ReviewRepository::create(&repo, &second).await,
            Err(CatalogError::DuplicateReview)
        ));
    }

    #[tokio::test]
    async fn test_title_filters() {
        let repo = InMemoryCatalogRepository::new();

        let mut with_genre = title("Rock album");
        with_genre.set_genres(vec![Slug::new("rock").unwrap()]);
        TitleRepository::create(&repo, &with_genre).await.unwrap();
        TitleRepository::create(&repo, &title("Quiet film"))
            .await
            .unwrap();

        let filter = TitleFilter {
            genre: Some(Slug::new("rock").unwrap()),
            ..Default::default()
        };
        let page = TitleRepository::list(&repo, &filter, &PageParams::default())
            .await
            .unwrap();
        assert_eq!(page.count, 1);
        assert_eq!(page.results[0].title.name, "Rock album");

        let filter = TitleFilter {
            name: Some("quiet".to_string()),
            ..Default::default()
        };
        let page = TitleRepository::list(&repo, &filter, &PageParams::default())
            .await
            .unwrap();
        assert_eq!(page.count, 1);
    }
}
