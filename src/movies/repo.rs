use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, info};

use super::movie::Movie;

pub type RepoResult<T> = Result<T, RepoError>;

/// Storage for the movie collection. Positions are 0-based indexes into the
/// current ordering and shift whenever an earlier entry is removed.
#[async_trait]
pub trait MovieRepo: Send + Sync {
    async fn list(&self) -> RepoResult<Vec<Movie>>;
    async fn filter_by_genre(&self, genre: &str) -> RepoResult<Vec<Movie>>;
    async fn get(&self, position: usize) -> RepoResult<Option<Movie>>;
    async fn create(&self, movie: Movie) -> RepoResult<Movie>;
    async fn update(&self, position: usize, movie: Movie) -> RepoResult<Option<Movie>>;
    async fn delete(&self, position: usize) -> RepoResult<Option<Movie>>;
    async fn len(&self) -> RepoResult<usize>;
}

/// In-process collection. Mutations hold the write lock across the bounds
/// check and the change itself.
#[derive(Default)]
pub struct MemoryRepository {
    movies: RwLock<Vec<Movie>>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_movies(movies: Vec<Movie>) -> Self {
        info!("Loaded {} movies into collection", movies.len());
        Self {
            movies: RwLock::new(movies),
        }
    }
}

#[async_trait]
impl MovieRepo for MemoryRepository {
    async fn list(&self) -> RepoResult<Vec<Movie>> {
        let movies = self.movies.read().await;
        Ok(movies.clone())
    }

    async fn filter_by_genre(&self, genre: &str) -> RepoResult<Vec<Movie>> {
        let movies = self.movies.read().await;
        let matched: Vec<Movie> = movies
            .iter()
            .filter(|m| m.matches_genre(genre))
            .cloned()
            .collect();
        debug!(genre = genre, count = matched.len(), "Filtered movies by genre");
        Ok(matched)
    }

    async fn get(&self, position: usize) -> RepoResult<Option<Movie>> {
        let movies = self.movies.read().await;
        Ok(movies.get(position).cloned())
    }

    async fn create(&self, movie: Movie) -> RepoResult<Movie> {
        let mut movies = self.movies.write().await;
        movies.push(movie.clone());
        info!(position = movies.len() - 1, title = %movie.title, "Created movie");
        Ok(movie)
    }

    async fn update(&self, position: usize, movie: Movie) -> RepoResult<Option<Movie>> {
        let mut movies = self.movies.write().await;
        let Some(slot) = movies.get_mut(position) else {
            return Ok(None);
        };
        *slot = movie.clone();
        info!(position = position, title = %movie.title, "Updated movie");
        Ok(Some(movie))
    }

    async fn delete(&self, position: usize) -> RepoResult<Option<Movie>> {
        let mut movies = self.movies.write().await;
        if position >= movies.len() {
            return Ok(None);
        }
        let removed = movies.remove(position);
        info!(position = position, title = %removed.title, "Deleted movie");
        Ok(Some(removed))
    }

    async fn len(&self) -> RepoResult<usize> {
        Ok(self.movies.read().await.len())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error("Storage error: {0}")]
    Storage(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::movies::seed_movies;
    use std::sync::Arc;

    fn seeded() -> MemoryRepository {
        MemoryRepository::with_movies(seed_movies())
    }

    #[tokio::test]
    async fn test_get_matches_list_position() {
        let repo = seeded();
        let all = repo.list().await.unwrap();
        for (i, movie) in all.iter().enumerate() {
            assert_eq!(repo.get(i).await.unwrap().as_ref(), Some(movie));
        }
        assert_eq!(repo.get(all.len()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_create_appends() {
        let repo = seeded();
        let movie = Movie::new("Alien", "Horror", 1979, "Ridley Scott");
        repo.create(movie.clone()).await.unwrap();
        assert_eq!(repo.len().await.unwrap(), 8);
        assert_eq!(repo.get(7).await.unwrap(), Some(movie));
    }

    #[tokio::test]
    async fn test_delete_shifts_later_entries() {
        let repo = seeded();
        let before = repo.list().await.unwrap();

        let removed = repo.delete(2).await.unwrap();
        assert_eq!(removed.as_ref(), Some(&before[2]));

        let after = repo.list().await.unwrap();
        assert_eq!(after.len(), before.len() - 1);
        assert_eq!(&after[..2], &before[..2]);
        assert_eq!(&after[2..], &before[3..]);
    }

    #[tokio::test]
    async fn test_delete_out_of_range() {
        let repo = seeded();
        assert_eq!(repo.delete(7).await.unwrap(), None);
        assert_eq!(repo.len().await.unwrap(), 7);
    }

    #[tokio::test]
    async fn test_update_replaces_whole_entry() {
        let repo = seeded();
        let replacement = Movie::new("Heat", "Crime", 1995, "Michael Mann");
        let updated = repo.update(3, replacement.clone()).await.unwrap();
        assert_eq!(updated.as_ref(), Some(&replacement));
        assert_eq!(repo.get(3).await.unwrap(), Some(replacement));
        assert_eq!(repo.len().await.unwrap(), 7);

        assert_eq!(
            repo.update(99, Movie::new("X", "Y", 1, "Z")).await.unwrap(),
            None
        );
    }

    #[tokio::test]
    async fn test_filter_by_genre_keeps_order() {
        let repo = seeded();
        let action = repo.filter_by_genre("action").await.unwrap();
        let titles: Vec<&str> = action.iter().map(|m| m.title.as_str()).collect();
        assert_eq!(titles, vec!["The Dark Knight", "Spider-Man: Into the Spider-Verse"]);

        assert!(repo.filter_by_genre("Western").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_concurrent_creates_are_all_kept() {
        let repo = Arc::new(MemoryRepository::new());
        let mut handles = Vec::new();
        for i in 0..32 {
            let repo = repo.clone();
            handles.push(tokio::spawn(async move {
                repo.create(Movie::new(&format!("M{}", i), "Drama", 2000 + i, "D"))
                    .await
                    .unwrap();
            }));
        }
        for h in handles {
            h.await.unwrap();
        }
        assert_eq!(repo.len().await.unwrap(), 32);
    }
}
