pub mod movie;
pub mod repo;
pub mod seed;

pub use movie::{parse_position, Movie, MovieInput, ValidationError};
pub use repo::{MemoryRepository, MovieRepo, RepoError, RepoResult};
pub use seed::seed_movies;
