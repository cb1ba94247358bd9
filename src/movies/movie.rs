use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
    pub title: String,
    pub genre: String,
    pub year: i64,
    pub director: String,
}

impl Movie {
    pub fn new(title: &str, genre: &str, year: i64, director: &str) -> Self {
        Self {
            title: title.to_string(),
            genre: genre.to_string(),
            year,
            director: director.to_string(),
        }
    }

    pub fn matches_genre(&self, genre: &str) -> bool {
        self.genre.to_lowercase() == genre.to_lowercase()
    }
}

/// Request payload for create and update.
///
/// Every field is optional at the wire level so that an incomplete body
/// reaches validation instead of failing deserialization. A field counts as
/// missing when it is absent, an empty string, or (for `year`) zero.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MovieInput {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub year: Option<i64>,
    #[serde(default)]
    pub director: Option<String>,
}

impl MovieInput {
    pub fn into_movie(self) -> Result<Movie, ValidationError> {
        let mut missing = Vec::new();

        let title = present(self.title, "title", &mut missing);
        let genre = present(self.genre, "genre", &mut missing);
        let year = match self.year {
            Some(year) if year != 0 => Some(year),
            _ => {
                missing.push("year");
                None
            }
        };
        let director = present(self.director, "director", &mut missing);

        match (title, genre, year, director) {
            (Some(title), Some(genre), Some(year), Some(director)) => Ok(Movie {
                title,
                genre,
                year,
                director,
            }),
            _ => Err(ValidationError::MissingFields(missing)),
        }
    }
}

fn present(value: Option<String>, name: &'static str, missing: &mut Vec<&'static str>) -> Option<String> {
    match value {
        Some(s) if !s.is_empty() => Some(s),
        _ => {
            missing.push(name);
            None
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("All fields (title, genre, year, director) are required")]
    MissingFields(Vec<&'static str>),
}

/// Parse a 0-based position taken from the request path. Negative,
/// fractional and non-numeric input yields `None`, which callers treat as out
/// of bounds.
pub fn parse_position(raw: &str) -> Option<usize> {
    let n = raw.parse::<i64>().ok()?;
    usize::try_from(n).ok()
}
