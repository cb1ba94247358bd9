use super::movie::Movie;

/// The fixed entries the collection starts with.
pub fn seed_movies() -> Vec<Movie> {
    vec![
        Movie::new("The Matrix", "Sci-Fi", 1999, "The Wachowskis"),
        Movie::new("Inception", "Sci-Fi", 2010, "Christopher Nolan"),
        Movie::new("The Godfather", "Drama", 1972, "Francis Ford Coppola"),
        Movie::new("Pulp Fiction", "Crime", 1994, "Quentin Tarantino"),
        Movie::new("The Dark Knight", "Action", 2008, "Christopher Nolan"),
        Movie::new("Spider-Man: Into the Spider-Verse", "Action", 2018, "Peter Ramsey"),
        Movie::new("The Super Mario Bros. Movie", "Comedy", 2023, "Aaron Horvath"),
    ]
}
