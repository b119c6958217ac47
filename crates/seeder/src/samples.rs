//! The fixed sample records written by every seeding run.

use catalog_core::catalog::CatalogRecord;

/// Document container the seeder writes to unless overridden.
pub const DEFAULT_SEED_CONTAINER: &str = "movies";

fn record(
    id: &str,
    title: &str,
    description: &str,
    genre: &str,
    year: i32,
    duration: u32,
    rating: f64,
) -> CatalogRecord {
    CatalogRecord {
        id: id.to_string(),
        name: None,
        title: Some(title.to_string()),
        description: Some(description.to_string()),
        genre: Some(genre.to_string()),
        year: Some(year),
        duration: Some(duration),
        rating: Some(rating),
        video_url: None,
        thumbnail_url: None,
    }
}

/// Five sample movies with ids `"1"` through `"5"`.
pub fn sample_records() -> Vec<CatalogRecord> {
    vec![
        record(
            "1",
            "Mountain Adventure",
            "A thrilling journey through the highest mountains in the world.",
            "Adventure",
            2024,
            120,
            4.5,
        ),
        record(
            "2",
            "Forest Mysteries",
            "Discover the secrets hidden deep in the forest.",
            "Drama",
            2023,
            105,
            4.2,
        ),
        record(
            "3",
            "Top Speed",
            "Intense action with high-speed car races.",
            "Action",
            2024,
            95,
            4.7,
        ),
        record(
            "4",
            "Seaside Romance",
            "An unforgettable love story by the sea.",
            "Romance",
            2023,
            110,
            4.3,
        ),
        record(
            "5",
            "Comedy of Errors",
            "Guaranteed laughs with hilarious situations.",
            "Comedy",
            2024,
            88,
            4.0,
        ),
    ]
}
