//! Demo data for an empty store.

use locatr_domain::{DomainError, ImageUrl, LocationCode, LocationName};

use crate::infrastructure::ports::{LocationRepo, NewLocation, RepoError};

/// (code, name, image slug)
const LANDMARKS: [(&str, &str, &str); 10] = [
    ("EIFFEL", "Torre Eiffel", "eiffel-tower"),
    ("SAGRADA", "Sagrada Familia", "sagrada-familia"),
    ("COLISEO", "Coliseo Romano", "colosseum"),
    ("BIGBEN", "Big Ben", "big-ben"),
    ("LIBERTY", "Estatua de la Libertad", "statue-of-liberty"),
    ("MACHU", "Machu Picchu", "machu-picchu"),
    ("TAJMAHAL", "Taj Mahal", "taj-mahal"),
    ("CRISTO", "Cristo Redentor", "cristo-redentor"),
    ("PETRA", "Petra", "petra"),
    ("CHICHEN", "Chichen Itzá", "chichen-itza"),
];

/// Insert the landmark set when the store holds no locations.
///
/// Returns the number of rows inserted (0 when the store already had data).
pub async fn seed_demo_locations(repo: &dyn LocationRepo) -> Result<usize, RepoError> {
    if repo.count().await? > 0 {
        tracing::debug!("Store not empty, skipping demo data");
        return Ok(0);
    }

    for (code, name, slug) in LANDMARKS {
        let location = landmark(code, name, slug).map_err(RepoError::serialization)?;
        repo.create(&location).await?;
    }

    tracing::info!(count = LANDMARKS.len(), "Seeded demo locations");
    Ok(LANDMARKS.len())
}

fn landmark(code: &str, name: &str, slug: &str) -> Result<NewLocation, DomainError> {
    Ok(NewLocation {
        code: LocationCode::new(code)?,
        name: LocationName::new(name)?,
        image: Some(ImageUrl::new(format!(
            "https://example.com/images/{slug}.jpg"
        ))?),
    })
}
