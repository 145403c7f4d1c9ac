use std::sync::Arc;

use async_trait::async_trait;
use surrealdb::Surreal;
use surrealdb::engine::remote::ws::Client;

use crate::domain::models::hotel::{CreateHotel, Hotel, HotelLookup, SearchQuery, UpdateHotel};
use crate::domain::repositories::hotel::HotelRepository;
use crate::domain::repositories::repository::{RepositoryError, RepositoryResult};
use crate::infrastructure::models::hotel::{SurrealCountry, SurrealHotel, SurrealHotelWrite};

pub struct HotelRepositoryImpl {
    db: Arc<Surreal<Client>>,
}

impl HotelRepositoryImpl {
    pub fn new(db: Arc<Surreal<Client>>) -> Self {
        Self { db }
    }

    async fn select_where(
        &self,
        condition: &str,
        bindings: Vec<(&'static str, String)>,
    ) -> RepositoryResult<Vec<Hotel>> {
        let mut query = self
            .db
            .query(format!("SELECT * FROM type::table($table) WHERE {condition}"))
            .bind(("table", HOTEL));

        for binding in bindings {
            query = query.bind(binding);
        }

        let hotels: Vec<SurrealHotel> = query.await?.take(0)?;

        Ok(hotels.into_iter().map(Into::into).collect())
    }
}

const HOTEL: &str = "hotel";

/// Analyzer folding case, accents and full-width forms, see
/// `migration/schemas/hotel.surql`.
const FOLD_ANALYZER: &str = "hotel_fold";

#[async_trait]
impl HotelRepository for HotelRepositoryImpl {
    async fn find_available(&self) -> RepositoryResult<Vec<Hotel>> {
        self.select_where("available = true", Vec::new()).await
    }

    async fn find_by_country(&self, country: &str) -> RepositoryResult<Vec<Hotel>> {
        self.select_where("country = $country", vec![("country", country.to_owned())])
            .await
    }

    async fn find_by_id(&self, id: &str) -> RepositoryResult<Option<Hotel>> {
        let hotel: Option<SurrealHotel> = self.db.select((HOTEL, id.to_owned())).await?;

        Ok(hotel.map(Into::into))
    }

    async fn find_matching(&self, lookup: HotelLookup) -> RepositoryResult<Vec<Hotel>> {
        let mut conditions = Vec::new();

        if lookup.id.is_some() {
            conditions.push("id = type::thing($table, $id)".to_string());
        }
        if lookup.name.is_some() {
            conditions.push(format!(
                "search::analyze('{FOLD_ANALYZER}', name) = search::analyze('{FOLD_ANALYZER}', $name)"
            ));
        }
        if conditions.is_empty() {
            return Ok(Vec::new());
        }

        let hotels: Vec<SurrealHotel> = self
            .db
            .query(format!(
                "SELECT * FROM type::table($table) WHERE {}",
                conditions.join(" OR ")
            ))
            .bind(("table", HOTEL))
            .bind(("id", lookup.id.unwrap_or_default()))
            .bind(("name", lookup.name.unwrap_or_default()))
            .await?
            .take(0)?;

        Ok(hotels.into_iter().map(Into::into).collect())
    }

    async fn distinct_countries(&self) -> RepositoryResult<Vec<String>> {
        let countries: Vec<SurrealCountry> = self
            .db
            .query("SELECT country FROM type::table($table) GROUP BY country ORDER BY country ASC")
            .bind(("table", HOTEL))
            .await?
            .take(0)?;

        Ok(countries.into_iter().map(|c| c.country).collect())
    }

    async fn sample_available(&self, size: usize) -> RepositoryResult<Vec<Hotel>> {
        let hotels: Vec<SurrealHotel> = self
            .db
            .query("SELECT * FROM type::table($table) WHERE available = true ORDER BY rand() LIMIT $size")
            .bind(("table", HOTEL))
            .bind(("size", size as i64))
            .await?
            .take(0)?;

        Ok(hotels.into_iter().map(Into::into).collect())
    }

    async fn sample_countries(&self, size: usize) -> RepositoryResult<Vec<String>> {
        let countries: Vec<SurrealCountry> = self
            .db
            .query("SELECT country FROM (SELECT country FROM type::table($table) GROUP BY country) ORDER BY rand() LIMIT $size")
            .bind(("table", HOTEL))
            .bind(("size", size as i64))
            .await?
            .take(0)?;

        Ok(countries.into_iter().map(|c| c.country).collect())
    }

    async fn search(&self, query: SearchQuery) -> RepositoryResult<Vec<Hotel>> {
        let hotels: Vec<SurrealHotel> = self
            .db
            .query(format!(
                "SELECT * FROM type::table($table) \
                 WHERE (name @0@ $destination OR country @1@ $destination) \
                 AND available = true AND star_rating >= $rating \
                 ORDER BY cost_per_night {}",
                query.direction
            ))
            .bind(("table", HOTEL))
            .bind(("destination", query.destination))
            .bind(("rating", query.min_rating))
            .await?
            .take(0)?;

        Ok(hotels.into_iter().map(Into::into).collect())
    }

    async fn create(&self, hotel: CreateHotel) -> RepositoryResult<Hotel> {
        let hotel: Option<SurrealHotel> = self
            .db
            .create(HOTEL)
            .content(SurrealHotelWrite::from(hotel))
            .await?;

        hotel
            .map(Into::into)
            .ok_or_else(|| RepositoryError::Inconsistent("hotel was not created".into()))
    }

    async fn update(&self, id: &str, hotel: UpdateHotel) -> RepositoryResult<Option<Hotel>> {
        let hotel: Option<SurrealHotel> = self
            .db
            .update((HOTEL, id.to_owned()))
            .merge(SurrealHotelWrite::from(hotel))
            .await?;

        Ok(hotel.map(Into::into))
    }

    async fn delete(&self, id: &str) -> RepositoryResult<Option<Hotel>> {
        let hotel: Option<SurrealHotel> = self.db.delete((HOTEL, id.to_owned())).await?;

        Ok(hotel.map(Into::into))
    }
}
