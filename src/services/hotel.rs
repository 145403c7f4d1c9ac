use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{
    error::AppResult,
    models::hotel::{
        CreateHotel, HomeFilters, Hotel, HotelLookup, SAMPLE_SIZE, SearchQuery, UpdateHotel,
    },
    repositories::hotel::HotelRepository,
    services::hotel::HotelService,
};

pub struct HotelServiceImpl {
    repository: Arc<dyn HotelRepository>,
}

impl HotelServiceImpl {
    pub fn new(repository: Arc<dyn HotelRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl HotelService for HotelServiceImpl {
    async fn available(&self) -> AppResult<Vec<Hotel>> {
        Ok(self.repository.find_available().await?)
    }

    async fn countries(&self) -> AppResult<Vec<String>> {
        Ok(self.repository.distinct_countries().await?)
    }

    // Availability is deliberately not filtered here, unlike `available`.
    async fn by_country(&self, country: &str) -> AppResult<Vec<Hotel>> {
        Ok(self.repository.find_by_country(country).await?)
    }

    async fn detail(&self, id: &str) -> AppResult<Option<Hotel>> {
        Ok(self.repository.find_by_id(id).await?)
    }

    async fn home_filters(&self) -> AppResult<HomeFilters> {
        let (hotels, countries) = futures::try_join!(
            self.repository.sample_available(SAMPLE_SIZE),
            self.repository.sample_countries(SAMPLE_SIZE),
        )?;

        Ok(HomeFilters { hotels, countries })
    }

    #[tracing::instrument(skip(self))]
    async fn search(&self, query: SearchQuery) -> AppResult<Vec<Hotel>> {
        if query.destination.is_empty() {
            return Ok(Vec::new());
        }

        Ok(self.repository.search(query).await?)
    }

    async fn find_for_edit(&self, lookup: HotelLookup) -> AppResult<Vec<Hotel>> {
        if lookup.is_empty() {
            return Ok(Vec::new());
        }

        Ok(self.repository.find_matching(lookup).await?)
    }

    async fn create(&self, hotel: CreateHotel) -> AppResult<Hotel> {
        let hotel = self.repository.create(hotel).await?;

        tracing::info!(hotel = %hotel.id, "hotel created");

        Ok(hotel)
    }

    async fn update(&self, id: &str, hotel: UpdateHotel) -> AppResult<Option<Hotel>> {
        let hotel = self.repository.update(id, hotel).await?;

        tracing::info!(hotel = %id, found = hotel.is_some(), "hotel updated");

        Ok(hotel)
    }

    async fn delete(&self, id: &str) -> AppResult<Option<Hotel>> {
        let hotel = self.repository.delete(id).await?;

        tracing::info!(hotel = %id, found = hotel.is_some(), "hotel deleted");

        Ok(hotel)
    }
}
