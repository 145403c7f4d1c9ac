use async_trait::async_trait;

use crate::domain::models::hotel::{CreateHotel, Hotel, HotelLookup, SearchQuery, UpdateHotel};

use super::repository::RepositoryResult;

#[async_trait]
pub trait HotelRepository: Send + Sync {
    async fn find_available(&self) -> RepositoryResult<Vec<Hotel>>;
    async fn find_by_country(&self, country: &str) -> RepositoryResult<Vec<Hotel>>;
    async fn find_by_id(&self, id: &str) -> RepositoryResult<Option<Hotel>>;
    async fn find_matching(&self, lookup: HotelLookup) -> RepositoryResult<Vec<Hotel>>;
    async fn distinct_countries(&self) -> RepositoryResult<Vec<String>>;
    async fn sample_available(&self, size: usize) -> RepositoryResult<Vec<Hotel>>;
    async fn sample_countries(&self, size: usize) -> RepositoryResult<Vec<String>>;
    async fn search(&self, query: SearchQuery) -> RepositoryResult<Vec<Hotel>>;
    async fn create(&self, hotel: CreateHotel) -> RepositoryResult<Hotel>;
    async fn update(&self, id: &str, hotel: UpdateHotel) -> RepositoryResult<Option<Hotel>>;
    async fn delete(&self, id: &str) -> RepositoryResult<Option<Hotel>>;
}
