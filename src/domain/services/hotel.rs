use async_trait::async_trait;

use crate::domain::error::AppResult;
use crate::domain::models::hotel::{
    CreateHotel, HomeFilters, Hotel, HotelLookup, SearchQuery, UpdateHotel,
};

#[async_trait]
pub trait HotelService: 'static + Sync + Send {
    async fn available(&self) -> AppResult<Vec<Hotel>>;
    async fn countries(&self) -> AppResult<Vec<String>>;
    async fn by_country(&self, country: &str) -> AppResult<Vec<Hotel>>;
    async fn detail(&self, id: &str) -> AppResult<Option<Hotel>>;
    async fn home_filters(&self) -> AppResult<HomeFilters>;
    async fn search(&self, query: SearchQuery) -> AppResult<Vec<Hotel>>;
    async fn find_for_edit(&self, lookup: HotelLookup) -> AppResult<Vec<Hotel>>;
    async fn create(&self, hotel: CreateHotel) -> AppResult<Hotel>;
    async fn update(&self, id: &str, hotel: UpdateHotel) -> AppResult<Option<Hotel>>;
    async fn delete(&self, id: &str) -> AppResult<Option<Hotel>>;
}
