use serde::{Deserialize, Serialize};
use surrealdb::sql::Thing;

use crate::domain::models::hotel::{CreateHotel, Hotel, UpdateHotel};

#[derive(Debug, Deserialize)]
pub struct SurrealHotel {
    id: Thing,
    name: String,
    description: String,
    image: Option<String>,
    star_rating: i64,
    country: String,
    cost_per_night: f64,
    available: bool,
}

/// Written on create and merged on update; an absent image leaves the
/// stored one untouched.
#[derive(Serialize)]
pub struct SurrealHotelWrite {
    name: String,
    description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    image: Option<String>,
    star_rating: i64,
    country: String,
    cost_per_night: f64,
    available: bool,
}

#[derive(Debug, Deserialize)]
pub struct SurrealCountry {
    pub country: String,
}

impl From<CreateHotel> for SurrealHotelWrite {
    fn from(hotel: CreateHotel) -> Self {
        SurrealHotelWrite {
            name: hotel.name,
            description: hotel.description,
            image: hotel.image,
            star_rating: hotel.star_rating,
            country: hotel.country,
            cost_per_night: hotel.cost_per_night,
            available: hotel.available,
        }
    }
}

impl From<UpdateHotel> for SurrealHotelWrite {
    fn from(hotel: UpdateHotel) -> Self {
        SurrealHotelWrite {
            name: hotel.name,
            description: hotel.description,
            image: hotel.image,
            star_rating: hotel.star_rating,
            country: hotel.country,
            cost_per_night: hotel.cost_per_night,
            available: hotel.available,
        }
    }
}

impl From<SurrealHotel> for Hotel {
    fn from(hotel: SurrealHotel) -> Self {
        Hotel {
            id: hotel.id.id.to_raw(),
            name: hotel.name,
            description: hotel.description,
            image: hotel.image,
            star_rating: hotel.star_rating,
            country: hotel.country,
            cost_per_night: hotel.cost_per_night,
            available: hotel.available,
        }
    }
}
