use std::borrow::Cow;
use std::collections::HashMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::domain::error::AppResult;
use crate::domain::models::hotel::{CreateHotel, Hotel, HotelLookup, SearchQuery, UpdateHotel};

#[derive(Debug, Serialize, ToSchema)]
pub struct HotelView {
    #[schema(examples("kc8c2xkbg4x5l1dk7c3f"))]
    id: String,
    #[schema(examples("Le Marais"))]
    name: String,
    description: String,
    #[schema(examples("hotels/le-marais"))]
    image: Option<String>,
    #[schema(examples(4))]
    star_rating: i64,
    #[schema(examples("France"))]
    country: String,
    #[schema(examples(180.0))]
    cost_per_night: f64,
    available: bool,
}

impl From<&Hotel> for HotelView {
    fn from(hotel: &Hotel) -> Self {
        HotelView {
            id: hotel.id.to_owned(),
            name: hotel.name.to_owned(),
            description: hotel.description.to_owned(),
            image: hotel.image.to_owned(),
            star_rating: hotel.star_rating,
            country: hotel.country.to_owned(),
            cost_per_night: hotel.cost_per_night,
            available: hotel.available,
        }
    }
}

impl HotelView {
    pub fn list<'a>(hotels: impl IntoIterator<Item = &'a Hotel>) -> Vec<HotelView> {
        hotels.into_iter().map(HotelView::from).collect()
    }
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct SearchDTO {
    #[serde(default)]
    #[validate(length(max = 100, message = "Destination must not exceed 100 characters"))]
    #[schema(examples("Paris"))]
    pub destination: String,

    #[schema(examples("3"))]
    pub rating: Option<String>,

    #[schema(examples("-1"))]
    pub sorting: Option<String>,
}

impl SearchDTO {
    pub fn query(&self) -> SearchQuery {
        SearchQuery::parse(
            &self.destination,
            self.rating.as_deref(),
            self.sorting.as_deref(),
        )
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct FindHotelDTO {
    #[schema(examples("kc8c2xkbg4x5l1dk7c3f"))]
    pub hotel_id: Option<String>,

    #[validate(length(max = 100, message = "Hotel name must not exceed 100 characters"))]
    #[schema(examples("hotel lutetia"))]
    pub hotel_name: Option<String>,
}

impl From<&FindHotelDTO> for HotelLookup {
    fn from(dto: &FindHotelDTO) -> Self {
        HotelLookup::new(dto.hotel_id.as_deref(), dto.hotel_name.as_deref())
    }
}

/// Listing fields as submitted by the admin forms, after the media stage
/// put the image reference in place.
#[derive(Debug, Validate, ToSchema)]
pub struct HotelForm {
    #[validate(length(min = 1, max = 32, message = "Hotel name must contain between 1 and 32 characters"))]
    pub hotel_name: String,

    #[validate(length(min = 1, message = "Hotel description must be specified"))]
    pub hotel_description: String,

    pub image: Option<String>,

    #[validate(range(min = 0, max = 5, message = "Star rating must be between 0 and 5"))]
    pub star_rating: i64,

    #[validate(length(min = 1, message = "Country must be specified"))]
    pub country: String,

    #[validate(range(min = 0.0, message = "Cost per night must not be negative"))]
    pub cost_per_night: f64,

    pub available: bool,
}

fn invalid(message: &'static str) -> ValidationError {
    ValidationError::new("parse").with_message(Cow::from(message))
}

fn parse_number<T: FromStr + Default>(
    fields: &HashMap<String, String>,
    name: &'static str,
    message: &'static str,
    errors: &mut ValidationErrors,
) -> T {
    match fields.get(name).map(|value| value.trim().parse::<T>()) {
        Some(Ok(value)) => value,
        _ => {
            errors.add(name, invalid(message));
            T::default()
        }
    }
}

/// Checkboxes are left out of the body when unticked.
fn parse_flag(fields: &HashMap<String, String>, errors: &mut ValidationErrors) -> bool {
    let Some(value) = fields.get("available") else {
        return false;
    };

    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "on" | "1" | "yes" => true,
        "false" | "off" | "0" | "no" | "" => false,
        _ => {
            errors.add("available", invalid("Availability must be yes or no"));
            false
        }
    }
}

fn image_reference(fields: &HashMap<String, String>) -> Option<String> {
    fields
        .get("image")
        .map(|image| image.trim().to_string())
        .filter(|image| !image.is_empty())
}

impl HotelForm {
    pub fn from_fields(fields: &HashMap<String, String>) -> AppResult<HotelForm> {
        let text = |name: &str| {
            fields
                .get(name)
                .map(|value| value.trim().to_string())
                .unwrap_or_default()
        };

        let mut errors = ValidationErrors::new();

        let star_rating = parse_number::<i64>(
            fields,
            "star_rating",
            "Star rating must be a whole number",
            &mut errors,
        );
        let cost_per_night = parse_number::<f64>(
            fields,
            "cost_per_night",
            "Cost per night must be a number",
            &mut errors,
        );
        if !cost_per_night.is_finite() {
            errors.add("cost_per_night", invalid("Cost per night must be a number"));
        }
        let available = parse_flag(fields, &mut errors);

        if !errors.is_empty() {
            return Err(errors.into());
        }

        let form = HotelForm {
            hotel_name: text("hotel_name"),
            hotel_description: text("hotel_description"),
            image: image_reference(fields),
            star_rating,
            country: text("country"),
            cost_per_night,
            available,
        };

        form.validate()?;

        Ok(form)
    }

    /// Picks up the reference the media stage stored after the upload.
    pub fn with_upload(self, fields: &HashMap<String, String>) -> HotelForm {
        HotelForm {
            image: image_reference(fields),
            ..self
        }
    }
}

impl From<HotelForm> for CreateHotel {
    fn from(form: HotelForm) -> Self {
        CreateHotel {
            name: form.hotel_name,
            description: form.hotel_description,
            image: form.image,
            star_rating: form.star_rating,
            country: form.country,
            cost_per_night: form.cost_per_night,
            available: form.available,
        }
    }
}

impl From<HotelForm> for UpdateHotel {
    fn from(form: HotelForm) -> Self {
        CreateHotel::from(form).into()
    }
}
