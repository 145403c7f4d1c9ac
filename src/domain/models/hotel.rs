use std::fmt;

/// Home page sample size for both listings and countries.
pub const SAMPLE_SIZE: usize = 6;

#[derive(Debug, Clone, PartialEq)]
pub struct Hotel {
    pub id: String,
    pub name: String,
    pub description: String,
    pub image: Option<String>,
    pub star_rating: i64,
    pub country: String,
    pub cost_per_night: f64,
    pub available: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateHotel {
    pub name: String,
    pub description: String,
    pub image: Option<String>,
    pub star_rating: i64,
    pub country: String,
    pub cost_per_night: f64,
    pub available: bool,
}

/// Fields written over an existing listing. A missing image keeps the
/// stored one.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateHotel {
    pub name: String,
    pub description: String,
    pub image: Option<String>,
    pub star_rating: i64,
    pub country: String,
    pub cost_per_night: f64,
    pub available: bool,
}

impl From<CreateHotel> for UpdateHotel {
    fn from(hotel: CreateHotel) -> Self {
        UpdateHotel {
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

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    /// `-1` sorts descending, every other code ascending.
    pub fn from_code(code: i64) -> Self {
        if code == -1 {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Ascending => write!(f, "ASC"),
            SortDirection::Descending => write!(f, "DESC"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    pub destination: String,
    pub min_rating: i64,
    pub direction: SortDirection,
}

impl SearchQuery {
    pub fn parse(destination: &str, rating: Option<&str>, sorting: Option<&str>) -> Self {
        SearchQuery {
            destination: destination.trim().to_string(),
            min_rating: parse_code(rating),
            direction: SortDirection::from_code(parse_code(sorting)),
        }
    }
}

/// Match by record id or by name, ignoring case, accents and character width.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HotelLookup {
    pub id: Option<String>,
    pub name: Option<String>,
}

impl HotelLookup {
    pub fn new(id: Option<&str>, name: Option<&str>) -> Self {
        let present = |value: Option<&str>| {
            value
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(str::to_string)
        };

        HotelLookup {
            id: present(id),
            name: present(name),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.id.is_none() && self.name.is_none()
    }
}

#[derive(Debug, Clone, Default)]
pub struct HomeFilters {
    pub hotels: Vec<Hotel>,
    pub countries: Vec<String>,
}

/// Reads the leading integer of a form value. Absent, unparsable and zero
/// values fall back to 1.
pub fn parse_code(raw: Option<&str>) -> i64 {
    let Some(raw) = raw else {
        return 1;
    };

    let raw = raw.trim_start();
    let (sign, digits) = match raw.as_bytes().first() {
        Some(b'-') => (-1, &raw[1..]),
        Some(b'+') => (1, &raw[1..]),
        _ => (1, raw),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());

    match digits[..end].parse::<i64>() {
        Ok(0) | Err(_) => 1,
        Ok(value) => sign * value,
    }
}
