use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hotel {
    pub id: String,
    pub name: String,
    pub location: String,
    /// Nightly rate in dollars.
    pub price: u32,
    pub rating: f32,
}

/// Input collected by the assistant's hotel search form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelSearchParams {
    pub location: String,
    pub check_in: String,
    pub check_out: String,
    pub guests: u32,
}

impl Default for HotelSearchParams {
    fn default() -> Self {
        Self {
            location: String::new(),
            check_in: String::new(),
            check_out: String::new(),
            guests: 1,
        }
    }
}

static HOTELS: Lazy<Vec<Hotel>> = Lazy::new(|| {
    [
        ("h1", "Grand Resort & Spa", "Maldives", 450, 4.8),
        ("h2", "Luxury Palace Hotel", "Dubai", 380, 4.6),
        ("h3", "Marina Bay Hotel", "Singapore", 320, 4.5),
    ]
    .into_iter()
    .map(|(id, name, location, price, rating)| Hotel {
        id: id.into(),
        name: name.into(),
        location: location.into(),
        price,
        rating,
    })
    .collect()
});

pub fn hotel_catalog() -> &'static [Hotel] {
    &HOTELS
}

pub(super) fn matching(location: &str) -> Vec<Hotel> {
    let needle = location.to_lowercase();
    HOTELS
        .iter()
        .filter(|hotel| hotel.location.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

pub(super) fn by_id(id: &str) -> Option<Hotel> {
    HOTELS.iter().find(|hotel| hotel.id == id).cloned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matching_ignores_case() {
        let found = matching("MALDIVES");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "h1");
        assert_eq!(matching("a").len(), 3);
    }

    #[test]
    fn search_params_default_to_one_guest() {
        assert_eq!(HotelSearchParams::default().guests, 1);
        let json = serde_json::to_string(&HotelSearchParams::default()).unwrap();
        assert!(json.contains("checkIn"));
    }
}
