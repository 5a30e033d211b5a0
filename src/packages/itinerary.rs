use serde::Serialize;

use crate::errors::DeskError;

const IMAGE_BASE: &str = "https://images.unsplash.com/";
const IMAGE_PARAMS: &str = "?auto=format&fit=crop&w=800";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DayActivity {
    pub time: &'static str,
    pub description: &'static str,
    pub image: Option<&'static str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ItineraryDay {
    pub day: u32,
    pub title: &'static str,
    pub description: &'static str,
    pub activities: &'static [DayActivity],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PresetItinerary {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub duration: &'static str,
    pub price: &'static str,
    pub image: &'static str,
    pub days: &'static [ItineraryDay],
}

/// Expands a stored image reference into a full URL.
pub fn image_url(reference: &str) -> String {
    format!("{}{}{}", IMAGE_BASE, reference, IMAGE_PARAMS)
}

static CATALOG: &[PresetItinerary] = &[
    PresetItinerary {
        id: "india",
        title: "Incredible India",
        description: "Experience the rich culture and heritage of India",
        duration: "10 Days",
        price: "From ₹2,499",
        image: "photo-1548013146-72479768bada",
        days: &[
            ItineraryDay {
                day: 1,
                title: "Arrival in Delhi",
                description: "Welcome to India's capital city!",
                activities: &[
                    DayActivity {
                        time: "Morning",
                        description:
                            "Arrive at Indira Gandhi International Airport, transfer to hotel",
                        image: Some("photo-1587474260584-136574528ed5"),
                    },
                    DayActivity {
                        time: "Evening",
                        description:
                            "Explore Connaught Place, welcome dinner with traditional North Indian cuisine",
                        image: Some("photo-1582510003544-4d00b7f74220"),
                    },
                ],
            },
            ItineraryDay {
                day: 2,
                title: "Old Delhi Tour",
                description: "Explore the historic heart of Delhi",
                activities: &[
                    DayActivity {
                        time: "Morning",
                        description:
                            "Visit Red Fort and take a rickshaw ride through Chandni Chowk",
                        image: Some("photo-1585136917972-7697357e8e26"),
                    },
                    DayActivity {
                        time: "Afternoon",
                        description: "Visit Jama Masjid and enjoy a street food tour",
                        image: Some("photo-1566552881560-0be862a7c445"),
                    },
                ],
            },
        ],
    },
    PresetItinerary {
        id: "thailand",
        title: "Thailand Adventure",
        description: "Discover the beauty of Thailand",
        duration: "7 Days",
        price: "From ₹1,899",
        image: "photo-1552465011-b4e21bf6e79a",
        days: &[ItineraryDay {
            day: 1,
            title: "Welcome to Bangkok",
            description: "Begin your Thai adventure in the vibrant capital",
            activities: &[
                DayActivity {
                    time: "Morning",
                    description: "Arrive at Suvarnabhumi Airport, transfer to hotel",
                    image: Some("photo-1583417319070-4a69db38a482"),
                },
                DayActivity {
                    time: "Evening",
                    description: "Visit Grand Palace and Wat Phra Kaew",
                    image: Some("photo-1563492065599-3520f775eeed"),
                },
            ],
        }],
    },
    PresetItinerary {
        id: "japan",
        title: "Japan Explorer",
        description: "Journey through modern and traditional Japan",
        duration: "12 Days",
        price: "From ₹3,299",
        image: "photo-1493976040374-85c8e12f0c0e",
        days: &[ItineraryDay {
            day: 1,
            title: "Tokyo Arrival",
            description: "Begin your Japanese journey in Tokyo",
            activities: &[
                DayActivity {
                    time: "Morning",
                    description: "Arrive at Narita International Airport, transfer to hotel",
                    image: Some("photo-1503899036084-c55cdd92da26"),
                },
                DayActivity {
                    time: "Evening",
                    description: "Explore Shibuya Crossing and enjoy local cuisine",
                    image: Some("photo-1542051841857-5f90071e7989"),
                },
            ],
        }],
    },
];

/// The fixed preset catalog.
pub fn catalog() -> &'static [PresetItinerary] {
    CATALOG
}

pub fn find_itinerary(id: &str) -> Option<&'static PresetItinerary> {
    let id = id.trim();
    CATALOG
        .iter()
        .find(|entry| entry.id.eq_ignore_ascii_case(id))
}

/// Walks the days of one selected preset itinerary.
#[derive(Debug, Clone, Default)]
pub struct ItineraryViewer {
    active: Option<&'static PresetItinerary>,
    current_day: usize,
}

impl ItineraryViewer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Activates the itinerary with `id` and rewinds to its first day.
    pub fn select(&mut self, id: &str) -> Result<&'static PresetItinerary, DeskError> {
        let itinerary = find_itinerary(id)
            .ok_or_else(|| DeskError::NotFound(format!("itinerary `{}`", id.trim())))?;
        self.active = Some(itinerary);
        self.current_day = 0;
        Ok(itinerary)
    }

    pub fn active(&self) -> Option<&'static PresetItinerary> {
        self.active
    }

    pub fn current_day_index(&self) -> usize {
        self.current_day
    }

    pub fn current_day(&self) -> Option<&'static ItineraryDay> {
        self.active
            .and_then(|itinerary| itinerary.days.get(self.current_day))
    }

    pub fn next_day(&mut self) {
        if let Some(itinerary) = self.active {
            let last = itinerary.days.len().saturating_sub(1);
            self.current_day = (self.current_day + 1).min(last);
        }
    }

    pub fn previous_day(&mut self) {
        self.current_day = self.current_day.saturating_sub(1);
    }

    pub fn has_next(&self) -> bool {
        self.active
            .map(|itinerary| self.current_day + 1 < itinerary.days.len())
            .unwrap_or(false)
    }

    pub fn has_previous(&self) -> bool {
        self.active.is_some() && self.current_day > 0
    }

    /// Returns to the catalog.
    pub fn close(&mut self) {
        self.active = None;
        self.current_day = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_has_three_presets() {
        let ids: Vec<&str> = catalog().iter().map(|entry| entry.id).collect();
        assert_eq!(ids, vec!["india", "thailand", "japan"]);
        assert_eq!(catalog()[0].days.len(), 2);
    }

    #[test]
    fn day_index_never_leaves_bounds() {
        let mut viewer = ItineraryViewer::new();
        for preset in catalog() {
            viewer.select(preset.id).unwrap();
            for step in 0..20 {
                if step % 4 == 3 {
                    viewer.previous_day();
                } else {
                    viewer.next_day();
                }
                assert!(viewer.current_day_index() < preset.days.len());
                assert!(viewer.current_day().is_some());
            }
        }
    }

    #[test]
    fn selecting_resets_to_first_day() {
        let mut viewer = ItineraryViewer::new();
        viewer.select("india").unwrap();
        viewer.next_day();
        assert_eq!(viewer.current_day().map(|d| d.title), Some("Old Delhi Tour"));
        assert!(!viewer.has_next());
        assert!(viewer.has_previous());

        viewer.select("India").unwrap();
        assert_eq!(viewer.current_day_index(), 0);
        assert_eq!(viewer.current_day().map(|d| d.day), Some(1));
    }

    #[test]
    fn single_day_itinerary_stays_on_day_one() {
        let mut viewer = ItineraryViewer::new();
        viewer.select("japan").unwrap();
        viewer.next_day();
        viewer.previous_day();
        viewer.previous_day();
        assert_eq!(viewer.current_day_index(), 0);
        assert!(!viewer.has_next() && !viewer.has_previous());
    }

    #[test]
    fn close_and_unknown_selection() {
        let mut viewer = ItineraryViewer::new();
        viewer.select("thailand").unwrap();
        viewer.close();
        assert!(viewer.active().is_none());
        viewer.next_day();
        assert_eq!(viewer.current_day_index(), 0);

        let err = viewer.select("peru").unwrap_err();
        assert!(matches!(err, DeskError::NotFound(_)));
    }

    #[test]
    fn image_references_expand_to_urls() {
        assert_eq!(
            image_url(catalog()[1].image),
            "https://images.unsplash.com/photo-1552465011-b4e21bf6e79a?auto=format&fit=crop&w=800"
        );
    }
}
