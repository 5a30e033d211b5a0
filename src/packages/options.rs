//! Static option tables offered by the package builder.

/// Fallback label for unset or unknown selections.
pub const NOT_SPECIFIED: &str = "Not specified";

/// One selectable option. Budget tiers also carry the price range shown in
/// the summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionEntry {
    pub id: &'static str,
    pub label: &'static str,
    pub value: Option<&'static str>,
}

impl OptionEntry {
    const fn new(id: &'static str, label: &'static str) -> Self {
        Self {
            id,
            label,
            value: None,
        }
    }

    const fn ranged(id: &'static str, label: &'static str, value: &'static str) -> Self {
        Self {
            id,
            label,
            value: Some(value),
        }
    }
}

pub const TRIP_TYPES: &[OptionEntry] = &[
    OptionEntry::new("leisure", "Leisure"),
    OptionEntry::new("adventure", "Adventure"),
    OptionEntry::new("business", "Business"),
    OptionEntry::new("family", "Family"),
];

pub const ACCOMMODATION_TYPES: &[OptionEntry] = &[
    OptionEntry::new("hotel", "Hotel"),
    OptionEntry::new("resort", "Resort"),
    OptionEntry::new("apartment", "Apartment"),
    OptionEntry::new("villa", "Villa"),
];

pub const ACTIVITIES: &[OptionEntry] = &[
    OptionEntry::new("sightseeing", "Sightseeing"),
    OptionEntry::new("adventure", "Adventure Sports"),
    OptionEntry::new("beach", "Beach Activities"),
    OptionEntry::new("food", "Food Tours"),
];

pub const TRANSPORTATION_TYPES: &[OptionEntry] = &[
    OptionEntry::new("rental", "Car Rental"),
    OptionEntry::new("transfer", "Airport Transfer"),
    OptionEntry::new("public", "Public Transport"),
    OptionEntry::new("none", "No Transport Needed"),
];

pub const BUDGET_RANGES: &[OptionEntry] = &[
    OptionEntry::ranged("budget", "Budget", "₹0-₹10000"),
    OptionEntry::ranged("comfort", "Comfort", "₹10000-₹30000"),
    OptionEntry::ranged("luxury", "Luxury", "₹30000-₹50000"),
    OptionEntry::ranged("ultra", "Ultra Luxury", "₹50000+"),
];

pub fn find<'t>(value: &str, table: &'t [OptionEntry]) -> Option<&'t OptionEntry> {
    table.iter().find(|entry| entry.id == value)
}

/// Display label for `value` in `table`, or [`NOT_SPECIFIED`].
pub fn label_for(value: Option<&str>, table: &[OptionEntry]) -> &'static str {
    value
        .filter(|id| !id.is_empty())
        .and_then(|id| find(id, table))
        .map(|entry| entry.label)
        .unwrap_or(NOT_SPECIFIED)
}

/// Price range for a budget tier id, or [`NOT_SPECIFIED`].
pub fn budget_range_for(value: Option<&str>) -> &'static str {
    value
        .and_then(|id| find(id, BUDGET_RANGES))
        .and_then(|entry| entry.value)
        .unwrap_or(NOT_SPECIFIED)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_TABLES: [&[OptionEntry]; 5] = [
        TRIP_TYPES,
        ACCOMMODATION_TYPES,
        ACTIVITIES,
        TRANSPORTATION_TYPES,
        BUDGET_RANGES,
    ];

    #[test]
    fn every_entry_resolves_to_its_label() {
        for table in ALL_TABLES {
            for entry in table {
                assert_eq!(label_for(Some(entry.id), table), entry.label);
            }
        }
    }

    #[test]
    fn unknown_or_empty_values_are_not_specified() {
        for table in ALL_TABLES {
            assert_eq!(label_for(None, table), NOT_SPECIFIED);
            assert_eq!(label_for(Some(""), table), NOT_SPECIFIED);
            assert_eq!(label_for(Some("teleport"), table), NOT_SPECIFIED);
        }
    }

    #[test]
    fn lookups_are_per_table() {
        // `adventure` means different things in two tables.
        assert_eq!(label_for(Some("adventure"), TRIP_TYPES), "Adventure");
        assert_eq!(label_for(Some("adventure"), ACTIVITIES), "Adventure Sports");
        assert_eq!(label_for(Some("villa"), TRIP_TYPES), NOT_SPECIFIED);
    }

    #[test]
    fn budget_ranges_expose_values() {
        assert_eq!(budget_range_for(Some("comfort")), "₹10000-₹30000");
        assert_eq!(budget_range_for(Some("ultra")), "₹50000+");
        assert_eq!(budget_range_for(Some("cheap")), NOT_SPECIFIED);
        assert_eq!(budget_range_for(None), NOT_SPECIFIED);
    }
}
