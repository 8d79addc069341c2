use crate::models::{FiltersState, Space};

/// Evaluate one space against the filter set. Fields are AND-combined;
/// each falls away when left at its "match everything" value.
pub fn matches(space: &Space, filters: &FiltersState) -> bool {
    let needle = filters.location.trim().to_lowercase();
    if !needle.is_empty() {
        let haystack = format!(
            "{}, {}",
            space.location.address, space.location.city
        )
        .to_lowercase();
        if !haystack.contains(&needle) {
            return false;
        }
    }

    let (min_price, max_price) = filters.price_range;
    if space.price_per_hour < min_price || space.price_per_hour > max_price {
        return false;
    }

    if !filters.space_types.is_empty() && !filters.space_types.contains(&space.space_type) {
        return false;
    }

    if filters.capacity > 1 && space.capacity < filters.capacity {
        return false;
    }

    // Deliberately checks raw declared slots, not slots net of bookings;
    // the availability endpoint is the precise source of truth.
    if let Some(date) = filters.date.as_deref() {
        if !date.is_empty() && !space.has_declared_slots(date) {
            return false;
        }
    }

    true
}

pub fn filter_spaces(spaces: &[Space], filters: &FiltersState) -> Vec<Space> {
    spaces
        .iter()
        .filter(|space| matches(space, filters))
        .cloned()
        .collect()
}
