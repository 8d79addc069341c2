use serde::{Deserialize, Serialize};

use crate::models::SpaceType;

/// Multi-field search filter. Every field is optional in effect: blank
/// location matches everything, an empty type set matches everything, and
/// capacity only applies above 1.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FiltersState {
    pub location: String,
    pub price_range: (f64, f64),
    pub space_types: Vec<SpaceType>,
    pub capacity: u32,
    pub date: Option<String>,
}

impl Default for FiltersState {
    fn default() -> Self {
        FiltersState {
            location: String::new(),
            price_range: (0.0, f64::MAX),
            space_types: vec![],
            capacity: 1,
            date: None,
        }
    }
}
