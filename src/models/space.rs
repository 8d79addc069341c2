use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Per-date availability declared by the host: ISO date -> ordered hour
/// labels ("09:00" means the interval 09:00-10:00).
pub type AvailabilityMap = BTreeMap<String, Vec<String>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpaceType {
    #[serde(rename = "Consultorio")]
    Consultorio,
    #[serde(rename = "Estudio de Yoga")]
    EstudioDeYoga,
    #[serde(rename = "Oficina Privada")]
    OficinaPrivada,
    #[serde(rename = "Terapia")]
    Terapia,
    #[serde(rename = "Sala de Reuniones")]
    SalaDeReuniones,
    #[serde(rename = "Espacio de Masajes")]
    EspacioDeMasajes,
    #[serde(rename = "Medicina Natural")]
    MedicinaNatural,
}

impl SpaceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpaceType::Consultorio => "Consultorio",
            SpaceType::EstudioDeYoga => "Estudio de Yoga",
            SpaceType::OficinaPrivada => "Oficina Privada",
            SpaceType::Terapia => "Terapia",
            SpaceType::SalaDeReuniones => "Sala de Reuniones",
            SpaceType::EspacioDeMasajes => "Espacio de Masajes",
            SpaceType::MedicinaNatural => "Medicina Natural",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Consultorio" => Some(SpaceType::Consultorio),
            "Estudio de Yoga" => Some(SpaceType::EstudioDeYoga),
            "Oficina Privada" => Some(SpaceType::OficinaPrivada),
            "Terapia" => Some(SpaceType::Terapia),
            "Sala de Reuniones" => Some(SpaceType::SalaDeReuniones),
            "Espacio de Masajes" => Some(SpaceType::EspacioDeMasajes),
            "Medicina Natural" => Some(SpaceType::MedicinaNatural),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    pub address: String,
    pub city: String,
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Space {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub space_type: SpaceType,
    pub description: String,
    pub location: Location,
    pub capacity: u32,
    pub price_per_hour: f64,
    pub amenities: Vec<String>,
    pub images: Vec<String>,
    pub host_id: String,
    pub rating: f64,
    pub review_count: i64,
    #[serde(default)]
    pub availability: AvailabilityMap,
}

impl Space {
    /// Slots the host declared for `date`.
    ///
    /// A space with no availability map at all returns `None`, which call
    /// sites resolve to the generic full-day window. A space that declared
    /// slots for *some* dates treats an undeclared date as fully blocked,
    /// so this returns `Some` with an empty slice.
    pub fn declared_slots(&self, date: &str) -> Option<&[String]> {
        if self.availability.is_empty() {
            return None;
        }
        Some(
            self.availability
                .get(date)
                .map(|slots| slots.as_slice())
                .unwrap_or(&[]),
        )
    }

    /// Raw declared-availability check used by the search filter. Does not
    /// subtract existing bookings.
    pub fn has_declared_slots(&self, date: &str) -> bool {
        self.availability
            .get(date)
            .map(|slots| !slots.is_empty())
            .unwrap_or(false)
    }
}
