pub mod supabase;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::models::{AvailabilityMap, Location, Review, Space, SpaceType, User};

/// Read access to the remote data store. Every method may fail; callers
/// decide whether to surface the error or fall back to the bundled seed
/// dataset. No call is retried.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    async fn list_spaces(&self) -> anyhow::Result<Vec<SpaceRow>>;
    /// Reviews for a space, newest first.
    async fn list_reviews(&self, space_id: &str) -> anyhow::Result<Vec<ReviewRow>>;
    /// Verify credentials; returns the remote auth subject id on success.
    async fn authenticate(&self, email: &str, password: &str) -> anyhow::Result<String>;
    /// Profile row for an authenticated user, looked up by email.
    async fn get_profile(&self, email: &str) -> anyhow::Result<Option<UserRow>>;
    /// Register a new auth account; returns the remote auth subject id.
    async fn sign_up(&self, email: &str, password: &str) -> anyhow::Result<String>;
    /// Insert a profile row and return it as stored.
    async fn create_profile(&self, profile: &NewProfileRow) -> anyhow::Result<UserRow>;
}

// Persisted row shapes: snake_case, every field nullable. The into_*
// mappings are total: numeric nulls become 0, text nulls become empty
// strings, a missing availability map becomes empty.

#[derive(Debug, Clone, Deserialize)]
pub struct SpaceRow {
    pub id: Option<i64>,
    pub title: Option<String>,
    #[serde(rename = "type")]
    pub space_type: Option<String>,
    pub description: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub capacity: Option<u32>,
    pub price_per_hour: Option<f64>,
    pub amenities: Option<Vec<String>>,
    pub images: Option<Vec<String>>,
    pub host_id: Option<i64>,
    pub rating: Option<f64>,
    pub review_count: Option<i64>,
    pub availability: Option<AvailabilityMap>,
}

impl SpaceRow {
    pub fn into_space(self) -> Space {
        Space {
            id: self.id.map(|id| id.to_string()).unwrap_or_default(),
            title: self.title.unwrap_or_default(),
            space_type: self
                .space_type
                .as_deref()
                .and_then(SpaceType::parse)
                .unwrap_or(SpaceType::Consultorio),
            description: self.description.unwrap_or_default(),
            location: Location {
                address: self.address.unwrap_or_default(),
                city: self.city.unwrap_or_default(),
                lat: self.lat.unwrap_or(0.0),
                lng: self.lng.unwrap_or(0.0),
            },
            capacity: self.capacity.unwrap_or(1),
            price_per_hour: self.price_per_hour.unwrap_or(0.0),
            amenities: self.amenities.unwrap_or_default(),
            images: self.images.unwrap_or_default(),
            host_id: self.host_id.map(|id| id.to_string()).unwrap_or_default(),
            rating: self.rating.unwrap_or(0.0),
            review_count: self.review_count.unwrap_or(0),
            availability: self.availability.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReviewRow {
    pub id: Option<i64>,
    pub space_id: Option<i64>,
    pub user_id: Option<i64>,
    pub rating: Option<i64>,
    pub comment: Option<String>,
    pub created_at: Option<String>,
}

impl ReviewRow {
    pub fn into_review(self) -> Review {
        Review {
            id: self.id.map(|id| id.to_string()).unwrap_or_default(),
            space_id: self.space_id.map(|id| id.to_string()).unwrap_or_default(),
            user_id: self.user_id.map(|id| id.to_string()).unwrap_or_default(),
            rating: self.rating.unwrap_or(0),
            comment: self.comment.unwrap_or_default(),
            created_at: self.created_at.unwrap_or_default(),
        }
    }
}

/// Profile row as written at registration time. The store assigns the id.
#[derive(Debug, Clone, Serialize)]
pub struct NewProfileRow {
    pub name: String,
    pub email: String,
    pub is_host: bool,
    pub avatar_url: String,
    pub bio: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserRow {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub avatar_url: Option<String>,
    pub is_host: Option<bool>,
    pub bio: Option<String>,
}

impl UserRow {
    pub fn into_user(self) -> User {
        User {
            id: self.id.map(|id| id.to_string()).unwrap_or_default(),
            name: self.name.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
            avatar_url: self.avatar_url.unwrap_or_default(),
            is_host: self.is_host.unwrap_or(false),
            bio: self.bio.unwrap_or_default(),
        }
    }
}
