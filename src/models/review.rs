use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    pub id: String,
    pub space_id: String,
    pub user_id: String,
    pub rating: i64,
    pub comment: String,
    pub created_at: String,
}
