use anyhow::Context;
use async_trait::async_trait;

use super::{NewProfileRow, RemoteStore, ReviewRow, SpaceRow, UserRow};

/// Supabase-backed remote store: PostgREST for rows, GoTrue for auth.
pub struct SupabaseStore {
    base_url: String,
    anon_key: String,
    client: reqwest::Client,
}

impl SupabaseStore {
    pub fn new(base_url: String, anon_key: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            anon_key,
            client: reqwest::Client::new(),
        }
    }

    fn rest(&self, path: &str) -> String {
        format!("{}/rest/v1/{path}", self.base_url)
    }
}

#[async_trait]
impl RemoteStore for SupabaseStore {
    async fn list_spaces(&self) -> anyhow::Result<Vec<SpaceRow>> {
        let resp = self
            .client
            .get(self.rest("spaces?select=*"))
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.anon_key)
            .send()
            .await
            .context("failed to fetch spaces")?
            .error_for_status()
            .context("spaces query returned error")?;

        resp.json().await.context("failed to parse spaces response")
    }

    async fn list_reviews(&self, space_id: &str) -> anyhow::Result<Vec<ReviewRow>> {
        let path = format!("reviews?select=*&space_id=eq.{space_id}&order=created_at.desc");
        let resp = self
            .client
            .get(self.rest(&path))
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.anon_key)
            .send()
            .await
            .context("failed to fetch reviews")?
            .error_for_status()
            .context("reviews query returned error")?;

        resp.json()
            .await
            .context("failed to parse reviews response")
    }

    async fn authenticate(&self, email: &str, password: &str) -> anyhow::Result<String> {
        let url = format!("{}/auth/v1/token?grant_type=password", self.base_url);
        let resp = self
            .client
            .post(&url)
            .header("apikey", &self.anon_key)
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .context("failed to call auth endpoint")?;

        let status = resp.status();
        let data: serde_json::Value = resp.json().await.context("failed to parse auth response")?;

        if !status.is_success() {
            anyhow::bail!("authentication failed ({status}): {data}");
        }

        data["user"]["id"]
            .as_str()
            .map(|s| s.to_string())
            .ok_or_else(|| anyhow::anyhow!("missing user id in auth response"))
    }

    async fn sign_up(&self, email: &str, password: &str) -> anyhow::Result<String> {
        let url = format!("{}/auth/v1/signup", self.base_url);
        let resp = self
            .client
            .post(&url)
            .header("apikey", &self.anon_key)
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .context("failed to call signup endpoint")?;

        let status = resp.status();
        let data: serde_json::Value = resp
            .json()
            .await
            .context("failed to parse signup response")?;

        if !status.is_success() {
            anyhow::bail!("signup failed ({status}): {data}");
        }

        // GoTrue answers with a bare user object, or a session wrapping
        // one when auto-confirm is on.
        data["user"]["id"]
            .as_str()
            .or_else(|| data["id"].as_str())
            .map(|s| s.to_string())
            .ok_or_else(|| anyhow::anyhow!("missing user id in signup response"))
    }

    async fn create_profile(&self, profile: &NewProfileRow) -> anyhow::Result<UserRow> {
        let resp = self
            .client
            .post(self.rest("users"))
            .header("apikey", &self.anon_key)
            .header("Prefer", "return=representation")
            .bearer_auth(&self.anon_key)
            .json(profile)
            .send()
            .await
            .context("failed to insert profile")?
            .error_for_status()
            .context("profile insert returned error")?;

        let mut rows: Vec<UserRow> = resp
            .json()
            .await
            .context("failed to parse inserted profile")?;
        if rows.is_empty() {
            anyhow::bail!("profile insert returned no row");
        }
        Ok(rows.remove(0))
    }

    async fn get_profile(&self, email: &str) -> anyhow::Result<Option<UserRow>> {
        let path = format!("users?select=*&email=eq.{email}&limit=1");
        let resp = self
            .client
            .get(self.rest(&path))
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.anon_key)
            .send()
            .await
            .context("failed to fetch profile")?
            .error_for_status()
            .context("profile query returned error")?;

        let mut rows: Vec<UserRow> = resp
            .json()
            .await
            .context("failed to parse profile response")?;
        Ok(if rows.is_empty() {
            None
        } else {
            Some(rows.remove(0))
        })
    }
}
