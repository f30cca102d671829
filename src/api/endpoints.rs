// Posts API endpoint functions.
// Typed list/create/update/delete operations on the posts resource.

use reqwest::Response;
use serde::de::DeserializeOwned;

use crate::error::Result;

use super::client::ApiClient;
use super::types::{NewPost, Post};

impl ApiClient {
    /// Fetch the full posts collection.
    pub async fn list_posts(&self) -> Result<Vec<Post>> {
        let response = self.get("/posts").await?;
        decode(response).await
    }

    /// Create a post. The backend echoes the created resource, including the
    /// assigned id when the payload omitted one.
    pub async fn create_post(&self, post: &NewPost) -> Result<Post> {
        let response = self.post("/posts", post).await?;
        decode(response).await
    }

    /// Replace an existing post in full. Fails with `NotFound` when no post
    /// with the given id exists.
    pub async fn update_post(&self, post: &Post) -> Result<Post> {
        let response = self.put(&format!("/posts/{}", post.id), post).await?;
        decode(response).await
    }

    /// Delete a post by id. Not idempotent: deleting an already-deleted id
    /// surfaces whatever error the backend returns.
    pub async fn delete_post(&self, id: u64) -> Result<()> {
        self.delete(&format!("/posts/{id}")).await?;
        Ok(())
    }
}

/// Read the body as text and deserialize it, so a malformed body maps to the
/// decode error variant rather than a transport error.
async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let body = response.text().await?;
    Ok(serde_json::from_str(&body)?)
}
