use std::sync::RwLock;

use async_trait::async_trait;
use prompt_feed::{ApiError, PromptApi, PromptPage, Query, Session, VoteDirection};
use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::models::{
    CreatedFavorites, DataEnvelope, FavoritesBody, PromptListResponse, UserProfile, VoteRequest,
};

/// The prompt backend over HTTP.
pub struct HttpPromptApi {
    client: reqwest::Client,
    base_url: String,
    token: RwLock<Option<String>>,
}

impl HttpPromptApi {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token: RwLock::new(None),
        }
    }

    /// Bearer token sent with every later request.
    pub fn set_token(&self, token: Option<String>) {
        if let Ok(mut slot) = self.token.write() {
            *slot = token;
        }
    }

    /// Load the visitor behind `token`, including their favorites.
    pub async fn fetch_session(&self, token: &str) -> Result<Session, ApiError> {
        let response = self
            .client
            .get(format!("{}/users/me", self.base_url))
            .bearer_auth(token)
            .send()
            .await
            .map_err(network)?;

        let profile: DataEnvelope<UserProfile> = parse(check(response).await?).await?;
        Ok(profile.data.into_session(token.to_string()))
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.token.read().ok().and_then(|t| t.clone()) {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response, ApiError> {
        let response = self.authorized(builder).send().await.map_err(network)?;
        check(response).await
    }
}

#[async_trait]
impl PromptApi for HttpPromptApi {
    async fn fetch_prompts(&self, query: &Query) -> Result<PromptPage, ApiError> {
        let sort = format!(
            "{}:{}",
            query.sort_field.as_str(),
            query.sort_order.as_str()
        );
        let params = [
            ("page", query.page.to_string()),
            ("pageSize", query.page_size.to_string()),
            ("sort", sort),
            ("search", query.search_term.clone()),
        ];
        debug!(?params, "GET /prompts");

        let builder = self
            .client
            .get(format!("{}/prompts", self.base_url))
            .query(&params);
        let body: PromptListResponse = parse(self.send(builder).await?).await?;
        let pagination = body.meta.pagination;
        debug!(
            page = pagination.page,
            page_size = pagination.page_size,
            page_count = pagination.page_count,
            total = pagination.total,
            "listing received"
        );

        Ok(PromptPage {
            items: body.data,
            total: pagination.total,
        })
    }

    async fn submit_vote(&self, prompt_id: i64, direction: VoteDirection) -> Result<(), ApiError> {
        let builder = self
            .client
            .post(format!("{}/prompts/{}/vote", self.base_url, prompt_id))
            .json(&VoteRequest { action: direction });
        self.send(builder).await?;
        Ok(())
    }

    async fn create_favorites(&self, prompt_ids: &[i64], community: bool) -> Result<i64, ApiError> {
        let builder = self
            .client
            .post(format!("{}/favorites", self.base_url))
            .json(&FavoritesBody::new(prompt_ids, community));
        let created: DataEnvelope<CreatedFavorites> = parse(self.send(builder).await?).await?;
        Ok(created.data.id)
    }

    async fn update_favorites(
        &self,
        collection_id: i64,
        prompt_ids: &[i64],
        community: bool,
    ) -> Result<(), ApiError> {
        let builder = self
            .client
            .put(format!("{}/favorites/{}", self.base_url, collection_id))
            .json(&FavoritesBody::new(prompt_ids, community));
        self.send(builder).await?;
        Ok(())
    }
}

fn network(err: reqwest::Error) -> ApiError {
    ApiError::Network(err.to_string())
}

async fn check(response: Response) -> Result<Response, ApiError> {
    if response.status().is_success() {
        return Ok(response);
    }
    let status = response.status();
    let message = response.text().await.unwrap_or_default();
    Err(ApiError::Status {
        status: status.as_u16(),
        message,
    })
}

async fn parse<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let bytes = response.bytes().await.map_err(network)?;
    serde_json::from_slice(&bytes).map_err(|e| ApiError::Parse(e.to_string()))
}
