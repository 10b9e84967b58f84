use prompt_feed::{FavoritesCollection, Prompt, Session, VoteDirection};
use serde::{Deserialize, Serialize};

// ===== Responses =====

#[derive(Debug, Deserialize)]
pub struct DataEnvelope<T> {
    pub data: T,
}

#[derive(Debug, Deserialize)]
pub struct PromptListResponse {
    pub data: Vec<Prompt>,
    pub meta: ListMeta,
}

#[derive(Debug, Deserialize)]
pub struct ListMeta {
    pub pagination: Pagination,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub page_size: u32,
    pub page_count: u32,
    pub total: u64,
}

#[derive(Debug, Deserialize)]
pub struct CreatedFavorites {
    pub id: i64,
}

#[derive(Debug, Deserialize)]
pub struct UserProfile {
    pub username: String,
    pub favorites: Option<FavoritesPayload>,
}

#[derive(Debug, Deserialize)]
pub struct FavoritesPayload {
    pub id: i64,
    #[serde(rename = "commLoves", default)]
    pub comm_loves: Option<Vec<i64>>,
}

impl UserProfile {
    pub fn into_session(self, token: String) -> Session {
        let mut session = Session::new(token, self.username);
        session.favorites = self.favorites.map(|f| FavoritesCollection {
            id: f.id,
            prompt_ids: f.comm_loves.unwrap_or_default(),
        });
        session
    }
}

// ===== Requests =====

#[derive(Debug, Serialize)]
pub struct VoteRequest {
    pub action: VoteDirection,
}

/// Favorites body; the key names which list the ids belong to. The feed only
/// writes community prompts, but `loves` is part of the same endpoint and
/// `PromptApi` carries the flag, so both shapes are serialized here.
#[derive(Debug, Serialize)]
pub enum FavoritesBody<'a> {
    #[serde(rename = "commLoves")]
    Community(&'a [i64]),
    #[serde(rename = "loves")]
    Builtin(&'a [i64]),
}

impl<'a> FavoritesBody<'a> {
    pub fn new(prompt_ids: &'a [i64], community: bool) -> Self {
        if community {
            FavoritesBody::Community(prompt_ids)
        } else {
            FavoritesBody::Builtin(prompt_ids)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn favorites_body_keys() {
        let ids = [7, 9];
        assert_eq!(
            serde_json::to_value(FavoritesBody::new(&ids, true)).unwrap(),
            json!({ "commLoves": [7, 9] })
        );
        assert_eq!(
            serde_json::to_value(FavoritesBody::new(&ids, false)).unwrap(),
            json!({ "loves": [7, 9] })
        );
    }

    #[test]
    fn profile_without_loves_has_empty_collection() {
        let profile: UserProfile = serde_json::from_value(json!({
            "username": "ann",
            "favorites": { "id": 4, "commLoves": null }
        }))
        .unwrap();

        let session = profile.into_session("t".into());
        let favorites = session.favorites.unwrap();
        assert_eq!(favorites.id, 4);
        assert!(favorites.prompt_ids.is_empty());
    }

    #[test]
    fn list_without_pagination_is_rejected() {
        let result: Result<PromptListResponse, _> = serde_json::from_value(json!({
            "data": [],
            "meta": {}
        }));
        assert!(result.is_err());
    }
}
