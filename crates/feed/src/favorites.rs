use tracing::{debug, info};

use crate::api::PromptApi;
use crate::error::ApiError;
use crate::models::{FavoritesCollection, Session};

/// Favorites on this page always target the community prompt list.
const COMMUNITY: bool = true;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FavoriteOutcome {
    /// The visitor had no collection; one was created with just this prompt.
    Created { collection_id: i64 },
    Appended,
    AlreadyPresent,
}

/// Add `prompt_id` to the session's favorites, creating the collection if
/// needed. The session is only updated once the remote call succeeds.
pub async fn merge_favorite<A>(
    api: &A,
    session: &mut Session,
    prompt_id: i64,
) -> Result<FavoriteOutcome, ApiError>
where
    A: PromptApi + ?Sized,
{
    match session.favorites.as_mut() {
        None => {
            let ids = [prompt_id];
            let collection_id = api.create_favorites(&ids, COMMUNITY).await?;
            info!(collection_id, prompt_id, "created favorites collection");
            session.favorites = Some(FavoritesCollection {
                id: collection_id,
                prompt_ids: ids.to_vec(),
            });
            Ok(FavoriteOutcome::Created { collection_id })
        }
        Some(collection) if collection.prompt_ids.contains(&prompt_id) => {
            debug!(prompt_id, "prompt already in favorites");
            Ok(FavoriteOutcome::AlreadyPresent)
        }
        Some(collection) => {
            let mut ids = collection.prompt_ids.clone();
            ids.push(prompt_id);
            api.update_favorites(collection.id, &ids, COMMUNITY).await?;
            collection.prompt_ids = ids;
            Ok(FavoriteOutcome::Appended)
        }
    }
}
