//! Privileged read-path: every user's sessions in one flat list.
//!
//! Each owned session id is resolved against the provider and stamped with
//! the owning user's identity. One failed lookup is skipped with a warning;
//! the aggregate never fails wholesale because a single remote call errored.

use chrono::Utc;
use futures::future::join_all;
use numrent_core::session::SessionView;
use numrent_core::types::DbId;
use numrent_db::repositories::UserRepo;
use serde::Serialize;

use crate::error::AppResult;
use crate::services::rental::normalize_session;
use crate::state::AppState;

/// A resolved session with its owner attached.
#[derive(Debug, Serialize)]
pub struct OwnedSessionView {
    #[serde(flatten)]
    pub session: SessionView,
    pub user_id: DbId,
    pub user_email: String,
    pub user_name: Option<String>,
}

/// Resolve and flatten all users' sessions.
pub async fn list_all_sessions(state: &AppState) -> AppResult<Vec<OwnedSessionView>> {
    let users = UserRepo::list(&state.pool).await?;

    let mut all = Vec::new();
    for user in users {
        if user.session_ids.is_empty() {
            continue;
        }

        let lookups = user
            .session_ids
            .iter()
            .map(|sid| state.gateway.session_details(sid));
        let results = join_all(lookups).await;

        for (session_id, result) in user.session_ids.iter().zip(results) {
            match result {
                Ok(raw) => all.push(OwnedSessionView {
                    session: normalize_session(
                        raw,
                        Utc::now(),
                        &state.config.provider.service_name,
                    ),
                    user_id: user.id,
                    user_email: user.email.clone(),
                    user_name: user.name.clone(),
                }),
                Err(err) => {
                    tracing::warn!(
                        %session_id,
                        user_id = user.id,
                        error = %err,
                        "skipping session that failed to resolve"
                    );
                }
            }
        }
    }

    Ok(all)
}
