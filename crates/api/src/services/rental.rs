//! The rental orchestrator: one linear path from balance check to a
//! normalized session.
//!
//! 1. Authenticated caller: reject before any provider call if the balance
//!    cannot cover the price.
//! 2. Create the session at the provider.
//! 3. Normalize the wire shape into [`SessionView`].
//! 4. Authenticated caller: record the session id under the user, then debit
//!    the price through the conditional ledger update.
//! 5. Return the view.
//!
//! A failure in step 4 leaves a provider-side rental that is not attributed
//! locally. There is no compensating delete on the provider, so the orphaned
//! session id is logged at ERROR for manual reconciliation.

use chrono::{Duration, Utc};
use numrent_core::error::CoreError;
use numrent_core::otp::extract_code;
use numrent_core::phone::format_msisdn;
use numrent_core::session::{
    CountryView, MessageView, PlatformView, SessionView, DEFAULT_SESSION_TTL_SECS,
};
use numrent_core::types::{DbId, Timestamp};
use numrent_db::repositories::UserRepo;
use numrent_provider::{ProviderMessage, ProviderSession};
use rust_decimal::Decimal;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::CurrentUser;
use crate::state::AppState;

/// Rent a number for the calling user, or anonymously when `user` is `None`.
///
/// Anonymous rentals skip both the balance check and the bookkeeping: the
/// session is created and returned but never persisted to any user.
pub async fn rent_number(state: &AppState, user: Option<&CurrentUser>) -> AppResult<SessionView> {
    let price = state.config.rental_price;

    // 1. Balance gate, before the provider is involved at all.
    if let Some(user) = user {
        let balance = UserRepo::balance(&state.pool, user.user_id)
            .await?
            .ok_or_else(|| CoreError::NotFound {
                entity: "user",
                id: user.user_id.to_string(),
            })?;
        if balance < price {
            return Err(CoreError::InsufficientFunds {
                required: price,
                available: balance,
            }
            .into());
        }
    }

    // 2. Provider call. A failure here fails the whole operation; nothing
    //    has been persisted yet.
    let raw = state
        .gateway
        .create_session(state.config.provider.service_id)
        .await?;

    // 3. Normalize.
    let view = normalize_session(raw, Utc::now(), &state.config.provider.service_name);

    // 4. Bookkeeping, only for authenticated callers.
    if let Some(user) = user {
        if let Err(err) = associate_and_debit(state, user.user_id, &view.id, price).await {
            tracing::error!(
                user_id = user.user_id,
                session_id = %view.id,
                error = %err,
                "rental bookkeeping failed; provider session exists without local attribution"
            );
            return Err(err);
        }
        tracing::info!(
            user_id = user.user_id,
            session_id = %view.id,
            %price,
            "rental recorded and debited"
        );
    }

    Ok(view)
}

/// Record the session under the user and debit the rental price.
async fn associate_and_debit(
    state: &AppState,
    user_id: DbId,
    session_id: &str,
    price: Decimal,
) -> AppResult<()> {
    UserRepo::add_session(&state.pool, user_id, session_id).await?;

    let debited = UserRepo::adjust_balance(&state.pool, user_id, -price).await?;
    if debited.is_none() {
        // The pre-check passed but a concurrent spend landed first; the
        // conditional update refused to cross the floor.
        let available = UserRepo::balance(&state.pool, user_id)
            .await?
            .unwrap_or_default();
        return Err(CoreError::InsufficientFunds {
            required: price,
            available,
        }
        .into());
    }
    Ok(())
}

/// Normalize a provider session into the client-facing [`SessionView`].
///
/// Missing country/platform descriptors fall back to the catalog defaults;
/// a missing expiry becomes `now` + 30 minutes.
pub fn normalize_session(
    raw: ProviderSession,
    now: Timestamp,
    default_platform: &str,
) -> SessionView {
    let display_number = format_msisdn(&raw.phone_number);

    let country = raw
        .country
        .map(|c| CountryView {
            name: c.name,
            iso_code: c.iso_code.unwrap_or_else(|| "TR".to_string()),
        })
        .unwrap_or_else(CountryView::default_turkey);

    let platform = raw
        .platform
        .map(|p| PlatformView { name: p.name })
        .unwrap_or_else(|| PlatformView {
            name: default_platform.to_string(),
        });

    let expires_at = raw
        .expires_at
        .unwrap_or_else(|| now + Duration::seconds(DEFAULT_SESSION_TTL_SECS));

    let message = raw.message.map(normalize_message);
    let message_count = raw
        .message_count
        .unwrap_or_else(|| i64::from(message.is_some()));

    SessionView {
        id: raw.id,
        phone_number: raw.phone_number,
        display_number,
        country,
        platform,
        expires_at,
        message_count,
        message,
    }
}

/// Normalize one received message, preferring the provider-supplied code
/// over extraction from the text.
pub fn normalize_message(raw: ProviderMessage) -> MessageView {
    let code = raw.code.or_else(|| extract_code(&raw.content));
    MessageView {
        sender: raw.sender.unwrap_or_else(|| "unknown".to_string()),
        text: raw.content,
        code,
        received_at: raw.received_at,
    }
}
