//! HTTP gateway to the remote SMS-rental provider.
//!
//! The provider exposes a JSON-over-POST API authenticated with a bearer
//! secret; every response wraps its payload in a `result` envelope. This
//! crate holds the wire types, the [`SmsGateway`] trait the rest of the
//! workspace programs against, and the [`RestSmsGateway`] production
//! implementation.

pub mod gateway;
pub mod types;

pub use gateway::{ProviderError, RestSmsGateway, SmsGateway};
pub use types::{Country, NumberOffer, ProviderMessage, ProviderSession};
