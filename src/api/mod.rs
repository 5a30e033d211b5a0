//! In-process stand-in for the hotel and chat services.
//!
//! Every call waits a fixed delay before resolving, and a client built with
//! failures enabled rejects every call with that operation's generic error.

mod chat;
mod hotels;

use std::time::Duration;

use thiserror::Error;

use crate::config::Config;

pub use chat::{ChatMessage, ChatRole, DESTINATION_SUGGESTIONS};
pub use hotels::{hotel_catalog, Hotel, HotelSearchParams};

/// Failure of a mock call. Each variant carries the message shown to users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("Failed to search hotels. Please try again.")]
    HotelSearch,
    #[error("Failed to get hotel details. Please try again.")]
    HotelDetails,
    #[error("Failed to process your request. Please try again.")]
    Chat,
    #[error("Failed to get destination suggestions. Please try again.")]
    DestinationSuggestions,
}

#[derive(Debug, Clone)]
pub struct MockApi {
    delay: Duration,
    fail_requests: bool,
}

impl MockApi {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            fail_requests: false,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            delay: config.api_delay(),
            fail_requests: config.simulate_failures,
        }
    }

    pub fn failing(mut self, fail: bool) -> Self {
        self.fail_requests = fail;
        self
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    async fn round_trip(&self, failure: ApiError) -> Result<(), ApiError> {
        tokio::time::sleep(self.delay).await;
        if self.fail_requests {
            tracing::error!(error = %failure, "mock request failed");
            return Err(failure);
        }
        Ok(())
    }

    /// Hotels whose location contains the requested one, ignoring case.
    pub async fn search_hotels(&self, params: &HotelSearchParams) -> Result<Vec<Hotel>, ApiError> {
        tracing::debug!(location = %params.location, guests = params.guests, "searching hotels");
        self.round_trip(ApiError::HotelSearch).await?;
        Ok(hotels::matching(&params.location))
    }

    pub async fn hotel_details(&self, hotel_id: &str) -> Result<Hotel, ApiError> {
        tracing::debug!(hotel_id, "fetching hotel details");
        self.round_trip(ApiError::HotelDetails).await?;
        hotels::by_id(hotel_id).ok_or_else(|| {
            tracing::error!(hotel_id, "hotel not found");
            ApiError::HotelDetails
        })
    }

    pub async fn chat(&self, messages: &[ChatMessage]) -> Result<String, ApiError> {
        tracing::debug!(messages = messages.len(), "chat request");
        self.round_trip(ApiError::Chat).await?;
        Ok(chat::canned_reply(messages).to_string())
    }

    /// The preference text does not influence the fixed suggestion list.
    pub async fn destination_suggestions(&self, preferences: &str) -> Result<String, ApiError> {
        tracing::debug!(preferences, "destination suggestions request");
        self.round_trip(ApiError::DestinationSuggestions).await?;
        Ok(DESTINATION_SUGGESTIONS.join("\n\n"))
    }
}
