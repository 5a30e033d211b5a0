#![doc(test(attr(deny(warnings))))]

//! Trip Desk models a travel-agency back office: a custom package builder,
//! preset itineraries, a bookings desk, an analytics report and a scripted
//! assistant over an in-process mock travel API, plus the CLI that drives them.

pub mod analytics;
pub mod api;
pub mod assistant;
pub mod bookings;
pub mod cli;
pub mod config;
pub mod errors;
pub mod packages;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Trip Desk tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
        super::init();
    }
}
