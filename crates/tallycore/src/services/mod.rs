//! Stateless collaborators reachable from the menu

pub mod rates;
pub mod tips;

pub use rates::{ExchangeRateApi, RateProvider, RateQuote};
pub use tips::random_tip;
