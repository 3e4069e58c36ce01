//! Core library for the `country` lookup widget.
//!
//! This crate defines:
//! - Configuration (service endpoints, fixed location)
//! - Host position sources and the geolocation flow (`Locator`)
//! - Abstraction over the reverse-geocoding and country-info services
//! - Name lookup and field normalization (`Resolver`)
//! - The widget itself: search input, display slot, alerts
//!
//! It is used by `country-cli`, but can also be embedded in other front-ends.

pub mod config;
pub mod error;
pub mod locator;
pub mod model;
pub mod position;
pub mod provider;
pub mod resolver;
pub mod widget;

pub use config::{Config, Endpoints, LocationConfig};
pub use error::LookupError;
pub use locator::Locator;
pub use model::{Coordinates, CountryMatch, CountryRecord, Displayed, Invocation};
pub use position::{PositionOverride, PositionSource, position_source_from_config};
pub use provider::{CountryInfoService, ReverseGeocoder, Services, services_from_config};
pub use resolver::Resolver;
pub use widget::{AlertSink, CountryWidget, FetchOutcome};
