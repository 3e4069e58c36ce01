use async_trait::async_trait;
use std::{fmt::Debug, sync::Arc};

use crate::{
    Config,
    error::{LookupError, Result},
    model::Coordinates,
};

/// Host capability that reports where the user currently is.
#[async_trait]
pub trait PositionSource: Send + Sync + Debug {
    async fn current_position(&self) -> Result<Coordinates>;
}

/// Position known up front, from config or the command line.
#[derive(Debug, Clone, Copy)]
pub struct FixedPosition(pub Coordinates);

#[async_trait]
impl PositionSource for FixedPosition {
    async fn current_position(&self) -> Result<Coordinates> {
        Ok(self.0)
    }
}

/// Host without any positioning support.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unsupported;

#[async_trait]
impl PositionSource for Unsupported {
    async fn current_position(&self) -> Result<Coordinates> {
        Err(LookupError::CapabilityUnavailable("geolocation is not supported".to_string()))
    }
}

/// The user refused to share a position.
#[derive(Debug, Clone, Copy, Default)]
pub struct Denied;

#[async_trait]
impl PositionSource for Denied {
    async fn current_position(&self) -> Result<Coordinates> {
        Err(LookupError::CapabilityUnavailable("permission denied".to_string()))
    }
}

/// Per-run choices that take precedence over the config file.
#[derive(Debug, Clone, Copy, Default)]
pub struct PositionOverride {
    pub coordinates: Option<Coordinates>,
    pub disabled: bool,
}

/// Pick the position source: overrides first, then config.
pub fn position_source_from_config(
    config: &Config,
    overrides: PositionOverride,
) -> Arc<dyn PositionSource> {
    if overrides.disabled {
        return Arc::new(Denied);
    }
    if let Some(coords) = overrides.coordinates {
        return Arc::new(FixedPosition(coords));
    }
    if !config.geolocation {
        return Arc::new(Denied);
    }

    match config.coordinates() {
        Some(coords) => Arc::new(FixedPosition(coords)),
        None => Arc::new(Unsupported),
    }
}
