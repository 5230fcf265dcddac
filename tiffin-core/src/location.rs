use crate::geo::GeoPoint;
use async_trait::async_trait;
use std::time::Duration;

/// Terminal outcomes of a location request. Denial and timeout are
/// recoverable: the storefront keeps working without a coordinate and the
/// caller may re-request later.
#[derive(Debug, Clone, PartialEq)]
pub enum LocationOutcome {
    Resolved(GeoPoint),
    Denied,
    TimedOut,
}

impl LocationOutcome {
    pub fn point(&self) -> Option<GeoPoint> {
        match self {
            LocationOutcome::Resolved(point) => Some(*point),
            _ => None,
        }
    }
}

/// Source of the customer's coordinate (browser geolocation bridge, saved
/// address lookup, ...). May suspend indefinitely while the user decides on
/// the permission prompt; always run it through [`acquire_location`].
#[async_trait]
pub trait LocationProvider: Send + Sync {
    async fn current_location(&self) -> Result<GeoPoint, LocationDenied>;
}

/// The provider reported that no coordinate will ever arrive (permission
/// denied or the device has no positioning support).
#[derive(Debug, thiserror::Error)]
#[error("location access denied: {reason}")]
pub struct LocationDenied {
    pub reason: String,
}

/// Resolve a coordinate with an explicit timeout. Dropping the returned
/// future cancels the request; no partial state is kept.
pub async fn acquire_location(
    provider: &dyn LocationProvider,
    timeout: Duration,
) -> LocationOutcome {
    match tokio::time::timeout(timeout, provider.current_location()).await {
        Ok(Ok(point)) => LocationOutcome::Resolved(point),
        Ok(Err(denied)) => {
            tracing::info!("Location request denied: {}", denied.reason);
            LocationOutcome::Denied
        }
        Err(_) => {
            tracing::info!("Location request timed out after {:?}", timeout);
            LocationOutcome::TimedOut
        }
    }
}

/// Provider that always yields a fixed coordinate.
pub struct StaticLocationProvider {
    pub point: GeoPoint,
}

#[async_trait]
impl LocationProvider for StaticLocationProvider {
    async fn current_location(&self) -> Result<GeoPoint, LocationDenied> {
        Ok(self.point)
    }
}
