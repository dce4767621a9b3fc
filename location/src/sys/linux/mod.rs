//! Linux positioning implementation using the GeoClue2 D-Bus service.
//!
//! A one-shot client is created per request: the accuracy level and the
//! time/distance thresholds from [`PositionOptions`] are written to the
//! client before `Start`, then the first `LocationUpdated` signal (or an
//! already-present fix) is read and the client is stopped again.

use std::time::Duration;

use futures::StreamExt;
use futures::future::Either;
use futures_timer::Delay;
use zbus::Connection;
use zbus::zvariant::OwnedObjectPath;

use crate::{Accuracy, Coordinates, Position, PositionError, PositionOptions};

const DESKTOP_ID: &str = "placekit";

/// Upper bound on waiting for the first fix after `Start`.
const FIX_TIMEOUT: Duration = Duration::from_secs(30);

// GClueAccuracyLevel constants from geoclue/gclue-enums.h.
const ACCURACY_COUNTRY: u32 = 1;
const ACCURACY_CITY: u32 = 4;
const ACCURACY_NEIGHBORHOOD: u32 = 5;
const ACCURACY_STREET: u32 = 6;
const ACCURACY_EXACT: u32 = 8;

#[zbus::proxy(
    interface = "org.freedesktop.GeoClue2.Manager",
    default_service = "org.freedesktop.GeoClue2",
    default_path = "/org/freedesktop/GeoClue2/Manager"
)]
trait Manager {
    fn get_client(&self) -> zbus::Result<OwnedObjectPath>;
}

#[zbus::proxy(
    interface = "org.freedesktop.GeoClue2.Client",
    default_service = "org.freedesktop.GeoClue2"
)]
trait Client {
    fn start(&self) -> zbus::Result<()>;

    fn stop(&self) -> zbus::Result<()>;

    #[zbus(property)]
    fn location(&self) -> zbus::Result<OwnedObjectPath>;

    #[zbus(property)]
    fn set_desktop_id(&self, id: &str) -> zbus::Result<()>;

    #[zbus(property)]
    fn set_requested_accuracy_level(&self, level: u32) -> zbus::Result<()>;

    #[zbus(property)]
    fn set_time_threshold(&self, seconds: u32) -> zbus::Result<()>;

    #[zbus(property)]
    fn set_distance_threshold(&self, meters: u32) -> zbus::Result<()>;

    #[zbus(signal)]
    fn location_updated(
        &self,
        old_location: OwnedObjectPath,
        new_location: OwnedObjectPath,
    ) -> zbus::Result<()>;
}

#[zbus::proxy(
    interface = "org.freedesktop.GeoClue2.Location",
    default_service = "org.freedesktop.GeoClue2"
)]
trait GeoLocation {
    #[zbus(property)]
    fn latitude(&self) -> zbus::Result<f64>;

    #[zbus(property)]
    fn longitude(&self) -> zbus::Result<f64>;

    #[zbus(property)]
    fn accuracy(&self) -> zbus::Result<f64>;
}

const fn accuracy_level(accuracy: Accuracy) -> u32 {
    match accuracy {
        Accuracy::Lowest => ACCURACY_COUNTRY,
        Accuracy::Low => ACCURACY_CITY,
        Accuracy::Balanced => ACCURACY_NEIGHBORHOOD,
        Accuracy::High => ACCURACY_STREET,
        Accuracy::Highest => ACCURACY_EXACT,
    }
}

fn backend_err(context: &str, err: impl std::fmt::Display) -> PositionError {
    PositionError::Backend(format!("{context}: {err}"))
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(crate) async fn current_position(
    options: PositionOptions,
) -> Result<Position, PositionError> {
    let connection = Connection::system()
        .await
        .map_err(|e| backend_err("D-Bus connection failed", e))?;

    let manager = ManagerProxy::new(&connection)
        .await
        .map_err(|e| backend_err("GeoClue2 not available", e))?;
    let client_path = manager
        .get_client()
        .await
        .map_err(|e| backend_err("GeoClue2 refused a client", e))?;

    let client = ClientProxy::builder(&connection)
        .path(client_path)
        .map_err(|e| backend_err("invalid client path", e))?
        .build()
        .await
        .map_err(|e| backend_err("client proxy failed", e))?;

    client
        .set_desktop_id(DESKTOP_ID)
        .await
        .map_err(|e| backend_err("failed to set desktop id", e))?;
    client
        .set_requested_accuracy_level(accuracy_level(options.accuracy))
        .await
        .map_err(|e| backend_err("failed to set accuracy level", e))?;
    client
        .set_time_threshold(options.time_interval.as_secs().min(u64::from(u32::MAX)) as u32)
        .await
        .map_err(|e| backend_err("failed to set time threshold", e))?;
    client
        .set_distance_threshold(options.distance_interval_m.max(0.0) as u32)
        .await
        .map_err(|e| backend_err("failed to set distance threshold", e))?;

    let mut updates = client
        .receive_location_updated()
        .await
        .map_err(|e| backend_err("failed to subscribe to updates", e))?;

    client.start().await.map_err(|e| {
        // GeoClue's agent rejects unauthorized desktop ids with AccessDenied.
        let message = e.to_string();
        if message.contains("AccessDenied") {
            PositionError::PermissionDenied
        } else {
            backend_err("failed to start GeoClue client", message)
        }
    })?;

    // A fix may already be present; "/" means none yet.
    let mut location_path = client
        .location()
        .await
        .ok()
        .filter(|path| path.as_str() != "/");

    if location_path.is_none() {
        let next_update = std::pin::pin!(updates.next());
        let deadline = Delay::new(FIX_TIMEOUT);
        match futures::future::select(next_update, deadline).await {
            Either::Left((Some(signal), _)) => {
                let args = signal
                    .args()
                    .map_err(|e| backend_err("malformed LocationUpdated signal", e))?;
                location_path = Some(args.new_location().to_owned());
            }
            Either::Left((None, _)) => {
                let _ = client.stop().await;
                return Err(PositionError::Unavailable);
            }
            Either::Right(_) => {
                let _ = client.stop().await;
                return Err(PositionError::Timeout);
            }
        }
    }

    let location_path = location_path.ok_or(PositionError::Unavailable)?;
    let location = GeoLocationProxy::builder(&connection)
        .path(location_path)
        .map_err(|e| backend_err("invalid location path", e))?
        .build()
        .await
        .map_err(|e| backend_err("location proxy failed", e))?;

    let latitude = location
        .latitude()
        .await
        .map_err(|e| backend_err("failed to read latitude", e))?;
    let longitude = location
        .longitude()
        .await
        .map_err(|e| backend_err("failed to read longitude", e))?;
    let horizontal_accuracy = location.accuracy().await.ok();

    let _ = client.stop().await;

    Ok(Position {
        coordinates: Coordinates {
            latitude,
            longitude,
        },
        horizontal_accuracy,
        timestamp_ms: std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0),
    })
}
