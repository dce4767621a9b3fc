use placekit_alert::Alert;

/// Terminal failures of a single service operation.
///
/// Every variant maps 1:1 to a fixed user-facing alert; nothing is retried
/// and nothing is aggregated. The one silent case, a reverse geocode that
/// finds no address, is not an error at all.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ServiceError {
    /// Foreground location permission was denied.
    #[error("location permission denied")]
    PermissionDenied,
    /// The current location could not be resolved.
    #[error("current location unavailable: {0}")]
    LocationUnavailable(String),
    /// The search query was empty or whitespace.
    #[error("search query is empty")]
    EmptySearchQuery,
    /// Forward geocoding found no candidates for the query.
    #[error("no results for search query")]
    NoSearchResults,
    /// The geocoding provider failed.
    #[error("search provider failure: {0}")]
    SearchProviderFailure(String),
}

impl ServiceError {
    /// The fixed alert reported for this failure.
    #[must_use]
    pub fn alert(&self) -> Alert {
        match self {
            Self::PermissionDenied => Alert::new(
                "Permission Denied",
                "Please enable location services to use this app.",
            ),
            Self::LocationUnavailable(_) => Alert::new(
                "Error",
                "Failed to get your current location. Please try again.",
            ),
            Self::EmptySearchQuery => Alert::new("Error", "Please enter an address to search."),
            Self::NoSearchResults => Alert::new("Error", "No results found for this address."),
            Self::SearchProviderFailure(_) => Alert::new(
                "Error",
                "Failed to search for the address. Please try again.",
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_failure_has_a_single_acknowledgement_alert() {
        let errors = [
            ServiceError::PermissionDenied,
            ServiceError::LocationUnavailable("gps off".into()),
            ServiceError::EmptySearchQuery,
            ServiceError::NoSearchResults,
            ServiceError::SearchProviderFailure("timeout".into()),
        ];
        for error in errors {
            let alert = error.alert();
            assert!(!alert.title.is_empty());
            assert!(!alert.message.is_empty());
            assert_eq!(alert.button, "OK");
        }
    }

    #[test]
    fn denied_permission_alert_names_location_services() {
        let alert = ServiceError::PermissionDenied.alert();
        assert_eq!(alert.title, "Permission Denied");
        assert_eq!(
            alert.message,
            "Please enable location services to use this app."
        );
    }
}
