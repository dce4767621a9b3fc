//! Nominatim HTTP backend.
//!
//! Talks to a Nominatim instance (the public openstreetmap.org one by
//! default) over its `/search` and `/reverse` endpoints. Nominatim requires
//! an identifying User-Agent, so construction takes one.

use std::time::Duration;

use futures::future::BoxFuture;
use isahc::Request;
use isahc::prelude::*;
use serde::Deserialize;

use crate::{Address, Coordinates, GeocodeError, Geocoder};

const DEFAULT_BASE_URL: &str = "https://nominatim.openstreetmap.org";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);
const MAX_RESULTS: usize = 5;

/// Geocoder backed by a Nominatim instance.
#[derive(Debug, Clone)]
pub struct Nominatim {
    client: isahc::HttpClient,
    base_url: String,
    user_agent: String,
}

impl Nominatim {
    /// Create a backend against the public openstreetmap.org instance.
    ///
    /// # Errors
    /// Returns a [`GeocodeError`] if the HTTP client cannot be initialized.
    pub fn new(user_agent: impl Into<String>) -> Result<Self, GeocodeError> {
        let client = isahc::HttpClient::new().map_err(|e| GeocodeError::Request(e.to_string()))?;
        Ok(Self {
            client,
            base_url: DEFAULT_BASE_URL.to_owned(),
            user_agent: user_agent.into(),
        })
    }

    /// Point the backend at a different (e.g. self-hosted) instance.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn get(&self, url: String) -> Result<String, GeocodeError> {
        let request = Request::get(&url)
            .timeout(REQUEST_TIMEOUT)
            .header("User-Agent", &self.user_agent)
            .body(())
            .map_err(|e| GeocodeError::Request(e.to_string()))?;

        let mut response = self
            .client
            .send_async(request)
            .await
            .map_err(|e| GeocodeError::Request(e.to_string()))?;

        if !response.status().is_success() {
            return Err(GeocodeError::Provider(response.status().as_u16()));
        }

        response
            .text()
            .await
            .map_err(|e| GeocodeError::Request(e.to_string()))
    }

    async fn forward_geocode(&self, query: String) -> Result<Vec<Coordinates>, GeocodeError> {
        let url = format!(
            "{}/search?q={}&format=jsonv2&limit={MAX_RESULTS}",
            self.base_url,
            percent_encode(&query)
        );
        let body = self.get(url).await?;
        parse_search_body(&body)
    }

    async fn reverse_geocode(
        &self,
        coordinates: Coordinates,
    ) -> Result<Option<Address>, GeocodeError> {
        let url = format!(
            "{}/reverse?lat={}&lon={}&format=jsonv2",
            self.base_url, coordinates.latitude, coordinates.longitude
        );
        let body = self.get(url).await?;
        parse_reverse_body(&body)
    }
}

impl Geocoder for Nominatim {
    fn forward(&self, query: &str) -> BoxFuture<'_, Result<Vec<Coordinates>, GeocodeError>> {
        Box::pin(self.forward_geocode(query.to_owned()))
    }

    fn reverse(
        &self,
        coordinates: Coordinates,
    ) -> BoxFuture<'_, Result<Option<Address>, GeocodeError>> {
        Box::pin(self.reverse_geocode(coordinates))
    }
}

#[derive(Deserialize)]
struct SearchHit {
    lat: String,
    lon: String,
}

#[derive(Deserialize)]
struct ReversePayload {
    error: Option<String>,
    address: Option<WireAddress>,
}

#[derive(Deserialize)]
struct WireAddress {
    house_number: Option<String>,
    road: Option<String>,
    city: Option<String>,
    town: Option<String>,
    village: Option<String>,
    state: Option<String>,
    postcode: Option<String>,
    country: Option<String>,
}

fn parse_search_body(body: &str) -> Result<Vec<Coordinates>, GeocodeError> {
    let hits: Vec<SearchHit> =
        serde_json::from_str(body).map_err(|e| GeocodeError::Malformed(e.to_string()))?;

    hits.into_iter()
        .take(MAX_RESULTS)
        .map(|hit| {
            let latitude = hit
                .lat
                .parse::<f64>()
                .map_err(|e| GeocodeError::Malformed(format!("invalid lat: {e}")))?;
            let longitude = hit
                .lon
                .parse::<f64>()
                .map_err(|e| GeocodeError::Malformed(format!("invalid lon: {e}")))?;
            Ok(Coordinates {
                latitude,
                longitude,
            })
        })
        .collect()
}

fn parse_reverse_body(body: &str) -> Result<Option<Address>, GeocodeError> {
    let payload: ReversePayload =
        serde_json::from_str(body).map_err(|e| GeocodeError::Malformed(e.to_string()))?;

    // Nominatim reports "nothing here" as an error field, not an HTTP error.
    if payload.error.is_some() {
        return Ok(None);
    }
    let Some(wire) = payload.address else {
        return Ok(None);
    };

    let street = match (wire.house_number, wire.road) {
        (Some(number), Some(road)) => format!("{number} {road}"),
        (None, Some(road)) => road,
        (Some(number), None) => number,
        (None, None) => String::new(),
    };
    let city = wire.city.or(wire.town).or(wire.village).unwrap_or_default();

    Ok(Some(Address {
        street,
        city,
        region: wire.state.unwrap_or_default(),
        postal_code: wire.postcode.unwrap_or_default(),
        country: wire.country.unwrap_or_default(),
    }))
}

/// Percent-encode a string for use in a URL query parameter.
fn percent_encode(s: &str) -> String {
    use std::fmt::Write as _;

    let mut out = String::with_capacity(s.len() * 2);
    for byte in s.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char);
            }
            b' ' => out.push('+'),
            _ => {
                let _ = write!(out, "%{byte:02X}");
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_search_hits() {
        let body = r#"[
            {"lat": "40.7128", "lon": "-74.0060", "display_name": "New York"},
            {"lat": "40.6", "lon": "-74.1", "display_name": "Somewhere else"}
        ]"#;
        let hits = parse_search_body(body).unwrap();
        assert_eq!(hits.len(), 2);
        assert!((hits[0].latitude - 40.7128).abs() < 1e-9);
        assert!((hits[0].longitude - -74.0060).abs() < 1e-9);
    }

    #[test]
    fn empty_search_body_yields_no_candidates() {
        assert!(parse_search_body("[]").unwrap().is_empty());
    }

    #[test]
    fn non_numeric_lat_is_malformed() {
        let body = r#"[{"lat": "north", "lon": "-74.0"}]"#;
        assert!(matches!(
            parse_search_body(body),
            Err(GeocodeError::Malformed(_))
        ));
    }

    #[test]
    fn parses_reverse_address() {
        let body = r#"{
            "display_name": "1600 Pennsylvania Avenue",
            "address": {
                "house_number": "1600",
                "road": "Pennsylvania Avenue",
                "city": "Washington",
                "state": "District of Columbia",
                "postcode": "20500",
                "country": "United States"
            }
        }"#;
        let address = parse_reverse_body(body).unwrap().unwrap();
        assert_eq!(address.street, "1600 Pennsylvania Avenue");
        assert_eq!(address.city, "Washington");
        assert_eq!(address.region, "District of Columbia");
        assert_eq!(address.postal_code, "20500");
        assert_eq!(address.country, "United States");
    }

    #[test]
    fn town_and_village_fall_back_to_city_field() {
        let body = r#"{"address": {"town": "Greenfield", "country": "Ireland"}}"#;
        let address = parse_reverse_body(body).unwrap().unwrap();
        assert_eq!(address.city, "Greenfield");
        assert_eq!(address.street, "");
    }

    #[test]
    fn reverse_error_payload_means_no_address() {
        let body = r#"{"error": "Unable to geocode"}"#;
        assert_eq!(parse_reverse_body(body).unwrap(), None);
    }

    #[test]
    fn reverse_without_address_means_no_address() {
        let body = r#"{"display_name": "middle of the ocean"}"#;
        assert_eq!(parse_reverse_body(body).unwrap(), None);
    }

    #[test]
    fn percent_encodes_query_text() {
        assert_eq!(percent_encode("New York"), "New+York");
        assert_eq!(percent_encode("Köln"), "K%C3%B6ln");
        assert_eq!(percent_encode("a/b"), "a%2Fb");
    }
}
