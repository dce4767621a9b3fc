//! Manual smoke test for the placekit location service.
//!
//! Run with: cargo run -p placekit-smoke [-- "search query"]
//!
//! Refreshes the current location through the real platform backends, then
//! optionally searches for the place given on the command line.

use placekit_service::LocationService;

#[tokio::main]
async fn main() {
    println!("=== Placekit Service Smoke Test ===\n");

    let service = match LocationService::system("placekit-smoke/0.1") {
        Ok(service) => service,
        Err(e) => {
            println!("✗ Failed to set up geocoding client: {e}");
            return;
        }
    };

    println!("Refreshing current location...");
    service.refresh_current_location().await;
    print_state(&service);

    if let Some(query) = std::env::args().nth(1) {
        println!("\nSearching for '{query}'...");
        service.set_search_query(query);
        service.search_place().await;
        print_state(&service);
    }
}

fn print_state(service: &LocationService) {
    let state = service.state();
    match state.current_coordinates {
        Some(coordinates) => {
            println!("✓ Coordinates: {:.6}°, {:.6}°", coordinates.latitude, coordinates.longitude);
        }
        None => println!("✗ No coordinates resolved"),
    }
    match state.current_address {
        Some(address) => println!("  Address:   {address}"),
        None => println!("  Address:   (none)"),
    }
    if let Some(region) = service.map_region() {
        println!(
            "  Region:    ±{:.3}° lat, ±{:.3}° lon",
            region.latitude_delta / 2.0,
            region.longitude_delta / 2.0
        );
    }
}
