//! Forward geocoding example.
//!
//! Run with: `GEOAPIFY_API_KEY=your-key cargo run --example geocode`

use geoapify::Client;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let api_key = std::env::var("GEOAPIFY_API_KEY")?;
    let client = Client::new(api_key)?;

    let response = client
        .geocoding()
        .search("1313 Broadway, Tacoma, WA")
        .limit(3)
        .send()
        .await?;

    for address in &response.results {
        println!(
            "{} ({}, {})",
            address.formatted.as_deref().unwrap_or("<unnamed>"),
            address.lat,
            address.lon
        );
    }

    Ok(())
}
