//! Geocoding with a retry policy for rate limits and server errors.
//!
//! Run with: `GEOAPIFY_API_KEY=your-key cargo run --example custom_retry`

use std::time::Duration;

use geoapify::{Client, Error, RetryConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let api_key = std::env::var("GEOAPIFY_API_KEY")?;

    // Retry 429/5xx responses up to 4 times with exponential backoff
    // starting at 250ms and capped at 10s. Retry-After headers from the
    // API take precedence over the computed backoff.
    let client = Client::builder(api_key)
        .retry(RetryConfig::new(
            4,
            Duration::from_millis(250),
            Duration::from_secs(10),
        ))
        .build()?;

    match client.geocoding().reverse(47.2529, -122.4443).send().await {
        Ok(response) => {
            for address in &response.results {
                println!("{}", address.formatted.as_deref().unwrap_or("<unnamed>"));
            }
        }
        Err(Error::Api(api_error)) => {
            eprintln!(
                "API rejected the call even after retries: {} {}",
                api_error.status, api_error.message
            );
        }
        Err(other) => eprintln!("request failed: {other}"),
    }

    Ok(())
}
