//! Batch geocoding: submit a job, then poll until the results are ready.
//!
//! Run with: `GEOAPIFY_API_KEY=your-key cargo run --example batch_geocode`

use std::time::Duration;

use geoapify::{BatchResult, Client};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let api_key = std::env::var("GEOAPIFY_API_KEY")?;
    let client = Client::new(api_key)?;
    let batch = client.batch_geocoding();

    let job = batch
        .submit_forward([
            "1313 Broadway, Tacoma, WA",
            "400 Broad St, Seattle, WA",
            "221B Baker Street, London",
        ])
        .send()
        .await?;
    println!("submitted job {} ({})", job.id, job.status);

    loop {
        tokio::time::sleep(Duration::from_secs(5)).await;

        match batch.forward_result(job.id.as_str()).send().await? {
            BatchResult::Pending { status, .. } => println!("still {status}..."),
            BatchResult::Complete(addresses) => {
                for address in addresses {
                    println!(
                        "{} -> ({}, {})",
                        address.formatted.as_deref().unwrap_or("<no match>"),
                        address.lat,
                        address.lon
                    );
                }
                break;
            }
        }
    }

    Ok(())
}
