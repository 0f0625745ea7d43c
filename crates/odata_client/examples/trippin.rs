//! Query the TripPin reference service and print the results.
//!
//! ```sh
//! cargo run -p odata_client --example trippin
//! ```

use odata_client::{ODataClient, ODataResult};
use tracing::info;

#[tokio::main]
async fn main() -> ODataResult<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "odata_client=debug".into()),
        )
        .init();

    let client = ODataClient::new("https://services.odata.org/V4/TripPinService");

    let request = client
        .from("People")
        .select(["FirstName", "LastName"])
        .where_op("FirstName", "contains", "s")?
        .order_by("LastName")
        .take(5)
        .to_request()?;
    info!(request = %request, "Compiled query");

    let people = client
        .from("People")
        .select(["FirstName", "LastName"])
        .where_op("FirstName", "contains", "s")?
        .order_by("LastName")
        .take(5)
        .get()
        .await?;

    for person in &people {
        println!(
            "{} {}",
            person["FirstName"].as_str().unwrap_or_default(),
            person["LastName"].as_str().unwrap_or_default()
        );
    }

    Ok(())
}
