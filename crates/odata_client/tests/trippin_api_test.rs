//! Smoke tests against the public TripPin reference service.
//!
//! Run with `cargo test -p odata_client --features api`.

use odata_client::ODataClient;
use std::env;

fn trippin() -> ODataClient {
    dotenvy::dotenv().ok();
    let base = env::var("TRIPPIN_URL")
        .unwrap_or_else(|_| "https://services.odata.org/V4/TripPinService".to_string());
    ODataClient::new(base)
}

#[tokio::test]
#[cfg_attr(not(feature = "api"), ignore)]
async fn trippin_list_people() {
    let people = trippin()
        .from("People")
        .select(["FirstName", "LastName"])
        .take(3)
        .get()
        .await
        .expect("People query succeeded");

    assert!(!people.is_empty());
    assert!(people.len() <= 3);
    assert!(people[0].get("FirstName").is_some());
}

#[tokio::test]
#[cfg_attr(not(feature = "api"), ignore)]
async fn trippin_first_by_key() {
    let person = trippin()
        .from("People")
        .where_key("russellwhyte")
        .first()
        .await
        .expect("keyed query succeeded")
        .expect("russellwhyte exists");

    assert_eq!(person["FirstName"], "Russell");
}

#[tokio::test]
#[cfg_attr(not(feature = "api"), ignore)]
async fn trippin_filtered_count() {
    let count = trippin()
        .from("People")
        .where_op("FirstName", "contains", "s")
        .expect("valid operator")
        .count()
        .await
        .expect("count query succeeded");

    assert!(count > 0);
}
