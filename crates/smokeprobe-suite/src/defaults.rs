use serde_json::json;

use crate::types::{BodyExpectation, Check};

pub const DEFAULT_BASE_URL: &str = "http://localhost:5045/api";

pub const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// Listing submitted by the `create-property` check.
pub fn sample_property() -> serde_json::Value {
    json!({
        "address": "123 Test Street",
        "city": "Test City",
        "state": "TS",
        "zipCode": "12345",
        "price": 250000,
        "bedrooms": 3,
        "bathrooms": 2,
        "squareFeet": 1500,
        "propertyType": "House",
        "status": "Available",
        "realtorId": 1,
        "description": "Test property"
    })
}

/// Checks run against the real-estate listings API when no suite file is
/// given.
///
/// Creation accepts both 200 and 201: the service has answered with either
/// depending on version, and both count as success here.
pub fn real_estate_suite() -> Vec<Check> {
    vec![
        Check::get("list-properties", "/properties")
            .expecting(BodyExpectation::JsonArray)
            .with_label("Properties"),
        Check::get("list-users", "/users")
            .expecting(BodyExpectation::JsonArray)
            .with_label("Users"),
        Check::get("list-realtors", "/realtors")
            .expecting(BodyExpectation::JsonArray)
            .with_label("Realtors"),
        Check::post("create-property", "/properties", sample_property())
            .with_expected_status([200, 201]),
        Check::get("swagger-ui", "/swagger/index.html").on_host(),
    ]
}
