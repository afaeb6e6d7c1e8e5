#![allow(dead_code)]

use crate::utils::{canonical_body, object_values_path, rand_env_key};
use airship::{configure, flag, Client, ErrorKind, TREATMENT_OFF, TREATMENT_ON};
use serde::Serialize;

mod utils;

#[derive(Serialize)]
struct Entity<'a> {
    id: &'a str,
}

// The default-client slot is process-global, so everything runs in a single
// test (this file is its own test binary).
#[tokio::test]
async fn configure_routes_package_level_flags() {
    let entity = Entity { id: "u1" };

    // Before configure() every query fails open.
    let unconfigured = flag("checkout");
    assert_eq!(unconfigured.get_treatment(&entity).await, TREATMENT_OFF);
    assert!(!unconfigured.is_eligible(&entity).await);
    assert!(!unconfigured.is_enabled(&entity).await);
    let details = unconfigured.get_details(&entity).await;
    assert_eq!(details.error.unwrap().kind, ErrorKind::UnconfiguredClient);

    let mut server = mockito::Server::new_async().await;
    let env_key = rand_env_key();
    let m = server
        .mock("POST", object_values_path(&env_key).as_str())
        .match_body(mockito::Matcher::Exact(
            r#"{"flag":"checkout","entity":{"id":"u1"}}"#.to_owned(),
        ))
        .with_status(200)
        .with_body(canonical_body())
        .expect(2)
        .create_async()
        .await;

    let client = Client::new(&env_key, server.url().as_str()).unwrap();
    let direct = client.flag("checkout").get_treatment(&entity).await;
    configure(client);
    let via_default = flag("checkout").get_treatment(&entity).await;

    assert_eq!(direct, TREATMENT_ON);
    assert_eq!(via_default, TREATMENT_ON);
    m.assert_async().await;

    // A handle minted before configure() captured the empty slot and stays unbound.
    assert_eq!(unconfigured.get_treatment(&entity).await, TREATMENT_OFF);
}
