//! SDK tests against a real engine served on an ephemeral port.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use locatr_client::{ClientConfig, ClientError, LocationClient, LocationForm, LocationsPage};
use locatr_engine::api::router;
use locatr_engine::infrastructure::clock::SystemClock;
use locatr_engine::infrastructure::config::EngineConfig;
use locatr_engine::infrastructure::locations::SqliteLocationRepo;
use locatr_engine::App;
use locatr_shared::{ErrorCode, LocationPayload, LocationQuery};
use tokio::net::TcpListener;

const KEY: &str = "sdk-test-key";

/// Start an engine with an empty in-memory store; returns its `/v1` base URL.
async fn spawn_engine() -> String {
    let config = EngineConfig {
        server_host: "127.0.0.1".into(),
        server_port: 0,
        database_url: "sqlite::memory:".into(),
        database_max_connections: 1,
        api_key: KEY.into(),
        app_debug: false,
        public_url: String::new(),
        seed_demo_data: false,
        cors_allowed_origin: None,
    };
    let repo = SqliteLocationRepo::in_memory(Arc::new(SystemClock::new()))
        .await
        .unwrap();
    let app = Arc::new(App::new(config, Arc::new(repo)));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router(app)).await.unwrap();
    });

    format!("http://{addr}/v1")
}

fn client(base_url: &str, key: &str) -> LocationClient {
    LocationClient::new(ClientConfig::new(base_url, key)).unwrap()
}

fn form(code: &str, name: &str) -> LocationForm {
    LocationForm {
        code: code.into(),
        name: name.into(),
        image: format!("https://example.com/{}.jpg", code.to_lowercase()),
    }
}

#[tokio::test]
async fn health_and_auth_checks() {
    let base = spawn_engine().await;

    assert!(client(&base, KEY).health_check().await);
    assert!(client(&base, "wrong").health_check().await);

    assert!(client(&base, KEY).test_auth().await);
    assert!(!client(&base, "wrong").test_auth().await);
}

#[tokio::test]
async fn unreachable_server_is_a_network_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let sdk = client(&format!("http://{addr}/v1"), KEY);

    assert!(!sdk.health_check().await);
    let err = sdk.list(&LocationQuery::default()).await.unwrap_err();
    assert!(matches!(err, ClientError::Network(_)));
    assert_eq!(
        err.display_message(),
        "Connection error. Check your network connection."
    );
}

#[tokio::test]
async fn wrong_key_is_unauthorized() {
    let base = spawn_engine().await;

    let err = client(&base, "wrong")
        .list(&LocationQuery::default())
        .await
        .unwrap_err();

    assert_eq!(
        err,
        ClientError::Unauthorized("Invalid or missing API key".to_string())
    );
}

#[tokio::test]
async fn create_read_update_delete() {
    let base = spawn_engine().await;
    let sdk = client(&base, KEY);

    let created = sdk
        .create(&LocationPayload::new("EIFFEL", "<b>Torre Eiffel</b>"))
        .await
        .unwrap();
    assert_eq!(created.code, "EIFFEL");
    assert_eq!(created.name, "Torre Eiffel");
    assert_eq!(created.image, None);

    let fetched = sdk.get(created.id).await.unwrap();
    assert_eq!(fetched, created);

    let updated = sdk
        .update(
            created.id,
            &LocationPayload::default()
                .with_name("Eiffel Tower")
                .with_image("https://example.com/eiffel.png"),
        )
        .await
        .unwrap();
    assert_eq!(updated.code, "EIFFEL");
    assert_eq!(updated.name, "Eiffel Tower");
    assert_eq!(updated.image.as_deref(), Some("https://example.com/eiffel.png"));

    sdk.delete(created.id).await.unwrap();

    let err = sdk.get(created.id).await.unwrap_err();
    assert_eq!(err, ClientError::NotFound("Location not found".to_string()));
}

#[tokio::test]
async fn server_validation_errors_are_classified() {
    let base = spawn_engine().await;
    let sdk = client(&base, KEY);

    sdk.create(&LocationPayload::new("PETRA", "Petra")).await.unwrap();

    let err = sdk
        .create(&LocationPayload::new("PETRA", "Another Petra"))
        .await
        .unwrap_err();
    let ClientError::Validation { code, fields, .. } = &err else {
        panic!("expected validation error, got {err:?}");
    };
    assert_eq!(*code, ErrorCode::DuplicateCode);
    assert_eq!(fields["code"], vec!["The code has already been taken.".to_string()]);

    let err = sdk
        .create(&LocationPayload::default().with_name("No code"))
        .await
        .unwrap_err();
    assert!(err.is_validation());
    assert!(err.field_errors().contains_key("code"));
}

#[tokio::test]
async fn list_filters_and_paginates() {
    let base = spawn_engine().await;
    let sdk = client(&base, KEY);

    for i in 0..12 {
        sdk.create(&LocationPayload::new(format!("LOC{i:02}"), format!("Location {i}")))
            .await
            .unwrap();
    }
    sdk.create(&LocationPayload::new("MACHU", "Machu Picchu"))
        .await
        .unwrap();

    let page = sdk
        .list(&LocationQuery::default().with_per_page(5).with_page(3))
        .await
        .unwrap();
    assert_eq!(page.meta.total, 13);
    assert_eq!(page.meta.total_pages, 3);
    assert_eq!(page.meta.current_page, 3);
    assert_eq!(page.data.len(), 3);
    assert!(page.links.next.is_none());
    assert!(page.links.prev.is_some());

    let filtered = sdk
        .list(&LocationQuery::default().with_name("picchu"))
        .await
        .unwrap();
    assert_eq!(filtered.meta.total, 1);
    assert_eq!(filtered.data[0].code, "MACHU");

    let err = sdk
        .list(&LocationQuery::default().with_per_page(101))
        .await
        .unwrap_err();
    assert!(err.is_validation());
}

#[tokio::test]
async fn page_state_drives_the_management_flow() {
    let base = spawn_engine().await;
    let mut page = LocationsPage::new(client(&base, KEY));

    assert!(page.refresh().await);
    assert!(page.is_empty());
    assert_eq!(page.meta().unwrap().total, 0);

    // Invalid form stays in the dialog with per-field errors.
    page.open_create();
    assert!(!page.save(&form("x", "")).await);
    assert!(page.is_dialog_open());
    assert!(page.form_errors().contains_key("code"));
    assert!(page.form_errors().contains_key("name"));

    // Valid create closes the dialog and reloads the list.
    let mut draft = page.open_create();
    draft.code = "PETRA".into();
    draft.name = "Petra".into();
    draft.image = "https://example.com/petra.jpg".into();
    assert!(page.save(&draft).await);
    assert!(!page.is_dialog_open());
    assert_eq!(page.locations().len(), 1);
    assert!(page.error().is_none());

    // Duplicate code is reported by the server and keeps the dialog open.
    page.open_create();
    assert!(!page.save(&form("PETRA", "Petra again")).await);
    assert!(page.is_dialog_open());
    assert_eq!(
        page.error(),
        Some("Validation failed: The code has already been taken.")
    );
    page.close_dialog();
    page.clear_error();

    // Edit keeps the code and changes the name.
    let existing = page.locations()[0].clone();
    let mut edit = page.open_edit(existing.clone());
    assert_eq!(page.editing().map(|l| l.id), Some(existing.id));
    edit.name = "Petra, Jordan".into();
    assert!(page.save(&edit).await);
    assert_eq!(page.locations()[0].name, "Petra, Jordan");

    // Delete reloads an empty list.
    assert!(page.delete(existing.id).await);
    assert!(page.is_empty());
}

#[tokio::test]
async fn page_state_filters_reset_to_first_page() {
    let base = spawn_engine().await;
    let sdk = client(&base, KEY);
    for i in 0..4 {
        sdk.create(&LocationPayload::new(format!("AB{i}"), format!("Place {i}")))
            .await
            .unwrap();
    }

    let mut page = LocationsPage::new(sdk);
    assert!(page.set_per_page(2).await);
    assert!(page.next_page().await);
    assert_eq!(page.page(), 2);
    assert!(!page.next_page().await);

    assert!(page.set_code_filter("ab").await);
    assert_eq!(page.page(), 1);
    assert_eq!(page.meta().unwrap().total, 4);

    assert!(page.set_name_filter("Place 3").await);
    assert_eq!(page.locations().len(), 1);
    assert_eq!(page.locations()[0].code, "AB3");

    assert!(page.clear_filters().await);
    assert_eq!(page.meta().unwrap().total, 4);
    assert!(!page.prev_page().await);
}
