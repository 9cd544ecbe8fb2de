//! Console REST client against the server

use fleet_console::{
    config::ClientConfig,
    console::{filter::FilterPredicate, ApiClient},
    error::ClientError,
    models::{
        engine::{EngineDraft, EngineRecord},
        enums::{Availability, EngineType},
        movement::MoveRequest,
        user::Role,
    },
};

use crate::common::{client_config, console_client, console_client_as, spawn_server};

fn draft(id: &str, designation: &str, engine_type: Option<&str>) -> EngineDraft {
    EngineDraft {
        id: Some(id.into()),
        designation: Some(designation.into()),
        family: Some("GRUES MOBILES".into()),
        engine_type: engine_type.map(Into::into),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_client_requires_login() {
    let base_url = spawn_server().await;
    let client = ApiClient::new(&client_config(&base_url)).unwrap();

    assert_eq!(client.me().await, Err(ClientError::Unauthorized));
    assert_eq!(
        client.list_engines(&FilterPredicate::default()).await,
        Err(ClientError::Unauthorized)
    );

    let client = console_client(&base_url).await;
    let me = client.me().await.unwrap();
    assert_eq!(me.login, "admin");
    assert_eq!(me.role, Role::Admin);
}

#[tokio::test]
async fn test_client_bulk_create_partial_success() {
    let base_url = spawn_server().await;
    let client = console_client(&base_url).await;

    let response = client
        .bulk_create(vec![
            draft("MM1ET00901", "GRUE 20T", Some("Levage")),
            draft("MM1ET00803", "Duplicate", Some("Levage")),
            draft("MM1ET00902", "GRUE 30T", None),
        ])
        .await
        .unwrap();

    assert_eq!(response.created_engines.len(), 1);
    assert_eq!(response.created_engines[0].id, "MM1ET00901");
    let rejected: Vec<usize> = response.errors.iter().map(|e| e.index).collect();
    assert_eq!(rejected, vec![1, 2]);
    assert_eq!(client.get_engine("MM1ET00901").await.unwrap().engine_type, EngineType::Levage);
}

#[tokio::test]
async fn test_client_bulk_update_and_delete_report_unknown_ids() {
    let base_url = spawn_server().await;
    let client = console_client(&base_url).await;

    let mut crane = client.get_engine("MM1ET00806").await.unwrap();
    crane.operating_hours = 700.0;
    let ghost = EngineRecord::new("GHOST1", "Ghost", "GRUES MOBILES", EngineType::Levage);
    let response = client.bulk_update(vec![crane, ghost]).await.unwrap();
    assert_eq!(response.updated_engines.len(), 1);
    assert_eq!(response.errors[0].engine_id.as_deref(), Some("GHOST1"));
    assert_eq!(client.get_engine("MM1ET00806").await.unwrap().operating_hours, 700.0);

    let response = client
        .bulk_delete(vec!["MM1ET00806".into(), "GHOST1".into()])
        .await
        .unwrap();
    assert_eq!(response.deleted_engines, vec!["MM1ET00806"]);
    assert_eq!(response.errors.len(), 1);
    assert_eq!(response.errors[0].index, 1);
    assert!(matches!(client.get_engine("MM1ET00806").await, Err(ClientError::NotFound(_))));
}

#[tokio::test]
async fn test_client_create_and_update_errors() {
    let base_url = spawn_server().await;
    let client = console_client(&base_url).await;

    // Rejected locally before any request
    let invalid = EngineRecord::new("lower", "Crane", "GRUES MOBILES", EngineType::Levage);
    assert!(matches!(client.create_engine(&invalid).await, Err(ClientError::Validation(_))));

    let existing = client.get_engine("MM1ET00803").await.unwrap();
    assert!(matches!(client.create_engine(&existing).await, Err(ClientError::Conflict(_))));

    let missing = EngineRecord::new("MM1ET00999", "Crane", "GRUES MOBILES", EngineType::Levage);
    assert!(matches!(client.update_engine(&missing).await, Err(ClientError::NotFound(_))));

    let created = client.create_engine(&missing).await.unwrap();
    assert_eq!(created.status, Availability::Available);
    let mut renamed = created.clone();
    renamed.designation = "GRUE MOBILE 12T".into();
    assert_eq!(client.update_engine(&renamed).await.unwrap().designation, "GRUE MOBILE 12T");
    client.delete_engine("MM1ET00999").await.unwrap();
}

#[tokio::test]
async fn test_client_viewer_writes_are_forbidden() {
    let base_url = spawn_server().await;
    let client = console_client_as(&base_url, "viewer").await;

    let record = EngineRecord::new("MM1ET00950", "Crane", "GRUES MOBILES", EngineType::Levage);
    assert!(matches!(client.create_engine(&record).await, Err(ClientError::Forbidden(_))));
    assert!(client.engine_stats().await.is_ok());
}

#[tokio::test]
async fn test_client_disponibility_moves_and_stats() {
    let base_url = spawn_server().await;
    let client = console_client(&base_url).await;

    let stats = client.engine_stats().await.unwrap();
    assert_eq!((stats.total, stats.left, stats.right), (3, 2, 1));

    let moved = client
        .move_engine(&MoveRequest {
            engine_id: "MM1ET00805".into(),
            to: Availability::Available,
            reason: None,
            estimated_return: None,
        })
        .await
        .unwrap();
    assert_eq!(moved.status, Availability::Available);
    assert!(moved.metadata.reason.is_none());

    let again = client
        .move_engine(&MoveRequest {
            engine_id: "MM1ET00805".into(),
            to: Availability::Available,
            reason: None,
            estimated_return: None,
        })
        .await;
    assert!(matches!(again, Err(ClientError::Conflict(_))));

    let listing = client
        .disponibility(&FilterPredicate::default().with_type(EngineType::Roulants))
        .await
        .unwrap();
    assert_eq!(listing.available.len(), 2);
    assert!(listing.unavailable.is_empty());
    assert_eq!(client.engine_stats().await.unwrap().left_rate, 100);
}

#[tokio::test]
async fn test_unreachable_backend_is_a_network_error() {
    let config = ClientConfig {
        base_url: "http://127.0.0.1:9/api".into(),
        timeout_secs: 1,
        max_in_flight: 1,
    };
    let client = ApiClient::new(&config).unwrap();
    assert!(matches!(client.me().await, Err(ClientError::Network(_))));
}
