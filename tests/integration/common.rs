//! Test server bootstrap

use std::sync::Arc;

use fleet_console::{
    api,
    config::{AppConfig, ClientConfig, SeedUser},
    console::{ApiClient, ReconciliationClient},
    models::{
        engine::EngineRecord,
        enums::{Availability, EngineType},
        user::Role,
    },
    repository::Repository,
    services::Services,
    AppState,
};
use reqwest::Client;
use serde_json::{json, Value};

pub fn sample_engines() -> Vec<EngineRecord> {
    let mut forklift = EngineRecord::new(
        "MM1ET00805",
        "ELEVATEUR THERMIQUE DCOSAN 8T",
        "CHARIOT ELEVATEUR THERMIQUE",
        EngineType::Roulants,
    );
    forklift.status = Availability::Unavailable;
    forklift.metadata.reason = Some("Scheduled Maintenance".into());

    let mut crane = EngineRecord::new("MM1ET00806", "GRUE MOBILE 10T", "GRUES MOBILES", EngineType::Levage);
    crane.metadata.location = Some("Warehouse C".into());

    vec![
        EngineRecord::new(
            "MM1ET00803",
            "ELEVATEUR THERMIQUE DCOSAN 8T",
            "CHARIOT ELEVATEUR THERMIQUE",
            EngineType::Roulants,
        ),
        forklift,
        crane,
    ]
}

/// Start a server on an ephemeral port, returning its API root URL
pub async fn spawn_server() -> String {
    let mut config = AppConfig::default();
    config.seed.users = vec![
        SeedUser {
            login: "admin".into(),
            password: "admin".into(),
            name: "Administrator".into(),
            role: Role::Admin,
        },
        SeedUser {
            login: "viewer".into(),
            password: "viewer".into(),
            name: "Viewer".into(),
            role: Role::Viewer,
        },
    ];

    let repository = Repository::new();
    repository
        .engines_seed(sample_engines())
        .await
        .expect("Failed to seed engines");
    let services = Services::new(repository, config.auth.clone(), &config.seed.users)
        .await
        .expect("Failed to create services");

    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    };

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("No local address");
    tokio::spawn(async move {
        axum::serve(listener, api::router(state))
            .await
            .expect("Server error");
    });

    format!("http://{}/api", addr)
}

pub async fn get_auth_token(client: &Client, base_url: &str, login: &str) -> String {
    let response = client
        .post(format!("{}/auth/login", base_url))
        .json(&json!({ "login": login, "password": login }))
        .send()
        .await
        .expect("Failed to send login request");

    let body: Value = response.json().await.expect("Failed to parse login response");
    body["accessToken"]
        .as_str()
        .expect("No token in response")
        .to_string()
}

pub fn client_config(base_url: &str) -> ClientConfig {
    ClientConfig {
        base_url: base_url.to_string(),
        timeout_secs: 5,
        max_in_flight: 4,
    }
}

/// Console client logged in as `login` (password equals login)
pub async fn console_client_as(base_url: &str, login: &str) -> ApiClient {
    let mut client = ApiClient::new(&client_config(base_url)).expect("Failed to build client");
    client.login(login, login).await.expect("Login failed");
    client
}

/// Console client logged in as admin
pub async fn console_client(base_url: &str) -> ApiClient {
    console_client_as(base_url, "admin").await
}

/// Reconciliation over `client`, bounded as configured
pub fn reconciler(client: &ApiClient, base_url: &str) -> ReconciliationClient<ApiClient> {
    ReconciliationClient::from_config(client.clone(), &client_config(base_url))
}
