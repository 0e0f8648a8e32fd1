use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use serde_json::{json, Value};

/// In-memory GraphQL endpoint answering `GetProjects` and `CreateProject`.
#[derive(Default)]
pub struct StubApi {
    pub projects: Vec<Value>,
    pub requests: Vec<Value>,
    pub query_error: Option<String>,
    pub mutation_error: Option<String>,
    pub status: Option<u16>,
}

impl StubApi {
    pub fn with_projects(names: &[&str]) -> Self {
        let projects = names
            .iter()
            .enumerate()
            .map(|(i, name)| {
                json!({
                    "id": (i + 1).to_string(),
                    "name": name,
                    "description": format!("{} description", name),
                    "startDate": "2024-01-01",
                    "endDate": "2024-12-31",
                })
            })
            .collect();
        Self {
            projects,
            ..Self::default()
        }
    }

    pub fn operations(&self) -> Vec<String> {
        self.requests
            .iter()
            .map(|r| r["operationName"].as_str().unwrap_or_default().to_string())
            .collect()
    }
}

pub type SharedStub = Arc<Mutex<StubApi>>;

async fn graphql(State(stub): State<SharedStub>, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    let mut stub = stub.lock().unwrap();
    stub.requests.push(body.clone());

    if let Some(status) = stub.status {
        return (
            StatusCode::from_u16(status).unwrap(),
            Json(json!({ "errors": [{ "message": "unavailable" }] })),
        );
    }

    let query_error = stub.query_error.clone();
    let mutation_error = stub.mutation_error.clone();

    let response = match body["operationName"].as_str() {
        Some("GetProjects") => match query_error {
            Some(message) => json!({ "data": null, "errors": [{ "message": message }] }),
            None => json!({ "data": { "projects": stub.projects } }),
        },
        Some("CreateProject") => match mutation_error {
            Some(message) => json!({ "data": null, "errors": [{ "message": message }] }),
            None => {
                let vars = &body["variables"];
                let created = json!({
                    "id": (stub.projects.len() + 1).to_string(),
                    "name": vars["name"],
                    "description": vars["description"],
                    "startDate": vars["startDate"],
                    "endDate": vars["endDate"],
                });
                stub.projects.push(created.clone());
                json!({ "data": { "createProject": created } })
            }
        },
        _ => json!({ "errors": [{ "message": "unknown operation" }] }),
    };

    (StatusCode::OK, Json(response))
}

/// Serve `stub` on an ephemeral port and return the endpoint URL.
pub async fn serve(stub: StubApi) -> (String, SharedStub) {
    let shared = Arc::new(Mutex::new(stub));
    let app = Router::new()
        .route("/graphql", post(graphql))
        .with_state(Arc::clone(&shared));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}/graphql", addr), shared)
}
