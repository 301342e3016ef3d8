// ============================================================================
// TEST UTILS - transport con guion y fixtures para los tests
// ============================================================================

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

use async_trait::async_trait;
use futures::channel::oneshot;
use serde_json::{json, Value};

use crate::config::ApiConfig;
use crate::models::user::UserProfile;
use crate::services::api_client::ApiClient;
use crate::services::error::ApiError;
use crate::services::transport::{HttpRequest, HttpResponse, Method, Transport};
use crate::utils::constants::TOKEN_STORAGE_KEY;
use crate::utils::storage::{TokenStorage, TokenVault};

pub const TEST_BASE_URL: &str = "http://api.test";

type Reply = Result<HttpResponse, ApiError>;

enum Scripted {
    Ready(Reply),
    /// Se resuelve cuando el test envía por el sender asociado
    Gated(oneshot::Receiver<Reply>),
}

#[derive(Default)]
struct MockState {
    routes: HashMap<(Method, String), VecDeque<Scripted>>,
    requests: Vec<HttpRequest>,
}

/// Transport que responde desde colas FIFO por ruta. La ruta es la URL sin
/// `TEST_BASE_URL`, query incluida. Los clones comparten el guion.
#[derive(Clone, Default)]
pub struct MockTransport {
    state: Rc<RefCell<MockState>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, method: Method, path: &str, scripted: Scripted) {
        self.state
            .borrow_mut()
            .routes
            .entry((method, path.to_string()))
            .or_default()
            .push_back(scripted);
    }

    pub fn respond_json(&self, method: Method, path: &str, status: u16, body: Value) {
        self.respond_raw(method, path, status, &body.to_string());
    }

    pub fn respond_raw(&self, method: Method, path: &str, status: u16, body: &str) {
        self.push(
            method,
            path,
            Scripted::Ready(Ok(HttpResponse {
                status,
                body: body.to_string(),
            })),
        );
    }

    pub fn fail(&self, method: Method, path: &str, error: ApiError) {
        self.push(method, path, Scripted::Ready(Err(error)));
    }

    /// El request queda pendiente hasta que se use el sender devuelto
    pub fn respond_gated(&self, method: Method, path: &str) -> oneshot::Sender<Reply> {
        let (tx, rx) = oneshot::channel();
        self.push(method, path, Scripted::Gated(rx));
        tx
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.state.borrow().requests.clone()
    }

    pub fn request_count(&self, method: Method, path: &str) -> usize {
        let url = format!("{}{}", TEST_BASE_URL, path);
        self.state
            .borrow()
            .requests
            .iter()
            .filter(|request| request.method == method && request.url == url)
            .count()
    }
}

#[async_trait(?Send)]
impl Transport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let path = request
            .url
            .strip_prefix(TEST_BASE_URL)
            .unwrap_or(&request.url)
            .to_string();
        let method = request.method;

        let scripted = {
            let mut state = self.state.borrow_mut();
            state.requests.push(request);
            state
                .routes
                .get_mut(&(method, path.clone()))
                .and_then(VecDeque::pop_front)
        };

        match scripted {
            Some(Scripted::Ready(reply)) => reply,
            Some(Scripted::Gated(rx)) => rx
                .await
                .unwrap_or_else(|_| Err(ApiError::Network("gate dropped".into()))),
            None => Err(ApiError::Network(format!(
                "no scripted response for {} {}",
                method.as_str(),
                path
            ))),
        }
    }
}

pub fn test_config() -> ApiConfig {
    ApiConfig::default().with_base_url(TEST_BASE_URL)
}

pub fn api_client_with(transport: &MockTransport, storage: Option<Rc<dyn TokenStorage>>) -> ApiClient {
    let vault = TokenVault::new(storage, TOKEN_STORAGE_KEY);
    ApiClient::new(&test_config(), Rc::new(transport.clone()), vault)
}

pub fn user_json(id: i64, email: &str, role: &str) -> Value {
    json!({
        "id": id,
        "first_name": format!("User{}", id),
        "last_name": "Tester",
        "email": email,
        "phone": "+57 300 000 0000",
        "role": role,
        "is_verified": true,
        "latitude": 4.65,
        "longitude": -74.05,
        "is_active": true,
        "created_at": "2025-01-15T10:00:00",
    })
}

pub fn profile(id: i64, email: &str) -> UserProfile {
    serde_json::from_value(user_json(id, email, "driver")).expect("fixture user")
}

pub fn assistance_json(id: i64, status: &str) -> Value {
    json!({
        "id": id,
        "requester_id": 5,
        "breakdown_id": id * 10,
        "service_type": "towing",
        "status": status,
        "created_at": format!("2025-02-{:02}T08:00:00", (id % 28) + 1),
    })
}

pub fn token_json(token: &str) -> Value {
    json!({"access_token": token, "token_type": "bearer"})
}
