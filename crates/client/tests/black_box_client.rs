use std::sync::{Arc, Mutex};

use axum::extract::{Multipart, Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde_json::{json, Value};

use tradedesk_auth::{MemoryTokenStore, PasswordChange, Role, SessionContext};
use tradedesk_client::{
    endpoints, ApiClient, ApiConfig, ApiError, Attachment, AuthService, PortalService,
    ReportService, ResourceService,
};
use tradedesk_core::{Draft, RecordId};
use tradedesk_parties::{Client, ClientDraft};
use tradedesk_products::Product;
use tradedesk_portal::Order;

#[derive(Default)]
struct Seen {
    bodies: Vec<Value>,
    deleted: Vec<String>,
    auth: Vec<Option<String>>,
    uploads: Vec<(String, String, usize)>,
}

type Shared = Arc<Mutex<Seen>>;

struct TestServer {
    base_url: String,
    seen: Shared,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        let seen = Shared::default();
        let app = fake_backend(seen.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url,
            seen,
            handle,
        }
    }

    fn client(&self, session: SessionContext) -> ApiClient {
        ApiClient::new(ApiConfig::single_origin(&self.base_url), session).unwrap()
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn bearer(headers: &HeaderMap) -> Option<String> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

fn fake_backend(seen: Shared) -> Router {
    Router::new()
        .route(
            "/api/clients",
            get(|| async {
                Json(json!([
                    {"_id": "c1", "name": "Ali Traders", "phone": "0300", "type": "Wholesale"},
                    {"_id": "c2", "name": "Bilal & Sons", "phone": "0311", "email": null}
                ]))
            })
            .post(|State(seen): State<Shared>, Json(body): Json<Value>| async move {
                seen.lock().unwrap().bodies.push(body.clone());
                let mut stored = body;
                stored["_id"] = json!("c9");
                (StatusCode::CREATED, Json(stored))
            }),
        )
        .route(
            "/api/clients/:id",
            put(|| async { Json(json!({"message": "Client updated"})) }).delete(
                |State(seen): State<Shared>, Path(id): Path<String>| async move {
                    seen.lock().unwrap().deleted.push(id);
                    StatusCode::NO_CONTENT
                },
            ),
        )
        .route(
            "/api/products",
            post(|| async {
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({"message": "SKU already exists"})),
                )
            }),
        )
        .route(
            "/api/orders",
            get(|State(seen): State<Shared>, headers: HeaderMap| async move {
                seen.lock().unwrap().auth.push(bearer(&headers));
                Json(json!([
                    {"_id": "o1", "orderNumber": "PO-1", "vendor": "Rehan Steel", "items": ["coil"], "status": "Pending", "date": "2024-05-01"}
                ]))
            }),
        )
        .route(
            "/api/auth/login",
            post(|Json(body): Json<Value>| async move {
                if body["password"] == "secret1" {
                    (StatusCode::OK, Json(json!({"token": "tok-xyz"})))
                } else {
                    (
                        StatusCode::UNAUTHORIZED,
                        Json(json!({"message": "Invalid credentials"})),
                    )
                }
            }),
        )
        .route(
            "/api/auth/me",
            get(|headers: HeaderMap| async move {
                match bearer(&headers).as_deref() {
                    Some("Bearer admin-token") => (StatusCode::OK, Json(json!({"role": "admin"}))),
                    _ => (StatusCode::UNAUTHORIZED, Json(json!({"message": "Unauthorized"}))),
                }
            }),
        )
        .route(
            "/api/profile/password",
            put(|State(seen): State<Shared>, Json(body): Json<Value>| async move {
                seen.lock().unwrap().bodies.push(body);
                Json(json!({"message": "Password changed"}))
            }),
        )
        .route(
            "/api/report",
            get(|| async { Json(json!([{"name": "Ali Traders"}, {"name": "Bilal & Sons"}])) }),
        )
        .route(
            "/api/report/name/:name",
            get(|Path(name): Path<String>| async move {
                Json(json!({
                    "name": name,
                    "entries": [
                        {"date": "2024-01-05", "type": "Purchase", "amount": 1000},
                        {"date": "2024-01-12", "type": "Payment", "amount": "400"}
                    ]
                }))
            }),
        )
        .route(
            "/api/asn/upload",
            post(|State(seen): State<Shared>, mut form: Multipart| async move {
                while let Some(field) = form.next_field().await.unwrap() {
                    let name = field.name().unwrap_or_default().to_string();
                    let file_name = field.file_name().unwrap_or_default().to_string();
                    let len = field.bytes().await.unwrap().len();
                    seen.lock().unwrap().uploads.push((name, file_name, len));
                }
                Json(json!({"_id": "f1", "filename": "171-asn.pdf", "originalname": "asn.pdf"}))
            }),
        )
        .with_state(seen)
}

#[tokio::test]
async fn lists_clients_with_lenient_fields() {
    let server = TestServer::spawn().await;
    let clients: ResourceService<Client> =
        ResourceService::new(server.client(SessionContext::in_memory()), endpoints::CLIENTS);

    let list = clients.list(&[]).await.unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(list[0].client_type.as_str(), "Wholesale");
    assert_eq!(list[1].email, "");
}

#[tokio::test]
async fn create_returns_stored_record_and_update_without_echo_returns_none() {
    let server = TestServer::spawn().await;
    let clients: ResourceService<Client> =
        ResourceService::new(server.client(SessionContext::in_memory()), endpoints::CLIENTS);

    let mut draft = ClientDraft::default();
    draft
        .apply([("name", "Chaudhry Bros"), ("phone", "0322-1234567")])
        .unwrap();
    let record = draft.to_record().unwrap();

    let created = clients.create(&record).await.unwrap().unwrap();
    assert_eq!(created.id.as_ref().map(RecordId::as_str), Some("c9"));
    assert_eq!(server.seen.lock().unwrap().bodies[0]["name"], "Chaudhry Bros");

    let id = RecordId::parse("c9").unwrap();
    assert_eq!(clients.update(&id, &created).await.unwrap(), None);

    clients.delete(&id).await.unwrap();
    assert_eq!(server.seen.lock().unwrap().deleted, vec!["c9"]);
}

#[tokio::test]
async fn invalid_record_is_rejected_before_sending() {
    let server = TestServer::spawn().await;
    let clients: ResourceService<Client> =
        ResourceService::new(server.client(SessionContext::in_memory()), endpoints::CLIENTS);

    let record: Client =
        serde_json::from_value(json!({"name": "No Phone", "phone": "  "})).unwrap();

    let err = clients.create(&record).await.unwrap_err();
    assert!(err.is_validation());
    assert!(server.seen.lock().unwrap().bodies.is_empty());
}

#[tokio::test]
async fn server_message_surfaces_on_failure() {
    let server = TestServer::spawn().await;
    let products: ResourceService<Product> =
        ResourceService::new(server.client(SessionContext::in_memory()), endpoints::PRODUCTS);
    let product: Product = serde_json::from_value(json!({
        "name": "Cement", "sku": "CEM-1", "quantity": 5, "purchasePrice": 900, "sellingPrice": 1100
    }))
    .unwrap();

    let err = products.create(&product).await.unwrap_err();
    assert_eq!(err.status(), Some(400));
    assert_eq!(err.user_message("Failed to add product."), "SKU already exists");
}

#[tokio::test]
async fn portal_collections_send_the_session_token() {
    let server = TestServer::spawn().await;

    let anonymous: ResourceService<Order> =
        ResourceService::new(server.client(SessionContext::in_memory()), endpoints::ORDERS);
    assert!(matches!(anonymous.list(&[]).await, Err(ApiError::Unauthenticated)));

    let session = SessionContext::new(MemoryTokenStore::with_token("vendor-token"));
    let orders: ResourceService<Order> = ResourceService::new(server.client(session), endpoints::ORDERS);
    let list = orders.list(&[]).await.unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(
        server.seen.lock().unwrap().auth,
        vec![Some("Bearer vendor-token".to_string())]
    );
}

#[tokio::test]
async fn login_stores_token_and_failure_keeps_session_empty() {
    let server = TestServer::spawn().await;
    let session = SessionContext::in_memory();
    let auth = AuthService::new(server.client(session.clone()));

    let err = auth.login("vendor@rehan.pk", "wrong").await.unwrap_err();
    assert_eq!(
        err.user_message("Login failed. Please check your credentials."),
        "Invalid credentials"
    );
    assert!(!session.is_authenticated());

    auth.login("vendor@rehan.pk", "secret1").await.unwrap();
    assert_eq!(session.token().as_deref(), Some("tok-xyz"));

    auth.logout().unwrap();
    assert!(!session.is_authenticated());
}

#[tokio::test]
async fn role_falls_back_to_vendor_when_identity_fails() {
    let server = TestServer::spawn().await;

    let admin = AuthService::new(
        server.client(SessionContext::new(MemoryTokenStore::with_token("admin-token"))),
    );
    assert_eq!(admin.role().await, Role::Admin);

    let stale = AuthService::new(
        server.client(SessionContext::new(MemoryTokenStore::with_token("expired"))),
    );
    assert_eq!(stale.role().await, Role::Vendor);

    let anonymous = AuthService::new(server.client(SessionContext::in_memory()));
    assert_eq!(anonymous.role().await, Role::Vendor);
}

#[tokio::test]
async fn password_change_is_validated_then_sent() {
    let server = TestServer::spawn().await;
    let auth = AuthService::new(
        server.client(SessionContext::new(MemoryTokenStore::with_token("vendor-token"))),
    );

    let mismatch = PasswordChange {
        old_password: "old-pass".into(),
        new_password: "secret1".into(),
        confirm_password: "secret2".into(),
    };
    let err = auth.change_password(&mismatch).await.unwrap_err();
    assert_eq!(err.user_message("x"), "New passwords do not match!");
    assert!(server.seen.lock().unwrap().bodies.is_empty());

    let ok = PasswordChange {
        confirm_password: "secret1".into(),
        ..mismatch
    };
    auth.change_password(&ok).await.unwrap();
    let body = server.seen.lock().unwrap().bodies[0].clone();
    assert_eq!(body, json!({"oldPassword": "old-pass", "newPassword": "secret1"}));
}

#[tokio::test]
async fn report_names_and_ledger_by_encoded_name() {
    let server = TestServer::spawn().await;
    let reports = ReportService::new(server.client(SessionContext::in_memory()));

    let names = reports.names().await.unwrap();
    assert_eq!(names, vec!["Ali Traders", "Bilal & Sons"]);

    let ledger = reports.ledger("Bilal & Sons").await.unwrap();
    assert_eq!(ledger.name, "Bilal & Sons");
    assert_eq!(ledger.entries.len(), 2);
    assert_eq!(ledger.entries[1].amount, 400.0);
}

#[tokio::test]
async fn asn_upload_uses_the_asn_file_field() {
    let server = TestServer::spawn().await;
    let portal = PortalService::new(server.client(SessionContext::in_memory()));

    let stored = portal
        .upload_asn(Attachment::new("asn.pdf", b"%PDF-1.4 test".to_vec()))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.filename, "171-asn.pdf");

    let seen = server.seen.lock().unwrap();
    let uploads = &seen.uploads;
    assert_eq!(uploads.len(), 1);
    assert_eq!(uploads[0].0, "asnFile");
    assert_eq!(uploads[0].1, "asn.pdf");
    assert_eq!(uploads[0].2, 13);
}
