use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, put};
use axum::{Json, Router};
use serde_json::{json, Value};

use tradedesk_auth::SessionContext;
use tradedesk_client::{endpoints, ApiClient, ApiConfig, ReportService, ResourceService};
use tradedesk_core::{Draft, RecordId};
use tradedesk_parties::{Client, ClientDraft};
use tradedesk_products::{Product, ProductDraft};
use tradedesk_purchasing::{PurchaseOrder, PurchaseOrderDraft};
use tradedesk_views::ledger::{LEDGER_FAILED, LEDGER_INVALID, SELECT_FIRST};
use tradedesk_views::{
    LedgerController, LedgerView, NoticeKind, ResourceTable, TableController,
};

#[derive(Default)]
struct Backend {
    orders: Vec<Value>,
    clients: Vec<Value>,
    posted: Vec<Value>,
    list_calls: usize,
}

type Shared = Arc<Mutex<Backend>>;

struct TestServer {
    base_url: String,
    backend: Shared,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        let backend = Shared::default();
        {
            let mut b = backend.lock().unwrap();
            b.orders = vec![
                json!({"_id": "po1", "supplier": "Rehan Steel", "product": "Coil", "quantity": 2, "price": 100, "total": 1, "orderDate": "2024-03-01"}),
                json!({"_id": "po2", "supplier": "Ali Cement", "product": "Cement", "quantity": "10", "price": "900", "orderDate": "2024-03-05"}),
            ];
            b.clients = vec![json!({"_id": "c1", "name": "Ali Traders", "phone": "0300"})];
        }
        let app = app(backend.clone());
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
            backend,
            handle,
        }
    }

    fn client(&self) -> ApiClient {
        ApiClient::new(ApiConfig::single_origin(&self.base_url), SessionContext::in_memory()).unwrap()
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn app(backend: Shared) -> Router {
    Router::new()
        .route(
            "/api/purchaseOrders",
            get(|State(b): State<Shared>| async move {
                let mut b = b.lock().unwrap();
                b.list_calls += 1;
                Json(Value::Array(b.orders.clone()))
            })
            .post(|State(b): State<Shared>, Json(body): Json<Value>| async move {
                let mut b = b.lock().unwrap();
                b.posted.push(body.clone());
                let mut stored = body;
                stored["_id"] = json!("po-new");
                b.orders.insert(0, stored.clone());
                (StatusCode::CREATED, Json(stored))
            }),
        )
        .route(
            "/api/purchaseOrders/:id",
            put(|Path(id): Path<String>, Json(body): Json<Value>| async move {
                let mut stored = body;
                stored["_id"] = json!(id);
                Json(json!({"message": "Updated", "data": stored}))
            })
            .delete(|| async { Json(json!({"message": "Deleted"})) }),
        )
        .route(
            "/api/clients",
            get(|State(b): State<Shared>| async move {
                Json(Value::Array(b.lock().unwrap().clients.clone()))
            })
            .post(|State(b): State<Shared>, Json(body): Json<Value>| async move {
                let mut b = b.lock().unwrap();
                let mut stored = body;
                stored["_id"] = json!("c2");
                b.clients.push(stored);
                Json(json!({"message": "Client created"}))
            }),
        )
        .route(
            "/api/products",
            get(|| async { Json(json!([])) }).post(|| async {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({"message": "Database unavailable"})),
                )
            }),
        )
        .route(
            "/api/report/name/:name",
            get(|Path(name): Path<String>| async move {
                match name.as_str() {
                    "Broken" => (StatusCode::OK, Json(json!({"name": "Broken"}))),
                    "Missing" => (StatusCode::NOT_FOUND, Json(json!({"error": "not found"}))),
                    _ => (
                        StatusCode::OK,
                        Json(json!({
                            "name": name,
                            "entries": [
                                {"date": "2024-01-05", "type": "Purchase", "amount": 1000},
                                {"date": "2024-01-12", "type": "Payment", "amount": 400},
                                {"date": "2024-02-01", "type": "Purchase", "amount": 250}
                            ]
                        })),
                    ),
                }
            }),
        )
        .with_state(backend)
}

fn rid(s: &str) -> RecordId {
    RecordId::parse(s).unwrap()
}

fn orders(server: &TestServer) -> TableController<PurchaseOrder> {
    TableController::new(
        ResourceService::new(server.client(), endpoints::PURCHASE_ORDERS),
        ResourceTable::default(),
    )
}

#[tokio::test]
async fn refresh_loads_and_totals_are_recomputed() {
    let server = TestServer::spawn().await;
    let mut ctl = orders(&server);
    ctl.refresh().await.unwrap();

    let rows = ctl.table().page_rows();
    assert_eq!(rows.len(), 2);
    // The stale server-side total is ignored.
    assert_eq!(rows[0].total(), 200.0);
    assert_eq!(rows[1].total(), 9000.0);
}

#[tokio::test]
async fn create_posts_numbers_prepends_and_resets_the_draft() {
    let server = TestServer::spawn().await;
    let mut ctl = orders(&server);
    ctl.refresh().await.unwrap();

    let mut draft = PurchaseOrderDraft::default();
    draft
        .apply([
            ("supplier", "Rehan Steel"),
            ("product", "Angle Iron"),
            ("quantity", "3"),
            ("price", "150"),
            ("orderDate", "2024-04-01"),
        ])
        .unwrap();
    assert_eq!(draft.total(), Some(450.0));

    ctl.submit(&mut draft).await.unwrap();

    let posted = server.backend.lock().unwrap().posted[0].clone();
    assert_eq!(posted["quantity"], json!(3.0));
    assert_eq!(posted["price"], json!(150.0));
    assert_eq!(posted["total"], json!(450.0));

    let first = ctl.table().records()[0].clone();
    assert_eq!(first.id, Some(rid("po-new")));
    assert_eq!(first.total(), 450.0);
    assert_eq!(ctl.table().records().len(), 3);
    assert_eq!(draft, PurchaseOrderDraft::default());
    assert_eq!(ctl.table().notice().map(|n| n.kind), Some(NoticeKind::Success));
}

#[tokio::test]
async fn edit_then_submit_replaces_the_row() {
    let server = TestServer::spawn().await;
    let mut ctl = orders(&server);
    ctl.refresh().await.unwrap();

    let mut draft: PurchaseOrderDraft = ctl.edit(&rid("po1")).unwrap();
    assert_eq!(draft.total(), Some(200.0));
    draft.set("quantity", "3").unwrap();
    draft.set("price", "150").unwrap();
    assert_eq!(draft.total(), Some(450.0));

    ctl.submit(&mut draft).await.unwrap();

    let updated = ctl.table().find(&rid("po1")).unwrap();
    assert_eq!(updated.quantity, 3.0);
    assert_eq!(updated.total(), 450.0);
    assert_eq!(ctl.table().records().len(), 2);
    assert_eq!(ctl.table().editing(), None);
}

#[tokio::test]
async fn delete_removes_from_list_and_selection() {
    let server = TestServer::spawn().await;
    let mut ctl = orders(&server);
    ctl.refresh().await.unwrap();
    ctl.table_mut().toggle_selected(&rid("po2"));

    let declined = ctl.delete(&rid("po2"), &|_: &str| false).await.unwrap();
    assert!(!declined);
    assert!(ctl.table().find(&rid("po2")).is_some());

    let deleted = ctl.delete(&rid("po2"), &|_: &str| true).await.unwrap();
    assert!(deleted);
    assert!(ctl.table().find(&rid("po2")).is_none());
    assert!(!ctl.table().selection().contains(&rid("po2")));
}

#[tokio::test]
async fn stale_refresh_results_are_discarded() {
    let server = TestServer::spawn().await;
    let mut ctl = orders(&server);

    let (older, first) = ctl.begin_refresh();
    let (newer, second) = ctl.begin_refresh();

    let newer_result = second.await;
    assert!(ctl.apply_refresh(newer, newer_result).unwrap());
    assert_eq!(ctl.table().records().len(), 2);

    let older_result = first.await.map(|mut rows| {
        rows.truncate(1);
        rows
    });
    assert!(!ctl.apply_refresh(older, older_result).unwrap());
    assert_eq!(ctl.table().records().len(), 2);
    assert_eq!(server.backend.lock().unwrap().list_calls, 2);
}

#[tokio::test]
async fn non_record_response_triggers_refetch() {
    let server = TestServer::spawn().await;
    let mut ctl: TableController<Client> = TableController::new(
        ResourceService::new(server.client(), endpoints::CLIENTS),
        ResourceTable::default(),
    );
    ctl.refresh().await.unwrap();

    let mut draft = ClientDraft::default();
    draft
        .apply([("name", "Chaudhry Bros"), ("phone", "0322")])
        .unwrap();
    ctl.submit(&mut draft).await.unwrap();

    let names: Vec<&str> = ctl.table().records().iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Ali Traders", "Chaudhry Bros"]);
    assert_eq!(draft, ClientDraft::default());
}

#[tokio::test]
async fn failed_create_keeps_the_draft_and_shows_server_message() {
    let server = TestServer::spawn().await;
    let mut ctl: TableController<Product> = TableController::new(
        ResourceService::new(server.client(), endpoints::PRODUCTS),
        ResourceTable::default(),
    );

    let mut draft = ProductDraft::default();
    draft.apply([("name", "Cement"), ("quantity", "5")]).unwrap();
    let before = draft.clone();

    assert!(ctl.submit(&mut draft).await.is_err());
    assert_eq!(draft, before);
    let notice = ctl.table().notice().unwrap();
    assert!(notice.is_error());
    assert_eq!(notice.message, "Database unavailable");
}

#[tokio::test]
async fn missing_required_field_never_reaches_the_server() {
    let server = TestServer::spawn().await;
    let mut ctl = orders(&server);

    let mut draft = PurchaseOrderDraft::default();
    draft.set("supplier", "Rehan Steel").unwrap();
    assert!(ctl.submit(&mut draft).await.is_err());
    assert_eq!(
        ctl.table().notice().map(|n| n.message.as_str()),
        Some("Please fill all required fields.")
    );
    assert!(server.backend.lock().unwrap().posted.is_empty());
}

#[tokio::test]
async fn ledger_selection_and_errors() {
    let server = TestServer::spawn().await;
    let mut ledger = LedgerController::new(ReportService::new(server.client()), LedgerView::default());

    assert!(ledger.report().is_none());
    assert_eq!(ledger.view().notice().map(|n| n.message.as_str()), Some(SELECT_FIRST));

    ledger.select("Ali Traders").await.unwrap();
    let summary = ledger.view().summary();
    assert_eq!(
        (summary.total_purchase, summary.total_payment, summary.balance),
        (1250.0, 400.0, 850.0)
    );
    assert_eq!(ledger.report().unwrap().title, "Ledger Report - Ali Traders");

    assert!(ledger.select("Broken").await.is_err());
    assert_eq!(ledger.view().notice().map(|n| n.message.as_str()), Some(LEDGER_INVALID));
    assert!(ledger.view().ledger().is_none());

    assert!(ledger.select("Missing").await.is_err());
    assert_eq!(ledger.view().notice().map(|n| n.message.as_str()), Some(LEDGER_FAILED));
}
