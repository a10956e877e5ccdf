use std::collections::HashMap;
use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use defi_canvas::api::error::ApiError;
use defi_canvas::api::handlers;
use defi_canvas::api::state::AppState;
use defi_canvas::api::types::{AddressRequest, ConnectRequest, QuoteRequest, SimulateRequest};
use defi_canvas::example::{example_graph, example_workflow};
use defi_canvas::jupiter::JupiterClient;
use defi_canvas::model::{GraphDocument, Node, WorkflowPatch};
use defi_canvas::sim::market::{SOL_MINT, USDC_DEVNET_MINT};
use defi_canvas::sim::{PricingConfig, SimulatorConfig};
use defi_canvas::store::MemoryStore;

const ADDRESS: &str = "9WzDXwBbmkg8ZTbNMqUxvQRAyrZzDsGYdLVL9zYtAWWM";

// ── Helpers ─────────────────────────────────────────────────────────

fn state() -> AppState {
    let mut sim = SimulatorConfig::default().instant();
    sim.failure_rate = 0.0;
    AppState::with_configs(
        Arc::new(MemoryStore::new()),
        JupiterClient::new("http://127.0.0.1:9"),
        PricingConfig::default(),
        sim,
    )
}

fn example_doc() -> GraphDocument {
    GraphDocument::from(&example_graph().unwrap())
}

// ── Workflows ───────────────────────────────────────────────────────

#[tokio::test]
async fn workflow_crud() {
    let st = state();

    let (status, Json(saved)) = handlers::workflows::create(State(st.clone()), Json(example_workflow().unwrap()))
        .await
        .unwrap();
    assert_eq!(status, StatusCode::CREATED);

    let Json(all) = handlers::workflows::list(State(st.clone())).await.unwrap();
    assert_eq!(all.len(), 1);

    let patch = WorkflowPatch {
        name: Some("Renamed".into()),
        ..Default::default()
    };
    let Json(updated) = handlers::workflows::update(State(st.clone()), Path(saved.id), Json(patch))
        .await
        .unwrap();
    assert_eq!(updated.name, "Renamed");

    let status = handlers::workflows::delete(State(st.clone()), Path(saved.id)).await.unwrap();
    assert_eq!(status, StatusCode::NO_CONTENT);

    let err = handlers::workflows::get_one(State(st), Path(saved.id)).await.unwrap_err();
    assert!(matches!(err, ApiError::NotFound(_)));
    assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn create_without_name_is_bad_request() {
    let mut wf = example_workflow().unwrap();
    wf.name = String::new();
    let err = handlers::workflows::create(State(state()), Json(wf)).await.unwrap_err();
    assert!(matches!(err, ApiError::BadRequest(_)));
}

// ── Validate + preview ──────────────────────────────────────────────

#[tokio::test]
async fn validate_returns_report() {
    let Json(report) = handlers::validate::validate_workflow(State(state()), Json(example_doc()))
        .await
        .unwrap();
    assert!(report.valid);

    let doc = GraphDocument {
        nodes: vec![Node::start("s")],
        edges: vec![],
    };
    let Json(report) = handlers::validate::validate_workflow(State(state()), Json(doc)).await.unwrap();
    assert!(!report.valid);
    assert_eq!(report.errors.len(), 1);
}

#[tokio::test]
async fn preview_reports_empty_walks() {
    let Json(resp) = handlers::preview::preview(State(state()), Json(example_doc())).await.unwrap();
    assert_eq!(resp.steps.len(), 2);
    assert!(resp.message.is_none());

    let doc = GraphDocument {
        nodes: vec![Node::start("s")],
        edges: vec![],
    };
    let Json(resp) = handlers::preview::preview(State(state()), Json(doc)).await.unwrap();
    assert!(resp.steps.is_empty());
    assert_eq!(resp.message.as_deref(), Some("No executable actions found"));

    let err = handlers::preview::preview(State(state()), Json(GraphDocument::default()))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::BadRequest(_)));
}

#[tokio::test]
async fn templates_list_the_library() {
    let Json(templates) = handlers::templates::list().await;
    assert_eq!(templates.len(), 14);
    let json = serde_json::to_value(&templates).unwrap();
    assert_eq!(json[0]["id"], "startEndNode-start");
    let swap = json
        .as_array()
        .unwrap()
        .iter()
        .find(|t| t["id"] == "actionNode-defiSwap")
        .unwrap();
    assert_eq!(swap["actionType"], "defiSwap");
    assert!(!swap["params"].as_array().unwrap().is_empty());
}

// ── Market ──────────────────────────────────────────────────────────

#[tokio::test]
async fn quote_resolves_symbols() {
    let req = QuoteRequest {
        input_mint: "SOL".into(),
        output_mint: "usdc".into(),
        amount: 1_000_000_000,
        slippage_bps: 50,
        seed: Some(1),
    };
    let Json(q) = handlers::quote::quote(State(state()), Json(req)).await.unwrap();
    assert_eq!(q.input_mint, SOL_MINT);
    assert_eq!(q.output_mint, USDC_DEVNET_MINT);
    assert!(q.out_amount > 0);
}

#[tokio::test]
async fn quote_rejects_zero_amount() {
    let req = QuoteRequest {
        input_mint: "SOL".into(),
        output_mint: "USDC".into(),
        amount: 0,
        slippage_bps: 50,
        seed: None,
    };
    let err = handlers::quote::quote(State(state()), Json(req)).await.unwrap_err();
    assert!(matches!(err, ApiError::BadRequest(_)));
}

#[tokio::test]
async fn simulate_settles_connected_wallet() {
    let st = state();
    let balances = HashMap::from([(SOL_MINT.to_string(), 5_000_000_000u64)]);
    handlers::wallet::connect(
        State(st.clone()),
        Json(ConnectRequest {
            address: ADDRESS.into(),
            balances,
        }),
    )
    .await
    .unwrap();

    let (nodes, edges) = example_graph().unwrap().to_parts();
    let req = SimulateRequest {
        nodes,
        edges,
        approve: true,
        seed: Some(4),
    };
    let Json(report) = handlers::simulate::simulate(State(st.clone()), Json(req)).await.unwrap();
    assert!(report.result.success);

    let Json(wallet) = handlers::wallet::get(State(st)).await;
    assert_eq!(wallet.balances[SOL_MINT], 4_000_000_000);
    assert_eq!(wallet.balances[USDC_DEVNET_MINT], report.result.output_amount.unwrap());
}

#[tokio::test]
async fn simulate_invalid_workflow_is_unprocessable() {
    let req = SimulateRequest {
        nodes: vec![Node::start("s")],
        edges: vec![],
        approve: true,
        seed: None,
    };
    let err = handlers::simulate::simulate(State(state()), Json(req)).await.unwrap_err();
    match &err {
        ApiError::Validation(report) => assert!(!report.valid),
        other => panic!("unexpected {other:?}"),
    }
    assert_eq!(err.into_response().status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn declined_simulation_is_cancelled() {
    let (nodes, edges) = example_graph().unwrap().to_parts();
    let req = SimulateRequest {
        nodes,
        edges,
        approve: false,
        seed: Some(4),
    };
    let Json(report) = handlers::simulate::simulate(State(state()), Json(req)).await.unwrap();
    assert!(report.result.is_cancelled());
}

// ── Wallet ──────────────────────────────────────────────────────────

#[tokio::test]
async fn wallet_address_validation() {
    let Json(ok) = handlers::wallet::validate(Json(AddressRequest {
        address: Some(ADDRESS.into()),
    }))
    .await
    .unwrap();
    assert!(ok.valid);

    let Json(bad) = handlers::wallet::validate(Json(AddressRequest {
        address: Some("0xdeadbeef".into()),
    }))
    .await
    .unwrap();
    assert!(!bad.valid);
    assert_eq!(bad.message, "Invalid wallet address format");

    let err = handlers::wallet::validate(Json(AddressRequest { address: None }))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::BadRequest(_)));
}

#[tokio::test]
async fn wallet_connect_and_disconnect() {
    let st = state();
    let err = handlers::wallet::connect(
        State(st.clone()),
        Json(ConnectRequest {
            address: "nope".into(),
            balances: HashMap::new(),
        }),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, ApiError::BadRequest(_)));

    let Json(snap) = handlers::wallet::connect(
        State(st.clone()),
        Json(ConnectRequest {
            address: ADDRESS.into(),
            balances: HashMap::new(),
        }),
    )
    .await
    .unwrap();
    assert_eq!(snap.address.as_deref(), Some(ADDRESS));

    let Json(snap) = handlers::wallet::disconnect(State(st)).await;
    assert!(snap.address.is_none());
}

#[test]
fn router_builds() {
    let _router = defi_canvas::api::router(state());
}
