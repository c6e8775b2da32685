//! Token mint and swap purchase workflows against the mock ledger.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use ledger_runner::contracts::payload::{BalanceResponse, MinterResponse, QueryMsg};
use ledger_runner::ledger::Coin;
use ledger_runner::workflow::{DecisionPolicy, Outcome, Probe, Session, Verify, Workflow};

mod common;

use common::{
    account_json, gas_prices_json, query_envelope, start_mock_ledger, test_config, SWAP_ADDR,
    TOKEN_ADDR,
};

#[tokio::test]
async fn test_mint_verifies_against_recipient_balance() {
    let addr: SocketAddr = "127.0.0.1:29311".parse().unwrap();
    let broadcast_body = Arc::new(Mutex::new(String::new()));

    let captured = broadcast_body.clone();
    start_mock_ledger(addr, move |method, path, body| {
        if path.starts_with("/v1/txs/gas_prices") {
            return (200, gas_prices_json());
        }
        if path.starts_with("/auth/accounts/") {
            return (200, account_json());
        }
        if method == "POST" && path == "/txs" {
            *captured.lock().unwrap() = body.to_string();
            return (
                200,
                r#"{"height":"102","txhash":"4D1E7","raw_log":"[]"}"#.to_string(),
            );
        }
        if path.starts_with(&format!("/wasm/contracts/{}/store", TOKEN_ADDR)) {
            // Minter for the pre-submit read, balance for the verification
            // read; the query payload travels in the URL.
            if path.contains("minter") {
                return (200, query_envelope(r#"{"minter":"terra1admin"}"#));
            }
            return (200, query_envelope(r#"{"balance":"1000000000"}"#));
        }
        (404, "{}".to_string())
    })
    .await;

    let session = Session::connect(&test_config(29311)).await.unwrap();
    let recipient = session.identity_address("admin").unwrap().to_string();

    let workflow = Workflow {
        signer: "admin".to_string(),
        target: "cw20_token".to_string(),
        probe: Probe {
            contract: "cw20_token".to_string(),
            query: QueryMsg::Minter {},
        },
        policy: DecisionPolicy::Mint {
            recipient: recipient.clone(),
            amount: 1_000_000_000,
        },
        verify: Verify::SkipOnRejection,
        verify_probe: Some(Probe {
            contract: "cw20_token".to_string(),
            query: QueryMsg::Balance { address: recipient },
        }),
    };

    let report = workflow.run(&session).await.unwrap();
    assert_eq!(
        report.before.decode::<MinterResponse>().unwrap().minter,
        "terra1admin"
    );
    match report.outcome {
        Outcome::Submitted { broadcast, after } => {
            assert!(broadcast.success);
            let after = after.expect("verification query should have run");
            assert_eq!(
                after.decode::<BalanceResponse>().unwrap().balance,
                1_000_000_000
            );
        }
        other => panic!("expected a submit, got {:?}", other),
    }

    let body = broadcast_body.lock().unwrap().clone();
    assert!(body.contains(r#""mint""#), "unexpected broadcast body: {}", body);
    assert!(body.contains(r#""amount":"1000000000""#));
}

#[tokio::test]
async fn test_buy_attaches_native_funds() {
    let addr: SocketAddr = "127.0.0.1:29312".parse().unwrap();
    let broadcast_body = Arc::new(Mutex::new(String::new()));

    let captured = broadcast_body.clone();
    start_mock_ledger(addr, move |method, path, body| {
        if path.starts_with("/v1/txs/gas_prices") {
            return (200, gas_prices_json());
        }
        if path.starts_with("/auth/accounts/") {
            return (200, account_json());
        }
        if method == "POST" && path == "/txs" {
            *captured.lock().unwrap() = body.to_string();
            return (
                200,
                r#"{"height":"103","txhash":"B4B4","raw_log":"[]"}"#.to_string(),
            );
        }
        if path.starts_with(&format!("/wasm/contracts/{}/store", TOKEN_ADDR)) {
            return (200, query_envelope(r#"{"balance":"0"}"#));
        }
        (404, "{}".to_string())
    })
    .await;

    let session = Session::connect(&test_config(29312)).await.unwrap();
    let buyer = session.identity_address("admin").unwrap().to_string();

    let workflow = Workflow {
        signer: "admin".to_string(),
        target: "swap".to_string(),
        probe: Probe {
            contract: "cw20_token".to_string(),
            query: QueryMsg::Balance { address: buyer },
        },
        policy: DecisionPolicy::Buy {
            funds: vec![Coin::new("uluna", 1_000_000)],
        },
        verify: Verify::SkipOnRejection,
        verify_probe: None,
    };

    let report = workflow.run(&session).await.unwrap();
    assert!(matches!(report.outcome, Outcome::Submitted { .. }));

    // The purchase is paid through attached coins on the execute message,
    // aimed at the swap contract.
    let body = broadcast_body.lock().unwrap().clone();
    assert!(
        body.contains(r#""coins":[{"amount":"1000000","denom":"uluna"}]"#),
        "unexpected broadcast body: {}",
        body
    );
    assert!(body.contains(&format!(r#""contract":"{}""#, SWAP_ADDR)));
    assert!(body.contains(r#""buy""#));
}
