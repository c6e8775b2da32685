//! Shared utilities for integration testing against a mock ledger.

use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::sync::Arc;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use ledger_runner::config::RunnerConfig;

/// Well-known BIP-39 test vector phrase. Publicly known; never fund it.
pub const TEST_MNEMONIC: &str = "abandon abandon abandon abandon abandon abandon \
     abandon abandon abandon abandon abandon about";

pub const ORACLE_ADDR: &str = "terra1ylhsnjx86aqx6zdtcdu03cykssjdpy6qxvm8m8";
pub const TOKEN_ADDR: &str = "terra185hhwh456gy603gt2shmme935u0z2vd3x0pfs8";
pub const SWAP_ADDR: &str = "terra1466nf3zuxpya8q9emxukd7vftaf6h4psr0a07s";

/// Runner configuration pointing every endpoint at a mock ledger.
pub fn test_config(port: u16) -> RunnerConfig {
    let mut config = RunnerConfig::default();
    config.network = "testnet".to_string();
    config.ledger.lcd_url = format!("http://127.0.0.1:{}", port);
    config.ledger.chain_id = "mock-1".to_string();
    config.fees.oracle_url = format!("http://127.0.0.1:{}/v1/txs/gas_prices", port);
    config
        .keys
        .insert("admin".to_string(), TEST_MNEMONIC.to_string());

    let mut contracts = BTreeMap::new();
    contracts.insert("oracle".to_string(), ORACLE_ADDR.to_string());
    contracts.insert("cw20_token".to_string(), TOKEN_ADDR.to_string());
    contracts.insert("swap".to_string(), SWAP_ADDR.to_string());
    config
        .contracts
        .addresses
        .insert("testnet".to_string(), contracts);
    config
}

/// The gas-price payload every mock ledger serves.
pub fn gas_prices_json() -> String {
    r#"{"uluna":"0.01133","uusd":"0.15"}"#.to_string()
}

/// A plausible account-state payload for any address.
pub fn account_json() -> String {
    r#"{"height":"100","result":{"type":"core/Account","value":{"account_number":"5","sequence":"7"}}}"#
        .to_string()
}

/// Wrap a contract response in the LCD query envelope.
pub fn query_envelope(result: &str) -> String {
    format!(r#"{{"height":"100","result":{}}}"#, result)
}

/// Start a programmable mock ledger endpoint.
///
/// The handler receives (method, path-with-query, body) for each request
/// and returns (status, JSON body). One connection per request; the
/// response closes the connection.
pub async fn start_mock_ledger<F>(addr: SocketAddr, handler: F)
where
    F: Fn(&str, &str, &str) -> (u16, String) + Send + Sync + 'static,
{
    let listener = TcpListener::bind(addr).await.unwrap();
    let handler = Arc::new(handler);

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let handler = handler.clone();
                    tokio::spawn(async move {
                        let mut buf = Vec::new();
                        let mut chunk = [0u8; 4096];

                        // Read until the end of the headers.
                        let header_end = loop {
                            match socket.read(&mut chunk).await {
                                Ok(0) | Err(_) => break None,
                                Ok(n) => {
                                    buf.extend_from_slice(&chunk[..n]);
                                    if let Some(pos) = find_subsequence(&buf, b"\r\n\r\n") {
                                        break Some(pos);
                                    }
                                }
                            }
                        };
                        let Some(header_end) = header_end else { return };

                        let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
                        let content_length = head
                            .lines()
                            .filter_map(|line| line.split_once(':'))
                            .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
                            .and_then(|(_, value)| value.trim().parse::<usize>().ok())
                            .unwrap_or(0);

                        let body_start = header_end + 4;
                        while buf.len() < body_start + content_length {
                            match socket.read(&mut chunk).await {
                                Ok(0) | Err(_) => break,
                                Ok(n) => buf.extend_from_slice(&chunk[..n]),
                            }
                        }

                        let mut request_line = head.lines().next().unwrap_or("").split_whitespace();
                        let method = request_line.next().unwrap_or("").to_string();
                        let path = request_line.next().unwrap_or("").to_string();
                        let body = String::from_utf8_lossy(&buf[body_start..]).to_string();

                        let (status, response_body) = handler(&method, &path, &body);
                        let status_text = match status {
                            200 => "200 OK",
                            400 => "400 Bad Request",
                            404 => "404 Not Found",
                            500 => "500 Internal Server Error",
                            _ => "200 OK",
                        };
                        let response = format!(
                            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status_text,
                            response_body.len(),
                            response_body
                        );
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });
}

fn find_subsequence(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}
