//! End-to-end tests driving a shipper through the default HTTP transport
//! against a mock ingestion server.

use std::io::{BufRead, BufReader, Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use rstest::{fixture, rstest};
use serde_json::Value;

use parseable_shipper::{Level, LogRecord, Shipper};

#[derive(Debug)]
struct CapturedRequest {
    method: String,
    path: String,
    headers: Vec<(String, String)>,
    body: String,
}

fn read_http_request(stream: &mut TcpStream) -> CapturedRequest {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(5)));
    let mut reader = BufReader::new(stream.try_clone().expect("clone stream"));

    let mut request_line = String::new();
    reader
        .read_line(&mut request_line)
        .expect("read request line");
    let parts: Vec<&str> = request_line.trim().split(' ').collect();
    let method = parts.first().unwrap_or(&"").to_string();
    let path = parts.get(1).unwrap_or(&"").to_string();

    let mut headers = Vec::new();
    let mut content_length = 0usize;
    loop {
        let mut line = String::new();
        reader.read_line(&mut line).expect("read header");
        if line.trim().is_empty() {
            break;
        }
        let Some((key, value)) = line
            .trim()
            .split_once(':')
            .map(|(k, v)| (k.trim().to_lowercase(), v.trim().to_string()))
        else {
            continue;
        };
        if key == "content-length" {
            content_length = value.parse().unwrap_or(0);
        }
        headers.push((key, value));
    }

    let mut body = vec![0u8; content_length];
    if content_length > 0 {
        reader.read_exact(&mut body).expect("read body");
    }

    CapturedRequest {
        method,
        path,
        headers,
        body: String::from_utf8_lossy(&body).to_string(),
    }
}

/// Spawn a mock ingestion server answering the first request with 200.
fn spawn_mock_server(listener: TcpListener) -> (SocketAddr, mpsc::Receiver<CapturedRequest>) {
    let addr = listener.local_addr().expect("listener has address");
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        let Ok((mut stream, _)) = listener.accept() else {
            return;
        };
        let captured = read_http_request(&mut stream);
        let _ = stream.write_all(b"HTTP/1.1 200 OK\r\nContent-Length: 0\r\n\r\n");
        let _ = tx.send(captured);
    });

    (addr, rx)
}

#[fixture]
fn tcp_listener() -> TcpListener {
    TcpListener::bind(("127.0.0.1", 0)).expect("bind ephemeral listener")
}

fn build_shipper(addr: SocketAddr) -> Shipper {
    Shipper::builder()
        .with_host("http://127.0.0.1")
        .with_port(addr.port())
        .with_stream("app")
        .with_credentials("admin", "admin")
        .with_min_level(Level::Info)
        .build()
        .expect("build shipper")
}

fn header_value<'a>(captured: &'a CapturedRequest, name: &str) -> Option<&'a str> {
    captured
        .headers
        .iter()
        .find(|(k, _)| k == name)
        .map(|(_, v)| v.as_str())
}

#[rstest]
fn ships_single_record_to_ingest_endpoint(tcp_listener: TcpListener) {
    let (addr, rx) = spawn_mock_server(tcp_listener);
    let shipper = build_shipper(addr);

    shipper
        .handle(&LogRecord::new("app", Level::Error, "disk write failed"))
        .expect("handle");

    let captured = rx.recv_timeout(Duration::from_secs(5)).expect("request");
    assert_eq!(captured.method, "POST");
    assert_eq!(captured.path, "/api/v1/ingest");
    assert_eq!(
        header_value(&captured, "content-type"),
        Some("application/json")
    );
    assert_eq!(header_value(&captured, "x-p-stream"), Some("app"));
    assert_eq!(
        header_value(&captured, "authorization"),
        Some("Basic YWRtaW46YWRtaW4=")
    );

    let parsed: Value = serde_json::from_str(&captured.body).expect("parse body");
    assert_eq!(parsed["message"], "disk write failed");
    assert_eq!(parsed["level_name"], "ERROR");
    assert_eq!(parsed["channel"], "app");
}

#[rstest]
fn ships_filtered_batch_as_json_array(tcp_listener: TcpListener) {
    let (addr, rx) = spawn_mock_server(tcp_listener);
    let shipper = build_shipper(addr);

    let records = vec![
        LogRecord::new("app", Level::Debug, "noise"),
        LogRecord::new("app", Level::Info, "started"),
        LogRecord::new("app", Level::Error, "failed"),
    ];
    shipper.handle_batch(&records).expect("handle batch");

    let captured = rx.recv_timeout(Duration::from_secs(5)).expect("request");
    let parsed: Value = serde_json::from_str(&captured.body).expect("parse body");
    let items = parsed.as_array().expect("array envelope");
    assert_eq!(items.len(), 2, "the debug record is filtered out");
    assert_eq!(items[0]["message"], "started");
    assert_eq!(items[1]["message"], "failed");
}

#[rstest]
fn fully_filtered_batch_sends_nothing(tcp_listener: TcpListener) {
    let (addr, rx) = spawn_mock_server(tcp_listener);
    let shipper = build_shipper(addr);

    let records = vec![LogRecord::new("app", Level::Debug, "noise")];
    shipper.handle_batch(&records).expect("handle batch");

    assert!(
        rx.recv_timeout(Duration::from_millis(200)).is_err(),
        "no request reaches the server"
    );
}

#[rstest]
fn transport_failure_surfaces_to_caller(tcp_listener: TcpListener) {
    let addr = tcp_listener.local_addr().expect("listener has address");
    drop(tcp_listener);
    let shipper = build_shipper(addr);

    shipper
        .handle(&LogRecord::new("app", Level::Error, "fail"))
        .expect_err("nothing is listening");
}
