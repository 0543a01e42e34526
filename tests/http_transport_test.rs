use statcounter_client::{ClientConfig, Device, ReportClient, ReportError};
use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Accept one connection, answer it with a fixed response and hand back the
/// request head that was received.
fn serve_once(status_line: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(stream.try_clone().unwrap());

        let mut head = String::new();
        loop {
            let mut line = String::new();
            let read = reader.read_line(&mut line).unwrap();
            if read == 0 || line == "\r\n" {
                break;
            }
            head.push_str(&line);
        }

        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status_line,
            body.len(),
            body
        );
        stream.write_all(response.as_bytes()).unwrap();
        stream.flush().unwrap();
        head
    });

    (format!("http://{}", addr), handle)
}

fn client_for(base: &str) -> ReportClient {
    client_with_password(base, "pw")
}

fn client_with_password(base: &str, password: &str) -> ReportClient {
    let config = ClientConfig::new("bob", password)
        .unwrap()
        .with_base_url(format!("{}/stats", base))
        .unwrap()
        .with_timeout(Duration::from_secs(5));
    ReportClient::with_config(config).unwrap()
}

/// A local address with nothing listening on it.
fn closed_port_base() -> String {
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    format!("http://127.0.0.1:{}", port)
}

#[test]
fn test_get_with_basic_auth_and_query() {
    let (base, server) = serve_once("200 OK", r#"{"browsers": [{"name": "Firefox"}]}"#);
    let client = client_for(&base);

    let response = client.browsers("123", Some(Device::Desktop)).unwrap();
    assert_eq!(response["browsers"][0]["name"], "Firefox");

    let head = server.join().unwrap();
    let request_line = head.lines().next().unwrap();
    assert!(
        request_line.starts_with("GET /stats/3/browsers?projectId=123&device=desktop&username=bob&password=pw "),
        "unexpected request line: {}",
        request_line
    );
    // base64("bob:pw")
    assert!(head
        .to_lowercase()
        .contains("authorization: basic ym9ionb3"));
}

#[test]
fn test_error_status_surfaces_body() {
    let (base, server) = serve_once("403 Forbidden", r#"{"error":"forbidden"}"#);
    let client = client_for(&base);

    let err = client.user_project_details().unwrap_err();
    server.join().unwrap();

    match &err {
        ReportError::Remote { status, body } => {
            assert_eq!(*status, 403);
            assert_eq!(body, r#"{"error":"forbidden"}"#);
        }
        other => panic!("expected remote error, got {:?}", other),
    }
    assert!(err.is_auth_failure());
}

#[test]
fn test_non_json_success_is_decode_error() {
    let (base, server) = serve_once("200 OK", "<html>maintenance</html>");
    let client = client_for(&base);

    let err = client.recent_visitors("123", 10).unwrap_err();
    server.join().unwrap();
    assert!(matches!(err, ReportError::Decode(_)));
}

#[test]
fn test_refused_connection_is_transport_error() {
    let client = client_for(&closed_port_base());

    let err = client.entry_pages("123", 0).unwrap_err();
    assert!(matches!(err, ReportError::Transport(_)), "got {:?}", err);
    assert!(err.is_retryable());
}

#[test]
fn test_transport_error_does_not_leak_password() {
    let client = client_with_password(&closed_port_base(), "hunter2");

    let err = client.entry_pages("123", 0).unwrap_err();
    assert!(matches!(err, ReportError::Transport(_)), "got {:?}", err);
    assert!(!err.to_string().contains("hunter2"), "leaked: {}", err);
    assert!(!format!("{:?}", err).contains("hunter2"), "leaked: {:?}", err);

    let source = std::error::Error::source(&err).map(|cause| cause.to_string());
    assert!(!source.unwrap_or_default().contains("hunter2"));
}
