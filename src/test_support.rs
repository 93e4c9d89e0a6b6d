//! Loopback HTTP server standing in for a remote completion endpoint.

use std::thread::JoinHandle;
use tiny_http::{Header, Response, Server};

/// What the server saw for the single request it handled.
#[derive(Debug)]
pub struct Captured {
    pub method: String,
    pub path: String,
    pub authorization: Option<String>,
    pub body: String,
}

impl Captured {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).expect("request body is JSON")
    }
}

/// Serve exactly one request with the given status, body and extra headers.
///
/// Returns the base URL (ending in `/v1`) and a handle yielding the captured request.
pub fn serve_once(
    status: u16,
    body: &str,
    headers: &[(&str, &str)],
) -> (String, JoinHandle<Captured>) {
    let server = Server::http("127.0.0.1:0").expect("bind loopback server");
    let addr = server.server_addr().to_ip().expect("ip listen address");
    let body = body.to_string();
    let headers: Vec<Header> = std::iter::once(("Content-Type", "application/json"))
        .chain(headers.iter().copied())
        .map(|(name, value)| {
            Header::from_bytes(name.as_bytes(), value.as_bytes()).expect("valid header")
        })
        .collect();

    let handle = std::thread::spawn(move || {
        let mut request = server.recv().expect("receive request");
        let mut request_body = String::new();
        request
            .as_reader()
            .read_to_string(&mut request_body)
            .expect("read request body");

        let captured = Captured {
            method: request.method().to_string(),
            path: request.url().to_string(),
            authorization: request
                .headers()
                .iter()
                .find(|h| h.field.equiv("Authorization"))
                .map(|h| h.value.as_str().to_string()),
            body: request_body,
        };

        let mut response = Response::from_string(body).with_status_code(status);
        for header in headers {
            response = response.with_header(header);
        }
        request.respond(response).expect("send response");
        captured
    });

    (format!("http://{addr}/v1"), handle)
}

/// A minimal successful chat completion body with the given choice contents.
pub fn completion_body(contents: &[&str]) -> String {
    let choices: Vec<serde_json::Value> = contents
        .iter()
        .enumerate()
        .map(|(index, content)| {
            serde_json::json!({
                "index": index,
                "message": {"role": "assistant", "content": content},
                "finish_reason": "stop"
            })
        })
        .collect();

    serde_json::json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "created": 1_700_000_000,
        "model": "gpt-3.5-turbo-0125",
        "choices": choices,
        "usage": {"prompt_tokens": 30, "completion_tokens": 17, "total_tokens": 47}
    })
    .to_string()
}
