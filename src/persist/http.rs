//! Store captions by POSTing them to the captions endpoint.

use super::{CaptionRecord, CaptionStore};
use crate::error::{CaptionError, Result};
use reqwest::blocking::Client;

/// POSTs `{filename, caption}` as JSON; any 2xx is success.
#[derive(Debug, Clone)]
pub struct HttpCaptionStore {
    endpoint: String,
    client: Client,
}

impl HttpCaptionStore {
    pub fn new(endpoint: &str) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("captioner/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                CaptionError::PersistenceFailure(format!("failed to build HTTP client: {}", e))
            })?;
        Ok(Self::with_client(endpoint, client))
    }

    pub fn with_client(endpoint: &str, client: Client) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            client,
        }
    }
}

impl CaptionStore for HttpCaptionStore {
    fn persist(&self, record: &CaptionRecord) -> Result<String> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(record)
            .send()
            .map_err(|e| {
                CaptionError::PersistenceFailure(format!(
                    "request to {} failed: {}",
                    self.endpoint, e
                ))
            })?;

        let status = response.status();
        let body = response.text().unwrap_or_default();
        if !status.is_success() {
            return Err(CaptionError::PersistenceFailure(format!(
                "{} responded with {}: {}",
                self.endpoint,
                status,
                body.trim()
            )));
        }

        Ok(body)
    }

    fn describe(&self) -> String {
        self.endpoint.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufRead, BufReader, Read, Write};
    use std::net::TcpListener;
    use std::thread::{self, JoinHandle};

    /// Captured request: request line and body.
    type Captured = (String, String);

    /// Answer exactly one request with the given status line and body.
    fn serve_once(status_line: &'static str, body: &'static str) -> (String, JoinHandle<Captured>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream.try_clone().unwrap());

            let mut request_line = String::new();
            reader.read_line(&mut request_line).unwrap();

            let mut content_length = 0;
            loop {
                let mut line = String::new();
                reader.read_line(&mut line).unwrap();
                if line == "\r\n" || line.is_empty() {
                    break;
                }
                let lower = line.to_ascii_lowercase();
                if let Some(value) = lower.strip_prefix("content-length:") {
                    content_length = value.trim().parse().unwrap();
                }
            }

            let mut request_body = vec![0; content_length];
            reader.read_exact(&mut request_body).unwrap();

            let response = format!(
                "{}\r\nContent-Type: text/plain\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).unwrap();

            (
                request_line.trim().to_string(),
                String::from_utf8(request_body).unwrap(),
            )
        });

        (format!("http://{}/api/captions", addr), handle)
    }

    fn local_store(endpoint: &str) -> HttpCaptionStore {
        let client = Client::builder().no_proxy().build().unwrap();
        HttpCaptionStore::with_client(endpoint, client)
    }

    fn record() -> CaptionRecord {
        CaptionRecord {
            filename: "images\\cat1.txt".to_string(),
            caption: "a photo of a cat eating a tuna".to_string(),
        }
    }

    #[test]
    fn test_posts_record_as_json() {
        let (endpoint, server) = serve_once("HTTP/1.1 200 OK", "saved");
        let store = local_store(&endpoint);

        let response = store.persist(&record()).unwrap();
        let (request_line, body) = server.join().unwrap();

        assert_eq!(response, "saved");
        assert!(request_line.starts_with("POST /api/captions "), "{}", request_line);
        let sent: CaptionRecord = serde_json::from_str(&body).unwrap();
        assert_eq!(sent, record());
    }

    #[test]
    fn test_non_success_status_fails() {
        let (endpoint, server) = serve_once("HTTP/1.1 500 Internal Server Error", "disk full");
        let store = local_store(&endpoint);

        let err = store.persist(&record()).unwrap_err();
        server.join().unwrap();

        match err {
            CaptionError::PersistenceFailure(message) => {
                assert!(message.contains("500"), "{}", message);
                assert!(message.contains("disk full"), "{}", message);
            }
            other => panic!("unexpected error type: {:?}", other),
        }
    }

    #[test]
    fn test_transport_error_fails() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let store = local_store(&format!("http://{}/api/captions", addr));
        let err = store.persist(&record()).unwrap_err();
        assert!(matches!(err, CaptionError::PersistenceFailure(_)));
    }

    #[test]
    fn test_describe_is_endpoint() {
        let store = local_store("http://localhost:3000/api/captions");
        assert_eq!(store.describe(), "http://localhost:3000/api/captions");
    }
}
