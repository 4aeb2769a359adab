//! Shared helpers for integration tests.

use std::fs;
use std::io::Write;
use std::net::TcpListener;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Captures tracing output for tests.
#[allow(dead_code)]
pub struct TestTracing {
    buffer: Arc<Mutex<Vec<u8>>>,
}

#[allow(dead_code)]
impl TestTracing {
    pub fn new() -> Self {
        Self {
            buffer: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn install(&self) -> tracing::subscriber::DefaultGuard {
        let writer = self.buffer.clone();
        let make_writer = move || TestWriter(writer.clone());
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .without_time()
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(make_writer)
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    pub fn output(&self) -> String {
        let buf = self.buffer.lock().unwrap();
        String::from_utf8_lossy(&buf).to_string()
    }

    /// Assert that the captured log output contains the provided substring.
    pub fn assert_contains(&self, needle: &str) {
        let out = self.output();
        assert!(
            out.contains(needle),
            "expected logs to contain `{needle}`, got:\n{out}"
        );
    }
}

struct TestWriter(Arc<Mutex<Vec<u8>>>);

impl Write for TestWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Path the search service is mounted at in tests.
#[allow(dead_code)]
pub const SEARCH_PATH: &str = "/api/search";

/// Search endpoint URL on a mock server.
#[allow(dead_code)]
pub fn search_endpoint(server: &wiremock::MockServer) -> String {
    format!("{}{SEARCH_PATH}", server.uri())
}

/// Mount a search responder that only answers `GET /api/search?q=<query>`
/// sent with `Accept: application/json`, and must be hit exactly `hits` times.
#[allow(dead_code)]
pub async fn mount_search(
    server: &wiremock::MockServer,
    query: &str,
    response: wiremock::ResponseTemplate,
    hits: u64,
) {
    use wiremock::Mock;
    use wiremock::matchers::{header, method, path, query_param};

    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .and(query_param("q", query))
        .and(header("accept", "application/json"))
        .respond_with(response)
        .expect(hits)
        .mount(server)
        .await;
}

/// A local URL nothing is listening on.
#[allow(dead_code)]
pub fn unreachable_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().expect("addr").port();
    drop(listener);
    format!("http://127.0.0.1:{port}/api/search")
}

/// Write a markdown post with front matter under `root`.
#[allow(dead_code)]
pub fn write_post(root: &Path, rel: &str, front_matter: &str, body: &str) -> PathBuf {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create post dir");
    }
    fs::write(&path, format!("---\n{front_matter}---\n{body}")).expect("write post");
    path
}
