use docs_explorer::config::{ExplorerConfig, RecordPolicy};
use docs_explorer::loader::DataLoader;
use serde_json::{Value, json};
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const FEED_PATH: &str = "/search/swiftui-views.json";
pub const BASE_URL: &str = "https://example.com";

/// The three-entry feed used throughout the tests.
#[allow(dead_code)]
pub fn sample_payload() -> Value {
    json!({
        "links": [
            {"title": "Text", "url": "/text"},
            {"title": "TextField", "url": "/textfield"},
            {"title": "Button", "url": "/button"},
        ]
    })
}

/// Feed with `count` well-formed records titled `View {i}`.
#[allow(dead_code)]
pub fn generated_payload(count: usize) -> Value {
    let links: Vec<Value> = (0..count)
        .map(|i| {
            json!({
                "title": format!("View {i}"),
                "url": format!("/documentation/swiftui/view{i}"),
            })
        })
        .collect();
    json!({ "links": links })
}

#[allow(dead_code)]
pub fn feed_url(server: &MockServer) -> String {
    format!("{}{FEED_PATH}", server.uri())
}

#[allow(dead_code)]
pub fn config_for(server: &MockServer) -> ExplorerConfig {
    ExplorerConfig::default()
        .with_source_url(feed_url(server))
        .with_base_url(BASE_URL)
        .with_timeout(Duration::from_secs(5))
}

#[allow(dead_code)]
pub fn loader_for(server: &MockServer) -> DataLoader {
    DataLoader::new(config_for(server)).unwrap()
}

#[allow(dead_code)]
pub fn strict_loader_for(server: &MockServer) -> DataLoader {
    DataLoader::new(config_for(server).with_record_policy(RecordPolicy::Strict)).unwrap()
}

/// Serve `body` as JSON on the feed path, expecting exactly `times` requests.
#[allow(dead_code)]
pub async fn serve_json(server: &MockServer, body: Value, times: u64) {
    Mock::given(method("GET"))
        .and(path(FEED_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(times)
        .mount(server)
        .await;
}

/// Serve a raw response on the feed path for the next `times` requests only.
#[allow(dead_code)]
pub async fn serve_once(server: &MockServer, response: ResponseTemplate, times: u64) {
    Mock::given(method("GET"))
        .and(path(FEED_PATH))
        .respond_with(response)
        .up_to_n_times(times)
        .expect(times)
        .mount(server)
        .await;
}

/// Captures tracing output for tests.
#[allow(dead_code)]
pub struct TestTracing {
    buffer: std::sync::Arc<std::sync::Mutex<Vec<u8>>>,
}

#[allow(dead_code)]
impl TestTracing {
    pub fn new() -> Self {
        Self {
            buffer: std::sync::Arc::new(std::sync::Mutex::new(Vec::new())),
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

struct TestWriter(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

impl std::io::Write for TestWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let mut guard = self.0.lock().unwrap();
        guard.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
