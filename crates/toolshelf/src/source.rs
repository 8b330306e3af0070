//! Where the catalogue comes from.
//!
//! A [`CatalogueSource`] only knows how to produce the raw body. Parsing and
//! the fail-to-empty policy live in [`fetch_catalogue`], which every renderer
//! goes through. Nothing here caches: each call performs exactly one load.

use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;

use tracing::{debug, warn};
use url::Url;

use crate::catalogue::{Tool, parse_catalogue};
use crate::error::FetchError;

/// Boxed future returned by [`CatalogueSource::load`].
pub type LoadFuture<'a> = Pin<Box<dyn Future<Output = Result<String, FetchError>> + Send + 'a>>;

/// A location the catalogue body can be loaded from.
pub trait CatalogueSource: Send + Sync {
    /// Human-readable location, used in log lines.
    fn describe(&self) -> String;

    /// Load the raw catalogue body.
    fn load(&self) -> LoadFuture<'_>;
}

/// Catalogue published over HTTP(S).
///
/// One GET per load. Non-success statuses are failures. No retries and no
/// timeout: a slow host simply makes the page slow.
pub struct HttpSource {
    client: reqwest::Client,
    url: Url,
}

impl HttpSource {
    pub fn new(url: Url) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("toolshelf/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client, url })
    }
}

impl CatalogueSource for HttpSource {
    fn describe(&self) -> String {
        self.url.to_string()
    }

    fn load(&self) -> LoadFuture<'_> {
        Box::pin(async move {
            let resp = self.client.get(self.url.clone()).send().await?;
            let status = resp.status();
            if !status.is_success() {
                return Err(FetchError::Status {
                    status: status.as_u16(),
                    url: self.url.to_string(),
                });
            }
            Ok(resp.text().await?)
        })
    }
}

/// Catalogue stored as a local JSON file.
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CatalogueSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn load(&self) -> LoadFuture<'_> {
        Box::pin(async move {
            tokio::fs::read_to_string(&self.path)
                .await
                .map_err(|source| FetchError::Io {
                    path: self.path.clone(),
                    source,
                })
        })
    }
}

/// Catalogue body held in memory.
pub struct StaticSource {
    body: String,
}

impl StaticSource {
    pub fn new(body: impl Into<String>) -> Self {
        Self { body: body.into() }
    }
}

impl CatalogueSource for StaticSource {
    fn describe(&self) -> String {
        format!("<inline, {} bytes>", self.body.len())
    }

    fn load(&self) -> LoadFuture<'_> {
        Box::pin(async move { Ok::<_, FetchError>(self.body.clone()) })
    }
}

/// Pick a source for a location string: `http://` and `https://` locations
/// are fetched over the network, anything else is read as a file path.
pub fn source_from_location(location: &str) -> Result<Box<dyn CatalogueSource>, FetchError> {
    if location.starts_with("http://") || location.starts_with("https://") {
        let url = Url::parse(location)?;
        Ok(Box::new(HttpSource::new(url)?))
    } else {
        Ok(Box::new(FileSource::new(location)))
    }
}

/// Load and parse the catalogue, degrading to an empty one on any failure.
///
/// Transport errors, bad statuses, malformed JSON and non-array payloads are
/// all logged at `warn` and turned into `vec![]`. Callers render an empty
/// catalogue as a normal state, so this never returns an error.
pub async fn fetch_catalogue(source: &dyn CatalogueSource) -> Vec<Tool> {
    let location = source.describe();
    let body = match source.load().await {
        Ok(body) => body,
        Err(e) => {
            warn!("catalogue fetch from {location} failed: {e}");
            return Vec::new();
        }
    };

    match parse_catalogue(&body) {
        Ok(tools) => {
            debug!("loaded {} tool(s) from {location}", tools.len());
            tools
        }
        Err(e) => {
            warn!("catalogue from {location} is unusable: {e}");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    struct FailingSource;

    impl CatalogueSource for FailingSource {
        fn describe(&self) -> String {
            "failing".into()
        }

        fn load(&self) -> LoadFuture<'_> {
            Box::pin(async {
                Err::<String, _>(FetchError::Status {
                    status: 503,
                    url: "http://test/tools.json".into(),
                })
            })
        }
    }

    #[tokio::test]
    async fn static_source_parses() {
        let source = StaticSource::new(r#"[{"slug": "x", "name": "X"}]"#);
        let tools = fetch_catalogue(&source).await;
        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0].slug, "x");
    }

    #[tokio::test]
    async fn failed_load_yields_empty() {
        assert!(fetch_catalogue(&FailingSource).await.is_empty());
    }

    #[tokio::test]
    async fn malformed_body_yields_empty() {
        assert!(fetch_catalogue(&StaticSource::new("not json")).await.is_empty());
        assert!(fetch_catalogue(&StaticSource::new(r#"{"a": 1}"#)).await.is_empty());
        assert!(fetch_catalogue(&StaticSource::new("null")).await.is_empty());
    }

    #[tokio::test]
    async fn file_source_reads_catalogue() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{"slug": "a", "name": "A"}}, {{"slug": "b", "name": "B"}}]"#).unwrap();

        let source = FileSource::new(file.path());
        let tools = fetch_catalogue(&source).await;
        assert_eq!(tools.len(), 2);
    }

    #[tokio::test]
    async fn missing_file_yields_empty() {
        let dir = tempfile::tempdir().unwrap();
        let source = FileSource::new(dir.path().join("missing.json"));
        assert!(matches!(source.load().await, Err(FetchError::Io { .. })));
        assert!(fetch_catalogue(&source).await.is_empty());
    }

    #[tokio::test]
    async fn refused_connection_yields_empty() {
        // Bind then drop a listener so the port is known to be closed.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let url = Url::parse(&format!("http://{addr}/tools.json")).unwrap();
        let source = HttpSource::new(url).unwrap();
        assert!(matches!(source.load().await, Err(FetchError::Transport(_))));
        assert!(fetch_catalogue(&source).await.is_empty());
    }

    #[test]
    fn location_selects_source_kind() {
        let http = source_from_location("https://example.com/tools.json").unwrap();
        assert_eq!(http.describe(), "https://example.com/tools.json");

        let file = source_from_location("data/tools.json").unwrap();
        assert_eq!(file.describe(), "data/tools.json");

        assert!(matches!(
            source_from_location("http://"),
            Err(FetchError::InvalidUrl(_))
        ));
    }
}
