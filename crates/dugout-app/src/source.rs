// Where today's lineup page comes from: a saved HTML file or a live URL.

use std::path::PathBuf;

use tracing::{debug, info};

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("failed to read lineup page {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to fetch lineup page {url}: {source}")]
    Http { url: String, source: reqwest::Error },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineupSource {
    File(PathBuf),
    Url(String),
}

impl LineupSource {
    /// Read the page body. Only the `Url` variant touches the network.
    pub async fn fetch(&self, http: &reqwest::Client) -> Result<String, SourceError> {
        match self {
            LineupSource::File(path) => {
                let html = tokio::fs::read_to_string(path)
                    .await
                    .map_err(|e| SourceError::Io {
                        path: path.clone(),
                        source: e,
                    })?;
                debug!("read {} bytes of lineup HTML from {}", html.len(), path.display());
                Ok(html)
            }
            LineupSource::Url(url) => {
                let http_err = |e| SourceError::Http {
                    url: url.clone(),
                    source: e,
                };
                let response = http
                    .get(url)
                    .send()
                    .await
                    .and_then(reqwest::Response::error_for_status)
                    .map_err(http_err)?;
                let html = response.text().await.map_err(http_err)?;
                info!("fetched {} bytes of lineup HTML from {}", html.len(), url);
                Ok(html)
            }
        }
    }
}

impl std::fmt::Display for LineupSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LineupSource::File(path) => write!(f, "file {}", path.display()),
            LineupSource::Url(url) => write!(f, "url {url}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[tokio::test]
    async fn file_source_reads_page() {
        let tmp = std::env::temp_dir().join("dugout_source_test_file");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(&tmp).unwrap();
        let path = tmp.join("lineups.html");
        fs::write(&path, "<html></html>").unwrap();

        let html = LineupSource::File(path)
            .fetch(&reqwest::Client::new())
            .await
            .unwrap();
        assert_eq!(html, "<html></html>");

        let _ = fs::remove_dir_all(&tmp);
    }

    #[tokio::test]
    async fn missing_file_is_io_error() {
        let path = std::env::temp_dir().join("dugout_source_test_missing/lineups.html");
        let err = LineupSource::File(path.clone())
            .fetch(&reqwest::Client::new())
            .await
            .unwrap_err();
        match err {
            SourceError::Io { path: p, .. } => assert_eq!(p, path),
            other => panic!("expected Io, got: {other}"),
        }
    }

    #[tokio::test]
    async fn malformed_url_is_http_error() {
        let err = LineupSource::Url("not a url".into())
            .fetch(&reqwest::Client::new())
            .await
            .unwrap_err();
        assert!(matches!(err, SourceError::Http { ref url, .. } if url == "not a url"));
    }

    #[test]
    fn display_names_the_source() {
        assert_eq!(
            LineupSource::Url("https://example.com".into()).to_string(),
            "url https://example.com"
        );
    }
}
