//! Decoding fetcher for the facility dataset
//!
//! Tries an ordered list of candidate source locations and decodes the first
//! successful payload to text. Source candidates are attempted strictly in
//! sequence; a failed candidate is abandoned, never retried. Decoding tries
//! an ordered list of encodings and only falls back to a lossy decode when no
//! candidate decodes strictly.

use std::path::PathBuf;
use std::time::Duration;

use encoding_rs::{Encoding, UTF_8};
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::constants::{
    BUNDLED_SAMPLE_PATH, FALLBACK_ENCODINGS, FETCH_TIMEOUT_SECS, PRIMARY_DATASET_URL,
};
use crate::{Error, Result};

/// One candidate dataset location
#[derive(Debug, Clone)]
pub enum DatasetSource {
    /// Network location fetched over HTTP
    Url(String),
    /// Static path bundled with the application
    Bundled(PathBuf),
}

impl DatasetSource {
    /// Human-readable identifier used in logs and aggregate errors
    pub fn describe(&self) -> String {
        match self {
            DatasetSource::Url(url) => url.clone(),
            DatasetSource::Bundled(path) => path.display().to_string(),
        }
    }
}

/// Decoded dataset text together with the source that produced it
#[derive(Debug, Clone)]
pub struct FetchedText {
    pub text: String,
    pub source: String,
}

/// Fetcher over a prioritized source list
#[derive(Debug)]
pub struct DatasetFetcher {
    client: Client,
    sources: Vec<DatasetSource>,
    encoding_override: Option<String>,
}

impl DatasetFetcher {
    /// Build the fetcher from configuration.
    ///
    /// Source order: configured override (if any), then the production
    /// dataset, then the bundled sample.
    pub fn new(config: &Config) -> Result<Self> {
        let mut sources = Vec::with_capacity(3);
        if let Some(location) = &config.source_override {
            sources.push(source_from_location(location));
        }
        sources.push(DatasetSource::Url(PRIMARY_DATASET_URL.to_string()));
        sources.push(DatasetSource::Bundled(PathBuf::from(BUNDLED_SAMPLE_PATH)));

        Self::with_sources(sources, config.encoding_override.clone())
    }

    /// Build a fetcher over an explicit source list
    pub fn with_sources(
        sources: Vec<DatasetSource>,
        encoding_override: Option<String>,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(FETCH_TIMEOUT_SECS))
            .build()
            .map_err(|e| Error::configuration(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            sources,
            encoding_override,
        })
    }

    /// Fetch and decode the dataset from the first source that succeeds.
    ///
    /// Candidates are fully resolved one at a time; no state survives a
    /// failed attempt. Fails with [`Error::AllSourcesFailed`] carrying every
    /// per-source reason only after the list is exhausted.
    pub async fn fetch(&self, cancel: &CancellationToken) -> Result<FetchedText> {
        let mut attempts: Vec<(String, String)> = Vec::new();

        for source in &self.sources {
            if cancel.is_cancelled() {
                return Err(Error::interrupted("dataset fetch cancelled"));
            }

            match self.attempt(source, cancel).await {
                Ok(fetched) => {
                    info!(source = %fetched.source, bytes = fetched.text.len(), "dataset fetched");
                    return Ok(fetched);
                }
                Err(reason) => {
                    warn!(source = %source.describe(), %reason, "dataset source failed");
                    attempts.push((source.describe(), reason));
                }
            }
        }

        Err(Error::AllSourcesFailed { attempts })
    }

    async fn attempt(
        &self,
        source: &DatasetSource,
        cancel: &CancellationToken,
    ) -> std::result::Result<FetchedText, String> {
        let (bytes, declared) = match source {
            DatasetSource::Url(url) => {
                let response = tokio::select! {
                    _ = cancel.cancelled() => return Err("cancelled".to_string()),
                    result = self.client.get(url).send() => {
                        result.and_then(|r| r.error_for_status()).map_err(|e| e.to_string())?
                    }
                };

                let declared = response
                    .headers()
                    .get(CONTENT_TYPE)
                    .and_then(|v| v.to_str().ok())
                    .and_then(charset_from_content_type);

                let bytes = tokio::select! {
                    _ = cancel.cancelled() => return Err("cancelled".to_string()),
                    result = response.bytes() => result.map_err(|e| e.to_string())?,
                };
                (bytes.to_vec(), declared)
            }
            DatasetSource::Bundled(path) => {
                let bytes = tokio::fs::read(path).await.map_err(|e| e.to_string())?;
                (bytes, None)
            }
        };

        let label = self.encoding_override.as_deref().or(declared.as_deref());
        let text = decode_payload(&bytes, label);

        Ok(FetchedText {
            text,
            source: source.describe(),
        })
    }
}

/// Decode a payload, trying candidate encodings in priority order.
///
/// The declared label (configured override or transport-declared charset)
/// goes first, then the fixed fallback list. The first encoding that decodes
/// without invalid-byte errors wins; if none does, the payload is decoded as
/// lossy UTF-8. Decoding therefore never fails.
pub fn decode_payload(bytes: &[u8], declared: Option<&str>) -> String {
    let mut candidates: Vec<&'static Encoding> = Vec::new();

    if let Some(label) = declared {
        match Encoding::for_label(label.trim().as_bytes()) {
            Some(encoding) => candidates.push(encoding),
            None => debug!(label, "ignoring unknown declared encoding"),
        }
    }
    for label in FALLBACK_ENCODINGS {
        if let Some(encoding) = Encoding::for_label(label.as_bytes())
            && !candidates.contains(&encoding)
        {
            candidates.push(encoding);
        }
    }

    for encoding in &candidates {
        if let Some(text) = encoding.decode_without_bom_handling_and_without_replacement(bytes) {
            debug!(encoding = encoding.name(), "payload decoded strictly");
            return text.into_owned();
        }
    }

    warn!("no candidate encoding decoded strictly; falling back to lossy UTF-8");
    let (text, _, _) = UTF_8.decode(bytes);
    text.into_owned()
}

/// An override location may be a network URL or a static path
fn source_from_location(location: &str) -> DatasetSource {
    if location.starts_with("http://") || location.starts_with("https://") {
        DatasetSource::Url(location.to_string())
    } else {
        DatasetSource::Bundled(PathBuf::from(location))
    }
}

fn charset_from_content_type(value: &str) -> Option<String> {
    value.split(';').find_map(|part| {
        let part = part.trim();
        part.strip_prefix("charset=")
            .or_else(|| part.strip_prefix("CHARSET="))
            .map(|label| label.trim_matches('"').to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn decode_utf8_payload_strictly() {
        let text = decode_payload("名称,住所".as_bytes(), None);
        assert_eq!(text, "名称,住所");
    }

    #[test]
    fn decode_shift_jis_payload_via_fallback_list() {
        let (encoded, _, _) = encoding_rs::SHIFT_JIS.encode("名称,住所");
        let text = decode_payload(&encoded, None);
        assert_eq!(text, "名称,住所");
    }

    #[test]
    fn declared_encoding_is_tried_first() {
        let (encoded, _, _) = encoding_rs::SHIFT_JIS.encode("定員");
        let text = decode_payload(&encoded, Some("shift_jis"));
        assert_eq!(text, "定員");
    }

    #[test]
    fn unknown_declared_encoding_is_ignored() {
        let text = decode_payload("abc".as_bytes(), Some("no-such-charset"));
        assert_eq!(text, "abc");
    }

    #[test]
    fn undecodable_payload_falls_back_to_lossy() {
        // invalid in UTF-8 and an unfinished Shift_JIS lead byte
        let bytes = [0x41, 0xFF, 0x85];
        let text = decode_payload(&bytes, None);
        assert!(text.starts_with('A'));
        assert!(text.contains('\u{FFFD}'));
    }

    #[test]
    fn override_location_may_be_url_or_path() {
        assert!(matches!(
            source_from_location("https://example.jp/data.csv"),
            DatasetSource::Url(_)
        ));
        assert!(matches!(
            source_from_location("data/local.csv"),
            DatasetSource::Bundled(_)
        ));
    }

    #[test]
    fn charset_extraction_from_content_type() {
        assert_eq!(
            charset_from_content_type("text/csv; charset=Shift_JIS"),
            Some("Shift_JIS".to_string())
        );
        assert_eq!(charset_from_content_type("text/csv"), None);
    }

    #[tokio::test]
    async fn fetch_uses_first_succeeding_source() {
        let mut sample = tempfile::NamedTempFile::new().unwrap();
        write!(sample, "名称,緯度,経度\nテスト施設,37.44,138.85\n").unwrap();

        let fetcher = DatasetFetcher::with_sources(
            vec![
                DatasetSource::Bundled(PathBuf::from("/nonexistent/missing.csv")),
                DatasetSource::Bundled(sample.path().to_path_buf()),
            ],
            None,
        )
        .unwrap();

        let cancel = CancellationToken::new();
        let fetched = fetcher.fetch(&cancel).await.unwrap();
        assert!(fetched.text.contains("テスト施設"));
        assert_eq!(fetched.source, sample.path().display().to_string());
    }

    #[tokio::test]
    async fn fetch_aggregates_every_failed_source() {
        let fetcher = DatasetFetcher::with_sources(
            vec![
                DatasetSource::Bundled(PathBuf::from("/nonexistent/a.csv")),
                DatasetSource::Bundled(PathBuf::from("/nonexistent/b.csv")),
            ],
            None,
        )
        .unwrap();

        let cancel = CancellationToken::new();
        let error = fetcher.fetch(&cancel).await.unwrap_err();
        match error {
            Error::AllSourcesFailed { attempts } => {
                assert_eq!(attempts.len(), 2);
                assert_eq!(attempts[0].0, "/nonexistent/a.csv");
                assert_eq!(attempts[1].0, "/nonexistent/b.csv");
            }
            other => panic!("expected AllSourcesFailed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn cancelled_fetch_is_interrupted() {
        let fetcher = DatasetFetcher::with_sources(
            vec![DatasetSource::Bundled(PathBuf::from("/nonexistent/a.csv"))],
            None,
        )
        .unwrap();

        let cancel = CancellationToken::new();
        cancel.cancel();
        let error = fetcher.fetch(&cancel).await.unwrap_err();
        assert!(matches!(error, Error::Interrupted { .. }));
    }
}
