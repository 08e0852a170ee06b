//! Single-file download with retries, and the fallback loop over candidates

use std::fs;
use std::path::Path;

use log::{debug, warn};
use reqwest::Client;

use crate::config::{FetchConfig, RetryPolicy};
use crate::error::{FetchError, Result};
use crate::utils::files::is_present;
use crate::utils::http::{build_client, file_url};

/// What a successful fetch did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    Downloaded { bytes: usize },
    /// The destination already held a non-empty file
    Skipped,
}

/// Result of walking a candidate list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedFile {
    /// Candidate that produced the file
    pub used: String,
    pub outcome: FetchOutcome,
}

pub struct Fetcher {
    client: Client,
    base_url: String,
    retry: RetryPolicy,
}

impl Fetcher {
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let client = build_client(config)?;
        Ok(Self::with_client(client, config))
    }

    pub fn with_client(client: Client, config: &FetchConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.clone(),
            retry: config.retry,
        }
    }

    /// Download `remote_name` into `dest`, unless `dest` is already there.
    ///
    /// Transport and status errors are retried up to the policy's attempt
    /// count with a linear backoff; the last one is returned.
    pub async fn fetch(&self, remote_name: &str, dest: &Path) -> Result<FetchOutcome> {
        if is_present(dest) {
            debug!("{} already present, skipping", dest.display());
            return Ok(FetchOutcome::Skipped);
        }

        let url = file_url(&self.base_url, remote_name);
        let attempts = self.retry.attempts.max(1);
        let mut attempt = 0;

        loop {
            match self.download(&url, dest).await {
                Ok(bytes) => return Ok(FetchOutcome::Downloaded { bytes }),
                Err(e) if e.is_retryable() && attempt + 1 < attempts => {
                    let delay = self.retry.delay_for(attempt);
                    warn!(
                        "attempt {}/{} for {} failed: {} (retrying in {:.1}s)",
                        attempt + 1,
                        attempts,
                        remote_name,
                        e,
                        delay.as_secs_f32()
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Try each candidate in order and stop at the first one that succeeds.
    pub async fn fetch_any<S: AsRef<str>>(
        &self,
        candidates: &[S],
        dest: &Path,
    ) -> Result<FetchedFile> {
        let mut last_error = None;

        for candidate in candidates {
            let name = candidate.as_ref();
            match self.fetch(name, dest).await {
                Ok(outcome) => {
                    return Ok(FetchedFile {
                        used: name.to_string(),
                        outcome,
                    })
                }
                Err(e) => {
                    debug!("candidate {} failed: {}", name, e);
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or(FetchError::NoCandidates))
    }

    /// One GET; the body is fully buffered before anything touches the disk
    async fn download(&self, url: &str, dest: &Path) -> Result<usize> {
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(FetchError::Status {
                status: response.status(),
                url: url.to_string(),
            });
        }

        let bytes = response.bytes().await?;

        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(dest, &bytes)?;

        Ok(bytes.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::http::get_user_agent;
    use std::time::{Duration, Instant};
    use wiremock::matchers::{any, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_fetcher(server: &MockServer, attempts: u32) -> Fetcher {
        let config = FetchConfig {
            base_url: server.uri(),
            retry: RetryPolicy::immediate(attempts),
            ..FetchConfig::default()
        };
        Fetcher::new(&config).unwrap()
    }

    /// Request paths in arrival order with consecutive retries collapsed
    async fn attempted_paths(server: &MockServer) -> Vec<String> {
        let mut paths: Vec<String> = server
            .received_requests()
            .await
            .unwrap()
            .iter()
            .map(|req| req.url.path().to_string())
            .collect();
        paths.dedup();
        paths
    }

    #[tokio::test]
    async fn existing_file_skips_network() {
        let server = MockServer::start().await;
        Mock::given(any())
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"new".to_vec()))
            .expect(0)
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("ace-of-cups.jpg");
        fs::write(&dest, b"old").unwrap();

        let fetcher = test_fetcher(&server, 3);
        let outcome = fetcher.fetch("Cups01.jpg", &dest).await.unwrap();

        assert_eq!(outcome, FetchOutcome::Skipped);
        assert_eq!(fs::read(&dest).unwrap(), b"old");
    }

    #[tokio::test]
    async fn empty_existing_file_is_downloaded_again() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/Cups01.jpg"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"card".to_vec()))
            .expect(1)
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("ace-of-cups.jpg");
        fs::write(&dest, b"").unwrap();

        let fetcher = test_fetcher(&server, 3);
        let outcome = fetcher.fetch("Cups01.jpg", &dest).await.unwrap();

        assert_eq!(outcome, FetchOutcome::Downloaded { bytes: 4 });
        assert_eq!(fs::read(&dest).unwrap(), b"card");
    }

    #[tokio::test]
    async fn creates_missing_destination_directory() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/Pents03.jpg"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"img".to_vec()))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("cards").join("rws").join("three-of-pentacles.jpg");

        let fetcher = test_fetcher(&server, 1);
        fetcher.fetch("Pents03.jpg", &dest).await.unwrap();

        assert_eq!(fs::read(&dest).unwrap(), b"img");
    }

    #[tokio::test]
    async fn spaces_are_percent_encoded() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/RWS%20Tarot%2000%20Fool.jpg"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"fool".to_vec()))
            .expect(1)
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("the-fool.jpg");

        let fetcher = test_fetcher(&server, 1);
        fetcher.fetch("RWS Tarot 00 Fool.jpg", &dest).await.unwrap();

        assert_eq!(fs::read(&dest).unwrap(), b"fool");
    }

    #[tokio::test]
    async fn requests_carry_the_client_identifier() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/Cups02.jpg"))
            .and(header("user-agent", get_user_agent()))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"two".to_vec()))
            .expect(1)
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("two-of-cups.jpg");

        let fetcher = test_fetcher(&server, 1);
        let outcome = fetcher.fetch("Cups02.jpg", &dest).await.unwrap();

        assert_eq!(outcome, FetchOutcome::Downloaded { bytes: 3 });
    }

    #[tokio::test]
    async fn backs_off_between_attempts_but_not_after_the_last() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/Swords07.jpg"))
            .respond_with(ResponseTemplate::new(404))
            .expect(2)
            .mount(&server)
            .await;

        let retry = RetryPolicy {
            attempts: 2,
            base_delay: Duration::from_millis(300),
            step: Duration::from_millis(300),
        };
        let config = FetchConfig {
            base_url: server.uri(),
            retry,
            ..FetchConfig::default()
        };
        let fetcher = Fetcher::new(&config).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("seven-of-swords.jpg");

        let started = Instant::now();
        let err = fetcher.fetch("Swords07.jpg", &dest).await.unwrap_err();
        let elapsed = started.elapsed();

        assert!(matches!(err, FetchError::Status { .. }));
        // one sleep of delay_for(0); a second sleep would add delay_for(1)
        assert!(elapsed >= retry.delay_for(0), "elapsed {:?}", elapsed);
        assert!(
            elapsed < retry.delay_for(0) + retry.delay_for(1),
            "elapsed {:?}",
            elapsed
        );
    }

    #[tokio::test]
    async fn retries_until_budget_is_spent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/Swords05.jpg"))
            .respond_with(ResponseTemplate::new(503))
            .expect(3)
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("five-of-swords.jpg");

        let fetcher = test_fetcher(&server, 3);
        let err = fetcher.fetch("Swords05.jpg", &dest).await.unwrap_err();

        match err {
            FetchError::Status { status, url } => {
                assert_eq!(status.as_u16(), 503);
                assert!(url.ends_with("/Swords05.jpg"));
            }
            other => panic!("unexpected error: {}", other),
        }
        assert!(!dest.exists());
    }

    #[tokio::test]
    async fn recovers_after_transient_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/Wands02.jpg"))
            .respond_with(ResponseTemplate::new(500))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/Wands02.jpg"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"two".to_vec()))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("two-of-wands.jpg");

        let fetcher = test_fetcher(&server, 3);
        let outcome = fetcher.fetch("Wands02.jpg", &dest).await.unwrap();

        assert_eq!(outcome, FetchOutcome::Downloaded { bytes: 3 });
        assert_eq!(server.received_requests().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn fallback_stops_at_first_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/third.jpg"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"3".to_vec()))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("card.jpg");

        let fetcher = test_fetcher(&server, 2);
        let fetched = fetcher
            .fetch_any(&["first.jpg", "second.jpg", "third.jpg", "fourth.jpg"], &dest)
            .await
            .unwrap();

        assert_eq!(fetched.used, "third.jpg");
        assert_eq!(
            attempted_paths(&server).await,
            ["/first.jpg", "/second.jpg", "/third.jpg"]
        );
        // two attempts for each failing candidate, one for the winner
        assert_eq!(server.received_requests().await.unwrap().len(), 5);
    }

    #[tokio::test]
    async fn fallback_returns_last_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/a.jpg"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("card.jpg");

        let fetcher = test_fetcher(&server, 1);
        let err = fetcher
            .fetch_any(&["a.jpg", "b.jpg"], &dest)
            .await
            .unwrap_err();

        match err {
            FetchError::Status { status, url } => {
                assert_eq!(status.as_u16(), 404);
                assert!(url.ends_with("/b.jpg"));
            }
            other => panic!("unexpected error: {}", other),
        }
        assert!(!dest.exists());
    }

    #[tokio::test]
    async fn fallback_with_no_candidates() {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().unwrap();

        let fetcher = test_fetcher(&server, 3);
        let empty: [&str; 0] = [];
        let err = fetcher
            .fetch_any(&empty, &dir.path().join("card.jpg"))
            .await
            .unwrap_err();

        assert!(matches!(err, FetchError::NoCandidates));
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn fallback_reports_first_candidate_when_skipping() {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("card.jpg");
        fs::write(&dest, b"cached").unwrap();

        let fetcher = test_fetcher(&server, 3);
        let fetched = fetcher
            .fetch_any(&["x.jpg", "y.jpg"], &dest)
            .await
            .unwrap();

        assert_eq!(
            fetched,
            FetchedFile {
                used: "x.jpg".to_string(),
                outcome: FetchOutcome::Skipped,
            }
        );
    }
}
