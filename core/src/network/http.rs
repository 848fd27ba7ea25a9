//! HTTP status probe.
//!
//! The classification of a status code is a pure function of the code, so
//! it can be checked without any network access. The reqwest-backed
//! [`HttpStatusClient`] follows redirects and, when
//! [`ProbeSettings::accept_invalid_certs`] is set, skips certificate
//! verification so self-signed internal endpoints still report a status.

use std::time::Duration;

use async_trait::async_trait;
use netcheck_common::config::ProbeSettings;
use netcheck_common::error::ProbeError;
use netcheck_common::network::outcome::ProbeOutcome;
use netcheck_common::run::Severity;
use reqwest::{Client, redirect};
use tracing::debug;

use crate::ports::StatusFetcher;

/// Status reported when no HTTP response was received at all.
pub const NO_RESPONSE: &str = "000";

/// `000` and unknown codes fail. 2xx, 3xx, 401 and 403 mean the endpoint
/// answered with the expected auth or redirect semantics. 404 means the
/// endpoint is reachable but the resource is absent.
pub fn classify_status(status: &str) -> Severity {
    match status {
        NO_RESPONSE => Severity::Fail,
        "401" | "403" => Severity::Ok,
        "404" => Severity::Info,
        s if s.starts_with('2') || s.starts_with('3') => Severity::Ok,
        _ => Severity::Fail,
    }
}

pub async fn probe_url(fetcher: &dyn StatusFetcher, url: &str) -> ProbeOutcome {
    match fetcher.fetch_status(url).await {
        Ok(status) => {
            let severity: Severity = classify_status(&status);
            ProbeOutcome::http_status(url, status, severity)
        }
        Err(e) => ProbeOutcome::http_error(url, e),
    }
}

pub struct HttpStatusClient {
    client: Client,
    timeout: Duration,
}

impl HttpStatusClient {
    pub fn new(settings: &ProbeSettings) -> anyhow::Result<Self> {
        let client: Client = Client::builder()
            .danger_accept_invalid_certs(settings.accept_invalid_certs)
            .redirect(last_hop_policy(settings.http_max_redirects))
            .user_agent(settings.user_agent.clone())
            .timeout(settings.http_timeout)
            .build()?;

        Ok(Self {
            client,
            timeout: settings.http_timeout,
        })
    }
}

/// Follows up to `max` redirects, then hands back the last 3xx response
/// instead of failing the request.
fn last_hop_policy(max: usize) -> redirect::Policy {
    redirect::Policy::custom(move |attempt| {
        if attempt.previous().len() > max {
            attempt.stop()
        } else {
            attempt.follow()
        }
    })
}

#[async_trait]
impl StatusFetcher for HttpStatusClient {
    async fn fetch_status(&self, url: &str) -> Result<String, ProbeError> {
        match self.client.get(url).send().await {
            Ok(response) => Ok(format!("{:03}", response.status().as_u16())),
            Err(e) if e.is_timeout() => Err(ProbeError::HttpTimeout {
                secs: self.timeout.as_secs(),
            }),
            Err(e) if e.is_builder() => Err(ProbeError::HttpTransportError {
                reason: e.to_string(),
            }),
            Err(e) => {
                debug!("{url} produced no response: {e}");
                Ok(NO_RESPONSE.to_string())
            }
        }
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    struct FixedStatus(Result<String, ProbeError>);

    #[async_trait]
    impl StatusFetcher for FixedStatus {
        async fn fetch_status(&self, _url: &str) -> Result<String, ProbeError> {
            self.0.clone()
        }
    }

    #[test]
    fn classify_reference_codes() {
        let cases = [
            ("000", Severity::Fail),
            ("200", Severity::Ok),
            ("204", Severity::Ok),
            ("301", Severity::Ok),
            ("302", Severity::Ok),
            ("401", Severity::Ok),
            ("403", Severity::Ok),
            ("404", Severity::Info),
            ("400", Severity::Fail),
            ("500", Severity::Fail),
            ("503", Severity::Fail),
            ("", Severity::Fail),
        ];
        for (status, expected) in cases {
            assert_eq!(classify_status(status), expected, "status {status:?}");
        }
    }

    #[tokio::test]
    async fn probe_url_classifies_status() {
        let fetcher = FixedStatus(Ok("404".into()));
        let outcome = probe_url(&fetcher, "https://intranet/missing").await;
        assert_eq!(outcome.severity, Severity::Info);
        assert_eq!(outcome.status.as_deref(), Some("404"));
    }

    #[tokio::test]
    async fn probe_url_keeps_timeout_distinct() {
        let fetcher = FixedStatus(Err(ProbeError::HttpTimeout { secs: 10 }));
        let outcome = probe_url(&fetcher, "https://slow").await;
        assert_eq!(outcome.severity, Severity::Fail);
        assert_eq!(outcome.to_entry().text(), "https://slow TIMEOUT");
    }

    #[test]
    fn invalid_certificates_are_accepted_by_default() {
        assert!(ProbeSettings::default().accept_invalid_certs);
        assert!(HttpStatusClient::new(&ProbeSettings::default()).is_ok());
    }

    #[tokio::test]
    async fn client_reports_000_when_nothing_listens() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let client = HttpStatusClient::new(&ProbeSettings::default()).unwrap();
        let status = client.fetch_status(&format!("http://127.0.0.1:{port}/")).await;
        assert_eq!(status, Ok(NO_RESPONSE.to_string()));
    }

    #[tokio::test]
    async fn client_reads_status_from_local_server() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();

        tokio::spawn(async move {
            if let Ok((mut socket, _)) = listener.accept().await {
                let mut buf = [0u8; 1024];
                let _ = socket.read(&mut buf).await;
                let _ = socket
                    .write_all(b"HTTP/1.1 403 Forbidden\r\ncontent-length: 0\r\nconnection: close\r\n\r\n")
                    .await;
            }
        });

        let client = HttpStatusClient::new(&ProbeSettings::default()).unwrap();
        let status = client.fetch_status(&format!("http://127.0.0.1:{port}/")).await;
        assert_eq!(status, Ok("403".to_string()));
        assert_eq!(classify_status("403"), Severity::Ok);
    }

    /// Answers every request on `listener` with `response` until the test ends.
    fn serve_forever(listener: TcpListener, response: &'static [u8]) {
        tokio::spawn(async move {
            while let Ok((mut socket, _)) = listener.accept().await {
                let mut buf = [0u8; 1024];
                let _ = socket.read(&mut buf).await;
                let _ = socket.write_all(response).await;
            }
        });
    }

    #[tokio::test]
    async fn endless_redirect_reports_last_status() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        serve_forever(
            listener,
            b"HTTP/1.1 302 Found\r\nlocation: /\r\ncontent-length: 0\r\nconnection: close\r\n\r\n",
        );

        let client = HttpStatusClient::new(&ProbeSettings::default()).unwrap();
        let url = format!("http://127.0.0.1:{port}/");
        let status = client.fetch_status(&url).await;
        assert_eq!(status, Ok("302".to_string()));

        let outcome = probe_url(&client, &url).await;
        assert_eq!(outcome.severity, Severity::Ok);
        assert_eq!(outcome.to_entry().text(), format!("{url} CONNECTION OK (Status: 302)"));
    }

    #[tokio::test]
    async fn client_times_out_on_silent_server() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();

        tokio::spawn(async move {
            if let Ok((socket, _)) = listener.accept().await {
                tokio::time::sleep(Duration::from_secs(5)).await;
                drop(socket);
            }
        });

        let settings = ProbeSettings {
            http_timeout: Duration::from_millis(200),
            ..ProbeSettings::default()
        };
        let client = HttpStatusClient::new(&settings).unwrap();
        let status = client.fetch_status(&format!("http://127.0.0.1:{port}/")).await;
        assert!(matches!(status, Err(ProbeError::HttpTimeout { .. })), "got {status:?}");
    }
}
