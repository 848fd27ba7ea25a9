//! Bandwidth measurement against Cloudflare's public speed test endpoints.
//!
//! Ping is the mean TCP handshake time to the endpoint, download and upload
//! are payload bits over wall-clock time for a single transfer each.

use std::time::{Duration, Instant};

use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::network::tcp;
use crate::ports::{Bandwidth, BandwidthMeter};

const SPEED_HOST: &str = "speed.cloudflare.com";
const DOWNLOAD_BYTES: usize = 25_000_000;
const UPLOAD_BYTES: usize = 10_000_000;
const PING_RUNS: usize = 3;
const PING_TIMEOUT: Duration = Duration::from_secs(2);
const TRANSFER_TIMEOUT: Duration = Duration::from_secs(60);

pub struct HttpSpeedTest {
    client: Client,
    download_bytes: usize,
    upload_bytes: usize,
}

impl HttpSpeedTest {
    pub fn new() -> anyhow::Result<Self> {
        let client: Client = Client::builder().timeout(TRANSFER_TIMEOUT).build()?;
        Ok(Self {
            client,
            download_bytes: DOWNLOAD_BYTES,
            upload_bytes: UPLOAD_BYTES,
        })
    }

    async fn ping(&self) -> anyhow::Result<f64> {
        let samples = tcp::sample_latency(SPEED_HOST, 443, PING_RUNS, PING_TIMEOUT).await?;
        let avg: Duration = tcp::average(&samples)
            .with_context(|| format!("{SPEED_HOST} did not answer any handshake"))?;
        Ok(avg.as_secs_f64() * 1_000.0)
    }

    async fn download(&self) -> anyhow::Result<f64> {
        let url: String = format!("https://{SPEED_HOST}/__down?bytes={}", self.download_bytes);
        let started: Instant = Instant::now();
        let body = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;
        let elapsed: Duration = started.elapsed();
        debug!("downloaded {} bytes in {elapsed:?}", body.len());
        Ok(bits_per_second(body.len(), elapsed))
    }

    async fn upload(&self) -> anyhow::Result<f64> {
        let url: String = format!("https://{SPEED_HOST}/__up");
        let payload: Vec<u8> = vec![0u8; self.upload_bytes];
        let started: Instant = Instant::now();
        self.client
            .post(url)
            .body(payload)
            .send()
            .await?
            .error_for_status()?;
        let elapsed: Duration = started.elapsed();
        debug!("uploaded {} bytes in {elapsed:?}", self.upload_bytes);
        Ok(bits_per_second(self.upload_bytes, elapsed))
    }
}

#[async_trait]
impl BandwidthMeter for HttpSpeedTest {
    async fn measure(&self) -> anyhow::Result<Bandwidth> {
        let ping_ms: f64 = self.ping().await.context("ping")?;
        let download_bps: f64 = self.download().await.context("download")?;
        let upload_bps: f64 = self.upload().await.context("upload")?;

        Ok(Bandwidth {
            download_bps,
            upload_bps,
            ping_ms,
        })
    }
}

pub fn bits_per_second(bytes: usize, elapsed: Duration) -> f64 {
    if elapsed.is_zero() {
        return 0.0;
    }
    (bytes as f64 * 8.0) / elapsed.as_secs_f64()
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
