use anyhow::bail;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::ports::{GeoLocation, GeoLocator};

const PUBLIC_IP_URL: &str = "https://api.ipify.org";
const GEO_URL: &str = "http://ip-api.com/json";
const LOOKUP_TIMEOUT: Duration = Duration::from_secs(10);
const MISSING: &str = "unknown";

/// Response of `ip-api.com/json/<ip>`. Every field is optional because a
/// failed lookup only carries `status` and `message`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IpApiResponse {
    pub status: Option<String>,
    pub message: Option<String>,
    pub country: Option<String>,
    pub region_name: Option<String>,
    pub city: Option<String>,
    pub zip: Option<String>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub timezone: Option<String>,
    pub isp: Option<String>,
}

impl IpApiResponse {
    /// Display labels and values, in report order.
    pub fn fields(&self) -> Vec<(String, String)> {
        let text = |v: &Option<String>| v.clone().unwrap_or_else(|| MISSING.to_string());
        let number = |v: &Option<f64>| v.map(|n| n.to_string()).unwrap_or_else(|| MISSING.to_string());

        vec![
            ("country", text(&self.country)),
            ("regionName", text(&self.region_name)),
            ("city", text(&self.city)),
            ("zip", text(&self.zip)),
            ("lat", number(&self.lat)),
            ("lon", number(&self.lon)),
            ("timezone", text(&self.timezone)),
            ("isp", text(&self.isp)),
        ]
        .into_iter()
        .map(|(key, value)| (title_case(key), value))
        .collect()
    }
}

/// `regionName` → `Regionname`, matching how the keys have always been
/// labelled in the report.
pub fn title_case(key: &str) -> String {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Public IP from ipify, then geo data for it from ip-api.
pub struct IpApiLocator {
    client: Client,
}

impl IpApiLocator {
    pub fn new() -> anyhow::Result<Self> {
        let client: Client = Client::builder().timeout(LOOKUP_TIMEOUT).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl GeoLocator for IpApiLocator {
    async fn locate(&self) -> anyhow::Result<GeoLocation> {
        let public_ip: String = self
            .client
            .get(PUBLIC_IP_URL)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?
            .trim()
            .to_string();

        let geo: IpApiResponse = self
            .client
            .get(format!("{GEO_URL}/{public_ip}"))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if geo.status.as_deref() == Some("fail") {
            bail!(
                "ip-api rejected {public_ip}: {}",
                geo.message.as_deref().unwrap_or("no reason given")
            );
        }

        Ok(GeoLocation {
            public_ip,
            fields: geo.fields(),
        })
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
