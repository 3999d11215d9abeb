use reqwest::Client;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct AuditRequest {
    pub target: String,
    /// "address" or "transaction"; the relay falls back to the other kind
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AuditResponse {
    pub status: String,
    pub risk_score: u8,
    pub reason: String,
    /// "live" or "demo"
    pub mode: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulateRequest {
    pub sender: String,
    pub function_id: String,
    pub type_args: Vec<String>,
    pub args: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct SimulateResponse {
    pub outcome: String,
    pub status: String,
    pub gas_used: Option<u64>,
    #[serde(default)]
    pub changes: Vec<String>,
    #[serde(default)]
    pub warnings: Vec<String>,
    pub mode: String,
}

pub struct SentinelClient {
    client: Client,
    relay_url: String,
}

impl SentinelClient {
    pub fn new(relay_url: &str) -> Self {
        Self {
            client: Client::new(),
            relay_url: relay_url.to_string(),
        }
    }

    /// Fetch the relay's status document.
    pub async fn status(&self) -> Result<serde_json::Value, Box<dyn std::error::Error>> {
        let resp = self
            .client
            .get(format!("{}/", self.relay_url))
            .send()
            .await?;
        Ok(resp.json().await?)
    }

    /// Audit an address or transaction hash.
    pub async fn audit(&self, req: AuditRequest) -> Result<AuditResponse, Box<dyn std::error::Error>> {
        let resp = self
            .client
            .post(format!("{}/api/audit", self.relay_url))
            .json(&req)
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;

        if !status.is_success() {
            return Err(format!("relay returned error status {}: {}", status, text).into());
        }

        match serde_json::from_str::<AuditResponse>(&text) {
            Ok(audit_resp) => Ok(audit_resp),
            Err(e) => Err(e.into()),
        }
    }

    /// Request an outcome prediction for an entry function call.
    pub async fn simulate(
        &self,
        req: SimulateRequest,
    ) -> Result<SimulateResponse, Box<dyn std::error::Error>> {
        let resp = self
            .client
            .post(format!("{}/api/simulate", self.relay_url))
            .json(&req)
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;

        if !status.is_success() {
            return Err(format!("relay returned error status {}: {}", status, text).into());
        }

        match serde_json::from_str::<SimulateResponse>(&text) {
            Ok(sim_resp) => Ok(sim_resp),
            Err(e) => Err(e.into()),
        }
    }
}
