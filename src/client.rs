use anyhow::{bail, Context, Result};
use reqwest::Client;

use crate::config::ApiConfig;
use crate::models::{HealthResponse, JobPosting, PredictResponse, Prediction};

/// Minimum description length accepted by the backend; checked locally so
/// the common mistake doesn't cost a round trip.
pub const MIN_DESCRIPTION_LEN: usize = 25;

/// Client for the remote fake-job classification service.
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(ApiClient {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Submit a posting for classification. The URL field is deliberately
    /// not sent; it is evaluated locally by [`crate::urlcheck`].
    pub async fn predict(&self, posting: &JobPosting) -> Result<Prediction> {
        let url = format!("{}/predict", self.base_url);

        let response = self
            .client
            .post(&url)
            .header("User-Agent", concat!("jobscan/", env!("CARGO_PKG_VERSION")))
            .json(posting)
            .send()
            .await
            .context("Classification service not responding")?;

        let status = response.status();
        let body: PredictResponse = match response.json().await {
            Ok(body) => body,
            // The backend wraps its own errors in a JSON body even on 4xx/5xx;
            // anything unparseable means we reached something else entirely.
            Err(_) => bail!("Classification service returned an unexpected response ({})", status),
        };

        into_prediction(body)
    }

    /// Query backend health and model readiness.
    pub async fn health(&self) -> Result<HealthResponse> {
        let url = format!("{}/health", self.base_url);

        let response = self
            .client
            .get(&url)
            .header("User-Agent", concat!("jobscan/", env!("CARGO_PKG_VERSION")))
            .send()
            .await
            .context("Classification service not responding")?;

        if !response.status().is_success() {
            bail!("Health check failed with status {}", response.status());
        }

        response
            .json()
            .await
            .context("Failed to parse health response")
    }
}

/// Reject postings the backend would bounce: all three text fields are
/// required and the description must carry enough signal to classify.
pub fn validate(posting: &JobPosting) -> Result<()> {
    if posting.title.trim().is_empty()
        || posting.company.trim().is_empty()
        || posting.description.trim().is_empty()
    {
        bail!("Title, Company and Description are required.");
    }
    if posting.description.trim().len() < MIN_DESCRIPTION_LEN {
        bail!(
            "Job description too short. Please enter at least {} characters.",
            MIN_DESCRIPTION_LEN
        );
    }
    Ok(())
}

fn into_prediction(body: PredictResponse) -> Result<Prediction> {
    if !body.success {
        let message = body
            .error
            .unwrap_or_else(|| "Classification failed".to_string());
        match body.details {
            Some(details) => bail!("{} ({})", message, details),
            None => bail!("{}", message),
        }
    }

    Ok(Prediction {
        model_version: body
            .model_version
            .context("Response missing model_version")?,
        result: body.result.context("Response missing result")?,
        model_result: body.model_result.context("Response missing model_result")?,
        confidence: body.confidence.context("Response missing confidence")?,
        red_flags: body.red_flags,
        risk_level: body.risk_level.context("Response missing risk_level")?,
        warning: body.warning,
    })
}
