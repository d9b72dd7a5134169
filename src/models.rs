use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::urlcheck::{UrlStatus, UrlVerdict};

/// A job posting as entered by the user. The URL is optional and is only
/// ever evaluated locally — the classification service never sees it.
#[derive(Debug, Clone, Serialize)]
pub struct JobPosting {
    pub title: String,
    pub company: String,
    pub description: String,
    #[serde(skip_serializing)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Classification {
    #[serde(rename = "FAKE")]
    Fake,
    #[serde(rename = "REAL")]
    Real,
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Classification::Fake => write!(f, "FAKE"),
            Classification::Real => write!(f, "REAL"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "LOW"),
            RiskLevel::Medium => write!(f, "MEDIUM"),
            RiskLevel::High => write!(f, "HIGH"),
        }
    }
}

/// Raw wire shape of the `/predict` endpoint. The backend returns either a
/// populated success body or `success = false` with an error message, so
/// everything beyond `success` is optional here.
#[derive(Debug, Clone, Deserialize)]
pub struct PredictResponse {
    pub success: bool,
    #[serde(default)]
    pub model_version: Option<String>,
    #[serde(default)]
    pub result: Option<Classification>,
    #[serde(default)]
    pub model_result: Option<Classification>,
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub red_flags: Vec<String>,
    #[serde(default)]
    pub risk_level: Option<RiskLevel>,
    #[serde(default)]
    pub warning: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
}

/// A successful classification with all fields present.
#[derive(Debug, Clone)]
pub struct Prediction {
    pub model_version: String,
    pub result: Classification,
    pub model_result: Classification,
    pub confidence: f64,
    pub red_flags: Vec<String>,
    pub risk_level: RiskLevel,
    pub warning: Option<String>,
}

/// Wire shape of the `/health` endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub model_version: Option<String>,
    #[serde(default)]
    pub model_loaded: bool,
    #[serde(default)]
    pub vectorizer_loaded: bool,
}

/// One stored evaluation: the posting, the remote classification, and the
/// local URL verdict, stamped at submission time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: i64,
    pub title: String,
    pub company: String,
    pub description: String,
    pub url: Option<String>,
    pub result: Classification,
    pub model_result: Classification,
    #[serde(default)]
    pub model_version: String,
    pub confidence: f64,
    pub red_flags: Vec<String>,
    pub risk_level: RiskLevel,
    pub warning: Option<String>,
    pub url_status: Option<UrlStatus>,
    #[serde(default)]
    pub url_reasons: Vec<String>,
    pub time: String,
}

impl Record {
    pub fn new(posting: &JobPosting, prediction: Prediction, verdict: Option<UrlVerdict>) -> Self {
        let now = Local::now();
        Record {
            id: now.timestamp_millis(),
            title: posting.title.clone(),
            company: posting.company.clone(),
            description: posting.description.clone(),
            url: posting.url.clone(),
            result: prediction.result,
            model_result: prediction.model_result,
            model_version: prediction.model_version,
            confidence: prediction.confidence,
            red_flags: prediction.red_flags,
            risk_level: prediction.risk_level,
            warning: prediction.warning,
            url_status: verdict.as_ref().map(|v| v.status.clone()),
            url_reasons: verdict.map(|v| v.reasons).unwrap_or_default(),
            time: now.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }

    /// Status label as stored by the original record format; an absent
    /// verdict is rendered as `NOT_PROVIDED`, not as safe.
    pub fn url_status_label(&self) -> &'static str {
        match self.url_status {
            Some(UrlStatus::Safe) => "SAFE",
            Some(UrlStatus::Suspicious) => "SUSPICIOUS",
            None => "NOT_PROVIDED",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::urlcheck;

    fn posting() -> JobPosting {
        JobPosting {
            title: "Data Entry Operator".to_string(),
            company: "Global Solutions".to_string(),
            description: "Earn from home, flexible hours, no experience needed.".to_string(),
            url: Some("http://free-money.xyz".to_string()),
        }
    }

    fn prediction() -> Prediction {
        Prediction {
            model_version: "v1.0".to_string(),
            result: Classification::Fake,
            model_result: Classification::Fake,
            confidence: 91.5,
            red_flags: vec!["work from home".to_string()],
            risk_level: RiskLevel::High,
            warning: None,
        }
    }

    #[test]
    fn test_deserialize_success_response() {
        let body = r#"{
            "success": true,
            "model_version": "v1.0",
            "prediction": 1,
            "result": "FAKE",
            "model_result": "FAKE",
            "confidence": 87.23,
            "red_flags": ["no interview", "telegram"],
            "risk_level": "HIGH",
            "warning": "Multiple scam indicators found. Classified as FAKE for safety."
        }"#;
        let resp: PredictResponse = serde_json::from_str(body).unwrap();
        assert!(resp.success);
        assert_eq!(resp.model_version.as_deref(), Some("v1.0"));
        assert_eq!(resp.result, Some(Classification::Fake));
        assert_eq!(resp.risk_level, Some(RiskLevel::High));
        assert_eq!(resp.confidence, Some(87.23));
        assert_eq!(resp.red_flags.len(), 2);
        assert!(resp.warning.is_some());
    }

    #[test]
    fn test_deserialize_error_response() {
        let body = r#"{"success": false, "error": "Job description too short. Please enter at least 25 characters."}"#;
        let resp: PredictResponse = serde_json::from_str(body).unwrap();
        assert!(!resp.success);
        assert!(resp.error.unwrap().contains("too short"));
        assert!(resp.result.is_none());
        assert!(resp.red_flags.is_empty());
    }

    #[test]
    fn test_record_merges_url_verdict() {
        let verdict = urlcheck::evaluate("http://free-money.xyz");
        let record = Record::new(&posting(), prediction(), verdict);
        assert_eq!(record.url_status_label(), "SUSPICIOUS");
        assert_eq!(record.url_reasons.len(), 4);
    }

    #[test]
    fn test_record_without_url_is_not_provided() {
        let mut p = posting();
        p.url = None;
        let record = Record::new(&p, prediction(), None);
        assert_eq!(record.url_status_label(), "NOT_PROVIDED");
        assert!(record.url_reasons.is_empty());
    }

    #[test]
    fn test_record_json_round_trip() {
        let record = Record::new(
            &posting(),
            prediction(),
            urlcheck::evaluate("http://free-money.xyz"),
        );
        let json = serde_json::to_string(&record).unwrap();
        let back: Record = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
