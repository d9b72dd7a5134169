use serde::{Deserialize, Serialize};
use url::Url;

/// Domain suffixes frequently seen in throwaway scam registrations.
/// Matched as substrings, not parsed TLDs — a URL merely containing the
/// sequence anywhere counts.
pub const SUSPICIOUS_TLDS: &[&str] = &[".xyz", ".top", ".site", ".online", ".loan", ".buzz"];

/// Bait words common in fake job URLs. Substring match, not whole-word:
/// "join" matches inside "disjoint".
pub const SCAM_KEYWORDS: &[&str] = &["free", "money", "earn", "win", "bonus", "instant", "join"];

/// Digit count at or above which a URL is flagged as numeric-heavy.
const DIGIT_LIMIT: usize = 6;

/// Total reason count at or above which the verdict flips to suspicious.
const SUSPICIOUS_THRESHOLD: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UrlStatus {
    Safe,
    Suspicious,
}

impl std::fmt::Display for UrlStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UrlStatus::Safe => write!(f, "SAFE"),
            UrlStatus::Suspicious => write!(f, "SUSPICIOUS"),
        }
    }
}

/// Outcome of the URL heuristic: a status plus one human-readable reason
/// per triggered rule, in check order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlVerdict {
    pub status: UrlStatus,
    pub reasons: Vec<String>,
}

/// Evaluate a candidate URL against the reputation heuristics.
///
/// Returns `None` for empty or whitespace-only input — "not provided" is
/// distinct from a [`UrlStatus::Safe`] verdict. Never fails: a string that
/// does not parse as a URL is reported as a reason, not an error.
///
/// Reasons are accumulated in a fixed order (suspicious TLDs, digit
/// density, scam keywords, insecure scheme, parse failure) so the output
/// is deterministic for a given input.
pub fn evaluate(url: &str) -> Option<UrlVerdict> {
    let normalized = url.trim().to_lowercase();
    if normalized.is_empty() {
        return None;
    }

    let mut reasons = Vec::new();

    for tld in SUSPICIOUS_TLDS {
        if normalized.contains(tld) {
            reasons.push(format!("Suspicious domain extension ({})", tld));
        }
    }

    let digits = normalized.chars().filter(|c| c.is_ascii_digit()).count();
    if digits >= DIGIT_LIMIT {
        reasons.push("Domain contains too many numbers".to_string());
    }

    for word in SCAM_KEYWORDS {
        if normalized.contains(word) {
            reasons.push(format!("Contains suspicious keyword: \"{}\"", word));
        }
    }

    if normalized.starts_with("http://") {
        reasons.push("Not using HTTPS (http://)".to_string());
    }

    if Url::parse(&normalized).is_err() {
        reasons.push("URL format looks invalid".to_string());
    }

    let status = if reasons.len() >= SUSPICIOUS_THRESHOLD {
        UrlStatus::Suspicious
    } else {
        UrlStatus::Safe
    };

    Some(UrlVerdict { status, reasons })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_is_absent() {
        assert_eq!(evaluate(""), None);
        assert_eq!(evaluate("   "), None);
        assert_eq!(evaluate("\t\n"), None);
    }

    #[test]
    fn test_clean_https_url_is_safe() {
        let verdict = evaluate("https://company.com/careers").unwrap();
        assert_eq!(verdict.status, UrlStatus::Safe);
        assert!(verdict.reasons.is_empty());
    }

    #[test]
    fn test_scam_url_accumulates_reasons() {
        let verdict = evaluate("http://free-money.xyz").unwrap();
        assert_eq!(verdict.status, UrlStatus::Suspicious);
        assert_eq!(
            verdict.reasons,
            vec![
                "Suspicious domain extension (.xyz)".to_string(),
                "Contains suspicious keyword: \"free\"".to_string(),
                "Contains suspicious keyword: \"money\"".to_string(),
                "Not using HTTPS (http://)".to_string(),
            ]
        );
    }

    #[test]
    fn test_digit_density_alone_stays_safe() {
        let verdict = evaluate("https://jobs123456.com").unwrap();
        assert_eq!(verdict.status, UrlStatus::Safe);
        assert_eq!(
            verdict.reasons,
            vec!["Domain contains too many numbers".to_string()]
        );
    }

    #[test]
    fn test_digit_density_plus_tld_is_suspicious() {
        let verdict = evaluate("https://jobs123456.xyz").unwrap();
        assert_eq!(verdict.status, UrlStatus::Suspicious);
        assert_eq!(verdict.reasons.len(), 2);
    }

    #[test]
    fn test_five_digits_not_flagged() {
        let verdict = evaluate("https://jobs12345.com").unwrap();
        assert!(verdict.reasons.is_empty());
    }

    #[test]
    fn test_malformed_url_alone_stays_safe() {
        let verdict = evaluate("not a url").unwrap();
        assert_eq!(verdict.status, UrlStatus::Safe);
        assert_eq!(verdict.reasons, vec!["URL format looks invalid".to_string()]);
    }

    #[test]
    fn test_https_scheme_not_flagged() {
        let verdict = evaluate("https://example.com").unwrap();
        assert!(!verdict
            .reasons
            .iter()
            .any(|r| r.contains("HTTPS")));
    }

    #[test]
    fn test_keyword_is_substring_match() {
        // "join" inside "disjoint" still matches — deliberate simplification
        let verdict = evaluate("https://disjoint-sets.com").unwrap();
        assert_eq!(
            verdict.reasons,
            vec!["Contains suspicious keyword: \"join\"".to_string()]
        );
    }

    #[test]
    fn test_two_keywords_flip_verdict() {
        // Threshold counts reasons, not rule categories
        let verdict = evaluate("https://earn-bonus.com").unwrap();
        assert_eq!(verdict.status, UrlStatus::Suspicious);
        assert_eq!(verdict.reasons.len(), 2);
    }

    #[test]
    fn test_normalization_trims_and_lowercases() {
        let verdict = evaluate("  HTTP://FREE-MONEY.XYZ  ").unwrap();
        assert_eq!(verdict, evaluate("http://free-money.xyz").unwrap());
    }

    #[test]
    fn test_idempotent() {
        let a = evaluate("http://win-instant-cash7654321.top");
        let b = evaluate("http://win-instant-cash7654321.top");
        assert_eq!(a, b);
    }

    #[test]
    fn test_reason_order_is_fixed() {
        // Fires every rule: TLDs first, then digits, keywords, scheme, parse.
        // No scheme at all, so parsing fails too.
        let verdict = evaluate("free-money123456.xyz").unwrap();
        assert_eq!(
            verdict.reasons,
            vec![
                "Suspicious domain extension (.xyz)".to_string(),
                "Domain contains too many numbers".to_string(),
                "Contains suspicious keyword: \"free\"".to_string(),
                "Contains suspicious keyword: \"money\"".to_string(),
                "URL format looks invalid".to_string(),
            ]
        );
        assert_eq!(verdict.status, UrlStatus::Suspicious);
    }
}
