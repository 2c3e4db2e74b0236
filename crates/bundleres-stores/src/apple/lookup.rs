//! iTunes lookup API payload

use serde::Deserialize;

use crate::error::{ResolveError, Result};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LookupPayload {
    #[serde(default)]
    result_count: u32,
    #[serde(default)]
    results: Vec<LookupResult>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LookupResult {
    #[serde(default)]
    track_name: String,
    #[serde(default)]
    seller_name: String,
}

/// Name and seller of the first lookup result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupListing {
    pub name: String,
    pub publisher: String,
}

/// Parse a lookup response body.
///
/// An empty result set is [`ResolveError::NotFound`]. The listing URL in the
/// payload is ignored; callers build the canonical URL themselves.
pub fn parse_lookup(body: &str) -> Result<LookupListing> {
    let payload: LookupPayload = serde_json::from_str(body)?;
    let first = match payload.results.into_iter().next() {
        Some(first) if payload.result_count > 0 => first,
        _ => return Err(ResolveError::NotFound("no lookup results".to_string())),
    };
    Ok(LookupListing {
        name: first.track_name,
        publisher: first.seller_name,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_first_result() {
        let body = r#"{
            "resultCount": 1,
            "results": [{
                "trackName": "Example App",
                "sellerName": "Example Inc.",
                "trackViewUrl": "https://apps.apple.com/us/app/example/id123?uo=4"
            }]
        }"#;
        let listing = parse_lookup(body).unwrap();
        assert_eq!(listing.name, "Example App");
        assert_eq!(listing.publisher, "Example Inc.");
    }

    #[test]
    fn test_parse_empty_is_not_found() {
        let err = parse_lookup(r#"{"resultCount":0,"results":[]}"#).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_parse_count_without_results_is_not_found() {
        let err = parse_lookup(r#"{"resultCount":1,"results":[]}"#).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_parse_malformed_json() {
        let err = parse_lookup("<html>oops</html>").unwrap_err();
        assert!(matches!(err, ResolveError::Json(_)));
    }
}
