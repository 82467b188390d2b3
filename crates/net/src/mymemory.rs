//! MyMemory request/response codec.
//!
//! Shared by the native client and the wasm `fetch` path, so both build the
//! same URL and judge responses the same way.

use serde::Deserialize;
use url::Url;

use crate::Translation;
use crate::error::TranslateError;

pub const MYMEMORY_ENDPOINT: &str = "https://api.mymemory.translated.net/get";
/// Source and target language, pipe separated.
pub const LANGPAIR: &str = "zh|en";

pub fn request_url(endpoint: &str, text: &str) -> Result<Url, TranslateError> {
    Ok(Url::parse_with_params(
        endpoint,
        &[("q", text), ("langpair", LANGPAIR)],
    )?)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Status {
    Code(u16),
    Text(String),
}

impl Status {
    fn code(&self) -> Option<u16> {
        match self {
            Status::Code(c) => Some(*c),
            Status::Text(s) => s.trim().parse().ok(),
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Envelope {
    response_status: Option<Status>,
    response_data: Option<ResponseData>,
    response_details: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResponseData {
    translated_text: Option<String>,
}

/// Judge a response body. Success needs `responseStatus` 200 and a
/// non-empty `responseData.translatedText`.
pub fn parse_response(body: &str) -> Result<Translation, TranslateError> {
    let envelope: Envelope = serde_json::from_str(body)?;

    let status = envelope.response_status.as_ref().and_then(Status::code);
    match status {
        Some(200) => {}
        Some(status) => {
            return Err(TranslateError::Status {
                status,
                details: envelope.response_details.unwrap_or_default(),
            });
        }
        None => return Err(TranslateError::Malformed("missing responseStatus".into())),
    }

    envelope
        .response_data
        .and_then(|d| d.translated_text)
        .filter(|t| !t.trim().is_empty())
        .map(|translated_text| Translation { translated_text })
        .ok_or(TranslateError::NoResult)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_query_with_langpair() {
        let url = request_url(MYMEMORY_ENDPOINT, "你好 世界").expect("valid");
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            vec![
                ("q".to_owned(), "你好 世界".to_owned()),
                ("langpair".to_owned(), "zh|en".to_owned()),
            ]
        );
        assert_eq!(url.host_str(), Some("api.mymemory.translated.net"));
        assert_eq!(url.path(), "/get");
    }

    #[test]
    fn bad_endpoint_is_reported() {
        assert!(matches!(
            request_url("not a url", "x"),
            Err(TranslateError::InvalidEndpoint(_))
        ));
    }

    #[test]
    fn accepts_successful_response() {
        let body = r#"{"responseData":{"translatedText":"Hello","match":1},"responseStatus":200}"#;
        assert_eq!(
            parse_response(body),
            Ok(Translation {
                translated_text: "Hello".into()
            })
        );
    }

    #[test]
    fn string_status_is_understood() {
        let body = r#"{"responseData":{"translatedText":"Hi"},"responseStatus":"200"}"#;
        assert!(parse_response(body).is_ok());

        let body = r#"{"responseData":{"translatedText":"QUERY LENGTH LIMIT EXCEEDED"},"responseStatus":"403","responseDetails":"QUERY LENGTH LIMIT EXCEEDED"}"#;
        assert_eq!(
            parse_response(body),
            Err(TranslateError::Status {
                status: 403,
                details: "QUERY LENGTH LIMIT EXCEEDED".into()
            })
        );
    }

    #[test]
    fn empty_translation_is_no_result() {
        let body = r#"{"responseData":{"translatedText":""},"responseStatus":200}"#;
        assert_eq!(parse_response(body), Err(TranslateError::NoResult));
        let body = r#"{"responseData":null,"responseStatus":200}"#;
        assert_eq!(parse_response(body), Err(TranslateError::NoResult));
    }

    #[test]
    fn non_json_is_malformed() {
        assert!(matches!(
            parse_response("<html>busy</html>"),
            Err(TranslateError::Malformed(_))
        ));
        assert!(matches!(
            parse_response(r#"{"responseData":{"translatedText":"x"}}"#),
            Err(TranslateError::Malformed(_))
        ));
    }
}
