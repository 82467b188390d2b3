use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crate::error::TranslateError;
use crate::mymemory::{MYMEMORY_ENDPOINT, parse_response, request_url};
use crate::settings::{ApiProvider, Settings};
use crate::{Translation, Translator};

const USER_AGENT: &str = "EasyWriter/0.1";

/// Blocking MyMemory client.
pub struct MyMemoryClient {
    agent: ureq::Agent,
    endpoint: String,
}

impl Default for MyMemoryClient {
    fn default() -> Self {
        Self::new()
    }
}

impl MyMemoryClient {
    pub fn new() -> Self {
        Self::with_endpoint(MYMEMORY_ENDPOINT)
    }

    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(10))
            .user_agent(USER_AGENT)
            .build();
        Self {
            agent,
            endpoint: endpoint.into(),
        }
    }
}

impl Translator for MyMemoryClient {
    fn translate(&self, text: &str) -> Result<Translation, TranslateError> {
        let url = request_url(&self.endpoint, text)?;
        let start = Instant::now();

        let body = match self.agent.get(url.as_str()).call() {
            Ok(resp) => resp
                .into_string()
                .map_err(|e| TranslateError::Network(e.to_string()))?,
            Err(ureq::Error::Status(status, resp)) => {
                return Err(TranslateError::Status {
                    status,
                    details: resp.status_text().to_owned(),
                });
            }
            Err(e) => return Err(TranslateError::Network(e.to_string())),
        };

        log::debug!(
            target: "easywriter.net",
            "mymemory answered {} bytes in {}ms",
            body.len(),
            start.elapsed().as_millis()
        );
        parse_response(&body)
    }
}

/// Stands in for providers without a client.
pub struct Unconfigured;

impl Translator for Unconfigured {
    fn translate(&self, _text: &str) -> Result<Translation, TranslateError> {
        Err(TranslateError::ProviderNotConfigured)
    }
}

pub fn translator_for(settings: &Settings) -> Arc<dyn Translator> {
    match settings.api_provider {
        ApiProvider::MyMemory => Arc::new(MyMemoryClient::new()),
        ApiProvider::Custom => Arc::new(Unconfigured),
    }
}

/// Run `translator` on a background thread and report through `cb`.
pub fn spawn_translation(
    translator: Arc<dyn Translator>,
    text: String,
    cb: Arc<dyn Fn(Result<Translation, TranslateError>) + Send + Sync>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let result = translator.translate(&text);
        if let Err(e) = &result {
            log::warn!(target: "easywriter.net", "translation failed: {e}");
        }
        cb(result);
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    struct Echo;

    impl Translator for Echo {
        fn translate(&self, text: &str) -> Result<Translation, TranslateError> {
            Ok(Translation {
                translated_text: format!("<{text}>"),
            })
        }
    }

    #[test]
    fn custom_provider_is_not_configured() {
        let settings = Settings {
            api_provider: ApiProvider::Custom,
            custom_api_url: Some("https://example.test".into()),
            custom_api_key: None,
        };
        assert_eq!(
            translator_for(&settings).translate("你好"),
            Err(TranslateError::ProviderNotConfigured)
        );
    }

    #[test]
    fn spawned_translation_reports_through_callback() {
        let (tx, rx) = mpsc::channel();
        let tx = std::sync::Mutex::new(tx);
        let handle = spawn_translation(
            Arc::new(Echo),
            "你好".into(),
            Arc::new(move |r| {
                let _ = tx.lock().map(|tx| tx.send(r));
            }),
        );
        handle.join().expect("worker");
        assert_eq!(
            rx.recv().expect("callback ran"),
            Ok(Translation {
                translated_text: "<你好>".into()
            })
        );
    }

    #[test]
    fn unreachable_endpoint_is_a_network_error() {
        let client = MyMemoryClient::with_endpoint("http://127.0.0.1:9/get");
        assert!(matches!(
            client.translate("你好"),
            Err(TranslateError::Network(_))
        ));
    }
}
