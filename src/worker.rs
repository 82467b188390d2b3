//! Native translation dispatch for hosts that run their own event loop.

use std::sync::Arc;
use std::sync::mpsc;
use std::time::Duration;

use net::{Settings, Translator, spawn_translation, translator_for};
use overlay::Ticket;

use crate::host::PageHost;
use crate::session::ContentSession;

/// Outcome of one request, as [`ContentSession::translation_completed`] takes it.
pub type Completion = (Ticket, Result<String, String>);

/// Runs translations on worker threads and queues their outcomes until the
/// host's loop calls [`TranslationWorker::pump`].
///
/// Completions are fed back on the host's thread, so the session never
/// leaves it.
pub struct TranslationWorker {
    translator: Arc<dyn Translator>,
    done_rx: mpsc::Receiver<Completion>,
    done_tx: mpsc::Sender<Completion>,
}

impl TranslationWorker {
    pub fn new(translator: Arc<dyn Translator>) -> Self {
        let (done_tx, done_rx) = mpsc::channel();
        Self {
            translator,
            done_rx,
            done_tx,
        }
    }

    /// Worker for the provider picked in the options page.
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(translator_for(settings))
    }

    pub fn dispatch(&self, ticket: Ticket, text: String) {
        let done_tx = self.done_tx.clone();
        let report = move |result: Result<net::Translation, net::TranslateError>| {
            let result = result
                .map(|t| t.translated_text)
                .map_err(|e| e.to_string());
            if done_tx.send((ticket, result)).is_err() {
                log::debug!(target: "easywriter.net", "{ticket:?} finished after its worker");
            }
        };
        // Detached; the outcome arrives through the channel.
        drop(spawn_translation(Arc::clone(&self.translator), text, Arc::new(report)));
    }

    /// Block up to `timeout` for the next finished request.
    pub fn wait(&self, timeout: Duration) -> Option<Completion> {
        self.done_rx.recv_timeout(timeout).ok()
    }

    /// Feed every finished request into `session`. Returns how many there were.
    pub fn pump<H: PageHost>(&self, session: &mut ContentSession<H>) -> usize {
        let mut delivered = 0;
        while let Ok((ticket, result)) = self.done_rx.try_recv() {
            session.translation_completed(ticket, result);
            delivered += 1;
        }
        delivered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use net::{ApiProvider, TranslateError, Translation};
    use overlay::OverlayId;

    struct Upper;

    impl Translator for Upper {
        fn translate(&self, text: &str) -> Result<Translation, TranslateError> {
            Ok(Translation {
                translated_text: text.to_uppercase(),
            })
        }
    }

    fn ticket(request: u64) -> Ticket {
        Ticket {
            overlay: OverlayId::from_raw(1),
            request,
        }
    }

    #[test]
    fn completion_carries_the_ticket_it_was_dispatched_with() {
        let worker = TranslationWorker::new(Arc::new(Upper));
        worker.dispatch(ticket(7), "hello".into());
        assert_eq!(
            worker.wait(Duration::from_secs(5)),
            Some((ticket(7), Ok("HELLO".to_owned())))
        );
    }

    #[test]
    fn custom_provider_completes_with_an_error() {
        let settings = Settings {
            api_provider: ApiProvider::Custom,
            ..Settings::default()
        };
        let worker = TranslationWorker::from_settings(&settings);
        worker.dispatch(ticket(1), "你好".into());
        let (t, result) = worker.wait(Duration::from_secs(5)).expect("completed");
        assert_eq!(t, ticket(1));
        assert_eq!(result, Err(TranslateError::ProviderNotConfigured.to_string()));
    }
}
