//! Translation collaborator: settings, the MyMemory codec and a blocking
//! client that reports back from a worker thread.

#[cfg(not(target_arch = "wasm32"))]
mod client;
mod error;
pub mod mymemory;
mod settings;

#[cfg(not(target_arch = "wasm32"))]
pub use client::{MyMemoryClient, Unconfigured, spawn_translation, translator_for};
pub use error::TranslateError;
pub use settings::{ApiProvider, Settings};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Translation {
    pub translated_text: String,
}

pub trait Translator: Send + Sync {
    fn translate(&self, text: &str) -> Result<Translation, TranslateError>;
}
