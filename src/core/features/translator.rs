//! Translator feature
//!
//! Client side of the Russian <-> Mansi translation endpoint.

pub mod service;

pub use service::{TranslationBackend, TranslatorResult, TranslatorService};
