use std::time::Duration;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};

use crate::shared::error::{AppError, AppResult};
use crate::shared::settings::ApiSettings;
use crate::shared::types::{TranslationRequest, TranslationResponse};

pub type TranslatorResult<T> = AppResult<T>;

/// Remote side of a translation session.
///
/// Implementations perform one request/response exchange per call and never
/// retry. Transport problems (connection, timeout, non-2xx) surface as
/// `AppError::Network`; a reachable endpoint that returns no usable text
/// surfaces as `AppError::MalformedResponse`.
#[async_trait]
pub trait TranslationBackend: Send + Sync {
    async fn translate(&self, request: &TranslationRequest) -> TranslatorResult<String>;
}

/// HTTP client for the translation endpoint.
pub struct TranslatorService {
    http: Client,
    endpoint: String,
}

impl TranslatorService {
    pub fn new(settings: &ApiSettings) -> TranslatorResult<Self> {
        let http = Client::builder()
            .user_agent(settings.user_agent.as_str())
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| AppError::Network(e.to_string()))?;

        Ok(Self {
            http,
            endpoint: settings.endpoint.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl TranslationBackend for TranslatorService {
    async fn translate(&self, request: &TranslationRequest) -> TranslatorResult<String> {
        log::debug!(
            "[Translator] POST {} ({} -> {}, {} chars)",
            self.endpoint,
            request.source_language,
            request.target_language,
            request.text.chars().count()
        );

        let res = self
            .http
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| AppError::Network(format!("Translation API request failed: {}", e)))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|e| AppError::Network(format!("Failed to read translation response: {}", e)))?;

        classify_response(status, &body)
    }
}

/// Map a raw endpoint answer onto the session's error taxonomy.
pub fn classify_response(status: StatusCode, body: &str) -> TranslatorResult<String> {
    if !status.is_success() {
        log::warn!("[Translator] Translation API returned error: {}", status);
        return Err(AppError::Network(format!("Translation API error: {}", status)));
    }
    parse_translation_body(body)
}

/// Extract `translatedText` from a success body.
///
/// A body that is not JSON, lacks the field, carries a non-string value or an
/// empty string counts as malformed.
pub fn parse_translation_body(body: &str) -> TranslatorResult<String> {
    let parsed: TranslationResponse = serde_json::from_str(body)
        .map_err(|e| AppError::MalformedResponse(format!("Invalid translation payload: {}", e)))?;

    if parsed.translated_text.is_empty() {
        return Err(AppError::MalformedResponse("empty translatedText".to_string()));
    }
    Ok(parsed.translated_text)
}
