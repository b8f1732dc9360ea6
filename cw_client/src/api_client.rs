//! HTTP client for the Deck of Cards API.

use async_trait::async_trait;
use card_war::deck::{
    DeckError, DeckGateway, DeckResponse, DeckResult, DeckSession, DrawResponse, DrawnCards,
    parse_response, validate_count, validate_deck_id,
};
use serde::{Deserialize, de::DeserializeOwned};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Public Deck of Cards API
pub const DEFAULT_API_URL: &str = "https://deckofcardsapi.com/api/deck";

/// [`DeckGateway`] backed by the Deck of Cards REST API
#[derive(Clone, Debug)]
pub struct DeckApiClient {
    base_url: String,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

fn transport(err: reqwest::Error) -> DeckError {
    if err.is_timeout() {
        DeckError::Transport(format!("Request timed out: {err}"))
    } else {
        DeckError::Transport(err.to_string())
    }
}

/// Best effort error text from a failed response body.
fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error)
        .unwrap_or_else(|| body.trim().to_string())
}

impl DeckApiClient {
    /// Create a client for `base_url` with a per-request `timeout`.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> DeckResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(transport)?;
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Ok(Self { base_url, client })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get<T: DeserializeOwned>(
        &self,
        url: String,
        cancel: &CancellationToken,
    ) -> DeckResult<T> {
        if cancel.is_cancelled() {
            return Err(DeckError::Cancelled);
        }

        log::debug!("GET {url}");
        let request = async {
            let response = self.client.get(&url).send().await.map_err(transport)?;
            let status = response.status();
            let body = response.text().await.map_err(transport)?;

            if !status.is_success() {
                return Err(DeckError::Protocol(format!(
                    "HTTP {status}: {}",
                    error_message(&body)
                )));
            }
            parse_response(&body)
        };

        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(DeckError::Cancelled),
            result = request => result,
        }
    }
}

#[async_trait]
impl DeckGateway for DeckApiClient {
    async fn create_and_shuffle(&self, cancel: &CancellationToken) -> DeckResult<DeckSession> {
        let url = format!("{}/new/shuffle/?deck_count=1", self.base_url);
        let response: DeckResponse = self.get(url, cancel).await?;
        response.into_session("create deck")
    }

    async fn reshuffle(
        &self,
        deck_id: &str,
        cancel: &CancellationToken,
    ) -> DeckResult<DeckSession> {
        validate_deck_id(deck_id)?;

        let url = format!("{}/{deck_id}/shuffle/", self.base_url);
        let response: DeckResponse = self.get(url, cancel).await?;
        response.into_session("reshuffle deck")
    }

    async fn draw(
        &self,
        deck_id: &str,
        count: u32,
        cancel: &CancellationToken,
    ) -> DeckResult<DrawnCards> {
        validate_deck_id(deck_id)?;
        validate_count(count)?;

        let url = format!("{}/{deck_id}/draw/?count={count}", self.base_url);
        let response: DrawResponse = self.get(url, cancel).await?;
        response.into_drawn_cards()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let client =
            DeckApiClient::new("http://localhost:8080/api/deck/", Duration::from_secs(1)).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080/api/deck");
    }

    #[test]
    fn test_error_message_prefers_json_error() {
        assert_eq!(
            error_message(r#"{"success": false, "error": "Deck ID does not exist."}"#),
            "Deck ID does not exist."
        );
        assert_eq!(error_message("  Bad Gateway \n"), "Bad Gateway");
    }

    #[tokio::test]
    async fn test_invalid_arguments_fail_before_any_request() {
        // Nothing listens on port 9; a request would fail with a transport error.
        let client = DeckApiClient::new("http://127.0.0.1:9", Duration::from_secs(1)).unwrap();
        let cancel = CancellationToken::new();

        assert!(matches!(
            client.reshuffle("  ", &cancel).await,
            Err(DeckError::InvalidArgument(_))
        ));
        assert!(matches!(
            client.draw("", 1, &cancel).await,
            Err(DeckError::InvalidArgument(_))
        ));
        assert!(matches!(
            client.draw("abc", 0, &cancel).await,
            Err(DeckError::InvalidArgument(_))
        ));
    }

    #[tokio::test]
    async fn test_cancelled_token_short_circuits() {
        let client = DeckApiClient::new("http://127.0.0.1:9", Duration::from_secs(1)).unwrap();
        let cancel = CancellationToken::new();
        cancel.cancel();

        let result = client.create_and_shuffle(&cancel).await;
        assert!(matches!(result, Err(DeckError::Cancelled)));
    }
}
