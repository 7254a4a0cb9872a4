//! Client for the web API routes.
//!
//! - `GET  /api/auth` - session status
//! - `GET  /api/cards?email=` - stored cards of a user
//! - `POST /api/createCard` - store a card
//! - `POST /api/logout` - end the session
//! - `POST /api/query` - forward a prompt to the inference endpoint

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use reqwest::cookie::Jar;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use truecost_config::ApiSettings;

use crate::card::Card;
use crate::chat::NO_RESPONSE;

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Signed-in user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub email: String,
    /// Display name, falls back to the email
    pub name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AuthResponse {
    #[serde(default)]
    is_logged_in: bool,
    user: Option<AuthUser>,
}

#[derive(Debug, Deserialize)]
struct AuthUser {
    email: String,
    #[serde(default)]
    name: Option<String>,
}

impl AuthResponse {
    fn into_user(self) -> Option<User> {
        if !self.is_logged_in {
            return None;
        }
        let user = self.user?;
        let name = user
            .name
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| user.email.clone());
        Some(User {
            email: user.email,
            name,
        })
    }
}

/// Which surface a prompt comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum QueryKind {
    /// Main product analysis
    Analysis = 1,
    /// General Talk side chat
    Talk = 2,
}

impl From<QueryKind> for u8 {
    fn from(kind: QueryKind) -> Self {
        kind as u8
    }
}

impl TryFrom<u8> for QueryKind {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(QueryKind::Analysis),
            2 => Ok(QueryKind::Talk),
            other => Err(format!("unknown query type {}", other)),
        }
    }
}

/// Body of `POST /api/query`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryRequest {
    #[serde(rename = "type")]
    pub kind: QueryKind,
    pub prompt: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl QueryRequest {
    pub fn new(kind: QueryKind, prompt: impl Into<String>) -> Self {
        Self {
            kind,
            prompt: prompt.into(),
            latitude: None,
            longitude: None,
        }
    }
}

/// Parsed reply of `POST /api/query`.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryReply {
    pub card: Option<Card>,
    pub answer: Option<String>,
    pub error: Option<String>,
}

impl QueryReply {
    /// Interpret a reply body.
    ///
    /// The endpoint may wrap its JSON in a JSON string; such bodies are
    /// decoded once more. Plain text becomes the answer.
    pub fn from_value(value: Value) -> Self {
        let value = match value {
            Value::String(text) => match serde_json::from_str::<Value>(&text) {
                Ok(inner @ Value::Object(_)) => inner,
                _ => {
                    return Self {
                        card: None,
                        answer: Some(text),
                        error: None,
                    }
                }
            },
            other => other,
        };

        let text_field = |name: &str| {
            value
                .get(name)
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };

        Self {
            card: value.get("card").and_then(Card::from_value),
            answer: text_field("answer"),
            error: text_field("error"),
        }
    }

    /// Text shown in the side chat for this reply.
    pub fn talk_text(&self) -> String {
        self.answer
            .clone()
            .or_else(|| self.error.clone())
            .unwrap_or_else(|| NO_RESPONSE.to_string())
    }
}

/// Operations against the web API.
pub trait TalkApi: Send + Sync {
    /// Current session user, `None` when signed out.
    fn session(&self) -> Result<Option<User>>;

    /// Cards stored for `email`.
    fn cards(&self, email: &str) -> Result<Vec<Card>>;

    /// Store `card` for `email`.
    fn create_card(&self, email: &str, card: &Card) -> Result<()>;

    /// End the session.
    fn logout(&self) -> Result<()>;

    /// Forward a prompt.
    fn query(&self, request: &QueryRequest) -> Result<QueryReply>;
}

/// Blocking HTTP implementation of [`TalkApi`].
#[derive(Debug, Clone)]
pub struct HttpTalkApi {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl HttpTalkApi {
    /// Build a client from settings, reading the API key and the session
    /// cookie from the environment.
    pub fn from_settings(settings: &ApiSettings) -> Result<Self> {
        let from_env = |name: &str| std::env::var(name).ok().filter(|v| !v.trim().is_empty());
        Self::new(
            &settings.base_url,
            from_env(&settings.api_key_env),
            from_env(&settings.session_cookie_env).as_deref(),
            Duration::from_secs(settings.timeout_secs),
        )
    }

    pub fn new(
        base_url: &str,
        api_key: Option<String>,
        session_cookie: Option<&str>,
        timeout: Duration,
    ) -> Result<Self> {
        let base_url = base_url.trim_end_matches('/').to_string();
        let jar = session_jar(&base_url, session_cookie)?;
        let client = Client::builder()
            .cookie_provider(jar)
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            client,
            base_url,
            api_key,
        })
    }

    /// Absolute URL of an API route.
    pub fn url(&self, route: &str) -> String {
        format!("{}/api/{}", self.base_url, route.trim_start_matches('/'))
    }

    fn with_key(
        &self,
        builder: reqwest::blocking::RequestBuilder,
    ) -> reqwest::blocking::RequestBuilder {
        match &self.api_key {
            Some(key) => builder.header(API_KEY_HEADER, key),
            None => builder,
        }
    }
}

/// Cookie jar for `base_url`, seeded with the pairs of a `Cookie` header
/// value. Cookies set by the server land in the same jar.
fn session_jar(base_url: &str, session_cookie: Option<&str>) -> Result<Arc<Jar>> {
    let jar = Jar::default();
    if let Some(header) = session_cookie {
        let url = Url::parse(base_url)
            .with_context(|| format!("Invalid API base URL {}", base_url))?;
        let mut seeded = 0;
        for pair in header.split(';').map(str::trim).filter(|p| p.contains('=')) {
            jar.add_cookie_str(pair, &url);
            seeded += 1;
        }
        log::info!("Seeded {} session cookie(s) for {}", seeded, base_url);
    }
    Ok(Arc::new(jar))
}

impl TalkApi for HttpTalkApi {
    fn session(&self) -> Result<Option<User>> {
        let response = self
            .with_key(self.client.get(self.url("auth")))
            .send()
            .context("auth request failed")?;
        if !response.status().is_success() {
            log::info!("auth returned {}", response.status());
            return Ok(None);
        }
        let auth: AuthResponse = response.json().context("invalid auth response")?;
        Ok(auth.into_user())
    }

    fn cards(&self, email: &str) -> Result<Vec<Card>> {
        let body: Value = self
            .with_key(self.client.get(self.url("cards")).query(&[("email", email)]))
            .send()
            .context("cards request failed")?
            .error_for_status()?
            .json()
            .context("invalid cards response")?;
        Ok(Card::list_from_value(&body))
    }

    fn create_card(&self, email: &str, card: &Card) -> Result<()> {
        let mut body = serde_json::to_value(card)?;
        if let Value::Object(map) = &mut body {
            map.insert("email".to_string(), Value::String(email.to_string()));
        }
        self.with_key(self.client.post(self.url("createCard")).json(&body))
            .send()
            .context("createCard request failed")?
            .error_for_status()?;
        Ok(())
    }

    fn logout(&self) -> Result<()> {
        self.with_key(self.client.post(self.url("logout")))
            .send()
            .context("logout request failed")?
            .error_for_status()?;
        Ok(())
    }

    fn query(&self, request: &QueryRequest) -> Result<QueryReply> {
        let body: Value = self
            .with_key(self.client.post(self.url("query")).json(request))
            .send()
            .context("query request failed")?
            .json()
            .context("invalid query response")?;
        Ok(QueryReply::from_value(body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_auth_name_falls_back_to_email() {
        let auth: AuthResponse = serde_json::from_value(json!({
            "isLoggedIn": true,
            "user": {"email": "a@b.test"}
        }))
        .unwrap();
        assert_eq!(
            auth.into_user(),
            Some(User {
                email: "a@b.test".to_string(),
                name: "a@b.test".to_string()
            })
        );
    }

    #[test]
    fn test_auth_logged_out() {
        let auth: AuthResponse =
            serde_json::from_value(json!({"isLoggedIn": false, "user": null})).unwrap();
        assert_eq!(auth.into_user(), None);
    }

    #[test]
    fn test_query_request_wire_shape() {
        let request = QueryRequest::new(QueryKind::Talk, "hello");
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"type": 2, "prompt": "hello", "latitude": null, "longitude": null})
        );
    }

    #[test]
    fn test_reply_with_card() {
        let reply = QueryReply::from_value(json!({"card": {"rating": 81, "text": "ok"}}));
        assert_eq!(reply.card.unwrap().rating, 81.0);
    }

    #[test]
    fn test_reply_double_encoded() {
        let reply = QueryReply::from_value(json!("{\"answer\": \"It is warming.\"}"));
        assert_eq!(reply.answer.as_deref(), Some("It is warming."));
        assert_eq!(reply.talk_text(), "It is warming.");
    }

    #[test]
    fn test_reply_plain_text() {
        let reply = QueryReply::from_value(json!("just text"));
        assert_eq!(reply.talk_text(), "just text");
        assert!(reply.card.is_none());
    }

    #[test]
    fn test_talk_text_fallbacks() {
        let error = QueryReply::from_value(json!({"error": "quota"}));
        assert_eq!(error.talk_text(), "quota");

        let empty = QueryReply::from_value(json!({}));
        assert_eq!(empty.talk_text(), NO_RESPONSE);
    }

    #[test]
    fn test_session_cookie_is_sent_to_api_routes() {
        use reqwest::cookie::CookieStore;

        let jar = session_jar("http://localhost:3000", Some("token=abc; theme=dark")).unwrap();
        let header = jar
            .cookies(&Url::parse("http://localhost:3000/api/auth").unwrap())
            .unwrap();
        let header = header.to_str().unwrap();
        assert!(header.contains("token=abc"));
        assert!(header.contains("theme=dark"));

        // Other hosts never see it
        assert!(jar
            .cookies(&Url::parse("http://elsewhere.test/api/auth").unwrap())
            .is_none());
    }

    #[test]
    fn test_session_cookie_rejects_bad_base_url() {
        assert!(session_jar("not a url", Some("token=abc")).is_err());
        assert!(session_jar("not a url", None).is_ok());
    }

    #[test]
    fn test_url_joining() {
        let api =
            HttpTalkApi::new("http://localhost:3000/", None, None, Duration::from_secs(1)).unwrap();
        assert_eq!(api.url("auth"), "http://localhost:3000/api/auth");
        assert_eq!(api.url("/cards"), "http://localhost:3000/api/cards");
    }
}
