//! Request sequences run on worker threads.
//!
//! Each flow is a plain function over [`TalkApi`] so the app can run it on a
//! background thread and tests can run it against a fake.

use crate::api::{QueryKind, QueryReply, QueryRequest, TalkApi, User};
use crate::card::Card;
use crate::chat::FETCH_FAILED;

/// Session loaded at startup.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionSnapshot {
    pub user: Option<User>,
    pub cards: Vec<Card>,
}

/// Load the session user and their cards.
///
/// Any failure yields a signed-out snapshot; a failing card list keeps the
/// user signed in with no cards.
pub fn load_session(api: &dyn TalkApi) -> SessionSnapshot {
    let user = match api.session() {
        Ok(Some(user)) => user,
        Ok(None) => return SessionSnapshot::default(),
        Err(e) => {
            log::warn!("session check failed: {:#}", e);
            return SessionSnapshot::default();
        }
    };
    let cards = match api.cards(&user.email) {
        Ok(cards) => cards,
        Err(e) => {
            log::warn!("failed to fetch cards: {:#}", e);
            Vec::new()
        }
    };
    SessionSnapshot {
        user: Some(user),
        cards,
    }
}

/// What the main query area shows after a request.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisOutcome {
    /// Structured analysis
    Card(Card),
    /// Text answer without a card
    Message(String),
    /// Error reported by the endpoint or transport
    Error(String),
    /// Nothing displayable
    Empty,
}

impl AnalysisOutcome {
    pub fn from_reply(reply: QueryReply) -> Self {
        if let Some(card) = reply.card {
            AnalysisOutcome::Card(card)
        } else if let Some(error) = reply.error {
            AnalysisOutcome::Error(error)
        } else if let Some(answer) = reply.answer {
            AnalysisOutcome::Message(answer)
        } else {
            AnalysisOutcome::Empty
        }
    }
}

/// Result of a main-area analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisResult {
    pub outcome: AnalysisOutcome,
    /// Card to put at the top of the recent list (stored for a signed-in user)
    pub saved: Option<Card>,
}

/// Run an analysis query and store the resulting card for a signed-in user.
pub fn run_analysis(api: &dyn TalkApi, user: Option<&User>, prompt: &str) -> AnalysisResult {
    let request = QueryRequest::new(QueryKind::Analysis, prompt);
    let reply = match api.query(&request) {
        Ok(reply) => reply,
        Err(e) => {
            log::error!("analysis query failed: {:#}", e);
            return AnalysisResult {
                outcome: AnalysisOutcome::Error(FETCH_FAILED.to_string()),
                saved: None,
            };
        }
    };

    let saved = match (&reply.card, user) {
        (Some(card), Some(user)) => {
            if let Err(e) = api.create_card(&user.email, card) {
                log::warn!("failed to store card: {:#}", e);
            }
            Some(card.clone())
        }
        _ => None,
    };

    AnalysisResult {
        outcome: AnalysisOutcome::from_reply(reply),
        saved,
    }
}

/// Run a General Talk query and return the text to show.
pub fn run_talk(api: &dyn TalkApi, prompt: &str) -> String {
    match api.query(&QueryRequest::new(QueryKind::Talk, prompt)) {
        Ok(reply) => reply.talk_text(),
        Err(e) => {
            log::error!("talk query failed: {:#}", e);
            FETCH_FAILED.to_string()
        }
    }
}

/// End the session. The local session is cleared even when the call fails.
pub fn logout(api: &dyn TalkApi) {
    if let Err(e) = api.logout() {
        log::warn!("logout failed: {:#}", e);
    }
}


#[cfg(test)]
mod tests {
    use super::fake::FakeApi;
    use super::*;
    use serde_json::json;

    fn user() -> User {
        User {
            email: "a@b.test".to_string(),
            name: "Ada".to_string(),
        }
    }

    fn card(rating: f64) -> Card {
        Card::from_value(&json!({ "rating": rating })).unwrap()
    }

    #[test]
    fn test_load_session_signed_in() {
        let api = FakeApi {
            user: Some(user()),
            cards: vec![card(50.0)],
            ..Default::default()
        };
        let snapshot = load_session(&api);
        assert_eq!(snapshot.user, Some(user()));
        assert_eq!(snapshot.cards.len(), 1);
    }

    #[test]
    fn test_load_session_failure_signs_out() {
        let api = FakeApi {
            fail_session: true,
            ..Default::default()
        };
        assert_eq!(load_session(&api), SessionSnapshot::default());
    }

    #[test]
    fn test_load_session_card_failure_keeps_user() {
        let api = FakeApi {
            user: Some(user()),
            fail_cards: true,
            ..Default::default()
        };
        let snapshot = load_session(&api);
        assert!(snapshot.user.is_some());
        assert!(snapshot.cards.is_empty());
    }

    #[test]
    fn test_analysis_stores_card_for_user() {
        let api = FakeApi {
            reply: Some(QueryReply::from_value(json!({"card": {"rating": 66}}))),
            ..Default::default()
        };
        let u = user();
        let result = run_analysis(&api, Some(&u), "oat milk");

        assert!(matches!(result.outcome, AnalysisOutcome::Card(_)));
        assert_eq!(result.saved.unwrap().rating, 66.0);
        let created = api.created.lock().unwrap();
        assert_eq!(created.len(), 1);
        assert_eq!(created[0].0, "a@b.test");

        let requests = api.requests.lock().unwrap();
        assert_eq!(requests[0].kind, QueryKind::Analysis);
        assert_eq!(requests[0].prompt, "oat milk");
    }

    #[test]
    fn test_analysis_without_user_is_not_stored() {
        let api = FakeApi {
            reply: Some(QueryReply::from_value(json!({"card": {"rating": 66}}))),
            ..Default::default()
        };
        let result = run_analysis(&api, None, "oat milk");
        assert!(result.saved.is_none());
        assert!(api.created.lock().unwrap().is_empty());
    }

    #[test]
    fn test_analysis_transport_failure() {
        let api = FakeApi {
            fail_query: true,
            ..Default::default()
        };
        let result = run_analysis(&api, None, "x");
        assert_eq!(
            result.outcome,
            AnalysisOutcome::Error(FETCH_FAILED.to_string())
        );
    }

    #[test]
    fn test_talk_uses_talk_kind() {
        let api = FakeApi {
            reply: Some(QueryReply::from_value(json!({"answer": "Yes."}))),
            ..Default::default()
        };
        assert_eq!(run_talk(&api, "Is it?"), "Yes.");
        assert_eq!(api.requests.lock().unwrap()[0].kind, QueryKind::Talk);
    }

    #[test]
    fn test_talk_failure_text() {
        let api = FakeApi {
            fail_query: true,
            ..Default::default()
        };
        assert_eq!(run_talk(&api, "Is it?"), FETCH_FAILED);
    }

    #[test]
    fn test_outcome_priority() {
        let reply = QueryReply::from_value(json!({"error": "bad", "answer": "a"}));
        assert_eq!(
            AnalysisOutcome::from_reply(reply),
            AnalysisOutcome::Error("bad".to_string())
        );
        let empty = QueryReply::from_value(json!({}));
        assert_eq!(AnalysisOutcome::from_reply(empty), AnalysisOutcome::Empty);
    }
}
