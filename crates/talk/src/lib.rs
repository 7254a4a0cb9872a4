//! Cards, General Talk chat and web API client for truecost.
//!
//! This crate provides:
//! - `Card` - structured analysis result
//! - `RecentCards` / `DashboardStats` - history shown under the query box
//! - `ChatLog` - side chat messages with one request in flight
//! - `TalkApi` / `HttpTalkApi` - auth, card and query routes
//! - `flows` - request sequences the app runs on worker threads

pub mod api;
pub mod card;
pub mod chat;
pub mod flows;
pub mod history;

pub use api::{HttpTalkApi, QueryKind, QueryReply, QueryRequest, TalkApi, User};
pub use card::{Card, Link, RatingBand};
pub use chat::{ChatLog, ChatMessage, FETCH_FAILED, NO_RESPONSE};
pub use flows::{AnalysisOutcome, AnalysisResult, SessionSnapshot};
pub use history::{DashboardStats, RecentCards};
