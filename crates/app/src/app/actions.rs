//! Query submission, session actions and background results.

use std::sync::Arc;

use truecost_talk::{flows, AnalysisOutcome, FETCH_FAILED};

use super::{App, TaskResult};
use crate::state::View;

impl App {
    /// Send the main query box as an analysis request.
    pub(super) fn submit_query(&mut self) {
        let prompt = self.state.query_input.trim().to_string();
        if prompt.is_empty() || self.state.main_loading {
            return;
        }
        self.state.query_input.clear();
        self.state.main_loading = true;
        self.state.outcome = None;
        self.state.card_view = Default::default();
        self.state.main_scroll = 0;
        truecost_logger::debug(format!("analysis query: {}", prompt));

        let api = Arc::clone(&self.api);
        let user = self.state.user.clone();
        let spawned = self.tasks.spawn("analysis", move || {
            TaskResult::Analysis(flows::run_analysis(api.as_ref(), user.as_ref(), &prompt))
        });
        if let Err(e) = spawned {
            truecost_logger::error(format!("{:#}", e));
            self.state.main_loading = false;
            self.state.outcome = Some(AnalysisOutcome::Error(FETCH_FAILED.to_string()));
        }
    }

    /// Send the side chat input as a General Talk message.
    pub(super) fn submit_talk(&mut self) {
        let Some(index) = self.state.chat.begin(&self.state.talk_input) else {
            return;
        };
        let prompt = std::mem::take(&mut self.state.talk_input);
        self.state.talk_scroll_back = 0;

        let api = Arc::clone(&self.api);
        let spawned = self.tasks.spawn("talk", move || TaskResult::Talk {
            index,
            reply: flows::run_talk(api.as_ref(), &prompt),
        });
        if let Err(e) = spawned {
            truecost_logger::error(format!("{:#}", e));
            self.state.chat.fail(index);
        }
    }

    pub(super) fn start_logout(&mut self) {
        if self.state.user.is_none() {
            self.state.set_info("Not signed in");
            return;
        }
        let api = Arc::clone(&self.api);
        let spawned = self.tasks.spawn("logout", move || {
            flows::logout(api.as_ref());
            TaskResult::LoggedOut
        });
        if let Err(e) = spawned {
            truecost_logger::error(format!("{:#}", e));
            self.state.set_error("Logout failed");
        }
    }

    pub(super) fn toggle_dashboard(&mut self) {
        self.state.view = match self.state.view {
            View::Query => View::Dashboard,
            View::Dashboard => View::Query,
        };
        self.state.dashboard_scroll = 0;
    }

    /// Apply a finished background task to the state.
    pub(super) fn apply_task(&mut self, result: TaskResult) {
        match result {
            TaskResult::Session(snapshot) => {
                self.state.session_loading = false;
                self.state.user = snapshot.user;
                self.state.recent.replace(snapshot.cards.clone());
                self.state.all_cards = snapshot.cards;
                match self.state.username() {
                    Some(name) => truecost_logger::info(format!("Signed in as {}", name)),
                    None => truecost_logger::info("No active session"),
                }
            }
            TaskResult::Analysis(result) => {
                self.state.main_loading = false;
                // A logout may have finished while the analysis was running
                match (result.saved, &self.state.user) {
                    (Some(card), Some(_)) => {
                        self.state.recent.push_front(card.clone());
                        self.state.all_cards.insert(0, card);
                    }
                    (Some(_), None) => {
                        truecost_logger::debug("Dropping saved card after logout");
                    }
                    (None, _) => {}
                }
                self.state.outcome = Some(result.outcome);
            }
            TaskResult::Talk { index, reply } => {
                if !self.state.chat.resolve(index, reply) {
                    truecost_logger::warn(format!("Reply for unknown message {}", index));
                }
            }
            TaskResult::LoggedOut => {
                self.state.user = None;
                self.state.recent.clear();
                self.state.all_cards.clear();
                self.state.view = View::Query;
                self.state.set_info("Logged out");
            }
        }
    }
}
