//! Background API work.
//!
//! Requests run on short-lived threads and report back through one channel
//! that the event loop drains on every tick.

use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use anyhow::{Context, Result};
use truecost_talk::{AnalysisResult, SessionSnapshot};

/// Result of a background task.
#[derive(Debug)]
pub enum TaskResult {
    Session(SessionSnapshot),
    Analysis(AnalysisResult),
    /// Reply for the chat message at `index`
    Talk { index: usize, reply: String },
    LoggedOut,
}

/// Channel pair shared by all background tasks.
pub struct TaskQueue {
    sender: Sender<TaskResult>,
    receiver: Receiver<TaskResult>,
    #[cfg(test)]
    refuse_spawn: bool,
}

impl Default for TaskQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskQueue {
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            sender,
            receiver,
            #[cfg(test)]
            refuse_spawn: false,
        }
    }

    /// Run `task` on a named worker thread.
    ///
    /// On error the task never runs and no result will arrive for it.
    pub fn spawn<F>(&self, name: &str, task: F) -> Result<()>
    where
        F: FnOnce() -> TaskResult + Send + 'static,
    {
        #[cfg(test)]
        if self.refuse_spawn {
            anyhow::bail!("thread limit reached");
        }

        let sender = self.sender.clone();
        thread::Builder::new()
            .name(format!("truecost-{}", name))
            .spawn(move || {
                // Receiver gone means the app is shutting down
                let _ = sender.send(task());
            })
            .with_context(|| format!("Failed to spawn {} task", name))?;
        Ok(())
    }

    /// Results that arrived since the last call, without blocking.
    pub fn drain(&self) -> Vec<TaskResult> {
        self.receiver.try_iter().collect()
    }

    /// Make every later `spawn` fail.
    #[cfg(test)]
    pub fn refuse_spawns(&mut self) {
        self.refuse_spawn = true;
    }

    #[cfg(test)]
    pub fn recv_timeout(&self, timeout: std::time::Duration) -> Option<TaskResult> {
        self.receiver.recv_timeout(timeout).ok()
    }
}
