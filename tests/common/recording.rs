//! Recording reporter and scripted mutation

use async_trait::async_trait;
use batchpr::error::{Error, Result};
use batchpr::mutation::{Mutation, MutationContext};
use batchpr::report::Reporter;
use batchpr::shell::ShellCommand;
use batchpr::types::PullRequest;
use std::collections::VecDeque;
use std::sync::Mutex;

/// One reporter callback
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Started(String),
    Step(String),
    Command(String),
    Output(String),
    Warning(String),
    Error(String),
    Opened(u64),
}

/// Reporter that keeps every event in order
#[derive(Default)]
pub struct RecordingReporter {
    events: Mutex<Vec<Event>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    pub fn warnings(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Warning(m) => Some(m),
                _ => None,
            })
            .collect()
    }

    pub fn errors(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Error(m) => Some(m),
                _ => None,
            })
            .collect()
    }

    pub fn outputs(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Output(m) => Some(m),
                _ => None,
            })
            .collect()
    }

    /// Repositories announced, in order
    pub fn started(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Started(m) => Some(m),
                _ => None,
            })
            .collect()
    }

    fn push(&self, event: Event) {
        self.events.lock().unwrap().push(event);
    }
}

impl Reporter for RecordingReporter {
    fn repository_started(&self, repo: &str) {
        self.push(Event::Started(repo.to_string()));
    }

    fn step(&self, message: &str) {
        self.push(Event::Step(message.to_string()));
    }

    fn command_started(&self, command: &str) {
        self.push(Event::Command(command.to_string()));
    }

    fn command_output(&self, output: &str) {
        self.push(Event::Output(output.to_string()));
    }

    fn warning(&self, message: &str) {
        self.push(Event::Warning(message.to_string()));
    }

    fn error(&self, message: &str) {
        self.push(Event::Error(message.to_string()));
    }

    fn pull_request_opened(&self, pr: &PullRequest) {
        self.push(Event::Opened(pr.number));
    }
}

/// What [`TestMutation`] does for the next repository
#[derive(Debug, Clone)]
pub enum Decision {
    Accept,
    Decline,
    Fail(String),
}

/// Mutation whose answers are queued up front
///
/// Runs `touch CHANGED` in each checkout, then pops the next decision.
/// Accepts once the queue is empty.
pub struct TestMutation {
    branch: String,
    decisions: VecDeque<Decision>,
    seen: Vec<String>,
}

impl TestMutation {
    pub fn new(branch: &str) -> Self {
        Self {
            branch: branch.to_string(),
            decisions: VecDeque::new(),
            seen: Vec::new(),
        }
    }

    #[must_use]
    pub fn then(mut self, decision: Decision) -> Self {
        self.decisions.push_back(decision);
        self
    }

    /// Upstream repositories handed to `mutate_files`, in order
    pub fn seen(&self) -> &[String] {
        &self.seen
    }
}

#[async_trait]
impl Mutation for TestMutation {
    fn branch_name(&self) -> String {
        self.branch.clone()
    }

    fn commit_message(&self) -> String {
        "Update CI configuration".to_string()
    }

    fn pull_request_body(&self) -> String {
        "This was automated.".to_string()
    }

    async fn mutate_files(&mut self, ctx: &MutationContext<'_>) -> Result<bool> {
        self.seen.push(ctx.upstream.full_name().to_string());
        ctx.run(&ShellCommand::new("touch").arg("CHANGED")).await?;

        match self.decisions.pop_front().unwrap_or(Decision::Accept) {
            Decision::Accept => Ok(true),
            Decision::Decline => Ok(false),
            Decision::Fail(msg) => Err(Error::Mutation(msg)),
        }
    }
}
