//! Scripted prompter for driving interactive import flows in tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use appsync::domain::ports::Prompter;
use appsync::AppSyncResult;

#[derive(Default)]
struct Script {
    confirms: VecDeque<bool>,
    inputs: VecDeque<String>,
    asked: Vec<String>,
    shown: Vec<String>,
}

/// Answers confirms and inputs from queues. An empty or missing input
/// answer means "take the default"; a missing confirm answer means "no".
#[derive(Clone, Default)]
pub struct ScriptedPrompter {
    script: Arc<Mutex<Script>>,
}

impl ScriptedPrompter {
    pub fn answering(confirms: &[bool], inputs: &[&str]) -> Self {
        let prompter = Self::default();
        {
            let mut script = prompter.script.lock().unwrap();
            script.confirms = confirms.iter().copied().collect();
            script.inputs = inputs.iter().map(|s| s.to_string()).collect();
        }
        prompter
    }

    /// Questions asked so far, in order
    pub fn asked(&self) -> Vec<String> {
        self.script.lock().unwrap().asked.clone()
    }

    /// Diff lines shown before confirmation
    pub fn shown(&self) -> Vec<String> {
        self.script.lock().unwrap().shown.clone()
    }
}

impl Prompter for ScriptedPrompter {
    fn confirm(&self, prompt: &str) -> AppSyncResult<bool> {
        let mut script = self.script.lock().unwrap();
        script.asked.push(prompt.to_string());
        Ok(script.confirms.pop_front().unwrap_or(false))
    }

    fn input(&self, prompt: &str, default: &str) -> AppSyncResult<String> {
        let mut script = self.script.lock().unwrap();
        script.asked.push(prompt.to_string());
        let answer = script.inputs.pop_front().unwrap_or_default();
        Ok(if answer.is_empty() {
            default.to_string()
        } else {
            answer
        })
    }

    fn select(&self, prompt: &str, default: &str, _options: &[&str]) -> AppSyncResult<String> {
        self.input(prompt, default)
    }

    fn show_diff(&self, lines: &[String]) {
        self.script
            .lock()
            .unwrap()
            .shown
            .extend(lines.iter().cloned());
    }
}
