//! Scripted provider used by the memo tests.
//!
//! Queued responses are served first, in order. Once an identifier's queue is empty the
//! provider falls back to its stable value, or `NotFound` when none is configured.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Mutex;
use std::thread::sleep;
use std::time::Duration;

use crate::error::LookupError;
use crate::provider::Provider;

#[derive(Debug, Default)]
struct Script {
    queued: HashMap<String, VecDeque<Result<String, LookupError>>>,
    stable: HashMap<String, String>,
    available: HashSet<String>,
    resolve_calls: HashMap<String, usize>,
    has_calls: HashMap<String, usize>,
}

#[derive(Debug, Default)]
pub(crate) struct ScriptedProvider {
    script: Mutex<Script>,
    delay: Option<Duration>,
}

impl ScriptedProvider {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Every resolve sleeps this long before answering.
    pub(crate) fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Answer `id` with `value` whenever nothing is queued.
    pub(crate) fn with_value(self, id: &str, value: &str) -> Self {
        {
            let mut script = self.script.lock().unwrap();
            script.stable.insert(id.to_string(), value.to_string());
            script.available.insert(id.to_string());
        }
        self
    }

    /// Queue one successful answer for `id`.
    pub(crate) fn then_value(self, id: &str, value: &str) -> Self {
        self.push(id, Ok(value.to_string()));
        self.script.lock().unwrap().available.insert(id.to_string());
        self
    }

    /// Queue one failure for `id`.
    pub(crate) fn then_failure(self, id: &str, err: LookupError) -> Self {
        self.push(id, Err(err));
        self
    }

    /// Make `has(id)` answer true.
    pub(crate) fn with_available(self, id: &str) -> Self {
        self.script.lock().unwrap().available.insert(id.to_string());
        self
    }

    pub(crate) fn resolve_calls(&self, id: &str) -> usize {
        let script = self.script.lock().unwrap();
        script.resolve_calls.get(id).copied().unwrap_or(0)
    }

    pub(crate) fn has_calls(&self, id: &str) -> usize {
        let script = self.script.lock().unwrap();
        script.has_calls.get(id).copied().unwrap_or(0)
    }

    fn push(&self, id: &str, response: Result<String, LookupError>) {
        let mut script = self.script.lock().unwrap();
        script
            .queued
            .entry(id.to_string())
            .or_default()
            .push_back(response);
    }
}

impl Provider for ScriptedProvider {
    type Value = String;
    type Error = LookupError;

    fn resolve(&self, id: &str) -> Result<String, LookupError> {
        if let Some(delay) = self.delay {
            sleep(delay);
        }

        let mut script = self.script.lock().unwrap();
        *script.resolve_calls.entry(id.to_string()).or_insert(0) += 1;

        if let Some(response) = script.queued.get_mut(id).and_then(VecDeque::pop_front) {
            return response;
        }
        script
            .stable
            .get(id)
            .cloned()
            .ok_or_else(|| LookupError::NotFound(id.to_string()))
    }

    fn has(&self, id: &str) -> bool {
        let mut script = self.script.lock().unwrap();
        *script.has_calls.entry(id.to_string()).or_insert(0) += 1;
        script.available.contains(id)
    }
}
