use std::collections::{HashMap, HashSet, VecDeque};

use crate::entities::item::EntityId;
use crate::entities::skills::{LockDirection, SkillId};
use crate::scripting::getlabel::LabelQuery;
use crate::scripting::suspend::{poll_slot, Suspension, SuspensionPoll};
use crate::scripting::value::{Aliases, Value};
use crate::world::time::ScriptClock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MsgLevel {
    Info,
    Warning,
    Force,
}

/// A user-visible line routed through the messaging surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserMessage {
    pub level: MsgLevel,
    pub text: String,
}

/// Outbound effects for the host to apply. Queued instead of sent so the
/// core stays free of transport concerns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutboundRequest {
    SingleClick(EntityId),
    SetSkillLock { skill: SkillId, lock: LockDirection },
    RenameMobile { id: EntityId, name: String },
    SetWarMode(bool),
    QuestArrow { active: bool, x: u16, y: u16 },
}

/// All mutable interpreter state for one scripting session. Handlers
/// receive it by `&mut`; nothing here is process-global, so independent
/// sessions never contaminate each other.
#[derive(Debug, Default)]
pub struct Session {
    pub clock: ScriptClock,
    lists: HashMap<String, VecDeque<Value>>,
    timers: HashMap<String, u64>,
    variables: HashMap<String, Value>,
    pub aliases: Aliases,
    script_variables: HashMap<String, EntityId>,
    ignored: HashSet<EntityId>,
    suspension: Option<Suspension>,
    pub(crate) label_query: LabelQuery,
    pub target_found: bool,
    requests: Vec<OutboundRequest>,
    messages: Vec<UserMessage>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Session teardown: bulk-clears every collection and drops any
    /// pending suspension or subscription.
    pub fn reset(&mut self) {
        self.lists.clear();
        self.timers.clear();
        self.variables.clear();
        self.clear_all_variables();
        self.aliases.clear();
        self.ignored.clear();
        self.suspension = None;
        self.label_query = LabelQuery::Idle;
        self.target_found = false;
        self.requests.clear();
        self.messages.clear();
    }

    // --- lists -----------------------------------------------------------

    /// No-op when the list already exists; contents are preserved.
    pub fn create_list(&mut self, name: &str) {
        self.lists
            .entry(name.trim().to_string())
            .or_insert_with(VecDeque::new);
    }

    pub fn destroy_list(&mut self, name: &str) {
        self.lists.remove(name.trim());
    }

    pub fn clear_list(&mut self, name: &str) {
        if let Some(list) = self.lists.get_mut(name.trim()) {
            list.clear();
        }
    }

    pub fn list_exists(&self, name: &str) -> bool {
        self.lists.contains_key(name.trim())
    }

    pub fn list_length(&self, name: &str) -> usize {
        self.lists.get(name.trim()).map_or(0, VecDeque::len)
    }

    pub fn list_contains(&self, name: &str, value: &Value) -> bool {
        self.lists
            .get(name.trim())
            .map_or(false, |list| list.contains(value))
    }

    /// Push onto an existing list. Without `allow_duplicates` a value
    /// already present is left alone. Absent list is a soft no-op.
    pub fn push_list(&mut self, name: &str, value: Value, front: bool, allow_duplicates: bool) {
        let Some(list) = self.lists.get_mut(name.trim()) else {
            return;
        };
        if !allow_duplicates && list.contains(&value) {
            return;
        }
        if front {
            list.push_front(value);
        } else {
            list.push_back(value);
        }
    }

    /// Pop from an absent or empty list returns None, never an error.
    pub fn pop_list(&mut self, name: &str, front: bool) -> Option<Value> {
        let list = self.lists.get_mut(name.trim())?;
        if front {
            list.pop_front()
        } else {
            list.pop_back()
        }
    }

    /// Remove the first element equal to `value`.
    pub fn pop_list_value(&mut self, name: &str, value: &Value) -> bool {
        let Some(list) = self.lists.get_mut(name.trim()) else {
            return false;
        };
        if let Some(index) = list.iter().position(|element| element == value) {
            list.remove(index);
            true
        } else {
            false
        }
    }

    // --- timers ----------------------------------------------------------

    /// Create or reset a timer to zero elapsed.
    pub fn create_timer(&mut self, name: &str) {
        let now = self.clock.now_ms();
        self.timers.insert(name.trim().to_string(), now);
    }

    /// Set a timer so it reads `elapsed_ms` right now.
    pub fn set_timer(&mut self, name: &str, elapsed_ms: u64) {
        let start = self.clock.now_ms().saturating_sub(elapsed_ms);
        self.timers.insert(name.trim().to_string(), start);
    }

    pub fn remove_timer(&mut self, name: &str) {
        self.timers.remove(name.trim());
    }

    pub fn timer_exists(&self, name: &str) -> bool {
        self.timers.contains_key(name.trim())
    }

    pub fn timer_ms(&self, name: &str) -> Option<u64> {
        self.timers
            .get(name.trim())
            .map(|start| self.clock.now_ms().saturating_sub(*start))
    }

    // --- variables and aliases -------------------------------------------

    pub fn set_variable(&mut self, name: &str, value: Value) {
        self.variables.insert(name.trim().to_string(), value);
    }

    pub fn variable(&self, name: &str) -> Option<&Value> {
        self.variables.get(name.trim())
    }

    pub fn clear_variable(&mut self, name: &str) {
        self.variables.remove(name.trim());
    }

    pub fn set_alias(&mut self, name: &str, id: EntityId) {
        self.aliases.insert(name.trim().to_string(), id);
    }

    pub fn clear_alias(&mut self, name: &str) {
        self.aliases.remove(name.trim());
    }

    /// Register a persistent script variable, mirrored into the alias
    /// table in lock-step.
    pub fn register_variable(&mut self, name: &str, id: EntityId) {
        let name = name.trim().to_string();
        self.aliases.insert(name.clone(), id);
        self.script_variables.insert(name, id);
    }

    pub fn unregister_variable(&mut self, name: &str) {
        let name = name.trim();
        self.aliases.remove(name);
        self.script_variables.remove(name);
    }

    pub fn script_variable(&self, name: &str) -> Option<EntityId> {
        self.script_variables.get(name.trim()).copied()
    }

    pub fn script_variables(&self) -> impl Iterator<Item = (&String, EntityId)> {
        self.script_variables.iter().map(|(name, id)| (name, *id))
    }

    pub fn clear_all_variables(&mut self) {
        let names: Vec<String> = self.script_variables.keys().cloned().collect();
        for name in names {
            self.unregister_variable(&name);
        }
    }

    // --- ignore set ------------------------------------------------------

    pub fn add_ignore(&mut self, id: EntityId) {
        self.ignored.insert(id);
    }

    pub fn clear_ignore(&mut self) {
        self.ignored.clear();
    }

    pub fn is_ignored(&self, id: EntityId) -> bool {
        self.ignored.contains(&id)
    }

    pub fn ignored(&self) -> &HashSet<EntityId> {
        &self.ignored
    }

    // --- suspension slot -------------------------------------------------

    pub fn pause(&mut self, ms: u64) {
        self.suspension = Some(Suspension::Pause {
            until_ms: self.clock.now_ms() + ms,
        });
    }

    pub fn timeout(&mut self, ms: u64) {
        self.suspension = Some(Suspension::Timeout {
            until_ms: self.clock.now_ms() + ms,
        });
    }

    pub fn suspension_pending(&self) -> bool {
        self.suspension
            .map_or(false, |s| self.clock.now_ms() < s.deadline_ms())
    }

    /// Runner entry point: checked before re-invoking a pending command.
    pub fn poll_suspension(&mut self) -> SuspensionPoll {
        let now = self.clock.now_ms();
        poll_slot(&mut self.suspension, now)
    }

    pub(crate) fn clear_suspension(&mut self) {
        self.suspension = None;
    }

    // --- outbound queues -------------------------------------------------

    pub fn queue_request(&mut self, request: OutboundRequest) {
        self.requests.push(request);
    }

    pub fn take_requests(&mut self) -> Vec<OutboundRequest> {
        std::mem::take(&mut self.requests)
    }

    pub fn take_messages(&mut self) -> Vec<UserMessage> {
        std::mem::take(&mut self.messages)
    }

    pub fn send_message(&mut self, text: impl Into<String>, quiet: bool) {
        if !quiet {
            self.messages.push(UserMessage {
                level: MsgLevel::Force,
                text: text.into(),
            });
        }
    }

    pub fn send_info(&mut self, text: impl Into<String>, quiet: bool) {
        if !quiet {
            self.messages.push(UserMessage {
                level: MsgLevel::Info,
                text: text.into(),
            });
        }
    }

    pub fn send_warning(&mut self, command: &str, text: &str, quiet: bool) {
        if !quiet {
            self.messages.push(UserMessage {
                level: MsgLevel::Warning,
                text: format!("{} - {}", command, text),
            });
        }
    }
}
