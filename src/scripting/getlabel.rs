use crate::entities::item::EntityId;
use crate::scripting::session::{OutboundRequest, Session};
use crate::scripting::value::Value;

/// How long to wait for the first label line before abandoning.
pub const LABEL_TIMEOUT_MS: u64 = 2000;
/// Quiet period after the first line; a burst of labels for one query
/// arrives within this window.
pub const LABEL_QUIET_PERIOD_MS: u64 = 500;

/// Single-flight state machine behind the `getlabel` command. The
/// command spans multiple dispatch ticks; the session owns exactly one
/// of these.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LabelQuery {
    #[default]
    Idle,
    WaitingForFirst {
        target: EntityId,
        variable: String,
        buffer: String,
    },
    WaitingForRest {
        target: EntityId,
        variable: String,
        buffer: String,
    },
}

/// One dispatch tick of the state machine. Returns true when the query
/// completed (or was abandoned) this tick.
pub fn poll_label_query(session: &mut Session, target: EntityId, variable: &str, quiet: bool) -> bool {
    match session.label_query {
        LabelQuery::Idle => {
            session.label_query = LabelQuery::WaitingForFirst {
                target,
                variable: variable.trim().to_string(),
                buffer: String::new(),
            };
            session.timeout(LABEL_TIMEOUT_MS);
            session.queue_request(OutboundRequest::SingleClick(target));
            false
        }
        LabelQuery::WaitingForFirst { target, .. } => {
            if session.suspension_pending() {
                return false;
            }
            // Timeout fired with no response at all.
            session.clear_suspension();
            session.label_query = LabelQuery::Idle;
            session.send_warning("getlabel", &format!("no response from {}", target), quiet);
            true
        }
        LabelQuery::WaitingForRest { .. } => {
            if session.suspension_pending() {
                return false;
            }
            // The quiet period elapsed with no further lines.
            session.clear_suspension();
            session.label_query = LabelQuery::Idle;
            true
        }
    }
}

impl Session {
    /// Inbound label message delivery. Returns true when the message was
    /// consumed by the active query, so the host skips further handling.
    /// Partial results are written to the variable after every line.
    pub fn deliver_label(&mut self, source: EntityId, text: &str) -> bool {
        let query = std::mem::replace(&mut self.label_query, LabelQuery::Idle);
        match query {
            LabelQuery::WaitingForFirst {
                target,
                variable,
                mut buffer,
            } if target == source => {
                buffer.push_str(text);
                buffer.push('\n');
                self.set_variable(&variable, Value::Str(buffer.clone()));
                self.label_query = LabelQuery::WaitingForRest {
                    target,
                    variable,
                    buffer,
                };
                self.pause(LABEL_QUIET_PERIOD_MS);
                true
            }
            LabelQuery::WaitingForRest {
                target,
                variable,
                mut buffer,
            } if target == source => {
                buffer.push_str(text);
                buffer.push('\n');
                self.set_variable(&variable, Value::Str(buffer.clone()));
                self.label_query = LabelQuery::WaitingForRest {
                    target,
                    variable,
                    buffer,
                };
                true
            }
            other => {
                self.label_query = other;
                false
            }
        }
    }
}
