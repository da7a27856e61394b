use serde::{Deserialize, Serialize};

use crate::scripting::session::{OutboundRequest, Session};
use crate::world::position::Position;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Waypoint {
    pub x: i32,
    pub y: i32,
    pub name: String,
}

impl std::fmt::Display for Waypoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}, {})", self.name, self.x, self.y)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct WaypointOptions {
    /// Hide the arrow once the player is this close.
    pub arrival_distance: i32,
    /// Emit a distance message on every tick while an arrow is up.
    pub announce_distance: bool,
}

impl Default for WaypointOptions {
    fn default() -> Self {
        Self {
            arrival_distance: 2,
            announce_distance: true,
        }
    }
}

/// Cycles a waypoint list and drives the client quest arrow through the
/// session's outbound queue.
#[derive(Debug, Default)]
pub struct WaypointManager {
    waypoints: Vec<Waypoint>,
    current: Option<usize>,
    pub options: WaypointOptions,
}

impl WaypointManager {
    pub fn new(options: WaypointOptions) -> Self {
        Self {
            waypoints: Vec::new(),
            current: None,
            options,
        }
    }

    pub fn add(&mut self, waypoint: Waypoint) {
        self.waypoints.push(waypoint);
    }

    pub fn remove(&mut self, index: usize) {
        if index >= self.waypoints.len() {
            return;
        }
        self.waypoints.remove(index);
        match self.current {
            Some(cur) if cur == index => self.current = None,
            Some(cur) if cur > index => self.current = Some(cur - 1),
            _ => {}
        }
    }

    pub fn clear(&mut self) {
        self.waypoints.clear();
        self.current = None;
    }

    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    pub fn set_waypoints(&mut self, waypoints: Vec<Waypoint>) {
        self.waypoints = waypoints;
        self.current = None;
    }

    pub fn current(&self) -> Option<&Waypoint> {
        self.current.and_then(|index| self.waypoints.get(index))
    }

    /// Advance to the next waypoint, wrapping past the end.
    pub fn next(&mut self, session: &mut Session) {
        if self.waypoints.is_empty() {
            return;
        }
        let index = match self.current {
            Some(cur) if cur + 1 < self.waypoints.len() => cur + 1,
            Some(_) => 0,
            None => 0,
        };
        self.show(session, index);
    }

    /// Step back to the previous waypoint, wrapping past the front.
    pub fn prev(&mut self, session: &mut Session) {
        if self.waypoints.is_empty() {
            return;
        }
        let index = match self.current {
            Some(0) | None => self.waypoints.len() - 1,
            Some(cur) => cur - 1,
        };
        self.show(session, index);
    }

    pub fn show(&mut self, session: &mut Session, index: usize) {
        let Some(waypoint) = self.waypoints.get(index) else {
            return;
        };
        session.queue_request(OutboundRequest::QuestArrow {
            active: true,
            x: waypoint.x.clamp(0, u16::MAX as i32) as u16,
            y: waypoint.y.clamp(0, u16::MAX as i32) as u16,
        });
        session.send_info(format!("Waypoint: {}", waypoint), false);
        self.current = Some(index);
    }

    pub fn hide(&mut self, session: &mut Session) {
        session.queue_request(OutboundRequest::QuestArrow {
            active: false,
            x: 0,
            y: 0,
        });
        self.current = None;
    }

    /// Periodic distance check against the active waypoint. Arrival hides
    /// the arrow; otherwise an optional distance message is emitted.
    pub fn tick(&mut self, session: &mut Session, player: Position) {
        let Some(waypoint) = self.current() else {
            return;
        };
        let target = Position::new(waypoint.x, waypoint.y, 0);
        let dist = player.distance(target);
        if dist <= self.options.arrival_distance {
            session.send_info(format!("Arrived at '{}'", waypoint), false);
            self.hide(session);
        } else if self.options.announce_distance {
            let text = format!("{}: {} tiles away", waypoint.name, dist);
            session.send_info(text, false);
        }
    }
}
