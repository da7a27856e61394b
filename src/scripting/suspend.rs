/// A pending logical delay. Single slot per session; registering a new
/// suspension replaces the old one, which is how a state machine
/// cancels its own timeout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Suspension {
    /// Resume after a fixed delay.
    Pause { until_ms: u64 },
    /// Fail/resume after a delay unless replaced first.
    Timeout { until_ms: u64 },
}

impl Suspension {
    pub fn deadline_ms(self) -> u64 {
        match self {
            Suspension::Pause { until_ms } | Suspension::Timeout { until_ms } => until_ms,
        }
    }
}

/// What the external runner sees when it checks the slot before
/// re-invoking a pending command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuspensionPoll {
    /// Nothing registered.
    Idle,
    /// The deadline has not arrived; do not re-invoke yet.
    Waiting,
    PauseElapsed,
    TimedOut,
}

/// Poll the slot, removing the suspension once its deadline passed.
pub fn poll_slot(slot: &mut Option<Suspension>, now_ms: u64) -> SuspensionPoll {
    match *slot {
        None => SuspensionPoll::Idle,
        Some(suspension) if now_ms < suspension.deadline_ms() => SuspensionPoll::Waiting,
        Some(Suspension::Pause { .. }) => {
            *slot = None;
            SuspensionPoll::PauseElapsed
        }
        Some(Suspension::Timeout { .. }) => {
            *slot = None;
            SuspensionPoll::TimedOut
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_slot_polls_idle() {
        let mut slot = None;
        assert_eq!(poll_slot(&mut slot, 0), SuspensionPoll::Idle);
    }

    #[test]
    fn pause_waits_until_deadline_then_clears() {
        let mut slot = Some(Suspension::Pause { until_ms: 500 });
        assert_eq!(poll_slot(&mut slot, 499), SuspensionPoll::Waiting);
        assert_eq!(poll_slot(&mut slot, 500), SuspensionPoll::PauseElapsed);
        assert_eq!(slot, None);
        assert_eq!(poll_slot(&mut slot, 501), SuspensionPoll::Idle);
    }

    #[test]
    fn timeout_reports_timed_out() {
        let mut slot = Some(Suspension::Timeout { until_ms: 2000 });
        assert_eq!(poll_slot(&mut slot, 1999), SuspensionPoll::Waiting);
        assert_eq!(poll_slot(&mut slot, 2000), SuspensionPoll::TimedOut);
    }

    #[test]
    fn replacing_a_timeout_cancels_it() {
        let mut slot = Some(Suspension::Timeout { until_ms: 2000 });
        slot = Some(Suspension::Pause { until_ms: 700 });
        assert_eq!(poll_slot(&mut slot, 700), SuspensionPoll::PauseElapsed);
    }
}
