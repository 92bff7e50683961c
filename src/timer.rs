use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Armed {
    deadline: Duration,
    period: Option<Duration>,
}

/// One engine-owned timer: at most a single armed deadline at a time.
///
/// Deadlines are expressed on the owning engine's instance clock. Re-arming
/// always goes through [`TimerSlot::reschedule`], which drops whatever was
/// pending first, so a slot can never hold two timers.
#[derive(Debug, Default)]
pub struct TimerSlot {
    armed: Option<Armed>,
}

impl TimerSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel-then-reschedule.
    pub fn reschedule(&mut self, now: Duration, delay: Duration, period: Option<Duration>) {
        self.cancel();
        self.armed = Some(Armed {
            deadline: now + delay,
            period,
        });
    }

    /// Disarms the slot. Returns whether something was pending.
    pub fn cancel(&mut self) -> bool {
        self.armed.take().is_some()
    }

    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    pub fn deadline(&self) -> Option<Duration> {
        self.armed.map(|armed| armed.deadline)
    }

    /// Consumes the firing due at `now`, if any.
    ///
    /// One-shot timers disarm; periodic ones re-arm one period after the
    /// deadline that just fired.
    pub fn take_due(&mut self, now: Duration) -> bool {
        let Some(armed) = self.armed else {
            return false;
        };
        if armed.deadline > now {
            return false;
        }
        self.armed = armed.period.map(|period| Armed {
            deadline: armed.deadline + period,
            period: Some(period),
        });
        true
    }
}
