//! Timers for the game driver
//!
//! Time is virtual: the host reports elapsed wall time through
//! `Game::advance`, and these timers say what fell due. Nothing here sleeps.

use std::time::Duration;

/// A periodic task that can be cancelled and rescheduled
#[derive(Debug, Clone)]
pub struct RepeatingTask {
    interval: Duration,
    next_due: Option<Duration>,
}

impl RepeatingTask {
    /// A stopped task
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_due: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// (Re)start so the first run is one interval after `now`
    pub fn start(&mut self, now: Duration) {
        self.next_due = Some(now + self.interval);
    }

    pub fn cancel(&mut self) {
        self.next_due = None;
    }

    pub fn is_active(&self) -> bool {
        self.next_due.is_some()
    }

    pub fn next_due(&self) -> Option<Duration> {
        self.next_due
    }

    /// If a run is due by `now`, consume it and return its scheduled time
    pub fn take_due(&mut self, now: Duration) -> Option<Duration> {
        let due = self.next_due.filter(|due| *due <= now)?;
        self.next_due = Some(due + self.interval);
        Some(due)
    }
}

/// A single delayed action
#[derive(Debug, Clone, Default)]
pub struct OneShot {
    due: Option<Duration>,
}

impl OneShot {
    pub fn schedule(&mut self, now: Duration, delay: Duration) {
        self.due = Some(now + delay);
    }

    pub fn cancel(&mut self) {
        self.due = None;
    }

    pub fn is_pending(&self) -> bool {
        self.due.is_some()
    }

    /// If the action is due by `now`, consume it and return its scheduled time
    pub fn take_due(&mut self, now: Duration) -> Option<Duration> {
        let due = self.due.filter(|due| *due <= now)?;
        self.due = None;
        Some(due)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn test_repeating_task_fires_each_interval() {
        let mut task = RepeatingTask::new(ms(20));
        assert!(!task.is_active());
        assert_eq!(task.take_due(ms(100)), None);

        task.start(ms(0));
        assert_eq!(task.take_due(ms(19)), None);
        assert_eq!(task.take_due(ms(20)), Some(ms(20)));
        assert_eq!(task.take_due(ms(20)), None);

        // Catch up on a backlog one run at a time
        assert_eq!(task.take_due(ms(65)), Some(ms(40)));
        assert_eq!(task.take_due(ms(65)), Some(ms(60)));
        assert_eq!(task.take_due(ms(65)), None);
        assert_eq!(task.next_due(), Some(ms(80)));
    }

    #[test]
    fn test_cancel_and_restart() {
        let mut task = RepeatingTask::new(ms(20));
        task.start(ms(0));
        task.cancel();
        assert_eq!(task.take_due(ms(1000)), None);

        task.start(ms(1000));
        assert_eq!(task.take_due(ms(1019)), None);
        assert_eq!(task.take_due(ms(1020)), Some(ms(1020)));
    }

    #[test]
    fn test_one_shot() {
        let mut timer = OneShot::default();
        timer.schedule(ms(100), ms(500));
        assert!(timer.is_pending());
        assert_eq!(timer.take_due(ms(599)), None);
        assert_eq!(timer.take_due(ms(700)), Some(ms(600)));
        assert!(!timer.is_pending());
        assert_eq!(timer.take_due(ms(800)), None);
    }
}
