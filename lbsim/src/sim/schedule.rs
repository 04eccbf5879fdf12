use crate::time::SimTime;
use std::collections::BTreeMap;

pub struct Schedule<A> {
    // mapping from scheduled time to list of scheduled actions
    schedule: BTreeMap<u64, Vec<A>>,
}

impl<A> Schedule<A> {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self {
            schedule: BTreeMap::new(),
        }
    }

    /// Schedule a new action `delay` milliseconds after the current `time`.
    /// Actions that would fall past the end of time are due at `u64::MAX`.
    pub fn schedule(&mut self, time: &SimTime, delay: u64, action: A) {
        let schedule_time = time.now().saturating_add(delay);
        self.schedule
            .entry(schedule_time)
            .or_insert_with(Vec::new)
            .push(action);
    }

    /// Retrieve the next list of scheduled actions, advancing `time` to the
    /// time they were scheduled for.
    pub fn next_actions(&mut self, time: &mut SimTime) -> Option<Vec<A>> {
        let min_time = *self.schedule.keys().next()?;
        let actions = self.schedule.remove(&min_time)?;
        time.set_time(min_time);
        Some(actions)
    }

    pub fn is_empty(&self) -> bool {
        self.schedule.is_empty()
    }
}
