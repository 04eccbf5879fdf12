use crate::id::ServerId;
use crate::task::Task;
use std::collections::BTreeMap;

// how much the utilization of a server is bumped when a task is sent to it
const UTILIZATION_BUMP: f64 = 0.1;

/// Dispatches each task to the least utilized server.
#[derive(Debug, Default)]
pub struct LoadBalancer {
    // mapping from server identifier to its last known utilization
    utilization: BTreeMap<ServerId, f64>,
    // number of tasks that couldn't be dispatched
    pending: usize,
}

impl LoadBalancer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the latest utilization reported by server `server_id`.
    pub fn track_util(&mut self, server_id: ServerId, utilization: f64) {
        self.utilization.insert(server_id, utilization);
    }

    pub fn utilization(&self, server_id: ServerId) -> Option<f64> {
        self.utilization.get(&server_id).copied()
    }

    /// Picks the server with the lowest utilization (ties are broken by the
    /// lowest identifier) and bumps its utilization. If no server is known,
    /// the task is counted as pending and `None` is returned.
    pub fn send_task(&mut self, task: Task) -> Option<ServerId> {
        let mut best: Option<(ServerId, f64)> = None;
        for (&server_id, &utilization) in self.utilization.iter() {
            match best {
                Some((_, min)) if utilization >= min => {}
                _ => best = Some((server_id, utilization)),
            }
        }

        match best {
            Some((server_id, min)) => {
                self.track_util(server_id, min + UTILIZATION_BUMP);
                tracing::debug!(
                    "task {} sent to server {} (utilization {:.3})",
                    task.id,
                    server_id,
                    min + UTILIZATION_BUMP
                );
                Some(server_id)
            }
            None => {
                tracing::warn!(
                    "no available servers to handle task {}",
                    task.id
                );
                self.pending += 1;
                None
            }
        }
    }

    /// Checks whether there are tasks that couldn't be dispatched.
    pub fn has_pending_tasks(&self) -> bool {
        self.pending > 0
    }

    pub fn pending_tasks(&self) -> usize {
        self.pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn least_utilized_first() {
        let mut lb = LoadBalancer::new();
        lb.track_util(1, 0.5);
        lb.track_util(2, 0.3);
        lb.track_util(3, 0.7);

        // 2 is the least utilized: 0.3 -> 0.4 -> 0.5
        assert_eq!(lb.send_task(Task::new(101, 2.5)), Some(2));
        assert_eq!(lb.send_task(Task::new(102, 10.4)), Some(2));

        // now 1 and 2 are tied at 0.5, and ties go to the lowest identifier
        assert_eq!(lb.send_task(Task::new(103, 8.2)), Some(1));
        // 1 is at 0.6 and 2 at 0.5
        assert_eq!(lb.send_task(Task::new(104, 6.2)), Some(2));
        assert!(!lb.has_pending_tasks());

        // server 3 was never picked
        assert_eq!(lb.utilization(3), Some(0.7));
    }

    #[test]
    fn ties_go_to_lowest_id() {
        let mut lb = LoadBalancer::new();
        lb.track_util(3, 0.0);
        lb.track_util(1, 0.0);
        lb.track_util(2, 0.0);

        assert_eq!(lb.send_task(Task::new(1, 1.0)), Some(1));
        assert_eq!(lb.utilization(1), Some(UTILIZATION_BUMP));
        assert_eq!(lb.send_task(Task::new(2, 1.0)), Some(2));
        assert_eq!(lb.send_task(Task::new(3, 1.0)), Some(3));
    }

    #[test]
    fn tracked_utilization_overrides_bump() {
        let mut lb = LoadBalancer::new();
        lb.track_util(1, 0.0);
        lb.track_util(2, 0.05);

        assert_eq!(lb.send_task(Task::new(1, 1.0)), Some(1));
        // server 1 reports it's idle again
        lb.track_util(1, 0.0);
        assert_eq!(lb.send_task(Task::new(2, 1.0)), Some(1));
    }

    #[test]
    fn no_servers() {
        let mut lb = LoadBalancer::new();
        assert!(!lb.has_pending_tasks());
        assert_eq!(lb.send_task(Task::new(1, 1.0)), None);
        assert_eq!(lb.send_task(Task::new(2, 1.0)), None);
        assert!(lb.has_pending_tasks());
        assert_eq!(lb.pending_tasks(), 2);
    }
}
