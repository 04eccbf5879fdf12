use crate::id::TaskId;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Exp};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Task {
    pub id: TaskId,
    /// service time (in seconds) on a server with processing power 1
    pub service_time: f64,
}

impl Task {
    pub fn new(id: TaskId, service_time: f64) -> Self {
        Self { id, service_time }
    }
}

/// Generates tasks with sequential identifiers (starting at 1) and
/// exponentially distributed service times.
pub struct TaskGenerator {
    rng: StdRng,
    service_time: Exp<f64>,
    current_id: TaskId,
    last_task: Option<Task>,
    // mapping from the identifier of each task not yet finished to the time
    // (in milliseconds) it was generated
    generated_at: HashMap<TaskId, u64>,
}

impl TaskGenerator {
    /// Creates a new generator. `avg_service_time` is the mean service time
    /// (in seconds) and must be positive.
    pub fn new(avg_service_time: f64, seed: u64) -> Self {
        let service_time = Exp::new(1.0 / avg_service_time)
            .expect("average service time should be positive");
        Self {
            rng: StdRng::seed_from_u64(seed),
            service_time,
            current_id: 0,
            last_task: None,
            generated_at: HashMap::new(),
        }
    }

    /// Generates a new task at time `now` (in milliseconds).
    pub fn generate(&mut self, now: u64) -> Task {
        self.current_id += 1;
        let service_time = self.service_time.sample(&mut self.rng);
        let task = Task::new(self.current_id, service_time);
        self.generated_at.insert(task.id, now);
        self.last_task = Some(task);
        tracing::debug!(
            "t = {}ms | generated task {} with service time {:.3}s",
            now,
            task.id,
            service_time
        );
        task
    }

    pub fn last_task(&self) -> Option<Task> {
        self.last_task
    }

    /// Returns the time (in milliseconds) at which task `id` was generated.
    pub fn generated_at(&self, id: TaskId) -> Option<u64> {
        self.generated_at.get(&id).copied()
    }

    /// Forgets task `id`, returning the time at which it was generated. To be
    /// called once the task is finished.
    pub fn remove(&mut self, id: TaskId) -> Option<u64> {
        self.generated_at.remove(&id)
    }

    /// Returns the number of generated tasks that were not removed yet.
    pub fn in_flight(&self) -> usize {
        self.generated_at.len()
    }

    /// Returns the number of tasks generated so far.
    pub fn generated(&self) -> u64 {
        self.current_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequential_ids() {
        let mut generator = TaskGenerator::new(42.0, 0);
        assert_eq!(generator.last_task(), None);

        let first = generator.generate(0);
        let second = generator.generate(1000);
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(generator.last_task(), Some(second));
        assert_eq!(generator.generated(), 2);

        assert_eq!(generator.generated_at(1), Some(0));
        assert_eq!(generator.generated_at(2), Some(1000));
        assert_eq!(generator.generated_at(3), None);
        assert_eq!(generator.in_flight(), 2);

        // finished tasks are forgotten
        assert_eq!(generator.remove(1), Some(0));
        assert_eq!(generator.remove(1), None);
        assert_eq!(generator.generated_at(1), None);
        assert_eq!(generator.in_flight(), 1);
        assert_eq!(generator.generated(), 2);
    }

    #[test]
    fn same_seed_same_tasks() {
        let mut a = TaskGenerator::new(42.0, 7);
        let mut b = TaskGenerator::new(42.0, 7);
        for now in 0..100 {
            assert_eq!(a.generate(now), b.generate(now));
        }
    }

    #[test]
    fn service_time_mean() {
        let avg_service_time = 42.0;
        let mut generator = TaskGenerator::new(avg_service_time, 3);
        let count = 20_000;
        let total: f64 =
            (0..count).map(|now| generator.generate(now).service_time).sum();
        let mean = total / count as f64;

        // all service times are positive and the mean is close to the
        // configured one
        assert!(mean > avg_service_time * 0.9);
        assert!(mean < avg_service_time * 1.1);
    }
}
