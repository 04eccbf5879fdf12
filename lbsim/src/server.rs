use crate::id::{ServerId, TaskId};
use crate::results::ServerMetricRecord;
use crate::task::Task;
use crate::time;
use std::collections::VecDeque;

const MIN_POWER: f64 = 1.0;
const MAX_POWER: f64 = 100.0;

#[derive(Debug, Clone, Copy)]
struct QueuedTask {
    task: Task,
    // time (in milliseconds) at which the task entered the queue
    arrival: u64,
}

/// A server with a FIFO queue of tasks, processing one task at a time.
#[derive(Debug)]
pub struct ServerQueue {
    id: ServerId,
    processing_power: f64,
    queue_size: usize,
    queue: VecDeque<QueuedTask>,
    // task currently being processed
    processing: Option<TaskId>,

    // waiting time (in milliseconds) of started tasks
    total_wait: u64,
    started: u64,
    // delay (in milliseconds) of finished tasks
    total_delay: u64,
    finished: u64,
    // queue length recorded each time the queue changes
    total_queue_length: u64,
    queue_length_updates: u64,
}

impl ServerQueue {
    /// Creates a new server. `processing_power` is clamped to `[1, 100]`.
    pub fn new(id: ServerId, processing_power: f64, queue_size: usize) -> Self {
        assert!(queue_size > 0);
        Self {
            id,
            processing_power: processing_power.clamp(MIN_POWER, MAX_POWER),
            queue_size,
            queue: VecDeque::new(),
            processing: None,
            total_wait: 0,
            started: 0,
            total_delay: 0,
            finished: 0,
            total_queue_length: 0,
            queue_length_updates: 0,
        }
    }

    pub fn id(&self) -> ServerId {
        self.id
    }

    pub fn processing_power(&self) -> f64 {
        self.processing_power
    }

    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_idle(&self) -> bool {
        self.processing.is_none()
    }

    /// Returns the identifier of the task being processed, if any.
    pub fn current_task(&self) -> Option<TaskId> {
        self.processing
    }

    /// Returns the number of tasks finished so far.
    pub fn finished(&self) -> u64 {
        self.finished
    }

    /// Adds a new task to the end of the queue at time `now`.
    pub fn add_task(&mut self, task: Task, now: u64) {
        self.queue.push_back(QueuedTask { task, arrival: now });
        self.record_queue_length();
        tracing::debug!(
            "t = {}ms | server {} added task {} (queue size {})",
            now,
            self.id,
            task.id,
            self.queue.len()
        );
    }

    /// Starts processing the next queued task, if the server is idle and
    /// there's one. Returns the identifier of the task started and its
    /// service duration in milliseconds.
    pub fn start_next(&mut self, now: u64) -> Option<(TaskId, u64)> {
        if !self.is_idle() {
            return None;
        }
        let QueuedTask { task, arrival } = self.queue.pop_front()?;
        self.record_queue_length();

        let wait = now - arrival;
        self.total_wait = self.total_wait.saturating_add(wait);
        self.started += 1;
        self.processing = Some(task.id);

        let service =
            time::secs_to_millis(task.service_time / self.processing_power);
        tracing::debug!(
            "t = {}ms | server {} processing task {} for {}ms (waited {}ms)",
            now,
            self.id,
            task.id,
            service,
            wait
        );
        Some((task.id, service))
    }

    /// Finishes the task being processed, at time `now`. `generated_at` is
    /// the time at which the task was generated and it's used to compute the
    /// task's delay. Returns the identifier of the finished task.
    pub fn finish(&mut self, now: u64, generated_at: u64) -> TaskId {
        let task_id = self
            .processing
            .take()
            .expect("server should be processing some task");
        assert!(generated_at <= now);
        self.total_delay = self.total_delay.saturating_add(now - generated_at);
        self.finished += 1;
        tracing::debug!(
            "t = {}ms | server {} finished task {}",
            now,
            self.id,
            task_id
        );
        task_id
    }

    /// Computes the current utilization as the average of the queue occupancy
    /// and of the queued work relative to what the server can handle.
    pub fn utilization(&self) -> f64 {
        let queue_size = self.queue_size as f64;
        let occupancy = self.queue.len() as f64 / queue_size;
        let queued_work: f64 =
            self.queue.iter().map(|queued| queued.task.service_time).sum();
        let work = queued_work / (self.processing_power * queue_size);
        (occupancy + work) / 2.0
    }

    /// Average waiting time (in seconds) of started tasks.
    pub fn avg_waiting(&self) -> f64 {
        average(self.total_wait, self.started)
    }

    /// Average delay (in seconds) of finished tasks.
    pub fn avg_delay(&self) -> f64 {
        average(self.total_delay, self.finished)
    }

    /// Average queue length, rounded down.
    pub fn avg_queue_length(&self) -> u64 {
        self.total_queue_length
            .checked_div(self.queue_length_updates)
            .unwrap_or(0)
    }

    pub fn metrics(&self) -> ServerMetricRecord {
        ServerMetricRecord::new(
            self.id,
            self.avg_delay(),
            self.avg_waiting(),
            self.avg_queue_length(),
        )
    }

    fn record_queue_length(&mut self) {
        self.total_queue_length += self.queue.len() as u64;
        self.queue_length_updates += 1;
    }
}

// average in seconds of `count` values that sum to `total_millis`
fn average(total_millis: u64, count: u64) -> f64 {
    if count == 0 {
        0.0
    } else {
        time::millis_to_secs(total_millis) / count as f64
    }
}
