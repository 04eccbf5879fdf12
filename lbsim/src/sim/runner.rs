use crate::balancer::LoadBalancer;
use crate::config::Config;
use crate::id::{self, ServerId};
use crate::results::ResultSet;
use crate::server::ServerQueue;
use crate::sim::Schedule;
use crate::task::TaskGenerator;
use crate::time::SimTime;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScheduleAction {
    GenerateTask,
    FinishTask(ServerId),
}

pub struct Runner {
    config: Config,
    time: SimTime,
    schedule: Schedule<ScheduleAction>,
    generator: TaskGenerator,
    balancer: LoadBalancer,
    servers: BTreeMap<ServerId, ServerQueue>,
}

impl Runner {
    /// Create a new `Runner` from a `config`. Server `i` (0-based) gets
    /// identifier `i + 1` and the processing power and queue size that
    /// `config` assigns to index `i`.
    pub fn new(config: Config) -> Self {
        let mut balancer = LoadBalancer::new();
        let servers: BTreeMap<_, _> = id::server_ids(config.servers())
            .enumerate()
            .map(|(index, server_id)| {
                let server = ServerQueue::new(
                    server_id,
                    config.server_power(index),
                    config.server_queue_size(index),
                );
                // let the balancer know about this server
                balancer.track_util(server_id, server.utilization());
                (server_id, server)
            })
            .collect();

        Self {
            config,
            time: SimTime::new(),
            schedule: Schedule::new(),
            generator: TaskGenerator::new(
                config.avg_service_time(),
                config.seed(),
            ),
            balancer,
            servers,
        }
    }

    /// Run the simulation. Tasks are generated until the configured duration
    /// is reached; after that, the simulation only ends once all queued tasks
    /// have been processed.
    pub fn run(&mut self) -> ResultSet {
        self.schedule
            .schedule(&self.time, 0, ScheduleAction::GenerateTask);

        while let Some(actions) = self.schedule.next_actions(&mut self.time) {
            for action in actions {
                match action {
                    ScheduleAction::GenerateTask => self.handle_generate(),
                    ScheduleAction::FinishTask(server_id) => {
                        self.handle_finish(server_id)
                    }
                }
            }
        }

        tracing::info!(
            "simulation ended at {:.3}s with {} tasks generated",
            self.time.now_secs(),
            self.generator.generated()
        );
        if self.balancer.has_pending_tasks() {
            tracing::warn!(
                "{} tasks were never dispatched",
                self.balancer.pending_tasks()
            );
        }
        self.results()
    }

    /// Metrics of all servers, in server identifier order.
    pub fn results(&self) -> ResultSet {
        self.servers.values().map(ServerQueue::metrics).collect()
    }

    fn handle_generate(&mut self) {
        let now = self.time.now();
        if now >= self.config.duration().as_millis() as u64 {
            return;
        }

        let task = self.generator.generate(now);
        if let Some(server_id) = self.balancer.send_task(task) {
            self.server_mut(server_id).add_task(task, now);
            // report while the task is still queued, so that a server that
            // is about to be busy is not seen as idle
            self.report_utilization(server_id);
            self.maybe_start(server_id);
        }

        let inter_arrival = self.config.inter_arrival().as_millis() as u64;
        self.schedule.schedule(
            &self.time,
            inter_arrival,
            ScheduleAction::GenerateTask,
        );
    }

    fn handle_finish(&mut self, server_id: ServerId) {
        let now = self.time.now();
        let task_id = self
            .servers
            .get(&server_id)
            .and_then(ServerQueue::current_task)
            .expect("server should be processing some task");
        // the task being finished is the one the server is processing; its
        // generation time is needed to compute its delay
        let generated_at = self
            .generator
            .remove(task_id)
            .expect("task should have been generated");
        self.server_mut(server_id).finish(now, generated_at);
        self.report_utilization(server_id);
        self.maybe_start(server_id);
    }

    // Starts the next task on server `server_id` if it's idle, scheduling its
    // completion.
    fn maybe_start(&mut self, server_id: ServerId) {
        let now = self.time.now();
        if let Some((_, service)) = self.server_mut(server_id).start_next(now) {
            self.schedule.schedule(
                &self.time,
                service,
                ScheduleAction::FinishTask(server_id),
            );
        }
    }

    fn report_utilization(&mut self, server_id: ServerId) {
        let utilization = self
            .servers
            .get(&server_id)
            .expect("server should exist")
            .utilization();
        self.balancer.track_util(server_id, utilization);
    }

    fn server_mut(&mut self, server_id: ServerId) -> &mut ServerQueue {
        self.servers
            .get_mut(&server_id)
            .expect("server should exist")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn run(config: Config) -> ResultSet {
        Runner::new(config).run()
    }

    #[test]
    fn all_servers_in_order() {
        let config = Config::new(10, 42.0);
        let results = run(config);
        assert_eq!(results.len(), 10);
        assert_eq!(results.server_ids(), (1..=10).collect::<Vec<_>>());
    }

    #[test]
    fn deterministic() {
        let mut config = Config::new(10, 42.0);
        config.set_duration(Duration::from_secs(60));
        config.set_inter_arrival(Duration::from_millis(100));
        config.set_seed(11);
        assert_eq!(run(config), run(config));
    }

    #[test]
    fn single_server_serial_processing() {
        // a single server with power 1: tasks take as long as their service
        // time, so with a task every 10ms and a mean service time of 1s a
        // queue builds up
        let mut config = Config::new(1, 1.0);
        config.set_power(1.0, 0.0);
        config.set_inter_arrival(Duration::from_millis(10));
        config.set_duration(Duration::from_secs(1));

        let mut runner = Runner::new(config);
        let results = runner.run();
        let record = results.get(1).expect("server 1 should exist");

        // every generated task was processed (drain)
        let server = runner.servers.get(&1).expect("server 1 should exist");
        assert_eq!(runner.generator.generated(), 100);
        assert_eq!(runner.generator.in_flight(), 0);
        assert_eq!(server.finished(), 100);
        assert_eq!(server.queue_len(), 0);
        assert!(server.is_idle());

        assert!(record.avg_waiting > 0.0);
        assert!(record.avg_delay > record.avg_waiting);
        assert!(record.avg_queue_length > 0);
    }

    #[test]
    fn idle_servers_prefer_lowest_id() {
        // tasks are short compared to the inter-arrival time, so every server
        // is idle (and reports no utilization) when a new task arrives; ties
        // are broken by the lowest identifier
        let mut config = Config::new(3, 0.01);
        config.set_inter_arrival(Duration::from_secs(1));
        config.set_duration(Duration::from_secs(3));

        let mut runner = Runner::new(config);
        let results = runner.run();
        assert_eq!(results.len(), 3);

        let finished: Vec<_> =
            runner.servers.values().map(ServerQueue::finished).collect();
        assert_eq!(finished, vec![3, 0, 0]);
        // nobody waited
        for record in results.iter() {
            assert_eq!(record.avg_waiting, 0.0);
        }
        assert_eq!(results.get(2).map(|record| record.avg_delay), Some(0.0));
    }

    #[test]
    fn busy_server_is_not_picked() {
        // with power 1 and a mean service time of 1000s, the first task is
        // still being processed by server 1 when the second one arrives 10ms
        // later, so the second one goes to server 2
        let mut config = Config::new(3, 1000.0);
        config.set_power(1.0, 0.0);
        config.set_inter_arrival(Duration::from_millis(10));
        config.set_duration(Duration::from_millis(20));

        let mut runner = Runner::new(config);
        let results = runner.run();
        assert_eq!(results.len(), 3);

        let finished: Vec<_> =
            runner.servers.values().map(ServerQueue::finished).collect();
        assert_eq!(finished, vec![1, 1, 0]);
        // nobody waited
        for record in results.iter() {
            assert_eq!(record.avg_waiting, 0.0);
        }
    }

    #[test]
    fn huge_service_time_saturates() {
        // service durations don't fit in simulated time; they're capped
        // instead of overflowing
        let mut config = Config::new(2, 1e25);
        config.set_duration(Duration::from_secs(3));

        let mut runner = Runner::new(config);
        let results = runner.run();
        assert_eq!(results.len(), 2);

        let finished: u64 =
            runner.servers.values().map(ServerQueue::finished).sum();
        assert_eq!(finished, 3);
        assert_eq!(runner.time.now(), u64::MAX);
        assert_eq!(runner.generator.in_flight(), 0);
    }

    #[test]
    fn no_servers_tasks_stay_pending() {
        let config = Config::new(0, 42.0);
        let mut runner = Runner::new(config);
        let results = runner.run();
        assert!(results.is_empty());
        assert_eq!(runner.generator.generated(), 5);
        assert_eq!(runner.balancer.pending_tasks(), 5);
    }

    #[test]
    fn no_duration_no_tasks() {
        let mut config = Config::new(4, 42.0);
        config.set_duration(Duration::from_secs(0));
        let results = run(config);
        assert_eq!(results.len(), 4);
        for record in results.iter() {
            assert_eq!(record.avg_delay, 0.0);
            assert_eq!(record.avg_waiting, 0.0);
            assert_eq!(record.avg_queue_length, 0);
        }
    }
}
