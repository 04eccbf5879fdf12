// server ids
pub type ServerId = u64;

// task ids
pub type TaskId = u64;

/// Returns an iterator with all server identifiers in a system with `n`
/// servers. Identifiers start at 1.
pub fn server_ids(n: usize) -> impl Iterator<Item = ServerId> {
    (1..=n).map(|id| id as ServerId)
}
