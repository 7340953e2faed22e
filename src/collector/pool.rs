use crate::collector::types::{NetworkMap, NetworkRecord};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::mpsc;
use std::thread;

/// Number of worker threads for per-profile secret queries.
/// Sized empirically: each unit of work is one blocking external-process
/// call, so a small fixed pool shortens wall-clock time without tuning.
pub const POOL_SIZE: usize = 6;

/// Fan a per-profile query out over a bounded worker pool.
///
/// Each worker pulls SSIDs from a shared queue and owns the record it
/// produces, so no two workers ever touch the same key. Ordering of
/// completion is irrelevant; the map is fully populated before return.
/// `query` must not panic on failure - a profile that cannot be queried
/// should come back as its default record instead.
pub fn map_profiles<F>(ssids: Vec<String>, query: F) -> NetworkMap
where
    F: Fn(&str) -> NetworkRecord + Sync,
{
    let queue = Mutex::new(VecDeque::from(ssids));
    let (tx, rx) = mpsc::channel();

    thread::scope(|scope| {
        for _ in 0..POOL_SIZE {
            let tx = tx.clone();
            let queue = &queue;
            let query = &query;
            scope.spawn(move || loop {
                let ssid = queue.lock().pop_front();
                let Some(ssid) = ssid else { break };
                let record = query(&ssid);
                if tx.send((ssid, record)).is_err() {
                    break;
                }
            });
        }
    });
    drop(tx);

    rx.into_iter().collect()
}
