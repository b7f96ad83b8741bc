//! Per-host request spacing
//!
//! Advisory congestion control: requests to the same host are spaced at
//! least a minimum interval apart so the engine does not trip upstream
//! bot-protection. A caller is never blocked beyond the single computed
//! wait.

use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

/// Process-wide registry of last-request timestamps per host
///
/// Shared across concurrent crawls via `Arc`, so the map must be guarded;
/// the lock is only held long enough to compute the wait and reserve the
/// next slot, never across the sleep. Growth is bounded by the number of
/// distinct hosts seen in one process, which is small for this workload.
pub struct HostThrottle {
    min_interval: Duration,
    next_slot: Mutex<HashMap<String, Instant>>,
}

impl HostThrottle {
    /// Default minimum spacing between requests to one host
    pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(250);

    /// Creates a registry with the given minimum inter-request interval
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            next_slot: Mutex::new(HashMap::new()),
        }
    }

    /// Waits until a request to `host` is allowed, then records the slot
    ///
    /// The delay is the remainder of the minimum interval since the last
    /// reserved slot for this host; zero if the host is new or the interval
    /// has already elapsed.
    pub async fn wait(&self, host: &str) {
        let delay = {
            let mut slots = self.next_slot.lock().await;
            let now = Instant::now();
            match slots.get(host) {
                Some(&last) if last + self.min_interval > now => {
                    let slot = last + self.min_interval;
                    slots.insert(host.to_string(), slot);
                    slot - now
                }
                _ => {
                    slots.insert(host.to_string(), now);
                    Duration::ZERO
                }
            }
        };

        if !delay.is_zero() {
            tracing::trace!("Throttling {} for {:?}", host, delay);
            tokio::time::sleep(delay).await;
        }
    }
}

impl Default for HostThrottle {
    fn default() -> Self {
        Self::new(Self::DEFAULT_INTERVAL)
    }
}
