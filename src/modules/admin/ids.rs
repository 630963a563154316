use std::sync::atomic::{AtomicU64, Ordering};

use super::record::AdminRecord;
use crate::modules::utils::time::current_timestamp_millis;

// Highest id handed out by this process
static LAST_ISSUED: AtomicU64 = AtomicU64::new(0);

/// Time-based identifiers: milliseconds since the Unix epoch, as a string.
///
/// Ids never repeat within a process and land above the largest numeric id
/// already in the collection being appended to. Separate processes writing
/// the same file can still produce duplicates.
pub struct IdGenerator;

impl IdGenerator {
    pub fn next_id(existing: &[AdminRecord]) -> String {
        let issued = Self::next_in_process();

        let floor = existing
            .iter()
            .filter_map(|admin| admin.id.parse::<u64>().ok())
            .max();

        // A stored id at u64::MAX leaves nothing above it; the process id
        // still differs from it
        match floor.and_then(|max| max.checked_add(1)) {
            Some(above) => issued.max(above).to_string(),
            None => issued.to_string(),
        }
    }

    fn next_in_process() -> u64 {
        let now = current_timestamp_millis();
        let mut last = LAST_ISSUED.load(Ordering::Relaxed);
        loop {
            let candidate = now.max(last.saturating_add(1));
            match LAST_ISSUED.compare_exchange_weak(
                last,
                candidate,
                Ordering::Relaxed,
                Ordering::Relaxed,
            ) {
                Ok(_) => return candidate,
                Err(actual) => last = actual,
            }
        }
    }
}
