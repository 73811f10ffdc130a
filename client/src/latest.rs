//! Tracks which submission is the most recent one.
//!
//! Submissions are not serialized: several can be in flight at once. Each takes a [Ticket] when it
//! starts, and only the holder of the latest ticket is allowed to render its outcome.

use std::sync::Arc;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering::SeqCst;

#[derive(Clone, Debug, Default)]
pub struct Latest {
    generation: Arc<AtomicU64>,
}

impl Latest {
    /// Starts a new submission, superseding all the previous ones.
    pub fn ticket(&self) -> Ticket {
        let id = self.generation.fetch_add(1, SeqCst) + 1;
        Ticket {
            id,
            generation: self.generation.clone(),
        }
    }
}

#[derive(Debug)]
pub struct Ticket {
    id: u64,
    generation: Arc<AtomicU64>,
}

impl Ticket {
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Whether no submission started after this one.
    pub fn is_latest(&self) -> bool {
        self.generation.load(SeqCst) == self.id
    }
}
