// One sketch per process.
// Holding a `Session` marks the process as initialized; a second `acquire`
// fails fast instead of opening another window over the first.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::Error;

static ACTIVE: AtomicBool = AtomicBool::new(false);

#[derive(Debug)]
pub struct Session {
    _private: (),
}

impl Session {
    pub fn acquire() -> Result<Self, Error> {
        ACTIVE
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map(|_| Session { _private: () })
            .map_err(|_| Error::AlreadyInitialized)
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        ACTIVE.store(false, Ordering::Release);
    }
}
