#[cfg(test)]
#[path = "busy_gate_test.rs"]
mod tests;

use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;
use std::sync::Arc;

/// Single in-flight flag shared by uploads and chat exchanges. At most one
/// guard exists at a time.
#[derive(Clone, Default)]
pub struct BusyGate {
    busy: Arc<AtomicBool>,
}

/// Releases the gate when dropped, whichever way the operation ended.
pub struct BusyGuard {
    busy: Arc<AtomicBool>,
}

impl BusyGate {
    pub fn is_busy(&self) -> bool {
        return self.busy.load(Ordering::SeqCst);
    }

    /// Returns `None` while another operation holds the gate.
    pub fn try_acquire(&self) -> Option<BusyGuard> {
        if self
            .busy
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            tracing::debug!("Busy gate already held");
            return None;
        }

        return Some(BusyGuard {
            busy: self.busy.clone(),
        });
    }
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::SeqCst);
    }
}
