//! Monitor Module - reactive observation of the container's mutation channel.
//!
//! Subscribes an effect to the container's structural version signal and
//! invokes the rebuild callback once per external structural change. The
//! callback is expected to perform its own writes inside the container's
//! silent bracket — that, not anything in here, is what stops the effect
//! from re-triggering itself.
//!
//! The effect's stop closure is the subscription resource; [`Monitor::stop`]
//! releases it idempotently and dropping the monitor does the same.

use std::cell::RefCell;

use spark_signals::effect;
use tracing::debug;

use crate::container::Container;

type StopEffect = Box<dyn FnOnce()>;

/// Live observation of one container. Stop it (or drop it) to unsubscribe.
pub struct Monitor {
    stop: RefCell<Option<StopEffect>>,
}

impl Monitor {
    /// Begin watching `container`, invoking `on_change` now and after every
    /// external structural change.
    pub fn observe(container: &Container, on_change: impl Fn() + 'static) -> Self {
        let version = container.version_signal();
        let stop = effect(move || {
            // Track the channel; the rebuild below runs inside the silent
            // bracket and cannot bump it.
            let _ = version.get();
            on_change();
        });
        Self {
            stop: RefCell::new(Some(Box::new(stop))),
        }
    }

    /// Release the subscription. Safe to call twice.
    pub fn stop(&self) {
        if let Some(stop) = self.stop.borrow_mut().take() {
            debug!("layout monitor stopped");
            stop();
        }
    }
}

impl Drop for Monitor {
    fn drop(&mut self) {
        self.stop();
    }
}
