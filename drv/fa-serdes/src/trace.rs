// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Tracing and delays.
//!
//! On Hubris, events go into a ring buffer (readable with Humility) and
//! delays are `sleep_for`.  Host builds swap in fakes that record both, so
//! that tests can check what the driver did.

use crate::topology::SerdesPool;
use fa_err::FaError;

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Trace {
    None,
    Resolved { port: u8, pool: SerdesPool, index: u8 },
    ResolveFailed { port: u8 },
    DfeSet { serdes_no: u8, enabled: bool },
    OffsetCalibrated { serdes_no: u8 },
    EyeScanTimeout { serdes_no: u8, waited_ms: u32 },
    EyeScanFailed { serdes_no: u8 },
    PostCursor { serdes_no: u8, value: u32 },
    LaneSetup { port: u8, serdes_no: u8 },
    LaneSetupFailed { port: u8, err: FaError },
    CmuInit { cmu: u8 },
}

/// Number of events kept; older ones are overwritten
const TRACE_DEPTH: usize = 32;

#[cfg(target_os = "none")]
mod imp {
    use super::{Trace, TRACE_DEPTH};
    use ringbuf::*;

    ringbuf!(Trace, TRACE_DEPTH, Trace::None);

    pub fn record(t: Trace) {
        ringbuf_entry!(t);
    }

    pub fn sleep_ms(ms: u64) {
        userlib::hl::sleep_for(ms);
    }
}

// Fakes for host builds and tests.  Like the ring buffer, the event log
// keeps only the most recent `TRACE_DEPTH` entries.
#[cfg(not(target_os = "none"))]
mod imp {
    use super::{Trace, TRACE_DEPTH};
    use core::cell::{Cell, RefCell};
    use std::collections::VecDeque;

    thread_local! {
        pub static TRACE: RefCell<VecDeque<Trace>> = const { RefCell::new(VecDeque::new()) };
        pub static SLEPT_MS: Cell<u64> = const { Cell::new(0) };
    }

    pub fn record(t: Trace) {
        TRACE.with(|v| {
            let mut v = v.borrow_mut();
            if v.len() == TRACE_DEPTH {
                v.pop_front();
            }
            v.push_back(t);
        });
    }

    pub fn sleep_ms(ms: u64) {
        SLEPT_MS.with(|s| s.set(s.get() + ms));
    }

    /// Drains the events recorded on this thread, oldest first
    #[cfg(test)]
    pub fn take() -> Vec<Trace> {
        TRACE.with(|v| v.borrow_mut().drain(..).collect())
    }

    /// Returns (and resets) the total sleep time on this thread
    #[cfg(test)]
    pub fn take_slept_ms() -> u64 {
        SLEPT_MS.with(|s| s.replace(0))
    }
}

pub(crate) use imp::*;
