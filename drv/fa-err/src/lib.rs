// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! This crate provides the error type used by the FA SerDes driver and by the
//! register transports that sit underneath it.  It is factored into its own
//! crate so that a transport (SPI, PCIe, or a test fake) can return it without
//! pulling in the rest of `drv/fa-serdes`.

#![no_std]

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FaError {
    /// The chip port can't be mapped to a SerDes lane with its current
    /// interface mode (or is beyond the end of the die)
    InvalidPort {
        port: u8,
    },
    /// A lane or CMU index is past the end of its lookup table
    InvalidLane {
        index: u32,
    },
    /// The port has no configuration, but the operation needs one
    PortNotConfigured(u8),

    /// The requested operation isn't available on this lane's SerDes macro
    UnsupportedLane,
    UnsupportedMode,
    UnsupportedSpeed,

    /// A bounded hardware poll ran out of time
    HardwareTimeout {
        waited_ms: u32,
    },
    EyeScanFailed,

    /// Error reported by the register transport
    Transport(u32),
    /// Writing diagnostic output failed
    OutputFailed,
}

impl From<core::fmt::Error> for FaError {
    fn from(_: core::fmt::Error) -> Self {
        Self::OutputFailed
    }
}
