// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Driver for the SerDes lanes of the FA switch ASIC.
//!
//! Every lane-level operation starts by mapping a chip port onto a physical
//! SerDes lane (see [`topology::resolve`]), then issues a register sequence
//! against that lane.  Getting the mapping wrong means configuring somebody
//! else's lane, so resolution failures abort the operation before any
//! register is touched.

#![cfg_attr(target_os = "none", no_std)]

pub mod config;
pub mod dump;
pub mod eye;
pub mod lane;
pub mod preset;
pub mod regs;
pub mod setup;
pub mod topology;

mod trace;

use crate::config::{PortMap, SerdesMode};
use crate::eye::{EyeMeasurement, EyeScanKind};
use crate::lane::{CtleSettings, DebugParams, DfeTaps, TxTaps};
use crate::preset::{Sd10gPreset, Sd25gPreset};
use crate::regs::RegisterAddress;
use crate::setup::SerdesBringup;
use crate::topology::{CmuKind, SerdesLane, SerdesPool};
use crate::trace::Trace;
use core::fmt::Write;
use num_derive::FromPrimitive;

pub use fa_err::FaError;

/// This trait abstracts over the various ways of reaching the FA register
/// space (SPI, PCIe, a fake register file in tests).
pub trait FaRw {
    fn write<T>(&self, reg: RegisterAddress<T>, value: T) -> Result<(), FaError>
    where
        u32: From<T>;

    fn read<T>(&self, reg: RegisterAddress<T>) -> Result<T, FaError>
    where
        T: From<u32>;

    /// Writes a register whose value is built by calling `f` on an all-zero
    /// value
    fn write_with<T, F>(
        &self,
        reg: RegisterAddress<T>,
        f: F,
    ) -> Result<(), FaError>
    where
        T: From<u32>,
        u32: From<T>,
        F: Fn(&mut T),
    {
        let mut data = 0.into();
        f(&mut data);
        self.write(reg, data)
    }

    /// Performs a read-modify-write operation on a register
    fn modify<T, F>(&self, reg: RegisterAddress<T>, f: F) -> Result<(), FaError>
    where
        T: From<u32>,
        u32: From<T>,
        F: Fn(&mut T),
    {
        let mut data = self.read(reg)?;
        f(&mut data);
        self.write(reg, data)
    }
}

/// Actions of the SerDes debug command, numbered as in the SDK's debug CLI
#[derive(Copy, Clone, Debug, PartialEq, Eq, FromPrimitive)]
pub enum DebugAction {
    Dump = 1,
    FullEye = 2,
    EyeHeight = 3,
    EyeArea = 4,
    DfeRead = 5,
    CtleRead = 6,
    OffsetCalibrate = 7,
    DfeDisable = 8,
    DfeEnable = 9,
    TxTapRead = 10,
}

////////////////////////////////////////////////////////////////////////////////

/// Port-level handle on the FA SerDes lanes.
///
/// This borrows the register transport and a snapshot of the port
/// configuration; it holds no state of its own, so serializing register
/// sequences is up to whoever owns the transport.
pub struct FaSerdes<'a, R> {
    pub rw: &'a R,
    pub ports: &'a PortMap,
}

impl<R: FaRw> FaRw for FaSerdes<'_, R> {
    fn write<T>(&self, reg: RegisterAddress<T>, value: T) -> Result<(), FaError>
    where
        u32: From<T>,
    {
        self.rw.write(reg, value)
    }

    fn read<T>(&self, reg: RegisterAddress<T>) -> Result<T, FaError>
    where
        T: From<u32>,
    {
        self.rw.read(reg)
    }
}

impl<'a, R: FaRw> FaSerdes<'a, R> {
    pub fn new(rw: &'a R, ports: &'a PortMap) -> Self {
        Self { rw, ports }
    }

    /// Maps a chip port onto its SerDes lane, using the port's configured
    /// interface mode
    pub fn port2sd(&self, port: u8) -> Result<SerdesLane, FaError> {
        let mode = self.ports.interface_mode(port);
        match topology::resolve(port, mode) {
            Ok(lane) => {
                trace::record(Trace::Resolved {
                    port,
                    pool: lane.pool,
                    index: lane.index,
                });
                Ok(lane)
            }
            Err(e) => {
                trace::record(Trace::ResolveFailed { port });
                Err(e)
            }
        }
    }

    /// Returns the CMU of the given kind which clocks the port's lane.
    ///
    /// The CMU bins are applied to the pool-relative lane index.
    pub fn cmu_for_port(&self, kind: CmuKind, port: u8) -> Result<u8, FaError> {
        let lane = self.port2sd(port)?;
        Ok(topology::cmu_for(kind, u32::from(lane.index)))
    }

    pub fn kr_tap_set(&self, port: u8, taps: TxTaps) -> Result<(), FaError> {
        lane::kr_tap_set(self.rw, self.port2sd(port)?, taps)
    }

    pub fn kr_tap_get(&self, port: u8) -> Result<TxTaps, FaError> {
        lane::kr_tap_get(self.rw, self.port2sd(port)?)
    }

    pub fn dfe_set(&self, port: u8, enabled: bool) -> Result<(), FaError> {
        lane::dfe_set(self.rw, self.port2sd(port)?, enabled)
    }

    pub fn dfe_read(&self, port: u8) -> Result<DfeTaps, FaError> {
        lane::dfe_read(self.rw, self.port2sd(port)?)
    }

    pub fn ctle_read(&self, port: u8) -> Result<CtleSettings, FaError> {
        lane::ctle_read(self.rw, self.port2sd(port)?)
    }

    pub fn offset_calibrate(&self, port: u8) -> Result<(), FaError> {
        lane::offset_calibrate(self.rw, self.port2sd(port)?)
    }

    /// Overrides DFE, CTLE or TX equalizer settings of a port's lane
    pub fn debug_set(
        &self,
        port: u8,
        params: DebugParams,
    ) -> Result<(), FaError> {
        lane::debug_set(self.rw, self.port2sd(port)?, params)
    }

    pub fn eye_scan(
        &self,
        port: u8,
        kind: EyeScanKind,
    ) -> Result<EyeMeasurement, FaError> {
        eye::eye_scan(self.rw, self.port2sd(port)?, kind)
    }

    /// Prints the registers of a port's lane
    pub fn dump(&self, port: u8, out: &mut impl Write) -> Result<(), FaError> {
        dump::dump(self.rw, self.port2sd(port)?, out)
    }

    /// Brings up the SerDes lane of a port in the given mode, then applies
    /// the board's TX post-cursor (if it has one for this port).
    pub fn configure_serdes(
        &self,
        port: u8,
        mode: SerdesMode,
        bringup: &impl SerdesBringup,
    ) -> Result<(), FaError> {
        let lane = self.port2sd(port)?;
        let cfg = self
            .ports
            .port_config(port)
            .ok_or(FaError::PortNotConfigured(port))?;
        setup::configure_lane(self.rw, port, lane, mode, &cfg, bringup)
            .inspect_err(|&err| {
                trace::record(Trace::LaneSetupFailed { port, err })
            })
    }

    /// Runs the CMU setup for all 14 clock multiplier units
    pub fn init_cmus(&self, bringup: &impl SerdesBringup) -> Result<(), FaError> {
        setup::init_cmus(bringup)
    }

    /// Runs one of the SerDes debug actions against a port, printing the
    /// results to `out`
    pub fn debug_serdes(
        &self,
        port: u8,
        action: DebugAction,
        out: &mut impl Write,
    ) -> Result<(), FaError> {
        let lane = self.port2sd(port)?;

        let (dev, dev_index) = match topology::port_dev(port) {
            Some(d) if d.0.is_high_speed() => d,
            _ => (topology::PortDev::Dev2g5, port),
        };
        write!(
            out,
            "Port {} Dev{}_{} -> SD{}",
            port,
            dev.name(),
            dev_index,
            lane.serdes_no()
        )?;

        if action == DebugAction::Dump {
            writeln!(out)?;
            return self.dump(port, out);
        }

        write!(out, "  Serdes preset: ")?;
        let cfg = self.ports.port_config(port);
        match (dev.is_high_speed(), cfg) {
            (true, Some(cfg)) if lane.pool == SerdesPool::Sd25g => {
                let p = Sd25gPreset::for_media(cfg.media, cfg.speed);
                writeln!(out, "{}", p)?
            }
            (true, Some(cfg)) => {
                writeln!(out, "{}", Sd10gPreset::for_media(cfg.media))?
            }
            _ => writeln!(out, "{}", Sd10gPreset::None)?,
        }

        match action {
            DebugAction::Dump => (),
            DebugAction::FullEye
            | DebugAction::EyeHeight
            | DebugAction::EyeArea => {
                let kind = match action {
                    DebugAction::FullEye => EyeScanKind::FullEye,
                    DebugAction::EyeHeight => EyeScanKind::Height,
                    _ => EyeScanKind::Area,
                };
                match self.eye_scan(port, kind) {
                    Ok(m) => write!(out, "{}", m)?,
                    Err(FaError::UnsupportedLane) => {
                        writeln!(out, "port {} not supported", port)?
                    }
                    Err(e) => return Err(e),
                }
            }
            DebugAction::DfeRead => write!(out, "{}", self.dfe_read(port)?)?,
            DebugAction::CtleRead => {
                write!(out, "{}", self.ctle_read(port)?)?
            }
            DebugAction::OffsetCalibrate => {
                self.offset_calibrate(port)?;
                writeln!(out, "Offset calibration done")?;
            }
            DebugAction::DfeDisable | DebugAction::DfeEnable => {
                let enabled = action == DebugAction::DfeEnable;
                self.dfe_set(port, enabled)?;
                writeln!(
                    out,
                    "DFE {}",
                    if enabled { "enabled" } else { "disabled" }
                )?;
            }
            DebugAction::TxTapRead => {
                let taps = self.kr_tap_get(port)?;
                writeln!(out, "Tap_dly:{}", taps.dly)?;
                writeln!(out, "Tap_adv:{}", taps.adv)?;
                writeln!(out, "Amplitude:{}", taps.ampl)?;
            }
        }
        Ok(())
    }
}
