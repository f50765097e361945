// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Lane bring-up and CMU initialization.
//!
//! The tuning sequences for the sd10g28 and sd25g28 macros are large,
//! vendor-provided register scripts.  They live behind [`SerdesBringup`];
//! this module works out the arguments for them from the port configuration
//! and applies the board's TX settings afterwards.

use crate::config::{PortConfig, SerdesMode, Speed};
use crate::lane;
use crate::preset::{Sd10gPreset, Sd25gPreset};
use crate::regs::Target;
use crate::topology::{self, SerdesLane, SerdesPool, CMU_COUNT};
use crate::trace::{self, Trace};
use crate::FaRw;
use fa_err::FaError;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SerdesChip {
    Ant,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Sd10gMode {
    Lan10g,
    Lan5g,
    Sgmii2g5,
    Sgmii,
    Dsxgmii10g,
    Usgmii10g,
    Qsxgmii10g,
    Usxgmii5g,
    Qsgmii,
    Fx100,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Sd25gMode {
    Lan25g,
    Lan10g,
    Lan5g,
    Dsxgmii10g,
    Usgmii10g,
    Qsxgmii10g,
    Usxgmii5g,
    Sgmii2g5,
    Sgmii,
    Fx100,
}

/// Arguments for the sd10g28 setup script, used by 6G and 10G lanes
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Sd10gSetup {
    pub chip: SerdesChip,
    pub is_6g: bool,
    pub tx_invert: bool,
    pub rx_invert: bool,
    pub tx_swing: u32,
    pub preset: Sd10gPreset,
    pub mode: Sd10gMode,
}

impl Sd10gSetup {
    pub fn new(
        mode: SerdesMode,
        cfg: &PortConfig,
        is_6g: bool,
    ) -> Result<Self, FaError> {
        let mut preset = Sd10gPreset::None;
        let mode = match mode {
            m if m.is_sfi() => {
                preset = Sd10gPreset::for_media(cfg.media);
                match cfg.speed {
                    Speed::Speed10G => Sd10gMode::Lan10g,
                    Speed::Speed5G => Sd10gMode::Lan5g,
                    _ => return Err(FaError::UnsupportedSpeed),
                }
            }
            SerdesMode::TwoG5 => Sd10gMode::Sgmii2g5,
            SerdesMode::Sgmii | SerdesMode::Base1000X => Sd10gMode::Sgmii,
            SerdesMode::Dxgmii10g => Sd10gMode::Dsxgmii10g,
            SerdesMode::Usgmii => Sd10gMode::Usgmii10g,
            SerdesMode::Qxgmii => Sd10gMode::Qsxgmii10g,
            SerdesMode::Dxgmii5g => Sd10gMode::Usxgmii5g,
            SerdesMode::Qsgmii => Sd10gMode::Qsgmii,
            SerdesMode::Fx100 => Sd10gMode::Fx100,
            _ => return Err(FaError::UnsupportedMode),
        };
        Ok(Self {
            chip: SerdesChip::Ant,
            is_6g,
            tx_invert: false,
            rx_invert: true,
            tx_swing: 240,
            preset,
            mode,
        })
    }
}

/// Arguments for the sd25g28 setup script
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Sd25gSetup {
    pub chip: SerdesChip,
    pub tx_invert: bool,
    pub rx_invert: bool,
    pub tx_swing: u32,
    pub reg_ctrl: u32,
    pub preset: Sd25gPreset,
    pub mode: Sd25gMode,
}

impl Sd25gSetup {
    pub fn new(mode: SerdesMode, cfg: &PortConfig) -> Result<Self, FaError> {
        let mut preset = Sd25gPreset::None;
        let mode = match mode {
            m if m.is_sfi() => {
                preset = Sd25gPreset::for_media(cfg.media, cfg.speed);
                match cfg.speed {
                    Speed::Speed25G => Sd25gMode::Lan25g,
                    Speed::Speed10G => Sd25gMode::Lan10g,
                    Speed::Speed5G => Sd25gMode::Lan5g,
                    _ => return Err(FaError::UnsupportedSpeed),
                }
            }
            SerdesMode::Dxgmii10g => Sd25gMode::Dsxgmii10g,
            SerdesMode::Usgmii => Sd25gMode::Usgmii10g,
            // The 25G macro runs QSGMII through its QSXGMII mode
            SerdesMode::Qxgmii | SerdesMode::Qsgmii => Sd25gMode::Qsxgmii10g,
            SerdesMode::Dxgmii5g => Sd25gMode::Usxgmii5g,
            SerdesMode::TwoG5 => Sd25gMode::Sgmii2g5,
            SerdesMode::Sgmii | SerdesMode::Base1000X => Sd25gMode::Sgmii,
            SerdesMode::Fx100 => Sd25gMode::Fx100,
            _ => return Err(FaError::UnsupportedMode),
        };
        Ok(Self {
            chip: SerdesChip::Ant,
            tx_invert: false,
            rx_invert: true,
            tx_swing: 240,
            reg_ctrl: 1,
            preset,
            mode,
        })
    }
}

/// Hooks into the platform's SerDes setup scripts and board data
pub trait SerdesBringup {
    fn setup_sd10g(
        &self,
        port: u8,
        lane: SerdesLane,
        cfg: &Sd10gSetup,
    ) -> Result<(), FaError>;

    fn setup_sd25g(
        &self,
        port: u8,
        lane: SerdesLane,
        cfg: &Sd25gSetup,
    ) -> Result<(), FaError>;

    /// Configures one clock multiplier unit, given its analog and
    /// configuration register blocks
    fn setup_cmu(
        &self,
        cmu: u8,
        target: Target,
        cfg_target: Target,
    ) -> Result<(), FaError>;

    /// Returns the TX post-cursor that this board needs on a port, if any
    fn post_cursor(&self, _port: u8, _speed: Speed) -> Option<u32> {
        None
    }
}

/// Runs the pool's setup script on a lane, then applies the board's TX
/// post-cursor
pub fn configure_lane<R: FaRw>(
    rw: &R,
    port: u8,
    lane: SerdesLane,
    mode: SerdesMode,
    cfg: &PortConfig,
    bringup: &impl SerdesBringup,
) -> Result<(), FaError> {
    match lane.pool {
        SerdesPool::Sd25g => {
            let setup = Sd25gSetup::new(mode, cfg)?;
            bringup.setup_sd25g(port, lane, &setup)?;
        }
        SerdesPool::Sd10g | SerdesPool::Sd6g => {
            let is_6g = lane.pool == SerdesPool::Sd6g;
            let setup = Sd10gSetup::new(mode, cfg, is_6g)?;
            bringup.setup_sd10g(port, lane, &setup)?;
        }
    }

    if let Some(value) = bringup.post_cursor(port, cfg.speed) {
        lane::set_post_cursor(rw, lane, value)?;
    }
    trace::record(Trace::LaneSetup {
        port,
        serdes_no: lane.serdes_no(),
    });
    Ok(())
}

/// Runs the CMU setup for every clock multiplier unit, in order
pub fn init_cmus(bringup: &impl SerdesBringup) -> Result<(), FaError> {
    for cmu in 0..CMU_COUNT as u32 {
        let target = topology::sd_cmu(cmu)?;
        let cfg_target = topology::sd_cmu_cfg(cmu)?;
        bringup.setup_cmu(cmu as u8, target, cfg_target)?;
        trace::record(Trace::CmuInit { cmu: cmu as u8 });
    }
    Ok(())
}
