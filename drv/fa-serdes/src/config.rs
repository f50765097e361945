// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Per-port configuration snapshot consumed by the SerDes driver
use crate::topology::PORT_COUNT;
use serde::{Deserialize, Serialize};

/// MAC-side interface of a chip port.  Only the multiplexing modes
/// (`Qsgmii`, `Usgmii`, `Qxgmii`, `Dxgmii10g`, `Dxgmii5g`) change which lane a
/// port lands on; everything else uses one lane per port.
#[derive(
    Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize,
)]
pub enum InterfaceMode {
    /// Four 1G ports per lane
    Qsgmii,
    /// Eight 1G ports per lane
    Usgmii,
    /// Four 2G5 ports per lane
    Qxgmii,
    /// Two 5G ports per lane
    Dxgmii10g,
    /// Two 2G5 ports per lane
    Dxgmii5g,
    Sgmii,
    /// 1000BASE-X
    Serdes,
    Fx100,
    /// 2500BASE-X
    Vaui,
    Sfi,
    /// Single port USXGMII
    Sxgmii,
    #[default]
    NoConnection,
}

impl InterfaceMode {
    pub fn is_multiplexed(&self) -> bool {
        matches!(
            self,
            InterfaceMode::Qsgmii
                | InterfaceMode::Usgmii
                | InterfaceMode::Qxgmii
                | InterfaceMode::Dxgmii10g
                | InterfaceMode::Dxgmii5g
        )
    }
}

/// Port speed
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Speed {
    Speed100M,
    Speed1G,
    Speed2G5,
    Speed5G,
    Speed10G,
    Speed25G,
}

/// What's on the other end of the lane, as far as equalization cares
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MediaType {
    /// Optical short reach
    Sr,
    /// Optical long reach
    Zr,
    /// Direct attach copper of unknown length
    Dac,
    Dac1m,
    Dac2m,
    Dac3m,
    Dac5m,
    /// Backplane
    Bp,
    /// Board-to-board
    B2b,
    Kr10g,
    None,
}

/// Mode that the SerDes itself is running in
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SerdesMode {
    Idle,
    Sfi,
    SfiDac,
    SfiSr,
    SfiZr,
    SfiBp,
    SfiB2b,
    SfiPrNone,
    SfiKr,
    TwoG5,
    Sgmii,
    Base1000X,
    Qsgmii,
    Usgmii,
    Qxgmii,
    Dxgmii10g,
    Dxgmii5g,
    Fx100,
    Xaui,
    Rxaui,
}

impl SerdesMode {
    /// Returns `true` for the line-side modes that are tuned with a preset
    pub fn is_sfi(&self) -> bool {
        matches!(
            self,
            SerdesMode::Idle
                | SerdesMode::Sfi
                | SerdesMode::SfiDac
                | SerdesMode::SfiSr
                | SerdesMode::SfiZr
                | SerdesMode::SfiBp
                | SerdesMode::SfiB2b
                | SerdesMode::SfiPrNone
                | SerdesMode::SfiKr
        )
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortConfig {
    pub if_type: InterfaceMode,
    pub speed: Speed,
    pub media: MediaType,
    pub serdes_mode: SerdesMode,
}

/// Configuration of every chip port.  A port without a configuration uses
/// the single-lane mapping when it is resolved.
#[derive(Copy, Clone, Debug)]
pub struct PortMap([Option<PortConfig>; PORT_COUNT]);

impl PortMap {
    pub const fn new(p: [Option<PortConfig>; PORT_COUNT]) -> Self {
        Self(p)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns the configuration of the given port, or `None` if the port is
    /// unconfigured or doesn't exist
    pub fn port_config(&self, p: u8) -> Option<PortConfig> {
        self.0.get(p as usize).copied().flatten()
    }

    pub fn interface_mode(&self, p: u8) -> InterfaceMode {
        self.port_config(p).map(|c| c.if_type).unwrap_or_default()
    }
}

impl Default for PortMap {
    fn default() -> Self {
        Self::new([None; PORT_COUNT])
    }
}

impl core::ops::Index<u8> for PortMap {
    type Output = Option<PortConfig>;
    fn index(&self, i: u8) -> &Self::Output {
        &self.0[i as usize]
    }
}
