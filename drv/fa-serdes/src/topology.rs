// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Physical lane topology of the FA die.
//!
//! The FA has three SerDes pools (13 SD6G lanes, 12 SD10G lanes and 8 SD25G
//! lanes) and 14 clock multiplier units shared between them.  Which lane a
//! chip port lands on depends on the port's interface multiplexing mode: in
//! QSGMII, for example, four ports share one SD10G lane.
//!
//! Everything in this module is a pure function of its arguments.  The
//! partition boundaries are facts about the pad ring and are not tunable.

use crate::config::InterfaceMode;
use crate::regs::Target;
use fa_err::FaError;
use num_derive::FromPrimitive;
use static_assertions::const_assert_eq;

/// Number of chip ports, including the NPI port 64
pub const PORT_COUNT: usize = 65;

pub const SD6G_LANE_COUNT: usize = 13;
pub const SD10G_LANE_COUNT: usize = 12;
pub const SD25G_LANE_COUNT: usize = 8;
pub const SD_LANE_COUNT: usize = 33;
pub const CMU_COUNT: usize = 14;

/// Global SerDes number of the first SD10G lane
pub const SERDES_10G_START: u8 = 13;
/// Global SerDes number of the first SD25G lane
pub const SERDES_25G_START: u8 = 25;

const_assert_eq!(SERDES_10G_START as usize, SD6G_LANE_COUNT);
const_assert_eq!(
    SERDES_25G_START as usize,
    SD6G_LANE_COUNT + SD10G_LANE_COUNT
);
const_assert_eq!(
    SD_LANE_COUNT,
    SD6G_LANE_COUNT + SD10G_LANE_COUNT + SD25G_LANE_COUNT
);

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SerdesPool {
    Sd6g,
    Sd10g,
    Sd25g,
}

impl SerdesPool {
    pub fn lane_count(&self) -> usize {
        match self {
            SerdesPool::Sd6g => SD6G_LANE_COUNT,
            SerdesPool::Sd10g => SD10G_LANE_COUNT,
            SerdesPool::Sd25g => SD25G_LANE_COUNT,
        }
    }
}

/// A single SerDes lane, identified by its pool and its pool-relative index
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SerdesLane {
    pub pool: SerdesPool,
    pub index: u8,
}

impl SerdesLane {
    const fn new(pool: SerdesPool, index: u8) -> Self {
        Self { pool, index }
    }

    /// Returns the global SerDes number (0..=32), which indexes the shared
    /// per-lane configuration block
    pub fn serdes_no(&self) -> u8 {
        match self.pool {
            SerdesPool::Sd6g => self.index,
            SerdesPool::Sd10g => self.index + SERDES_10G_START,
            SerdesPool::Sd25g => self.index + SERDES_25G_START,
        }
    }

    /// Returns the register block holding this lane's analog settings
    pub fn target(&self) -> Result<Target, FaError> {
        let i = u32::from(self.index);
        match self.pool {
            SerdesPool::Sd6g => sd6g_lane(i),
            SerdesPool::Sd10g => sd10g_lane(i),
            SerdesPool::Sd25g => sd25g_lane(i),
        }
    }

    /// Returns the per-lane configuration block (lane reset and friends)
    pub fn lane_cfg_target(&self) -> Result<Target, FaError> {
        sd_lane(u32::from(self.serdes_no()))
    }
}

/// Maps a chip port onto a SerDes lane, given the port's interface mode.
///
/// The multiplexing modes take precedence; every other mode uses the
/// single-lane bins.  A port outside the range that its mode supports is
/// rejected with [`FaError::InvalidPort`].
pub fn resolve(port: u8, mode: InterfaceMode) -> Result<SerdesLane, FaError> {
    use SerdesPool::*;

    let lane = match mode {
        // Four ports per SD10G lane
        InterfaceMode::Qsgmii if port <= 47 => SerdesLane::new(Sd10g, port / 4),

        // Eight ports per lane, starting at SD10G lane 4
        InterfaceMode::Usgmii if port <= 47 => {
            SerdesLane::new(Sd10g, port / 8 + 4)
        }

        // Four banks of 16 ports, each folded onto the same 16 lanes
        InterfaceMode::Qxgmii if port <= 63 => match port % 16 {
            r @ 0..=7 => SerdesLane::new(Sd10g, r + 4),
            r => SerdesLane::new(Sd25g, r - 8),
        },

        InterfaceMode::Dxgmii10g if port <= 15 || (48..=63).contains(&port) => {
            let u = if port < 16 { port } else { port - 48 };
            if u < 8 {
                SerdesLane::new(Sd10g, u + 4)
            } else {
                SerdesLane::new(Sd25g, u - 8)
            }
        }

        InterfaceMode::Dxgmii5g if port <= 63 => match port % 32 {
            f @ 0..=11 => SerdesLane::new(Sd6g, f + 1),
            f @ 12..=23 => SerdesLane::new(Sd10g, f - 12),
            f => SerdesLane::new(Sd25g, f - 24),
        },

        InterfaceMode::Qsgmii
        | InterfaceMode::Usgmii
        | InterfaceMode::Qxgmii
        | InterfaceMode::Dxgmii10g
        | InterfaceMode::Dxgmii5g => {
            return Err(FaError::InvalidPort { port });
        }

        _ => match port {
            0..=11 => SerdesLane::new(Sd6g, port + 1),
            12..=15 => SerdesLane::new(Sd10g, port - 12),
            48..=55 => SerdesLane::new(Sd10g, port - 44),
            56..=63 => SerdesLane::new(Sd25g, port - 56),
            64 => SerdesLane::new(Sd6g, 0),
            _ => return Err(FaError::InvalidPort { port }),
        },
    };
    Ok(lane)
}

/// Clock multiplier categories.  Each lane has one CMU of each kind.
#[derive(Copy, Clone, Debug, PartialEq, Eq, FromPrimitive)]
pub enum CmuKind {
    Main = 0,
    Aux1 = 1,
    Aux2 = 2,
}

/// Returns the CMU (0..=13) of the given kind that serves `lane_index`
pub fn cmu_for(kind: CmuKind, lane_index: u32) -> u8 {
    match kind {
        CmuKind::Main => match lane_index {
            0..=7 => 2,
            8..=15 => 5,
            16 => 8,
            _ => 11,
        },
        CmuKind::Aux1 => match lane_index {
            0..=1 => 0,
            2..=9 => 3,
            10..=15 => 6,
            16..=18 => 9,
            _ => 12,
        },
        CmuKind::Aux2 => match lane_index {
            0..=3 => 1,
            4..=11 => 4,
            12..=16 => 7,
            17..=20 => 10,
            _ => 13,
        },
    }
}

fn lookup(
    index: u32,
    count: usize,
    f: fn(u8) -> Target,
) -> Result<Target, FaError> {
    if (index as usize) < count {
        Ok(f(index as u8))
    } else {
        Err(FaError::InvalidLane { index })
    }
}

pub fn sd6g_lane(index: u32) -> Result<Target, FaError> {
    lookup(index, SD6G_LANE_COUNT, Target::Sd6gLane)
}

pub fn sd10g_lane(index: u32) -> Result<Target, FaError> {
    lookup(index, SD10G_LANE_COUNT, Target::Sd10gLane)
}

pub fn sd25g_lane(index: u32) -> Result<Target, FaError> {
    lookup(index, SD25G_LANE_COUNT, Target::Sd25gLane)
}

/// Per-lane configuration block, indexed by global SerDes number
pub fn sd_lane(index: u32) -> Result<Target, FaError> {
    lookup(index, SD_LANE_COUNT, Target::SdLane)
}

pub fn sd_cmu(index: u32) -> Result<Target, FaError> {
    lookup(index, CMU_COUNT, Target::SdCmu)
}

pub fn sd_cmu_cfg(index: u32) -> Result<Target, FaError> {
    lookup(index, CMU_COUNT, Target::SdCmuCfg)
}

/// Port device families.  Unlike the SerDes lane, the device behind a chip
/// port is fixed by the die and doesn't depend on the interface mode.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PortDev {
    Dev2g5,
    Dev5g,
    Dev10g,
    Dev25g,
}

impl PortDev {
    pub fn name(&self) -> &'static str {
        match self {
            PortDev::Dev2g5 => "2G5",
            PortDev::Dev5g => "5G",
            PortDev::Dev10g => "10G",
            PortDev::Dev25g => "25G",
        }
    }

    /// Returns `true` for the 5G/10G/25G devices
    pub fn is_high_speed(&self) -> bool {
        !matches!(self, PortDev::Dev2g5)
    }
}

/// Returns the device (and its index within its family) behind a chip port
pub fn port_dev(port: u8) -> Option<(PortDev, u8)> {
    let d = match port {
        0..=11 => (PortDev::Dev5g, port),
        12..=15 => (PortDev::Dev10g, port - 12),
        16..=47 => (PortDev::Dev2g5, port),
        48..=55 => (PortDev::Dev10g, port - 44),
        56..=63 => (PortDev::Dev25g, port - 56),
        64 => (PortDev::Dev5g, 12),
        _ => return None,
    };
    Some(d)
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::FromPrimitive;

    fn lane(pool: SerdesPool, index: u8) -> SerdesLane {
        SerdesLane { pool, index }
    }

    #[test]
    fn default_bins() {
        let m = InterfaceMode::Sfi;
        for p in 0..12 {
            assert_eq!(resolve(p, m), Ok(lane(SerdesPool::Sd6g, p + 1)));
        }
        assert_eq!(resolve(64, m), Ok(lane(SerdesPool::Sd6g, 0)));
        for p in 12..16 {
            assert_eq!(resolve(p, m), Ok(lane(SerdesPool::Sd10g, p - 12)));
        }
        for p in 48..56 {
            assert_eq!(resolve(p, m), Ok(lane(SerdesPool::Sd10g, p - 44)));
        }
        for p in 56..64 {
            assert_eq!(resolve(p, m), Ok(lane(SerdesPool::Sd25g, p - 56)));
        }
    }

    #[test]
    fn default_gap_is_invalid() {
        for p in (16..48).chain(65..=255) {
            assert_eq!(
                resolve(p, InterfaceMode::NoConnection),
                Err(FaError::InvalidPort { port: p })
            );
        }
    }

    #[test]
    fn qsgmii_groups_of_four() {
        let m = InterfaceMode::Qsgmii;
        for p in 0..4 {
            assert_eq!(resolve(p, m), Ok(lane(SerdesPool::Sd10g, 0)));
        }
        for p in 4..8 {
            assert_eq!(resolve(p, m), Ok(lane(SerdesPool::Sd10g, 1)));
        }
        for p in 44..48 {
            assert_eq!(resolve(p, m), Ok(lane(SerdesPool::Sd10g, 11)));
        }
        assert_eq!(resolve(48, m), Err(FaError::InvalidPort { port: 48 }));
    }

    #[test]
    fn usgmii_groups_of_eight() {
        let m = InterfaceMode::Usgmii;
        assert_eq!(resolve(0, m), Ok(lane(SerdesPool::Sd10g, 4)));
        assert_eq!(resolve(7, m), Ok(lane(SerdesPool::Sd10g, 4)));
        assert_eq!(resolve(8, m), Ok(lane(SerdesPool::Sd10g, 5)));
        assert_eq!(resolve(47, m), Ok(lane(SerdesPool::Sd10g, 9)));
        assert_eq!(resolve(48, m), Err(FaError::InvalidPort { port: 48 }));
    }

    #[test]
    fn qxgmii_folds_banks() {
        let m = InterfaceMode::Qxgmii;
        assert_eq!(resolve(7, m), Ok(lane(SerdesPool::Sd10g, 11)));
        assert_eq!(resolve(8, m), Ok(lane(SerdesPool::Sd25g, 0)));
        assert_eq!(resolve(16, m), Ok(lane(SerdesPool::Sd10g, 4)));
        assert_eq!(resolve(63, m), Ok(lane(SerdesPool::Sd25g, 7)));
        assert_eq!(resolve(64, m), Err(FaError::InvalidPort { port: 64 }));
    }

    #[test]
    fn dxgmii_10g_two_windows() {
        let m = InterfaceMode::Dxgmii10g;
        assert_eq!(resolve(0, m), Ok(lane(SerdesPool::Sd10g, 4)));
        assert_eq!(resolve(15, m), Ok(lane(SerdesPool::Sd25g, 7)));
        assert_eq!(resolve(48, m), Ok(lane(SerdesPool::Sd10g, 4)));
        assert_eq!(resolve(56, m), Ok(lane(SerdesPool::Sd25g, 0)));
        for p in 16..48 {
            assert_eq!(resolve(p, m), Err(FaError::InvalidPort { port: p }));
        }
        assert_eq!(resolve(64, m), Err(FaError::InvalidPort { port: 64 }));
    }

    #[test]
    fn dxgmii_5g_three_pools() {
        let m = InterfaceMode::Dxgmii5g;
        assert_eq!(resolve(0, m), Ok(lane(SerdesPool::Sd6g, 1)));
        assert_eq!(resolve(11, m), Ok(lane(SerdesPool::Sd6g, 12)));
        assert_eq!(resolve(12, m), Ok(lane(SerdesPool::Sd10g, 0)));
        assert_eq!(resolve(23, m), Ok(lane(SerdesPool::Sd10g, 11)));
        assert_eq!(resolve(24, m), Ok(lane(SerdesPool::Sd25g, 0)));
        assert_eq!(resolve(31, m), Ok(lane(SerdesPool::Sd25g, 7)));
        assert_eq!(resolve(32, m), Ok(lane(SerdesPool::Sd6g, 1)));
        assert_eq!(resolve(64, m), Err(FaError::InvalidPort { port: 64 }));
    }

    #[test]
    fn cmu_bins() {
        let main = CmuKind::from_u8(0).unwrap();
        assert_eq!(main, CmuKind::Main);
        assert_eq!(cmu_for(main, 7), 2);
        assert_eq!(cmu_for(main, 8), 5);
        assert_eq!(cmu_for(main, 15), 5);
        assert_eq!(cmu_for(main, 16), 8);
        assert_eq!(cmu_for(main, 21), 11);

        let aux1: Vec<u8> = (0..22).map(|i| cmu_for(CmuKind::Aux1, i)).collect();
        assert_eq!(
            aux1,
            [0, 0, 3, 3, 3, 3, 3, 3, 3, 3, 6, 6, 6, 6, 6, 6, 9, 9, 9, 12, 12, 12]
        );
        let aux2: Vec<u8> = (0..22).map(|i| cmu_for(CmuKind::Aux2, i)).collect();
        assert_eq!(
            aux2,
            [1, 1, 1, 1, 4, 4, 4, 4, 4, 4, 4, 4, 7, 7, 7, 7, 7, 10, 10, 10, 10, 13]
        );
        assert_eq!(CmuKind::from_u8(3), None);
    }

    #[test]
    fn target_tables() {
        assert_eq!(sd6g_lane(12), Ok(Target::Sd6gLane(12)));
        assert_eq!(sd6g_lane(13), Err(FaError::InvalidLane { index: 13 }));
        assert_eq!(sd10g_lane(11), Ok(Target::Sd10gLane(11)));
        assert_eq!(sd10g_lane(12), Err(FaError::InvalidLane { index: 12 }));
        assert_eq!(sd25g_lane(7), Ok(Target::Sd25gLane(7)));
        assert_eq!(sd25g_lane(8), Err(FaError::InvalidLane { index: 8 }));
        assert_eq!(sd_lane(32), Ok(Target::SdLane(32)));
        assert_eq!(sd_lane(33), Err(FaError::InvalidLane { index: 33 }));
        assert_eq!(sd_cmu(13), Ok(Target::SdCmu(13)));
        assert_eq!(sd_cmu_cfg(14), Err(FaError::InvalidLane { index: 14 }));
        assert_eq!(
            sd_cmu(u32::MAX),
            Err(FaError::InvalidLane { index: u32::MAX })
        );
    }

    #[test]
    fn serdes_numbers() {
        assert_eq!(lane(SerdesPool::Sd6g, 12).serdes_no(), 12);
        assert_eq!(lane(SerdesPool::Sd10g, 0).serdes_no(), 13);
        assert_eq!(lane(SerdesPool::Sd25g, 7).serdes_no(), 32);
        assert_eq!(
            lane(SerdesPool::Sd25g, 3).lane_cfg_target(),
            Ok(Target::SdLane(28))
        );
        assert_eq!(lane(SerdesPool::Sd10g, 5).target(), Ok(Target::Sd10gLane(5)));
    }

    #[test]
    fn devices() {
        assert_eq!(port_dev(0), Some((PortDev::Dev5g, 0)));
        assert_eq!(port_dev(64), Some((PortDev::Dev5g, 12)));
        assert_eq!(port_dev(13), Some((PortDev::Dev10g, 1)));
        assert_eq!(port_dev(20), Some((PortDev::Dev2g5, 20)));
        assert_eq!(port_dev(49), Some((PortDev::Dev10g, 5)));
        assert_eq!(port_dev(63), Some((PortDev::Dev25g, 7)));
        assert_eq!(port_dev(65), None);
    }
}
