// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use drv_fa_serdes::config::InterfaceMode;
use drv_fa_serdes::topology::{
    cmu_for, resolve, CmuKind, SerdesLane, SerdesPool, PORT_COUNT,
    SD_LANE_COUNT,
};
use drv_fa_serdes::FaError;
use proptest::sample::select;
use std::collections::BTreeMap;

const MODES: [InterfaceMode; 12] = [
    InterfaceMode::Qsgmii,
    InterfaceMode::Usgmii,
    InterfaceMode::Qxgmii,
    InterfaceMode::Dxgmii10g,
    InterfaceMode::Dxgmii5g,
    InterfaceMode::Sgmii,
    InterfaceMode::Serdes,
    InterfaceMode::Fx100,
    InterfaceMode::Vaui,
    InterfaceMode::Sfi,
    InterfaceMode::Sxgmii,
    InterfaceMode::NoConnection,
];

/// Ports that each mode accepts, and how many ports share one lane
fn valid_ports(mode: InterfaceMode) -> (Vec<u8>, usize) {
    match mode {
        InterfaceMode::Qsgmii => ((0..=47).collect(), 4),
        InterfaceMode::Usgmii => ((0..=47).collect(), 8),
        InterfaceMode::Qxgmii => ((0..=63).collect(), 4),
        InterfaceMode::Dxgmii10g => ((0..=15).chain(48..=63).collect(), 2),
        InterfaceMode::Dxgmii5g => ((0..=63).collect(), 2),
        _ => ((0..=15).chain(48..=64).collect(), 1),
    }
}

/// Groups the valid ports of a mode by the lane they land on
fn lanes_of(mode: InterfaceMode) -> BTreeMap<SerdesLane, Vec<u8>> {
    let mut lanes: BTreeMap<SerdesLane, Vec<u8>> = BTreeMap::new();
    for p in valid_ports(mode).0 {
        let lane = resolve(p, mode).unwrap();
        lanes.entry(lane).or_default().push(p);
    }
    lanes
}

#[test]
fn every_mode_fans_out_evenly() {
    for mode in MODES {
        let (ports, per_lane) = valid_ports(mode);
        let lanes = lanes_of(mode);
        assert_eq!(lanes.len() * per_lane, ports.len(), "{:?}", mode);
        for (lane, ports) in &lanes {
            assert_eq!(ports.len(), per_lane, "{:?} on {:?}", mode, lane);
        }
    }
}

#[test]
fn qsgmii_and_usgmii_use_neighbouring_ports() {
    for mode in [InterfaceMode::Qsgmii, InterfaceMode::Usgmii] {
        for ports in lanes_of(mode).values() {
            let first = ports[0];
            let expected: Vec<u8> =
                (first..first + ports.len() as u8).collect();
            assert_eq!(ports, &expected);
        }
    }
}

#[test]
fn single_lane_bins() {
    let sd6g = SerdesPool::Sd6g;
    let sd10g = SerdesPool::Sd10g;
    let sd25g = SerdesPool::Sd25g;
    let at = |port| resolve(port, InterfaceMode::NoConnection).unwrap();

    for p in 0..=11 {
        assert_eq!(at(p), SerdesLane { pool: sd6g, index: p + 1 });
    }
    assert_eq!(at(64), SerdesLane { pool: sd6g, index: 0 });
    for p in 12..=15 {
        assert_eq!(at(p), SerdesLane { pool: sd10g, index: p - 12 });
    }
    for p in 48..=55 {
        assert_eq!(at(p), SerdesLane { pool: sd10g, index: p - 44 });
    }
    for p in 56..=63 {
        assert_eq!(at(p), SerdesLane { pool: sd25g, index: p - 56 });
    }
}

#[test]
fn multiplexed_examples() {
    let q = |p| resolve(p, InterfaceMode::Qsgmii).unwrap();
    for p in 0..=3 {
        assert_eq!(q(p), SerdesLane { pool: SerdesPool::Sd10g, index: 0 });
    }
    for p in 4..=7 {
        assert_eq!(q(p), SerdesLane { pool: SerdesPool::Sd10g, index: 1 });
    }
    for p in 44..=47 {
        assert_eq!(q(p), SerdesLane { pool: SerdesPool::Sd10g, index: 11 });
    }

    assert_eq!(
        resolve(8, InterfaceMode::Qxgmii),
        Ok(SerdesLane { pool: SerdesPool::Sd25g, index: 0 })
    );
    assert_eq!(
        resolve(7, InterfaceMode::Qxgmii),
        Ok(SerdesLane { pool: SerdesPool::Sd10g, index: 11 })
    );
}

#[test]
fn main_cmu_examples() {
    assert_eq!(cmu_for(CmuKind::Main, 7), 2);
    assert_eq!(cmu_for(CmuKind::Main, 16), 8);
    assert_eq!(cmu_for(CmuKind::Main, 21), 11);
}

#[test]
fn out_of_range_port() {
    assert_eq!(
        resolve(100, InterfaceMode::NoConnection),
        Err(FaError::InvalidPort { port: 100 })
    );
    assert_eq!(
        resolve(48, InterfaceMode::Qsgmii),
        Err(FaError::InvalidPort { port: 48 })
    );
}

proptest::proptest! {
    #[test]
    fn resolve_is_total(port: u8, mode in select(MODES.to_vec())) {
        let valid = valid_ports(mode).0.contains(&port);
        match resolve(port, mode) {
            Ok(_) => {
                proptest::prop_assert!(valid);
            }
            Err(e) => {
                proptest::prop_assert!(!valid);
                proptest::prop_assert_eq!(e, FaError::InvalidPort { port });
            }
        }
    }

    #[test]
    fn resolved_lanes_exist(port in 0u8..PORT_COUNT as u8, mode in select(MODES.to_vec())) {
        if let Ok(lane) = resolve(port, mode) {
            proptest::prop_assert!(usize::from(lane.index) < lane.pool.lane_count());
            proptest::prop_assert!(usize::from(lane.serdes_no()) < SD_LANE_COUNT);
            proptest::prop_assert!(lane.target().is_ok());
            proptest::prop_assert!(lane.lane_cfg_target().is_ok());
        }
    }

    #[test]
    fn resolve_is_repeatable(port: u8, mode in select(MODES.to_vec())) {
        proptest::prop_assert_eq!(resolve(port, mode), resolve(port, mode));
    }

    #[test]
    fn cmus_exist(index in 0u32..SD_LANE_COUNT as u32, kind in 0u8..3) {
        let kind = match kind {
            0 => CmuKind::Main,
            1 => CmuKind::Aux1,
            _ => CmuKind::Aux2,
        };
        proptest::prop_assert!(cmu_for(kind, index) < 14);
    }
}
