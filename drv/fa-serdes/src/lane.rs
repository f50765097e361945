// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Lane-level equalizer controls.
//!
//! The 6G and 10G pools are both built from the sd10g28 macro and share its
//! register layout; the 25G pool uses the sd25g28 layout.
use crate::regs::{sd10g, sd25g, sd_lane, Target};
use crate::topology::{SerdesLane, SerdesPool};
use crate::trace::{self, Trace};
use crate::FaRw;
use core::fmt;
use fa_err::FaError;

/// TX equalizer taps of a 6G/10G lane
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TxTaps {
    /// Post-cursor
    pub dly: u16,
    /// Pre-cursor
    pub adv: u16,
    /// Driver amplitude; the top bits pick the driver base current and the
    /// low six bits the bias trim
    pub ampl: u16,
}

/// Adapted DFE taps, as reported by the lane
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct DfeTaps {
    pub h1: u32,
    pub h2: u32,
    pub h3: u32,
    pub h4: u32,
    pub h5: u32,
    pub dlev: u32,
}

impl fmt::Display for DfeTaps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "ln_h1 (max 0x1F)  :0x{:x}", self.h1)?;
        writeln!(f, "ln_h2 (max 0x1F)  :0x{:x}", self.h2)?;
        writeln!(f, "ln_h3 (max 0xF)   :0x{:x}", self.h3)?;
        writeln!(f, "ln_h4 (max 0xF)   :0x{:x}", self.h4)?;
        writeln!(f, "ln_h5 (max 0xF)   :0x{:x}", self.h5)?;
        writeln!(f, "ln_dlev (max 0x7F):0x{:x}", self.dlev)
    }
}

/// Receive CTLE/VGA settings.  The two macros expose different knobs.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CtleSettings {
    Sd10g {
        manual: bool,
        vga_ctrl: u32,
        vga_cp: u32,
        eqc_force: u32,
        eq_res: u32,
    },
    Sd25g {
        vga_manual: bool,
        ctle_manual: bool,
        vga_ctrl: u32,
        eqr_force: u32,
        eqc_force: u32,
    },
}

impl fmt::Display for CtleSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            CtleSettings::Sd10g {
                manual,
                vga_ctrl,
                vga_cp,
                eqc_force,
                eq_res,
            } => {
                writeln!(f, "CTLE in manual mode  :{}", manual as u8)?;
                writeln!(f, "VGA resistor set to  :{}", vga_ctrl)?;
                writeln!(f, "VGA capacitor set to :{}", vga_cp)?;
                writeln!(f, "CTLE C set to        :{}", eqc_force)?;
                writeln!(f, "CTLE GAIN set to     :{}", eq_res)
            }
            CtleSettings::Sd25g {
                vga_manual,
                ctle_manual,
                vga_ctrl,
                eqr_force,
                eqc_force,
            } => {
                writeln!(f, "VGA in manual mode   :{}", vga_manual as u8)?;
                writeln!(f, "CTLE in manual mode  :{}", ctle_manual as u8)?;
                writeln!(f, "VGA set to           :{}", vga_ctrl)?;
                writeln!(f, "CTLE R set to        :{}", eqr_force)?;
                writeln!(f, "CTLE C set to        :{}", eqc_force)
            }
        }
    }
}

/// Manual equalizer overrides, as entered on the debug CLI
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DebugParams {
    /// H1 through H5, then DLEV (only used on 25G lanes)
    Dfe([u32; 6]),
    /// 10G: VGA resistor, VGA capacitor, CTLE C, CTLE gain.
    /// 25G: CTLE R, CTLE C, VGA (the last value is unused).
    Ctle([u32; 4]),
    TxEq(TxTaps),
}

/// Returns the lane's register block, refusing 25G lanes
fn sd10g_layout(lane: SerdesLane) -> Result<Target, FaError> {
    match lane.pool {
        SerdesPool::Sd6g | SerdesPool::Sd10g => lane.target(),
        SerdesPool::Sd25g => Err(FaError::UnsupportedLane),
    }
}

/// Pulses the lane reset in the per-lane configuration block
fn lane_reset<R: FaRw>(rw: &R, lane: SerdesLane) -> Result<(), FaError> {
    let cfg = sd_lane::sd_lane_cfg(lane.lane_cfg_target()?);
    rw.modify(cfg, |r| r.set_lane_rst(true))?;
    trace::sleep_ms(1);
    rw.modify(cfg, |r| r.set_lane_rst(false))
}

pub fn kr_tap_set<R: FaRw>(
    rw: &R,
    lane: SerdesLane,
    taps: TxTaps,
) -> Result<(), FaError> {
    let t = sd10g_layout(lane)?;
    rw.modify(sd10g::lane_04(t), |r| r.set_tap_dly(taps.dly.into()))?;
    rw.modify(sd10g::lane_02(t), |r| r.set_tap_adv(taps.adv.into()))?;
    rw.modify(sd10g::lane_33(t), |r| {
        r.set_itx_ipdriver_base(u32::from(taps.ampl >> 6))
    })?;
    rw.modify(sd10g::lane_52(t), |r| {
        r.set_ibias_tune_reserve(u32::from(taps.ampl & 0x3f))
    })
}

pub fn kr_tap_get<R: FaRw>(rw: &R, lane: SerdesLane) -> Result<TxTaps, FaError> {
    let t = sd10g_layout(lane)?;
    let dly = rw.read(sd10g::lane_04(t))?.tap_dly();
    let adv = rw.read(sd10g::lane_02(t))?.tap_adv();
    let base = rw.read(sd10g::lane_33(t))?.itx_ipdriver_base();
    let trim = rw.read(sd10g::lane_52(t))?.ibias_tune_reserve();
    Ok(TxTaps {
        dly: dly as u16,
        adv: adv as u16,
        ampl: ((base << 6) + trim) as u16,
    })
}

/// Turns the receive DFE on or off
pub fn dfe_set<R: FaRw>(
    rw: &R,
    lane: SerdesLane,
    ena: bool,
) -> Result<(), FaError> {
    let t = lane.target()?;
    let taps = if ena { 0x1f } else { 0 };

    if lane.pool == SerdesPool::Sd25g {
        rw.modify(sd25g::lane_0e(t), |r| r.set_en_dfedig(ena))?;
        rw.modify(sd25g::lane_0d(t), |r| r.set_dfeck_en(true))?;
        rw.modify(sd25g::lane_1c(t), |r| r.set_dfe_pd(ena))?;
        rw.modify(sd25g::lane_0f(t), |r| r.set_dfetap_en(taps))?;
        rw.modify(sd25g::lane_18(t), |r| r.set_erramp_pd(!ena))?;
        rw.modify(sd25g::lane_1d(t), |r| r.set_pi_dfe_en(ena))?;
        rw.modify(sd25g::lane_0d(t), |r| r.set_summer_en(true))?;
        rw.modify(sd25g::lane_2e(t), |r| r.set_rstn_dfedig(ena))?;
        lane_reset(rw, lane)?;
    } else {
        rw.modify(sd10g::lane_23(t), |r| {
            r.set_en_dfedig(ena);
            r.set_dfeck_en(ena);
            r.set_erramp_pd(!ena);
            r.set_dfe_pd(!ena);
        })?;
        rw.modify(sd10g::lane_22(t), |r| r.set_dfetap_en(taps))?;
        rw.modify(sd10g::lane_1a(t), |r| r.set_pi_dfe_en(ena))?;
        rw.modify(sd10g::lane_31(t), |r| r.set_rstn_dfedig(ena))?;
        if ena {
            rw.modify(sd10g::lane_1c(t), |r| r.set_dfedig_byp(0))?;
        } else {
            lane_reset(rw, lane)?;
        }
        rw.modify(sd10g::lane_31(t), |r| r.set_rstn_dfedig(ena))?;
    }

    trace::record(Trace::DfeSet {
        serdes_no: lane.serdes_no(),
        enabled: ena,
    });
    Ok(())
}

pub fn dfe_read<R: FaRw>(rw: &R, lane: SerdesLane) -> Result<DfeTaps, FaError> {
    let t = lane.target()?;
    let taps = if lane.pool == SerdesPool::Sd25g {
        DfeTaps {
            h1: rw.read(sd25g::lane_ca(t))?.h1(),
            h2: rw.read(sd25g::lane_cb(t))?.h2(),
            h3: rw.read(sd25g::lane_cc(t))?.h3(),
            h4: rw.read(sd25g::lane_cd(t))?.h4(),
            h5: rw.read(sd25g::lane_ce(t))?.h5(),
            dlev: rw.read(sd25g::lane_cf(t))?.dlev(),
        }
    } else {
        DfeTaps {
            h1: rw.read(sd10g::lane_c5(t))?.h1(),
            h2: rw.read(sd10g::lane_c6(t))?.h2(),
            h3: rw.read(sd10g::lane_c7(t))?.h3(),
            h4: rw.read(sd10g::lane_c8(t))?.h4(),
            h5: rw.read(sd10g::lane_c9(t))?.h5(),
            dlev: rw.read(sd10g::lane_ca(t))?.dlev(),
        }
    };
    Ok(taps)
}

pub fn ctle_read<R: FaRw>(
    rw: &R,
    lane: SerdesLane,
) -> Result<CtleSettings, FaError> {
    let t = lane.target()?;
    let s = if lane.pool == SerdesPool::Sd25g {
        CtleSettings::Sd25g {
            vga_manual: rw.read(sd25g::lane_23(t))?.vga_byp(),
            ctle_manual: rw.read(sd25g::lane_1f(t))?.eqr_byp(),
            vga_ctrl: rw.read(sd25g::lane_21(t))?.vga_ctrl_byp(),
            eqr_force: rw.read(sd25g::lane_22(t))?.eqr_force(),
            eqc_force: rw.read(sd25g::lane_1c(t))?.eqc_force(),
        }
    } else {
        let manual = rw.read(sd10g::lane_0d(t))?.eqr_byp();
        let vga = rw.read(sd10g::lane_2f(t))?;
        CtleSettings::Sd10g {
            manual,
            vga_ctrl: vga.vga_ctrl(),
            vga_cp: vga.vga_cp(),
            eqc_force: rw.read(sd10g::lane_0e(t))?.eqc_force(),
            eq_res: rw.read(sd10g::lane_0b(t))?.eq_res(),
        }
    };
    Ok(s)
}

/// Runs the receiver offset calibration of a 25G lane
pub fn offset_calibrate<R: FaRw>(
    rw: &R,
    lane: SerdesLane,
) -> Result<(), FaError> {
    if lane.pool != SerdesPool::Sd25g {
        return Err(FaError::UnsupportedLane);
    }
    let t = lane.target()?;

    rw.modify(sd25g::cmu_ff(t), |r| r.set_register_table_index(0))?;
    rw.modify(sd25g::lane_1c(t), |r| r.set_dfe_pd(true))?;
    rw.modify(sd25g::lane_44(t), |r| {
        r.set_rx_reserve(r.rx_reserve() & 0xbf)
    })?;
    rw.modify(sd25g::lane_0d(t), |r| r.set_dmux_pd(false))?;
    rw.modify(sd25g::lane_0e(t), |r| r.set_dmux_clk_pd(false))?;

    // Toggling the DFE demux power-down kicks off the calibration
    rw.modify(sd25g::lane_1c(t), |r| r.set_dfedmx_pd(false))?;
    rw.modify(sd25g::lane_1c(t), |r| r.set_dfedmx_pd(true))?;

    rw.modify(sd25g::lane_1c(t), |r| r.set_dfe_pd(false))?;
    rw.modify(sd25g::cmu_ff(t), |r| r.set_register_table_index(0xff))?;

    trace::record(Trace::OffsetCalibrated {
        serdes_no: lane.serdes_no(),
    });
    Ok(())
}

pub fn debug_set<R: FaRw>(
    rw: &R,
    lane: SerdesLane,
    params: DebugParams,
) -> Result<(), FaError> {
    let t = lane.target()?;
    let is_25g = lane.pool == SerdesPool::Sd25g;

    match params {
        DebugParams::Dfe(p) if is_25g => {
            rw.modify(sd25g::lane_14(t), |r| r.set_dfe_byp_h1(p[0]))?;
            rw.modify(sd25g::lane_13(t), |r| r.set_dfe_byp_h2(p[1]))?;
            rw.modify(sd25g::lane_12(t), |r| r.set_dfe_byp_h3(p[2]))?;
            rw.modify(sd25g::lane_11(t), |r| {
                r.set_dfe_byp_h4(p[3]);
                r.set_dfe_byp_h5(p[4]);
            })?;
            rw.modify(sd25g::lane_10(t), |r| r.set_dfe_dlev(p[5]))?;
            rw.modify(sd25g::lane_15(t), |r| r.set_dfedig_byp(0x3e))?;
            rw.modify(sd25g::lane_40(t), |r| r.set_r_dfe_rstn(true))?;
            lane_reset(rw, lane)?;
        }
        DebugParams::Dfe(p) => {
            rw.modify(sd10g::lane_1d(t), |r| r.set_dfe_byp_h1(p[0]))?;
            rw.modify(sd10g::lane_1e(t), |r| r.set_dfe_byp_h2(p[1]))?;
            rw.modify(sd10g::lane_1f(t), |r| r.set_dfe_byp_h3(p[2]))?;
            rw.modify(sd10g::lane_1f(t), |r| r.set_dfe_byp_h4(p[3]))?;
            rw.modify(sd10g::lane_20(t), |r| r.set_dfe_byp_h5(p[4]))?;
            rw.modify(sd10g::lane_1c(t), |r| r.set_dfedig_byp(0x3e))?;
            rw.modify(sd10g::lane_83(t), |r| r.set_dfe_rstn(true))?;
        }
        DebugParams::Ctle(p) if is_25g => {
            rw.modify(sd25g::cmu_ff(t), |r| r.set_register_table_index(0))?;
            rw.modify(sd25g::lane_23(t), |r| r.set_vga_byp(true))?;
            rw.modify(sd25g::lane_1f(t), |r| r.set_eqr_byp(true))?;
            rw.modify(sd25g::lane_22(t), |r| r.set_eqr_force(p[0]))?;
            rw.modify(sd25g::lane_1c(t), |r| r.set_eqc_force(p[1]))?;
            rw.modify(sd25g::lane_21(t), |r| r.set_vga_ctrl_byp(p[2]))?;

            // Pulse the DFE reset, leaving it as we found it
            let rstn = rw.read(sd25g::lane_40(t))?.r_dfe_rstn();
            rw.modify(sd25g::lane_40(t), |r| r.set_r_dfe_rstn(true))?;
            rw.modify(sd25g::lane_40(t), |r| r.set_r_dfe_rstn(rstn))?;
        }
        DebugParams::Ctle(p) => {
            rw.modify(sd10g::lane_0d(t), |r| r.set_eqr_byp(true))?;
            rw.modify(sd10g::lane_2f(t), |r| r.set_vga_ctrl(p[0]))?;
            rw.modify(sd10g::lane_2f(t), |r| r.set_vga_cp(p[1]))?;
            rw.modify(sd10g::lane_0e(t), |r| r.set_eqc_force(p[2]))?;
            rw.modify(sd10g::lane_0b(t), |r| r.set_eq_res(p[3]))?;

            let rstn = rw.read(sd10g::lane_83(t))?.dfe_rstn();
            rw.modify(sd10g::lane_83(t), |r| r.set_dfe_rstn(true))?;
            rw.modify(sd10g::lane_83(t), |r| r.set_dfe_rstn(rstn))?;
        }
        DebugParams::TxEq(taps) => kr_tap_set(rw, lane, taps)?,
    }
    Ok(())
}

/// Writes a board-specific TX post-cursor to a lane
pub fn set_post_cursor<R: FaRw>(
    rw: &R,
    lane: SerdesLane,
    value: u32,
) -> Result<(), FaError> {
    let t = lane.target()?;
    if lane.pool == SerdesPool::Sd25g {
        rw.modify(sd25g::lane_07(t), |r| r.set_en_dly(true))?;
        rw.modify(sd25g::lane_03(t), |r| r.set_tap_dly(value))?;
    } else {
        rw.modify(sd10g::lane_04(t), |r| r.set_tap_dly(value))?;
    }
    trace::record(Trace::PostCursor {
        serdes_no: lane.serdes_no(),
        value,
    });
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fake::{Access, FakeRw};

    const SD10G_5: SerdesLane = SerdesLane {
        pool: SerdesPool::Sd10g,
        index: 5,
    };
    const SD25G_2: SerdesLane = SerdesLane {
        pool: SerdesPool::Sd25g,
        index: 2,
    };
    const SD6G_1: SerdesLane = SerdesLane {
        pool: SerdesPool::Sd6g,
        index: 1,
    };
    const L: u16 = sd25g::LANE_BASE;

    #[test]
    fn kr_taps_round_trip() {
        let rw = FakeRw::new();
        let taps = TxTaps {
            dly: 0x0a,
            adv: 0x3,
            ampl: 0x1c5,
        };
        kr_tap_set(&rw, SD10G_5, taps).unwrap();

        let t = Target::Sd10gLane(5);
        assert_eq!(rw.get(t, 0x04), 0x0a);
        assert_eq!(rw.get(t, 0x02), 0x30);
        assert_eq!(rw.get(t, 0x33), 0x7);
        assert_eq!(rw.get(t, 0x52), 0x05);
        assert_eq!(kr_tap_get(&rw, SD10G_5), Ok(taps));
    }

    #[test]
    fn kr_tap_get_ignores_reserved_bits() {
        let rw = FakeRw::new();
        let t = Target::Sd6gLane(1);
        rw.set(t, 0x33, 0xf9);
        rw.set(t, 0x52, 0xc2);
        let taps = kr_tap_get(&rw, SD6G_1).unwrap();
        assert_eq!(taps.ampl, (1 << 6) + 2);
    }

    #[test]
    fn kr_taps_need_sd10g_layout() {
        let rw = FakeRw::new();
        assert_eq!(kr_tap_get(&rw, SD25G_2), Err(FaError::UnsupportedLane));
        assert_eq!(
            kr_tap_set(&rw, SD25G_2, TxTaps::default()),
            Err(FaError::UnsupportedLane)
        );
        assert!(rw.log().is_empty());
    }

    #[test]
    fn dfe_disable_10g_pulses_lane_reset() {
        let rw = FakeRw::new();
        let t = Target::Sd10gLane(5);
        rw.set(t, 0x23, 0b0110);
        rw.set(t, 0x22, 0x1f);
        trace::take_slept_ms();

        dfe_set(&rw, SD10G_5, false).unwrap();
        assert_eq!(rw.get(t, 0x23), 0b1001);
        assert_eq!(rw.get(t, 0x22), 0);
        assert_eq!(rw.get(t, 0x1a), 0);

        let cfg = Target::SdLane(18);
        let resets: Vec<u32> = rw
            .writes()
            .into_iter()
            .filter(|w| w.0 == cfg)
            .map(|w| w.2)
            .collect();
        assert_eq!(resets, [1, 0]);
        assert_eq!(trace::take_slept_ms(), 1);
    }

    #[test]
    fn dfe_enable_10g() {
        let rw = FakeRw::new();
        let t = Target::Sd10gLane(5);
        rw.set(t, 0x1c, 0x3f);

        dfe_set(&rw, SD10G_5, true).unwrap();
        assert_eq!(rw.get(t, 0x23), 0b0110);
        assert_eq!(rw.get(t, 0x22), 0x1f);
        assert_eq!(rw.get(t, 0x1a), 1);
        assert_eq!(rw.get(t, 0x31), 1);
        assert_eq!(rw.get(t, 0x1c), 0);

        // No lane reset, and nothing written outside the lane block
        assert!(rw.writes().iter().all(|w| w.0 == t));
    }

    #[test]
    fn dfe_25g() {
        let rw = FakeRw::new();
        let t = Target::Sd25gLane(2);
        trace::take();

        dfe_set(&rw, SD25G_2, true).unwrap();
        assert_eq!(rw.get(t, L + 0x0e), 0b100);
        assert_eq!(rw.get(t, L + 0x0d), 0b011);
        assert_eq!(rw.get(t, L + 0x0f), 0x1f);
        assert_eq!(rw.get(t, L + 0x18), 0);
        assert_eq!(rw.get(t, L + 0x1d), 1);
        assert_eq!(rw.get(t, L + 0x2e), 1);

        // 25G lanes always pulse the lane reset, through global SerDes 27
        let last = rw.writes().pop().unwrap();
        assert_eq!(last, (Target::SdLane(27), 0, 0));
        assert_eq!(
            trace::take().last(),
            Some(&Trace::DfeSet {
                serdes_no: 27,
                enabled: true
            })
        );
    }

    #[test]
    fn dfe_read_both_layouts() {
        let rw = FakeRw::new();
        let t10 = Target::Sd10gLane(5);
        for (i, off) in (0xc5..=0xca).enumerate() {
            rw.set(t10, off, 0x100 | (i as u32 + 1));
        }
        let t25 = Target::Sd25gLane(2);
        for (i, off) in (0xca..=0xcf).enumerate() {
            rw.set(t25, L + off, i as u32 + 7);
        }

        assert_eq!(
            dfe_read(&rw, SD10G_5),
            Ok(DfeTaps {
                h1: 1,
                h2: 2,
                h3: 3,
                h4: 4,
                h5: 5,
                dlev: 6
            })
        );
        let taps = dfe_read(&rw, SD25G_2).unwrap();
        assert_eq!((taps.h1, taps.dlev), (7, 12));
        assert!(format!("{}", taps).starts_with("ln_h1 (max 0x1F)  :0x7\n"));
    }

    #[test]
    fn ctle_read_10g() {
        let rw = FakeRw::new();
        let t = Target::Sd10gLane(5);
        rw.set(t, 0x0d, 1);
        rw.set(t, 0x2f, 0x5a);
        rw.set(t, 0x0e, 0x3);
        rw.set(t, 0x0b, 0xc);
        assert_eq!(
            ctle_read(&rw, SD10G_5),
            Ok(CtleSettings::Sd10g {
                manual: true,
                vga_ctrl: 0xa,
                vga_cp: 0x5,
                eqc_force: 3,
                eq_res: 12,
            })
        );
    }

    #[test]
    fn offset_calibration() {
        let rw = FakeRw::new();
        let t = Target::Sd25gLane(2);
        rw.set(t, L + 0x44, 0xff);
        rw.set(t, L + 0x0d, 0b100);
        rw.set(t, L + 0x0e, 0b010);

        offset_calibrate(&rw, SD25G_2).unwrap();
        assert_eq!(rw.get(t, L + 0x44), 0xbf);
        assert_eq!(rw.get(t, L + 0x0d), 0);
        assert_eq!(rw.get(t, L + 0x0e), 0);
        assert_eq!(rw.get(t, L + 0x1c), 0b10);
        assert_eq!(rw.get(t, 0xff), 0xff);

        let dfedmx: Vec<u32> = rw
            .writes()
            .into_iter()
            .filter(|w| w.1 == L + 0x1c)
            .map(|w| w.2)
            .collect();
        assert_eq!(dfedmx, [0b01, 0b01, 0b11, 0b10]);
    }

    #[test]
    fn offset_calibration_is_25g_only() {
        let rw = FakeRw::new();
        assert_eq!(
            offset_calibrate(&rw, SD10G_5),
            Err(FaError::UnsupportedLane)
        );
        assert!(rw.log().is_empty());
    }

    #[test]
    fn debug_dfe_10g_writes_h4_field() {
        let rw = FakeRw::new();
        let t = Target::Sd10gLane(5);
        debug_set(&rw, SD10G_5, DebugParams::Dfe([0x11, 0x12, 0x3, 0x9, 0x4, 0]))
            .unwrap();
        assert_eq!(rw.get(t, 0x1d), 0x11);
        assert_eq!(rw.get(t, 0x1e), 0x12);
        assert_eq!(rw.get(t, 0x1f), 0x93);
        assert_eq!(rw.get(t, 0x20), 0x4);
        assert_eq!(rw.get(t, 0x1c), 0x3e);
        assert_eq!(rw.get(t, 0x83), 1);
    }

    #[test]
    fn debug_ctle_restores_dfe_reset() {
        let rw = FakeRw::new();
        let t = Target::Sd25gLane(2);
        debug_set(&rw, SD25G_2, DebugParams::Ctle([5, 6, 7, 0])).unwrap();
        assert_eq!(rw.get(t, L + 0x22), 5);
        assert_eq!(rw.get(t, L + 0x1c), 6 << 4);
        assert_eq!(rw.get(t, L + 0x21), 7);

        let rstn: Vec<u32> = rw
            .writes()
            .into_iter()
            .filter(|w| w.1 == L + 0x40)
            .map(|w| w.2)
            .collect();
        assert_eq!(rstn, [1, 0]);
    }

    #[test]
    fn debug_txeq_sets_taps() {
        let rw = FakeRw::new();
        let taps = TxTaps {
            dly: 1,
            adv: 2,
            ampl: 3,
        };
        debug_set(&rw, SD6G_1, DebugParams::TxEq(taps)).unwrap();
        assert_eq!(kr_tap_get(&rw, SD6G_1), Ok(taps));
    }

    #[test]
    fn post_cursor() {
        let rw = FakeRw::new();
        set_post_cursor(&rw, SD25G_2, 0x7).unwrap();
        assert_eq!(
            rw.log(),
            [
                Access::Read(Target::Sd25gLane(2), L + 0x07),
                Access::Write(Target::Sd25gLane(2), L + 0x07, 1),
                Access::Read(Target::Sd25gLane(2), L + 0x03),
                Access::Write(Target::Sd25gLane(2), L + 0x03, 7),
            ]
        );

        set_post_cursor(&rw, SD6G_1, 0x3).unwrap();
        assert_eq!(rw.get(Target::Sd6gLane(1), 0x04), 3);
    }
}
