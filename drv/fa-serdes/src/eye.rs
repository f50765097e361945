// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Receive eye diagnostics.
//!
//! Both macros have an "iscan" engine that sweeps the sampling point across
//! the eye.  It can either report a single figure of merit (eye height or
//! area) or, stepping the reference voltage one row at a time, dump the
//! pass/fail map of the whole eye.
use crate::regs::{sd10g, sd25g};
use crate::topology::{SerdesLane, SerdesPool};
use crate::trace::{self, Trace};
use crate::FaRw;
use core::fmt;
use fa_err::FaError;
use static_assertions::const_assert_eq;

/// Time budget for one scan, shared by every step of a full-eye scan
pub const EYE_SCAN_POLL_MS: u32 = 500;

/// Number of reference voltage steps in a full-eye scan
pub const VREF_STEPS: usize = 128;

/// Result registers per reference voltage step (8 bits each)
pub const ROW_BYTES: usize = sd10g::ISCAN_RESULT_COUNT;
const_assert_eq!(ROW_BYTES, sd25g::ISCAN_RESULT_COUNT);

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EyeScanKind {
    FullEye,
    Height,
    Area,
}

/// Pass/fail map of the eye, one row per reference voltage step
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EyeDiagram {
    rows: [[u8; ROW_BYTES]; VREF_STEPS],
    len: usize,
}

impl EyeDiagram {
    fn new() -> Self {
        Self {
            rows: [[0; ROW_BYTES]; VREF_STEPS],
            len: 0,
        }
    }

    fn push(&mut self, row: [u8; ROW_BYTES]) {
        if let Some(r) = self.rows.get_mut(self.len) {
            *r = row;
            self.len += 1;
        }
    }

    /// Returns the rows that were collected, lowest reference voltage first.
    /// A scan that ran out of time has fewer than [`VREF_STEPS`] rows.
    pub fn rows(&self) -> &[[u8; ROW_BYTES]] {
        &self.rows[..self.len]
    }

    pub fn is_complete(&self) -> bool {
        self.len == VREF_STEPS
    }
}

/// Prints every eighth row (and the top row), top of the eye first.  Each
/// row is 72 bits, the last result register on the left.
impl fmt::Display for EyeDiagram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows().iter().enumerate().rev() {
            if i % 8 != 0 && i != VREF_STEPS - 1 {
                continue;
            }
            write!(f, "{:<5} ", i)?;
            for b in row.iter().rev() {
                write!(f, "{:08b}", b)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EyeMeasurement {
    Height(u32),
    Area(u32),
    Diagram(EyeDiagram),
}

impl fmt::Display for EyeMeasurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EyeMeasurement::Height(h) => writeln!(f, "Eye height = {}", h),
            EyeMeasurement::Area(a) => writeln!(f, "Eye area = {}", a),
            EyeMeasurement::Diagram(d) => write!(f, "{}", d),
        }
    }
}

/// Polls until `done` returns true, sleeping 1 ms between polls.  `waited`
/// is charged against [`EYE_SCAN_POLL_MS`]; returns `false` once the budget
/// is spent.
fn poll_done(
    waited: &mut u32,
    mut done: impl FnMut() -> Result<bool, FaError>,
) -> Result<bool, FaError> {
    loop {
        if done()? {
            return Ok(true);
        }
        if *waited >= EYE_SCAN_POLL_MS {
            return Ok(false);
        }
        trace::sleep_ms(1);
        *waited += 1;
    }
}

/// Runs an eye scan on the given lane.  The lane's DFE and scan settings are
/// restored afterwards.
///
/// SD6G lanes don't support eye scans.
pub fn eye_scan<R: FaRw>(
    rw: &R,
    lane: SerdesLane,
    kind: EyeScanKind,
) -> Result<EyeMeasurement, FaError> {
    match lane.pool {
        SerdesPool::Sd6g => Err(FaError::UnsupportedLane),
        SerdesPool::Sd10g => eye_scan_10g(rw, lane, kind),
        SerdesPool::Sd25g => eye_scan_25g(rw, lane, kind),
    }
}

fn eye_scan_10g<R: FaRw>(
    rw: &R,
    lane: SerdesLane,
    kind: EyeScanKind,
) -> Result<EyeMeasurement, FaError> {
    let t = lane.target()?;
    let lane_23 = rw.read(sd10g::lane_23(t))?;
    let lane_1a = rw.read(sd10g::lane_1a(t))?;

    if kind == EyeScanKind::FullEye {
        rw.modify(sd10g::lane_93(t), |r| r.set_reg_manual(true))?;
        rw.modify(sd10g::lane_94(t), |r| r.set_iscan_reg(true))?;
        rw.modify(sd10g::lane_9e(t), |r| r.set_rxeq_reg(true))?;
        rw.modify(sd10g::lane_2b(t), |r| r.set_fom_sel(true))?;
    } else {
        rw.modify(sd10g::lane_49(t), |r| r.set_figmerit_sel(false))?;
        rw.modify(sd10g::lane_2b(t), |r| {
            r.set_fom_sel(false);
            r.set_man_volt_en(false);
        })?;
        rw.modify(sd10g::lane_2d(t), |r| r.set_man_volt_sel(0))?;
        rw.modify(sd10g::lane_2c(t), |r| r.set_os_man_en(false))?;
        rw.modify(sd10g::lane_2e(t), |r| r.set_os(0))?;
    }
    rw.modify(sd10g::lane_1b(t), |r| r.set_vcm_sel(3))?;
    rw.modify(sd10g::lane_2b(t), |r| r.set_iscan_sel(true))?;
    rw.modify(sd10g::lane_23(t), |r| {
        r.set_dfe_pd(false);
        r.set_dfeck_en(true);
        r.set_erramp_pd(false);
    })?;
    rw.modify(sd10g::lane_1a(t), |r| r.set_pi_dfe_en(true))?;

    trace::sleep_ms(1);
    rw.modify(sd10g::lane_2b(t), |r| r.set_iscan_en(true))?;

    let mut waited = 0;
    let wait_done = |waited: &mut u32| -> Result<(), FaError> {
        let done =
            poll_done(waited, || Ok(rw.read(sd10g::lane_d0(t))?.iscan_done()))?;
        if !done {
            rw.modify(sd10g::lane_2b(t), |r| r.set_iscan_en(false))?;
            return Err(timeout(lane, *waited));
        }
        Ok(())
    };

    let m = if kind == EyeScanKind::FullEye {
        let mut eye = EyeDiagram::new();
        for _ in 0..VREF_STEPS {
            wait_done(&mut waited)?;
            let mut row = [0; ROW_BYTES];
            for (n, b) in row.iter_mut().enumerate() {
                *b = rw.read(sd10g::iscan_result(t, n))?.results() as u8;
            }
            eye.push(row);

            // Step to the next reference voltage
            rw.modify(sd10g::lane_2b(t), |r| r.set_add_volt(false))?;
            rw.modify(sd10g::lane_2b(t), |r| r.set_add_volt(true))?;
        }
        EyeMeasurement::Diagram(eye)
    } else {
        wait_done(&mut waited)?;
        if rw.read(sd10g::lane_d0(t))?.fast_eye_scan_fail() {
            return Err(scan_failed(lane));
        }
        let v = rw.read(sd10g::iscan_result(t, 0))?.results();
        if kind == EyeScanKind::Area {
            EyeMeasurement::Area(v)
        } else {
            EyeMeasurement::Height(v)
        }
    };

    rw.write(sd10g::lane_23(t), lane_23)?;
    rw.write(sd10g::lane_1a(t), lane_1a)?;
    rw.modify(sd10g::lane_2b(t), |r| r.set_iscan_sel(false))?;
    rw.modify(sd10g::lane_2b(t), |r| r.set_iscan_en(false))?;
    Ok(m)
}

fn eye_scan_25g<R: FaRw>(
    rw: &R,
    lane: SerdesLane,
    kind: EyeScanKind,
) -> Result<EyeMeasurement, FaError> {
    let t = lane.target()?;
    let dimension = kind != EyeScanKind::FullEye;

    rw.modify(sd25g::cmu_ff(t), |r| r.set_register_table_index(0))?;
    let dfe_pd = rw.read(sd25g::lane_1c(t))?.dfe_pd();
    rw.modify(sd25g::lane_1c(t), |r| r.set_dfe_pd(false))?;
    rw.modify(sd25g::lane_19(t), |r| r.set_iscan_sel(true))?;
    rw.modify(sd25g::lane_18(t), |r| r.set_erramp_pd(false))?;
    if dimension {
        rw.modify(sd25g::lane_18(t), |r| r.set_man_volt_en(false))?;
    }

    let dfedmx_pd = rw.read(sd25g::lane_1c(t))?.dfedmx_pd();
    rw.modify(sd25g::lane_1c(t), |r| r.set_dfedmx_pd(false))?;
    let rstn_dfedig = rw.read(sd25g::lane_2e(t))?.rstn_dfedig();

    if dimension {
        rw.modify(sd25g::lane_2e(t), |r| r.set_rstn_dfedig(true))?;
        // Cleared selects the area; height keeps whatever is there
        if kind == EyeScanKind::Area {
            rw.modify(sd25g::lane_28(t), |r| r.set_figmerit_sel(false))?;
        }
    } else {
        rw.modify(sd25g::lane_2e(t), |r| r.set_rstn_dfedig(false))?;
    }

    // Latch the register table into the macro
    rw.modify(sd25g::cmu_ff(t), |r| r.set_register_table_index(0xff))?;
    rw.modify(sd25g::cmu_1a(t), |r| r.set_r_reg_manual(true))?;
    rw.modify(sd25g::cmu_ff(t), |r| r.set_register_table_index(0))?;
    trace::sleep_ms(1);

    if kind != EyeScanKind::Area {
        rw.modify(sd25g::lane_28(t), |r| r.set_iscan_mode_en(true))?;
    }
    if dimension {
        rw.modify(sd25g::lane_2e(t), |r| r.set_en_fast_iscan(true))?;
    } else {
        rw.modify(sd25g::lane_0e(t), |r| r.set_iscan_en(true))?;
    }

    let mut waited = 0;
    let done = |waited: &mut u32| {
        poll_done(waited, || Ok(rw.read(sd25g::lane_dd(t))?.iscan_done()))
    };

    let m = if dimension {
        if !done(&mut waited)? {
            return Err(timeout(lane, waited));
        }
        if rw.read(sd25g::lane_c3(t))?.fast_eye_scan_fail() {
            return Err(scan_failed(lane));
        }
        let v = rw.read(sd25g::iscan_result(t, 0))?;
        if kind == EyeScanKind::Area {
            EyeMeasurement::Area(v)
        } else {
            EyeMeasurement::Height(v)
        }
    } else {
        // A timeout here ends the scan early; the rows so far are kept
        let mut eye = EyeDiagram::new();
        for _ in 0..VREF_STEPS {
            if !done(&mut waited)? {
                trace::record(Trace::EyeScanTimeout {
                    serdes_no: lane.serdes_no(),
                    waited_ms: waited,
                });
                break;
            }
            let mut row = [0; ROW_BYTES];
            for (n, b) in row.iter_mut().enumerate() {
                *b = rw.read(sd25g::iscan_result(t, n))? as u8;
            }
            eye.push(row);

            rw.modify(sd25g::lane_18(t), |r| r.set_add_volt(false))?;
            rw.modify(sd25g::lane_18(t), |r| r.set_add_volt(true))?;
        }
        EyeMeasurement::Diagram(eye)
    };

    rw.modify(sd25g::lane_1c(t), |r| {
        r.set_dfe_pd(dfe_pd);
        r.set_dfedmx_pd(dfedmx_pd);
    })?;
    rw.modify(sd25g::lane_2e(t), |r| r.set_rstn_dfedig(rstn_dfedig))?;
    rw.modify(sd25g::lane_28(t), |r| r.set_iscan_mode_en(false))?;
    rw.modify(sd25g::lane_19(t), |r| r.set_iscan_sel(false))?;
    rw.modify(sd25g::lane_0e(t), |r| r.set_iscan_en(false))?;
    rw.modify(sd25g::lane_2e(t), |r| r.set_en_fast_iscan(false))?;
    Ok(m)
}

fn timeout(lane: SerdesLane, waited_ms: u32) -> FaError {
    trace::record(Trace::EyeScanTimeout {
        serdes_no: lane.serdes_no(),
        waited_ms,
    });
    FaError::HardwareTimeout { waited_ms }
}

fn scan_failed(lane: SerdesLane) -> FaError {
    trace::record(Trace::EyeScanFailed {
        serdes_no: lane.serdes_no(),
    });
    FaError::EyeScanFailed
}
