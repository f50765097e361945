// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Register layouts for the FA SerDes blocks.
//!
//! Registers are addressed as a [`Target`] (one instance of a register block,
//! e.g. the fifth SD10G lane) plus a word offset within that block.  Turning
//! a `Target` into a bus address is the transport's job, since it depends on
//! how the switch core is attached (SPI, PCIe BAR, ...).
//!
//! Register names follow the SDK: `LANE_xx` lives at word offset `0xxx` of a
//! lane block.  The 25G macro carries both its CMU and its lane registers in
//! one block, with the lane registers starting at [`sd25g::LANE_BASE`].
//!
//! Only the fields that the driver touches are broken out.

use core::marker::PhantomData;

/// One instance of a SerDes register block
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Target {
    Sd6gLane(u8),
    Sd10gLane(u8),
    Sd25gLane(u8),
    /// Per-lane configuration block, indexed by global SerDes number
    SdLane(u8),
    SdCmu(u8),
    SdCmuCfg(u8),
}

/// Typed register address.  `T` is the register's value type, which must
/// convert to and from a raw `u32`.
pub struct RegisterAddress<T> {
    pub target: Target,
    pub offset: u16,
    _phantom: PhantomData<T>,
}

impl<T> RegisterAddress<T> {
    pub const fn new(target: Target, offset: u16) -> Self {
        Self {
            target,
            offset,
            _phantom: PhantomData,
        }
    }
}

// Derived impls would require `T: Copy`, which the bitfield types don't need
// for addressing.
impl<T> Clone for RegisterAddress<T> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<T> Copy for RegisterAddress<T> {}

impl<T> core::fmt::Debug for RegisterAddress<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:?}+0x{:03x}", self.target, self.offset)
    }
}

/// Declares a register value type (via `bitfield!`), its `u32` conversions,
/// and a constructor for its address within a block.
macro_rules! registers {
    ($base:expr; $(
        $(#[$meta:meta])*
        $addr_fn:ident => $name:ident @ $offset:literal {
            $($field:tt)*
        }
    )*) => {
        $(
            bitfield! {
                $(#[$meta])*
                #[derive(Copy, Clone, PartialEq, Eq)]
                pub struct $name(u32);
                impl Debug;
                $($field)*
            }

            impl From<u32> for $name {
                fn from(v: u32) -> Self {
                    Self(v)
                }
            }

            impl From<$name> for u32 {
                fn from(r: $name) -> Self {
                    r.0
                }
            }

            pub fn $addr_fn(t: Target) -> RegisterAddress<$name> {
                RegisterAddress::new(t, $base + $offset)
            }
        )*
    };
}

/// Lane registers of the sd10g28 macro, used by both the 6G and the 10G lane
/// pools.
pub mod sd10g {
    use super::{RegisterAddress, Target};
    use bitfield::bitfield;

    registers! { 0;
        lane_02 => Lane02 @ 0x02 {
            pub en_adv, set_en_adv: 0;
            pub en_main, set_en_main: 1;
            pub en_dly, set_en_dly: 2;
            pub tap_adv, set_tap_adv: 7, 4;
        }
        lane_04 => Lane04 @ 0x04 {
            pub tap_dly, set_tap_dly: 4, 0;
        }
        lane_0b => Lane0b @ 0x0b {
            pub eq_res, set_eq_res: 3, 0;
        }
        lane_0d => Lane0d @ 0x0d {
            pub eqr_byp, set_eqr_byp: 0;
        }
        lane_0e => Lane0e @ 0x0e {
            pub eqc_force, set_eqc_force: 3, 0;
        }
        lane_1a => Lane1a @ 0x1a {
            pub pi_dfe_en, set_pi_dfe_en: 0;
        }
        lane_1b => Lane1b @ 0x1b {
            pub vcm_sel, set_vcm_sel: 1, 0;
        }
        lane_1c => Lane1c @ 0x1c {
            pub dfedig_byp, set_dfedig_byp: 5, 0;
        }
        lane_1d => Lane1d @ 0x1d {
            pub dfe_byp_h1, set_dfe_byp_h1: 4, 0;
        }
        lane_1e => Lane1e @ 0x1e {
            pub dfe_byp_h2, set_dfe_byp_h2: 4, 0;
        }
        lane_1f => Lane1f @ 0x1f {
            pub dfe_byp_h3, set_dfe_byp_h3: 3, 0;
            pub dfe_byp_h4, set_dfe_byp_h4: 7, 4;
        }
        lane_20 => Lane20 @ 0x20 {
            pub dfe_byp_h5, set_dfe_byp_h5: 3, 0;
        }
        lane_22 => Lane22 @ 0x22 {
            pub dfetap_en, set_dfetap_en: 4, 0;
        }
        lane_23 => Lane23 @ 0x23 {
            pub dfe_pd, set_dfe_pd: 0;
            pub en_dfedig, set_en_dfedig: 1;
            pub dfeck_en, set_dfeck_en: 2;
            pub erramp_pd, set_erramp_pd: 3;
        }
        lane_2b => Lane2b @ 0x2b {
            pub iscan_en, set_iscan_en: 0;
            pub iscan_sel, set_iscan_sel: 1;
            pub fom_sel, set_fom_sel: 2;
            pub add_volt, set_add_volt: 3;
            pub man_volt_en, set_man_volt_en: 4;
        }
        lane_2c => Lane2c @ 0x2c {
            pub os_man_en, set_os_man_en: 0;
        }
        lane_2d => Lane2d @ 0x2d {
            pub man_volt_sel, set_man_volt_sel: 6, 0;
        }
        lane_2e => Lane2e @ 0x2e {
            pub os, set_os: 5, 0;
        }
        lane_2f => Lane2f @ 0x2f {
            pub vga_ctrl, set_vga_ctrl: 3, 0;
            pub vga_cp, set_vga_cp: 6, 4;
        }
        lane_31 => Lane31 @ 0x31 {
            pub rstn_dfedig, set_rstn_dfedig: 0;
        }
        lane_33 => Lane33 @ 0x33 {
            pub itx_ipdriver_base, set_itx_ipdriver_base: 2, 0;
        }
        lane_49 => Lane49 @ 0x49 {
            pub figmerit_sel, set_figmerit_sel: 0;
        }
        lane_52 => Lane52 @ 0x52 {
            pub ibias_tune_reserve, set_ibias_tune_reserve: 5, 0;
        }
        lane_83 => Lane83 @ 0x83 {
            pub dfe_rstn, set_dfe_rstn: 0;
        }
        lane_93 => Lane93 @ 0x93 {
            pub reg_manual, set_reg_manual: 0;
        }
        lane_94 => Lane94 @ 0x94 {
            pub iscan_reg, set_iscan_reg: 0;
        }
        lane_9e => Lane9e @ 0x9e {
            pub rxeq_reg, set_rxeq_reg: 0;
        }
        lane_c5 => LaneC5 @ 0xc5 {
            pub h1, _: 4, 0;
        }
        lane_c6 => LaneC6 @ 0xc6 {
            pub h2, _: 4, 0;
        }
        lane_c7 => LaneC7 @ 0xc7 {
            pub h3, _: 3, 0;
        }
        lane_c8 => LaneC8 @ 0xc8 {
            pub h4, _: 3, 0;
        }
        lane_c9 => LaneC9 @ 0xc9 {
            pub h5, _: 3, 0;
        }
        lane_ca => LaneCa @ 0xca {
            pub dlev, _: 6, 0;
        }
        lane_d0 => LaneD0 @ 0xd0 {
            pub iscan_done, _: 0;
            pub fast_eye_scan_fail, _: 1;
        }
    }

    /// Eye scan result registers `LANE_D1` through `LANE_D9`
    pub const ISCAN_RESULT_COUNT: usize = 9;

    bitfield! {
        #[derive(Copy, Clone, PartialEq, Eq)]
        pub struct IscanResult(u32);
        impl Debug;
        pub results, _: 7, 0;
    }

    impl From<u32> for IscanResult {
        fn from(v: u32) -> Self {
            Self(v)
        }
    }

    /// Returns the address of result register `LANE_D1 + n`
    pub fn iscan_result(t: Target, n: usize) -> RegisterAddress<IscanResult> {
        RegisterAddress::new(t, 0xd1 + n as u16)
    }
}

/// Registers of the sd25g28 macro.  Each 25G lane block holds a copy of the
/// CMU registers followed by the lane registers.
pub mod sd25g {
    use super::{RegisterAddress, Target};
    use bitfield::bitfield;

    /// Word offset of `LANE_00` within a 25G block
    pub const LANE_BASE: u16 = 0x100;

    registers! { 0;
        cmu_1a => Cmu1a @ 0x1a {
            pub r_reg_manual, set_r_reg_manual: 0;
        }
        cmu_ff => CmuFf @ 0xff {
            pub register_table_index, set_register_table_index: 7, 0;
        }
    }

    registers! { LANE_BASE;
        lane_03 => Lane03 @ 0x03 {
            pub tap_dly, set_tap_dly: 4, 0;
        }
        lane_07 => Lane07 @ 0x07 {
            pub en_dly, set_en_dly: 0;
        }
        lane_0d => Lane0d @ 0x0d {
            pub dfeck_en, set_dfeck_en: 0;
            pub summer_en, set_summer_en: 1;
            pub dmux_pd, set_dmux_pd: 2;
        }
        lane_0e => Lane0e @ 0x0e {
            pub iscan_en, set_iscan_en: 0;
            pub dmux_clk_pd, set_dmux_clk_pd: 1;
            pub en_dfedig, set_en_dfedig: 2;
        }
        lane_0f => Lane0f @ 0x0f {
            pub dfetap_en, set_dfetap_en: 4, 0;
        }
        lane_10 => Lane10 @ 0x10 {
            pub dfe_dlev, set_dfe_dlev: 6, 0;
        }
        lane_11 => Lane11 @ 0x11 {
            pub dfe_byp_h4, set_dfe_byp_h4: 3, 0;
            pub dfe_byp_h5, set_dfe_byp_h5: 7, 4;
        }
        lane_12 => Lane12 @ 0x12 {
            pub dfe_byp_h3, set_dfe_byp_h3: 3, 0;
        }
        lane_13 => Lane13 @ 0x13 {
            pub dfe_byp_h2, set_dfe_byp_h2: 4, 0;
        }
        lane_14 => Lane14 @ 0x14 {
            pub dfe_byp_h1, set_dfe_byp_h1: 4, 0;
        }
        lane_15 => Lane15 @ 0x15 {
            pub dfedig_byp, set_dfedig_byp: 7, 0;
        }
        lane_18 => Lane18 @ 0x18 {
            pub erramp_pd, set_erramp_pd: 0;
            pub add_volt, set_add_volt: 1;
            pub man_volt_en, set_man_volt_en: 2;
        }
        lane_19 => Lane19 @ 0x19 {
            pub iscan_sel, set_iscan_sel: 0;
        }
        lane_1c => Lane1c @ 0x1c {
            pub dfe_pd, set_dfe_pd: 0;
            pub dfedmx_pd, set_dfedmx_pd: 1;
            pub eqc_force, set_eqc_force: 7, 4;
        }
        lane_1d => Lane1d @ 0x1d {
            pub pi_dfe_en, set_pi_dfe_en: 0;
        }
        lane_1f => Lane1f @ 0x1f {
            pub eqr_byp, set_eqr_byp: 0;
        }
        lane_21 => Lane21 @ 0x21 {
            pub vga_ctrl_byp, set_vga_ctrl_byp: 4, 0;
        }
        lane_22 => Lane22 @ 0x22 {
            pub eqr_force, set_eqr_force: 3, 0;
        }
        lane_23 => Lane23 @ 0x23 {
            pub vga_byp, set_vga_byp: 0;
        }
        lane_28 => Lane28 @ 0x28 {
            pub iscan_mode_en, set_iscan_mode_en: 0;
            pub figmerit_sel, set_figmerit_sel: 1;
        }
        lane_2e => Lane2e @ 0x2e {
            pub rstn_dfedig, set_rstn_dfedig: 0;
            pub en_fast_iscan, set_en_fast_iscan: 1;
        }
        lane_40 => Lane40 @ 0x40 {
            pub r_dfe_rstn, set_r_dfe_rstn: 0;
        }
        lane_44 => Lane44 @ 0x44 {
            pub rx_reserve, set_rx_reserve: 7, 0;
        }
        lane_c3 => LaneC3 @ 0xc3 {
            pub fast_eye_scan_fail, _: 0;
        }
        lane_ca => LaneCa @ 0xca {
            pub h1, _: 4, 0;
        }
        lane_cb => LaneCb @ 0xcb {
            pub h2, _: 4, 0;
        }
        lane_cc => LaneCc @ 0xcc {
            pub h3, _: 3, 0;
        }
        lane_cd => LaneCd @ 0xcd {
            pub h4, _: 3, 0;
        }
        lane_ce => LaneCe @ 0xce {
            pub h5, _: 3, 0;
        }
        lane_cf => LaneCf @ 0xcf {
            pub dlev, _: 6, 0;
        }
        lane_dd => LaneDd @ 0xdd {
            pub iscan_done, _: 0;
        }
    }

    /// Eye scan result registers `LANE_D0` through `LANE_D8`.  For the fast
    /// scans, `LANE_D0` holds the measured height or area.
    pub const ISCAN_RESULT_COUNT: usize = 9;

    pub fn iscan_result(t: Target, n: usize) -> RegisterAddress<u32> {
        RegisterAddress::new(t, LANE_BASE + 0xd0 + n as u16)
    }
}

/// The per-lane configuration block shared by all three pools
pub mod sd_lane {
    use super::{RegisterAddress, Target};
    use bitfield::bitfield;

    registers! { 0;
        sd_lane_cfg => SdLaneCfg @ 0x00 {
            pub lane_rst, set_lane_rst: 0;
        }
    }
}
