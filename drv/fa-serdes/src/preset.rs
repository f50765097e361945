// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Electrical presets for the sd10g28 and sd25g28 macros.
//!
//! The tuning values behind each preset belong to the macro setup routines;
//! this module only decides which preset a port gets.

use crate::config::{MediaType, Speed};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Sd10gPreset {
    Ate,
    Zr,
    Dac3m,
    Dac5m,
    Dac2m,
    Dac1m,
    Dac3mPvt,
    Sr,
    Kr,
    None,
}

impl Sd10gPreset {
    pub fn for_media(media: MediaType) -> Self {
        match media {
            MediaType::Sr => Self::Sr,
            MediaType::Zr => Self::Zr,
            MediaType::Dac | MediaType::Dac3m => Self::Dac3m,
            MediaType::Dac1m => Self::Dac1m,
            MediaType::Dac2m => Self::Dac2m,
            MediaType::Dac5m => Self::Dac5m,
            MediaType::Bp | MediaType::B2b | MediaType::Kr10g => Self::Kr,
            MediaType::None => Self::None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Ate => "ATE",
            Self::Zr => "ZR",
            Self::Dac3m => "DAC3M",
            Self::Dac5m => "DAC5M",
            Self::Dac2m => "DAC2M",
            Self::Dac1m => "DAC1M",
            Self::Dac3mPvt => "DAC3_PVT",
            Self::Sr => "SR",
            Self::Kr => "KR",
            Self::None => "None",
        }
    }
}

impl core::fmt::Display for Sd10gPreset {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Sd25gPreset {
    Ate,
    Zr,
    Dac3m10g,
    Dac5m10g,
    Dac1m10g,
    Dac3mPvt10g,
    Sr10g,
    KrHw,
    Sr25g,
    Dac2m25g,
    None,
}

impl Sd25gPreset {
    /// The 25G macro has a richer set of presets at 10G than at 25G; any
    /// speed other than 10G uses the 25G presets.
    pub fn for_media(media: MediaType, speed: Speed) -> Self {
        if speed == Speed::Speed10G {
            match media {
                MediaType::Sr => Self::Sr10g,
                MediaType::Zr => Self::Zr,
                MediaType::Dac | MediaType::Dac2m | MediaType::Dac3m => {
                    Self::Dac3m10g
                }
                MediaType::Dac1m => Self::Dac1m10g,
                MediaType::Dac5m => Self::Dac5m10g,
                MediaType::Bp | MediaType::B2b | MediaType::Kr10g => {
                    Self::KrHw
                }
                MediaType::None => Self::None,
            }
        } else {
            match media {
                MediaType::Sr | MediaType::Zr => Self::Sr25g,
                MediaType::Dac
                | MediaType::Dac1m
                | MediaType::Dac2m
                | MediaType::Dac3m
                | MediaType::Dac5m => Self::Dac2m25g,
                _ => Self::None,
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Ate => "ATE",
            Self::Zr => "ZR",
            Self::Dac3m10g => "10G-DAC3m",
            Self::Dac5m10g => "10G-DAC5m",
            Self::Dac1m10g => "10G-DAC1m",
            Self::Dac3mPvt10g => "10G-DAC3m_PVT",
            Self::Sr10g => "10G-SR",
            Self::KrHw => "KR",
            Self::Sr25g => "25G-SR",
            Self::Dac2m25g => "25G-DAC2m",
            Self::None => "None",
        }
    }
}

impl core::fmt::Display for Sd25gPreset {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}
