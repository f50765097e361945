// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Register dumps for lane debugging

use crate::regs::RegisterAddress;
use crate::topology::{SerdesLane, SerdesPool};
use crate::FaRw;
use core::fmt::Write;
use fa_err::FaError;

/// CMU registers of a 25G block, in the order that Microchip's debug output
/// lists them
const SD25G_CMU_REGS: &[u16] = &[
    0xff, 0x31, 0x1a, 0x40, 0x46, 0x45, 0x0b, 0x19, 0x18, 0x30, 0x0c, 0x0d,
    0x0e, 0x01, 0x2c, 0x28, 0x0f, 0x1d, 0x03, 0x06, 0x07, 0x43, 0x05, 0x0a,
    0x09, 0x1b, 0x2e, 0x44, 0x22, 0x1c, 0x1e, 0x25, 0x26, 0x04, 0xc0,
];

/// Lane registers of the sd10g28 macro (6G and 10G lanes)
const SD10G_LANE_REGS: &[u16] = &[
    0x93, 0x94, 0x9e, 0xa1, 0x50, 0x35, 0x01, 0x30, 0xa2, 0x13, 0x23, 0x22,
    0x1a, 0x02, 0x03, 0x04, 0x2f, 0x0b, 0x0d, 0x0e, 0x06, 0x33, 0x52, 0x37,
    0x3c, 0x39, 0x16, 0x15, 0x26, 0x42, 0x0f, 0x24, 0x14, 0x3a, 0x31, 0x48,
    0x36, 0x32, 0x41, 0x0c, 0x83, 0x34,
];

/// Prints every register in the lane's dump table as `NAME[index]  0xVALUE`
pub fn dump<R: FaRw>(
    rw: &R,
    lane: SerdesLane,
    out: &mut impl Write,
) -> Result<(), FaError> {
    let t = lane.target()?;
    let (block, regs) = match lane.pool {
        SerdesPool::Sd6g => ("SD6G_LANE", SD10G_LANE_REGS),
        SerdesPool::Sd10g => ("SD10G_LANE", SD10G_LANE_REGS),
        SerdesPool::Sd25g => ("SD25G_CMU", SD25G_CMU_REGS),
    };

    writeln!(out, "{:<20}  {}", "Register", "Value")?;
    for &offset in regs {
        let v: u32 = rw.read(RegisterAddress::new(t, offset))?;
        let mut name = NameBuf::default();
        write!(name, "{}_{:02X}[{}]", block, offset, lane.index)?;
        writeln!(out, "{:<20}  0x{:08x}", name.as_str(), v)?;
    }
    Ok(())
}

/// Fixed-size buffer, so that register names can be padded without `alloc`
#[derive(Default)]
struct NameBuf {
    buf: [u8; 24],
    len: usize,
}

impl NameBuf {
    fn as_str(&self) -> &str {
        // Only whole `&str`s are ever copied in, so this can't fail
        core::str::from_utf8(&self.buf[..self.len]).unwrap_or("")
    }
}

impl Write for NameBuf {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        let end = self.len + s.len();
        let dst = self.buf.get_mut(self.len..end).ok_or(core::fmt::Error)?;
        dst.copy_from_slice(s.as_bytes());
        self.len = end;
        Ok(())
    }
}
