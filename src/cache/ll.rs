//! Low-level CACHEC register sequences.
//!
//! Every function here is a short, always-succeeding register sequence
//! with no error path. Precondition checks and memory barriers live in
//! the driver layer above.

use ral_registers::{modify_reg, read_reg, write_reg};

use super::CacheBus;
use crate::ral::cachec::{self, RegisterBlock};

pub(super) fn enable(regs: &RegisterBlock) {
    modify_reg!(crate::ral::cachec, regs, CTRL, ENA: 1);
}

pub(super) fn disable(regs: &RegisterBlock) {
    modify_reg!(crate::ral::cachec, regs, CTRL, ENA: 0);
}

pub(super) fn suspend(regs: &RegisterBlock) {
    modify_reg!(crate::ral::cachec, regs, CTRL, SUS: 1);
}

pub(super) fn resume(regs: &RegisterBlock) {
    modify_reg!(crate::ral::cachec, regs, CTRL, SUS: 0);
}

pub(super) fn is_enabled(regs: &RegisterBlock) -> bool {
    read_reg!(crate::ral::cachec, regs, CTRL, ENA) != 0
}

pub(super) fn line_size(regs: &RegisterBlock) -> u32 {
    16 << read_reg!(crate::ral::cachec, regs, CCFG, LINE_SIZE)
}

/// First covered line address and line count for `[vaddr, vaddr + size)`.
///
/// `line` must be a power of two and `size` non-zero.
pub(super) fn line_span(vaddr: u32, size: u32, line: u32) -> (u32, u32) {
    let first = vaddr & !(line - 1);
    let last = (vaddr + size - 1) & !(line - 1);
    (first, (last - first) / line + 1)
}

pub(super) fn invalidate_range(regs: &RegisterBlock, vaddr: u32, size: u32) {
    let line = line_size(regs);
    let (mut addr, lines) = line_span(vaddr, size, line);
    for _ in 0..lines {
        write_reg!(crate::ral::cachec, regs, LINE_IVAL, addr);
        addr = addr.wrapping_add(line);
    }
}

fn shut_bits(mask: CacheBus) -> u32 {
    let mut bits = 0;
    if mask.contains(CacheBus::IBUS0) {
        bits |= cachec::CTRL1::SHUT_IBUS::mask;
    }
    if mask.contains(CacheBus::DBUS0) {
        bits |= cachec::CTRL1::SHUT_DBUS::mask;
    }
    bits
}

// Opening a bus clears its SHUT bit; shutting it sets the bit. Both are
// idempotent on hardware state.

pub(super) fn open_buses(regs: &RegisterBlock, mask: CacheBus) {
    let shut = shut_bits(mask);
    modify_reg!(crate::ral::cachec, regs, CTRL1, |r| r & !shut);
}

pub(super) fn shut_buses(regs: &RegisterBlock, mask: CacheBus) {
    let shut = shut_bits(mask);
    modify_reg!(crate::ral::cachec, regs, CTRL1, |r| r | shut);
}

pub(super) fn enable_access_error_intr(regs: &RegisterBlock, mask: u32) {
    modify_reg!(crate::ral::cachec, regs, ACS_INT_ENA, |r| r | mask);
}

pub(super) fn clear_access_error_intr(regs: &RegisterBlock, mask: u32) {
    write_reg!(crate::ral::cachec, regs, ACS_INT_CLR, mask);
}

pub(super) fn access_error_intr_status(regs: &RegisterBlock, mask: u32) -> u32 {
    read_reg!(crate::ral::cachec, regs, ACS_INT_ST) & mask
}

pub(super) fn enable_illegal_op_intr(regs: &RegisterBlock, mask: u32) {
    modify_reg!(crate::ral::cachec, regs, ILG_INT_ENA, |r| r | mask);
}

pub(super) fn clear_illegal_op_intr(regs: &RegisterBlock, mask: u32) {
    write_reg!(crate::ral::cachec, regs, ILG_INT_CLR, mask);
}

pub(super) fn illegal_op_intr_status(regs: &RegisterBlock, mask: u32) -> u32 {
    read_reg!(crate::ral::cachec, regs, ILG_INT_ST) & mask
}
