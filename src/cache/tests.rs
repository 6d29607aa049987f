use core::mem::MaybeUninit;

use super::ll;
use super::{bus_for_range, AccessError, CacheBus, CacheType, IllegalOpError, L1Cache};
use crate::memory_map::l1;
use crate::ral::cachec::RegisterBlock;
use crate::Peripherals;

// All-zero is the reset state of the block; every register is a plain
// u32 cell, so a memory-backed block behaves like the hardware for
// everything except write-1-to-clear coupling (ST is cleared by the
// hardware, not by the CLR write itself).
fn zeroed_regs() -> RegisterBlock {
    unsafe { MaybeUninit::zeroed().assume_init() }
}

struct Mock(RegisterBlock);

unsafe impl<'a> Peripherals for &'a Mock {
    fn cachec(&self) -> *const () {
        &self.0 as *const RegisterBlock as *const ()
    }
}

#[test]
fn code_window_maps_to_ibus0() {
    assert_eq!(bus_for_range(0, l1::CODE_CACHE_ADDRESS_LOW, 4), CacheBus::IBUS0);
    assert_eq!(
        bus_for_range(0, l1::CODE_CACHE_ADDRESS_HIGH - 8, 8),
        CacheBus::IBUS0
    );
    // The whole window at once.
    assert_eq!(
        bus_for_range(
            0,
            l1::CODE_CACHE_ADDRESS_LOW,
            l1::CODE_CACHE_ADDRESS_HIGH - l1::CODE_CACHE_ADDRESS_LOW
        ),
        CacheBus::IBUS0
    );
}

#[test]
fn data_window_maps_to_dbus0() {
    assert_eq!(bus_for_range(0, l1::DATA_CACHE_ADDRESS_LOW, 8), CacheBus::DBUS0);
    assert_eq!(
        bus_for_range(0, l1::DATA_CACHE_ADDRESS_HIGH - 4, 4),
        CacheBus::DBUS0
    );
}

#[test]
#[should_panic]
fn range_straddling_a_window_boundary_panics() {
    bus_for_range(0, l1::CODE_CACHE_ADDRESS_HIGH - 4, 8);
}

#[test]
#[should_panic]
fn range_outside_both_windows_panics() {
    bus_for_range(0, 0x2000_0000, 4);
}

#[test]
#[should_panic]
fn nonzero_cache_id_panics() {
    bus_for_range(1, l1::CODE_CACHE_ADDRESS_LOW, 4);
}

#[test]
#[should_panic]
fn empty_range_panics() {
    bus_for_range(0, l1::CODE_CACHE_ADDRESS_LOW, 0);
}

#[test]
#[should_panic]
fn range_wrapping_the_address_space_panics() {
    bus_for_range(0, 0xffff_fff0, 0x20);
}

#[test]
fn bus_gating_round_trips() {
    let mock = Mock(zeroed_regs());
    let mut cache = L1Cache::new(&mock);

    // Both buses shut, as after reset.
    mock.0.CTRL1.write(0b11);

    cache.enable_bus(0, CacheBus::IBUS0);
    assert_eq!(mock.0.CTRL1.read(), 0b10);

    cache.enable_bus(0, CacheBus::DBUS0);
    assert_eq!(mock.0.CTRL1.read(), 0b00);

    // Idempotent: opening an open bus changes nothing.
    cache.enable_bus(0, CacheBus::IBUS0 | CacheBus::DBUS0);
    assert_eq!(mock.0.CTRL1.read(), 0b00);

    cache.disable_bus(0, CacheBus::IBUS0 | CacheBus::DBUS0);
    assert_eq!(mock.0.CTRL1.read(), 0b11);

    cache.disable_bus(0, CacheBus::DBUS0);
    assert_eq!(mock.0.CTRL1.read(), 0b11);
}

#[test]
#[should_panic]
fn enable_bus_rejects_unsupported_buses() {
    let mock = Mock(zeroed_regs());
    let mut cache = L1Cache::new(&mock);
    // IBUS0 alone would be fine; IBUS1 makes the whole mask invalid.
    cache.enable_bus(0, CacheBus::IBUS0 | CacheBus::IBUS1);
}

#[test]
#[should_panic]
fn disable_bus_rejects_unsupported_buses() {
    let mock = Mock(zeroed_regs());
    let mut cache = L1Cache::new(&mock);
    cache.disable_bus(0, CacheBus::DBUS2);
}

#[test]
#[should_panic]
fn enable_bus_rejects_nonzero_cache_id() {
    let mock = Mock(zeroed_regs());
    let mut cache = L1Cache::new(&mock);
    cache.enable_bus(1, CacheBus::IBUS0);
}

#[test]
fn enable_disable_suspend_resume_drive_ctrl() {
    let regs = zeroed_regs();

    ll::enable(&regs);
    assert!(ll::is_enabled(&regs));
    assert_eq!(regs.CTRL.read(), 0b01);

    // Suspend leaves the enable bit set.
    ll::suspend(&regs);
    assert!(ll::is_enabled(&regs));
    assert_eq!(regs.CTRL.read(), 0b11);

    ll::resume(&regs);
    assert_eq!(regs.CTRL.read(), 0b01);

    ll::disable(&regs);
    assert!(!ll::is_enabled(&regs));
    assert_eq!(regs.CTRL.read(), 0b00);
}

#[test]
fn is_enabled_reads_hardware_fresh() {
    let mock = Mock(zeroed_regs());
    let cache = L1Cache::new(&mock);

    assert!(!cache.is_enabled(CacheType::Instruction));
    mock.0.CTRL.write(0b01);
    assert!(cache.is_enabled(CacheType::Instruction));
    assert!(cache.is_enabled(CacheType::Data));
}

#[test]
fn autoload_is_never_enabled() {
    let mock = Mock(zeroed_regs());
    let cache = L1Cache::new(&mock);
    assert!(!cache.is_autoload_enabled(CacheType::Instruction));
    assert!(!cache.is_autoload_enabled(CacheType::Data));
}

#[test]
fn line_size_decodes_ccfg() {
    let mock = Mock(zeroed_regs());
    let cache = L1Cache::new(&mock);

    assert_eq!(cache.line_size(CacheType::Instruction), 16);
    mock.0.CCFG.write(1);
    assert_eq!(cache.line_size(CacheType::Instruction), 32);
    mock.0.CCFG.write(2);
    assert_eq!(cache.line_size(CacheType::Data), 64);
}

#[test]
fn line_span_covers_the_range() {
    // Aligned range, two lines.
    assert_eq!(ll::line_span(0x1000_0000, 64, 32), (0x1000_0000, 2));
    // Single byte in the middle of a line.
    assert_eq!(ll::line_span(0x1000_0005, 1, 32), (0x1000_0000, 1));
    // Two bytes crossing a line boundary.
    assert_eq!(ll::line_span(0x1000_001f, 2, 32), (0x1000_0000, 2));
    // Unaligned start pulls the first line down.
    assert_eq!(ll::line_span(0x6000_0008, 0x20, 16), (0x6000_0000, 3));
}

#[test]
fn invalidate_walks_lines_through_the_port() {
    let regs = zeroed_regs();

    // Zeroed CCFG: 16-byte lines. [0x6000_0008, 0x6000_0028) covers the
    // lines at 0x6000_0000, 0x6000_0010 and 0x6000_0020; the port holds
    // the last one written.
    ll::invalidate_range(&regs, 0x6000_0008, 0x20);
    assert_eq!(regs.LINE_IVAL.read(), 0x6000_0020);
}

#[test]
fn zero_sized_invalidate_is_a_noop() {
    let mock = Mock(zeroed_regs());
    let mut cache = L1Cache::new(&mock);

    cache.invalidate_range(0x6000_0000, 0);
    assert_eq!(mock.0.LINE_IVAL.read(), 0);
}

#[test]
fn access_error_enable_preserves_other_bits() {
    let mock = Mock(zeroed_regs());
    let mut cache = L1Cache::new(&mock);

    mock.0.ACS_INT_ENA.write(AccessError::IBUS_ACS_MASKED.bits());
    cache.enable_access_error_interrupts(0, AccessError::DBUS_REJECT);
    assert_eq!(
        mock.0.ACS_INT_ENA.read(),
        (AccessError::IBUS_ACS_MASKED | AccessError::DBUS_REJECT).bits()
    );
}

#[test]
fn access_error_clear_writes_the_mask() {
    let mock = Mock(zeroed_regs());
    let mut cache = L1Cache::new(&mock);

    cache.clear_access_error_interrupts(0, AccessError::all());
    assert_eq!(mock.0.ACS_INT_CLR.read(), 0x3f);
}

#[test]
fn access_error_status_is_masked() {
    let mock = Mock(zeroed_regs());
    let cache = L1Cache::new(&mock);

    mock.0.ACS_INT_ST.write(0x3f);
    let pending =
        cache.access_error_interrupt_status(0, AccessError::IBUS_REJECT | AccessError::DBUS_WRITE);
    assert_eq!(pending, AccessError::IBUS_REJECT | AccessError::DBUS_WRITE);

    mock.0.ACS_INT_ST.write(0);
    assert!(cache
        .access_error_interrupt_status(0, AccessError::all())
        .is_empty());
}

#[test]
fn illegal_op_interrupt_plumbing() {
    let mock = Mock(zeroed_regs());
    let mut cache = L1Cache::new(&mock);

    cache.enable_illegal_op_interrupts(0, IllegalOpError::all());
    assert_eq!(mock.0.ILG_INT_ENA.read(), 0x23);

    mock.0.ILG_INT_ST.write(0x23);
    let pending = cache.illegal_op_interrupt_status(0, IllegalOpError::MMU_ENTRY_FAULT);
    assert_eq!(pending, IllegalOpError::MMU_ENTRY_FAULT);

    cache.clear_illegal_op_interrupts(0, IllegalOpError::SYNC_OP_FAULT);
    assert_eq!(mock.0.ILG_INT_CLR.read(), 0x01);
}

#[test]
fn event_vocabularies_are_bit_exact() {
    assert_eq!(AccessError::all().bits(), 0x3f);
    assert_eq!(IllegalOpError::all().bits(), 0x23);
    assert_eq!(CacheBus::DEFAULT_IBUS, CacheBus::IBUS0);
    assert_eq!(CacheBus::DEFAULT_DBUS, CacheBus::DBUS0);
    assert_eq!(CacheBus::IBUS0.bits(), 1 << 0);
    assert_eq!(CacheBus::DBUS0.bits(), 1 << 3);
}
