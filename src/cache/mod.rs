//! L1 cache controller (CACHEC).
//!
//! The XM32C1 has a single, unified L1 cache in front of its external
//! memory: the XIP code window is fetched over the instruction bus and
//! the memory-mapped data window is read over the data bus. A window is
//! only reachable while its bus is open, so memory managers pair
//! [`bus_for_range`] with [`L1Cache::enable_bus`] when mapping a region
//! in, and flash writers bracket rewrites with
//! [`L1Cache::disable`]/[`L1Cache::enable`] plus an invalidation.
//!
//! The driver keeps no shadow state: every query reads the hardware
//! registers fresh. It also takes no locks. A multi-register sequence
//! such as disable-rewrite-enable is not atomic here; callers running
//! under interrupts must bring their own critical section around
//! sequences that have to appear atomic.

use bitflags::bitflags;
use cortex_m::asm;

use crate::memory_map::l1;
use crate::ral::cachec;
use crate::Peripherals;

mod ll;
#[cfg(test)]
mod tests;

/// Which cache an operation targets.
///
/// Instructions and data share one cache on this part, so the tag never
/// selects distinct hardware. It exists so call sites stay portable to
/// parts with split caches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CacheType {
    /// Instruction side.
    Instruction,
    /// Data side.
    Data,
}

bitflags! {
    /// Buses gating access to the cacheable windows.
    ///
    /// Only [`IBUS0`](Self::IBUS0) and [`DBUS0`](Self::DBUS0) exist on
    /// this part. The remaining identifiers are carried for mask
    /// compatibility with multi-bank parts and are rejected by the bus
    /// operations.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct CacheBus: u32 {
        /// Instruction bus of the unified cache.
        const IBUS0 = 1 << 0;
        /// Second instruction bus; not present on this part.
        const IBUS1 = 1 << 1;
        /// Third instruction bus; not present on this part.
        const IBUS2 = 1 << 2;
        /// Data bus of the unified cache.
        const DBUS0 = 1 << 3;
        /// Second data bus; not present on this part.
        const DBUS1 = 1 << 4;
        /// Third data bus; not present on this part.
        const DBUS2 = 1 << 5;
    }
}

impl CacheBus {
    /// Bus mask serving instruction fetches on this part.
    pub const DEFAULT_IBUS: Self = Self::IBUS0;
    /// Bus mask serving data access on this part.
    pub const DEFAULT_DBUS: Self = Self::DBUS0;
}

bitflags! {
    /// Access-error interrupt events: bus accesses that violate the
    /// configured permissions.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct AccessError: u32 {
        /// Instruction-bus access while the cache was masked off.
        const IBUS_ACS_MASKED = 1 << 0;
        /// Write attempted over the instruction bus.
        const IBUS_WRITE = 1 << 1;
        /// Instruction-bus access rejected by the permission checks.
        const IBUS_REJECT = 1 << 2;
        /// Data-bus access while the cache was masked off.
        const DBUS_ACS_MASKED = 1 << 3;
        /// Data-bus access rejected by the permission checks.
        const DBUS_REJECT = 1 << 4;
        /// Data-bus write into the instruction window.
        const DBUS_WRITE = 1 << 5;
    }
}

bitflags! {
    /// Illegal-operation interrupt events: malformed cache maintenance
    /// requests and MMU lookup faults.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct IllegalOpError: u32 {
        /// Invalidate/sync request with illegal parameters.
        const SYNC_OP_FAULT = 1 << 0;
        /// Preload request with illegal parameters.
        const PRELOAD_OP_FAULT = 1 << 1;
        /// Access resolved to an invalid MMU entry.
        const MMU_ENTRY_FAULT = 1 << 5;
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for CacheBus {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "CacheBus(0x{:02x})", self.bits())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for AccessError {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "AccessError(0x{:02x})", self.bits())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for IllegalOpError {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "IllegalOpError(0x{:02x})", self.bits())
    }
}

/// Get the bus that serves the virtual address range
/// `[vaddr_start, vaddr_start + len)`.
///
/// The range must lie wholly inside one cacheable window: the code
/// window maps to [`CacheBus::IBUS0`], the data window to
/// [`CacheBus::DBUS0`]. A range that straddles a window boundary or
/// falls outside both windows is a caller bug and panics; there is no
/// combined-bus mapping on this part.
///
/// `cache_id` must be 0.
///
/// ```
/// use xm32_cache::{bus_for_range, memory_map::l1, CacheBus};
///
/// let bus = bus_for_range(0, l1::CODE_CACHE_ADDRESS_LOW, 4);
/// assert_eq!(bus, CacheBus::IBUS0);
/// ```
pub fn bus_for_range(cache_id: u32, vaddr_start: u32, len: u32) -> CacheBus {
    assert!(cache_id == 0, "XM32C1 has a single cache core");
    assert!(len != 0, "empty address range");

    let vaddr_end = vaddr_start.saturating_add(len - 1);
    if vaddr_start >= l1::CODE_CACHE_ADDRESS_LOW && vaddr_end < l1::CODE_CACHE_ADDRESS_HIGH {
        CacheBus::IBUS0
    } else if vaddr_start >= l1::DATA_CACHE_ADDRESS_LOW && vaddr_end < l1::DATA_CACHE_ADDRESS_HIGH {
        CacheBus::DBUS0
    } else {
        panic!(
            "0x{:08x}..=0x{:08x} is not covered by a cache bus",
            vaddr_start, vaddr_end
        )
    }
}

// Only IBUS0 and DBUS0 exist on this part. Use bus_for_range() to derive
// masks instead of building them by hand.
fn check_supported_buses(mask: CacheBus) {
    assert!(
        (mask & !(CacheBus::IBUS0 | CacheBus::DBUS0)).is_empty(),
        "unsupported cache bus in {:?}",
        mask
    );
}

/// Driver for the unified L1 cache controller.
///
/// See the [module docs](self) for the concurrency contract.
pub struct L1Cache<P> {
    peripherals: P,
}

impl<P: Peripherals> L1Cache<P> {
    /// Create the driver. Creation touches no hardware.
    pub fn new(peripherals: P) -> Self {
        Self { peripherals }
    }

    fn regs(&self) -> &cachec::RegisterBlock {
        // Safety: the Peripherals contract guarantees the pointer is a
        // live CACHEC block for as long as `self.peripherals` owns it.
        unsafe { &*(self.peripherals.cachec() as *const cachec::RegisterBlock) }
    }

    /// Whether auto-preload is enabled.
    ///
    /// Always false: this part has no autoload hardware.
    pub fn is_autoload_enabled(&self, _ty: CacheType) -> bool {
        false
    }

    /// Whether the cache is enabled.
    ///
    /// Reads the hardware enable bit. [`suspend`](Self::suspend) leaves
    /// the bit set, so this keeps returning true while suspended.
    pub fn is_enabled(&self, _ty: CacheType) -> bool {
        ll::is_enabled(self.regs())
    }

    /// Cache line size in bytes.
    pub fn line_size(&self, _ty: CacheType) -> u32 {
        ll::line_size(self.regs())
    }

    /// Enable the cache.
    ///
    /// Auto-preload does not exist on this part; both autoload flags are
    /// accepted for call-site compatibility with parts that have it and
    /// are not applied to hardware.
    pub fn enable(&mut self, _ty: CacheType, inst_autoload: bool, data_autoload: bool) {
        if inst_autoload || data_autoload {
            debug!("cache autoload requested but not present on this part, ignoring");
        }
        ll::enable(self.regs());
        asm::dsb();
        asm::isb();
    }

    /// Disable the cache.
    ///
    /// The caller must make sure nothing served only from the cache is
    /// touched before the cache is enabled again.
    pub fn disable(&mut self, _ty: CacheType) {
        asm::dsb();
        ll::disable(self.regs());
        asm::dsb();
        asm::isb();
    }

    /// Suspend the cache without losing its contents.
    pub fn suspend(&mut self, _ty: CacheType) {
        asm::dsb();
        ll::suspend(self.regs());
        asm::dsb();
        asm::isb();
    }

    /// Resume from [`suspend`](Self::suspend).
    ///
    /// Same autoload caveat as [`enable`](Self::enable).
    pub fn resume(&mut self, _ty: CacheType, inst_autoload: bool, data_autoload: bool) {
        if inst_autoload || data_autoload {
            debug!("cache autoload requested but not present on this part, ignoring");
        }
        ll::resume(self.regs());
        asm::dsb();
        asm::isb();
    }

    /// Invalidate every cache line covering `[vaddr, vaddr + size)`.
    ///
    /// The range is not checked against the cacheable windows. A zero
    /// `size` is a no-op.
    pub fn invalidate_range(&mut self, vaddr: u32, size: u32) {
        if size == 0 {
            return;
        }
        asm::dsb();
        ll::invalidate_range(self.regs(), vaddr, size);
        asm::dsb();
        asm::isb();
    }

    /// Open the buses in `mask`.
    ///
    /// Opening an already open bus is a no-op. Only
    /// [`CacheBus::IBUS0`] and [`CacheBus::DBUS0`] may appear in
    /// `mask`; `cache_id` must be 0.
    pub fn enable_bus(&mut self, cache_id: u32, mask: CacheBus) {
        assert!(cache_id == 0, "XM32C1 has a single cache core");
        check_supported_buses(mask);
        ll::open_buses(self.regs(), mask);
    }

    /// Shut the buses in `mask`. Counterpart of
    /// [`enable_bus`](Self::enable_bus), same mask rules.
    pub fn disable_bus(&mut self, cache_id: u32, mask: CacheBus) {
        assert!(cache_id == 0, "XM32C1 has a single cache core");
        check_supported_buses(mask);
        ll::shut_buses(self.regs(), mask);
    }

    /// Enable access-error interrupts for the events in `mask`.
    ///
    /// `cache_id` selects a core's cache on multi-core parts; it is
    /// accepted for compatibility and unused here.
    pub fn enable_access_error_interrupts(&mut self, _cache_id: u32, mask: AccessError) {
        ll::enable_access_error_intr(self.regs(), mask.bits());
    }

    /// Clear pending access-error interrupts for the events in `mask`.
    ///
    /// Handlers must clear the events they handled, or the interrupt
    /// re-fires on return.
    pub fn clear_access_error_interrupts(&mut self, _cache_id: u32, mask: AccessError) {
        ll::clear_access_error_intr(self.regs(), mask.bits());
    }

    /// Pending access-error events, restricted to `mask`.
    pub fn access_error_interrupt_status(&self, _cache_id: u32, mask: AccessError) -> AccessError {
        AccessError::from_bits_truncate(ll::access_error_intr_status(self.regs(), mask.bits()))
    }

    /// Enable illegal-operation interrupts for the events in `mask`.
    pub fn enable_illegal_op_interrupts(&mut self, _cache_id: u32, mask: IllegalOpError) {
        ll::enable_illegal_op_intr(self.regs(), mask.bits());
    }

    /// Clear pending illegal-operation interrupts for the events in
    /// `mask`.
    pub fn clear_illegal_op_interrupts(&mut self, _cache_id: u32, mask: IllegalOpError) {
        ll::clear_illegal_op_intr(self.regs(), mask.bits());
    }

    /// Pending illegal-operation events, restricted to `mask`.
    pub fn illegal_op_interrupt_status(
        &self,
        _cache_id: u32,
        mask: IllegalOpError,
    ) -> IllegalOpError {
        IllegalOpError::from_bits_truncate(ll::illegal_op_intr_status(self.regs(), mask.bits()))
    }
}
