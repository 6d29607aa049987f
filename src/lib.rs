#![no_std]
#![doc = include_str!("../README.md")]

// This mod MUST go first, so that the others see its macros.
pub(crate) mod fmt;

pub mod cache;
pub mod memory_map;
pub mod ral;

pub use cache::{bus_for_range, AccessError, CacheBus, CacheType, IllegalOpError, L1Cache};

/// A type that owns the cache controller register block.
///
/// An implementation of `Peripherals` is expected to own the CACHEC
/// registers for the lifetime of the driver. The pointer returned by
/// [`cachec()`](Peripherals::cachec) is cast to the register block
/// definition in [`ral::cachec`], so it must point at a live CACHEC
/// instance (on hardware, [`ral::CACHEC`]).
///
/// # Safety
///
/// `Peripherals` should only be implemented on a type that owns the
/// CACHEC register block. Handing the same block to two drivers, or
/// returning a dangling pointer, breaks every register access the
/// driver performs.
///
/// # Example
///
/// ```no_run
/// use xm32_cache::Peripherals;
///
/// struct Cachec;
///
/// unsafe impl Peripherals for Cachec {
///     fn cachec(&self) -> *const () {
///         xm32_cache::ral::CACHEC as *const ()
///     }
/// }
/// ```
pub unsafe trait Peripherals {
    /// Returns the address of the CACHEC register block.
    fn cachec(&self) -> *const ();
}
