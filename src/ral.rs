//! Register definitions for the CACHEC (L1 cache controller) block.
//!
//! Hand-maintained in the `ral-registers` layout: a `#[repr(C)]` register
//! block plus per-field `offset`/`mask` constant modules, accessed through
//! the `read_reg!`/`write_reg!`/`modify_reg!` macros.

#![allow(non_snake_case, non_upper_case_globals, non_camel_case_types)]

/// CACHEC register block base address.
pub const CACHEC: *const cachec::RegisterBlock = 0x4001_0800 as *const _;

pub mod cachec {
    use ral_registers::RWRegister;

    /// CACHEC register block.
    ///
    /// Write-to-clear and read-only behavior is a property of the hardware;
    /// every register is declared read-write here so the block can also be
    /// backed by plain memory under test.
    #[repr(C)]
    pub struct RegisterBlock {
        /// Cache control: enable, suspend.
        pub CTRL: RWRegister<u32>,
        /// Bus gating. A set SHUT bit holds the bus closed.
        pub CTRL1: RWRegister<u32>,
        /// Cache geometry (read-only on hardware).
        pub CCFG: RWRegister<u32>,
        /// Line invalidate port. Writing a virtual address invalidates the
        /// line containing it; the write completes the operation.
        pub LINE_IVAL: RWRegister<u32>,
        /// Access-error interrupt enable.
        pub ACS_INT_ENA: RWRegister<u32>,
        /// Access-error interrupt clear (write 1 to clear).
        pub ACS_INT_CLR: RWRegister<u32>,
        /// Access-error interrupt raw status (read-only on hardware).
        pub ACS_INT_ST: RWRegister<u32>,
        /// Illegal-operation interrupt enable.
        pub ILG_INT_ENA: RWRegister<u32>,
        /// Illegal-operation interrupt clear (write 1 to clear).
        pub ILG_INT_CLR: RWRegister<u32>,
        /// Illegal-operation interrupt raw status (read-only on hardware).
        pub ILG_INT_ST: RWRegister<u32>,
    }

    pub mod CTRL {
        /// Cache enable.
        pub mod ENA {
            pub const offset: u32 = 0;
            pub const mask: u32 = 0b1 << offset;
            pub mod R {}
            pub mod W {}
            pub mod RW {}
        }

        /// Cache suspend. Pauses lookups and fills; contents are retained.
        /// Does not affect ENA.
        pub mod SUS {
            pub const offset: u32 = 1;
            pub const mask: u32 = 0b1 << offset;
            pub mod R {}
            pub mod W {}
            pub mod RW {}
        }
    }

    pub mod CTRL1 {
        /// Shut the instruction bus (IBUS0).
        pub mod SHUT_IBUS {
            pub const offset: u32 = 0;
            pub const mask: u32 = 0b1 << offset;
            pub mod R {}
            pub mod W {}
            pub mod RW {}
        }

        /// Shut the data bus (DBUS0).
        pub mod SHUT_DBUS {
            pub const offset: u32 = 1;
            pub const mask: u32 = 0b1 << offset;
            pub mod R {}
            pub mod W {}
            pub mod RW {}
        }
    }

    pub mod CCFG {
        /// Cache line size, encoded: bytes = 16 << LINE_SIZE.
        pub mod LINE_SIZE {
            pub const offset: u32 = 0;
            pub const mask: u32 = 0b11 << offset;
            pub mod R {}
            pub mod W {}
            pub mod RW {}
        }
    }
}
