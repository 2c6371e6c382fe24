//!
//! # Local Ethernet Address Lookup
//!
//! This crate returns the hardware (MAC) address of a local network interface selected
//! by a zero-based index. Each supported operating system gets its own backend, chosen
//! at compile time: an `ioctl` on `eth<N>` for Linux, a `getifaddrs` scan for the BSDs
//! and macOS, an ARP table query for Solaris, and `GetAdaptersInfo` for Windows. Every
//! lookup is a single blocking call that releases whatever OS resource it acquired
//! before returning.
//!

pub mod backend;
pub mod config;
pub mod error;
pub mod mac;
pub mod resolver;

#[cfg(test)]
mod tests;

/// Zero-based position of an interface in the order the OS enumerates them.
pub type InterfaceIndex = u32;

pub use backend::BACKEND;
pub use config::LookupConfig;
pub use error::{LookupError, NotFound};
pub use mac::{BadAddress, MacAddress};
pub use resolver::{
    LocalEthernetResolver, lookup, lookup_into, lookup_with_config, primary_adapter, try_lookup,
};
