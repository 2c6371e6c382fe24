//! # Local Ethernet Resolver
//!
//! ## Purpose
//!
//! The public entry points of the crate. A lookup takes an interface index and yields
//! the 6-byte hardware address of that interface, or `NotFound`.
//!
//! ## How it works
//!
//! Every call goes straight to the backend selected for the build target
//! (`backend::os_lookup`); nothing is cached and no state survives the call. The
//! structured `LookupError` the backend produces is available through `try_lookup`,
//! while `lookup` and `lookup_into` reduce it to `NotFound`.
//!
//! ## Main components
//!
//! - `LocalEthernetResolver`: A resolver carrying a `LookupConfig`.
//! - `lookup()`, `lookup_into()`, `try_lookup()`, `lookup_with_config()`,
//!   `primary_adapter()`: Free functions using the default configuration.

use crate::backend;
use crate::mac::MAC_LEN;
use crate::{InterfaceIndex, LookupConfig, LookupError, MacAddress, NotFound};

/// Resolves local interface hardware addresses with a fixed configuration.
#[derive(Debug, Clone, Default)]
pub struct LocalEthernetResolver {
    config: LookupConfig,
}

impl LocalEthernetResolver {
    pub fn new(config: LookupConfig) -> Self {
        LocalEthernetResolver { config }
    }

    pub fn config(&self) -> &LookupConfig {
        &self.config
    }

    /// Looks up the address of the interface at `index`.
    pub fn lookup(&self, index: InterfaceIndex) -> Result<MacAddress, NotFound> {
        self.try_lookup(index).map_err(NotFound::from)
    }

    /// Like `lookup`, but reports why the lookup failed.
    pub fn try_lookup(&self, index: InterfaceIndex) -> Result<MacAddress, LookupError> {
        log::trace!(
            "looking up interface {index} ({} backend)",
            backend::BACKEND
        );
        backend::os_lookup(index, &self.config)
    }

    /// Writes the address of the interface at `index` into `buf`.
    ///
    /// `buf` is only written when the lookup succeeds.
    pub fn lookup_into(
        &self,
        index: InterfaceIndex,
        buf: &mut [u8; MAC_LEN],
    ) -> Result<(), NotFound> {
        let mac = self.lookup(index)?;
        *buf = mac.octets();
        Ok(())
    }

    /// Address of interface 0, which the OS usually lists first.
    pub fn primary_adapter(&self) -> Option<MacAddress> {
        self.lookup(0).ok()
    }
}

/// Looks up the hardware address of the local interface at `index`.
///
/// # Example
///
/// ```no_run
/// match local_ether::lookup(0) {
///     Ok(mac) => println!("eth0 is {mac}"),
///     Err(e) => println!("{e}"),
/// }
/// ```
pub fn lookup(index: InterfaceIndex) -> Result<MacAddress, NotFound> {
    LocalEthernetResolver::default().lookup(index)
}

/// Writes the hardware address of the interface at `index` into `buf`.
pub fn lookup_into(index: InterfaceIndex, buf: &mut [u8; MAC_LEN]) -> Result<(), NotFound> {
    LocalEthernetResolver::default().lookup_into(index, buf)
}

pub fn try_lookup(index: InterfaceIndex) -> Result<MacAddress, LookupError> {
    LocalEthernetResolver::default().try_lookup(index)
}

pub fn lookup_with_config(
    index: InterfaceIndex,
    config: &LookupConfig,
) -> Result<MacAddress, LookupError> {
    backend::os_lookup(index, config)
}

pub fn primary_adapter() -> Option<MacAddress> {
    LocalEthernetResolver::default().primary_adapter()
}
