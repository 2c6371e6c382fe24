//! # Platform Backends
//!
//! Every backend module is compiled on every target so its lookup logic can be
//! exercised with simulated OS facilities. Only the `sys` part of the backend that
//! matches the build target is compiled, and `os_lookup` is bound to it here.

pub mod bsd;
pub mod linux;
pub mod solaris;
pub mod windows;

use crate::{InterfaceIndex, LookupConfig, LookupError, MacAddress};

#[cfg(any(target_os = "linux", target_os = "android"))]
pub const BACKEND: &str = "linux";

#[cfg(any(
    target_os = "macos",
    target_os = "ios",
    target_os = "freebsd",
    target_os = "netbsd",
    target_os = "openbsd",
    target_os = "dragonfly"
))]
pub const BACKEND: &str = "bsd";

#[cfg(any(target_os = "solaris", target_os = "illumos"))]
pub const BACKEND: &str = "solaris";

#[cfg(windows)]
pub const BACKEND: &str = "windows";

#[cfg(not(any(
    target_os = "linux",
    target_os = "android",
    target_os = "macos",
    target_os = "ios",
    target_os = "freebsd",
    target_os = "netbsd",
    target_os = "openbsd",
    target_os = "dragonfly",
    target_os = "solaris",
    target_os = "illumos",
    windows
)))]
pub const BACKEND: &str = "unsupported";

#[cfg(any(target_os = "linux", target_os = "android"))]
pub(crate) fn os_lookup(
    index: InterfaceIndex,
    config: &LookupConfig,
) -> Result<MacAddress, LookupError> {
    linux::lookup_with(&linux::sys::SysHwAddr, config.device_prefix(), index)
}

#[cfg(any(
    target_os = "macos",
    target_os = "ios",
    target_os = "freebsd",
    target_os = "netbsd",
    target_os = "openbsd",
    target_os = "dragonfly"
))]
pub(crate) fn os_lookup(
    index: InterfaceIndex,
    _config: &LookupConfig,
) -> Result<MacAddress, LookupError> {
    bsd::lookup_with(&bsd::sys::SysIfAddrs, index)
}

#[cfg(any(target_os = "solaris", target_os = "illumos"))]
pub(crate) fn os_lookup(
    index: InterfaceIndex,
    _config: &LookupConfig,
) -> Result<MacAddress, LookupError> {
    solaris::lookup_with(&solaris::sys::SysArp, index)
}

#[cfg(windows)]
pub(crate) fn os_lookup(
    index: InterfaceIndex,
    _config: &LookupConfig,
) -> Result<MacAddress, LookupError> {
    windows::lookup_with(&windows::sys::SysAdapterTable, index)
}

#[cfg(not(any(
    target_os = "linux",
    target_os = "android",
    target_os = "macos",
    target_os = "ios",
    target_os = "freebsd",
    target_os = "netbsd",
    target_os = "openbsd",
    target_os = "dragonfly",
    target_os = "solaris",
    target_os = "illumos",
    windows
)))]
pub(crate) fn os_lookup(
    index: InterfaceIndex,
    _config: &LookupConfig,
) -> Result<MacAddress, LookupError> {
    log::debug!("no backend for this target, index {index} not looked up");
    Err(LookupError::Unsupported)
}
