//! # BSD Link-Layer Address Scan
//!
//! ## Purpose
//!
//! Looks up the MAC address of the N-th link-layer interface on macOS and the other
//! BSD derived systems that provide `getifaddrs`.
//!
//! ## How it works
//!
//! `getifaddrs` returns one record per address per interface. Records whose family is
//! `AF_LINK` carry the hardware address in a `sockaddr_dl`, right after the interface
//! name stored in `sdl_data`. Only link-layer records with a non-empty address count;
//! the one reached after skipping `index` of them is the answer. At most 6 bytes are
//! copied and a shorter address leaves the tail zeroed. The list is owned by `IfAddrs`,
//! whose `Drop` calls `freeifaddrs`.
//!
//! ## Main components
//!
//! - `AddressEntry`: One record of the list as the lookup sees it.
//! - `InterfaceAddresses`, `AddressSnapshot`: The OS address list and one snapshot of it.
//! - `lookup_with()`: The scan, generic over `InterfaceAddresses`.
//! - `sys::IfAddrs`, `sys::SysIfAddrs`: The `libc` implementation.

#![cfg_attr(
    not(any(
        target_os = "macos",
        target_os = "ios",
        target_os = "freebsd",
        target_os = "netbsd",
        target_os = "openbsd",
        target_os = "dragonfly"
    )),
    allow(dead_code)
)]

use std::io;

use crate::mac::MAC_LEN;
use crate::{InterfaceIndex, LookupError, MacAddress};

/// One record of the interface address list.
#[derive(Clone, Copy, Debug)]
pub struct AddressEntry<'a> {
    /// Interface the record belongs to.
    pub name: &'a str,
    /// Hardware address bytes for link-layer records, `None` for every other family.
    pub link_payload: Option<&'a [u8]>,
}

/// A snapshot of the address list. Dropping it releases the list.
pub trait AddressSnapshot {
    fn entries(&self) -> impl Iterator<Item = AddressEntry<'_>>;
}

pub trait InterfaceAddresses {
    type Snapshot: AddressSnapshot;

    fn snapshot(&self) -> io::Result<Self::Snapshot>;
}

/// Returns the address of the link-layer entry at position `index`.
pub fn lookup_with<A: InterfaceAddresses>(
    addresses: &A,
    index: InterfaceIndex,
) -> Result<MacAddress, LookupError> {
    let snapshot = addresses.snapshot().map_err(|e| {
        log::debug!("getifaddrs failed: {e}");
        LookupError::OsCall {
            call: "getifaddrs",
            source: e,
        }
    })?;

    let found = snapshot
        .entries()
        .filter_map(|entry| match entry.link_payload {
            Some(payload) if !payload.is_empty() => Some((entry.name, payload)),
            _ => {
                log::trace!("{}: skipping non link-layer entry", entry.name);
                None
            }
        })
        .nth(index as usize)
        .map(|(name, payload)| {
            let mut octets = [0u8; MAC_LEN];
            let len = payload.len().min(MAC_LEN);
            octets[..len].copy_from_slice(&payload[..len]);
            let mac = MacAddress(octets);
            log::debug!("{name}: {mac} (address length {})", payload.len());
            mac
        });

    found.ok_or(LookupError::NoSuchInterface(index))
}

#[cfg(any(
    target_os = "macos",
    target_os = "ios",
    target_os = "freebsd",
    target_os = "netbsd",
    target_os = "openbsd",
    target_os = "dragonfly"
))]
pub(crate) mod sys {
    use std::ffi::CStr;
    use std::{io, iter, mem, ptr, slice};

    use super::{AddressEntry, AddressSnapshot, InterfaceAddresses};

    /// Owns the list returned by `getifaddrs` and frees it on drop.
    pub struct IfAddrs(*mut libc::ifaddrs);

    impl IfAddrs {
        pub fn new() -> io::Result<Self> {
            let mut head: *mut libc::ifaddrs = ptr::null_mut();
            if unsafe { libc::getifaddrs(&mut head) } != 0 {
                return Err(io::Error::last_os_error());
            }
            Ok(IfAddrs(head))
        }
    }

    impl Drop for IfAddrs {
        fn drop(&mut self) {
            if !self.0.is_null() {
                unsafe { libc::freeifaddrs(self.0) };
            }
        }
    }

    impl AddressSnapshot for IfAddrs {
        fn entries(&self) -> impl Iterator<Item = AddressEntry<'_>> {
            let mut cursor = self.0 as *const libc::ifaddrs;
            iter::from_fn(move || {
                if cursor.is_null() {
                    return None;
                }
                // SAFETY: the list stays alive as long as `self` is borrowed.
                let ifa = unsafe { &*cursor };
                cursor = ifa.ifa_next as *const libc::ifaddrs;
                Some(unsafe { entry_of(ifa) })
            })
        }
    }

    /// # Safety
    /// `ifa` must be a record of a live `getifaddrs` list.
    unsafe fn entry_of(ifa: &libc::ifaddrs) -> AddressEntry<'_> {
        unsafe {
            let name = if ifa.ifa_name.is_null() {
                ""
            } else {
                CStr::from_ptr(ifa.ifa_name).to_str().unwrap_or("")
            };
            let link_payload = if !ifa.ifa_addr.is_null()
                && i32::from((*ifa.ifa_addr).sa_family) == libc::AF_LINK
            {
                Some(link_address(ifa.ifa_addr))
            } else {
                None
            };
            AddressEntry { name, link_payload }
        }
    }

    /// Hardware address bytes of a link-layer socket address.
    ///
    /// # Safety
    /// `addr` must point at a `sockaddr_dl` holding `sdl_nlen + sdl_alen` bytes of data,
    /// which may run past the declared end of `sdl_data`.
    pub(crate) unsafe fn link_address<'a>(addr: *const libc::sockaddr) -> &'a [u8] {
        unsafe {
            let sdl = addr as *const libc::sockaddr_dl;
            let nlen = usize::from((*sdl).sdl_nlen);
            let alen = usize::from((*sdl).sdl_alen);
            let data = mem::offset_of!(libc::sockaddr_dl, sdl_data);
            // the address follows the interface name
            let start = (addr as *const u8).add(data + nlen);
            slice::from_raw_parts(start, alen)
        }
    }

    pub struct SysIfAddrs;

    impl InterfaceAddresses for SysIfAddrs {
        type Snapshot = IfAddrs;

        fn snapshot(&self) -> io::Result<IfAddrs> {
            IfAddrs::new()
        }
    }
}
