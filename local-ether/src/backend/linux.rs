//! # Linux Hardware Address Query
//!
//! ## Purpose
//!
//! Looks up the MAC address of `eth<N>` for index `N` on Linux and Android.
//!
//! ## How it works
//!
//! An IPv4 datagram socket is opened only to have a handle for `ioctl`. The device
//! name is built from the prefix (`eth` unless configured otherwise) and the decimal
//! index, and `SIOCGIFHWADDR` returns the hardware address of that device. The socket
//! is an `OwnedFd`, so it is closed on every return path.
//!
//! Interfaces are assumed to be numbered consecutively under the prefix. A device with
//! any other name (`wlan0`, `enp3s0`, a bridge) is not visible here.
//!
//! ## Main components
//!
//! - `HwAddrControl`: The socket/ioctl pair the lookup needs from the OS.
//! - `lookup_with()`: The lookup, generic over `HwAddrControl`.
//! - `sys::SysHwAddr`: The `libc` implementation, compiled on Linux and Android only.

#![cfg_attr(not(any(target_os = "linux", target_os = "android")), allow(dead_code))]

use std::io;

use crate::mac::MAC_LEN;
use crate::{InterfaceIndex, LookupError, MacAddress};

/// Longest device name the kernel accepts, not counting the trailing NUL.
pub const DEVICE_NAME_MAX: usize = 15;

/// Builds the name of the device queried for `index`, e.g. `eth2`.
pub fn device_name(prefix: &str, index: InterfaceIndex) -> String {
    format!("{prefix}{index}")
}

/// Socket handle plus hardware address query.
pub trait HwAddrControl {
    /// Open socket; dropping it closes the descriptor.
    type Socket;

    fn open(&self) -> io::Result<Self::Socket>;

    /// Issues `SIOCGIFHWADDR` for `device` and returns the first 6 address bytes.
    fn hardware_address(&self, socket: &Self::Socket, device: &str) -> io::Result<[u8; MAC_LEN]>;
}

/// Returns the hardware address of device `<prefix><index>`.
pub fn lookup_with<C: HwAddrControl>(
    control: &C,
    prefix: &str,
    index: InterfaceIndex,
) -> Result<MacAddress, LookupError> {
    let device = device_name(prefix, index);
    if device.len() > DEVICE_NAME_MAX || device.contains('\0') {
        log::debug!("device name {device:?} cannot name a kernel interface");
        return Err(LookupError::NoSuchInterface(index));
    }

    let socket = control.open().map_err(|e| {
        log::debug!("socket(AF_INET, SOCK_DGRAM) failed: {e}");
        LookupError::OsCall {
            call: "socket",
            source: e,
        }
    })?;
    let hwaddr = control.hardware_address(&socket, &device);
    drop(socket);

    match hwaddr {
        Ok(octets) => {
            let mac = MacAddress(octets);
            log::debug!("{device}: {mac}");
            Ok(mac)
        }
        Err(e) => {
            log::debug!("SIOCGIFHWADDR on {device} failed: {e}");
            Err(LookupError::from_os("SIOCGIFHWADDR", index, e))
        }
    }
}

#[cfg(any(target_os = "linux", target_os = "android"))]
pub(crate) mod sys {
    use std::io;
    use std::os::fd::{AsRawFd as _, FromRawFd as _, OwnedFd};

    use super::{DEVICE_NAME_MAX, HwAddrControl};
    use crate::mac::MAC_LEN;

    static_assertions::const_assert!(DEVICE_NAME_MAX < libc::IFNAMSIZ);

    pub struct SysHwAddr;

    impl HwAddrControl for SysHwAddr {
        type Socket = OwnedFd;

        fn open(&self) -> io::Result<OwnedFd> {
            let fd =
                unsafe { libc::socket(libc::AF_INET, libc::SOCK_DGRAM | libc::SOCK_CLOEXEC, 0) };
            if fd < 0 {
                return Err(io::Error::last_os_error());
            }
            Ok(unsafe { OwnedFd::from_raw_fd(fd) })
        }

        fn hardware_address(&self, socket: &OwnedFd, device: &str) -> io::Result<[u8; MAC_LEN]> {
            unsafe {
                let mut if_req: libc::ifreq = std::mem::zeroed();
                // zeroed above, so the name stays NUL terminated
                for (dst, src) in if_req.ifr_name.iter_mut().zip(device.as_bytes()) {
                    *dst = *src as libc::c_char;
                }
                if libc::ioctl(socket.as_raw_fd(), libc::SIOCGIFHWADDR, &mut if_req) < 0 {
                    return Err(io::Error::last_os_error());
                }
                let mut result = [0u8; MAC_LEN];
                let hwaddr = &if_req.ifr_ifru.ifru_hwaddr.sa_data;
                for (dst, src) in result.iter_mut().zip(hwaddr.iter()) {
                    *dst = *src as u8;
                }
                Ok(result)
            }
        }
    }
}
