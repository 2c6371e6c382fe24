//! # Solaris ARP Table Query
//!
//! ## Purpose
//!
//! Looks up the MAC address of the host's primary interface on Solaris and illumos.
//!
//! ## How it works
//!
//! The local hostname is resolved to an IPv4 address with the system resolver, and the
//! ARP table entry for that address (`SIOCGARP` on a UDP socket) gives the hardware
//! address bound to it. This can only ever find one interface, so index 0 is the only
//! index served; every other index fails before any OS call is made.
//!
//! ## Main components
//!
//! - `ArpResolver`: Hostname, resolver and ARP table access needed from the OS.
//! - `lookup_with()`: The lookup, generic over `ArpResolver`.
//! - `sys::SysArp`: The `libc` implementation, compiled on Solaris and illumos only.

#![cfg_attr(
    not(any(target_os = "solaris", target_os = "illumos")),
    allow(dead_code)
)]

use std::io;
use std::net::Ipv4Addr;

use crate::mac::MAC_LEN;
use crate::{InterfaceIndex, LookupError, MacAddress};

pub trait ArpResolver {
    /// Open socket; dropping it closes the descriptor.
    type Socket;

    fn hostname(&self) -> io::Result<String>;

    fn resolve(&self, host: &str) -> io::Result<Ipv4Addr>;

    fn open(&self) -> io::Result<Self::Socket>;

    /// Hardware address the ARP table binds to `ip`.
    fn arp_lookup(&self, socket: &Self::Socket, ip: Ipv4Addr) -> io::Result<[u8; MAC_LEN]>;
}

pub fn lookup_with<R: ArpResolver>(
    resolver: &R,
    index: InterfaceIndex,
) -> Result<MacAddress, LookupError> {
    if index != 0 {
        log::debug!("only the primary interface can be resolved, index {index} rejected");
        return Err(LookupError::UnsupportedIndex(index));
    }

    let host = resolver.hostname().map_err(|e| {
        log::debug!("gethostname failed: {e}");
        LookupError::OsCall {
            call: "gethostname",
            source: e,
        }
    })?;
    let ip = resolver.resolve(&host).map_err(|e| {
        log::debug!("cannot resolve {host}: {e}");
        LookupError::OsCall {
            call: "resolve",
            source: e,
        }
    })?;

    let socket = resolver.open().map_err(|e| {
        log::debug!("socket(AF_INET, SOCK_DGRAM, IPPROTO_UDP) failed: {e}");
        LookupError::OsCall {
            call: "socket",
            source: e,
        }
    })?;
    let hwaddr = resolver.arp_lookup(&socket, ip);
    drop(socket);

    match hwaddr {
        Ok(octets) => {
            let mac = MacAddress(octets);
            log::debug!("{host} ({ip}): {mac}");
            Ok(mac)
        }
        Err(e) => {
            log::debug!("SIOCGARP for {ip} failed: {e}");
            Err(LookupError::from_os("SIOCGARP", index, e))
        }
    }
}

#[cfg(any(target_os = "solaris", target_os = "illumos"))]
pub(crate) mod sys {
    use std::ffi::CStr;
    use std::io;
    use std::mem;
    use std::net::{Ipv4Addr, SocketAddr, ToSocketAddrs as _};
    use std::os::fd::{AsRawFd as _, FromRawFd as _, OwnedFd};

    use super::ArpResolver;
    use crate::mac::MAC_LEN;

    const MAXHOSTNAMELEN: usize = 256;

    /// `struct arpreq` from `<net/if_arp.h>`.
    #[repr(C)]
    struct ArpReq {
        arp_pa: libc::sockaddr,
        arp_ha: libc::sockaddr,
        arp_flags: libc::c_int,
    }

    static_assertions::assert_eq_size!(ArpReq, [u8; 36]);
    static_assertions::assert_eq_size!(libc::sockaddr_in, libc::sockaddr);

    /// `_IOWR('i', 31, struct arpreq)` from `<sys/sockio.h>`.
    const SIOCGARP: libc::c_int = (0xC000_0000u32
        | ((mem::size_of::<ArpReq>() as u32 & 0xff) << 16)
        | ((b'i' as u32) << 8)
        | 31) as libc::c_int;

    pub struct SysArp;

    impl ArpResolver for SysArp {
        type Socket = OwnedFd;

        fn hostname(&self) -> io::Result<String> {
            let mut buf = [0u8; MAXHOSTNAMELEN];
            if unsafe { libc::gethostname(buf.as_mut_ptr() as *mut libc::c_char, buf.len()) } != 0 {
                return Err(io::Error::last_os_error());
            }
            let name = CStr::from_bytes_until_nul(&buf).map_err(|_| {
                io::Error::new(io::ErrorKind::InvalidData, "hostname is not terminated")
            })?;
            name.to_str()
                .map(str::to_owned)
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
        }

        fn resolve(&self, host: &str) -> io::Result<Ipv4Addr> {
            (host, 0u16)
                .to_socket_addrs()?
                .find_map(|addr| match addr {
                    SocketAddr::V4(v4) => Some(*v4.ip()),
                    SocketAddr::V6(_) => None,
                })
                .ok_or_else(|| {
                    io::Error::new(
                        io::ErrorKind::AddrNotAvailable,
                        format!("no IPv4 address for {host}"),
                    )
                })
        }

        fn open(&self) -> io::Result<OwnedFd> {
            let fd = unsafe { libc::socket(libc::AF_INET, libc::SOCK_DGRAM, libc::IPPROTO_UDP) };
            if fd < 0 {
                return Err(io::Error::last_os_error());
            }
            Ok(unsafe { OwnedFd::from_raw_fd(fd) })
        }

        fn arp_lookup(&self, socket: &OwnedFd, ip: Ipv4Addr) -> io::Result<[u8; MAC_LEN]> {
            unsafe {
                let mut req: ArpReq = mem::zeroed();
                let sin = &mut *(&mut req.arp_pa as *mut libc::sockaddr as *mut libc::sockaddr_in);
                sin.sin_family = libc::AF_INET as libc::sa_family_t;
                sin.sin_addr.s_addr = u32::from_ne_bytes(ip.octets());
                if libc::ioctl(socket.as_raw_fd(), SIOCGARP, &mut req) < 0 {
                    return Err(io::Error::last_os_error());
                }
                let mut result = [0u8; MAC_LEN];
                for (dst, src) in result.iter_mut().zip(req.arp_ha.sa_data.iter()) {
                    *dst = *src as u8;
                }
                Ok(result)
            }
        }
    }
}
