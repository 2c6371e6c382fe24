//! # Windows Adapter Table Walk
//!
//! ## Purpose
//!
//! Looks up the MAC address of the N-th adapter reported by `GetAdaptersInfo`.
//!
//! ## How it works
//!
//! `GetAdaptersInfo` fills a caller allocated buffer with a linked list of
//! `IP_ADAPTER_INFO` records. The first call uses room for a single record; when the
//! API answers `ERROR_BUFFER_OVERFLOW` it also reports the size it needs, the buffer
//! is reallocated to that size and the call is made once more. A second overflow is a
//! failure, there is no further retry. The list is then walked from position 0 to
//! `index`.
//!
//! ## Main components
//!
//! - `AdapterTable`: Buffer allocation, the adapter-info call and list access.
//! - `QueryStatus`: Outcome of one adapter-info call.
//! - `lookup_with()`: The two-phase query and walk, generic over `AdapterTable`.
//! - `sys::SysAdapterTable`: The `windows-sys` implementation.

#![cfg_attr(not(windows), allow(dead_code))]

use std::io;

use crate::mac::MAC_LEN;
use crate::{InterfaceIndex, LookupError, MacAddress};

/// Outcome of one call to the adapter-info API.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QueryStatus {
    /// The buffer now holds the adapter list.
    Done,
    /// The buffer is too small; the required size has been written back.
    BufferOverflow,
    /// The system has no adapters at all.
    NoAdapters,
    /// Any other error code.
    Failed(u32),
}

pub trait AdapterTable {
    /// Allocation handed to the API; dropping it frees the memory.
    type Buffer;

    /// Size of the first request.
    fn initial_len(&self) -> u32;

    fn allocate(&self, len: u32) -> Self::Buffer;

    /// Fills `buffer`. `len` is the usable size on entry and, on overflow, the
    /// required size on return.
    fn query(&self, buffer: &mut Self::Buffer, len: &mut u32) -> QueryStatus;

    /// Address of the adapter at `position` in a filled buffer.
    fn address_at(&self, buffer: &Self::Buffer, position: InterfaceIndex) -> Option<[u8; MAC_LEN]>;
}

pub fn lookup_with<T: AdapterTable>(
    table: &T,
    index: InterfaceIndex,
) -> Result<MacAddress, LookupError> {
    let buffer = fill_table(table, index)?;
    match table.address_at(&buffer, index) {
        Some(octets) => Ok(MacAddress(octets)),
        None => {
            log::debug!("adapter list ends before position {index}");
            Err(LookupError::NoSuchInterface(index))
        }
    }
}

/// Runs the size query and, if the first buffer was too small, exactly one more call.
fn fill_table<T: AdapterTable>(table: &T, index: InterfaceIndex) -> Result<T::Buffer, LookupError> {
    let mut len = table.initial_len();
    let mut buffer = table.allocate(len);
    match table.query(&mut buffer, &mut len) {
        QueryStatus::BufferOverflow => {
            log::debug!("GetAdaptersInfo needs {len} bytes, retrying");
        }
        status => return finish(buffer, status, index),
    }

    drop(buffer);
    let mut buffer = table.allocate(len);
    let status = table.query(&mut buffer, &mut len);
    finish(buffer, status, index)
}

fn finish<B>(buffer: B, status: QueryStatus, index: InterfaceIndex) -> Result<B, LookupError> {
    match status {
        QueryStatus::Done => Ok(buffer),
        QueryStatus::NoAdapters => {
            log::debug!("GetAdaptersInfo reports no adapters");
            Err(LookupError::NoSuchInterface(index))
        }
        QueryStatus::BufferOverflow => {
            log::debug!("GetAdaptersInfo overflowed the buffer it asked for");
            Err(LookupError::OsCall {
                call: "GetAdaptersInfo",
                source: io::Error::other("adapter list larger than the reported size"),
            })
        }
        QueryStatus::Failed(code) => {
            let source = io::Error::from_raw_os_error(code as i32);
            log::debug!("GetAdaptersInfo failed: {source}");
            Err(LookupError::from_os("GetAdaptersInfo", index, source))
        }
    }
}

#[cfg(windows)]
pub(crate) mod sys {
    use std::ffi::CStr;
    use std::mem::size_of;

    use windows_sys::Win32::Foundation::{ERROR_BUFFER_OVERFLOW, ERROR_NO_DATA, ERROR_SUCCESS};
    use windows_sys::Win32::NetworkManagement::IpHelper::{GetAdaptersInfo, IP_ADAPTER_INFO};

    use super::{AdapterTable, QueryStatus};
    use crate::InterfaceIndex;
    use crate::mac::MAC_LEN;

    /// Heap buffer for the adapter list, 8-byte aligned for the records it will hold.
    pub struct AdapterBuffer(Vec<u64>);

    impl AdapterBuffer {
        fn capacity_bytes(&self) -> u32 {
            u32::try_from(self.0.len() * size_of::<u64>())
                .unwrap_or(u32::MAX)
        }
    }

    pub struct SysAdapterTable;

    impl AdapterTable for SysAdapterTable {
        type Buffer = AdapterBuffer;

        fn initial_len(&self) -> u32 {
            size_of::<IP_ADAPTER_INFO>() as u32
        }

        fn allocate(&self, len: u32) -> AdapterBuffer {
            AdapterBuffer(vec![0u64; (len as usize).div_ceil(size_of::<u64>())])
        }

        fn query(&self, buffer: &mut AdapterBuffer, len: &mut u32) -> QueryStatus {
            // never let the API believe there is more room than was allocated
            let mut size = (*len).min(buffer.capacity_bytes());
            let rc = unsafe {
                GetAdaptersInfo(buffer.0.as_mut_ptr() as *mut IP_ADAPTER_INFO, &mut size)
            };
            *len = size;
            match rc {
                ERROR_SUCCESS => QueryStatus::Done,
                ERROR_BUFFER_OVERFLOW => QueryStatus::BufferOverflow,
                ERROR_NO_DATA => QueryStatus::NoAdapters,
                code => QueryStatus::Failed(code),
            }
        }

        fn address_at(
            &self,
            buffer: &AdapterBuffer,
            position: InterfaceIndex,
        ) -> Option<[u8; MAC_LEN]> {
            if buffer.0.is_empty() {
                return None;
            }
            let mut adapter = buffer.0.as_ptr() as *const IP_ADAPTER_INFO;
            let mut current: InterfaceIndex = 0;
            while !adapter.is_null() {
                // SAFETY: the list was written by GetAdaptersInfo into `buffer`, which
                // outlives this walk.
                let info = unsafe { &*adapter };
                if current == position {
                    let name = unsafe { CStr::from_ptr(info.AdapterName.as_ptr().cast()) };
                    let desc = unsafe { CStr::from_ptr(info.Description.as_ptr().cast()) };
                    let mut mac = [0u8; MAC_LEN];
                    mac.copy_from_slice(&info.Address[..MAC_LEN]);
                    log::debug!(
                        "adapter {current}: {} ({}), address length {}",
                        name.to_string_lossy(),
                        desc.to_string_lossy(),
                        info.AddressLength
                    );
                    return Some(mac);
                }
                adapter = info.Next as *const IP_ADAPTER_INFO;
                current += 1;
            }
            None
        }
    }
}
