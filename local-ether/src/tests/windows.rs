use std::cell::Cell;

use super::sim::{Guard, Ledger, init_logger};
use crate::backend::windows::{AdapterTable, QueryStatus, lookup_with};
use crate::mac::MAC_LEN;
use crate::{InterfaceIndex, LookupError, MacAddress};

const RECORD_LEN: u32 = 640;

struct SimBuffer {
    len: u32,
    adapters: Vec<[u8; MAC_LEN]>,
    _guard: Guard,
}

/// Adapter table whose list needs `RECORD_LEN` bytes per adapter.
struct SimAdapters {
    ledger: Ledger,
    adapters: Vec<[u8; MAC_LEN]>,
    /// Size reported on overflow, `None` for the true size.
    reported_len: Option<u32>,
    /// Error returned by the n-th query (0 based).
    fail_at: Option<(usize, QueryStatus)>,
    queries: Cell<usize>,
}

impl SimAdapters {
    fn new(adapters: &[[u8; MAC_LEN]]) -> Self {
        SimAdapters {
            ledger: Ledger::default(),
            adapters: adapters.to_vec(),
            reported_len: None,
            fail_at: None,
            queries: Cell::new(0),
        }
    }

    fn needed(&self) -> u32 {
        RECORD_LEN * self.adapters.len() as u32
    }
}

impl AdapterTable for SimAdapters {
    type Buffer = SimBuffer;

    fn initial_len(&self) -> u32 {
        RECORD_LEN
    }

    fn allocate(&self, len: u32) -> SimBuffer {
        self.ledger.call(format!("alloc {len}"));
        SimBuffer {
            len,
            adapters: Vec::new(),
            _guard: self.ledger.acquire(),
        }
    }

    fn query(&self, buffer: &mut SimBuffer, len: &mut u32) -> QueryStatus {
        let n = self.queries.get();
        self.queries.set(n + 1);
        self.ledger.call("GetAdaptersInfo");
        if let Some((at, status)) = self.fail_at {
            if at == n {
                return status;
            }
        }
        if self.adapters.is_empty() {
            return QueryStatus::NoAdapters;
        }
        if buffer.len < self.needed() {
            *len = self.reported_len.unwrap_or(self.needed());
            return QueryStatus::BufferOverflow;
        }
        buffer.adapters = self.adapters.clone();
        QueryStatus::Done
    }

    fn address_at(&self, buffer: &SimBuffer, position: InterfaceIndex) -> Option<[u8; MAC_LEN]> {
        buffer.adapters.get(position as usize).copied()
    }
}

const NIC0: [u8; 6] = [0x00, 0x50, 0x56, 0xc0, 0x00, 0x01];
const NIC1: [u8; 6] = [0x00, 0x50, 0x56, 0xc0, 0x00, 0x08];
const NIC2: [u8; 6] = [0x3c, 0x7c, 0x3f, 0x1e, 0x22, 0x90];

#[test]
fn test_single_adapter_fits_first_buffer() {
    init_logger();
    let table = SimAdapters::new(&[NIC0]);
    assert_eq!(lookup_with(&table, 0).unwrap(), MacAddress(NIC0));
    assert_eq!(table.ledger.calls(), ["alloc 640", "GetAdaptersInfo"]);
    table.ledger.assert_balanced();
}

#[test]
fn test_overflow_is_retried_once_with_reported_size() {
    let table = SimAdapters::new(&[NIC0, NIC1, NIC2]);
    assert_eq!(lookup_with(&table, 2).unwrap(), MacAddress(NIC2));
    assert_eq!(
        table.ledger.calls(),
        ["alloc 640", "GetAdaptersInfo", "alloc 1920", "GetAdaptersInfo"]
    );
    assert_eq!(table.ledger.acquired(), 2);
    table.ledger.assert_balanced();
}

#[test]
fn test_second_overflow_is_not_retried() {
    // the API keeps claiming less room than it really needs
    let table = SimAdapters {
        reported_len: Some(RECORD_LEN * 2),
        ..SimAdapters::new(&[NIC0, NIC1, NIC2])
    };
    let err = lookup_with(&table, 0).unwrap_err();
    assert!(
        matches!(err, LookupError::OsCall { call: "GetAdaptersInfo", .. }),
        "{err:?}"
    );
    assert_eq!(table.queries.get(), 2);
    table.ledger.assert_balanced();
}

#[test]
fn test_walks_to_position() {
    let table = SimAdapters::new(&[NIC0, NIC1, NIC2]);
    assert_eq!(lookup_with(&table, 0).unwrap(), MacAddress(NIC0));
    assert_eq!(lookup_with(&table, 1).unwrap(), MacAddress(NIC1));
    let err = lookup_with(&table, 3).unwrap_err();
    assert!(matches!(err, LookupError::NoSuchInterface(3)), "{err:?}");
    table.ledger.assert_balanced();
}

#[test]
fn test_error_on_first_call() {
    let table = SimAdapters {
        fail_at: Some((0, QueryStatus::Failed(87))),
        ..SimAdapters::new(&[NIC0])
    };
    assert!(matches!(
        lookup_with(&table, 0).unwrap_err(),
        LookupError::OsCall { .. }
    ));
    assert_eq!(table.queries.get(), 1);
    table.ledger.assert_balanced();
}

#[test]
fn test_error_on_second_call() {
    let table = SimAdapters {
        fail_at: Some((1, QueryStatus::Failed(8))),
        ..SimAdapters::new(&[NIC0, NIC1])
    };
    assert!(lookup_with(&table, 0).is_err());
    assert_eq!(table.queries.get(), 2);
    assert_eq!(table.ledger.acquired(), 2);
    table.ledger.assert_balanced();
}

#[test]
fn test_no_adapters() {
    let table = SimAdapters::new(&[]);
    let err = lookup_with(&table, 0).unwrap_err();
    assert!(matches!(err, LookupError::NoSuchInterface(0)), "{err:?}");
    table.ledger.assert_balanced();
}
