//! Helpers for running lookups against the interfaces of the machine running the tests.

use local_ether::{InterfaceIndex, MacAddress};

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Looks up indices from 0 upward until the first failure, stopping after `limit`.
pub fn probe(limit: InterfaceIndex) -> Vec<(InterfaceIndex, MacAddress)> {
    let mut found = Vec::new();
    for index in 0..limit {
        match local_ether::try_lookup(index) {
            Ok(mac) => found.push((index, mac)),
            Err(e) => {
                log::info!("probe stopped at index {index}: {e}");
                break;
            }
        }
    }
    found
}
