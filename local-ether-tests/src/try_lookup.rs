#![cfg(test)]

use local_ether_tests::{init_logger, probe};

#[test]
fn test_primary_adapter() {
    init_logger();
    match local_ether::try_lookup(0) {
        Ok(mac) => println!("primary adapter ({} backend): {mac}", local_ether::BACKEND),
        Err(e) => println!("no primary adapter ({} backend): {e}", local_ether::BACKEND),
    }
}

#[test]
fn test_probe_is_repeatable() -> anyhow::Result<()> {
    init_logger();
    let found = probe(16);
    for (index, mac) in &found {
        println!("interface {index}: {mac}");
        let again = local_ether::lookup(*index)?;
        anyhow::ensure!(again == *mac, "index {index} changed from {mac} to {again}");
    }
    Ok(())
}

#[test]
fn test_far_index_is_not_found() -> anyhow::Result<()> {
    init_logger();
    let mut buf = [0xa5u8; 6];
    anyhow::ensure!(local_ether::lookup_into(u32::MAX, &mut buf).is_err());
    anyhow::ensure!(buf == [0xa5u8; 6], "buffer written on failure: {buf:02x?}");
    Ok(())
}

#[test]
fn test_primary_matches_index_zero() {
    init_logger();
    assert_eq!(local_ether::primary_adapter(), local_ether::lookup(0).ok());
}
