use std::collections::HashSet;

use crate::{BadAddress, MacAddress};

#[test]
fn test_display() {
    let mac = MacAddress([0x00, 0xE0, 0x98, 0x06, 0x92, 0x0E]);
    assert_eq!(mac.to_string(), "00:e0:98:06:92:0e");
    assert_eq!(MacAddress::NULL.to_string(), "00:00:00:00:00:00");

    // same text form as eui48 in its canonical colon notation
    let eui = eui48::MacAddress::new(mac.octets());
    assert_eq!(mac.to_string(), eui.to_hex_string());
}

#[test]
fn test_parse_lenient_forms() {
    let expected = MacAddress([0x00, 0xE0, 0x98, 0x06, 0x92, 0x0E]);
    for text in [
        "00:E0:98:06:92:0E",
        "00:e0:98:06:92:0e",
        "0:e0:98:6:92:e",
        "0-e0-98 6-92-e",
        "00e09806920e",
        "00-E0-98-06-92-0E",
        "  00.e0.98.06.92.0e",
        ":00:e0:98:06:92:0e:",
    ] {
        assert_eq!(text.parse::<MacAddress>(), Ok(expected), "{text:?}");
    }
}

#[test]
fn test_parse_matches_eui48() {
    for text in ["01:23:45:67:89:ab", "ff:ff:ff:ff:ff:ff", "12-34-56-78-9a-bc"] {
        let ours: MacAddress = text.parse().unwrap();
        let theirs = eui48::MacAddress::parse_str(text).unwrap();
        assert_eq!(&ours.octets()[..], theirs.as_bytes(), "{text:?}");
    }
}

#[test]
fn test_parse_errors() {
    assert!(matches!(
        "00:e0:98:06:92".parse::<MacAddress>(),
        Err(BadAddress::NotEnoughBytes(_))
    ));
    assert!(matches!(
        "".parse::<MacAddress>(),
        Err(BadAddress::NotEnoughBytes(_))
    ));
    assert!(matches!(
        "00:e0:98:06:92:0e:11".parse::<MacAddress>(),
        Err(BadAddress::TooManyBytes(_))
    ));
    assert!(matches!(
        "00e09806920e1".parse::<MacAddress>(),
        Err(BadAddress::TooManyBytes(_))
    ));
    assert!(matches!(
        "xyz".parse::<MacAddress>(),
        Err(BadAddress::NotEnoughBytes(_))
    ));
}

#[test]
fn test_from_bytes() {
    assert_eq!(
        MacAddress::from_bytes(&[1, 2, 3, 4, 5, 6]),
        Ok(MacAddress([1, 2, 3, 4, 5, 6]))
    );
    assert_eq!(
        MacAddress::from_bytes(&[1, 2, 3]),
        Err(BadAddress::Length(3))
    );
    assert_eq!(MacAddress::from_bytes(&[0; 8]), Err(BadAddress::Length(8)));
}

#[test]
fn test_u64_conversion() {
    let mac = MacAddress::from_u64(0x0000_00e0_9806_920e);
    assert_eq!(mac, MacAddress([0x00, 0xe0, 0x98, 0x06, 0x92, 0x0e]));
    assert_eq!(mac.to_u64(), 0x00e0_9806_920e);
    // bits above 48 are dropped
    assert_eq!(
        MacAddress::from_u64(0xffff_0102_0304_0506).to_u64(),
        0x0102_0304_0506
    );
}

#[test]
fn test_null() {
    assert!(MacAddress::NULL.is_null());
    assert!(MacAddress::default().is_null());
    assert!(!MacAddress([0, 0, 0, 0, 0, 1]).is_null());
}

#[test]
fn test_ordering_is_unsigned() {
    let low = MacAddress([0x00, 0, 0, 0, 0, 0xff]);
    let high = MacAddress([0x80, 0, 0, 0, 0, 0]);
    assert!(low < high);
    assert!(MacAddress::NULL < low);
}

#[test]
fn test_equality_and_hash() {
    let a: MacAddress = "00:11:22:33:44:55".parse().unwrap();
    let b = MacAddress::from([0x00, 0x11, 0x22, 0x33, 0x44, 0x55]);
    assert_eq!(a, b);
    let set: HashSet<MacAddress> = [a, b, MacAddress::NULL].into_iter().collect();
    assert_eq!(set.len(), 2);
    let bytes: [u8; 6] = a.into();
    assert_eq!(&bytes[..], a.as_ref());
}
