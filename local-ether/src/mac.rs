//! # Ethernet Hardware Address
//!
//! ## Purpose
//!
//! This module defines `MacAddress`, the 6-byte value every lookup produces. It also
//! covers the conversions callers need around it: raw bytes, a 48-bit integer, and the
//! usual colon separated text form.
//!
//! ## How it works
//!
//! The address is stored exactly as the operating system reported it, with no byte
//! order conversion. Parsing is lenient: any character that is not a hex digit acts as
//! a separator, a group may carry one or two digits, and two consecutive digits always
//! close a byte, so separators may be left out completely.
//!
//! ## Main components
//!
//! - `MacAddress`: The address value type.
//! - `BadAddress`: Error returned when bytes or text do not form a 6-byte address.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Number of bytes in an Ethernet hardware address.
pub const MAC_LEN: usize = 6;

/// A 6-byte Ethernet hardware address in OS-native byte order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MacAddress(pub [u8; MAC_LEN]);

/// Returned when a value cannot be turned into a `MacAddress`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BadAddress {
    #[error("ethernet address not {MAC_LEN} bytes long (got {0})")]
    Length(usize),
    #[error("too many bytes in \"{0}\"")]
    TooManyBytes(String),
    #[error("not enough bytes in \"{0}\"")]
    NotEnoughBytes(String),
}

impl MacAddress {
    /// The all-zero address, used where an address is required but none is known.
    pub const NULL: MacAddress = MacAddress([0; MAC_LEN]);

    pub const fn new(octets: [u8; MAC_LEN]) -> Self {
        MacAddress(octets)
    }

    /// Builds an address from a slice that must be exactly 6 bytes long.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, BadAddress> {
        let octets: [u8; MAC_LEN] = bytes
            .try_into()
            .map_err(|_| BadAddress::Length(bytes.len()))?;
        Ok(MacAddress(octets))
    }

    /// Builds an address from the low 48 bits of `value`, most significant byte first.
    pub fn from_u64(value: u64) -> Self {
        let be = value.to_be_bytes();
        let mut octets = [0u8; MAC_LEN];
        octets.copy_from_slice(&be[8 - MAC_LEN..]);
        MacAddress(octets)
    }

    /// Returns the address as a 48-bit integer, most significant byte first.
    pub fn to_u64(&self) -> u64 {
        self.0
            .iter()
            .fold(0u64, |acc, b| (acc << 8) | u64::from(*b))
    }

    pub fn octets(&self) -> [u8; MAC_LEN] {
        self.0
    }

    /// Returns `true` if every byte is zero.
    pub fn is_null(&self) -> bool {
        self.0 == [0; MAC_LEN]
    }
}

impl From<[u8; MAC_LEN]> for MacAddress {
    fn from(octets: [u8; MAC_LEN]) -> Self {
        MacAddress(octets)
    }
}

impl From<MacAddress> for [u8; MAC_LEN] {
    fn from(mac: MacAddress) -> Self {
        mac.0
    }
}

impl AsRef<[u8]> for MacAddress {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(f, "{a:02x}:{b:02x}:{c:02x}:{d:02x}:{e:02x}:{g:02x}")
    }
}

impl FromStr for MacAddress {
    type Err = BadAddress;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut octets = [0u8; MAC_LEN];
        let mut count = 0usize;
        // high nibble of a byte that is still waiting for its second digit
        let mut pending: Option<u8> = None;
        let mut at_start = true;

        let mut push = |value: u8, count: &mut usize| -> Result<(), BadAddress> {
            if *count >= MAC_LEN {
                return Err(BadAddress::TooManyBytes(s.to_string()));
            }
            octets[*count] = value;
            *count += 1;
            Ok(())
        };

        for c in s.chars() {
            match c.to_digit(16) {
                None => {
                    // separators before the first digit are ignored
                    if !at_start {
                        if let Some(hi) = pending.take() {
                            push(hi, &mut count)?;
                        }
                    }
                }
                Some(digit) => {
                    at_start = false;
                    let digit = digit as u8;
                    match pending.take() {
                        None => pending = Some(digit),
                        Some(hi) => push((hi << 4) | digit, &mut count)?,
                    }
                }
            }
        }
        if let Some(hi) = pending {
            push(hi, &mut count)?;
        }

        if count != MAC_LEN {
            return Err(BadAddress::NotEnoughBytes(s.to_string()));
        }
        Ok(MacAddress(octets))
    }
}
