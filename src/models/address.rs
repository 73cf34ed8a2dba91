//! IPv4/IPv6 address parsing and rendering.
//!
//! Addresses are carried as plain unsigned integers (`u32` for IPv4, `u128`
//! for IPv6) so all subnet arithmetic is done with fixed-width bit operations.
//! [`Address`] tags a value with its family for display.

use crate::error::{CalcError, Result};
use itertools::Itertools;
use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};

/// Address width for IPv4.
pub const IPV4_BITS: u8 = 32;
/// Address width for IPv6.
pub const IPV6_BITS: u8 = 128;

/// Address family.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Family {
    V4,
    V6,
}

impl Family {
    /// Number of bits in an address of this family.
    pub fn bits(self) -> u8 {
        match self {
            Family::V4 => IPV4_BITS,
            Family::V6 => IPV6_BITS,
        }
    }

    /// Guess the family from raw text: anything with a `:` is IPv6.
    pub fn of_text(text: &str) -> Family {
        if text.contains(':') {
            Family::V6
        } else {
            Family::V4
        }
    }
}

/// Parse a dotted-quad into a `u32`.
///
/// # Examples
/// ```
/// use ipcalc::models::parse_ipv4;
/// assert_eq!(parse_ipv4("192.168.0.1").unwrap(), 0xC0A80001);
/// ```
pub fn parse_ipv4(text: &str) -> Result<u32> {
    let text = text.trim();
    text.parse::<Ipv4Addr>()
        .map(u32::from)
        .map_err(|_| CalcError::InvalidAddress(text.to_string()))
}

/// Parse any textual IPv6 form into a `u128`. IPv4 text is rejected.
pub fn parse_ipv6(text: &str) -> Result<u128> {
    let text = text.trim();
    text.parse::<Ipv6Addr>()
        .map(u128::from)
        .map_err(|_| CalcError::InvalidAddress(text.to_string()))
}

/// Dotted-quad rendering of a `u32`.
pub fn format_ipv4(addr: u32) -> String {
    Ipv4Addr::from(addr).to_string()
}

/// Compressed rendering of a `u128`.
pub fn format_ipv6(addr: u128) -> String {
    Ipv6Addr::from(addr).to_string()
}

/// Binary octets joined by `.`, e.g. `11000000.10101000.00000000.00000001`.
pub fn binary_ipv4(addr: u32) -> String {
    addr.to_be_bytes()
        .iter()
        .map(|octet| format!("{octet:08b}"))
        .join(".")
}

/// Binary 16-bit groups joined by `:`.
pub fn binary_ipv6(addr: u128) -> String {
    (0..8)
        .rev()
        .map(|i| format!("{:016b}", (addr >> (i * 16)) as u16))
        .join(":")
}

/// An address value tagged with its family.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Address {
    V4(u32),
    V6(u128),
}

impl Address {
    /// Parse text of the given family.
    pub fn parse(text: &str, family: Family) -> Result<Address> {
        match family {
            Family::V4 => parse_ipv4(text).map(Address::V4),
            Family::V6 => parse_ipv6(text).map(Address::V6),
        }
    }

    pub fn family(&self) -> Family {
        match self {
            Address::V4(_) => Family::V4,
            Address::V6(_) => Family::V6,
        }
    }

    /// Binary digit groups for display.
    pub fn to_binary_groups(&self) -> String {
        match *self {
            Address::V4(addr) => binary_ipv4(addr),
            Address::V6(addr) => binary_ipv6(addr),
        }
    }

    /// Numeric value widened to `u128`.
    pub fn value(&self) -> u128 {
        match *self {
            Address::V4(addr) => addr as u128,
            Address::V6(addr) => addr,
        }
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Address::V4(addr) => write!(f, "{}", Ipv4Addr::from(addr)),
            Address::V6(addr) => write!(f, "{}", Ipv6Addr::from(addr)),
        }
    }
}
