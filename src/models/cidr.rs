//! CIDR block value type.
//!
//! Provides [`Cidr`], the `address/prefix_len` pair returned by range
//! deaggregation and network splitting.

use super::address::{Address, Family};
use crate::error::{CalcError, Result};
use serde::de;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// An aligned power-of-two address block.
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Copy, Clone, Hash)]
pub struct Cidr {
    /// First address of the block.
    pub addr: Address,
    /// Prefix length (0-32 for IPv4, 0-128 for IPv6).
    pub prefix_len: u8,
}

impl Cidr {
    pub fn v4(addr: u32, prefix_len: u8) -> Cidr {
        Cidr {
            addr: Address::V4(addr),
            prefix_len,
        }
    }

    /// Number of addresses covered by the block.
    ///
    /// `::/0` holds 2^128 addresses, one more than `u128` can count; its size
    /// saturates to `u128::MAX`. Use [`Cidr::hi`] for exact bounds.
    ///
    /// # Panics
    ///
    /// Panics if `prefix_len` is wider than the address family. Blocks from
    /// [`FromStr`] never are.
    pub fn size(&self) -> u128 {
        let host_bits = (self.addr.family().bits() - self.prefix_len) as u32;
        1u128.checked_shl(host_bits).unwrap_or(u128::MAX)
    }

    /// Lowest address, as a number.
    pub fn lo(&self) -> u128 {
        self.addr.value()
    }

    /// Highest address, as a number.
    ///
    /// # Panics
    ///
    /// Panics if `prefix_len` is wider than the address family.
    pub fn hi(&self) -> u128 {
        let host_bits = (self.addr.family().bits() - self.prefix_len) as u32;
        let host_mask = match host_bits {
            0 => 0,
            n => u128::MAX >> (128 - n),
        };
        self.lo() | host_mask
    }

    /// True when `other` lies completely inside this block.
    pub fn contains(&self, other: &Cidr) -> bool {
        self.addr.family() == other.addr.family()
            && self.lo() <= other.lo()
            && other.hi() <= self.hi()
    }

    /// True when the two blocks share at least one address.
    pub fn overlaps(&self, other: &Cidr) -> bool {
        self.addr.family() == other.addr.family()
            && self.lo() <= other.hi()
            && other.lo() <= self.hi()
    }
}

impl fmt::Display for Cidr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}/{}", self.addr, self.prefix_len)
    }
}

impl FromStr for Cidr {
    type Err = CalcError;

    /// Parse `address/prefix_len`; the address must sit on the block boundary.
    fn from_str(s: &str) -> Result<Cidr> {
        let s = s.trim();
        let (addr_text, len_text) = s
            .split_once('/')
            .ok_or_else(|| CalcError::InvalidAddress(s.to_string()))?;
        let family = Family::of_text(addr_text);
        let addr = Address::parse(addr_text, family)?;
        let mask = super::mask::parse_mask(len_text, family)?;
        if addr.value() & !mask.value.value() != 0 {
            return Err(CalcError::InvalidAddress(s.to_string()));
        }
        Ok(Cidr {
            addr,
            prefix_len: mask.prefix_len,
        })
    }
}

impl Serialize for Cidr {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Cidr {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Cidr, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Cidr::from_str(&s).map_err(|e| de::Error::custom(format!("invalid CIDR {s}: {e}")))
    }
}
