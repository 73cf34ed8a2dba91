//! Network calculations for a single address/mask pair.

use super::address::{parse_ipv4, parse_ipv6, IPV4_BITS};
use super::mask::{parse_ipv4_mask, parse_ipv6_prefix, wildcard_ipv4};
use crate::error::{CalcError, MaskReason, Result};
use std::fmt;

/// Classful address class, taken from the leading bits.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum AddressClass {
    A,
    B,
    C,
    D,
    E,
}

impl AddressClass {
    pub fn of(addr: u32) -> AddressClass {
        match addr.leading_ones() {
            0 => AddressClass::A,
            1 => AddressClass::B,
            2 => AddressClass::C,
            3 => AddressClass::D,
            _ => AddressClass::E,
        }
    }

    /// The historic default prefix length of the class.
    pub fn natural_prefix_len(self) -> u8 {
        match self {
            AddressClass::A => 8,
            AddressClass::B => 16,
            AddressClass::C => 24,
            AddressClass::D | AddressClass::E => 4,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            AddressClass::A => 'A',
            AddressClass::B => 'B',
            AddressClass::C => 'C',
            AddressClass::D => 'D',
            AddressClass::E => 'E',
        }
    }
}

impl fmt::Display for AddressClass {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// RFC 1918 ranges as (network, mask).
const PRIVATE_RANGES: [(u32, u32); 3] = [
    (0x0A00_0000, 0xFF00_0000), // 10.0.0.0/8
    (0xAC10_0000, 0xFFF0_0000), // 172.16.0.0/12
    (0xC0A8_0000, 0xFFFF_0000), // 192.168.0.0/16
];

/// True for addresses in 10/8, 172.16/12 or 192.168/16.
pub fn is_private(addr: u32) -> bool {
    PRIVATE_RANGES
        .iter()
        .any(|&(network, mask)| addr & mask == network)
}

/// Everything derived from an IPv4 address and mask.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Ipv4Network {
    pub address: u32,
    pub netmask: u32,
    pub prefix_len: u8,
    pub network_id: u32,
    pub broadcast: u32,
    pub host_min: u32,
    pub host_max: u32,
    pub host_count: u32,
    pub class: AddressClass,
    pub private: bool,
}

impl Ipv4Network {
    /// Derive the network from already parsed parts.
    ///
    /// `netmask` must be contiguous with `prefix_len` leading ones; a
    /// `prefix_len` over 32 is rejected as `InvalidMask`.
    pub fn from_parts(address: u32, netmask: u32, prefix_len: u8) -> Result<Ipv4Network> {
        if prefix_len > IPV4_BITS {
            return Err(CalcError::InvalidMask {
                input: prefix_len.to_string(),
                reason: MaskReason::OutOfRange,
            });
        }
        let network_id = address & netmask;
        let broadcast = network_id | wildcard_ipv4(netmask);

        // /31 is point-to-point and /32 a host route: no reserved addresses
        let (host_min, host_max, host_count) = match prefix_len {
            31 => (network_id, broadcast, 2),
            32 => (network_id, network_id, 1),
            _ => (
                network_id + 1,
                broadcast - 1,
                ((1u64 << (IPV4_BITS - prefix_len)) - 2) as u32,
            ),
        };

        Ok(Ipv4Network {
            address,
            netmask,
            prefix_len,
            network_id,
            broadcast,
            host_min,
            host_max,
            host_count,
            class: AddressClass::of(address),
            private: is_private(address),
        })
    }

    pub fn wildcard(&self) -> u32 {
        wildcard_ipv4(self.netmask)
    }

    /// Number of addresses in the network, reserved ones included.
    pub fn size(&self) -> u64 {
        1u64 << (IPV4_BITS - self.prefix_len)
    }
}

/// Calculate an IPv4 network from address and mask text.
///
/// # Examples
/// ```
/// use ipcalc::models::calculate_ipv4;
/// let net = calculate_ipv4("192.168.1.1", "24").unwrap();
/// assert_eq!(net.host_count, 254);
/// ```
pub fn calculate_ipv4(ip_text: &str, mask_text: &str) -> Result<Ipv4Network> {
    log::debug!("calculate_ipv4({ip_text}, {mask_text})");
    let address = parse_ipv4(ip_text)?;
    let (netmask, prefix_len) = parse_ipv4_mask(mask_text)?;
    Ipv4Network::from_parts(address, netmask, prefix_len)
}

/// Everything derived from an IPv6 address and prefix.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Ipv6Network {
    pub address: u128,
    pub prefix_len: u8,
    pub network_id: u128,
    pub mask: u128,
}

/// Calculate an IPv6 network from address and prefix text.
pub fn calculate_ipv6(ip_text: &str, prefix_text: &str) -> Result<Ipv6Network> {
    log::debug!("calculate_ipv6({ip_text}, {prefix_text})");
    let address = parse_ipv6(ip_text)?;
    let (mask, prefix_len) = parse_ipv6_prefix(prefix_text)?;
    Ok(Ipv6Network {
        address,
        prefix_len,
        network_id: address & mask,
        mask,
    })
}
