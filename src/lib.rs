//! IPv4/IPv6 subnet calculator.
//!
//! The string-in/string-out operations below are the entry points used by the
//! `ipcalc` binary. The typed building blocks live in [`models`] and
//! [`processing`].

pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod output;
pub mod processing;

pub use error::{CalcError, MaskReason, Result};
pub use models::{AddressClass, Cidr, Ipv4Network, Ipv6Network};

/// Network id, broadcast, host range and class of an IPv4 address/mask.
pub fn calculate_ipv4(address: &str, mask: &str) -> Result<Ipv4Network> {
    models::calculate_ipv4(address, mask)
}

/// Network id and mask of an IPv6 address/prefix.
pub fn calculate_ipv6(address: &str, prefix: &str) -> Result<Ipv6Network> {
    models::calculate_ipv6(address, prefix)
}

/// Minimal CIDR cover of `start..=end`, rendered as `address/prefix_len`.
pub fn deaggregate(start: &str, end: &str) -> Result<Vec<String>> {
    let blocks = processing::deaggregate(start, end)?;
    Ok(blocks.iter().map(Cidr::to_string).collect())
}

/// Subnets of `address/mask` sized for each requested host count, in order.
pub fn split_network(address: &str, mask: &str, sizes: &[u32]) -> Result<Vec<String>> {
    let subnets = processing::split_network(address, mask, sizes)?;
    Ok(subnets.iter().map(Cidr::to_string).collect())
}

/// Classful address class of an IPv4 address.
pub fn class_of(address: &str) -> Result<AddressClass> {
    if models::Family::of_text(address) == models::Family::V6 {
        return Err(CalcError::UnsupportedFamily(address.trim().to_string()));
    }
    models::parse_ipv4(address).map(AddressClass::of)
}
