//! Address, mask and network data model.
//!
//! - [`address`] - parsing/rendering of IPv4 and IPv6 addresses
//! - [`mask`] - netmask parsing and validation
//! - [`network`] - network id, broadcast and host range derivation
//! - [`cidr`] - the [`Cidr`] block type

mod address;
mod cidr;
mod mask;
mod network;

// Re-export public types
pub use address::{
    binary_ipv4, binary_ipv6, format_ipv4, format_ipv6, parse_ipv4, parse_ipv6, Address, Family,
    IPV4_BITS, IPV6_BITS,
};
pub use cidr::Cidr;
pub use mask::{
    ipv4_mask, ipv6_mask, is_contiguous, parse_ipv4_mask, parse_ipv6_prefix, parse_mask,
    wildcard_ipv4, Mask,
};
pub use network::{calculate_ipv4, calculate_ipv6, is_private, AddressClass, Ipv4Network, Ipv6Network};
