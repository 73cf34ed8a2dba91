//! Network splitting (VLSM allocation).
//!
//! Carves a base network into one subnet per requested host count, in the
//! order requested.

use crate::error::{CalcError, MaskReason, Result};
use crate::models::{calculate_ipv4, Cidr, Family, IPV4_BITS};

/// Smallest block size (a power of two, at least 4) with `size - 2 >= hosts`.
pub fn block_size_for(hosts: u32) -> u64 {
    let mut hosts_needed: u64 = 4;
    while hosts_needed - 2 < hosts as u64 {
        hosts_needed *= 2;
    }
    hosts_needed
}

/// Round `addr` up to the next multiple of `size` (a power of two).
fn align_up(addr: u64, size: u64) -> u64 {
    (addr + size - 1) & !(size - 1)
}

/// Split `network_id/prefix_len` into subnets sized for `sizes`.
///
/// Each subnet starts on a boundary of its own size; the cursor is moved up
/// past any padding this needs. Fails with `CapacityExceeded` when the sum of
/// block sizes, or the padded layout, does not fit the base network, and with
/// `InvalidMask` when `prefix_len` is over 32.
pub fn split_range(network_id: u32, prefix_len: u8, sizes: &[u32]) -> Result<Vec<Cidr>> {
    if prefix_len > IPV4_BITS {
        return Err(CalcError::InvalidMask {
            input: prefix_len.to_string(),
            reason: MaskReason::OutOfRange,
        });
    }
    let total_hosts = 1u64 << (IPV4_BITS - prefix_len);
    let host_counts: Vec<u64> = sizes.iter().map(|&s| block_size_for(s)).collect();

    let total_required: u64 = host_counts.iter().sum();
    if total_required > total_hosts {
        log::warn!("split needs {total_required} addresses, network has {total_hosts}");
        return Err(CalcError::CapacityExceeded {
            required: total_required,
            available: total_hosts,
        });
    }

    let base = network_id as u64;
    let mut current_ip = base;
    let mut subnets = Vec::with_capacity(host_counts.len());

    for hosts_needed in host_counts {
        let subnet_ip = align_up(current_ip, hosts_needed);
        if subnet_ip != current_ip {
            log::debug!(
                "realigned /{} subnet from offset {} to {}",
                IPV4_BITS - hosts_needed.trailing_zeros() as u8,
                current_ip - base,
                subnet_ip - base
            );
        }
        current_ip = subnet_ip + hosts_needed;
        let prefix = IPV4_BITS - hosts_needed.trailing_zeros() as u8;
        subnets.push(Cidr::v4(subnet_ip as u32, prefix));
    }

    let span = current_ip - base;
    if span > total_hosts {
        log::warn!("split layout spans {span} addresses after alignment, network has {total_hosts}");
        return Err(CalcError::CapacityExceeded {
            required: span,
            available: total_hosts,
        });
    }

    Ok(subnets)
}

/// Split the network given as address and mask text.
pub fn split_network(address: &str, mask: &str, sizes: &[u32]) -> Result<Vec<Cidr>> {
    log::debug!("split_network({address}, {mask}, {sizes:?})");
    if Family::of_text(address) == Family::V6 {
        return Err(CalcError::UnsupportedFamily(address.trim().to_string()));
    }
    let network = calculate_ipv4(address, mask)?;
    split_range(network.network_id, network.prefix_len, sizes)
}
