//! Range deaggregation.
//!
//! Covers an inclusive address range with the fewest aligned CIDR blocks.

use crate::error::{CalcError, Result};
use crate::models::{parse_ipv4, parse_ipv6, Cidr, IPV4_BITS};

/// Smallest prefix length an address can be the network id of.
///
/// Governed by the trailing zeros: `10.6.2.80` can head at most a /28.
pub fn lo_mask(addr: u32) -> u8 {
    IPV4_BITS - addr.trailing_zeros() as u8
}

/// Smallest prefix length whose block holds no more than `count` addresses.
fn fit_mask(count: u64) -> u8 {
    assert!(count > 0, "fit_mask on an empty range should never happen.");
    let log2 = 63 - count.leading_zeros() as u8;
    IPV4_BITS - log2.min(IPV4_BITS)
}

/// Cover `start..=end` with the minimal ordered list of aligned blocks.
///
/// At each step the biggest block that both starts at the cursor and stops
/// at or before `end` is taken.
pub fn deaggregate_range(start: u32, end: u32) -> Result<Vec<Cidr>> {
    if start > end {
        return Err(CalcError::InvalidRange {
            start: crate::models::format_ipv4(start),
            end: crate::models::format_ipv4(end),
        });
    }

    let mut blocks = Vec::new();
    // u64 cursor: the last block may end at 255.255.255.255
    let mut next_ip = start as u64;
    let end = end as u64;

    while next_ip <= end {
        let prefix_len = lo_mask(next_ip as u32).max(fit_mask(end - next_ip + 1));
        blocks.push(Cidr::v4(next_ip as u32, prefix_len));
        next_ip += 1u64 << (IPV4_BITS - prefix_len);
    }

    log::debug!(
        "deaggregate_range() {} blocks for {} addresses",
        blocks.len(),
        end - start as u64 + 1
    );
    Ok(blocks)
}

/// Parse an IPv4 endpoint, flagging IPv6 text as unsupported.
fn parse_endpoint(text: &str) -> Result<u32> {
    parse_ipv4(text).map_err(|e| match parse_ipv6(text) {
        Ok(_) => CalcError::UnsupportedFamily(text.trim().to_string()),
        Err(_) => e,
    })
}

/// Deaggregate the range between two textual IPv4 addresses.
pub fn deaggregate(start: &str, end: &str) -> Result<Vec<Cidr>> {
    log::debug!("deaggregate({start}, {end})");
    let lo = parse_endpoint(start)?;
    let hi = parse_endpoint(end)?;
    deaggregate_range(lo, hi).map_err(|e| match e {
        CalcError::InvalidRange { .. } => CalcError::InvalidRange {
            start: start.trim().to_string(),
            end: end.trim().to_string(),
        },
        other => other,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn strings(blocks: &[Cidr]) -> Vec<String> {
        blocks.iter().map(|b| b.to_string()).collect()
    }

    #[test]
    fn test_lo_mask() {
        assert_eq!(lo_mask(parse_ipv4("192.168.1.1").unwrap()), 32);
        assert_eq!(lo_mask(parse_ipv4("10.6.2.80").unwrap()), 28);
        assert_eq!(lo_mask(parse_ipv4("10.11.12.0").unwrap()), 22);
        assert_eq!(lo_mask(0), 0);
    }

    #[test]
    fn test_fit_mask() {
        assert_eq!(fit_mask(1), 32);
        assert_eq!(fit_mask(2), 31);
        assert_eq!(fit_mask(3), 31);
        assert_eq!(fit_mask(256), 24);
        assert_eq!(fit_mask(1u64 << 32), 0);
    }

    #[test]
    fn test_single_address() {
        let blocks = deaggregate("10.1.2.3", "10.1.2.3").unwrap();
        assert_eq!(strings(&blocks), vec!["10.1.2.3/32"]);
    }

    #[test]
    fn test_exact_block() {
        let blocks = deaggregate("192.168.0.0", "192.168.0.255").unwrap();
        assert_eq!(strings(&blocks), vec!["192.168.0.0/24"]);
    }

    #[test]
    fn test_unaligned_range() {
        let blocks = deaggregate("192.168.0.1", "192.168.0.10").unwrap();
        assert_eq!(
            strings(&blocks),
            vec![
                "192.168.0.1/32",
                "192.168.0.2/31",
                "192.168.0.4/30",
                "192.168.0.8/31",
                "192.168.0.10/32",
            ]
        );
    }

    #[test]
    fn test_whole_space() {
        let blocks = deaggregate("0.0.0.0", "255.255.255.255").unwrap();
        assert_eq!(strings(&blocks), vec!["0.0.0.0/0"]);
        let blocks = deaggregate("255.255.255.254", "255.255.255.255").unwrap();
        assert_eq!(strings(&blocks), vec!["255.255.255.254/31"]);
        let blocks = deaggregate("0.0.0.1", "255.255.255.255").unwrap();
        assert_eq!(blocks.len(), 32);
    }

    #[test]
    fn test_errors() {
        assert_eq!(
            deaggregate("10.0.0.10", "10.0.0.1").unwrap_err(),
            CalcError::InvalidRange {
                start: "10.0.0.10".to_string(),
                end: "10.0.0.1".to_string()
            }
        );
        assert_eq!(
            deaggregate("2001:db8::", "2001:db8::ff").unwrap_err(),
            CalcError::UnsupportedFamily("2001:db8::".to_string())
        );
        assert!(matches!(
            deaggregate("10.0.0.1", "bogus"),
            Err(CalcError::InvalidAddress(_))
        ));
    }
}
