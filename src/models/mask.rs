//! Netmask parsing, validation and wildcard masks.

use super::address::{parse_ipv4, Address, Family, IPV4_BITS, IPV6_BITS};
use crate::error::{CalcError, MaskReason, Result};

/// A parsed netmask together with its prefix length.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Mask {
    /// Mask bits, same width as the address family.
    pub value: Address,
    /// Number of leading 1 bits.
    pub prefix_len: u8,
}

impl Mask {
    /// Cisco-style wildcard: the complement of the mask.
    pub fn wildcard(&self) -> Address {
        match self.value {
            Address::V4(mask) => Address::V4(!mask),
            Address::V6(mask) => Address::V6(!mask),
        }
    }
}

/// Convert a prefix length to an IPv4 mask.
///
/// # Examples
/// ```
/// use ipcalc::models::ipv4_mask;
/// assert_eq!(ipv4_mask(24).unwrap(), 0xFFFFFF00);
/// ```
pub fn ipv4_mask(len: u8) -> Result<u32> {
    if len > IPV4_BITS {
        Err(CalcError::InvalidMask {
            input: len.to_string(),
            reason: MaskReason::OutOfRange,
        })
    } else {
        // checked_shl: a shift by 32 is the all-zero mask
        Ok(u32::MAX.checked_shl((IPV4_BITS - len) as u32).unwrap_or(0))
    }
}

/// Convert a prefix length to an IPv6 mask.
pub fn ipv6_mask(len: u8) -> Result<u128> {
    if len > IPV6_BITS {
        Err(CalcError::InvalidPrefix {
            input: len.to_string(),
            reason: MaskReason::OutOfRange,
        })
    } else {
        Ok(u128::MAX.checked_shl((IPV6_BITS - len) as u32).unwrap_or(0))
    }
}

/// Wildcard of an IPv4 mask.
pub fn wildcard_ipv4(mask: u32) -> u32 {
    !mask
}

/// True when the mask is a run of 1s followed only by 0s.
pub fn is_contiguous(mask: u32) -> bool {
    mask.leading_ones() + mask.trailing_zeros() == IPV4_BITS as u32
}

/// Parse an IPv4 mask given as `24`, `/24` or `255.255.255.0`.
pub fn parse_ipv4_mask(text: &str) -> Result<(u32, u8)> {
    let text = text.trim();
    let bare = text.strip_prefix('/').unwrap_or(text);

    if let Ok(len) = bare.parse::<i64>() {
        return match u8::try_from(len) {
            Ok(len) if len <= IPV4_BITS => Ok((ipv4_mask(len)?, len)),
            _ => {
                log::warn!("rejecting out of range mask length {text}");
                Err(CalcError::InvalidMask {
                    input: bare.to_string(),
                    reason: MaskReason::OutOfRange,
                })
            }
        };
    }

    let mask = parse_ipv4(bare).map_err(|_| CalcError::InvalidMask {
        input: bare.to_string(),
        reason: MaskReason::Unparsable,
    })?;
    if !is_contiguous(mask) {
        log::warn!("rejecting non-contiguous mask {text}");
        return Err(CalcError::InvalidMask {
            input: bare.to_string(),
            reason: MaskReason::NotContiguous,
        });
    }
    Ok((mask, mask.leading_ones() as u8))
}

/// Parse an IPv6 prefix length given as `64` or `/64`.
pub fn parse_ipv6_prefix(text: &str) -> Result<(u128, u8)> {
    let text = text.trim();
    let bare = text.strip_prefix('/').unwrap_or(text);
    let len = match bare.parse::<i64>() {
        Ok(len) => u8::try_from(len).ok().filter(|&len| len <= IPV6_BITS),
        Err(_) => {
            return Err(CalcError::InvalidPrefix {
                input: bare.to_string(),
                reason: MaskReason::Unparsable,
            })
        }
    };
    match len {
        Some(len) => Ok((ipv6_mask(len)?, len)),
        None => Err(CalcError::InvalidPrefix {
            input: bare.to_string(),
            reason: MaskReason::OutOfRange,
        }),
    }
}

/// Parse a mask for the given family.
pub fn parse_mask(text: &str, family: Family) -> Result<Mask> {
    match family {
        Family::V4 => parse_ipv4_mask(text).map(|(mask, prefix_len)| Mask {
            value: Address::V4(mask),
            prefix_len,
        }),
        Family::V6 => parse_ipv6_prefix(text).map(|(mask, prefix_len)| Mask {
            value: Address::V6(mask),
            prefix_len,
        }),
    }
}
