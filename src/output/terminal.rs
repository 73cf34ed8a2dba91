//! Text output for the terminal.
//!
//! Columns are padded on the plain text before any color markup is added so
//! alignment is the same with and without colors.

use super::{paint, OutputFormat, Style};
use crate::models::{
    binary_ipv4, binary_ipv6, format_ipv4, format_ipv6, Cidr, Ipv4Network, Ipv6Network,
};

const LABEL_WIDTH: usize = 11;
const VALUE_WIDTH: usize = 21;
const V6_VALUE_WIDTH: usize = 45;

/// Left-align a value in a field of at least `width` characters.
pub fn format_field<T: ToString>(value: T, width: usize) -> String {
    let value_str = value.to_string();
    format!("{value_str:<width$}")
}

/// One `Label: value   binary` line.
fn row(
    label: &str,
    value: &str,
    style: Style,
    binary: Option<String>,
    value_width: usize,
    format: &OutputFormat,
) -> String {
    let mut line = format_field(format!("{label}:"), LABEL_WIDTH);
    match binary {
        Some(bits) if format.use_binary => {
            line.push_str(&paint(&format_field(value, value_width), style, format));
            line.push_str(&paint(&bits, Style::Binary, format));
        }
        _ => line.push_str(&paint(value, style, format)),
    }
    line.push_str(format.line_break());
    line
}

/// Multi-line summary of an IPv4 network.
pub fn format_ipv4_network(network: &Ipv4Network, format: &OutputFormat) -> String {
    let v4_row = |label: &str, value: String, style: Style, addr: u32| {
        row(label, &value, style, Some(binary_ipv4(addr)), VALUE_WIDTH, format)
    };

    let mut result = String::new();
    result.push_str(&v4_row(
        "Address",
        format_ipv4(network.address),
        Style::Address,
        network.address,
    ));
    result.push_str(&v4_row(
        "Netmask",
        format!("{} = {}", format_ipv4(network.netmask), network.prefix_len),
        Style::Netmask,
        network.netmask,
    ));
    result.push_str(&v4_row(
        "Wildcard",
        format_ipv4(network.wildcard()),
        Style::Wildcard,
        network.wildcard(),
    ));
    result.push_str("=>");
    result.push_str(format.line_break());
    result.push_str(&v4_row(
        "Network",
        format!("{}/{}", format_ipv4(network.network_id), network.prefix_len),
        Style::Subnet,
        network.network_id,
    ));
    result.push_str(&v4_row(
        "HostMin",
        format_ipv4(network.host_min),
        Style::Subnet,
        network.host_min,
    ));
    result.push_str(&v4_row(
        "HostMax",
        format_ipv4(network.host_max),
        Style::Subnet,
        network.host_max,
    ));
    // /31 and /32 have no broadcast address
    if network.prefix_len < 31 {
        result.push_str(&v4_row(
            "Broadcast",
            format_ipv4(network.broadcast),
            Style::Subnet,
            network.broadcast,
        ));
    }

    let mut class_info = format!("Class {}", network.class);
    if network.private {
        class_info.push_str(", Private Internet");
    }
    result.push_str(&format_field("Hosts/Net:", LABEL_WIDTH));
    result.push_str(&paint(
        &format_field(network.host_count, VALUE_WIDTH),
        Style::Subnet,
        format,
    ));
    result.push_str(&paint(&class_info, Style::Class, format));
    result.push_str(format.line_break());
    result
}

/// Multi-line summary of an IPv6 network.
pub fn format_ipv6_network(network: &Ipv6Network, format: &OutputFormat) -> String {
    let mut result = String::new();
    result.push_str(&row(
        "Address",
        &format_ipv6(network.address),
        Style::Address,
        Some(binary_ipv6(network.address)),
        V6_VALUE_WIDTH,
        format,
    ));
    result.push_str(&row(
        "Netmask",
        &network.prefix_len.to_string(),
        Style::Netmask,
        Some(binary_ipv6(network.mask)),
        V6_VALUE_WIDTH,
        format,
    ));
    result.push_str(&row(
        "Prefix",
        &format!("{}/{}", format_ipv6(network.network_id), network.prefix_len),
        Style::Subnet,
        Some(binary_ipv6(network.network_id)),
        V6_VALUE_WIDTH,
        format,
    ));
    result
}

/// One block per line.
pub fn format_deaggregation(blocks: &[Cidr], format: &OutputFormat) -> String {
    blocks
        .iter()
        .map(|block| {
            format!(
                "{}{}",
                paint(&block.to_string(), Style::Subnet, format),
                format.line_break()
            )
        })
        .collect()
}

/// `Subnet N: block` lines, numbered from 1.
pub fn format_split_network(subnets: &[Cidr], format: &OutputFormat) -> String {
    subnets
        .iter()
        .enumerate()
        .map(|(i, subnet)| {
            format!(
                "Subnet {}: {}{}",
                i + 1,
                paint(&subnet.to_string(), Style::Subnet, format),
                format.line_break()
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{calculate_ipv4, calculate_ipv6};
    use crate::processing::{deaggregate, split_network};
    use pretty_assertions::assert_eq;

    fn plain() -> OutputFormat {
        OutputFormat {
            use_binary: false,
            ..Default::default()
        }
    }

    #[test]
    fn test_format_field() {
        assert_eq!(format_field("test", 6), "test  ");
        assert_eq!(format_field("long_value", 5), "long_value");
        assert_eq!(format_field(42, 4), "42  ");
    }

    #[test]
    fn test_format_ipv4_plain() {
        let network = calculate_ipv4("192.168.1.1", "24").unwrap();
        let text = format_ipv4_network(&network, &plain());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "Address:   192.168.1.1",
                "Netmask:   255.255.255.0 = 24",
                "Wildcard:  0.0.0.255",
                "=>",
                "Network:   192.168.1.0/24",
                "HostMin:   192.168.1.1",
                "HostMax:   192.168.1.254",
                "Broadcast: 192.168.1.255",
                "Hosts/Net: 254                  Class C, Private Internet",
            ]
        );
    }

    #[test]
    fn test_format_ipv4_binary() {
        let network = calculate_ipv4("10.0.0.1", "8").unwrap();
        let text = format_ipv4_network(&network, &OutputFormat::default());
        let first = text.lines().next().unwrap();
        assert_eq!(
            first,
            "Address:   10.0.0.1             00001010.00000000.00000000.00000001"
        );
        assert!(text.contains("Class A, Private Internet"));
    }

    #[test]
    fn test_format_ipv4_no_broadcast_for_31() {
        let network = calculate_ipv4("10.0.0.0", "31").unwrap();
        let text = format_ipv4_network(&network, &plain());
        assert!(!text.contains("Broadcast"));
        assert!(text.contains("Hosts/Net: 2 "));
    }

    #[test]
    fn test_format_ipv4_html() {
        let network = calculate_ipv4("8.8.8.8", "24").unwrap();
        let format = OutputFormat {
            use_html: true,
            use_binary: false,
            use_color: false,
        };
        let text = format_ipv4_network(&network, &format);
        assert!(text.contains("<font color=\"#0000ff\">8.8.8.8</font><br>\n"));
        assert!(text.contains("=><br>\n"));
        assert!(text.contains("<font color=\"#009900\">Class A</font>"));
    }

    #[test]
    fn test_format_ipv6() {
        let network = calculate_ipv6("2001:db8::1", "64").unwrap();
        let text = format_ipv6_network(&network, &plain());
        assert_eq!(
            text,
            "Address:   2001:db8::1\nNetmask:   64\nPrefix:    2001:db8::/64\n"
        );
        let text = format_ipv6_network(&network, &OutputFormat::default());
        assert!(text.contains("0010000000000001:0000110110111000"));
    }

    #[test]
    fn test_format_lists() {
        let blocks = deaggregate("10.0.0.1", "10.0.0.3").unwrap();
        assert_eq!(
            format_deaggregation(&blocks, &plain()),
            "10.0.0.1/32\n10.0.0.2/31\n"
        );
        let subnets = split_network("10.0.0.0", "24", &[100, 20]).unwrap();
        assert_eq!(
            format_split_network(&subnets, &plain()),
            "Subnet 1: 10.0.0.0/25\nSubnet 2: 10.0.0.128/27\n"
        );
    }
}
