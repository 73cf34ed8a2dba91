//! JSON reports.

use crate::models::{Cidr, Ipv4Network, Ipv6Network};
use serde::Serialize;
use std::net::{Ipv4Addr, Ipv6Addr};

/// IPv4 network with addresses in text form.
#[derive(Serialize, Debug)]
pub struct Ipv4Report {
    pub address: Ipv4Addr,
    pub netmask: Ipv4Addr,
    pub prefix_len: u8,
    pub wildcard: Ipv4Addr,
    pub network: Ipv4Addr,
    pub broadcast: Option<Ipv4Addr>,
    pub host_min: Ipv4Addr,
    pub host_max: Ipv4Addr,
    pub host_count: u32,
    pub class: String,
    pub private: bool,
}

impl From<&Ipv4Network> for Ipv4Report {
    fn from(net: &Ipv4Network) -> Self {
        Ipv4Report {
            address: net.address.into(),
            netmask: net.netmask.into(),
            prefix_len: net.prefix_len,
            wildcard: net.wildcard().into(),
            network: net.network_id.into(),
            broadcast: (net.prefix_len < 31).then(|| net.broadcast.into()),
            host_min: net.host_min.into(),
            host_max: net.host_max.into(),
            host_count: net.host_count,
            class: net.class.to_string(),
            private: net.private,
        }
    }
}

#[derive(Serialize, Debug)]
pub struct Ipv6Report {
    pub address: Ipv6Addr,
    pub prefix_len: u8,
    pub netmask: Ipv6Addr,
    pub network: Ipv6Addr,
}

impl From<&Ipv6Network> for Ipv6Report {
    fn from(net: &Ipv6Network) -> Self {
        Ipv6Report {
            address: net.address.into(),
            prefix_len: net.prefix_len,
            netmask: net.mask.into(),
            network: net.network_id.into(),
        }
    }
}

/// One allocated subnet and the request it answers.
#[derive(Serialize, Debug)]
pub struct SubnetReport {
    pub requested: u32,
    pub subnet: Cidr,
    pub usable_hosts: u64,
}

pub fn ipv4_network_json(net: &Ipv4Network) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&Ipv4Report::from(net))
}

pub fn ipv6_network_json(net: &Ipv6Network) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&Ipv6Report::from(net))
}

pub fn deaggregation_json(blocks: &[Cidr]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(blocks)
}

pub fn split_json(sizes: &[u32], subnets: &[Cidr]) -> serde_json::Result<String> {
    let rows: Vec<SubnetReport> = sizes
        .iter()
        .zip(subnets)
        .map(|(&requested, &subnet)| SubnetReport {
            requested,
            subnet,
            usable_hosts: (subnet.size() - 2) as u64,
        })
        .collect();
    serde_json::to_string_pretty(&rows)
}
