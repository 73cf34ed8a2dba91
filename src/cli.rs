//! Command line parsing and mode dispatch.

use crate::config::Config;
use crate::error::CalcError;
use crate::models::{calculate_ipv4, calculate_ipv6, Family};
use crate::output::{self, OutputFormat};
use crate::processing::{deaggregate, split_network};
use clap::{CommandFactory, Parser};
use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

const EXAMPLES: &str = "Examples:
  ipcalc 192.168.0.1/24
  ipcalc 192.168.0.1/255.255.128.0
  ipcalc 192.168.0.1 255.255.128.0
  ipcalc 2001:db8::1/48
  ipcalc -r 192.168.0.1 192.168.0.10
  ipcalc -s 192.168.0.0/24 10 20 30";

#[derive(Parser, Debug)]
#[command(name = "ipcalc")]
#[command(version, about = "IPv4/IPv6 subnet calculator")]
#[command(disable_version_flag = true)]
#[command(
    long_about = "ipcalc takes an IP address and netmask and calculates the resulting \
broadcast, network, Cisco wildcard mask, and host range. It can also cover an \
address range with CIDR blocks and split a network into subnets of given sizes."
)]
#[command(after_help = EXAMPLES)]
pub struct Cli {
    /// Don't display ANSI color codes
    #[arg(short = 'n', long)]
    pub nocolor: bool,

    /// Suppress the bitwise output
    #[arg(short = 'b', long)]
    pub nobinary: bool,

    /// Just print bit-count-mask of given address
    #[arg(short = 'c', long)]
    pub class: bool,

    /// Display results as HTML
    #[arg(short = 'H', long)]
    pub html: bool,

    /// Display results as JSON
    #[arg(short = 'j', long, conflicts_with = "html")]
    pub json: bool,

    /// Split into networks of specified sizes
    #[arg(short = 's', long, conflicts_with_all = ["range", "class"])]
    pub split: bool,

    /// Deaggregate address range
    #[arg(short = 'r', long, conflicts_with = "class")]
    pub range: bool,

    /// Debug logging on stderr
    #[arg(long)]
    pub verbose: bool,

    /// Print version
    #[arg(short = 'v', long = "version", action = clap::ArgAction::Version)]
    pub version: Option<bool>,

    /// <ADDRESS>[[/]<NETMASK>] [NETMASK], or START END with --range,
    /// or <NETWORK>[/<NETMASK>] [NETMASK] SIZE... with --split
    #[arg(value_name = "ARGS")]
    pub args: Vec<String>,
}

#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Usage(&'static str),

    #[error("Invalid size: {0}")]
    InvalidSize(String),

    #[error(transparent)]
    Calc(#[from] CalcError),

    #[error("JSON output failed: {0}")]
    Json(#[from] serde_json::Error),
}

lazy_static! {
    static ref ADDR_MASK_RE: Regex =
        Regex::new(r"^\s*([^/\s]+)(?:/([^/\s]*))?\s*$").expect("Invalid Regex?");
}

/// Split `addr/mask` into its parts; the mask is `None` without a slash.
pub fn split_address_token(token: &str) -> Option<(&str, Option<&str>)> {
    let caps = ADDR_MASK_RE.captures(token)?;
    let addr = caps.get(1)?.as_str();
    let mask = caps.get(2).map(|m| m.as_str());
    Some((addr, mask))
}

/// Exit code for a failed parse: 0 for help and version, 1 for usage errors.
pub fn parse_error_code(err: &clap::Error) -> u8 {
    if err.use_stderr() {
        1
    } else {
        0
    }
}

/// Pick the output format from flags, config and whether stdout is a tty.
pub fn output_format(cli: &Cli, config: &Config, stdout_is_tty: bool) -> OutputFormat {
    OutputFormat {
        use_color: !cli.nocolor && !cli.html && !cli.json && !config.no_color && stdout_is_tty,
        use_html: cli.html && !cli.json,
        use_binary: !cli.nobinary,
    }
}

/// Run the selected mode and return everything destined for stdout.
pub fn run(cli: &Cli, config: &Config, format: &OutputFormat) -> Result<String, CliError> {
    if cli.args.is_empty() {
        return Ok(Cli::command().render_long_help().to_string());
    }

    let body = if cli.class {
        log::info!("class mode for {}", cli.args[0]);
        run_class(&cli.args[0])?
    } else if cli.range {
        log::info!("range mode for {:?}", cli.args);
        run_range(&cli.args, cli.json, format)?
    } else if cli.split {
        log::info!("split mode for {:?}", cli.args);
        run_split(&cli.args, cli.json, format)?
    } else {
        log::info!("network mode for {:?}", cli.args);
        run_network(&cli.args, config, cli.json, format)?
    };

    if format.use_html {
        Ok(format!(
            "{}{}{}",
            output::html_header(VERSION),
            body,
            output::html_footer()
        ))
    } else {
        Ok(body)
    }
}

fn run_class(address: &str) -> Result<String, CliError> {
    if Family::of_text(address) == Family::V6 {
        return Ok("IPv6 addresses don't have classes\n".to_string());
    }
    let class = crate::class_of(address)?;
    Ok(format!("{}\n", class.natural_prefix_len()))
}

fn run_range(args: &[String], json: bool, format: &OutputFormat) -> Result<String, CliError> {
    let [start, end, ..] = args else {
        return Err(CliError::Usage(
            "Deaggregate mode requires two IP addresses",
        ));
    };
    let blocks = deaggregate(start, end)?;
    if json {
        return Ok(output::deaggregation_json(&blocks)? + "\n");
    }
    Ok(format!(
        "Deaggregating {start} - {end}{}{}",
        format.line_break(),
        output::format_deaggregation(&blocks, format)
    ))
}

fn run_split(args: &[String], json: bool, format: &OutputFormat) -> Result<String, CliError> {
    if args.len() < 2 {
        return Err(CliError::Usage(
            "Split mode requires an IP/netmask and at least one size",
        ));
    }
    let (address, mask, size_args) = match split_address_token(&args[0]) {
        Some((address, Some(mask))) => (address, mask, &args[1..]),
        Some((address, None)) => (address, args[1].as_str(), &args[2..]),
        None => return Err(CalcError::InvalidAddress(args[0].clone()).into()),
    };
    if size_args.is_empty() {
        return Err(CliError::Usage(
            "Split mode requires an IP/netmask and at least one size",
        ));
    }

    let sizes = size_args
        .iter()
        .map(|s| s.parse::<u32>().map_err(|_| CliError::InvalidSize(s.clone())))
        .collect::<Result<Vec<u32>, CliError>>()?;

    let subnets = split_network(address, mask, &sizes)?;
    if json {
        return Ok(output::split_json(&sizes, &subnets)? + "\n");
    }
    Ok(format!(
        "Splitting {address}/{mask} into subnets{}{}",
        format.line_break(),
        output::format_split_network(&subnets, format)
    ))
}

fn run_network(
    args: &[String],
    config: &Config,
    json: bool,
    format: &OutputFormat,
) -> Result<String, CliError> {
    let (address, mask) = match split_address_token(&args[0]) {
        Some((address, Some(mask))) => (address, mask),
        Some((address, None)) => match args.get(1) {
            Some(mask) => (address, mask.as_str()),
            None => match Family::of_text(address) {
                Family::V4 => (address, config.default_v4_mask.as_str()),
                Family::V6 => (address, config.default_v6_prefix.as_str()),
            },
        },
        None => return Err(CalcError::InvalidAddress(args[0].clone()).into()),
    };

    match Family::of_text(address) {
        Family::V4 => {
            let network = calculate_ipv4(address, mask)?;
            if json {
                return Ok(output::ipv4_network_json(&network)? + "\n");
            }
            Ok(output::format_ipv4_network(&network, format))
        }
        Family::V6 => {
            let network = calculate_ipv6(address, mask)?;
            if json {
                return Ok(output::ipv6_network_json(&network)? + "\n");
            }
            Ok(output::format_ipv6_network(&network, format))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(args: &[&str]) -> Cli {
        let mut argv = vec!["ipcalc"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).expect("valid command line")
    }

    fn run_plain(args: &[&str]) -> Result<String, CliError> {
        let cli = parse(args);
        let config = Config::default();
        let format = output_format(&cli, &config, false);
        run(&cli, &config, &format)
    }

    #[test]
    fn test_split_address_token() {
        assert_eq!(
            split_address_token("10.0.0.1/24"),
            Some(("10.0.0.1", Some("24")))
        );
        assert_eq!(
            split_address_token("10.0.0.1/255.255.0.0"),
            Some(("10.0.0.1", Some("255.255.0.0")))
        );
        assert_eq!(split_address_token("fe80::1"), Some(("fe80::1", None)));
        assert_eq!(split_address_token("a/b/c"), None);
        assert_eq!(split_address_token(""), None);
    }

    #[test]
    fn test_output_format() {
        let config = Config::default();
        let cli = parse(&["-b", "10.0.0.1"]);
        let format = output_format(&cli, &config, true);
        assert!(format.use_color);
        assert!(!format.use_binary);
        assert!(!output_format(&cli, &config, false).use_color);

        let cli = parse(&["-H", "10.0.0.1"]);
        let format = output_format(&cli, &config, true);
        assert!(format.use_html);
        assert!(!format.use_color);

        let no_color = Config {
            no_color: true,
            ..Config::default()
        };
        let cli = parse(&["10.0.0.1"]);
        assert!(!output_format(&cli, &no_color, true).use_color);
    }

    #[test]
    fn test_conflicting_modes() {
        assert!(Cli::try_parse_from(["ipcalc", "-s", "-r", "10.0.0.0"]).is_err());
        assert!(Cli::try_parse_from(["ipcalc", "-j", "-H", "10.0.0.0"]).is_err());
    }

    #[test]
    fn test_version_flag() {
        use clap::error::ErrorKind;
        for flag in ["-v", "--version"] {
            let err = Cli::try_parse_from(["ipcalc", flag]).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::DisplayVersion);
            assert_eq!(parse_error_code(&err), 0);
        }
    }

    #[test]
    fn test_parse_error_codes() {
        let help = Cli::try_parse_from(["ipcalc", "--help"]).unwrap_err();
        assert_eq!(parse_error_code(&help), 0);
        for argv in [
            vec!["ipcalc", "-s", "-r", "10.0.0.0"],
            vec!["ipcalc", "--bogus", "10.0.0.0"],
            vec!["ipcalc", "-s", "10.0.0.0/24", "-5"],
        ] {
            let err = Cli::try_parse_from(argv).unwrap_err();
            assert_eq!(parse_error_code(&err), 1);
        }
    }

    #[test]
    fn test_run_network_forms() {
        let slash = run_plain(&["-b", "192.168.1.1/24"]).unwrap();
        let spaced = run_plain(&["-b", "192.168.1.1", "255.255.255.0"]).unwrap();
        let default = run_plain(&["-b", "192.168.1.1"]).unwrap();
        assert_eq!(slash, spaced);
        assert_eq!(slash, default);
        assert!(slash.contains("Network:   192.168.1.0/24"));
    }

    #[test]
    fn test_run_ipv6_default_prefix() {
        let text = run_plain(&["-b", "2001:db8::1"]).unwrap();
        assert!(text.contains("Prefix:    2001:db8::/64"));
    }

    #[test]
    fn test_run_class() {
        assert_eq!(run_plain(&["-c", "172.16.0.1"]).unwrap(), "16\n");
        assert_eq!(run_plain(&["-c", "230.0.0.1"]).unwrap(), "4\n");
        assert_eq!(
            run_plain(&["-c", "::1"]).unwrap(),
            "IPv6 addresses don't have classes\n"
        );
    }

    #[test]
    fn test_run_range() {
        assert_eq!(
            run_plain(&["-r", "192.168.0.0", "192.168.1.255"]).unwrap(),
            "Deaggregating 192.168.0.0 - 192.168.1.255\n192.168.0.0/23\n"
        );
        assert!(matches!(
            run_plain(&["-r", "192.168.0.0"]),
            Err(CliError::Usage(_))
        ));
        assert!(matches!(
            run_plain(&["-r", "::1", "::2"]),
            Err(CliError::Calc(CalcError::UnsupportedFamily(_)))
        ));
    }

    #[test]
    fn test_run_split() {
        let expected = "Splitting 192.168.0.0/24 into subnets\n\
                        Subnet 1: 192.168.0.0/28\n\
                        Subnet 2: 192.168.0.32/27\n\
                        Subnet 3: 192.168.0.64/27\n";
        assert_eq!(
            run_plain(&["-s", "192.168.0.0/24", "10", "20", "30"]).unwrap(),
            expected
        );
        assert_eq!(
            run_plain(&["-s", "192.168.0.0", "24", "10", "20", "30"]).unwrap(),
            expected
        );
        assert!(matches!(
            run_plain(&["-s", "192.168.0.0/24", "ten"]),
            Err(CliError::InvalidSize(_))
        ));
        assert!(matches!(
            run_plain(&["-s", "192.168.0.0", "24"]),
            Err(CliError::Usage(_))
        ));
        assert!(matches!(
            run_plain(&["-s", "192.168.0.0/24", "200", "200"]),
            Err(CliError::Calc(CalcError::CapacityExceeded { .. }))
        ));
    }

    #[test]
    fn test_run_html_wraps_body() {
        let text = run_plain(&["-H", "-b", "10.0.0.1/8"]).unwrap();
        assert!(text.starts_with("<!DOCTYPE HTML"));
        assert!(text.ends_with("</html>\n"));
        assert!(text.contains("<br>\n"));
    }

    #[test]
    fn test_run_json() {
        let text = run_plain(&["-j", "10.1.2.3/16"]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["network"], "10.1.0.0");
        assert_eq!(value["host_count"], 65534);
    }

    #[test]
    fn test_run_errors() {
        assert!(matches!(
            run_plain(&["999.1.1.1/24"]),
            Err(CliError::Calc(CalcError::InvalidAddress(_)))
        ));
        assert_eq!(
            run_plain(&["10.0.0.1/255.0.255.0"]).unwrap_err().to_string(),
            "invalid netmask: 255.0.255.0 (not contiguous)"
        );
    }

    #[test]
    fn test_run_without_args_prints_help() {
        let text = run_plain(&[]).unwrap();
        assert!(text.contains("Usage:"));
        assert!(text.contains("Examples:"));
    }
}
