//! Rendering of calculation results.
//!
//! - [`terminal`] - plain and ANSI colored text
//! - [`html`] - HTML page fragments
//! - [`json`] - machine readable reports

mod html;
mod json;
mod terminal;

use colored::Colorize;

pub use html::{html_footer, html_header};
pub use json::{
    deaggregation_json, ipv4_network_json, ipv6_network_json, split_json, Ipv4Report, Ipv6Report,
    SubnetReport,
};
pub use terminal::{
    format_deaggregation, format_field, format_ipv4_network, format_ipv6_network,
    format_split_network,
};

/// How results are rendered.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct OutputFormat {
    pub use_color: bool,
    pub use_html: bool,
    pub use_binary: bool,
}

impl Default for OutputFormat {
    fn default() -> Self {
        OutputFormat {
            use_color: false,
            use_html: false,
            use_binary: true,
        }
    }
}

impl OutputFormat {
    pub fn line_break(&self) -> &'static str {
        if self.use_html {
            "<br>\n"
        } else {
            "\n"
        }
    }
}

/// What a piece of output shows; decides its color.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Style {
    Address,
    Netmask,
    Binary,
    Class,
    Subnet,
    Error,
    Wildcard,
}

/// Wrap `text` in the color markup for `style`. HTML wins over ANSI.
pub fn paint(text: &str, style: Style, format: &OutputFormat) -> String {
    if format.use_html {
        html::font(text, style)
    } else if format.use_color {
        match style {
            Style::Address => text.blue(),
            Style::Netmask | Style::Error => text.red(),
            Style::Binary => text.yellow(),
            Style::Class => text.magenta(),
            Style::Subnet => text.green(),
            Style::Wildcard => text.cyan(),
        }
        .to_string()
    } else {
        text.to_string()
    }
}
