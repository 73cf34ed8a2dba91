//! HTML output helpers.

use super::Style;

/// `<font>` color for each output style.
fn color_of(style: Style) -> &'static str {
    match style {
        Style::Address => "#0000ff",
        Style::Netmask | Style::Error => "#ff0000",
        Style::Binary => "#909090",
        Style::Class => "#009900",
        Style::Subnet => "#663366",
        Style::Wildcard => "#00cccc",
    }
}

pub(super) fn font(text: &str, style: Style) -> String {
    format!("<font color=\"{}\">{text}</font>", color_of(style))
}

/// Document start, printed once before any result.
pub fn html_header(version: &str) -> String {
    format!(
        r#"<!DOCTYPE HTML PUBLIC "-//W3C//DTD HTML 4.01 Transitional//EN">
<html>
<head>
<meta HTTP-EQUIV="content-type" CONTENT="text/html; charset=UTF-8">
<title>IP Calculator</title>
</head>
<body>
<!-- Version {version} -->
"#
    )
}

/// Document end.
pub fn html_footer() -> String {
    "</body>\n</html>\n".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_font() {
        assert_eq!(
            font("Class C", Style::Class),
            "<font color=\"#009900\">Class C</font>"
        );
    }

    #[test]
    fn test_header_footer() {
        let header = html_header("0.1.0");
        assert!(header.starts_with("<!DOCTYPE HTML"));
        assert!(header.contains("<title>IP Calculator</title>"));
        assert!(header.contains("<!-- Version 0.1.0 -->"));
        assert!(html_footer().ends_with("</html>\n"));
    }
}
