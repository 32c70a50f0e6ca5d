//! Standalone HTML document for a Plotly figure

use super::figure::Figure;
use std::io::{self, Write};

/// How the page gets plotly.js
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlotlyJs<'a> {
    /// `<script src=...>` pointing at a URL or relative path
    Src(&'a str),
    /// The library source itself, embedded in the page (works offline)
    Inline(&'a str),
}

impl PlotlyJs<'_> {
    fn script_tag(&self) -> String {
        match self {
            PlotlyJs::Src(src) => format!("<script src=\"{}\"></script>", escape_html(src)),
            PlotlyJs::Inline(source) => format!("<script>\n{}\n</script>", escape_inline(source)),
        }
    }
}

/// Write an HTML page that renders `figure` with plotly.js
pub fn write<W: Write>(
    writer: &mut W,
    figure: &Figure,
    title: &str,
    plotly_js: PlotlyJs<'_>,
) -> io::Result<()> {
    let json = figure.to_json().map_err(io::Error::from)?;

    write!(
        writer,
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    {plotly}
    <style>
        html, body {{ margin: 0; padding: 0; height: 100%; }}
        #surface-plot {{ width: 100%; height: 100vh; }}
    </style>
</head>
<body>
    <div id="surface-plot"></div>
    <script>
        const figure = {json};
        Plotly.newPlot("surface-plot", figure.data, figure.layout, {{ responsive: true }});
    </script>
</body>
</html>
"#,
        title = escape_html(title),
        plotly = plotly_js.script_tag(),
        json = escape_script(&json),
    )
}

/// Render to an in-memory string
pub fn to_string(figure: &Figure, title: &str, plotly_js: PlotlyJs<'_>) -> io::Result<String> {
    let mut buffer = Vec::new();
    write(&mut buffer, figure, title, plotly_js)?;
    String::from_utf8(buffer).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// JSON inside <script> must not close the element early
fn escape_script(json: &str) -> String {
    json.replace("</", "<\\/")
}

/// Library source may contain `</script` in string literals
fn escape_inline(source: &str) -> String {
    source
        .replace("</script", "<\\/script")
        .replace("</SCRIPT", "<\\/SCRIPT")
}
