//! Self-contained HTML report

use std::fmt::Write;

use anyhow::{Context, Result};

use crate::analyzer::{ChunkSizeInfo, HierarchyNode, PackageSizeInfo};
use crate::utils::with_unit;

/// WebSocket path the live-reload client connects to
pub const RELOAD_ENDPOINT: &str = "/__depsize_reload";

const STYLE: &str = r#"
body { font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", sans-serif; margin: 2rem; color: #222; }
section { margin-bottom: 2rem; }
h2 { margin-bottom: 0.25rem; }
.meta { color: #666; margin-top: 0; }
details { margin-left: 1.25rem; }
summary { cursor: pointer; }
.size { color: #888; margin-left: 0.5rem; }
.file { margin-left: 2.5rem; color: #555; }
.empty { color: #999; font-style: italic; }
"#;

/// Render the analysis as an HTML page
///
/// The result is embedded as JSON in `#depsize-data` as well. With
/// `live_reload`, a client script reloads the page when the server says so.
pub fn render_html(chunks: &[ChunkSizeInfo], live_reload: bool) -> Result<String> {
    let data = serde_json::to_string(chunks)
        .context("Failed to serialize analysis result")?
        .replace("</", "<\\/");

    let mut body = String::new();
    for chunk in chunks {
        write_chunk(&mut body, chunk);
    }

    let reload = if live_reload { reload_client() } else { String::new() };

    Ok(format!(
        r#"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="UTF-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1.0" />
    <title>Dependency size report</title>
    <style>{style}</style>
  </head>
  <body>
    <h1>Dependency size report</h1>
{body}
    <script id="depsize-data" type="application/json">{data}</script>
{reload}
  </body>
</html>
"#,
        style = STYLE,
        body = body,
        data = data,
        reload = reload,
    ))
}

fn write_chunk(out: &mut String, chunk: &ChunkSizeInfo) {
    let _ = writeln!(out, "    <section>");
    let _ = writeln!(out, "      <h2>{}</h2>", escape(&chunk.name));
    let _ = writeln!(
        out,
        "      <p class=\"meta\">chunk {} &middot; node_modules {}</p>",
        with_unit(chunk.chunk_size),
        with_unit(chunk.node_modules_size)
    );

    if chunk.children.is_empty() {
        let _ = writeln!(out, "      <p class=\"empty\">No packages required</p>");
    }
    for package in &chunk.children {
        write_package(out, package);
    }

    let _ = writeln!(out, "    </section>");
}

fn write_package(out: &mut String, package: &PackageSizeInfo) {
    let _ = write!(
        out,
        "<details><summary>{}<span class=\"size\">{}</span></summary>",
        escape(&package.name),
        with_unit(package.total_size)
    );

    for child in &package.children {
        match child {
            HierarchyNode::Package(nested) => write_package(out, nested),
            HierarchyNode::File(file) => {
                let _ = write!(
                    out,
                    "<div class=\"file\">{}<span class=\"size\">{}</span></div>",
                    escape(&file.name),
                    with_unit(file.size)
                );
            }
        }
    }

    out.push_str("</details>\n");
}

fn reload_client() -> String {
    format!(
        r#"    <script>
    (function() {{
      const ws = new WebSocket(`ws://${{location.host}}{endpoint}`);
      ws.onmessage = function(event) {{
        const message = JSON.parse(event.data);
        if (message.type === 'reload') {{
          location.reload();
        }} else if (message.type === 'error') {{
          console.error('[depsize] analysis failed:', message.message);
        }}
      }};
      ws.onclose = function() {{
        setTimeout(() => location.reload(), 1000);
      }};
    }})();
    </script>"#,
        endpoint = RELOAD_ENDPOINT
    )
}

/// Escape text for HTML element content
fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
