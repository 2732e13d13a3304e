//! Form Page Rendering

use feature_engine::{FieldKind, FieldSpec, FIELDS};
use std::collections::HashMap;

pub const TITLE: &str = "Heart Attack Prediction";
pub const DESCRIPTION: &str = "Enter your data to calculate risk.";

const STYLE: &str = "body{font-family:sans-serif;max-width:720px;margin:2em auto;padding:0 1em}\
fieldset{border:1px solid #ccc;border-radius:6px;margin:0 0 .8em;padding:.5em 1em}\
legend{font-weight:600}input[type=number]{width:100%;padding:.3em}\
label.choice{margin-right:1.2em}textarea{width:100%;height:3em;font-size:1.1em}\
button{padding:.5em 2em;font-size:1em}";

/// Render the form, keeping `values` and showing `output` in the result box
pub fn render(values: &HashMap<String, String>, output: Option<&str>) -> String {
    let mut html = String::with_capacity(8 * 1024);
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str(&format!("<title>{}</title>\n", TITLE));
    html.push_str(&format!("<style>{}</style>\n</head>\n<body>\n", STYLE));
    html.push_str(&format!("<h1>{}</h1>\n<p>{}</p>\n", TITLE, DESCRIPTION));
    html.push_str("<form method=\"post\" action=\"/predict\">\n");

    for field in FIELDS.iter() {
        render_field(&mut html, field, values.get(field.key).map(String::as_str));
    }

    html.push_str("<button type=\"submit\">Submit</button>\n</form>\n");
    html.push_str(&format!(
        "<h2>Output</h2>\n<textarea name=\"output\" readonly>{}</textarea>\n",
        escape(output.unwrap_or(""))
    ));
    html.push_str("</body>\n</html>\n");
    html
}

fn render_field(html: &mut String, field: &FieldSpec, current: Option<&str>) {
    html.push_str(&format!(
        "<fieldset>\n<legend>{}</legend>\n",
        escape(field.label)
    ));
    match field.kind {
        FieldKind::Number { default } => {
            let value = current.map(str::to_string).unwrap_or_else(|| default.to_string());
            html.push_str(&format!(
                "<input type=\"number\" step=\"any\" name=\"{}\" value=\"{}\" required>\n",
                field.key,
                escape(&value)
            ));
        }
        FieldKind::Choice(options) => {
            for option in options {
                let checked = current
                    .and_then(|v| v.trim().parse::<f64>().ok())
                    .is_some_and(|v| v == *option as f64);
                html.push_str(&format!(
                    "<label class=\"choice\"><input type=\"radio\" name=\"{}\" value=\"{}\"{}> {}</label>\n",
                    field.key,
                    option,
                    if checked { " checked" } else { "" },
                    option
                ));
            }
        }
    }
    html.push_str("</fieldset>\n");
}

/// Minimal HTML escaping for text and attribute values
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
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
