//! HTML pages for the risk form
//!
//! Both pages are rendered from Rust so the form always matches
//! `FEATURE_SPEC`, field for field and in the same order.

use cardiorisk_common::{FeatureInfo, FEATURE_SPEC};

const PAGE_STYLE: &str = r#"
        body {
            font-family: system-ui, -apple-system, sans-serif;
            max-width: 800px;
            margin: 40px auto;
            padding: 20px;
            line-height: 1.6;
        }
        h1 {
            color: #333;
            border-bottom: 2px solid #b22222;
            padding-bottom: 10px;
        }
        table {
            width: 100%;
            border-collapse: collapse;
        }
        td, th {
            padding: 6px 8px;
            border-bottom: 1px solid #e0e0e0;
            text-align: left;
        }
        .range {
            color: #666;
            font-size: 0.9em;
        }
        .result {
            background: #f5f5f5;
            padding: 20px;
            border-radius: 4px;
            font-size: 1.3em;
        }
        .button {
            display: inline-block;
            padding: 10px 20px;
            background: #b22222;
            color: white;
            text-decoration: none;
            border: none;
            border-radius: 4px;
            margin: 10px 5px;
            cursor: pointer;
        }
"#;

/// Escape text for HTML element content and attribute values
pub fn escape_html(text: &str) -> String {
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

fn page(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>{style}</style>
</head>
<body>
{body}
</body>
</html>
"#,
        title = escape_html(title),
        style = PAGE_STYLE,
        body = body,
    )
}

fn feature_row(feature: &FeatureInfo) -> String {
    let name = escape_html(feature.name);
    format!(
        r#"        <tr>
            <td><label for="{name}">{name}</label></td>
            <td>{description}<br><span class="range">{range}</span></td>
            <td><input type="text" id="{name}" name="{name}" inputmode="decimal"></td>
        </tr>
"#,
        name = name,
        description = escape_html(feature.description),
        range = escape_html(feature.valid_range),
    )
}

/// Input form with one labeled field per feature
pub fn render_form() -> String {
    let rows: String = FEATURE_SPEC.iter().map(feature_row).collect();

    let body = format!(
        r#"    <h1>Myocardial Infarction Risk Prediction</h1>
    <p>Enter the patient's clinical measurements. Leave a field empty to submit 0.</p>
    <form action="/predict" method="post">
    <table>
        <tr><th>Field</th><th>Description / valid range</th><th>Value</th></tr>
{rows}    </table>
    <button type="submit" class="button">Predict</button>
    </form>"#,
        rows = rows,
    );

    page("Myocardial Infarction Risk Prediction", &body)
}

/// Result page showing the prediction text
pub fn render_result(prediction_text: &str) -> String {
    let body = format!(
        r#"    <h1>Prediction Result</h1>
    <p class="result">{prediction}</p>
    <p><a href="/" class="button">Back to form</a></p>"#,
        prediction = escape_html(prediction_text),
    );

    page("Prediction Result", &body)
}
