// src/present/html.rs

use std::fmt::Write;
use url::form_urlencoded;

use super::{BarChart, Dashboard, FilteredView, PAGE_TITLE, SELECT_LABEL};

const CHART_WIDTH: f64 = 720.0;
const CHART_HEIGHT: f64 = 360.0;
const MARGIN_LEFT: f64 = 64.0;
const MARGIN_RIGHT: f64 = 16.0;
const MARGIN_TOP: f64 = 48.0;
const MARGIN_BOTTOM: f64 = 56.0;
const Y_TICKS: usize = 5;

const STYLE: &str = "body{margin:0;font-family:sans-serif;display:flex;color:#262730}\
aside{width:260px;min-height:100vh;padding:24px;background:#f0f2f6}\
main{flex:1;padding:24px 48px}\
table{border-collapse:collapse}td,th{border:1px solid #ddd;padding:4px 10px;text-align:right}\
td:first-child,th:first-child{text-align:left}\
.warning{background:#fffae6;border-left:4px solid #f0b400;padding:8px 12px;margin:8px 0}\
.caption{color:#808495;font-size:0.85em}\
.bar{fill:#636efa}.axis{stroke:#444}.grid{stroke:#e5e5e5}";

/// Minimal HTML text/attribute escaping.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
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

fn query_value(s: &str) -> String {
    form_urlencoded::byte_serialize(s.as_bytes()).collect()
}

/// Whole dashboard page for the current selection.
pub fn render_page(dash: &Dashboard<'_>) -> String {
    let view = dash.view();
    let mut out = String::new();
    let _ = write!(
        out,
        "<!DOCTYPE html><html lang=\"sv\"><head><meta charset=\"utf-8\">\
         <title>{title}</title><style>{STYLE}</style></head><body>",
        title = escape(PAGE_TITLE)
    );

    render_sidebar(&mut out, dash);

    let _ = write!(out, "<main><h1>{}</h1>", escape(PAGE_TITLE));
    for issue in dash.issues() {
        let _ = write!(
            out,
            "<div class=\"warning\">{}</div>",
            escape(&issue.message())
        );
    }
    if dash.selected_region().is_some() {
        out.push_str(&render_chart(&view.chart()));
        render_table(&mut out, &view);
    } else {
        out.push_str("<p>Ingen data.</p>");
    }
    let _ = write!(
        out,
        "<p class=\"caption\">Källa: SCB. Hämtad {} UTC.</p></main></body></html>",
        dash.table().fetched_at().format("%Y-%m-%d %H:%M")
    );
    out
}

fn render_sidebar(out: &mut String, dash: &Dashboard<'_>) {
    let selected = dash.selected_region();
    let _ = write!(
        out,
        "<aside><form method=\"get\" action=\"/\">\
         <label for=\"region\">{}</label><br>\
         <select id=\"region\" name=\"region\" onchange=\"this.form.submit()\">",
        escape(SELECT_LABEL)
    );
    for region in dash.options() {
        let marker = if Some(region) == selected {
            " selected"
        } else {
            ""
        };
        let _ = write!(
            out,
            "<option value=\"{v}\"{marker}>{v}</option>",
            v = escape(region)
        );
    }
    out.push_str("</select><noscript><button type=\"submit\">Visa</button></noscript></form>");
    if let Some(region) = selected {
        let q = query_value(region);
        let _ = write!(
            out,
            "<p><a href=\"/export.csv?region={q}\">Ladda ner CSV</a><br>\
             <a href=\"/export.parquet?region={q}\">Ladda ner Parquet</a></p>"
        );
    }
    out.push_str("</aside>");
}

fn render_table(out: &mut String, view: &FilteredView<'_>) {
    let _ = write!(
        out,
        "<h2>{}</h2><table><thead><tr><th>region</th><th>år</th><th>Födda</th>\
         <th>Förändring i förhållande till basår</th></tr></thead><tbody>",
        escape(&view.heading())
    );
    for row in &view.rows {
        let change = row
            .change_pct
            .map(|v| format!("{:.1}", v))
            .unwrap_or_else(|| "–".to_string());
        let _ = write!(
            out,
            "<tr><td>{}</td><td>{}</td><td>{:.0}</td><td>{}</td></tr>",
            escape(&row.region),
            row.year,
            row.births,
            change
        );
    }
    out.push_str("</tbody></table>");
}

/// SVG bar chart. Bars grow from the zero line; missing values leave a gap.
pub fn render_chart(chart: &BarChart) -> String {
    let plot_w = CHART_WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
    let plot_h = CHART_HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;

    let (mut lo, mut hi) = chart.value_range();
    if hi - lo < f64::EPSILON {
        hi = lo + 1.0;
    }
    let pad = (hi - lo) * 0.05;
    if lo < 0.0 {
        lo -= pad;
    }
    hi += pad;
    let y = |v: f64| MARGIN_TOP + (hi - v) / (hi - lo) * plot_h;

    let mut svg = String::new();
    let _ = write!(
        svg,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" role=\"img\" width=\"{CHART_WIDTH}\" \
         height=\"{CHART_HEIGHT}\" viewBox=\"0 0 {CHART_WIDTH} {CHART_HEIGHT}\">\
         <text x=\"{MARGIN_LEFT}\" y=\"24\" font-size=\"16\">{}</text>",
        escape(&chart.title)
    );

    for i in 0..=Y_TICKS {
        let v = lo + (hi - lo) * i as f64 / Y_TICKS as f64;
        let py = y(v);
        let _ = write!(
            svg,
            "<line class=\"grid\" x1=\"{MARGIN_LEFT}\" x2=\"{x2:.1}\" y1=\"{py:.1}\" y2=\"{py:.1}\"/>\
             <text x=\"{tx:.1}\" y=\"{ty:.1}\" font-size=\"11\" text-anchor=\"end\">{v:.1}</text>",
            x2 = MARGIN_LEFT + plot_w,
            tx = MARGIN_LEFT - 6.0,
            ty = py + 4.0,
        );
    }

    let n = chart.bars.len().max(1) as f64;
    let band = plot_w / n;
    let zero = y(0.0);
    for (i, bar) in chart.bars.iter().enumerate() {
        let cx = MARGIN_LEFT + band * (i as f64 + 0.5);
        if let Some(v) = bar.value {
            let top = y(v).min(zero);
            let height = (y(v) - zero).abs();
            let _ = write!(
                svg,
                "<rect class=\"bar\" x=\"{x:.1}\" y=\"{top:.1}\" width=\"{w:.1}\" height=\"{height:.1}\">\
                 <title>{year}: {v:.1}</title></rect>",
                x = cx - band * 0.4,
                w = band * 0.8,
                year = bar.year,
            );
        }
        let _ = write!(
            svg,
            "<text x=\"{cx:.1}\" y=\"{ty:.1}\" font-size=\"11\" text-anchor=\"middle\">{}</text>",
            bar.year,
            ty = MARGIN_TOP + plot_h + 16.0,
        );
    }

    let _ = write!(
        svg,
        "<line class=\"axis\" x1=\"{MARGIN_LEFT}\" x2=\"{x2:.1}\" y1=\"{zero:.1}\" y2=\"{zero:.1}\"/>\
         <text x=\"{mx:.1}\" y=\"{xy:.1}\" font-size=\"12\" text-anchor=\"middle\">{xt}</text>\
         <text transform=\"translate(14 {my:.1}) rotate(-90)\" font-size=\"12\" \
         text-anchor=\"middle\">{yt}</text></svg>",
        x2 = MARGIN_LEFT + plot_w,
        mx = MARGIN_LEFT + plot_w / 2.0,
        xy = CHART_HEIGHT - 12.0,
        my = MARGIN_TOP + plot_h / 2.0,
        xt = escape(&chart.x_title),
        yt = escape(&chart.y_title),
    );
    svg
}
