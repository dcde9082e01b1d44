//! Index page rendering.

use crate::geoip::GeoProfile;

/// Values shown on the index page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexView {
    pub isp_name: String,
    pub ip_address: String,
    pub isp_org: String,
    pub city: String,
    pub region: String,
    pub country: String,
    /// Disables the speed check button after a failed lookup
    pub btn_disable: bool,
}

impl IndexView {
    pub fn located(geo: GeoProfile) -> Self {
        Self {
            isp_name: geo.isp,
            ip_address: geo.ip,
            isp_org: geo.organization,
            city: geo.city,
            region: geo.region,
            country: geo.country,
            btn_disable: false,
        }
    }

    pub fn failed() -> Self {
        Self {
            btn_disable: true,
            ..Self::located(GeoProfile::error_placeholder())
        }
    }
}

const TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>Speed Check</title>
  <link rel="stylesheet" href="/style.css">
</head>
<body>
  <main>
    <h1>Speed Check</h1>
    <table class="profile">
      <tr><th>ISP</th><td id="isp-name">{{isp_name}}</td></tr>
      <tr><th>IP address</th><td id="ip-address">{{ip_address}}</td></tr>
      <tr><th>Organization</th><td id="isp-org">{{isp_org}}</td></tr>
      <tr><th>City</th><td id="city">{{city}}</td></tr>
      <tr><th>Region</th><td id="region">{{region}}</td></tr>
      <tr><th>Country</th><td id="country">{{country}}</td></tr>
    </table>
    <button id="check" type="button"{{btn_disable}}>Check speed</button>
    <table class="results">
      <tr><th>Download</th><td id="download">-</td></tr>
      <tr><th>Upload</th><td id="upload">-</td></tr>
      <tr><th>Ping</th><td id="ping">-</td></tr>
      <tr><th>Packet loss</th><td id="loss">-</td></tr>
    </table>
  </main>
  <script src="/checkspeed.js"></script>
</body>
</html>
"#;

/// Renders the index page; every value is HTML-escaped.
pub fn render_index(view: &IndexView) -> String {
    TEMPLATE
        .replace("{{isp_name}}", &escape_html(&view.isp_name))
        .replace("{{ip_address}}", &escape_html(&view.ip_address))
        .replace("{{isp_org}}", &escape_html(&view.isp_org))
        .replace("{{city}}", &escape_html(&view.city))
        .replace("{{region}}", &escape_html(&view.region))
        .replace("{{country}}", &escape_html(&view.country))
        .replace(
            "{{btn_disable}}",
            if view.btn_disable { " disabled" } else { "" },
        )
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_located_profile() {
        let view = IndexView::located(GeoProfile {
            ip: "8.8.8.8".to_string(),
            isp: "Google LLC".to_string(),
            organization: "GOOGLE".to_string(),
            city: "Mountain View".to_string(),
            region: "California".to_string(),
            country: "United States".to_string(),
        });

        let html = render_index(&view);

        assert!(html.contains(r#"<td id="isp-name">Google LLC</td>"#));
        assert!(html.contains(r#"<td id="region">California</td>"#));
        assert!(html.contains(r#"<button id="check" type="button">"#));
        assert!(!html.contains("{{"));
    }

    #[test]
    fn test_render_failed_lookup() {
        let html = render_index(&IndexView::failed());

        assert!(html.contains(r#"<td id="isp-name">Error</td>"#));
        assert!(html.contains(r#"<td id="isp-org">Error</td>"#));
        assert!(html.contains(r#"<td id="city">---</td>"#));
        assert!(html.contains(r#"<button id="check" type="button" disabled>"#));
    }

    #[test]
    fn test_render_escapes_provider_values() {
        let view = IndexView::located(GeoProfile {
            isp: "<script>alert(1)</script>".to_string(),
            organization: "AT&T".to_string(),
            ..GeoProfile::default()
        });

        let html = render_index(&view);

        assert!(!html.contains("<script>alert"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("AT&amp;T"));
    }
}
