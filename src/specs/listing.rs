// src/specs/listing.rs
//
// Listing detail page → raw named fields.
// Sources on the page:
// - <meta property="og:zillow_fb:address">, zillow_fb:beds / baths / description
// - <span class="addr_bbs"> ×3: beds, baths, sqft (we read sqft from the third)
// - <div id="home-value-wrapper">: .status-icon-row (status), .main-row (price)
// - first <div class="zest-value">: "Zestimate®: $455,000"
// - <div class="hdp-facts"> … <li>fact line</li> …

use crate::core::html::{
    all_by_class_ci, find_by_attr_ci, find_by_class_ci, meta_content, next_tag_block_ci, text_of,
};
use crate::core::sanitize::normalize_ws;

/// Raw strings scraped from one listing page. Missing parts are empty.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListingFields {
    pub address: String,
    pub beds: String,
    pub bath: String,
    pub sqft: String,
    pub status: String,
    pub price: String,
    pub estimate: String,
    pub description: String,
    /// One entry per fact bullet, whitespace-normalized.
    pub facts: Vec<String>,
}

const OFF_MARKET: &str = "Off Market";

pub fn parse(doc: &str) -> ListingFields {
    // Most blocks live under <div role="main">; fall back to the whole page.
    let main = find_by_attr_ci(doc, "div", "role", "main", 0)
        .map(|(s, e)| &doc[s..e])
        .unwrap_or(doc);

    let meta = |key: &str| meta_content(doc, key).map(|v| normalize_ws(&v)).unwrap_or_default();

    let sqft = all_by_class_ci(main, "span", "addr_bbs")
        .get(2)
        .map(|&(s, e)| text_of(&main[s..e]))
        .unwrap_or_default();

    let (status, price) = price_block(main);

    let fields = ListingFields {
        address: meta("og:zillow_fb:address"),
        beds: meta("zillow_fb:beds"),
        bath: meta("zillow_fb:baths"),
        sqft,
        status,
        price,
        estimate: estimate(main),
        description: meta("zillow_fb:description"),
        facts: fact_lines(main),
    };

    if fields.address.is_empty() {
        tracing::debug!("listing page has no address meta tag");
    }
    fields
}

/// (status, price) from the home value block. "Off Market" price reads as empty.
fn price_block(main: &str) -> (String, String) {
    let Some((s, e)) = find_by_attr_ci(main, "div", "id", "home-value-wrapper", 0) else {
        return (s!(), s!());
    };
    let block = &main[s..e];
    let text = |class: &str| {
        find_by_class_ci(block, "div", class, 0)
            .map(|(s, e)| text_of(&block[s..e]))
            .unwrap_or_default()
    };

    let status = text("status-icon-row");
    let mut price = text("main-row");
    if price == OFF_MARKET {
        price.clear();
    }
    (status, price)
}

/// "Zestimate: $455,000" → "$455,000"; text without a label is kept as-is.
fn estimate(main: &str) -> String {
    let Some((s, e)) = find_by_class_ci(main, "div", "zest-value", 0) else {
        return s!();
    };
    let text = text_of(&main[s..e]);
    match text.split_once(':') {
        Some((_, value)) => s!(value.trim()),
        None => text,
    }
}

fn fact_lines(main: &str) -> Vec<String> {
    let Some((s, e)) = find_by_class_ci(main, "div", "hdp-facts", 0) else {
        return Vec::new();
    };
    let block = &main[s..e];

    let mut out = Vec::new();
    let mut pos = 0usize;
    while let Some((li_s, li_e)) = next_tag_block_ci(block, "<li", "</li>", pos) {
        let line = text_of(&block[li_s..li_e]);
        if !line.is_empty() {
            out.push(line);
        }
        pos = li_e;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
<html><head>
  <meta property="og:zillow_fb:address" content="12 Elm St, Springfield, IL 62701">
  <meta property="zillow_fb:beds" content="3">
  <meta property="zillow_fb:baths" content="2.5">
  <meta property="zillow_fb:description" content="Sunny   corner lot &amp; new roof.">
</head><body>
<div role="main">
  <h1><span class="addr_bbs">3 beds</span><span class="addr_bbs">2.5 baths</span>
      <span class="addr_bbs">1,850 sqft</span></h1>
  <div id="home-value-wrapper">
    <div class="status-icon-row"><span class="icon"></span> For Sale </div>
    <div class="main-row"><span>$450,000</span></div>
  </div>
  <div class="zest-value">Zestimate<sup>&reg;</sup>: $455,000</div>
  <div class="zest-value">Rent Zestimate: $2,100/mo</div>
  <div class="hdp-facts"><ul>
    <li>Built in 2001</li>
    <li>Lot: 6,000 sqft</li>
    <li><span>Parking:</span> Garage - Attached</li>
    <li>  </li>
  </ul></div>
</div>
</body></html>"#;

    #[test]
    fn parses_fixture_page() {
        let f = parse(PAGE);
        assert_eq!(f.address, "12 Elm St, Springfield, IL 62701");
        assert_eq!(f.beds, "3");
        assert_eq!(f.bath, "2.5");
        assert_eq!(f.sqft, "1,850 sqft");
        assert_eq!(f.status, "For Sale");
        assert_eq!(f.price, "$450,000");
        assert_eq!(f.estimate, "$455,000");
        assert_eq!(f.description, "Sunny corner lot & new roof.");
        assert_eq!(f.facts, vec!["Built in 2001", "Lot: 6,000 sqft", "Parking: Garage - Attached"]);
    }

    #[test]
    fn off_market_price_is_empty() {
        let page = r#"<div id="home-value-wrapper"><div class="status-icon-row">Off Market</div>
            <div class="main-row">Off Market</div></div>"#;
        let f = parse(page);
        assert_eq!(f.status, "Off Market");
        assert_eq!(f.price, "");
    }

    #[test]
    fn empty_page_gives_empty_fields() {
        assert_eq!(parse("<html></html>"), ListingFields::default());
    }
}
