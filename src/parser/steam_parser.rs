// Community market listing page parsing
use crate::model::{MarketSnapshot, ParserError, RawSample};
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

pub trait Parser {
    fn parse(&self, html: &str) -> Result<MarketSnapshot, ParserError>;
}

const NAME_SELECTOR: &str = "#largeiteminfo_item_name";
const UNKNOWN_ITEM: &str = "Unknown item";

// Each field is resolved by trying its selectors in order; the first non-zero value wins.
const SALE_PRICE_SELECTORS: &[&str] = &[
    "#market_commodity_forsale > span:nth-child(2)",
    ".market_listing_price.market_listing_price_with_fee",
    ".market_listing_right_cell .market_listing_price",
    ".market_listing_table .market_listing_price",
    "[id*=\"listing_\"] .market_listing_price",
];
const REQUEST_PRICE_SELECTORS: &[&str] = &[
    "#market_commodity_buyrequests > span:nth-child(2)",
    ".market_listing_buyorder_price",
];
const SALE_COUNT_SELECTOR: &str = "#market_commodity_forsale > span:nth-child(1)";
const LISTING_ROW_SELECTOR: &str = ".market_listing_row";
const REQUEST_COUNT_SELECTOR: &str = "#market_commodity_buyrequests > span:nth-child(1)";
const BUY_ORDER_LINK_SELECTOR: &str = "[href*=\"#buyorder\"]";

/// Inline script variables that may hold the price history, most specific first.
const SERIES_PATTERNS: &[(&str, &str)] = &[
    ("g_plotPriceHistory", r"g_plotPriceHistory\s*=\s*(\[[\s\S]*?\]);"),
    ("line1", r"line1\s*=\s*(\[[\s\S]*?\]);"),
    ("price_history", r#""price_history":\s*(\[[\s\S]*?\])"#),
    ("prices", r#""prices":\s*(\[[\s\S]*?\])"#),
];

pub struct SteamMarketParser {
    series_patterns: Vec<(&'static str, Regex)>,
}

impl SteamMarketParser {
    pub fn new() -> Result<Self, ParserError> {
        let series_patterns = SERIES_PATTERNS
            .iter()
            .map(|(name, pattern)| -> Result<(&'static str, Regex), ParserError> {
                Ok((*name, Regex::new(pattern)?))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { series_patterns })
    }

    fn extract_series(&self, document: &Html) -> Result<Option<Vec<RawSample>>, ParserError> {
        let script_selector = selector("script")?;

        for script in document.select(&script_selector) {
            let content = script.text().collect::<String>();
            for (name, pattern) in &self.series_patterns {
                let Some(captures) = pattern.captures(&content) else {
                    continue;
                };
                match serde_json::from_str::<Vec<RawSample>>(&captures[1]) {
                    Ok(series) => {
                        debug!("Price history found in `{}` ({} entries)", name, series.len());
                        return Ok(Some(series));
                    }
                    Err(e) => debug!("Could not parse `{}` as price history: {}", name, e),
                }
            }
        }

        Ok(None)
    }
}

impl Parser for SteamMarketParser {
    fn parse(&self, html: &str) -> Result<MarketSnapshot, ParserError> {
        let document = Html::parse_document(html);

        let name = first_match(&document, NAME_SELECTOR)?
            .map(|el| el.text().collect::<String>().trim().to_string())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| UNKNOWN_ITEM.to_string());

        let sale_price = first_price(&document, SALE_PRICE_SELECTORS)?;
        let request_price = first_price(&document, REQUEST_PRICE_SELECTORS)?;

        let mut sale_count = first_match(&document, SALE_COUNT_SELECTOR)?
            .map(|el| parse_count(&el.text().collect::<String>()))
            .unwrap_or(0);
        if sale_count == 0 {
            sale_count = document.select(&selector(LISTING_ROW_SELECTOR)?).count() as i64;
        }

        let mut request_count = first_match(&document, REQUEST_COUNT_SELECTOR)?
            .map(|el| parse_count(&el.text().collect::<String>()))
            .unwrap_or(0);
        if request_count == 0 {
            request_count = first_match(&document, BUY_ORDER_LINK_SELECTOR)?
                .map(|el| first_digit_run(&el.text().collect::<String>()))
                .unwrap_or(0);
        }

        Ok(MarketSnapshot {
            name,
            sale_price,
            request_price,
            sale_count,
            request_count,
            price_series: self.extract_series(&document)?,
        })
    }
}

fn selector(css: &str) -> Result<Selector, ParserError> {
    Selector::parse(css).map_err(|_| ParserError::Selector(css.to_string()))
}

fn first_match<'a>(document: &'a Html, css: &str) -> Result<Option<ElementRef<'a>>, ParserError> {
    Ok(document.select(&selector(css)?).next())
}

fn first_price(document: &Html, selectors: &[&str]) -> Result<f64, ParserError> {
    for css in selectors {
        if let Some(el) = first_match(document, css)? {
            let price = parse_price(&el.text().collect::<String>());
            if price > 0.0 {
                return Ok(price);
            }
        }
    }
    Ok(0.0)
}

/// Reads a displayed price such as `"0,35€"` or `"$1.20 USD"`; 0 when nothing numeric is found.
pub fn parse_price(text: &str) -> f64 {
    let cleaned: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == ',')
        .collect::<String>()
        .replacen(',', ".", 1);

    let mut end = 0;
    let mut seen_dot = false;
    for (i, c) in cleaned.char_indices() {
        match c {
            '0'..='9' => end = i + 1,
            '.' if !seen_dot => {
                seen_dot = true;
                end = i + 1;
            }
            _ => break,
        }
    }

    cleaned[..end].parse().unwrap_or(0.0)
}

/// Keeps only the digits of a displayed count, e.g. `"1,204"` -> 1204.
pub fn parse_count(text: &str) -> i64 {
    let digits: String = text.chars().filter(|c| c.is_ascii_digit()).collect();
    digits.parse().unwrap_or(0)
}

fn first_digit_run(text: &str) -> i64 {
    text.split(|c: char| !c.is_ascii_digit())
        .find(|run| !run.is_empty())
        .and_then(|run| run.parse().ok())
        .unwrap_or(0)
}
