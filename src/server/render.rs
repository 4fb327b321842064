//! Server-side rendering for the dashboard page.
//!
//! The card markup produced here is the same markup the embedded script
//! rebuilds on every poll, so the initial paint and every refresh look
//! identical. All dynamic text goes through `html_escape`.

use crate::constants::{CLOCK_INTERVAL_MS, PAGE_POLL_INTERVAL_MS};
use crate::models::{QuoteMap, StockQuote};
use crate::utils::html_escape;

/// Placeholder shown while the store holds no quotes yet
pub const EMPTY_MESSAGE: &str =
    r#"<p class="loading-message">Waiting for stock data. The first fetch may take a moment.</p>"#;

/// Message shown when a poll of `/api/stocks` fails
pub const ERROR_MESSAGE: &str =
    r#"<p class="error-message">Could not load stock data. Please try again later.</p>"#;

/// Inline fallback shown when a company logo fails to load.
/// Fully percent-encoded so it is safe in both HTML attributes and JS strings.
pub const FALLBACK_LOGO: &str = "data:image/svg+xml;charset=utf-8,%3Csvg%20xmlns%3D%22http%3A%2F%2Fwww.w3.org%2F2000%2Fsvg%22%20width%3D%2248%22%20height%3D%2248%22%3E%3Crect%20width%3D%2248%22%20height%3D%2248%22%20rx%3D%228%22%20fill%3D%22%23c6ccd8%22%2F%3E%3C%2Fsvg%3E";

/// Render one stock card
pub fn render_card(quote: &StockQuote) -> String {
    let (polarity, arrow) = if quote.is_positive() {
        ("positive", "▲")
    } else {
        ("negative", "▼")
    };

    format!(
        concat!(
            r#"<div class="card">"#,
            r#"<div class="card-header">"#,
            r#"<img class="logo" src="{logo}" alt="{symbol} logo" onerror="this.onerror=null;this.src='{fallback}'">"#,
            r#"<div class="card-title"><h2 class="company-name">{name}</h2><span class="symbol">{symbol}</span></div>"#,
            r#"</div>"#,
            r#"<div class="price-row">"#,
            r#"<span class="price">${current}</span>"#,
            r#"<span class="change {polarity}">{arrow} {change} ({pct}%)</span>"#,
            r#"</div>"#,
            r#"<div class="details-grid">"#,
            r#"<div class="detail"><span class="label">Open</span><span class="value">{open}</span></div>"#,
            r#"<div class="detail"><span class="label">High</span><span class="value">{high}</span></div>"#,
            r#"<div class="detail"><span class="label">Low</span><span class="value">{low}</span></div>"#,
            r#"<div class="detail"><span class="label">Prev Close</span><span class="value">{prev_close}</span></div>"#,
            r#"</div>"#,
            r#"<div class="updated">Updated: <span class="card-time" data-ts="{timestamp}"></span></div>"#,
            r#"</div>"#
        ),
        logo = html_escape(&quote.logo),
        fallback = FALLBACK_LOGO,
        symbol = html_escape(&quote.symbol),
        name = html_escape(&quote.company_name),
        current = html_escape(&quote.current_price),
        polarity = polarity,
        arrow = arrow,
        change = html_escape(&quote.change),
        pct = html_escape(&quote.percentage_change),
        open = html_escape(&quote.open_price),
        high = html_escape(&quote.high_price),
        low = html_escape(&quote.low_price),
        prev_close = html_escape(&quote.prev_close_price),
        timestamp = quote.timestamp,
    )
}

/// Render the card grid contents: one card per symbol in map order
/// (lexicographic ascending), or the placeholder when the map is empty.
pub fn render_cards(quotes: &QuoteMap) -> String {
    if quotes.is_empty() {
        return EMPTY_MESSAGE.to_string();
    }

    quotes.values().map(render_card).collect()
}

/// Render the complete dashboard document
pub fn render_page(quotes: &QuoteMap) -> String {
    PAGE_TEMPLATE
        .replace("__CARDS__", &render_cards(quotes))
        .replace("__EMPTY_MESSAGE__", EMPTY_MESSAGE)
        .replace("__ERROR_MESSAGE__", ERROR_MESSAGE)
        .replace("__FALLBACK_LOGO__", FALLBACK_LOGO)
        .replace("__POLL_MS__", &PAGE_POLL_INTERVAL_MS.to_string())
        .replace("__CLOCK_MS__", &CLOCK_INTERVAL_MS.to_string())
}

const PAGE_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>Stock Dashboard</title>
<style>
* {
    margin: 0;
    padding: 0;
    box-sizing: border-box;
}
body {
    font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, Oxygen, Ubuntu, Cantarell, sans-serif;
    background: #f5f7fa;
    color: #2c3e50;
    transition: background 0.3s, color 0.3s;
}
body.dark-mode {
    background: #1a1d24;
    color: #e4e6eb;
}
nav {
    display: flex;
    align-items: center;
    gap: 20px;
    padding: 14px 24px;
    background: #ffffff;
    box-shadow: 0 2px 4px rgba(0,0,0,0.08);
}
body.dark-mode nav {
    background: #232733;
    box-shadow: 0 2px 4px rgba(0,0,0,0.4);
}
nav .brand {
    font-size: 1.3em;
    font-weight: bold;
}
nav a {
    color: inherit;
    text-decoration: none;
}
nav a:hover {
    text-decoration: underline;
}
nav .spacer {
    flex: 1;
}
#clock {
    font-variant-numeric: tabular-nums;
    font-size: 0.95em;
    opacity: 0.85;
}
.theme-switch {
    display: inline-flex;
    align-items: center;
    gap: 6px;
    cursor: pointer;
    font-size: 0.9em;
    user-select: none;
}
.container {
    max-width: 1400px;
    margin: 0 auto;
    padding: 24px;
}
.stock-grid {
    display: grid;
    grid-template-columns: repeat(auto-fill, minmax(280px, 1fr));
    gap: 20px;
}
.card {
    background: #ffffff;
    border-radius: 12px;
    padding: 18px;
    box-shadow: 0 4px 6px rgba(0,0,0,0.1);
    transition: transform 0.2s;
}
.card:hover {
    transform: translateY(-2px);
}
body.dark-mode .card {
    background: #232733;
    box-shadow: 0 4px 6px rgba(0,0,0,0.5);
}
.card-header {
    display: flex;
    align-items: center;
    gap: 12px;
    margin-bottom: 12px;
}
.logo {
    width: 48px;
    height: 48px;
    border-radius: 8px;
    object-fit: contain;
    background: #f0f2f5;
}
.company-name {
    font-size: 1.05em;
    line-height: 1.2;
}
.symbol {
    font-size: 0.85em;
    opacity: 0.7;
}
.price-row {
    display: flex;
    justify-content: space-between;
    align-items: baseline;
    margin-bottom: 12px;
}
.price {
    font-size: 1.5em;
    font-weight: bold;
}
.change {
    font-weight: 600;
    font-size: 0.95em;
}
.change.positive {
    color: #27ae60;
}
.change.negative {
    color: #e74c3c;
}
.details-grid {
    display: grid;
    grid-template-columns: 1fr 1fr;
    gap: 6px 14px;
    font-size: 0.9em;
    border-top: 1px solid #eceff3;
    padding-top: 10px;
}
body.dark-mode .details-grid {
    border-top-color: #343a49;
}
.detail {
    display: flex;
    justify-content: space-between;
}
.label {
    opacity: 0.65;
}
.value {
    font-family: 'Courier New', monospace;
}
.updated {
    margin-top: 10px;
    font-size: 0.8em;
    opacity: 0.6;
}
.loading-message,
.error-message {
    grid-column: 1 / -1;
    text-align: center;
    padding: 40px 0;
    font-size: 1.1em;
}
.error-message {
    color: #e74c3c;
}
</style>
</head>
<body>
<nav>
    <span class="brand">Stock Dashboard</span>
    <a href="/">Dashboard</a>
    <a href="/calculator">DRIP Calculator</a>
    <span class="spacer"></span>
    <span id="clock"></span>
    <label class="theme-switch">
        <input type="checkbox" id="theme-toggle">
        <span>Dark mode</span>
    </label>
</nav>
<div class="container">
    <div id="stock-grid" class="stock-grid">__CARDS__</div>
</div>
<script>
const POLL_MS = __POLL_MS__;
const CLOCK_MS = __CLOCK_MS__;
const FALLBACK_LOGO = '__FALLBACK_LOGO__';
const grid = document.getElementById('stock-grid');

// --- Clock ---
function updateClock() {
    const now = new Date();
    document.getElementById('clock').textContent = now.toLocaleString('en-US', {
        weekday: 'short', month: 'short', day: 'numeric', year: 'numeric',
        hour: 'numeric', minute: '2-digit', second: '2-digit', hour12: true
    });
}
updateClock();
setInterval(updateClock, CLOCK_MS);

// --- Theme toggle ---
const themeToggle = document.getElementById('theme-toggle');
if (localStorage.getItem('theme') === 'dark') {
    document.body.classList.add('dark-mode');
    themeToggle.checked = true;
}
themeToggle.addEventListener('change', () => {
    if (themeToggle.checked) {
        document.body.classList.add('dark-mode');
        localStorage.setItem('theme', 'dark');
    } else {
        document.body.classList.remove('dark-mode');
        localStorage.setItem('theme', 'light');
    }
});

// --- Stock poller / renderer ---
// Mirrors the server-side escaping: output lands inside double-quoted
// attributes, so quotes must be escaped too
function escapeHtml(text) {
    return String(text == null ? '' : text)
        .replace(/&/g, '&amp;')
        .replace(/</g, '&lt;')
        .replace(/>/g, '&gt;')
        .replace(/"/g, '&quot;')
        .replace(/'/g, '&#39;');
}

function renderCard(q) {
    const current = parseFloat(q.current_price);
    const prevClose = parseFloat(q.prev_close_price);
    const change = current - prevClose;
    const pct = prevClose !== 0 ? (change / prevClose) * 100 : 0;
    const positive = change >= 0;
    const polarity = positive ? 'positive' : 'negative';
    const arrow = positive ? '▲' : '▼';
    const updated = new Date(q.timestamp).toLocaleTimeString();
    return `<div class="card">` +
        `<div class="card-header">` +
        `<img class="logo" src="${escapeHtml(q.logo)}" alt="${escapeHtml(q.symbol)} logo" onerror="this.onerror=null;this.src='${FALLBACK_LOGO}'">` +
        `<div class="card-title"><h2 class="company-name">${escapeHtml(q.company_name)}</h2><span class="symbol">${escapeHtml(q.symbol)}</span></div>` +
        `</div>` +
        `<div class="price-row">` +
        `<span class="price">$${current.toFixed(2)}</span>` +
        `<span class="change ${polarity}">${arrow} ${change.toFixed(2)} (${pct.toFixed(2)}%)</span>` +
        `</div>` +
        `<div class="details-grid">` +
        `<div class="detail"><span class="label">Open</span><span class="value">${parseFloat(q.open_price).toFixed(2)}</span></div>` +
        `<div class="detail"><span class="label">High</span><span class="value">${parseFloat(q.high_price).toFixed(2)}</span></div>` +
        `<div class="detail"><span class="label">Low</span><span class="value">${parseFloat(q.low_price).toFixed(2)}</span></div>` +
        `<div class="detail"><span class="label">Prev Close</span><span class="value">${prevClose.toFixed(2)}</span></div>` +
        `</div>` +
        `<div class="updated">Updated: <span class="card-time">${updated}</span></div>` +
        `</div>`;
}

function renderCards(stocks) {
    const symbols = Object.keys(stocks).sort();
    if (symbols.length === 0) {
        grid.innerHTML = '__EMPTY_MESSAGE__';
        return;
    }
    grid.innerHTML = symbols.map(s => renderCard(stocks[s])).join('');
}

async function refreshStocks() {
    try {
        const resp = await fetch('/api/stocks');
        if (!resp.ok) {
            throw new Error('HTTP ' + resp.status);
        }
        renderCards(await resp.json());
    } catch (err) {
        console.error('Failed to refresh stocks:', err);
        grid.innerHTML = '__ERROR_MESSAGE__';
    }
}

// Localize the timestamps of the server-rendered cards
document.querySelectorAll('.card-time[data-ts]').forEach(el => {
    const ts = parseInt(el.dataset.ts, 10);
    if (ts) {
        el.textContent = new Date(ts).toLocaleTimeString();
    }
});

refreshStocks();
setInterval(refreshStocks, POLL_MS);
</script>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::StockQuote;

    fn quote(symbol: &str, current: f64, prev_close: f64) -> StockQuote {
        StockQuote::new(
            symbol.to_string(),
            format!("{} Inc", symbol),
            format!("https://example.com/{}.png", symbol),
            current,
            100.0,
            110.0,
            95.0,
            prev_close,
            1_700_000_000_000,
        )
    }

    fn map(quotes: Vec<StockQuote>) -> QuoteMap {
        quotes.into_iter().map(|q| (q.symbol.clone(), q)).collect()
    }

    #[test]
    fn test_empty_map_renders_placeholder_only() {
        let html = render_cards(&QuoteMap::new());
        assert_eq!(html, EMPTY_MESSAGE);
        assert!(!html.contains("class=\"card\""));
    }

    #[test]
    fn test_cards_render_in_sorted_symbol_order() {
        let html = render_cards(&map(vec![
            quote("TSLA", 200.0, 190.0),
            quote("AAPL", 105.0, 100.0),
            quote("MSFT", 300.0, 310.0),
        ]));

        let aapl = html.find("AAPL").unwrap();
        let msft = html.find("MSFT").unwrap();
        let tsla = html.find("TSLA").unwrap();
        assert!(aapl < msft && msft < tsla);
        assert_eq!(html.matches("class=\"card\"").count(), 3);
    }

    #[test]
    fn test_polarity_class_and_arrow() {
        let up = render_card(&quote("AAPL", 105.0, 100.0));
        assert!(up.contains("change positive"));
        assert!(up.contains("▲"));

        let down = render_card(&quote("AAPL", 95.0, 100.0));
        assert!(down.contains("change negative"));
        assert!(down.contains("▼"));

        // Zero change counts as positive
        let flat = render_card(&quote("AAPL", 100.0, 100.0));
        assert!(flat.contains("change positive"));
    }

    #[test]
    fn test_prices_display_two_decimals() {
        let html = render_card(&quote("IBM", 101.0, 100.0));
        assert!(html.contains("$101.00"));
        assert!(html.contains("1.00 (1.00%)"));
        assert!(html.contains(">100.00<"));
    }

    #[test]
    fn test_company_name_is_escaped() {
        let mut q = quote("T", 20.0, 19.0);
        q.company_name = "AT&T <Inc>".to_string();
        let html = render_card(&q);
        assert!(html.contains("AT&amp;T &lt;Inc&gt;"));
        assert!(!html.contains("<Inc>"));
    }

    #[test]
    fn test_card_has_logo_fallback() {
        let html = render_card(&quote("AAPL", 105.0, 100.0));
        assert!(html.contains("onerror="));
        assert!(html.contains(FALLBACK_LOGO));
    }

    #[test]
    fn test_page_embeds_cards_and_behaviors() {
        let html = render_page(&map(vec![quote("NVDA", 500.0, 480.0)]));

        // Server-rendered card is present
        assert!(html.contains("NVDA"));
        // No leftover template tokens
        assert!(!html.contains("__CARDS__"));
        assert!(!html.contains("__POLL_MS__"));
        assert!(!html.contains("__EMPTY_MESSAGE__"));
        // Poller, clock, and theme wiring
        assert!(html.contains("/api/stocks"));
        assert!(html.contains("const POLL_MS = 10000;"));
        assert!(html.contains("const CLOCK_MS = 1000;"));
        assert!(html.contains("localStorage.getItem('theme')"));
        assert!(html.contains("dark-mode"));
        assert!(html.contains("error-message"));
        // Nav link to the external calculator page
        assert!(html.contains("href=\"/calculator\""));
    }

    #[test]
    fn test_page_script_escapes_attribute_quotes() {
        let html = render_page(&QuoteMap::new());
        // The client-side escaper must neutralize quotes, since its output
        // is interpolated into double-quoted attributes
        assert!(html.contains("replace(/\"/g, '&quot;')"));
        assert!(html.contains("replace(/'/g, '&#39;')"));
    }

    #[test]
    fn test_page_with_empty_store_shows_placeholder() {
        let html = render_page(&QuoteMap::new());
        let grid_start = html.find("id=\"stock-grid\"").unwrap();
        let grid_end = html[grid_start..].find("</div>").unwrap() + grid_start;
        let grid = &html[grid_start..grid_end];
        assert!(grid.contains("loading-message"));
        assert!(!grid.contains("class=\"card\""));
    }
}
