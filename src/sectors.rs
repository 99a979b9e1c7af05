// =============================================================================
// Sector Map & Symbol Universe
// =============================================================================
//
// Static fallback data used when the quote provider returns no profile:
// - Sector by ticker for the S&P 100 (both BRK-B and BRK.B spellings)
// - The default symbol universe analysed on every run

/// Sector returned for tickers missing from the map.
pub const UNKNOWN_SECTOR: &str = "Unknown";

/// Sorted by ticker so lookups can binary search.
const SECTOR_MAP: &[(&str, &str)] = &[
    ("AAPL", "Technology"),
    ("ABBV", "Healthcare"),
    ("ABT", "Healthcare"),
    ("ACN", "Technology"),
    ("ADBE", "Technology"),
    ("AIG", "Financials"),
    ("AMD", "Technology"),
    ("AMGN", "Healthcare"),
    ("AMT", "Real Estate"),
    ("AMZN", "Consumer"),
    ("AVGO", "Technology"),
    ("AXP", "Financials"),
    ("BA", "Industrials"),
    ("BAC", "Financials"),
    ("BK", "Financials"),
    ("BKNG", "Consumer"),
    ("BLK", "Financials"),
    ("BMY", "Healthcare"),
    ("BRK-B", "Financials"),
    ("BRK.B", "Financials"),
    ("C", "Financials"),
    ("CAT", "Industrials"),
    ("CHTR", "Communications"),
    ("CL", "Consumer"),
    ("CMCSA", "Communications"),
    ("COF", "Financials"),
    ("COP", "Energy"),
    ("COST", "Consumer"),
    ("CRM", "Technology"),
    ("CSCO", "Technology"),
    ("CVS", "Healthcare"),
    ("CVX", "Energy"),
    ("DE", "Industrials"),
    ("DHR", "Healthcare"),
    ("DIS", "Communications"),
    ("DOW", "Materials"),
    ("DUK", "Utilities"),
    ("EMR", "Industrials"),
    ("EXC", "Utilities"),
    ("F", "Consumer"),
    ("FDX", "Industrials"),
    ("GD", "Industrials"),
    ("GE", "Industrials"),
    ("GILD", "Healthcare"),
    ("GM", "Consumer"),
    ("GOOG", "Communications"),
    ("GOOGL", "Communications"),
    ("GS", "Financials"),
    ("HD", "Consumer"),
    ("HON", "Industrials"),
    ("IBM", "Technology"),
    ("INTC", "Technology"),
    ("JNJ", "Healthcare"),
    ("JPM", "Financials"),
    ("KHC", "Consumer"),
    ("KO", "Consumer"),
    ("LIN", "Materials"),
    ("LLY", "Healthcare"),
    ("LMT", "Industrials"),
    ("LOW", "Consumer"),
    ("MA", "Financials"),
    ("MCD", "Consumer"),
    ("MDLZ", "Consumer"),
    ("MDT", "Healthcare"),
    ("MET", "Financials"),
    ("META", "Communications"),
    ("MMM", "Industrials"),
    ("MO", "Consumer"),
    ("MRK", "Healthcare"),
    ("MS", "Financials"),
    ("MSFT", "Technology"),
    ("NEE", "Utilities"),
    ("NFLX", "Communications"),
    ("NKE", "Consumer"),
    ("NVDA", "Technology"),
    ("ORCL", "Technology"),
    ("PEP", "Consumer"),
    ("PFE", "Healthcare"),
    ("PG", "Consumer"),
    ("PM", "Consumer"),
    ("PYPL", "Financials"),
    ("QCOM", "Technology"),
    ("RTX", "Industrials"),
    ("SBUX", "Consumer"),
    ("SCHW", "Financials"),
    ("SO", "Utilities"),
    ("SPG", "Real Estate"),
    ("T", "Communications"),
    ("TGT", "Consumer"),
    ("TMO", "Healthcare"),
    ("TMUS", "Communications"),
    ("TSLA", "Consumer"),
    ("TXN", "Technology"),
    ("UNH", "Healthcare"),
    ("UNP", "Industrials"),
    ("UPS", "Industrials"),
    ("USB", "Financials"),
    ("V", "Financials"),
    ("VZ", "Communications"),
    ("WFC", "Financials"),
    ("WMT", "Consumer"),
    ("XOM", "Energy"),
];

const UNIVERSE: &[&str] = &[
    "AAPL", "ABBV", "ABT", "ACN", "ADBE", "AIG", "AMD", "AMGN", "AMT", "AMZN",
    "AVGO", "AXP", "BA", "BAC", "BK", "BKNG", "BLK", "BMY", "BRK.B", "C",
    "CAT", "CHTR", "CL", "CMCSA", "COF", "COP", "COST", "CRM", "CSCO", "CVS",
    "CVX", "DE", "DHR", "DIS", "DOW", "DUK", "EMR", "EXC", "F", "FDX",
    "GD", "GE", "GILD", "GM", "GOOG", "GOOGL", "GS", "HD", "HON", "IBM",
    "INTC", "JNJ", "JPM", "KHC", "KO", "LIN", "LLY", "LMT", "LOW", "MA",
    "MCD", "MDLZ", "MDT", "MET", "META", "MMM", "MO", "MRK", "MS", "MSFT",
    "NEE", "NFLX", "NKE", "NVDA", "ORCL", "PEP", "PFE", "PG", "PM", "PYPL",
    "QCOM", "RTX", "SBUX", "SCHW", "SO", "SPG", "T", "TGT", "TMO", "TMUS",
    "TSLA", "TXN", "UNH", "UNP", "UPS", "USB", "V", "VZ", "WFC", "WMT",
    "XOM",
];

/// Fallback sector for `ticker`, if known.
pub fn fallback_sector(ticker: &str) -> Option<&'static str> {
    SECTOR_MAP
        .binary_search_by(|(t, _)| (*t).cmp(ticker))
        .ok()
        .map(|i| SECTOR_MAP[i].1)
}

/// The default symbol universe (S&P 100).
pub fn default_universe() -> Vec<String> {
    UNIVERSE.iter().map(|s| s.to_string()).collect()
}
