// src/services/intent.rs
use strsim::levenshtein;

/// Minimum 0-100 keyword score for an intent to match.
pub const MATCH_THRESHOLD: u8 = 80;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    PriceTrends,
    PerformanceComparison,
    Forecast,
    SupportResistance,
    AnalyticalInsights,
    Volatility,
    Unknown,
}

impl Intent {
    pub fn label(&self) -> &'static str {
        match self {
            Intent::PriceTrends => "price_trends",
            Intent::PerformanceComparison => "performance_comparison",
            Intent::Forecast => "forecast",
            Intent::SupportResistance => "support_resistance",
            Intent::AnalyticalInsights => "analytical_insights",
            Intent::Volatility => "volatility",
            Intent::Unknown => "unknown",
        }
    }
}

// Checked in this order; the first intent whose best keyword score clears
// the threshold wins.
const INTENT_KEYWORDS: &[(Intent, &[&str])] = &[
    (
        Intent::PriceTrends,
        &["price trend", "current price trend", "price trends"],
    ),
    (
        Intent::PerformanceComparison,
        &["compare", "performance comparison"],
    ),
    (Intent::Forecast, &["forecast", "price prediction"]),
    (
        Intent::SupportResistance,
        &["support", "resistance", "support and resistance"],
    ),
    (
        Intent::AnalyticalInsights,
        &["insight", "analytical insights"],
    ),
    (Intent::Volatility, &["volatility", "price volatility"]),
];

/// Currencies the AI server knows about. Entity extraction is an exact
/// whole-word scan over this list, no fuzzy matching.
pub const KNOWN_CRYPTOS: &[&str] = &[
    "bitcoin", "ethereum", "litecoin", "cardano", "ripple", "solana", "polkadot",
];

/// Classify a free-text question against the fixed keyword lists.
pub fn detect_intent(question: &str) -> Intent {
    let question = question.to_lowercase();
    let question = question.trim();

    for (intent, keywords) in INTENT_KEYWORDS {
        let best = keywords
            .iter()
            .map(|keyword| keyword_score(question, keyword))
            .max()
            .unwrap_or(0);
        if best >= MATCH_THRESHOLD {
            return *intent;
        }
    }
    Intent::Unknown
}

/// First known currency appearing as a whole word in the question.
pub fn extract_crypto(question: &str) -> Option<&'static str> {
    let question = question.to_lowercase();
    let words: Vec<&str> = question
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect();

    KNOWN_CRYPTOS
        .iter()
        .copied()
        .find(|name| words.iter().any(|w| w == name))
}

/// Score a keyword phrase against the question on a 0-100 scale.
///
/// A keyword is usually much shorter than the question, so the score is the
/// best Levenshtein ratio over same-word-count windows of the question (a
/// keyword embedded verbatim scores 100). The whole-string comparison is
/// included for questions shorter than the keyword.
pub fn keyword_score(question: &str, keyword: &str) -> u8 {
    let words: Vec<&str> = question.split_whitespace().collect();
    let span = keyword.split_whitespace().count().max(1);

    let mut best = levenshtein_ratio(question, keyword);
    if words.len() >= span {
        for window in words.windows(span) {
            best = best.max(levenshtein_ratio(&window.join(" "), keyword));
        }
    }
    best
}

fn levenshtein_ratio(a: &str, b: &str) -> u8 {
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 100;
    }
    let dist = levenshtein(a, b);
    (100.0 * (1.0 - dist as f64 / max_len as f64)).round() as u8
}
