//! # Ingredient Segmenter
//!
//! Splits one dictated utterance into one segment per ingredient mention.
//!
//! Strategies are tried in order; the next one runs only when the previous
//! one produced a single segment:
//!
//! 1. explicit delimiters (`,` `;`), ignoring decimal commas
//! 2. dictation pauses (`..` or a period between spaces)
//! 3. price boundaries ("avocados 2 euro tomatoes 1.20")
//! 4. ingredient keywords around a price, for long unsplit text only
//!
//! ```rust
//! use ingredient_pricing::segmenter::Segmenter;
//!
//! let segmenter = Segmenter::new();
//! let segments = segmenter.segment("Avocado 2 Euro, Kartoffel 1.50, Zwiebel 0.80 pro Kilo");
//! assert_eq!(segments, vec!["Avocado 2 Euro", "Kartoffel 1.50", "Zwiebel 0.80 pro Kilo"]);
//! ```

use crate::config::SegmenterConfig;
use crate::extraction::{PriceExtractor, PriceMatch};
use crate::knowledge::KnowledgeTable;
use crate::price_patterns::{DELIMITER_REGEX, PAUSE_REGEX};
use log::{debug, info, trace};

/// A segmentation strategy: text in, candidate segments out
type SplitFn = fn(&Segmenter, &str) -> Vec<String>;

/// One named strategy in the ordered list
#[derive(Clone)]
pub struct SegmentStrategy {
    pub name: &'static str,
    apply: SplitFn,
}

/// Splits utterances into per-ingredient segments
#[derive(Clone)]
pub struct Segmenter {
    extractor: PriceExtractor,
    table: &'static KnowledgeTable,
    config: SegmenterConfig,
    strategies: Vec<SegmentStrategy>,
}

impl Segmenter {
    /// Create a segmenter with default configuration
    pub fn new() -> Self {
        Self::with_config(SegmenterConfig::default())
    }

    pub fn with_config(config: SegmenterConfig) -> Self {
        Self::with_parts(PriceExtractor::new(), KnowledgeTable::builtin(), config)
    }

    /// Create a segmenter from explicit collaborators
    pub fn with_parts(
        extractor: PriceExtractor,
        table: &'static KnowledgeTable,
        config: SegmenterConfig,
    ) -> Self {
        info!(
            "Creating Segmenter: max_segment_length={}, keyword_lookahead={}",
            config.max_segment_length, config.keyword_lookahead
        );
        let strategies = vec![
            SegmentStrategy {
                name: "delimiters",
                apply: Segmenter::split_on_delimiters,
            },
            SegmentStrategy {
                name: "pauses",
                apply: Segmenter::split_on_pauses,
            },
            SegmentStrategy {
                name: "price_boundaries",
                apply: Segmenter::split_on_price_boundaries,
            },
            SegmentStrategy {
                name: "keywords",
                apply: Segmenter::split_on_keywords,
            },
        ];
        Self {
            extractor,
            table,
            config,
            strategies,
        }
    }

    /// Names of the strategies, in the order they are tried
    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name).collect()
    }

    /// Split `text` into trimmed, non-empty segments
    pub fn segment(&self, text: &str) -> Vec<String> {
        let text = text.trim();
        if text.is_empty() {
            return Vec::new();
        }

        for strategy in &self.strategies {
            let segments = (strategy.apply)(self, text);
            if segments.len() > 1 {
                debug!(
                    "Strategy '{}' split utterance into {} segments",
                    strategy.name,
                    segments.len()
                );
                return segments;
            }
            trace!("Strategy '{}' did not split '{}'", strategy.name, text);
        }

        vec![text.to_string()]
    }

    /// Split on `,` and `;`; a comma between two digits is a decimal comma
    pub fn split_on_delimiters(&self, text: &str) -> Vec<String> {
        let mut segments = Vec::new();
        let mut start = 0;

        for delimiter in DELIMITER_REGEX.find_iter(text) {
            if delimiter.as_str() == "," && is_decimal_comma(text, delimiter.start()) {
                continue;
            }
            push_trimmed(&mut segments, &text[start..delimiter.start()]);
            start = delimiter.end();
        }
        push_trimmed(&mut segments, &text[start..]);
        segments
    }

    /// Split on dictated pauses: runs of periods or a period surrounded by whitespace
    pub fn split_on_pauses(&self, text: &str) -> Vec<String> {
        let mut segments = Vec::new();
        for part in PAUSE_REGEX.split(text) {
            push_trimmed(&mut segments, part);
        }
        segments
    }

    /// Cut after each price that has text before it and a word right after it
    pub fn split_on_price_boundaries(&self, text: &str) -> Vec<String> {
        let spans = price_spans(&self.extractor.extract_prices(text));
        let mut segments = Vec::new();
        let mut cursor = 0;

        for (start, end) in spans {
            if start < cursor {
                continue;
            }
            let preceding = text[cursor..start].trim();
            if preceding.is_empty() || !starts_with_word(&text[end..]) {
                continue;
            }
            trace!("Price boundary after '{}' at byte {}", &text[start..end], end);
            push_trimmed(&mut segments, &text[cursor..end]);
            cursor = end;
        }
        push_trimmed(&mut segments, &text[cursor..]);
        segments
    }

    /// For long text only: ingredient noun, a price within the lookahead, then another
    /// ingredient noun within the lookahead after the price; cut right after the price
    pub fn split_on_keywords(&self, text: &str) -> Vec<String> {
        if text.chars().count() <= self.config.max_segment_length {
            return vec![text.to_string()];
        }

        let tokens = tokenize(text);
        let spans = price_spans(&self.extractor.extract_prices(text));
        let lookahead = self.config.keyword_lookahead;
        let mut cuts = Vec::new();
        let mut index = 0;

        while index < tokens.len() {
            let (start, end) = tokens[index];
            if !self.table.is_ingredient_noun(&text[start..end]) {
                index += 1;
                continue;
            }

            // A price starting inside one of the next `lookahead` tokens
            let window_end = (index + 1 + lookahead).min(tokens.len());
            let price = tokens[index + 1..window_end].iter().find_map(|&(ts, te)| {
                spans
                    .iter()
                    .find(|&&(ps, _)| ps >= ts && ps < te && ps >= end)
            });
            let Some(&(_, price_end)) = price else {
                index += 1;
                continue;
            };

            // Another ingredient noun within `lookahead` tokens after the price
            let after: Vec<usize> = (0..tokens.len())
                .filter(|&i| tokens[i].0 >= price_end)
                .take(lookahead)
                .collect();
            let next_noun = after
                .iter()
                .copied()
                .find(|&i| self.table.is_ingredient_noun(&text[tokens[i].0..tokens[i].1]));

            match (after.first(), next_noun) {
                (Some(&first_after), Some(noun)) => {
                    trace!(
                        "Keyword boundary between '{}' and '{}'",
                        &text[start..end],
                        &text[tokens[noun].0..tokens[noun].1]
                    );
                    cuts.push(tokens[first_after].0);
                    index = noun;
                }
                _ => index += 1,
            }
        }

        let mut segments = Vec::new();
        let mut cursor = 0;
        for cut in cuts {
            push_trimmed(&mut segments, &text[cursor..cut]);
            cursor = cut;
        }
        push_trimmed(&mut segments, &text[cursor..]);
        segments
    }
}

impl Default for Segmenter {
    fn default() -> Self {
        Self::new()
    }
}

/// Byte spans of the price phrases; overlapping matches ("für 3" and "3 Euro")
/// are merged into one span reaching the farthest end
fn price_spans(prices: &[PriceMatch]) -> Vec<(usize, usize)> {
    let mut spans: Vec<(usize, usize)> = prices.iter().map(|p| (p.position, p.end())).collect();
    spans.sort();

    let mut merged: Vec<(usize, usize)> = Vec::with_capacity(spans.len());
    for (start, end) in spans {
        match merged.last_mut() {
            Some(last) if start < last.1 => last.1 = last.1.max(end),
            _ => merged.push((start, end)),
        }
    }
    merged
}

fn is_decimal_comma(text: &str, index: usize) -> bool {
    let before = text[..index].chars().next_back();
    let after = text[index + 1..].chars().next();
    matches!((before, after), (Some(b), Some(a)) if b.is_ascii_digit() && a.is_ascii_digit())
}

fn starts_with_word(text: &str) -> bool {
    text.trim_start()
        .chars()
        .next()
        .is_some_and(|c| c.is_alphabetic())
}

/// Byte spans of whitespace-separated tokens
fn tokenize(text: &str) -> Vec<(usize, usize)> {
    let mut tokens = Vec::new();
    let mut start = None;
    for (i, c) in text.char_indices() {
        match (c.is_whitespace(), start) {
            (true, Some(s)) => {
                tokens.push((s, i));
                start = None;
            }
            (false, None) => start = Some(i),
            _ => {}
        }
    }
    if let Some(s) = start {
        tokens.push((s, text.len()));
    }
    tokens
}

fn push_trimmed(segments: &mut Vec<String>, part: &str) {
    let part = part.trim();
    if !part.is_empty() {
        segments.push(part.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segmenter() -> Segmenter {
        Segmenter::new()
    }

    #[test]
    fn test_strategy_order() {
        assert_eq!(
            segmenter().strategy_names(),
            vec!["delimiters", "pauses", "price_boundaries", "keywords"]
        );
    }

    #[test]
    fn test_decimal_comma_is_not_a_delimiter() {
        let segments = segmenter().split_on_delimiters("Tomaten 2,50 pro kg; Zwiebeln 1,20");
        assert_eq!(segments, vec!["Tomaten 2,50 pro kg", "Zwiebeln 1,20"]);
    }

    #[test]
    fn test_empty_parts_dropped() {
        let segments = segmenter().split_on_delimiters(",, Salz ,");
        assert_eq!(segments, vec!["Salz"]);
    }

    #[test]
    fn test_pauses() {
        let segments = segmenter().split_on_pauses("Tomaten 2 Euro ... Zwiebeln 1 Euro . Salz");
        assert_eq!(segments, vec!["Tomaten 2 Euro", "Zwiebeln 1 Euro", "Salz"]);
        assert_eq!(segmenter().split_on_pauses("Zwiebeln 1.20").len(), 1);
    }

    #[test]
    fn test_price_boundaries() {
        let segments = segmenter().split_on_price_boundaries("avocados 2 euro tomatoes 1.20");
        assert_eq!(segments, vec!["avocados 2 euro", "tomatoes 1.20"]);
    }

    #[test]
    fn test_price_boundary_uses_longest_match() {
        let segments =
            segmenter().split_on_price_boundaries("Zwiebel 0.80 pro Kilo Tomaten 3 Euro");
        assert_eq!(segments, vec!["Zwiebel 0.80 pro Kilo", "Tomaten 3 Euro"]);
    }

    #[test]
    fn test_overlapping_price_phrases_merged() {
        let text = "Basilikum für 3 Euro Tomaten für 2 Euro";
        assert_eq!(
            segmenter().split_on_price_boundaries(text),
            vec!["Basilikum für 3 Euro", "Tomaten für 2 Euro"]
        );
    }

    #[test]
    fn test_price_spans() {
        let text = "Basilikum für 3 Euro";
        let prices = PriceExtractor::new().extract_prices(text);
        assert_eq!(prices.len(), 2); // "für 3" and "3 Euro"
        assert_eq!(price_spans(&prices), vec![(10, text.len())]);
    }

    #[test]
    fn test_price_at_start_is_not_a_boundary() {
        let segments = segmenter().split_on_price_boundaries("2 euro avocados");
        assert_eq!(segments, vec!["2 euro avocados"]);
    }

    #[test]
    fn test_keywords_only_for_long_text() {
        let short = "tomatoes 2 euro 3 onions";
        assert_eq!(segmenter().split_on_keywords(short), vec![short.to_string()]);
    }

    #[test]
    fn test_keyword_boundary() {
        let text = "tomatoes 2 euro 3 onions from the market this morning 1 euro";
        assert!(text.len() > 50);
        // No word directly follows either price, so the price heuristic cannot split
        assert_eq!(segmenter().split_on_price_boundaries(text).len(), 1);
        assert_eq!(
            segmenter().split_on_keywords(text),
            vec!["tomatoes 2 euro", "3 onions from the market this morning 1 euro"]
        );
    }

    #[test]
    fn test_tokenize() {
        assert_eq!(tokenize(" ab  c "), vec![(1, 3), (5, 6)]);
    }
}
