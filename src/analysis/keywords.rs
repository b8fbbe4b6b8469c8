//! Keyword/topic extraction — a weighted frequency table over a bilingual
//! token stream.
//!
//! Japanese tokens contribute through two paths: whole-token normalization
//! (strong weight when the rewrite finds a dictionary form) and particle
//! segmentation (weaker weight for each content segment). Latin tokens
//! contribute their lowercase form. Two whole-text scans add technical
//! identifiers and acronyms at low weight. Weights accumulate by addition in
//! an insertion-ordered map so equal-weight terms keep first-seen order.

use indexmap::IndexMap;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::config::KeywordConfig;
use crate::constants::*;
use crate::language::script::{has_japanese, has_kanji, is_all_katakana, Language};
use crate::language::{clean_text, detect_language, normalize_token, tokenize_text};

/// Characters that act as particles inside an unsegmented Japanese token.
const PARTICLE_CHARS: &[char] = &['の', 'に', 'を', 'は', 'が', 'で', 'と', 'も', 'や', 'へ'];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordAnalysis {
    /// Keywords ordered by descending accumulated weight, first-seen on ties.
    pub keywords: Vec<String>,
    /// Term to accumulated weight, in first-seen order.
    pub weights: IndexMap<String, f64>,
    pub language: Language,
}

impl KeywordAnalysis {
    /// Weight of `term` relative to the heaviest term, in [0,1].
    pub fn relevance(&self, term: &str) -> f64 {
        let max = self.weights.values().cloned().fold(0.0_f64, f64::max);
        if max <= 0.0 {
            return 0.0;
        }
        self.weights.get(term).copied().unwrap_or(0.0) / max
    }
}

/// Extract weighted keywords from one message text (or a whole thread's
/// concatenated text).
pub fn extract_keywords(text: &str, cfg: &KeywordConfig) -> KeywordAnalysis {
    let language = detect_language(text);
    let cleaned = clean_text(text);
    let mut weights: IndexMap<String, f64> = IndexMap::new();

    for token in tokenize_text(&cleaned) {
        if token.chars().count() < cfg.min_word_length {
            continue;
        }
        if has_japanese(&token) {
            record_japanese_token(&token, cfg, &mut weights);
        } else {
            record_latin_token(&token, cfg, &mut weights);
        }
    }

    record_text_patterns(&cleaned, cfg, &mut weights);

    let mut ranked: Vec<(String, f64)> =
        weights.iter().map(|(k, v)| (k.clone(), *v)).collect();
    // stable sort: ties keep insertion (first-seen) order
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    let keywords: Vec<String> =
        ranked.into_iter().take(cfg.max_topics).map(|(k, _)| k).collect();

    tracing::debug!(
        tokens = weights.len(),
        keywords = keywords.len(),
        language = language.as_str(),
        "Keyword extraction complete"
    );

    KeywordAnalysis { keywords, weights, language }
}

fn add(weights: &mut IndexMap<String, f64>, term: String, weight: f64) {
    *weights.entry(term).or_insert(0.0) += weight;
}

/// Bonus weight for the preferred scripts.
fn script_bonus(term: &str, cfg: &KeywordConfig) -> f64 {
    let mut bonus = 0.0;
    if cfg.prefer_kanji && has_kanji(term) {
        bonus += KANJI_BONUS;
    }
    if cfg.prefer_katakana && is_all_katakana(term) {
        bonus += KATAKANA_BONUS;
    }
    bonus
}

/// Kanji-bearing or pure-Katakana terms are topical; bare hiragana usually
/// is not.
fn qualifies(term: &str) -> bool {
    has_kanji(term) || is_all_katakana(term)
}

fn record_japanese_token(token: &str, cfg: &KeywordConfig, weights: &mut IndexMap<String, f64>) {
    let stop = &cfg.japanese_stopwords;
    let normalized = normalize_token(token);

    // (a) whole-token normalization
    let mut recorded: Option<String> = None;
    if normalized != token {
        if !stop.contains(&normalized) && qualifies(&normalized) {
            add(weights, normalized.clone(), WEIGHT_NORMALIZED + script_bonus(&normalized, cfg));
            recorded = Some(normalized);
        }
    } else if !stop.contains(token) && qualifies(token) {
        add(weights, token.to_string(), WEIGHT_UNCHANGED + script_bonus(token, cfg));
        recorded = Some(token.to_string());
    }

    // (b) particle segmentation of the raw token
    for segment in token.split(|c: char| PARTICLE_CHARS.contains(&c)) {
        if segment.is_empty() {
            continue;
        }
        let min_len = if qualifies(segment) { cfg.min_word_length } else { MIN_KANA_SEGMENT_LENGTH };
        if segment.chars().count() < min_len {
            continue;
        }
        if stop.contains(segment) {
            continue;
        }
        let base = normalize_token(segment);
        if stop.contains(&base) || recorded.as_deref() == Some(base.as_str()) {
            continue;
        }
        let bonus = script_bonus(&base, cfg);
        add(weights, base, WEIGHT_SEGMENT + bonus);
    }
}

fn record_latin_token(token: &str, cfg: &KeywordConfig, weights: &mut IndexMap<String, f64>) {
    let word = token
        .trim_matches(|c: char| !c.is_alphanumeric())
        .to_lowercase();
    if word.chars().count() > 3 && !cfg.english_stopwords.contains(&word) {
        add(weights, word, WEIGHT_LATIN);
    }
}

/// Whole-text scans: technical identifiers (deploy-v2, user_id) and acronyms.
fn record_text_patterns(cleaned: &str, cfg: &KeywordConfig, weights: &mut IndexMap<String, f64>) {
    let re_identifier = Regex::new(r"\b[a-zA-Z][a-zA-Z0-9_-]{4,}\b").unwrap();
    let re_acronym = Regex::new(r"\b[A-Z]{2,}\b").unwrap();

    for re in [&re_identifier, &re_acronym] {
        for m in re.find_iter(cleaned) {
            let term = m.as_str().to_lowercase();
            if term.chars().count() <= MAX_IDENTIFIER_LENGTH
                && !cfg.english_stopwords.contains(&term)
            {
                add(weights, term, WEIGHT_PATTERN);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> KeywordConfig {
        KeywordConfig::default()
    }

    #[test]
    fn test_english_frequency_and_order() {
        let analysis = extract_keywords("food food food test test", &cfg());
        assert_eq!(analysis.keywords, vec!["food", "test"]);
        assert_eq!(analysis.weights["food"], 3.0);
        assert_eq!(analysis.weights["test"], 2.0);
        assert_eq!(analysis.language, Language::English);
    }

    #[test]
    fn test_short_and_stopword_english_tokens_dropped() {
        let analysis = extract_keywords("the and is a cat ran", &cfg());
        assert!(analysis.keywords.is_empty());
    }

    #[test]
    fn test_japanese_normalized_token_weight() {
        // 会議を確認しました normalizes as a whole and also yields particle
        // segments 会議 / 確認しました → 確認する.
        let analysis = extract_keywords("会議を確認しました", &cfg());
        assert_eq!(analysis.weights["会議を確認する"], 2.5);
        assert_eq!(analysis.weights["会議"], 1.5);
        assert_eq!(analysis.weights["確認する"], 1.5);
        assert_eq!(analysis.language, Language::Japanese);
    }

    #[test]
    fn test_katakana_segment_weight() {
        let analysis = extract_keywords("サーバーをデプロイしました", &cfg());
        assert_eq!(analysis.weights["サーバー"], 1.5);
        assert_eq!(analysis.weights["デプロイする"], 1.0);
    }

    #[test]
    fn test_identifier_and_acronym_patterns() {
        let analysis = extract_keywords("check deploy-v2 via API and HTTPS", &cfg());
        // token weight 1.0 plus identifier-pattern weight 0.5
        assert!((analysis.weights["deploy-v2"] - 1.5).abs() < 1e-9);
        // HTTPS: token, identifier scan, and acronym scan all contribute
        assert!((analysis.weights["https"] - 2.0).abs() < 1e-9);
        // API is too short for the token path, the acronym scan catches it
        assert!((analysis.weights["api"] - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_max_topics_bound_and_relevance_range() {
        let text = (0..40).map(|i| format!("word{i:02}x")).collect::<Vec<_>>().join(" ");
        let mut config = cfg();
        config.max_topics = 10;
        let analysis = extract_keywords(&text, &config);
        assert!(analysis.keywords.len() <= 10);
        for kw in &analysis.keywords {
            let r = analysis.relevance(kw);
            assert!((0.0..=1.0).contains(&r), "relevance out of range: {r}");
        }
    }

    #[test]
    fn test_empty_text() {
        let analysis = extract_keywords("", &cfg());
        assert!(analysis.keywords.is_empty());
        assert_eq!(analysis.language, Language::Mixed);
        assert_eq!(analysis.relevance("anything"), 0.0);
    }

    #[test]
    fn test_weights_accumulate_across_mentions() {
        let analysis = extract_keywords("バグを修正した バグを修正した", &cfg());
        // each occurrence re-normalizes and re-accumulates
        assert_eq!(analysis.weights["バグを修正する"], 5.0);
        assert_eq!(analysis.weights["修正する"], 3.0);
    }
}
