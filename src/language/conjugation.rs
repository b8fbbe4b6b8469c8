//! Japanese conjugation normalizer.
//!
//! Rewrites an inflected token to an approximate dictionary form using an
//! ordered suffix-rule table: most specific rules first, first match wins,
//! no backtracking. Covers passive, する compounds, copula forms, a table of
//! literal irregulars, and the godan/ichidan progressive, past, potential,
//! polite and -te families. Godan families that collapse several verb
//! classes onto one suffix (って, んで) disambiguate by inspecting the final
//! mora of the stem.
//!
//! Total function: anything unmatched is returned unchanged. The covered
//! conjugation set is closed, so applying the rewrite twice is a no-op.

/// Stems whose って/った forms resolve to a つ verb (立つ, 持つ, 待つ...).
const SOKUON_TSU_STEMS: &[char] = &['立', '持', '待', '勝', '打'];
/// Stems whose って/った forms resolve to a る verb (乗る, 帰る, 走る...).
const SOKUON_RU_STEMS: &[char] = &['乗', '帰', '走', '作', '入', '座', '取', '戻', '終'];
/// Stems whose んで/んだ forms resolve to a ぶ verb (運ぶ, 遊ぶ, 学ぶ...).
const NASAL_BU_STEMS: &[char] = &['運', '遊', '呼', '飛', '学', '選', '並', '喜'];

/// Whole-token irregular verbs that the suffix rules would mangle.
const IRREGULAR_VERBS: &[(&str, &str)] = &[
    ("行った", "行く"),
    ("行って", "行く"),
    ("いった", "いく"),
    ("いって", "いく"),
    ("来た", "来る"),
    ("来て", "来る"),
    ("来ます", "来る"),
    ("来ました", "来る"),
    ("きた", "くる"),
    ("きて", "くる"),
    ("きます", "くる"),
    ("あった", "ある"),
    ("あって", "ある"),
    ("いた", "いる"),
    ("いて", "いる"),
    ("います", "いる"),
    ("いました", "いる"),
    ("なった", "なる"),
    ("なって", "なる"),
];

/// Irregular adverb forms mapped back to their adjective.
const IRREGULAR_ADVERBS: &[(&str, &str)] = &[
    ("よく", "よい"),
    ("早く", "早い"),
    ("速く", "速い"),
    ("遅く", "遅い"),
    ("多く", "多い"),
    ("近く", "近い"),
    ("遠く", "遠い"),
    ("長く", "長い"),
    ("強く", "強い"),
    ("うまく", "うまい"),
];

/// Normalize one token to its approximate dictionary form.
///
/// Rules are evaluated in specificity order; reordering them changes
/// behavior, so additions belong next to the family they extend.
pub fn normalize_token(token: &str) -> String {
    rule_passive(token)
        .or_else(|| rule_suru(token))
        .or_else(|| rule_copula_past_negative(token))
        .or_else(|| rule_irregular(token))
        .or_else(|| rule_godan_progressive(token))
        .or_else(|| rule_ichidan_progressive(token))
        .or_else(|| rule_godan_past(token))
        .or_else(|| rule_ichidan_past(token))
        .or_else(|| rule_potential(token))
        .or_else(|| rule_godan_polite(token))
        .or_else(|| rule_ichidan_polite(token))
        .or_else(|| rule_godan_te(token))
        .or_else(|| rule_ichidan_te(token))
        .or_else(|| rule_adjective(token))
        .or_else(|| rule_copula(token))
        .unwrap_or_else(|| token.to_string())
}

fn stem_last(stem: &str) -> Option<char> {
    stem.chars().last()
}

/// Dictionary ending for a godan stem conjugating with っ (買って, 立って, 乗って).
fn sokuon_base(stem: &str) -> &'static str {
    match stem_last(stem) {
        Some(c) if SOKUON_TSU_STEMS.contains(&c) => "つ",
        Some(c) if SOKUON_RU_STEMS.contains(&c) => "る",
        _ => "う",
    }
}

/// Dictionary ending for a godan stem conjugating with ん (読んで, 運んで).
fn nasal_base(stem: &str) -> &'static str {
    match stem_last(stem) {
        Some(c) if NASAL_BU_STEMS.contains(&c) => "ぶ",
        _ => "む",
    }
}

/// Drop the final char of `stem` and append `base`.
fn swap_final(stem: &str, base: &str) -> Option<String> {
    let last = stem_last(stem)?;
    let cut = stem.len() - last.len_utf8();
    Some(format!("{}{}", &stem[..cut], base))
}

// (1) Passive voice, including its polite and progressive chains.
fn rule_passive(token: &str) -> Option<String> {
    for suffix in ["されています", "されました", "されます", "される"] {
        if let Some(stem) = token.strip_suffix(suffix) {
            return Some(format!("{stem}する"));
        }
    }
    for suffix in ["られています", "られました", "られます", "られる"] {
        if let Some(stem) = token.strip_suffix(suffix) {
            if !stem.is_empty() {
                return Some(format!("{stem}る"));
            }
        }
    }
    None
}

// (2) する-compound conjugations. The plain past した is guarded against
// polite-past tails (読みました), which belong to the polite rules.
fn rule_suru(token: &str) -> Option<String> {
    for suffix in ["しています", "しました", "します", "して"] {
        if let Some(stem) = token.strip_suffix(suffix) {
            if stem.ends_with('ま') {
                return None;
            }
            return Some(format!("{stem}する"));
        }
    }
    if let Some(stem) = token.strip_suffix("した") {
        if !stem.ends_with('ま') {
            return Some(format!("{stem}する"));
        }
    }
    None
}

// (3) Copula / na-adjective past and negative forms.
fn rule_copula_past_negative(token: &str) -> Option<String> {
    for suffix in ["ではなかった", "じゃなかった", "ではない", "じゃない", "だった", "でした"] {
        if let Some(stem) = token.strip_suffix(suffix) {
            return Some(format!("{stem}だ"));
        }
    }
    None
}

// (4) Literal irregular table.
fn rule_irregular(token: &str) -> Option<String> {
    IRREGULAR_VERBS
        .iter()
        .find(|(surface, _)| *surface == token)
        .map(|(_, base)| base.to_string())
}

// (5) Godan progressive, keyed by the mora closing the stem.
fn rule_godan_progressive(token: &str) -> Option<String> {
    if let Some(stem) = token.strip_suffix("っています") {
        if !stem.is_empty() {
            return Some(format!("{stem}{}", sokuon_base(stem)));
        }
    }
    if let Some(stem) = token.strip_suffix("んでいます") {
        if !stem.is_empty() {
            return Some(format!("{stem}{}", nasal_base(stem)));
        }
    }
    if let Some(stem) = token.strip_suffix("いでいます") {
        if !stem.is_empty() {
            return Some(format!("{stem}ぐ"));
        }
    }
    if let Some(stem) = token.strip_suffix("いています") {
        if !stem.is_empty() {
            return Some(format!("{stem}く"));
        }
    }
    // しています belongs to the する rule, which fires earlier.
    None
}

// (6) Generic ichidan progressive.
fn rule_ichidan_progressive(token: &str) -> Option<String> {
    let stem = token.strip_suffix("ています")?;
    if stem.is_empty() {
        return None;
    }
    Some(format!("{stem}る"))
}

// (7) Godan past, same mora keying as the progressive. った with a か stem
// is an adjective past (高かった), handed to the adjective rule.
fn rule_godan_past(token: &str) -> Option<String> {
    if let Some(stem) = token.strip_suffix("った") {
        if !stem.is_empty() && !stem.ends_with('か') {
            return Some(format!("{stem}{}", sokuon_base(stem)));
        }
    }
    if let Some(stem) = token.strip_suffix("んだ") {
        if !stem.is_empty() {
            return Some(format!("{stem}{}", nasal_base(stem)));
        }
    }
    if let Some(stem) = token.strip_suffix("いだ") {
        if !stem.is_empty() {
            return Some(format!("{stem}ぐ"));
        }
    }
    if let Some(stem) = token.strip_suffix("いた") {
        if !stem.is_empty() {
            return Some(format!("{stem}く"));
        }
    }
    None
}

// (8) Generic ichidan past. Stems closing on し/っ/ん carry suffixes owned
// by earlier or later rules and fall through untouched.
fn rule_ichidan_past(token: &str) -> Option<String> {
    let stem = token.strip_suffix("た")?;
    match stem_last(stem) {
        Some('し') | Some('っ') | Some('ん') | None => None,
        Some(_) => Some(format!("{stem}る")),
    }
}

// (9) Potential forms: 〜できる compounds and the colloquial ら-dropped 〜れる.
fn rule_potential(token: &str) -> Option<String> {
    if let Some(stem) = token.strip_suffix("できる") {
        if !stem.is_empty() {
            return Some(format!("{stem}する"));
        }
    }
    if let Some(stem) = token.strip_suffix("れる") {
        if !stem.is_empty() {
            return Some(format!("{stem}る"));
        }
    }
    None
}

/// う-row base for a godan polite stem mora (読み → む).
fn polite_mora_base(c: char) -> Option<&'static str> {
    Some(match c {
        'い' => "う",
        'き' => "く",
        'ぎ' => "ぐ",
        'し' => "す",
        'ち' => "つ",
        'に' => "ぬ",
        'び' => "ぶ",
        'み' => "む",
        'り' => "る",
        _ => return None,
    })
}

// (10) Godan polite forms, keyed by the mora in front of ます/ました.
fn rule_godan_polite(token: &str) -> Option<String> {
    for suffix in ["ました", "ます"] {
        if let Some(stem) = token.strip_suffix(suffix) {
            let last = stem_last(stem)?;
            let base = polite_mora_base(last)?;
            return swap_final(stem, base);
        }
    }
    None
}

// (11) Generic ichidan polite.
fn rule_ichidan_polite(token: &str) -> Option<String> {
    for suffix in ["ました", "ます"] {
        if let Some(stem) = token.strip_suffix(suffix) {
            if !stem.is_empty() {
                return Some(format!("{stem}る"));
            }
        }
    }
    None
}

// (12) Godan -te forms, same stem disambiguation as the past tense.
fn rule_godan_te(token: &str) -> Option<String> {
    if let Some(stem) = token.strip_suffix("って") {
        if !stem.is_empty() {
            return Some(format!("{stem}{}", sokuon_base(stem)));
        }
    }
    if let Some(stem) = token.strip_suffix("んで") {
        if !stem.is_empty() {
            return Some(format!("{stem}{}", nasal_base(stem)));
        }
    }
    if let Some(stem) = token.strip_suffix("いで") {
        if !stem.is_empty() {
            return Some(format!("{stem}ぐ"));
        }
    }
    if let Some(stem) = token.strip_suffix("いて") {
        if !stem.is_empty() {
            return Some(format!("{stem}く"));
        }
    }
    None
}

// (13) Generic ichidan -te form.
fn rule_ichidan_te(token: &str) -> Option<String> {
    let stem = token.strip_suffix("て")?;
    match stem_last(stem) {
        Some('し') | Some('っ') | Some('ん') | None => None,
        Some(_) => Some(format!("{stem}る")),
    }
}

// (14) い-adjective past/negative plus the literal adverb table.
fn rule_adjective(token: &str) -> Option<String> {
    for suffix in ["くなかった", "くありません", "くない", "かった"] {
        if let Some(stem) = token.strip_suffix(suffix) {
            if !stem.is_empty() {
                return Some(format!("{stem}い"));
            }
        }
    }
    IRREGULAR_ADVERBS
        .iter()
        .find(|(surface, _)| *surface == token)
        .map(|(_, base)| base.to_string())
}

// (15) Copula forms.
fn rule_copula(token: &str) -> Option<String> {
    for suffix in ["でしょう", "である", "です"] {
        if let Some(stem) = token.strip_suffix(suffix) {
            return Some(format!("{stem}だ"));
        }
    }
    None
}
