//! Rule-based compound sentiment scoring (VADER-style) over the built-in
//! lexicon.

use crate::lexicon;

const NEGATION_SCALAR: f64 = -0.74;
const CAPS_INCREMENT: f64 = 0.733;
const NORMALIZATION_ALPHA: f64 = 15.0;
const EXCLAMATION_INCREMENT: f64 = 0.292;
const QUESTION_INCREMENT: f64 = 0.18;

/// Anything that turns review text into a compound score in [-1.0, 1.0].
pub trait SentimentScorer {
    fn score(&self, text: &str) -> f64;
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PolarityScores {
    pub neg: f64,
    pub neu: f64,
    pub pos: f64,
    pub compound: f64,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SentimentAnalyzer;

impl SentimentAnalyzer {
    pub fn new() -> Self {
        Self
    }

    pub fn polarity_scores(&self, text: &str) -> PolarityScores {
        let tokens = tokenize(text);
        let lowered: Vec<String> = tokens.iter().map(|t| t.to_lowercase()).collect();
        let caps_differ = caps_differential(&tokens);

        let mut sentiments = Vec::with_capacity(tokens.len());
        for (i, token) in tokens.iter().enumerate() {
            let lower = lowered[i].as_str();
            if lexicon::booster(lower).is_some() {
                sentiments.push(0.0);
                continue;
            }
            if lower == "kind" && lowered.get(i + 1).is_some_and(|next| next == "of") {
                sentiments.push(0.0);
                continue;
            }
            sentiments.push(token_valence(token, i, &lowered, caps_differ));
        }

        apply_but_contrast(&lowered, &mut sentiments);
        score_valence(&sentiments, text)
    }
}

impl SentimentScorer for SentimentAnalyzer {
    fn score(&self, text: &str) -> f64 {
        self.polarity_scores(text).compound
    }
}

/// Splits on whitespace and strips surrounding punctuation, except for
/// tokens the lexicon knows verbatim (emoticons). One-letter words such as
/// "I" stay in: they count toward the caps differential and the three-word
/// look-back window. Tokens that were only punctuation are dropped.
fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace()
        .filter_map(|raw| {
            if lexicon::valence(&raw.to_lowercase()).is_some() {
                return Some(raw.to_string());
            }
            let stripped = raw.trim_matches(|c: char| c.is_ascii_punctuation());
            if stripped.is_empty() {
                None
            } else {
                Some(stripped.to_string())
            }
        })
        .collect()
}

/// Same rule as Python's `str.isupper`: at least one cased character and no
/// lowercase ones.
fn is_all_caps(token: &str) -> bool {
    token.chars().any(|c| c.is_uppercase()) && !token.chars().any(|c| c.is_lowercase())
}

// Shouting only counts when some, but not all, of the words are in caps.
fn caps_differential(tokens: &[String]) -> bool {
    let caps = tokens.iter().filter(|t| is_all_caps(t)).count();
    caps > 0 && caps < tokens.len()
}

fn token_valence(token: &str, i: usize, lowered: &[String], caps_differ: bool) -> f64 {
    let lower = lowered[i].as_str();
    let Some(base) = lexicon::valence(lower) else {
        return 0.0;
    };
    let mut valence = base;

    // "no" directly in front of another sentiment word is a determiner.
    if lower == "no" && lowered.get(i + 1).is_some_and(|next| lexicon::valence(next).is_some()) {
        valence = 0.0;
    }
    if (i > 0 && lowered[i - 1] == "no")
        || (i > 1 && lowered[i - 2] == "no")
        || (i > 2 && lowered[i - 3] == "no" && matches!(lowered[i - 1].as_str(), "or" | "nor"))
    {
        valence = base * NEGATION_SCALAR;
    }

    if caps_differ && is_all_caps(token) {
        valence += if valence > 0.0 { CAPS_INCREMENT } else { -CAPS_INCREMENT };
    }

    for distance in 0..3 {
        if i <= distance {
            break;
        }
        let prev = &lowered[i - (distance + 1)];
        if lexicon::valence(prev).is_some() {
            continue;
        }
        let mut scalar = booster_scalar(prev, valence, caps_differ);
        if scalar != 0.0 {
            scalar *= match distance {
                1 => 0.95,
                2 => 0.9,
                _ => 1.0,
            };
        }
        valence += scalar;
        valence = negation_check(valence, lowered, distance, i);
    }

    least_check(valence, lowered, i)
}

fn booster_scalar(word: &str, valence: f64, caps_differ: bool) -> f64 {
    let Some(mut scalar) = lexicon::booster(word) else {
        return 0.0;
    };
    if valence < 0.0 {
        scalar = -scalar;
    }
    if caps_differ && is_all_caps(word) {
        scalar += if valence > 0.0 { CAPS_INCREMENT } else { -CAPS_INCREMENT };
    }
    scalar
}

fn negation_check(valence: f64, lowered: &[String], distance: usize, i: usize) -> f64 {
    let so_or_this = |w: &str| w == "so" || w == "this";
    match distance {
        0 if lexicon::is_negation(&lowered[i - 1]) => valence * NEGATION_SCALAR,
        1 => {
            let (two_back, one_back) = (lowered[i - 2].as_str(), lowered[i - 1].as_str());
            if two_back == "never" && so_or_this(one_back) {
                valence * 1.25
            } else if two_back == "without" && one_back == "doubt" {
                valence
            } else if lexicon::is_negation(two_back) {
                valence * NEGATION_SCALAR
            } else {
                valence
            }
        }
        2 => {
            let three_back = lowered[i - 3].as_str();
            let (two_back, one_back) = (lowered[i - 2].as_str(), lowered[i - 1].as_str());
            if three_back == "never" && (so_or_this(two_back) || so_or_this(one_back)) {
                valence * 1.25
            } else if three_back == "without" && (two_back == "doubt" || one_back == "doubt") {
                valence
            } else if lexicon::is_negation(three_back) {
                valence * NEGATION_SCALAR
            } else {
                valence
            }
        }
        _ => valence,
    }
}

// "least X" flips X, "at least X" and "very least X" leave it alone.
fn least_check(valence: f64, lowered: &[String], i: usize) -> f64 {
    if i == 0 || lowered[i - 1] != "least" {
        return valence;
    }
    if i > 1 && matches!(lowered[i - 2].as_str(), "at" | "very") {
        valence
    } else {
        valence * NEGATION_SCALAR
    }
}

fn apply_but_contrast(lowered: &[String], sentiments: &mut [f64]) {
    let Some(but) = lowered.iter().position(|w| w == "but") else {
        return;
    };
    for (idx, s) in sentiments.iter_mut().enumerate() {
        if idx < but {
            *s *= 0.5;
        } else if idx > but {
            *s *= 1.5;
        }
    }
}

fn punctuation_emphasis(text: &str) -> f64 {
    let exclamations = text.matches('!').count().min(4) as f64 * EXCLAMATION_INCREMENT;
    let questions = text.matches('?').count();
    let question_emphasis = match questions {
        0 | 1 => 0.0,
        2 | 3 => questions as f64 * QUESTION_INCREMENT,
        _ => 0.96,
    };
    exclamations + question_emphasis
}

/// Maps an unbounded valence sum into [-1.0, 1.0].
pub fn normalize(score: f64) -> f64 {
    (score / (score * score + NORMALIZATION_ALPHA).sqrt()).clamp(-1.0, 1.0)
}

fn score_valence(sentiments: &[f64], text: &str) -> PolarityScores {
    if sentiments.is_empty() {
        return PolarityScores::default();
    }

    let emphasis = punctuation_emphasis(text);
    let mut sum: f64 = sentiments.iter().sum();
    if sum > 0.0 {
        sum += emphasis;
    } else if sum < 0.0 {
        sum -= emphasis;
    }
    let compound = normalize(sum);

    let mut pos_sum = 0.0;
    let mut neg_sum = 0.0;
    let mut neu_count = 0.0;
    for s in sentiments {
        if *s > 0.0 {
            pos_sum += s + 1.0;
        } else if *s < 0.0 {
            neg_sum += s - 1.0;
        } else {
            neu_count += 1.0;
        }
    }
    if pos_sum > neg_sum.abs() {
        pos_sum += emphasis;
    } else if pos_sum < neg_sum.abs() {
        neg_sum -= emphasis;
    }

    let total = pos_sum + neg_sum.abs() + neu_count;
    PolarityScores {
        neg: (neg_sum / total).abs(),
        neu: (neu_count / total).abs(),
        pos: (pos_sum / total).abs(),
        compound,
    }
}
