//! Built-in valence dictionary for the review analyzer.
//!
//! Values follow the VADER scale: roughly -4.0 (extremely negative) to +4.0
//! (extremely positive). The word list is tuned for employer reviews, so it
//! is much smaller than a general-purpose lexicon.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

const VALENCES: &[(&str, f64)] = &[
    // Emoticons
    (":)", 2.0),
    (":-)", 2.0),
    (":d", 2.3),
    (":(", -1.9),
    (":-(", -1.9),
    // Positive
    ("admire", 2.4),
    ("amazing", 2.8),
    ("appreciate", 1.7),
    ("appreciated", 2.3),
    ("appreciative", 2.6),
    ("awesome", 3.1),
    ("balance", 1.0),
    ("benefit", 2.0),
    ("benefits", 1.6),
    ("best", 3.2),
    ("better", 1.9),
    ("bonus", 2.5),
    ("brilliant", 2.8),
    ("care", 2.2),
    ("caring", 2.2),
    ("celebrate", 2.7),
    ("clean", 1.7),
    ("collaborative", 1.4),
    ("comfortable", 1.5),
    ("competent", 1.3),
    ("competitive", 0.7),
    ("confident", 2.2),
    ("cool", 1.3),
    ("creative", 1.9),
    ("decent", 1.2),
    ("dedicated", 2.0),
    ("delight", 2.9),
    ("easy", 1.9),
    ("encourage", 2.3),
    ("encouraging", 2.4),
    ("energetic", 1.9),
    ("enjoy", 2.2),
    ("enjoyable", 1.9),
    ("enjoyed", 2.3),
    ("excellent", 2.7),
    ("excited", 1.4),
    ("exciting", 2.2),
    ("fair", 1.3),
    ("fantastic", 2.6),
    ("favorite", 2.0),
    ("flexibility", 1.5),
    ("flexible", 1.4),
    ("free", 2.3),
    ("freedom", 3.2),
    ("friendly", 2.2),
    ("fun", 2.3),
    ("generous", 2.3),
    ("glad", 2.0),
    ("good", 1.9),
    ("great", 3.1),
    ("greatest", 3.2),
    ("growth", 1.6),
    ("happy", 2.7),
    ("help", 1.7),
    ("helpful", 1.8),
    ("honest", 2.3),
    ("ideal", 2.4),
    ("impressive", 2.3),
    ("innovative", 1.8),
    ("inspiring", 2.2),
    ("interesting", 1.7),
    ("kind", 2.4),
    ("learn", 1.3),
    ("learning", 1.6),
    ("like", 1.5),
    ("liked", 1.8),
    ("love", 3.2),
    ("loved", 2.9),
    ("lovely", 2.8),
    ("loyal", 2.1),
    ("motivated", 1.6),
    ("nice", 1.8),
    ("ok", 1.2),
    ("okay", 0.9),
    ("opportunities", 1.6),
    ("opportunity", 1.8),
    ("outstanding", 3.0),
    ("perfect", 2.7),
    ("perks", 1.8),
    ("pleasant", 2.3),
    ("positive", 2.6),
    ("pretty", 2.2),
    ("professional", 1.9),
    ("promote", 1.6),
    ("promoted", 1.8),
    ("promotion", 1.8),
    ("proud", 2.1),
    ("recommend", 1.5),
    ("recommended", 1.6),
    ("relaxed", 2.2),
    ("reliable", 1.9),
    ("respect", 2.1),
    ("respected", 2.1),
    ("respectful", 2.0),
    ("reward", 2.1),
    ("rewarding", 2.3),
    ("safe", 1.9),
    ("satisfied", 1.8),
    ("secure", 1.4),
    ("smart", 1.7),
    ("solid", 0.6),
    ("stable", 1.2),
    ("strong", 2.3),
    ("success", 2.7),
    ("successful", 2.8),
    ("super", 2.9),
    ("support", 1.7),
    ("supported", 1.3),
    ("supportive", 2.1),
    ("talented", 2.3),
    ("thank", 1.5),
    ("thanks", 1.9),
    ("thrive", 2.5),
    ("trust", 2.3),
    ("valuable", 2.1),
    ("valued", 1.9),
    ("welcome", 2.0),
    ("welcoming", 1.9),
    ("win", 2.8),
    ("wonderful", 2.7),
    ("worth", 0.9),
    ("yes", 1.7),
    // Negative
    ("abusive", -3.2),
    ("angry", -2.3),
    ("annoying", -1.7),
    ("anxiety", -0.7),
    ("awful", -2.0),
    ("bad", -2.5),
    ("biased", -1.1),
    ("boring", -1.3),
    ("broken", -2.1),
    ("bully", -2.8),
    ("bureaucracy", -1.2),
    ("bureaucratic", -1.2),
    ("burnout", -2.0),
    ("chaos", -2.7),
    ("chaotic", -2.2),
    ("cheap", -0.7),
    ("clueless", -1.5),
    ("confused", -1.3),
    ("confusing", -0.9),
    ("cut", -1.1),
    ("cuts", -1.2),
    ("difficult", -1.5),
    ("disappointed", -1.9),
    ("disappointing", -2.2),
    ("discrimination", -2.2),
    ("disorganized", -1.7),
    ("disrespectful", -2.2),
    ("dysfunctional", -2.2),
    ("exhausted", -1.5),
    ("exhausting", -1.5),
    ("fail", -2.5),
    ("failed", -2.3),
    ("failure", -2.3),
    ("favoritism", -1.5),
    ("fear", -2.2),
    ("fired", -2.6),
    ("frustrated", -2.4),
    ("frustrating", -1.9),
    ("frustration", -2.1),
    ("hard", -0.4),
    ("harassment", -2.5),
    ("hate", -2.7),
    ("hated", -3.2),
    ("horrible", -2.5),
    ("hostile", -2.2),
    ("ignored", -1.3),
    ("incompetent", -2.2),
    ("insecure", -1.8),
    ("lack", -1.3),
    ("lacking", -1.0),
    ("layoff", -1.9),
    ("layoffs", -1.9),
    ("lazy", -1.5),
    ("lie", -1.6),
    ("lies", -1.8),
    ("mess", -1.5),
    ("micromanage", -1.6),
    ("micromanagement", -1.6),
    ("miserable", -2.6),
    ("nightmare", -2.7),
    ("no", -1.2),
    ("negative", -2.7),
    ("overworked", -1.8),
    ("pain", -2.3),
    ("painful", -1.9),
    ("pathetic", -2.7),
    ("poor", -2.1),
    ("poorly", -1.8),
    ("pressure", -1.2),
    ("problem", -1.7),
    ("problems", -1.7),
    ("rude", -2.0),
    ("sad", -2.1),
    ("scary", -2.2),
    ("shame", -2.1),
    ("sick", -2.3),
    ("stress", -1.8),
    ("stressed", -1.4),
    ("stressful", -2.3),
    ("terrible", -2.1),
    ("tired", -1.9),
    ("toxic", -2.4),
    ("turnover", -1.0),
    ("underpaid", -1.6),
    ("unfair", -2.1),
    ("unhappy", -1.8),
    ("unorganized", -1.6),
    ("unprofessional", -1.7),
    ("unstable", -1.5),
    ("unsupportive", -1.6),
    ("upset", -1.6),
    ("useless", -1.8),
    ("waste", -1.8),
    ("wasted", -2.2),
    ("weak", -1.9),
    ("worried", -1.2),
    ("worry", -1.9),
    ("worse", -2.1),
    ("worst", -3.1),
    ("wrong", -2.1),
];

pub const BOOST_INCREMENT: f64 = 0.293;
pub const BOOST_DECREMENT: f64 = -0.293;

const BOOSTERS_UP: &[&str] = &[
    "absolutely", "amazingly", "awfully", "completely", "considerably", "decidedly", "deeply",
    "enormously", "entirely", "especially", "exceptionally", "extremely", "fabulously", "fully",
    "greatly", "highly", "hugely", "incredibly", "intensely", "majorly", "more", "most",
    "particularly", "purely", "quite", "really", "remarkably", "so", "substantially",
    "thoroughly", "totally", "tremendously", "unbelievably", "unusually", "utterly", "very",
];

const BOOSTERS_DOWN: &[&str] = &[
    "almost", "barely", "hardly", "kinda", "less", "little", "marginally", "occasionally",
    "partly", "scarcely", "slightly", "somewhat", "sorta",
];

const NEGATIONS: &[&str] = &[
    "aint", "arent", "cannot", "cant", "couldnt", "darent", "didnt", "doesnt", "ain't", "aren't",
    "can't", "couldn't", "daren't", "didn't", "doesn't", "dont", "hadnt", "hasnt", "havent",
    "isnt", "mightnt", "mustnt", "neither", "don't", "hadn't", "hasn't", "haven't", "isn't",
    "mightn't", "mustn't", "neednt", "needn't", "never", "none", "nope", "nor", "not", "nothing",
    "nowhere", "oughtnt", "shant", "shouldnt", "uhuh", "wasnt", "werent", "oughtn't", "shan't",
    "shouldn't", "uh-uh", "wasn't", "weren't", "without", "wont", "wouldnt", "won't", "wouldn't",
    "rarely", "seldom", "despite",
];

static VALENCE_MAP: LazyLock<HashMap<&'static str, f64>> =
    LazyLock::new(|| VALENCES.iter().copied().collect());

static BOOSTER_MAP: LazyLock<HashMap<&'static str, f64>> = LazyLock::new(|| {
    BOOSTERS_UP
        .iter()
        .map(|w| (*w, BOOST_INCREMENT))
        .chain(BOOSTERS_DOWN.iter().map(|w| (*w, BOOST_DECREMENT)))
        .collect()
});

static NEGATION_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| NEGATIONS.iter().copied().collect());

/// Valence of a lowercased token, if the lexicon knows it.
pub fn valence(word: &str) -> Option<f64> {
    VALENCE_MAP.get(word).copied()
}

/// Booster (positive) or dampener (negative) increment of a lowercased token.
pub fn booster(word: &str) -> Option<f64> {
    BOOSTER_MAP.get(word).copied()
}

pub fn is_negation(word: &str) -> bool {
    NEGATION_SET.contains(word) || word.contains("n't")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        assert_eq!(valence("great"), Some(3.1));
        assert_eq!(valence("terrible"), Some(-2.1));
        assert_eq!(valence("management"), None);
    }

    #[test]
    fn test_valences_within_scale() {
        for (word, v) in VALENCES {
            assert!((-4.0..=4.0).contains(v), "{} out of range", word);
            assert_eq!(*word, word.to_lowercase(), "{} must be lowercase", word);
        }
    }

    #[test]
    fn test_boosters_and_negations() {
        assert_eq!(booster("very"), Some(BOOST_INCREMENT));
        assert_eq!(booster("slightly"), Some(BOOST_DECREMENT));
        assert_eq!(booster("good"), None);
        assert!(is_negation("not"));
        assert!(is_negation("shouldn't"));
        assert!(is_negation("wouldn't've"));
        assert!(!is_negation("nice"));
    }
}
