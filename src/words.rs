use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

/// Terms shown per cloud.
pub const MAX_WORDS: usize = 50;

static WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z][A-Za-z']*[A-Za-z]").expect("valid word regex"));

const STOPWORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "also", "am", "an", "and", "any",
    "are", "as", "at", "be", "because", "been", "before", "being", "below", "between", "both",
    "but", "by", "can", "could", "did", "do", "does", "doing", "down", "during", "each", "else",
    "ever", "few", "for", "from", "further", "get", "had", "has", "have", "having", "he", "her",
    "here", "hers", "herself", "him", "himself", "his", "how", "however", "i", "if", "in", "into",
    "is", "it", "it's", "its", "itself", "just", "me", "more", "most", "my", "myself", "of", "off",
    "on", "once", "only", "or", "other", "otherwise", "ought", "our", "ours", "ourselves", "out",
    "over", "own", "same", "shall", "she", "should", "since", "so", "some", "such", "than", "that",
    "the", "their", "theirs", "them", "themselves", "then", "there", "these", "they", "this",
    "those", "through", "to", "too", "under", "until", "up", "very", "was", "we", "were", "what",
    "when", "where", "which", "while", "who", "whom", "why", "with", "would", "you", "your",
    "yours", "yourself", "yourselves",
];

static STOPWORD_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| STOPWORDS.iter().copied().collect());

/// Most frequent non-stopword terms across `texts`, highest count first and
/// alphabetical within a count.
pub fn top_terms<'a, I>(texts: I, limit: usize) -> Vec<(String, usize)>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts: HashMap<String, usize> = HashMap::new();
    for text in texts {
        for m in WORD_RE.find_iter(text) {
            let word = m.as_str().to_lowercase();
            if STOPWORD_SET.contains(word.as_str()) {
                continue;
            }
            *counts.entry(word).or_insert(0) += 1;
        }
    }

    let mut terms: Vec<(String, usize)> = counts.into_iter().collect();
    terms.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    terms.truncate(limit);
    terms
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_terms_ordering() {
        let texts = ["Great team, great pay", "Pay is fair", "Team spirit"];
        let terms = top_terms(texts.iter().copied(), 10);
        assert_eq!(
            terms,
            vec![
                ("great".to_string(), 2),
                ("pay".to_string(), 2),
                ("team".to_string(), 2),
                ("fair".to_string(), 1),
                ("spirit".to_string(), 1),
            ]
        );
    }

    #[test]
    fn test_stopwords_and_short_tokens_skipped() {
        let terms = top_terms(["It is a 9 to 5 and I like it"].into_iter(), 10);
        assert_eq!(terms, vec![("like".to_string(), 1)]);
    }

    #[test]
    fn test_limit() {
        let text = "alpha beta gamma delta epsilon";
        assert_eq!(top_terms([text].into_iter(), 2).len(), 2);
        assert!(top_terms(std::iter::empty(), MAX_WORDS).is_empty());
    }
}
