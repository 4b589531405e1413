//! Pattern-based intent classification for organic mentions.
//!
//! Complements the extracted clusters with a cheap, deterministic read of what
//! posters are doing: asking, complaining, requesting or showing off.

use regex::{Regex, RegexSet};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::OnceLock;

use crate::Mention;

const PAIN_PATTERNS: &[&str] = &[
    r"(?i)\b(struggle|struggling|difficult|hard to|can't|cannot|unable to)\b",
    r"(?i)\b(frustrated|frustrating|annoying|annoyed|hate|hating)\b",
    r"(?i)\b(problem|issue|bug|broken|doesn't work|not working)\b",
    r"(?i)\b(wish there was|if only|would be nice if)\b",
    r"(?i)\b(tired of|sick of|fed up with)\b",
    r"(?i)\b(waste of time|time consuming|takes forever)\b",
    r"(?i)\b(expensive|overpriced|costs too much|can't afford)\b",
    r"(?i)\b(complicated|confusing|complex|overwhelming)\b",
];

const QUESTION_PATTERNS: &[&str] = &[
    r"(?i)\b(how do i|how can i|how to|what's the best way)\b",
    r"(?i)\b(anyone know|does anyone|has anyone)\b",
    r"(?i)\b(looking for|searching for|need help with|need a)\b",
    r"(?i)\b(recommend|suggestion|advice|tips)\b",
    r"(?i)\b(alternative to|replacement for|instead of)\b",
    r"(?i)\b(is there a|are there any)\b",
    r"\?\s*$",
];

const REQUEST_PATTERNS: &[&str] = &[
    r"(?i)\b(wish|want|need|require|would love)\b",
    r"(?i)\b(should have|must have|needs to have)\b",
    r"(?i)\b(feature request|suggestion|idea)\b",
    r"(?i)\b(please add|can you add|would be great if)\b",
];

const SOLUTION_PATTERNS: &[&str] = &[
    r"(?i)\b(i use|i'm using|we use|currently using)\b",
    r"(?i)\b(switched to|moved to|migrated to)\b",
    r"(?i)\b(recommend|love|great tool|best tool)\b",
    r"(?i)\b(solved by|fixed by|helped by)\b",
];

const BELIEF_PATTERNS: &[&str] = &[
    r"(?i)\b(i think|i believe|in my opinion|imo|imho)\b",
    r"(?i)\b(the problem is|the issue is|the truth is)\b",
    r"(?i)\b(people don't realize|most people think)\b",
    r"(?i)\b(the best approach|the right way|should be)\b",
];

const THEME_STOPWORDS: &[&str] = &[
    "the", "and", "but", "for", "with", "from", "are", "was", "were", "been", "being", "have",
    "has", "had", "does", "did", "will", "would", "could", "should", "may", "might", "must",
    "can", "this", "that", "these", "those", "you", "she", "they", "your", "his", "her", "its",
    "our", "their", "what", "which", "who", "when", "where", "why", "how", "all", "each",
    "every", "both", "few", "more", "most", "other", "some", "such", "not", "only", "same",
    "than", "too", "very", "just", "also", "now", "here", "there", "about", "into", "over",
    "after", "before", "down", "out", "off", "then", "else", "because", "until", "while",
    "during", "through", "again", "once", "any", "get", "got", "like", "know", "think", "want",
    "need", "use", "using", "used", "new", "first", "last", "one", "two", "way", "even", "well",
    "back", "still", "going", "make", "made", "anyone", "someone", "everyone", "something",
    "anything", "everything", "really", "much", "many", "dont", "ive",
];

const SHOWCASE_MARKERS: &[&str] = &["i made", "i built", "i created", "check out", "showcase"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MentionIntent {
    Question,
    Complaint,
    Request,
    Showcase,
    Discussion,
}

impl MentionIntent {
    pub fn label(self) -> &'static str {
        match self {
            MentionIntent::Question => "question",
            MentionIntent::Complaint => "complaint",
            MentionIntent::Request => "request",
            MentionIntent::Showcase => "showcase",
            MentionIntent::Discussion => "discussion",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct IntentBreakdown {
    pub question: usize,
    pub complaint: usize,
    pub request: usize,
    pub showcase: usize,
    pub discussion: usize,
}

impl IntentBreakdown {
    pub fn total(&self) -> usize {
        self.question + self.complaint + self.request + self.showcase + self.discussion
    }

    fn record(&mut self, intent: MentionIntent) {
        match intent {
            MentionIntent::Question => self.question += 1,
            MentionIntent::Complaint => self.complaint += 1,
            MentionIntent::Request => self.request += 1,
            MentionIntent::Showcase => self.showcase += 1,
            MentionIntent::Discussion => self.discussion += 1,
        }
    }
}

struct Patterns {
    pain: RegexSet,
    question: RegexSet,
    request: RegexSet,
    solution: RegexSet,
    belief: RegexSet,
    sentence_break: Regex,
    theme_word: Regex,
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| Patterns {
        pain: RegexSet::new(PAIN_PATTERNS).expect("pain patterns compile"),
        question: RegexSet::new(QUESTION_PATTERNS).expect("question patterns compile"),
        request: RegexSet::new(REQUEST_PATTERNS).expect("request patterns compile"),
        solution: RegexSet::new(SOLUTION_PATTERNS).expect("solution patterns compile"),
        belief: RegexSet::new(BELIEF_PATTERNS).expect("belief patterns compile"),
        sentence_break: Regex::new(r"[.!?\n]").expect("sentence pattern compiles"),
        theme_word: Regex::new(r"\b[a-z]{3,}\b").expect("theme pattern compiles"),
    })
}

/// Classifies by title first; the body is only consulted when the title is neutral.
pub fn classify_mention(mention: &Mention) -> MentionIntent {
    let title_intent = classify_text(&mention.title);
    if title_intent != MentionIntent::Discussion || mention.body.trim().is_empty() {
        return title_intent;
    }
    match classify_text(&mention.body) {
        // A showcase marker buried in a body is usually a quote, not the poster's intent.
        MentionIntent::Showcase => MentionIntent::Discussion,
        intent => intent,
    }
}

pub fn classify_text(text: &str) -> MentionIntent {
    let patterns = patterns();
    let lowered = text.to_lowercase();

    if lowered.contains('?') || patterns.question.is_match(&lowered) {
        MentionIntent::Question
    } else if patterns.pain.is_match(&lowered) {
        MentionIntent::Complaint
    } else if patterns.request.is_match(&lowered) {
        MentionIntent::Request
    } else if SHOWCASE_MARKERS.iter().any(|marker| lowered.contains(marker)) {
        MentionIntent::Showcase
    } else {
        MentionIntent::Discussion
    }
}

pub fn intent_breakdown(mentions: &[Mention]) -> IntentBreakdown {
    let mut breakdown = IntentBreakdown::default();
    for mention in mentions {
        breakdown.record(classify_mention(mention));
    }
    breakdown
}

/// Sentence-level insights pulled from one or more mentions, in order of appearance.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Insights {
    pub pain_points: Vec<String>,
    pub questions: Vec<String>,
    pub requests: Vec<String>,
    pub solutions: Vec<String>,
    pub beliefs: Vec<String>,
}

impl Insights {
    pub fn is_empty(&self) -> bool {
        self.pain_points.is_empty()
            && self.questions.is_empty()
            && self.requests.is_empty()
            && self.solutions.is_empty()
            && self.beliefs.is_empty()
    }

    pub fn extend(&mut self, other: Insights) {
        self.pain_points.extend(other.pain_points);
        self.questions.extend(other.questions);
        self.requests.extend(other.requests);
        self.solutions.extend(other.solutions);
        self.beliefs.extend(other.beliefs);
    }
}

/// Sentences from title and body that match a pain pattern, in order of appearance.
pub fn extract_pain_points(mention: &Mention) -> Vec<String> {
    matching_sentences(&full_text(mention), &patterns().pain)
}

/// Splits title and body into sentences and files each one under every category it matches.
pub fn extract_insights(mention: &Mention) -> Insights {
    let patterns = patterns();
    let text = full_text(mention);
    Insights {
        pain_points: matching_sentences(&text, &patterns.pain),
        questions: matching_sentences(&text, &patterns.question),
        requests: matching_sentences(&text, &patterns.request),
        solutions: matching_sentences(&text, &patterns.solution),
        beliefs: matching_sentences(&text, &patterns.belief),
    }
}

pub fn collect_insights(mentions: &[Mention]) -> Insights {
    let mut insights = Insights::default();
    for mention in mentions {
        insights.extend(extract_insights(mention));
    }
    insights
}

/// Most frequent title keywords (three letters or more, stopwords removed).
/// Ties keep the order in which the words were first seen.
pub fn common_themes(mentions: &[Mention], top_n: usize) -> Vec<(String, usize)> {
    let patterns = patterns();
    let mut counts: Vec<(String, usize)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for mention in mentions {
        let title = mention.title.to_lowercase();
        for word in patterns.theme_word.find_iter(&title).map(|m| m.as_str()) {
            if THEME_STOPWORDS.contains(&word) {
                continue;
            }
            let slot = *index.entry(word.to_string()).or_insert_with(|| {
                counts.push((word.to_string(), 0));
                counts.len() - 1
            });
            counts[slot].1 += 1;
        }
    }

    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.truncate(top_n);
    counts
}

fn full_text(mention: &Mention) -> String {
    if mention.body.trim().is_empty() {
        mention.title.clone()
    } else {
        format!("{}. {}", mention.title, mention.body)
    }
}

fn matching_sentences(text: &str, set: &RegexSet) -> Vec<String> {
    patterns()
        .sentence_break
        .split(text)
        .map(str::trim)
        .filter(|sentence| !sentence.is_empty() && set.is_match(sentence))
        .map(str::to_string)
        .collect()
}
