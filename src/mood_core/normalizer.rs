//! Text cleanup and tokenization for short social posts

use super::tables::{EMOJI_EMOTIONS, EMOTICONS};
use once_cell::sync::Lazy;
use regex::Regex;

static URL_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"https?://\S+").unwrap());
static MENTION_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"@\w+").unwrap());

static WORD_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\w+").unwrap());

/// Emoticons and emoji anchored at the scan position, longest glyph first
static GLYPH_REGEX: Lazy<Regex> = Lazy::new(|| {
    let mut glyphs: Vec<&str> = EMOTICONS
        .iter()
        .map(|(glyph, _)| *glyph)
        .chain(EMOJI_EMOTIONS.iter().map(|(glyph, _)| *glyph))
        .collect();
    glyphs.sort_by(|a, b| b.len().cmp(&a.len()));

    let alternation = glyphs
        .iter()
        .map(|glyph| regex::escape(glyph))
        .collect::<Vec<_>>()
        .join("|");

    Regex::new(&format!(r"^(?:{})", alternation)).unwrap()
});

/// Output of [`TextNormalizer::normalize`]
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NormalizedText {
    /// Tokens in reading order; words lower-cased, glyphs verbatim
    pub tokens: Vec<String>,
    /// Character directly after each token in the cleaned text, if any
    pub trailing: Vec<Option<char>>,
    /// Uppercase letters / total characters of the original text
    pub caps_ratio: f64,
}

impl NormalizedText {
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

pub struct TextNormalizer;

impl TextNormalizer {
    pub fn new() -> Self {
        Self
    }

    /// Clean and tokenize one raw text
    ///
    /// URLs and `@mentions` are removed, runs of 3+ identical characters are
    /// collapsed to 2, and the remainder is split into tokens. Empty input
    /// yields no tokens.
    pub fn normalize(&self, text: &str) -> NormalizedText {
        let caps_ratio = caps_ratio(text);

        let stripped = URL_REGEX.replace_all(text, " ");
        let stripped = MENTION_REGEX.replace_all(&stripped, " ");
        let collapsed = collapse_repeats(&stripped);

        let (tokens, trailing) = tokenize(&collapsed);

        NormalizedText {
            tokens,
            trailing,
            caps_ratio,
        }
    }
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Glyphs first, then word runs, then punctuation runs
///
/// A punctuation run ends where a glyph starts, so "!:)" yields "!" and ":)".
fn tokenize(text: &str) -> (Vec<String>, Vec<Option<char>>) {
    // (token, byte offset where it ends)
    let mut spans: Vec<(String, usize)> = Vec::new();
    let mut punct_start: Option<usize> = None;
    let mut pos = 0;

    while pos < text.len() {
        let rest = &text[pos..];

        let matched = GLYPH_REGEX
            .find(rest)
            .map(|m| (m.end(), false))
            .or_else(|| WORD_REGEX.find(rest).map(|m| (m.end(), true)));

        if let Some((len, is_word)) = matched {
            if let Some(start) = punct_start.take() {
                spans.push((text[start..pos].to_lowercase(), pos));
            }
            let token = &rest[..len];
            let token = if is_word { token.to_lowercase() } else { token.to_string() };
            pos += len;
            spans.push((token, pos));
            continue;
        }

        let Some(c) = rest.chars().next() else {
            break;
        };
        if c.is_whitespace() {
            if let Some(start) = punct_start.take() {
                spans.push((text[start..pos].to_lowercase(), pos));
            }
        } else if punct_start.is_none() {
            punct_start = Some(pos);
        }
        pos += c.len_utf8();
    }

    if let Some(start) = punct_start {
        spans.push((text[start..].to_lowercase(), text.len()));
    }

    spans
        .into_iter()
        .map(|(token, end)| (token, text[end..].chars().next()))
        .unzip()
}

fn caps_ratio(text: &str) -> f64 {
    let length = text.chars().count();
    if length == 0 {
        return 0.0;
    }

    let uppercase = text.chars().filter(|c| c.is_uppercase()).count();
    uppercase as f64 / length as f64
}

/// "sooooo" -> "soo"
fn collapse_repeats(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut previous: Option<char> = None;
    let mut run = 0;

    for c in text.chars() {
        if Some(c) == previous {
            run += 1;
        } else {
            previous = Some(c);
            run = 1;
        }

        if run <= 2 {
            out.push(c);
        }
    }

    out
}
