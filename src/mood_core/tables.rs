//! Static lexicon, adjustment, emoticon and emoji tables
//!
//! Built once on first use and shared read-only for the life of the process.

use super::emotion::{Emotion, Valence};
use once_cell::sync::Lazy;
use std::collections::HashMap;

use Emotion::*;

/// Emotion associations and coarse sentiment for one lexicon word
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LexiconEntry {
    pub emotions: &'static [Emotion],
    pub sentiment: Valence,
}

/// Contextual modifier applied to the next scored token
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Adjustment {
    /// Flips the sign of the scored token
    Negation,
    /// Multiplies the scored token by `1 + fraction`
    Scale(f64),
}

const LEXICON_WORDS: &[(&str, &[Emotion], Valence)] = &[
    ("happy", &[Joy, Trust], Valence::Positive),
    ("sad", &[Sadness], Valence::Negative),
    ("angry", &[Anger], Valence::Negative),
    ("fear", &[Fear, Anticipation], Valence::Negative),
    ("love", &[Joy, Trust], Valence::Positive),
    ("hate", &[Anger, Disgust], Valence::Negative),
    ("excited", &[Joy, Anticipation], Valence::Positive),
    ("calm", &[Trust], Valence::Positive),
    ("anxious", &[Fear, Anticipation], Valence::Negative),
    ("hope", &[Anticipation, Joy], Valence::Positive),
    ("despair", &[Sadness, Fear], Valence::Negative),
    ("surprise", &[Surprise], Valence::Neutral),
    ("disgust", &[Disgust], Valence::Negative),
    ("trust", &[Trust], Valence::Positive),
    ("anticipation", &[Anticipation], Valence::Neutral),
    ("wonderful", &[Joy, Surprise], Valence::Positive),
    ("terrible", &[Fear, Sadness, Anger], Valence::Negative),
    ("amazing", &[Joy, Surprise], Valence::Positive),
    ("awful", &[Disgust, Anger], Valence::Negative),
    ("beautiful", &[Joy], Valence::Positive),
    ("ugly", &[Disgust], Valence::Negative),
    ("brilliant", &[Joy, Anticipation], Valence::Positive),
    ("stupid", &[Anger, Disgust], Valence::Negative),
    ("fantastic", &[Joy], Valence::Positive),
    ("horrible", &[Fear, Disgust], Valence::Negative),
    ("glad", &[Joy], Valence::Positive),
    ("grateful", &[Joy, Trust], Valence::Positive),
    ("proud", &[Joy, Trust], Valence::Positive),
    ("thrilled", &[Joy, Surprise], Valence::Positive),
    ("peaceful", &[Trust, Joy], Valence::Positive),
    ("lonely", &[Sadness], Valence::Negative),
    ("miserable", &[Sadness, Disgust], Valence::Negative),
    ("furious", &[Anger], Valence::Negative),
    ("scared", &[Fear], Valence::Negative),
    ("worried", &[Fear, Anticipation], Valence::Negative),
    ("nervous", &[Fear, Anticipation], Valence::Negative),
    ("shocked", &[Surprise, Fear], Valence::Negative),
    ("gross", &[Disgust], Valence::Negative),
    ("disappointed", &[Sadness, Anger], Valence::Negative),
    ("curious", &[Anticipation, Surprise], Valence::Neutral),
];

const ADJUSTMENTS: &[(&str, Adjustment)] = &[
    // Boosters and dampers
    ("very", Adjustment::Scale(0.3)),
    ("really", Adjustment::Scale(0.3)),
    ("so", Adjustment::Scale(0.3)),
    ("extremely", Adjustment::Scale(0.4)),
    ("absolutely", Adjustment::Scale(0.4)),
    ("totally", Adjustment::Scale(0.3)),
    ("quite", Adjustment::Scale(0.2)),
    ("just", Adjustment::Scale(0.1)),
    ("almost", Adjustment::Scale(-0.1)),
    ("barely", Adjustment::Scale(-0.2)),
    ("hardly", Adjustment::Scale(-0.2)),
    ("scarcely", Adjustment::Scale(-0.2)),
    // Negations
    ("not", Adjustment::Negation),
    ("never", Adjustment::Negation),
    ("no", Adjustment::Negation),
    ("neither", Adjustment::Negation),
    ("nor", Adjustment::Negation),
    ("cannot", Adjustment::Negation),
    // Social media
    ("lol", Adjustment::Scale(0.3)),
    ("haha", Adjustment::Scale(0.3)),
    ("omg", Adjustment::Scale(0.4)),
    ("wtf", Adjustment::Scale(-0.4)),
    ("smh", Adjustment::Scale(-0.3)),
    ("fml", Adjustment::Scale(-0.5)),
];

/// Emoticon glyphs and their fixed sentiment values
pub const EMOTICONS: &[(&str, f64)] = &[
    (":)", 0.5),
    (":-)", 0.5),
    (":]", 0.5),
    (":D", 0.7),
    (":-D", 0.7),
    (":(", -0.5),
    (":-(", -0.5),
    (":[", -0.5),
    (":'(", -0.7),
    (":P", 0.3),
    (":-P", 0.3),
    (":p", 0.3),
    (":-p", 0.3),
    (";)", 0.4),
    (";-)", 0.4),
    (":|", 0.0),
    (":-|", 0.0),
    (":/", -0.2),
    (":-/", -0.2),
    ("<3", 0.7),
    ("</3", -0.7),
    (":*", 0.6),
    (":-*", 0.6),
];

/// Emoji glyphs and the categories they count toward at half weight
pub const EMOJI_EMOTIONS: &[(&str, &[Emotion])] = &[
    ("😊", &[Joy]),
    ("😃", &[Joy]),
    ("😄", &[Joy]),
    ("😁", &[Joy]),
    ("😢", &[Sadness]),
    ("😭", &[Sadness]),
    ("😥", &[Sadness]),
    ("😡", &[Anger]),
    ("😠", &[Anger]),
    ("🤬", &[Anger]),
    ("😨", &[Fear]),
    ("😱", &[Fear, Surprise]),
    ("😰", &[Fear, Anticipation]),
    ("😴", &[Trust]),
    ("😌", &[Trust]),
    ("🥰", &[Joy, Trust]),
    ("🤔", &[Anticipation]),
    ("😏", &[Anticipation]),
    ("🤗", &[Trust, Joy]),
    ("😮", &[Surprise]),
    ("😲", &[Surprise]),
    ("😯", &[Surprise]),
    ("🤢", &[Disgust]),
    ("🤮", &[Disgust]),
    ("😖", &[Disgust]),
];

static LEXICON: Lazy<HashMap<&'static str, LexiconEntry>> = Lazy::new(|| {
    LEXICON_WORDS
        .iter()
        .map(|&(word, emotions, sentiment)| (word, LexiconEntry { emotions, sentiment }))
        .collect()
});

static ADJUSTMENT_TABLE: Lazy<HashMap<&'static str, Adjustment>> =
    Lazy::new(|| ADJUSTMENTS.iter().copied().collect());

static EMOTICON_TABLE: Lazy<HashMap<&'static str, f64>> =
    Lazy::new(|| EMOTICONS.iter().copied().collect());

static EMOJI_TABLE: Lazy<HashMap<&'static str, &'static [Emotion]>> =
    Lazy::new(|| EMOJI_EMOTIONS.iter().copied().collect());

pub fn lexicon_entry(word: &str) -> Option<&'static LexiconEntry> {
    LEXICON.get(word)
}

pub fn adjustment(word: &str) -> Option<Adjustment> {
    ADJUSTMENT_TABLE.get(word).copied()
}

pub fn emoticon_score(token: &str) -> Option<f64> {
    EMOTICON_TABLE.get(token).copied()
}

pub fn emoji_emotions(token: &str) -> Option<&'static [Emotion]> {
    EMOJI_TABLE.get(token).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lexicon_lookup() {
        let happy = lexicon_entry("happy").unwrap();
        assert_eq!(happy.sentiment, Valence::Positive);
        assert_eq!(happy.emotions, &[Joy, Trust]);

        assert!(lexicon_entry("meh").is_none());
        assert!(lexicon_entry("HAPPY").is_none(), "lookups expect lower-cased keys");
    }

    #[test]
    fn test_adjustments() {
        assert_eq!(adjustment("not"), Some(Adjustment::Negation));
        assert_eq!(adjustment("cannot"), Some(Adjustment::Negation));
        assert_eq!(adjustment("very"), Some(Adjustment::Scale(0.3)));
        assert_eq!(adjustment("barely"), Some(Adjustment::Scale(-0.2)));
        assert_eq!(adjustment("happy"), None);
    }

    #[test]
    fn test_emoticons_and_emoji() {
        assert_eq!(emoticon_score(":)"), Some(0.5));
        assert_eq!(emoticon_score("<3"), Some(0.7));
        assert_eq!(emoticon_score(":("), Some(-0.5));
        assert_eq!(emoticon_score(":d"), None);

        assert_eq!(emoji_emotions("😱"), Some(&[Fear, Surprise][..]));
        assert!(emoji_emotions(":)").is_none());
    }

    #[test]
    fn test_tables_have_no_duplicate_keys() {
        assert_eq!(LEXICON.len(), LEXICON_WORDS.len());
        assert_eq!(ADJUSTMENT_TABLE.len(), ADJUSTMENTS.len());
        assert_eq!(EMOTICON_TABLE.len(), EMOTICONS.len());
        assert_eq!(EMOJI_TABLE.len(), EMOJI_EMOTIONS.len());
    }
}
