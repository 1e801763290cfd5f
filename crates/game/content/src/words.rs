//! Built-in word list and the validated [`WordList`] wrapper.

/// Words for ages 2-6, shortest first.
pub const DEFAULT_WORDS: &[&str] = &[
    // 3 letter words (easiest)
    "cat", "dog", "sun", "mom", "dad", "hat", "bat", "rat", "cup", "bug", //
    "hug", "run", "fun", "red", "bed", "pig", "big", "dig", "sit", "hit", //
    // 4 letter words
    "ball", "fish", "bird", "frog", "duck", "cake", "book", "tree", "star", "moon", //
    "bear", "lion", "jump", "play", "love", "home", "door", "hand", "foot", "eyes", //
    // 5 letter words (for older kids)
    "apple", "happy", "house", "water", "green", "blue", "smile", "train", "truck", "horse",
];

/// A non-empty, normalized list of words.
///
/// Entries are trimmed and lower-cased; blank entries are dropped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WordList {
    words: Vec<String>,
}

impl WordList {
    /// Normalizes `words`. Returns `None` when nothing usable remains.
    pub fn new<I, S>(words: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words: Vec<String> = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();
        if words.is_empty() {
            None
        } else {
            Some(Self { words })
        }
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn into_words(self) -> Vec<String> {
        self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl Default for WordList {
    fn default() -> Self {
        Self {
            words: DEFAULT_WORDS.iter().map(|w| w.to_string()).collect(),
        }
    }
}
