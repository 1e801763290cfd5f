//! Shuffled word rotation.

use crate::env::{RandomSource, shuffle};
use crate::error::WordDeckError;

/// A word list dealt in shuffled order.
///
/// The cursor walks the shuffled order; once it wraps around, the whole list
/// is reshuffled (Fisher-Yates) and dealing restarts from the top.
#[derive(Clone, Debug)]
pub struct WordDeck {
    words: Vec<String>,
    order: Vec<String>,
    cursor: usize,
}

impl WordDeck {
    /// Builds a deck and deals its first shuffle.
    pub fn new<R: RandomSource + ?Sized>(
        words: Vec<String>,
        rng: &mut R,
    ) -> Result<Self, WordDeckError> {
        if words.is_empty() {
            return Err(WordDeckError::Empty);
        }
        if let Some(index) = words.iter().position(|w| w.trim().is_empty()) {
            return Err(WordDeckError::BlankWord { index });
        }

        let mut order = words.clone();
        shuffle(rng, &mut order);
        Ok(Self {
            words,
            order,
            cursor: 0,
        })
    }

    /// Word under the cursor, without advancing.
    pub fn peek(&self) -> &str {
        &self.order[self.cursor]
    }

    /// Advances the cursor and returns the new current word.
    pub fn advance<R: RandomSource + ?Sized>(&mut self, rng: &mut R) -> &str {
        self.cursor = (self.cursor + 1) % self.order.len();
        if self.cursor == 0 {
            self.order.clone_from(&self.words);
            shuffle(rng, &mut self.order);
        }
        self.peek()
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::PcgRng;

    fn words(list: &[&str]) -> Vec<String> {
        list.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn rejects_empty_list() {
        let mut rng = PcgRng::seeded(1);
        assert_eq!(
            WordDeck::new(Vec::new(), &mut rng).unwrap_err(),
            WordDeckError::Empty
        );
    }

    #[test]
    fn rejects_blank_word() {
        let mut rng = PcgRng::seeded(1);
        assert_eq!(
            WordDeck::new(words(&["cat", "  "]), &mut rng).unwrap_err(),
            WordDeckError::BlankWord { index: 1 }
        );
    }

    #[test]
    fn peek_does_not_advance() {
        let mut rng = PcgRng::seeded(5);
        let deck = WordDeck::new(words(&["cat", "dog", "sun"]), &mut rng).unwrap();
        assert_eq!(deck.peek(), deck.peek());
    }

    #[test]
    fn deals_every_word_once_per_round() {
        let mut rng = PcgRng::seeded(9);
        let list = words(&["cat", "dog", "sun", "hat", "cup"]);
        let mut deck = WordDeck::new(list.clone(), &mut rng).unwrap();

        let mut dealt = vec![deck.peek().to_string()];
        for _ in 1..list.len() {
            dealt.push(deck.advance(&mut rng).to_string());
        }
        dealt.sort();
        let mut expected = list;
        expected.sort();
        assert_eq!(dealt, expected);
    }

    #[test]
    fn wraps_and_reshuffles() {
        let mut rng = PcgRng::seeded(2);
        let mut deck = WordDeck::new(words(&["cat", "dog"]), &mut rng).unwrap();
        deck.advance(&mut rng);
        let after_wrap = deck.advance(&mut rng).to_string();
        assert!(after_wrap == "cat" || after_wrap == "dog");
    }
}
