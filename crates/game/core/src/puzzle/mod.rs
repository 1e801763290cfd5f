//! Word puzzle engine.
//!
//! [`Puzzle`] is the only writer of [`PuzzleState`]. It owns the word deck and
//! the random source, builds slots and letters for each word, and runs the
//! letter → slot placement rules.

mod placement;
mod scatter;

pub use placement::{IgnoreReason, NarratedLetter, Placement};

use crate::config::PuzzleConfig;
use crate::deck::WordDeck;
use crate::env::{PcgRng, shuffle};
use crate::error::WordDeckError;
use crate::state::{Layout, Letter, LetterId, Point, PuzzlePhase, PuzzleState, Slot, SlotGeometry};

/// Owner of the puzzle state for a whole session.
#[derive(Clone, Debug)]
pub struct Puzzle {
    state: PuzzleState,
    deck: WordDeck,
    rng: PcgRng,
    config: PuzzleConfig,
}

impl Puzzle {
    /// Creates a puzzle dealing from `words`, seeded for reproducibility.
    pub fn new(words: Vec<String>, seed: u64, config: PuzzleConfig) -> Result<Self, WordDeckError> {
        let mut rng = PcgRng::seeded(seed);
        let deck = WordDeck::new(words, &mut rng)?;
        Ok(Self {
            state: PuzzleState::default(),
            deck,
            rng,
            config,
        })
    }

    pub fn state(&self) -> &PuzzleState {
        &self.state
    }

    pub fn config(&self) -> &PuzzleConfig {
        &self.config
    }

    pub fn set_phase(&mut self, phase: PuzzlePhase) {
        self.state.phase = phase;
    }

    /// Builds slots and letters for `word` and enters [`PuzzlePhase::Showing`].
    ///
    /// Letters start at the container center; their scatter targets are a
    /// shuffled assignment of freshly generated scatter positions. Slot
    /// geometry is left zeroed until [`Puzzle::set_slot_positions`].
    pub fn init_word(&mut self, word: &str, layout: Layout) {
        let chars: Vec<char> = word.chars().collect();
        let positions = scatter::scatter_positions(chars.len(), &layout, &self.config, &mut self.rng);

        let mut assignment: Vec<usize> = (0..chars.len()).collect();
        shuffle(&mut self.rng, &mut assignment);

        let center = layout.center();
        let letters = chars
            .iter()
            .enumerate()
            .map(|(i, &ch)| Letter {
                id: LetterId(i as u32),
                char: ch,
                correct_slot_index: i,
                color: self.config.color_for(i),
                position: center,
                target_scatter_position: positions[assignment[i]],
                placed: false,
                slot_index: None,
            })
            .collect();
        let slots = chars
            .iter()
            .enumerate()
            .map(|(i, &ch)| Slot::empty(i, ch))
            .collect();

        self.state.current_word = word.to_string();
        self.state.letters = letters;
        self.state.slots = slots;
        self.state.phase = PuzzlePhase::Showing;
        self.state.placement_order.clear();
    }

    /// Merges measured geometry into the slots, index by index.
    ///
    /// Extra entries are ignored; missing entries leave slots untouched.
    pub fn set_slot_positions(&mut self, positions: &[SlotGeometry]) {
        for (slot, geometry) in self.state.slots.iter_mut().zip(positions) {
            slot.geometry = *geometry;
        }
    }

    /// Moves every letter onto its correct slot for the intro reveal.
    /// Nothing is marked placed.
    pub fn show_word_in_slots(&mut self) {
        let PuzzleState { letters, slots, .. } = &mut self.state;
        for letter in letters.iter_mut() {
            if let Some(slot) = slots.get(letter.correct_slot_index) {
                letter.position = slot.geometry.origin();
            }
        }
    }

    /// Sends every letter to its scatter target and starts play.
    pub fn scatter_letters(&mut self) {
        for letter in &mut self.state.letters {
            letter.position = letter.target_scatter_position;
        }
        self.state.phase = PuzzlePhase::Playing;
    }

    /// Drag update. Placed letters stay locked in their slot.
    pub fn move_letter(&mut self, letter_id: LetterId, position: Point) -> bool {
        match self.state.letter_mut(letter_id) {
            Some(letter) if !letter.placed => {
                letter.position = position;
                true
            }
            _ => false,
        }
    }

    /// Drops `letter_id` onto `slot_index`.
    ///
    /// - Unknown ids, filled slots and already placed letters: no-op.
    /// - Character mismatch (case-insensitive): the letter drops just below
    ///   the slot; slot and placement bookkeeping are untouched.
    /// - Match: slot and letter are linked, the letter snaps onto the slot and
    ///   its id is appended to `placement_order`. Placing the last letter
    ///   enters [`PuzzlePhase::Celebrating`].
    pub fn place_letter(&mut self, letter_id: LetterId, slot_index: usize) -> Placement {
        let Some(slot) = self.state.slots.get(slot_index) else {
            return Placement::Ignored(IgnoreReason::UnknownSlot);
        };
        let Some(letter) = self.state.letter(letter_id) else {
            return Placement::Ignored(IgnoreReason::UnknownLetter);
        };
        if slot.filled {
            return Placement::Ignored(IgnoreReason::SlotFilled);
        }
        if letter.placed {
            return Placement::Ignored(IgnoreReason::AlreadyPlaced);
        }

        let geometry = slot.geometry;
        if !slot.accepts(letter.char) {
            let relocated_to = Point::new(
                letter.position.x,
                geometry.y + geometry.height + self.config.rejected_drop_offset,
            );
            if let Some(letter) = self.state.letter_mut(letter_id) {
                letter.position = relocated_to;
            }
            return Placement::Rejected { relocated_to };
        }

        let slot = &mut self.state.slots[slot_index];
        slot.filled = true;
        slot.occupying_letter_id = Some(letter_id);
        if let Some(letter) = self.state.letter_mut(letter_id) {
            letter.placed = true;
            letter.slot_index = Some(slot_index);
            letter.position = geometry.origin();
        }
        if !self.state.placement_order.contains(&letter_id) {
            self.state.placement_order.push(letter_id);
        }

        let completed = self.state.all_placed();
        if completed {
            self.state.phase = PuzzlePhase::Celebrating;
        }
        Placement::Placed { completed }
    }

    /// Advances to the next dealt word, counting the finished one.
    ///
    /// Enters [`PuzzlePhase::Loading`]; the caller follows up with
    /// [`Puzzle::init_word`].
    pub fn next_word(&mut self) -> String {
        let word = self.deck.advance(&mut self.rng).to_string();
        self.state.current_word = word.clone();
        self.state.words_completed += 1;
        self.state.phase = PuzzlePhase::Loading;
        word
    }

    /// Word the deck will deal next, without advancing. Used for the first word.
    pub fn peek_next_word(&self) -> &str {
        self.deck.peek()
    }

    /// Placed letters in screen reading order.
    ///
    /// Slots are sorted left-to-right (ascending x), ties broken top-to-bottom
    /// (ascending y), and mapped to the letter occupying each one. The result
    /// reads the word correctly regardless of the order the child placed the
    /// letters in. Without any slot/letter linkage the word's natural character
    /// order is returned.
    pub fn placed_letter_screen_order(&self) -> Vec<NarratedLetter> {
        let mut slots: Vec<&Slot> = self.state.slots.iter().collect();
        slots.sort_by(|a, b| {
            a.geometry
                .x
                .total_cmp(&b.geometry.x)
                .then(a.geometry.y.total_cmp(&b.geometry.y))
        });

        let ordered: Vec<NarratedLetter> = slots
            .iter()
            .filter_map(|slot| slot.occupying_letter_id)
            .filter_map(|id| self.state.letter(id))
            .map(|letter| NarratedLetter {
                char: letter.char,
                slot_index: letter.slot_index.unwrap_or(letter.correct_slot_index),
            })
            .collect();

        if ordered.is_empty() {
            natural_order(&self.state.current_word)
        } else {
            ordered
        }
    }
}

/// The word's own character order, highlighting slot `i` for character `i`.
pub fn natural_order(word: &str) -> Vec<NarratedLetter> {
    word.chars()
        .enumerate()
        .map(|(slot_index, char)| NarratedLetter { char, slot_index })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn puzzle_with(words: &[&str]) -> Puzzle {
        let words = words.iter().map(|w| w.to_string()).collect();
        Puzzle::new(words, 7, PuzzleConfig::default()).unwrap()
    }

    fn layout() -> Layout {
        Layout::new(800.0, 600.0, true)
    }

    fn ready_puzzle(word: &str) -> Puzzle {
        let mut puzzle = puzzle_with(&[word]);
        puzzle.init_word(word, layout());
        let geometry = SlotGeometry::row(word.chars().count(), &layout(), puzzle.config());
        puzzle.set_slot_positions(&geometry);
        puzzle.scatter_letters();
        puzzle
    }

    #[test]
    fn init_word_builds_index_aligned_entities() {
        let mut puzzle = puzzle_with(&["cat"]);
        puzzle.init_word("cat", layout());
        let state = puzzle.state();

        assert_eq!(state.current_word, "cat");
        assert_eq!(state.phase, PuzzlePhase::Showing);
        assert!(state.placement_order.is_empty());
        let slot_chars: Vec<char> = state.slots.iter().map(|s| s.expected_char).collect();
        assert_eq!(slot_chars, vec!['c', 'a', 't']);
        for (i, letter) in state.letters.iter().enumerate() {
            assert_eq!(letter.correct_slot_index, i);
            assert_eq!(letter.position, layout().center());
            assert!(!letter.placed);
        }
    }

    #[test]
    fn scatter_moves_letters_to_targets() {
        let puzzle = ready_puzzle("dog");
        let state = puzzle.state();
        assert_eq!(state.phase, PuzzlePhase::Playing);
        assert!(
            state
                .letters
                .iter()
                .all(|l| l.position == l.target_scatter_position)
        );
    }

    #[test]
    fn show_word_in_slots_does_not_place() {
        let mut puzzle = puzzle_with(&["sun"]);
        puzzle.init_word("sun", layout());
        let geometry = SlotGeometry::row(3, &layout(), puzzle.config());
        puzzle.set_slot_positions(&geometry);
        puzzle.show_word_in_slots();

        for letter in &puzzle.state().letters {
            assert_eq!(letter.position, geometry[letter.correct_slot_index].origin());
            assert!(!letter.placed);
        }
        assert!(puzzle.state().slots.iter().all(|s| !s.filled));
    }

    #[test]
    fn placing_into_filled_slot_is_ignored() {
        let mut puzzle = ready_puzzle("mom");
        assert!(puzzle.place_letter(LetterId(0), 0).is_placed());
        assert_eq!(
            puzzle.place_letter(LetterId(2), 0),
            Placement::Ignored(IgnoreReason::SlotFilled)
        );
        assert_eq!(puzzle.state().placement_order, vec![LetterId(0)]);
    }

    #[test]
    fn placed_letter_cannot_move_again() {
        let mut puzzle = ready_puzzle("mom");
        puzzle.place_letter(LetterId(0), 0);
        assert_eq!(
            puzzle.place_letter(LetterId(0), 2),
            Placement::Ignored(IgnoreReason::AlreadyPlaced)
        );
        assert!(!puzzle.move_letter(LetterId(0), Point::new(1.0, 1.0)));
        assert!(!puzzle.state().slots[2].filled);
    }

    #[test]
    fn invalid_ids_are_ignored() {
        let mut puzzle = ready_puzzle("cat");
        let before = puzzle.state().clone();
        assert_eq!(
            puzzle.place_letter(LetterId(9), 0),
            Placement::Ignored(IgnoreReason::UnknownLetter)
        );
        assert_eq!(
            puzzle.place_letter(LetterId(0), 9),
            Placement::Ignored(IgnoreReason::UnknownSlot)
        );
        assert_eq!(puzzle.state(), &before);
    }

    #[test]
    fn matching_is_case_insensitive() {
        let slot = Slot::empty(0, 'S');
        assert!(slot.accepts('s'));
        assert!(slot.accepts('S'));
        assert!(!slot.accepts('x'));

        let mut puzzle = ready_puzzle("Sun");
        assert!(puzzle.place_letter(LetterId(0), 0).is_placed());
    }

    #[test]
    fn repeated_characters_can_swap_slots() {
        let mut puzzle = ready_puzzle("dad");
        // The second 'd' may fill the first slot.
        assert!(puzzle.place_letter(LetterId(2), 0).is_placed());
        assert!(puzzle.place_letter(LetterId(0), 2).is_placed());
        assert!(puzzle.place_letter(LetterId(1), 1).completed_word());
        let order: Vec<char> = puzzle
            .placed_letter_screen_order()
            .iter()
            .map(|l| l.char)
            .collect();
        assert_eq!(order, vec!['d', 'a', 'd']);
    }

    #[test]
    fn screen_order_follows_slot_geometry_not_placement_order() {
        let mut puzzle = ready_puzzle("cat");
        puzzle.place_letter(LetterId(2), 2);
        puzzle.place_letter(LetterId(0), 0);
        puzzle.place_letter(LetterId(1), 1);

        assert_eq!(
            puzzle.state().placement_order,
            vec![LetterId(2), LetterId(0), LetterId(1)]
        );
        let order = puzzle.placed_letter_screen_order();
        assert_eq!(
            order,
            vec![
                NarratedLetter { char: 'c', slot_index: 0 },
                NarratedLetter { char: 'a', slot_index: 1 },
                NarratedLetter { char: 't', slot_index: 2 },
            ]
        );
    }

    #[test]
    fn screen_order_breaks_x_ties_by_y() {
        let mut puzzle = puzzle_with(&["on"]);
        puzzle.init_word("on", layout());
        // Stacked vertically: 'n' slot above 'o' slot.
        puzzle.set_slot_positions(&[
            SlotGeometry::new(100.0, 300.0, 70.0, 70.0),
            SlotGeometry::new(100.0, 200.0, 70.0, 70.0),
        ]);
        puzzle.scatter_letters();
        puzzle.place_letter(LetterId(0), 0);
        puzzle.place_letter(LetterId(1), 1);

        let chars: Vec<char> = puzzle
            .placed_letter_screen_order()
            .iter()
            .map(|l| l.char)
            .collect();
        assert_eq!(chars, vec!['n', 'o']);
    }

    #[test]
    fn screen_order_falls_back_to_natural_order() {
        let mut puzzle = puzzle_with(&["bug"]);
        puzzle.init_word("bug", layout());
        assert_eq!(puzzle.placed_letter_screen_order(), natural_order("bug"));
    }

    #[test]
    fn next_word_counts_and_enters_loading() {
        let mut puzzle = puzzle_with(&["cat", "dog", "sun"]);
        let first = puzzle.peek_next_word().to_string();
        puzzle.init_word(&first, layout());

        let next = puzzle.next_word();
        assert_eq!(puzzle.state().words_completed, 1);
        assert_eq!(puzzle.state().phase, PuzzlePhase::Loading);
        assert_eq!(puzzle.state().current_word, next);
        assert_eq!(puzzle.peek_next_word(), next);
    }

    #[test]
    fn move_letter_updates_unplaced_letters() {
        let mut puzzle = ready_puzzle("hat");
        assert!(puzzle.move_letter(LetterId(1), Point::new(12.0, 34.0)));
        assert_eq!(
            puzzle.state().letters[1].position,
            Point::new(12.0, 34.0)
        );
        assert!(!puzzle.move_letter(LetterId(7), Point::ORIGIN));
    }
}
