use speller_core::{
    Layout, LetterId, PcgRng, Placement, Puzzle, PuzzleConfig, PuzzlePhase, RandomSource,
    SlotGeometry,
};

fn layout() -> Layout {
    Layout::new(800.0, 600.0, true)
}

fn playing_puzzle(word: &str) -> Puzzle {
    let mut puzzle = Puzzle::new(vec![word.to_string()], 99, PuzzleConfig::default())
        .expect("single-word deck");
    puzzle.init_word(word, layout());
    let geometry = SlotGeometry::row(word.chars().count(), &layout(), puzzle.config());
    puzzle.set_slot_positions(&geometry);
    puzzle.show_word_in_slots();
    puzzle.scatter_letters();
    puzzle
}

#[test]
fn spelling_cat_in_order_records_placement_and_celebrates() {
    let mut puzzle = playing_puzzle("cat");

    assert_eq!(
        puzzle.place_letter(LetterId(0), 0),
        Placement::Placed { completed: false }
    );
    assert_eq!(
        puzzle.place_letter(LetterId(1), 1),
        Placement::Placed { completed: false }
    );
    assert_eq!(
        puzzle.place_letter(LetterId(2), 2),
        Placement::Placed { completed: true }
    );

    let state = puzzle.state();
    assert_eq!(
        state.placement_order,
        vec![LetterId(0), LetterId(1), LetterId(2)]
    );
    assert_eq!(state.phase, PuzzlePhase::Celebrating);
    for (i, slot) in state.slots.iter().enumerate() {
        assert!(slot.filled);
        assert_eq!(slot.occupying_letter_id, Some(LetterId(i as u32)));
        assert_eq!(state.letters[i].position, slot.geometry.origin());
    }
}

#[test]
fn wrong_letter_drops_below_the_slot_and_keeps_playing() {
    let mut puzzle = playing_puzzle("cat");
    let slot = puzzle.state().slots[0].clone();
    let start_x = puzzle.state().letters[2].position.x;

    // 't' does not belong in the 'c' slot.
    let outcome = puzzle.place_letter(LetterId(2), 0);

    let Placement::Rejected { relocated_to } = outcome else {
        panic!("expected rejection, got {outcome:?}");
    };
    assert_eq!(relocated_to.x, start_x);
    assert_eq!(
        relocated_to.y,
        slot.geometry.y + slot.geometry.height + PuzzleConfig::DEFAULT_REJECTED_DROP_OFFSET
    );

    let state = puzzle.state();
    assert!(!state.slots[0].filled);
    assert_eq!(state.slots[0].occupying_letter_id, None);
    assert!(!state.letters[2].placed);
    assert_eq!(state.letters[2].position, relocated_to);
    assert!(state.placement_order.is_empty());
    assert_eq!(state.phase, PuzzlePhase::Playing);
}

/// Random drops only ever change slot/placement bookkeeping when the
/// character matches an unfilled slot; otherwise at most the dropped
/// letter's position moves.
#[test]
fn random_drops_mutate_only_on_match_into_empty_slot() {
    let mut rng = PcgRng::seeded(2024);

    for word in ["ball", "fish", "happy", "dad"] {
        let mut puzzle = playing_puzzle(word);
        let len = word.chars().count();

        for _ in 0..60 {
            let letter_id = LetterId(rng.below(len + 1) as u32);
            let slot_index = rng.below(len + 1);
            let before = puzzle.state().clone();

            let should_place = match (before.letter(letter_id), before.slots.get(slot_index)) {
                (Some(letter), Some(slot)) => {
                    !slot.filled && !letter.placed && slot.accepts(letter.char)
                }
                _ => false,
            };

            let outcome = puzzle.place_letter(letter_id, slot_index);
            let after = puzzle.state();
            assert_eq!(outcome.is_placed(), should_place, "{word}: {outcome:?}");

            if !should_place {
                assert_eq!(after.slots, before.slots);
                assert_eq!(after.placement_order, before.placement_order);
                for (a, b) in after.letters.iter().zip(&before.letters) {
                    assert_eq!(a.placed, b.placed);
                    assert_eq!(a.slot_index, b.slot_index);
                    if a.id != letter_id {
                        assert_eq!(a.position, b.position);
                    }
                }
            } else {
                assert_eq!(after.placement_order.last(), Some(&letter_id));
            }
        }
    }
}
