//! Property tests over the whole pipeline: text → prepare → search → replay.

use bisect_harness::render::{build_frames, CellV1, HighlightV1};
use bisect_kernel::prepare;
use bisect_search::{max_steps, replay_verify_bytes, search, SearchOutcomeV1};
use proptest::prelude::*;

fn input_text(values: &[i32]) -> String {
    values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

proptest! {
    #[test]
    fn prepared_sequence_is_sorted_permutation(values in prop::collection::vec(-1000i32..1000, 1..64)) {
        let sequence = prepare(&input_text(&values)).unwrap();
        let mut expected: Vec<f64> = values.iter().map(|&v| f64::from(v)).collect();
        expected.sort_by(f64::total_cmp);
        prop_assert_eq!(sequence.as_slice(), expected.as_slice());
    }

    #[test]
    fn present_target_is_found_and_located(
        values in prop::collection::vec(-1000i32..1000, 1..64),
        pick in any::<prop::sample::Index>(),
    ) {
        let sequence = prepare(&input_text(&values)).unwrap();
        let target = sequence.as_slice()[pick.index(sequence.len())];
        let run = search(&sequence, target);
        match run.outcome() {
            SearchOutcomeV1::Found { index } => {
                prop_assert_eq!(sequence.as_slice()[index], target);
                prop_assert!(run.final_step().unwrap().contains(index));
            }
            SearchOutcomeV1::NotFound => prop_assert!(false, "present target not found"),
        }
    }

    #[test]
    fn steps_are_bounded_and_windows_shrink(
        values in prop::collection::vec(-1000i32..1000, 1..128),
        target in -1100i32..1100,
    ) {
        let sequence = prepare(&input_text(&values)).unwrap();
        let run = search(&sequence, f64::from(target));
        prop_assert!(!run.steps().is_empty());
        prop_assert!(run.steps().len() <= max_steps(sequence.len()));
        for pair in run.steps().windows(2) {
            prop_assert!(pair[1].width() < pair[0].width());
        }
    }

    #[test]
    fn every_run_replays(
        values in prop::collection::vec(-1000i32..1000, 1..64),
        target in -1100i32..1100,
    ) {
        let run = search(&prepare(&input_text(&values)).unwrap(), f64::from(target));
        let bytes = run.to_canonical_json_bytes().unwrap();
        prop_assert!(replay_verify_bytes(&bytes).unwrap().is_match());
    }

    #[test]
    fn only_last_frame_is_undimmed(
        values in prop::collection::vec(-100i32..100, 1..32),
        target in -110i32..110,
    ) {
        let run = search(&prepare(&input_text(&values)).unwrap(), f64::from(target));
        let frames = build_frames(&run, run.steps().len());
        let last = frames.len() - 1;
        for (k, frame) in frames.iter().enumerate() {
            for cell in frame.visible() {
                if let CellV1::Visible { dimmed, highlight, .. } = *cell {
                    prop_assert_eq!(dimmed, k != last);
                    if highlight == HighlightV1::Found {
                        prop_assert_eq!(k, last);
                    }
                }
            }
        }
    }
}
