//! End-to-end behaviour of the session, paced playback, and the `bisect`
//! command surface.

use std::cell::Cell;
use std::time::Duration;

use bisect_harness::cli::{
    run, Cli, Commands, OutputTarget, RunArgs, VerifyArgs, EXIT_DIVERGED, EXIT_INPUT,
};
use bisect_harness::playback::{play, CancelToken, Clock, PlaybackEnd};
use bisect_harness::session::{Session, SessionError};
use bisect_search::SearchOutcomeV1;

struct CountingClock {
    sleeps: Cell<usize>,
}

impl Clock for CountingClock {
    fn sleep(&self, _duration: Duration) {
        self.sleeps.set(self.sleeps.get() + 1);
    }
}

fn run_command(array: &str, target: &str, json: bool) -> Cli {
    Cli {
        command: Commands::Run(RunArgs {
            array: array.into(),
            target: target.into(),
            delay_ms: Some(0),
            no_color: true,
            cell_width: None,
            json,
            config: None,
        }),
    }
}

#[test]
fn session_walkthrough() {
    let mut session = Session::new();
    assert_eq!(session.search_text("9").unwrap_err(), SessionError::NoSequence);

    assert!(session.submit_array("3, 7, 1, 9, 4"));
    let run = session.search_text("9").unwrap();
    assert_eq!(run.outcome(), SearchOutcomeV1::Found { index: 4 });

    let mut playback = session.playback().unwrap();
    let clock = CountingClock { sleeps: Cell::new(0) };
    let mut outcomes = Vec::new();
    let end = play(
        &mut playback,
        Duration::from_secs(1),
        &clock,
        &CancelToken::new(),
        |pb| -> Result<(), ()> {
            outcomes.push(pb.outcome());
            Ok(())
        },
    )
    .unwrap();
    assert_eq!(end, PlaybackEnd::Completed);
    assert_eq!(clock.sleeps.get(), 2);
    assert_eq!(
        outcomes,
        vec![None, None, Some(SearchOutcomeV1::Found { index: 4 })]
    );
}

#[test]
fn cancelled_playback_leaves_a_fresh_replay_possible() {
    let mut session = Session::new();
    session.submit_array("1, 2, 3, 4, 5, 6, 7, 8");
    session.search(8.0).unwrap();

    let token = CancelToken::new();
    token.cancel();
    let mut playback = session.playback().unwrap();
    let end = play(
        &mut playback,
        Duration::ZERO,
        &CountingClock { sleeps: Cell::new(0) },
        &token,
        |_| Ok::<(), ()>(()),
    )
    .unwrap();
    assert_eq!(end, PlaybackEnd::Cancelled { revealed: 0 });

    let mut again = session.playback().unwrap();
    again.reveal_all();
    assert_eq!(again.outcome(), Some(SearchOutcomeV1::Found { index: 7 }));
}

#[test]
fn cli_text_run_ends_with_banner() {
    let mut out = Vec::new();
    run(run_command("3, 7, 1, 9, 4", "5", false), &mut out, OutputTarget::default()).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(text.starts_with("Current Sorted Array\n"));
    assert!(text.ends_with("Element Not Found!\n"));
}

#[test]
fn cli_json_round_trips_through_verify() {
    let mut out = Vec::new();
    run(run_command("10, 20, 30", "20", true), &mut out, OutputTarget::default()).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.json");
    std::fs::write(&path, &out).unwrap();

    let mut verdict = Vec::new();
    run(
        Cli {
            command: Commands::Verify(VerifyArgs { path: path.clone() }),
        },
        &mut verdict,
        OutputTarget::default(),
    )
    .unwrap();
    assert_eq!(verdict, b"match\n");

    let tampered = String::from_utf8(out)
        .unwrap()
        .replace("\"match\"", "\"go_left\"");
    std::fs::write(&path, tampered).unwrap();
    let err = run(
        Cli {
            command: Commands::Verify(VerifyArgs { path }),
        },
        &mut Vec::new(),
        OutputTarget::default(),
    )
    .unwrap_err();
    assert_eq!(err.exit_code(), EXIT_DIVERGED);
}

#[test]
fn cli_input_errors_exit_with_two() {
    for (array, target, message) in [
        ("abc, 2", "1", "\"abc\" is not a valid number"),
        (",  ,", "1", "Please enter at least one number"),
        ("1, 2", "two", "\"two\" is not a valid target"),
    ] {
        let err = run(
            run_command(array, target, false),
            &mut Vec::new(),
            OutputTarget::default(),
        )
        .unwrap_err();
        assert_eq!(err.exit_code(), EXIT_INPUT, "{array:?} / {target:?}");
        assert_eq!(err.to_string(), message);
    }
}

#[test]
fn cli_output_to_a_pipe_is_plain_text() {
    let mut cli = run_command("3, 7, 1, 9, 4", "9", false);
    if let Commands::Run(args) = &mut cli.command {
        args.no_color = false;
    }
    let mut out = Vec::new();
    run(cli, &mut out, OutputTarget::default()).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(!text.contains('\u{1b}'), "{text:?}");
    assert!(text.ends_with("Element Found at index 4 and position 5.\n"));
}
