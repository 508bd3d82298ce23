// Tests for the playback controller: one shared output, at most one chunk
// playing, toggle/teardown semantics. The output itself is a scripted fake so
// no audio device is needed.

use anyhow::{anyhow, Result};
use scribe_console::{AudioOutput, PlaybackController, Toggle};
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct FakeState {
    /// The clip currently loaded, if any.
    loaded: Option<Vec<u8>>,
    paused: bool,
    fail_next_play: bool,
    stops: usize,
}

#[derive(Clone, Default)]
struct FakeOutput(Arc<Mutex<FakeState>>);

impl FakeOutput {
    fn finish_clip(&self) {
        self.0.lock().unwrap().loaded = None;
    }

    fn loaded(&self) -> Option<Vec<u8>> {
        self.0.lock().unwrap().loaded.clone()
    }

    fn paused(&self) -> bool {
        self.0.lock().unwrap().paused
    }

    fn stops(&self) -> usize {
        self.0.lock().unwrap().stops
    }

    fn fail_next_play(&self) {
        self.0.lock().unwrap().fail_next_play = true;
    }
}

impl AudioOutput for FakeOutput {
    fn play(&mut self, clip: Vec<u8>) -> Result<()> {
        let mut state = self.0.lock().unwrap();
        if state.fail_next_play {
            state.fail_next_play = false;
            return Err(anyhow!("decode failed"));
        }
        state.loaded = Some(clip);
        state.paused = false;
        Ok(())
    }

    fn pause(&mut self) {
        self.0.lock().unwrap().paused = true;
    }

    fn stop(&mut self) {
        let mut state = self.0.lock().unwrap();
        state.loaded = None;
        state.stops += 1;
    }

    fn is_idle(&self) -> bool {
        self.0.lock().unwrap().loaded.is_none()
    }
}

fn controller() -> (PlaybackController, FakeOutput) {
    let output = FakeOutput::default();
    (PlaybackController::new(Box::new(output.clone())), output)
}

#[test]
fn toggle_plays_then_pauses_and_clears_the_cursor() {
    let (mut playback, output) = controller();

    assert_eq!(playback.toggle(1), Toggle::Start);
    playback.begin(1, b"clip-1".to_vec()).unwrap();
    assert_eq!(playback.current(), Some(1));
    assert_eq!(output.loaded().as_deref(), Some(b"clip-1".as_slice()));

    // Toggling the playing chunk pauses it and drops the cursor.
    assert_eq!(playback.toggle(1), Toggle::Paused);
    assert!(output.paused());
    assert_eq!(playback.current(), None);
}

#[test]
fn switching_targets_tears_down_the_previous_clip_first() {
    let (mut playback, output) = controller();

    assert_eq!(playback.toggle(1), Toggle::Start);
    playback.begin(1, b"clip-1".to_vec()).unwrap();
    let stops_before = output.stops();

    // Chunk 2 takes over: chunk 1 is stopped before the new clip is even
    // fetched, and the cursor moves immediately.
    assert_eq!(playback.toggle(2), Toggle::Start);
    assert!(output.stops() > stops_before);
    assert_eq!(playback.current(), Some(2));

    playback.begin(2, b"clip-2".to_vec()).unwrap();
    assert_eq!(output.loaded().as_deref(), Some(b"clip-2".as_slice()));
}

#[test]
fn toggling_a_paused_chunk_replays_from_the_top() {
    let (mut playback, output) = controller();

    playback.toggle(1);
    playback.begin(1, b"clip-1".to_vec()).unwrap();
    playback.toggle(1); // pause, cursor cleared

    // Same chunk again: not a resume, a fresh play.
    assert_eq!(playback.toggle(1), Toggle::Start);
    playback.begin(1, b"clip-1".to_vec()).unwrap();
    assert_eq!(playback.current(), Some(1));
    assert!(!output.paused());
}

#[test]
fn rejected_play_reverts_the_cursor() {
    let (mut playback, output) = controller();
    output.fail_next_play();

    assert_eq!(playback.toggle(1), Toggle::Start);
    assert!(playback.begin(1, b"clip-1".to_vec()).is_err());
    assert_eq!(playback.current(), None);
}

#[test]
fn failed_clip_fetch_reverts_the_cursor() {
    let (mut playback, _output) = controller();

    assert_eq!(playback.toggle(3), Toggle::Start);
    playback.fail(3);
    assert_eq!(playback.current(), None);
}

#[test]
fn natural_end_clears_the_cursor_once() {
    let (mut playback, output) = controller();

    playback.toggle(1);
    playback.begin(1, b"clip-1".to_vec()).unwrap();
    assert_eq!(playback.on_tick(), None, "still playing");

    output.finish_clip();
    assert_eq!(playback.on_tick(), Some(1));
    assert_eq!(playback.current(), None);
    assert_eq!(playback.on_tick(), None, "end reported only once");
}

#[test]
fn tick_between_toggle_and_begin_is_not_an_end() {
    let (mut playback, _output) = controller();

    // The output is silent while the clip is still being fetched; that must
    // not read as end-of-playback.
    assert_eq!(playback.toggle(1), Toggle::Start);
    assert_eq!(playback.on_tick(), None);
    assert_eq!(playback.current(), Some(1));
}

#[test]
fn reset_stops_output_and_clears_cursor() {
    let (mut playback, output) = controller();

    playback.toggle(1);
    playback.begin(1, b"clip-1".to_vec()).unwrap();
    playback.reset();

    assert_eq!(playback.current(), None);
    assert!(output.loaded().is_none());
}
