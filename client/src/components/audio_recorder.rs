//! Microphone recorder for the new-lecture page.
//!
//! DESIGN
//! ======
//! `RecorderState` drives the buttons and timer. Browser handles
//! (`MediaStream`, `MediaRecorder`, event closures, the tick interval) are
//! not `Send`, so they live in a local `StoredValue` and are released when the
//! component is disposed. Audio stays in the browser; only a summary is
//! reported through `on_complete`.

#[cfg(test)]
#[path = "audio_recorder_test.rs"]
mod audio_recorder_test;

use leptos::prelude::*;

use crate::state::recorder::{RecorderPhase, RecorderState, RecordingSummary, format_elapsed};

#[cfg(feature = "hydrate")]
use std::cell::RefCell;
#[cfg(feature = "hydrate")]
use std::rc::Rc;

#[cfg(feature = "hydrate")]
use gloo_timers::callback::Interval;
#[cfg(feature = "hydrate")]
use wasm_bindgen::{JsCast, JsValue, closure::Closure};
#[cfg(feature = "hydrate")]
use web_sys::{BlobEvent, Event, MediaRecorder, MediaStream, MediaStreamConstraints, MediaStreamTrack};

pub fn start_label(phase: RecorderPhase) -> &'static str {
    match phase {
        RecorderPhase::Idle => "Start Recording",
        RecorderPhase::Requesting => "Waiting for microphone...",
        RecorderPhase::Recording => "Recording...",
        RecorderPhase::Stopped | RecorderPhase::Failed => "Record Again",
    }
}

/// User-facing text for a `getUserMedia` / `MediaRecorder` failure, keyed by
/// the DOMException name.
pub fn microphone_error(name: Option<&str>) -> &'static str {
    match name {
        Some("NotAllowedError" | "SecurityError") => "Microphone access was denied.",
        Some("NotFoundError" | "OverconstrainedError") => "No microphone was found.",
        Some("NotReadableError" | "AbortError") => "The microphone is in use by another application.",
        Some("NotSupportedError") => "Recording is not supported in this browser.",
        _ => "Could not start recording.",
    }
}

#[cfg(feature = "hydrate")]
fn error_name(err: &JsValue) -> Option<String> {
    js_sys::Reflect::get(err, &JsValue::from_str("name"))
        .ok()
        .and_then(|v| v.as_string())
}

/// Live browser handles for one recording.
#[cfg(feature = "hydrate")]
struct Capture {
    recorder: MediaRecorder,
    stream: MediaStream,
    ticker: Option<Interval>,
    _on_data: Closure<dyn FnMut(BlobEvent)>,
    _on_stop: Closure<dyn FnMut(Event)>,
}

#[cfg(feature = "hydrate")]
impl Capture {
    /// Stop capture. The recorder's `stop` event then reports the summary.
    fn finish(&mut self) {
        self.ticker.take();
        let _ = self.recorder.stop();
        self.release_tracks();
    }

    fn release_tracks(&self) {
        for track in self.stream.get_tracks().iter() {
            if let Ok(track) = track.dyn_into::<MediaStreamTrack>() {
                track.stop();
            }
        }
    }
}

#[cfg(feature = "hydrate")]
impl Drop for Capture {
    fn drop(&mut self) {
        // Detach first so no event reaches a dropped closure.
        self.recorder.set_ondataavailable(None);
        self.recorder.set_onstop(None);
        self.ticker.take();
        let _ = self.recorder.stop();
        self.release_tracks();
    }
}

#[cfg(feature = "hydrate")]
async fn open_microphone() -> Result<MediaStream, Option<String>> {
    let window = web_sys::window().ok_or(None)?;
    let devices = window
        .navigator()
        .media_devices()
        .map_err(|_| Some("NotSupportedError".to_owned()))?;
    let constraints = MediaStreamConstraints::new();
    constraints.set_audio(&JsValue::TRUE);
    let promise = devices
        .get_user_media_with_constraints(&constraints)
        .map_err(|e| error_name(&e))?;
    let value = wasm_bindgen_futures::JsFuture::from(promise)
        .await
        .map_err(|e| error_name(&e))?;
    value.dyn_into::<MediaStream>().map_err(|_| None)
}

#[cfg(feature = "hydrate")]
async fn start_capture(
    state: RwSignal<RecorderState>,
    on_complete: Callback<RecordingSummary>,
) -> Result<Capture, Option<String>> {
    let stream = open_microphone().await?;
    let recorder = match MediaRecorder::new_with_media_stream(&stream) {
        Ok(recorder) => recorder,
        Err(e) => {
            for track in stream.get_tracks().iter() {
                if let Ok(track) = track.dyn_into::<MediaStreamTrack>() {
                    track.stop();
                }
            }
            return Err(error_name(&e));
        }
    };

    let tally = Rc::new(RefCell::new(RecordingSummary::default()));

    let tally_data = Rc::clone(&tally);
    let on_data = Closure::<dyn FnMut(BlobEvent)>::new(move |ev: BlobEvent| {
        if let Some(blob) = ev.data() {
            let mut tally = tally_data.borrow_mut();
            tally.chunks += 1;
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            {
                tally.bytes += blob.size().max(0.0) as u64;
            }
        }
    });
    recorder.set_ondataavailable(Some(on_data.as_ref().unchecked_ref()));

    let on_stop = Closure::<dyn FnMut(Event)>::new(move |_: Event| {
        let mut summary = *tally.borrow();
        summary.duration_secs = state.with_untracked(|s| s.elapsed_secs);
        log::info!("recording finished: {} chunks, {} bytes", summary.chunks, summary.bytes);
        on_complete.run(summary);
    });
    recorder.set_onstop(Some(on_stop.as_ref().unchecked_ref()));

    let mut capture =
        Capture { recorder, stream, ticker: None, _on_data: on_data, _on_stop: on_stop };
    capture.recorder.start().map_err(|e| error_name(&e))?;
    capture.ticker = Some(Interval::new(1_000, move || state.update(RecorderState::tick)));
    Ok(capture)
}

/// Start/stop controls with an elapsed-time readout.
#[component]
pub fn AudioRecorder(#[prop(into)] on_complete: Callback<RecordingSummary>) -> impl IntoView {
    let state = RwSignal::new(RecorderState::default());

    #[cfg(feature = "hydrate")]
    let capture = StoredValue::new_local(None::<Capture>);

    let on_start = move |_: leptos::ev::MouseEvent| {
        let mut allowed = false;
        state.update(|s| allowed = s.request());
        if !allowed {
            return;
        }
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match start_capture(state, on_complete).await {
                Ok(started) => {
                    // Dropped here (tracks released) if the page went away meanwhile.
                    let _ = capture.try_update_value(|slot| *slot = Some(started));
                    let _ = state.try_update(|s| s.started());
                }
                Err(name) => {
                    let message = microphone_error(name.as_deref());
                    log::warn!("recorder failed to start: {}", name.as_deref().unwrap_or("unknown"));
                    let _ = state.try_update(|s| s.fail(message));
                }
            }
        });
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = on_complete;
            state.update(|s| s.fail(microphone_error(Some("NotSupportedError"))));
        }
    };

    let on_stop = move |_: leptos::ev::MouseEvent| {
        let mut stopped = false;
        state.update(|s| stopped = s.stop());
        if !stopped {
            return;
        }
        #[cfg(feature = "hydrate")]
        capture.update_value(|slot| {
            if let Some(active) = slot.as_mut() {
                active.finish();
            }
        });
    };

    let phase = move || state.with(|s| s.phase);
    let can_start = move || matches!(phase(), RecorderPhase::Idle | RecorderPhase::Stopped | RecorderPhase::Failed);

    view! {
        <section class="recorder" class:recorder--live=move || phase() == RecorderPhase::Recording>
            <div class="recorder__timer" aria-live="polite">
                {move || format_elapsed(state.with(|s| s.elapsed_secs))}
            </div>
            <div class="recorder__controls">
                <button
                    class="recorder__start"
                    type="button"
                    disabled=move || !can_start()
                    on:click=on_start
                >
                    {move || start_label(phase())}
                </button>
                <button
                    class="recorder__stop"
                    type="button"
                    disabled=move || phase() != RecorderPhase::Recording
                    on:click=on_stop
                >
                    "Stop"
                </button>
            </div>
            {move || {
                state
                    .with(|s| s.error.clone())
                    .map(|error| view! { <p class="recorder__error" role="alert">{error}</p> })
            }}
        </section>
    }
}
