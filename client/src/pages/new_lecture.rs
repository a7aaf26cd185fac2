//! New lecture page hosting the audio recorder.

use leptos::prelude::*;

use crate::components::audio_recorder::AudioRecorder;
use crate::components::navbar::Navbar;
use crate::state::recorder::RecordingSummary;

#[component]
pub fn NewLecturePage() -> impl IntoView {
    let last = RwSignal::new(None::<RecordingSummary>);

    view! {
        <div class="lecture-page">
            <Navbar/>
            <main class="lecture">
                <h1>"New Lecture"</h1>
                <p class="lecture__lead">
                    "Press start and keep this tab open while the lecture runs. Stop when it ends."
                </p>
                <AudioRecorder on_complete=move |summary: RecordingSummary| last.set(Some(summary))/>
                {move || {
                    last.get().map(|summary| view! { <p class="lecture__summary">{summary.describe()}</p> })
                }}
                <a href="/dashboard" class="lecture__back">"Back to Dashboard"</a>
            </main>
        </div>
    }
}
