//! Lecture recorder state.
//!
//! DESIGN
//! ======
//! The browser media plumbing lives in `components::audio_recorder`; this
//! model only tracks which phase the recorder is in so the view can render
//! buttons and the timer. Transitions that make no sense for the current
//! phase are ignored rather than treated as errors.

#[cfg(test)]
#[path = "recorder_test.rs"]
mod recorder_test;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RecorderPhase {
    #[default]
    Idle,
    /// Waiting for the user to grant microphone access.
    Requesting,
    Recording,
    Stopped,
    Failed,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RecorderState {
    pub phase: RecorderPhase,
    pub elapsed_secs: u32,
    pub error: Option<String>,
}

impl RecorderState {
    /// Ask for microphone access. Allowed from idle, stopped, or failed.
    pub fn request(&mut self) -> bool {
        if !matches!(self.phase, RecorderPhase::Idle | RecorderPhase::Stopped | RecorderPhase::Failed) {
            return false;
        }
        *self = Self { phase: RecorderPhase::Requesting, ..Self::default() };
        true
    }

    /// Capture started after access was granted.
    pub fn started(&mut self) -> bool {
        if self.phase != RecorderPhase::Requesting {
            return false;
        }
        self.phase = RecorderPhase::Recording;
        self.elapsed_secs = 0;
        true
    }

    /// One second of recording elapsed.
    pub fn tick(&mut self) {
        if self.phase == RecorderPhase::Recording {
            self.elapsed_secs = self.elapsed_secs.saturating_add(1);
        }
    }

    pub fn stop(&mut self) -> bool {
        if self.phase != RecorderPhase::Recording {
            return false;
        }
        self.phase = RecorderPhase::Stopped;
        true
    }

    /// Access denied or the recorder could not start.
    pub fn fail(&mut self, message: impl Into<String>) {
        if matches!(self.phase, RecorderPhase::Requesting | RecorderPhase::Recording) {
            self.phase = RecorderPhase::Failed;
            self.error = Some(message.into());
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_recording(&self) -> bool {
        self.phase == RecorderPhase::Recording
    }
}

/// Format seconds as `MM:SS`; minutes keep growing past an hour.
pub fn format_elapsed(secs: u32) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// What a finished recording produced. Reported to the page on stop.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RecordingSummary {
    pub chunks: usize,
    pub bytes: u64,
    pub duration_secs: u32,
}

impl RecordingSummary {
    pub fn describe(&self) -> String {
        let kib = self.bytes.div_ceil(1024);
        format!("Recorded {} ({} KiB in {} chunks)", format_elapsed(self.duration_secs), kib, self.chunks)
    }
}
