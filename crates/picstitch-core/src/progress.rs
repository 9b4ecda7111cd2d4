//! Progress reporting for long-running pipeline phases.
//!
//! A [`ProgressSink`] is a synchronous, unbuffered observer: the pipeline
//! calls [`update`](ProgressSink::update) inline with values in
//! `0.0..=100.0`, non-decreasing within a single merge. Closures work
//! directly; pass [`Discard`] when nobody is watching — reporting never
//! changes computed results.

/// Observer for merge progress.
pub trait ProgressSink {
    /// Called with the overall completion percentage, `0.0..=100.0`.
    fn update(&mut self, percent: f32);
}

impl<F: FnMut(f32)> ProgressSink for F {
    fn update(&mut self, percent: f32) {
        self(percent);
    }
}

/// Sink that drops every report.
#[derive(Debug, Clone, Copy, Default)]
pub struct Discard;

impl ProgressSink for Discard {
    fn update(&mut self, _percent: f32) {}
}
