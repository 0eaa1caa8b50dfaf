//! Startup-loaded capabilities and the availability gate
//!
//! A [`Capability`] wraps a heavyweight external dependency (speech model,
//! translation client, synthesis engine). It is written once by its loader
//! and read by every request afterwards. A failed load is terminal for the
//! lifetime of the process; restarting is the only way to retry.

use std::fmt::Display;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

use serde::Serialize;

/// Which external subsystem a capability wraps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CapabilityKind {
    SpeechToText,
    Translation,
    SpeechSynthesis,
}

impl CapabilityKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SpeechToText => "speech-to-text",
            Self::Translation => "translation",
            Self::SpeechSynthesis => "speech-synthesis",
        }
    }
}

impl Display for CapabilityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Load state of a capability
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapabilityState {
    /// Loader has not started yet
    Unloaded,
    /// Loader is running
    Loading,
    /// Capability is usable
    Ready,
    /// Loader gave up; see [`Capability::last_error`]
    Failed,
}

impl CapabilityState {
    /// Status label used by health and model-info endpoints
    ///
    /// `Unloaded` shares the `loading` label, matching the gate.
    pub const fn status_label(self) -> &'static str {
        match self {
            Self::Ready => "loaded",
            Self::Unloaded | Self::Loading => "loading",
            Self::Failed => "not_loaded",
        }
    }
}

/// Result of the availability gate
///
/// Call sites branch three ways: proceed, report "still initializing", or
/// report unavailability.
#[derive(Debug)]
pub enum Availability<T: ?Sized> {
    Ready(Arc<T>),
    Loading,
    Unavailable { reason: Option<String> },
}

impl<T: ?Sized> Availability<T> {
    pub const fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }
}

/// Single-writer, many-reader handle to an external capability
///
/// Reads never block and never trigger a load. Concurrent loads are
/// rejected with an early return rather than a wait.
pub struct Capability<T: ?Sized> {
    kind: CapabilityKind,
    variant: String,
    loading: AtomicBool,
    outcome: OnceLock<Result<Arc<T>, String>>,
}

impl<T: ?Sized> std::fmt::Debug for Capability<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Capability")
            .field("kind", &self.kind)
            .field("variant", &self.variant)
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}

impl<T: ?Sized> Capability<T> {
    /// Create an unloaded capability
    pub fn new(kind: CapabilityKind, variant: impl Into<String>) -> Self {
        Self {
            kind,
            variant: variant.into(),
            loading: AtomicBool::new(false),
            outcome: OnceLock::new(),
        }
    }

    /// Create a capability that is already usable
    pub fn ready(kind: CapabilityKind, variant: impl Into<String>, value: Arc<T>) -> Self {
        let capability = Self::new(kind, variant);
        let _ = capability.outcome.set(Ok(value));
        capability
    }

    /// Create a capability whose load already failed
    pub fn failed(kind: CapabilityKind, variant: impl Into<String>, error: impl Into<String>) -> Self {
        let capability = Self::new(kind, variant);
        let _ = capability.outcome.set(Err(error.into()));
        capability
    }

    pub const fn kind(&self) -> CapabilityKind {
        self.kind
    }

    /// Configured size or variant (e.g. the speech model size)
    pub fn variant(&self) -> &str {
        &self.variant
    }

    /// Current load state
    pub fn state(&self) -> CapabilityState {
        match self.outcome.get() {
            Some(Ok(_)) => CapabilityState::Ready,
            Some(Err(_)) => CapabilityState::Failed,
            None if self.loading.load(Ordering::Acquire) => CapabilityState::Loading,
            None => CapabilityState::Unloaded,
        }
    }

    /// Error recorded by a failed load
    pub fn last_error(&self) -> Option<&str> {
        match self.outcome.get() {
            Some(Err(e)) => Some(e.as_str()),
            _ => None,
        }
    }

    /// Availability gate: a pure, O(1) read of the current state
    ///
    /// `Unloaded` reports as `Loading` since every service starts its loader
    /// right after binding.
    pub fn check_ready(&self) -> Availability<T> {
        match self.outcome.get() {
            Some(Ok(value)) => Availability::Ready(Arc::clone(value)),
            Some(Err(e)) => Availability::Unavailable {
                reason: Some(e.clone()),
            },
            None => Availability::Loading,
        }
    }

    /// Run the loader exactly once
    ///
    /// A call made while another load is in flight, or after the outcome is
    /// recorded, returns the current state without invoking `loader`.
    pub async fn load<F, Fut, E>(&self, loader: F) -> CapabilityState
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Arc<T>, E>>,
        E: Display,
    {
        if self.outcome.get().is_some() || self.loading.swap(true, Ordering::AcqRel) {
            tracing::debug!(capability = %self.kind, "load already attempted, skipping");
            return self.state();
        }

        tracing::info!(capability = %self.kind, variant = %self.variant, "loading capability");

        let guard = LoadGuard { capability: self };
        let outcome = loader().await.map_err(|e| e.to_string());

        match &outcome {
            Ok(_) => tracing::info!(capability = %self.kind, variant = %self.variant, "capability ready"),
            Err(e) => tracing::error!(
                capability = %self.kind,
                variant = %self.variant,
                error = %e,
                "capability failed to load, running degraded"
            ),
        }

        let _ = self.outcome.set(outcome);
        drop(guard);

        self.state()
    }
}

/// Clears the loading flag when a load ends, however it ends
///
/// A loader that panics or is dropped mid-flight records a failed outcome
/// so the capability never reports `Loading` forever.
struct LoadGuard<'a, T: ?Sized> {
    capability: &'a Capability<T>,
}

impl<T: ?Sized> Drop for LoadGuard<'_, T> {
    fn drop(&mut self) {
        let capability = self.capability;

        if capability.outcome.get().is_none() {
            tracing::error!(
                capability = %capability.kind,
                variant = %capability.variant,
                "capability loader aborted, running degraded"
            );
            let _ = capability.outcome.set(Err("loader aborted before completing".to_owned()));
        }

        capability.loading.store(false, Ordering::Release);
    }
}
