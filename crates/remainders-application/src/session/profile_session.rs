//! Event-loop facade over the profile state machine.
//!
//! `ProfileSession` turns user actions into [`ProfileEvent`]s, applies them
//! to [`ProfileState`] and carries out the returned [`Effects`]: saving the
//! profile, building the URL and arming the copy-feedback timer.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;

use remainders_core::clipboard::{ClipboardBridge, ClipboardError};
use remainders_core::device::DeviceProfile;
use remainders_core::profile::{
    Effects, FeedbackTicket, GenerationTrigger, ProfileEvent, ProfileState, ProfileStore,
    ViewMode,
};
use remainders_core::wallpaper::UrlBuilder;

use super::snapshot::ProfileSnapshot;

/// One user session of the profile screen.
///
/// State mutations are serialized through an async mutex, so user actions
/// and timer callbacks never interleave.
pub struct ProfileSession {
    state: Arc<Mutex<ProfileState>>,
    store: Arc<dyn ProfileStore>,
    url_builder: UrlBuilder,
    clipboard: Arc<dyn ClipboardBridge>,
    feedback_delay: Duration,
    shutdown: CancellationToken,
}

impl ProfileSession {
    /// Creates a session and hydrates it from the store.
    ///
    /// This is the only way to build a session, so the stored profile is
    /// always in place before the first user edit.
    pub async fn start(
        store: Arc<dyn ProfileStore>,
        url_builder: UrlBuilder,
        clipboard: Arc<dyn ClipboardBridge>,
        feedback_delay: Duration,
    ) -> Self {
        let session = Self {
            state: Arc::new(Mutex::new(ProfileState::new())),
            store,
            url_builder,
            clipboard,
            feedback_delay,
            shutdown: CancellationToken::new(),
        };
        session.hydrate().await;
        session
    }

    /// Loads the stored profile into the session.
    ///
    /// A load failure counts as "no saved profile".
    async fn hydrate(&self) {
        let stored = match self.store.load() {
            Ok(stored) => {
                tracing::debug!(
                    "[ProfileSession] hydrating, stored profile present: {}",
                    stored.is_some()
                );
                stored
            }
            Err(e) => {
                tracing::warn!("[ProfileSession] failed to load profile: {}", e);
                None
            }
        };

        self.dispatch(ProfileEvent::Hydrated(stored)).await;
    }

    pub async fn set_birth_date(&self, birth_date: impl Into<String>) {
        self.dispatch(ProfileEvent::BirthDateChanged(birth_date.into()))
            .await;
    }

    pub async fn select_device(&self, device: Option<DeviceProfile>) {
        self.dispatch(ProfileEvent::DeviceSelected(device)).await;
    }

    pub async fn set_view_mode(&self, view_mode: ViewMode) {
        self.dispatch(ProfileEvent::ViewModeChanged(view_mode)).await;
    }

    /// Regenerates the URL from the current selection.
    ///
    /// Returns the new URL, or `None` when the profile is incomplete and the
    /// action is disabled.
    pub async fn generate(&self) -> Option<String> {
        let mut state = self.state.lock().await;
        let effects = state.apply(ProfileEvent::GenerateRequested);
        self.perform(&mut state, effects);
        state.wallpaper_url().map(str::to_string)
    }

    /// Copies the current URL to the clipboard.
    ///
    /// On success the acknowledgment is raised and a reset is scheduled,
    /// unless the selection changed during the write. On failure the error is
    /// logged and returned; the acknowledgment stays off.
    pub async fn copy_url(&self) -> Result<(), ClipboardError> {
        // Read the URL and release the lock before suspending on the clipboard.
        let url = {
            let state = self.state.lock().await;
            state.wallpaper_url().map(str::to_string).unwrap_or_default()
        };

        match self.clipboard.write_text(&url).await {
            Ok(()) => {
                let mut state = self.state.lock().await;
                // The selection may have changed while the clipboard was busy.
                if state.wallpaper_url() != Some(url.as_str()) {
                    tracing::debug!(
                        "[ProfileSession] copied URL went stale during the write, no acknowledgment"
                    );
                    return Ok(());
                }
                tracing::info!("[ProfileSession] wallpaper URL copied");
                let effects = state.apply(ProfileEvent::CopySucceeded);
                self.perform(&mut state, effects);
                Ok(())
            }
            Err(e) => {
                tracing::warn!("[ProfileSession] failed to copy URL: {}", e);
                Err(e)
            }
        }
    }

    /// Current view of the session.
    pub async fn snapshot(&self) -> ProfileSnapshot {
        let state = self.state.lock().await;
        ProfileSnapshot::from(&*state)
    }

    /// Stops pending timers. Nothing touches the state after this returns.
    pub fn shutdown(&self) {
        self.shutdown.cancel();
    }

    pub fn is_shut_down(&self) -> bool {
        self.shutdown.is_cancelled()
    }

    async fn dispatch(&self, event: ProfileEvent) {
        let mut state = self.state.lock().await;
        tracing::debug!("[ProfileSession] event: {:?}", event);
        let effects = state.apply(event);
        self.perform(&mut state, effects);
    }

    fn perform(&self, state: &mut ProfileState, effects: Effects) {
        if let Some(profile) = effects.persist {
            match self.store.save(&profile) {
                Ok(()) => tracing::info!("[ProfileSession] profile saved"),
                Err(e) => tracing::warn!("[ProfileSession] failed to save profile: {}", e),
            }
        }

        if let Some(trigger) = effects.generate {
            let inputs = state.profile().clone();
            let url = self.url_builder.build_for(&inputs);
            match trigger {
                GenerationTrigger::Automatic => {
                    tracing::info!("[ProfileSession] auto-generated wallpaper URL: {}", url)
                }
                GenerationTrigger::Explicit => {
                    tracing::info!("[ProfileSession] generated wallpaper URL: {}", url)
                }
            }
            let follow_up = state.apply(ProfileEvent::UrlGenerated { url, inputs });
            debug_assert!(follow_up.is_empty());
        }

        if let Some(ticket) = effects.arm_feedback_reset {
            self.arm_feedback_reset(ticket);
        }
    }

    fn arm_feedback_reset(&self, ticket: FeedbackTicket) {
        let state = Arc::clone(&self.state);
        let shutdown = self.shutdown.clone();
        let delay = self.feedback_delay;

        tokio::spawn(async move {
            tokio::select! {
                _ = shutdown.cancelled() => {
                    tracing::debug!("[ProfileSession] feedback timer {:?} dropped on shutdown", ticket);
                }
                _ = tokio::time::sleep(delay) => {
                    let mut state = state.lock().await;
                    if shutdown.is_cancelled() {
                        return;
                    }
                    state.apply(ProfileEvent::CopyFeedbackExpired(ticket));
                }
            }
        });
    }
}

impl Drop for ProfileSession {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}
