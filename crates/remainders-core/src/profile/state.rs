//! In-session profile state machine.
//!
//! Every mutation goes through [`ProfileState::apply`], which updates the
//! state and returns the [`Effects`] the caller must carry out (persist the
//! profile, generate the URL, arm the copy-feedback timer). The state itself
//! never performs I/O.

use crate::device::DeviceProfile;

use super::model::{UserProfile, ViewMode};

/// What caused a URL generation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationTrigger {
    /// Fired by the state machine the first time the profile is complete.
    Automatic,
    /// Requested by the user.
    Explicit,
}

/// Identifies one armed copy-feedback timer.
///
/// Tickets increase with every successful copy; only the newest one may
/// clear the acknowledgment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FeedbackTicket(u64);

/// Inputs to the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileEvent {
    /// Result of the startup load. `None` means nothing usable was stored.
    ///
    /// Expected as the first event: a stored profile replaces whatever was
    /// set before it, and only the first one is applied.
    Hydrated(Option<UserProfile>),
    BirthDateChanged(String),
    DeviceSelected(Option<DeviceProfile>),
    ViewModeChanged(ViewMode),
    /// The user pressed "generate".
    GenerateRequested,
    /// A URL was built from `inputs`.
    UrlGenerated { url: String, inputs: UserProfile },
    /// The clipboard accepted the URL.
    CopySucceeded,
    /// The feedback timer armed for this ticket ran out.
    CopyFeedbackExpired(FeedbackTicket),
}

/// Side effects requested by a transition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Effects {
    /// Save this profile to the store.
    pub persist: Option<UserProfile>,
    /// Build the URL from the current profile.
    pub generate: Option<GenerationTrigger>,
    /// Schedule a `CopyFeedbackExpired` for this ticket.
    pub arm_feedback_reset: Option<FeedbackTicket>,
}

impl Effects {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.persist.is_none() && self.generate.is_none() && self.arm_feedback_reset.is_none()
    }
}

/// A generated URL together with the profile it was derived from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedUrl {
    url: String,
    inputs: UserProfile,
}

impl DerivedUrl {
    pub fn url(&self) -> &str {
        &self.url
    }

    /// True while `profile` is exactly the profile this URL was built from.
    pub fn is_current_for(&self, profile: &UserProfile) -> bool {
        &self.inputs == profile
    }
}

/// Authoritative in-session values plus the reconciliation rules.
#[derive(Debug, Clone, Default)]
pub struct ProfileState {
    profile: UserProfile,
    derived: Option<DerivedUrl>,
    copied: bool,
    hydrated: bool,
    // Set once the first generation of the session has been requested,
    // automatic or explicit. Automatic generation never fires after that.
    generated_this_session: bool,
    last_ticket: u64,
}

impl ProfileState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    pub fn birth_date(&self) -> &str {
        &self.profile.birth_date
    }

    pub fn device(&self) -> Option<&DeviceProfile> {
        self.profile.device.as_ref()
    }

    pub fn view_mode(&self) -> ViewMode {
        self.profile.view_mode
    }

    pub fn is_complete(&self) -> bool {
        self.profile.is_complete()
    }

    /// Whether the generate action is enabled.
    pub fn can_generate(&self) -> bool {
        self.is_complete()
    }

    pub fn has_generated(&self) -> bool {
        self.generated_this_session
    }

    /// The copy acknowledgment flag.
    pub fn copied(&self) -> bool {
        self.copied
    }

    /// The generated URL, if it still matches the current selection.
    ///
    /// A URL built before the latest field change is never returned.
    pub fn wallpaper_url(&self) -> Option<&str> {
        self.derived
            .as_ref()
            .filter(|derived| derived.is_current_for(&self.profile))
            .map(DerivedUrl::url)
    }

    /// The last generated URL regardless of freshness.
    pub fn derived_url(&self) -> Option<&DerivedUrl> {
        self.derived.as_ref()
    }

    /// Applies one event and returns the effects the caller must perform.
    pub fn apply(&mut self, event: ProfileEvent) -> Effects {
        match event {
            ProfileEvent::Hydrated(stored) => self.hydrate(stored),
            ProfileEvent::BirthDateChanged(birth_date) => {
                if self.profile.birth_date == birth_date {
                    return Effects::none();
                }
                self.profile.birth_date = birth_date;
                self.after_field_change()
            }
            ProfileEvent::DeviceSelected(device) => {
                if self.profile.device == device {
                    return Effects::none();
                }
                self.profile.device = device;
                self.after_field_change()
            }
            ProfileEvent::ViewModeChanged(view_mode) => {
                if self.profile.view_mode == view_mode {
                    return Effects::none();
                }
                self.profile.view_mode = view_mode;
                self.after_field_change()
            }
            ProfileEvent::GenerateRequested => {
                if !self.is_complete() {
                    tracing::debug!("[ProfileState] generate ignored: profile incomplete");
                    return Effects::none();
                }
                self.generated_this_session = true;
                Effects {
                    generate: Some(GenerationTrigger::Explicit),
                    ..Effects::default()
                }
            }
            ProfileEvent::UrlGenerated { url, inputs } => {
                self.generated_this_session = true;
                self.derived = Some(DerivedUrl { url, inputs });
                Effects::none()
            }
            ProfileEvent::CopySucceeded => {
                self.copied = true;
                self.last_ticket += 1;
                Effects {
                    arm_feedback_reset: Some(FeedbackTicket(self.last_ticket)),
                    ..Effects::default()
                }
            }
            ProfileEvent::CopyFeedbackExpired(ticket) => {
                if ticket == FeedbackTicket(self.last_ticket) {
                    self.copied = false;
                } else {
                    tracing::debug!(
                        "[ProfileState] stale feedback timer {:?} ignored (latest {})",
                        ticket,
                        self.last_ticket
                    );
                }
                Effects::none()
            }
        }
    }

    fn hydrate(&mut self, stored: Option<UserProfile>) -> Effects {
        if self.hydrated {
            tracing::debug!("[ProfileState] hydration already done, ignoring");
            return Effects::none();
        }
        self.hydrated = true;

        if let Some(profile) = stored {
            self.profile = profile;
        }

        // Loading is not a change worth writing back, but a complete stored
        // profile still gets its URL without further user action.
        let mut effects = Effects::none();
        effects.generate = self.auto_generation();
        effects
    }

    fn after_field_change(&mut self) -> Effects {
        let mut effects = Effects::none();
        if !self.is_complete() {
            return effects;
        }

        if self.hydrated {
            effects.persist = Some(self.profile.clone());
        }
        effects.generate = self.auto_generation();
        effects
    }

    fn auto_generation(&mut self) -> Option<GenerationTrigger> {
        if self.is_complete() && !self.generated_this_session {
            self.generated_this_session = true;
            Some(GenerationTrigger::Automatic)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn iphone() -> DeviceProfile {
        DeviceProfile::new("Apple", "iPhone 15", 1179, 2556).unwrap()
    }

    fn hydrated_empty() -> ProfileState {
        let mut state = ProfileState::new();
        let effects = state.apply(ProfileEvent::Hydrated(None));
        assert!(effects.is_empty());
        state
    }

    /// Mirrors what the session does with a generate effect.
    fn complete_generation(state: &mut ProfileState, url: &str) {
        let inputs = state.profile().clone();
        state.apply(ProfileEvent::UrlGenerated {
            url: url.to_string(),
            inputs,
        });
    }

    #[test]
    fn test_hydration_with_stored_profile_auto_generates() {
        let mut state = ProfileState::new();
        let stored = UserProfile::new("1990-05-12", Some(iphone()), ViewMode::Life);

        let effects = state.apply(ProfileEvent::Hydrated(Some(stored.clone())));

        assert_eq!(state.profile(), &stored);
        assert_eq!(effects.generate, Some(GenerationTrigger::Automatic));
        assert!(effects.persist.is_none());
    }

    #[test]
    fn test_hydration_runs_once() {
        let mut state = hydrated_empty();
        let stored = UserProfile::new("1990-05-12", Some(iphone()), ViewMode::Life);

        let effects = state.apply(ProfileEvent::Hydrated(Some(stored)));

        assert!(effects.is_empty());
        assert!(state.device().is_none());
    }

    #[test]
    fn test_incomplete_changes_are_not_persisted() {
        let mut state = hydrated_empty();

        let effects = state.apply(ProfileEvent::BirthDateChanged("2000-01-01".into()));

        assert!(effects.is_empty());
        assert!(!state.is_complete());
        assert!(!state.can_generate());
    }

    #[test]
    fn test_completing_profile_persists_and_auto_generates() {
        let mut state = hydrated_empty();
        state.apply(ProfileEvent::BirthDateChanged("1990-05-12".into()));

        let effects = state.apply(ProfileEvent::DeviceSelected(Some(iphone())));

        assert_eq!(
            effects.persist,
            Some(UserProfile::new("1990-05-12", Some(iphone()), ViewMode::Life))
        );
        assert_eq!(effects.generate, Some(GenerationTrigger::Automatic));
    }

    #[test]
    fn test_auto_generation_fires_once_per_session() {
        let mut state = hydrated_empty();
        state.apply(ProfileEvent::DeviceSelected(Some(iphone())));
        let first = state.apply(ProfileEvent::BirthDateChanged("1990-05-12".into()));
        assert_eq!(first.generate, Some(GenerationTrigger::Automatic));
        complete_generation(&mut state, "/api/wallpaper?a");

        let second = state.apply(ProfileEvent::BirthDateChanged("1991-01-01".into()));
        assert!(second.generate.is_none());
        assert!(second.persist.is_some());

        let third = state.apply(ProfileEvent::ViewModeChanged(ViewMode::Year));
        assert!(third.generate.is_none());
    }

    #[test]
    fn test_explicit_generation_always_allowed_when_complete() {
        let mut state = hydrated_empty();
        state.apply(ProfileEvent::ViewModeChanged(ViewMode::Year));
        state.apply(ProfileEvent::DeviceSelected(Some(iphone())));
        complete_generation(&mut state, "first");

        let effects = state.apply(ProfileEvent::GenerateRequested);
        assert_eq!(effects.generate, Some(GenerationTrigger::Explicit));

        let again = state.apply(ProfileEvent::GenerateRequested);
        assert_eq!(again.generate, Some(GenerationTrigger::Explicit));
    }

    #[test]
    fn test_generate_disabled_when_incomplete() {
        let mut state = hydrated_empty();
        state.apply(ProfileEvent::BirthDateChanged("2000-01-01".into()));

        let effects = state.apply(ProfileEvent::GenerateRequested);

        assert!(effects.is_empty());
        assert!(!state.has_generated());
    }

    #[test]
    fn test_explicit_generation_suppresses_later_auto_generation() {
        let mut state = hydrated_empty();
        state.apply(ProfileEvent::ViewModeChanged(ViewMode::Year));
        // Completing in year mode uses up the session's automatic generation.
        let effects = state.apply(ProfileEvent::DeviceSelected(Some(iphone())));
        assert_eq!(effects.generate, Some(GenerationTrigger::Automatic));
        complete_generation(&mut state, "year-url");

        state.apply(ProfileEvent::DeviceSelected(None));
        let effects = state.apply(ProfileEvent::DeviceSelected(Some(iphone())));
        assert!(effects.generate.is_none());
    }

    #[test]
    fn test_year_mode_does_not_need_birth_date() {
        let mut state = hydrated_empty();
        state.apply(ProfileEvent::ViewModeChanged(ViewMode::Year));

        let effects = state.apply(ProfileEvent::DeviceSelected(Some(iphone())));

        assert!(state.is_complete());
        assert_eq!(
            effects.persist,
            Some(UserProfile::new("", Some(iphone()), ViewMode::Year))
        );
    }

    #[test]
    fn test_unchanged_value_is_not_a_change() {
        let mut state = hydrated_empty();
        state.apply(ProfileEvent::BirthDateChanged("1990-05-12".into()));
        state.apply(ProfileEvent::DeviceSelected(Some(iphone())));

        let effects = state.apply(ProfileEvent::DeviceSelected(Some(iphone())));
        assert!(effects.is_empty());

        let effects = state.apply(ProfileEvent::ViewModeChanged(ViewMode::Life));
        assert!(effects.is_empty());
    }

    #[test]
    fn test_changes_before_hydration_are_held_in_memory() {
        let mut state = ProfileState::new();
        state.apply(ProfileEvent::ViewModeChanged(ViewMode::Year));

        let effects = state.apply(ProfileEvent::DeviceSelected(Some(iphone())));

        assert!(effects.persist.is_none());
        assert_eq!(effects.generate, Some(GenerationTrigger::Automatic));
    }

    #[test]
    fn test_stale_url_is_hidden_after_field_change() {
        let mut state = hydrated_empty();
        state.apply(ProfileEvent::BirthDateChanged("1990-05-12".into()));
        state.apply(ProfileEvent::DeviceSelected(Some(iphone())));
        complete_generation(&mut state, "url-1");
        assert_eq!(state.wallpaper_url(), Some("url-1"));

        state.apply(ProfileEvent::BirthDateChanged("1985-03-01".into()));
        assert_eq!(state.wallpaper_url(), None);
        assert_eq!(state.derived_url().map(DerivedUrl::url), Some("url-1"));

        // Reverting the change makes the cached URL valid again.
        state.apply(ProfileEvent::BirthDateChanged("1990-05-12".into()));
        assert_eq!(state.wallpaper_url(), Some("url-1"));
    }

    #[test]
    fn test_copy_feedback_cleared_by_latest_ticket_only() {
        let mut state = hydrated_empty();

        let first = state.apply(ProfileEvent::CopySucceeded).arm_feedback_reset.unwrap();
        let second = state.apply(ProfileEvent::CopySucceeded).arm_feedback_reset.unwrap();
        assert!(second > first);
        assert!(state.copied());

        state.apply(ProfileEvent::CopyFeedbackExpired(first));
        assert!(state.copied());

        state.apply(ProfileEvent::CopyFeedbackExpired(second));
        assert!(!state.copied());
    }

    #[test]
    fn test_scenario_no_device_life_mode() {
        let mut state = hydrated_empty();
        state.apply(ProfileEvent::ViewModeChanged(ViewMode::Life));
        let effects = state.apply(ProfileEvent::BirthDateChanged("2000-01-01".into()));

        assert!(!state.is_complete());
        assert!(!state.can_generate());
        assert!(effects.persist.is_none());
        assert!(state.apply(ProfileEvent::GenerateRequested).is_empty());
    }
}
