use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle of the one product fetch the page depends on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum LoadingState {
    #[default]
    Loading,
    Ready,
    /// The store answered but has no product to show.
    NotFound,
    Error(String),
}

impl LoadingState {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadingState::Loading)
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, LoadingState::Ready)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, LoadingState::Error(_))
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            LoadingState::Error(msg) => Some(msg),
            _ => None,
        }
    }

    pub fn can_retry(&self) -> bool {
        matches!(self, LoadingState::Error(_) | LoadingState::NotFound)
    }
}

impl fmt::Display for LoadingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadingState::Loading => write!(f, "Loading"),
            LoadingState::Ready => write!(f, "Ready"),
            LoadingState::NotFound => write!(f, "Not found"),
            LoadingState::Error(msg) => write!(f, "Error: {}", msg),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadingEvent {
    StartLoading,
    LoadComplete,
    NothingFound,
    LoadError(String),
    RetryRequested,
}

impl LoadingEvent {
    pub fn apply_to_state(self, current_state: LoadingState) -> LoadingState {
        match (self, current_state) {
            (LoadingEvent::StartLoading, _) => LoadingState::Loading,
            (LoadingEvent::LoadComplete, _) => LoadingState::Ready,
            (LoadingEvent::NothingFound, _) => LoadingState::NotFound,
            (LoadingEvent::LoadError(msg), _) => LoadingState::Error(msg),
            (LoadingEvent::RetryRequested, state) if state.can_retry() => LoadingState::Loading,
            (LoadingEvent::RetryRequested, state) => state, // No change while loading or ready
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loading_state_properties() {
        let loading = LoadingState::Loading;
        assert!(loading.is_loading());
        assert!(!loading.is_ready());
        assert!(!loading.is_error());

        let ready = LoadingState::Ready;
        assert!(!ready.is_loading());
        assert!(ready.is_ready());

        let error = LoadingState::Error("HTTP error! status: 500".to_string());
        assert!(error.is_error());
        assert_eq!(error.error_message(), Some("HTTP error! status: 500"));
    }

    #[test]
    fn test_loading_events() {
        let state = LoadingState::Loading;

        let new_state = LoadingEvent::LoadComplete.apply_to_state(state.clone());
        assert_eq!(new_state, LoadingState::Ready);

        let new_state = LoadingEvent::NothingFound.apply_to_state(state.clone());
        assert_eq!(new_state, LoadingState::NotFound);

        let new_state = LoadingEvent::LoadError("Failed".to_string()).apply_to_state(state);
        assert_eq!(new_state, LoadingState::Error("Failed".to_string()));
    }

    #[test]
    fn test_retry_only_from_terminal_failures() {
        let error = LoadingState::Error("Failed".to_string());
        assert_eq!(
            LoadingEvent::RetryRequested.apply_to_state(error),
            LoadingState::Loading
        );
        assert_eq!(
            LoadingEvent::RetryRequested.apply_to_state(LoadingState::NotFound),
            LoadingState::Loading
        );
        assert_eq!(
            LoadingEvent::RetryRequested.apply_to_state(LoadingState::Ready),
            LoadingState::Ready
        );
        assert!(!LoadingState::Loading.can_retry());
    }

    #[test]
    fn test_display_formatting() {
        assert_eq!(LoadingState::Loading.to_string(), "Loading");
        assert_eq!(LoadingState::NotFound.to_string(), "Not found");
        assert_eq!(
            LoadingState::Error("Network error".to_string()).to_string(),
            "Error: Network error"
        );
    }

    #[test]
    fn test_default_state() {
        assert_eq!(LoadingState::default(), LoadingState::Loading);
    }
}
