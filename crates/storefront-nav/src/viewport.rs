use storefront_types::Layout;

/// Classifies the window as wide or narrow against one breakpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewportClassifier {
    threshold: f32,
    width: Option<f32>,
    is_wide: bool,
    listening: bool,
}

impl ViewportClassifier {
    /// Evaluates `width` right away so the first frame already has the right
    /// layout. Without a width (headless, not measured yet) the layout is narrow.
    pub fn new(threshold: f32, width: Option<f32>) -> Self {
        Self {
            threshold,
            width,
            is_wide: Self::classify(threshold, width),
            listening: true,
        }
    }

    pub fn is_wide(&self) -> bool {
        self.is_wide
    }

    pub fn layout(&self) -> Layout {
        Layout::from_wide(self.is_wide)
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    pub fn width(&self) -> Option<f32> {
        self.width
    }

    pub fn is_listening(&self) -> bool {
        self.listening
    }

    /// Record a new window width. Returns true when the classification flipped.
    pub fn observe(&mut self, width: f32) -> bool {
        if !self.listening {
            return false;
        }

        self.width = Some(width);
        self.reevaluate()
    }

    /// Move the breakpoint and re-evaluate against the last known width.
    pub fn set_threshold(&mut self, threshold: f32) -> bool {
        if !self.listening {
            return false;
        }

        self.threshold = threshold;
        self.reevaluate()
    }

    /// Stop reacting to observations.
    pub fn teardown(&mut self) {
        self.listening = false;
    }

    fn reevaluate(&mut self) -> bool {
        let is_wide = Self::classify(self.threshold, self.width);
        let flipped = is_wide != self.is_wide;
        self.is_wide = is_wide;
        flipped
    }

    fn classify(threshold: f32, width: Option<f32>) -> bool {
        width.is_some_and(|width| width.is_finite() && width >= threshold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_evaluation() {
        assert!(ViewportClassifier::new(768.0, Some(1024.0)).is_wide());
        assert!(ViewportClassifier::new(768.0, Some(768.0)).is_wide());
        assert!(!ViewportClassifier::new(768.0, Some(767.5)).is_wide());
    }

    #[test]
    fn test_unavailable_defaults_to_narrow() {
        let classifier = ViewportClassifier::new(768.0, None);
        assert!(!classifier.is_wide());
        assert_eq!(classifier.layout(), Layout::Narrow);
    }

    #[test]
    fn test_observe_reports_flips_only() {
        let mut classifier = ViewportClassifier::new(768.0, Some(400.0));
        assert!(!classifier.observe(500.0));
        assert!(classifier.observe(900.0));
        assert!(!classifier.observe(1200.0));
        assert!(classifier.observe(700.0));
        assert_eq!(classifier.layout(), Layout::Narrow);
    }

    #[test]
    fn test_threshold_change_reevaluates() {
        let mut classifier = ViewportClassifier::new(768.0, Some(800.0));
        assert!(classifier.set_threshold(1024.0));
        assert!(!classifier.is_wide());
    }

    #[test]
    fn test_teardown_ignores_further_changes() {
        let mut classifier = ViewportClassifier::new(768.0, Some(400.0));
        classifier.teardown();

        assert!(!classifier.observe(1200.0));
        assert!(!classifier.is_wide());
        assert!(!classifier.is_listening());
    }
}
