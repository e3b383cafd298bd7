/// Full size overlay for one image, independent of carousel navigation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LightboxController {
    expanded: Option<usize>,
    count: usize,
}

impl LightboxController {
    pub fn new(count: usize) -> Self {
        Self {
            expanded: None,
            count,
        }
    }

    /// Open on `idx`. Ignored unless `idx` is a current image index.
    pub fn open(&mut self, idx: usize) -> bool {
        if idx >= self.count {
            return false;
        }

        self.expanded = Some(idx);
        true
    }

    pub fn close(&mut self) {
        self.expanded = None;
    }

    pub fn is_open(&self) -> bool {
        self.expanded_index().is_some()
    }

    pub fn expanded_index(&self) -> Option<usize> {
        self.expanded.filter(|idx| *idx < self.count)
    }

    /// The image list changed size; an index that no longer exists is dropped.
    pub fn retain(&mut self, count: usize) {
        self.count = count;
        if self.expanded.is_some_and(|idx| idx >= count) {
            self.expanded = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_and_close() {
        let mut lightbox = LightboxController::new(3);
        assert!(lightbox.open(1));
        assert_eq!(lightbox.expanded_index(), Some(1));

        lightbox.close();
        assert_eq!(lightbox.expanded_index(), None);
        assert!(!lightbox.is_open());
    }

    #[test]
    fn test_open_out_of_range_is_noop() {
        let mut lightbox = LightboxController::new(3);
        lightbox.open(2);
        assert!(!lightbox.open(3));
        assert_eq!(lightbox.expanded_index(), Some(2));

        let mut empty = LightboxController::new(0);
        assert!(!empty.open(0));
        assert!(!empty.is_open());
    }

    #[test]
    fn test_shrinking_list_closes_stale_index() {
        let mut lightbox = LightboxController::new(5);
        lightbox.open(4);
        lightbox.retain(3);
        assert_eq!(lightbox.expanded_index(), None);

        lightbox.open(1);
        lightbox.retain(0);
        assert_eq!(lightbox.expanded_index(), None);
    }

    #[test]
    fn test_growing_list_keeps_index() {
        let mut lightbox = LightboxController::new(2);
        lightbox.open(1);
        lightbox.retain(4);
        assert_eq!(lightbox.expanded_index(), Some(1));
    }
}
