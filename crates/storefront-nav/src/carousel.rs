/// How far a released offset may sit from a snap point and still count as on it.
const SNAP_TOLERANCE: f32 = 0.001;

/// Notification queued by a carousel for whoever owns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarouselEvent {
    /// The snapped item changed, by drag or by a programmatic scroll.
    Select(usize),
    /// The item count was re-measured.
    ReInit(usize),
}

impl CarouselEvent {
    pub fn index(self) -> usize {
        match self {
            CarouselEvent::Select(idx) | CarouselEvent::ReInit(idx) => idx,
        }
    }
}

/// A horizontally scrolling, snap based sequence of items.
///
/// The controller never wraps around. It knows nothing about other carousels:
/// it only records where it rests, queues notifications and remembers the last
/// programmatic scroll so the view can move the real scrollable.
#[derive(Debug, Clone, Default)]
pub struct CarouselController {
    len: usize,
    cur_idx: usize,
    events: Vec<CarouselEvent>,
    scroll_request: Option<usize>,
}

impl CarouselController {
    pub fn new(len: usize) -> Self {
        Self {
            len,
            ..Self::default()
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn current_index(&self) -> usize {
        self.cur_idx
    }

    pub fn can_scroll_prev(&self) -> bool {
        self.len > 0 && self.cur_idx > 0
    }

    pub fn can_scroll_next(&self) -> bool {
        self.cur_idx + 1 < self.len
    }

    /// Scroll to `idx`. Out of range indices are ignored.
    pub fn scroll_to(&mut self, idx: usize) -> bool {
        if idx >= self.len {
            return false;
        }

        self.scroll_request = Some(idx);
        self.move_to(idx);
        true
    }

    pub fn scroll_prev(&mut self) -> bool {
        if !self.can_scroll_prev() {
            return false;
        }

        self.scroll_to(self.cur_idx - 1)
    }

    pub fn scroll_next(&mut self) -> bool {
        if !self.can_scroll_next() {
            return false;
        }

        self.scroll_to(self.cur_idx + 1)
    }

    /// A drag gesture came to rest on `idx`.
    pub fn settle(&mut self, idx: usize) {
        if idx < self.len {
            self.move_to(idx);
        }
    }

    /// A drag gesture was released at `relative_x`.
    ///
    /// Rests on the nearest item and, when the offset lies between two items,
    /// leaves a scroll request so the view snaps onto it.
    pub fn settle_at(&mut self, relative_x: f32) -> usize {
        let idx = self.snap_index(relative_x);
        if self.is_empty() {
            return idx;
        }

        self.settle(idx);

        let aligned = relative_x.is_finite()
            && (self.relative_offset(idx) - relative_x).abs() <= SNAP_TOLERANCE;
        if !aligned {
            self.scroll_request = Some(idx);
        }

        idx
    }

    /// Re-measure with a new item count, keeping the position when it still fits.
    pub fn reinit(&mut self, len: usize) {
        self.len = len;
        self.cur_idx = self.cur_idx.min(len.saturating_sub(1));
        if self.scroll_request.is_some_and(|idx| idx >= len) {
            self.scroll_request = None;
        }
        self.events.push(CarouselEvent::ReInit(self.cur_idx));
    }

    /// Nearest snap index for a relative horizontal offset in `[0, 1]`.
    pub fn snap_index(&self, relative_x: f32) -> usize {
        if self.len <= 1 || !relative_x.is_finite() {
            return 0;
        }

        let last = (self.len - 1) as f32;
        (relative_x.clamp(0.0, 1.0) * last).round() as usize
    }

    /// Relative horizontal offset that puts `idx` in view.
    pub fn relative_offset(&self, idx: usize) -> f32 {
        if self.len <= 1 {
            return 0.0;
        }

        idx.min(self.len - 1) as f32 / (self.len - 1) as f32
    }

    pub fn has_events(&self) -> bool {
        !self.events.is_empty()
    }

    pub fn drain_events(&mut self) -> Vec<CarouselEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn take_scroll_request(&mut self) -> Option<usize> {
        self.scroll_request.take()
    }

    fn move_to(&mut self, idx: usize) {
        if idx != self.cur_idx {
            self.cur_idx = idx;
            self.events.push(CarouselEvent::Select(idx));
        }
    }
}
