//! Selection state shared by the wide and narrow gallery layouts.
//!
//! Both layouts own an independent carousel. Only the carousel of the active
//! layout may change the selected image; every change is pushed one way into
//! the inactive carousel so it is already in place when the window crosses the
//! breakpoint.

use crate::{lightbox::LightboxController, normalize::normalize_images};
use storefront_nav::{CarouselController, ViewportClassifier};
use storefront_types::{DisplayImage, ImageRecord, Layout};

/// A programmatic scroll the view has to apply to a layout's scrollable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollRequest {
    pub layout: Layout,
    pub index: usize,
    pub relative_x: f32,
}

#[derive(Debug, Clone)]
pub struct MediaGallery {
    images: Vec<DisplayImage>,
    viewport: ViewportClassifier,
    wide: Option<CarouselController>,
    narrow: Option<CarouselController>,
    subscribed: Option<Layout>,
    selected: Option<usize>,
    can_scroll_prev: bool,
    can_scroll_next: bool,
    lightbox: LightboxController,
    /// Selection the wide layout's thumbnail strip was last scrolled to
    thumbnails_at: Option<usize>,
    torn_down: bool,
}

impl MediaGallery {
    /// A gallery with no images and no carousels mounted yet.
    pub fn new(viewport: ViewportClassifier) -> Self {
        Self {
            images: Vec::new(),
            viewport,
            wide: None,
            narrow: None,
            subscribed: None,
            selected: None,
            can_scroll_prev: false,
            can_scroll_next: false,
            lightbox: LightboxController::default(),
            thumbnails_at: None,
            torn_down: false,
        }
    }

    /// A gallery with both layout carousels mounted.
    pub fn mounted(viewport: ViewportClassifier) -> Self {
        let mut gallery = Self::new(viewport);
        gallery.mount(Layout::Wide);
        gallery.mount(Layout::Narrow);
        gallery
    }

    pub fn layout(&self) -> Layout {
        self.viewport.layout()
    }

    pub fn viewport(&self) -> &ViewportClassifier {
        &self.viewport
    }

    pub fn images(&self) -> &[DisplayImage] {
        &self.images
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Navigation controls (arrows, thumbnails, dots) are only shown for more than one image.
    pub fn has_multiple_images(&self) -> bool {
        self.images.len() > 1
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected.filter(|idx| *idx < self.images.len())
    }

    pub fn selected_image(&self) -> Option<&DisplayImage> {
        self.selected_index().and_then(|idx| self.images.get(idx))
    }

    pub fn can_scroll_prev(&self) -> bool {
        self.can_scroll_prev
    }

    pub fn can_scroll_next(&self) -> bool {
        self.can_scroll_next
    }

    pub fn carousel(&self, layout: Layout) -> Option<&CarouselController> {
        match layout {
            Layout::Wide => self.wide.as_ref(),
            Layout::Narrow => self.narrow.as_ref(),
        }
    }

    pub fn lightbox(&self) -> &LightboxController {
        &self.lightbox
    }

    pub fn expanded_image(&self) -> Option<&DisplayImage> {
        self.lightbox
            .expanded_index()
            .and_then(|idx| self.images.get(idx))
    }

    /// Title of the lightbox overlay.
    pub fn lightbox_title(&self) -> String {
        self.expanded_image()
            .map(|image| image.alt_text.clone())
            .unwrap_or_else(|| "Product image".to_string())
    }

    /// Replace the image list. Both carousels are re-measured.
    pub fn set_images(&mut self, records: &[ImageRecord]) {
        if self.torn_down {
            return;
        }

        self.images = normalize_images(records);
        self.thumbnails_at = None;
        let len = self.images.len();
        tracing::debug!("gallery now has {len} images");

        for carousel in [self.wide.as_mut(), self.narrow.as_mut()]
            .into_iter()
            .flatten()
        {
            carousel.reinit(len);
        }

        self.lightbox.retain(len);

        if len == 0 {
            self.selected = None;
            self.can_scroll_prev = false;
            self.can_scroll_next = false;
        } else if self.selected.is_some_and(|idx| idx >= len) {
            self.selected = None;
        }

        self.pump();
    }

    /// Attach the carousel of `layout`. Mounting twice is a no-op.
    pub fn mount(&mut self, layout: Layout) {
        if self.torn_down || self.carousel(layout).is_some() {
            return;
        }

        let len = self.images.len();
        *self.slot(layout) = Some(CarouselController::new(len));

        if layout == self.layout() {
            self.unsubscribe();
            self.subscribe(layout);
        } else {
            self.propagate();
        }

        self.pump();
    }

    pub fn unmount(&mut self, layout: Layout) {
        if self.subscribed == Some(layout) {
            self.unsubscribe();
        }

        *self.slot(layout) = None;
    }

    /// Feed a window width. Returns true when the active layout changed.
    pub fn on_viewport_width(&mut self, width: f32) -> bool {
        if self.torn_down || !self.viewport.observe(width) {
            return false;
        }

        self.on_layout_flip();
        true
    }

    pub fn set_breakpoint(&mut self, threshold: f32) -> bool {
        if self.torn_down || !self.viewport.set_threshold(threshold) {
            return false;
        }

        self.on_layout_flip();
        true
    }

    /// `layout`'s scrollable was dragged to `relative_x`.
    ///
    /// The carousel rests on the nearest image; an offset between two images
    /// leaves a scroll request that snaps the scrollable onto it.
    pub fn on_scrolled(&mut self, layout: Layout, relative_x: f32) {
        if let Some(carousel) = self.slot(layout).as_mut() {
            carousel.settle_at(relative_x);
        }

        self.pump();
    }

    /// Thumbnail click: scroll the active carousel to `idx`.
    pub fn select(&mut self, idx: usize) {
        let layout = self.layout();
        if let Some(carousel) = self.slot(layout).as_mut() {
            carousel.scroll_to(idx);
        }

        self.pump();
    }

    pub fn prev(&mut self) {
        let layout = self.layout();
        if let Some(carousel) = self.slot(layout).as_mut() {
            carousel.scroll_prev();
        }

        self.pump();
    }

    pub fn next(&mut self) {
        let layout = self.layout();
        if let Some(carousel) = self.slot(layout).as_mut() {
            carousel.scroll_next();
        }

        self.pump();
    }

    pub fn open_lightbox(&mut self, idx: usize) -> bool {
        self.lightbox.open(idx)
    }

    pub fn close_lightbox(&mut self) {
        self.lightbox.close();
    }

    /// Process queued carousel notifications.
    ///
    /// Notifications from the inactive carousel are discarded; it only ever
    /// receives writes. A layout that could not be subscribed earlier because
    /// its carousel was missing is retried here.
    pub fn pump(&mut self) {
        if self.torn_down {
            return;
        }

        let inactive = self.layout().other();
        let strayed = self
            .slot(inactive)
            .as_mut()
            .is_some_and(|carousel| !carousel.drain_events().is_empty());

        // The inactive carousel moved on its own, put it back under the selection
        if strayed {
            self.propagate();
        }

        if self.subscribed.is_none() {
            self.subscribe(self.layout());
            return;
        }

        let changed = match self.subscribed {
            Some(layout) => self
                .slot(layout)
                .as_mut()
                .is_some_and(|carousel| !carousel.drain_events().is_empty()),
            None => false,
        };

        if changed {
            self.read_active();
        }
    }

    /// Scrolls the view still has to perform on the active layout.
    pub fn take_scroll_requests(&mut self) -> Vec<ScrollRequest> {
        let active = self.layout();
        let mut requests = Vec::new();

        for layout in [Layout::Wide, Layout::Narrow] {
            let Some(carousel) = self.slot(layout).as_mut() else {
                continue;
            };

            // The inactive layout is not on screen, its position is re-applied on flip
            let Some(index) = carousel.take_scroll_request() else {
                continue;
            };

            if layout == active {
                requests.push(ScrollRequest {
                    layout,
                    index,
                    relative_x: carousel.relative_offset(index),
                });
            }
        }

        requests
    }

    /// Relative offset the wide thumbnail strip has to move to so the selected
    /// thumbnail stays in view, once per selection change.
    pub fn take_thumbnail_scroll(&mut self) -> Option<f32> {
        if self.torn_down || self.layout() != Layout::Wide || !self.has_multiple_images() {
            return None;
        }

        let idx = self.selected_index()?;
        if self.thumbnails_at == Some(idx) {
            return None;
        }

        self.thumbnails_at = Some(idx);
        Some(idx as f32 / (self.images.len() - 1) as f32)
    }

    /// Drop every subscription and detach both carousels.
    pub fn teardown(&mut self) {
        self.unsubscribe();
        self.wide = None;
        self.narrow = None;
        self.viewport.teardown();
        self.torn_down = true;
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    fn on_layout_flip(&mut self) {
        let layout = self.layout();
        tracing::info!("gallery layout switched to {layout:?}");

        // The thumbnail strip is rebuilt from the start when the wide layout returns
        self.thumbnails_at = None;

        // Old subscription must be gone before the new one starts
        self.unsubscribe();
        self.subscribe(layout);
    }

    fn subscribe(&mut self, layout: Layout) {
        let selected = self.selected;
        let Some(carousel) = self.slot(layout).as_mut() else {
            tracing::debug!("{layout:?} carousel not mounted yet, deferring");
            return;
        };

        // Keep continuity: the newly active carousel starts where the selection is
        if let Some(idx) = selected
            && carousel.current_index() != idx
        {
            carousel.scroll_to(idx);
        }

        // Anything queued while inactive is stale
        carousel.drain_events();

        // Its scrollable was off screen, put it where the controller says
        if !carousel.is_empty() {
            let idx = carousel.current_index();
            carousel.scroll_to(idx);
        }

        self.subscribed = Some(layout);
        self.read_active();
    }

    fn unsubscribe(&mut self) {
        if let Some(layout) = self.subscribed.take()
            && let Some(carousel) = self.slot(layout).as_mut()
        {
            carousel.drain_events();
        }
    }

    fn read_active(&mut self) {
        let Some(carousel) = self.subscribed.and_then(|layout| self.carousel(layout)) else {
            return;
        };

        let selected = (!carousel.is_empty()).then(|| carousel.current_index());
        let (can_prev, can_next) = (carousel.can_scroll_prev(), carousel.can_scroll_next());
        self.can_scroll_prev = can_prev;
        self.can_scroll_next = can_next;

        if selected != self.selected {
            tracing::debug!("selected image {:?} -> {:?}", self.selected, selected);
            self.selected = selected;
        }

        self.propagate();
    }

    fn propagate(&mut self) {
        let Some(idx) = self.selected else {
            return;
        };

        let inactive = self.layout().other();
        if let Some(carousel) = self.slot(inactive).as_mut() {
            if carousel.current_index() != idx {
                carousel.scroll_to(idx);
            }
            carousel.drain_events();
        }
    }

    fn slot(&mut self, layout: Layout) -> &mut Option<CarouselController> {
        match layout {
            Layout::Wide => &mut self.wide,
            Layout::Narrow => &mut self.narrow,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records(count: usize) -> Vec<ImageRecord> {
        (0..count)
            .map(|idx| ImageRecord::new(format!("https://cdn/{idx}.jpg")))
            .collect()
    }

    fn wide_gallery(count: usize) -> MediaGallery {
        let mut gallery = MediaGallery::mounted(ViewportClassifier::new(768.0, Some(1280.0)));
        gallery.set_images(&records(count));
        gallery
    }

    #[test]
    fn test_empty_gallery_has_no_selection() {
        let gallery = wide_gallery(0);
        assert_eq!(gallery.selected_index(), None);
        assert!(!gallery.can_scroll_prev());
        assert!(!gallery.can_scroll_next());
    }

    #[test]
    fn test_initial_selection_is_first_image() {
        let gallery = wide_gallery(3);
        assert_eq!(gallery.selected_index(), Some(0));
        assert!(!gallery.can_scroll_prev());
        assert!(gallery.can_scroll_next());
    }

    #[test]
    fn test_next_and_prev_on_active_carousel() {
        let mut gallery = wide_gallery(3);
        gallery.next();
        gallery.next();
        assert_eq!(gallery.selected_index(), Some(2));
        assert!(!gallery.can_scroll_next());

        gallery.next();
        assert_eq!(gallery.selected_index(), Some(2));

        gallery.prev();
        assert_eq!(gallery.selected_index(), Some(1));
        assert_eq!(gallery.carousel(Layout::Narrow).unwrap().current_index(), 1);
    }

    #[test]
    fn test_thumbnail_select_out_of_range() {
        let mut gallery = wide_gallery(3);
        gallery.select(1);
        gallery.select(42);
        assert_eq!(gallery.selected_index(), Some(1));
    }

    #[test]
    fn test_images_becoming_empty_clears_everything() {
        let mut gallery = wide_gallery(3);
        gallery.select(2);
        gallery.open_lightbox(2);

        gallery.set_images(&[]);
        assert_eq!(gallery.selected_index(), None);
        assert!(gallery.expanded_image().is_none());
        assert_eq!(gallery.lightbox_title(), "Product image");
    }

    #[test]
    fn test_shrinking_list_clamps_selection() {
        let mut gallery = wide_gallery(5);
        gallery.select(4);

        gallery.set_images(&records(2));
        assert_eq!(gallery.selected_index(), Some(1));
        assert_eq!(gallery.carousel(Layout::Narrow).unwrap().current_index(), 1);
        assert!(!gallery.can_scroll_next());
    }

    #[test]
    fn test_scroll_requests_only_for_active_layout() {
        let mut gallery = wide_gallery(3);
        gallery.take_scroll_requests();

        gallery.select(2);
        let requests = gallery.take_scroll_requests();
        assert_eq!(
            requests,
            vec![ScrollRequest {
                layout: Layout::Wide,
                index: 2,
                relative_x: 1.0,
            }]
        );
        assert!(gallery.take_scroll_requests().is_empty());
    }

    #[test]
    fn test_drag_release_between_images_snaps() {
        let mut gallery = wide_gallery(3);
        gallery.take_scroll_requests();

        gallery.on_scrolled(Layout::Wide, 0.4);
        assert_eq!(gallery.selected_index(), Some(1));
        assert_eq!(
            gallery.take_scroll_requests(),
            vec![ScrollRequest {
                layout: Layout::Wide,
                index: 1,
                relative_x: 0.5,
            }]
        );

        // The snap reports back an aligned offset, nothing further to do
        gallery.on_scrolled(Layout::Wide, 0.5);
        assert!(gallery.take_scroll_requests().is_empty());
        assert_eq!(gallery.selected_index(), Some(1));
        assert_eq!(gallery.carousel(Layout::Narrow).unwrap().current_index(), 1);
    }

    #[test]
    fn test_thumbnails_follow_selection() {
        let mut gallery = wide_gallery(5);
        assert_eq!(gallery.take_thumbnail_scroll(), Some(0.0));
        assert_eq!(gallery.take_thumbnail_scroll(), None);

        gallery.next();
        gallery.next();
        assert_eq!(gallery.take_thumbnail_scroll(), Some(0.5));
        assert_eq!(gallery.take_thumbnail_scroll(), None);

        // Narrow has no thumbnail strip; going back to wide re-applies the position
        gallery.on_viewport_width(500.0);
        assert_eq!(gallery.take_thumbnail_scroll(), None);
        gallery.on_viewport_width(1280.0);
        assert_eq!(gallery.take_thumbnail_scroll(), Some(0.5));
    }

    #[test]
    fn test_single_image_has_no_navigation() {
        let mut gallery = wide_gallery(1);
        assert!(!gallery.has_multiple_images());
        assert_eq!(gallery.take_thumbnail_scroll(), None);

        gallery.set_images(&records(2));
        assert!(gallery.has_multiple_images());
    }

    #[test]
    fn test_flip_requests_snap_on_newly_active_layout() {
        let mut gallery = wide_gallery(3);
        gallery.select(1);
        gallery.take_scroll_requests();

        assert!(gallery.on_viewport_width(500.0));
        let requests = gallery.take_scroll_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].layout, Layout::Narrow);
        assert_eq!(requests[0].index, 1);
    }

    #[test]
    fn test_breakpoint_change_flips_layout() {
        let mut gallery = wide_gallery(3);
        gallery.select(2);
        gallery.take_scroll_requests();

        assert!(gallery.set_breakpoint(1440.0));
        assert_eq!(gallery.layout(), Layout::Narrow);
        assert_eq!(gallery.selected_index(), Some(2));
        assert_eq!(gallery.take_scroll_requests()[0].layout, Layout::Narrow);

        assert!(!gallery.set_breakpoint(1300.0));
    }

    #[test]
    fn test_resize_within_layout_is_not_a_flip() {
        let mut gallery = wide_gallery(3);
        assert!(!gallery.on_viewport_width(1000.0));
        assert_eq!(gallery.layout(), Layout::Wide);
    }

    #[test]
    fn test_lightbox_title_uses_alt_text() {
        let mut gallery = MediaGallery::mounted(ViewportClassifier::new(768.0, None));
        gallery.set_images(&[
            ImageRecord::new("a").with_alt("Front"),
            ImageRecord::new("b"),
        ]);

        gallery.open_lightbox(0);
        assert_eq!(gallery.lightbox_title(), "Front");
        gallery.open_lightbox(1);
        assert_eq!(gallery.lightbox_title(), "Product image 2");
        assert_eq!(gallery.expanded_image().unwrap().url_large, "b");
    }
}
