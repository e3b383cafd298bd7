//! Gallery rendering for both layouts and the lightbox overlay.

use crate::{
    fl,
    message::{GalleryMessage, Message},
};
use cosmic::{
    Element,
    iced::{Alignment, Background, Color, ContentFit, Length},
    iced_widget::{
        scrollable::{Direction, Scrollbar},
        stack,
    },
    theme,
    widget::{
        Id, Space, button, column, container, horizontal_space, icon, image, image::Handle,
        mouse_area, responsive, row, scrollable, text, tooltip,
    },
};
use storefront_media::{ImageCache, MediaGallery};
use storefront_types::Layout;

pub const WIDE_SCROLL_ID: &str = "gallery-wide";
pub const NARROW_SCROLL_ID: &str = "gallery-narrow";
pub const THUMBNAILS_SCROLL_ID: &str = "gallery-thumbnails";

const BACKDROP_COLOR: Color = Color::from_rgba(0.0, 0.0, 0.0, 0.8);
const WIDE_HEIGHT: f32 = 480.0;
const NARROW_HEIGHT: f32 = 320.0;
const THUMBNAIL_SIZE: f32 = 72.0;

pub fn scroll_id(layout: Layout) -> Id {
    match layout {
        Layout::Wide => Id::new(WIDE_SCROLL_ID),
        Layout::Narrow => Id::new(NARROW_SCROLL_ID),
    }
}

pub fn thumbnails_id() -> Id {
    Id::new(THUMBNAILS_SCROLL_ID)
}

/// Icon button with its label shown as a tooltip.
fn labelled_icon<'a>(
    icon_name: &'static str,
    label: String,
    on_press: Option<Message>,
) -> Element<'a, Message> {
    let spacing = theme::active().cosmic().spacing;

    tooltip(
        button::icon(icon::from_name(icon_name))
            .on_press_maybe(on_press)
            .padding(spacing.space_xs),
        text::body(label),
        tooltip::Position::Bottom,
    )
    .into()
}

#[derive(Clone)]
struct Slide {
    handle: Option<Handle>,
}

pub fn view<'a>(gallery: &'a MediaGallery, cache: &'a ImageCache) -> Element<'a, Message> {
    if gallery.is_empty() {
        return Space::new(Length::Fill, Length::Shrink).into();
    }

    match gallery.layout() {
        Layout::Wide => wide(gallery, cache),
        Layout::Narrow => narrow(gallery, cache),
    }
}

fn slides(gallery: &MediaGallery, cache: &ImageCache) -> Vec<Slide> {
    gallery
        .images()
        .iter()
        .map(|img| Slide {
            handle: cache.get(&img.url).map(|cached| cached.handle),
        })
        .collect()
}

// Every slide is exactly as wide as the viewport so offsets map 1:1 to indices
fn carousel<'a>(layout: Layout, slides: Vec<Slide>, height: f32) -> Element<'a, Message> {
    let strip = responsive(move |size| {
        let items = slides
            .iter()
            .enumerate()
            .fold(row(), |items, (idx, slide)| {
                items.push(slide_view(idx, slide, size.width, height))
            });

        scrollable(items)
            .id(scroll_id(layout))
            .direction(Direction::Horizontal(
                Scrollbar::new().width(0).scroller_width(0),
            ))
            .on_scroll(move |viewport| {
                Message::Gallery(GalleryMessage::Scrolled(
                    layout,
                    viewport.relative_offset().x,
                ))
            })
            .width(Length::Fill)
            .height(Length::Fixed(height))
            .into()
    });

    container(strip)
        .width(Length::Fill)
        .height(Length::Fixed(height))
        .into()
}

fn slide_view<'a>(idx: usize, slide: &Slide, width: f32, height: f32) -> Element<'a, Message> {
    let content: Element<'a, Message> = match &slide.handle {
        Some(handle) => image(handle.clone())
            .content_fit(ContentFit::Contain)
            .width(Length::Fill)
            .height(Length::Fill)
            .into(),
        None => container(text::body(fl!("loading")))
            .center(Length::Fill)
            .into(),
    };

    mouse_area(
        container(content)
            .width(Length::Fixed(width))
            .height(Length::Fixed(height)),
    )
    .on_press(Message::Gallery(GalleryMessage::OpenLightbox(idx)))
    .into()
}

fn wide<'a>(gallery: &'a MediaGallery, cache: &'a ImageCache) -> Element<'a, Message> {
    let spacing = theme::active().cosmic().spacing;
    let carousel = carousel(Layout::Wide, slides(gallery, cache), WIDE_HEIGHT);

    if !gallery.has_multiple_images() {
        return carousel;
    }

    let prev = labelled_icon(
        "go-previous-symbolic",
        fl!("previous-image"),
        gallery
            .can_scroll_prev()
            .then_some(Message::Gallery(GalleryMessage::Prev)),
    );

    let next = labelled_icon(
        "go-next-symbolic",
        fl!("next-image"),
        gallery
            .can_scroll_next()
            .then_some(Message::Gallery(GalleryMessage::Next)),
    );

    let main = row()
        .push(prev)
        .push(carousel)
        .push(next)
        .spacing(spacing.space_xs)
        .align_y(Alignment::Center);

    let selected = gallery.selected_index();
    let thumbnails = gallery.images().iter().enumerate().fold(
        row().spacing(spacing.space_xs),
        |strip, (idx, img)| {
            let thumb: Element<'a, Message> = match cache.get(&img.url) {
                Some(cached) => image(cached.handle)
                    .content_fit(ContentFit::Cover)
                    .width(Length::Fixed(THUMBNAIL_SIZE))
                    .height(Length::Fixed(THUMBNAIL_SIZE))
                    .into(),
                None => Space::new(
                    Length::Fixed(THUMBNAIL_SIZE),
                    Length::Fixed(THUMBNAIL_SIZE),
                )
                .into(),
            };

            let class = if selected == Some(idx) {
                theme::Button::Suggested
            } else {
                theme::Button::Image
            };

            strip.push(
                button::custom(thumb)
                    .class(class)
                    .padding(2)
                    .on_press(Message::Gallery(GalleryMessage::Select(idx))),
            )
        },
    );

    column()
        .push(main)
        .push(
            scrollable(thumbnails)
                .id(thumbnails_id())
                .direction(Direction::Horizontal(Scrollbar::default()))
                .width(Length::Fill),
        )
        .spacing(spacing.space_s)
        .into()
}

fn narrow<'a>(gallery: &'a MediaGallery, cache: &'a ImageCache) -> Element<'a, Message> {
    let spacing = theme::active().cosmic().spacing;
    let carousel = carousel(Layout::Narrow, slides(gallery, cache), NARROW_HEIGHT);

    if !gallery.has_multiple_images() {
        return carousel;
    }

    let selected = gallery.selected_index();
    let total = gallery.images().len();

    let dots = (0..total).fold(row().spacing(spacing.space_xxs), |dots, idx| {
        let glyph = if selected == Some(idx) { "●" } else { "○" };
        dots.push(button::text(glyph).on_press(Message::Gallery(GalleryMessage::Select(idx))))
    });

    let position = selected.map(|idx| {
        text::caption(fl!(
            "image-position",
            position = idx + 1,
            total = total
        ))
    });

    column()
        .push(carousel)
        .push(dots)
        .push_maybe(position)
        .spacing(spacing.space_xs)
        .align_x(Alignment::Center)
        .into()
}

/// Put the lightbox over `page` when an image is expanded.
pub fn with_lightbox<'a>(
    page: Element<'a, Message>,
    gallery: &'a MediaGallery,
    cache: &'a ImageCache,
) -> Element<'a, Message> {
    let Some(expanded) = gallery.expanded_image() else {
        return page;
    };

    let spacing = theme::active().cosmic().spacing;
    let close = Message::Gallery(GalleryMessage::CloseLightbox);

    let backdrop = mouse_area(
        container(Space::new(Length::Fill, Length::Fill))
            .width(Length::Fill)
            .height(Length::Fill)
            .class(theme::Container::custom(|_| cosmic::iced_widget::container::Style {
                background: Some(Background::Color(BACKDROP_COLOR)),
                ..Default::default()
            })),
    )
    .on_press(close.clone());

    // Large variant first, the carousel sized image while it downloads
    let cached = cache
        .get(&expanded.url_large)
        .or_else(|| cache.get(&expanded.url));

    let picture: Element<'a, Message> = match cached {
        Some(cached) => mouse_area(
            image(cached.handle)
                .content_fit(ContentFit::Contain)
                .width(Length::Fill)
                .height(Length::Fill),
        )
        .on_press(close.clone())
        .into(),
        None => container(text::body(fl!("loading")))
            .center(Length::Fill)
            .into(),
    };

    let header = row()
        .push(text::title4(gallery.lightbox_title()))
        .push(horizontal_space())
        .push(tooltip(
            button::icon(icon::from_name("window-close-symbolic"))
                .on_press(close)
                .padding(spacing.space_xs)
                .class(theme::Button::Destructive),
            text::body(fl!("close-image")),
            tooltip::Position::Bottom,
        ))
        .align_y(Alignment::Center)
        .padding(spacing.space_xs);

    let dialog = container(
        mouse_area(
            container(
                column()
                    .push(header)
                    .push(picture)
                    .width(Length::Fill)
                    .height(Length::Fill),
            )
            .width(Length::Fill)
            .height(Length::Fill)
            .class(theme::Container::Dialog),
        )
        // Swallow clicks on the frame so they do not reach the backdrop
        .on_press(Message::Cancelled),
    )
    .padding([60, 80])
    .width(Length::Fill)
    .height(Length::Fill);

    stack![page, backdrop, dialog].into()
}
