use crate::{fl, message::Message};
use cosmic::{
    Element,
    iced::Length,
    theme,
    widget::{column, row, text},
};
use storefront_types::Layout;

pub fn view<'a>(layout: Layout) -> Element<'a, Message> {
    let spacing = theme::active().cosmic().spacing;

    let about = column()
        .push(text::title4(fl!("about-us")))
        .push(text::body(fl!("about-us-text")))
        .spacing(spacing.space_xxs)
        .width(Length::Fill);

    let contact = column()
        .push(text::title4(fl!("contact")))
        .push(text::body(fl!("contact-email")))
        .push(text::body(fl!("contact-location")))
        .spacing(spacing.space_xxs)
        .width(Length::Fill);

    match layout {
        Layout::Wide => row()
            .push(about)
            .push(contact)
            .spacing(spacing.space_l)
            .into(),
        Layout::Narrow => column()
            .push(about)
            .push(contact)
            .spacing(spacing.space_m)
            .into(),
    }
}
