use crate::{fl, message::Message};
use cosmic::{
    Element,
    iced::{Alignment, Length},
    theme,
    widget::{button, column, horizontal_space, row, text},
};
use storefront_types::Layout;

/// Title, price and the Buy Now call to action.
pub fn header<'a>(
    title: &'a str,
    price: Option<String>,
    can_buy: bool,
    layout: Layout,
) -> Element<'a, Message> {
    let spacing = theme::active().cosmic().spacing;

    let purchase = row()
        .push_maybe(price.map(|price| text::body(price)))
        .push(buy_now(can_buy))
        .spacing(spacing.space_s)
        .align_y(Alignment::Center);

    match layout {
        Layout::Wide => row()
            .push(text::title3(title))
            .push(horizontal_space())
            .push(purchase)
            .align_y(Alignment::Center)
            .width(Length::Fill)
            .into(),
        Layout::Narrow => column()
            .push(text::title3(title))
            .push(purchase)
            .spacing(spacing.space_s)
            .width(Length::Fill)
            .into(),
    }
}

fn buy_now<'a>(can_buy: bool) -> button::Button<'a, Message> {
    button::standard(fl!("buy-now")).on_press_maybe(can_buy.then_some(Message::BuyNow))
}

/// Full width button closing the narrow layout.
pub fn buy_now_bar<'a>(can_buy: bool) -> Element<'a, Message> {
    button::suggested(fl!("buy-now"))
        .on_press_maybe(can_buy.then_some(Message::BuyNow))
        .width(Length::Fill)
        .into()
}
