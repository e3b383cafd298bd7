use crate::{fl, message::Message};
use cosmic::{
    Element,
    iced::Length,
    theme,
    widget::{button, column, dropdown, row, text},
};
use storefront_types::Layout;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProductTab {
    #[default]
    Description,
    Specs,
    Shipping,
    Returns,
    Downloads,
}

impl ProductTab {
    pub const ALL: &'static [Self] = &[
        Self::Description,
        Self::Specs,
        Self::Shipping,
        Self::Returns,
        Self::Downloads,
    ];

    pub fn label(self) -> String {
        match self {
            ProductTab::Description => fl!("tab-description"),
            ProductTab::Specs => fl!("tab-specs"),
            ProductTab::Shipping => fl!("tab-shipping"),
            ProductTab::Returns => fl!("tab-returns"),
            ProductTab::Downloads => fl!("tab-downloads"),
        }
    }
}

pub fn view<'a>(
    active: ProductTab,
    layout: Layout,
    description: &'a str,
    manual_url: Option<&'a str>,
) -> Element<'a, Message> {
    let spacing = theme::active().cosmic().spacing;

    // Wide windows get a tab row, narrow ones a dropdown
    let selector: Element<'a, Message> = match layout {
        Layout::Wide => ProductTab::ALL
            .iter()
            .fold(row().spacing(spacing.space_xxs), |tabs, tab| {
                let class = if *tab == active {
                    theme::Button::Suggested
                } else {
                    theme::Button::Text
                };
                tabs.push(
                    button::text(tab.label())
                        .class(class)
                        .on_press(Message::TabSelected(*tab)),
                )
            })
            .into(),
        Layout::Narrow => dropdown(
            ProductTab::ALL
                .iter()
                .map(|tab| tab.label())
                .collect::<Vec<_>>(),
            ProductTab::ALL.iter().position(|tab| *tab == active),
            |idx| Message::TabSelected(ProductTab::ALL[idx]),
        )
        .into(),
    };

    column()
        .push(selector)
        .push(content(active, description, manual_url))
        .spacing(spacing.space_s)
        .width(Length::Fill)
        .into()
}

fn content<'a>(
    tab: ProductTab,
    description: &'a str,
    manual_url: Option<&'a str>,
) -> Element<'a, Message> {
    let spacing = theme::active().cosmic().spacing;

    match tab {
        ProductTab::Description => text::body(description).into(),
        ProductTab::Specs => [
            fl!("feature-lfo-types"),
            fl!("feature-waveforms"),
            fl!("feature-delay"),
            fl!("feature-presets"),
            fl!("feature-power"),
            fl!("feature-output"),
        ]
        .into_iter()
        .fold(column().spacing(spacing.space_xxs), |list, item| {
            list.push(text::body(format!("• {item}")))
        })
        .into(),
        ProductTab::Shipping => text::body(fl!("shipping-info")).into(),
        ProductTab::Returns => text::body(fl!("returns-info")).into(),
        ProductTab::Downloads => button::text(fl!("download-manual"))
            .on_press_maybe(manual_url.map(|url| Message::OpenUrl(url.to_string())))
            .into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_order() {
        assert_eq!(ProductTab::ALL.len(), 5);
        assert_eq!(ProductTab::ALL[0], ProductTab::default());
        assert_eq!(ProductTab::ALL[4], ProductTab::Downloads);
    }
}
