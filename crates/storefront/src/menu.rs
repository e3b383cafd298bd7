use crate::{fl, key_binds::MenuAction, message::Message};
use cosmic::{
    Core, Element,
    widget::{
        menu::{self, ItemHeight, ItemWidth, KeyBind},
        responsive_menu_bar,
    },
};
use std::{collections::HashMap, sync::LazyLock};

static MENU_ID: LazyLock<cosmic::widget::Id> =
    LazyLock::new(|| cosmic::widget::Id::new("responsive-menu"));

pub fn menu_bar<'a>(
    core: &Core,
    key_binds: &HashMap<KeyBind, MenuAction>,
    lightbox_open: bool,
) -> Element<'a, Message> {
    let lightbox_item = if lightbox_open {
        menu::Item::button(fl!("menu-close-image"), None, MenuAction::CloseLightbox)
    } else {
        menu::Item::button(fl!("menu-open-image"), None, MenuAction::OpenLightbox)
    };

    responsive_menu_bar()
        .item_height(ItemHeight::Dynamic(40))
        .item_width(ItemWidth::Uniform(250))
        .spacing(4.)
        .into_element(
            core,
            key_binds,
            MENU_ID.clone(),
            Message::Surface,
            vec![
                (
                    fl!("menu-store"),
                    vec![
                        menu::Item::button(fl!("menu-reload"), None, MenuAction::Retry),
                        menu::Item::button(fl!("menu-buy-now"), None, MenuAction::BuyNow),
                        menu::Item::divider(),
                        menu::Item::button(fl!("menu-settings"), None, MenuAction::Settings),
                        menu::Item::divider(),
                        menu::Item::button(fl!("menu-quit"), None, MenuAction::Quit),
                    ],
                ),
                (
                    fl!("menu-gallery"),
                    vec![
                        menu::Item::button(fl!("menu-prev"), None, MenuAction::Prev),
                        menu::Item::button(fl!("menu-next"), None, MenuAction::Next),
                        menu::Item::divider(),
                        lightbox_item,
                    ],
                ),
                (
                    fl!("menu-help"),
                    vec![menu::Item::button(
                        fl!("menu-about"),
                        None,
                        MenuAction::About,
                    )],
                ),
            ],
        )
}
