use crate::message::{ContextPage, GalleryMessage, Message};
use cosmic::{
    iced::keyboard::{Key, key::Named},
    widget::menu::{
        Action,
        key_bind::{KeyBind, Modifier},
    },
};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuAction {
    Prev,
    Next,
    OpenLightbox,
    CloseLightbox,
    Retry,
    BuyNow,
    Settings,
    About,
    Quit,
}

impl MenuAction {
    pub fn message(self) -> Message {
        match self {
            MenuAction::Prev => Message::Gallery(GalleryMessage::Prev),
            MenuAction::Next => Message::Gallery(GalleryMessage::Next),
            MenuAction::OpenLightbox => Message::Gallery(GalleryMessage::OpenSelected),
            MenuAction::CloseLightbox => Message::Gallery(GalleryMessage::CloseLightbox),
            MenuAction::Retry => Message::Retry,
            MenuAction::BuyNow => Message::BuyNow,
            MenuAction::Settings => Message::ToggleContextPage(ContextPage::Settings),
            MenuAction::About => Message::ToggleContextPage(ContextPage::About),
            MenuAction::Quit => Message::Quit,
        }
    }
}

impl Action for MenuAction {
    type Message = Message;

    fn message(&self) -> Message {
        (*self).message()
    }
}

pub fn init_key_binds() -> HashMap<KeyBind, MenuAction> {
    let mut binds = HashMap::new();

    // Gallery
    binds.insert(
        KeyBind {
            modifiers: vec![],
            key: Key::Named(Named::ArrowLeft),
        },
        MenuAction::Prev,
    );

    binds.insert(
        KeyBind {
            modifiers: vec![],
            key: Key::Named(Named::ArrowRight),
        },
        MenuAction::Next,
    );

    binds.insert(
        KeyBind {
            modifiers: vec![],
            key: Key::Named(Named::Enter),
        },
        MenuAction::OpenLightbox,
    );

    binds.insert(
        KeyBind {
            modifiers: vec![],
            key: Key::Named(Named::Escape),
        },
        MenuAction::CloseLightbox,
    );

    // Store
    binds.insert(
        KeyBind {
            modifiers: vec![Modifier::Ctrl],
            key: Key::Character("r".into()),
        },
        MenuAction::Retry,
    );

    binds.insert(
        KeyBind {
            modifiers: vec![Modifier::Ctrl],
            key: Key::Character("q".into()),
        },
        MenuAction::Quit,
    );

    binds
}
