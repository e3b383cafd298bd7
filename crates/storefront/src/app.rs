//! Main app state

use crate::{
    fl,
    key_binds::{self, MenuAction},
    menu::menu_bar,
    message::{ContextPage, GalleryMessage, ImageMessage, Message, SettingsMessage},
    views::{self, ProductTab},
};
use ashpd::{desktop::open_uri::OpenFileRequest, url::Url};
use cosmic::{
    Action, Application, ApplicationExt, Core, Element, Task,
    app::context_drawer,
    cosmic_config::{Config, CosmicConfigEntry},
    iced::{
        Alignment, Length,
        alignment::Horizontal,
        keyboard::{Key, Modifiers},
    },
    iced_widget::scrollable,
    task::future,
    widget::{
        button, column, container, divider, dropdown,
        menu::key_bind::{KeyBind, Modifier},
        settings, spin_button, text,
    },
};
use shared::{LoadingEvent, LoadingState};
use std::{collections::HashMap, sync::Arc, time::Duration};
use storefront_client::{StorefrontClient, buy_now_target, format_price};
use storefront_config::{AppTheme, StorefrontConfig};
use storefront_media::{self as media, CachedImage, ImageCache, MediaGallery};
use storefront_nav::ViewportClassifier;
use storefront_types::{Layout, Product};

const HTTP_TIMEOUT: Duration = Duration::from_secs(30);
const PAGE_MAX_WIDTH: f32 = 960.0;
/// Quiet time after the last scroll event before a drag counts as released
const SCROLL_SETTLE_DELAY: Duration = Duration::from_millis(150);

pub struct Storefront {
    core: Core,
    /// What is stored on disk and written back on exit
    config: StorefrontConfig,
    config_handler: Option<Config>,
    /// `config` with environment overrides applied
    runtime_config: StorefrontConfig,
    key_binds: HashMap<KeyBind, MenuAction>,
    http: reqwest::Client,
    loading: LoadingState,
    product: Option<Product>,
    gallery: MediaGallery,
    cache: ImageCache,
    tab: ProductTab,
    context_page: Option<ContextPage>,
    /// Bumped on every scroll event, only the latest one may settle
    scroll_generation: u64,
}

impl Storefront {
    pub const APP_ID: &'static str = "io.github.dubresearch.Storefront";

    fn fetch_product(&mut self) -> Task<Action<Message>> {
        self.loading = LoadingEvent::StartLoading.apply_to_state(self.loading.clone());

        let client = match StorefrontClient::from_config(&self.runtime_config, self.http.clone())
        {
            Ok(client) => client,
            Err(err) => {
                tracing::error!("Cannot fetch product: {err}");
                self.loading =
                    LoadingEvent::LoadError(err.to_string()).apply_to_state(self.loading.clone());
                return Task::none();
            }
        };

        future(async move {
            let result = client
                .fetch_product()
                .await
                .map_err(|err| Arc::new(err.to_string()));
            Message::ProductLoaded(result)
        })
    }

    fn load_images(&mut self, urls: Vec<String>) -> Task<Action<Message>> {
        let mut tasks = Vec::new();

        for url in urls {
            if !self.cache.begin(&url) {
                continue;
            }

            let client = self.http.clone();
            tasks.push(future(async move {
                match media::load_image(client, url.clone()).await {
                    Ok(img) => Message::Image(ImageMessage::Loaded {
                        url,
                        handle: img.handle,
                        width: img.width,
                        height: img.height,
                    }),
                    Err(e) => Message::Image(ImageMessage::LoadFailed {
                        url,
                        error: e.to_string(),
                    }),
                }
            }));
        }

        Task::batch(tasks)
    }

    fn open_lightbox(&mut self, idx: usize) -> Task<Action<Message>> {
        if !self.gallery.open_lightbox(idx) {
            return Task::none();
        }

        let urls = self
            .gallery
            .expanded_image()
            .map(|img| vec![img.url_large.clone()])
            .unwrap_or_default();
        self.load_images(urls)
    }

    /// Turn pending programmatic carousel scrolls into scrollable snaps.
    fn sync_scroll(&mut self) -> Task<Action<Message>> {
        let mut tasks: Vec<_> = self
            .gallery
            .take_scroll_requests()
            .into_iter()
            .map(|request| {
                scrollable::snap_to(
                    views::media::scroll_id(request.layout),
                    scrollable::RelativeOffset {
                        x: request.relative_x,
                        y: 0.0,
                    },
                )
            })
            .collect();

        if let Some(x) = self.gallery.take_thumbnail_scroll() {
            tasks.push(scrollable::snap_to(
                views::media::thumbnails_id(),
                scrollable::RelativeOffset { x, y: 0.0 },
            ));
        }

        Task::batch(tasks)
    }

    /// Snap a dragged carousel once its scroll events have stopped.
    fn settle_scroll_later(&mut self) -> Task<Action<Message>> {
        self.scroll_generation = self.scroll_generation.wrapping_add(1);
        let generation = self.scroll_generation;

        future(async move {
            tokio::time::sleep(SCROLL_SETTLE_DELAY).await;
            Message::Gallery(GalleryMessage::ScrollSettled(generation))
        })
    }

    fn update_title(&mut self) -> Task<Action<Message>> {
        let title = match &self.product {
            Some(product) if !product.title.is_empty() => {
                format!("{} - {}", product.title, fl!("app-title"))
            }
            _ => fl!("app-title"),
        };

        match self.core.main_window_id() {
            Some(id) => self.set_window_title(title, id),
            None => Task::none(),
        }
    }

    fn shutdown(&mut self) {
        self.gallery.teardown();
        if let Some(ref handler) = self.config_handler
            && let Err(err) = self.config.write_entry(handler)
        {
            tracing::warn!("Failed to save config: {err}");
        }
    }

    fn on_product_loaded(
        &mut self,
        result: Result<Option<Product>, Arc<String>>,
    ) -> Task<Action<Message>> {
        match result {
            Ok(Some(product)) => {
                self.loading = LoadingEvent::LoadComplete.apply_to_state(self.loading.clone());
                self.gallery.set_images(&product.images);
                self.product = Some(product);

                let urls = self
                    .gallery
                    .images()
                    .iter()
                    .map(|img| img.url.clone())
                    .collect();

                Task::batch([
                    self.load_images(urls),
                    self.update_title(),
                    self.sync_scroll(),
                ])
            }
            Ok(None) => {
                self.loading = LoadingEvent::NothingFound.apply_to_state(self.loading.clone());
                self.product = None;
                self.gallery.set_images(&[]);
                self.update_title()
            }
            Err(err) => {
                tracing::error!("Failed to load product: {err}");
                self.loading =
                    LoadingEvent::LoadError(err.to_string()).apply_to_state(self.loading.clone());
                Task::none()
            }
        }
    }

    fn update_gallery(&mut self, message: GalleryMessage) -> Task<Action<Message>> {
        let mut tasks = Vec::new();

        match message {
            GalleryMessage::Scrolled(layout, relative_x) => {
                self.gallery.on_scrolled(layout, relative_x);
                // Snapping mid-drag would fight the pointer
                return self.settle_scroll_later();
            }
            GalleryMessage::ScrollSettled(generation) => {
                if generation != self.scroll_generation {
                    return Task::none();
                }
            }
            GalleryMessage::Select(idx) => self.gallery.select(idx),
            GalleryMessage::Prev => self.gallery.prev(),
            GalleryMessage::Next => self.gallery.next(),
            GalleryMessage::OpenLightbox(idx) => tasks.push(self.open_lightbox(idx)),
            GalleryMessage::OpenSelected => {
                if let Some(idx) = self.gallery.selected_index() {
                    tasks.push(self.open_lightbox(idx));
                }
            }
            GalleryMessage::CloseLightbox => self.gallery.close_lightbox(),
        }

        tasks.push(self.sync_scroll());
        Task::batch(tasks)
    }
}

impl Application for Storefront {
    type Executor = cosmic::executor::Default;
    type Flags = Option<f32>;
    type Message = Message;

    const APP_ID: &'static str = Self::APP_ID;

    fn core(&self) -> &Core {
        &self.core
    }

    fn core_mut(&mut self) -> &mut Core {
        &mut self.core
    }

    fn init(core: Core, flags: Self::Flags) -> (Self, Task<Action<Self::Message>>) {
        let (config, config_handler) = match storefront_config::config() {
            Ok(handler) => {
                let config = match StorefrontConfig::get_entry(&handler) {
                    Ok(c) => c,
                    Err((_, c)) => c,
                };
                (config, Some(handler))
            }
            Err(_) => (StorefrontConfig::default(), None),
        };

        let runtime_config = config.clone().with_env_overrides();

        let http = reqwest::Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .unwrap_or_else(|err| {
                tracing::warn!("Falling back to default HTTP client: {err}");
                reqwest::Client::new()
            });

        // Classify the initial width right away so the first frame has the right layout
        let viewport = ViewportClassifier::new(runtime_config.desktop_breakpoint, flags);

        let mut app = Self {
            core,
            cache: ImageCache::new(runtime_config.image_cache_size),
            gallery: MediaGallery::mounted(viewport),
            config,
            config_handler,
            runtime_config,
            key_binds: key_binds::init_key_binds(),
            http,
            loading: LoadingState::default(),
            product: None,
            tab: ProductTab::default(),
            context_page: None,
            scroll_generation: 0,
        };

        let tasks = vec![
            cosmic::command::set_theme(app.config.app_theme.to_cosmic_theme()),
            app.update_title(),
            app.fetch_product(),
        ];

        (app, Task::batch(tasks))
    }

    fn header_start(&self) -> Vec<Element<'_, Self::Message>> {
        vec![menu_bar(
            &self.core,
            &self.key_binds,
            self.gallery.lightbox().is_open(),
        )]
    }

    fn view(&self) -> Element<'_, Self::Message> {
        let spacing = cosmic::theme::active().cosmic().spacing;
        let layout = self.gallery.layout();

        let body: Element<'_, Message> = match &self.loading {
            LoadingState::Loading => text::body(fl!("loading")).into(),
            LoadingState::Error(_) => self.retry_view(fl!("load-failed")),
            LoadingState::NotFound => self.retry_view(fl!("no-product")),
            LoadingState::Ready => match &self.product {
                Some(product) => self.product_view(product),
                None => self.retry_view(fl!("no-product")),
            },
        };

        let page = column()
            .push(
                container(text::title1(fl!("brand")))
                    .width(Length::Fill)
                    .align_x(Horizontal::Center),
            )
            .push(
                container(body)
                    .width(Length::Fill)
                    .align_x(Horizontal::Center),
            )
            .push(divider::horizontal::default())
            .push(views::footer::view(layout))
            .spacing(spacing.space_l)
            .padding(spacing.space_m)
            .max_width(PAGE_MAX_WIDTH);

        let page = cosmic::widget::scrollable(
            container(page)
                .width(Length::Fill)
                .align_x(Horizontal::Center),
        )
        .height(Length::Fill);

        views::media::with_lightbox(page.into(), &self.gallery, &self.cache)
    }

    fn update(&mut self, message: Message) -> Task<Action<Self::Message>> {
        let mut tasks = Vec::new();

        match message {
            Message::ProductLoaded(result) => tasks.push(self.on_product_loaded(result)),
            Message::Image(img_msg) => match img_msg {
                ImageMessage::Loaded {
                    url,
                    handle,
                    width,
                    height,
                } => {
                    self.cache.insert(
                        url,
                        CachedImage {
                            handle,
                            width,
                            height,
                        },
                    );
                }
                ImageMessage::LoadFailed { url, error } => {
                    self.cache.clear_pending(&url);
                    tracing::warn!("Failed to load {url}: {error}");
                }
            },
            Message::Gallery(gallery_msg) => tasks.push(self.update_gallery(gallery_msg)),
            Message::Settings(settings_msg) => {
                match settings_msg {
                    SettingsMessage::AppTheme(theme) => {
                        self.config.app_theme = theme;
                        self.runtime_config.app_theme = theme;
                        if let Some(ref handler) = self.config_handler {
                            let _ = self.config.write_entry(handler);
                        }
                        return cosmic::command::set_theme(theme.to_cosmic_theme());
                    }
                    SettingsMessage::Breakpoint(width) => {
                        let width = width as f32;
                        self.config.desktop_breakpoint = width;
                        self.runtime_config.desktop_breakpoint = width;
                        if self.gallery.set_breakpoint(width) {
                            tracing::debug!("Breakpoint {width} switched layout");
                        }
                        tasks.push(self.sync_scroll());
                    }
                    SettingsMessage::CacheSize(size) => {
                        self.config.image_cache_size = size;
                        self.runtime_config.image_cache_size = size;
                        self.cache.resize(size);
                    }
                }

                if let Some(ref handler) = self.config_handler {
                    let _ = self.config.write_entry(handler);
                }
            }
            Message::KeyBind(action) => tasks.push(self.update(action.message())),
            Message::ToggleContextPage(page) => {
                if self.context_page == Some(page) {
                    self.context_page = None;
                } else {
                    self.context_page = Some(page);
                }
            }
            Message::TabSelected(tab) => self.tab = tab,
            Message::BuyNow => {
                let target = self
                    .product
                    .as_ref()
                    .and_then(|product| buy_now_target(&self.runtime_config, product));

                match target {
                    Some(target) => {
                        tracing::info!("Buy Now opens {target:?}");
                        tasks.push(self.update(Message::OpenUrl(target.url().to_string())));
                    }
                    None => tracing::warn!("Buy Now has no destination configured"),
                }
            }
            Message::OpenUrl(url) => {
                return future(async move { Message::UrlOpened(open_url(&url).await) });
            }
            Message::UrlOpened(result) => {
                if let Err(err) = result {
                    tracing::error!("Failed to open link: {err}");
                }
            }
            Message::Retry => {
                let next = LoadingEvent::RetryRequested.apply_to_state(self.loading.clone());
                if next != self.loading {
                    tasks.push(self.fetch_product());
                }
            }
            Message::WindowResized { width, .. } => {
                if self.gallery.on_viewport_width(width) {
                    tracing::debug!("Window width {width} switched layout");
                }
                tasks.push(self.sync_scroll());
            }
            Message::Cancelled => {}
            Message::Surface(action) => {
                return cosmic::task::message(Action::Cosmic(cosmic::app::Action::Surface(action)));
            }
            Message::Quit => {
                self.shutdown();
                std::process::exit(0);
            }
        }

        if tasks.is_empty() {
            Task::none()
        } else {
            Task::batch(tasks)
        }
    }

    fn context_drawer(&self) -> Option<context_drawer::ContextDrawer<'_, Self::Message>> {
        let page = self.context_page?;
        let content = match page {
            ContextPage::About => self.about_page(),
            ContextPage::Settings => self.settings_page(),
        };

        Some(context_drawer::context_drawer(
            content,
            Message::ToggleContextPage(page),
        ))
    }

    fn subscription(&self) -> cosmic::iced::Subscription<Self::Message> {
        // Nothing to listen for once the gallery is gone
        if self.gallery.is_torn_down() {
            return cosmic::iced::Subscription::none();
        }

        cosmic::iced::Subscription::batch([
            cosmic::iced::keyboard::on_key_press(key_press_handler),
            cosmic::iced::window::events().map(|(_, event)| {
                if let cosmic::iced::window::Event::Resized(size) = event {
                    Message::WindowResized {
                        width: size.width,
                        height: size.height,
                    }
                } else {
                    Message::Cancelled
                }
            }),
        ])
    }

    fn on_app_exit(&mut self) -> Option<Self::Message> {
        self.shutdown();
        None
    }
}

impl Storefront {
    fn retry_view(&self, label: String) -> Element<'_, Message> {
        let spacing = cosmic::theme::active().cosmic().spacing;

        column()
            .push(text::body(label))
            .push(button::standard(fl!("retry")).on_press(Message::Retry))
            .spacing(spacing.space_s)
            .align_x(Alignment::Center)
            .into()
    }

    fn product_view<'a>(&'a self, product: &'a Product) -> Element<'a, Message> {
        let spacing = cosmic::theme::active().cosmic().spacing;
        let layout = self.gallery.layout();

        let price = product
            .first_variant()
            .and_then(|variant| format_price(&variant.price.amount, &variant.price.currency_code));
        let can_buy = buy_now_target(&self.runtime_config, product).is_some();

        let content = column()
            .push(views::media::view(&self.gallery, &self.cache))
            .push(views::product::header(&product.title, price, can_buy, layout))
            .push(views::tabs::view(
                self.tab,
                layout,
                &product.description,
                self.runtime_config.manual_url.as_deref(),
            ))
            .push_maybe(
                (layout == Layout::Narrow).then(|| views::product::buy_now_bar(can_buy)),
            )
            .spacing(spacing.space_m)
            .width(Length::Fill);

        content.into()
    }

    fn about_page(&self) -> Element<'_, Message> {
        column()
            .push(text::title3(fl!("app-title")))
            .push(text::body(fl!("app-description")))
            .push(text::caption(format!(
                "Version {}",
                env!("CARGO_PKG_VERSION")
            )))
            .spacing(cosmic::theme::active().cosmic().spacing.space_s)
            .into()
    }

    fn settings_page(&self) -> Element<'_, Message> {
        settings::view_column(vec![
            settings::section()
                .title(fl!("settings-appearance"))
                .add(settings::item(
                    fl!("settings-theme"),
                    dropdown(
                        AppTheme::ALL
                            .iter()
                            .map(|t| t.to_string())
                            .collect::<Vec<_>>(),
                        AppTheme::ALL
                            .iter()
                            .position(|t| *t == self.config.app_theme),
                        |idx| Message::Settings(SettingsMessage::AppTheme(AppTheme::ALL[idx])),
                    ),
                ))
                .into(),
            settings::section()
                .title(fl!("settings-gallery"))
                .add(settings::item(
                    fl!("settings-breakpoint"),
                    spin_button(
                        format!("{}", self.config.desktop_breakpoint as u32),
                        fl!("settings-breakpoint"),
                        self.config.desktop_breakpoint as u32,
                        32,
                        480,
                        1920,
                        |width| Message::Settings(SettingsMessage::Breakpoint(width)),
                    ),
                ))
                .add(settings::item(
                    fl!("settings-cache-size"),
                    spin_button(
                        format!("{}", self.config.image_cache_size),
                        fl!("settings-cache-size"),
                        self.config.image_cache_size,
                        5,
                        5,
                        200,
                        |size| Message::Settings(SettingsMessage::CacheSize(size)),
                    ),
                ))
                .into(),
        ])
        .into()
    }
}

async fn open_url(url: &str) -> Result<(), String> {
    let uri = Url::parse(url).map_err(|err| format!("Invalid URL {url}: {err}"))?;

    OpenFileRequest::default()
        .ask(false)
        .send_uri(&uri)
        .await
        .map(|_| ())
        .map_err(|err| err.to_string())
}

fn key_press_handler(key: Key, modifiers: Modifiers) -> Option<Message> {
    let mut mods = Vec::new();

    if modifiers.control() {
        mods.push(Modifier::Ctrl);
    }

    if modifiers.shift() {
        mods.push(Modifier::Shift);
    }

    if modifiers.alt() {
        mods.push(Modifier::Alt);
    }

    if modifiers.logo() {
        mods.push(Modifier::Super);
    }

    let key_bind = KeyBind {
        modifiers: mods,
        key: key.clone(),
    };

    let bindings = key_binds::init_key_binds();
    bindings
        .get(&key_bind)
        .map(|action| Message::KeyBind(*action))
}
