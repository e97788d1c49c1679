use std::path::PathBuf;

use asset::GalleryAssets;
use crossbeam_channel::Sender;
use gpui::{
    AnyView, App, AppContext, Application, Bounds, KeyBinding, Menu, MenuItem, SharedString,
    Window, WindowBounds, WindowKind, WindowOptions, actions, px, size,
};
use gpui_component::{Root, TitleBar};
use indexify::{Listing, ListingRequest};
use root::FacadeRoot;
use rust_i18n::t;
use smol::channel::Receiver;
use tracing::debug;

use crate::gallery_view::GalleryView;

mod asset;
mod component;
mod gallery_view;
mod locale;
mod root;
mod title_bar;

rust_i18n::i18n!("locales", fallback = "en");

actions!(facade, [Quit, Hide]);

struct Facade {}

impl Facade {
    fn init(cx: &mut App) {
        gpui_component::init(cx);
        Self::shortcut_binding_init(cx);
        Self::menu_init(cx);
        cx.activate(true);
    }

    fn create_new_window<F, E>(title: &str, crate_view_fn: F, cx: &mut App)
    where
        E: Into<AnyView>,
        F: FnOnce(&mut Window, &mut App) -> E + Send + 'static,
    {
        let options = Self::window_options_init(cx);
        let title = SharedString::from(title.to_string());
        cx.spawn(async move |cx| {
            let window = cx
                .open_window(options, |window, cx: &mut App| {
                    let view = crate_view_fn(window, cx);
                    let root = cx.new(|cx| FacadeRoot::new(title.clone(), view, window, cx));

                    cx.new(|cx| Root::new(root.into(), window, cx))
                })
                .expect("failed to open window");

            window
                .update(cx, |_, window, _| {
                    window.activate_window();
                    window.set_window_title(&title);
                })
                .expect("failed to update window");

            Ok::<_, anyhow::Error>(())
        })
        .detach();
    }

    fn shortcut_binding_init(cx: &mut App) {
        #[cfg(target_os = "macos")]
        cx.bind_keys([
            KeyBinding::new("cmd-q", Quit, None),
            KeyBinding::new("cmd-w", Hide, None),
        ]);
        #[cfg(not(target_os = "macos"))]
        cx.bind_keys([KeyBinding::new("ctrl-q", Quit, None)]);
        cx.on_action(|_: &Quit, cx: &mut App| {
            cx.quit();
        });
        cx.on_action(|_: &Hide, cx: &mut App| {
            cx.hide();
        });
    }

    fn menu_init(cx: &mut App) {
        cx.set_menus(vec![
            Menu {
                name: t!("Gallery.TITLE").to_string().into(),
                items: vec![MenuItem::action(t!("Gallery.Menu.QUIT").to_string(), Quit)],
            },
            Menu {
                name: t!("Gallery.Menu.WINDOW").to_string().into(),
                items: vec![],
            },
        ]);
    }

    fn window_options_init(cx: &mut App) -> WindowOptions {
        let mut window_size = size(px(1200.0), px(900.0));
        if let Some(display) = cx.primary_display() {
            let display_size = display.bounds().size;
            window_size.width = window_size.width.min(display_size.width * 0.6);
            window_size.height = window_size.height.min(display_size.height * 0.6);
        }
        let window_bounds = Bounds::centered(None, window_size, cx);

        WindowOptions {
            window_bounds: Some(WindowBounds::Windowed(window_bounds)),
            titlebar: Some(TitleBar::title_bar_options()),
            window_min_size: Some(gpui::Size {
                width: px(640.),
                height: px(480.),
            }),
            kind: WindowKind::Normal,
            ..Default::default()
        }
    }
}

/// Opens the gallery window and runs the UI loop until quit.
pub fn setup(
    request_sender: Sender<ListingRequest>,
    watch_sender: Sender<PathBuf>,
    data_receiver: Receiver<Listing>,
) {
    let app = Application::new().with_assets(GalleryAssets);

    app.run(move |cx: &mut App| {
        Facade::init(cx);
        debug!("facade initialized");

        Facade::create_new_window(
            &t!("Gallery.TITLE"),
            move |window, cx| {
                GalleryView::create(window, cx, request_sender, watch_sender, data_receiver)
            },
            cx,
        );
    });
}
