use std::{
    cell::RefCell,
    collections::HashSet,
    mem,
    path::{Path, PathBuf},
    rc::Rc,
};

use crossbeam_channel::Sender;
use gpui::{
    App, AppContext, Context, Entity, IntoElement, ParentElement, Render, Styled, Subscription,
    Window, div, prelude::FluentBuilder,
};
use gpui_component::{
    ActiveTheme, Disableable, IconName, Sizable,
    button::{Button, ButtonVariants},
    h_flex,
    table::Table,
    v_flex,
};
use indexify::{Entry, Listing, ListingQuery, ListingRequest};
use smol::channel::Receiver;
use rust_i18n::t;
use tablify::{HumanSize, Item, TableCallbacks, TableViewController, TableViewProps, Translator};
use tracing::{debug, trace, warn};
use vaultify::{LIMIT, SELECTABLE, SORT, VAULTIFY};

use crate::{
    component::gallery_table::{GalleryTableDelegate, Wake},
    locale::Locale,
};

const PAGE_SIZES: [usize; 3] = [10, 20, 50];

#[derive(Clone, Debug, PartialEq, Eq)]
enum Intent {
    Sort(String),
    Page(usize),
    Toggle(i64),
    OpenFolder(i64),
    OpenFile(i64),
}

type Intents = Rc<RefCell<Vec<Intent>>>;

fn sink(intents: &Intents) -> impl Fn(Intent) + 'static {
    let intents = intents.clone();
    move |intent| intents.borrow_mut().push(intent)
}

/// Owns everything the table only reports on: folder, sort, page, page size
/// and selection. Listings arrive from the listing service.
pub struct GalleryView {
    table: Entity<Table<GalleryTableDelegate>>,
    strings: Rc<Locale>,
    intents: Intents,
    folder: PathBuf,
    back_stack: Vec<PathBuf>,
    sort: String,
    page: usize,
    limit: usize,
    count: usize,
    selectable: bool,
    entries: Vec<Entry>,
    selected: HashSet<i64>,
    error: Option<String>,
    loading: bool,
    request_sender: Sender<ListingRequest>,
    watch_sender: Sender<PathBuf>,
    _subscriptions: Vec<Subscription>,
}

impl GalleryView {
    pub fn create(
        window: &mut Window,
        cx: &mut App,
        request_sender: Sender<ListingRequest>,
        watch_sender: Sender<PathBuf>,
        data_receiver: Receiver<Listing>,
    ) -> Entity<Self> {
        cx.new(|cx| Self::new(window, cx, request_sender, watch_sender, data_receiver))
    }

    fn new(
        window: &mut Window,
        cx: &mut Context<Self>,
        request_sender: Sender<ListingRequest>,
        watch_sender: Sender<PathBuf>,
        data_receiver: Receiver<Listing>,
    ) -> Self {
        debug!("creating gallery view");
        let preferences = VAULTIFY.preferences();
        let strings = Rc::new(Locale);

        let host = cx.weak_entity();
        let wake: Wake = Rc::new(move |cx: &mut App| {
            let host = host.clone();
            cx.defer(move |cx| {
                host.update(cx, |this, cx| this.drain_intents(cx)).ok();
            });
        });
        let controller = TableViewController::new(Rc::new(HumanSize), strings.clone());
        let table = cx.new(|cx| Table::new(GalleryTableDelegate::new(controller, wake), window, cx));
        table.update(cx, |table, cx| table.set_stripe(true, cx));

        let mounted = table.downgrade();
        window.on_next_frame(move |_, cx| {
            mounted
                .update(cx, |table, cx| {
                    table.delegate_mut().mount();
                    // header sort state is cached when the table is prepared
                    table.refresh(cx);
                    cx.notify();
                })
                .ok();
        });
        let _subscriptions = vec![cx.on_release(|this: &mut Self, cx| {
            this.table
                .update(cx, |table, _| table.delegate_mut().unmount());
        })];

        cx.spawn(async move |this, cx| {
            while let Ok(listing) = data_receiver.recv().await {
                trace!(
                    "listing received: {} of {} entries",
                    listing.entries.len(),
                    listing.count
                );
                if this
                    .update(cx, |this, cx| this.apply_listing(listing, cx))
                    .is_err()
                {
                    break;
                }
            }
            debug!("listing channel closed");
        })
        .detach();

        let mut view = Self {
            table,
            strings,
            intents: Rc::default(),
            folder: preferences.root_path,
            back_stack: vec![],
            sort: preferences.sort,
            page: 1,
            limit: preferences.limit,
            count: 0,
            selectable: preferences.selectable,
            entries: vec![],
            selected: HashSet::new(),
            error: None,
            loading: false,
            request_sender,
            watch_sender,
            _subscriptions,
        };
        view.fetch(cx);
        view
    }

    fn query(&self) -> ListingQuery {
        ListingQuery {
            folder: self.folder.clone(),
            sort: self.sort.clone(),
            page: self.page,
            limit: self.limit,
        }
    }

    fn items(&self) -> Vec<Item> {
        self.entries
            .iter()
            .map(|entry| Item {
                selected: self.selected.contains(&entry.item.id),
                ..entry.item.clone()
            })
            .collect()
    }

    fn notice(&self) -> String {
        if self.loading {
            t!("Gallery.LOADING").into_owned()
        } else if let Some(error) = &self.error {
            t!("Gallery.LIST_FAILED", error = error).into_owned()
        } else {
            self.strings.translate("Gallery.NO_ITEMS")
        }
    }

    fn props(&self) -> TableViewProps {
        let sort = sink(&self.intents);
        let page = sink(&self.intents);
        let open_folder = sink(&self.intents);
        let open_file = sink(&self.intents);
        let notice = self.notice();

        let mut callbacks = TableCallbacks::default()
            .on_sort(move |spec| sort(Intent::Sort(spec)))
            .on_set_page(move |to| page(Intent::Page(to)))
            .on_open_folder(move |_, item| open_folder(Intent::OpenFolder(item.id)))
            .on_open_file(move |_, item| open_file(Intent::OpenFile(item.id)))
            .render_no_items_notice(move || notice.clone());
        if self.selectable {
            let toggle = sink(&self.intents);
            callbacks = callbacks.on_select(move |_, item| toggle(Intent::Toggle(item.id)));
        }

        TableViewProps {
            items: self.items(),
            selectable_items: self.selectable,
            sort: self.sort.clone(),
            page: self.page,
            limit: self.limit,
            count: self.count,
            callbacks,
        }
    }

    fn sync_table(&mut self, cx: &mut Context<Self>) {
        let props = self.props();
        self.table.update(cx, |table, cx| {
            table.delegate_mut().set_props(props);
            table.refresh(cx);
        });
        cx.notify();
    }

    fn fetch(&mut self, cx: &mut Context<Self>) {
        self.loading = true;
        self.error = None;
        let query = self.query();
        debug!(
            "fetching {} page {} sorted by {}",
            query.folder.display(),
            query.page,
            query.sort
        );
        if let Err(e) = self.request_sender.send(ListingRequest::Fetch(query)) {
            warn!("listing service unavailable: {e:?}");
            self.loading = false;
            self.error = Some("listing service stopped".to_string());
        }
        if let Err(e) = self.watch_sender.send(self.folder.clone()) {
            warn!("folder watcher unavailable: {e:?}");
        }
        self.sync_table(cx);
    }

    fn apply_listing(&mut self, listing: Listing, cx: &mut Context<Self>) {
        if listing.query != self.query() {
            trace!("dropping stale listing for {}", listing.query.folder.display());
            return;
        }

        self.loading = false;
        self.count = listing.count;
        self.error = listing.error;
        self.entries = listing.entries;

        let max_page = self.count.div_ceil(self.limit.max(1));
        if self.entries.is_empty() && self.page > max_page && max_page > 0 {
            debug!("page {} is past the end, moving to {max_page}", self.page);
            self.page = max_page;
            self.fetch(cx);
            return;
        }
        self.sync_table(cx);
    }

    fn drain_intents(&mut self, cx: &mut Context<Self>) {
        let intents = mem::take(&mut *self.intents.borrow_mut());
        for intent in intents {
            trace!("handling {intent:?}");
            match intent {
                Intent::Sort(sort) => self.set_sort(sort, cx),
                Intent::Page(page) => self.set_page(page, cx),
                Intent::Toggle(id) => self.toggle(id, cx),
                Intent::OpenFolder(id) => {
                    if let Some(path) = self.path_of(id) {
                        self.open_folder(path, cx);
                    }
                }
                Intent::OpenFile(id) => {
                    if let Some(path) = self.path_of(id) {
                        debug!("opening {}", path.display());
                        cx.open_with_system(&path);
                    }
                }
            }
        }
    }

    fn path_of(&self, id: i64) -> Option<PathBuf> {
        self.entries
            .iter()
            .find(|entry| entry.item.id == id)
            .map(|entry| entry.path.clone())
    }

    fn set_sort(&mut self, sort: String, cx: &mut Context<Self>) {
        if let Err(e) = VAULTIFY.set(SORT, sort.as_str()) {
            warn!("failed to persist sort: {e:?}");
        }
        self.sort = sort;
        self.page = 1;
        self.fetch(cx);
    }

    fn set_page(&mut self, page: usize, cx: &mut Context<Self>) {
        let max_page = self.count.div_ceil(self.limit.max(1)).max(1);
        let page = page.clamp(1, max_page);
        if page != self.page {
            self.page = page;
            self.fetch(cx);
        }
    }

    fn set_limit(&mut self, limit: usize, cx: &mut Context<Self>) {
        if limit == self.limit {
            return;
        }
        if let Err(e) = VAULTIFY.set(LIMIT, limit.to_string()) {
            warn!("failed to persist page size: {e:?}");
        }
        self.limit = limit;
        self.page = 1;
        self.fetch(cx);
    }

    fn toggle_selectable(&mut self, cx: &mut Context<Self>) {
        self.selectable = !self.selectable;
        if !self.selectable {
            self.selected.clear();
        }
        if let Err(e) = VAULTIFY.set(SELECTABLE, self.selectable.to_string()) {
            warn!("failed to persist selection mode: {e:?}");
        }
        self.sync_table(cx);
    }

    fn toggle(&mut self, id: i64, cx: &mut Context<Self>) {
        if !self.selected.remove(&id) {
            self.selected.insert(id);
        }
        self.sync_table(cx);
    }

    fn open_folder(&mut self, path: PathBuf, cx: &mut Context<Self>) {
        let previous = mem::replace(&mut self.folder, path);
        self.back_stack.push(previous);
        self.enter(cx);
    }

    fn go_back(&mut self, cx: &mut Context<Self>) {
        if let Some(previous) = self.back_stack.pop() {
            self.folder = previous;
            self.enter(cx);
        }
    }

    fn go_up(&mut self, cx: &mut Context<Self>) {
        if let Some(parent) = self.folder.parent().map(Path::to_path_buf) {
            self.open_folder(parent, cx);
        }
    }

    fn enter(&mut self, cx: &mut Context<Self>) {
        self.page = 1;
        self.count = 0;
        self.entries.clear();
        self.selected.clear();
        self.fetch(cx);
    }

    fn request_page(&mut self, page: usize, cx: &mut Context<Self>) {
        self.table
            .update(cx, |table, cx| table.delegate().set_page(page, cx));
    }

    fn status(&self) -> String {
        let mut status = t!("Gallery.ITEMS", count = self.count).into_owned();
        if self.selectable {
            status.push_str(" · ");
            status.push_str(&t!("Gallery.SELECTED", count = self.selected.len()));
        }
        status
    }
}

impl Render for GalleryView {
    fn render(&mut self, _: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let (current_page, max_page, notice) = {
            let grid = self.table.read(cx).delegate().grid();
            (grid.current_page, grid.max_page, grid.no_items_notice)
        };

        let toolbar = h_flex()
            .gap_2()
            .items_center()
            .child(
                Button::new("back")
                    .icon(IconName::ArrowLeft)
                    .small()
                    .ghost()
                    .disabled(self.back_stack.is_empty())
                    .on_click(cx.listener(|this, _, _, cx| this.go_back(cx))),
            )
            .child(
                Button::new("up")
                    .icon(IconName::ArrowUp)
                    .small()
                    .ghost()
                    .disabled(self.folder.parent().is_none())
                    .on_click(cx.listener(|this, _, _, cx| this.go_up(cx))),
            )
            .child(
                div()
                    .flex_1()
                    .overflow_hidden()
                    .text_color(cx.theme().muted_foreground)
                    .child(self.folder.display().to_string()),
            )
            .child(
                Button::new("select-mode")
                    .label(self.strings.translate(tablify::SELECT_KEY))
                    .small()
                    .map(|this| if self.selectable { this.primary() } else { this.ghost() })
                    .on_click(cx.listener(|this, _, _, cx| this.toggle_selectable(cx))),
            );

        let body = match notice {
            Some(notice) => div()
                .size_full()
                .flex()
                .items_center()
                .justify_center()
                .text_color(cx.theme().muted_foreground)
                .child(notice)
                .into_any_element(),
            None => self.table.clone().into_any_element(),
        };

        let page_sizes = PAGE_SIZES.map(|limit| {
            Button::new(("page-size", limit))
                .label(limit.to_string())
                .small()
                .map(|this| {
                    if limit == self.limit {
                        this.primary()
                    } else {
                        this.ghost()
                    }
                })
                .on_click(cx.listener(move |this, _, _, cx| this.set_limit(limit, cx)))
        });

        let pager = h_flex()
            .gap_1()
            .items_center()
            .children(page_sizes)
            .child(
                Button::new("page-prev")
                    .icon(IconName::ChevronLeft)
                    .small()
                    .ghost()
                    .disabled(current_page <= 1)
                    .on_click(cx.listener(move |this, _, _, cx| {
                        this.request_page(current_page.saturating_sub(1), cx)
                    })),
            )
            .child(div().px_2().child(format!("{current_page} / {}", max_page.max(1))))
            .child(
                Button::new("page-next")
                    .icon(IconName::ChevronRight)
                    .small()
                    .ghost()
                    .disabled(current_page >= max_page)
                    .on_click(cx.listener(move |this, _, _, cx| {
                        this.request_page(current_page + 1, cx)
                    })),
            );

        v_flex()
            .size_full()
            .text_sm()
            .gap_2()
            .child(toolbar)
            .child(div().flex_1().overflow_hidden().child(body))
            .child(
                h_flex()
                    .justify_between()
                    .items_center()
                    .child(self.status())
                    .child(pager),
            )
    }
}
