use std::rc::Rc;

use tracing::{debug, trace, warn};

use crate::{
    columns::{Cell, Column, ColumnConfig, RenderEnv, column_config, column_set},
    format::{Catalog, HumanSize, SizeFormatter, Translator},
    gate::SortGate,
    item::Item,
    sort::{SortDirection, SortSpec},
};

pub const TABLE_CLASS_NAME: &str = "gallery__table table table-hover";
pub const GRID_CLASS_NAME: &str = "gallery__main-view--table";
pub const ROW_CLASS_NAME: &str = "gallery__table-row";

const ALL_COLUMNS: [Column; 5] = [
    Column::Selected,
    Column::Thumbnail,
    Column::Title,
    Column::LastUpdated,
    Column::Size,
];

/// A click on a rendered cell, tagged with the column it landed in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClickEvent {
    pub region: Option<Column>,
    propagation_stopped: bool,
    default_prevented: bool,
}

impl ClickEvent {
    pub fn new(region: Option<Column>) -> Self {
        Self {
            region,
            propagation_stopped: false,
            default_prevented: false,
        }
    }

    pub fn in_column(column: Column) -> Self {
        Self::new(Some(column))
    }

    pub fn targets_selection(&self) -> bool {
        self.region == Some(Column::Selected)
    }

    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }

    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }
}

pub type SortHandler = Rc<dyn Fn(String)>;
pub type PageHandler = Rc<dyn Fn(usize)>;
pub type SelectHandler = Rc<dyn Fn(&mut ClickEvent, &Item)>;
pub type ActivateHandler = Rc<dyn Fn(&ClickEvent, &Item)>;
pub type NoticeRenderer = Rc<dyn Fn() -> String>;

/// Host intents the table forwards to. Everything else is the host's business.
#[derive(Clone)]
pub struct TableCallbacks {
    pub on_sort: SortHandler,
    pub on_set_page: PageHandler,
    pub on_select: Option<SelectHandler>,
    pub on_open_folder: ActivateHandler,
    pub on_open_file: ActivateHandler,
    pub render_no_items_notice: NoticeRenderer,
}

impl Default for TableCallbacks {
    fn default() -> Self {
        Self {
            on_sort: Rc::new(|_| {}),
            on_set_page: Rc::new(|_| {}),
            on_select: None,
            on_open_folder: Rc::new(|_, _| {}),
            on_open_file: Rc::new(|_, _| {}),
            render_no_items_notice: Rc::new(String::new),
        }
    }
}

impl TableCallbacks {
    pub fn on_sort(mut self, f: impl Fn(String) + 'static) -> Self {
        self.on_sort = Rc::new(f);
        self
    }

    pub fn on_set_page(mut self, f: impl Fn(usize) + 'static) -> Self {
        self.on_set_page = Rc::new(f);
        self
    }

    pub fn on_select(mut self, f: impl Fn(&mut ClickEvent, &Item) + 'static) -> Self {
        self.on_select = Some(Rc::new(f));
        self
    }

    pub fn on_open_folder(mut self, f: impl Fn(&ClickEvent, &Item) + 'static) -> Self {
        self.on_open_folder = Rc::new(f);
        self
    }

    pub fn on_open_file(mut self, f: impl Fn(&ClickEvent, &Item) + 'static) -> Self {
        self.on_open_file = Rc::new(f);
        self
    }

    pub fn render_no_items_notice(mut self, f: impl Fn() -> String + 'static) -> Self {
        self.render_no_items_notice = Rc::new(f);
        self
    }
}

/// Everything the table is handed on a single render.
#[derive(Clone, Default)]
pub struct TableViewProps {
    pub items: Vec<Item>,
    pub selectable_items: bool,
    pub sort: String,
    pub page: usize,
    pub limit: usize,
    pub count: usize,
    pub callbacks: TableCallbacks,
}

impl TableViewProps {
    pub fn max_page(&self) -> usize {
        if self.limit == 0 {
            return 0;
        }
        self.count.div_ceil(self.limit)
    }

    pub fn sort_spec(&self) -> Option<SortSpec> {
        match self.sort.parse::<SortSpec>() {
            Ok(spec) => Some(spec),
            Err(e) => {
                warn!("ignoring current sort: {e}");
                None
            }
        }
    }
}

/// Grid wiring derived from one set of props.
#[derive(Debug)]
pub struct GridConfig<'a> {
    pub table_class_name: &'static str,
    pub grid_class_name: &'static str,
    pub row_class_name: &'static str,
    pub columns: Vec<Column>,
    pub column_metadata: Vec<ColumnConfig>,
    pub current_page: usize,
    pub max_page: usize,
    pub sort_column: Option<String>,
    pub sort_ascending: bool,
    pub initial_sort: Option<String>,
    pub rows: &'a [Item],
    pub no_items_notice: Option<String>,
}

impl GridConfig<'_> {
    pub fn metadata(&self, column: Column) -> Option<&ColumnConfig> {
        self.column_metadata
            .iter()
            .find(|config| config.column == column)
    }

    pub fn column_at(&self, col_ix: usize) -> Option<&ColumnConfig> {
        self.columns
            .get(col_ix)
            .and_then(|column| self.metadata(*column))
    }

    pub fn is_sorted_by(&self, column: Column) -> bool {
        self.sort_column.as_deref() == Some(column.name())
    }
}

pub struct TableViewController {
    gate: SortGate,
    sizes: Rc<dyn SizeFormatter>,
    strings: Rc<dyn Translator>,
}

impl Default for TableViewController {
    fn default() -> Self {
        Self::new(Rc::new(HumanSize), Rc::new(Catalog::default()))
    }
}

impl TableViewController {
    pub fn new(sizes: Rc<dyn SizeFormatter>, strings: Rc<dyn Translator>) -> Self {
        Self {
            gate: SortGate::default(),
            sizes,
            strings,
        }
    }

    /// Call once the first render has been committed.
    pub fn mount(&mut self) {
        match self.gate {
            SortGate::Disabled => debug!("table view mounted, enabling sort"),
            SortGate::TornDown => trace!("ignoring mount after teardown"),
            SortGate::Enabled => {}
        }
        self.gate.mount();
    }

    pub fn unmount(&mut self) {
        debug!("table view torn down, disabling sort");
        self.gate.unmount();
    }

    pub fn sort_enabled(&self) -> bool {
        self.gate.is_enabled()
    }

    pub fn env(&self) -> RenderEnv<'_> {
        RenderEnv {
            sizes: self.sizes.as_ref(),
            strings: self.strings.as_ref(),
        }
    }

    pub fn grid_config<'a>(&self, props: &'a TableViewProps) -> GridConfig<'a> {
        let sort = props.sort_spec();
        let direction = sort
            .as_ref()
            .map_or(SortDirection::Desc, |spec| spec.direction);
        let sort_column = sort.map(|spec| spec.column);

        let no_items_notice = props
            .items
            .is_empty()
            .then(|| (props.callbacks.render_no_items_notice)());

        GridConfig {
            table_class_name: TABLE_CLASS_NAME,
            grid_class_name: GRID_CLASS_NAME,
            row_class_name: ROW_CLASS_NAME,
            columns: column_set(props.selectable_items),
            column_metadata: ALL_COLUMNS.into_iter().map(column_config).collect(),
            current_page: props.page,
            max_page: props.max_page(),
            initial_sort: sort_column.clone(),
            sort_column,
            sort_ascending: self.gate.reported_ascending(direction),
            rows: &props.items,
            no_items_notice,
        }
    }

    pub fn render_cell(&self, column: Column, item: &Item) -> Option<Cell> {
        column_config(column).render(item, &self.env())
    }

    pub fn activate(&self, props: &TableViewProps, event: &ClickEvent, item: &Item) {
        if item.is_folder() {
            debug!("opening folder {}", item.id);
            (props.callbacks.on_open_folder)(event, item);
        } else {
            debug!("opening file {}", item.id);
            (props.callbacks.on_open_file)(event, item);
        }
    }

    /// Clicks inside the selection column select rather than activate, as long
    /// as the host listens for selection.
    pub fn handle_row_click(&self, props: &TableViewProps, event: &mut ClickEvent, item: &Item) {
        if event.targets_selection() {
            event.stop_propagation();
            event.prevent_default();
            if let Some(on_select) = &props.callbacks.on_select {
                trace!("selecting item {}", item.id);
                on_select(event, item);
                return;
            }
        }

        self.activate(props, event, item);
    }

    pub fn handle_sort(&self, props: &TableViewProps, column: &str, ascending: bool) {
        if !self.gate.is_enabled() {
            trace!("dropping sort request for {column} before mount");
            return;
        }

        let spec = SortSpec::from_request(column, ascending);
        debug!("sort requested: {spec}");
        (props.callbacks.on_sort)(spec.to_string());
    }

    pub fn handle_set_page(&self, props: &TableViewProps, page: usize) {
        debug!("page requested: {page}");
        (props.callbacks.on_set_page)(page);
    }
}
