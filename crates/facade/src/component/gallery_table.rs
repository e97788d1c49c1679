use std::{path::PathBuf, rc::Rc};

use gpui::{
    AnyElement, App, Context, ImageSource, InteractiveElement, IntoElement, MouseButton,
    ParentElement, Pixels, SharedString, StatefulInteractiveElement, Styled, Window, div, img,
    prelude::FluentBuilder, px,
};
use gpui_component::{
    ActiveTheme, h_flex,
    checkbox::Checkbox,
    progress::Progress as ProgressBar,
    table::{self, ColFixed, ColSort, Table, TableDelegate},
    v_flex,
};
use tablify::{
    Cell, ClickEvent as CellClick, Column, GridConfig, Item, Progress, TableViewController,
    TableViewProps, Thumbnail,
    columns::{PLACEHOLDER_HEIGHT, PLACEHOLDER_WIDTH, column_set},
};
use rust_i18n::t;
use tracing::trace;

use super::custom_icon::placeholder_icon;
use crate::locale::column_label;

/// Called after the table forwarded an intent, so the host can pick it up.
pub type Wake = Rc<dyn Fn(&mut App)>;

pub struct GalleryTableDelegate {
    controller: TableViewController,
    props: TableViewProps,
    wake: Wake,
}

impl GalleryTableDelegate {
    pub fn new(controller: TableViewController, wake: Wake) -> Self {
        Self {
            controller,
            props: TableViewProps::default(),
            wake,
        }
    }

    pub fn set_props(&mut self, props: TableViewProps) {
        self.props = props;
    }

    pub fn mount(&mut self) {
        self.controller.mount();
    }

    pub fn unmount(&mut self) {
        self.controller.unmount();
    }

    pub fn grid(&self) -> GridConfig<'_> {
        self.controller.grid_config(&self.props)
    }

    pub fn set_page(&self, page: usize, cx: &mut App) {
        self.controller.handle_set_page(&self.props, page);
        (self.wake)(cx);
    }

    fn column(&self, col_ix: usize) -> Option<Column> {
        column_set(self.props.selectable_items).get(col_ix).copied()
    }

    fn render_cell(&self, cell: Cell, row_ix: usize, item: &Item, cx: &App) -> AnyElement {
        match cell {
            Cell::Checkbox {
                checked,
                label,
                prevent_focus,
                tab_index,
            } => div()
                // gpui focuses on mouse down; a negative tab index means never focusable
                .when(prevent_focus || tab_index < 0, |this| {
                    this.on_mouse_down(MouseButton::Left, |_, window, _| window.prevent_default())
                })
                .child(
                    Checkbox::new(("gallery-select", row_ix))
                        .checked(checked)
                        .when(!label.is_empty(), |this| this.label(label)),
                )
                .into_any_element(),
            Cell::Thumbnail(Thumbnail::Image { src, .. }) => img(image_source(&src))
                .w(px(PLACEHOLDER_WIDTH))
                .h(px(PLACEHOLDER_HEIGHT))
                .rounded_sm()
                .into_any_element(),
            Cell::Thumbnail(Thumbnail::Placeholder { width, height }) => div()
                .w(px(width))
                .h(px(height))
                .flex()
                .items_center()
                .justify_center()
                .child(placeholder_icon(item))
                .into_any_element(),
            Cell::Title { text, progress } => v_flex()
                .gap_1()
                .child(text)
                .children(progress.map(|progress| match progress {
                    Progress::Complete => div()
                        .text_xs()
                        .text_color(cx.theme().muted_foreground)
                        .child(t!("Gallery.UPLOADED").to_string())
                        .into_any_element(),
                    Progress::Partial { percent } => ProgressBar::new()
                        .value(percent as f32)
                        .into_any_element(),
                }))
                .into_any_element(),
            Cell::Text(text) => text.into_any_element(),
        }
    }
}

/// Header arrow for a column. The table caches this when prepared, so it must
/// be refreshed whenever the grid's reported direction changes.
fn header_sort(grid: &GridConfig<'_>, col_ix: usize) -> Option<ColSort> {
    let config = grid.column_at(col_ix)?;
    if !config.sortable {
        return None;
    }
    if !grid.is_sorted_by(config.column) {
        return Some(ColSort::Default);
    }
    Some(if grid.sort_ascending {
        ColSort::Ascending
    } else {
        ColSort::Descending
    })
}

fn image_source(src: &str) -> ImageSource {
    if src.starts_with("http://") || src.starts_with("https://") {
        SharedString::from(src.to_string()).into()
    } else {
        PathBuf::from(src).into()
    }
}

impl TableDelegate for GalleryTableDelegate {
    fn cols_count(&self, _: &App) -> usize {
        column_set(self.props.selectable_items).len()
    }

    fn rows_count(&self, _: &App) -> usize {
        self.props.items.len()
    }

    fn col_name(&self, col_ix: usize, _: &App) -> SharedString {
        self.column(col_ix)
            .map(|column| column_label(column).into())
            .unwrap_or_else(|| "--".into())
    }

    fn col_width(&self, col_ix: usize, _: &App) -> Pixels {
        match self.column(col_ix) {
            Some(Column::Selected) => 96.0.into(),
            Some(Column::Thumbnail) => 64.0.into(),
            Some(Column::Title) => 360.0.into(),
            Some(Column::Size) => 100.0.into(),
            Some(Column::LastUpdated) => 160.0.into(),
            None => 100.0.into(),
        }
    }

    fn col_fixed(&self, col_ix: usize, _: &App) -> Option<table::ColFixed> {
        match self.column(col_ix) {
            Some(Column::Selected | Column::Thumbnail) => Some(ColFixed::Left),
            _ => None,
        }
    }

    fn can_load_more(&self, _: &App) -> bool {
        false
    }

    fn render_tr(
        &self,
        row_ix: usize,
        _: &mut Window,
        _: &mut Context<Table<Self>>,
    ) -> gpui::Stateful<gpui::Div> {
        div().id(row_ix)
    }

    fn render_td(
        &self,
        row_ix: usize,
        col_ix: usize,
        _: &mut Window,
        cx: &mut Context<Table<Self>>,
    ) -> impl IntoElement {
        let (Some(item), Some(column)) = (self.props.items.get(row_ix), self.column(col_ix)) else {
            return "--".into_any_element();
        };
        let content = self
            .controller
            .render_cell(column, item)
            .map(|cell| self.render_cell(cell, row_ix, item, cx));

        h_flex()
            .id(("gallery-cell", row_ix * 8 + col_ix))
            .size_full()
            .items_center()
            .children(content)
            .on_click(cx.listener(
                move |table: &mut Table<Self>, _: &gpui::ClickEvent, window, cx| {
                    let delegate = table.delegate();
                    let Some(item) = delegate.props.items.get(row_ix) else {
                        return;
                    };
                    let mut event = CellClick::in_column(column);
                    delegate
                        .controller
                        .handle_row_click(&delegate.props, &mut event, item);
                    if event.is_propagation_stopped() {
                        cx.stop_propagation();
                    }
                    if event.is_default_prevented() {
                        window.prevent_default();
                    }
                    (delegate.wake)(cx);
                },
            ))
            .into_any_element()
    }

    fn can_move_col(&self, _: usize, _: &App) -> bool {
        false
    }

    fn col_sort(&self, col_ix: usize, _: &App) -> Option<ColSort> {
        header_sort(&self.grid(), col_ix)
    }

    fn perform_sort(
        &mut self,
        col_ix: usize,
        sort: ColSort,
        _: &mut Window,
        cx: &mut Context<Table<Self>>,
    ) {
        let grid = self.grid();
        let Some(config) = grid.column_at(col_ix).filter(|config| config.sortable) else {
            return;
        };
        let column = config.column;
        let ascending = match sort {
            ColSort::Ascending => true,
            ColSort::Descending => false,
            // the widget cycles back to unsorted after descending
            ColSort::Default => !(grid.is_sorted_by(column) && grid.sort_ascending),
        };
        trace!("grid asked to sort {column} ascending={ascending}");

        self.controller
            .handle_sort(&self.props, column.name(), ascending);
        (self.wake)(cx);
    }
}
