use std::{cmp::Ordering, fmt};

use crate::{
    format::{SELECT_KEY, SizeFormatter, Translator},
    item::Item,
};

pub const PLACEHOLDER_WIDTH: f32 = 48.0;
pub const PLACEHOLDER_HEIGHT: f32 = 48.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Column {
    Selected,
    Thumbnail,
    Title,
    Size,
    LastUpdated,
}

impl Column {
    pub fn name(self) -> &'static str {
        match self {
            Self::Selected => "selected",
            Self::Thumbnail => "thumbnail",
            Self::Title => "title",
            Self::Size => "size",
            Self::LastUpdated => "lastUpdated",
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Thumbnail {
    Image { src: String, alt: String },
    Placeholder { width: f32, height: f32 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Progress {
    Complete,
    Partial { percent: u8 },
}

#[derive(Clone, Debug, PartialEq)]
pub enum Cell {
    Checkbox {
        checked: bool,
        label: String,
        tab_index: i32,
        /// Mouse down must not move keyboard focus onto the box.
        prevent_focus: bool,
    },
    Thumbnail(Thumbnail),
    Title {
        text: String,
        progress: Option<Progress>,
    },
    Text(String),
}

/// Collaborators a renderer may consult.
#[derive(Clone, Copy)]
pub struct RenderEnv<'a> {
    pub sizes: &'a dyn SizeFormatter,
    pub strings: &'a dyn Translator,
}

pub type Renderer = fn(&Item, &RenderEnv<'_>) -> Option<Cell>;
pub type Comparator = fn(&Item, &Item) -> Ordering;

#[derive(Clone, Copy)]
pub struct ColumnConfig {
    pub column: Column,
    pub display_name: &'static str,
    pub css_class_name: Option<&'static str>,
    pub sortable: bool,
    pub renderer: Renderer,
    pub compare: Option<Comparator>,
}

impl fmt::Debug for ColumnConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnConfig")
            .field("column", &self.column)
            .field("display_name", &self.display_name)
            .field("css_class_name", &self.css_class_name)
            .field("sortable", &self.sortable)
            .field("compare", &self.compare.is_some())
            .finish_non_exhaustive()
    }
}

impl ColumnConfig {
    pub fn render(&self, item: &Item, env: &RenderEnv<'_>) -> Option<Cell> {
        (self.renderer)(item, env)
    }
}

const BASE_COLUMNS: [Column; 4] = [
    Column::Thumbnail,
    Column::Title,
    Column::Size,
    Column::LastUpdated,
];

/// Visible columns in display order. Never depends on the data.
pub fn column_set(selectable_items: bool) -> Vec<Column> {
    let mut columns = Vec::with_capacity(BASE_COLUMNS.len() + 1);
    if selectable_items {
        columns.push(Column::Selected);
    }
    columns.extend(BASE_COLUMNS);
    columns
}

pub fn column_config(column: Column) -> ColumnConfig {
    match column {
        Column::Selected => ColumnConfig {
            column,
            display_name: "",
            css_class_name: Some("gallery__table-column--select"),
            sortable: false,
            renderer: render_select,
            compare: None,
        },
        Column::Thumbnail => ColumnConfig {
            column,
            display_name: "",
            css_class_name: Some("gallery__table-column--image"),
            sortable: false,
            renderer: render_thumbnail,
            compare: None,
        },
        Column::Title => ColumnConfig {
            column,
            display_name: "Title",
            css_class_name: Some("gallery__table-column--title"),
            sortable: true,
            renderer: render_title,
            // keep server order
            compare: Some(|_, _| Ordering::Equal),
        },
        Column::Size => ColumnConfig {
            column,
            display_name: "Size",
            css_class_name: None,
            sortable: true,
            renderer: render_size,
            compare: None,
        },
        Column::LastUpdated => ColumnConfig {
            column,
            display_name: "Modified",
            css_class_name: None,
            sortable: true,
            renderer: render_date,
            compare: None,
        },
    }
}

pub fn render_select(item: &Item, env: &RenderEnv<'_>) -> Option<Cell> {
    Some(Cell::Checkbox {
        checked: item.selected,
        label: env.strings.translate(SELECT_KEY),
        tab_index: -1,
        prevent_focus: true,
    })
}

pub fn render_thumbnail(item: &Item, _: &RenderEnv<'_>) -> Option<Cell> {
    let src = item
        .thumbnail_url
        .as_deref()
        .filter(|url| !url.is_empty())
        .or_else(|| item.url.as_deref().filter(|url| !url.is_empty()));

    let thumbnail = match src {
        Some(src) => Thumbnail::Image {
            src: src.to_string(),
            alt: item.title.clone(),
        },
        None => Thumbnail::Placeholder {
            width: PLACEHOLDER_WIDTH,
            height: PLACEHOLDER_HEIGHT,
        },
    };
    Some(Cell::Thumbnail(thumbnail))
}

pub fn render_title(item: &Item, _: &RenderEnv<'_>) -> Option<Cell> {
    Some(Cell::Title {
        text: item.title.clone(),
        progress: progress_indicator(item),
    })
}

pub fn render_date(item: &Item, _: &RenderEnv<'_>) -> Option<Cell> {
    if item.is_folder() {
        return None;
    }
    Some(Cell::Text(item.last_updated.clone()))
}

pub fn render_size(item: &Item, env: &RenderEnv<'_>) -> Option<Cell> {
    if item.is_folder() {
        return None;
    }
    Some(Cell::Text(env.sizes.format_size(item.size)))
}

pub fn progress_indicator(item: &Item) -> Option<Progress> {
    if !item.uploading || item.has_error() {
        return None;
    }
    if item.is_persisted() {
        return Some(Progress::Complete);
    }
    // NaN saturates to 0
    Some(Progress::Partial {
        percent: item.upload_progress.clamp(0.0, 100.0).round() as u8,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        format::{Catalog, HumanSize},
        item::{ItemMessage, MessageKind},
    };

    fn env_with<'a>(catalog: &'a Catalog) -> RenderEnv<'a> {
        RenderEnv {
            sizes: &HumanSize,
            strings: catalog,
        }
    }

    #[test]
    fn selection_column_is_prepended_only_when_selectable() {
        assert_eq!(
            column_set(false),
            vec![
                Column::Thumbnail,
                Column::Title,
                Column::Size,
                Column::LastUpdated
            ]
        );
        let selectable = column_set(true);
        assert_eq!(selectable.first(), Some(&Column::Selected));
        assert_eq!(&selectable[1..], column_set(false).as_slice());
    }

    #[test]
    fn folders_hide_size_and_date() {
        let catalog = Catalog::default();
        let env = env_with(&catalog);
        let mut folder = Item::folder(7, "Photos");
        folder.size = 4096;
        folder.last_updated = "2020-01-01".into();

        assert_eq!(render_size(&folder, &env), None);
        assert_eq!(render_date(&folder, &env), None);
    }

    #[test]
    fn files_show_formatted_size_and_raw_date() {
        let catalog = Catalog::default();
        let env = env_with(&catalog);
        let mut file = Item::file(1, "a.png");
        file.size = 2048;
        file.last_updated = "2020-01-01".into();

        assert_eq!(render_size(&file, &env), Some(Cell::Text("2.0 KB".into())));
        assert_eq!(
            render_date(&file, &env),
            Some(Cell::Text("2020-01-01".into()))
        );
    }

    #[test]
    fn thumbnail_falls_back_to_url_then_placeholder() {
        let catalog = Catalog::default();
        let env = env_with(&catalog);
        let mut file = Item::file(1, "a.png");
        file.url = Some("/assets/a.png".into());

        assert_eq!(
            render_thumbnail(&file, &env),
            Some(Cell::Thumbnail(Thumbnail::Image {
                src: "/assets/a.png".into(),
                alt: "a.png".into(),
            }))
        );

        file.thumbnail_url = Some("/thumbs/a.png".into());
        assert!(matches!(
            render_thumbnail(&file, &env),
            Some(Cell::Thumbnail(Thumbnail::Image { src, .. })) if src == "/thumbs/a.png"
        ));

        let bare = Item::file(2, "b.bin");
        assert_eq!(
            render_thumbnail(&bare, &env),
            Some(Cell::Thumbnail(Thumbnail::Placeholder {
                width: PLACEHOLDER_WIDTH,
                height: PLACEHOLDER_HEIGHT,
            }))
        );
    }

    #[test]
    fn checkbox_is_unfocusable_and_labelled() {
        let catalog = Catalog::default().with(SELECT_KEY, "Pick");
        let env = env_with(&catalog);
        let mut file = Item::file(1, "a.png");
        file.selected = true;

        assert_eq!(
            render_select(&file, &env),
            Some(Cell::Checkbox {
                checked: true,
                label: "Pick".into(),
                tab_index: -1,
                prevent_focus: true,
            })
        );
    }

    #[test]
    fn progress_is_hidden_unless_uploading_without_error() {
        let mut item = Item::file(-1, "up.png");
        item.upload_progress = 40.0;
        assert_eq!(progress_indicator(&item), None);

        item.uploading = true;
        item.message = Some(ItemMessage {
            kind: MessageKind::Error,
            text: "failed".into(),
        });
        assert_eq!(progress_indicator(&item), None);

        item.message = Some(ItemMessage {
            kind: MessageKind::Success,
            text: "ok".into(),
        });
        assert_eq!(progress_indicator(&item), Some(Progress::Partial { percent: 40 }));
    }

    #[test]
    fn persisted_uploads_are_complete_whatever_the_progress() {
        for progress in [0.0, 40.0, 100.0] {
            let mut item = Item::file(5, "up.png");
            item.uploading = true;
            item.upload_progress = progress;
            assert_eq!(progress_indicator(&item), Some(Progress::Complete));
        }
    }

    #[test]
    fn partial_progress_is_rounded_and_clamped() {
        let mut item = Item::file(-1, "up.png");
        item.uploading = true;

        for (progress, percent) in [(40.4, 40), (99.6, 100), (250.0, 100), (-3.0, 0), (f32::NAN, 0)] {
            item.upload_progress = progress;
            assert_eq!(progress_indicator(&item), Some(Progress::Partial { percent }));
        }
    }

    #[test]
    fn title_comparator_never_reorders() {
        let config = column_config(Column::Title);
        let compare = config.compare.unwrap();
        let mut items = vec![Item::file(1, "b"), Item::file(2, "a"), Item::file(3, "c")];
        items.sort_by(compare);
        let ids: Vec<i64> = items.iter().map(|item| item.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }
}
