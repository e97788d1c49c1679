use std::{cell::RefCell, rc::Rc};

use tablify::{
    Cell, ClickEvent, Column, Item, Progress, TableCallbacks, TableViewController, TableViewProps,
    Thumbnail,
};

fn items(json: &str) -> Vec<Item> {
    serde_json::from_str(json).expect("valid item payload")
}

fn render_row(
    controller: &TableViewController,
    props: &TableViewProps,
    row: usize,
) -> Vec<Option<Cell>> {
    let config = controller.grid_config(props);
    config
        .columns
        .iter()
        .map(|column| controller.render_cell(*column, &config.rows[row]))
        .collect()
}

#[test]
fn renders_a_plain_file_row() {
    let controller = TableViewController::default();
    let props = TableViewProps {
        items: items(
            r#"[{"id":1,"type":"file","title":"a.png","size":2048,"lastUpdated":"2020-01-01"}]"#,
        ),
        selectable_items: false,
        sort: "title,asc".into(),
        page: 1,
        limit: 20,
        count: 1,
        ..Default::default()
    };

    let row = render_row(&controller, &props, 0);

    assert_eq!(
        row,
        vec![
            Some(Cell::Thumbnail(Thumbnail::Placeholder {
                width: tablify::columns::PLACEHOLDER_WIDTH,
                height: tablify::columns::PLACEHOLDER_HEIGHT,
            })),
            Some(Cell::Title {
                text: "a.png".into(),
                progress: None,
            }),
            Some(Cell::Text("2.0 KB".into())),
            Some(Cell::Text("2020-01-01".into())),
        ]
    );
}

#[test]
fn pending_upload_shows_partial_progress() {
    let controller = TableViewController::default();
    let pending = items(
        r#"[{"id":-1,"type":"file","title":"up.png","uploading":true,"uploadProgress":40}]"#,
    );

    assert_eq!(
        controller.render_cell(Column::Title, &pending[0]),
        Some(Cell::Title {
            text: "up.png".into(),
            progress: Some(Progress::Partial { percent: 40 }),
        })
    );
}

#[test]
fn confirmed_upload_shows_complete_progress() {
    let controller = TableViewController::default();
    let confirmed = items(
        r#"[{"id":5,"type":"file","title":"up.png","uploading":true,"uploadProgress":40}]"#,
    );

    assert_eq!(
        controller.render_cell(Column::Title, &confirmed[0]),
        Some(Cell::Title {
            text: "up.png".into(),
            progress: Some(Progress::Complete),
        })
    );
}

#[test]
fn folder_rows_leave_size_and_date_empty() {
    let controller = TableViewController::default();
    let folder = items(
        r#"[{"id":9,"type":"folder","title":"Docs","size":123456,"lastUpdated":"2021-05-05"}]"#,
    );

    assert_eq!(controller.render_cell(Column::Size, &folder[0]), None);
    assert_eq!(controller.render_cell(Column::LastUpdated, &folder[0]), None);
}

#[test]
fn full_loop_routes_every_intent() {
    let sorts = Rc::new(RefCell::new(Vec::new()));
    let pages = Rc::new(RefCell::new(Vec::new()));
    let opened = Rc::new(RefCell::new(Vec::new()));
    let selected = Rc::new(RefCell::new(Vec::new()));

    let callbacks = {
        let sorts = sorts.clone();
        let pages = pages.clone();
        let folders = opened.clone();
        let files = opened.clone();
        let selected = selected.clone();
        TableCallbacks::default()
            .on_sort(move |spec| sorts.borrow_mut().push(spec))
            .on_set_page(move |page| pages.borrow_mut().push(page))
            .on_select(move |_, item: &Item| selected.borrow_mut().push(item.id))
            .on_open_folder(move |_, item: &Item| {
                folders.borrow_mut().push(format!("folder:{}", item.title))
            })
            .on_open_file(move |_, item: &Item| {
                files.borrow_mut().push(format!("file:{}", item.title))
            })
    };

    let props = TableViewProps {
        items: items(
            r#"[
                {"id":1,"type":"folder","title":"Docs"},
                {"id":2,"type":"file","title":"a.png","size":10}
            ]"#,
        ),
        selectable_items: true,
        sort: "size,desc".into(),
        page: 2,
        limit: 2,
        count: 5,
        callbacks,
    };

    let mut controller = TableViewController::default();
    controller.handle_sort(&props, "title", true);
    controller.mount();

    let config = controller.grid_config(&props);
    assert_eq!(config.max_page, 3);
    assert_eq!(config.sort_column.as_deref(), Some("size"));
    assert!(!config.sort_ascending);

    controller.handle_sort(&props, "title", true);
    controller.handle_set_page(&props, 3);

    for item in &props.items {
        let mut select = ClickEvent::in_column(Column::Selected);
        controller.handle_row_click(&props, &mut select, item);
        let mut open = ClickEvent::in_column(Column::Title);
        controller.handle_row_click(&props, &mut open, item);
    }

    assert_eq!(*sorts.borrow(), vec!["title,asc".to_string()]);
    assert_eq!(*pages.borrow(), vec![3]);
    assert_eq!(*selected.borrow(), vec![1, 2]);
    assert_eq!(
        *opened.borrow(),
        vec!["folder:Docs".to_string(), "file:a.png".to_string()]
    );
}
