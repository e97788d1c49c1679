use rust_i18n::t;
use tablify::{Column, Translator, columns::column_config};

/// Strings from the bundled `locales/*.yml` files, in the current locale.
#[derive(Clone, Copy, Debug, Default)]
pub struct Locale;

impl Translator for Locale {
    fn translate(&self, key: &str) -> String {
        t!(key).into_owned()
    }
}

/// Header label, empty for the unlabelled columns.
pub fn column_label(column: Column) -> String {
    if column_config(column).display_name.is_empty() {
        return String::new();
    }
    Locale.translate(&format!("Gallery.Columns.{}", column.name()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_strings_resolve() {
        assert_eq!(Locale.translate(tablify::SELECT_KEY), "Select");
        assert_eq!(Locale.translate("Gallery.NO_ITEMS"), "This folder is empty.");
        assert_eq!(t!("Gallery.ITEMS", count = 3), "3 items");
    }

    #[test]
    fn labels_follow_the_column_table() {
        assert_eq!(column_label(Column::Selected), "");
        assert_eq!(column_label(Column::Thumbnail), "");
        assert_eq!(column_label(Column::Title), "Title");
        assert_eq!(column_label(Column::LastUpdated), "Modified");
    }
}
