pub mod custom_icon;
pub mod gallery_table;
