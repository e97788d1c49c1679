use gpui_component::Icon;
use material_icon_embed_rs::material_icon_file::MaterialIconFile;
use material_icon_embed_rs::material_icon_folder::MaterialIconFolder;
use tablify::Item;

pub struct FileIcon(pub MaterialIconFile);

pub struct FolderIcon(pub MaterialIconFolder);

impl From<FileIcon> for Icon {
    fn from(val: FileIcon) -> Self {
        Icon::default().path(val.0.path())
    }
}

impl From<FolderIcon> for Icon {
    fn from(val: FolderIcon) -> Self {
        Icon::default().path(val.0.path())
    }
}

impl From<Option<MaterialIconFile>> for FileIcon {
    fn from(val: Option<MaterialIconFile>) -> Self {
        FileIcon(val.unwrap_or(MaterialIconFile::Document))
    }
}

impl From<Option<MaterialIconFolder>> for FolderIcon {
    fn from(val: Option<MaterialIconFolder>) -> Self {
        FolderIcon(val.unwrap_or(MaterialIconFolder::FolderDocs))
    }
}

/// Icon drawn in place of a missing thumbnail.
pub fn placeholder_icon(item: &Item) -> Icon {
    if item.is_folder() {
        FolderIcon::from(MaterialIconFolder::from_folder_name(&item.title)).into()
    } else {
        let extension = item
            .title
            .rsplit_once('.')
            .map(|(_, ext)| ext)
            .unwrap_or_default();
        FileIcon::from(MaterialIconFile::from_extension(extension)).into()
    }
}
