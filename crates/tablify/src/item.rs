use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Folder,
    #[default]
    File,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    Error,
    Warning,
    Success,
    Info,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemMessage {
    #[serde(rename = "type")]
    pub kind: MessageKind,
    #[serde(alias = "value")]
    pub text: String,
}

/// A single folder or file row as supplied by the host.
///
/// The table only ever reads items. An `id` of zero or below marks an item the
/// server has not confirmed yet, which is what an in-flight upload looks like.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Item {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: ItemKind,
    pub title: String,
    pub thumbnail_url: Option<String>,
    pub url: Option<String>,
    pub size: u64,
    pub last_updated: String,
    pub selected: bool,
    pub uploading: bool,
    /// Percent, 0 to 100. Hosts may send fractions.
    #[serde(alias = "progress")]
    pub upload_progress: f32,
    pub message: Option<ItemMessage>,
}

impl Item {
    pub fn folder(id: i64, title: impl Into<String>) -> Self {
        Self {
            id,
            kind: ItemKind::Folder,
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn file(id: i64, title: impl Into<String>) -> Self {
        Self {
            id,
            kind: ItemKind::File,
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn is_folder(&self) -> bool {
        self.kind == ItemKind::Folder
    }

    /// Whether the server has assigned a persistent id.
    pub fn is_persisted(&self) -> bool {
        self.id > 0
    }

    pub fn has_error(&self) -> bool {
        self.message
            .as_ref()
            .is_some_and(|message| message.kind == MessageKind::Error)
    }
}
