use serde::{Deserialize, Serialize};

/// One rendition of a text: Arabic, transliteration, translation, summary...
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentText {
    pub language: String,
    pub text: String,
}

/// Summary row used by dua listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dua {
    pub id: u32,
    pub title: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub reference: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuaDetail {
    #[serde(flatten)]
    pub summary: Dua,
    #[serde(default)]
    pub texts: Vec<ContentText>,
    #[serde(default)]
    pub hikmah: Option<String>,
    #[serde(default)]
    pub inspirasi: Option<String>,
}

/// Summary row used by story listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Story {
    pub id: u32,
    pub title: String,
    #[serde(default)]
    pub kitab: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub reference: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryDetail {
    #[serde(flatten)]
    pub summary: Story,
    #[serde(default)]
    pub texts: Vec<ContentText>,
}
