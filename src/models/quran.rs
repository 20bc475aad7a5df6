use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Surah {
    pub number: u32,
    pub name: String,
    pub latin_name: String,
    pub translation: String,
    pub number_of_ayahs: u32,
    pub revelation_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ayah {
    pub number_in_surah: u32,
    pub text: String,
    pub translation: String,
    pub audio: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurahDetail {
    #[serde(flatten)]
    pub surah: Surah,
    pub ayahs: Vec<Ayah>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tafsir {
    pub ayah: u32,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TafsirDetail {
    pub number: u32,
    pub name: String,
    pub latin_name: String,
    pub number_of_ayahs: u32,
    pub tafsir: Vec<Tafsir>,
}
