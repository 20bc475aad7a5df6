use log::info;
use reqwest::blocking::Client;
use serde::Deserialize;

use crate::config::QuranConfig;
use crate::error::ServiceResult;
use crate::http::{build_client, get_envelope};
use crate::models::{Ayah, Surah, SurahDetail, Tafsir, TafsirDetail};
use crate::quran::QuranRepository;
use crate::utils::format::title_case;

/// equran.id v2 client (Indonesian translation, Kemenag tafsir).
pub struct EQuranSource {
    client: Client,
    base_url: String,
}

impl EQuranSource {
    pub fn new(config: &QuranConfig) -> anyhow::Result<Self> {
        Ok(Self {
            client: build_client(config.timeout_secs)?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireSurah {
    nomor: u32,
    nama: String,
    nama_latin: String,
    jumlah_ayat: u32,
    tempat_turun: String,
    arti: String,
    #[serde(default)]
    ayat: Vec<WireAyah>,
}

impl WireSurah {
    fn summary(&self) -> Surah {
        Surah {
            number: self.nomor,
            name: self.nama.clone(),
            latin_name: self.nama_latin.clone(),
            translation: self.arti.clone(),
            number_of_ayahs: self.jumlah_ayat,
            revelation_type: title_case(&self.tempat_turun),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireAyah {
    nomor_ayat: u32,
    teks_arab: String,
    teks_indonesia: String,
    #[serde(default)]
    audio: WireAudio,
}

/// Audio URLs keyed by reciter id; "05" is Misyari Rasyid Al-Afasi.
#[derive(Debug, Default, Deserialize)]
struct WireAudio {
    #[serde(rename = "05")]
    alafasy: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireTafsirSurah {
    nomor: u32,
    nama: String,
    nama_latin: String,
    jumlah_ayat: u32,
    #[serde(default)]
    tafsir: Vec<WireTafsir>,
}

#[derive(Debug, Deserialize)]
struct WireTafsir {
    ayat: u32,
    teks: String,
}

fn into_detail(wire: WireSurah) -> SurahDetail {
    let surah = wire.summary();
    let ayahs = wire
        .ayat
        .into_iter()
        .map(|a| Ayah {
            number_in_surah: a.nomor_ayat,
            text: a.teks_arab,
            translation: a.teks_indonesia,
            audio: a.audio.alafasy,
        })
        .collect();
    SurahDetail { surah, ayahs }
}

fn into_tafsir(wire: WireTafsirSurah) -> TafsirDetail {
    TafsirDetail {
        number: wire.nomor,
        name: wire.nama,
        latin_name: wire.nama_latin,
        number_of_ayahs: wire.jumlah_ayat,
        tafsir: wire
            .tafsir
            .into_iter()
            .map(|t| Tafsir {
                ayah: t.ayat,
                text: t.teks,
            })
            .collect(),
    }
}

impl QuranRepository for EQuranSource {
    fn surahs(&self) -> ServiceResult<Vec<Surah>> {
        let url = format!("{}/surat", self.base_url);
        let wire: Vec<WireSurah> = get_envelope(&self.client, &url, &[])?;
        info!("equran: fetched {} surahs", wire.len());
        Ok(wire.iter().map(WireSurah::summary).collect())
    }

    fn surah(&self, number: u32) -> ServiceResult<SurahDetail> {
        let url = format!("{}/surat/{}", self.base_url, number);
        let wire: WireSurah = get_envelope(&self.client, &url, &[])?;
        info!("equran: surah {} with {} ayahs", number, wire.ayat.len());
        Ok(into_detail(wire))
    }

    fn tafsir(&self, number: u32) -> ServiceResult<TafsirDetail> {
        let url = format!("{}/tafsir/{}", self.base_url, number);
        let wire: WireTafsirSurah = get_envelope(&self.client, &url, &[])?;
        info!("equran: tafsir for surah {}", number);
        Ok(into_tafsir(wire))
    }
}
