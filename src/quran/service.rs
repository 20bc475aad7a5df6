use crate::error::{ServiceError, ServiceResult};
use crate::models::{Ayah, Surah, SurahDetail, TafsirDetail};

const SURAH_COUNT: u32 = 114;

/// Source of Quran text and tafsir.
pub trait QuranRepository: Send + Sync {
    fn surahs(&self) -> ServiceResult<Vec<Surah>>;
    fn surah(&self, number: u32) -> ServiceResult<SurahDetail>;
    fn tafsir(&self, number: u32) -> ServiceResult<TafsirDetail>;
}

pub struct QuranService {
    repository: Box<dyn QuranRepository>,
}

impl QuranService {
    pub fn new(repository: Box<dyn QuranRepository>) -> Self {
        Self { repository }
    }

    pub fn surahs(&self) -> ServiceResult<Vec<Surah>> {
        let surahs = self.repository.surahs()?;
        if surahs.is_empty() {
            return Err(ServiceError::not_found("Surah list is empty"));
        }
        Ok(surahs)
    }

    pub fn surah(&self, number: u32) -> ServiceResult<SurahDetail> {
        check_surah_number(number)?;
        self.repository.surah(number)
    }

    pub fn ayah(&self, surah: u32, ayah: u32) -> ServiceResult<Ayah> {
        self.surah(surah)?
            .ayahs
            .into_iter()
            .find(|a| a.number_in_surah == ayah)
            .ok_or_else(|| {
                ServiceError::not_found(format!("Ayah {} not found in surah {}", ayah, surah))
            })
    }

    pub fn tafsir(&self, number: u32) -> ServiceResult<TafsirDetail> {
        check_surah_number(number)?;
        self.repository.tafsir(number)
    }
}

fn check_surah_number(number: u32) -> ServiceResult<()> {
    if (1..=SURAH_COUNT).contains(&number) {
        Ok(())
    } else {
        Err(ServiceError::invalid(format!(
            "Surah number must be between 1 and {}, got {}",
            SURAH_COUNT, number
        )))
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::models::Tafsir;

    /// In-memory repository holding Al-Ikhlas only.
    pub struct FakeQuran;

    fn ikhlas() -> Surah {
        Surah {
            number: 112,
            name: "الاخلاص".into(),
            latin_name: "Al-Ikhlas".into(),
            translation: "Ikhlas".into(),
            number_of_ayahs: 4,
            revelation_type: "Mekah".into(),
        }
    }

    impl QuranRepository for FakeQuran {
        fn surahs(&self) -> ServiceResult<Vec<Surah>> {
            Ok(vec![ikhlas()])
        }

        fn surah(&self, number: u32) -> ServiceResult<SurahDetail> {
            if number != 112 {
                return Err(ServiceError::upstream("not in fixture"));
            }
            let ayahs = (1..=4)
                .map(|n| Ayah {
                    number_in_surah: n,
                    text: format!("ayah {}", n),
                    translation: format!("terjemahan {}", n),
                    audio: None,
                })
                .collect();
            Ok(SurahDetail {
                surah: ikhlas(),
                ayahs,
            })
        }

        fn tafsir(&self, number: u32) -> ServiceResult<TafsirDetail> {
            let detail = self.surah(number)?;
            Ok(TafsirDetail {
                number,
                name: detail.surah.name,
                latin_name: detail.surah.latin_name,
                number_of_ayahs: 4,
                tafsir: vec![Tafsir {
                    ayah: 1,
                    text: "Katakanlah...".into(),
                }],
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::FakeQuran;
    use super::*;

    fn service() -> QuranService {
        QuranService::new(Box::new(FakeQuran))
    }

    #[test]
    fn surah_number_is_range_checked() {
        assert!(matches!(service().surah(0), Err(ServiceError::InvalidInput(_))));
        assert!(matches!(service().surah(115), Err(ServiceError::InvalidInput(_))));
        assert!(matches!(service().tafsir(200), Err(ServiceError::InvalidInput(_))));
    }

    #[test]
    fn finds_ayah_by_number_in_surah() {
        let ayah = service().ayah(112, 3).unwrap();
        assert_eq!(ayah.text, "ayah 3");
    }

    #[test]
    fn missing_ayah_is_not_found() {
        assert!(matches!(service().ayah(112, 5), Err(ServiceError::NotFound(_))));
    }

    #[test]
    fn upstream_errors_pass_through() {
        assert!(matches!(
            service().surah(1),
            Err(ServiceError::UpstreamUnavailable(_))
        ));
    }
}
