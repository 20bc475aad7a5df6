pub mod equran;
pub mod service;

pub use equran::EQuranSource;
pub use service::{QuranRepository, QuranService};
