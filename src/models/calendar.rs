use serde::{Deserialize, Serialize};

/// A Hijri calendar day as returned by the calendar service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HijriDay {
    pub year: usize,
    pub month: usize,
    pub day: usize,
    pub month_name: String,
    pub day_name: String,
}

impl HijriDay {
    pub fn formatted(&self) -> String {
        format!("{} {} {}", self.day, self.month_name, self.year)
    }
}
