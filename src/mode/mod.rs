//! CLI mode implementations

mod export;
mod summary;

pub use export::run_export;
pub use summary::run_summary;

use chrono::NaiveDate;

use crate::chart::Theme;
use crate::records::TxHistoryRecord;
use crate::series::Granularity;
use crate::surface::RenderInputs;

/// Chart parameters shared by every mode
pub struct ChartRequest {
    pub span: Option<u32>,
    pub today: NaiveDate,
    pub granularity: Granularity,
    pub theme: &'static Theme,
    /// Viewport width in CSS pixels
    pub width: u32,
}

impl ChartRequest {
    pub fn inputs<'a>(&'a self, records: &'a [TxHistoryRecord]) -> RenderInputs<'a> {
        RenderInputs {
            records,
            span: self.span,
            today: self.today,
            granularity: &self.granularity,
            theme: self.theme,
        }
    }
}
