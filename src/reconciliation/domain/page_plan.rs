use crate::shared::error::SyncError;
use crate::shared::Result;

/// Default number of orders requested per report page
pub const DEFAULT_PAGE_SIZE: u64 = 100;

/// Result window of one report page: `[first_result_no, last_result_no)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub index: u64,
    pub first_result_no: u64,
    pub last_result_no: u64,
}

/// PagePlan - splits a reported total into sequential page windows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagePlan {
    total_records: u64,
    page_size: u64,
}

impl PagePlan {
    pub fn new(total_records: u64, page_size: u64) -> Result<Self> {
        if page_size == 0 {
            return Err(SyncError::Validation {
                message: "page size must be greater than zero".to_string(),
            }
            .into());
        }
        Ok(Self {
            total_records,
            page_size,
        })
    }

    /// `ceil(total_records / page_size)`
    pub fn page_count(&self) -> u64 {
        self.total_records.div_ceil(self.page_size)
    }

    pub fn windows(&self) -> impl Iterator<Item = PageWindow> + '_ {
        (0..self.page_count()).map(move |index| {
            let first_result_no = index * self.page_size;
            PageWindow {
                index,
                first_result_no,
                last_result_no: (first_result_no + self.page_size).min(self.total_records),
            }
        })
    }
}
