//! Reports module - monthly overviews, spending breakdowns and stored
//! monthly reports.

mod reports_model;
mod reports_service;
mod reports_traits;

pub use reports_model::{
    CategoryBreakdown, MonthlyOverview, MonthlyReport, NewMonthlyReport, SpendingBreakdown,
};
pub use reports_service::ReportService;
pub use reports_traits::{ReportRepositoryTrait, ReportServiceTrait};
