//! SQLite storage implementation for monthly reports.

mod model;
mod repository;

pub use model::MonthlyReportDB;
pub use repository::ReportRepository;
