//! Shared data models for the reporting service

pub mod inventory;
pub mod report;
pub mod saved_report;

pub use inventory::{
    InventarioKpi, InventoryFilter, MovimientoPorDia, RotacionProducto, StockPorCategoria,
    StockProducto, StockStatus,
};
pub use report::{
    ColumnDef, ColumnKind, FilterOp, Metric, ReportConfig, ReportFilter, ReportResult,
    ReportSource, Row,
};
pub use saved_report::{SavedReport, SavedReportCreate};
