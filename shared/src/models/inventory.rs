//! Inventory analytics models
//!
//! Typed outputs of the fixed-shape inventory rollups. Field names are
//! the platform's Spanish wire contract, consumed verbatim by the
//! frontend chart layer.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Stock health classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StockStatus {
    Critical,
    Low,
    Normal,
    Over,
}

impl StockStatus {
    /// Classify a stock level from on-hand quantity vs. minimum level.
    ///
    /// Single source of truth for the classification rule; every rollup
    /// calls this so exactly one status applies to any snapshot:
    /// - `Critical`: on-hand quantity <= 0
    /// - `Low`: min_level > 0 and on_hand <= min_level
    /// - `Over`: min_level > 0 and on_hand > min_level * 3
    /// - `Normal`: everything else
    pub fn classify(on_hand: f64, min_level: f64) -> Self {
        if on_hand <= 0.0 {
            Self::Critical
        } else if min_level > 0.0 && on_hand <= min_level {
            Self::Low
        } else if min_level > 0.0 && on_hand > min_level * 3.0 {
            Self::Over
        } else {
            Self::Normal
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::Low => "low",
            Self::Normal => "normal",
            Self::Over => "over",
        }
    }
}

/// Inventory KPI summary for the reporting window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventarioKpi {
    /// Distinct products with a stock snapshot
    pub total_productos: i64,
    /// Total units on hand
    pub total_unidades: f64,
    /// Total valuation: sum of qty * average cost
    pub valor_total: f64,
    pub criticos: i64,
    pub bajos: i64,
    pub normales: i64,
    pub excedentes: i64,
    /// Inbound movement quantity within the date range
    pub movimientos_entrada: f64,
    /// Outbound movement quantity within the date range
    pub movimientos_salida: f64,
}

/// Classified stock snapshot row
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockProducto {
    pub producto_id: String,
    pub nombre: String,
    pub categoria: String,
    pub sucursal_id: Option<String>,
    pub cantidad: f64,
    pub reservado: f64,
    pub costo_promedio: f64,
    pub nivel_minimo: f64,
    /// cantidad * costo_promedio
    pub valor: f64,
    pub estado: StockStatus,
}

/// Day-bucketed movement totals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovimientoPorDia {
    /// Calendar day, YYYY-MM-DD, derived from the movement timestamp
    pub fecha: String,
    pub entradas: f64,
    pub salidas: f64,
}

/// Per-category stock valuation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockPorCategoria {
    pub categoria: String,
    pub productos: i64,
    pub unidades: f64,
    pub valor: f64,
}

/// Turnover ranking entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RotacionProducto {
    pub producto_id: String,
    pub nombre: String,
    pub stock: f64,
    pub unidades_vendidas: f64,
    /// unidades_vendidas / stock, 0 when stock is 0
    pub rotacion: f64,
}

/// Filter object accepted by every inventory rollup endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryFilter {
    #[serde(default)]
    pub branch_id: Option<String>,
    #[serde(default)]
    pub category_id: Option<String>,
    #[serde(default)]
    pub stock_status: Option<StockStatus>,
    #[serde(default)]
    pub date_from: Option<NaiveDate>,
    #[serde(default)]
    pub date_to: Option<NaiveDate>,
}
