//! Inventory KPI summary
//!
//! Single pass over the stock snapshot plus a single pass over the
//! movement records in range. Stock health never depends on movement
//! presence: with no movements the movement totals are simply zero.

use shared::models::{InventarioKpi, StockStatus};
use std::collections::HashMap;

use crate::db::inventory::{MovementRow, StockLevelRow};

/// Per-product totals across branches; classification applies to the
/// aggregated product, so the four status counts always sum to the
/// distinct product count.
fn per_product(stock: &[StockLevelRow]) -> HashMap<&str, (f64, f64)> {
    let mut totals: HashMap<&str, (f64, f64)> = HashMap::new();
    for row in stock {
        let entry = totals.entry(row.product_id.as_str()).or_insert((0.0, 0.0));
        entry.0 += row.qty_on_hand;
        entry.1 += row.min_level;
    }
    totals
}

pub fn compute_kpi(stock: &[StockLevelRow], movements: &[MovementRow]) -> InventarioKpi {
    let mut kpi = InventarioKpi {
        total_productos: 0,
        total_unidades: 0.0,
        valor_total: 0.0,
        criticos: 0,
        bajos: 0,
        normales: 0,
        excedentes: 0,
        movimientos_entrada: 0.0,
        movimientos_salida: 0.0,
    };

    for row in stock {
        kpi.total_unidades += row.qty_on_hand;
        kpi.valor_total += row.qty_on_hand * row.avg_cost;
    }

    for (on_hand, min_level) in per_product(stock).into_values() {
        kpi.total_productos += 1;
        match StockStatus::classify(on_hand, min_level) {
            StockStatus::Critical => kpi.criticos += 1,
            StockStatus::Low => kpi.bajos += 1,
            StockStatus::Normal => kpi.normales += 1,
            StockStatus::Over => kpi.excedentes += 1,
        }
    }

    for m in movements {
        if m.direction == "in" {
            kpi.movimientos_entrada += m.quantity;
        } else {
            kpi.movimientos_salida += m.quantity;
        }
    }

    kpi
}
