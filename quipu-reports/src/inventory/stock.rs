//! Classified stock listing
//!
//! One `StockProducto` per stock snapshot row, classified through the
//! shared rule and optionally narrowed by category or status.

use shared::models::{InventoryFilter, StockProducto, StockStatus};

use super::UNCATEGORIZED_LABEL;
use crate::db::inventory::StockLevelRow;

fn to_producto(row: &StockLevelRow) -> StockProducto {
    StockProducto {
        producto_id: row.product_id.clone(),
        nombre: row.product_name.clone(),
        categoria: row
            .category
            .clone()
            .unwrap_or_else(|| UNCATEGORIZED_LABEL.to_string()),
        sucursal_id: row.branch_id.clone(),
        cantidad: row.qty_on_hand,
        reservado: row.qty_reserved,
        costo_promedio: row.avg_cost,
        nivel_minimo: row.min_level,
        valor: row.qty_on_hand * row.avg_cost,
        estado: StockStatus::classify(row.qty_on_hand, row.min_level),
    }
}

pub fn classify_stock(stock: &[StockLevelRow], filter: &InventoryFilter) -> Vec<StockProducto> {
    stock
        .iter()
        .map(to_producto)
        .filter(|p| {
            filter
                .category_id
                .as_deref()
                .is_none_or(|c| p.categoria == c)
        })
        .filter(|p| filter.stock_status.is_none_or(|s| p.estado == s))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::test_support::stock_row;

    #[test]
    fn test_derives_status_and_valuation() {
        let stock = vec![stock_row("p1", "Tornillos", Some("Ferretería"), 2.0, 5.0, 3.0)];
        let out = classify_stock(&stock, &InventoryFilter::default());
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].estado, StockStatus::Low);
        assert_eq!(out[0].valor, 6.0);
    }

    #[test]
    fn test_missing_category_gets_placeholder() {
        let stock = vec![stock_row("p1", "Pintura", None, 10.0, 0.0, 1.0)];
        let out = classify_stock(&stock, &InventoryFilter::default());
        assert_eq!(out[0].categoria, UNCATEGORIZED_LABEL);
    }

    #[test]
    fn test_status_filter() {
        let stock = vec![
            stock_row("p1", "A", None, 0.0, 0.0, 1.0),
            stock_row("p2", "B", None, 10.0, 0.0, 1.0),
        ];
        let filter = InventoryFilter {
            stock_status: Some(StockStatus::Critical),
            ..Default::default()
        };
        let out = classify_stock(&stock, &filter);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].producto_id, "p1");
    }

    #[test]
    fn test_category_filter_matches_placeholder_too() {
        let stock = vec![
            stock_row("p1", "A", Some("Bebidas"), 1.0, 0.0, 1.0),
            stock_row("p2", "B", None, 1.0, 0.0, 1.0),
        ];
        let filter = InventoryFilter {
            category_id: Some(UNCATEGORIZED_LABEL.to_string()),
            ..Default::default()
        };
        let out = classify_stock(&stock, &filter);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].producto_id, "p2");
    }
}
