//! Turnover ranking
//!
//! rotation = units sold / stock on hand over the reporting window,
//! defined as 0 when stock is 0 so the ranking never divides by zero.

use shared::models::RotacionProducto;
use std::collections::HashMap;

use crate::db::inventory::StockLevelRow;

pub const DEFAULT_TOP_N: usize = 10;

/// Rank products by rotation, descending, truncated to `top_n`.
///
/// Ranking is stock-driven: every product with a stock snapshot ranks,
/// at `unidades_vendidas = 0` when it had no sales; products with zero
/// stock and zero sales still rank, at rotation 0.
pub fn rank_turnover(
    stock: &[StockLevelRow],
    sold: &HashMap<String, f64>,
    top_n: usize,
) -> Vec<RotacionProducto> {
    // Aggregate stock across branches per product
    let mut per_product: HashMap<&str, (f64, &str)> = HashMap::new();
    for row in stock {
        let entry = per_product
            .entry(row.product_id.as_str())
            .or_insert((0.0, row.product_name.as_str()));
        entry.0 += row.qty_on_hand;
    }

    let mut out: Vec<RotacionProducto> = per_product
        .into_iter()
        .map(|(product_id, (on_hand, name))| {
            let units_sold = sold.get(product_id).copied().unwrap_or(0.0);
            let rotation = if on_hand > 0.0 {
                units_sold / on_hand
            } else {
                0.0
            };
            RotacionProducto {
                producto_id: product_id.to_string(),
                nombre: name.to_string(),
                stock: on_hand,
                unidades_vendidas: units_sold,
                rotacion: rotation,
            }
        })
        .collect();

    out.sort_by(|a, b| {
        b.rotacion
            .total_cmp(&a.rotacion)
            .then_with(|| b.unidades_vendidas.total_cmp(&a.unidades_vendidas))
            .then_with(|| a.producto_id.cmp(&b.producto_id))
    });
    out.truncate(top_n);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::test_support::stock_row;

    fn sold(pairs: &[(&str, f64)]) -> HashMap<String, f64> {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn test_rotation_sorted_descending() {
        let stock = vec![
            stock_row("p1", "Agua", None, 10.0, 0.0, 1.0),
            stock_row("p2", "Café", None, 4.0, 0.0, 1.0),
        ];
        let out = rank_turnover(&stock, &sold(&[("p1", 5.0), ("p2", 8.0)]), 10);
        assert_eq!(out[0].producto_id, "p2");
        assert_eq!(out[0].rotacion, 2.0);
        assert_eq!(out[1].producto_id, "p1");
        assert_eq!(out[1].rotacion, 0.5);
    }

    #[test]
    fn test_zero_stock_never_divides() {
        let stock = vec![stock_row("p1", "Agua", None, 0.0, 0.0, 1.0)];
        let out = rank_turnover(&stock, &sold(&[("p1", 7.0)]), 10);
        assert_eq!(out[0].rotacion, 0.0);
        assert_eq!(out[0].unidades_vendidas, 7.0);
    }

    #[test]
    fn test_product_without_sales_still_ranks() {
        let stock = vec![
            stock_row("p1", "Agua", None, 10.0, 0.0, 1.0),
            stock_row("p2", "Café", None, 0.0, 0.0, 1.0),
        ];
        let out = rank_turnover(&stock, &HashMap::new(), 10);
        assert_eq!(out.len(), 2);
        assert!(out.iter().all(|r| r.rotacion == 0.0));
        assert!(out.iter().all(|r| r.unidades_vendidas == 0.0));
    }

    #[test]
    fn test_rotation_never_negative() {
        let stock = vec![stock_row("p1", "Agua", None, -5.0, 0.0, 1.0)];
        let out = rank_turnover(&stock, &sold(&[("p1", 3.0)]), 10);
        // Negative on-hand counts as no stock
        assert_eq!(out[0].rotacion, 0.0);
    }

    #[test]
    fn test_truncates_to_top_n() {
        let stock: Vec<_> = (0..25)
            .map(|i| stock_row(&format!("p{i}"), "X", None, 1.0, 0.0, 1.0))
            .collect();
        let out = rank_turnover(&stock, &HashMap::new(), DEFAULT_TOP_N);
        assert_eq!(out.len(), DEFAULT_TOP_N);
    }

    #[test]
    fn test_stock_summed_across_branches() {
        let stock = vec![
            stock_row("p1", "Agua", None, 4.0, 0.0, 1.0),
            stock_row("p1", "Agua", None, 6.0, 0.0, 1.0),
        ];
        let out = rank_turnover(&stock, &sold(&[("p1", 5.0)]), 10);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].stock, 10.0);
        assert_eq!(out[0].rotacion, 0.5);
    }
}
