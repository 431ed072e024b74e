//! Stock valuation per category

use shared::models::StockPorCategoria;
use std::collections::BTreeMap;

use super::UNCATEGORIZED_LABEL;
use crate::db::inventory::StockLevelRow;

/// Group stock rows by category, summing distinct-product count, unit
/// count and valuation; sorted by valuation descending. Rows without a
/// category are kept under the placeholder label, never dropped.
pub fn stock_by_category(stock: &[StockLevelRow]) -> Vec<StockPorCategoria> {
    struct Acc {
        products: std::collections::HashSet<String>,
        units: f64,
        value: f64,
    }

    let mut groups: BTreeMap<String, Acc> = BTreeMap::new();
    for row in stock {
        let category = row
            .category
            .clone()
            .unwrap_or_else(|| UNCATEGORIZED_LABEL.to_string());
        let acc = groups.entry(category).or_insert_with(|| Acc {
            products: Default::default(),
            units: 0.0,
            value: 0.0,
        });
        acc.products.insert(row.product_id.clone());
        acc.units += row.qty_on_hand;
        acc.value += row.qty_on_hand * row.avg_cost;
    }

    let mut out: Vec<StockPorCategoria> = groups
        .into_iter()
        .map(|(categoria, acc)| StockPorCategoria {
            categoria,
            productos: acc.products.len() as i64,
            unidades: acc.units,
            valor: acc.value,
        })
        .collect();
    out.sort_by(|a, b| b.valor.total_cmp(&a.valor));
    out
}
