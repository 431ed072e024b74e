//! Day-bucketed movement series

use chrono::DateTime;
use shared::models::MovimientoPorDia;
use std::collections::BTreeMap;

use crate::db::inventory::MovementRow;

/// Calendar day (UTC) of an epoch-millisecond timestamp
fn day_of(ms: i64) -> String {
    DateTime::from_timestamp_millis(ms)
        .unwrap_or(DateTime::UNIX_EPOCH)
        .format("%Y-%m-%d")
        .to_string()
}

/// Group movements by the calendar day derived from their timestamp,
/// summing inbound and outbound quantities separately. Days come back
/// in ascending order for trend rendering.
pub fn movements_by_day(movements: &[MovementRow]) -> Vec<MovimientoPorDia> {
    let mut days: BTreeMap<String, (f64, f64)> = BTreeMap::new();
    for m in movements {
        let entry = days.entry(day_of(m.occurred_at)).or_insert((0.0, 0.0));
        if m.direction == "in" {
            entry.0 += m.quantity;
        } else {
            entry.1 += m.quantity;
        }
    }

    days.into_iter()
        .map(|(fecha, (entradas, salidas))| MovimientoPorDia {
            fecha,
            entradas,
            salidas,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::test_support::movement;

    // 2025-03-10T12:00:00Z
    const NOON: i64 = 1_741_608_000_000;
    const DAY_MS: i64 = 86_400_000;

    #[test]
    fn test_buckets_by_calendar_day() {
        let movements = vec![
            movement("p1", "in", 5.0, NOON),
            movement("p1", "out", 2.0, NOON + 3_600_000),
            movement("p2", "in", 1.0, NOON + DAY_MS),
        ];
        let out = movements_by_day(&movements);
        assert_eq!(out.len(), 2);
        assert_eq!(
            out[0],
            MovimientoPorDia {
                fecha: "2025-03-10".into(),
                entradas: 5.0,
                salidas: 2.0,
            }
        );
        assert_eq!(out[1].fecha, "2025-03-11");
        assert_eq!(out[1].entradas, 1.0);
        assert_eq!(out[1].salidas, 0.0);
    }

    #[test]
    fn test_day_boundary() {
        // 23:59:59.999 and the next millisecond land on different days
        let midnight = NOON + 12 * 3_600_000;
        let movements = vec![
            movement("p1", "out", 1.0, midnight - 1),
            movement("p1", "out", 1.0, midnight),
        ];
        let out = movements_by_day(&movements);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].fecha, "2025-03-10");
        assert_eq!(out[1].fecha, "2025-03-11");
    }

    #[test]
    fn test_empty() {
        assert!(movements_by_day(&[]).is_empty());
    }
}
