//! Source registry
//!
//! Static catalog of the platform entities the ad-hoc report builder
//! can query. The registry is the single source of truth for legal
//! columns and for the mandatory time dimension of each source; it is
//! built once at startup and never mutated.

use shared::models::{ColumnDef, ColumnKind, ReportSource};
use std::sync::LazyLock;

fn col(key: &str, label: &str, kind: ColumnKind) -> ColumnDef {
    ColumnDef {
        key: key.to_string(),
        label: label.to_string(),
        kind,
        aggregatable: false,
    }
}

fn metric_col(key: &str, label: &str) -> ColumnDef {
    ColumnDef {
        key: key.to_string(),
        label: label.to_string(),
        kind: ColumnKind::Number,
        aggregatable: true,
    }
}

static SOURCES: LazyLock<Vec<ReportSource>> = LazyLock::new(|| {
    use ColumnKind::*;

    vec![
        ReportSource {
            id: "ventas".into(),
            label: "Ventas".into(),
            table: "rpt_ventas".into(),
            date_field: "fecha".into(),
            columns: vec![
                col("folio", "Folio", Text),
                col("cliente", "Cliente", Text),
                col("estado", "Estado", Text),
                col("metodo_pago", "Método de pago", Text),
                metric_col("subtotal", "Subtotal"),
                metric_col("impuesto", "Impuesto"),
                metric_col("total", "Total"),
                col("fecha", "Fecha", Date),
                col("sucursal", "Sucursal", Text),
            ],
        },
        ReportSource {
            id: "movimientos_inventario".into(),
            label: "Movimientos de inventario".into(),
            table: "rpt_movimientos_inventario".into(),
            date_field: "fecha".into(),
            columns: vec![
                col("producto", "Producto", Text),
                col("tipo", "Tipo", Text),
                col("origen", "Origen", Text),
                metric_col("cantidad", "Cantidad"),
                metric_col("costo_unitario", "Costo unitario"),
                col("fecha", "Fecha", Date),
                col("sucursal", "Sucursal", Text),
            ],
        },
        ReportSource {
            id: "reservas".into(),
            label: "Reservas".into(),
            table: "rpt_reservas".into(),
            date_field: "fecha_inicio".into(),
            columns: vec![
                col("espacio", "Espacio", Text),
                col("cliente", "Cliente", Text),
                col("estado", "Estado", Text),
                metric_col("importe", "Importe"),
                col("fecha_inicio", "Fecha de inicio", Date),
                col("fecha_fin", "Fecha de fin", Date),
                col("sucursal", "Sucursal", Text),
            ],
        },
        ReportSource {
            id: "clases".into(),
            label: "Clases".into(),
            table: "rpt_clases".into(),
            date_field: "fecha".into(),
            columns: vec![
                col("clase", "Clase", Text),
                col("instructor", "Instructor", Text),
                metric_col("inscritos", "Inscritos"),
                metric_col("capacidad", "Capacidad"),
                col("fecha", "Fecha", Date),
                col("sucursal", "Sucursal", Text),
            ],
        },
        ReportSource {
            id: "empleados".into(),
            label: "Empleados".into(),
            table: "rpt_empleados".into(),
            date_field: "fecha_alta".into(),
            columns: vec![
                col("nombre", "Nombre", Text),
                col("puesto", "Puesto", Text),
                col("departamento", "Departamento", Text),
                metric_col("salario", "Salario"),
                col("activo", "Activo", Boolean),
                col("fecha_alta", "Fecha de alta", Date),
                col("sucursal", "Sucursal", Text),
            ],
        },
    ]
});

/// All registered report sources
pub fn sources() -> &'static [ReportSource] {
    &SOURCES
}

/// Look up a report source by id
pub fn source(id: &str) -> Option<&'static ReportSource> {
    SOURCES.iter().find(|s| s.id == id)
}
