use anyhow::Result;
use serde::Serialize;

use crate::models::{DisplayOrder, OrderType};

/// Lifecycle of the external order fetch.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchState<T> {
    Pending,
    Ready(T),
    Failed(String),
}

impl<T> FetchState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Pending)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, FetchState::Failed(_))
    }

    pub fn from_result(result: Result<T>) -> Self {
        match result {
            Ok(v) => FetchState::Ready(v),
            Err(e) => FetchState::Failed(format!("{:#}", e)),
        }
    }
}

/// What the presentation layer should show.
#[derive(Debug, Clone, PartialEq)]
pub enum Rendered {
    Loading,
    Error(String),
    Table(Vec<DisplayOrder>),
}

/// One table row. `index` is the merged position and is the row key,
/// independent of `DisplayOrder::id`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Row {
    pub index: usize,
    pub trader: String,
    pub green_amount: f64,
    pub orange_amount: f64,
    #[serde(rename = "type")]
    pub order_type: OrderType,
}

impl Rendered {
    pub fn rows(&self) -> Vec<Row> {
        match self {
            Rendered::Table(orders) => orders
                .iter()
                .enumerate()
                .map(|(index, o)| Row {
                    index,
                    trader: o.trader.clone(),
                    green_amount: o.green_amount,
                    orange_amount: o.orange_amount,
                    order_type: o.order_type,
                })
                .collect(),
            _ => Vec::new(),
        }
    }
}

const HEADERS: [&str; 5] = ["Order ID", "Trader", "Green Amount", "Orange Amount", "Type"];

/// Plain-text rendering: a single indicator line, or an aligned table.
pub fn render_text(rendered: &Rendered) -> String {
    match rendered {
        Rendered::Loading => "Loading...".to_string(),
        Rendered::Error(_) => "Error loading orders.".to_string(),
        Rendered::Table(_) => {
            let cells: Vec<[String; 5]> = rendered
                .rows()
                .into_iter()
                .map(|r| {
                    [
                        r.index.to_string(),
                        r.trader,
                        format_amount(r.green_amount),
                        format_amount(r.orange_amount),
                        r.order_type.as_str().to_string(),
                    ]
                })
                .collect();

            let mut widths = HEADERS.map(|h| h.len());
            for row in &cells {
                for (w, cell) in widths.iter_mut().zip(row.iter()) {
                    *w = (*w).max(cell.len());
                }
            }

            let mut lines = Vec::with_capacity(cells.len() + 2);
            lines.push(format_line(&HEADERS.map(String::from), &widths));
            lines.push(
                widths
                    .iter()
                    .map(|w| "-".repeat(*w))
                    .collect::<Vec<_>>()
                    .join("-+-"),
            );
            for row in &cells {
                lines.push(format_line(row, &widths));
            }
            lines.join("\n")
        }
    }
}

/// JSON rendering of the rows. Indicator states become `{"status": ...}`.
pub fn render_json(rendered: &Rendered) -> Result<String> {
    let value = match rendered {
        Rendered::Loading => serde_json::json!({ "status": "loading" }),
        Rendered::Error(e) => serde_json::json!({ "status": "error", "error": e }),
        Rendered::Table(_) => serde_json::to_value(rendered.rows())?,
    };
    Ok(serde_json::to_string_pretty(&value)?)
}

fn format_line(cells: &[String; 5], widths: &[usize; 5]) -> String {
    cells
        .iter()
        .zip(widths.iter())
        .map(|(c, w)| format!("{:<width$}", c, width = *w))
        .collect::<Vec<_>>()
        .join(" | ")
        .trim_end()
        .to_string()
}

/// Shortest round-trip form, switching to exponent notation outside
/// [1e-6, 1e21) the way a double is usually printed for display.
pub fn format_amount(v: f64) -> String {
    if v.is_infinite() {
        return if v > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    let abs = v.abs();
    if abs != 0.0 && !(1e-6..1e21).contains(&abs) {
        let s = format!("{:e}", v);
        return match s.split_once('e') {
            Some((m, e)) if !e.starts_with('-') => format!("{}e+{}", m, e),
            _ => s,
        };
    }
    format!("{}", v)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(id: usize, order_type: OrderType, trader: &str, green: f64, orange: f64) -> DisplayOrder {
        DisplayOrder {
            id,
            order_type,
            trader: trader.to_string(),
            green_amount: green,
            orange_amount: orange,
            is_filled: false,
        }
    }

    #[test]
    fn test_fetch_state_flags() {
        let pending: FetchState<()> = FetchState::Pending;
        assert!(pending.is_loading() && !pending.is_error());
        let failed: FetchState<()> = FetchState::Failed("x".into());
        assert!(failed.is_error() && !failed.is_loading());
        let ready = FetchState::Ready(1);
        assert!(!ready.is_error() && !ready.is_loading());
    }

    #[test]
    fn test_from_result() {
        assert_eq!(FetchState::from_result(Ok(3)), FetchState::Ready(3));
        let failed: FetchState<i32> = FetchState::from_result(Err(anyhow::anyhow!("rpc down")));
        assert_eq!(failed, FetchState::Failed("rpc down".to_string()));
    }

    #[test]
    fn test_rows_use_merged_position() {
        let rendered = Rendered::Table(vec![
            order(0, OrderType::Green, "0xA", 100.0, 50.0),
            order(0, OrderType::Orange, "0xC", 40.0, 20.0),
        ]);
        let rows = rendered.rows();
        assert_eq!(rows[0].index, 0);
        assert_eq!(rows[1].index, 1);
        assert_eq!(rows[1].order_type, OrderType::Orange);
        assert!(Rendered::Loading.rows().is_empty());
    }

    #[test]
    fn test_render_text_indicators() {
        assert_eq!(render_text(&Rendered::Loading), "Loading...");
        assert_eq!(render_text(&Rendered::Error("e".into())), "Error loading orders.");
    }

    #[test]
    fn test_render_text_table() {
        let rendered = Rendered::Table(vec![
            order(0, OrderType::Green, "0xA", 100.0, 50.0),
            order(0, OrderType::Orange, "0xC", 40.0, 2.5),
        ]);
        let text = render_text(&rendered);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "Order ID | Trader | Green Amount | Orange Amount | Type");
        assert_eq!(lines[2], "0        | 0xA    | 100          | 50            | Green");
        assert_eq!(lines[3], "1        | 0xC    | 40           | 2.5           | Orange");
    }

    #[test]
    fn test_render_json_rows() {
        let rendered = Rendered::Table(vec![order(3, OrderType::Green, "0xA", 1.0, 2.0)]);
        let v: serde_json::Value = serde_json::from_str(&render_json(&rendered).unwrap()).unwrap();
        assert_eq!(v[0]["index"], 0);
        assert_eq!(v[0]["type"], "Green");
        assert_eq!(v[0]["orangeAmount"], 2.0);

        let v: serde_json::Value =
            serde_json::from_str(&render_json(&Rendered::Error("x".into())).unwrap()).unwrap();
        assert_eq!(v["status"], "error");
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(100.0), "100");
        assert_eq!(format_amount(0.0), "0");
        assert_eq!(format_amount(2.5), "2.5");
        assert_eq!(format_amount(1e21), "1e+21");
        assert_eq!(format_amount(1e-8), "1e-8");
        assert_eq!(format_amount(1.5e-7), "1.5e-7");
        assert_eq!(format_amount(1e-6), "0.000001");
        assert_eq!(format_amount(-2.5e-7), "-2.5e-7");
        assert_eq!(format_amount(f64::INFINITY), "Infinity");
    }
}
