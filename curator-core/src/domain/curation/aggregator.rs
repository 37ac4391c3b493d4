// curator-core/src/domain/curation/aggregator.rs

use chrono::NaiveDate;
use std::collections::{BTreeMap, HashMap};

use crate::domain::table::Table;
use crate::ports::sink::{EventSink, PipelineEvent};

pub const PRODUCT_KEY: &str = "product_id";
pub const PRODUCT_NAME: &str = "product_name";
pub const QUANTITY: &str = "quantity";
pub const UNIT_PRICE: &str = "unit_price";
pub const ORDER_DATE: &str = "order_date";

/// One line of the curated report.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductPerformance {
    pub product_id: String,
    pub product_name: String,
    pub total_quantity: f64,
    /// Sum of `quantity * unit_price` over order lines (transaction price, not catalogue price).
    pub total_revenue: f64,
    /// 1 = highest revenue.
    pub rank: usize,
    pub total_orders: usize,
    pub avg_order_quantity: f64,
    pub first_order_date: Option<NaiveDate>,
    pub last_order_date: Option<NaiveDate>,
}

/// Product performance sorted by rank, plus the join's data-quality signals.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CurationReport {
    pub rows: Vec<ProductPerformance>,
    /// Orders whose product_id matched no cleansed product.
    pub unmatched_orders: usize,
    /// Matched orders excluded because quantity or unit_price was not numeric.
    pub incomplete_orders: usize,
}

impl CurationReport {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, product_id: &str) -> Option<&ProductPerformance> {
        self.rows.iter().find(|r| r.product_id == product_id)
    }
}

#[derive(Default)]
struct Rollup {
    quantity: f64,
    revenue: f64,
    orders: usize,
    first: Option<NaiveDate>,
    last: Option<NaiveDate>,
}

pub struct Aggregator;

impl Aggregator {
    /// Inner join of cleansed orders and products on `product_id`, grouped per product.
    /// Neither input is modified.
    pub fn aggregate(orders: &Table, products: &Table, sink: &dyn EventSink) -> CurationReport {
        let mut names: HashMap<String, String> = HashMap::new();
        for row in &products.rows {
            if let Some(key) = row.get(PRODUCT_KEY).key() {
                let name = row.get(PRODUCT_NAME).key().unwrap_or_default();
                names.entry(key).or_insert(name);
            }
        }

        let mut rollups: BTreeMap<String, Rollup> = BTreeMap::new();
        let mut report = CurationReport::default();

        for row in &orders.rows {
            let Some(key) = row.get(PRODUCT_KEY).key().filter(|k| names.contains_key(k)) else {
                report.unmatched_orders += 1;
                continue;
            };
            let (Some(quantity), Some(price)) =
                (row.get(QUANTITY).as_number(), row.get(UNIT_PRICE).as_number())
            else {
                report.incomplete_orders += 1;
                continue;
            };

            let rollup = rollups.entry(key).or_default();
            rollup.quantity += quantity;
            rollup.revenue += quantity * price;
            rollup.orders += 1;
            if let Some(date) = row.get(ORDER_DATE).as_date() {
                rollup.first = Some(rollup.first.map_or(date, |d| d.min(date)));
                rollup.last = Some(rollup.last.map_or(date, |d| d.max(date)));
            }
        }

        let mut rows: Vec<ProductPerformance> = rollups
            .into_iter()
            .map(|(product_id, r)| ProductPerformance {
                product_name: names.get(&product_id).cloned().unwrap_or_default(),
                product_id,
                total_quantity: r.quantity,
                total_revenue: r.revenue,
                rank: 0,
                total_orders: r.orders,
                avg_order_quantity: r.quantity / r.orders as f64,
                first_order_date: r.first,
                last_order_date: r.last,
            })
            .collect();

        rows.sort_by(|a, b| {
            b.total_revenue
                .total_cmp(&a.total_revenue)
                .then_with(|| a.product_id.cmp(&b.product_id))
        });
        for (i, row) in rows.iter_mut().enumerate() {
            row.rank = i + 1;
        }
        report.rows = rows;

        if report.unmatched_orders > 0 {
            sink.emit(PipelineEvent::UnmatchedOrders {
                count: report.unmatched_orders,
            });
        }
        if report.incomplete_orders > 0 {
            sink.emit(PipelineEvent::IncompleteOrders {
                count: report.incomplete_orders,
            });
        }
        sink.emit(PipelineEvent::ReportBuilt {
            products: report.len(),
        });

        report
    }
}
