//! Revenue and occupancy reductions over in-memory order and table lists.
//!
//! Everything here is a pure single pass over its input; callers load the
//! rows and pass `now` explicitly so windows are reproducible.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    entity::enums::{OrderStatus, TableStatus},
    models::{DiningTable, Order},
    pricing::percent_of,
};

pub const DAILY_WINDOW_DAYS: i64 = 7;
pub const GROWTH_WINDOW_DAYS: i64 = 30;
pub const PROFIT_MARGIN_PERCENT: i64 = 70;
pub const LOYAL_CUSTOMER_LIMIT: usize = 6;
pub const LOYALTY_ORDER_WEIGHT: i64 = 1000;

/// Names staff type in when the guest did not give one.
const PLACEHOLDER_NAMES: &[&str] = &[
    "guest",
    "walk-in",
    "walk-in customer",
    "customer",
    "unknown",
    "n/a",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct DailyRevenue {
    pub date: NaiveDate,
    /// Day of month, used as the chart label.
    pub day: u32,
    pub revenue: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct LoyalCustomer {
    pub name: String,
    pub order_count: i64,
    pub total_spend: i64,
    pub score: i64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct OrderStatusCounts {
    pub pending: i64,
    pub completed: i64,
    pub cancelled: i64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct TableStatusCounts {
    pub available: i64,
    pub reserved: i64,
    pub occupied: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct PeriodRevenue {
    pub recent: i64,
    pub previous: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct RevenueReport {
    pub total_revenue: i64,
    pub revenue_growth: f64,
    pub profit: i64,
    pub profit_growth: f64,
    pub period: PeriodRevenue,
    pub order_count: i64,
    pub average_order_value: i64,
    pub orders_by_status: OrderStatusCounts,
    pub daily_revenue: Vec<DailyRevenue>,
    pub loyal_customers: Vec<LoyalCustomer>,
}

pub fn total_revenue(orders: &[Order]) -> i64 {
    orders
        .iter()
        .fold(0i64, |acc, o| acc.saturating_add(o.total_amount))
}

/// Revenue per calendar day (UTC) for the trailing week ending on `now`,
/// oldest day first. Days without orders are present with zero revenue.
pub fn daily_revenue(orders: &[Order], now: DateTime<Utc>) -> Vec<DailyRevenue> {
    let today = now.date_naive();
    let first = today - Duration::days(DAILY_WINDOW_DAYS - 1);

    let mut buckets: BTreeMap<NaiveDate, i64> = first
        .iter_days()
        .take(DAILY_WINDOW_DAYS as usize)
        .map(|d| (d, 0))
        .collect();

    for order in orders {
        let date = order.created_at.date_naive();
        if let Some(bucket) = buckets.get_mut(&date) {
            *bucket = bucket.saturating_add(order.total_amount);
        }
    }

    buckets
        .into_iter()
        .map(|(date, revenue)| DailyRevenue {
            date,
            day: chrono::Datelike::day(&date),
            revenue,
        })
        .collect()
}

/// Revenue of the last 30 days and of the 30 days before that.
pub fn period_revenue(orders: &[Order], now: DateTime<Utc>) -> PeriodRevenue {
    let window = Duration::days(GROWTH_WINDOW_DAYS);
    let recent_start = now - window;
    let previous_start = recent_start - window;

    let mut period = PeriodRevenue {
        recent: 0,
        previous: 0,
    };
    for order in orders {
        let at = order.created_at;
        if at > recent_start && at <= now {
            period.recent = period.recent.saturating_add(order.total_amount);
        } else if at > previous_start && at <= recent_start {
            period.previous = period.previous.saturating_add(order.total_amount);
        }
    }
    period
}

/// Percentage change from `previous` to `recent`, two decimals.
/// A zero previous period yields 0.
pub fn growth_percent(recent: i64, previous: i64) -> f64 {
    if previous == 0 {
        return 0.0;
    }
    let growth = (recent as f64 - previous as f64) / previous as f64 * 100.0;
    (growth * 100.0).round() / 100.0
}

pub fn profit(revenue: i64) -> i64 {
    percent_of(revenue, PROFIT_MARGIN_PERCENT)
}

pub fn is_placeholder_name(name: &str) -> bool {
    let name = name.trim();
    name.is_empty()
        || PLACEHOLDER_NAMES
            .iter()
            .any(|placeholder| name.eq_ignore_ascii_case(placeholder))
}

/// Ranks named customers by `order_count * 1000 + total_spend`.
pub fn loyal_customers(orders: &[Order], limit: usize) -> Vec<LoyalCustomer> {
    let mut by_name: HashMap<&str, (i64, i64)> = HashMap::new();
    for order in orders {
        if is_placeholder_name(&order.customer_name) {
            continue;
        }
        let entry = by_name.entry(order.customer_name.trim()).or_default();
        entry.0 += 1;
        entry.1 = entry.1.saturating_add(order.total_amount);
    }

    let mut ranked: Vec<LoyalCustomer> = by_name
        .into_iter()
        .map(|(name, (order_count, total_spend))| LoyalCustomer {
            name: name.to_string(),
            order_count,
            total_spend,
            score: order_count
                .saturating_mul(LOYALTY_ORDER_WEIGHT)
                .saturating_add(total_spend),
        })
        .collect();

    ranked.sort_by(|a, b| b.score.cmp(&a.score).then_with(|| a.name.cmp(&b.name)));
    ranked.truncate(limit);
    ranked
}

pub fn count_orders(orders: &[Order]) -> OrderStatusCounts {
    let mut counts = OrderStatusCounts::default();
    for order in orders {
        match order.status {
            OrderStatus::Pending => counts.pending += 1,
            OrderStatus::Completed => counts.completed += 1,
            OrderStatus::Cancelled => counts.cancelled += 1,
        }
    }
    counts
}

pub fn count_tables(tables: &[DiningTable]) -> TableStatusCounts {
    let mut counts = TableStatusCounts::default();
    for table in tables {
        match table.status {
            TableStatus::Available => counts.available += 1,
            TableStatus::Reserved => counts.reserved += 1,
            TableStatus::Occupied => counts.occupied += 1,
        }
    }
    counts
}

pub fn filter_tables(tables: Vec<DiningTable>, status: Option<TableStatus>) -> Vec<DiningTable> {
    match status {
        Some(status) => tables.into_iter().filter(|t| t.status == status).collect(),
        None => tables,
    }
}

pub fn revenue_report(orders: &[Order], now: DateTime<Utc>) -> RevenueReport {
    let total = total_revenue(orders);
    let period = period_revenue(orders, now);
    let order_count = orders.len() as i64;
    let average_order_value = if order_count == 0 {
        0
    } else {
        total / order_count
    };

    RevenueReport {
        total_revenue: total,
        revenue_growth: growth_percent(period.recent, period.previous),
        profit: profit(total),
        profit_growth: growth_percent(profit(period.recent), profit(period.previous)),
        period,
        order_count,
        average_order_value,
        orders_by_status: count_orders(orders),
        daily_revenue: daily_revenue(orders, now),
        loyal_customers: loyal_customers(orders, LOYAL_CUSTOMER_LIMIT),
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use uuid::Uuid;

    use super::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 15, 18, 0, 0).unwrap()
    }

    fn order(name: &str, total: i64, at: DateTime<Utc>) -> Order {
        Order {
            id: Uuid::new_v4(),
            table_id: None,
            user_id: Uuid::new_v4(),
            customer_name: name.to_string(),
            customer_phone: None,
            customer_email: None,
            total_amount: total,
            status: OrderStatus::Completed,
            payment_method: "cash".into(),
            created_at: at,
            updated_at: at,
        }
    }

    #[test]
    fn growth_compares_trailing_windows() {
        let orders = vec![
            order("Ann", 100, now() - Duration::days(5)),
            order("Bob", 200, now() - Duration::days(40)),
        ];
        let period = period_revenue(&orders, now());
        assert_eq!(period.recent, 100);
        assert_eq!(period.previous, 200);
        assert_eq!(growth_percent(period.recent, period.previous), -50.0);
    }

    #[test]
    fn zero_previous_period_means_zero_growth() {
        let orders = vec![order("Ann", 500, now() - Duration::days(1))];
        let report = revenue_report(&orders, now());
        assert_eq!(report.period.previous, 0);
        assert_eq!(report.revenue_growth, 0.0);
        assert_eq!(report.profit_growth, 0.0);
        assert_eq!(growth_percent(0, 0), 0.0);
    }

    #[test]
    fn orders_older_than_sixty_days_are_outside_both_windows() {
        let orders = vec![order("Ann", 900, now() - Duration::days(61))];
        let period = period_revenue(&orders, now());
        assert_eq!(period.recent, 0);
        assert_eq!(period.previous, 0);
        assert_eq!(total_revenue(&orders), 900);
    }

    #[test]
    fn daily_revenue_fills_missing_days_with_zero() {
        let orders = vec![
            order("Ann", 100, now()),
            order("Bob", 50, now() - Duration::hours(2)),
            order("Cid", 70, now() - Duration::days(3)),
            order("Dee", 999, now() - Duration::days(7)),
        ];
        let days = daily_revenue(&orders, now());
        assert_eq!(days.len(), 7);
        let labels: Vec<u32> = days.iter().map(|d| d.day).collect();
        assert_eq!(labels, vec![9, 10, 11, 12, 13, 14, 15]);
        let revenue: Vec<i64> = days.iter().map(|d| d.revenue).collect();
        assert_eq!(revenue, vec![0, 0, 0, 70, 0, 0, 150]);
    }

    #[test]
    fn daily_revenue_keys_cross_month_boundary() {
        let at = Utc.with_ymd_and_hms(2024, 3, 2, 9, 0, 0).unwrap();
        let labels: Vec<u32> = daily_revenue(&[], at).iter().map(|d| d.day).collect();
        assert_eq!(labels, vec![25, 26, 27, 28, 29, 1, 2]);
    }

    #[test]
    fn profit_is_seventy_percent_of_revenue() {
        let orders = vec![
            order("Ann", 1_000, now() - Duration::days(1)),
            order("Ann", 1_000, now() - Duration::days(2)),
        ];
        let report = revenue_report(&orders, now());
        assert_eq!(report.total_revenue, 2_000);
        assert_eq!(report.profit, 1_400);
        assert_eq!(report.average_order_value, 1_000);
    }

    #[test]
    fn loyal_customers_skip_blank_and_placeholder_names() {
        let at = now();
        let orders = vec![
            order("", 10_000, at),
            order("   ", 10_000, at),
            order("Guest", 10_000, at),
            order("walk-in customer", 10_000, at),
            order("Ann", 100, at),
        ];
        let ranked = loyal_customers(&orders, LOYAL_CUSTOMER_LIMIT);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].name, "Ann");
    }

    #[test]
    fn loyal_customers_rank_by_composite_score() {
        let at = now();
        let mut orders = vec![
            // one big order: 1 * 1000 + 5000 = 6000
            order("Big Spender", 5_000, at),
        ];
        // three small orders: 3 * 1000 + 300 = 3300
        for _ in 0..3 {
            orders.push(order("Regular", 100, at));
        }
        // seven orders: 7 * 1000 + 70 = 7070
        for _ in 0..7 {
            orders.push(order(" Frequent ", 10, at));
        }

        let ranked = loyal_customers(&orders, LOYAL_CUSTOMER_LIMIT);
        let names: Vec<&str> = ranked.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Frequent", "Big Spender", "Regular"]);
        assert_eq!(ranked[0].score, 7_070);
        assert_eq!(ranked[0].order_count, 7);
    }

    #[test]
    fn loyal_customers_are_capped_at_six() {
        let at = now();
        let orders: Vec<Order> = (0..10)
            .map(|i| order(&format!("Customer {i}"), 100 * i, at))
            .collect();
        let ranked = loyal_customers(&orders, LOYAL_CUSTOMER_LIMIT);
        assert_eq!(ranked.len(), 6);
        assert_eq!(ranked[0].name, "Customer 9");
    }

    #[test]
    fn tables_filter_and_count_by_status() {
        let table = |name: &str, status| DiningTable {
            id: Uuid::new_v4(),
            name: name.into(),
            capacity: 4,
            status,
            image_url: None,
            created_at: now(),
        };
        let tables = vec![
            table("T1", TableStatus::Available),
            table("T2", TableStatus::Reserved),
            table("T3", TableStatus::Available),
            table("T4", TableStatus::Occupied),
        ];
        let counts = count_tables(&tables);
        assert_eq!(counts.available, 2);
        assert_eq!(counts.reserved, 1);
        assert_eq!(counts.occupied, 1);

        let available = filter_tables(tables.clone(), Some(TableStatus::Available));
        assert_eq!(available.len(), 2);
        assert_eq!(filter_tables(tables, None).len(), 4);
    }
}
