//! Per-state sales aggregation for the heatmap and dashboard header

use std::collections::{BTreeMap, HashSet};

use partnerhub_domain::{Sale, SalesTotals, StateSalesPoint};

/// Label used for sales without a state
pub const UNKNOWN_STATE: &str = "Unknown";

/// Aggregate sales per state, busiest state first
///
/// `intensity` is the state's quantity relative to the busiest state, so the
/// first point is always 1.0 unless every quantity is zero.
pub fn state_heatmap(sales: &[Sale]) -> Vec<StateSalesPoint> {
    let mut by_state: BTreeMap<String, (u64, u64)> = BTreeMap::new();
    for sale in sales {
        let entry = by_state.entry(state_label(sale)).or_default();
        entry.0 += 1;
        entry.1 += u64::from(sale.quantity);
    }

    let max_quantity = by_state.values().map(|(_, quantity)| *quantity).max().unwrap_or(0);
    let mut points: Vec<StateSalesPoint> = by_state
        .into_iter()
        .map(|(state, (sales_count, total_quantity))| StateSalesPoint {
            state,
            sales_count,
            total_quantity,
            intensity: if max_quantity == 0 {
                0.0
            } else {
                total_quantity as f64 / max_quantity as f64
            },
        })
        .collect();

    // BTreeMap order breaks ties alphabetically
    points.sort_by(|a, b| b.total_quantity.cmp(&a.total_quantity));
    points
}

pub fn sales_totals(sales: &[Sale]) -> SalesTotals {
    let mut states = HashSet::new();
    let mut partners = HashSet::new();
    let mut totals = SalesTotals::default();

    for sale in sales {
        totals.sales_count += 1;
        totals.total_quantity += u64::from(sale.quantity);
        totals.total_amount += sale.amount.unwrap_or(0.0);
        if let Some(state) = non_blank(sale.state.as_deref()) {
            states.insert(state.to_lowercase());
        }
        if let Some(partner) = non_blank(sale.organization_id.as_deref())
            .or_else(|| non_blank(sale.partner_name.as_deref()))
        {
            partners.insert(partner.to_string());
        }
    }

    totals.states_covered = states.len();
    totals.partners_covered = partners.len();
    totals
}

fn state_label(sale: &Sale) -> String {
    non_blank(sale.state.as_deref()).map_or_else(|| UNKNOWN_STATE.to_string(), title_case)
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// "lagos", "LAGOS" and "Lagos" land in the same bucket
fn title_case(state: &str) -> String {
    state
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
