//! Integration tests for sales analytics over a paged listing

mod support;

use partnerhub_core::{RequestScope, SalesAnalytics};
use partnerhub_domain::{PageRequest, SalesFilters};
use support::ports::PagedSalesPort;
use support::sale;

#[tokio::test]
async fn heatmap_walks_every_page() {
    let mut sales: Vec<_> = (0..130).map(|i| sale(&format!("s{i}"), "Lagos", 1)).collect();
    sales.extend((0..20).map(|i| sale(&format!("k{i}"), "Kano", 10)));
    let port = PagedSalesPort::new(sales);
    let analytics = SalesAnalytics::new(port.clone());

    let points = analytics
        .heatmap(&SalesFilters::default(), &RequestScope::new("sales"))
        .await
        .expect("heatmap");

    assert_eq!(port.requests().len(), 2);
    assert_eq!(points[0].state, "Kano");
    assert_eq!(points[0].total_quantity, 200);
    assert_eq!(points[1].sales_count, 130);
    assert!((points[1].intensity - 0.65).abs() < 1e-9);
}

#[tokio::test]
async fn totals_on_empty_listing() {
    let port = PagedSalesPort::new(Vec::new());
    let analytics = SalesAnalytics::new(port.clone());

    let totals = analytics
        .totals(&SalesFilters::default(), &RequestScope::new("sales"))
        .await
        .expect("totals");

    assert_eq!(totals.sales_count, 0);
    assert_eq!(port.requests().len(), 1);
}

#[tokio::test]
async fn totals_follow_a_capped_page_size() {
    let sales: Vec<_> = (0..120).map(|i| sale(&format!("s{i}"), "Oyo", 2)).collect();
    let port = PagedSalesPort::capped(sales, 50);
    let analytics = SalesAnalytics::new(port.clone());

    let totals = analytics
        .totals(&SalesFilters::default(), &RequestScope::new("sales"))
        .await
        .expect("totals");

    assert_eq!(totals.sales_count, 120);
    assert_eq!(totals.total_quantity, 240);
    assert_eq!(
        port.requests(),
        vec![PageRequest::new(1, 100), PageRequest::new(2, 50), PageRequest::new(3, 50)]
    );
}
