mod common;

use common::{add_scored, setup};
use gpumarket::domain::error::DomainError;
use gpumarket::domain::ports::listing_source::ListingSource;
use gpumarket::domain::values::channel::Channel;
use gpumarket::GpuMarket;
use std::sync::Arc;

fn snippets(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_ingest_listings_runs_full_pipeline() {
    let (gm, _) = setup();
    add_scored(&gm, "RTX 3080", 120.0);

    let stored = gm
        .ingest_listings(
            "RTX 3080",
            Channel::Used,
            &snippets(&[
                "RTX 3080 10GB used, tested $400.00",
                "RTX 3080 FE used $420.00",
                "RTX 3080 box only $30.00",
                "Sponsored RTX 3080 deal $999.00",
                "RTX 3090 used $900.00",
            ]),
        )
        .unwrap();

    // Only the two genuine listings average in.
    assert_eq!(stored, Some(410.0));
    assert_eq!(gm.get_product("RTX 3080").unwrap().used_avg, Some(410.0));
}

#[test]
fn test_used_condition_listing_excluded_from_new_average() {
    let (gm, _) = setup();
    add_scored(&gm, "RTX 3080", 120.0);

    let stored = gm
        .ingest_listings(
            "RTX 3080",
            Channel::New,
            &snippets(&[
                "GeForce RTX 3080 used, like new $300.00",
                "GeForce RTX 3080 10GB GDDR6X $649.00",
            ]),
        )
        .unwrap();

    // The second-hand card never reaches the new-market average.
    assert_eq!(stored, Some(649.0));
    assert_eq!(gm.get_product("RTX 3080").unwrap().new_avg, Some(649.0));
}

#[test]
fn test_no_valid_data_leaves_stored_value() {
    let (gm, _) = setup();
    add_scored(&gm, "RTX 3080", 120.0);
    gm.ingest_aggregate("RTX 3080", Channel::Used, 430.0).unwrap();

    // A pass over garbage listings writes nothing.
    let stored = gm
        .ingest_listings(
            "RTX 3080",
            Channel::Used,
            &snippets(&["RTX 3080 for parts only $100", "unrelated item $200"]),
        )
        .unwrap();
    assert_eq!(stored, None);
    assert_eq!(gm.get_product("RTX 3080").unwrap().used_avg, Some(430.0));
}

#[test]
fn test_explicit_reset_nulls_channel() {
    let (gm, _) = setup();
    add_scored(&gm, "RTX 3080", 120.0);
    add_scored(&gm, "RTX 3070", 100.0);
    gm.ingest_aggregate("RTX 3080", Channel::New, 649.0).unwrap();
    gm.ingest_aggregate("RTX 3070", Channel::New, 499.0).unwrap();
    gm.ingest_aggregate("RTX 3080", Channel::Used, 430.0).unwrap();

    let reset = gm.reset_channel(Channel::New).unwrap();
    assert_eq!(reset, 2);
    assert_eq!(gm.get_product("RTX 3080").unwrap().new_avg, None);
    // Other channels untouched.
    assert_eq!(gm.get_product("RTX 3080").unwrap().used_avg, Some(430.0));
}

#[test]
fn test_used_outlier_rejected_from_average() {
    let (gm, _) = setup();
    add_scored(&gm, "RTX 3080", 120.0);

    let stored = gm
        .ingest_listings(
            "RTX 3080",
            Channel::Used,
            &snippets(&[
                "RTX 3080 used $300.00",
                "RTX 3080 used $310.00",
                "RTX 3080 used $290.00",
                "RTX 3080 sealed collector item $10,000.00",
            ]),
        )
        .unwrap();
    assert_eq!(stored, Some(300.0));
}

#[test]
fn test_aggregate_below_floor_is_no_data() {
    let (gm, _) = setup();
    add_scored(&gm, "RTX 3080", 120.0);

    assert_eq!(
        gm.ingest_aggregate("RTX 3080", Channel::New, 12.0).unwrap(),
        None
    );
    assert_eq!(gm.get_product("RTX 3080").unwrap().new_avg, None);
    assert!(gm.ingest_aggregate("RTX 3080", Channel::New, -1.0).is_err());
    // Zero is a contract violation, not merely sub-floor data.
    assert!(gm.ingest_aggregate("RTX 3080", Channel::New, 0.0).is_err());
}

#[test]
fn test_listing_ingest_rejects_launch_channel() {
    let (gm, _) = setup();
    add_scored(&gm, "RTX 3080", 120.0);
    let err = gm
        .ingest_listings("RTX 3080", Channel::Launch, &snippets(&["$699"]))
        .unwrap_err();
    assert!(matches!(err, DomainError::InvalidInput(_)));
}

#[tokio::test]
async fn test_batch_updates_and_skips() {
    let (gm, source) = setup();
    add_scored(&gm, "RTX 3080", 120.0);
    add_scored(&gm, "RTX 3070", 100.0);

    source.push_all(
        "RTX 3080",
        Channel::Used,
        &["RTX 3080 used $400.00", "RTX 3080 used $420.00"],
    );
    source.push("RTX 3080", Channel::New, "RTX 3080 new in box $649.00");
    // RTX 3070 gets nothing.

    let report = gm.reconcile(None).await.unwrap();
    assert_eq!(report.updated, 1);
    assert_eq!(report.skipped_no_data, 1);
    assert_eq!(report.failed, 0);
    assert!(!report.run_id.is_empty());

    let p = gm.get_product("RTX 3080").unwrap();
    assert_eq!(p.used_avg, Some(410.0));
    assert_eq!(p.new_avg, Some(649.0));
}

/// Listing source that errors for one specific product.
struct FlakySource {
    poison: String,
    inner: Arc<gpumarket::infrastructure::sources::static_source::StaticListingSource>,
}

#[async_trait::async_trait]
impl ListingSource for FlakySource {
    async fn fetch(
        &self,
        product_name: &str,
        channel: Channel,
    ) -> Result<Vec<String>, DomainError> {
        if product_name == self.poison {
            return Err(DomainError::Extraction("timed out".into()));
        }
        self.inner.fetch(product_name, channel).await
    }
}

#[tokio::test]
async fn test_batch_isolates_per_product_failure() {
    let inner = Arc::new(
        gpumarket::infrastructure::sources::static_source::StaticListingSource::new(),
    );
    inner.push("RTX 3070", Channel::Used, "RTX 3070 used $330.00");
    let source = Arc::new(FlakySource {
        poison: "RTX 3080".into(),
        inner,
    });
    let gm = GpuMarket::with_providers(":memory:", source, None).unwrap();
    add_scored(&gm, "RTX 3080", 120.0);
    add_scored(&gm, "RTX 3070", 100.0);

    let report = gm.reconcile(None).await.unwrap();
    assert_eq!(report.updated, 1);
    assert_eq!(report.failed, 1);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].0, "RTX 3080");

    // The healthy product still got its price.
    assert_eq!(gm.get_product("RTX 3070").unwrap().used_avg, Some(330.0));
}

#[tokio::test]
async fn test_batch_with_unknown_name_reports_failure() {
    let (gm, _) = setup();
    add_scored(&gm, "RTX 3080", 120.0);

    let report = gm
        .reconcile(Some(vec!["RTX 3080".into(), "No Such Card".into()]))
        .await
        .unwrap();
    assert_eq!(report.failed, 1);
    assert_eq!(report.failures[0].0, "No Such Card");
}
