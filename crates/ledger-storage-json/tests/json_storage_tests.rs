use std::fs;

use chrono::{TimeZone, Utc};
use ledger_core::{
    record_sale, CoreError, FixedClock, LedgerSession, SaleDraft, SalesProvider, SessionSettings,
};
use ledger_domain::{Identity, PeriodKey, SaleRecord};
use ledger_storage_json::JsonSalesStore;
use tempfile::tempdir;

fn identity() -> Identity {
    Identity::new("Shop@Example.com").unwrap()
}

fn clock() -> FixedClock {
    FixedClock(Utc.with_ymd_and_hms(2024, 3, 15, 9, 30, 0).unwrap())
}

#[test]
fn missing_file_means_no_sales() {
    let dir = tempdir().expect("tempdir");
    let store = JsonSalesStore::new(dir.path().join("sales")).expect("create store");

    assert!(store.fetch_sales(&identity()).expect("fetch").is_empty());
    assert!(store
        .sales_path(&identity())
        .ends_with("sales/_53hop_40_45xample_2ecom.json"));
}

#[test]
fn recorded_sales_are_fetched_back_in_order() {
    let dir = tempdir().expect("tempdir");
    let store = JsonSalesStore::new(dir.path().to_path_buf()).expect("create store");

    for (name, quantity) in [("Pen", 3), ("Ink", 1)] {
        record_sale(
            &store,
            &identity(),
            SaleDraft::new(name, quantity, 2.0),
            None,
            &clock(),
        )
        .expect("record sale");
    }

    let records = store.fetch_sales(&identity()).expect("fetch");
    let names: Vec<&str> = records.iter().map(|r| r.product_name.as_str()).collect();
    assert_eq!(names, ["Pen", "Ink"]);
    assert!(!store.sales_path(&identity()).with_extension("json.tmp").exists());
}

#[test]
fn identities_differing_only_in_punctuation_or_case_stay_isolated() {
    let dir = tempdir().expect("tempdir");
    let store = JsonSalesStore::new(dir.path().to_path_buf()).expect("create store");
    let dotted = Identity::new("a.b@shop.com").unwrap();
    let underscored = Identity::new("a_b@shop.com").unwrap();
    let shouted = Identity::new("A.B@shop.com").unwrap();

    record_sale(&store, &dotted, SaleDraft::new("Pen", 1, 2.0), None, &clock())
        .expect("record sale");

    assert_ne!(store.sales_path(&dotted), store.sales_path(&underscored));
    assert_ne!(store.sales_path(&dotted), store.sales_path(&shouted));
    assert_eq!(store.fetch_sales(&dotted).expect("fetch").len(), 1);
    assert!(store.fetch_sales(&underscored).expect("fetch").is_empty());
    assert!(store.fetch_sales(&shouted).expect("fetch").is_empty());
}

#[test]
fn provider_file_format_is_accepted() {
    let dir = tempdir().expect("tempdir");
    let store = JsonSalesStore::new(dir.path().to_path_buf()).expect("create store");
    let json = r#"[
        {"_id": "a1", "productId": "p1", "productName": "Pen", "quantity": 2, "price": 1.5, "date": "2024-03-02T10:00:00.000Z"},
        {"_id": "a2", "productId": "p2", "productName": "Pad", "quantity": 1, "price": 4.0, "date": "2024-01-20T10:00:00.000Z"}
    ]"#;
    fs::write(store.sales_path(&identity()), json).expect("write fixture");

    let mut session = LedgerSession::new(identity(), clock(), SessionSettings::default());
    session.refresh(&store).expect("refresh");

    let periods: Vec<PeriodKey> = session.ledger_view().periods().collect();
    assert_eq!(
        periods,
        [PeriodKey::new(2024, 3).unwrap(), PeriodKey::new(2024, 1).unwrap()]
    );
    assert_eq!(session.ledger_view().sale_count(), 2);
}

#[test]
fn corrupt_file_surfaces_as_fetch_failure() {
    let dir = tempdir().expect("tempdir");
    let store = JsonSalesStore::new(dir.path().to_path_buf()).expect("create store");
    store
        .save_sales(
            &identity(),
            &[SaleRecord::new(None, "Pen", 1, 1.0, clock().0)],
        )
        .expect("seed");

    let mut session = LedgerSession::new(identity(), clock(), SessionSettings::default());
    session.refresh(&store).expect("initial refresh");

    fs::write(store.sales_path(&identity()), "[{").expect("corrupt file");
    let err = session.refresh(&store).expect_err("corrupt file must fail");
    assert!(matches!(err, CoreError::FetchFailure(_)));
    assert_eq!(session.ledger_view().sale_count(), 1);
}
