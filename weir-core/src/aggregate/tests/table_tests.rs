use super::super::table::TxTable;
use pretty_assertions::assert_eq;

#[test]
fn slot_is_lazy_and_stable() {
    let mut table = TxTable::with_capacity(8);

    table.slot(1).fields_mut().insert("ReqMethod", "GET");
    table.slot(1).fields_mut().insert("ReqURL", "/");

    assert_eq!(table.len(), 1);
    let acc = table.remove(1).unwrap();
    assert_eq!(acc.fields().len(), 2);
}

#[test]
fn exceeding_capacity_evicts_the_oldest_in_flight() {
    let mut table = TxTable::with_capacity(2);

    table.slot(1).fields_mut().insert("ReqURL", "/a");
    table.slot(2).fields_mut().insert("ReqURL", "/b");
    table.slot(3).fields_mut().insert("ReqURL", "/c");

    assert_eq!(table.len(), 2);
    assert!(table.remove(1).is_none());
    assert!(table.remove(2).is_some());
    assert!(table.remove(3).is_some());
}

#[test]
fn finished_ids_do_not_count_against_capacity() {
    let mut table = TxTable::with_capacity(2);

    table.slot(1);
    assert!(table.remove(1).is_some());
    table.slot(2);
    assert!(table.remove(2).is_some());

    // Two live ids fit even after earlier churn.
    table.slot(3);
    table.slot(4);
    assert_eq!(table.len(), 2);
    assert!(table.remove(3).is_some());
    assert!(table.remove(4).is_some());
}

#[test]
fn arrival_order_survives_heavy_churn() {
    let mut table = TxTable::with_capacity(4);

    // Many short-lived transactions force compaction of the arrival order.
    for vxid in 0..64u32 {
        table.slot(vxid);
        table.remove(vxid);
    }

    table.slot(100);
    table.slot(101);
    table.slot(102);
    table.slot(103);
    table.slot(104); // evicts 100

    assert_eq!(table.len(), 4);
    assert!(table.remove(100).is_none());
    assert!(table.remove(101).is_some());
    assert!(table.remove(104).is_some());
}
