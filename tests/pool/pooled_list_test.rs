/*!
 * Pooled List Test
 * Slot reuse and pool growth
 */

use memarena::{PoolConfig, PooledList};
use pretty_assertions::assert_eq;

fn values<T: Clone>(list: &PooledList<T>) -> Vec<T> {
    list.iter().cloned().collect()
}

#[test]
fn test_removed_slot_is_reused_before_growth() {
    let mut list = PooledList::new(4);
    list.append("a");
    list.append("b");
    let c = list.append("c");
    list.append("d");
    assert_eq!(list.pool_count(), 1);

    assert!(list.remove(c));
    let e = list.append("e");
    assert_eq!(e, c);
    assert_eq!(list.pool_count(), 1);
    assert_eq!(values(&list), vec!["a", "b", "d", "e"]);

    list.append("f");
    assert_eq!(list.pool_count(), 2);
    assert_eq!(values(&list), vec!["a", "b", "d", "e", "f"]);
}

#[test]
fn test_reuse_below_capacity() {
    let mut list = PooledList::new(8);
    let refs: Vec<_> = (0..5).map(|i| list.append(i)).collect();

    assert!(list.remove(refs[2]));
    let reused = list.append(99);
    assert_eq!(reused, refs[2]);
    assert_eq!(list.pool_count(), 1);
    assert_eq!(values(&list), vec![0, 1, 3, 4, 99]);
}

#[test]
fn test_growth_boundary() {
    let capacity = 16;
    let mut list = PooledList::new(capacity);

    for i in 0..capacity {
        list.append(i);
    }
    assert_eq!(list.pool_count(), 1);
    assert_eq!(list.len(), capacity);

    let next = list.append(capacity);
    assert_eq!(list.pool_count(), 2);
    assert_eq!(next.pool(), 1);
    assert_eq!(values(&list), (0..=capacity).collect::<Vec<_>>());
}

#[test]
fn test_several_removals_recycle_in_reverse() {
    let mut list = PooledList::new(8);
    let refs: Vec<_> = (0..6).map(|i| list.append(i)).collect();

    assert!(list.remove(refs[1]));
    assert!(list.remove(refs[3]));
    assert_eq!(values(&list), vec![0, 2, 4, 5]);

    // most recently removed slot comes back first
    assert_eq!(list.append(10), refs[3]);
    assert_eq!(list.append(11), refs[1]);
    assert_eq!(values(&list), vec![0, 2, 4, 5, 10, 11]);
    assert_eq!(list.pool_count(), 1);
}

#[test]
fn test_remove_across_pools() {
    let mut list = PooledList::new(2);
    let refs: Vec<_> = (0..5).map(|i| list.append(i)).collect();
    assert_eq!(list.pool_count(), 3);

    assert!(list.remove(refs[2]));
    assert!(list.remove(refs[4]));
    assert_eq!(values(&list), vec![0, 1, 3]);

    list.append(7);
    list.append(8);
    list.append(9);
    assert_eq!(list.pool_count(), 3);
    assert_eq!(values(&list), vec![0, 1, 3, 7, 8, 9]);
}

#[test]
fn test_values_are_dropped_on_remove() {
    use std::rc::Rc;

    let tracker = Rc::new(());
    let mut list = PooledList::new(4);
    list.append(Rc::clone(&tracker));
    let second = list.append(Rc::clone(&tracker));
    assert_eq!(Rc::strong_count(&tracker), 3);

    assert!(list.remove(second));
    assert_eq!(Rc::strong_count(&tracker), 2);

    drop(list);
    assert_eq!(Rc::strong_count(&tracker), 1);
}

#[test]
fn test_config_sets_capacity() {
    let config = PoolConfig::from_json(r#"{"capacity": 3}"#).unwrap();
    let mut list = PooledList::with_config(&config);
    assert_eq!(list.capacity(), 3);

    for i in 0..4 {
        list.append(i);
    }
    assert_eq!(list.pool_count(), 2);
}

#[test]
fn test_default_capacity() {
    let list: PooledList<u64> = PooledList::default();
    assert_eq!(list.capacity(), 4096);
    assert!(list.is_empty());
}
