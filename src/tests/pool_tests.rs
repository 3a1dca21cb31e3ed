use crate::manager::{HostCapacity, ResourcePool, ResourceSpec};

fn pool() -> ResourcePool {
    ResourcePool::new(HostCapacity { cpu: 8, ram: 16, disk: 500 })
}

fn spec(cpu: u32, ram: u32, disk: u32) -> ResourceSpec {
    ResourceSpec { cpu, ram, disk }
}

#[test]
fn test_can_admit_within_capacity() {
    let pool = pool();
    assert!(pool.can_admit(spec(4, 8, 200)));
    assert!(!pool.can_admit(spec(9, 8, 200)));
    assert!(!pool.can_admit(spec(4, 17, 200)));
    assert!(!pool.can_admit(spec(4, 8, 501)));
}

#[test]
fn test_can_admit_exact_fit() {
    let pool = pool();
    assert!(pool.can_admit(spec(8, 16, 500)));
}

#[test]
fn test_reserve_accumulates() {
    let mut pool = pool();
    pool.reserve(spec(4, 8, 200)).unwrap();
    pool.reserve(spec(2, 4, 100)).unwrap();
    let used = pool.snapshot();
    assert_eq!((used.cpu, used.ram, used.disk), (6, 12, 300));
    assert_eq!(pool.available(), spec(2, 4, 200));
}

#[test]
fn test_reserve_rejects_over_capacity_without_mutation() {
    let mut pool = pool();
    pool.reserve(spec(4, 8, 200)).unwrap();

    let before = pool.snapshot();
    assert!(pool.reserve(spec(5, 1, 1)).is_err());
    assert_eq!(pool.snapshot(), before, "rejected reserve must not change usage");
}

#[test]
fn test_release_returns_to_pool() {
    let mut pool = pool();
    pool.reserve(spec(4, 8, 200)).unwrap();
    pool.release(spec(4, 8, 0));
    let used = pool.snapshot();
    assert_eq!((used.cpu, used.ram, used.disk), (0, 0, 200));
}

#[test]
fn test_release_clamps_at_zero() {
    let mut pool = pool();
    pool.reserve(spec(2, 2, 2)).unwrap();
    pool.release(spec(4, 8, 200));
    let used = pool.snapshot();
    assert_eq!((used.cpu, used.ram, used.disk), (0, 0, 0));
}

#[test]
fn test_resize_excludes_old_allocation() {
    let mut pool = pool();
    pool.reserve(spec(4, 8, 200)).unwrap();

    // Growing to the full host only fits because the old reservation is
    // excluded from the admission check.
    pool.resize(spec(4, 8, 200), spec(8, 16, 500)).unwrap();
    let used = pool.snapshot();
    assert_eq!((used.cpu, used.ram, used.disk), (8, 16, 500));
}

#[test]
fn test_resize_rejects_growth_over_capacity() {
    let mut pool = pool();
    pool.reserve(spec(4, 8, 200)).unwrap();

    let before = pool.snapshot();
    assert!(pool.resize(spec(4, 8, 200), spec(10, 8, 200)).is_err());
    assert_eq!(pool.snapshot(), before, "rejected resize must not change usage");
}

#[test]
fn test_resize_shrink_always_fits() {
    let mut pool = pool();
    pool.reserve(spec(8, 16, 500)).unwrap();
    pool.resize(spec(8, 16, 500), spec(1, 1, 1)).unwrap();
    let used = pool.snapshot();
    assert_eq!((used.cpu, used.ram, used.disk), (1, 1, 1));
}

#[test]
fn test_resize_mixed_judged_as_one_unit() {
    let mut pool = pool();
    pool.reserve(spec(6, 14, 100)).unwrap();

    // Shrinking ram does not buy admission for the cpu growth.
    let before = pool.snapshot();
    assert!(pool.resize(spec(6, 14, 100), spec(9, 2, 100)).is_err());
    assert_eq!(pool.snapshot(), before);
}
