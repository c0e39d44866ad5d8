use super::*;

#[test]
fn rng_is_deterministic_per_seed() {
    let mut a = Rng64::new(7);
    let mut b = Rng64::new(7);
    for _ in 0..16 {
        assert_eq!(a.next_u64(), b.next_u64());
    }
}

#[test]
fn rng_range_stays_in_bounds() {
    let mut rng = Rng64::new(42);
    for _ in 0..1000 {
        let v = rng.range(0.6, 1.4);
        assert!((0.6..1.4).contains(&v));
    }
}

#[test]
fn periods_to_cover_rounds_up() {
    assert_eq!(periods_to_cover(0.0, 100.0), 0.0);
    assert_eq!(periods_to_cover(-5.0, 100.0), 0.0);
    assert_eq!(periods_to_cover(1.0, 100.0), 1.0);
    assert_eq!(periods_to_cover(100.0, 100.0), 1.0);
    assert_eq!(periods_to_cover(250.0, 100.0), 3.0);
    assert_eq!(periods_to_cover(10.0, 0.0), 0.0);
}
