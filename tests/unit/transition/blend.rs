use super::*;

#[test]
fn starts_at_zero_and_clamps_writes() {
    let mut b = BlendState::new();
    assert_eq!(b.factor(), 0.0);
    b.set(0.4);
    assert_eq!(b.factor(), 0.4);
    b.set(1.7);
    assert_eq!(b.factor(), 1.0);
    b.set(-0.2);
    assert_eq!(b.factor(), 0.0);
    b.set(f64::NAN);
    assert_eq!(b.factor(), 0.0);
}
