use ipv6_endpoint::{compare, parse, Address};

fn parsed(text: &str) -> Address {
    let mut address = Address::default();
    assert!(parse(text.as_bytes(), &mut address), "expected {text} to parse");
    address
}

#[test]
fn equal_addresses_compare_as_zero() {
    assert_eq!(compare(&parsed("fe80::1"), &parsed("fe80::1")), 0);
}

#[test]
fn differs_by_components_first() {
    assert!(compare(&parsed("::1"), &parsed("::2")) < 0);
    assert!(compare(&parsed("::2"), &parsed("::1")) > 0);
}

#[test]
fn flags_break_ties_when_components_match() {
    assert!(compare(&parsed("::1"), &parsed("::1/64")) < 0);
    assert!(compare(&parsed("::1/64"), &parsed("[::1]:80")) < 0);
}

#[test]
fn port_only_breaks_ties_when_both_sides_have_one() {
    assert!(compare(&parsed("[::1]:80"), &parsed("[::1]:443")) < 0);
}

#[test]
fn mask_only_breaks_ties_when_both_sides_have_one() {
    assert!(compare(&parsed("::1/64"), &parsed("::1/96")) < 0);
}

#[test]
fn exposed_as_ord_for_sorting() {
    let mut addresses = [parsed("::2"), parsed("::1"), parsed("::3")];
    addresses.sort();
    assert_eq!(
        addresses.map(|a| a.components[7]),
        [1, 2, 3]
    );
}

#[test]
fn partial_ord_agrees_with_ord() {
    let a = parsed("::1");
    let b = parsed("::2");
    assert_eq!(a.partial_cmp(&b), Some(a.cmp(&b)));
}
