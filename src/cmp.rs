//! Ordering of parsed addresses.

use core::cmp::Ordering;

use crate::{Address, Flags};

///Three-way comparison: `components` first, then `flags` as an integer,
///then `port` and `mask` — each only when both sides carry one, so an
///address with a port never simply outranks one without.
pub(crate) fn compare(a: &Address, b: &Address) -> i32 {
    let mut ordering = a.components.cmp(&b.components);

    if ordering == Ordering::Equal {
        ordering = a.flags.bits().cmp(&b.flags.bits());
    }

    if ordering == Ordering::Equal
        && a.flags.contains(Flags::HAS_PORT)
        && b.flags.contains(Flags::HAS_PORT)
    {
        ordering = a.port.cmp(&b.port);
    }

    if ordering == Ordering::Equal
        && a.flags.contains(Flags::HAS_MASK)
        && b.flags.contains(Flags::HAS_MASK)
    {
        ordering = a.mask.cmp(&b.mask);
    }

    match ordering {
        Ordering::Less => -1,
        Ordering::Equal => 0,
        Ordering::Greater => 1,
    }
}

impl PartialOrd for Address {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Address {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        match compare(self, other) {
            n if n < 0 => Ordering::Less,
            0 => Ordering::Equal,
            _ => Ordering::Greater,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{parse, Address};

    fn addr(text: &str) -> Address {
        let mut address = Address::default();
        assert!(parse(text.as_bytes(), &mut address));
        address
    }

    #[test]
    fn orders_by_components_first() {
        assert!(addr("::1") < addr("::2"));
        assert!(addr("::ffff") > addr("::1"));
    }

    #[test]
    fn equal_components_order_by_flags() {
        //A bare address sorts before one with a mask, which sorts before one
        //with a port, since HAS_MASK < HAS_PORT as bit patterns.
        assert!(addr("::1") < addr("::1/64"));
        assert!(addr("::1/64") < addr("[::1]:80"));
    }

    #[test]
    fn port_only_compared_when_both_sides_have_one() {
        let with_port_low = addr("[::1]:80");
        let with_port_high = addr("[::1]:443");
        assert!(with_port_low < with_port_high);
    }

    #[test]
    fn mask_only_compared_when_both_sides_have_one() {
        assert!(addr("::1/64") < addr("::1/96"));
    }

    #[test]
    fn equal_addresses_compare_equal() {
        assert_eq!(addr("fe80::1%fa0"), addr("fe80::1%fa0"));
        assert!(addr("fe80::1%fa0") == addr("fe80::1%fa0"));
    }
}
