use std::net::Ipv4Addr;

/// True for addresses a probe can be aimed at directly.
///
/// Multicast, limited broadcast and the unspecified address are rejected.
pub fn is_unicast(addr: &Ipv4Addr) -> bool {
    !addr.is_multicast() && !addr.is_broadcast() && !addr.is_unspecified()
}

/// True when the bit pattern is a contiguous run of ones followed by zeros.
///
/// Both `0.0.0.0` and `255.255.255.255` count as masks.
pub fn is_netmask(addr: &Ipv4Addr) -> bool {
    netmask_bits(addr).is_some()
}

/// Prefix length encoded by a netmask, or `None` when `addr` is not one.
pub fn netmask_bits(addr: &Ipv4Addr) -> Option<u8> {
    let bits: u32 = u32::from(*addr);
    let ones: u32 = bits.leading_ones();
    (ones + bits.trailing_zeros() == 32).then_some(ones as u8)
}
