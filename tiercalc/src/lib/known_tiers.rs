use crate::lib::tier::Tier;

/// Tiers known to be offered by the provider, sorted by vCPU then memory
pub static KNOWN_TIERS: [Tier; 27] = [
    Tier::new(1, 3840),
    Tier::new(2, 7680),
    Tier::new(2, 13312),
    Tier::new(4, 15360),
    Tier::new(4, 26624),
    Tier::new(6, 23040),
    Tier::new(6, 39936),
    Tier::new(8, 30720),
    Tier::new(8, 53248),
    Tier::new(10, 38400),
    Tier::new(10, 66560),
    Tier::new(12, 46080),
    Tier::new(12, 79872),
    Tier::new(16, 61440),
    Tier::new(16, 106496),
    Tier::new(24, 92160),
    Tier::new(24, 159744),
    Tier::new(32, 122880),
    Tier::new(32, 212992),
    Tier::new(48, 184320),
    Tier::new(48, 319488),
    Tier::new(64, 245760),
    Tier::new(64, 425984),
    Tier::new(80, 307200),
    Tier::new(80, 532480),
    Tier::new(96, 368640),
    Tier::new(96, 638976),
];

/// First known tier strictly above `(vcpu, memory_mb)`
pub fn find_next_above(vcpu: u32, memory_mb: u32) -> Option<Tier> {
    let query = Tier::new(vcpu, memory_mb);
    KNOWN_TIERS.iter().copied().find(|tier| *tier > query)
}

/// Last known tier strictly below `(vcpu, memory_mb)`
pub fn find_next_below(vcpu: u32, memory_mb: u32) -> Option<Tier> {
    let query = Tier::new(vcpu, memory_mb);
    KNOWN_TIERS.iter().rev().copied().find(|tier| *tier < query)
}

pub fn is_known(tier: Tier) -> bool {
    KNOWN_TIERS.binary_search(&tier).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lib::constraints::is_valid_tier;

    #[test]
    fn test_table_is_sorted_and_valid() {
        assert!(KNOWN_TIERS.windows(2).all(|w| w[0] < w[1]));
        for tier in KNOWN_TIERS.iter() {
            assert!(is_valid_tier(*tier), "{tier} should be valid");
        }
    }

    #[test]
    fn test_find_next_above() {
        assert_eq!(find_next_above(1, 3840), Some(Tier::new(2, 7680)));
        assert_eq!(find_next_above(0, 0), Some(Tier::new(1, 3840)));
        assert_eq!(find_next_above(4, 16000), Some(Tier::new(4, 26624)));
        assert_eq!(find_next_above(4, 26624), Some(Tier::new(6, 23040)));
        assert_eq!(find_next_above(96, 638976), None);
        assert_eq!(find_next_above(200, 0), None);
    }

    #[test]
    fn test_find_next_below() {
        assert_eq!(find_next_below(8, 53248), Some(Tier::new(8, 30720)));
        assert_eq!(find_next_below(8, 30720), Some(Tier::new(6, 39936)));
        assert_eq!(find_next_below(2, 7680), Some(Tier::new(1, 3840)));
        assert_eq!(find_next_below(1, 3840), None);
        assert_eq!(find_next_below(1, 0), None);
        assert_eq!(find_next_below(200, 0), Some(Tier::new(96, 638976)));
    }

    #[test]
    fn test_is_known() {
        assert!(is_known(Tier::new(24, 92160)));
        assert!(!is_known(Tier::new(24, 36864)));
    }
}
