//! EARFCN to RATPRIO lookup
//!
//! Reselection priority per LTE carrier, as agreed with the radio planning
//! team. Anything not in the table gets the default priority.

/// Priority 6 carriers.
const RATPRIO_6: [u32; 7] = [5060, 5070, 5145, 5815, 2435, 2436, 2426];

/// Priority 5 carriers.
const RATPRIO_5: [u32; 9] = [2050, 2025, 2000, 2350, 675, 700, 1025, 1075, 1050];

/// Priority 4 carriers (same as the default, listed for traceability
/// against the frequency plan).
const RATPRIO_4: [u32; 4] = [3050, 3150, 2950, 2900];

/// Priority for carriers absent from the frequency plan.
pub const RATPRIO_DEFAULT: u8 = 4;

/// Return the RATPRIO value for an EARFCN.
pub fn get_ratprio(earfcn: u32) -> u8 {
    if RATPRIO_6.contains(&earfcn) {
        6
    } else if RATPRIO_5.contains(&earfcn) {
        5
    } else if RATPRIO_4.contains(&earfcn) {
        4
    } else {
        RATPRIO_DEFAULT
    }
}
