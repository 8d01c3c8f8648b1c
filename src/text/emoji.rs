//! Pictographic character counting

use std::ops::RangeInclusive;

/// Unicode ranges counted as pictographs.
const EMOJI_RANGES: &[RangeInclusive<u32>] = &[
    0x2600..=0x26FF,   // miscellaneous symbols
    0x2700..=0x27BF,   // dingbats
    0x1F1E6..=0x1F1FF, // regional indicators (flags)
    0x1F300..=0x1F5FF, // symbols and pictographs
    0x1F600..=0x1F64F, // emoticons
    0x1F680..=0x1F6FF, // transport and map symbols
    0x1F900..=0x1F9FF, // supplemental symbols and pictographs
    0x1FA70..=0x1FAFF, // symbols and pictographs extended-A
];

/// Count pictographic characters in `text`.
pub fn count_emoji(text: &str) -> usize {
    text.chars()
        .filter(|c| {
            let code = *c as u32;
            EMOJI_RANGES.iter().any(|r| r.contains(&code))
        })
        .count()
}
