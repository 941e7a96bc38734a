//! Static career rank ladder and upstream result shaping.
//!
//! The career ladder is fixed content: Recruit at the bottom, then fifteen
//! titles each split into six metals of three grades, then Hero at 272. The
//! upstream only reports a rank number; the labels here decorate it.

use std::collections::HashMap;

use serde_json::Value;

use crate::model::halo::{CareerRankDto, CsrSummary};
use crate::server::util::parse::parse_xuid;

const CAREER_TITLES: [&str; 15] = [
    "Cadet",
    "Private",
    "Lance Corporal",
    "Corporal",
    "Sergeant",
    "Staff Sergeant",
    "Gunnery Sergeant",
    "Master Sergeant",
    "Lieutenant",
    "Captain",
    "Major",
    "Lt Colonel",
    "Colonel",
    "Brigadier General",
    "General",
];

const CAREER_METALS: [&str; 6] = ["Bronze", "Silver", "Gold", "Platinum", "Diamond", "Onyx"];

/// Grades per metal within a title.
const GRADES_PER_METAL: i64 = 3;
const RANKS_PER_TITLE: i64 = 18;

/// The terminal rank above the title ladder.
const HERO_RANK: i64 = 272;

/// Maps a career rank number to its ladder label.
///
/// Ranks 0 and 1 are both Recruit (the upstream reports 0 for accounts that
/// have never progressed). Ranks 2 through 271 walk the title ladder; 272 is
/// Hero. Out-of-range ranks yield `None`.
pub fn career_rank_label(rank: i64) -> Option<String> {
    if rank < 0 || rank > HERO_RANK {
        return None;
    }
    if rank <= 1 {
        return Some("Recruit".to_string());
    }
    if rank == HERO_RANK {
        return Some("Hero".to_string());
    }

    let idx = rank - 2;
    let title = CAREER_TITLES[(idx / RANKS_PER_TITLE) as usize];
    let metal = CAREER_METALS[((idx % RANKS_PER_TITLE) / GRADES_PER_METAL) as usize];
    let grade = idx % GRADES_PER_METAL + 1;

    Some(format!("{} {} {}", title, metal, grade))
}

/// Shapes raw career rank entries into labelled summaries.
///
/// Entries whose id or rank cannot be read are skipped rather than failing
/// the whole batch.
pub fn shape_career_rank_entries(entries: &[Value]) -> Vec<CareerRankDto> {
    entries
        .iter()
        .filter_map(|entry| {
            let xuid = parse_xuid(entry["Id"].as_str()?)?;
            let progress = &entry["Result"]["CurrentProgress"];
            let rank = progress["Rank"].as_i64()?;
            let partial_progress = progress["PartialProgress"].as_i64().unwrap_or(0);

            Some(CareerRankDto {
                xuid,
                rank,
                label: career_rank_label(rank).unwrap_or_else(|| "Unknown".to_string()),
                partial_progress,
            })
        })
        .collect()
}

/// Shapes raw CSR entries into flattened summaries keyed by principal id.
///
/// Subtiers arrive 0-based and are exposed 1-based. Entries whose id cannot
/// be parsed are skipped.
pub fn shape_csr_entries(entries: &[Value]) -> HashMap<u64, CsrSummary> {
    entries
        .iter()
        .filter_map(|entry| {
            let xuid = parse_xuid(entry["Id"].as_str()?)?;
            let result = &entry["Result"];

            let (current_csr, current_tier, current_subtier) = csr_triple(&result["Current"]);
            let (current_reset_max_csr, current_reset_max_tier, current_reset_max_subtier) =
                csr_triple(&result["SeasonMax"]);
            let (all_time_max_csr, all_time_max_tier, all_time_max_subtier) =
                csr_triple(&result["AllTimeMax"]);

            let summary = CsrSummary {
                current_tier_description: tier_description(&current_tier, current_subtier),
                current_csr,
                current_tier,
                current_subtier,
                current_reset_max_tier_description: tier_description(
                    &current_reset_max_tier,
                    current_reset_max_subtier,
                ),
                current_reset_max_csr,
                current_reset_max_tier,
                current_reset_max_subtier,
                all_time_max_tier_description: tier_description(
                    &all_time_max_tier,
                    all_time_max_subtier,
                ),
                all_time_max_csr,
                all_time_max_tier,
                all_time_max_subtier,
            };

            Some((xuid, summary))
        })
        .collect()
}

fn csr_triple(node: &Value) -> (i64, String, i64) {
    let csr = node["Value"].as_i64().unwrap_or(-1);
    let tier = node["Tier"].as_str().unwrap_or_default().to_string();
    let subtier = node["SubTier"].as_i64().unwrap_or(0) + 1;

    (csr, tier, subtier)
}

/// Onyx has no subtiers; every other tier is shown with its 1-based subtier.
fn tier_description(tier: &str, subtier: i64) -> String {
    if tier == "Onyx" {
        "Onyx".to_string()
    } else {
        format!("{} {}", tier, subtier)
    }
}
