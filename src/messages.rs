// src/messages.rs
//
// Plain-text rendering of listings for the notification payload.

use crate::domain::{Listing, Unit};

pub const LISTING_SEPARATOR: &str =
    "\n------------------------------------------------------------\n";
const UNIT_SEPARATOR: &str = "\n     ----------\n";

/// One unit as an indented bullet block. The thumbnail is left out: it is
/// usually an inline data URI.
pub fn format_unit(unit: &Unit) -> String {
    let rows = [
        format!("    - 階: {}", unit.floor),
        format!("    - 間取り: {}", unit.layout),
        format!("    - 面積: {}", unit.area),
        format!("    - 家賃: {}", unit.rent),
        format!("    - 管理費: {}", unit.management_fee),
        format!("    - 礼金: {}", unit.key_money),
        format!("    - 敷金: {}", unit.deposit),
        format!("    - URL: {}", unit.detail_url.as_deref().unwrap_or("")),
    ];
    rows.join("\n")
}

pub fn format_listing(listing: &Listing) -> String {
    let units = listing
        .units
        .iter()
        .map(format_unit)
        .collect::<Vec<_>>()
        .join(UNIT_SEPARATOR);

    format!(
        "物件名: {}\n所在地: {}\n最寄り: {}\n築年: {}\n階建: {}\n部屋:\n{}",
        listing.name,
        listing.address,
        listing.nearest_transit_options.join(", "),
        listing.building_age,
        listing.total_floors,
        units
    )
}

pub fn format_batch<'a, I>(listings: I) -> String
where
    I: IntoIterator<Item = &'a Listing>,
{
    listings
        .into_iter()
        .map(format_listing)
        .collect::<Vec<_>>()
        .join(LISTING_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(floor: &str, url: Option<&str>) -> Unit {
        Unit {
            thumbnail_url: Some("data:image/gif;base64,R0lGOD".to_string()),
            floor: floor.to_string(),
            layout: "1K".to_string(),
            area: "25m2".to_string(),
            rent: "10万円".to_string(),
            management_fee: "5000円".to_string(),
            deposit: "-".to_string(),
            key_money: "10万円".to_string(),
            detail_url: url.map(str::to_string),
        }
    }

    fn listing(name: &str, units: Vec<Unit>) -> Listing {
        Listing {
            name: name.to_string(),
            address: "東京都渋谷区".to_string(),
            nearest_transit_options: vec![
                "JR山手線/渋谷駅 歩5分".to_string(),
                "京王井の頭線/神泉駅 歩8分".to_string(),
            ],
            building_age: "築10年".to_string(),
            total_floors: "5階建".to_string(),
            units,
        }
    }

    #[test]
    fn unit_block_has_fixed_rows_and_no_thumbnail() {
        let text = format_unit(&unit("2階", Some("https://suumo.jp/chintai/x/")));

        assert_eq!(
            text,
            concat!(
                "    - 階: 2階\n",
                "    - 間取り: 1K\n",
                "    - 面積: 25m2\n",
                "    - 家賃: 10万円\n",
                "    - 管理費: 5000円\n",
                "    - 礼金: 10万円\n",
                "    - 敷金: -\n",
                "    - URL: https://suumo.jp/chintai/x/",
            )
        );
        assert!(!text.contains("data:image"));
    }

    #[test]
    fn missing_url_renders_empty() {
        assert!(format_unit(&unit("1階", None)).ends_with("    - URL: "));
    }

    #[test]
    fn listing_block_joins_transit_and_units() {
        let text = format_listing(&listing(
            "Sakura Heights",
            vec![unit("1階", None), unit("3階", None)],
        ));

        assert!(text.starts_with("物件名: Sakura Heights\n所在地: 東京都渋谷区\n"));
        assert!(text.contains("最寄り: JR山手線/渋谷駅 歩5分, 京王井の頭線/神泉駅 歩8分\n"));
        assert!(text.contains("築年: 築10年\n階建: 5階建\n部屋:\n    - 階: 1階"));
        assert_eq!(text.matches(UNIT_SEPARATOR).count(), 1);
    }

    #[test]
    fn batch_separates_listings() {
        let listings = vec![listing("A", vec![]), listing("B", vec![]), listing("C", vec![])];
        let text = format_batch(&listings);

        let parts: Vec<_> = text.split(LISTING_SEPARATOR).collect();
        assert_eq!(parts.len(), 3);
        assert!(parts[1].starts_with("物件名: B"));
    }

    #[test]
    fn empty_batch_is_empty_text() {
        assert_eq!(format_batch(Vec::<&Listing>::new()), "");
    }
}
