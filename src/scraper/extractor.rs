// extractor.rs
use crate::domain::{Listing, SearchResult, Unit};
use crate::scraper::ExtractionError;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};

pub const DEFAULT_ORIGIN: &str = "https://suumo.jp";

// Page structure of the search-results list.
const CONDITION_SUMMARY: &str = "#js-condTop-panel";
const HIT_COUNT: &str = ".paginate_set-hit";
const LISTING: &str = "#js-bukkenList > ul.l-cassetteitem > li";
const LISTING_NAME: &str = ".cassetteitem_content-title";
const LISTING_ADDRESS: &str = ".cassetteitem_detail-col1";
const LISTING_TRANSIT: &str = ".cassetteitem_detail-col2 > .cassetteitem_detail-text";
const LISTING_AGE: &str = ".cassetteitem_detail-col3 > div:nth-child(1)";
const LISTING_FLOORS: &str = ".cassetteitem_detail-col3 > div:nth-child(2)";
const UNIT_ROW: &str = "div.cassetteitem-item > table.cassetteitem_other > tbody";
// The site really spells it with three s.
const UNIT_THUMBNAIL: &str = "div.casssetteitem_other-thumbnail > img";
const UNIT_FLOOR: &str = "td:nth-child(3)";
const UNIT_RENT: &str = ".cassetteitem_price--rent";
const UNIT_ADMIN: &str = ".cassetteitem_price--administration";
const UNIT_DEPOSIT: &str = ".cassetteitem_price--deposit";
const UNIT_GRATUITY: &str = ".cassetteitem_price--gratuity";
const UNIT_LAYOUT: &str = ".cassetteitem_madori";
const UNIT_AREA: &str = ".cassetteitem_menseki";
const CELL: &str = "td";
const LINK: &str = "a";
const PAGE_NUMBER: &str = ".pagination-parts > li";

// ASCII digits only; full-width counts are not a match.
const HIT_COUNT_PATTERN: &str = r"([0-9]+)件";

struct Selectors {
    condition_summary: Selector,
    hit_count: Selector,
    listing: Selector,
    listing_name: Selector,
    listing_address: Selector,
    listing_transit: Selector,
    listing_age: Selector,
    listing_floors: Selector,
    unit_row: Selector,
    unit_thumbnail: Selector,
    unit_floor: Selector,
    unit_rent: Selector,
    unit_admin: Selector,
    unit_deposit: Selector,
    unit_gratuity: Selector,
    unit_layout: Selector,
    unit_area: Selector,
    cell: Selector,
    link: Selector,
    page_number: Selector,
}

impl Selectors {
    fn compile() -> Result<Self, ExtractionError> {
        Ok(Self {
            condition_summary: selector(CONDITION_SUMMARY)?,
            hit_count: selector(HIT_COUNT)?,
            listing: selector(LISTING)?,
            listing_name: selector(LISTING_NAME)?,
            listing_address: selector(LISTING_ADDRESS)?,
            listing_transit: selector(LISTING_TRANSIT)?,
            listing_age: selector(LISTING_AGE)?,
            listing_floors: selector(LISTING_FLOORS)?,
            unit_row: selector(UNIT_ROW)?,
            unit_thumbnail: selector(UNIT_THUMBNAIL)?,
            unit_floor: selector(UNIT_FLOOR)?,
            unit_rent: selector(UNIT_RENT)?,
            unit_admin: selector(UNIT_ADMIN)?,
            unit_deposit: selector(UNIT_DEPOSIT)?,
            unit_gratuity: selector(UNIT_GRATUITY)?,
            unit_layout: selector(UNIT_LAYOUT)?,
            unit_area: selector(UNIT_AREA)?,
            cell: selector(CELL)?,
            link: selector(LINK)?,
            page_number: selector(PAGE_NUMBER)?,
        })
    }
}

fn selector(css: &str) -> Result<Selector, ExtractionError> {
    Selector::parse(css).map_err(|e| ExtractionError::Selector {
        selector: css.to_string(),
        reason: e.to_string(),
    })
}

/// Turns a search-results document into a `SearchResult`.
///
/// Holds the compiled selectors and the site origin used to absolutize
/// detail links; extraction itself is a pure function of the document.
pub struct ListingExtractor {
    origin: String,
    selectors: Selectors,
    hit_pattern: Regex,
}

impl ListingExtractor {
    pub fn new(origin: impl Into<String>) -> Result<Self, ExtractionError> {
        let hit_pattern =
            Regex::new(HIT_COUNT_PATTERN).map_err(|e| ExtractionError::Pattern(e.to_string()))?;

        Ok(Self {
            origin: origin.into().trim_end_matches('/').to_string(),
            selectors: Selectors::compile()?,
            hit_pattern,
        })
    }

    pub fn extract(&self, html: &str) -> Result<SearchResult, ExtractionError> {
        let document = Html::parse_document(html);
        let root = document.root_element();
        let sel = &self.selectors;

        let condition_summary = text_of(root, &sel.condition_summary);
        let hit_count = self.parse_hit_count(&text_of(root, &sel.hit_count))?;

        let listings: Vec<Listing> = root
            .select(&sel.listing)
            .map(|container| self.extract_listing(container))
            .collect();

        let total_pages = self.parse_max_page(root)?;

        if listings.is_empty() && hit_count > 0 {
            warn!(hit_count, "Hit count is positive but no listing containers were found");
        }
        debug!(
            hit_count,
            total_pages,
            listings = listings.len(),
            "Extracted search result"
        );

        Ok(SearchResult {
            hit_count,
            condition_summary,
            total_pages,
            listings,
        })
    }

    /// First `<digits>件` in the text wins.
    pub fn parse_hit_count(&self, text: &str) -> Result<u32, ExtractionError> {
        let caps = self
            .hit_pattern
            .captures(text)
            .ok_or_else(|| ExtractionError::HitCountNotFound(text.to_string()))?;

        caps[1]
            .parse::<u32>()
            .map_err(|_| ExtractionError::InvalidHitCount(caps[1].to_string()))
    }

    fn parse_max_page(&self, root: ElementRef) -> Result<u32, ExtractionError> {
        let last = root
            .select(&self.selectors.page_number)
            .last()
            .map(|li| li.text().collect::<String>())
            .unwrap_or_default();
        let last = last.trim();

        match last.parse::<u32>() {
            Ok(n) if n >= 1 => Ok(n),
            _ => Err(ExtractionError::InvalidPageNumber(last.to_string())),
        }
    }

    fn extract_listing(&self, container: ElementRef) -> Listing {
        let sel = &self.selectors;

        let nearest_transit_options = container
            .select(&sel.listing_transit)
            .map(|el| el.text().collect::<String>().trim().to_string())
            .collect();

        let units = container
            .select(&sel.unit_row)
            .map(|row| self.extract_unit(row))
            .collect();

        Listing {
            name: text_of(container, &sel.listing_name),
            address: text_of(container, &sel.listing_address),
            nearest_transit_options,
            building_age: text_of(container, &sel.listing_age),
            total_floors: text_of(container, &sel.listing_floors),
            units,
        }
    }

    fn extract_unit(&self, row: ElementRef) -> Unit {
        let sel = &self.selectors;

        let thumbnail_url = row
            .select(&sel.unit_thumbnail)
            .next()
            .and_then(|img| img.value().attr("src"))
            .map(|src| src.trim().to_string());

        let detail_url = row
            .select(&sel.cell)
            .last()
            .and_then(|td| td.select(&sel.link).next())
            .and_then(|a| a.value().attr("href"))
            .map(|href| self.absolute_url(href.trim()));

        Unit {
            thumbnail_url,
            floor: text_of(row, &sel.unit_floor),
            layout: text_of(row, &sel.unit_layout),
            area: text_of(row, &sel.unit_area),
            rent: text_of(row, &sel.unit_rent),
            management_fee: text_of(row, &sel.unit_admin),
            deposit: text_of(row, &sel.unit_deposit),
            key_money: text_of(row, &sel.unit_gratuity),
            detail_url,
        }
    }

    fn absolute_url(&self, href: &str) -> String {
        if url::Url::parse(href).is_ok() {
            return href.to_string();
        }
        if href.starts_with('/') {
            format!("{}{}", self.origin, href)
        } else {
            format!("{}/{}", self.origin, href)
        }
    }
}

/// Concatenated text of every match under `el`, trimmed.
fn text_of(el: ElementRef, selector: &Selector) -> String {
    el.select(selector)
        .flat_map(|m| m.text())
        .collect::<String>()
        .trim()
        .to_string()
}
