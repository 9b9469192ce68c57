//! Item slot lookup from Wowhead XML tooltips
//!
//! QE Live exports name items but not their slots. The slot is looked up by
//! item name; the response carries an `<inventorySlot>` element with the
//! slot wording ("Finger", "Two-Hand", ...), which the content tables
//! standardise.

use once_cell::sync::Lazy;
use regex::Regex;

static INVENTORY_SLOT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<inventorySlot[^>]*>(?:<!\[CDATA\[)?([^<\]]+)").unwrap());

/// XML tooltip URL for an item name (item level stripped)
pub fn lookup_url(item_name: &str) -> String {
    format!(
        "https://www.wowhead.com/item={}&xml",
        urlencoding::encode(item_name.trim())
    )
}

/// Slot wording from an XML tooltip; `None` when the item wasn't found
pub fn parse_inventory_slot(xml: &str) -> Option<String> {
    INVENTORY_SLOT
        .captures(xml)
        .map(|caps| caps[1].trim().to_string())
        .filter(|slot| !slot.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_url() {
        assert_eq!(
            lookup_url("Ring of Power"),
            "https://www.wowhead.com/item=Ring%20of%20Power&xml"
        );
        assert_eq!(
            lookup_url("Harlan's Loaded Dice"),
            "https://www.wowhead.com/item=Harlan%27s%20Loaded%20Dice&xml"
        );
    }

    #[test]
    fn test_parse_inventory_slot() {
        let xml = r#"<wowhead><item id="1"><name><![CDATA[Ring of Power]]></name><level>441</level><inventorySlot id="11">Finger</inventorySlot></item></wowhead>"#;
        assert_eq!(parse_inventory_slot(xml).as_deref(), Some("Finger"));

        let cdata = r#"<item><inventorySlot id="17"><![CDATA[Two-Hand]]></inventorySlot></item>"#;
        assert_eq!(parse_inventory_slot(cdata).as_deref(), Some("Two-Hand"));
    }

    #[test]
    fn test_unknown_item() {
        assert_eq!(parse_inventory_slot("<wowhead><error>Item not found!</error></wowhead>"), None);
    }
}
