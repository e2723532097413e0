//! Static fallback product list, used by the scan flow when the catalog
//! lookup cannot be reached. Mirrors the seeded `items` table with the extra
//! display fields the product page shows.

use lazy_static::lazy_static;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FallbackProduct {
    pub barcode: i64,
    pub name: &'static str,
    pub brand: &'static str,
    pub size: &'static str,
    pub category: &'static str,
    pub points: i64,
    pub cashback_percent: i64,
    pub healthy: bool,
    pub price: Decimal,
}

fn product(
    barcode: i64,
    name: &'static str,
    brand: &'static str,
    size: &'static str,
    category: &'static str,
    points: i64,
    cashback_percent: i64,
    healthy: bool,
    price: Decimal,
) -> FallbackProduct {
    FallbackProduct {
        barcode,
        name,
        brand,
        size,
        category,
        points,
        cashback_percent,
        healthy,
        price,
    }
}

lazy_static! {
    pub static ref FALLBACK_PRODUCTS: Vec<FallbackProduct> = vec![
        product(5700000000001, "Organic Apples", "FreshCo", "1kg", "Produce", 8, 5, true, dec!(24.50)),
        product(5700000000002, "Bananas", "FreshCo", "1kg", "Produce", 6, 5, true, dec!(18.00)),
        product(5700000000003, "Whole Grain Bread", "BakeHouse", "500g", "Bakery", 7, 5, true, dec!(22.50)),
        product(5700000000004, "Low Fat Milk 1L", "Nordic Dairy", "1L", "Dairy", 5, 5, true, dec!(14.00)),
        product(5700000000005, "Greek Yogurt", "Nordic Dairy", "500g", "Dairy", 6, 5, true, dec!(16.00)),
        product(5700000000006, "Oatmeal", "PantryCo", "500g", "Pantry", 7, 5, true, dec!(20.00)),
        product(5700000000007, "Brown Rice", "PantryCo", "1kg", "Pantry", 6, 5, true, dec!(19.50)),
        product(5700000000008, "Peanut Butter", "PantryCo", "350g", "Pantry", 4, 5, true, dec!(28.00)),
        product(5700000000009, "Mixed Salad", "FreshCo", "250g", "Produce", 9, 5, true, dec!(25.00)),
        product(5700000000010, "Chicken Breast", "Butchers Best", "400g", "Meat", 8, 5, true, dec!(39.00)),
        product(5700000000011, "Salmon Fillet", "Ocean Market", "300g", "Seafood", 10, 5, true, dec!(49.00)),
        product(5700000000012, "Sparkling Water", "Sparkle", "1L", "Beverage", 2, 5, true, dec!(10.00)),
        product(5700000000013, "Orange Juice", "Citrus Co", "1L", "Beverage", 4, 5, true, dec!(24.00)),
        product(5700000000014, "Protein Bar", "FitFuel", "60g", "Snack", 3, 5, true, dec!(18.00)),
        product(5700000000015, "Chocolate Bar", "SweetCo", "50g", "Snack", 1, 0, false, dec!(14.00)),
        product(5700000000016, "Potato Chips", "CrunchCo", "150g", "Snack", 1, 0, false, dec!(22.00)),
        product(5700000000017, "Tomato Soup", "PantryCo", "400g", "Pantry", 4, 5, true, dec!(17.50)),
        product(5700000000018, "Frozen Vegetables", "Frostline", "500g", "Frozen", 6, 5, true, dec!(21.00)),
        product(5700000000019, "Cheddar Cheese", "Nordic Dairy", "200g", "Dairy", 3, 0, false, dec!(26.00)),
        product(5700000000020, "Granola", "PantryCo", "400g", "Pantry", 5, 5, true, dec!(27.00)),
    ];
}

pub fn find_fallback(barcode: i64) -> Option<&'static FallbackProduct> {
    FALLBACK_PRODUCTS.iter().find(|p| p.barcode == barcode)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_has_twenty_products() {
        assert_eq!(FALLBACK_PRODUCTS.len(), 20);
    }

    #[test]
    fn finds_known_barcode() {
        let apples = find_fallback(5700000000001).expect("apples in fallback list");
        assert_eq!(apples.name, "Organic Apples");
        assert_eq!(apples.points, 8);
        assert_eq!(apples.price, dec!(24.50));
        assert!(apples.healthy);
    }

    #[test]
    fn unknown_barcode_is_none() {
        assert!(find_fallback(9999999999999).is_none());
    }

    #[test]
    fn unhealthy_products_earn_no_cashback() {
        for product in FALLBACK_PRODUCTS.iter().filter(|p| !p.healthy) {
            assert_eq!(product.cashback_percent, 0, "{}", product.name);
        }
    }
}
