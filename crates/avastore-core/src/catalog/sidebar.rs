use super::models::Product;

/// Pick the whitelisted products in whitelist order
///
/// Names match case-insensitively after trimming. Whitelist entries with no
/// matching product are skipped; the first product wins on duplicate names.
pub fn select_whitelisted<'a>(products: &'a [Product], whitelist: &[String]) -> Vec<&'a Product> {
    whitelist
        .iter()
        .filter_map(|allowed| {
            let allowed = allowed.trim().to_lowercase();
            products
                .iter()
                .find(|product| product.name.trim().to_lowercase() == allowed)
        })
        .collect()
}
