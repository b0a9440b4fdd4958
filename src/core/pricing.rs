//! Total price computation.
//!
//! Prices are a pure function of the selection: the package's per-attendee
//! rate times the attendee count, plus priced add-ons. Bites chosen inside
//! package quotas carry no incremental price - they are covered by the
//! per-attendee rate regardless of which items fill the quota. That is a
//! deliberate catalog property, not an omission.

use crate::{
    catalog::{Catalog, Money, Package},
    core::selection::Selection,
    errors::Result,
};

/// Effective per-attendee rate for a package: the Nespresso rate when the
/// upgrade is active and the package prices one, the base rate otherwise.
#[must_use]
pub fn price_per_attendee(package: &Package, use_nespresso: bool) -> Money {
    if use_nespresso {
        package
            .nespresso_price_per_attendee
            .unwrap_or(package.base_price_per_attendee)
    } else {
        package.base_price_per_attendee
    }
}

/// Computes the order total for a selection.
///
/// `total = per_attendee_rate * attendee_count + Σ addon_qty * addon_price`.
/// Add-on names the catalog does not know contribute nothing.
///
/// # Errors
///
/// Returns [`Error::UnknownPackage`](crate::errors::Error::UnknownPackage)
/// when the selection references a package missing from the catalog.
pub fn compute_total_price(catalog: &Catalog, selection: &Selection) -> Result<Money> {
    let package = catalog.require_package(&selection.package_id)?;
    let mut total = price_per_attendee(package, selection.use_nespresso)
        * Money::from(selection.attendee_count);

    for (name, quantity) in &selection.addon_quantities {
        if let Some(addon) = catalog.addon(name) {
            total += addon.unit_price * Money::from(*quantity);
        }
    }

    Ok(total)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::catalog::Category;
    use crate::core::selection::{
        adjust_addon_quantity, adjust_item_quantity, set_attendee_count, set_nespresso,
        start_selection,
    };
    use crate::test_utils::*;

    #[test]
    fn test_base_price_scales_with_attendees() {
        let catalog = fixture_catalog();
        let mut selection = start_selection(&catalog, "sin-nespresso").unwrap();
        set_attendee_count(&mut selection, 20);

        // No quotas, no selections: base rate times headcount
        assert_eq!(
            compute_total_price(&catalog, &selection).unwrap(),
            2300 * 20
        );
    }

    #[test]
    fn test_nespresso_rate_applies_when_active() {
        let catalog = fixture_catalog();
        let mut selection = start_selection(&catalog, "basico").unwrap();
        set_attendee_count(&mut selection, 10);
        assert_eq!(compute_total_price(&catalog, &selection).unwrap(), 4000 * 10);

        set_nespresso(&catalog, &mut selection, true).unwrap();
        assert_eq!(compute_total_price(&catalog, &selection).unwrap(), 5800 * 10);
    }

    #[test]
    fn test_addons_add_linearly() {
        let catalog = fixture_catalog();
        let mut selection = start_selection(&catalog, "basico").unwrap();
        set_attendee_count(&mut selection, 2);
        adjust_addon_quantity(&catalog, &mut selection, "Agua Mineral Chica", 3);
        adjust_addon_quantity(&catalog, &mut selection, "Jugo Cepita x Litro", 1);

        let expected = 4000 * 2 + 1560 * 3 + 2600;
        assert_eq!(compute_total_price(&catalog, &selection).unwrap(), expected);
    }

    #[test]
    fn test_exclusive_addon_priced_like_any_other() {
        let catalog = fixture_catalog();
        let mut selection = start_selection(&catalog, "basico").unwrap();
        adjust_addon_quantity(&catalog, &mut selection, "Jornada 6 hs", 1);

        assert_eq!(
            compute_total_price(&catalog, &selection).unwrap(),
            4000 + 23900
        );
    }

    #[test]
    fn test_item_composition_does_not_change_price() {
        let catalog = fixture_catalog();
        let mut first = start_selection(&catalog, "basico").unwrap();
        set_attendee_count(&mut first, 5);
        let mut second = first.clone();

        // Same filled quota, different bite composition
        adjust_item_quantity(&catalog, &mut first, Category::Factura, "Librito", 10).unwrap();
        adjust_item_quantity(&catalog, &mut second, Category::Factura, "Librito", 4).unwrap();
        adjust_item_quantity(&catalog, &mut second, Category::Factura, "Churrinche", 6).unwrap();

        assert_eq!(
            compute_total_price(&catalog, &first).unwrap(),
            compute_total_price(&catalog, &second).unwrap()
        );
    }

    #[test]
    fn test_unknown_package_errors() {
        let catalog = fixture_catalog();
        let mut selection = start_selection(&catalog, "basico").unwrap();
        selection.package_id = "gone".to_string();
        assert!(compute_total_price(&catalog, &selection).is_err());
    }
}
