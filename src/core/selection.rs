//! Selection state and its mutation operations.
//!
//! A [`Selection`] is the session-scoped, mutable order-in-progress: the
//! chosen package, attendee count, and bite/add-on quantities. All mutations
//! here preserve the quota invariant: no call sequence can push a quota
//! scope's running total above `per_attendee * attendee_count`.

use crate::{
    catalog::{Catalog, Category},
    errors::Result,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Identity of a menu item inside a selection. The same display name can
/// exist in several categories, so the category is part of the key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemKey {
    /// Category the quantity was entered under
    pub category: Category,
    /// Item display name
    pub name: String,
}

impl ItemKey {
    /// Builds a key from a category and name.
    pub fn new(category: Category, name: impl Into<String>) -> Self {
        Self {
            category,
            name: name.into(),
        }
    }
}

/// The mutable order-in-progress for one form session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    /// Id of the active package
    pub package_id: String,
    /// Whether the Nespresso upgrade is active (locked on for packages that
    /// force it)
    pub use_nespresso: bool,
    /// Number of attendees, always >= 1
    pub attendee_count: u32,
    /// Chosen bite quantities, sparse (absent key means zero)
    pub item_quantities: BTreeMap<ItemKey, u32>,
    /// Chosen add-on quantities, sparse
    pub addon_quantities: BTreeMap<String, u32>,
}

impl Selection {
    /// Quantity currently selected for an item, zero when absent.
    #[must_use]
    pub fn item_quantity(&self, category: Category, name: &str) -> u32 {
        self.item_quantities
            .iter()
            .find(|(k, _)| k.category == category && k.name == name)
            .map_or(0, |(_, qty)| *qty)
    }

    /// Quantity currently selected for an add-on, zero when absent.
    #[must_use]
    pub fn addon_quantity(&self, name: &str) -> u32 {
        self.addon_quantities.get(name).copied().unwrap_or(0)
    }

    /// Sum of item quantities belonging to any of the categories for which
    /// `governs` returns true.
    #[must_use]
    pub fn scope_total(&self, governs: impl Fn(Category) -> bool) -> u64 {
        self.item_quantities
            .iter()
            .filter(|(k, _)| governs(k.category))
            .map(|(_, qty)| u64::from(*qty))
            .sum()
    }

    /// Total item units selected across every category.
    #[must_use]
    pub fn total_items_selected(&self) -> u64 {
        self.item_quantities.values().map(|q| u64::from(*q)).sum()
    }
}

/// Creates a fresh selection for a package: zero quantities, one attendee,
/// Nespresso on only when the package forces it.
///
/// # Errors
///
/// Returns [`Error::UnknownPackage`](crate::errors::Error::UnknownPackage)
/// for an id the catalog does not contain.
pub fn start_selection(catalog: &Catalog, package_id: &str) -> Result<Selection> {
    let package = catalog.require_package(package_id)?;
    Ok(Selection {
        package_id: package.id.clone(),
        use_nespresso: package.force_nespresso,
        attendee_count: 1,
        item_quantities: BTreeMap::new(),
        addon_quantities: BTreeMap::new(),
    })
}

/// Switches the selection to another package.
///
/// Item quantities are reset to zero - quota structure differs across
/// packages, so prior bite choices never carry over. Add-on quantities and
/// the attendee count are preserved. The Nespresso toggle is re-derived:
/// locked on for forced packages, otherwise off.
///
/// # Errors
///
/// Returns [`Error::UnknownPackage`](crate::errors::Error::UnknownPackage)
/// for an id the catalog does not contain; the selection is left untouched.
pub fn select_package(catalog: &Catalog, selection: &mut Selection, package_id: &str) -> Result<()> {
    let package = catalog.require_package(package_id)?;
    selection.package_id = package.id.clone();
    selection.use_nespresso = package.force_nespresso;
    selection.item_quantities.clear();
    Ok(())
}

/// Sets the attendee count, clamping to a minimum of one.
///
/// Quota targets scale with the attendee count, but existing item quantities
/// are not rescaled: a previously valid selection may become under- or
/// over-quota and must pass [`validate_selection`](super::validate::validate_selection)
/// again before submit.
pub fn set_attendee_count(selection: &mut Selection, count: i64) {
    selection.attendee_count = u32::try_from(count.max(1)).unwrap_or(u32::MAX);
}

/// Turns the Nespresso upgrade on or off.
///
/// No-op for packages without the option; packages that force Nespresso
/// cannot turn it off.
pub fn set_nespresso(catalog: &Catalog, selection: &mut Selection, enabled: bool) -> Result<()> {
    let package = catalog.require_package(&selection.package_id)?;
    if package.force_nespresso {
        selection.use_nespresso = true;
    } else if package.nespresso_price_per_attendee.is_some() {
        selection.use_nespresso = enabled;
    }
    Ok(())
}

/// Adjusts one item's quantity by a signed delta, saturating against the
/// governing quota scope.
///
/// The scope is the item's dedicated category quota, or the pool quota its
/// category participates in for the active package. Increments absorb only
/// the scope's remaining headroom (a `+5` near the cap may land as `+1`);
/// decrements are honored in full down to zero. Items whose category has no
/// quota under the active package, and names the catalog does not know, are
/// not selectable: the call is a no-op.
///
/// # Errors
///
/// Returns [`Error::UnknownPackage`](crate::errors::Error::UnknownPackage)
/// when the selection references a package missing from the catalog.
pub fn adjust_item_quantity(
    catalog: &Catalog,
    selection: &mut Selection,
    category: Category,
    name: &str,
    delta: i64,
) -> Result<()> {
    let package = catalog.require_package(&selection.package_id)?;
    if catalog.item(category, name).is_none() {
        return Ok(());
    }
    let Some(entry) = catalog.governing_quota(&package.id, category) else {
        return Ok(());
    };
    let scope_max = i64::from(entry.per_attendee) * i64::from(selection.attendee_count);
    if scope_max == 0 {
        return Ok(());
    }

    let current = i64::from(selection.item_quantity(category, name));
    let scope = entry.scope.clone();
    let scope_total = selection.scope_total(|c| scope.governs(c)) as i64;
    let others = scope_total - current;

    let mut new_qty = (current + delta).max(0);
    if delta > 0 && others + new_qty > scope_max {
        // Absorb the remaining headroom only. When the attendee count was
        // lowered after the fact the scope may already sit over its max; an
        // increment is then a no-op rather than a silent reduction.
        new_qty = (scope_max - others).max(current);
    }

    let key = ItemKey::new(category, name);
    if new_qty == 0 {
        selection.item_quantities.remove(&key);
    } else {
        selection
            .item_quantities
            .insert(key, u32::try_from(new_qty).unwrap_or(u32::MAX));
    }
    Ok(())
}

/// Adjusts one add-on's quantity by a signed delta.
///
/// Ordinary add-ons clamp at zero and grow without bound. Add-ons in an
/// exclusive group hold at most quantity one, and an increment from zero
/// zeroes every other member of the group in the same update; a decrement
/// clears only the add-on itself. Unknown names are a no-op.
pub fn adjust_addon_quantity(
    catalog: &Catalog,
    selection: &mut Selection,
    name: &str,
    delta: i64,
) {
    let Some(addon) = catalog.addon(name) else {
        return;
    };
    let current = selection.addon_quantity(name);

    if let Some(group) = addon.exclusive_group.as_deref() {
        if delta > 0 && current == 0 {
            let siblings: Vec<String> = catalog
                .addons_in_group(group)
                .map(|a| a.name.clone())
                .collect();
            for sibling in siblings {
                selection.addon_quantities.remove(&sibling);
            }
            selection.addon_quantities.insert(addon.name.clone(), 1);
        } else if delta < 0 {
            selection.addon_quantities.remove(name);
        }
        return;
    }

    let new_qty = (i64::from(current) + delta).max(0);
    if new_qty == 0 {
        selection.addon_quantities.remove(name);
    } else {
        selection
            .addon_quantities
            .insert(addon.name.clone(), u32::try_from(new_qty).unwrap_or(u32::MAX));
    }
}

/// Zeroes all item and add-on quantities. Called by the owner of the
/// selection after a successful submission.
pub fn clear_quantities(selection: &mut Selection) {
    selection.item_quantities.clear();
    selection.addon_quantities.clear();
}
