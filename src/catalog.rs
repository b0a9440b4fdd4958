//! Catalog data model - Immutable menu items, packages, and add-ons.
//!
//! The catalog is constructed once at startup (from `catalog.toml` or a test
//! fixture) and injected into every engine operation. The engine never mutates
//! catalog data; price edits belong to the admin tooling, outside this crate.

use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Monetary amount in whole Argentine pesos. All catalog prices are final
/// (IVA included) integer amounts.
pub type Money = i64;

/// Formats a peso amount for display, with `.` as the thousands separator
/// (es-AR convention), e.g. `$19.200`.
#[must_use]
pub fn format_ars(amount: Money) -> String {
    let negative = amount < 0;
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }
    if negative {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}

/// Menu category a bite belongs to. Each `MenuItem` belongs to exactly one
/// category; package quotas are declared against categories (or pools of
/// categories).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Facturas (croissants and other pastries)
    Factura,
    /// Bocados simples dulces
    SweetSimple,
    /// Bocados simples salados
    SavorySimple,
    /// Bocados especiales dulces
    SweetSpecial,
    /// Bocados especiales salados
    SavorySpecial,
    /// Empanadas
    Empanada,
    /// Shots dulces (dessert shots)
    SweetShot,
    /// Bebidas incluidas en paquetes de bienvenida
    Beverage,
}

impl Category {
    /// Human-readable label used in quota diagnostics.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Factura => "Facturas",
            Self::SweetSimple => "Bocados Simples",
            Self::SavorySimple => "Bocados Salados Simples",
            Self::SweetSpecial => "Bocados Especiales Dulces",
            Self::SavorySpecial => "Bocados Especiales Salados",
            Self::Empanada => "Empanadas",
            Self::SweetShot => "Shots Dulces",
            Self::Beverage => "Bebidas",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single selectable bite in the menu.
///
/// Identity is the `(category, name)` pair: the same display name legitimately
/// appears in several categories (e.g. "Medialuna de Manteca" exists both as a
/// factura and as a bocado simple, at different unit prices).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    /// Category this item belongs to
    pub category: Category,
    /// Display name
    pub name: String,
    /// A-la-carte unit price. Informational: in-quota selections carry no
    /// incremental price, they are covered by the package's per-attendee rate.
    pub unit_price: Money,
    /// Sin TACC flag
    #[serde(default)]
    pub gluten_free: bool,
}

/// An optional extra sold alongside a package (drinks, trays, support staff).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Addon {
    /// Display name
    pub name: String,
    /// Price per unit
    pub unit_price: Money,
    /// Billing unit shown next to the price (e.g. "litro", "unidad")
    pub unit: Option<String>,
    /// Add-ons sharing a group are mutually exclusive: at most one member may
    /// have a non-zero quantity. Used for the support-staff shift options.
    pub exclusive_group: Option<String>,
}

/// The quota scope a package declares a required unit count against.
///
/// Replaces the source data's key-name convention (a `...TotalCount` marker
/// substring meaning "mixed pool") with an explicit tagged representation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuotaScope {
    /// Units required from a single category
    Category(Category),
    /// Units required in total, freely distributed across the member
    /// categories ("Mixto" packages)
    Pool {
        /// Stable identifier for the pool (e.g. "especiales-mixto")
        id: String,
        /// Categories the pool draws from; always two or more
        members: BTreeSet<Category>,
    },
}

impl QuotaScope {
    /// Whether `category` is governed by this scope.
    #[must_use]
    pub fn governs(&self, category: Category) -> bool {
        match self {
            Self::Category(c) => *c == category,
            Self::Pool { members, .. } => members.contains(&category),
        }
    }

    /// Label used in validation messages.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Category(c) => c.label().to_string(),
            Self::Pool { id, .. } => id.clone(),
        }
    }
}

/// A required unit count per attendee, against a category or a pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotaEntry {
    /// Scope the requirement is counted against
    pub scope: QuotaScope,
    /// Required units per attendee
    pub per_attendee: u32,
}

/// A bookable package: a per-attendee base price plus the bite quotas the
/// price includes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    /// Stable package id (e.g. "C4")
    pub id: String,
    /// Display name
    pub name: String,
    /// Marketing description
    pub description: String,
    /// Price per attendee with filter coffee
    pub base_price_per_attendee: Money,
    /// Price per attendee with the Nespresso upgrade, if offered
    pub nespresso_price_per_attendee: Option<Money>,
    /// Packages that only come with Nespresso (the toggle is locked on)
    #[serde(default)]
    pub force_nespresso: bool,
    /// Bite quotas included in the per-attendee price
    #[serde(default)]
    pub quotas: Vec<QuotaEntry>,
}

impl Package {
    /// Total required units per attendee across all quota scopes.
    #[must_use]
    pub fn required_units_per_attendee(&self) -> u32 {
        self.quotas.iter().map(|q| q.per_attendee).sum()
    }

    /// Whether guests pick any bites at all for this package.
    #[must_use]
    pub fn has_item_selection(&self) -> bool {
        self.quotas.iter().any(|q| q.per_attendee > 0)
    }
}

/// The full immutable catalog: menu items, packages, and add-ons, with the
/// category-to-quota-scope resolution precomputed per package.
#[derive(Debug, Clone)]
pub struct Catalog {
    items: Vec<MenuItem>,
    packages: Vec<Package>,
    addons: Vec<Addon>,
    // package id -> (category -> index into that package's quotas)
    scope_index: BTreeMap<String, BTreeMap<Category, usize>>,
}

impl Catalog {
    /// Builds a catalog, validating structural invariants and resolving each
    /// package's category-to-scope mapping once, up front.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Catalog`] when package ids collide, a pool has fewer
    /// than two member categories, or a category is governed by more than one
    /// quota scope of the same package.
    pub fn new(items: Vec<MenuItem>, packages: Vec<Package>, addons: Vec<Addon>) -> Result<Self> {
        let mut scope_index = BTreeMap::new();

        for package in &packages {
            let mut by_category: BTreeMap<Category, usize> = BTreeMap::new();
            for (idx, entry) in package.quotas.iter().enumerate() {
                let governed: Vec<Category> = match &entry.scope {
                    QuotaScope::Category(c) => vec![*c],
                    QuotaScope::Pool { id, members } => {
                        if members.len() < 2 {
                            return Err(Error::Catalog {
                                message: format!(
                                    "package {}: pool '{id}' needs at least two member categories",
                                    package.id
                                ),
                            });
                        }
                        members.iter().copied().collect()
                    }
                };
                for category in governed {
                    if by_category.insert(category, idx).is_some() {
                        return Err(Error::Catalog {
                            message: format!(
                                "package {}: category {category} is governed by more than one quota scope",
                                package.id
                            ),
                        });
                    }
                }
            }
            if scope_index.insert(package.id.clone(), by_category).is_some() {
                return Err(Error::Catalog {
                    message: format!("duplicate package id: {}", package.id),
                });
            }
        }

        let mut seen_items = BTreeSet::new();
        for item in &items {
            if !seen_items.insert((item.category, item.name.clone())) {
                return Err(Error::Catalog {
                    message: format!("duplicate menu item: {} ({})", item.name, item.category),
                });
            }
        }

        let mut seen_addons = BTreeSet::new();
        for addon in &addons {
            if !seen_addons.insert(addon.name.clone()) {
                return Err(Error::Catalog {
                    message: format!("duplicate addon: {}", addon.name),
                });
            }
        }

        Ok(Self {
            items,
            packages,
            addons,
            scope_index,
        })
    }

    /// All menu items.
    #[must_use]
    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    /// All packages, in catalog order.
    #[must_use]
    pub fn packages(&self) -> &[Package] {
        &self.packages
    }

    /// All add-ons.
    #[must_use]
    pub fn addons(&self) -> &[Addon] {
        &self.addons
    }

    /// Looks up a package by id.
    #[must_use]
    pub fn package(&self, id: &str) -> Option<&Package> {
        self.packages.iter().find(|p| p.id == id)
    }

    /// Looks up a package by id, failing with [`Error::UnknownPackage`].
    pub fn require_package(&self, id: &str) -> Result<&Package> {
        self.package(id).ok_or_else(|| Error::UnknownPackage {
            id: id.to_string(),
        })
    }

    /// Looks up a menu item by its `(category, name)` identity.
    #[must_use]
    pub fn item(&self, category: Category, name: &str) -> Option<&MenuItem> {
        self.items
            .iter()
            .find(|i| i.category == category && i.name == name)
    }

    /// Menu items of one category, in catalog order.
    pub fn items_in(&self, category: Category) -> impl Iterator<Item = &MenuItem> {
        self.items.iter().filter(move |i| i.category == category)
    }

    /// Looks up an add-on by name.
    #[must_use]
    pub fn addon(&self, name: &str) -> Option<&Addon> {
        self.addons.iter().find(|a| a.name == name)
    }

    /// All add-ons in an exclusive group.
    pub fn addons_in_group<'a>(&'a self, group: &'a str) -> impl Iterator<Item = &'a Addon> {
        self.addons
            .iter()
            .filter(move |a| a.exclusive_group.as_deref() == Some(group))
    }

    /// The quota entry governing `category` for the given package, resolved
    /// from the index precomputed at construction. `None` means items of that
    /// category are not selectable under this package.
    #[must_use]
    pub fn governing_quota(&self, package_id: &str, category: Category) -> Option<&QuotaEntry> {
        let package = self.package(package_id)?;
        let idx = self.scope_index.get(package_id)?.get(&category)?;
        package.quotas.get(*idx)
    }
}
