//! Catalog loading from catalog.toml
//!
//! The menu, package, and add-on price lists live in a TOML document rather
//! than in code, so a price update is a data change. The bundled
//! `catalog.toml` carries the canonical October 2025 price list; deployments
//! can point [`load_catalog`] at their own file.

use crate::catalog::{Addon, Catalog, Category, MenuItem, Package, QuotaEntry, QuotaScope};
use crate::errors::{Error, Result};
use serde::Deserialize;
use std::collections::BTreeSet;
use std::path::Path;

/// The canonical price list shipped with the crate.
const DEFAULT_CATALOG_TOML: &str = include_str!("../../catalog.toml");

/// Top-level structure of a catalog.toml document
#[derive(Debug, Deserialize)]
pub struct CatalogConfig {
    /// Menu items
    pub items: Vec<MenuItem>,
    /// Packages with their quota declarations
    pub packages: Vec<PackageConfig>,
    /// Optional add-ons
    pub addons: Vec<Addon>,
}

/// Configuration for a single package
#[derive(Debug, Deserialize)]
pub struct PackageConfig {
    /// Stable package id
    pub id: String,
    /// Display name
    pub name: String,
    /// Marketing description
    #[serde(default)]
    pub description: String,
    /// Price per attendee with filter coffee
    pub base_price: i64,
    /// Price per attendee with the Nespresso upgrade, if offered
    pub nespresso_price: Option<i64>,
    /// Whether the package only comes with Nespresso
    #[serde(default)]
    pub force_nespresso: bool,
    /// Quota declarations
    #[serde(default)]
    pub quotas: Vec<QuotaConfig>,
}

/// A quota declaration: either a dedicated category quota or a named pool
/// spanning several categories.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum QuotaConfig {
    /// `category = "factura", per_attendee = 2`
    Category {
        /// Governed category
        category: Category,
        /// Required units per attendee
        per_attendee: u32,
    },
    /// `pool = "especiales-mixto", members = [...], per_attendee = 4`
    Pool {
        /// Pool identifier
        pool: String,
        /// Member categories
        members: BTreeSet<Category>,
        /// Required units per attendee, total across members
        per_attendee: u32,
    },
}

impl From<QuotaConfig> for QuotaEntry {
    fn from(config: QuotaConfig) -> Self {
        match config {
            QuotaConfig::Category {
                category,
                per_attendee,
            } => Self {
                scope: QuotaScope::Category(category),
                per_attendee,
            },
            QuotaConfig::Pool {
                pool,
                members,
                per_attendee,
            } => Self {
                scope: QuotaScope::Pool { id: pool, members },
                per_attendee,
            },
        }
    }
}

impl From<PackageConfig> for Package {
    fn from(config: PackageConfig) -> Self {
        Self {
            id: config.id,
            name: config.name,
            description: config.description,
            base_price_per_attendee: config.base_price,
            nespresso_price_per_attendee: config.nespresso_price,
            force_nespresso: config.force_nespresso,
            quotas: config.quotas.into_iter().map(Into::into).collect(),
        }
    }
}

/// Parses a catalog from TOML text and runs the structural validation in
/// [`Catalog::new`].
///
/// # Errors
///
/// Returns [`Error::Catalog`] on TOML syntax errors, missing fields, or
/// catalogs violating a structural invariant.
pub fn parse_catalog(contents: &str) -> Result<Catalog> {
    let config: CatalogConfig = toml::from_str(contents).map_err(|e| Error::Catalog {
        message: format!("Failed to parse catalog TOML: {e}"),
    })?;

    Catalog::new(
        config.items,
        config.packages.into_iter().map(Into::into).collect(),
        config.addons,
    )
}

/// Loads a catalog from a TOML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or does not parse; see
/// [`parse_catalog`].
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<Catalog> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Catalog {
        message: format!("Failed to read catalog file: {e}"),
    })?;
    parse_catalog(&contents)
}

/// The canonical catalog bundled with the crate (October 2025 price list).
///
/// # Errors
///
/// Returns [`Error::Catalog`] only if the bundled file is malformed, which
/// the test suite guards against.
pub fn default_catalog() -> Result<Catalog> {
    parse_catalog(DEFAULT_CATALOG_TOML)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_parse_minimal_catalog() {
        let toml_str = r#"
            [[items]]
            category = "factura"
            name = "Librito"
            unit_price = 100

            [[packages]]
            id = "C2"
            name = "Coffee Break + 2 Facturas"
            base_price = 4000
            nespresso_price = 5800

            [[packages.quotas]]
            category = "factura"
            per_attendee = 2

            [[addons]]
            name = "Agua Mineral Chica"
            unit_price = 1560
            unit = "unidad"
        "#;

        let catalog = parse_catalog(toml_str).unwrap();
        assert_eq!(catalog.items().len(), 1);
        assert!(!catalog.items()[0].gluten_free);

        let package = catalog.package("C2").unwrap();
        assert_eq!(package.base_price_per_attendee, 4000);
        assert_eq!(package.nespresso_price_per_attendee, Some(5800));
        assert!(!package.force_nespresso);

        let entry = catalog.governing_quota("C2", Category::Factura).unwrap();
        assert_eq!(entry.per_attendee, 2);

        assert!(catalog.addon("Agua Mineral Chica").unwrap().exclusive_group.is_none());
    }

    #[test]
    fn test_parse_pool_quota() {
        let toml_str = r#"
            items = []
            addons = []

            [[packages]]
            id = "C4"
            name = "Mixto"
            base_price = 6000

            [[packages.quotas]]
            pool = "especiales-mixto"
            members = ["sweet_special", "savory_special"]
            per_attendee = 2
        "#;

        let catalog = parse_catalog(toml_str).unwrap();
        let sweet = catalog
            .governing_quota("C4", Category::SweetSpecial)
            .unwrap();
        let savory = catalog
            .governing_quota("C4", Category::SavorySpecial)
            .unwrap();
        assert_eq!(sweet, savory);
        assert_eq!(
            sweet.scope.label(),
            "especiales-mixto"
        );
    }

    #[test]
    fn test_parse_rejects_bad_toml() {
        let result = parse_catalog("items = 3");
        assert!(matches!(result, Err(Error::Catalog { .. })));
    }

    #[test]
    fn test_bundled_catalog_parses() {
        let catalog = default_catalog().unwrap();

        // The nine-package October 2025 lineup
        assert_eq!(catalog.packages().len(), 9);
        assert!(catalog.package("C1").is_some());
        assert!(catalog.package("C9").is_some());
        assert!(!catalog.items().is_empty());

        // Every add-on row must survive the parse; a structural slip in the
        // TOML (e.g. the addons array landing inside a package table) would
        // show up here as a missing-field error or a short list.
        assert_eq!(catalog.addons().len(), 11);
    }

    #[test]
    fn test_bundled_catalog_mixto_pools() {
        let catalog = default_catalog().unwrap();

        // C3/C4/C6 are the "Mixto" packages: a shared pool over the sweet
        // and savory halves of their tier
        for (id, per_attendee) in [("C3", 2), ("C4", 2), ("C6", 4)] {
            let package = catalog.package(id).unwrap();
            let pools = package
                .quotas
                .iter()
                .filter(|q| matches!(q.scope, crate::catalog::QuotaScope::Pool { .. }))
                .count();
            assert_eq!(pools, 1, "package {id} should declare one pool");
            assert_eq!(package.required_units_per_attendee(), per_attendee);
        }
    }

    #[test]
    fn test_bundled_catalog_support_staff_group() {
        let catalog = default_catalog().unwrap();
        let staff: Vec<_> = catalog.addons_in_group("support-staff").collect();
        assert_eq!(staff.len(), 3);
    }

    #[test]
    fn test_bundled_catalog_forced_nespresso() {
        let catalog = default_catalog().unwrap();
        assert!(catalog.package("C6").unwrap().force_nespresso);
        assert!(catalog.package("C7").unwrap().force_nespresso);
        assert!(!catalog.package("C1").unwrap().force_nespresso);
    }
}
