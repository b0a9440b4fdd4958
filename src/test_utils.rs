//! Shared test utilities.
//!
//! Provides a small synthetic catalog exercising every quota shape
//! (dedicated category, shared pool, quota-free, forced Nespresso), plus
//! contact/event fixtures and an in-memory database setup.

#![allow(clippy::expect_used)]

use crate::catalog::{Addon, Catalog, Category, MenuItem, Package, QuotaEntry, QuotaScope};
use crate::core::validate::{ContactInfo, EventDetails};
use crate::errors::Result;
use chrono::{NaiveDate, NaiveTime};
use sea_orm::DatabaseConnection;
use std::collections::BTreeSet;

/// A dedicated-category quota entry.
#[must_use]
pub fn quota_for(category: Category, per_attendee: u32) -> QuotaEntry {
    QuotaEntry {
        scope: QuotaScope::Category(category),
        per_attendee,
    }
}

/// A pool quota entry over the given member categories.
#[must_use]
pub fn pool_quota(id: &str, members: &[Category], per_attendee: u32) -> QuotaEntry {
    QuotaEntry {
        scope: QuotaScope::Pool {
            id: id.to_string(),
            members: members.iter().copied().collect::<BTreeSet<_>>(),
        },
        per_attendee,
    }
}

fn item(category: Category, name: &str, unit_price: i64) -> MenuItem {
    MenuItem {
        category,
        name: name.to_string(),
        unit_price,
        gluten_free: false,
    }
}

fn package(
    id: &str,
    name: &str,
    base: i64,
    nespresso: Option<i64>,
    force_nespresso: bool,
    quotas: Vec<QuotaEntry>,
) -> Package {
    Package {
        id: id.to_string(),
        name: name.to_string(),
        description: String::new(),
        base_price_per_attendee: base,
        nespresso_price_per_attendee: nespresso,
        force_nespresso,
        quotas,
    }
}

fn addon(name: &str, unit_price: i64, exclusive_group: Option<&str>) -> Addon {
    Addon {
        name: name.to_string(),
        unit_price,
        unit: Some("unidad".to_string()),
        exclusive_group: exclusive_group.map(ToString::to_string),
    }
}

/// Builds the synthetic test catalog used across the unit tests.
///
/// # Panics
///
/// Panics if the fixture data violates a catalog invariant; that would be a
/// bug in the fixture itself.
#[must_use]
pub fn fixture_catalog() -> Catalog {
    let items = vec![
        item(Category::Factura, "Medialuna de Manteca", 100),
        item(Category::Factura, "Librito", 100),
        item(Category::Factura, "Churrinche", 100),
        item(Category::SweetSimple, "Medialuna de Manteca", 120),
        item(Category::SweetSimple, "Budín Marmolado", 120),
        item(Category::SavorySimple, "Chipacito de Queso", 180),
        item(Category::SweetSpecial, "Cookie Red Velvet", 200),
        item(Category::SavorySpecial, "Mini Wrap de Pollo", 280),
        item(Category::SavorySpecial, "Medialuna de Jamón y Queso", 280),
    ];

    let packages = vec![
        package("sin-nespresso", "Coffee Break", 2300, None, false, vec![]),
        package(
            "basico",
            "Coffee Break + 2 Facturas",
            4000,
            Some(5800),
            false,
            vec![quota_for(Category::Factura, 2)],
        ),
        package(
            "mixto",
            "Coffee Break + 4 Bocados Especiales (Mixto)",
            6000,
            Some(7900),
            false,
            vec![pool_quota(
                "especiales-mixto",
                &[Category::SweetSpecial, Category::SavorySpecial],
                4,
            )],
        ),
        package(
            "nespresso-forzado",
            "Coffee Break Nespresso + 4 Bocados",
            8700,
            None,
            true,
            vec![quota_for(Category::SweetSpecial, 4)],
        ),
        package(
            "bienvenida",
            "Bienvenida Simple",
            9100,
            None,
            false,
            vec![
                quota_for(Category::SavorySimple, 3),
                quota_for(Category::SweetSimple, 1),
            ],
        ),
    ];

    let addons = vec![
        addon("Agua Mineral Chica", 1560, None),
        addon("Jugo Cepita x Litro", 2600, None),
        addon("Jornada 3 hs", 21800, Some("support-staff")),
        addon("Jornada 6 hs", 23900, Some("support-staff")),
    ];

    Catalog::new(items, packages, addons).expect("fixture catalog is structurally valid")
}

/// A well-formed contact fixture.
#[must_use]
pub fn fixture_contact() -> ContactInfo {
    ContactInfo {
        name: "Ana Pérez".to_string(),
        email: "ana.perez@example.edu.ar".to_string(),
    }
}

/// An event fixture.
///
/// # Panics
///
/// Never; the literals are valid.
#[must_use]
pub fn fixture_event() -> EventDetails {
    EventDetails {
        date: NaiveDate::from_ymd_opt(2025, 11, 14).expect("valid date"),
        time: NaiveTime::from_hms_opt(9, 30, 0).expect("valid time"),
        observations: Some("Dos menús sin TACC".to_string()),
    }
}

/// Initializes test logging, honoring `RUST_LOG`. Safe to call from every
/// test; only the first call installs the subscriber.
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Creates an in-memory `SQLite` database with the orders table initialized.
///
/// # Errors
///
/// Propagates connection or schema errors.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    init_test_logging();
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}
