//! Order snapshot construction.
//!
//! An [`Order`] is the immutable record handed to the order sink: the
//! selection frozen into sparse line items, the computed total, contact and
//! event metadata, and a creation timestamp. Building one is pure - delivery
//! and any retry policy live behind the sink boundary.

use crate::{
    catalog::{Catalog, Category, Money},
    core::{
        pricing::{compute_total_price, price_per_attendee},
        selection::Selection,
        validate::{validate_selection, ContactInfo, EventDetails, Validation},
    },
    errors::{Error, Result},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Order lifecycle tag. New orders always start out `Pending`; later states
/// are set by back-office tooling, not by this engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Submitted, awaiting confirmation
    Pending,
    /// Confirmed by the caterer
    Confirmed,
    /// Cancelled
    Cancelled,
}

impl OrderStatus {
    /// Stable string form, matching the serialized representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
        }
    }
}

/// A chosen bite, quantity > 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItemLine {
    /// Category the item was chosen under
    pub category: Category,
    /// Item display name
    pub name: String,
    /// Units ordered
    pub quantity: u32,
}

/// A chosen add-on, quantity > 0, with its unit price frozen in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderAddonLine {
    /// Add-on display name
    pub name: String,
    /// Unit price at order time
    pub unit_price: Money,
    /// Units ordered
    pub quantity: u32,
}

/// Immutable snapshot of a submitted order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Who placed the order
    pub contact: ContactInfo,
    /// When the event happens
    pub event: EventDetails,
    /// Booked package id
    pub package_id: String,
    /// Booked package display name
    pub package_name: String,
    /// Attendee count the quotas and base price were computed against
    pub attendee_count: u32,
    /// Whether the Nespresso upgrade was active
    pub use_nespresso: bool,
    /// Effective per-attendee rate at order time
    pub price_per_attendee: Money,
    /// Chosen bites, sparse (only quantities > 0)
    pub items: Vec<OrderItemLine>,
    /// Chosen add-ons, sparse
    pub addons: Vec<OrderAddonLine>,
    /// Computed total
    pub total_price: Money,
    /// Lifecycle tag, `Pending` at creation
    pub status: OrderStatus,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// Freezes a validated selection into an [`Order`].
///
/// Callers are expected to have seen [`Validation::Valid`] from
/// [`validate_selection`] already; this function re-validates defensively
/// and treats a failure as a programming error.
///
/// # Errors
///
/// [`Error::InvalidSelection`] when the selection does not validate,
/// [`Error::UnknownPackage`] when the package id is not in the catalog.
pub fn build_order(
    catalog: &Catalog,
    selection: &Selection,
    contact: &ContactInfo,
    event: &EventDetails,
) -> Result<Order> {
    match validate_selection(catalog, selection, contact)? {
        Validation::Valid => {}
        Validation::Invalid(reason) => return Err(Error::InvalidSelection { reason }),
    }

    let package = catalog.require_package(&selection.package_id)?;

    let items = selection
        .item_quantities
        .iter()
        .filter(|(_, qty)| **qty > 0)
        .map(|(key, qty)| OrderItemLine {
            category: key.category,
            name: key.name.clone(),
            quantity: *qty,
        })
        .collect();

    let addons = selection
        .addon_quantities
        .iter()
        .filter(|(_, qty)| **qty > 0)
        .filter_map(|(name, qty)| {
            catalog.addon(name).map(|addon| OrderAddonLine {
                name: addon.name.clone(),
                unit_price: addon.unit_price,
                quantity: *qty,
            })
        })
        .collect();

    Ok(Order {
        contact: contact.clone(),
        event: event.clone(),
        package_id: package.id.clone(),
        package_name: package.name.clone(),
        attendee_count: selection.attendee_count,
        use_nespresso: selection.use_nespresso,
        price_per_attendee: price_per_attendee(package, selection.use_nespresso),
        items,
        addons,
        total_price: compute_total_price(catalog, selection)?,
        status: OrderStatus::Pending,
        created_at: Utc::now(),
    })
}
