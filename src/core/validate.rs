//! Submit-time validation.
//!
//! Quotas are enforced exactly here, not on every keystroke: mutation clamps
//! only prevent overshooting, so a selection can sit under quota while the
//! user is still filling the form. [`validate_selection`] is side-effect free
//! and cheap, so callers run it after every state change to drive the
//! submit-button state.

use crate::{
    catalog::Catalog,
    core::selection::Selection,
    errors::Result,
};
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Who is placing the order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    /// Full name
    pub name: String,
    /// Contact email
    pub email: String,
}

/// When and where the service happens, plus free-form notes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDetails {
    /// Event date
    pub date: NaiveDate,
    /// Service start time
    pub time: NaiveTime,
    /// Dietary needs, gluten-free or vegan counts, and the like
    pub observations: Option<String>,
}

/// Why a selection cannot be submitted.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum ValidationFailure {
    /// A required contact field is absent or malformed.
    #[error("missing or malformed contact field: {field}")]
    MissingContactInfo {
        /// Which field failed
        field: String,
    },

    /// The package requires bites but nothing at all was selected.
    #[error("the package requires menu items but none were selected")]
    NoSelectionMade,

    /// A quota scope's selected total differs from its required total.
    #[error("{scope}: selected {selected} of {required} required units")]
    QuotaMismatch {
        /// Label of the offending category or pool
        scope: String,
        /// Required units (`per_attendee * attendee_count`)
        required: u64,
        /// Units currently selected in the scope
        selected: u64,
    },
}

/// Outcome of [`validate_selection`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation {
    /// The selection can be submitted.
    Valid,
    /// The selection cannot be submitted; the first failure found.
    Invalid(ValidationFailure),
}

impl Validation {
    /// True for [`Validation::Valid`].
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }
}

// Deliberately lax: enough to catch empty or obviously broken input without
// rejecting unusual but deliverable addresses.
fn email_looks_valid(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}

/// Checks a selection against the active package's quotas and the contact
/// fields, in order: contact first, then "anything selected at all", then
/// each quota scope in the order the package declares them.
///
/// # Errors
///
/// Returns [`Error::UnknownPackage`](crate::errors::Error::UnknownPackage)
/// when the selection references a package missing from the catalog.
pub fn validate_selection(
    catalog: &Catalog,
    selection: &Selection,
    contact: &ContactInfo,
) -> Result<Validation> {
    let package = catalog.require_package(&selection.package_id)?;

    if contact.name.trim().is_empty() {
        return Ok(Validation::Invalid(ValidationFailure::MissingContactInfo {
            field: "name".to_string(),
        }));
    }
    if !email_looks_valid(contact.email.trim()) {
        return Ok(Validation::Invalid(ValidationFailure::MissingContactInfo {
            field: "email".to_string(),
        }));
    }

    // An entirely empty form reads better as one message than as a mismatch
    // report for every scope.
    if package.has_item_selection() && selection.total_items_selected() == 0 {
        return Ok(Validation::Invalid(ValidationFailure::NoSelectionMade));
    }

    for entry in &package.quotas {
        if entry.per_attendee == 0 {
            continue;
        }
        let required = u64::from(entry.per_attendee) * u64::from(selection.attendee_count);
        let selected = selection.scope_total(|c| entry.scope.governs(c));
        if selected != required {
            return Ok(Validation::Invalid(ValidationFailure::QuotaMismatch {
                scope: entry.scope.label(),
                required,
                selected,
            }));
        }
    }

    Ok(Validation::Valid)
}
