//! The personne record and the input shape accepted on the wire.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One personne as stored in (and read back from) the `personne` table.
///
/// `id` is `None` only on a record that has not been persisted yet; the
/// store assigns it on insert. The string fields hold their normalized
/// forms: `nom` upper-cased, `prenom` capitalized, `adresse` trimmed and
/// `telephone` in the canonical grouped format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Personne {
    pub id: Option<i64>,
    pub nom: String,
    pub prenom: String,
    pub date_naissance: Option<NaiveDate>,
    pub adresse: Option<String>,
    pub telephone: Option<String>,
}

/// The fields a caller may submit when creating or updating a personne.
///
/// Everything is optional at this level so the transport boundary can
/// report missing required fields as schema errors with a field-to-message
/// mapping; the service re-checks `nom` and `prenom` regardless.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonneInput {
    pub nom: Option<String>,
    pub prenom: Option<String>,
    pub date_naissance: Option<NaiveDate>,
    pub adresse: Option<String>,
    pub telephone: Option<String>,
}
