use serde::{Deserialize, Serialize};

/// Canonical supplier record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Supplier {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub contact_person: String,
    pub address: String,
    pub is_active: bool,
}

/// Payload for `POST /suppliers` and `PUT /suppliers/{id}`.
///
/// Blank optional fields are sent as `null` rather than empty strings,
/// except `phone`, which the server stores as an empty string.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplierInput {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: Option<String>,
    pub contact_person: Option<String>,
    pub is_active: bool,
}
