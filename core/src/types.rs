//! Domain DTOs for the organisation accounts API.
//!
//! # Design
//! Field names follow the service's snake_case wire format. Optional values
//! are `Option<T>` and are skipped on encode, so an absent `country` never
//! reaches the wire as `null` or `""`. On decode a missing field and an
//! explicit `null` both become `None`.
//!
//! Create and fetch bodies wrap exactly one record under a `data` key;
//! `Envelope` applies and strips that wrapper.

use serde::{Deserialize, Serialize};
use serde_with::DefaultOnNull;

use crate::error::ApiError;

/// Fixed resource name: both the URL segment and the `type` discriminator.
pub const ACCOUNTS_RESOURCE: &str = "accounts";

/// A single organisation account resource.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Account {
    pub id: String,
    pub organisation_id: String,
    #[serde(rename = "type")]
    pub account_type: String,
    /// Optimistic-concurrency revision. Required by the server on delete.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<AccountAttributes>,
}

impl Account {
    /// Builds an account record with the `accounts` type discriminator and no
    /// version or attributes.
    pub fn new(id: impl Into<String>, organisation_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            organisation_id: organisation_id.into(),
            account_type: ACCOUNTS_RESOURCE.to_string(),
            version: None,
            attributes: None,
        }
    }

    pub fn with_version(mut self, version: i64) -> Self {
        self.version = Some(version);
        self
    }

    pub fn with_attributes(mut self, attributes: AccountAttributes) -> Self {
        self.attributes = Some(attributes);
        self
    }
}

/// Bank-specific account fields.
///
/// A missing or `null` string decodes as `""` and a missing or `null`
/// `name` as `[]`.
#[serde_with::serde_as]
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccountAttributes {
    #[serde(default)]
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub account_number: String,
    #[serde(default)]
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub bank_id: String,
    #[serde(default)]
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub bank_id_code: String,
    #[serde(default)]
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub base_currency: String,
    #[serde(default)]
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub bic: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default)]
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub iban: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_classification: Option<String>,
    /// Account holder name lines, in order.
    #[serde(default)]
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub name: Vec<String>,
}

/// The `{"data": ...}` wrapper used around single resources.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Envelope<T> {
    pub data: T,
}

impl<T> Envelope<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }

    pub fn into_inner(self) -> T {
        self.data
    }
}

impl<T: Serialize> Envelope<T> {
    /// Serializes the envelope to a JSON string.
    pub fn encode(&self) -> Result<String, ApiError> {
        serde_json::to_string(self).map_err(|e| ApiError::Serialization(e.to_string()))
    }
}

impl Envelope<Account> {
    /// Parses an envelope-wrapped account, failing on malformed JSON, a
    /// missing `data` key or a record that does not match `Account`.
    pub fn decode(raw: &str) -> Result<Self, ApiError> {
        serde_json::from_str(raw).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_account() -> Account {
        Account::new(
            "123e4567-e89b-12d3-a456-426614174129",
            "123e4567-e89b-12d3-a456-426614174111",
        )
        .with_version(3)
        .with_attributes(AccountAttributes {
            account_number: "10000004".to_string(),
            bank_id: "400302".to_string(),
            bank_id_code: "GBDSC".to_string(),
            base_currency: "GBP".to_string(),
            bic: "NWBKGB42".to_string(),
            country: Some("GB".to_string()),
            iban: "GB28NWBK40030212764204".to_string(),
            account_classification: Some("Personal".to_string()),
            name: vec!["Kelvin".to_string(), "Klein".to_string()],
        })
    }

    #[test]
    fn account_serializes_with_wire_names() {
        let json = serde_json::to_value(full_account()).unwrap();
        assert_eq!(json["id"], "123e4567-e89b-12d3-a456-426614174129");
        assert_eq!(json["organisation_id"], "123e4567-e89b-12d3-a456-426614174111");
        assert_eq!(json["type"], "accounts");
        assert_eq!(json["version"], 3);
        assert_eq!(json["attributes"]["bank_id_code"], "GBDSC");
        assert_eq!(json["attributes"]["account_classification"], "Personal");
        assert_eq!(json["attributes"]["name"][1], "Klein");
    }

    #[test]
    fn absent_optionals_are_omitted_not_null() {
        let mut account = full_account();
        account.version = None;
        if let Some(attrs) = account.attributes.as_mut() {
            attrs.country = None;
            attrs.account_classification = None;
        }
        let json = serde_json::to_value(&account).unwrap();
        assert!(json.get("version").is_none());
        assert!(json["attributes"].get("country").is_none());
        assert!(json["attributes"].get("account_classification").is_none());

        let bare = serde_json::to_value(Account::new("a", "b")).unwrap();
        assert!(bare.get("attributes").is_none());
    }

    #[test]
    fn envelope_roundtrips_with_and_without_optionals() {
        let full = full_account();
        let bare = Account::new("id-1", "org-1");
        for account in [full, bare] {
            let raw = Envelope::new(account.clone()).encode().unwrap();
            let back = Envelope::<Account>::decode(&raw).unwrap().into_inner();
            assert_eq!(back, account);
        }
    }

    #[test]
    fn explicit_null_decodes_as_absent() {
        let raw = r#"{"data":{"id":"a","organisation_id":"b","type":"accounts","version":null,
            "attributes":{"country":null,"name":["X"]}}}"#;
        let account = Envelope::<Account>::decode(raw).unwrap().into_inner();
        assert_eq!(account.version, None);
        let attrs = account.attributes.unwrap();
        assert_eq!(attrs.country, None);
        assert_eq!(attrs.name, vec!["X".to_string()]);
        assert_eq!(attrs.iban, "");
    }

    #[test]
    fn null_attribute_strings_and_name_decode_as_empty() {
        let raw = r#"{"data":{"id":"a","organisation_id":"b","type":"accounts","attributes":{"bic":null,"iban":null,"name":null,"country":null}}}"#;
        let attributes = Envelope::<Account>::decode(raw)
            .unwrap()
            .into_inner()
            .attributes
            .unwrap();
        assert_eq!(attributes, AccountAttributes::default());
    }

    #[test]
    fn missing_attribute_fields_decode_as_empty() {
        let raw = r#"{"data":{"id":"a","organisation_id":"b","type":"accounts","attributes":{"bic":"NWBKGB42"}}}"#;
        let attributes = Envelope::<Account>::decode(raw)
            .unwrap()
            .into_inner()
            .attributes
            .unwrap();
        assert_eq!(attributes.bic, "NWBKGB42");
        assert_eq!(attributes.bank_id, "");
        assert!(attributes.name.is_empty());
    }

    #[test]
    fn empty_country_is_preserved_as_empty_string() {
        let raw = r#"{"data":{"id":"a","organisation_id":"b","type":"accounts","attributes":{"country":""}}}"#;
        let attrs = Envelope::<Account>::decode(raw).unwrap().into_inner().attributes.unwrap();
        assert_eq!(attrs.country.as_deref(), Some(""));
        assert!(attrs.name.is_empty());
    }

    #[test]
    fn decode_rejects_missing_envelope_key() {
        let raw = r#"{"id":"a","organisation_id":"b","type":"accounts"}"#;
        let err = Envelope::<Account>::decode(raw).unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[test]
    fn decode_rejects_record_missing_required_field() {
        let raw = r#"{"data":{"id":"a","type":"accounts"}}"#;
        let err = Envelope::<Account>::decode(raw).unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[test]
    fn decode_rejects_malformed_json() {
        let err = Envelope::<Account>::decode("not json").unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }
}
