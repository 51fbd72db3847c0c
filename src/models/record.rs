//! Result records returned by the leak test service

use serde::{Deserialize, Deserializer, Serialize};

/// Substring of the conclusion text that signals a probable leak
pub const LEAK_MARKER: &str = "may be";

/// Kind of a result record, taken from its `type` field
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    /// The client's externally observed address
    Ip,
    /// One resolver observed handling the trigger lookups
    Dns,
    /// Human-readable verdict, carried in the `ip` field
    Conclusion,
    /// Any kind this tool does not know how to report, including a missing `type`
    #[default]
    #[serde(other)]
    Unknown,
}

/// One entry of the JSON array served by the result endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRecord {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub ip: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub country: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub country_name: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub asn: String,

    #[serde(rename = "type", default, deserialize_with = "null_as_unknown")]
    pub kind: RecordKind,
}

impl ResultRecord {
    /// Build a record with location details, as the service reports `ip` and `dns` kinds
    pub fn new(kind: RecordKind, ip: &str, country: &str, country_name: &str, asn: &str) -> Self {
        Self {
            ip: ip.to_string(),
            country: country.to_string(),
            country_name: country_name.to_string(),
            asn: asn.to_string(),
            kind,
        }
    }

    /// Build a conclusion record
    pub fn conclusion(text: &str) -> Self {
        Self::new(RecordKind::Conclusion, text, "", "", "")
    }

    /// Conclusion text; the service puts it in the `ip` field
    pub fn text(&self) -> &str {
        &self.ip
    }

    /// True for a conclusion that reports a probable leak.
    ///
    /// Matches [`LEAK_MARKER`] exactly and case-sensitively.
    pub fn indicates_leak(&self) -> bool {
        self.kind == RecordKind::Conclusion && self.ip.contains(LEAK_MARKER)
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn null_as_unknown<'de, D>(deserializer: D) -> std::result::Result<RecordKind, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<RecordKind>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_service_payload() {
        let body = r#"[
            {"ip":"1.2.3.4","country":"US","country_name":"United States","asn":"AS123","type":"ip"},
            {"ip":"8.8.8.8","country":"US","country_name":"United States","asn":"AS15169","type":"dns"},
            {"ip":"You are not leaking DNS.","type":"conclusion"}
        ]"#;

        let records: Vec<ResultRecord> = serde_json::from_str(body).unwrap();
        assert_eq!(records, vec![
            ResultRecord::new(RecordKind::Ip, "1.2.3.4", "US", "United States", "AS123"),
            ResultRecord::new(RecordKind::Dns, "8.8.8.8", "US", "United States", "AS15169"),
            ResultRecord::conclusion("You are not leaking DNS."),
        ]);
    }

    #[test]
    fn test_null_fields_decode_as_empty() {
        let record: ResultRecord = serde_json::from_str(
            r#"{"ip":"Conclusion","country":null,"country_name":null,"asn":null,"type":"conclusion"}"#,
        ).unwrap();
        assert_eq!(record, ResultRecord::conclusion("Conclusion"));
    }

    #[test]
    fn test_unknown_kind_is_tolerated() {
        let record: ResultRecord = serde_json::from_str(r#"{"ip":"x","type":"ipv6"}"#).unwrap();
        assert_eq!(record.kind, RecordKind::Unknown);
    }

    #[test]
    fn test_missing_or_null_type_is_unknown() {
        let missing: ResultRecord = serde_json::from_str(r#"{"ip":"1.2.3.4"}"#).unwrap();
        assert_eq!(missing.kind, RecordKind::Unknown);

        let null: ResultRecord = serde_json::from_str(r#"{"ip":"1.2.3.4","type":null}"#).unwrap();
        assert_eq!(null.kind, RecordKind::Unknown);
    }

    #[test]
    fn test_untyped_record_keeps_the_rest_of_the_payload() {
        let body = r#"[
            {"ip":"1.2.3.4","country":"US","country_name":"United States","asn":"AS123","type":"ip"},
            {"ip":"extra"},
            {"ip":"5.6.7.8","type":null},
            {"ip":"DNS may be leaking.","type":"conclusion"}
        ]"#;

        let records: Vec<ResultRecord> = serde_json::from_str(body).unwrap();
        let kinds: Vec<RecordKind> = records.iter().map(|r| r.kind).collect();
        assert_eq!(kinds, [RecordKind::Ip, RecordKind::Unknown, RecordKind::Unknown, RecordKind::Conclusion]);
        assert!(records[3].indicates_leak());
    }

    #[test]
    fn test_leak_marker_is_case_sensitive() {
        assert!(ResultRecord::conclusion("DNS may be leaking.").indicates_leak());
        assert!(!ResultRecord::conclusion("DNS May Be leaking.").indicates_leak());
        assert!(!ResultRecord::conclusion("DNS maybe leaking.").indicates_leak());
        assert!(!ResultRecord::conclusion("You are not leaking DNS.").indicates_leak());
    }

    #[test]
    fn test_only_conclusions_indicate_leaks() {
        let dns = ResultRecord::new(RecordKind::Dns, "may be", "", "", "");
        assert!(!dns.indicates_leak());
    }
}
