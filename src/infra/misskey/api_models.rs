// Request and response bodies for the admin REST endpoints.
// Every request carries the moderator token in the `i` field.

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AntennaNotesRequest<'a> {
    pub i: &'a str,
    pub antenna_id: &'a str,
    pub limit: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteNoteRequest<'a> {
    pub i: &'a str,
    pub note_id: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteAccountRequest<'a> {
    pub i: &'a str,
    pub user_id: &'a str,
}

#[derive(Debug, Serialize)]
pub struct MetaRequest<'a> {
    pub i: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMetaRequest<'a> {
    pub i: &'a str,
    pub blocked_hosts: &'a [String],
}

/// The slice of `admin/meta` the sweep cares about. The field is required and
/// must be a list of strings.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminMeta {
    pub blocked_hosts: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_field_names() {
        let body = serde_json::to_value(AntennaNotesRequest {
            i: "token",
            antenna_id: "a1",
            limit: 100,
        })
        .unwrap();
        assert_eq!(body, json!({ "i": "token", "antennaId": "a1", "limit": 100 }));

        let body = serde_json::to_value(DeleteNoteRequest {
            i: "token",
            note_id: "n1",
        })
        .unwrap();
        assert_eq!(body, json!({ "i": "token", "noteId": "n1" }));

        let body = serde_json::to_value(DeleteAccountRequest {
            i: "token",
            user_id: "u1",
        })
        .unwrap();
        assert_eq!(body, json!({ "i": "token", "userId": "u1" }));

        let hosts = vec!["other.example".to_string(), "evil.example".to_string()];
        let body = serde_json::to_value(UpdateMetaRequest {
            i: "token",
            blocked_hosts: &hosts,
        })
        .unwrap();
        assert_eq!(
            body,
            json!({ "i": "token", "blockedHosts": ["other.example", "evil.example"] })
        );
    }

    #[test]
    fn test_admin_meta_decoding() {
        let meta: AdminMeta = serde_json::from_value(json!({
            "name": "example",
            "blockedHosts": ["other.example"],
            "sensitiveWords": []
        }))
        .unwrap();
        assert_eq!(meta.blocked_hosts, vec!["other.example".to_string()]);

        // Missing key
        assert!(serde_json::from_value::<AdminMeta>(json!({ "name": "example" })).is_err());
        // Mixed element types
        assert!(
            serde_json::from_value::<AdminMeta>(json!({ "blockedHosts": ["a.example", 1] }))
                .is_err()
        );
        // Not an array
        assert!(
            serde_json::from_value::<AdminMeta>(json!({ "blockedHosts": "a.example" })).is_err()
        );
    }
}
