mod common;

use std::collections::{BTreeMap, BTreeSet};

use holidaylink_api::types::{Action, ActionPayload, ActionStatus, MediaDescription, SeaLangs};
use holidaylink_api::{Credentials, Error, FieldValue, Method, Params};
use serde_json::json;

use common::{fake_client, load_fixture, RecordingTransport};

fn full_action_data() -> serde_json::Value {
    json!({
        "accommodation_unit_id": "U1",
        "status": "active",
        "visible_from": "2016-01-01",
        "visible_to": "2016-02-01",
        "applicable_from": "2016-01-01",
        "applicable_to": "2016-02-01",
        "amount_value": "10",
        "amount_unit": "percentage"
    })
}

// ============================================================================
// Whitelist validation happens before any I/O
// ============================================================================

#[tokio::test]
async fn unknown_params_never_reach_the_transport() {
    let transport = RecordingTransport::responding(200, "<action/>");
    let client = fake_client(&transport);
    let bad = Params::new().with_expand().with("sort", "name").with("foo", 1);

    let err = client.single_from_xml::<Action>("A1", &bad).await.unwrap_err();
    assert!(matches!(err, Error::InvalidParameter { ref keys } if keys == &["foo", "sort"]));
    assert!(err.is_validation());

    assert!(client.all_from_xml::<SeaLangs>(&bad).await.is_err());
    assert!(client
        .create_single::<Action, _>(&bad, &full_action_data())
        .await
        .is_err());
    assert!(client
        .update_single::<Action, _>("A1", &bad, &json!({}))
        .await
        .is_err());
    assert!(client
        .single_from_xml::<MediaDescription>("M1", &Params::new().with_page(2))
        .await
        .is_err());

    assert_eq!(transport.calls(), 0);
}

#[tokio::test]
async fn create_checks_params_even_with_complete_data() {
    let transport = RecordingTransport::responding(201, "{}");
    let client = fake_client(&transport);

    let err = client
        .create_single::<Action, _>(&Params::new().with("foo", 1), &full_action_data())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidParameter { ref keys } if keys == &["foo"]));
    assert_eq!(transport.calls(), 0);
}

#[tokio::test]
async fn collection_whitelist_is_wider_than_single() {
    let transport = RecordingTransport::responding(200, "<sea-langs/>");
    let client = fake_client(&transport);
    let params = Params::new().with_language("en").with_page(2).with_expand();

    let set = client.all_from_xml::<SeaLangs>(&params).await.unwrap();
    assert_eq!(set.count(), 0);
    assert_eq!(transport.calls(), 1);
    assert_eq!(
        transport.last().url.query(),
        Some("expand=1&language=en&page=2")
    );
}

// ============================================================================
// Required fields on create
// ============================================================================

#[tokio::test]
async fn create_lists_exactly_the_missing_fields() {
    let transport = RecordingTransport::responding(201, "{}");
    let client = fake_client(&transport);

    let err = client
        .create_single::<Action, _>(&Params::new(), &json!({"status": "active"}))
        .await
        .unwrap_err();

    let fields = match err {
        Error::MissingRequiredField { fields } => fields,
        other => panic!("unexpected error: {other:?}"),
    };
    let missing: BTreeSet<&str> = fields.iter().map(String::as_str).collect();
    let expected: BTreeSet<&str> = [
        "accommodation_unit_id",
        "visible_from",
        "visible_to",
        "applicable_from",
        "applicable_to",
        "amount_value",
        "amount_unit",
    ]
    .into_iter()
    .collect();
    assert_eq!(missing, expected);
    assert_eq!(transport.calls(), 0);
}

#[tokio::test]
async fn empty_values_count_as_present() {
    let transport = RecordingTransport::responding(201, r#"{"id":"A9"}"#);
    let client = fake_client(&transport);
    let mut data = full_action_data();
    data["amount_value"] = json!("");

    let resp = client
        .create_single::<Action, _>(&Params::new(), &data)
        .await
        .unwrap();
    assert_eq!(resp, json!({"id": "A9"}));
    assert_eq!(transport.calls(), 1);
}

#[tokio::test]
async fn create_rejects_non_object_payloads() {
    let transport = RecordingTransport::responding(201, "{}");
    let client = fake_client(&transport);

    let err = client
        .create_single::<Action, _>(&Params::new(), &vec!["status"])
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidPayload(_)));
    assert_eq!(transport.calls(), 0);
}

#[tokio::test]
async fn create_accepts_typed_payloads_and_maps() {
    let transport = RecordingTransport::responding(201, "{}");
    let client = fake_client(&transport);

    let partial = ActionPayload::default().with_status(ActionStatus::Active);
    assert!(matches!(
        client.create_single::<Action, _>(&Params::new(), &partial).await,
        Err(Error::MissingRequiredField { .. })
    ));

    let data: BTreeMap<String, String> = full_action_data()
        .as_object()
        .unwrap()
        .iter()
        .map(|(k, v)| (k.clone(), v.as_str().unwrap().to_string()))
        .collect();
    client
        .create_single::<Action, _>(&Params::new(), &data)
        .await
        .unwrap();

    let req = transport.last();
    assert_eq!(req.method, Method::Post);
    assert_eq!(req.url.path(), "/actions");
    let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
    assert_eq!(body, full_action_data());
}

// ============================================================================
// Update has no required-field check
// ============================================================================

#[tokio::test]
async fn update_accepts_partial_payloads() {
    let transport = RecordingTransport::responding(200, r#"{"status":"disabled"}"#);
    let client = fake_client(&transport);

    let resp = client
        .update_single::<Action, _>(
            "ACT123",
            &Params::new().with_expand(),
            &json!({"status": "disabled"}),
        )
        .await
        .unwrap();
    assert_eq!(resp, json!({"status": "disabled"}));

    let req = transport.last();
    assert_eq!(req.method, Method::Put);
    assert_eq!(req.url.path(), "/actions/ACT123");
    assert_eq!(req.url.query(), Some("expand=1"));
    assert_eq!(req.header("content-type"), Some("application/json"));
    assert_eq!(req.body.as_deref(), Some(r#"{"status":"disabled"}"#));
}

#[tokio::test]
async fn update_media_description() {
    let transport = RecordingTransport::responding(200, "");
    let client = fake_client(&transport);

    let resp = client
        .update_single::<MediaDescription, _>("MD9", &Params::new(), &json!({"title": "New"}))
        .await
        .unwrap();
    assert_eq!(resp, serde_json::Value::Null);
    assert_eq!(transport.last().url.path(), "/media-descriptions/MD9");
}

// ============================================================================
// Delete
// ============================================================================

#[tokio::test]
async fn delete_returns_raw_response() {
    let transport = RecordingTransport::responding(204, "");
    let client = fake_client(&transport);

    let resp = client.delete_single::<Action>("ACT123").await.unwrap();
    assert_eq!(resp.status, 204);

    let req = transport.last();
    assert_eq!(req.method, Method::Delete);
    assert_eq!(req.url.as_str(), "https://api.test/actions/ACT123");
    assert!(req.body.is_none());
}

// ============================================================================
// Reads
// ============================================================================

#[tokio::test]
async fn single_read_builds_record_from_fixture() {
    let transport = RecordingTransport::responding(200, &load_fixture("action.xml"));
    let client = fake_client(&transport);

    let action = client
        .single_from_xml::<Action>("ACT123", &Params::new().with_expand())
        .await
        .unwrap();

    let req = transport.last();
    assert_eq!(req.method, Method::Get);
    assert_eq!(req.url.as_str(), "https://api.test/actions/ACT123?expand=1");
    assert_eq!(req.header("accept"), Some("application/xml"));

    assert_eq!(action.get_str("status").unwrap(), Some("active"));
    assert_eq!(action.get_str("type").unwrap(), Some("last_minute"));
    assert!(action
        .get("visible_from")
        .unwrap()
        .and_then(FieldValue::as_date)
        .is_some());
    assert!(action
        .get("created_at")
        .unwrap()
        .and_then(FieldValue::as_datetime)
        .is_some());

    let amount = action.get("amount").unwrap().and_then(FieldValue::as_node).unwrap();
    assert_eq!(amount.child_text("value"), Some("10"));

    assert!(matches!(
        action.get("internal_note"),
        Err(Error::UnknownField { resource: "Action", .. })
    ));
}

#[tokio::test]
async fn attributes_fill_missing_elements() {
    let transport = RecordingTransport::responding(200, &load_fixture("media_description.xml"));
    let client = fake_client(&transport);

    let media = client
        .single_from_xml::<MediaDescription>("MD9", &Params::new())
        .await
        .unwrap();
    assert_eq!(media.get_str("id").unwrap(), Some("MD9"));
    assert_eq!(media.get_str("title").unwrap(), Some("Sunset from the terrace"));
    let photo = media.get("photo").unwrap().and_then(FieldValue::as_node).unwrap();
    assert_eq!(photo.attribute("width"), Some("1024"));
    assert!(media.get("video").unwrap().is_none());
}

#[tokio::test]
async fn malformed_xml_is_reported() {
    let transport = RecordingTransport::responding(200, "<action><status>active</action>");
    let client = fake_client(&transport);

    let err = client
        .single_from_xml::<Action>("ACT123", &Params::new())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::MalformedResponse(_)));
    assert!(!err.is_validation());
}

#[tokio::test]
async fn unauthorized_status_surfaces_as_authentication_error() {
    let transport = RecordingTransport::responding(401, "Unauthorized");
    let client = fake_client(&transport);

    let err = client.delete_single::<Action>("ACT123").await.unwrap_err();
    assert!(matches!(err, Error::Authentication { status: 401 }));
}

// ============================================================================
// Sessions and credentials
// ============================================================================

#[tokio::test]
async fn credentials_travel_with_the_session() {
    let transport = RecordingTransport::responding(204, "");
    let mut client = fake_client(&transport);
    let other = client.with_credentials(Credentials::new("other-key", "other-secret"));

    client.delete_single::<Action>("A1").await.unwrap();
    other.delete_single::<Action>("A2").await.unwrap();
    client.set_credentials(Credentials::new("rotated", "s"));
    client.delete_single::<Action>("A3").await.unwrap();

    let keys: Vec<String> = transport
        .requests()
        .iter()
        .map(|r| r.credentials.api_key().to_string())
        .collect();
    assert_eq!(keys, vec!["test-key", "other-key", "rotated"]);
    assert_eq!(other.credentials().api_key(), "other-key");
}
