//! Unit tests for the demand model: status labels and store JSON shape.

use redecom_admin::models::demand::{Demand, DemandStatus};

#[test]
fn status_codes_map_to_labels() {
    let cases = [
        (Some(0), "Na fila", "Queued"),
        (Some(1), "Em progresso", "In progress"),
        (Some(2), "Finalizada", "Completed"),
        (Some(3), "Aprovada", "Approved"),
    ];
    for (code, label, name) in cases {
        let status = DemandStatus::from_code(code);
        assert_eq!(status.label(), label);
        assert_eq!(status.to_string(), name);
        assert_eq!(status.code(), code);
    }
}

#[test]
fn out_of_range_status_is_unknown() {
    let status = DemandStatus::from_code(Some(5));
    assert_eq!(status, DemandStatus::Unknown(Some(5)));
    assert_eq!(status.label(), "Desconhecido");
    assert_eq!(status.to_string(), "Unknown");
    assert_eq!(status.code(), Some(5));
}

#[test]
fn missing_status_is_unknown() {
    let status = DemandStatus::from_code(None);
    assert_eq!(status.label(), "Desconhecido");
    assert_eq!(status.code(), None);
}

#[test]
fn new_demand_is_queued_and_unassigned() {
    let demand = Demand::new("Banner", vec!["design".into()]);
    assert_eq!(demand.status, DemandStatus::Queued);
    assert!(demand.involved.is_empty());
    assert!(demand.created_at.is_some());
    assert!(!demand.id.is_empty());
}

#[test]
fn store_document_deserializes() {
    let raw = r#"{
        "id": "d1",
        "subject": "Post Instagram",
        "description": "Divulgação",
        "status": 1,
        "needs": ["social media"],
        "involved": [{"uid": "p1", "name": "Ana"}],
        "editedBy": "Admin",
        "user": {"name": "Maria"}
    }"#;
    let demand: Demand = serde_json::from_str(raw).expect("parse");
    assert_eq!(demand.status, DemandStatus::InProgress);
    assert!(demand.has_person("p1"));
    assert!(!demand.has_person("p2"));
    assert_eq!(demand.edited_by.as_deref(), Some("Admin"));
    assert_eq!(demand.requester.expect("requester").name, "Maria");
    assert!(demand.links.is_empty());
}

#[test]
fn unknown_status_survives_serialization() {
    let raw = r#"{"id": "d1", "subject": "x", "status": 7}"#;
    let demand: Demand = serde_json::from_str(raw).expect("parse");
    let json = serde_json::to_value(&demand).expect("serialize");
    assert_eq!(json["status"], 7);
    assert!(json.get("user").is_some());
    assert!(json.get("editedBy").is_some());
}

#[test]
fn null_status_reads_as_unknown() {
    let raw = r#"{"id": "d1", "subject": "x", "status": null}"#;
    let demand: Demand = serde_json::from_str(raw).expect("parse");
    assert_eq!(demand.status, DemandStatus::Unknown(None));
}
