//! Unit tests for the professional model and its forms.

use redecom_admin::models::professional::{
    NewProfessional, ProfessionalForm, ProfessionalKind,
};
use redecom_admin::AppError;

use crate::support::fake_store::professional;

fn form(name: &str, area: &str) -> ProfessionalForm {
    ProfessionalForm {
        full_name: name.into(),
        area: area.into(),
        ..ProfessionalForm::default()
    }
}

#[test]
fn kind_codes() {
    assert_eq!(ProfessionalKind::from_code(Some(2)), ProfessionalKind::Professional);
    assert_eq!(ProfessionalKind::from_code(Some(3)), ProfessionalKind::Manager);
    assert_eq!(ProfessionalKind::from_code(Some(9)), ProfessionalKind::Professional);
    assert_eq!(ProfessionalKind::from_code(None), ProfessionalKind::Professional);
    assert_eq!(ProfessionalKind::Manager.code(), 3);
}

#[test]
fn assignable_requires_area() {
    assert!(professional("p1", "Ana", "design").is_assignable());
    assert!(!professional("p2", "Bruno", "").is_assignable());
    assert!(!professional("p3", "Carla", "   ").is_assignable());
}

#[test]
fn as_person_snapshots_id_and_name() {
    let person = professional("p1", "Ana Lima", "design").as_person();
    assert_eq!(person.uid, "p1");
    assert_eq!(person.name, "Ana Lima");
}

#[test]
fn normalized_trims_fields() {
    let raw = ProfessionalForm {
        whatsapp: " 21 99999-0000 ".into(),
        ..form("  Ana Lima ", " design ")
    };
    let normalized = raw.normalized().expect("valid");
    assert_eq!(normalized.full_name, "Ana Lima");
    assert_eq!(normalized.area, "design");
    assert_eq!(normalized.whatsapp, "21 99999-0000");
}

#[test]
fn normalized_requires_name_and_area() {
    assert!(matches!(
        form(" ", "design").normalized(),
        Err(AppError::Validation(_))
    ));
    assert!(matches!(
        form("Ana", "").normalized(),
        Err(AppError::Validation(_))
    ));
}

#[test]
fn apply_overwrites_editable_fields_only() {
    let mut record = professional("p1", "Ana", "design");
    let update = ProfessionalForm {
        kind: ProfessionalKind::Manager,
        ..form("Ana Lima", "marketing")
    };
    record.apply(&update);
    assert_eq!(record.id, "p1");
    assert_eq!(record.email, "p1@example.org");
    assert_eq!(record.full_name, "Ana Lima");
    assert_eq!(record.area, "marketing");
    assert_eq!(record.kind, ProfessionalKind::Manager);
}

#[test]
fn sign_up_form_deserializes_flattened_profile() {
    let raw = r#"{
        "email": "ana@example.org",
        "password": "segredo",
        "fullName": "Ana Lima",
        "area": "design",
        "type": 3
    }"#;
    let request: NewProfessional = serde_json::from_str(raw).expect("parse");
    assert_eq!(request.profile.full_name, "Ana Lima");
    assert_eq!(request.profile.kind, ProfessionalKind::Manager);
}

#[test]
fn into_record_sets_consent_flags() {
    let request = NewProfessional {
        email: " ana@example.org ".into(),
        password: "segredo".into(),
        profile: form("Ana Lima", "design"),
    };
    let record = request.into_record("p1".into()).expect("record");
    assert_eq!(record.id, "p1");
    assert_eq!(record.email, "ana@example.org");
    assert!(record.data_auth);
    assert!(record.terms);
    assert!(record.is_assignable());
}

#[test]
fn professional_serializes_type_code() {
    let json = serde_json::to_value(professional("p1", "Ana", "design")).expect("serialize");
    assert_eq!(json["type"], 2);
    assert_eq!(json["fullName"], "Ana");
}
