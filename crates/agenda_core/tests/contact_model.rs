use agenda_core::{validate_contact, Contact, ContactField, ValidationError, MASKED_SECRET};

fn sample() -> Contact {
    Contact {
        id: 3,
        name: "Ana Souza".to_string(),
        phone: "1198765-4321".to_string(),
        email: "ana@example.com".to_string(),
        birth_date: "01/02/1985".to_string(),
        national_id: "12.345.678/0001-95".to_string(),
        postal_code: "01310100".to_string(),
        vehicle_plate: "ABC-1234".to_string(),
        secret: "Zz9&Zz9&".to_string(),
    }
}

#[test]
fn serialization_uses_expected_fields_and_skips_secret() {
    let json = serde_json::to_value(sample()).unwrap();
    assert_eq!(json["id"], 3);
    assert_eq!(json["name"], "Ana Souza");
    assert_eq!(json["birth_date"], "01/02/1985");
    assert_eq!(json["national_id"], "12.345.678/0001-95");
    assert_eq!(json["vehicle_plate"], "ABC-1234");
    assert!(json.get("secret").is_none());

    let decoded: Contact = serde_json::from_value(json).unwrap();
    assert_eq!(decoded.name, "Ana Souza");
    assert_eq!(decoded.secret, "");
}

#[test]
fn deserialization_accepts_secret_input() {
    let value = serde_json::json!({
        "id": 0,
        "name": "Ana Souza",
        "phone": "98765-4321",
        "email": "ana@example.com",
        "birth_date": "01/02/1985",
        "national_id": "12345678901",
        "postal_code": "01310-100",
        "vehicle_plate": "ABC1D23",
        "secret": "Zz9&Zz9&"
    });
    let contact: Contact = serde_json::from_value(value).unwrap();
    assert_eq!(contact.secret, "Zz9&Zz9&");
    assert!(contact.validate().is_ok());
}

#[test]
fn summary_and_masking_never_show_secret() {
    let contact = sample();
    assert_eq!(
        contact.summary_line(),
        "ID: 3 | Name: Ana Souza | Phone: 1198765-4321"
    );
    assert_eq!(contact.masked_secret(), MASKED_SECRET);
    for field in ContactField::ALL {
        assert_ne!(contact.display_value(field), "Zz9&Zz9&");
    }
}

#[test]
fn validation_error_kinds_are_distinct() {
    let nil = validate_contact(None).unwrap_err();
    assert_eq!(nil, ValidationError::NilInput);

    let mut invalid = sample();
    invalid.postal_code = "0131".to_string();
    let err = validate_contact(Some(&invalid)).unwrap_err();
    match err {
        ValidationError::InvalidFields(errors) => {
            assert_eq!(errors.field_list(), "postal_code");
            let reason = errors.get(ContactField::PostalCode).unwrap().reasons();
            assert!(reason[0].contains("DDDDD-DDD"));
        }
        other => panic!("unexpected error: {other}"),
    }
}
