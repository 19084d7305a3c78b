use agenda_core::{
    Contact, ContactField, ContactPatch, ContactRepository, ContactService,
    InMemoryContactRepository, Lookup, RepoError, Violation,
};

fn maria() -> Contact {
    Contact {
        id: 0,
        name: "Maria Silva".to_string(),
        phone: "(11)98765-4321".to_string(),
        email: "maria@example.com".to_string(),
        birth_date: "15/06/1990".to_string(),
        national_id: "123.456.789-01".to_string(),
        postal_code: "01310-100".to_string(),
        vehicle_plate: "ABC1234".to_string(),
        secret: "Abc12345!".to_string(),
    }
}

fn named(name: &str) -> Contact {
    Contact {
        name: name.to_string(),
        ..maria()
    }
}

#[test]
fn create_assigns_first_id_and_roundtrips_every_field() {
    let repo = InMemoryContactRepository::new();

    let created = repo.create_contact(Some(&maria())).unwrap();
    assert_eq!(created.id, 1);

    let loaded = repo.get_contact(created.id).unwrap();
    assert_eq!(loaded, created);
    assert_eq!(loaded.name, "Maria Silva");
    assert_eq!(loaded.phone, "(11)98765-4321");
    assert_eq!(loaded.email, "maria@example.com");
    assert_eq!(loaded.birth_date, "15/06/1990");
    assert_eq!(loaded.national_id, "123.456.789-01");
    assert_eq!(loaded.postal_code, "01310-100");
    assert_eq!(loaded.vehicle_plate, "ABC1234");
    assert_eq!(loaded.secret, "Abc12345!");
    assert!(!format!("{loaded:?}").contains("Abc12345!"));
}

#[test]
fn ids_increase_across_creates() {
    let repo = InMemoryContactRepository::new();
    let ids: Vec<u64> = ["Ana Souza", "Bruno Lima", "Carla Dias"]
        .iter()
        .map(|name| repo.create_contact(Some(&named(name))).unwrap().id)
        .collect();
    assert_eq!(ids, vec![1, 2, 3]);
}

#[test]
fn separate_repositories_have_independent_counters() {
    let first = InMemoryContactRepository::new();
    let second = InMemoryContactRepository::new();
    first.create_contact(Some(&maria())).unwrap();
    first.create_contact(Some(&maria())).unwrap();

    assert_eq!(second.create_contact(Some(&maria())).unwrap().id, 1);
}

#[test]
fn create_rejects_absent_candidate() {
    let repo = InMemoryContactRepository::new();
    assert_eq!(repo.create_contact(None).unwrap_err(), RepoError::NilInput);
    assert!(repo.list_contacts().unwrap().is_empty());
}

#[test]
fn create_rejects_lowercase_name_only() {
    let repo = InMemoryContactRepository::new();
    let err = repo.create_contact(Some(&named("maria"))).unwrap_err();

    let errors = err.field_errors().expect("validation failure expected");
    assert_eq!(errors.fields().collect::<Vec<_>>(), vec![ContactField::Name]);
    assert!(repo.list_contacts().unwrap().is_empty());
}

#[test]
fn create_reports_all_failing_fields() {
    let repo = InMemoryContactRepository::new();
    let mut candidate = named("maria");
    candidate.secret = "short".to_string();

    let err = repo.create_contact(Some(&candidate)).unwrap_err();
    let errors = err.field_errors().unwrap();
    assert!(errors.contains(ContactField::Name));
    assert!(errors.contains(ContactField::Secret));
    assert_eq!(err.to_string(), "invalid fields: name, secret");
}

#[test]
fn rejected_create_does_not_consume_an_id() {
    let repo = InMemoryContactRepository::new();
    repo.create_contact(Some(&named("maria"))).unwrap_err();
    assert_eq!(repo.create_contact(Some(&maria())).unwrap().id, 1);
}

#[test]
fn search_by_name_is_case_insensitive_exact_match() {
    let repo = InMemoryContactRepository::new();
    let created = repo.create_contact(Some(&maria())).unwrap();
    repo.create_contact(Some(&named("Maria Souza"))).unwrap();

    let found = repo.search_by_name("MARIA SILVA").unwrap();
    assert_eq!(found, vec![created]);
}

#[test]
fn search_returns_all_matches_in_stored_order() {
    let repo = InMemoryContactRepository::new();
    let first = repo.create_contact(Some(&maria())).unwrap();
    repo.create_contact(Some(&named("Ana Souza"))).unwrap();
    let third = repo.create_contact(Some(&maria())).unwrap();

    let found = repo.search_by_name("maria silva").unwrap();
    assert_eq!(
        found.iter().map(|c| c.id).collect::<Vec<_>>(),
        vec![first.id, third.id]
    );
}

#[test]
fn search_without_match_is_not_found() {
    let repo = InMemoryContactRepository::new();
    repo.create_contact(Some(&maria())).unwrap();
    let err = repo.search_by_name("Maria").unwrap_err();
    assert!(matches!(err, RepoError::NotFound(Lookup::Name(ref q)) if q == "Maria"));
}

#[test]
fn delete_unknown_id_is_not_found() {
    let repo = InMemoryContactRepository::new();
    repo.create_contact(Some(&maria())).unwrap();

    let err = repo.delete_contact(99).unwrap_err();
    assert_eq!(err, RepoError::NotFound(Lookup::Id(99)));
    assert_eq!(repo.list_contacts().unwrap().len(), 1);
}

#[test]
fn delete_then_get_is_not_found_and_order_is_kept() {
    let repo = InMemoryContactRepository::new();
    let a = repo.create_contact(Some(&named("Ana Souza"))).unwrap();
    let b = repo.create_contact(Some(&named("Bruno Lima"))).unwrap();
    let c = repo.create_contact(Some(&named("Carla Dias"))).unwrap();

    repo.delete_contact(b.id).unwrap();
    assert_eq!(
        repo.get_contact(b.id).unwrap_err(),
        RepoError::NotFound(Lookup::Id(b.id))
    );
    assert_eq!(repo.list_contacts().unwrap(), vec![a, c]);
}

#[test]
fn list_on_fresh_repository_is_empty() {
    let repo = InMemoryContactRepository::new();
    assert_eq!(repo.list_contacts().unwrap(), Vec::<Contact>::new());
}

#[test]
fn list_returns_independent_copies() {
    let repo = InMemoryContactRepository::new();
    repo.create_contact(Some(&maria())).unwrap();

    let mut listed = repo.list_contacts().unwrap();
    listed[0].name = "Mutated Outside".to_string();
    let mut fetched = repo.get_contact(1).unwrap();
    fetched.email = "changed@example.com".to_string();

    let stored = repo.get_contact(1).unwrap();
    assert_eq!(stored.name, "Maria Silva");
    assert_eq!(stored.email, "maria@example.com");
}

#[test]
fn update_replaces_fields_and_keeps_id() {
    let repo = InMemoryContactRepository::new();
    repo.create_contact(Some(&maria())).unwrap();

    let mut candidate = named("Maria Oliveira");
    candidate.id = 55;
    let updated = repo.update_contact(1, Some(&candidate)).unwrap();

    assert_eq!(updated.id, 1);
    assert_eq!(updated.name, "Maria Oliveira");
    assert_eq!(repo.get_contact(1).unwrap(), updated);
    assert!(repo.get_contact(55).unwrap_err().is_not_found());
}

#[test]
fn update_with_weak_secret_fails_and_keeps_record() {
    let repo = InMemoryContactRepository::new();
    let created = repo.create_contact(Some(&maria())).unwrap();

    let mut candidate = maria();
    candidate.secret = "weakpass".to_string();
    let err = repo.update_contact(1, Some(&candidate)).unwrap_err();

    let secret = err
        .field_errors()
        .and_then(|errors| errors.get(ContactField::Secret))
        .expect("secret failure expected");
    assert!(secret.has(&Violation::MissingUppercase));
    assert!(secret.has(&Violation::MissingSpecial));
    assert!(secret.has(&Violation::MissingDigit));
    assert_eq!(repo.get_contact(1).unwrap(), created);
}

#[test]
fn update_errors() {
    let repo = InMemoryContactRepository::new();
    assert_eq!(repo.update_contact(1, None).unwrap_err(), RepoError::NilInput);
    assert_eq!(
        repo.update_contact(1, Some(&maria())).unwrap_err(),
        RepoError::NotFound(Lookup::Id(1))
    );
}

#[test]
fn service_patch_keeps_blank_fields() {
    let service = ContactService::new(InMemoryContactRepository::new());
    let created = service.create_contact(Some(&maria())).unwrap();

    let patch = ContactPatch::new()
        .with(ContactField::Email, "maria.silva@example.org")
        .with(ContactField::Phone, "")
        .with(ContactField::Secret, "");
    let patched = service.patch_contact(created.id, &patch).unwrap();

    assert_eq!(patched.email, "maria.silva@example.org");
    assert_eq!(patched.phone, created.phone);
    assert_eq!(patched.secret, created.secret);
    assert_eq!(service.count().unwrap(), 1);
}

#[test]
fn service_patch_validates_merged_record() {
    let service = ContactService::new(InMemoryContactRepository::new());
    let created = service.create_contact(Some(&maria())).unwrap();

    let patch = ContactPatch::new().with(ContactField::VehiclePlate, "abc-1234");
    let err = service.patch_contact(created.id, &patch).unwrap_err();
    assert!(err
        .field_errors()
        .unwrap()
        .contains(ContactField::VehiclePlate));
    assert_eq!(service.get_contact(created.id).unwrap(), created);

    let err = service.patch_contact(42, &ContactPatch::new()).unwrap_err();
    assert!(err.is_not_found());
}
