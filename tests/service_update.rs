use annuaire::error::AnnuaireError;
use annuaire::person::PersonneInput;
use annuaire::service::PersonneService;
use annuaire::store::PersonneStore;

fn setup() -> PersonneService {
    PersonneService::new(PersonneStore::open_in_memory().unwrap())
}

fn input(nom: &str, prenom: &str) -> PersonneInput {
    PersonneInput {
        nom: Some(nom.to_string()),
        prenom: Some(prenom.to_string()),
        ..Default::default()
    }
}

fn with_phone(nom: &str, prenom: &str, telephone: &str) -> PersonneInput {
    PersonneInput { telephone: Some(telephone.to_string()), ..input(nom, prenom) }
}

#[test]
fn update_unknown_id_fails_with_not_found() {
    let service = setup();
    let err = service.update(999, input("Dupont", "Marie")).unwrap_err();
    assert!(matches!(err, AnnuaireError::NotFound { .. }));
    assert!(err.to_string().contains("999"));
}

#[test]
fn not_found_takes_precedence_over_validation() {
    let service = setup();
    // deliberately invalid input on an unknown id: the not-found check
    // must fire before any validation does
    let bad = PersonneInput { telephone: Some("abc".to_string()), ..Default::default() };
    let err = service.update(42, bad).unwrap_err();
    assert!(matches!(err, AnnuaireError::NotFound { .. }));
}

#[test]
fn update_replaces_every_field() {
    let service = setup();
    let mut original = with_phone("Dupont", "Marie", "771234567");
    original.adresse = Some("Dakar".to_string());
    let created = service.create(original).unwrap();
    let id = created.id.unwrap();

    // update drops the optional fields entirely
    let updated = service.update(id, input("Diop", "Moussa")).unwrap();
    assert_eq!(updated.id, Some(id));
    assert_eq!(updated.nom, "DIOP");
    assert_eq!(updated.prenom, "Moussa");
    assert_eq!(updated.telephone, None);
    assert_eq!(updated.adresse, None);

    let reread = service.find_by_id(id).unwrap();
    assert_eq!(reread, updated);
}

#[test]
fn update_allows_colliding_with_own_phone() {
    let service = setup();
    let created = service.create(with_phone("Dupont", "Marie", "771234567")).unwrap();
    let id = created.id.unwrap();

    // same digits, different spacing, same record
    let updated = service.update(id, with_phone("Dupont", "Marie", "77 123 45 67")).unwrap();
    assert_eq!(updated.telephone.as_deref(), Some("77 123 45 67"));
}

#[test]
fn update_rejects_phone_held_by_another_record() {
    let service = setup();
    service.create(with_phone("Dupont", "Marie", "771234567")).unwrap();
    let other = service.create(with_phone("Diop", "Moussa", "781112233")).unwrap();

    let err = service
        .update(other.id.unwrap(), with_phone("Diop", "Moussa", "77 123 45 67"))
        .unwrap_err();
    assert!(matches!(err, AnnuaireError::Validation(_)));
    assert!(err.to_string().contains("déjà utilisé par une autre personne"));
}

#[test]
fn update_normalizes_like_create() {
    let service = setup();
    let created = service.create(input("Dupont", "Marie")).unwrap();
    let updated = service.update(created.id.unwrap(), input("  sall ", "awa")).unwrap();
    assert_eq!(updated.nom, "SALL");
    assert_eq!(updated.prenom, "Awa");
}

#[test]
fn update_with_blank_nom_fails_with_required_message() {
    let service = setup();
    let created = service.create(input("Dupont", "Marie")).unwrap();
    let err = service.update(created.id.unwrap(), input("   ", "Marie")).unwrap_err();
    assert_eq!(err.to_string(), "Le nom ne peut pas être vide");
}

#[test]
fn failed_update_leaves_the_record_untouched() {
    let service = setup();
    let created = service.create(with_phone("Dupont", "Marie", "771234567")).unwrap();
    let id = created.id.unwrap();

    let err = service.update(id, with_phone("Dupont", "Marie", "999")).unwrap_err();
    assert!(matches!(err, AnnuaireError::Validation(_)));
    assert_eq!(service.find_by_id(id).unwrap(), created);
}
