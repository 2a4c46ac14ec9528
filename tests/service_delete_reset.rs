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

#[test]
fn delete_unknown_id_fails_with_not_found() {
    let service = setup();
    let err = service.delete(7).unwrap_err();
    assert!(matches!(err, AnnuaireError::NotFound { .. }));
}

#[test]
fn deleted_record_is_gone() {
    let service = setup();
    let created = service.create(input("Dupont", "Marie")).unwrap();
    let id = created.id.unwrap();
    service.delete(id).unwrap();
    let err = service.find_by_id(id).unwrap_err();
    assert!(matches!(err, AnnuaireError::NotFound { .. }));
}

#[test]
fn delete_removes_only_the_targeted_record() {
    let service = setup();
    let first = service.create(input("Dupont", "Marie")).unwrap();
    let second = service.create(input("Diop", "Moussa")).unwrap();
    service.delete(first.id.unwrap()).unwrap();
    let remaining = service.find_all().unwrap();
    assert_eq!(remaining, vec![second]);
}

#[test]
fn reset_empties_the_table_and_restarts_id_assignment() {
    let service = setup();
    service.create(input("Dupont", "Marie")).unwrap();
    service.create(input("Diop", "Moussa")).unwrap();

    service.reset_all().unwrap();
    assert!(service.find_all().unwrap().is_empty());

    // the next create gets the same starting id as a fresh store
    let recreated = service.create(input("Sall", "Awa")).unwrap();
    assert_eq!(recreated.id, Some(1));
}

#[test]
fn reset_on_an_empty_store_is_a_no_op() {
    let service = setup();
    service.reset_all().unwrap();
    assert!(service.find_all().unwrap().is_empty());
}
