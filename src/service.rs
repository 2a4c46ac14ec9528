//! The business core: validation, normalization and orchestration of the
//! personne store.
//!
//! `create` and `update` run the same pipeline: required-field checks,
//! phone format + uniqueness, address check, birth-date plausibility, then
//! normalization and a single save. Failures are detected eagerly and stop
//! the pipeline before anything is written. Each public operation takes
//! the store lock once, so one operation is one serialized unit of work;
//! cross-process writers racing the uniqueness check are governed by the
//! database alone.

use std::sync::{Mutex, MutexGuard};

use chrono::{Datelike, Local, NaiveDate};
use tracing::{info, warn};

use crate::error::{AnnuaireError, Result};
use crate::person::{Personne, PersonneInput};
use crate::store::PersonneStore;
use crate::validate;

const NOM_VIDE: &str = "Le nom ne peut pas être vide";
const NOM_INVALIDE: &str =
    "Le nom ne doit contenir que des lettres et des espaces (pas de chiffres ni symboles)";
const PRENOM_VIDE: &str = "Le prénom ne peut pas être vide";
const PRENOM_INVALIDE: &str =
    "Le prénom ne doit contenir que des lettres et des espaces (pas de chiffres ni symboles)";
const TELEPHONE_INVALIDE: &str =
    "Le numéro de téléphone doit être un numéro sénégalais valide (9 chiffres commençant par 7)";
const TELEPHONE_EXISTANT: &str = "Ce numéro de téléphone existe déjà";
const TELEPHONE_UTILISE: &str =
    "Ce numéro de téléphone est déjà utilisé par une autre personne";
const ADRESSE_INVALIDE: &str = "L'adresse contient des caractères invalides. \
    Seuls les lettres, chiffres, espaces, tirets, virgules et points sont autorisés";
const DATE_FUTURE: &str = "La date de naissance ne peut pas être dans le futur";
const AGE_MINIMUM: &str = "La personne doit avoir au moins 1 an";
const DATE_IRREALISTE: &str = "La date de naissance n'est pas réaliste";

pub struct PersonneService {
    store: Mutex<PersonneStore>,
}

impl PersonneService {
    pub fn new(store: PersonneStore) -> Self {
        Self { store: Mutex::new(store) }
    }

    fn store(&self) -> Result<MutexGuard<'_, PersonneStore>> {
        self.store.lock().map_err(|e| AnnuaireError::Lock(e.to_string()))
    }

    /// Create a new personne from validated, normalized input and return
    /// it with its assigned id.
    pub fn create(&self, input: PersonneInput) -> Result<Personne> {
        info!(nom = ?input.nom, prenom = ?input.prenom, "création d'une nouvelle personne");
        let mut store = self.store()?;

        let nom = input.nom.as_deref().unwrap_or("");
        let prenom = input.prenom.as_deref().unwrap_or("");
        check_required_name(nom, NOM_VIDE, NOM_INVALIDE)?;
        check_required_name(prenom, PRENOM_VIDE, PRENOM_INVALIDE)?;
        check_telephone(&store, input.telephone.as_deref(), None)?;
        check_adresse(input.adresse.as_deref())?;
        check_date_naissance(input.date_naissance, Local::now().date_naive())?;

        let personne = Personne {
            id: None,
            nom: nom.trim().to_uppercase(),
            prenom: capitalize_first(prenom.trim()),
            date_naissance: input.date_naissance,
            adresse: normalize_adresse(input.adresse),
            telephone: normalize_telephone(input.telephone),
        };
        let saved = store.save(personne)?;
        info!(id = saved.id, "personne créée");
        Ok(saved)
    }

    /// Replace every mutable field of an existing personne with the
    /// validated, normalized input. The not-found check runs before any
    /// validation so an unknown id never surfaces as a validation error.
    pub fn update(&self, id: i64, input: PersonneInput) -> Result<Personne> {
        info!(id, "modification de la personne");
        let mut store = self.store()?;

        let existing = store
            .find_by_id(id)?
            .ok_or_else(|| AnnuaireError::not_found(id))?;

        let nom = input.nom.as_deref().unwrap_or("");
        let prenom = input.prenom.as_deref().unwrap_or("");
        check_required_name(nom, NOM_VIDE, NOM_INVALIDE)?;
        check_required_name(prenom, PRENOM_VIDE, PRENOM_INVALIDE)?;
        check_telephone(&store, input.telephone.as_deref(), Some(id))?;
        check_adresse(input.adresse.as_deref())?;
        check_date_naissance(input.date_naissance, Local::now().date_naive())?;

        let updated = Personne {
            id: existing.id,
            nom: nom.trim().to_uppercase(),
            prenom: capitalize_first(prenom.trim()),
            date_naissance: input.date_naissance,
            adresse: normalize_adresse(input.adresse),
            telephone: normalize_telephone(input.telephone),
        };
        let saved = store.save(updated)?;
        info!(id, "personne modifiée");
        Ok(saved)
    }

    pub fn delete(&self, id: i64) -> Result<()> {
        info!(id, "suppression de la personne");
        let mut store = self.store()?;
        if !store.exists_by_id(id)? {
            return Err(AnnuaireError::not_found(id));
        }
        store.delete_by_id(id)?;
        info!(id, "personne supprimée");
        Ok(())
    }

    pub fn find_by_id(&self, id: i64) -> Result<Personne> {
        let store = self.store()?;
        store.find_by_id(id)?.ok_or_else(|| AnnuaireError::not_found(id))
    }

    pub fn find_all(&self) -> Result<Vec<Personne>> {
        let store = self.store()?;
        store.find_all()
    }

    pub fn search(
        &self,
        nom: Option<&str>,
        prenom: Option<&str>,
        telephone: Option<&str>,
    ) -> Result<Vec<Personne>> {
        let store = self.store()?;
        store.search(nom, prenom, telephone)
    }

    /// Delete every record and restart id assignment from its initial
    /// value. Safe to call on an empty store. Intended for non-production
    /// maintenance only.
    pub fn reset_all(&self) -> Result<()> {
        warn!("reset de la table personne");
        let mut store = self.store()?;
        store.delete_all()?;
        store.reset_id_sequence()?;
        info!("table réinitialisée");
        Ok(())
    }
}

fn check_required_name(value: &str, empty_msg: &str, invalid_msg: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(AnnuaireError::Validation(empty_msg.to_string()));
    }
    if !validate::is_valid_nom(value) {
        return Err(AnnuaireError::Validation(invalid_msg.to_string()));
    }
    Ok(())
}

fn check_telephone(
    store: &PersonneStore,
    telephone: Option<&str>,
    current_id: Option<i64>,
) -> Result<()> {
    let Some(telephone) = telephone.filter(|t| !t.is_empty()) else {
        return Ok(());
    };
    if !validate::is_valid_telephone(telephone) {
        return Err(AnnuaireError::Validation(TELEPHONE_INVALIDE.to_string()));
    }
    let cleaned = validate::strip_whitespace(telephone);
    if let Some(existing) = store.find_by_normalized_phone(&cleaned)? {
        match current_id {
            // a record may always collide with itself
            Some(id) if existing.id == Some(id) => {}
            Some(_) => {
                return Err(AnnuaireError::Validation(TELEPHONE_UTILISE.to_string()));
            }
            None => {
                return Err(AnnuaireError::Validation(TELEPHONE_EXISTANT.to_string()));
            }
        }
    }
    Ok(())
}

fn check_adresse(adresse: Option<&str>) -> Result<()> {
    let Some(adresse) = adresse.filter(|a| !a.is_empty()) else {
        return Ok(());
    };
    if !validate::is_valid_adresse(adresse) {
        return Err(AnnuaireError::Validation(ADRESSE_INVALIDE.to_string()));
    }
    Ok(())
}

fn check_date_naissance(date: Option<NaiveDate>, today: NaiveDate) -> Result<()> {
    let Some(date) = date else {
        return Ok(());
    };
    if date > today {
        return Err(AnnuaireError::Validation(DATE_FUTURE.to_string()));
    }
    let age = age_in_years(date, today);
    if age < 1 {
        return Err(AnnuaireError::Validation(AGE_MINIMUM.to_string()));
    }
    if age > 120 {
        return Err(AnnuaireError::Validation(DATE_IRREALISTE.to_string()));
    }
    Ok(())
}

/// Whole years between birth and today, counting a year only once the
/// birthday has passed.
fn age_in_years(birth: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - birth.year();
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        age -= 1;
    }
    age
}

/// Upper-case the first character and lower-case the rest. Internal words
/// are not re-capitalized.
fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
    }
}

fn normalize_adresse(adresse: Option<String>) -> Option<String> {
    adresse.map(|a| if a.is_empty() { a } else { a.trim().to_string() })
}

fn normalize_telephone(telephone: Option<String>) -> Option<String> {
    telephone.map(|t| {
        if t.is_empty() {
            t
        } else {
            validate::format_telephone(&validate::strip_whitespace(&t))
        }
    })
}
