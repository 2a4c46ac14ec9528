//! SQLite persistence for personne records.
//!
//! The store owns the connection and exposes the key-based CRUD and
//! pattern-search operations the service needs. Statements go through
//! `prepare_cached` so repeated calls reuse their compiled form.

use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;

use crate::error::Result;
use crate::person::Personne;

pub struct PersonneStore {
    conn: Connection,
}

impl PersonneStore {
    /// Open (or create) a durable database at the given path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::with_connection(Connection::open(path)?)
    }

    /// Open a fresh in-memory database, used by tests.
    pub fn open_in_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        // autoincrement keeps assigned ids in sqlite_sequence, which is
        // what makes reset_id_sequence possible
        conn.execute_batch(
            "
            create table if not exists personne (
                id integer primary key autoincrement,
                nom text not null,
                prenom text not null,
                date_naissance text null,
                adresse text null,
                telephone text null
            );
            ",
        )?;
        Ok(PersonneStore { conn })
    }

    fn row_to_personne(row: &Row) -> rusqlite::Result<Personne> {
        Ok(Personne {
            id: row.get(0)?,
            nom: row.get(1)?,
            prenom: row.get(2)?,
            date_naissance: row.get(3)?,
            adresse: row.get(4)?,
            telephone: row.get(5)?,
        })
    }

    /// Insert the record when it has no id yet, otherwise replace every
    /// field of the row with that id. Returns the persisted record with
    /// its assigned id.
    pub fn save(&mut self, personne: Personne) -> Result<Personne> {
        match personne.id {
            None => {
                self.conn
                    .prepare_cached(
                        "
                        insert into personne (nom, prenom, date_naissance, adresse, telephone)
                            values (?1, ?2, ?3, ?4, ?5)
                        ",
                    )?
                    .execute(params![
                        personne.nom,
                        personne.prenom,
                        personne.date_naissance,
                        personne.adresse,
                        personne.telephone,
                    ])?;
                let id = self.conn.last_insert_rowid();
                Ok(Personne { id: Some(id), ..personne })
            }
            Some(id) => {
                self.conn
                    .prepare_cached(
                        "
                        update personne
                            set nom = ?1, prenom = ?2, date_naissance = ?3,
                                adresse = ?4, telephone = ?5
                            where id = ?6
                        ",
                    )?
                    .execute(params![
                        personne.nom,
                        personne.prenom,
                        personne.date_naissance,
                        personne.adresse,
                        personne.telephone,
                        id,
                    ])?;
                Ok(personne)
            }
        }
    }

    pub fn find_by_id(&self, id: i64) -> Result<Option<Personne>> {
        let personne = self
            .conn
            .prepare_cached(
                "
                select id, nom, prenom, date_naissance, adresse, telephone
                    from personne
                    where id = ?1
                ",
            )?
            .query_row(params![id], Self::row_to_personne)
            .optional()?;
        Ok(personne)
    }

    pub fn find_all(&self) -> Result<Vec<Personne>> {
        let mut stmt = self.conn.prepare_cached(
            "
            select id, nom, prenom, date_naissance, adresse, telephone
                from personne
                order by id
            ",
        )?;
        let personnes = stmt
            .query_map([], Self::row_to_personne)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(personnes)
    }

    /// Combined search with conditional null filters: an absent filter
    /// matches everything, the provided ones are ANDed together. Name
    /// filters are case-insensitive substrings, the telephone filter a
    /// plain substring.
    pub fn search(
        &self,
        nom: Option<&str>,
        prenom: Option<&str>,
        telephone: Option<&str>,
    ) -> Result<Vec<Personne>> {
        let mut stmt = self.conn.prepare_cached(
            "
            select id, nom, prenom, date_naissance, adresse, telephone
                from personne
                where (?1 is null or lower(nom) like '%' || lower(?1) || '%')
                and (?2 is null or lower(prenom) like '%' || lower(?2) || '%')
                and (?3 is null or telephone like '%' || ?3 || '%')
                order by id
            ",
        )?;
        let personnes = stmt
            .query_map(params![nom, prenom, telephone], Self::row_to_personne)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(personnes)
    }

    /// Exact-match lookup on the whitespace-stripped telephone. The stored
    /// form is the grouped display format, so spaces are removed on the
    /// database side before comparing.
    pub fn find_by_normalized_phone(&self, cleaned: &str) -> Result<Option<Personne>> {
        let personne = self
            .conn
            .prepare_cached(
                "
                select id, nom, prenom, date_naissance, adresse, telephone
                    from personne
                    where replace(telephone, ' ', '') = ?1
                ",
            )?
            .query_row(params![cleaned], Self::row_to_personne)
            .optional()?;
        Ok(personne)
    }

    pub fn exists_by_id(&self, id: i64) -> Result<bool> {
        let found: Option<i64> = self
            .conn
            .prepare_cached("select id from personne where id = ?1")?
            .query_row(params![id], |row| row.get(0))
            .optional()?;
        Ok(found.is_some())
    }

    pub fn delete_by_id(&mut self, id: i64) -> Result<()> {
        self.conn
            .prepare_cached("delete from personne where id = ?1")?
            .execute(params![id])?;
        Ok(())
    }

    pub fn delete_all(&mut self) -> Result<()> {
        self.conn.prepare_cached("delete from personne")?.execute([])?;
        Ok(())
    }

    /// Reset the id assignment back to its initial value. Only meaningful
    /// right after `delete_all`.
    pub fn reset_id_sequence(&mut self) -> Result<()> {
        self.conn
            .execute("delete from sqlite_sequence where name = 'personne'", [])?;
        Ok(())
    }
}
