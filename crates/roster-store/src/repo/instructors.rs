use crate::error::{Result, StoreError};
use crate::query::InstructorQuery;
use roster_core::domain::{normalize_email, Instructor, InstructorId, NameRefinement};
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};

#[derive(Debug, Clone)]
pub struct InstructorNew {
    pub first_name: Option<String>,
    pub last_name: String,
    pub email: String,
}

pub struct InstructorsRepo<'a> {
    conn: &'a Connection,
}

impl<'a> InstructorsRepo<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    pub fn get(&self, id: InstructorId) -> Result<Option<Instructor>> {
        let instructor = self
            .conn
            .query_row(
                "SELECT instructor_id, first_name, last_name, email
                 FROM instructors WHERE instructor_id = ?1;",
                [id.as_i64()],
                instructor_from_row,
            )
            .optional()?;
        Ok(instructor)
    }

    pub fn find_by_email(&self, email: &str) -> Result<Option<Instructor>> {
        let Some(email) = normalize_email(email) else {
            return Ok(None);
        };
        let instructor = self
            .conn
            .query_row(
                "SELECT instructor_id, first_name, last_name, email
                 FROM instructors WHERE email = ?1;",
                [email],
                instructor_from_row,
            )
            .optional()?;
        Ok(instructor)
    }

    pub fn create(&self, input: InstructorNew) -> Result<Instructor> {
        let email = normalize_email(&input.email)
            .ok_or_else(|| roster_core::CoreError::InvalidEmail(input.email.clone()))?;
        if self.find_by_email(&email)?.is_some() {
            return Err(StoreError::DuplicateEmail(email));
        }
        let first_name = input
            .first_name
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty());
        let instructor = Instructor {
            id: InstructorId(0),
            first_name,
            last_name: input.last_name.trim().to_string(),
            email,
        };
        instructor.validate()?;

        self.conn.execute(
            "INSERT INTO instructors (first_name, last_name, email) VALUES (?1, ?2, ?3);",
            params![instructor.first_name, instructor.last_name, instructor.email],
        )?;
        Ok(Instructor {
            id: InstructorId(self.conn.last_insert_rowid()),
            ..instructor
        })
    }

    /// Returns false when the email is already taken; the stored row is untouched.
    pub fn insert_or_ignore(&self, input: &InstructorNew) -> Result<bool> {
        let Some(email) = normalize_email(&input.email) else {
            return Ok(false);
        };
        let inserted = self.conn.execute(
            "INSERT OR IGNORE INTO instructors (first_name, last_name, email)
             VALUES (?1, ?2, ?3);",
            params![input.first_name, input.last_name.trim(), email],
        )?;
        Ok(inserted > 0)
    }

    pub fn refine(&self, id: InstructorId, refinement: &NameRefinement) -> Result<bool> {
        if refinement.is_empty() {
            return Ok(false);
        }
        let updated = self.conn.execute(
            "UPDATE instructors
             SET first_name = COALESCE(?2, first_name),
                 last_name = COALESCE(?3, last_name)
             WHERE instructor_id = ?1;",
            params![id.as_i64(), refinement.first_name, refinement.last_name],
        )?;
        if updated == 0 {
            return Err(StoreError::UnknownInstructor(id));
        }
        Ok(true)
    }

    pub fn count(&self) -> Result<i64> {
        let count = self
            .conn
            .query_row("SELECT COUNT(1) FROM instructors;", [], |row| row.get(0))?;
        Ok(count)
    }

    pub fn list_all(&self) -> Result<Vec<Instructor>> {
        let mut stmt = self.conn.prepare(
            "SELECT instructor_id, first_name, last_name, email
             FROM instructors ORDER BY instructor_id ASC;",
        )?;
        let rows = stmt.query_map([], instructor_from_row)?;
        let mut instructors = Vec::new();
        for row in rows {
            instructors.push(row?);
        }
        Ok(instructors)
    }

    pub fn list(&self, query: &InstructorQuery) -> Result<Vec<Instructor>> {
        let sql = query.to_sql();
        let mut stmt = self.conn.prepare(&sql.sql)?;
        let rows = stmt.query_map(params_from_iter(sql.params), instructor_from_row)?;
        let mut instructors = Vec::new();
        for row in rows {
            instructors.push(row?);
        }
        Ok(instructors)
    }

    /// Unique emails of the matching instructors, in directory order. An
    /// unfiltered query includes instructors with no section assignment.
    pub fn email_list(&self, query: &InstructorQuery) -> Result<Vec<String>> {
        let mut emails: Vec<String> = Vec::new();
        for instructor in self.list(query)? {
            if !emails
                .iter()
                .any(|email| email.eq_ignore_ascii_case(&instructor.email))
            {
                emails.push(instructor.email);
            }
        }
        Ok(emails)
    }
}

fn instructor_from_row(row: &Row<'_>) -> rusqlite::Result<Instructor> {
    Ok(Instructor {
        id: InstructorId(row.get(0)?),
        first_name: row.get(1)?,
        last_name: row.get(2)?,
        email: row.get(3)?,
    })
}
