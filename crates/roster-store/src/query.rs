use rusqlite::types::Value;

/// Directory filters. Section filters (term, year, subject) must all hold
/// for one assigned section; `text` matches email or either name part.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct InstructorQuery {
    pub term: Option<String>,
    pub year: Option<i32>,
    pub subject: Option<String>,
    pub text: Option<String>,
}

pub struct SqlQuery {
    pub sql: String,
    pub params: Vec<Value>,
}

pub(crate) const DISPLAY_NAME_SQL: &str = "COALESCE(
    NULLIF(TRIM(COALESCE(i.first_name || ' ', '') || i.last_name), ''),
    substr(i.email, 1, instr(i.email, '@') - 1)
)";

impl InstructorQuery {
    pub fn is_empty(&self) -> bool {
        self.section_filters().is_empty() && non_blank(self.text.as_deref()).is_none()
    }

    fn section_filters(&self) -> Vec<(&'static str, Value)> {
        let mut filters = Vec::new();
        if let Some(term) = non_blank(self.term.as_deref()) {
            filters.push(("s.term = ? COLLATE NOCASE", Value::from(term.to_string())));
        }
        if let Some(year) = self.year.filter(|year| *year != 0) {
            filters.push(("s.year = ?", Value::from(year)));
        }
        if let Some(subject) = non_blank(self.subject.as_deref()) {
            filters.push(("c.subject_prefix LIKE ?", Value::from(format!("{}%", subject))));
        }
        filters
    }

    pub fn to_sql(&self) -> SqlQuery {
        let mut clauses: Vec<String> = Vec::new();
        let mut params: Vec<Value> = Vec::new();

        let section = self.section_filters();
        if !section.is_empty() {
            let mut sub = String::from(
                "EXISTS (SELECT 1 FROM instructor_assignments ia
                 INNER JOIN sections s ON s.section_id = ia.section_id
                 INNER JOIN courses c ON c.course_id = s.course_id
                 WHERE ia.instructor_id = i.instructor_id",
            );
            for (clause, value) in section {
                sub.push_str(" AND ");
                sub.push_str(clause);
                params.push(value);
            }
            sub.push(')');
            clauses.push(sub);
        }

        if let Some(text) = non_blank(self.text.as_deref()) {
            clauses.push(
                "(i.email LIKE ? OR i.first_name LIKE ? OR i.last_name LIKE ?)".to_string(),
            );
            let like = format!("%{}%", text);
            params.push(Value::from(like.clone()));
            params.push(Value::from(like.clone()));
            params.push(Value::from(like));
        }

        let mut sql = String::from(
            "SELECT i.instructor_id, i.first_name, i.last_name, i.email FROM instructors i",
        );
        if !clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.join(" AND "));
        }
        sql.push_str(&format!(
            " ORDER BY {} COLLATE NOCASE ASC, i.email COLLATE NOCASE ASC",
            DISPLAY_NAME_SQL
        ));

        SqlQuery { sql, params }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_query_selects_everything() {
        let query = InstructorQuery::default();
        assert!(query.is_empty());
        let sql = query.to_sql();
        assert!(!sql.sql.contains("WHERE"));
        assert!(sql.params.is_empty());
    }

    #[test]
    fn section_filters_share_one_exists_clause() {
        let query = InstructorQuery {
            term: Some("Fall".to_string()),
            year: Some(2025),
            subject: Some("CHM".to_string()),
            text: Some("smith".to_string()),
        };
        let sql = query.to_sql();
        assert_eq!(sql.sql.matches("EXISTS").count(), 1);
        assert_eq!(sql.params.len(), 6);
        assert_eq!(sql.params[2], Value::from("CHM%".to_string()));
    }

    #[test]
    fn zero_year_and_blank_text_are_ignored() {
        let query = InstructorQuery {
            year: Some(0),
            text: Some("  ".to_string()),
            ..Default::default()
        };
        assert!(query.is_empty());
    }
}
