//! Denormalized variant: the `alunos` row carries at most one
//! subject/grade pair, overwritten on each save, and `professores` maps a
//! subject to a teacher name. There is no referential constraint between the
//! two; the pairing is resolved at read time by subject equality.

use rusqlite::{Connection, OptionalExtension};
use serde::Serialize;

use super::{require_text, StoreResult};

/// Shown in listings when a student's subject has no matching teacher row.
pub const UNASSIGNED_TEACHER: &str = "Não definido";
/// Returned by the subject lookup when no teacher covers the subject.
pub const TEACHER_NOT_FOUND: &str = "Professor não encontrado";

/// One display row of the student/teacher subject join.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryRow {
    pub student_id: i64,
    pub name: String,
    pub class_label: String,
    pub subject: Option<String>,
    pub value: Option<f64>,
    pub teacher: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Teacher {
    pub teacher_id: i64,
    pub name: String,
    pub subject: String,
}

pub fn create_student(conn: &Connection, name: &str, class_label: &str) -> StoreResult<i64> {
    let name = require_text(name, "name")?;
    let class_label = require_text(class_label, "classLabel")?;

    conn.execute(
        "INSERT INTO alunos(nome, turma) VALUES(?, ?)",
        (&name, &class_label),
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn delete_student(conn: &Connection, student_id: i64) -> StoreResult<bool> {
    let changed = conn.execute("DELETE FROM alunos WHERE aluno_id = ?", [student_id])?;
    Ok(changed > 0)
}

/// Overwrites the student's single subject/grade pair. Returns false when
/// the student id does not exist.
pub fn assign_mark(
    conn: &Connection,
    student_id: i64,
    subject: &str,
    value: f64,
) -> StoreResult<bool> {
    let subject = require_text(subject, "subject")?;

    let changed = conn.execute(
        "UPDATE alunos SET nota = ?, disciplina = ? WHERE aluno_id = ?",
        (value, &subject, student_id),
    )?;
    Ok(changed > 0)
}

pub fn create_teacher(conn: &Connection, name: &str, subject: &str) -> StoreResult<i64> {
    let name = require_text(name, "name")?;
    let subject = require_text(subject, "subject")?;

    conn.execute(
        "INSERT INTO professores(nome, disciplina) VALUES(?, ?)",
        (&name, &subject),
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn list_teachers(conn: &Connection) -> StoreResult<Vec<Teacher>> {
    let mut stmt = conn.prepare(
        "SELECT professor_id, nome, disciplina
         FROM professores
         ORDER BY professor_id",
    )?;
    let rows = stmt
        .query_map([], |row| {
            Ok(Teacher {
                teacher_id: row.get(0)?,
                name: row.get(1)?,
                subject: row.get(2)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

/// Distinct subjects that have at least one teacher, ordered.
pub fn list_subjects(conn: &Connection) -> StoreResult<Vec<String>> {
    let mut stmt = conn.prepare(
        "SELECT DISTINCT disciplina FROM professores ORDER BY disciplina",
    )?;
    let rows = stmt
        .query_map([], |row| row.get::<_, String>(0))?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

/// Equality lookup on the subject. The schema does not make subjects unique;
/// under duplicates the lowest teacher id wins. An unmatched subject yields
/// the [`TEACHER_NOT_FOUND`] sentinel, never an error.
pub fn teacher_for_subject(conn: &Connection, subject: &str) -> StoreResult<String> {
    let found: Option<String> = conn
        .query_row(
            "SELECT nome FROM professores
             WHERE disciplina = ?
             ORDER BY professor_id
             LIMIT 1",
            [subject],
            |row| row.get(0),
        )
        .optional()?;
    Ok(found.unwrap_or_else(|| TEACHER_NOT_FOUND.to_string()))
}

pub fn list_rows(conn: &Connection) -> StoreResult<Vec<RegistryRow>> {
    // Plain left join: duplicate subjects in professores duplicate student
    // rows here, exactly as they are displayed.
    let mut stmt = conn.prepare(
        "SELECT a.aluno_id, a.nome, a.turma, a.disciplina, a.nota,
                COALESCE(p.nome, ?) AS professor
         FROM alunos a
         LEFT JOIN professores p ON a.disciplina = p.disciplina
         ORDER BY a.aluno_id",
    )?;
    let rows = stmt
        .query_map([UNASSIGNED_TEACHER], registry_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

/// Case-insensitive substring match on the student name.
pub fn search_rows(conn: &Connection, name: &str) -> StoreResult<Vec<RegistryRow>> {
    let pattern = format!("%{}%", name.trim());
    let mut stmt = conn.prepare(
        "SELECT a.aluno_id, a.nome, a.turma, a.disciplina, a.nota,
                COALESCE(p.nome, ?) AS professor
         FROM alunos a
         LEFT JOIN professores p ON a.disciplina = p.disciplina
         WHERE a.nome LIKE ?
         ORDER BY a.aluno_id",
    )?;
    let rows = stmt
        .query_map((UNASSIGNED_TEACHER, &pattern), registry_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

fn registry_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RegistryRow> {
    Ok(RegistryRow {
        student_id: row.get(0)?,
        name: row.get(1)?,
        class_label: row.get(2)?,
        subject: row.get(3)?,
        value: row.get(4)?,
        teacher: row.get(5)?,
    })
}
