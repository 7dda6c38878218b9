//! Normalized variant: `alunos` plus one `notas` row per subject entry.
//! A grade cannot outlive its student, and a student does not outlive their
//! last grade.

use rusqlite::{Connection, OptionalExtension};
use serde::Serialize;

use super::{require_text, StoreResult};

/// One display row of the student/grade left join. Grade columns are null
/// for students that have no grades yet.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordRow {
    pub grade_id: Option<i64>,
    pub student_id: i64,
    pub name: String,
    pub class_label: String,
    pub subject: Option<String>,
    pub value: Option<f64>,
}

/// Outcome of [`delete_grade`].
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeDeletion {
    pub deleted: bool,
    pub student_removed: bool,
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

/// The student must exist; inserting against a missing student fails on the
/// foreign key and surfaces as a statement error.
pub fn create_grade(
    conn: &Connection,
    student_id: i64,
    subject: &str,
    value: f64,
) -> StoreResult<i64> {
    let subject = require_text(subject, "subject")?;

    conn.execute(
        "INSERT INTO notas(aluno_id, disciplina, nota) VALUES(?, ?, ?)",
        (student_id, &subject, value),
    )?;
    Ok(conn.last_insert_rowid())
}

/// Returns false when the grade id does not exist; the stored value is
/// untouched in that case.
pub fn update_grade(conn: &Connection, grade_id: i64, value: f64) -> StoreResult<bool> {
    let changed = conn.execute(
        "UPDATE notas SET nota = ? WHERE nota_id = ?",
        (value, grade_id),
    )?;
    Ok(changed > 0)
}

/// Deletes a grade and, when it was the student's last one, the student too.
/// Both steps run in a single transaction. The owning student is resolved
/// from the grade row itself, so an absent grade id is a no-op that cannot
/// touch any student.
pub fn delete_grade(conn: &Connection, grade_id: i64) -> StoreResult<GradeDeletion> {
    let tx = conn.unchecked_transaction()?;

    let owner: Option<i64> = tx
        .query_row(
            "SELECT aluno_id FROM notas WHERE nota_id = ?",
            [grade_id],
            |row| row.get(0),
        )
        .optional()?;
    let Some(student_id) = owner else {
        return Ok(GradeDeletion {
            deleted: false,
            student_removed: false,
        });
    };

    tx.execute("DELETE FROM notas WHERE nota_id = ?", [grade_id])?;

    let remaining: i64 = tx.query_row(
        "SELECT COUNT(*) FROM notas WHERE aluno_id = ?",
        [student_id],
        |row| row.get(0),
    )?;
    let student_removed = remaining == 0;
    if student_removed {
        tx.execute("DELETE FROM alunos WHERE aluno_id = ?", [student_id])?;
    }

    tx.commit()?;
    Ok(GradeDeletion {
        deleted: true,
        student_removed,
    })
}

/// The student's grades go with them via ON DELETE CASCADE.
pub fn delete_student(conn: &Connection, student_id: i64) -> StoreResult<bool> {
    let changed = conn.execute("DELETE FROM alunos WHERE aluno_id = ?", [student_id])?;
    Ok(changed > 0)
}

pub fn list_records(conn: &Connection) -> StoreResult<Vec<RecordRow>> {
    let mut stmt = conn.prepare(
        "SELECT n.nota_id, a.aluno_id, a.nome, a.turma, n.disciplina, n.nota
         FROM alunos a
         LEFT JOIN notas n ON a.aluno_id = n.aluno_id
         ORDER BY a.aluno_id, n.nota_id",
    )?;
    let rows = stmt
        .query_map([], record_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

/// Case-insensitive substring match on the student name. An empty needle
/// matches everything.
pub fn search_records(conn: &Connection, name: &str) -> StoreResult<Vec<RecordRow>> {
    let pattern = format!("%{}%", name.trim());
    let mut stmt = conn.prepare(
        "SELECT n.nota_id, a.aluno_id, a.nome, a.turma, n.disciplina, n.nota
         FROM alunos a
         LEFT JOIN notas n ON a.aluno_id = n.aluno_id
         WHERE a.nome LIKE ?
         ORDER BY a.aluno_id, n.nota_id",
    )?;
    let rows = stmt
        .query_map([&pattern], record_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

fn record_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RecordRow> {
    Ok(RecordRow {
        grade_id: row.get(0)?,
        student_id: row.get(1)?,
        name: row.get(2)?,
        class_label: row.get(3)?,
        subject: row.get(4)?,
        value: row.get(5)?,
    })
}
