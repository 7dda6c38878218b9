use std::path::Path;

use rusqlite::Connection;

/// Open connections for one selected workspace, one database per variant.
pub struct Workspace {
    pub gradebook: Connection,
    pub registry: Connection,
}

pub fn open_workspace(dir: &Path) -> anyhow::Result<Workspace> {
    std::fs::create_dir_all(dir)?;
    Ok(Workspace {
        gradebook: open_gradebook(dir)?,
        registry: open_registry(dir)?,
    })
}

/// Normalized variant: students with one grade row per subject entry.
pub fn open_gradebook(dir: &Path) -> anyhow::Result<Connection> {
    let conn = Connection::open(dir.join("gradebook.sqlite3"))?;
    conn.execute("PRAGMA foreign_keys = ON", [])?;
    init_gradebook_schema(&conn)?;
    Ok(conn)
}

/// Denormalized variant: the student row carries its subject/grade pair,
/// teachers are a directory keyed by subject.
pub fn open_registry(dir: &Path) -> anyhow::Result<Connection> {
    let conn = Connection::open(dir.join("registry.sqlite3"))?;
    conn.execute("PRAGMA foreign_keys = ON", [])?;
    init_registry_schema(&conn)?;
    Ok(conn)
}

// Schema setup only ever creates what is absent; an existing schema is never
// altered and existing rows are never touched.

pub fn init_gradebook_schema(conn: &Connection) -> anyhow::Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS alunos(
            aluno_id INTEGER PRIMARY KEY,
            nome TEXT NOT NULL,
            turma TEXT NOT NULL
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS notas(
            nota_id INTEGER PRIMARY KEY,
            aluno_id INTEGER NOT NULL REFERENCES alunos(aluno_id) ON DELETE CASCADE,
            disciplina TEXT NOT NULL,
            nota NUMERIC(5,2) NOT NULL
        )",
        [],
    )?;
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_notas_aluno ON notas(aluno_id)",
        [],
    )?;

    Ok(())
}

pub fn init_registry_schema(conn: &Connection) -> anyhow::Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS alunos(
            aluno_id INTEGER PRIMARY KEY,
            nome TEXT NOT NULL,
            turma TEXT NOT NULL,
            disciplina TEXT,
            nota NUMERIC(5,2)
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS professores(
            professor_id INTEGER PRIMARY KEY,
            nome TEXT NOT NULL,
            disciplina TEXT NOT NULL
        )",
        [],
    )?;
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_professores_disciplina ON professores(disciplina)",
        [],
    )?;

    Ok(())
}
