use super::{CorpusError, PuzzleCorpus};
use crate::puzzle::{parse_move_list, parse_tag_list};
use crate::{NewPuzzle, Puzzle, PuzzleId};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

/// Thread-safe database connection pool.
pub type DbPool = Arc<Mutex<Connection>>;

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS puzzles (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        puzzle_key TEXT NOT NULL UNIQUE,
        fen TEXT NOT NULL,
        moves TEXT NOT NULL,
        rating INTEGER NOT NULL DEFAULT 1500 CHECK (rating BETWEEN 0 AND 3000),
        rating_deviation INTEGER NOT NULL DEFAULT 100,
        popularity INTEGER NOT NULL DEFAULT 50,
        nb_plays INTEGER NOT NULL DEFAULT 0,
        themes TEXT NOT NULL DEFAULT '',
        game_url TEXT NOT NULL DEFAULT '',
        opening_tags TEXT NOT NULL DEFAULT '',
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    );

    CREATE INDEX IF NOT EXISTS idx_puzzles_rating ON puzzles(rating);
";

const SELECT_COLUMNS: &str = "SELECT id, puzzle_key, fen, moves, rating, rating_deviation,
        popularity, nb_plays, themes, game_url, opening_tags
    FROM puzzles";

/// Puzzles stored in a SQLite `puzzles` table.
///
/// Ids come from an `AUTOINCREMENT` key, so a deleted id is never handed
/// out again.
#[derive(Clone)]
pub struct SqliteCorpus {
    db: DbPool,
}

impl SqliteCorpus {
    /// Opens (or creates) the database at `path` and ensures the schema.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, CorpusError> {
        Self::from_connection(Connection::open(path)?)
    }

    pub fn in_memory() -> Result<Self, CorpusError> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self, CorpusError> {
        conn.execute_batch(SCHEMA)?;
        Ok(SqliteCorpus {
            db: Arc::new(Mutex::new(conn)),
        })
    }

    /// The shared connection, for callers that keep other tables alongside.
    pub fn pool(&self) -> DbPool {
        Arc::clone(&self.db)
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>, CorpusError> {
        self.db.lock().map_err(|_| CorpusError::Poisoned)
    }

    /// Stores a new puzzle. Fails if the key is already present.
    pub fn insert(&self, puzzle: &NewPuzzle) -> Result<PuzzleId, CorpusError> {
        let conn = self.conn()?;
        let now = chrono::Utc::now().to_rfc3339();
        conn.execute(
            "INSERT INTO puzzles (puzzle_key, fen, moves, rating, rating_deviation, popularity,
                nb_plays, themes, game_url, opening_tags, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?11)",
            params![
                puzzle.key,
                puzzle.fen,
                puzzle.moves.join(" "),
                puzzle.rating,
                puzzle.rating_deviation,
                puzzle.popularity,
                puzzle.nb_plays,
                puzzle.themes.join(" "),
                puzzle.game_url,
                puzzle.opening_tags.join(" "),
                now,
            ],
        )?;
        Ok(PuzzleId(conn.last_insert_rowid()))
    }

    /// Stores a puzzle, replacing the fields of an existing one with the
    /// same key. The id of an existing puzzle is kept.
    pub fn upsert(&self, puzzle: &NewPuzzle) -> Result<PuzzleId, CorpusError> {
        let conn = self.conn()?;
        let now = chrono::Utc::now().to_rfc3339();
        conn.execute(
            "INSERT INTO puzzles (puzzle_key, fen, moves, rating, rating_deviation, popularity,
                nb_plays, themes, game_url, opening_tags, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?11)
             ON CONFLICT(puzzle_key) DO UPDATE SET
                fen = excluded.fen,
                moves = excluded.moves,
                rating = excluded.rating,
                rating_deviation = excluded.rating_deviation,
                popularity = excluded.popularity,
                nb_plays = excluded.nb_plays,
                themes = excluded.themes,
                game_url = excluded.game_url,
                opening_tags = excluded.opening_tags,
                updated_at = excluded.updated_at",
            params![
                puzzle.key,
                puzzle.fen,
                puzzle.moves.join(" "),
                puzzle.rating,
                puzzle.rating_deviation,
                puzzle.popularity,
                puzzle.nb_plays,
                puzzle.themes.join(" "),
                puzzle.game_url,
                puzzle.opening_tags.join(" "),
                now,
            ],
        )?;
        let id = conn.query_row(
            "SELECT id FROM puzzles WHERE puzzle_key = ?1",
            [&puzzle.key],
            |row| row.get(0),
        )?;
        Ok(PuzzleId(id))
    }

    pub fn find_by_key(&self, key: &str) -> Result<Option<Puzzle>, CorpusError> {
        let conn = self.conn()?;
        let puzzle = conn
            .query_row(
                &format!("{SELECT_COLUMNS} WHERE puzzle_key = ?1"),
                [key],
                row_to_puzzle,
            )
            .optional()?;
        Ok(puzzle)
    }

    pub fn count(&self) -> Result<usize, CorpusError> {
        let conn = self.conn()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM puzzles", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}

fn row_to_puzzle(row: &Row<'_>) -> rusqlite::Result<Puzzle> {
    Ok(Puzzle {
        id: PuzzleId(row.get(0)?),
        key: row.get(1)?,
        fen: row.get(2)?,
        moves: parse_move_list(&row.get::<_, String>(3)?),
        rating: row.get(4)?,
        rating_deviation: row.get(5)?,
        popularity: row.get(6)?,
        nb_plays: row.get(7)?,
        themes: parse_tag_list(&row.get::<_, String>(8)?),
        game_url: row.get(9)?,
        opening_tags: parse_tag_list(&row.get::<_, String>(10)?),
    })
}

impl PuzzleCorpus for SqliteCorpus {
    fn list_ids(&self) -> Result<Vec<PuzzleId>, CorpusError> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare("SELECT id FROM puzzles ORDER BY id")?;
        let ids = stmt
            .query_map([], |row| row.get(0).map(PuzzleId))?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(ids)
    }

    fn fetch(&self, id: PuzzleId) -> Result<Option<Puzzle>, CorpusError> {
        let conn = self.conn()?;
        let puzzle = conn
            .query_row(&format!("{SELECT_COLUMNS} WHERE id = ?1"), [id.0], row_to_puzzle)
            .optional()?;
        Ok(puzzle)
    }

    fn delete(&self, id: PuzzleId) -> Result<bool, CorpusError> {
        let conn = self.conn()?;
        let removed = conn.execute("DELETE FROM puzzles WHERE id = ?1", [id.0])?;
        Ok(removed > 0)
    }
}
