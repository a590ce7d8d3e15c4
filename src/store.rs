use std::fs::{self, File};
use std::io::Read;
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use serde::{Deserialize, Serialize};

use crate::error::LoadError;

const COLUMN_SOURCE: &str = "source";
const COLUMN_TARGET: &str = "target";
const COLUMN_RELATION: &str = "relation";
/// Accepted alias for [`COLUMN_RELATION`].
const COLUMN_RELATION_ALIAS: &str = "edge";

/// One `(source, relation, target)` fact.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Triplet {
    pub source: String,
    pub relation: String,
    pub target: String,
}

impl Triplet {
    pub fn new(
        source: impl Into<String>,
        relation: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            relation: relation.into(),
            target: target.into(),
        }
    }
}

/// Immutable, ordered collection of triplets. Clones share the same rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Triplets {
    rows: Arc<[Triplet]>,
}

impl Triplets {
    pub fn new(rows: Vec<Triplet>) -> Self {
        Self { rows: rows.into() }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn as_slice(&self) -> &[Triplet] {
        &self.rows
    }
}

impl Deref for Triplets {
    type Target = [Triplet];

    fn deref(&self) -> &Self::Target {
        &self.rows
    }
}

impl FromIterator<Triplet> for Triplets {
    fn from_iter<T: IntoIterator<Item = Triplet>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Triplets {
    type Item = &'a Triplet;
    type IntoIter = std::slice::Iter<'a, Triplet>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

/// Positions of the columns we care about inside a header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ColumnMap {
    source: usize,
    target: usize,
    relation: Option<usize>,
}

impl ColumnMap {
    fn from_headers(headers: &csv::StringRecord) -> Result<Self, LoadError> {
        let names: Vec<String> = headers.iter().map(|h| h.trim().to_lowercase()).collect();
        let find = |name: &str| names.iter().position(|n| n == name);

        let source = find(COLUMN_SOURCE).ok_or_else(|| missing_column(COLUMN_SOURCE, &names))?;
        let target = find(COLUMN_TARGET).ok_or_else(|| missing_column(COLUMN_TARGET, &names))?;
        let relation = find(COLUMN_RELATION).or_else(|| find(COLUMN_RELATION_ALIAS));

        Ok(Self {
            source,
            target,
            relation,
        })
    }

    /// The row as a triplet, `None` when either endpoint cell is blank.
    fn triplet(&self, record: &csv::StringRecord) -> Option<Triplet> {
        let field = |idx: usize| record.get(idx).unwrap_or_default();
        let source = field(self.source);
        let target = field(self.target);
        if is_blank(source) || is_blank(target) {
            return None;
        }
        Some(Triplet {
            source: source.to_string(),
            relation: self.relation.map(field).unwrap_or_default().to_string(),
            target: target.to_string(),
        })
    }
}

fn is_blank(cell: &str) -> bool {
    cell.trim().is_empty()
}

fn missing_column(name: &str, found: &[String]) -> LoadError {
    LoadError::SchemaInvalid(format!(
        "missing required column '{name}' (found: {})",
        found.join(", ")
    ))
}

/// Reads a header-named delimited table of triplets.
///
/// Column names are matched case-insensitively; `edge` is accepted in place
/// of `relation`, and a table with neither gets empty relation labels.
/// Rows with a blank source or target are skipped. Cell values are kept
/// verbatim.
pub fn load_from_reader<R: Read>(reader: R) -> Result<Triplets, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let columns = ColumnMap::from_headers(reader.headers()?)?;
    if columns.relation.is_none() {
        log::warn!("no relation column found, relation labels will be empty");
    }

    let mut rows = Vec::new();
    let mut skipped = 0usize;
    for record in reader.records() {
        match columns.triplet(&record?) {
            Some(t) => rows.push(t),
            None => skipped += 1,
        }
    }
    if skipped > 0 {
        log::warn!("skipped {skipped} rows with a blank source or target");
    }

    Ok(Triplets::new(rows))
}

/// Loads the triplet table at `path`.
pub fn load(path: impl AsRef<Path>) -> Result<Triplets, LoadError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|err| match err.kind() {
        std::io::ErrorKind::NotFound => LoadError::NotFound(path.to_path_buf()),
        _ => LoadError::Io(err),
    })?;

    let triplets = load_from_reader(file)?;
    log::info!("loaded {} triplets from {}", triplets.len(), path.display());
    Ok(triplets)
}

/// Loads the table, degrading to an empty store on failure.
///
/// The error is handed back so it can be shown to the user.
pub fn load_or_empty(path: impl AsRef<Path>) -> (Triplets, Option<LoadError>) {
    match load(path) {
        Ok(triplets) => (triplets, None),
        Err(err) => {
            log::warn!("{err}, continuing with an empty store");
            (Triplets::empty(), Some(err))
        }
    }
}

/// Process-wide triplet store, loaded on first access.
///
/// The table is read again only when the backing file's modification time
/// changes or the cache is explicitly invalidated.
#[derive(Debug)]
pub struct StoreCache {
    path: PathBuf,
    triplets: Triplets,
    last_error: Option<LoadError>,
    /// Modification time observed at the last load.
    modified: Option<SystemTime>,
    loaded: bool,
    generation: u64,
}

impl StoreCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            triplets: Triplets::empty(),
            last_error: None,
            modified: None,
            loaded: false,
            generation: 0,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the cached triplets, reloading them if the file changed.
    pub fn get(&mut self) -> Triplets {
        let modified = self.current_mtime();
        if !self.loaded || modified != self.modified {
            if self.loaded {
                log::info!("{} changed on disk, reloading", self.path.display());
            }
            self.reload(modified);
        }
        self.triplets.clone()
    }

    /// Forces a reload on the next [`StoreCache::get`].
    pub fn invalidate(&mut self) {
        self.loaded = false;
    }

    /// The error of the most recent load, if it failed.
    pub fn last_error(&self) -> Option<&LoadError> {
        self.last_error.as_ref()
    }

    /// Incremented on every load; lets views detect a changed store.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    fn reload(&mut self, modified: Option<SystemTime>) {
        let (triplets, err) = load_or_empty(&self.path);
        self.triplets = triplets;
        self.last_error = err;
        self.modified = modified;
        self.loaded = true;
        self.generation += 1;
    }

    fn current_mtime(&self) -> Option<SystemTime> {
        fs::metadata(&self.path)
            .and_then(|meta| meta.modified())
            .ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn reads_canonical_columns() {
        let data = "source,relation,target\nNCT001,treats,DrugA\nDrugA,has_condition,CancerX\n";
        let t = load_from_reader(data.as_bytes()).unwrap();
        assert_eq!(t.len(), 2);
        assert_eq!(t[0], Triplet::new("NCT001", "treats", "DrugA"));
        assert_eq!(t[1], Triplet::new("DrugA", "has_condition", "CancerX"));
    }

    #[test]
    fn normalizes_case_and_edge_alias() {
        let data = "Target, SOURCE ,Edge\nDrugA,NCT001,treats\n";
        let t = load_from_reader(data.as_bytes()).unwrap();
        assert_eq!(t[0], Triplet::new("NCT001", "treats", "DrugA"));
    }

    #[test]
    fn relation_wins_over_alias() {
        let data = "source,edge,relation,target\nA,ignored,used,B\n";
        let t = load_from_reader(data.as_bytes()).unwrap();
        assert_eq!(t[0].relation, "used");
    }

    #[test]
    fn missing_relation_column_gives_empty_labels() {
        let data = "source,target\nA,B\n";
        let t = load_from_reader(data.as_bytes()).unwrap();
        assert_eq!(t[0], Triplet::new("A", "", "B"));
    }

    #[test]
    fn blank_endpoints_are_skipped() {
        let data = "source,relation,target\nNCT001,treats,\n,has_condition,CancerX\n  ,r,B\nA,,B\n";
        let t = load_from_reader(data.as_bytes()).unwrap();
        assert_eq!(t.as_slice(), &[Triplet::new("A", "", "B")]);
    }

    #[test]
    fn cell_values_are_not_trimmed() {
        let data = "source,relation,target\n DrugA ,treats,CancerX\nDrugA,treats,CancerX\n";
        let t = load_from_reader(data.as_bytes()).unwrap();
        assert_eq!(t[0].source, " DrugA ");
        assert_eq!(t[1].source, "DrugA");
    }

    #[test]
    fn missing_endpoint_column_is_schema_error() {
        let data = "source,relation\nA,r\n";
        let err = load_from_reader(data.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::SchemaInvalid(msg) if msg.contains("target")));
    }

    #[test]
    fn ragged_row_is_csv_error() {
        let data = "source,relation,target\nA,r\n";
        let err = load_from_reader(data.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::Csv(_)));
    }

    #[test]
    fn missing_file_is_not_found() {
        let err = load("/definitely/not/here/triplets.csv").unwrap_err();
        assert!(matches!(err, LoadError::NotFound(_)));
    }

    #[test]
    fn load_or_empty_recovers() {
        let (t, err) = load_or_empty("/definitely/not/here/triplets.csv");
        assert!(t.is_empty());
        assert!(err.is_some());
    }

    #[test]
    fn cache_loads_once_for_missing_file() {
        let mut cache = StoreCache::new("/definitely/not/here/triplets.csv");
        assert!(cache.get().is_empty());
        assert_eq!(cache.generation(), 1);
        assert!(matches!(cache.last_error(), Some(LoadError::NotFound(_))));

        cache.get();
        assert_eq!(cache.generation(), 1);

        cache.invalidate();
        cache.get();
        assert_eq!(cache.generation(), 2);
    }

    #[test]
    fn cache_reads_file_and_shares_rows() {
        let path = std::env::temp_dir().join(format!(
            "kg_explorer_store_{}.csv",
            std::process::id()
        ));
        fs::write(&path, "source,relation,target\nA,r,B\n").unwrap();

        let mut cache = StoreCache::new(&path);
        let first = cache.get();
        let second = cache.get();
        assert_eq!(first.len(), 1);
        assert_eq!(cache.generation(), 1);
        assert!(cache.last_error().is_none());
        assert_eq!(first, second);

        fs::remove_file(&path).unwrap();
    }

    fn temp_table(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "kg_explorer_store_{name}_{}.csv",
            std::process::id()
        ))
    }

    fn write_with_mtime(path: &Path, body: &str, modified: SystemTime) {
        fs::write(path, body).unwrap();
        File::options()
            .write(true)
            .open(path)
            .unwrap()
            .set_modified(modified)
            .unwrap();
    }

    #[test]
    fn cache_reloads_when_file_changes() {
        let path = temp_table("mtime");
        let t0 = SystemTime::UNIX_EPOCH + Duration::from_secs(1_600_000_000);
        write_with_mtime(&path, "source,relation,target\nA,r,B\n", t0);

        let mut cache = StoreCache::new(&path);
        assert_eq!(cache.get().len(), 1);
        cache.get();
        assert_eq!(cache.generation(), 1);

        write_with_mtime(
            &path,
            "source,relation,target\nC,s,D\nE,s,F\n",
            t0 + Duration::from_secs(60),
        );
        let rows = cache.get();
        assert_eq!(cache.generation(), 2);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], Triplet::new("C", "s", "D"));

        cache.get();
        assert_eq!(cache.generation(), 2);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn cache_reports_deleted_file() {
        let path = temp_table("deleted");
        fs::write(&path, "source,relation,target\nA,r,B\n").unwrap();

        let mut cache = StoreCache::new(&path);
        assert_eq!(cache.get().len(), 1);

        fs::remove_file(&path).unwrap();
        assert!(cache.get().is_empty());
        assert_eq!(cache.generation(), 2);
        assert!(matches!(cache.last_error(), Some(LoadError::NotFound(_))));
    }
}
