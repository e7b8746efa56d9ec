use std::fs::File;
use std::path::{Path, PathBuf};
use std::thread;

use tracing::{debug, error};

use crate::error::{Error, Result};
use crate::normalizer::RawRecord;

pub fn read_records(path: &Path) -> Result<Vec<RawRecord>> {
    let load_error = |source: csv::Error| Error::Load {
        path: path.to_path_buf(),
        source,
    };
    let file = File::open(path).map_err(|e| load_error(e.into()))?;
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(file);
    let mut records = Vec::<RawRecord>::new();
    for result in rdr.deserialize() {
        let record: RawRecord = result.map_err(load_error)?;
        records.push(record);
    }
    debug!(path = %path.display(), rows = records.len(), "read table");
    Ok(records)
}

/// Reads every table on its own thread and waits for all of them.
///
/// The first failure in `paths` order is returned; nothing is retried.
pub fn read_all(paths: &[PathBuf]) -> Result<Vec<Vec<RawRecord>>> {
    let result = thread::scope(|scope| {
        let handles: Vec<_> = paths
            .iter()
            .map(|path| (path, scope.spawn(move || read_records(path))))
            .collect();
        handles
            .into_iter()
            .map(|(path, handle)| handle.join().map_err(|_| Error::Thread(path.clone()))?)
            .collect::<Result<Vec<_>>>()
    });
    if let Err(e) = &result {
        error!("Error loading CSV: {}", e);
    }
    result
}
