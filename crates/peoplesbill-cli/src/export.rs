//! Arrow IPC file output.

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use arrow::ipc::writer::FileWriter;
use arrow::record_batch::RecordBatch;
use tracing::info;

/// Write `batch` as a single-batch Arrow IPC file at `path`.
pub fn write_ipc(path: &Path, batch: &RecordBatch) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut writer = FileWriter::try_new(file, &batch.schema())?;
    writer.write(batch)?;
    writer.finish()?;
    info!(path = %path.display(), rows = batch.num_rows(), "wrote arrow ipc file");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::ipc::reader::FileReader;
    use peoplesbill_core::{Clause, bill};

    #[test]
    fn clause_batch_survives_ipc_file() {
        let clauses = vec![Clause {
            title: "Right to Fair Hearing".into(),
            content: "Every person subject to investigation shall have the right to notice.".into(),
            rationale: "Protects constitutional rights during investigations".into(),
            confidence: 0.8,
            based_on_submissions: 4,
        }];
        let batch = bill::clauses_to_batch(&clauses).unwrap();

        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("clauses.arrow");
        write_ipc(&path, &batch).unwrap();

        let reader = FileReader::try_new(File::open(&path).unwrap(), None).unwrap();
        let batches: Vec<RecordBatch> = reader.map(|b| b.unwrap()).collect();
        assert_eq!(batches.len(), 1);
        assert_eq!(batches[0], batch);
    }
}
