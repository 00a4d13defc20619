/// Arrow schema definitions and batch builders for bill drafting output.
pub mod bill {
    use std::sync::Arc;

    use arrow::array::{
        ArrayRef, Float32Array, Int64Builder, ListBuilder, StringArray, StringBuilder, UInt64Array,
    };
    use arrow::datatypes::{DataType, Field, Schema};
    use arrow::error::ArrowError;
    use arrow::record_batch::RecordBatch;

    use crate::{Clause, Cluster};

    fn utf8_list() -> DataType {
        DataType::List(Arc::new(Field::new("item", DataType::Utf8, true)))
    }

    /// Schema for clustering results, one row per cluster.
    pub fn cluster_schema() -> Schema {
        Schema::new(vec![
            Field::new("theme", DataType::Utf8, false),
            Field::new("size", DataType::UInt64, false),
            Field::new("confidence_score", DataType::Float32, false),
            Field::new("keywords", utf8_list(), false),
            Field::new("regions", utf8_list(), false),
            Field::new(
                "submission_ids",
                DataType::List(Arc::new(Field::new("item", DataType::Int64, true))),
                false,
            ),
            Field::new("representative_text", DataType::Utf8, false),
            Field::new("summary", DataType::Utf8, false),
        ])
    }

    /// Schema for drafted clauses.
    pub fn clause_schema() -> Schema {
        Schema::new(vec![
            Field::new("title", DataType::Utf8, false),
            Field::new("content", DataType::Utf8, false),
            Field::new("rationale", DataType::Utf8, false),
            Field::new("confidence", DataType::Float32, false),
            Field::new("based_on_submissions", DataType::UInt64, false),
        ])
    }

    pub fn clusters_to_batch(clusters: &[Cluster]) -> Result<RecordBatch, ArrowError> {
        let mut keywords = ListBuilder::new(StringBuilder::new());
        let mut regions = ListBuilder::new(StringBuilder::new());
        let mut ids = ListBuilder::new(Int64Builder::new());

        for c in clusters {
            for k in &c.keywords {
                keywords.values().append_value(k);
            }
            keywords.append(true);

            for r in &c.regions {
                regions.values().append_value(r.name());
            }
            regions.append(true);

            for &id in &c.submission_ids {
                ids.values().append_value(id);
            }
            ids.append(true);
        }

        let columns: Vec<ArrayRef> = vec![
            Arc::new(StringArray::from_iter_values(clusters.iter().map(|c| c.theme.as_str()))),
            Arc::new(UInt64Array::from_iter_values(clusters.iter().map(|c| c.len() as u64))),
            Arc::new(Float32Array::from_iter_values(
                clusters.iter().map(|c| c.confidence_score),
            )),
            Arc::new(keywords.finish()),
            Arc::new(regions.finish()),
            Arc::new(ids.finish()),
            Arc::new(StringArray::from_iter_values(
                clusters.iter().map(|c| c.representative_text.as_str()),
            )),
            Arc::new(StringArray::from_iter_values(clusters.iter().map(|c| c.summary.as_str()))),
        ];

        RecordBatch::try_new(Arc::new(cluster_schema()), columns)
    }

    pub fn clauses_to_batch(clauses: &[Clause]) -> Result<RecordBatch, ArrowError> {
        let columns: Vec<ArrayRef> = vec![
            Arc::new(StringArray::from_iter_values(clauses.iter().map(|c| c.title.as_str()))),
            Arc::new(StringArray::from_iter_values(clauses.iter().map(|c| c.content.as_str()))),
            Arc::new(StringArray::from_iter_values(clauses.iter().map(|c| c.rationale.as_str()))),
            Arc::new(Float32Array::from_iter_values(clauses.iter().map(|c| c.confidence))),
            Arc::new(UInt64Array::from_iter_values(
                clauses.iter().map(|c| c.based_on_submissions as u64),
            )),
        ];

        RecordBatch::try_new(Arc::new(clause_schema()), columns)
    }
}
