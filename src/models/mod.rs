pub mod analysis;
pub mod batch;
pub mod geometry;
pub mod loaders;
pub mod raw;
pub mod upload;

pub use analysis::{AnalysisResult, DetectionStatistics, PageResult, SingleAnalysisResult};
pub use batch::{BatchAnalysisResult, BatchAnnotation, BatchFileOutcome, BatchPageResult};
pub use geometry::{BoundingBox, Detection, PageSize};
pub use loaders::{content_type_for, load_upload_file};
pub use raw::RawJson;
pub use upload::{SubmissionKind, UploadFile};
