pub mod detail;
pub mod emitter;
pub mod enrich;
pub mod etl;
pub mod listing;
pub mod markup;
pub mod report;

pub use crate::domain::model::{Extracted, SkippedItem, TransformResult};
pub use crate::domain::ports::{
    ConfigProvider, LookupConfigProvider, MovieLookup, PageFetcher, Pipeline, SiteConfigProvider,
    Storage,
};
pub use crate::utils::error::Result;
