pub mod escape;
pub mod etl;
pub mod line;
pub mod pipeline;
pub mod row;
pub mod table;

pub use crate::domain::model::{Record, TransformResult};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
