pub mod batch_executor;
pub mod generate_subtitles_use_case;
pub mod infrastructure;
pub mod pipeline_logger;
