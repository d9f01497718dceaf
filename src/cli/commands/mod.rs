pub mod analyze;
pub mod classify;
pub mod compare;
pub mod config;
pub mod evaluate;
pub mod generate;
pub mod history;
pub mod refine;
pub mod techniques;
pub mod templates;
