pub mod context;
pub mod domain;
pub mod error;
pub mod utils;

pub use context::GenerationContext;
pub use domain::Domain;
pub use error::{PromptError, Result, ResultExt};
pub use utils::{
    Params, bullet_list, json_i64, json_string, json_string_array, json_string_or,
    numbered_list, round2, title_case,
};
