mod output;

pub use output::{Output, score_bar};
