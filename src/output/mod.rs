pub mod formatter;

pub use formatter::{
    format_age, format_breakdown, format_concept_table, format_concept_tsv, format_decision,
    format_evaluation, format_history_table, format_history_tsv, format_score, should_use_colors,
};
