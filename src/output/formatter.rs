use std::io::IsTerminal;

use chrono::Duration;
use owo_colors::OwoColorize;
use terminal_size::{terminal_size, Width};

use crate::cache::CachedEvaluation;
use crate::concepts::ProductConcept;
use crate::scoring::{classify, Decision, Evaluation, Thresholds};

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Format a score with exactly two decimals ("3.20", "0.90").
pub fn format_score(score: f64) -> String {
    format!("{:.2}", score)
}

/// Format a gate decision, colored when requested:
/// GO green bold, HOLD yellow, DROP red.
pub fn format_decision(decision: Decision, use_colors: bool) -> String {
    if !use_colors {
        return decision.as_str().to_string();
    }
    match decision {
        Decision::Go => decision.as_str().green().bold().to_string(),
        Decision::Hold => decision.as_str().yellow().to_string(),
        Decision::Drop => decision.as_str().red().to_string(),
    }
}

/// Multi-line summary of one evaluation: score line plus decision line.
pub fn format_evaluation(evaluation: &Evaluation, use_colors: bool) -> String {
    format!(
        "Score:    {}\nDecision: {}",
        format_score(evaluation.score),
        format_decision(evaluation.decision, use_colors)
    )
}

/// Per-field breakdown rows plus the rounded total.
///
/// One row per rating in scoring order:
/// `  company_fit          3 x 0.20 = 0.60`
pub fn format_breakdown(evaluation: &Evaluation) -> String {
    let mut lines: Vec<String> = evaluation
        .terms
        .iter()
        .map(|term| {
            format!(
                "  {:<20} {} x {:.2} = {:.2}",
                term.field.as_str(),
                term.rating,
                term.weight,
                term.contribution
            )
        })
        .collect();
    lines.push(format!(
        "  {:<20} {}",
        "total",
        format_score(evaluation.score)
    ));
    lines.join("\n")
}

/// Format cached evaluations as a table, one row per entry:
/// Index, score, recomputed decision, compact ratings, age.
///
/// Decisions are recomputed under the thresholds in force now, so a
/// threshold change re-gates old rows.
pub fn format_history_table(
    entries: &[CachedEvaluation],
    thresholds: &Thresholds,
    use_colors: bool,
) -> String {
    if entries.is_empty() {
        return "No cached evaluations.".to_string();
    }

    entries
        .iter()
        .enumerate()
        .map(|(idx, entry)| {
            let index_str = format!("{:>2}.", idx + 1);
            let decision = classify(entry.score, thresholds);
            let age = format_age(chrono::Utc::now() - entry.evaluated_at);

            if use_colors {
                format!(
                    "{} {}  {:<4}  {}  {:>4}",
                    index_str.dimmed(),
                    format_score(entry.score).bold(),
                    format_decision(decision, true),
                    entry.ratings.compact(),
                    age
                )
            } else {
                format!(
                    "{} {}  {:<4}  {}  {:>4}",
                    index_str,
                    format_score(entry.score),
                    decision.as_str(),
                    entry.ratings.compact(),
                    age
                )
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format history as tab-separated values for scripting.
/// Columns: score, decision, ratings, evaluated_at (RFC 3339). No colors.
pub fn format_history_tsv(entries: &[CachedEvaluation], thresholds: &Thresholds) -> String {
    entries
        .iter()
        .map(|entry| {
            let decision = classify(entry.score, thresholds);
            format!(
                "{}\t{}\t{}\t{}",
                format_score(entry.score),
                decision.as_str(),
                entry.ratings.compact(),
                entry.evaluated_at.to_rfc3339()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format concepts as a table: index, model score, name, target.
/// Names are truncated to fit the terminal width.
pub fn format_concept_table(concepts: &[ProductConcept], use_colors: bool) -> String {
    if concepts.is_empty() {
        return "No concepts found.".to_string();
    }

    let term_width = get_terminal_width();

    concepts
        .iter()
        .enumerate()
        .map(|(idx, concept)| {
            let index_str = format!("{:>2}.", idx + 1);
            let score_str = format!("{:>5}", format_score(concept.score));

            // index(3) + space + score(5) + 2 separators of 2 + target
            let fixed_width = 3 + 1 + 5 + 4 + concept.target.chars().count();
            let name = if let Some(width) = term_width {
                if width > fixed_width + 10 {
                    truncate_name(&concept.name, width - fixed_width)
                } else {
                    truncate_name(&concept.name, 20)
                }
            } else {
                // No terminal (pipe), don't truncate
                concept.name.clone()
            };

            if use_colors {
                format!(
                    "{} {}  {}  {}",
                    index_str.dimmed(),
                    score_str.bold(),
                    name,
                    concept.target.cyan()
                )
            } else {
                format!("{} {}  {}  {}", index_str, score_str, name, concept.target)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format concepts as tab-separated values for scripting.
/// Columns: score, name, flavor, functionality, target. No colors.
pub fn format_concept_tsv(concepts: &[ProductConcept]) -> String {
    concepts
        .iter()
        .map(|c| {
            format!(
                "{}\t{}\t{}\t{}\t{}",
                format_score(c.score),
                c.name,
                c.flavor,
                c.functionality,
                c.target
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format a duration into a human-readable age string
/// "2h" for hours, "3d" for days, "1w" for weeks
pub fn format_age(duration: Duration) -> String {
    let hours = duration.num_hours();
    let days = duration.num_days();
    let weeks = days / 7;

    if weeks >= 1 {
        format!("{}w", weeks)
    } else if days >= 1 {
        format!("{}d", days)
    } else if hours >= 1 {
        format!("{}h", hours)
    } else {
        let minutes = duration.num_minutes();
        if minutes >= 1 {
            format!("{}m", minutes)
        } else {
            "now".to_string()
        }
    }
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate a concept name to fit available width, accounting for Unicode
fn truncate_name(name: &str, max_width: usize) -> String {
    let chars: Vec<char> = name.chars().collect();
    if chars.len() <= max_width {
        name.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}
