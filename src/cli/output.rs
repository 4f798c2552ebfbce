//! Output formatting module
//!
//! This module handles formatting result tables and fitted models for the
//! different output formats.

use crate::cli::OutputFormat;
use crate::outputs::{FittedModel, OutputKind};
use crate::parser::{ResultRow, ResultTable};
use crate::Result;
use serde_json::json;

fn bracketed<T: ToString>(items: &[T]) -> String {
    let items: Vec<String> = items.iter().map(ToString::to_string).collect();
    format!("[{}]", items.join(","))
}

fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() > width {
        let head: String = s.chars().take(width.saturating_sub(3)).collect();
        format!("{}...", head)
    } else {
        s.to_string()
    }
}

/// Output a result table as JSON
pub fn output_json(w: &mut impl std::io::Write, table: &ResultTable) -> Result<()> {
    let output = json!({
        "summary": {
            "total_rows": table.len(),
            "columns": table.columns(),
        },
        "rows": table.rows,
    });

    serde_json::to_writer_pretty(&mut *w, &output)?;
    writeln!(w)?; // Add trailing newline
    Ok(())
}

/// Output a result table as a text table
pub fn output_table(w: &mut impl std::io::Write, table: &ResultTable) -> Result<()> {
    writeln!(w, "flexfringe Prediction Results")?;
    writeln!(w, "{}", "=".repeat(80))?;
    writeln!(w)?;

    writeln!(w, "Summary:")?;
    writeln!(w, "  Total Traces: {}", table.len())?;
    writeln!(w)?;

    if table.is_empty() {
        return Ok(());
    }

    writeln!(w, "{:-<100}", "")?;
    writeln!(
        w,
        "{:>6} {:>5} {:>6} {:<30} {:>12} {:>12} {:>12}",
        "Row", "Type", "Length", "Trace", "Sum", "Mean", "Min"
    )?;
    writeln!(w, "{:-<100}", "")?;

    for row in &table.rows {
        writeln!(
            w,
            "{:>6} {:>5} {:>6} {:<30} {:>12.6} {:>12.6} {:>12.6}",
            row.row_nr,
            truncate(&row.trace_type, 5),
            truncate(&row.trace_length, 6),
            truncate(&row.symbols.join(" "), 30),
            row.sum_scores,
            row.mean_scores,
            row.min_score
        )?;
    }
    writeln!(w)?;

    Ok(())
}

fn csv_values(row: &ResultRow, columns: &[String]) -> Vec<String> {
    let mut values = vec![row.row_nr.to_string()];
    for column in columns {
        let value = match column.as_str() {
            "abbadingo type" => row.trace_type.clone(),
            "abbadingo length" => row.trace_length.clone(),
            "abbadingo trace" => row.trace.clone(),
            "state sequence" => bracketed(&row.state_sequence),
            "score sequence" => bracketed(&row.score_sequence),
            "sum scores" => row.sum_scores.to_string(),
            "mean scores" => row.mean_scores.to_string(),
            "min score" => row.min_score.to_string(),
            other => row
                .extra
                .iter()
                .find(|(name, _)| name == other)
                .map(|(_, value)| value.clone())
                .unwrap_or_default(),
        };
        values.push(value);
    }
    values
}

/// Output a result table as `;` separated values in decoded column order
pub fn output_csv(w: &mut impl std::io::Write, table: &ResultTable) -> Result<()> {
    let columns = table.columns();
    let mut writer = csv::WriterBuilder::new().delimiter(b';').from_writer(w);

    let mut header = vec!["row nr".to_string()];
    header.extend(columns.iter().cloned());
    writer.write_record(&header)?;

    for row in &table.rows {
        writer.write_record(csv_values(row, &columns))?;
    }
    writer.flush()?;
    Ok(())
}

/// Output the files produced by a fit
pub fn output_model(
    w: &mut impl std::io::Write,
    model: &FittedModel,
    format: OutputFormat,
) -> Result<()> {
    let files: Vec<(OutputKind, Option<String>)> = OutputKind::ALL
        .iter()
        .map(|&kind| {
            let path = model.output(kind).ok().map(|p| p.display().to_string());
            (kind, path)
        })
        .collect();

    match format {
        OutputFormat::Json => {
            let mut outputs = serde_json::Map::new();
            for (kind, path) in &files {
                outputs.insert(kind.name().to_string(), json!(path));
            }
            let output = json!({
                "tracefile": model.tracefile().display().to_string(),
                "outputs": outputs,
            });
            serde_json::to_writer_pretty(&mut *w, &output)?;
            writeln!(w)?;
        }
        OutputFormat::Table => {
            writeln!(w, "Fitted {}", model.tracefile().display())?;
            for (kind, path) in &files {
                writeln!(
                    w,
                    "  {:<8} {}",
                    kind.name(),
                    path.as_deref().unwrap_or("(not written)")
                )?;
            }
        }
        OutputFormat::Csv => {
            let mut writer = csv::WriterBuilder::new().delimiter(b';').from_writer(w);
            writer.write_record(["output", "path"])?;
            for (kind, path) in &files {
                writer.write_record([kind.name(), path.as_deref().unwrap_or("")])?;
            }
            writer.flush()?;
        }
    }

    Ok(())
}
