use std::io::{self, Write};

use advisory_core::{AdvisoryResult, PipelineError};
use chrono::{DateTime, TimeZone};

pub fn print<Tz: TimeZone>(
    result: &AdvisoryResult,
    now: DateTime<Tz>,
    json: bool,
) -> anyhow::Result<()>
where
    Tz::Offset: std::fmt::Display,
{
    if json {
        println!("{}", serde_json::to_string_pretty(result)?);
    } else {
        let mut stdout = io::stdout().lock();
        write_text(&mut stdout, result, &now)?;
    }
    Ok(())
}

pub fn error_line(err: &PipelineError) -> String {
    format!("Error: {err}")
}

/// Human-readable advisory followed by the weather snapshot.
pub fn write_text<W: Write, Tz: TimeZone>(
    out: &mut W,
    result: &AdvisoryResult,
    now: &DateTime<Tz>,
) -> io::Result<()>
where
    Tz::Offset: std::fmt::Display,
{
    let w = &result.weather;

    writeln!(out, "Advisory generated on: {}", now.format("%d %B %Y, %I:%M %p"))?;
    writeln!(out)?;
    writeln!(out, "== Advisory Result ==")?;
    writeln!(out, "{}", result.headline())?;
    writeln!(out, "{}: {:.2}%", result.probability_label(), result.probability_percent)?;
    writeln!(out)?;
    writeln!(out, "Farmer Advisory:")?;
    for line in &result.recommendations {
        writeln!(out, "  - {line}")?;
    }
    writeln!(out)?;
    writeln!(out, "== Current Weather Snapshot ==")?;
    writeln!(out, "Max Temp (°C):       {}", w.temp_max)?;
    writeln!(out, "Min Temp (°C):       {}", w.temp_min)?;
    writeln!(out, "Wind Speed (m/s):    {}", w.wind)?;
    writeln!(out, "Rain (last 1 hour):  {} mm", w.precipitation)?;

    Ok(())
}
