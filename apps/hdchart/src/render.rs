//! Plain-text output for the terminal.

use bodygraph::chart::{Activation, Chart, Transit};
use bodygraph::gates::GateCoordinate;
use bodygraph::interpretation::{HdCoordinate, Interpretation};
use kamea::{MagicSquare, SolveOutcome};
use std::fmt::Write;

pub fn chart_text(chart: &Chart) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Birth   {}", chart.birth.to_rfc3339());
    let _ = writeln!(out, "Design  {}", chart.design_instant.to_rfc3339());
    let _ = writeln!(
        out,
        "Place   {:.4}, {:.4}  ({:?} zodiac)",
        chart.location.lat, chart.location.lon, chart.zodiac
    );
    let _ = writeln!(
        out,
        "Asc     {:.2}°{}",
        chart.houses.ascendant,
        if chart.houses.polar_unreliable {
            "  (unreliable above the polar circle)"
        } else {
            ""
        }
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "Type       {}", chart.hd_type);
    let _ = writeln!(out, "Strategy   {}", chart.strategy);
    let _ = writeln!(out, "Authority  {}", chart.authority);
    let _ = writeln!(
        out,
        "Profile    {}{}",
        chart.profile,
        if chart.profile.is_standard() { "" } else { " (non-standard)" }
    );
    let _ = writeln!(out, "Cross      {}", chart.incarnation_cross);
    let _ = writeln!(out);

    let _ = writeln!(out, "{:<12} {:>14}  {:>14}", "", "Personality", "Design");
    for (p, d) in chart.personality.iter().zip(chart.design.iter()) {
        let _ = writeln!(
            out,
            "{:<12} {:>14}  {:>14}   house {:>2} / {:>2}",
            p.body.name(),
            p.coordinate.to_string(),
            d.coordinate.to_string(),
            house_label(p),
            house_label(d)
        );
    }
    let _ = writeln!(out);

    let gates: Vec<String> = chart.active_gates.iter().map(u8::to_string).collect();
    let _ = writeln!(out, "Gates      {}", gates.join(" "));
    let channels: Vec<String> = chart.active_channels.iter().map(|c| c.to_string()).collect();
    let _ = writeln!(
        out,
        "Channels   {}",
        if channels.is_empty() { "-".to_string() } else { channels.join(" ") }
    );
    let defined: Vec<&str> = chart.defined_centers.iter().map(|c| c.name()).collect();
    let _ = writeln!(out, "Defined    {}", defined.join(", "));
    let open: Vec<&str> = chart.open_centers().iter().map(|c| c.name()).collect();
    let _ = writeln!(out, "Open       {}", open.join(", "));
    let _ = writeln!(out);

    let v = &chart.variables;
    let _ = writeln!(out, "Digestion    {}", v.digestion);
    let _ = writeln!(out, "Environment  {}", v.environment);
    let _ = writeln!(out, "Perspective  {}", v.perspective);
    let _ = writeln!(out, "Awareness    {}", v.awareness);
    out
}

/// One line per activation, personality first, in the order `rows` was built.
pub fn meanings_text(chart: &Chart, rows: &[Interpretation]) -> String {
    let mut out = String::from("\n");
    let labelled = chart
        .personality
        .iter()
        .map(|a| ("P", a))
        .chain(chart.design.iter().map(|a| ("D", a)));
    for ((side, activation), meaning) in labelled.zip(rows.iter()) {
        let _ = writeln!(out, "{} {:<11} {}", side, activation.body.name(), meaning.sentence);
    }
    out
}

pub fn transit_text(snapshot: &Transit) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Transit {}  ({:?} zodiac)", snapshot.instant.to_rfc3339(), snapshot.zodiac);
    for p in &snapshot.positions {
        let _ = writeln!(
            out,
            "{:<8} {:>8.3}°  {:>14}  {} {}",
            p.body.name(),
            p.longitude,
            p.coordinate.to_string(),
            p.coordinate.sign,
            p.coordinate.dms()
        );
    }
    out
}

pub fn coordinate_text(longitude: f64, c: &GateCoordinate) -> String {
    format!(
        "{:.6}°  gate {} line {} color {} tone {} base {}  {} {}\n",
        longitude,
        c.gate,
        c.line,
        c.color,
        c.tone,
        c.base,
        c.sign,
        c.dms()
    )
}

pub fn meaning_text(coordinate: &HdCoordinate, m: &Interpretation) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}  {}", coordinate, m.sentence);
    let _ = writeln!(out, "  gate   {} ({}: {})", m.gate.name, m.gate.theme, m.gate.keynote);
    let _ = writeln!(out, "  line   {}", m.line.name);
    let _ = writeln!(out, "  color  {}", m.color.name);
    let _ = writeln!(out, "  tone   {}", m.tone.name);
    let _ = writeln!(out, "  base   {}", m.base.name);
    out
}

pub fn square_text(square: &MagicSquare) -> String {
    format!(
        "{}{} (target sum {})\n",
        square,
        if square.is_magic { "magic" } else { "not magic" },
        square.sum
    )
}

pub fn solve_text(outcome: &SolveOutcome) -> String {
    format!(
        "{}{:?} after {} attempts in {} ms\n",
        square_text(&outcome.square),
        outcome.status,
        outcome.attempts,
        outcome.elapsed_ms
    )
}

fn house_label(activation: &Activation) -> String {
    match activation.house {
        0 => "-".to_string(),
        h => h.to_string(),
    }
}
