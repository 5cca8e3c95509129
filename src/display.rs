//! # Tabular display of local circumstances
//!
//! `Display` implementations for [`EclipseResult`] and [`Contact`].
//!
//! An [`EclipseResult`] renders a short summary followed by a [`comfy-table`] with one row
//! per solved event:
//!
//! ```text
//! Total eclipse  magnitude 1.011  coverage 100.00%  totality 2m29.9s
//! ┌─────────────────┬────────────┬────────────┬──────────┬─────────┬───────┬───────┐
//! │ Event           ┆ Date       ┆ Time       ┆ Altitude ┆ Azimuth ┆ P [°] ┆ V [°] │
//! ╞═════════════════╪════════════╪════════════╪══════════╪═════════╪═══════╪═══════╡
//! │ C1 (first)      ┆ 2017-08-21 ┆ 17:07:42.2 ┆ +66.1°   ┆ 163.3°  ┆ 293.6 ┆ 307.5 │
//! ...
//! ```
//!
//! The alternate form (`{:#}`) adds the Besselian time and the number of Newton iterations
//! of each event.
//!
//! [`comfy-table`]: https://crates.io/crates/comfy-table
use std::fmt;

use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, ContentArrangement, Row, Table};

use crate::circumstance::EventKind;
use crate::eclipse::{Contact, EclipseResult, EclipseType};

/// Row label of an event.
fn event_label(kind: EventKind) -> &'static str {
    match kind {
        EventKind::C1 => "C1 (first)",
        EventKind::C2 => "C2 (second)",
        EventKind::MidEclipse => "Greatest",
        EventKind::C3 => "C3 (third)",
        EventKind::C4 => "C4 (fourth)",
    }
}

fn right(content: impl ToString) -> Cell {
    Cell::new(content.to_string()).set_alignment(CellAlignment::Right)
}

impl EclipseResult {
    /// Build the contact table.
    ///
    /// Arguments
    /// -----------------
    /// * `wide`: add the Besselian time and iteration count columns.
    pub fn table(&self, wide: bool) -> Table {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic);

        let mut header = vec![
            Cell::new("Event"),
            Cell::new("Date"),
            Cell::new("Time"),
            Cell::new("Altitude"),
            Cell::new("Azimuth"),
            Cell::new("P [°]"),
            Cell::new("V [°]"),
        ];
        if wide {
            header.push(Cell::new("t [h]"));
            header.push(Cell::new("Iter."));
        }
        table.set_header(header);

        for contact in self.contacts() {
            let mut row = vec![
                Cell::new(event_label(contact.event_kind)),
                Cell::new(contact.date()),
                right(contact.time()),
                right(contact.altitude_string()),
                right(contact.azimuth_string()),
                right(format!("{:.1}", contact.position_angle)),
                right(format!("{:.1}", contact.vertex_angle)),
            ];
            if wide {
                row.push(right(format!("{:+.6}", contact.t)));
                row.push(right(contact.convergence.iterations));
            }
            table.add_row(Row::from(row));
        }

        table
    }
}

impl fmt::Display for EclipseResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.eclipse_type == EclipseType::None {
            return write!(
                f,
                "No eclipse at this location (magnitude {:.3})",
                self.magnitude
            );
        }

        write!(f, "{} eclipse", self.eclipse_type)?;
        if let Some(magnitude) = self.magnitude_string() {
            write!(f, "  magnitude {magnitude}")?;
        }
        if let Some(coverage) = self.coverage_percent() {
            write!(f, "  coverage {coverage}")?;
        }
        if let Some(duration) = self.duration_of_totality() {
            let phase = if self.eclipse_type == EclipseType::Annular {
                "annularity"
            } else {
                "totality"
            };
            write!(f, "  {phase} {duration}")?;
        }
        writeln!(f)?;

        let wide = f.alternate();
        write!(f, "{}", self.table(wide))
    }
}

impl fmt::Display for Contact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<12} {} {}  alt {}  az {}",
            event_label(self.event_kind),
            self.date(),
            self.time(),
            self.altitude_string(),
            self.azimuth_string()
        )?;
        if f.alternate() {
            write!(
                f,
                "  P {:.1}°  V {:.1}°  t {:+.6} h ({} iterations)",
                self.position_angle, self.vertex_angle, self.t, self.convergence.iterations
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod display_test {
    use super::*;
    use crate::eclipse::solve;

    #[test]
    fn test_display_total() {
        let result = solve(35.0, -83.0).unwrap();
        let text = result.to_string();

        assert!(text.starts_with(
            "Total eclipse  magnitude 1.011  coverage 100.00%  totality 2m29.9s"
        ));
        for label in ["C1 (first)", "C2 (second)", "Greatest", "C3 (third)", "C4 (fourth)"] {
            assert!(text.contains(label), "missing {label}");
        }
        assert!(text.contains("18:36:24.9"));
        assert!(!text.contains("Iter."));
        assert!(format!("{result:#}").contains("Iter."));
    }

    #[test]
    fn test_display_partial_and_none() {
        let partial = solve(40.7128, -74.006).unwrap().to_string();
        assert!(partial.starts_with(
            "Partial eclipse  magnitude 0.770  coverage 71.55%\n"
        ));
        assert!(!partial.contains("C2 (second)"));

        let none = solve(-33.9, 18.4).unwrap().to_string();
        assert_eq!(none, "No eclipse at this location (magnitude -0.275)");
    }

    #[test]
    fn test_display_contact() {
        let result = solve(35.0, -83.0).unwrap();
        let c2 = result.contact2().unwrap();
        assert_eq!(
            c2.to_string(),
            "C2 (second)  2017-08-21 18:36:24.9  alt +63.0°  az 214.8°"
        );
        assert!(format!("{c2:#}").contains("P 96.9°"));
    }
}
