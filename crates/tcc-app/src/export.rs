//! CSV and JSON rendering of analysis results.

use tcc_coordination::CoordinationReport;
use tcc_signals::{MhoPoint, SequenceComponents, WaveformSample};

use crate::analysis::{DeviceCurve, GradingRow};
use crate::error::AppResult;

/// Long format: one row per curve point.
pub fn curves_to_csv(curves: &[DeviceCurve]) -> String {
    let mut csv = String::from("device_id,current_a,time_s\n");
    for curve in curves {
        for p in &curve.points {
            csv.push_str(&format!("{},{},{}\n", curve.id, p.current_a, p.time_s));
        }
    }
    csv
}

/// Trip sequence with the margin to the next device on each row.
pub fn report_to_csv(report: &CoordinationReport) -> String {
    let mut csv = String::from("rank,device,trip_time_s,margin_to_next_s,violation\n");
    for (i, trip) in report.sequence.iter().enumerate() {
        csv.push_str(&format!("{},{},{},", i + 1, trip.name, trip.trip_time_s));
        match report.margins.get(i) {
            Some(margin) => csv.push_str(&format!("{},{}\n", margin.margin_s, margin.violation)),
            None => csv.push_str(",\n"),
        }
    }
    csv
}

pub fn report_to_json(report: &CoordinationReport) -> AppResult<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

pub fn grading_to_csv(rows: &[GradingRow]) -> String {
    let mut csv = String::from("fault_current_a,operating,min_margin_s,violations\n");
    for row in rows {
        let margin = row.min_margin_s.map(|m| m.to_string()).unwrap_or_default();
        csv.push_str(&format!(
            "{},{},{},{}\n",
            row.fault_current_a, row.operating, margin, row.violations
        ));
    }
    csv
}

pub fn waveform_to_csv(samples: &[WaveformSample]) -> String {
    let mut csv = String::from("index,time_s,amplitude\n");
    for s in samples {
        csv.push_str(&format!("{},{},{}\n", s.index, s.time_s, s.amplitude));
    }
    csv
}

pub fn mho_to_csv(points: &[MhoPoint]) -> String {
    let mut csv = String::from("r_ohm,x_ohm\n");
    for p in points {
        csv.push_str(&format!("{},{}\n", p.x, p.y));
    }
    csv
}

pub fn sequence_to_csv(components: &SequenceComponents) -> String {
    let mut csv = String::from("component,magnitude,angle_deg\n");
    for (label, phasor) in [
        ("zero", components.zero),
        ("positive", components.positive),
        ("negative", components.negative),
    ] {
        csv.push_str(&format!("{},{},{}\n", label, phasor.magnitude, phasor.angle_deg));
    }
    csv
}
