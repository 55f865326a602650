//! Reporting: host summary figures and the top-emitters text chart.

use crate::city::City;
use crate::collection::CityCollection;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Label of the merged bar holding every country outside the top `n`.
pub const EVERYWHERE_ELSE: &str = "Everywhere else";

const BAR_WIDTH: usize = 40;
const LABEL_WIDTH: usize = 20;

/// Host summary figures.
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub host: String,
    pub host_country: String,
    pub total_co2_kg: f64,
    /// Whole tonnes, truncated.
    pub total_co2_tonnes: u64,
    /// Attendees from origins with at least one attendee.
    pub attendees: u64,
    /// Origins with at least one attendee.
    pub cities: usize,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Host city: {} ({})", self.host, self.host_country)?;
        writeln!(f, "Total CO2: {} tonnes", self.total_co2_tonnes)?;
        writeln!(
            f,
            "Total attendees travelling to {} from {} different cities: {}",
            self.host, self.cities, self.attendees
        )
    }
}

/// One bar of the emitters chart.
#[derive(Debug, Clone, Serialize)]
pub struct EmitterBar {
    pub label: String,
    pub tonnes: f64,
}

/// Top `n` countries by emissions, the rest merged into one bar, in tonnes.
///
/// Ties keep the mapping's alphabetical order. The merged bar only appears
/// when something was merged.
pub fn top_emitters(co2_by_country: &BTreeMap<String, f64>, n: usize) -> Vec<EmitterBar> {
    let mut ranked: Vec<(&String, f64)> = co2_by_country.iter().map(|(k, v)| (k, *v)).collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

    let split = n.min(ranked.len());
    let (top, rest) = ranked.split_at(split);

    let mut bars: Vec<EmitterBar> = top
        .iter()
        .map(|(country, kg)| EmitterBar {
            label: country.to_string(),
            tonnes: kg / 1000.0,
        })
        .collect();

    if !rest.is_empty() {
        bars.push(EmitterBar {
            label: EVERYWHERE_ELSE.to_string(),
            tonnes: rest.iter().map(|(_, kg)| kg).sum::<f64>() / 1000.0,
        });
    }
    bars
}

/// A host candidate and the total CO2 if everyone travelled there.
#[derive(Debug, Clone, Serialize)]
pub struct RankedHost {
    pub name: String,
    pub total_co2_kg: f64,
}

/// Full machine-readable report for one host.
#[derive(Debug, Clone, Serialize)]
pub struct HostReport {
    pub generated_at: DateTime<Utc>,
    pub summary: Summary,
    pub total_attendees: u64,
    pub person_km: f64,
    pub co2_by_country_kg: BTreeMap<String, f64>,
    pub travel_by_country_km: BTreeMap<String, f64>,
    pub top_emitters: Vec<EmitterBar>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ranking: Option<Vec<RankedHost>>,
}

impl HostReport {
    pub fn build(collection: &CityCollection, host: &City, top: usize, with_ranking: bool) -> Self {
        let co2_by_country_kg = collection.co2_by_country(host);
        let top_emitters = top_emitters(&co2_by_country_kg, top);
        let ranking = with_ranking.then(|| {
            collection
                .sorted_by_emissions()
                .into_iter()
                .map(|(name, total_co2_kg)| RankedHost { name, total_co2_kg })
                .collect()
        });

        Self {
            generated_at: Utc::now(),
            summary: collection.summary_of(host),
            total_attendees: collection.total_attendees(),
            person_km: collection.total_distance_travel_to(host),
            travel_by_country_km: collection.travel_by_country(host),
            co2_by_country_kg,
            top_emitters,
            ranking,
        }
    }
}

/// Ranking as aligned text lines, lowest emissions first.
pub fn render_ranking(ranking: &[(String, f64)]) -> String {
    let mut out = String::new();
    for (i, (name, kg)) in ranking.iter().enumerate() {
        out.push_str(&format!("  {:>3}. {:<24} {:>14.0} t\n", i + 1, name, (kg / 1000.0).trunc()));
    }
    out
}

// ─── Text chart ─────────────────────────────────────────────────

/// Render bars as a fixed-width horizontal bar chart.
pub fn render_bar_chart(title: &str, bars: &[EmitterBar]) -> String {
    let mut out = String::new();
    out.push_str(&format!("  {}\n", title));
    out.push_str(&format!("  ╔{}╗\n", "═".repeat(LABEL_WIDTH + BAR_WIDTH + 16)));

    if bars.is_empty() {
        out.push_str(&format!("  ║ {:<width$} ║\n", "(no travel)", width = LABEL_WIDTH + BAR_WIDTH + 14));
    }

    let max = bars.iter().map(|b| b.tonnes).fold(0.0_f64, f64::max);
    for bar in bars {
        let len = if max > 0.0 {
            ((bar.tonnes / max) * BAR_WIDTH as f64).round() as usize
        } else {
            0
        };
        let len = len.min(BAR_WIDTH);
        out.push_str(&format!(
            "  ║ {:<lw$} {}{} {:>12.1} ║\n",
            truncate_label(&bar.label),
            "█".repeat(len),
            " ".repeat(BAR_WIDTH - len),
            bar.tonnes,
            lw = LABEL_WIDTH,
        ));
    }

    out.push_str(&format!("  ╚{}╝\n", "═".repeat(LABEL_WIDTH + BAR_WIDTH + 16)));
    out
}

fn truncate_label(label: &str) -> String {
    if label.chars().count() <= LABEL_WIDTH {
        label.to_string()
    } else {
        let mut s: String = label.chars().take(LABEL_WIDTH - 1).collect();
        s.push('…');
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn emissions() -> BTreeMap<String, f64> {
        [
            ("Brazil", 5_000.0),
            ("China", 40_000.0),
            ("France", 12_000.0),
            ("Germany", 12_000.0),
            ("Japan", 30_000.0),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
    }

    #[test]
    fn test_top_emitters_sorted_and_merged() {
        let bars = top_emitters(&emissions(), 3);
        let labels: Vec<&str> = bars.iter().map(|b| b.label.as_str()).collect();
        // France and Germany tie; alphabetical order is kept.
        assert_eq!(labels, vec!["China", "Japan", "France", EVERYWHERE_ELSE]);
        assert_relative_eq!(bars[0].tonnes, 40.0);
        assert_relative_eq!(bars[3].tonnes, 17.0);
    }

    #[test]
    fn test_top_emitters_no_remainder() {
        let bars = top_emitters(&emissions(), 5);
        assert_eq!(bars.len(), 5);
        assert!(bars.iter().all(|b| b.label != EVERYWHERE_ELSE));

        let bars = top_emitters(&emissions(), 50);
        assert_eq!(bars.len(), 5);
    }

    #[test]
    fn test_top_emitters_zero_keeps_everything_merged() {
        let bars = top_emitters(&emissions(), 0);
        assert_eq!(bars.len(), 1);
        assert_eq!(bars[0].label, EVERYWHERE_ELSE);
        assert_relative_eq!(bars[0].tonnes, 99.0);
    }

    #[test]
    fn test_top_emitters_empty() {
        assert!(top_emitters(&BTreeMap::new(), 8).is_empty());
    }

    #[test]
    fn test_render_bar_chart() {
        let bars = top_emitters(&emissions(), 2);
        let chart = render_bar_chart("Travel CO2", &bars);
        println!("{}", chart);

        assert!(chart.starts_with("  Travel CO2\n"));
        assert!(chart.contains("China"));
        assert!(chart.contains(EVERYWHERE_ELSE));
        assert!(chart.contains(&"█".repeat(BAR_WIDTH)));
        assert!(chart.contains("40.0"));
        // Header, frame top, 3 bars, frame bottom.
        assert_eq!(chart.lines().count(), 6);
    }

    #[test]
    fn test_render_empty_chart() {
        let chart = render_bar_chart("Nothing", &[]);
        assert!(chart.contains("(no travel)"));
    }

    #[test]
    fn test_long_labels_truncated() {
        let label = truncate_label("The United Kingdom of Great Britain");
        assert_eq!(label.chars().count(), LABEL_WIDTH);
        assert!(label.ends_with('…'));
    }

    #[test]
    fn test_host_report() {
        let collection = CityCollection::new(vec![
            City::new("Zurich", "Switzerland", 4, 47.22, 8.33).unwrap(),
            City::new("Geneva", "Switzerland", 2, 46.2, 6.14).unwrap(),
            City::new("Tokyo", "Japan", 1, 35.68, 139.65).unwrap(),
        ]);
        let host = collection.cities()[0].clone();

        let report = HostReport::build(&collection, &host, 1, true);
        assert_eq!(report.total_attendees, 7);
        assert_eq!(report.top_emitters.len(), 2);
        assert_eq!(report.top_emitters[0].label, "Japan");
        assert_eq!(report.ranking.as_ref().unwrap().len(), 3);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["summary"]["host"], "Zurich");
        assert!(json["co2_by_country_kg"]["Japan"].as_f64().unwrap() > 0.0);

        let without = HostReport::build(&collection, &host, 1, false);
        let json = serde_json::to_value(&without).unwrap();
        assert!(json.get("ranking").is_none());
    }

    #[test]
    fn test_render_ranking() {
        let text = render_ranking(&[("Zurich".into(), 1_500.0), ("Tokyo".into(), 2_999_999.0)]);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("1. Zurich"));
        assert!(lines[0].trim_end().ends_with("1 t"));
        assert!(lines[1].trim_end().ends_with("2999 t"));
    }

    #[test]
    fn test_summary_display() {
        let summary = Summary {
            host: "Zurich".into(),
            host_country: "Switzerland".into(),
            total_co2_kg: 2_030_999.9,
            total_co2_tonnes: 2030,
            attendees: 1234,
            cities: 45,
        };
        assert_eq!(
            summary.to_string(),
            "Host city: Zurich (Switzerland)\n\
             Total CO2: 2030 tonnes\n\
             Total attendees travelling to Zurich from 45 different cities: 1234\n"
        );
    }
}
