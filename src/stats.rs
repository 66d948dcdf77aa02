use crate::models::{DailyPoint, StatsResponse, WeeklyAveragePoint};
use crate::session::{date_key, HistoryEntry};
use chrono::{Datelike, Duration, NaiveDate};
use std::collections::BTreeMap;

const WEEK_COUNT: usize = 4;

pub fn build_stats_at(today: NaiveDate, history: &[HistoryEntry]) -> StatsResponse {
    let by_date: BTreeMap<&str, &HistoryEntry> = history
        .iter()
        .map(|entry| (entry.date.as_str(), entry))
        .collect();
    let lookup = |date: NaiveDate| by_date.get(date_key(date).as_str()).copied();

    let mut last_7_days = Vec::with_capacity(7);
    for offset in (0..7).rev() {
        let date = today - Duration::days(offset);
        let entry = lookup(date);
        last_7_days.push(DailyPoint {
            date: date_key(date),
            total_score: entry.map(|e| e.total_score),
            mood: entry.map(|e| e.mood),
        });
    }

    let current_week_start = week_start(today);
    let mut weekly_averages = Vec::with_capacity(WEEK_COUNT);
    for offset in (0..WEEK_COUNT).rev() {
        let start = current_week_start - Duration::weeks(offset as i64);
        let end = start + Duration::days(6);

        let scores: Vec<u32> = (0..7)
            .filter_map(|day| lookup(start + Duration::days(day)))
            .map(|entry| u32::from(entry.total_score))
            .collect();
        let days_logged = scores.len() as u8;
        let avg_score = if scores.is_empty() {
            None
        } else {
            Some(f64::from(scores.iter().sum::<u32>()) / f64::from(days_logged))
        };

        weekly_averages.push(WeeklyAveragePoint {
            week: week_label(start),
            start_date: date_key(start),
            end_date: date_key(end),
            days_logged,
            avg_score,
        });
    }

    StatsResponse {
        last_7_days,
        weekly_averages,
    }
}

fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

fn week_label(date: NaiveDate) -> String {
    let iso = date.iso_week();
    format!("{}-W{:02}", iso.year(), iso.week())
}
