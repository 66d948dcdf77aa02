use crate::coach::Persona;
use crate::dog::DogImage;
use crate::scoring::{CategoryScores, CompletionMap, DailyInputs, Feedback};
use crate::session::{CheckinRecord, CheckinStatus};
use crate::weather::Weather;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct TodayResponse {
    pub date: String,
    pub status: CheckinStatus,
    pub inputs: DailyInputs,
    pub scores: CategoryScores,
    pub total_score: u8,
    pub achievement: u8,
    pub completion: CompletionMap,
    pub feedback: Feedback,
    pub record: Option<CheckinRecord>,
}

#[derive(Debug, Deserialize)]
pub struct ReportRequest {
    #[serde(default)]
    pub persona: Persona,
    pub city: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ReportResponse {
    pub date: String,
    pub persona: Persona,
    pub city: String,
    pub weather: Option<Weather>,
    pub dog: Option<DogImage>,
    pub report: String,
    pub share_text: String,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub persona: Persona,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub date: String,
    pub persona: Persona,
    pub reply: String,
}

#[derive(Debug, Deserialize)]
pub struct WeatherQuery {
    pub city: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DailyPoint {
    pub date: String,
    pub total_score: Option<u8>,
    pub mood: Option<u8>,
}

#[derive(Debug, Serialize)]
pub struct WeeklyAveragePoint {
    pub week: String,
    pub start_date: String,
    pub end_date: String,
    pub days_logged: u8,
    pub avg_score: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub last_7_days: Vec<DailyPoint>,
    pub weekly_averages: Vec<WeeklyAveragePoint>,
}
