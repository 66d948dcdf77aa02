use crate::coach::ReportPayload;
use crate::scoring::{
    self, CategoryScores, CompletionMap, DailyInputs, Feedback, ScoreCard, SleepDuration,
    SleepQuality, WakeRoutine, WakeTime, EXERCISE_STEP_MINUTES,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckinStatus {
    Open,
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LifecycleError {
    #[error("today's check-in has not been completed yet")]
    NotReady,
    #[error("today's check-in is already complete")]
    AlreadyClosed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckinRecord {
    pub date: String,
    pub total_score: u8,
    pub scores: CategoryScores,
    pub completion: CompletionMap,
    pub mood: u8,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryEntry {
    pub date: String,
    pub total_score: u8,
    pub mood: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum InputCommand {
    SetWater { cups: u8 },
    AddExercise { minutes: Option<u32> },
    ResetExercise,
    AddStudy,
    ResetStudy,
    SetSleepDuration { value: SleepDuration },
    SetSleepQuality { value: SleepQuality },
    SetWakeSuccess { value: bool },
    SetWakeTime { value: WakeTime },
    ToggleRoutine { routine: WakeRoutine },
    SetMood { value: u8 },
    SetNote { text: String },
}

#[derive(Debug, Clone)]
pub struct SessionState {
    date: NaiveDate,
    inputs: DailyInputs,
    status: CheckinStatus,
    feedback: Option<Feedback>,
    records: BTreeMap<String, CheckinRecord>,
    history: Vec<HistoryEntry>,
}

impl SessionState {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            date: today,
            inputs: DailyInputs::default(),
            status: CheckinStatus::Open,
            feedback: None,
            records: BTreeMap::new(),
            history: Vec::new(),
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn date_key(&self) -> String {
        date_key(self.date)
    }

    pub fn status(&self) -> CheckinStatus {
        self.status
    }

    pub fn inputs(&self) -> &DailyInputs {
        &self.inputs
    }

    pub fn roll_over(&mut self, today: NaiveDate) -> bool {
        if today == self.date {
            return false;
        }
        self.date = today;
        self.inputs = DailyInputs::default();
        self.feedback = None;
        self.status = match self.records.get(&date_key(today)) {
            Some(record) => {
                self.feedback = Some(scoring::feedback(&record.scores));
                CheckinStatus::Closed
            }
            None => CheckinStatus::Open,
        };
        true
    }

    pub fn ensure_open(&self) -> Result<(), LifecycleError> {
        match self.status {
            CheckinStatus::Open => Ok(()),
            CheckinStatus::Closed => Err(LifecycleError::AlreadyClosed),
        }
    }

    pub fn apply(&mut self, command: InputCommand) {
        let inputs = &mut self.inputs;
        match command {
            InputCommand::SetWater { cups } => inputs.set_water_cups(cups),
            InputCommand::AddExercise { minutes } => {
                inputs.add_exercise(minutes.unwrap_or(EXERCISE_STEP_MINUTES))
            }
            InputCommand::ResetExercise => inputs.reset_exercise(),
            InputCommand::AddStudy => inputs.add_study_unit(),
            InputCommand::ResetStudy => inputs.reset_study(),
            InputCommand::SetSleepDuration { value } => inputs.set_sleep_duration(value),
            InputCommand::SetSleepQuality { value } => inputs.set_sleep_quality(value),
            InputCommand::SetWakeSuccess { value } => inputs.set_wake_success(value),
            InputCommand::SetWakeTime { value } => inputs.set_wake_time(value),
            InputCommand::ToggleRoutine { routine } => {
                inputs.toggle_routine(routine);
            }
            InputCommand::SetMood { value } => inputs.set_mood(value),
            InputCommand::SetNote { text } => inputs.set_note(text),
        }
    }

    pub fn provisional(&self) -> ScoreCard {
        scoring::score(&self.inputs)
    }

    pub fn complete_checkin(&mut self, now: DateTime<Utc>) -> &CheckinRecord {
        let card = self.provisional();
        let date = self.date_key();

        let record = CheckinRecord {
            date: date.clone(),
            total_score: card.total_score,
            scores: card.scores,
            completion: card.completion,
            mood: self.inputs.mood(),
            note: self.inputs.note().map(str::to_string),
            created_at: now,
        };
        self.upsert_history(HistoryEntry {
            date: date.clone(),
            total_score: record.total_score,
            mood: record.mood,
        });
        self.feedback = Some(scoring::feedback(&record.scores));
        self.status = CheckinStatus::Closed;

        self.records.insert(date.clone(), record);
        &self.records[&date]
    }

    fn upsert_history(&mut self, entry: HistoryEntry) {
        match self.history.iter_mut().find(|existing| existing.date == entry.date) {
            Some(existing) => *existing = entry,
            None => {
                self.history.push(entry);
                self.history.sort_by(|a, b| a.date.cmp(&b.date));
            }
        }
    }

    pub fn today_record(&self) -> Option<&CheckinRecord> {
        match self.status {
            CheckinStatus::Closed => self.records.get(&self.date_key()),
            CheckinStatus::Open => None,
        }
    }

    pub fn record(&self, date: &str) -> Option<&CheckinRecord> {
        self.records.get(date)
    }

    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn feedback(&self) -> Feedback {
        match &self.feedback {
            Some(feedback) => feedback.clone(),
            None => scoring::feedback(&self.provisional().scores),
        }
    }

    pub fn report_payload(
        &self,
        weather: impl Into<String>,
        dog: impl Into<String>,
    ) -> Result<ReportPayload, LifecycleError> {
        let record = self.today_record().ok_or(LifecycleError::NotReady)?;
        let labels = |habits: Vec<scoring::Habit>| {
            habits
                .into_iter()
                .map(|habit| habit.label().to_string())
                .collect::<Vec<_>>()
        };

        Ok(ReportPayload {
            date: record.date.clone(),
            mood: record.mood,
            habits_checked: labels(record.completion.checked()),
            habits_unchecked: labels(record.completion.unchecked()),
            weather_summary: weather.into(),
            dog_summary: dog.into(),
            note: record.note.clone().unwrap_or_default(),
        })
    }
}

pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 5).unwrap()
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 5, 21, 30, 0).unwrap()
    }

    #[test]
    fn new_session_is_open_and_empty() {
        let session = SessionState::new(today());
        assert_eq!(session.status(), CheckinStatus::Open);
        assert!(session.today_record().is_none());
        assert!(session.history().is_empty());
        assert_eq!(session.date_key(), "2026-01-05");
    }

    #[test]
    fn provisional_scoring_has_no_side_effects() {
        let mut session = SessionState::new(today());
        session.apply(InputCommand::SetWater { cups: 6 });
        let first = session.provisional();
        for _ in 0..10 {
            assert_eq!(session.provisional(), first);
        }
        assert_eq!(session.record_count(), 0);
        assert!(session.history().is_empty());
        assert_eq!(session.status(), CheckinStatus::Open);
    }

    #[test]
    fn checkin_writes_record_matching_snapshot() {
        let mut session = SessionState::new(today());
        session.apply(InputCommand::SetWater { cups: 8 });
        session.apply(InputCommand::AddExercise { minutes: None });
        session.apply(InputCommand::SetMood { value: 9 });
        session.apply(InputCommand::SetNote { text: "좋은 하루".into() });
        let snapshot = session.provisional();

        let record = session.complete_checkin(now()).clone();
        assert_eq!(record.date, "2026-01-05");
        assert_eq!(record.scores, snapshot.scores);
        assert_eq!(record.total_score, snapshot.total_score);
        assert_eq!(record.completion, snapshot.completion);
        assert_eq!(record.mood, 9);
        assert_eq!(record.note.as_deref(), Some("좋은 하루"));
        assert_eq!(record.created_at, now());

        assert_eq!(session.status(), CheckinStatus::Closed);
        assert_eq!(session.ensure_open(), Err(LifecycleError::AlreadyClosed));
        assert_eq!(
            session.history(),
            &[HistoryEntry {
                date: "2026-01-05".into(),
                total_score: snapshot.total_score,
                mood: 9,
            }]
        );
    }

    #[test]
    fn repeat_checkin_replaces_same_date() {
        let mut session = SessionState::new(today());
        session.complete_checkin(now());
        session.apply(InputCommand::SetWater { cups: 8 });
        session.apply(InputCommand::AddStudy);
        let record = session.complete_checkin(now()).clone();

        assert_eq!(session.record_count(), 1);
        assert_eq!(session.history().len(), 1);
        assert_eq!(record.scores.water, 20);
        assert_eq!(record.scores.study, 5);
        assert_eq!(session.history()[0].total_score, record.total_score);
    }

    #[test]
    fn edits_after_checkin_leave_record_alone() {
        let mut session = SessionState::new(today());
        session.apply(InputCommand::SetWater { cups: 8 });
        let record = session.complete_checkin(now()).clone();

        session.apply(InputCommand::SetWater { cups: 0 });
        assert_eq!(session.today_record(), Some(&record));
        assert_eq!(session.feedback(), scoring::feedback(&record.scores));
    }

    #[test]
    fn report_requires_closed_day() {
        let mut session = SessionState::new(today());
        assert_eq!(
            session.report_payload("날씨 정보 없음", "강아지 정보 없음"),
            Err(LifecycleError::NotReady)
        );

        session.apply(InputCommand::SetWater { cups: 8 });
        session.complete_checkin(now());
        session.apply(InputCommand::SetWater { cups: 0 });
        session.apply(InputCommand::SetWakeSuccess { value: true });

        let payload = session
            .report_payload("Seoul / 맑음 / 3.0°C", "강아지 정보 없음")
            .expect("payload");
        assert_eq!(payload.date, "2026-01-05");
        assert!(payload.habits_checked.contains(&"💧 물 마시기".to_string()));
        assert!(payload.habits_unchecked.contains(&"⏰ 기상 미션".to_string()));
        assert_eq!(payload.weather_summary, "Seoul / 맑음 / 3.0°C");
        assert_eq!(payload.note, "");
    }

    #[test]
    fn roll_over_reopens_and_keeps_history() {
        let mut session = SessionState::new(today());
        session.apply(InputCommand::SetWater { cups: 8 });
        session.complete_checkin(now());

        assert!(!session.roll_over(today()));
        assert_eq!(session.status(), CheckinStatus::Closed);

        let tomorrow = today() + Duration::days(1);
        assert!(session.roll_over(tomorrow));
        assert_eq!(session.status(), CheckinStatus::Open);
        assert_eq!(session.inputs(), &DailyInputs::default());
        assert!(session.today_record().is_none());
        assert!(session.record("2026-01-05").is_some());

        session.complete_checkin(now() + Duration::days(1));
        let dates: Vec<_> = session.history().iter().map(|e| e.date.as_str()).collect();
        assert_eq!(dates, vec!["2026-01-05", "2026-01-06"]);
    }

    #[test]
    fn input_commands_parse_from_json() {
        let command: InputCommand =
            serde_json::from_str(r#"{"action":"set_sleep_duration","value":"5↓"}"#).unwrap();
        assert_eq!(
            command,
            InputCommand::SetSleepDuration {
                value: SleepDuration::FiveOrLess
            }
        );
        let command: InputCommand =
            serde_json::from_str(r#"{"action":"toggle_routine","routine":"🧘 스트레칭"}"#).unwrap();
        assert_eq!(
            command,
            InputCommand::ToggleRoutine {
                routine: WakeRoutine::Stretch
            }
        );
        let command: InputCommand = serde_json::from_str(r#"{"action":"add_exercise"}"#).unwrap();
        assert_eq!(command, InputCommand::AddExercise { minutes: None });
        assert!(serde_json::from_str::<InputCommand>(r#"{"action":"set_sleep_duration","value":"10"}"#).is_err());
    }
}
