use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

pub const WATER_GOAL: u8 = 8;
pub const EXERCISE_FULL_MINUTES: u32 = 30;
pub const EXERCISE_DONE_MINUTES: u32 = 20;
pub const EXERCISE_STEP_MINUTES: u32 = 10;
pub const CATEGORY_MAX: u8 = 20;
pub const MOOD_MIN: u8 = 1;
pub const MOOD_MAX: u8 = 10;

const STUDY_POINTS_PER_UNIT: u32 = 5;
const SLEEP_DONE_SCORE: u8 = 15;
const NOTE_MISSION: &str = "📝 오늘 느낀 점을 한 줄 메모로 남기기";

// declaration order is the tie-break order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Habit {
    Water,
    Exercise,
    Study,
    Sleep,
    Wake,
}

impl Habit {
    pub const ALL: [Habit; 5] = [
        Habit::Water,
        Habit::Exercise,
        Habit::Study,
        Habit::Sleep,
        Habit::Wake,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Habit::Water => "💧 물 마시기",
            Habit::Exercise => "🏃 운동하기",
            Habit::Study => "📚 공부/독서",
            Habit::Sleep => "😴 수면",
            Habit::Wake => "⏰ 기상 미션",
        }
    }

    fn mission_threshold(self) -> u8 {
        match self {
            Habit::Study => 10,
            _ => 15,
        }
    }

    fn mission(self) -> &'static str {
        match self {
            Habit::Water => "💧 식사 전마다 물 한 잔씩, 8잔 채우기",
            Habit::Exercise => "🏃 점심 후 10분 걷기부터 시작해서 30분 채우기",
            Habit::Study => "📚 휴대폰 멀리 두고 25분 집중 1세트 먼저 끝내기",
            Habit::Sleep => "😴 취침 30분 전 화면 끄고 7~8시간 수면 확보하기",
            Habit::Wake => "⏰ 알람 한 번에 일어나서 기상 루틴 하나 실천하기",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SleepDuration {
    #[serde(rename = "5↓")]
    FiveOrLess,
    #[serde(rename = "6")]
    Six,
    #[serde(rename = "7")]
    Seven,
    #[serde(rename = "8")]
    Eight,
    #[serde(rename = "9+")]
    NineOrMore,
}

impl SleepDuration {
    pub const ALL: [SleepDuration; 5] = [
        SleepDuration::FiveOrLess,
        SleepDuration::Six,
        SleepDuration::Seven,
        SleepDuration::Eight,
        SleepDuration::NineOrMore,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SleepDuration::FiveOrLess => "5↓",
            SleepDuration::Six => "6",
            SleepDuration::Seven => "7",
            SleepDuration::Eight => "8",
            SleepDuration::NineOrMore => "9+",
        }
    }

    // 7h and 8h both earn the full base; longer sleep drops back to 15.
    fn base_score(self) -> u8 {
        match self {
            SleepDuration::FiveOrLess => 5,
            SleepDuration::Six => 10,
            SleepDuration::Seven => 20,
            SleepDuration::Eight => 20,
            SleepDuration::NineOrMore => 15,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SleepQuality {
    #[serde(rename = "나쁨")]
    Poor,
    #[serde(rename = "보통")]
    Fair,
    #[serde(rename = "좋음")]
    Good,
}

impl SleepQuality {
    pub const ALL: [SleepQuality; 3] = [SleepQuality::Poor, SleepQuality::Fair, SleepQuality::Good];

    pub fn label(self) -> &'static str {
        match self {
            SleepQuality::Poor => "나쁨",
            SleepQuality::Fair => "보통",
            SleepQuality::Good => "좋음",
        }
    }

    fn bonus(self) -> u8 {
        match self {
            SleepQuality::Poor => 0,
            SleepQuality::Fair => 2,
            SleepQuality::Good => 4,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WakeTime {
    #[serde(rename = "🌅 6시대")]
    Six,
    #[serde(rename = "☀️ 7시대")]
    Seven,
    #[serde(rename = "🌤️ 8시대")]
    Eight,
    #[serde(rename = "🌙 9시 이후")]
    NineOrLater,
}

impl WakeTime {
    pub const ALL: [WakeTime; 4] = [
        WakeTime::Six,
        WakeTime::Seven,
        WakeTime::Eight,
        WakeTime::NineOrLater,
    ];

    pub fn label(self) -> &'static str {
        match self {
            WakeTime::Six => "🌅 6시대",
            WakeTime::Seven => "☀️ 7시대",
            WakeTime::Eight => "🌤️ 8시대",
            WakeTime::NineOrLater => "🌙 9시 이후",
        }
    }

    fn score(self) -> u8 {
        match self {
            WakeTime::Six => 20,
            WakeTime::Seven => 18,
            WakeTime::Eight => 12,
            WakeTime::NineOrLater => 8,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum WakeRoutine {
    #[serde(rename = "🛏️ 이불 정리")]
    MakeBed,
    #[serde(rename = "💧 물 한 잔")]
    GlassOfWater,
    #[serde(rename = "🧘 스트레칭")]
    Stretch,
}

impl WakeRoutine {
    pub const ALL: [WakeRoutine; 3] = [
        WakeRoutine::MakeBed,
        WakeRoutine::GlassOfWater,
        WakeRoutine::Stretch,
    ];

    pub fn label(self) -> &'static str {
        match self {
            WakeRoutine::MakeBed => "🛏️ 이불 정리",
            WakeRoutine::GlassOfWater => "💧 물 한 잔",
            WakeRoutine::Stretch => "🧘 스트레칭",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyInputs {
    water_cups: u8,
    exercise_minutes: u32,
    study_units: u32,
    sleep_duration: SleepDuration,
    sleep_quality: SleepQuality,
    wake_success: bool,
    wake_time: WakeTime,
    wake_routines: BTreeSet<WakeRoutine>,
    mood: u8,
    note: String,
}

impl Default for DailyInputs {
    fn default() -> Self {
        Self {
            water_cups: 0,
            exercise_minutes: 0,
            study_units: 0,
            sleep_duration: SleepDuration::Seven,
            sleep_quality: SleepQuality::Fair,
            wake_success: false,
            wake_time: WakeTime::Seven,
            wake_routines: BTreeSet::new(),
            mood: 6,
            note: String::new(),
        }
    }
}

impl DailyInputs {
    pub fn water_cups(&self) -> u8 {
        self.water_cups
    }

    pub fn exercise_minutes(&self) -> u32 {
        self.exercise_minutes
    }

    pub fn study_units(&self) -> u32 {
        self.study_units
    }

    pub fn sleep_duration(&self) -> SleepDuration {
        self.sleep_duration
    }

    pub fn sleep_quality(&self) -> SleepQuality {
        self.sleep_quality
    }

    pub fn wake_success(&self) -> bool {
        self.wake_success
    }

    pub fn wake_time(&self) -> WakeTime {
        self.wake_time
    }

    pub fn wake_routines(&self) -> &BTreeSet<WakeRoutine> {
        &self.wake_routines
    }

    pub fn mood(&self) -> u8 {
        self.mood
    }

    pub fn note(&self) -> Option<&str> {
        let trimmed = self.note.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }

    pub fn set_water_cups(&mut self, cups: u8) {
        self.water_cups = cups.min(WATER_GOAL);
    }

    pub fn add_exercise(&mut self, minutes: u32) {
        self.exercise_minutes = self.exercise_minutes.saturating_add(minutes);
    }

    pub fn reset_exercise(&mut self) {
        self.exercise_minutes = 0;
    }

    pub fn add_study_unit(&mut self) {
        self.study_units = self.study_units.saturating_add(1);
    }

    pub fn reset_study(&mut self) {
        self.study_units = 0;
    }

    pub fn set_sleep(&mut self, duration: SleepDuration, quality: SleepQuality) {
        self.sleep_duration = duration;
        self.sleep_quality = quality;
    }

    pub fn set_sleep_duration(&mut self, duration: SleepDuration) {
        self.sleep_duration = duration;
    }

    pub fn set_sleep_quality(&mut self, quality: SleepQuality) {
        self.sleep_quality = quality;
    }

    pub fn set_wake_success(&mut self, success: bool) {
        self.wake_success = success;
    }

    pub fn set_wake_time(&mut self, time: WakeTime) {
        self.wake_time = time;
    }

    pub fn toggle_routine(&mut self, routine: WakeRoutine) -> bool {
        if self.wake_routines.remove(&routine) {
            false
        } else {
            self.wake_routines.insert(routine);
            true
        }
    }

    pub fn set_mood(&mut self, mood: u8) {
        self.mood = mood.clamp(MOOD_MIN, MOOD_MAX);
    }

    pub fn set_note(&mut self, note: impl Into<String>) {
        self.note = note.into();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryScores {
    pub water: u8,
    pub exercise: u8,
    pub study: u8,
    pub sleep: u8,
    pub wake: u8,
}

impl CategoryScores {
    pub fn get(&self, habit: Habit) -> u8 {
        match habit {
            Habit::Water => self.water,
            Habit::Exercise => self.exercise,
            Habit::Study => self.study,
            Habit::Sleep => self.sleep,
            Habit::Wake => self.wake,
        }
    }

    pub fn total(&self) -> u8 {
        Habit::ALL.iter().map(|habit| self.get(*habit)).sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionMap {
    pub water: bool,
    pub exercise: bool,
    pub study: bool,
    pub sleep: bool,
    pub wake: bool,
}

impl CompletionMap {
    pub fn get(&self, habit: Habit) -> bool {
        match habit {
            Habit::Water => self.water,
            Habit::Exercise => self.exercise,
            Habit::Study => self.study,
            Habit::Sleep => self.sleep,
            Habit::Wake => self.wake,
        }
    }

    pub fn checked(&self) -> Vec<Habit> {
        Habit::ALL.into_iter().filter(|habit| self.get(*habit)).collect()
    }

    pub fn unchecked(&self) -> Vec<Habit> {
        Habit::ALL.into_iter().filter(|habit| !self.get(*habit)).collect()
    }

    pub fn achievement(&self) -> u8 {
        let done = self.checked().len() as u32;
        let total = Habit::ALL.len() as u32;
        ((done * 100 + total / 2) / total) as u8
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoreCard {
    pub scores: CategoryScores,
    pub total_score: u8,
    pub completion: CompletionMap,
}

pub fn score(inputs: &DailyInputs) -> ScoreCard {
    let sleep = (inputs.sleep_duration.base_score() + inputs.sleep_quality.bonus()).min(CATEGORY_MAX);
    let wake = if inputs.wake_success {
        let routines = inputs.wake_routines.len() as u8;
        (inputs.wake_time.score() + routines).min(CATEGORY_MAX)
    } else {
        0
    };

    let scores = CategoryScores {
        water: scaled(u32::from(inputs.water_cups), u32::from(WATER_GOAL)),
        exercise: scaled(inputs.exercise_minutes, EXERCISE_FULL_MINUTES),
        study: inputs
            .study_units
            .saturating_mul(STUDY_POINTS_PER_UNIT)
            .min(u32::from(CATEGORY_MAX)) as u8,
        sleep,
        wake,
    };

    let completion = CompletionMap {
        water: inputs.water_cups >= WATER_GOAL,
        exercise: inputs.exercise_minutes >= EXERCISE_DONE_MINUTES,
        study: inputs.study_units >= 1,
        sleep: scores.sleep >= SLEEP_DONE_SCORE,
        wake: inputs.wake_success,
    };

    ScoreCard {
        total_score: scores.total(),
        scores,
        completion,
    }
}

fn scaled(value: u32, full: u32) -> u8 {
    let full = u64::from(full);
    let points = (u64::from(value) * u64::from(CATEGORY_MAX) + full / 2) / full;
    points.min(u64::from(CATEGORY_MAX)) as u8
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    pub strengths: Vec<Habit>,
    pub weak_point: Habit,
    pub missions: Vec<String>,
}

pub fn feedback(scores: &CategoryScores) -> Feedback {
    let mut ranked: Vec<(Habit, u8)> = Habit::ALL
        .into_iter()
        .map(|habit| (habit, scores.get(habit)))
        .collect();
    // stable sort keeps canonical order among equal scores
    ranked.sort_by(|a, b| b.1.cmp(&a.1));

    let strengths = ranked.iter().take(2).map(|(habit, _)| *habit).collect();
    let weak_point = Habit::ALL
        .into_iter()
        .min_by_key(|habit| scores.get(*habit))
        .unwrap_or(Habit::Water);

    let mut missions: Vec<String> = Habit::ALL
        .into_iter()
        .filter(|habit| scores.get(*habit) < habit.mission_threshold())
        .map(|habit| habit.mission().to_string())
        .collect();
    while missions.len() < 3 {
        missions.push(NOTE_MISSION.to_string());
    }
    missions.truncate(3);

    Feedback {
        strengths,
        weak_point,
        missions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs() -> DailyInputs {
        DailyInputs::default()
    }

    #[test]
    fn water_score_scales_and_saturates() {
        let mut day = inputs();
        let mut last = 0;
        for cups in 0..=12 {
            day.set_water_cups(cups);
            let water = score(&day).scores.water;
            assert!(water >= last);
            last = water;
        }
        day.set_water_cups(0);
        assert_eq!(score(&day).scores.water, 0);
        day.set_water_cups(4);
        assert_eq!(score(&day).scores.water, 10);
        day.set_water_cups(8);
        assert_eq!(score(&day).scores.water, 20);
        day.set_water_cups(11);
        assert_eq!(day.water_cups(), WATER_GOAL);
        assert_eq!(score(&day).scores.water, 20);
    }

    #[test]
    fn water_rounds_half_up() {
        let mut day = inputs();
        day.set_water_cups(7);
        // 17.5 -> 18
        assert_eq!(score(&day).scores.water, 18);
    }

    #[test]
    fn exercise_score_rounds_and_saturates() {
        let mut day = inputs();
        assert_eq!(score(&day).scores.exercise, 0);
        day.add_exercise(EXERCISE_STEP_MINUTES);
        day.add_exercise(EXERCISE_STEP_MINUTES);
        assert_eq!(day.exercise_minutes(), 20);
        assert_eq!(score(&day).scores.exercise, 13);
        day.add_exercise(EXERCISE_STEP_MINUTES);
        assert_eq!(score(&day).scores.exercise, 20);
        day.add_exercise(90);
        assert_eq!(score(&day).scores.exercise, 20);
        day.reset_exercise();
        assert_eq!(score(&day).scores.exercise, 0);
    }

    #[test]
    fn study_score_caps_at_twenty() {
        let mut day = inputs();
        for _ in 0..4 {
            day.add_study_unit();
        }
        assert_eq!(score(&day).scores.study, 20);
        day.add_study_unit();
        assert_eq!(score(&day).scores.study, 20);
        day.reset_study();
        assert_eq!(score(&day).scores.study, 0);
    }

    #[test]
    fn sleep_table_keeps_seven_and_eight_at_max() {
        let mut day = inputs();
        day.set_sleep(SleepDuration::Seven, SleepQuality::Fair);
        assert_eq!(score(&day).scores.sleep, 20);
        day.set_sleep(SleepDuration::Eight, SleepQuality::Poor);
        assert_eq!(score(&day).scores.sleep, 20);
        day.set_sleep(SleepDuration::Six, SleepQuality::Good);
        assert_eq!(score(&day).scores.sleep, 14);
        day.set_sleep(SleepDuration::NineOrMore, SleepQuality::Fair);
        assert_eq!(score(&day).scores.sleep, 17);
        day.set_sleep(SleepDuration::FiveOrLess, SleepQuality::Poor);
        assert_eq!(score(&day).scores.sleep, 5);
    }

    #[test]
    fn wake_requires_success() {
        let mut day = inputs();
        day.set_wake_time(WakeTime::Six);
        day.toggle_routine(WakeRoutine::Stretch);
        assert_eq!(score(&day).scores.wake, 0);

        day.set_wake_success(true);
        day.set_wake_time(WakeTime::Seven);
        day.toggle_routine(WakeRoutine::MakeBed);
        assert_eq!(score(&day).scores.wake, 20);

        day.set_wake_time(WakeTime::Six);
        day.toggle_routine(WakeRoutine::GlassOfWater);
        assert_eq!(score(&day).scores.wake, 20);

        day.set_wake_time(WakeTime::NineOrLater);
        assert_eq!(score(&day).scores.wake, 11);
    }

    #[test]
    fn toggle_routine_flips_membership() {
        let mut day = inputs();
        assert!(day.toggle_routine(WakeRoutine::MakeBed));
        assert!(!day.toggle_routine(WakeRoutine::MakeBed));
        assert!(day.wake_routines().is_empty());
    }

    #[test]
    fn completion_boundaries() {
        let mut day = inputs();
        day.set_water_cups(7);
        day.add_exercise(19);
        day.set_sleep(SleepDuration::Six, SleepQuality::Good);
        let card = score(&day);
        assert!(!card.completion.water);
        assert!(!card.completion.exercise);
        assert!(!card.completion.study);
        assert!(!card.completion.sleep);
        assert!(!card.completion.wake);

        day.set_water_cups(8);
        day.add_exercise(1);
        day.add_study_unit();
        day.set_sleep(SleepDuration::NineOrMore, SleepQuality::Poor);
        day.set_wake_success(true);
        let card = score(&day);
        assert!(card.completion.water);
        assert!(card.completion.exercise);
        assert!(card.completion.study);
        assert!(card.completion.sleep);
        assert!(card.completion.wake);
        assert_eq!(card.completion.achievement(), 100);
    }

    #[test]
    fn total_is_sum_of_categories_and_bounded() {
        for duration in SleepDuration::ALL {
            for quality in SleepQuality::ALL {
                for time in WakeTime::ALL {
                    let mut day = inputs();
                    day.set_sleep(duration, quality);
                    day.set_wake_time(time);
                    day.set_wake_success(true);
                    day.set_water_cups(u8::MAX);
                    day.add_exercise(u32::MAX);
                    day.add_exercise(1);
                    for routine in WakeRoutine::ALL {
                        day.toggle_routine(routine);
                    }
                    let card = score(&day);
                    for habit in Habit::ALL {
                        assert!(card.scores.get(habit) <= CATEGORY_MAX);
                    }
                    let sum: u32 = Habit::ALL
                        .iter()
                        .map(|habit| u32::from(card.scores.get(*habit)))
                        .sum();
                    assert_eq!(u32::from(card.total_score), sum);
                    assert!(card.total_score <= 100);
                }
            }
        }
    }

    #[test]
    fn scoring_is_idempotent() {
        let mut day = inputs();
        day.set_water_cups(5);
        day.add_study_unit();
        let first = score(&day);
        for _ in 0..5 {
            assert_eq!(score(&day), first);
        }
    }

    #[test]
    fn mood_is_clamped() {
        let mut day = inputs();
        day.set_mood(0);
        assert_eq!(day.mood(), MOOD_MIN);
        day.set_mood(42);
        assert_eq!(day.mood(), MOOD_MAX);
    }

    #[test]
    fn blank_note_reads_as_none() {
        let mut day = inputs();
        day.set_note("   ");
        assert_eq!(day.note(), None);
        day.set_note(" 산책함 ");
        assert_eq!(day.note(), Some("산책함"));
    }

    #[test]
    fn feedback_ranks_with_canonical_tie_break() {
        let scores = CategoryScores {
            water: 20,
            exercise: 5,
            study: 20,
            sleep: 20,
            wake: 5,
        };
        let fb = feedback(&scores);
        assert_eq!(fb.strengths, vec![Habit::Water, Habit::Study]);
        assert_eq!(fb.weak_point, Habit::Exercise);
        assert_eq!(fb.missions.len(), 3);
        assert_eq!(fb.missions[0], Habit::Exercise.mission());
        assert_eq!(fb.missions[1], Habit::Wake.mission());
        assert_eq!(fb.missions[2], NOTE_MISSION);
    }

    #[test]
    fn feedback_truncates_to_three_missions() {
        let scores = CategoryScores {
            water: 0,
            exercise: 0,
            study: 0,
            sleep: 0,
            wake: 0,
        };
        let fb = feedback(&scores);
        assert_eq!(fb.strengths, vec![Habit::Water, Habit::Exercise]);
        assert_eq!(fb.weak_point, Habit::Water);
        assert_eq!(
            fb.missions,
            vec![
                Habit::Water.mission().to_string(),
                Habit::Exercise.mission().to_string(),
                Habit::Study.mission().to_string(),
            ]
        );
    }

    #[test]
    fn study_mission_uses_lower_threshold() {
        let scores = CategoryScores {
            water: 20,
            exercise: 20,
            study: 10,
            sleep: 20,
            wake: 20,
        };
        let fb = feedback(&scores);
        assert!(fb.missions.iter().all(|mission| mission == NOTE_MISSION));
    }
}
