use crate::coach::Persona;
use crate::dog::DogImage;
use crate::scoring::{Feedback, Habit};
use crate::session::CheckinRecord;
use crate::weather::Weather;

pub struct ShareContext<'a> {
    pub record: &'a CheckinRecord,
    pub feedback: &'a Feedback,
    pub city: &'a str,
    pub persona: Persona,
    pub weather: Option<&'a Weather>,
    pub dog: Option<&'a DogImage>,
    pub report: &'a str,
}

pub fn share_text(ctx: &ShareContext<'_>) -> String {
    let record = ctx.record;
    let done = record.completion.checked().len();
    let strengths: Vec<&str> = ctx.feedback.strengths.iter().map(|h| h.label()).collect();

    let mut lines = vec![
        format!("📊 AI 습관 트래커 ({})", record.date),
        format!("도시: {} | 코치: {}", ctx.city, ctx.persona.label()),
        format!(
            "점수: {}/100 | 달성: {done}/{} | 기분: {}/10",
            record.total_score,
            Habit::ALL.len(),
            record.mood
        ),
        match ctx.weather {
            Some(w) => format!("날씨: {} {:.1}°C", w.description, w.temp_c),
            None => "날씨: (없음)".to_string(),
        },
        match ctx.dog {
            Some(dog) => format!("강아지: {}", dog.breed),
            None => "강아지: (없음)".to_string(),
        },
        format!(
            "강점: {} | 보완: {}",
            strengths.join(", "),
            ctx.feedback.weak_point.label()
        ),
        "내일 미션:".to_string(),
    ];
    lines.extend(
        ctx.feedback
            .missions
            .iter()
            .enumerate()
            .map(|(idx, mission)| format!("{}. {mission}", idx + 1)),
    );
    lines.push(String::new());
    lines.push("🧠 리포트".to_string());
    lines.push(ctx.report.to_string());
    lines.join("\n")
}
