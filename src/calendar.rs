use chrono::{DateTime, Duration, NaiveDate, Utc};

const NO_NOTE: &str = "메모 없음";
const MAX_LINE_OCTETS: usize = 75;

pub fn checkin_event(date: NaiveDate, score: u8, note: Option<&str>) -> String {
    checkin_event_at(date, score, note, Utc::now())
}

pub fn checkin_event_at(
    date: NaiveDate,
    score: u8,
    note: Option<&str>,
    stamp: DateTime<Utc>,
) -> String {
    let description = note
        .map(str::trim)
        .filter(|note| !note.is_empty())
        .unwrap_or(NO_NOTE);
    let end = date + Duration::days(1);

    let lines = [
        "BEGIN:VCALENDAR".to_string(),
        "VERSION:2.0".to_string(),
        "PRODID:-//habit-coach//daily check-in//KO".to_string(),
        "CALSCALE:GREGORIAN".to_string(),
        "BEGIN:VEVENT".to_string(),
        format!("UID:habit-{}@habit-coach", date.format("%Y-%m-%d")),
        format!("DTSTAMP:{}", stamp.format("%Y%m%dT%H%M%SZ")),
        format!("DTSTART;VALUE=DATE:{}", date.format("%Y%m%d")),
        format!("DTEND;VALUE=DATE:{}", end.format("%Y%m%d")),
        format!("SUMMARY:{}", escape_text(&format!("습관 점수 {score}/100"))),
        format!("DESCRIPTION:{}", escape_text(description)),
        "END:VEVENT".to_string(),
        "END:VCALENDAR".to_string(),
    ];

    let mut out = String::new();
    for line in &lines {
        out.push_str(&fold_line(line));
        out.push_str("\r\n");
    }
    out
}

fn fold_line(line: &str) -> String {
    let mut folded = String::with_capacity(line.len() + line.len() / MAX_LINE_OCTETS * 3);
    let mut width = 0;
    for ch in line.chars() {
        if width + ch.len_utf8() > MAX_LINE_OCTETS {
            folded.push_str("\r\n ");
            width = 1;
        }
        folded.push(ch);
        width += ch.len_utf8();
    }
    folded
}

fn escape_text(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '\\' => escaped.push_str("\\\\"),
            ';' => escaped.push_str("\\;"),
            ',' => escaped.push_str("\\,"),
            '\n' => escaped.push_str("\\n"),
            '\r' => {}
            _ => escaped.push(ch),
        }
    }
    escaped
}
