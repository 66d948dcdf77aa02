use crate::calendar::checkin_event;
use crate::coach::{chat_reply, generate_report};
use crate::dog::{self, fetch_dog, DogImage};
use crate::errors::AppError;
use crate::fetch::FetchError;
use crate::models::{
    ChatRequest, ChatResponse, ReportRequest, ReportResponse, StatsResponse, TodayResponse,
    WeatherQuery,
};
use crate::session::{date_key, InputCommand, LifecycleError, SessionState};
use crate::share::{share_text, ShareContext};
use crate::state::AppState;
use crate::stats::build_stats_at;
use crate::ui::render_index;
use crate::weather::{self, fetch_weather, Weather};
use axum::{
    extract::{Query, State},
    http::header,
    response::{Html, IntoResponse},
    Json,
};
use chrono::{Local, NaiveDate, Utc};
use tracing::{debug, info, warn};

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let mut session = state.session.lock().await;
    session.roll_over(today());
    Html(render_index(&today_view(&session)))
}

pub async fn get_today(State(state): State<AppState>) -> Json<TodayResponse> {
    let mut session = state.session.lock().await;
    session.roll_over(today());
    Json(today_view(&session))
}

pub async fn update_inputs(
    State(state): State<AppState>,
    Json(command): Json<InputCommand>,
) -> Result<Json<TodayResponse>, AppError> {
    let mut session = state.session.lock().await;
    session.roll_over(today());
    session.ensure_open()?;

    debug!(?command, "applying input");
    session.apply(command);
    Ok(Json(today_view(&session)))
}

pub async fn complete_checkin(State(state): State<AppState>) -> Json<TodayResponse> {
    let mut session = state.session.lock().await;
    session.roll_over(today());

    let record = session.complete_checkin(Utc::now());
    info!(
        date = %record.date,
        total_score = record.total_score,
        "check-in completed"
    );
    Json(today_view(&session))
}

pub async fn get_stats(State(state): State<AppState>) -> Json<StatsResponse> {
    let mut session = state.session.lock().await;
    session.roll_over(today());
    Json(build_stats_at(session.date(), session.history()))
}

pub async fn create_report(
    State(state): State<AppState>,
    Json(request): Json<ReportRequest>,
) -> Result<Json<ReportResponse>, AppError> {
    {
        let mut session = state.session.lock().await;
        session.roll_over(today());
        session.today_record().ok_or(LifecycleError::NotReady)?;
    }

    let city = request
        .city
        .as_deref()
        .map(str::trim)
        .filter(|city| !city.is_empty())
        .unwrap_or(&state.config.default_city)
        .to_string();
    let (weather, dog) = tokio::join!(lookup_weather(&state, &city), lookup_dog(&state));

    // the day may have rolled over while the lookups were in flight
    let (payload, record, feedback) = {
        let session = state.session.lock().await;
        let payload = session.report_payload(
            weather::summary(weather.as_ref()),
            dog::summary(dog.as_ref()),
        )?;
        let record = session
            .today_record()
            .cloned()
            .ok_or(LifecycleError::NotReady)?;
        (payload, record, session.feedback())
    };

    let report = generate_report(&state.http, &state.config, request.persona, &payload).await;
    let share_text = share_text(&ShareContext {
        record: &record,
        feedback: &feedback,
        city: &city,
        persona: request.persona,
        weather: weather.as_ref(),
        dog: dog.as_ref(),
        report: &report,
    });

    Ok(Json(ReportResponse {
        date: record.date,
        persona: request.persona,
        city,
        weather,
        dog,
        report,
        share_text,
    }))
}

pub async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let payload = {
        let mut session = state.session.lock().await;
        session.roll_over(today());
        session.report_payload(weather::UNAVAILABLE, dog::UNAVAILABLE)?
    };
    if request.message.trim().is_empty() {
        return Err(AppError::bad_request("message must not be empty"));
    }

    let reply = chat_reply(
        &state.http,
        &state.config,
        request.persona,
        &payload,
        &request.message,
    )
    .await;
    Ok(Json(ChatResponse {
        date: payload.date,
        persona: request.persona,
        reply,
    }))
}

pub async fn export_calendar(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let (date, score, note) = {
        let mut session = state.session.lock().await;
        session.roll_over(today());
        let record = session.today_record().ok_or(LifecycleError::NotReady)?;
        (session.date(), record.total_score, record.note.clone())
    };

    let body = checkin_event(date, score, note.as_deref());
    let disposition = format!("attachment; filename=\"habit-{}.ics\"", date_key(date));
    Ok((
        [
            (header::CONTENT_TYPE, "text/calendar; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    ))
}

pub async fn get_weather(
    State(state): State<AppState>,
    Query(query): Query<WeatherQuery>,
) -> Result<Json<Option<Weather>>, AppError> {
    let city = match query.city {
        Some(city) if city.trim().is_empty() => {
            return Err(AppError::bad_request("city must not be empty"));
        }
        Some(city) => city.trim().to_string(),
        None => state.config.default_city.clone(),
    };
    Ok(Json(lookup_weather(&state, &city).await))
}

pub async fn get_dog(State(state): State<AppState>) -> Json<Option<DogImage>> {
    Json(lookup_dog(&state).await)
}

async fn lookup_weather(state: &AppState, city: &str) -> Option<Weather> {
    let config = &state.config;
    match fetch_weather(
        &state.http,
        &config.weather_base_url,
        city,
        config.weather_api_key.as_deref(),
    )
    .await
    {
        Ok(weather) => Some(weather),
        Err(FetchError::MissingKey) => {
            debug!("weather lookup skipped: no api key");
            None
        }
        Err(err) => {
            warn!(city, "weather lookup failed: {err}");
            None
        }
    }
}

async fn lookup_dog(state: &AppState) -> Option<DogImage> {
    match fetch_dog(&state.http, &state.config.dog_base_url).await {
        Ok(dog) => Some(dog),
        Err(err) => {
            warn!("dog lookup failed: {err}");
            None
        }
    }
}

fn today_view(session: &SessionState) -> TodayResponse {
    let record = session.today_record().cloned();
    let (scores, total_score, completion) = match &record {
        Some(record) => (record.scores, record.total_score, record.completion),
        None => {
            let card = session.provisional();
            (card.scores, card.total_score, card.completion)
        }
    };

    TodayResponse {
        date: session.date_key(),
        status: session.status(),
        inputs: session.inputs().clone(),
        scores,
        total_score,
        achievement: completion.achievement(),
        completion,
        feedback: session.feedback(),
        record,
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}
