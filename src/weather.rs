use crate::fetch::{get_json, FetchError};
use reqwest::Client;
use serde::{Deserialize, Serialize};

pub const UNAVAILABLE: &str = "날씨 정보 없음";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weather {
    pub city: String,
    pub description: String,
    pub temp_c: f64,
    pub feels_like_c: f64,
    pub humidity: i64,
    pub wind_ms: f64,
}

#[derive(Debug, Deserialize)]
struct CurrentWeather {
    #[serde(default)]
    weather: Vec<Condition>,
    main: Readings,
    #[serde(default)]
    wind: Option<Wind>,
}

#[derive(Debug, Deserialize)]
struct Condition {
    description: String,
}

#[derive(Debug, Deserialize)]
struct Readings {
    temp: f64,
    feels_like: f64,
    humidity: f64,
}

#[derive(Debug, Deserialize)]
struct Wind {
    #[serde(default)]
    speed: f64,
}

pub async fn fetch_weather(
    client: &Client,
    base_url: &str,
    city: &str,
    api_key: Option<&str>,
) -> Result<Weather, FetchError> {
    let api_key = api_key
        .map(str::trim)
        .filter(|key| !key.is_empty())
        .ok_or(FetchError::MissingKey)?;

    let url = format!("{}/data/2.5/weather", base_url.trim_end_matches('/'));
    let query = [
        ("q", city),
        ("appid", api_key),
        ("units", "metric"),
        ("lang", "kr"),
    ];
    let current: CurrentWeather = get_json(client, &url, &query).await?;
    from_current(city, current)
}

fn from_current(city: &str, current: CurrentWeather) -> Result<Weather, FetchError> {
    let description = current
        .weather
        .into_iter()
        .next()
        .map(|condition| condition.description)
        .ok_or_else(|| FetchError::Malformed("weather conditions missing".into()))?;

    Ok(Weather {
        city: city.to_string(),
        description,
        temp_c: current.main.temp,
        feels_like_c: current.main.feels_like,
        humidity: current.main.humidity as i64,
        wind_ms: current.wind.map(|wind| wind.speed).unwrap_or(0.0),
    })
}

pub fn summary(weather: Option<&Weather>) -> String {
    match weather {
        Some(w) => format!("{} / {} / {:.1}°C", w.city, w.description, w.temp_c),
        None => UNAVAILABLE.to_string(),
    }
}
