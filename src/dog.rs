use crate::fetch::{get_json, FetchError};
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};

pub const UNAVAILABLE: &str = "강아지 정보 없음";
const UNKNOWN_BREED: &str = "unknown";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DogImage {
    pub image_url: String,
    pub breed: String,
}

#[derive(Debug, Deserialize)]
struct RandomImage {
    #[serde(default)]
    status: String,
    message: String,
}

pub async fn fetch_dog(client: &Client, base_url: &str) -> Result<DogImage, FetchError> {
    let url = format!("{}/api/breeds/image/random", base_url.trim_end_matches('/'));
    let image: RandomImage = get_json(client, &url, &[]).await?;
    if image.status != "success" {
        return Err(FetchError::Malformed(format!("status {:?}", image.status)));
    }
    Ok(DogImage {
        breed: breed_from_url(&image.message),
        image_url: image.message,
    })
}

pub fn breed_from_url(image_url: &str) -> String {
    let Ok(url) = Url::parse(image_url) else {
        return UNKNOWN_BREED.to_string();
    };
    let Some(segments) = url.path_segments() else {
        return UNKNOWN_BREED.to_string();
    };
    let segments: Vec<&str> = segments.collect();

    segments
        .iter()
        .position(|segment| *segment == "breeds")
        .filter(|idx| idx + 2 < segments.len())
        .map(|idx| segments[idx + 1].replace('-', " ").trim().to_string())
        .filter(|breed| !breed.is_empty())
        .unwrap_or_else(|| UNKNOWN_BREED.to_string())
}

pub fn summary(dog: Option<&DogImage>) -> String {
    match dog {
        Some(dog) => format!("오늘의 강아지 품종: {}", dog.breed),
        None => UNAVAILABLE.to_string(),
    }
}
