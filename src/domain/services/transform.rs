use crate::domain::model::{RawTweet, TweetRecord, WeatherRecord};
use crate::utils::error::{EtlError, Result};
use chrono::{DateTime, Utc};
use serde_json::Value;

fn field<'a>(payload: &'a Value, path: &str) -> Result<&'a Value> {
    let pointer = format!("/{}", path.replace('.', "/"));
    payload
        .pointer(&pointer)
        .filter(|v| !v.is_null())
        .ok_or_else(|| EtlError::schema(path))
}

fn f64_field(payload: &Value, path: &str) -> Result<f64> {
    field(payload, path)?
        .as_f64()
        .ok_or_else(|| EtlError::schema(path))
}

// 濕度有時以浮點數回傳 (例如 80.0)；只接受整數值
fn i64_field(payload: &Value, path: &str) -> Result<i64> {
    let value = field(payload, path)?;
    value
        .as_i64()
        .or_else(|| {
            value
                .as_f64()
                .filter(|v| v.fract() == 0.0 && v.abs() <= i64::MAX as f64)
                .map(|v| v as i64)
        })
        .ok_or_else(|| EtlError::schema(path))
}

/// Maps a current-conditions payload onto a record captured at `captured_at`.
///
/// `name`, `main.temp`, `main.humidity` and `wind.speed` are all required: a partial
/// payload is refused instead of being defaulted.
pub fn weather_from_payload(payload: &Value, captured_at: DateTime<Utc>) -> Result<WeatherRecord> {
    let city = field(payload, "name")?
        .as_str()
        .ok_or_else(|| EtlError::schema("name"))?
        .to_string();
    let temperature = f64_field(payload, "main.temp")?;
    let humidity = i64_field(payload, "main.humidity")?;
    let wind_speed = f64_field(payload, "wind.speed")?;

    Ok(WeatherRecord {
        city,
        temperature,
        humidity,
        wind_speed,
        timestamp: captured_at,
    })
}

/// Never fails: missing optional parts degrade to `None` / empty.
pub fn tweet_from_raw(raw: RawTweet, user_id: &str) -> TweetRecord {
    let created_at = raw
        .created_at
        .as_deref()
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc));

    let hashtags = raw
        .entities
        .and_then(|e| e.hashtags)
        .unwrap_or_default()
        .into_iter()
        .map(|h| h.tag)
        .collect();

    TweetRecord {
        text: raw.text,
        created_at,
        user_id: user_id.to_string(),
        hashtags,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn barrie_payload() -> Value {
        json!({
            "name": "Barrie",
            "main": {"temp": 5.2, "humidity": 80},
            "wind": {"speed": 3.1}
        })
    }

    #[test]
    fn test_weather_fields_copied_exactly() {
        let captured_at = Utc::now();
        let record = weather_from_payload(&barrie_payload(), captured_at).unwrap();

        assert_eq!(record.city, "Barrie");
        assert_eq!(record.temperature, 5.2);
        assert_eq!(record.humidity, 80);
        assert_eq!(record.wind_speed, 3.1);
        assert_eq!(record.timestamp, captured_at);
    }

    #[test]
    fn test_each_missing_weather_field_is_a_schema_error() {
        let removals: [(&str, &str); 4] = [
            ("", "name"),
            ("main", "temp"),
            ("main", "humidity"),
            ("wind", "speed"),
        ];

        for (parent, key) in removals {
            let mut payload = barrie_payload();
            let target = if parent.is_empty() {
                payload.as_object_mut().unwrap()
            } else {
                payload[parent].as_object_mut().unwrap()
            };
            target.remove(key);

            let err = weather_from_payload(&payload, Utc::now()).unwrap_err();
            assert!(
                matches!(err, EtlError::SchemaError { .. }),
                "removing {}.{} gave {:?}",
                parent,
                key,
                err
            );
        }
    }

    #[test]
    fn test_null_or_mistyped_weather_field_is_a_schema_error() {
        let mut payload = barrie_payload();
        payload["main"]["temp"] = Value::Null;
        assert!(matches!(
            weather_from_payload(&payload, Utc::now()),
            Err(EtlError::SchemaError { field }) if field == "main.temp"
        ));

        let mut payload = barrie_payload();
        payload["wind"]["speed"] = json!("fast");
        assert!(matches!(
            weather_from_payload(&payload, Utc::now()),
            Err(EtlError::SchemaError { field }) if field == "wind.speed"
        ));
    }

    #[test]
    fn test_missing_main_object_names_the_nested_path() {
        let payload = json!({"name": "Barrie", "wind": {"speed": 3.1}});
        let err = weather_from_payload(&payload, Utc::now()).unwrap_err();
        assert!(matches!(err, EtlError::SchemaError { field } if field == "main.temp"));
    }

    #[test]
    fn test_first_missing_field_is_reported_in_payload_order() {
        let payload = json!({"name": "Barrie"});
        let err = weather_from_payload(&payload, Utc::now()).unwrap_err();
        assert!(matches!(err, EtlError::SchemaError { field } if field == "main.temp"));

        let payload = json!({"name": "Barrie", "main": {"temp": 5.2}});
        let err = weather_from_payload(&payload, Utc::now()).unwrap_err();
        assert!(matches!(err, EtlError::SchemaError { field } if field == "main.humidity"));
    }

    #[test]
    fn test_integral_float_humidity_is_accepted() {
        let mut payload = barrie_payload();
        payload["main"]["humidity"] = json!(80.0);

        let record = weather_from_payload(&payload, Utc::now()).unwrap();
        assert_eq!(record.humidity, 80);
    }

    #[test]
    fn test_fractional_humidity_is_a_schema_error() {
        let mut payload = barrie_payload();
        payload["main"]["humidity"] = json!(80.6);

        assert!(matches!(
            weather_from_payload(&payload, Utc::now()),
            Err(EtlError::SchemaError { field }) if field == "main.humidity"
        ));
    }

    #[test]
    fn test_tweet_without_entities_has_no_hashtags() {
        let raw = RawTweet {
            text: "hello".to_string(),
            ..Default::default()
        };

        let record = tweet_from_raw(raw, "4398626122");
        assert!(record.hashtags.is_empty());
        assert_eq!(record.created_at, None);
        assert_eq!(record.user_id, "4398626122");
    }

    #[test]
    fn test_tweet_hashtags_and_created_at() {
        let raw: RawTweet = serde_json::from_value(json!({
            "id": "1",
            "text": "Launching #AI with #OpenAI",
            "created_at": "2024-05-01T12:30:00.000Z",
            "entities": {"hashtags": [{"start": 10, "end": 13, "tag": "AI"}, {"tag": "OpenAI"}]}
        }))
        .unwrap();

        let record = tweet_from_raw(raw, "42");
        assert_eq!(record.hashtags, vec!["AI", "OpenAI"]);
        assert_eq!(
            record.created_at,
            Some(Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap())
        );
    }

    #[test]
    fn test_entities_without_hashtags_key() {
        let raw: RawTweet = serde_json::from_value(json!({
            "text": "no tags here",
            "created_at": "not a date",
            "entities": {"urls": [{"expanded_url": "https://example.com"}]}
        }))
        .unwrap();

        let record = tweet_from_raw(raw, "42");
        assert!(record.hashtags.is_empty());
        assert_eq!(record.created_at, None);
    }
}
