use crate::domain::model::HashtagCount;
use crate::utils::error::{EtlError, Result};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Csv,
}

pub fn render_hashtags(counts: &[HashtagCount], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => {
            let lines: Vec<String> = counts
                .iter()
                .enumerate()
                .map(|(i, h)| format!("{:>2}. #{} ({})", i + 1, h.hashtag, h.count))
                .collect();
            Ok(lines.join("\n"))
        }
        OutputFormat::Json => Ok(serde_json::to_string_pretty(counts)?),
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(Vec::new());
            writer
                .write_record(["hashtag", "count"])
                .map_err(csv_error)?;
            for h in counts {
                writer
                    .write_record([h.hashtag.as_str(), h.count.to_string().as_str()])
                    .map_err(csv_error)?;
            }
            let bytes = writer
                .into_inner()
                .map_err(|e| EtlError::IoError(e.into_error()))?;
            Ok(String::from_utf8_lossy(&bytes).trim_end().to_string())
        }
    }
}

fn csv_error(e: csv::Error) -> EtlError {
    EtlError::IoError(std::io::Error::other(e))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts() -> Vec<HashtagCount> {
        vec![
            HashtagCount {
                hashtag: "OpenAI".to_string(),
                count: 2,
            },
            HashtagCount {
                hashtag: "AI".to_string(),
                count: 1,
            },
        ]
    }

    #[test]
    fn test_text_output() {
        let out = render_hashtags(&counts(), OutputFormat::Text).unwrap();
        assert_eq!(out, " 1. #OpenAI (2)\n 2. #AI (1)");
    }

    #[test]
    fn test_json_output_uses_id_field() {
        let out = render_hashtags(&counts(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value[0]["_id"], "OpenAI");
        assert_eq!(value[0]["count"], 2);
    }

    #[test]
    fn test_csv_output() {
        let out = render_hashtags(&counts(), OutputFormat::Csv).unwrap();
        assert_eq!(out, "hashtag,count\nOpenAI,2\nAI,1");
    }
}
