//! Interactive `.env` setup.
//!
//! Asks for the Apollo API key, a default campaign id and the server port,
//! then writes them in the plain variable names that [`crate::load_config`]
//! picks up as fallbacks.

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::Path;
use thiserror::Error;

use crate::models::DEFAULT_PORT;

/// Campaign written when the operator just presses Enter.
pub const DEFAULT_CAMPAIGN_ID: &str = "68d1103b41c0f700155cd927";

#[derive(Error, Debug)]
pub enum SetupError {
    #[error("API Key is required. Exiting...")]
    MissingApiKey,
    #[error("Invalid port '{0}': expected a number between 1 and 65535")]
    InvalidPort(String),
    #[error("I/O error during setup: {0}")]
    Io(#[from] io::Error),
}

/// Values collected from the operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupAnswers {
    pub api_key: String,
    pub campaign_id: String,
    pub port: u16,
}

impl SetupAnswers {
    /// Builds answers from raw prompt input, applying the defaults for blank
    /// campaign and port values.
    pub fn from_raw(api_key: &str, campaign_id: &str, port: &str) -> Result<Self, SetupError> {
        let api_key = api_key.trim();
        if api_key.is_empty() {
            return Err(SetupError::MissingApiKey);
        }

        let campaign_id = match campaign_id.trim() {
            "" => DEFAULT_CAMPAIGN_ID,
            value => value,
        };

        let port = match port.trim() {
            "" => DEFAULT_PORT,
            value => value
                .parse::<u16>()
                .ok()
                .filter(|p| *p != 0)
                .ok_or_else(|| SetupError::InvalidPort(value.to_string()))?,
        };

        Ok(Self {
            api_key: api_key.to_string(),
            campaign_id: campaign_id.to_string(),
            port,
        })
    }

    pub fn render_env_file(&self) -> String {
        format!(
            "# Apollo API Configuration\nAPOLLO_API_KEY={}\nAPOLLO_CAMPAIGN_ID={}\nPORT={}\n",
            self.api_key, self.campaign_id, self.port
        )
    }
}

/// Writes `question`, then reads one line of input. EOF yields an empty answer.
pub fn prompt<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    question: &str,
) -> io::Result<String> {
    write!(output, "{}", question)?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// Runs the three prompts. A blank API key aborts before the other questions.
pub fn collect_answers<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
) -> Result<SetupAnswers, SetupError> {
    let api_key = prompt(input, output, "Enter your Apollo API Key: ")?;
    if api_key.trim().is_empty() {
        return Err(SetupError::MissingApiKey);
    }

    let campaign_id = prompt(
        input,
        output,
        "Enter your Apollo Campaign ID (press Enter for default): ",
    )?;
    let port = prompt(
        input,
        output,
        &format!("Enter server port (press Enter for {}): ", DEFAULT_PORT),
    )?;

    SetupAnswers::from_raw(&api_key, &campaign_id, &port)
}

pub fn write_env_file(path: &Path, answers: &SetupAnswers) -> Result<(), SetupError> {
    fs::write(path, answers.render_env_file())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_defaults_for_blank_campaign_and_port() {
        let answers = SetupAnswers::from_raw(" key-123 ", "", "  ").unwrap();
        assert_eq!(
            answers,
            SetupAnswers {
                api_key: "key-123".to_string(),
                campaign_id: DEFAULT_CAMPAIGN_ID.to_string(),
                port: 3000,
            }
        );
    }

    #[test]
    fn test_blank_api_key_is_rejected() {
        assert!(matches!(
            SetupAnswers::from_raw("   ", "c1", "3000"),
            Err(SetupError::MissingApiKey)
        ));
    }

    #[test]
    fn test_non_numeric_port_is_rejected() {
        assert!(matches!(
            SetupAnswers::from_raw("k", "c", "eighty"),
            Err(SetupError::InvalidPort(p)) if p == "eighty"
        ));
        assert!(matches!(
            SetupAnswers::from_raw("k", "c", "0"),
            Err(SetupError::InvalidPort(_))
        ));
    }

    #[test]
    fn test_render_env_file() {
        let answers = SetupAnswers {
            api_key: "k1".to_string(),
            campaign_id: "c1".to_string(),
            port: 8080,
        };
        assert_eq!(
            answers.render_env_file(),
            "# Apollo API Configuration\nAPOLLO_API_KEY=k1\nAPOLLO_CAMPAIGN_ID=c1\nPORT=8080\n"
        );
    }

    #[test]
    fn test_collect_answers_reads_three_lines() {
        let mut input = Cursor::new("abc\r\ncamp-7\n4000\n");
        let mut output = Vec::new();

        let answers = collect_answers(&mut input, &mut output).unwrap();

        assert_eq!(answers.api_key, "abc");
        assert_eq!(answers.campaign_id, "camp-7");
        assert_eq!(answers.port, 4000);
        let transcript = String::from_utf8(output).unwrap();
        assert!(transcript.contains("Enter your Apollo API Key: "));
        assert!(transcript.contains("press Enter for 3000"));
    }

    #[test]
    fn test_collect_answers_stops_after_blank_key() {
        let mut input = Cursor::new("\ncamp\n");
        let mut output = Vec::new();

        let result = collect_answers(&mut input, &mut output);

        assert!(matches!(result, Err(SetupError::MissingApiKey)));
        let transcript = String::from_utf8(output).unwrap();
        assert!(!transcript.contains("Campaign ID"));
    }

    #[test]
    fn test_write_env_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        let answers = SetupAnswers::from_raw("k9", "c9", "").unwrap();

        write_env_file(&path, &answers).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("# Apollo API Configuration\n"));
        assert!(written.contains("APOLLO_API_KEY=k9\n"));
        assert!(written.contains("PORT=3000\n"));
    }
}
