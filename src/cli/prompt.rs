//! Interactive prompts for values missing from config, flags and env.

use std::io::{BufRead, Write};

use crate::config::{Config, Platform};
use crate::error::{Error, Result};

/// Ask on stdin for whatever the selected platform still needs.
pub fn prompt_missing(config: &mut Config) -> Result<()> {
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    prompt_missing_with(config, &mut stdin.lock(), &mut stdout.lock())
}

/// Like [`prompt_missing`], reading answers from `input`.
pub fn prompt_missing_with<R: BufRead, W: Write>(
    config: &mut Config,
    input: &mut R,
    output: &mut W,
) -> Result<()> {
    match config.options.platform {
        Platform::Local => {}
        Platform::Viewer => {
            if config.course.id.as_deref().map_or(true, str::is_empty) {
                config.course.id = Some(read_line(input, output, "Course id: ")?);
            }
            fill(&mut config.account.bearer_token, input, output, "Authorization token: ")?;
        }
        Platform::Page => {
            if config.course.url.as_deref().map_or(true, str::is_empty) {
                config.course.url = Some(read_line(input, output, "Course URL: ")?);
            }
            fill(&mut config.account.session_cookie, input, output, "Session cookie: ")?;
            fill(&mut config.account.access_token, input, output, "Access token: ")?;
            fill(&mut config.account.refresh_token, input, output, "Refresh token: ")?;
        }
    }
    Ok(())
}

fn fill<R: BufRead, W: Write>(slot: &mut String, input: &mut R, output: &mut W, prompt: &str) -> Result<()> {
    if slot.trim().is_empty() {
        *slot = read_line(input, output, prompt)?;
    }
    Ok(())
}

fn read_line<R: BufRead, W: Write>(input: &mut R, output: &mut W, prompt: &str) -> Result<String> {
    write!(output, "{}", prompt)?;
    output.flush().ok();

    let mut line = String::new();
    let read = input.read_line(&mut line)?;
    if read == 0 {
        return Err(Error::Prompt(format!("no answer for '{}'", prompt.trim_end_matches([':', ' ']))));
    }
    Ok(line.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_prompts_only_for_missing_values() {
        let mut config = Config::default();
        config.options.platform = Platform::Page;
        config.account.session_cookie = "from-config".into();

        let mut input = Cursor::new("https://x.org/courses/1-a\n acc \nref\n");
        let mut output = Vec::new();
        prompt_missing_with(&mut config, &mut input, &mut output).unwrap();

        assert_eq!(config.course.url.as_deref(), Some("https://x.org/courses/1-a"));
        assert_eq!(config.account.session_cookie, "from-config");
        assert_eq!(config.account.access_token, "acc");
        assert_eq!(config.account.refresh_token, "ref");

        let shown = String::from_utf8(output).unwrap();
        assert!(!shown.contains("Session cookie"));
        assert!(shown.contains("Refresh token: "));
    }

    #[test]
    fn test_nothing_asked_when_supplied() {
        let mut config = Config::default();
        config.course.id = Some("abc".into());
        config.account.bearer_token = "tok".into();

        let mut output = Vec::new();
        prompt_missing_with(&mut config, &mut Cursor::new(""), &mut output).unwrap();
        assert!(output.is_empty());
    }

    #[test]
    fn test_closed_input_is_prompt_error() {
        let mut config = Config::default();
        let err = prompt_missing_with(&mut config, &mut Cursor::new(""), &mut Vec::new()).unwrap_err();
        assert!(matches!(err, Error::Prompt(_)));
    }
}
