//! Line-oriented navigation scripts.
//!
//! ```text
//! # comment
//! push MainPage
//! navigate SecondPage/ThirdPage {"id": 7}
//! back
//! back-to MainPage
//! root
//! ```

use std::fmt;

use anyhow::{Context, Result, bail};

use crate::navigation::{self, NavigationController, ParameterBag};

/// One navigation operation with the parameters passed to it
#[derive(Debug, Clone)]
pub enum NavigationStep {
    Push { key: String, parameters: ParameterBag },
    Navigate { path: String, parameters: ParameterBag },
    Back { parameters: ParameterBag },
    BackTo { key: String, parameters: ParameterBag },
    Root { parameters: ParameterBag },
}

impl NavigationStep {
    pub fn parameters(&self) -> &ParameterBag {
        match self {
            NavigationStep::Push { parameters, .. }
            | NavigationStep::Navigate { parameters, .. }
            | NavigationStep::Back { parameters }
            | NavigationStep::BackTo { parameters, .. }
            | NavigationStep::Root { parameters } => parameters,
        }
    }

    pub async fn run(&self, navigation: &NavigationController) -> navigation::Result<()> {
        let parameters = Some(self.parameters());
        match self {
            NavigationStep::Push { key, .. } => navigation.navigate_to(key, parameters).await,
            NavigationStep::Navigate { path, .. } => navigation.navigate(path, parameters).await,
            NavigationStep::Back { .. } => navigation.go_back(parameters).await,
            NavigationStep::BackTo { key, .. } => navigation.go_back_to(key, parameters).await,
            NavigationStep::Root { .. } => navigation.go_back_to_root(parameters).await,
        }
    }
}

impl fmt::Display for NavigationStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavigationStep::Push { key, .. } => write!(f, "push {}", key)?,
            NavigationStep::Navigate { path, .. } => write!(f, "navigate {}", path)?,
            NavigationStep::Back { .. } => f.write_str("back")?,
            NavigationStep::BackTo { key, .. } => write!(f, "back-to {}", key)?,
            NavigationStep::Root { .. } => f.write_str("root")?,
        }

        let parameters = self.parameters();
        if !parameters.is_empty() {
            let keys: Vec<&str> = parameters.keys().collect();
            write!(f, " [{}]", keys.join(", "))?;
        }
        Ok(())
    }
}

/// Parse a script. Blank lines and lines starting with `#` are skipped.
pub fn parse_script(source: &str) -> Result<Vec<NavigationStep>> {
    let mut steps = Vec::new();

    for (index, line) in source.lines().enumerate() {
        let line_number = index + 1;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let step = parse_line(line).with_context(|| format!("line {}: {}", line_number, line))?;
        steps.push(step);
    }

    log::debug!("Parsed navigation script with {} steps", steps.len());
    Ok(steps)
}

fn parse_line(line: &str) -> Result<NavigationStep> {
    let (verb, rest) = split_word(line);

    let step = match verb {
        "push" => {
            let (key, parameters) = target_and_parameters(verb, rest)?;
            NavigationStep::Push { key, parameters }
        }
        "navigate" => {
            let (path, parameters) = target_and_parameters(verb, rest)?;
            NavigationStep::Navigate { path, parameters }
        }
        "back-to" => {
            let (key, parameters) = target_and_parameters(verb, rest)?;
            NavigationStep::BackTo { key, parameters }
        }
        "back" => NavigationStep::Back {
            parameters: parse_parameters(rest)?,
        },
        "root" => NavigationStep::Root {
            parameters: parse_parameters(rest)?,
        },
        other => bail!("unknown command '{}'", other),
    };
    Ok(step)
}

fn split_word(text: &str) -> (&str, &str) {
    match text.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (text, ""),
    }
}

fn target_and_parameters(verb: &str, rest: &str) -> Result<(String, ParameterBag)> {
    let (target, parameters) = split_word(rest);
    if target.is_empty() {
        bail!("'{}' needs a target", verb);
    }
    if target.starts_with('{') {
        bail!("'{}' needs a target before its parameters", verb);
    }
    Ok((target.to_string(), parse_parameters(parameters)?))
}

fn parse_parameters(text: &str) -> Result<ParameterBag> {
    if text.is_empty() {
        return Ok(ParameterBag::new());
    }
    let value: serde_json::Value =
        serde_json::from_str(text).context("parameters are not valid JSON")?;
    Ok(ParameterBag::from_json(&value)?)
}
