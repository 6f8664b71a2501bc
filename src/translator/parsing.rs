use super::TranslatorOptions;
use super::resolver::Endpoint;
use crate::playbook::Command;
use crate::workflow::Parameter;
use ahash::AHashMap;
use itertools::Itertools;

/// The app, operation and parameters a command translates into.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedCommand {
    pub app_name: String,
    pub app_version: String,
    pub operation: String,
    pub parameters: Vec<Parameter>,
}

/// What a parser may use besides the command itself.
pub struct CommandContext<'a> {
    pub endpoint: Option<&'a Endpoint>,
    pub options: &'a TranslatorOptions,
}

/// Defines the contract for turning one command type into an action body.
pub trait CommandParser: Send + Sync {
    fn command_type(&self) -> &str;
    fn parse(&self, command: &Command, context: &CommandContext<'_>) -> ParsedCommand;
}

/// Translates `"<METHOD> <path> [version]"` command lines into http app calls.
pub struct HttpCommandParser;

impl CommandParser for HttpCommandParser {
    fn command_type(&self) -> &str {
        "http"
    }

    fn parse(&self, command: &Command, context: &CommandContext<'_>) -> ParsedCommand {
        let (method, path) = split_request_line(&command.command);
        let url = match context.endpoint {
            Some(endpoint) => endpoint.join(path),
            None => path.to_string(),
        };
        let options = context.options;

        let mut parameters = vec![
            Parameter::required("url", url),
            Parameter::optional("headers", render_headers(&command.headers)).multiline(),
            Parameter::optional("verify", options.verify_tls.to_string()),
            Parameter::optional("timeout", options.http_timeout.clone()),
        ];
        if let Some(body) = command.content.as_deref().filter(|b| !b.is_empty()) {
            parameters.push(Parameter::optional("body", body).multiline());
        }

        ParsedCommand {
            app_name: options.http_app.name.clone(),
            app_version: options.http_app.version.clone(),
            operation: method.to_string(),
            parameters,
        }
    }
}

/// Splits a request line into method and path. Without at least two tokens
/// the method defaults to `GET` and the whole line is the path.
pub fn split_request_line(line: &str) -> (&str, &str) {
    let mut tokens = line.split_whitespace();
    match (tokens.next(), tokens.next()) {
        (Some(method), Some(path)) => (method, path),
        _ => ("GET", line.trim()),
    }
}

/// One `"Key: Value\n"` line per header, using the first value, keys sorted.
pub fn render_headers(headers: &AHashMap<String, Vec<String>>) -> String {
    headers
        .iter()
        .filter_map(|(key, values)| values.first().map(|value| (key, value)))
        .sorted_by(|a, b| a.0.cmp(b.0))
        .map(|(key, value)| format!("{}: {}\n", key, value))
        .collect()
}

pub(super) fn register_default_parsers(registry: &mut AHashMap<String, Box<dyn CommandParser>>) {
    registry.insert("http".to_string(), Box::new(HttpCommandParser));
    registry.insert("http-api".to_string(), Box::new(HttpCommandParser));
}

pub(super) fn create_parser_by_name(name: &str) -> Option<Box<dyn CommandParser>> {
    match name {
        "http" | "http-api" => Some(Box::new(HttpCommandParser)),
        _ => None,
    }
}
