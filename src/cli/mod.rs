//! CLI argument parsing module
//!
//! This module handles command-line argument parsing and application entry point.

use std::str::FromStr;

use clap::{Arg, ArgAction, ArgMatches, Command};
use log::debug;
use serde_json::Value;

use crate::api::{ApiQueryRequest, ApiQueryResponse, HttpMethod, JsonSchema, Typed};
use crate::config::{ClientConfig, OutputConfig};
use crate::cookies::{legacy, CookieSource, EnvCookies, FileCookies, LiteralCookies};
use crate::error::{ApiError, Result};
use crate::exit_code::exit_code_for_error;
use crate::http::auth::Auth;
use crate::http::ApiClient;
use crate::output::OutputWriter;
use crate::utils::{FileUtils, StringUtils};

/// Main entry point for the CLI application. Returns the process exit code.
pub fn run() -> i32 {
    let matches = create_app().get_matches();
    let verbose = matches
        .subcommand()
        .map(|(_, sub)| sub.get_flag("verbose"))
        .unwrap_or(false);
    crate::logging::init(if verbose { "debug" } else { "warn" });

    let result = match matches.subcommand() {
        Some(("request", sub)) => run_request(sub),
        Some(("cookie", sub)) => run_cookie(sub),
        _ => Err(ApiError::Config("missing subcommand".to_string())),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("apiquery: error: {}", e);
            exit_code_for_error(&e)
        }
    }
}

fn verbose_arg() -> Arg {
    Arg::new("verbose")
        .short('v')
        .long("verbose")
        .help("Log request details to stderr")
        .action(ArgAction::SetTrue)
}

/// Create the CLI application structure
pub fn create_app() -> Command {
    Command::new("apiquery")
        .version(crate::VERSION)
        .about("Send typed JSON API requests and read cookie values")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(request_command())
        .subcommand(cookie_command())
}

fn request_command() -> Command {
    Command::new("request")
        .about("Send a request and print the status-tagged result as JSON")
        .arg(Arg::new("route")
            .help("Route relative to --base-url, or an absolute URL")
            .required(true)
            .index(1))
        .arg(Arg::new("method")
            .short('X')
            .long("request")
            .value_name("METHOD")
            .help("GET, POST, PUT, PATCH or DELETE")
            .default_value("GET"))
        .arg(Arg::new("data")
            .short('d')
            .long("data")
            .value_name("JSON")
            .help("JSON request body"))
        .arg(Arg::new("base-url")
            .long("base-url")
            .env("APIQUERY_BASE_URL")
            .value_name("URL")
            .help("Base URL for relative routes"))
        .arg(Arg::new("schema")
            .long("schema")
            .value_name("FILE")
            .help("JSON Schema the response body must satisfy"))
        .arg(Arg::new("header")
            .short('H')
            .long("header")
            .value_name("HEADER")
            .help("Add custom HTTP header")
            .action(ArgAction::Append))
        .arg(Arg::new("token")
            .long("token")
            .env("APIQUERY_TOKEN")
            .hide_env_values(true)
            .value_name("TOKEN")
            .help("Bearer token for the Authorization header"))
        .arg(Arg::new("user")
            .short('u')
            .long("user")
            .value_name("USER[:PASSWORD]")
            .help("HTTP basic authentication"))
        .arg(Arg::new("cookie")
            .short('b')
            .long("cookie")
            .value_name("NAME=VALUE[; ...]")
            .help("Cookies to send"))
        .arg(Arg::new("cookie-file")
            .long("cookie-file")
            .value_name("FILE")
            .conflicts_with("cookie")
            .help("Read cookies to send from a file"))
        .arg(Arg::new("timeout")
            .long("timeout")
            .value_name("DURATION")
            .help("Maximum time for the request")
            .default_value("30"))
        .arg(Arg::new("connect-timeout")
            .long("connect-timeout")
            .value_name("DURATION")
            .help("Maximum time for connection")
            .default_value("10"))
        .arg(Arg::new("insecure")
            .short('k')
            .long("insecure")
            .help("Allow insecure SSL connections")
            .action(ArgAction::SetTrue))
        .arg(Arg::new("pretty")
            .long("pretty")
            .help("Pretty-print the result")
            .action(ArgAction::SetTrue))
        .arg(Arg::new("output")
            .short('o')
            .long("output")
            .value_name("FILE")
            .help("Write output to file"))
        .arg(verbose_arg())
}

fn cookie_command() -> Command {
    Command::new("cookie")
        .about("Print the value of a named cookie")
        .arg(Arg::new("name")
            .help("Cookie name")
            .required(true)
            .index(1))
        .arg(Arg::new("cookie")
            .short('b')
            .long("cookie")
            .value_name("NAME=VALUE[; ...]")
            .help("Cookie string to search (defaults to $APIQUERY_COOKIE)"))
        .arg(Arg::new("cookie-file")
            .long("cookie-file")
            .value_name("FILE")
            .conflicts_with("cookie")
            .help("Read the cookie string from a file"))
        .arg(Arg::new("legacy")
            .long("legacy")
            .help("Use substring matching with the \"World !\" fallback")
            .action(ArgAction::SetTrue))
        .arg(verbose_arg())
}

fn cookie_source(matches: &ArgMatches) -> Result<Option<Box<dyn CookieSource>>> {
    if let Some(raw) = matches.get_one::<String>("cookie") {
        return Ok(Some(Box::new(LiteralCookies(raw.clone()))));
    }
    if let Some(path) = matches.get_one::<String>("cookie-file") {
        return Ok(Some(Box::new(FileCookies::new(FileUtils::expand_path(path)?))));
    }
    Ok(None)
}

fn run_cookie(matches: &ArgMatches) -> Result<i32> {
    let name = matches
        .get_one::<String>("name")
        .ok_or_else(|| ApiError::Config("missing cookie name".to_string()))?;
    let source: Box<dyn CookieSource> = match cookie_source(matches)? {
        Some(source) => source,
        None => Box::new(EnvCookies::default()),
    };
    let raw = source.read()?;

    if matches.get_flag("legacy") {
        println!("{}", legacy::get_cookie(&raw, name));
        return Ok(0);
    }

    match crate::cookies::parse(&raw).get(name) {
        Some(value) => {
            println!("{}", value);
            Ok(0)
        }
        None => {
            debug!("cookie {} not present", name);
            Ok(1)
        }
    }
}

/// Build client configuration from command line arguments
pub fn build_client_config(matches: &ArgMatches) -> Result<ClientConfig> {
    let mut config = ClientConfig::default();

    config.base_url = matches.get_one::<String>("base-url").cloned();

    if let Some(headers) = matches.get_many::<String>("header") {
        for header_str in headers {
            config.headers.push(StringUtils::parse_header(header_str)?);
        }
    }

    config.bearer_token = matches.get_one::<String>("token").cloned();

    if let Some(user_str) = matches.get_one::<String>("user") {
        let (username, password) = Auth::parse_user_pass(user_str)?;
        config.auth_username = Some(username);
        config.auth_password = Some(password);
    }

    if let Some(source) = cookie_source(matches)? {
        config.cookies = Some(source.jar()?);
    }

    if let Some(timeout_str) = matches.get_one::<String>("timeout") {
        config.timeout = StringUtils::parse_timeout(timeout_str)?;
    }

    if let Some(connect_timeout_str) = matches.get_one::<String>("connect-timeout") {
        config.connect_timeout = StringUtils::parse_timeout(connect_timeout_str)?;
    }

    config.verify_certs = !matches.get_flag("insecure");

    Ok(config)
}

/// Build the request descriptor from command line arguments
pub fn build_request(matches: &ArgMatches) -> Result<ApiQueryRequest<Value>> {
    let route = matches
        .get_one::<String>("route")
        .ok_or_else(|| ApiError::Config("missing route".to_string()))?;
    let method = match matches.get_one::<String>("method") {
        Some(method_str) => HttpMethod::from_str(method_str)?,
        None => HttpMethod::Get,
    };

    let request = match matches.get_one::<String>("schema") {
        Some(path) => {
            let schema = JsonSchema::<Value>::from_file(&FileUtils::expand_path(path)?)?;
            ApiQueryRequest::new(route.clone(), method, schema)
        }
        None => ApiQueryRequest::new(route.clone(), method, Typed::<Value>::new()),
    };

    match matches.get_one::<String>("data") {
        Some(data) => {
            let body: Value = serde_json::from_str(data)
                .map_err(|e| ApiError::Config(format!("--data is not valid JSON: {}", e)))?;
            request.with_json_body(body)
        }
        None => Ok(request),
    }
}

fn run_request(matches: &ArgMatches) -> Result<i32> {
    let config = build_client_config(matches)?;
    let request = build_request(matches)?;
    let output = OutputConfig {
        file: matches
            .get_one::<String>("output")
            .map(|path| FileUtils::expand_path(path))
            .transpose()?,
        pretty: matches.get_flag("pretty"),
    };

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| ApiError::Config(format!("Failed to create async runtime: {}", e)))?;

    let result = rt.block_on(async {
        let client = ApiClient::new(config)?;
        Ok::<_, ApiError>(client.try_send(&request).await)
    })?;

    let code = match &result {
        Ok(_) => 0,
        Err(err) => exit_code_for_error(err),
    };
    OutputWriter::new(output).write_response(&ApiQueryResponse::from(result))?;
    Ok(code)
}

#[cfg(test)]
mod tests {
    use super::{build_client_config, build_request, create_app};
    use crate::api::HttpMethod;
    use crate::error::ApiError;
    use clap::ArgMatches;
    use serde_json::json;
    use std::time::Duration;

    fn request_matches(args: &[&str]) -> ArgMatches {
        let mut argv = vec!["apiquery", "request"];
        argv.extend_from_slice(args);
        let matches = create_app().try_get_matches_from(argv).expect("parse args");
        matches
            .subcommand_matches("request")
            .expect("request subcommand")
            .clone()
    }

    #[test]
    fn build_request_reads_method_and_body() {
        let matches = request_matches(&["teams", "-X", "post", "-d", r#"{"name":"A"}"#]);
        let request = build_request(&matches).expect("request");
        assert_eq!(request.route(), "teams");
        assert_eq!(request.method(), HttpMethod::Post);
        assert_eq!(request.body(), Some(&json!({ "name": "A" })));
    }

    #[test]
    fn build_request_rejects_unknown_method() {
        let matches = request_matches(&["teams", "-X", "HEAD"]);
        let err = build_request(&matches).expect_err("HEAD unsupported");
        assert!(matches!(err, ApiError::Config(_)));
    }

    #[test]
    fn build_request_rejects_body_on_get() {
        let matches = request_matches(&["teams", "-d", "{}"]);
        let err = build_request(&matches).expect_err("GET with body");
        assert!(matches!(err, ApiError::Config(_)));
    }

    #[test]
    fn build_client_config_collects_transport_settings() {
        let matches = request_matches(&[
            "teams",
            "--base-url",
            "http://localhost:8882/api",
            "-H",
            "X-Project: 2",
            "--cookie",
            "sid=1; lang=fr",
            "--timeout",
            "5s",
            "-k",
        ]);
        let config = build_client_config(&matches).expect("config");
        assert_eq!(config.base_url.as_deref(), Some("http://localhost:8882/api"));
        assert_eq!(
            config.headers,
            vec![("X-Project".to_string(), "2".to_string())]
        );
        let jar = config.cookies.expect("cookies");
        assert_eq!(jar.get("lang"), Some("fr"));
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert!(!config.verify_certs);
    }
}
