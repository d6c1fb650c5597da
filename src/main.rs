use std::{collections::HashMap, fs::File, io, path::Path};

use clap::{CommandFactory, Parser, Subcommand};

use httpcall::{config::Config, encode_bearer_token, make_request, Error};

#[derive(Parser)]
struct Args {
    /// Path to the TOML config file
    #[arg(long, default_value = "httpcall.toml")]
    config: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Send a request and write the response body to stdout
    Request {
        method: String,
        url: String,
        /// Header as "Name: value", may be repeated
        #[arg(short = 'H', long = "header")]
        headers: Vec<String>,
        /// Query parameter as "key=value", may be repeated
        #[arg(short = 'q', long = "param")]
        params: Vec<String>,
        #[arg(short = 'd', long, conflicts_with = "data_file")]
        data: Option<String>,
        #[arg(long)]
        data_file: Option<String>,
    },
    /// Print the base64 credential for a username and token
    Token { username: String, token: String },
}

fn main() -> Result<(), Error> {
    env_logger::init();

    let cli = Args::parse();
    log::debug!("{:?}", &cli.command);

    match cli.command {
        Some(Commands::Request { method, url, headers, params, data, data_file }) => {
            let config = load_config(&cli.config)?;

            let mut all_headers = config.default_headers();
            for header in &headers {
                let (name, value) = parse_header(header)?;
                all_headers.insert(name, value);
            }

            let mut query = HashMap::new();
            for param in &params {
                let (key, value) = parse_param(param)?;
                query.insert(key, value);
            }

            let result = match (data, data_file) {
                (Some(data), _) => make_request(&method, &url, &all_headers, Some(&mut data.as_bytes()), &query),
                (None, Some(path)) => {
                    let mut file = File::open(path)?;
                    make_request(&method, &url, &all_headers, Some(&mut file), &query)
                }
                (None, None) => make_request(&method, &url, &all_headers, None, &query),
            };
            let mut body = result.map_err(|e| {
                log::warn!("{method} {url} failed: {e}");
                e
            })?;

            io::copy(&mut body, &mut io::stdout().lock())?;
        }
        Some(Commands::Token { username, token }) => {
            println!("{}", encode_bearer_token(&username, &token));
        }
        None => {
            Args::command().print_help()?;
        }
    }

    Ok(())
}

fn load_config(filename: &str) -> Result<Config, Error> {
    if !Path::new(filename).exists() {
        log::info!("Config file {filename} doesn't exist, using defaults");
        return Ok(Config::default());
    }

    Config::read_from_toml_file(filename)
}

fn parse_header(arg: &str) -> Result<(String, String), Error> {
    let (name, value) = arg
        .split_once(':')
        .ok_or_else(|| Error::Argument(format!("header {arg:?} is not \"Name: value\"")))?;

    Ok((name.trim().to_owned(), value.trim().to_owned()))
}

fn parse_param(arg: &str) -> Result<(String, String), Error> {
    let (key, value) = arg
        .split_once('=')
        .ok_or_else(|| Error::Argument(format!("param {arg:?} is not \"key=value\"")))?;

    Ok((key.to_owned(), value.to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_header() {
        let (name, value) = parse_header("Accept: application/json").unwrap();

        assert_eq!(name, "Accept");
        assert_eq!(value, "application/json");
    }

    #[test]
    fn test_parse_header_keeps_colons_in_value() {
        let (name, value) = parse_header("X-Time:12:30").unwrap();

        assert_eq!(name, "X-Time");
        assert_eq!(value, "12:30");
    }

    #[test]
    fn test_parse_header_missing_colon() {
        assert!(matches!(parse_header("Accept"), Err(Error::Argument(_))));
    }

    #[test]
    fn test_parse_param() {
        let (key, value) = parse_param("filter=a=b").unwrap();

        assert_eq!(key, "filter");
        assert_eq!(value, "a=b");
        assert!(matches!(parse_param("limit"), Err(Error::Argument(_))));
    }

    #[test]
    fn test_args_parse_request() {
        let args = Args::try_parse_from([
            "httpcall", "request", "POST", "http://localhost/items",
            "-H", "Accept: text/plain", "-q", "a=1", "-d", "payload",
        ])
        .unwrap();

        match args.command {
            Some(Commands::Request { method, url, headers, params, data, data_file }) => {
                assert_eq!(method, "POST");
                assert_eq!(url, "http://localhost/items");
                assert_eq!(headers, vec!["Accept: text/plain".to_owned()]);
                assert_eq!(params, vec!["a=1".to_owned()]);
                assert_eq!(data.as_deref(), Some("payload"));
                assert!(data_file.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
        assert_eq!(args.config, "httpcall.toml");
    }
}
