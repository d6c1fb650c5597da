use std::{collections::HashMap, io::Read};

use url::Url;

use crate::error::{ConstructionError, Error, Status};

/// Body of a successful response. Dropping it releases the connection.
pub type ResponseBody = Box<dyn Read + Send + Sync + 'static>;

/// Issues a single blocking request and hands back the response body.
///
/// A fresh agent is built for every call, so nothing is shared between calls
/// and no timeout or retry is applied. Only a `200 OK` counts as success; any
/// other status, including other 2xx codes, is returned as
/// [`Error::RequestExecution`].
pub fn make_request(
    method: &str,
    url: &str,
    headers: &HashMap<String, String>,
    body: Option<&mut dyn Read>,
    params: &HashMap<String, String>,
) -> Result<ResponseBody, Error> {
    validate_method(method)?;
    let url = build_url(url, params)?;
    for (name, value) in headers {
        validate_header(name, value)?;
    }

    let agent = ureq::AgentBuilder::new().build();
    let mut request = agent.request_url(method, &url);
    for (name, value) in headers {
        request = request.set(name, value);
    }

    let result = match body {
        Some(reader) => request.send(reader),
        None => request.call(),
    };

    let resp = match result {
        Ok(resp) => resp,
        Err(ureq::Error::Status(code, resp)) => {
            return Err(rejected(code, resp.status_text()));
        }
        Err(err) => {
            return Err(Error::RequestExecution {
                status: None,
                source: Some(Box::new(err)),
            });
        }
    };

    if resp.status() != 200 {
        return Err(rejected(resp.status(), resp.status_text()));
    }

    Ok(resp.into_reader())
}

fn rejected(code: u16, text: &str) -> Error {
    Error::RequestExecution {
        status: Some(Status {
            code,
            text: text.to_owned(),
        }),
        source: None,
    }
}

/// Parses `url` and appends `params` as a percent-encoded, `&`-joined query.
///
/// Pairs are sorted by key and go after any query already on the url.
/// Control characters are rejected outright instead of being stripped or
/// escaped by the parser.
pub fn build_url(url: &str, params: &HashMap<String, String>) -> Result<Url, ConstructionError> {
    if url.chars().any(char::is_control) {
        return Err(ConstructionError::ControlCharacter(url.to_owned()));
    }
    let mut url = Url::parse(url)?;
    if params.is_empty() {
        return Ok(url);
    }

    let mut pairs: Vec<(&String, &String)> = params.iter().collect();
    pairs.sort();

    let encoded = pairs
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&");

    let query = match url.query() {
        Some(existing) if !existing.is_empty() => format!("{existing}&{encoded}"),
        _ => encoded,
    };
    url.set_query(Some(&query));

    Ok(url)
}

// RFC 7230 tchar
const fn is_token_char(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || matches!(
            c,
            '!' | '#' | '$' | '%' | '&' | '\'' | '*' | '+' | '-' | '.' | '^' | '_' | '`' | '|' | '~'
        )
}

fn is_token(s: &str) -> bool {
    !s.is_empty() && s.chars().all(is_token_char)
}

fn validate_method(method: &str) -> Result<(), ConstructionError> {
    if is_token(method) {
        Ok(())
    } else {
        Err(ConstructionError::Method(method.to_owned()))
    }
}

fn validate_header(name: &str, value: &str) -> Result<(), ConstructionError> {
    if !is_token(name) {
        return Err(ConstructionError::HeaderName(name.to_owned()));
    }
    if value.chars().any(|c| c.is_control() && c != '\t') {
        return Err(ConstructionError::HeaderValue(name.to_owned()));
    }

    Ok(())
}
