use std::{collections::HashMap, fs};

use serde::Deserialize;

use crate::{auth::make_basic_auth_header, error::Error};

#[derive(Deserialize, PartialEq, Debug, Default)]
pub struct Config {
    pub user_agent: Option<String>,
    #[serde(default)]
    pub headers: HashMap<String, String>,
    pub auth: Option<Auth>,
}

#[derive(Deserialize, PartialEq, Debug)]
pub struct Auth {
    pub username: String,
    pub token: String,
}

impl Config {
    pub fn read_from_toml_file(filename: &str) -> Result<Config, Error> {
        let contents = fs::read_to_string(filename)?;

        Self::from_toml(&contents)
    }

    pub fn from_toml(source: &str) -> Result<Config, Error> {
        let config: Self = toml::from_str(source)?;

        Ok(config)
    }

    /// Headers sent with every request: the `[headers]` table plus
    /// `User-Agent` and `Authorization` when configured.
    pub fn default_headers(&self) -> HashMap<String, String> {
        let mut headers = self.headers.clone();
        if let Some(user_agent) = &self.user_agent {
            headers.insert("User-Agent".to_owned(), user_agent.clone());
        }
        if let Some(auth) = &self.auth {
            headers.insert(
                "Authorization".to_owned(),
                make_basic_auth_header(&auth.username, &auth.token),
            );
        }

        headers
    }
}
