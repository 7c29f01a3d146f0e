// Copyright (C) 2025 Ryan Daum <ryan.daum@gmail.com> This program is free
// software: you can redistribute it and/or modify it under the terms of the GNU
// General Public License as published by the Free Software Foundation, version
// 3.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along with
// this program. If not, see <https://www.gnu.org/licenses/>.
//

use capstone_common::Params;
use capstone_var::normalize;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_PARAMETER_PREFIX: &str = "@";
/// Environment variables with this prefix override file and default settings.
pub const ENV_PREFIX: &str = "CAPSTONE_DB_";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Connection string handed to a real gateway. The in-memory gateway ignores it.
    pub connection: Option<String>,
    /// How the driver behind the gateway spells placeholders. Records always write `@NAME`;
    /// `bind_query` rewrites those to this prefix. `Params` keys never include it.
    pub parameter_prefix: String,
    /// YAML or JSON file of canned responses for the in-memory gateway.
    pub fixtures: Option<PathBuf>,
    /// Hand back every result set marked readonly.
    pub readonly_results: bool,
    /// Emit a debug event per gateway call.
    pub log_queries: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            connection: None,
            parameter_prefix: DEFAULT_PARAMETER_PREFIX.to_string(),
            fixtures: None,
            readonly_results: false,
            log_queries: true,
        }
    }
}

impl DatabaseConfig {
    /// Defaults, then the YAML file at `path` if one is given, then `CAPSTONE_DB_*` variables.
    pub fn load(path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::new().merge(Serialized::defaults(DatabaseConfig::default()));
        if let Some(path) = path {
            figment = figment.merge(Yaml::file(path));
        }
        figment.merge(Env::prefixed(ENV_PREFIX)).extract()
    }

    /// The placeholder for parameter `name` as it would appear in query text.
    pub fn placeholder(&self, name: &str) -> String {
        format!("{}{}", self.parameter_prefix, normalize(name))
    }

    /// Rewrite each `@NAME` placeholder for a bound parameter into this config's prefix. Text
    /// that names no bound parameter is left alone.
    pub fn bind_query(&self, query: &str, params: &Params) -> String {
        if self.parameter_prefix == DEFAULT_PARAMETER_PREFIX {
            return query.to_string();
        }
        let mut names: Vec<&str> = params.keys().map(String::as_str).collect();
        // Longest first, so `@CODE` never eats the head of `@CODE2`.
        names.sort_by_key(|name| std::cmp::Reverse(name.len()));
        names.into_iter().fold(query.to_string(), |query, name| {
            query.replace(
                &format!("{DEFAULT_PARAMETER_PREFIX}{name}"),
                &self.placeholder(name),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = DatabaseConfig::default();
        assert_eq!(config.parameter_prefix, "@");
        assert!(config.log_queries);
        assert!(!config.readonly_results);
        assert_eq!(config.placeholder(" termCode "), "@TERMCODE");
    }

    #[test]
    fn test_bind_query_rewrites_bound_placeholders() {
        let params = capstone_common::params([("CODE", "1"), ("CODE2", "2")]);
        let query = "SELECT * FROM t WHERE a = @CODE AND b = @CODE2 AND c = 'x@y'";

        let config = DatabaseConfig::default();
        assert_eq!(config.bind_query(query, &params), query);

        let config = DatabaseConfig {
            parameter_prefix: ":".into(),
            ..Default::default()
        };
        assert_eq!(
            config.bind_query(query, &params),
            "SELECT * FROM t WHERE a = :CODE AND b = :CODE2 AND c = 'x@y'"
        );
    }

    #[test]
    fn test_load_without_file_is_default() {
        let config = DatabaseConfig::load(None).unwrap();
        assert_eq!(config, DatabaseConfig::default());
    }

    #[test]
    fn test_yaml_overrides_defaults() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(
            file,
            "connection: \"server=localhost;database=capstone\"\n\
             parameter_prefix: \":\"\n\
             readonly_results: true\n\
             fixtures: /srv/capstone/fixtures.yaml"
        )
        .unwrap();

        let config = DatabaseConfig::load(Some(file.path())).unwrap();
        assert_eq!(
            config.connection.as_deref(),
            Some("server=localhost;database=capstone")
        );
        assert_eq!(config.placeholder("code"), ":CODE");
        assert!(config.readonly_results);
        assert!(config.log_queries);
        assert_eq!(
            config.fixtures,
            Some(PathBuf::from("/srv/capstone/fixtures.yaml"))
        );
    }

    #[test]
    fn test_malformed_yaml_is_error() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(file, "readonly_results: [not, a, bool]").unwrap();
        assert!(DatabaseConfig::load(Some(file.path())).is_err());
    }
}
